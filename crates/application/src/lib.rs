//! The configuration interpretation pipeline: request construction,
//! response mapping, render resolution, and action execution.

#![forbid(unsafe_code)]

mod action_ports;
mod actions;
mod click;
mod data_ports;
mod dynamic_params;
mod interpolate;
mod json_path;
mod registry;
mod render;
mod request;
mod response_mapper;
mod table_service;

pub use action_ports::{
    ActionHttpClient, ActionRequest, Clipboard, ConfirmationGate, DownloadDelegate, Navigator,
    NotificationLevel, Notifier, ScriptBindings, ScriptEngine,
};
pub use actions::{ActionExecutor, ActionOutcome};
pub use click::ClickDispatcher;
pub use data_ports::{TableDataSource, TableRepository};
pub use dynamic_params::{DynamicParams, DynamicValueMap};
pub use interpolate::{interpolate, interpolate_opt, value_to_string};
pub use json_path::nested_value;
pub use registry::{CustomRenderFn, FunctionRegistry, NamedClickHandler, RendererRegistry};
pub use render::{
    ColumnRenderer, DEFAULT_TAG_COLOR, RenderContext, RenderedButton, RenderedCell, RenderedIcon,
    ResolvedClick, create_column_renderer, resolve_click,
};
pub use request::{
    RequestDescriptor, append_query_fragment, build_api_url, build_pagination_params,
    build_query_string, build_request, interpolate_path_params, unresolved_placeholders,
};
pub use response_mapper::{NormalizedPage, apply_mapping};
pub use table_service::{
    ErrorDisposition, PageLoad, TableDataService, resolve_error_disposition,
};
