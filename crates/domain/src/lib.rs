//! Declarative table configuration model and its invariants.

#![forbid(unsafe_code)]

mod actions;
mod api;
mod column;
mod error_rules;
mod mapping;
mod pagination;
mod params;
mod table;

pub use actions::{
    ActionBehavior, ClickAction, ElementType, EventsConfig, HttpMethod, RowClickConfig,
    RowClickMode,
};
pub use api::{ApiConnectionConfig, KeyValuePair};
pub use column::{
    ButtonRule, ButtonRules, ColumnConfig, IconRule, IconRules, RenderConfig, RenderType,
    TagRules, TagStyleRule,
};
pub use error_rules::{ErrorHandlerAction, ErrorHandlerRule};
pub use mapping::ResponseMapping;
pub use pagination::{PageOrigin, PaginationConfig};
pub use params::{ParamReference, PathParam, QueryParam};
pub use table::{TableConfig, TableDefinition};
