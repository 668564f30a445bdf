use std::collections::{HashMap, HashSet};

use serde_json::Value;
use tracing::warn;

use gridwire_domain::{ClickAction, ColumnConfig, EventsConfig, RenderType};

use crate::interpolate::value_to_string;
use crate::registry::{CustomRenderFn, FunctionRegistry, RendererRegistry};

/// Color used for tag values with no configured mapping.
pub const DEFAULT_TAG_COLOR: &str = "default";

/// Everything the render resolver needs besides the column itself.
#[derive(Clone, Default)]
pub struct RenderContext {
    /// Click actions referenced by button/icon rules.
    pub click_actions: Vec<ClickAction>,
    /// Custom handler code for button clicks.
    pub button_handler_code: Option<String>,
    /// Custom handler code for icon clicks.
    pub icon_handler_code: Option<String>,
    /// Named click handlers (legacy global-function replacement).
    pub functions: FunctionRegistry,
    /// Custom render functions.
    pub renderers: RendererRegistry,
    /// Known icon names; `None` accepts every icon name.
    pub icon_catalog: Option<HashSet<String>>,
}

impl RenderContext {
    /// Builds a context from the table's event configuration and registries.
    #[must_use]
    pub fn from_events(
        events: &EventsConfig,
        functions: FunctionRegistry,
        renderers: RendererRegistry,
    ) -> Self {
        Self {
            click_actions: events.click_actions.clone(),
            button_handler_code: events.on_button_click.clone(),
            icon_handler_code: events.on_icon_click.clone(),
            functions,
            renderers,
            icon_catalog: None,
        }
    }

    fn knows_icon(&self, name: &str) -> bool {
        self.icon_catalog
            .as_ref()
            .is_none_or(|catalog| catalog.contains(name))
    }
}

/// Click behavior resolved for one button or icon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedClick {
    /// Runs a configured click action.
    Action(ClickAction),
    /// Runs custom handler code with `record`, `value`, `event` in scope.
    Handler(String),
    /// Invokes a registered named handler.
    Registered(String),
    /// Nothing resolved; dispatch warns and no-ops.
    Unresolved {
        /// Action identifier the rule pointed at, possibly empty.
        action_id: String,
    },
}

/// One rendered button cell element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedButton {
    /// Button label.
    pub label: String,
    /// Visual style for the presentation layer.
    pub button_type: String,
    /// Resolved click behavior.
    pub click: ResolvedClick,
}

/// One rendered icon cell element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedIcon {
    /// Icon name.
    pub icon: String,
    /// Icon color.
    pub color: String,
    /// Resolved click behavior.
    pub click: ResolvedClick,
}

/// Presentation-layer data produced for one cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderedCell {
    /// Plain text display.
    Text(String),
    /// A colored tag.
    Tag {
        /// Tag label.
        label: String,
        /// Tag color.
        color: String,
    },
    /// A row of buttons.
    Buttons(Vec<RenderedButton>),
    /// A row of icons.
    Icons(Vec<RenderedIcon>),
    /// Output of a custom render function.
    Custom(Value),
}

/// A pure cell mapping function: `(value, record)` to renderable data.
pub type ColumnRenderer = Box<dyn Fn(&Value, &Value) -> RenderedCell + Send + Sync>;

/// Resolves the click behavior for a button or icon rule.
///
/// Priority: a matching configured click action, then the configured custom
/// handler code, then a same-named registered function. A dangling action
/// reference falls through the chain and ends `Unresolved`.
#[must_use]
pub fn resolve_click(
    action_id: &str,
    handler_code: Option<&str>,
    context: &RenderContext,
) -> ResolvedClick {
    if !action_id.is_empty()
        && let Some(action) = context
            .click_actions
            .iter()
            .find(|action| action.identifier == action_id)
    {
        return ResolvedClick::Action(action.clone());
    }

    if let Some(code) = handler_code
        && !code.trim().is_empty()
    {
        return ResolvedClick::Handler(code.to_owned());
    }

    if !action_id.is_empty() && context.functions.contains(action_id) {
        return ResolvedClick::Registered(action_id.to_owned());
    }

    ResolvedClick::Unresolved {
        action_id: action_id.to_owned(),
    }
}

/// Turns a column's declarative render configuration into a pure mapping
/// function from `(value, record)` to presentation data.
#[must_use]
pub fn create_column_renderer(column: &ColumnConfig, context: &RenderContext) -> ColumnRenderer {
    match column.render_type {
        RenderType::Default => Box::new(|value, _record| RenderedCell::Text(value_to_string(value))),
        RenderType::Tags => tags_renderer(column),
        RenderType::Buttons => buttons_renderer(column, context),
        RenderType::Icons => icons_renderer(column, context),
        RenderType::Custom => custom_renderer(column, context),
    }
}

fn tags_renderer(column: &ColumnConfig) -> ColumnRenderer {
    let colors: HashMap<String, String> = column
        .render_config
        .color_map
        .as_ref()
        .map(|rules| {
            rules
                .entries()
                .into_iter()
                .map(|rule| (rule.value, rule.color))
                .collect()
        })
        .unwrap_or_default();
    let uppercase = column.render_config.uppercase;

    Box::new(move |value, _record| {
        let raw = value_to_string(value);
        let color = colors
            .get(raw.as_str())
            .filter(|color| !color.is_empty())
            .cloned()
            .unwrap_or_else(|| DEFAULT_TAG_COLOR.to_owned());
        let label = if uppercase { raw.to_uppercase() } else { raw };

        RenderedCell::Tag { label, color }
    })
}

fn buttons_renderer(column: &ColumnConfig, context: &RenderContext) -> ColumnRenderer {
    let handler_code = context.button_handler_code.as_deref();
    let buttons: Vec<RenderedButton> = column
        .render_config
        .buttons
        .as_ref()
        .map(|rules| rules.entries())
        .unwrap_or_default()
        .into_iter()
        .map(|rule| RenderedButton {
            click: resolve_click(rule.action_id.as_str(), handler_code, context),
            label: rule.label,
            button_type: rule.button_type,
        })
        .collect();

    Box::new(move |_value, _record| RenderedCell::Buttons(buttons.clone()))
}

fn icons_renderer(column: &ColumnConfig, context: &RenderContext) -> ColumnRenderer {
    let handler_code = context.icon_handler_code.as_deref();
    let icons: Vec<RenderedIcon> = column
        .render_config
        .icons
        .as_ref()
        .map(|rules| rules.entries())
        .unwrap_or_default()
        .into_iter()
        .filter(|rule| {
            let known = context.knows_icon(rule.icon.as_str());
            if !known {
                warn!(icon = rule.icon, "unknown icon name skipped");
            }
            known
        })
        .map(|rule| RenderedIcon {
            click: resolve_click(rule.action_id.as_str(), handler_code, context),
            icon: rule.icon,
            color: rule.color,
        })
        .collect();

    Box::new(move |_value, _record| RenderedCell::Icons(icons.clone()))
}

fn custom_renderer(column: &ColumnConfig, context: &RenderContext) -> ColumnRenderer {
    let name = column
        .render_config
        .render_function
        .clone()
        .unwrap_or_default();
    let renderer: Option<CustomRenderFn> = context.renderers.get(name.as_str()).cloned();

    Box::new(move |value, record| match &renderer {
        Some(render) => RenderedCell::Custom(render(value, record)),
        None => {
            warn!(
                render_function = name,
                "custom render function not registered, using raw value"
            );
            RenderedCell::Text(value_to_string(value))
        }
    })
}
