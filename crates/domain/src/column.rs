use gridwire_core::{TableError, TableResult};
use serde::{Deserialize, Serialize};

/// Column render strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RenderType {
    /// Plain stringified display.
    #[default]
    Default,
    /// Colored tag per cell value.
    Tags,
    /// One or more action buttons per cell.
    Buttons,
    /// One or more clickable icons per cell.
    Icons,
    /// Delegates to a registered custom render function.
    Custom,
}

/// Maps one cell value to a tag color.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagStyleRule {
    /// Cell value to match exactly.
    pub value: String,
    /// Tag color for matching values.
    #[serde(default)]
    pub color: String,
}

impl TagStyleRule {
    /// Parses the compact `"value:color,value2:color2"` form.
    #[must_use]
    pub fn parse_compact(spec: &str) -> Vec<Self> {
        spec.split(',')
            .filter_map(|entry| {
                let entry = entry.trim();
                if entry.is_empty() {
                    return None;
                }

                let mut parts = entry.splitn(2, ':');
                let value = parts.next().unwrap_or_default().trim().to_owned();
                if value.is_empty() {
                    return None;
                }

                let color = parts.next().unwrap_or_default().trim().to_owned();
                Some(Self { value, color })
            })
            .collect()
    }
}

/// One button definition for a `buttons` column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ButtonRule {
    /// Button label.
    pub label: String,
    /// Visual button style as understood by the presentation layer.
    #[serde(rename = "type", default)]
    pub button_type: String,
    /// Identifier of the click action this button triggers.
    #[serde(default)]
    pub action_id: String,
}

impl ButtonRule {
    /// Parses the compact `"label:type:actionId,..."` form.
    #[must_use]
    pub fn parse_compact(spec: &str) -> Vec<Self> {
        spec.split(',')
            .filter_map(|entry| {
                let entry = entry.trim();
                if entry.is_empty() {
                    return None;
                }

                let mut parts = entry.splitn(3, ':');
                let label = parts.next().unwrap_or_default().trim().to_owned();
                if label.is_empty() {
                    return None;
                }

                Some(Self {
                    label,
                    button_type: parts.next().unwrap_or_default().trim().to_owned(),
                    action_id: parts.next().unwrap_or_default().trim().to_owned(),
                })
            })
            .collect()
    }
}

/// One icon definition for an `icons` column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IconRule {
    /// Icon name in the host icon set.
    pub icon: String,
    /// Icon color.
    #[serde(default)]
    pub color: String,
    /// Identifier of the click action this icon triggers.
    #[serde(default)]
    pub action_id: String,
}

impl IconRule {
    /// Parses the compact `"IconName:color:actionId,..."` form.
    #[must_use]
    pub fn parse_compact(spec: &str) -> Vec<Self> {
        spec.split(',')
            .filter_map(|entry| {
                let entry = entry.trim();
                if entry.is_empty() {
                    return None;
                }

                let mut parts = entry.splitn(3, ':');
                let icon = parts.next().unwrap_or_default().trim().to_owned();
                if icon.is_empty() {
                    return None;
                }

                Some(Self {
                    icon,
                    color: parts.next().unwrap_or_default().trim().to_owned(),
                    action_id: parts.next().unwrap_or_default().trim().to_owned(),
                })
            })
            .collect()
    }
}

/// Tag color rules, in compact or structured form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TagRules {
    /// Legacy `"value:color,..."` string.
    Compact(String),
    /// Structured rule list, the primary format.
    Rules(Vec<TagStyleRule>),
}

impl TagRules {
    /// Returns the effective ordered rule list.
    #[must_use]
    pub fn entries(&self) -> Vec<TagStyleRule> {
        match self {
            Self::Compact(spec) => TagStyleRule::parse_compact(spec),
            Self::Rules(rules) => rules.clone(),
        }
    }
}

/// Button rules, in compact or structured form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ButtonRules {
    /// Legacy `"label:type:actionId,..."` string.
    Compact(String),
    /// Structured rule list, the primary format.
    Rules(Vec<ButtonRule>),
}

impl ButtonRules {
    /// Returns the effective ordered rule list.
    #[must_use]
    pub fn entries(&self) -> Vec<ButtonRule> {
        match self {
            Self::Compact(spec) => ButtonRule::parse_compact(spec),
            Self::Rules(rules) => rules.clone(),
        }
    }
}

/// Icon rules, in compact or structured form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IconRules {
    /// Legacy `"IconName:color:actionId,..."` string.
    Compact(String),
    /// Structured rule list, the primary format.
    Rules(Vec<IconRule>),
}

impl IconRules {
    /// Returns the effective ordered rule list.
    #[must_use]
    pub fn entries(&self) -> Vec<IconRule> {
        match self {
            Self::Compact(spec) => IconRule::parse_compact(spec),
            Self::Rules(rules) => rules.clone(),
        }
    }
}

/// Render settings whose interpretation depends on the column render type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct RenderConfig {
    /// Value-to-color rules for `tags` columns.
    pub color_map: Option<TagRules>,
    /// Whether tag labels are uppercased.
    pub uppercase: bool,
    /// Button definitions for `buttons` columns.
    pub buttons: Option<ButtonRules>,
    /// Icon definitions for `icons` columns.
    pub icons: Option<IconRules>,
    /// Registered render function name for `custom` columns.
    pub render_function: Option<String>,
}

/// One column of the table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnConfig {
    /// Unique column key.
    pub key: String,
    /// Column header title.
    pub title: String,
    /// Record field displayed in this column.
    #[serde(default)]
    pub data_index: String,
    /// Whether the column is sortable.
    #[serde(default)]
    pub sortable: bool,
    /// Whether plain cells are clickable.
    #[serde(default)]
    pub clickable: bool,
    /// Optional fixed width in pixels.
    #[serde(default)]
    pub width: Option<u32>,
    /// Render strategy.
    #[serde(default)]
    pub render_type: RenderType,
    /// Render settings for the chosen strategy.
    #[serde(default)]
    pub render_config: RenderConfig,
}

impl ColumnConfig {
    /// Returns whether the column produces display output without a
    /// `dataIndex`, because its render strategy supplies it.
    #[must_use]
    pub fn renders_without_data_index(&self) -> bool {
        match self.render_type {
            RenderType::Buttons | RenderType::Icons => true,
            RenderType::Custom => self.render_config.render_function.is_some(),
            RenderType::Default | RenderType::Tags => false,
        }
    }

    /// Checks the column definition for validity.
    pub fn validate(&self) -> TableResult<()> {
        if self.key.trim().is_empty() {
            return Err(TableError::Config("column key is required".to_owned()));
        }

        if self.title.trim().is_empty() {
            return Err(TableError::Config(format!(
                "column '{}' requires a title",
                self.key
            )));
        }

        if self.data_index.trim().is_empty() && !self.renders_without_data_index() {
            return Err(TableError::Config(format!(
                "column '{}' requires a dataIndex or a render configuration",
                self.key
            )));
        }

        if self.width == Some(0) {
            return Err(TableError::Config(format!(
                "column '{}' width must be greater than zero",
                self.key
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::{
        ButtonRule, ColumnConfig, IconRule, RenderConfig, RenderType, TagRules, TagStyleRule,
    };

    #[test]
    fn compact_tag_rules_parse_in_order() {
        let rules = TagStyleRule::parse_compact("active:green, inactive:red");
        assert_eq!(rules.len(), 2);
        assert_eq!(rules[0].value, "active");
        assert_eq!(rules[0].color, "green");
        assert_eq!(rules[1].value, "inactive");
        assert_eq!(rules[1].color, "red");
    }

    #[test]
    fn compact_tag_rules_skip_blank_entries() {
        let rules = TagStyleRule::parse_compact("active:green,, :blue ,");
        assert_eq!(rules.len(), 1);
    }

    #[test]
    fn compact_button_rules_parse_triples() {
        let rules = ButtonRule::parse_compact("Edit:primary:edit_record,Delete:danger:delete_record");
        assert_eq!(rules.len(), 2);
        assert_eq!(rules[0].label, "Edit");
        assert_eq!(rules[0].button_type, "primary");
        assert_eq!(rules[0].action_id, "edit_record");
    }

    #[test]
    fn compact_button_rules_tolerate_missing_parts() {
        let rules = ButtonRule::parse_compact("View");
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].label, "View");
        assert_eq!(rules[0].button_type, "");
        assert_eq!(rules[0].action_id, "");
    }

    #[test]
    fn compact_icon_rules_parse_triples() {
        let rules = IconRule::parse_compact("EyeOutlined:blue:open_record");
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].icon, "EyeOutlined");
        assert_eq!(rules[0].color, "blue");
        assert_eq!(rules[0].action_id, "open_record");
    }

    #[test]
    fn tag_rules_accept_both_wire_forms() {
        let compact: Result<TagRules, _> = serde_json::from_value(serde_json::json!("a:red"));
        let structured: Result<TagRules, _> =
            serde_json::from_value(serde_json::json!([{"value": "a", "color": "red"}]));

        assert_eq!(compact.ok().map(|rules| rules.entries().len()), Some(1));
        assert_eq!(structured.ok().map(|rules| rules.entries().len()), Some(1));
    }

    #[test]
    fn button_column_is_valid_without_data_index() {
        let column = ColumnConfig {
            key: "ops".to_owned(),
            title: "Operations".to_owned(),
            data_index: String::new(),
            sortable: false,
            clickable: false,
            width: None,
            render_type: RenderType::Buttons,
            render_config: RenderConfig::default(),
        };
        assert!(column.validate().is_ok());
    }

    #[test]
    fn default_column_requires_data_index() {
        let column = ColumnConfig {
            key: "name".to_owned(),
            title: "Name".to_owned(),
            data_index: String::new(),
            sortable: false,
            clickable: false,
            width: None,
            render_type: RenderType::Default,
            render_config: RenderConfig::default(),
        };
        assert!(column.validate().is_err());
    }

    proptest! {
        #[test]
        fn compact_parsers_never_panic(spec in ".{0,120}") {
            let tags = TagStyleRule::parse_compact(&spec);
            let buttons = ButtonRule::parse_compact(&spec);
            let icons = IconRule::parse_compact(&spec);

            let groups = spec.split(',').count();
            prop_assert!(tags.len() <= groups);
            prop_assert!(buttons.len() <= groups);
            prop_assert!(icons.len() <= groups);
        }
    }
}
