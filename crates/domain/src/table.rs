use std::collections::HashSet;

use gridwire_core::{NonEmptyString, TableError, TableId, TableResult};
use serde::{Deserialize, Serialize};

use crate::actions::EventsConfig;
use crate::api::ApiConnectionConfig;
use crate::column::ColumnConfig;
use crate::error_rules::ErrorHandlerRule;
use crate::mapping::ResponseMapping;
use crate::pagination::PaginationConfig;
use crate::params::{PathParam, QueryParam};

/// The full declarative configuration of one table, in the shape persisted
/// by the builder UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct TableConfig {
    /// Remote API connection.
    pub api: ApiConnectionConfig,
    /// Path placeholder substitutions.
    pub path_params: Vec<PathParam>,
    /// Query-string parameters.
    pub query_params: Vec<QueryParam>,
    /// Pagination encoding.
    pub pagination: PaginationConfig,
    /// Response-shape mapping.
    pub mapping: ResponseMapping,
    /// Column definitions.
    pub columns: Vec<ColumnConfig>,
    /// Click actions and event handlers.
    pub events: EventsConfig,
    /// HTTP error handler rules.
    pub error_handlers: Vec<ErrorHandlerRule>,
}

impl TableConfig {
    /// Validates the whole configuration tree.
    ///
    /// Dangling action references from column rules are deliberately NOT an
    /// error here; they degrade to a warned no-op at render time.
    pub fn validate(&self) -> TableResult<()> {
        self.api.validate()?;
        self.pagination.validate()?;

        let mut seen_keys = HashSet::new();
        for column in &self.columns {
            column.validate()?;
            if !seen_keys.insert(column.key.as_str()) {
                return Err(TableError::Config(format!(
                    "duplicate column key '{}'",
                    column.key
                )));
            }
        }

        self.events.validate()?;

        for handler in &self.error_handlers {
            handler.validate()?;
        }

        Ok(())
    }
}

/// The owning record for one configured table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableDefinition {
    id: TableId,
    name: NonEmptyString,
    description: Option<String>,
    config: TableConfig,
}

impl TableDefinition {
    /// Creates a table record around a validated configuration.
    pub fn new(
        name: impl Into<String>,
        description: Option<String>,
        config: TableConfig,
    ) -> TableResult<Self> {
        config.validate()?;

        let description = description.and_then(|value| {
            let trimmed = value.trim().to_owned();
            (!trimmed.is_empty()).then_some(trimmed)
        });

        Ok(Self {
            id: TableId::new(),
            name: NonEmptyString::new(name)?,
            description,
            config,
        })
    }

    /// Returns the table identifier.
    #[must_use]
    pub fn id(&self) -> TableId {
        self.id
    }

    /// Returns the table name.
    #[must_use]
    pub fn name(&self) -> &NonEmptyString {
        &self.name
    }

    /// Returns the optional description.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the table configuration.
    #[must_use]
    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    /// Returns a copy of this record carrying a new validated configuration.
    pub fn with_config(&self, config: TableConfig) -> TableResult<Self> {
        config.validate()?;
        Ok(Self {
            id: self.id,
            name: self.name.clone(),
            description: self.description.clone(),
            config,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{TableConfig, TableDefinition};
    use crate::api::ApiConnectionConfig;
    use crate::column::{ColumnConfig, RenderConfig, RenderType};

    fn valid_config() -> TableConfig {
        TableConfig {
            api: ApiConnectionConfig {
                base_url: "https://api.example.com".to_owned(),
                path: "/users".to_owned(),
                ..ApiConnectionConfig::default()
            },
            columns: vec![ColumnConfig {
                key: "name".to_owned(),
                title: "Name".to_owned(),
                data_index: "name".to_owned(),
                sortable: true,
                clickable: false,
                width: None,
                render_type: RenderType::Default,
                render_config: RenderConfig::default(),
            }],
            ..TableConfig::default()
        }
    }

    #[test]
    fn full_wire_config_parses() {
        let parsed: Result<TableConfig, _> = serde_json::from_value(serde_json::json!({
            "api": {"baseURL": "https://api.x.com", "path": "/users/{id}"},
            "pathParams": [{"name": "id", "value": "42", "enabled": true}],
            "queryParams": [
                {"name": "page", "value": "1", "enabled": true, "reference": "PAGE_CHANGE"}
            ],
            "pagination": {
                "enabled": true,
                "pageNumberParam": "page",
                "pageSizeParam": "size",
                "defaultPageSize": 20,
                "startFrom": 0
            },
            "mapping": {"dataPath": "data", "totalItems": "totalCount"},
            "columns": [
                {"key": "name", "title": "Name", "dataIndex": "name"},
                {
                    "key": "ops",
                    "title": "Operations",
                    "renderType": "buttons",
                    "renderConfig": {"buttons": "Edit:primary:edit_record"}
                }
            ],
            "events": {
                "clickActions": [{
                    "identifier": "edit_record",
                    "elementType": "button",
                    "actionType": "navigate",
                    "navigateUrl": "/users/{id}/edit"
                }],
                "rowClick": {"enabled": true, "selectedAction": "edit_record", "mode": "action"}
            },
            "errorHandlers": [{"status": "404", "message": "Not found", "action": "log"}]
        }));

        let Ok(config) = parsed else {
            panic!("config should deserialize");
        };
        assert!(config.validate().is_ok());
        assert_eq!(config.columns.len(), 2);
    }

    #[test]
    fn duplicate_column_keys_are_rejected() {
        let mut config = valid_config();
        let duplicate = config.columns[0].clone();
        config.columns.push(duplicate);
        assert!(config.validate().is_err());
    }

    #[test]
    fn definition_requires_valid_config() {
        let config = TableConfig::default();
        assert!(TableDefinition::new("Users", None, config).is_err());
    }

    #[test]
    fn definition_normalizes_blank_description() {
        let definition = TableDefinition::new("Users", Some("  ".to_owned()), valid_config());
        assert!(definition.is_ok());
        let definition = definition.unwrap_or_else(|_| unreachable!());
        assert_eq!(definition.description(), None);
    }
}
