use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use gridwire_application::TableRepository;
use gridwire_core::{TableId, TableResult};
use gridwire_domain::TableDefinition;

/// In-memory table repository for development and tests.
#[derive(Debug, Default)]
pub struct InMemoryTableRepository {
    tables: RwLock<HashMap<TableId, TableDefinition>>,
}

impl InMemoryTableRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self {
            tables: RwLock::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl TableRepository for InMemoryTableRepository {
    async fn save_table(&self, table: TableDefinition) -> TableResult<()> {
        self.tables.write().await.insert(table.id(), table);
        Ok(())
    }

    async fn list_tables(&self) -> TableResult<Vec<TableDefinition>> {
        let tables = self.tables.read().await;

        let mut values: Vec<TableDefinition> = tables.values().cloned().collect();
        values.sort_by(|left, right| left.name().as_str().cmp(right.name().as_str()));

        Ok(values)
    }

    async fn find_table(&self, id: TableId) -> TableResult<Option<TableDefinition>> {
        Ok(self.tables.read().await.get(&id).cloned())
    }

    async fn delete_table(&self, id: TableId) -> TableResult<()> {
        self.tables.write().await.remove(&id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use gridwire_application::TableRepository;
    use gridwire_domain::{ApiConnectionConfig, ColumnConfig, TableConfig, TableDefinition};

    use super::InMemoryTableRepository;

    fn table(name: &str) -> TableDefinition {
        let config = TableConfig {
            api: ApiConnectionConfig {
                base_url: "https://api.example.com".to_owned(),
                ..ApiConnectionConfig::default()
            },
            columns: vec![ColumnConfig {
                key: "id".to_owned(),
                title: "Id".to_owned(),
                data_index: "id".to_owned(),
                sortable: false,
                clickable: false,
                width: None,
                render_type: gridwire_domain::RenderType::Default,
                render_config: gridwire_domain::RenderConfig::default(),
            }],
            ..TableConfig::default()
        };

        TableDefinition::new(name, None, config).unwrap_or_else(|_| unreachable!())
    }

    #[tokio::test]
    async fn save_find_and_delete_round_trip() {
        let repository = InMemoryTableRepository::new();
        let saved = table("Users");
        let id = saved.id();

        let result = repository.save_table(saved).await;
        assert!(result.is_ok());

        let found = repository.find_table(id).await;
        assert!(found.is_ok_and(|table| table.is_some()));

        let result = repository.delete_table(id).await;
        assert!(result.is_ok());

        let found = repository.find_table(id).await;
        assert!(found.is_ok_and(|table| table.is_none()));
    }

    #[tokio::test]
    async fn listing_sorts_by_name() {
        let repository = InMemoryTableRepository::new();
        for name in ["Orders", "Accounts", "Users"] {
            let result = repository.save_table(table(name)).await;
            assert!(result.is_ok());
        }

        let listed = repository.list_tables().await.unwrap_or_default();
        let names: Vec<&str> = listed.iter().map(|table| table.name().as_str()).collect();
        assert_eq!(names, vec!["Accounts", "Orders", "Users"]);
    }

    #[tokio::test]
    async fn save_replaces_the_same_id() {
        let repository = InMemoryTableRepository::new();
        let original = table("Users");
        let id = original.id();

        let result = repository.save_table(original.clone()).await;
        assert!(result.is_ok());

        let updated = original.with_config(original.config().clone());
        assert!(updated.is_ok());
        let updated = updated.unwrap_or_else(|_| unreachable!());
        let result = repository.save_table(updated).await;
        assert!(result.is_ok());

        let listed = repository.list_tables().await.unwrap_or_default();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id(), id);
    }
}
