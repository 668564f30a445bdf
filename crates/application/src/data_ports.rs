use async_trait::async_trait;
use serde_json::Value;

use gridwire_core::{TableId, TableResult};
use gridwire_domain::TableDefinition;

use crate::request::RequestDescriptor;

/// Transport port for table data loads.
///
/// Implementations execute the descriptor and return the parsed JSON body on
/// 2xx; non-2xx statuses surface as `TableError::HttpStatus`, timeouts as
/// `TableError::Timeout`, and transport failures as `TableError::Network`.
#[async_trait]
pub trait TableDataSource: Send + Sync {
    /// Executes one data request.
    async fn fetch(&self, request: RequestDescriptor) -> TableResult<Value>;
}

/// Repository port for the owning table records.
///
/// The surrounding application persists configurations; the core only reads
/// and writes plain records through this boundary.
#[async_trait]
pub trait TableRepository: Send + Sync {
    /// Saves a table record, replacing an existing one with the same id.
    async fn save_table(&self, table: TableDefinition) -> TableResult<()>;

    /// Lists all table records, sorted by name.
    async fn list_tables(&self) -> TableResult<Vec<TableDefinition>>;

    /// Returns one table record by id.
    async fn find_table(&self, id: TableId) -> TableResult<Option<TableDefinition>>;

    /// Deletes one table record by id.
    async fn delete_table(&self, id: TableId) -> TableResult<()>;
}
