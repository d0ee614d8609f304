//! Database Models
//!
//! Document shapes as stored in SurrealDB. The record id is read back from
//! the store and never written into document content; references to other
//! documents are kept as `"table:key"` strings.

pub mod category;
pub mod dining_table;
pub mod menu_item;
pub mod order;

// Re-exports
pub use category::CategoryRecord;
pub use dining_table::DiningTableRecord;
pub use menu_item::MenuItemRecord;
pub use order::{OrderItemRecord, OrderRecord};

use surrealdb::RecordId;

/// Render a stored record id in its public `"table:key"` form
pub(crate) fn id_string(id: &Option<RecordId>) -> String {
    id.as_ref().map(|id| id.to_string()).unwrap_or_default()
}
