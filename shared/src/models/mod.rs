//! Data models
//!
//! Shared between dine-server and its clients (via API).
//! All IDs are SurrealDB record ids in `"table:key"` string form.

pub mod category;
pub mod dining_table;
pub mod menu_item;
pub mod order;

// Re-exports
pub use category::*;
pub use dining_table::*;
pub use menu_item::*;
pub use order::*;
