//! Order Lifecycle Module
//!
//! Owns the rules that keep an order and its dining table consistent:
//!
//! - **manager**: `OrdersManager`, the create / status / update / delete / query operations
//! - **traits**: narrow storage seams (`OrderStore`, `TableRegistry`, `MenuCatalog`)
//! - **validation**: payload checks that run before any write
//!
//! # Architecture
//!
//! ```text
//! HTTP handler → OrdersManager ─┬─ 1. validate payload
//!                               ├─ 2. read table / menu items
//!                               ├─ 3. write order document
//!                               └─ 4. write table (occupy / release)
//! ```
//!
//! Steps 3 and 4 are two independent single-document writes. There is no
//! transaction around them: a failure in step 4 leaves the order written.

pub mod manager;
pub mod traits;
pub mod validation;

// Re-exports
pub use manager::{ManagerError, ManagerResult, OrdersManager};
pub use traits::{MenuCatalog, OrderStore, TableRegistry};
