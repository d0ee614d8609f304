//! Dine Server - restaurant order lifecycle service
//!
//! # Modules
//!
//! ```text
//! dine-server/src/
//! ├── core/      # config, state, server, startup errors
//! ├── auth/      # JWT gate for mutating routes
//! ├── api/       # HTTP routes and handlers
//! ├── db/        # embedded SurrealDB, records, repositories
//! ├── orders/    # order lifecycle and table occupancy
//! └── utils/     # logging, error re-exports
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod orders;
pub mod utils;

pub use auth::{CurrentUser, JwtService};
pub use crate::core::{Config, Server, ServerState, build_app};
pub use orders::OrdersManager;
pub use utils::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
pub use utils::logger::{init_logger, init_logger_with_file};

// Security logging macro, accepts tracing field values
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}

/// Load `.env` and start logging
///
/// Logging is configured from `LOG_LEVEL`, `LOG_JSON` and `LOG_DIR`
/// before the full [`Config`] is read, so configuration errors are logged.
pub fn setup_environment() {
    let dotenv_loaded = dotenv::dotenv().is_ok();

    let log_level = std::env::var("LOG_LEVEL").ok();
    let log_json = std::env::var("LOG_JSON")
        .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
        .unwrap_or(false);
    let log_dir = std::env::var("LOG_DIR").ok().filter(|v| !v.trim().is_empty());
    init_logger_with_file(log_level.as_deref(), log_json, log_dir.as_deref());

    if dotenv_loaded {
        tracing::debug!("Loaded .env");
    }
}
