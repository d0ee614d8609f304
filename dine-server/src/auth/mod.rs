//! Authentication gate
//!
//! - [`JwtService`] - token validation
//! - [`CurrentUser`] - authenticated caller
//! - [`require_auth`] - middleware for mutating routes

pub mod extractor;
pub mod jwt;
pub mod middleware;

pub use jwt::{Claims, CurrentUser, JwtConfig, JwtError, JwtService};
pub use middleware::require_auth;
