//! Server Implementation
//!
//! Router assembly and the HTTP serve loop

use axum::{Router, middleware};
use http::{HeaderName, HeaderValue, Method};
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::request_id::{
    MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::auth::require_auth;
use crate::core::{Config, Result, ServerError, ServerState};

const REQUEST_ID_HEADER: &str = "x-request-id";

/// UUID v4 request ids
#[derive(Clone)]
struct XRequestId;

impl MakeRequestId for XRequestId {
    fn make_request_id<B>(&mut self, _request: &http::Request<B>) -> Option<RequestId> {
        HeaderValue::from_str(&Uuid::new_v4().to_string())
            .ok()
            .map(RequestId::new)
    }
}

/// All API routes, no middleware, no state
pub fn build_router() -> Router<ServerState> {
    Router::new()
        .merge(crate::api::health::router())
        .merge(crate::api::orders::router())
        .merge(crate::api::tables::router())
        .merge(crate::api::categories::router())
        .merge(crate::api::menu_items::router())
}

/// Fully configured application: routes, middleware and state
///
/// Used by the HTTP server and by tests through `oneshot`.
pub fn build_app(state: ServerState) -> Router {
    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);
    let cors = cors_layer(&state.config);
    let body_limit = state.config.request_body_limit;

    build_router()
        .layer(middleware::from_fn_with_state(state.clone(), require_auth))
        .with_state(state)
        .layer(RequestBodyLimitLayer::new(body_limit))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::new(request_id.clone()))
        .layer(SetRequestIdLayer::new(request_id, XRequestId))
}

fn cors_layer(config: &Config) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([http::header::AUTHORIZATION, http::header::CONTENT_TYPE])
        .allow_credentials(true);

    match config.cors_origin.parse::<HeaderValue>() {
        Ok(origin) => layer.allow_origin(origin),
        Err(_) => {
            tracing::warn!(
                origin = %config.cors_origin,
                "CORS_ORIGIN is not a valid header value, cross-origin requests are refused"
            );
            layer
        }
    }
}

/// HTTP Server
pub struct Server {
    config: Config,
    state: Option<ServerState>,
}

impl Server {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            state: None,
        }
    }

    /// Create server with existing state
    pub fn with_state(config: Config, state: ServerState) -> Self {
        Self {
            config,
            state: Some(state),
        }
    }

    /// Serve until ctrl-c
    pub async fn run(&self) -> Result<()> {
        let state = match &self.state {
            Some(s) => s.clone(),
            None => ServerState::initialize(&self.config).await?,
        };

        let addr = std::net::SocketAddr::from(([0, 0, 0, 0], self.config.http_port));
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|source| ServerError::Bind { addr, source })?;
        tracing::info!(%addr, environment = %self.config.environment, "Dine server listening");

        let shutdown = async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!("Failed to listen for shutdown signal: {}", e);
            }
            tracing::info!("Shutting down...");
        };

        axum::serve(listener, build_app(state))
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(ServerError::Serve)?;

        Ok(())
    }
}
