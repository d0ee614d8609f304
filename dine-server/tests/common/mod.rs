//! Shared harness: in-memory server driven through `oneshot`

#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use dine_server::{Config, ServerState, build_app};
use http::{Method, Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tempfile::TempDir;
use tower::ServiceExt;

pub struct TestApp {
    pub app: Router,
    pub state: ServerState,
    pub token: String,
    _work_dir: TempDir,
}

pub async fn build_test_app() -> TestApp {
    let work_dir = tempfile::tempdir().expect("temp dir");
    let config = Config::for_tests(work_dir.path().to_string_lossy());
    let state = ServerState::for_tests(config)
        .await
        .expect("in-memory state");
    let token = state
        .jwt_service
        .generate_token("staff:1", "alice", "admin")
        .expect("token");

    TestApp {
        app: build_app(state.clone()),
        state,
        token,
        _work_dir: work_dir,
    }
}

impl TestApp {
    /// Authenticated request
    pub async fn send(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        self.request(method, uri, body, Some(format!("Bearer {}", self.token)))
            .await
    }

    /// Request without credentials
    pub async fn send_anonymous(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        self.request(method, uri, body, None).await
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send_anonymous(Method::GET, uri, None).await
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
        authorization: Option<String>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(auth) = authorization {
            builder = builder.header(header::AUTHORIZATION, auth);
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&body).unwrap()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        self.call(request).await
    }

    pub async fn call(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                Value::String(String::from_utf8_lossy(&bytes).into_owned())
            })
        };
        (status, value)
    }

    // ========================================================================
    // Seeding through the API
    // ========================================================================

    pub async fn create_table(&self, number: &str, capacity: i32) -> Value {
        let (status, body) = self
            .send(
                Method::POST,
                "/api/tables",
                Some(json!({ "table_number": number, "capacity": capacity })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "create table: {body}");
        body["table"].clone()
    }

    pub async fn create_category(&self, name: &str) -> Value {
        let (status, body) = self
            .send(Method::POST, "/api/category", Some(json!({ "name": name })))
            .await;
        assert_eq!(status, StatusCode::CREATED, "create category: {body}");
        body["category"].clone()
    }

    pub async fn create_menu_item(&self, category_id: &str, name: &str, price: f64) -> Value {
        let (status, body) = self
            .send(
                Method::POST,
                "/api/menu",
                Some(json!({
                    "name": name,
                    "description": format!("{name} of the day"),
                    "price": price,
                    "category": category_id,
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "create menu item: {body}");
        body["menu_item"].clone()
    }

    pub async fn create_order(&self, table_id: &str, item_id: &str, quantity: i64, price: f64) -> Value {
        let (status, body) = self
            .send(
                Method::POST,
                "/api/orders",
                Some(json!({
                    "table": table_id,
                    "items": [{ "item": item_id, "quantity": quantity, "price": price }],
                    "total_amount": price * quantity as f64,
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "create order: {body}");
        body["order"].clone()
    }

    pub async fn table(&self, table_id: &str) -> Value {
        let (status, body) = self.get(&format!("/api/tables/{table_id}")).await;
        assert_eq!(status, StatusCode::OK, "get table: {body}");
        body["table"].clone()
    }
}

/// `id` field as &str
pub fn id(value: &Value) -> &str {
    value["id"].as_str().expect("id field")
}
