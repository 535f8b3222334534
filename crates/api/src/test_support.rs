//! In-process router harness for route tests.

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header::CONTENT_TYPE},
};
use chrono::{TimeZone, Utc};
use http_body_util::BodyExt;
use pocketbook_core::Pocketbook;
use pocketbook_core::clock::ManualClock;
use pocketbook_shared::LedgerConfig;
use serde_json::Value;
use tower::ServiceExt;

use crate::{AppState, create_router};

pub(crate) struct TestApp {
    pub router: Router,
    pub clock: Arc<ManualClock>,
    pub core: Pocketbook,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_config(&LedgerConfig::default())
    }

    pub fn with_config(config: &LedgerConfig) -> Self {
        let clock = Arc::new(ManualClock::new(
            Utc.with_ymd_and_hms(2026, 6, 15, 12, 0, 0).unwrap(),
        ));
        let core = Pocketbook::from_config(config, clock.clone()).unwrap();
        let router = create_router(AppState::from(core.clone()));
        Self {
            router,
            clock,
            core,
        }
    }

    /// Sends one request and returns the status and the JSON body
    /// (`Value::Null` when the body is empty).
    pub async fn send(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let request = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => request
                .header(CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => request.body(Body::empty()),
        }
        .unwrap();

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    /// Creates an account through the API and returns its id.
    pub async fn account(&self, name: &str) -> String {
        let (status, body) = self
            .send(
                Method::POST,
                "/api/v1/accounts",
                Some(serde_json::json!({ "name": name })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
        body["id"].as_str().unwrap().to_string()
    }

    /// Books a transaction through the API and returns its id.
    pub async fn book(&self, account_id: &str, kind: &str, amount: &str, category: &str) -> String {
        let (status, body) = self
            .send(
                Method::POST,
                "/api/v1/transactions",
                Some(serde_json::json!({
                    "type": kind,
                    "amount": amount,
                    "category": category,
                    "account_id": account_id,
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body["id"].as_str().unwrap().to_string()
    }
}
