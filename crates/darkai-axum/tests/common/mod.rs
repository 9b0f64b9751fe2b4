//! Shared harness: a router over fakes and in-memory repositories.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use darkai_axum::{AxumContext, CorsConfig, create_router};
use darkai_core::services::AppCore;
use darkai_core::testing::{Fakes, in_memory_repos};
use http_body_util::BodyExt;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

pub struct TestApp {
    pub router: Router,
    pub fakes: Fakes,
    pub media: TempDir,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_fakes(Fakes::default())
    }

    pub fn with_fakes(fakes: Fakes) -> Self {
        let media = tempfile::tempdir().unwrap();
        let core = AppCore::new(
            in_memory_repos(),
            fakes.gateways(),
            media.path().to_path_buf(),
        );
        let router = create_router(AxumContext::new(Arc::new(core)), &CorsConfig::AllowAll);
        Self {
            router,
            fakes,
            media,
        }
    }

    /// Send a request and return the status and raw body.
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> (StatusCode, Vec<u8>) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, bytes.to_vec())
    }

    /// Send a request and parse the body as JSON.
    pub async fn json(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> (StatusCode, Value) {
        let (status, bytes) = self.send(method, uri, body, token).await;
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }
}
