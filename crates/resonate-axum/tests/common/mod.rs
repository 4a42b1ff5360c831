//! Shared helpers for endpoint integration tests.

#![allow(dead_code)]

use std::path::PathBuf;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response};
use http_body_util::BodyExt;
use tower::ServiceExt;

/// Path of a fixture under `tests/samples`.
pub fn sample_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("samples")
        .join(name)
}

/// Raw bytes of a fixture under `tests/samples`.
pub fn read_sample(name: &str) -> Vec<u8> {
    let path = sample_path(name);
    std::fs::read(&path).unwrap_or_else(|e| panic!("cannot read {}: {e}", path.display()))
}

/// POST `body` to `uri` and return the response with its collected body.
pub async fn post(app: Router, uri: &str, body: Vec<u8>) -> (Response<Body>, Vec<u8>) {
    send(
        app,
        Request::builder()
            .method("POST")
            .uri(uri)
            .body(Body::from(body))
            .unwrap(),
    )
    .await
}

/// GET `uri` and return the response with its collected body.
pub async fn get(app: Router, uri: &str) -> (Response<Body>, Vec<u8>) {
    send(
        app,
        Request::builder().uri(uri).body(Body::empty()).unwrap(),
    )
    .await
}

async fn send(app: Router, request: Request<Body>) -> (Response<Body>, Vec<u8>) {
    let response = app.oneshot(request).await.unwrap();
    let (parts, body) = response.into_parts();
    let bytes = body.collect().await.unwrap().to_bytes().to_vec();
    (Response::from_parts(parts, Body::empty()), bytes)
}
