//! Contract tests for the audio-to-audio endpoint.
//!
//! Every testable model is configured through `MODEL_ID` / `TASK`, exactly as
//! a deployed container would be, and each fixture is posted once to `/`.
//! Each (model, fixture) pair is its own test; the environment is restored
//! (or the variables removed) after each one.

#![allow(clippy::await_holding_lock)]

mod common;

use std::env;

use axum::http::StatusCode;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use resonate_audio::{SymphoniaDecoder, TESTABLE_MODELS};
use resonate_axum::{CorsConfig, bootstrap, create_router};
use resonate_core::test_utils::{EnvVarGuard, lock_env};
use resonate_core::{
    ALLOWED_TASKS, AudioDecoder, InferenceConfig, MODEL_ID_ENV, TASK_ENV, Task,
};
use serde_json::Value;

use common::{post, read_sample};

/// Decoded output audio must be longer than this at 16 kHz.
const MIN_OUTPUT_SAMPLES: usize = 1000;
const OUTPUT_RATE: u32 = 16_000;
const MALFORMED_BODY: &[u8] = br#"{"error":"Malformed soundfile"}"#;

/// Fixtures every model is run against.
const FIXTURES: &[&str] = &[
    "sample1.flac",
    "malformed.flac",
    "sample1_dual.ogg",
    "sample1.webm",
];

#[derive(Clone, Copy)]
enum Expected {
    Audio,
    Malformed,
}

fn assert_audio_response(model_id: &str, fixture: &str, status: StatusCode, content_type: &str, body: &[u8]) {
    assert_eq!(status, StatusCode::OK, "{model_id} {fixture}: {}", String::from_utf8_lossy(body));
    assert_eq!(content_type, "application/json", "{model_id} {fixture}");

    let value: Value = serde_json::from_slice(body).unwrap();
    let items = value.as_array().expect("response must be a JSON array");
    assert!(!items.is_empty(), "{model_id} {fixture}: empty array");

    let first = items[0].as_object().expect("items must be objects");
    let mut keys: Vec<&str> = first.keys().map(String::as_str).collect();
    keys.sort_unstable();
    assert_eq!(keys, ["blob", "content-type", "label"], "{model_id} {fixture}");
    assert!(first["content-type"].is_string());
    assert!(first["label"].is_string());

    let blob = STANDARD.decode(first["blob"].as_str().unwrap()).unwrap();
    let wave = SymphoniaDecoder::new().decode(blob, OUTPUT_RATE).unwrap();
    assert!(
        wave.len() > MIN_OUTPUT_SAMPLES,
        "{model_id} {fixture}: only {} samples",
        wave.len()
    );
}

/// Configure `model_id` through the environment, post `fixture` once to `/`
/// and check the outcome. `MODEL_ID` and `TASK` are restored afterwards.
async fn run_scenario(model_id: &str, fixture: &str, expected: Expected) {
    if !ALLOWED_TASKS.contains(&Task::AudioToAudio) {
        return;
    }

    let _lock = lock_env();
    let model_before = env::var(MODEL_ID_ENV).ok();
    let task_before = env::var(TASK_ENV).ok();

    {
        let _model = EnvVarGuard::set(MODEL_ID_ENV, model_id);
        let _task = EnvVarGuard::set(TASK_ENV, "audio-to-audio");

        let ctx = bootstrap(InferenceConfig::from_env().unwrap()).unwrap();
        let registry = ctx.registry().clone();
        registry.clear();
        let app = create_router(ctx, &CorsConfig::AllowAll);

        let (response, body) = post(app, "/", read_sample(fixture)).await;
        let content_type = response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();

        match expected {
            Expected::Audio => {
                assert_audio_response(model_id, fixture, response.status(), &content_type, &body);
            }
            Expected::Malformed => {
                assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{model_id} {fixture}");
                assert_eq!(body, MALFORMED_BODY, "{model_id} {fixture}");
            }
        }
        assert!(registry.contains(model_id, Task::AudioToAudio));
    }

    assert_eq!(env::var(MODEL_ID_ENV).ok(), model_before);
    assert_eq!(env::var(TASK_ENV).ok(), task_before);
}

/// One test per (model, fixture) pair.
macro_rules! contract_tests {
    ($($name:ident: $model:literal, $fixture:literal => $expected:ident;)*) => {
        const CONTRACT_MODELS: &[&str] = &[$($model),*];

        $(
            #[tokio::test]
            async fn $name() {
                run_scenario($model, $fixture, Expected::$expected).await;
            }
        )*
    };
}

contract_tests! {
    identity_flac: "resonate/identity", "sample1.flac" => Audio;
    identity_malformed_flac: "resonate/identity", "malformed.flac" => Malformed;
    identity_dual_ogg: "resonate/identity", "sample1_dual.ogg" => Audio;
    identity_webm: "resonate/identity", "sample1.webm" => Audio;
    noise_gate_flac: "resonate/noise-gate", "sample1.flac" => Audio;
    noise_gate_malformed_flac: "resonate/noise-gate", "malformed.flac" => Malformed;
    noise_gate_dual_ogg: "resonate/noise-gate", "sample1_dual.ogg" => Audio;
    noise_gate_webm: "resonate/noise-gate", "sample1.webm" => Audio;
    band_split_flac: "resonate/band-split", "sample1.flac" => Audio;
    band_split_malformed_flac: "resonate/band-split", "malformed.flac" => Malformed;
    band_split_dual_ogg: "resonate/band-split", "sample1_dual.ogg" => Audio;
    band_split_webm: "resonate/band-split", "sample1.webm" => Audio;
}

#[test]
fn every_testable_model_has_contract_tests() {
    for model_id in TESTABLE_MODELS {
        let cases = CONTRACT_MODELS.iter().filter(|m| *m == model_id).count();
        assert_eq!(cases, FIXTURES.len(), "{model_id} is missing contract tests");
    }
}

/// Byte-flipped and truncated copies of a fixture.
fn corrupted_variants(bytes: &[u8]) -> Vec<(String, Vec<u8>)> {
    const FLIPS: usize = 60;
    const FLIP_WIDTH: usize = 8;

    let mut variants = Vec::new();
    for i in 0..FLIPS {
        let offset = (bytes.len() - FLIP_WIDTH) * i / FLIPS;
        let mut flipped = bytes.to_vec();
        for byte in &mut flipped[offset..offset + FLIP_WIDTH] {
            *byte ^= 0xA5;
        }
        variants.push((format!("flip@{offset}"), flipped));
    }
    for tenth in 1..10 {
        let len = bytes.len() * tenth / 10;
        variants.push((format!("truncated@{len}"), bytes[..len].to_vec()));
    }
    variants
}

/// Corrupt inputs either still decode or are rejected as malformed; the
/// server never answers 500 for them.
async fn assert_corruption_is_client_error(fixture: &str) {
    let ctx = bootstrap(InferenceConfig::new("resonate/identity", Task::AudioToAudio)).unwrap();
    let app = create_router(ctx, &CorsConfig::AllowAll);

    for (variant, bytes) in corrupted_variants(&read_sample(fixture)) {
        let (response, body) = post(app.clone(), "/", bytes).await;
        match response.status() {
            StatusCode::OK => {}
            StatusCode::BAD_REQUEST => {
                assert_eq!(body, MALFORMED_BODY, "{fixture} {variant}");
            }
            status => panic!(
                "{fixture} {variant}: {status} {}",
                String::from_utf8_lossy(&body)
            ),
        }
    }
}

#[tokio::test]
async fn corrupted_webm_is_never_a_server_error() {
    assert_corruption_is_client_error("sample1.webm").await;
}

#[tokio::test]
async fn corrupted_ogg_is_never_a_server_error() {
    assert_corruption_is_client_error("sample1_dual.ogg").await;
}

#[tokio::test]
async fn corrupted_flac_is_never_a_server_error() {
    assert_corruption_is_client_error("sample1.flac").await;
}

#[tokio::test]
async fn truncated_webm_header_is_malformed() {
    let ctx = bootstrap(InferenceConfig::new("resonate/identity", Task::AudioToAudio)).unwrap();
    let app = create_router(ctx, &CorsConfig::AllowAll);

    let mut bytes = read_sample("sample1.webm");
    bytes.truncate(64);
    let (response, body) = post(app, "/", bytes).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body, MALFORMED_BODY);
}

#[tokio::test]
async fn success_response_carries_compute_headers() {
    let ctx = bootstrap(InferenceConfig::new("resonate/identity", Task::AudioToAudio)).unwrap();
    let app = create_router(ctx, &CorsConfig::AllowAll);

    let (response, _) = post(app, "/", read_sample("sample1.flac")).await;

    assert_eq!(response.status(), StatusCode::OK);
    let headers = response.headers();
    assert_eq!(headers["x-compute-type"], "cpu");
    assert!(headers["x-compute-time"].to_str().unwrap().parse::<f64>().is_ok());
    assert_eq!(headers["x-compute-audio-length"], "2.000");
}

#[tokio::test]
async fn band_split_returns_every_label_in_order() {
    let ctx = bootstrap(InferenceConfig::new("resonate/band-split", Task::AudioToAudio)).unwrap();
    let app = create_router(ctx, &CorsConfig::AllowAll);

    let (response, body) = post(app, "/", read_sample("sample1_dual.ogg")).await;

    assert_eq!(response.status(), StatusCode::OK);
    let value: Value = serde_json::from_slice(&body).unwrap();
    let labels: Vec<&str> = value
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["label"].as_str().unwrap())
        .collect();
    assert_eq!(labels, ["low", "high"]);
    assert!(value.as_array().unwrap().iter().all(|item| item["content-type"] == "audio/wav"));
}

#[tokio::test]
async fn env_guards_remove_variables_that_were_unset() {
    let _lock = lock_env();
    let _clear_model = EnvVarGuard::unset(MODEL_ID_ENV);
    let _clear_task = EnvVarGuard::unset(TASK_ENV);

    {
        let _model = EnvVarGuard::set(MODEL_ID_ENV, TESTABLE_MODELS[0]);
        let _task = EnvVarGuard::set(TASK_ENV, "audio-to-audio");
        let ctx = bootstrap(InferenceConfig::from_env().unwrap()).unwrap();
        let app = create_router(ctx, &CorsConfig::AllowAll);
        let (response, _) = post(app, "/", read_sample("sample1.flac")).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    assert!(env::var(MODEL_ID_ENV).is_err());
    assert!(env::var(TASK_ENV).is_err());
}
