//! Inference handler.

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, HeaderValue};
use axum::response::{IntoResponse, Response};
use resonate_core::InferenceReport;

use crate::error::HttpError;
use crate::state::AppState;

pub const COMPUTE_TYPE_HEADER: &str = "x-compute-type";
pub const COMPUTE_TIME_HEADER: &str = "x-compute-time";
pub const AUDIO_LENGTH_HEADER: &str = "x-compute-audio-length";

/// `POST /` and `POST /{*path}`
///
/// The body is the raw bytes of an audio file.
pub async fn infer(State(state): State<AppState>, body: Bytes) -> Result<Response, HttpError> {
    tracing::debug!(
        bytes = body.len(),
        model_id = %state.config.model_id,
        "Inference request"
    );

    let report = state.service.process(body.to_vec()).await?;
    Ok((report_headers(&report), Json(report.blobs)).into_response())
}

fn report_headers(report: &InferenceReport) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(COMPUTE_TYPE_HEADER, HeaderValue::from_static("cpu"));
    headers.insert(
        COMPUTE_TIME_HEADER,
        seconds_header(report.compute_time.as_secs_f64()),
    );
    headers.insert(
        AUDIO_LENGTH_HEADER,
        seconds_header(report.audio_length.as_secs_f64()),
    );
    headers
}

fn seconds_header(seconds: f64) -> HeaderValue {
    HeaderValue::from_str(&format!("{seconds:.3}")).unwrap_or(HeaderValue::from_static("0.000"))
}
