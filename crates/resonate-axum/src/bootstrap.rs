//! Axum server bootstrap - the composition root.
//!
//! This module is the ONLY place where infrastructure is wired together
//! for the Axum web adapter. All concrete implementations are instantiated here.

use std::sync::Arc;

use anyhow::{Context, Result};
use resonate_audio::{BuiltinPipelineLoader, SymphoniaDecoder, WavEncoder};
use resonate_core::{AudioToAudioService, InferenceConfig, PipelineLoader, PipelineRegistry};

/// CORS configuration for the web server.
#[derive(Debug, Clone, Default)]
pub enum CorsConfig {
    /// Allow all origins (development mode).
    #[default]
    AllowAll,
    /// Allow specific origins (production mode).
    AllowOrigins(Vec<String>),
}

/// Server configuration for the Axum adapter.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Interface to bind.
    pub host: String,
    /// Port for the HTTP server.
    pub port: u16,
    /// CORS configuration.
    pub cors: CorsConfig,
    /// Load the pipeline before accepting requests.
    pub preload: bool,
}

impl ServerConfig {
    /// `0.0.0.0:8000`, permissive CORS, preload enabled.
    pub fn with_defaults() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            cors: CorsConfig::default(),
            preload: true,
        }
    }

    #[must_use]
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    #[must_use]
    pub const fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    #[must_use]
    pub const fn with_preload(mut self, preload: bool) -> Self {
        self.preload = preload;
        self
    }

    /// Set CORS to allow specific origins.
    #[must_use]
    pub fn with_allowed_origins(mut self, origins: Vec<String>) -> Self {
        self.cors = CorsConfig::AllowOrigins(origins);
        self
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Application context for the Axum adapter.
pub struct AxumContext {
    /// Model and task served by this instance.
    pub config: InferenceConfig,
    /// The inference service.
    pub service: Arc<AudioToAudioService>,
}

impl AxumContext {
    /// Pipeline cache owned by this instance.
    pub fn registry(&self) -> &Arc<PipelineRegistry> {
        self.service.registry()
    }
}

/// Bootstrap with the built-in pipeline catalog.
pub fn bootstrap(config: InferenceConfig) -> Result<AxumContext> {
    bootstrap_with(config, Arc::new(BuiltinPipelineLoader::new()))
}

/// Bootstrap with a caller-supplied pipeline loader.
///
/// Rejects tasks this application cannot serve. The pipeline itself is not
/// loaded here; see [`start_server`] or `AudioToAudioService::warm_up`.
pub fn bootstrap_with(
    config: InferenceConfig,
    loader: Arc<dyn PipelineLoader>,
) -> Result<AxumContext> {
    config
        .validate()
        .context("Invalid inference configuration")?;

    tracing::info!(
        model_id = %config.model_id,
        task = %config.task,
        "Axum bootstrap"
    );

    let registry = Arc::new(PipelineRegistry::new(loader));
    let service = Arc::new(AudioToAudioService::new(
        config.clone(),
        registry,
        Arc::new(SymphoniaDecoder::new()),
        Arc::new(WavEncoder::new()),
    ));

    Ok(AxumContext { config, service })
}

/// Start the web server.
///
/// Serves until Ctrl-C is received, then drains in-flight requests.
pub async fn start_server(config: ServerConfig, inference: InferenceConfig) -> Result<()> {
    use tokio::net::TcpListener;
    use tracing::info;

    let ctx = bootstrap(inference)?;

    if config.preload {
        ctx.service.warm_up().await.with_context(|| {
            format!("Failed to load pipeline for model '{}'", ctx.config.model_id)
        })?;
        info!(model_id = %ctx.config.model_id, "Pipeline loaded");
    }

    let app = crate::routes::create_router(ctx, &config.cors);

    let addr = config.bind_address();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    info!("resonate listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("resonate stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
