//! Catalog of built-in models and the loader that serves them.

use std::sync::Arc;

use resonate_core::{AudioToAudioPipeline, PipelineError, PipelineLoader, Task};

use super::{BandSplit, Identity, NoiseGate};

/// One loadable built-in model.
#[derive(Debug, Clone, Copy)]
pub struct CatalogEntry {
    pub id: &'static str,
    pub description: &'static str,
    pub task: Task,
    /// Labels of the outputs, in order.
    pub labels: &'static [&'static str],
    build: fn() -> Arc<dyn AudioToAudioPipeline>,
}

impl CatalogEntry {
    pub fn build(&self) -> Arc<dyn AudioToAudioPipeline> {
        (self.build)()
    }
}

fn build_identity() -> Arc<dyn AudioToAudioPipeline> {
    Arc::new(Identity)
}

fn build_noise_gate() -> Arc<dyn AudioToAudioPipeline> {
    Arc::new(NoiseGate::default())
}

fn build_band_split() -> Arc<dyn AudioToAudioPipeline> {
    Arc::new(BandSplit::default())
}

/// Every built-in model.
pub const CATALOG: &[CatalogEntry] = &[
    CatalogEntry {
        id: "resonate/identity",
        description: "Returns the input audio unchanged",
        task: Task::AudioToAudio,
        labels: &["audio"],
        build: build_identity,
    },
    CatalogEntry {
        id: "resonate/noise-gate",
        description: "Speech enhancement by gating frames near the noise floor",
        task: Task::AudioToAudio,
        labels: &["enhanced"],
        build: build_noise_gate,
    },
    CatalogEntry {
        id: "resonate/band-split",
        description: "Splits audio into low and high bands at 1 kHz",
        task: Task::AudioToAudio,
        labels: &["low", "high"],
        build: build_band_split,
    },
];

/// Model ids exercised by the endpoint integration suite.
pub const TESTABLE_MODELS: &[&str] = &[
    "resonate/identity",
    "resonate/noise-gate",
    "resonate/band-split",
];

/// Look up a catalog entry by model id.
pub fn find_model(model_id: &str) -> Option<&'static CatalogEntry> {
    CATALOG.iter().find(|entry| entry.id == model_id)
}

/// [`PipelineLoader`] over [`CATALOG`].
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinPipelineLoader;

impl BuiltinPipelineLoader {
    pub const fn new() -> Self {
        Self
    }
}

impl PipelineLoader for BuiltinPipelineLoader {
    fn load(
        &self,
        model_id: &str,
        task: Task,
    ) -> Result<Arc<dyn AudioToAudioPipeline>, PipelineError> {
        let entry =
            find_model(model_id).ok_or_else(|| PipelineError::UnknownModel(model_id.to_string()))?;
        if entry.task != task {
            return Err(PipelineError::UnsupportedTask {
                model_id: model_id.to_string(),
                task,
            });
        }
        tracing::debug!(model_id, %task, "Building built-in pipeline");
        Ok(entry.build())
    }
}
