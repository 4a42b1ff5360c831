//! Per-application pipeline cache.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::domain::Task;
use crate::ports::{AudioToAudioPipeline, PipelineError, PipelineLoader};

type PipelineKey = (String, Task);

/// Memoizes pipelines built by a [`PipelineLoader`], keyed by `(model_id, task)`.
///
/// Each bootstrapped application owns its registry. [`PipelineRegistry::clear`]
/// drops every cached pipeline so the next request loads afresh.
pub struct PipelineRegistry {
    loader: Arc<dyn PipelineLoader>,
    cache: Mutex<HashMap<PipelineKey, Arc<dyn AudioToAudioPipeline>>>,
}

impl PipelineRegistry {
    pub fn new(loader: Arc<dyn PipelineLoader>) -> Self {
        Self {
            loader,
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Return the cached pipeline for `(model_id, task)`, loading it on a miss.
    ///
    /// The lock is not held while loading. If two callers race on the same
    /// key, the first pipeline inserted wins and both receive it.
    pub fn get(
        &self,
        model_id: &str,
        task: Task,
    ) -> Result<Arc<dyn AudioToAudioPipeline>, PipelineError> {
        let key = (model_id.to_string(), task);
        if let Some(pipeline) = self.lock().get(&key) {
            return Ok(Arc::clone(pipeline));
        }

        tracing::info!(model_id, task = %task, "Loading pipeline");
        let loaded = self.loader.load(model_id, task)?;

        let mut cache = self.lock();
        Ok(Arc::clone(cache.entry(key).or_insert(loaded)))
    }

    /// Drop every cached pipeline.
    pub fn clear(&self) {
        let mut cache = self.lock();
        let dropped = cache.len();
        cache.clear();
        tracing::debug!(dropped, "Cleared pipeline cache");
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn contains(&self, model_id: &str, task: Task) -> bool {
        self.lock().contains_key(&(model_id.to_string(), task))
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<PipelineKey, Arc<dyn AudioToAudioPipeline>>> {
        // The map stays consistent even if a holder panicked.
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Debug for PipelineRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<_> = self
            .lock()
            .keys()
            .map(|(model_id, task)| format!("{model_id}:{task}"))
            .collect();
        keys.sort();
        f.debug_struct("PipelineRegistry")
            .field("cached", &keys)
            .finish_non_exhaustive()
    }
}
