//! Inference configuration.
//!
//! The model and task served by an application instance are carried in an
//! explicit [`InferenceConfig`] that is handed to the composition root. It can
//! be read from the process environment (`MODEL_ID`, `TASK`) or from any
//! lookup function, which keeps tests independent of global state.

use std::env;

use thiserror::Error;

use crate::domain::{ALLOWED_TASKS, Task, is_allowed};

/// Environment variable naming the model to serve.
pub const MODEL_ID_ENV: &str = "MODEL_ID";

/// Environment variable naming the task to serve.
pub const TASK_ENV: &str = "TASK";

/// Errors produced while building an [`InferenceConfig`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A required variable is unset or blank.
    #[error("Missing required variable {0}")]
    MissingVar(&'static str),

    /// The task name is not recognised.
    #[error("Unknown task '{0}'")]
    UnknownTask(String),

    /// The task is recognised but this application cannot serve it.
    #[error("Task '{task}' is not supported, expected one of: {allowed}")]
    TaskNotAllowed { task: Task, allowed: String },
}

/// Model and task served by one application instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InferenceConfig {
    pub model_id: String,
    pub task: Task,
}

impl InferenceConfig {
    /// Build a config without checking the task against [`ALLOWED_TASKS`].
    pub fn new(model_id: impl Into<String>, task: Task) -> Self {
        Self {
            model_id: model_id.into(),
            task,
        }
    }

    /// Read `MODEL_ID` and `TASK` from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Read `MODEL_ID` and `TASK` through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &'static str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
                .ok_or(ConfigError::MissingVar(key))
        };

        let model_id = read(MODEL_ID_ENV)?;
        let task_name = read(TASK_ENV)?;
        let task = task_name
            .parse::<Task>()
            .map_err(|e| ConfigError::UnknownTask(e.0))?;

        let config = Self::new(model_id, task);
        config.validate()?;
        Ok(config)
    }

    /// Check that the task is one this application serves.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if is_allowed(self.task) {
            return Ok(());
        }
        let allowed = ALLOWED_TASKS
            .iter()
            .copied()
            .map(Task::as_str)
            .collect::<Vec<_>>()
            .join(", ");
        Err(ConfigError::TaskNotAllowed {
            task: self.task,
            allowed,
        })
    }
}
