//! Inference task names.
//!
//! Task names follow the inference API convention (`audio-to-audio`,
//! `automatic-speech-recognition`, ...). Only the tasks listed in
//! [`ALLOWED_TASKS`] can be served by this application; the others are
//! recognised so configuration errors can say "not allowed" instead of
//! "unknown".

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// An inference task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Task {
    /// Audio in, one or more labelled audio outputs (enhancement, separation).
    AudioToAudio,
    /// Audio in, transcript out.
    AutomaticSpeechRecognition,
    /// Audio in, class scores out.
    AudioClassification,
    /// Text in, audio out.
    TextToSpeech,
}

/// Tasks this application is able to serve.
pub const ALLOWED_TASKS: &[Task] = &[Task::AudioToAudio];

/// Whether `task` is served by this application.
pub fn is_allowed(task: Task) -> bool {
    ALLOWED_TASKS.contains(&task)
}

impl Task {
    /// Every task name the parser recognises.
    pub const ALL: [Self; 4] = [
        Self::AudioToAudio,
        Self::AutomaticSpeechRecognition,
        Self::AudioClassification,
        Self::TextToSpeech,
    ];

    /// Wire name of the task.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AudioToAudio => "audio-to-audio",
            Self::AutomaticSpeechRecognition => "automatic-speech-recognition",
            Self::AudioClassification => "audio-classification",
            Self::TextToSpeech => "text-to-speech",
        }
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string is not a known task name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown task '{0}'")]
pub struct TaskParseError(pub String);

impl FromStr for Task {
    type Err = TaskParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|task| task.as_str() == trimmed)
            .ok_or_else(|| TaskParseError(trimmed.to_string()))
    }
}
