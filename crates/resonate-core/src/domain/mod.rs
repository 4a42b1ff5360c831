//! Pure domain types with no infrastructure dependencies.

mod audio;
mod envelope;
mod task;

pub use audio::{DEFAULT_SAMPLING_RATE, EncodedAudio, PipelineOutput, Waveform};
pub use envelope::{AudioBlob, ErrorEnvelope};
pub use task::{ALLOWED_TASKS, Task, TaskParseError, is_allowed};
