//! Process command handler.
//!
//! Runs the same service the HTTP endpoint uses, then writes each labelled
//! output next to the others as `<label>.wav`.

use std::fs;
use std::path::{Path, PathBuf};

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use resonate_axum::bootstrap;
use resonate_core::{InferenceConfig, Task};

use crate::commands::ProcessArgs;
use crate::error::CliError;

/// Execute the process command, returning the written paths.
pub async fn execute(args: &ProcessArgs) -> Result<Vec<PathBuf>, CliError> {
    let payload = fs::read(&args.input)
        .map_err(|e| CliError::Io(format!("{}: {e}", args.input.display())))?;

    let config = InferenceConfig::new(args.model_id.trim(), Task::AudioToAudio);
    let ctx = bootstrap(config).map_err(CliError::from_startup)?;

    let report = ctx.service.process(payload).await?;
    tracing::info!(
        outputs = report.blobs.len(),
        audio_secs = report.audio_length.as_secs_f64(),
        compute_secs = report.compute_time.as_secs_f64(),
        "Processed {}",
        args.input.display()
    );

    fs::create_dir_all(&args.out_dir)
        .map_err(|e| CliError::Io(format!("{}: {e}", args.out_dir.display())))?;

    let mut written = Vec::with_capacity(report.blobs.len());
    for blob in &report.blobs {
        let bytes = STANDARD
            .decode(&blob.blob)
            .map_err(|e| CliError::Io(format!("invalid output for '{}': {e}", blob.label)))?;
        let path = output_path(&args.out_dir, &blob.label);
        fs::write(&path, bytes).map_err(|e| CliError::Io(format!("{}: {e}", path.display())))?;
        println!("{}", path.display());
        written.push(path);
    }
    Ok(written)
}

fn output_path(out_dir: &Path, label: &str) -> PathBuf {
    let safe: String = label
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect();
    out_dir.join(format!("{safe}.wav"))
}
