//! Available subcommands.

use std::path::PathBuf;

use clap::{Args, Subcommand};

/// Available commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Serve the audio-to-audio endpoint over HTTP
    Serve(ServeArgs),

    /// List built-in models
    Models,

    /// Run a model over a local audio file and write one WAV per output
    Process(ProcessArgs),
}

#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Interface to bind
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,
    /// Port to listen on
    #[arg(short, long, default_value_t = 8000)]
    pub port: u16,
    /// Model to serve
    #[arg(long, env = "MODEL_ID")]
    pub model_id: String,
    /// Task to serve
    #[arg(long, env = "TASK", default_value = "audio-to-audio")]
    pub task: String,
    /// Allow CORS requests from this origin (repeatable; default allows all)
    #[arg(long = "allowed-origin")]
    pub allowed_origins: Vec<String>,
    /// Load the model on the first request instead of at startup
    #[arg(long)]
    pub no_preload: bool,
}

#[derive(Debug, Args)]
pub struct ProcessArgs {
    /// Audio file to process
    pub input: PathBuf,
    /// Model to run
    #[arg(long, env = "MODEL_ID")]
    pub model_id: String,
    /// Directory receiving `<label>.wav` files
    #[arg(short, long, default_value = ".")]
    pub out_dir: PathBuf,
}
