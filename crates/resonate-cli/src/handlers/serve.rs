//! Serve command handler.

use resonate_axum::{ServerConfig, start_server};
use resonate_core::{InferenceConfig, Task};

use crate::commands::ServeArgs;
use crate::error::CliError;

/// Build the server and inference configuration from command-line arguments.
pub fn configs(args: &ServeArgs) -> Result<(ServerConfig, InferenceConfig), CliError> {
    let task = args
        .task
        .parse::<Task>()
        .map_err(|e| resonate_core::ConfigError::UnknownTask(e.0))?;
    let inference = InferenceConfig::new(args.model_id.trim(), task);
    inference.validate()?;

    let mut server = ServerConfig::with_defaults()
        .with_host(args.host.clone())
        .with_port(args.port)
        .with_preload(!args.no_preload);
    if !args.allowed_origins.is_empty() {
        server = server.with_allowed_origins(args.allowed_origins.clone());
    }
    Ok((server, inference))
}

/// Execute the serve command.
pub async fn execute(args: &ServeArgs) -> Result<(), CliError> {
    let (server, inference) = configs(args)?;
    println!(
        "Serving {} ({}) on http://{}",
        inference.model_id,
        inference.task,
        server.bind_address()
    );
    start_server(server, inference)
        .await
        .map_err(CliError::from_startup)
}

#[cfg(test)]
mod tests {
    use super::*;
    use resonate_axum::CorsConfig;
    use resonate_core::ConfigError;

    fn args(task: &str) -> ServeArgs {
        ServeArgs {
            host: "127.0.0.1".to_string(),
            port: 8080,
            model_id: "resonate/identity".to_string(),
            task: task.to_string(),
            allowed_origins: vec![],
            no_preload: true,
        }
    }

    #[test]
    fn test_configs_from_args() {
        let (server, inference) = configs(&args("audio-to-audio")).unwrap();
        assert_eq!(server.bind_address(), "127.0.0.1:8080");
        assert!(!server.preload);
        assert!(matches!(server.cors, CorsConfig::AllowAll));
        assert_eq!(inference.task, Task::AudioToAudio);
    }

    #[test]
    fn test_configs_reject_unknown_task() {
        let err = configs(&args("image-to-image")).unwrap_err();
        assert!(matches!(err, CliError::Config(ConfigError::UnknownTask(_))));
    }

    #[test]
    fn test_configs_reject_disallowed_task() {
        let err = configs(&args("text-to-speech")).unwrap_err();
        assert!(matches!(
            err,
            CliError::Config(ConfigError::TaskNotAllowed { .. })
        ));
        assert_eq!(err.exit_code(), 78);
    }
}
