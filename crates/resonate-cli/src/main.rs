//! CLI entry point - the composition root.

use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use resonate_cli::{Cli, CliError, Commands, handlers};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.default_log_filter()));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    // Dispatch to appropriate handler
    let Some(command) = cli.command else {
        // No command provided - show help
        Cli::command().print_help()?;
        return Ok(());
    };

    let result = match command {
        Commands::Serve(args) => handlers::serve::execute(&args).await,
        Commands::Models => {
            handlers::models::execute();
            Ok(())
        }
        Commands::Process(args) => handlers::process::execute(&args).await.map(|_| ()),
    };
    if let Err(e) = result {
        exit_with(&e);
    }

    Ok(())
}

fn exit_with(err: &CliError) -> ! {
    eprintln!("error: {err}");
    std::process::exit(err.exit_code());
}
