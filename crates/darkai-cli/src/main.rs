//! CLI entry point.
//!
//! Commands that need the core are wired through `bootstrap`; `serve`
//! builds its own context inside the HTTP adapter.

use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use darkai_cli::{Cli, CliError, Commands, bootstrap, handlers};

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let Some(command) = cli.command else {
        Cli::command().print_help().map_err(CliError::from)?;
        return Ok(());
    };

    match command {
        Commands::Serve { port, cors_origins } => {
            handlers::serve::execute(&cli.settings, port, cors_origins.as_deref()).await?;
        }
        Commands::Ask { message, code } => {
            let ctx = bootstrap(&cli.settings).await?;
            handlers::ask::execute(&ctx, &message, code).await?;
        }
        Commands::Imagine { prompt } => {
            let ctx = bootstrap(&cli.settings).await?;
            handlers::imagine::execute(&ctx, &prompt).await?;
        }
        Commands::Speak { text, lang } => {
            let ctx = bootstrap(&cli.settings).await?;
            handlers::speak::execute(&ctx, &text, lang).await?;
        }
        Commands::Paths => handlers::paths::execute(&cli.settings)?,
        Commands::CheckConfig => handlers::check_config::execute(&cli.settings)?,
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    // Before parsing so `.env` values feed clap's env fallbacks
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(err) = run(cli).await {
        eprintln!("Error: {err:#}");
        std::process::exit(CliError::exit_code_for(&err));
    }
}
