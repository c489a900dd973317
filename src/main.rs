//! automerger CLI

mod cli;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser)]
#[command(
    name = "automerger",
    version,
    about = "Merge approved pull requests once their required checks pass"
)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate one webhook delivery and merge if eligible
    Handle {
        /// Webhook event type (the X-GitHub-Event header)
        #[arg(short, long)]
        event: String,

        /// Path to the JSON webhook payload
        #[arg(short, long)]
        payload: PathBuf,

        /// Config file (defaults to the user config directory)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// GitHub Enterprise host
        #[arg(long)]
        host: Option<String>,
    },
    /// List the webhook event types to subscribe to
    Events,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "automerger=debug" } else { "automerger=info" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_level.into()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Handle {
            event,
            payload,
            config,
            host,
        } => {
            cli::run_handle(cli::HandleOptions {
                event_type: event,
                payload_path: payload,
                config_path: config,
                host,
            })
            .await
        }
        Commands::Events => {
            cli::run_events();
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
