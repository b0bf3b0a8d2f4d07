mod commands;

use clap::Parser;
use commands::{execute_command, utils::load_or_create_client, Commands};

/// SoundCloud command line client
#[derive(Parser)]
#[command(
    name = "asynccloud",
    about = "Browse SoundCloud from the command line",
    long_about = None
)]
struct Cli {
    /// Show detailed debug information
    #[arg(long, global = true)]
    verbose: bool,

    /// Client id to use instead of the saved or scraped one
    #[arg(long, global = true, env = "SOUNDCLOUD_CLIENT_ID")]
    client_id: Option<String>,

    /// OAuth token for endpoints that need authentication
    #[arg(long, global = true, env = "SOUNDCLOUD_AUTH_TOKEN")]
    auth_token: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Cli::parse();

    let default_filter = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let client = match load_or_create_client(args.client_id, args.auth_token).await {
        Ok(client) => client,
        Err(e) => {
            eprintln!("❌ Failed to create client: {e}");
            std::process::exit(1);
        }
    };

    log::debug!("Client ready");

    let result = execute_command(args.command, &client).await;
    client.shutdown();

    if let Err(e) = result {
        eprintln!("❌ Command failed: {e}");
        std::process::exit(1);
    }

    Ok(())
}
