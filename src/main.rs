use anyhow::Result;
use clap::{Parser, Subcommand};
use sitemail::{Config, cli};

/// sitemail - Contact form mail relay
#[derive(Parser)]
#[command(name = "sitemail")]
#[command(about = "Relays website contact forms to a mailbox", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Server host address (overrides config file)
        #[arg(long)]
        host: Option<String>,

        /// Server port (overrides config file)
        #[arg(long)]
        port: Option<u16>,
    },
    /// Submit a form to a running server
    Submit(cli::SubmitArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load(cli.config)?;
    config.validate().map_err(anyhow::Error::msg)?;

    sitemail::observability::init_observability(
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        &config.observability.log_level,
    )?;

    match cli.command {
        Commands::Serve { host, port } => cli::serve(config, host, port).await,
        Commands::Submit(args) => cli::submit(args).await,
    }
}
