use agenda_prep::{commands, Config};
use clap::{Parser, Subcommand};
use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "agenda-prep", about = "Harvest public events and prepare them for embedding")]
struct Cli {
    /// Config file to use instead of ~/.config/agenda-prep/config.toml.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override the city to fetch and audit.
    #[arg(long, global = true)]
    city: Option<String>,

    /// Log at debug level (includes every dropped record).
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Fetch the raw dataset from the catalog API.
    Fetch,
    /// Clean the raw dataset into the embedding-ready dataset.
    Clean,
    /// Fetch, then clean.
    Run,
    /// Check the clean dataset against the configured city and fetch window.
    Audit,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let default_level = if cli.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .init();

    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(city) = cli.city {
        config.fetch.city = city;
    }
    let today = chrono::Local::now().date_naive();

    match cli.command {
        Command::Fetch => {
            let count = commands::fetch(&config, today).await?;
            println!("{count} events fetched into {}", config.paths.raw.display());
        }
        Command::Clean => clean(&config)?,
        Command::Run => {
            commands::fetch(&config, today).await?;
            clean(&config)?;
        }
        Command::Audit => {
            let report = commands::audit(&config, today)?;
            println!("{report}");
            if !report.is_clean() {
                return Ok(ExitCode::FAILURE);
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn clean(config: &Config) -> anyhow::Result<()> {
    let stats = commands::clean(config)?;
    println!("{} events cleaned and saved.", stats.accepted);
    Ok(())
}
