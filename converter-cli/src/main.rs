//! Converter CLI
//!
//! Command-line front end for the currency converter:
//! - Load configuration from flags, environment and `.env`
//! - Open the history store and hydrate a session
//! - Run one command (or an interactive shell) against it

mod config;
mod shell;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tokio::sync::mpsc::UnboundedReceiver;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use converter_hex::{ConversionSession, Notifier};
use converter_repo::build_store;
use converter_types::{CurrencyCode, Notice, NoticeLevel, RateFetcher};

use config::{Config, LogFormat};

#[derive(Parser)]
#[command(name = "converter")]
#[command(author, version, about = "Currency converter with a persisted history", long_about = None)]
struct Cli {
    #[command(flatten)]
    config: Config,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List supported currencies
    Currencies,
    /// Convert an amount and record it
    Convert {
        /// Amount in the base currency
        #[arg(allow_hyphen_values = true)]
        amount: String,
        /// Base currency (ignored once history exists)
        #[arg(long)]
        from: Option<String>,
        /// Target currency (ignored once history exists)
        #[arg(long)]
        to: Option<String>,
    },
    /// Show recorded conversions
    History {
        /// Print the raw records as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the running total
    Total,
    /// Clear the history and unlock the currency pair
    Clear,
    /// Interactive session reading commands from stdin
    Shell,
}

/// Whether a command did what was asked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Success,
    Failed,
}

fn init_tracing(format: LogFormat) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "warn".into());
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Text => registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init(),
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init(),
    }
}

fn parse_currency(s: &str) -> Result<CurrencyCode> {
    s.parse().map_err(anyhow::Error::msg)
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.config.log_format);

    if let Commands::Currencies = cli.command {
        print_currencies();
        return Ok(());
    }

    let store = build_store(&cli.config.store, &cli.config.history_key).await?;
    tracing::debug!(store = store.kind(), location = %cli.config.store, "History store ready");

    let fetcher = cli.config.rate_source()?;
    let (notifier, mut notices) = Notifier::channel();
    let mut session = ConversionSession::open(fetcher, store, notifier).await;

    let outcome = run(cli.command, &mut session, &mut notices).await;

    // Pending saves must land before the process exits.
    session.flush().await;
    print_notices(&mut notices);

    if outcome? == Outcome::Failed {
        std::process::exit(1);
    }
    Ok(())
}

async fn run<F: RateFetcher>(
    command: Commands,
    session: &mut ConversionSession<F>,
    notices: &mut UnboundedReceiver<Notice>,
) -> Result<Outcome> {
    match command {
        Commands::Currencies => print_currencies(),

        Commands::Convert { amount, from, to } => {
            let from = from.as_deref().map(parse_currency).transpose()?;
            let to = to.as_deref().map(parse_currency).transpose()?;

            if session.is_locked() {
                let conflicts = from.is_some_and(|c| c != session.from_currency())
                    || to.is_some_and(|c| c != session.to_currency());
                if conflicts {
                    anyhow::bail!(
                        "Currency pair is locked to {} -> {} until history is cleared",
                        session.from_currency(),
                        session.to_currency()
                    );
                }
            }
            if let Some(code) = from {
                session.set_from_currency(code);
            }
            if let Some(code) = to {
                session.set_to_currency(code);
            }

            session.set_amount(amount);
            return Ok(match session.convert().await {
                Ok(record) => {
                    println!("{}", record.summary());
                    Outcome::Success
                }
                Err(_) => Outcome::Failed,
            });
        }

        Commands::History { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(session.history())?);
            } else {
                print_history(session);
            }
        }

        Commands::Total => print_total(session),

        Commands::Clear => {
            return Ok(match session.clear_history().outcome().await {
                Ok(()) => Outcome::Success,
                Err(_) => Outcome::Failed,
            });
        }

        Commands::Shell => shell::run(session, notices).await?,
    }

    Ok(Outcome::Success)
}

// ─────────────────────────────────────────────────────────────────────────────
// Output
// ─────────────────────────────────────────────────────────────────────────────

pub(crate) fn print_notices(rx: &mut UnboundedReceiver<Notice>) {
    while let Ok(notice) = rx.try_recv() {
        match notice.level {
            NoticeLevel::Success => eprintln!("✓ {}", notice),
            NoticeLevel::Error => eprintln!("✗ {}", notice),
        }
    }
}

pub(crate) fn print_currencies() {
    for code in CurrencyCode::all() {
        println!("{}", code.label());
    }
}

pub(crate) fn print_history<F: RateFetcher>(session: &ConversionSession<F>) {
    if session.history().is_empty() {
        println!("No history available.");
        return;
    }
    for record in session.history() {
        println!("{}  ({})", record.summary(), record.local_time());
    }
    print_total(session);
}

pub(crate) fn print_total<F: RateFetcher>(session: &ConversionSession<F>) {
    println!(
        "Total Converted: {} {} from {}",
        session.total(),
        session.to_currency(),
        session.from_currency()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_convert() {
        let cli = Cli::try_parse_from([
            "converter",
            "--store",
            "memory:",
            "convert",
            "100",
            "--from",
            "usd",
            "--to",
            "JPY",
        ])
        .unwrap();

        assert_eq!(cli.config.store, "memory:");
        match cli.command {
            Commands::Convert { amount, from, to } => {
                assert_eq!(amount, "100");
                assert_eq!(parse_currency(&from.unwrap()).unwrap(), CurrencyCode::USD);
                assert_eq!(parse_currency(&to.unwrap()).unwrap(), CurrencyCode::JPY);
            }
            _ => panic!("expected convert"),
        }
    }

    #[test]
    fn test_parse_currency_rejects_unknown() {
        let err = parse_currency("EUR").unwrap_err();
        assert!(err.to_string().starts_with("Unknown currency: EUR"));
    }

    #[tokio::test]
    async fn test_unconfigured_source_fails_conversion() {
        let cli = Cli::try_parse_from(["converter", "--api-key", "", "total"]).unwrap();
        let source = cli.config.rate_source().unwrap();

        let err = source
            .fetch_rate(CurrencyCode::AUD, CurrencyCode::JPY)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("no API key configured"));
    }

    #[tokio::test]
    async fn test_clear_command_on_memory_store() {
        let store = build_store("memory:", "h").await.unwrap();
        let (notifier, mut notices) = Notifier::channel();
        let mut session =
            ConversionSession::open(config::RateSource::Unconfigured, store, notifier).await;

        let outcome = run(Commands::Clear, &mut session, &mut notices).await.unwrap();

        assert_eq!(outcome, Outcome::Success);
        assert!(!session.is_locked());
    }

    #[tokio::test]
    async fn test_convert_without_key_fails() {
        let store = build_store("memory:", "h").await.unwrap();
        let (notifier, mut notices) = Notifier::channel();
        let mut session =
            ConversionSession::open(config::RateSource::Unconfigured, store, notifier).await;

        let command = Commands::Convert {
            amount: "10".into(),
            from: None,
            to: None,
        };
        let outcome = run(command, &mut session, &mut notices).await.unwrap();

        assert_eq!(outcome, Outcome::Failed);
        assert!(session.history().is_empty());
        let notice = notices.try_recv().unwrap();
        assert_eq!(notice.title, "Conversion failed");
    }
}
