//! Daybrief command line runner.

mod config;

use clap::{Parser, Subcommand};
use daybrief_sources::{Aggregator, CompositeSnapshot, SourceResult};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use config::Config;

#[derive(Parser)]
#[command(name = "daybrief", about = "Fetch a daily snapshot from public sources", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch every source with the configured defaults.
    Snapshot {
        /// Print the snapshot as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Fetch today's horoscope for one sign.
    Horoscope {
        /// Zodiac sign, any casing.
        sign: String,
    },
}

fn init_tracing(log_format: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false).with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_line_number(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}

fn render_text(snapshot: &CompositeSnapshot) -> String {
    snapshot
        .iter()
        .map(|(name, result)| render_result(&name.to_string(), result))
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn render_result(title: &str, result: &SourceResult) -> String {
    let mut out = format!("== {} ==\n{}", title, result.display_value());
    if let Some(kind) = result.failure_kind() {
        out.push_str(&format!("\n({})", kind));
    }
    out
}

fn summarize(snapshot: &CompositeSnapshot) -> String {
    format!(
        "Snapshot ready: {} sources, {} failed",
        snapshot.len(),
        snapshot.failures().count()
    )
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env();
    init_tracing(&config.log_format);

    let aggregator = Aggregator::from_config(&config.sources);
    tracing::info!("Configured {} sources", aggregator.sources().len());

    match cli.command {
        Commands::Snapshot { json } => {
            let snapshot = aggregator.full_snapshot().await;
            tracing::info!("{}", summarize(&snapshot));
            if json {
                println!("{}", serde_json::to_string_pretty(&snapshot)?);
            } else {
                println!("{}", render_text(&snapshot));
            }
        }
        Commands::Horoscope { sign } => {
            let result = aggregator.horoscope(&sign).await;
            if let Some(kind) = result.failure_kind() {
                tracing::warn!("Horoscope for '{}' failed: {}", sign, kind);
            }
            println!("{}", render_result(&sign, &result));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use daybrief_sources::{FailureKind, SnapshotRequest, SourceName, SourceParams, SourceValue};
    use std::time::Duration;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parses_subcommands() {
        let cli = Cli::parse_from(["daybrief", "snapshot", "--json"]);
        assert!(matches!(cli.command, Commands::Snapshot { json: true }));

        let cli = Cli::parse_from(["daybrief", "horoscope", "Leo"]);
        assert!(matches!(cli.command, Commands::Horoscope { sign } if sign == "Leo"));
    }

    #[tokio::test]
    async fn test_summary_counts_failed_sources() {
        let aggregator = Aggregator::new(vec![], Duration::from_secs(1));
        let request = SnapshotRequest::new()
            .with(SourceName::News, SourceParams::None)
            .with(SourceName::Fact, SourceParams::None);

        let snapshot = aggregator.snapshot(&request).await;

        assert_eq!(summarize(&snapshot), "Snapshot ready: 2 sources, 2 failed");
    }

    #[test]
    fn test_render_failed_result_shows_kind() {
        let result = SourceResult::failed(
            FailureKind::InvalidInput,
            SourceValue::Text("Invalid sign.".to_string()),
        );
        assert_eq!(
            render_result("virgo", &result),
            "== virgo ==\nInvalid sign.\n(invalid_input)"
        );
    }
}
