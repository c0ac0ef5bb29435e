//! # seo-audit CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use seo_audit_cli::audit::{run_results, run_status, run_submit, run_wait, AuditIdArgs, SubmitArgs};
use seo_audit_cli::export::{run_export, run_health, ExportArgs};
use seo_audit_cli::gauge::{run_gauge, GaugeArgs};
use seo_audit_cli::payment::{run_checkout, CheckoutArgs};

/// SEO audit CLI
///
/// Submits visibility audits, follows their progress, prints results, and
/// starts checkout for paid plans against the audit API.
#[derive(Parser, Debug)]
#[command(name = "seo-audit", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// API origin (overrides SEO_AUDIT_ORIGIN).
    #[arg(long, global = true)]
    origin: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Submit the audit form and follow the redirect.
    Submit(SubmitArgs),

    /// Print the current status of an audit.
    Status(AuditIdArgs),

    /// Poll an audit until it completes, fails, or times out.
    Wait(AuditIdArgs),

    /// Print the results of a completed audit.
    Results(AuditIdArgs),

    /// Create a checkout session for a paid plan.
    Checkout(CheckoutArgs),

    /// Render a score gauge.
    Gauge(GaugeArgs),

    /// Query the service health endpoint.
    Health,

    /// Download an audit export.
    Export(ExportArgs),
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize tracing based on verbosity level.
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("seo-audit CLI v{} starting", env!("CARGO_PKG_VERSION"));

    let result = dispatch(cli.command, cli.origin.as_deref()).await;

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}

async fn dispatch(command: Commands, origin: Option<&str>) -> anyhow::Result<u8> {
    // Rendering a gauge needs no API client or configuration.
    if let Commands::Gauge(args) = &command {
        return run_gauge(args);
    }

    let client = seo_audit_cli::build_client(origin)?;
    match command {
        Commands::Submit(args) => run_submit(&args, &client).await,
        Commands::Status(args) => run_status(&args, &client).await,
        Commands::Wait(args) => run_wait(&args, &client).await,
        Commands::Results(args) => run_results(&args, &client).await,
        Commands::Checkout(args) => run_checkout(&args, &client).await,
        Commands::Health => run_health(&client).await,
        Commands::Export(args) => run_export(&args, &client).await,
        Commands::Gauge(args) => run_gauge(&args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_submit_with_defaults() {
        let cli = Cli::try_parse_from([
            "seo-audit",
            "submit",
            "--company-name",
            "Plomberie Martin",
            "--sector",
            "plomberie",
        ])
        .unwrap();
        match cli.command {
            Commands::Submit(args) => {
                assert_eq!(args.plan, "freemium");
                assert_eq!(args.language, "");
                assert!(!args.wait);
            }
            other => panic!("expected submit, got {other:?}"),
        }
    }

    #[test]
    fn origin_is_global() {
        let cli = Cli::try_parse_from([
            "seo-audit",
            "status",
            "abc123",
            "--origin",
            "https://audit.example.com",
        ])
        .unwrap();
        assert_eq!(cli.origin.as_deref(), Some("https://audit.example.com"));
    }

    #[test]
    fn gauge_accepts_negative_scores() {
        let cli = Cli::try_parse_from(["seo-audit", "gauge", "-5", "--format", "text"]).unwrap();
        match cli.command {
            Commands::Gauge(args) => assert_eq!(args.score, -5.0),
            other => panic!("expected gauge, got {other:?}"),
        }
    }

    #[test]
    fn checkout_requires_audit_id() {
        assert!(Cli::try_parse_from(["seo-audit", "checkout", "--plan", "pro"]).is_err());
    }
}
