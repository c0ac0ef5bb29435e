//! # seo-audit-cli: Terminal Front End for the SEO Audit API
//!
//! Provides the `seo-audit` command-line interface. Each subcommand drives
//! one operation of [`seo_audit_client`]; the page-bound routines (form
//! submission, completion polling) run against a [`terminal::TerminalPage`]
//! that prints navigation, reload, and alert effects.
//!
//! ## Subcommands
//!
//! - `seo-audit submit`: Submit the audit form (optionally `--wait`).
//! - `seo-audit status`: Print the current status of an audit.
//! - `seo-audit wait`: Poll until the audit completes, fails, or times out.
//! - `seo-audit results`: Print results and the score gauge.
//! - `seo-audit checkout`: Create a checkout session and print its URL.
//! - `seo-audit gauge`: Render a score gauge.
//! - `seo-audit health`: Query the service health endpoint.
//! - `seo-audit export`: Download the PDF guide or recommendations JSON.
//!
//! ```bash
//! seo-audit --origin https://audit.example.com submit \
//!     --company-name "Plomberie Martin" --sector plomberie --location Lyon \
//!     --email contact@martin.fr --wait
//! ```

pub mod audit;
pub mod export;
pub mod gauge;
pub mod payment;
pub mod terminal;

use anyhow::{Context, Result};

use seo_audit_client::{AuditApiConfig, AuditClient};
use url::Url;

/// Build a client from the environment, with `origin` overriding `SEO_AUDIT_ORIGIN`.
pub fn build_client(origin: Option<&str>) -> Result<AuditClient> {
    let origin = origin
        .map(|raw| {
            raw.parse::<Url>()
                .with_context(|| format!("invalid --origin: {raw}"))
        })
        .transpose()?;
    let config =
        AuditApiConfig::from_env_with_origin(origin).context("failed to load configuration")?;
    tracing::debug!(?config, "client configuration");
    AuditClient::new(config).context("failed to build API client")
}
