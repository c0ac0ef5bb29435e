//! # Checkout Subcommand
//!
//! Creates a checkout session and prints the provider URL to open.

use anyhow::{Context, Result};
use clap::Args;

use seo_audit_client::AuditClient;

/// Arguments for `seo-audit checkout`.
#[derive(Args, Debug)]
pub struct CheckoutArgs {
    /// Audit to upgrade.
    #[arg(value_name = "AUDIT_ID")]
    pub audit_id: String,
    /// Paid plan: starter or pro.
    #[arg(long, default_value = "starter")]
    pub plan: String,
}

/// Execute `seo-audit checkout`.
pub async fn run_checkout(args: &CheckoutArgs, client: &AuditClient) -> Result<u8> {
    let session = client
        .create_checkout(&args.audit_id, &args.plan)
        .await
        .with_context(|| format!("checkout for audit {}", args.audit_id))?;

    println!("session_id={}", session.session_id);
    println!("checkout_url={}", session.checkout_url);
    Ok(0)
}
