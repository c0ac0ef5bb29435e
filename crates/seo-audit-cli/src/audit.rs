//! # Audit Subcommands
//!
//! `submit`, `status`, `wait`, and `results`. Submission and waiting run the
//! client's page routines against a [`TerminalPage`] on stdout.

use std::io;

use anyhow::{bail, Context, Result};
use clap::Args;

use seo_audit_client::form::{self, SubmitOutcome};
use seo_audit_client::poll::PollEnd;
use seo_audit_client::score::{render_text_gauge, score_color};
use seo_audit_client::AuditClient;

use crate::terminal::TerminalPage;

/// Arguments for `seo-audit submit`: the audit form fields.
#[derive(Args, Debug)]
pub struct SubmitArgs {
    /// Company name to audit.
    #[arg(long)]
    pub company_name: String,
    /// Business sector (e.g., "plomberie", "restaurant").
    #[arg(long)]
    pub sector: String,
    /// City or region the company serves.
    #[arg(long, default_value = "")]
    pub location: String,
    /// Contact email for the report.
    #[arg(long, default_value = "")]
    pub email: String,
    /// Plan: freemium, starter, or pro.
    #[arg(long, default_value = "freemium")]
    pub plan: String,
    /// Report language; empty means French.
    #[arg(long, default_value = "")]
    pub language: String,
    /// Keep polling on the results page until the audit finishes.
    #[arg(long)]
    pub wait: bool,
}

impl SubmitArgs {
    /// Form field values, keyed by field name.
    pub fn fields(&self) -> [(&'static str, String); 6] {
        [
            ("company_name", self.company_name.clone()),
            ("sector", self.sector.clone()),
            ("location", self.location.clone()),
            ("email", self.email.clone()),
            ("plan", self.plan.clone()),
            ("language", self.language.clone()),
        ]
    }
}

/// Arguments naming one audit.
#[derive(Args, Debug)]
pub struct AuditIdArgs {
    /// Audit identifier returned at creation.
    #[arg(value_name = "AUDIT_ID")]
    pub audit_id: String,
}

/// Execute `seo-audit submit`.
pub async fn run_submit(args: &SubmitArgs, client: &AuditClient) -> Result<u8> {
    let mut page = TerminalPage::with_form(client.origin().as_str(), args.fields(), io::stdout());
    let Some(form) = form::wire_audit_form(&page) else {
        bail!("audit form is not available");
    };

    match form.submit(client, &mut page).await {
        SubmitOutcome::Redirected { audit_id, .. } => {
            println!("audit_id={audit_id}");
            if !args.wait {
                return Ok(0);
            }
            let mut results_page = page.into_results();
            let outcome = client.wait_for_completion(&audit_id, &mut results_page).await;
            Ok(exit_code(outcome.end))
        }
        SubmitOutcome::Failed { .. } => Ok(1),
    }
}

/// Execute `seo-audit status`.
pub async fn run_status(args: &AuditIdArgs, client: &AuditClient) -> Result<u8> {
    let status = client
        .poll_audit_status(&args.audit_id)
        .await
        .with_context(|| format!("status of audit {}", args.audit_id))?;

    println!("status={}", status.status);
    println!("progress={}", status.progress_text());
    println!("current_step={}", status.step_text());
    Ok(0)
}

/// Execute `seo-audit wait`.
pub async fn run_wait(args: &AuditIdArgs, client: &AuditClient) -> Result<u8> {
    let mut page = TerminalPage::results(client.origin().as_str(), io::stdout());
    let outcome = client.wait_for_completion(&args.audit_id, &mut page).await;
    Ok(exit_code(outcome.end))
}

/// Execute `seo-audit results`.
pub async fn run_results(args: &AuditIdArgs, client: &AuditClient) -> Result<u8> {
    let results = client
        .get_audit_results(&args.audit_id)
        .await
        .with_context(|| format!("results of audit {}", args.audit_id))?;

    let score = results.visibility_score;
    println!(
        "{} {}",
        render_text_gauge(score, 20),
        score_color(score).hex()
    );
    println!(
        "{}",
        serde_json::to_string_pretty(&results).context("failed to serialize results")?
    );
    Ok(0)
}

fn exit_code(end: PollEnd) -> u8 {
    match end {
        PollEnd::Completed => 0,
        PollEnd::Failed | PollEnd::TimedOut => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fields_cover_the_whole_form() {
        let args = SubmitArgs {
            company_name: "Acme".into(),
            sector: "bakery".into(),
            location: String::new(),
            email: String::new(),
            plan: "freemium".into(),
            language: String::new(),
            wait: false,
        };
        let names: Vec<_> = args.fields().iter().map(|(k, _)| *k).collect();
        assert_eq!(names, seo_audit_client::page::FORM_FIELDS.to_vec());
    }

    #[test]
    fn only_completion_exits_zero() {
        assert_eq!(exit_code(PollEnd::Completed), 0);
        assert_eq!(exit_code(PollEnd::Failed), 1);
        assert_eq!(exit_code(PollEnd::TimedOut), 1);
    }
}
