//! # Export and Health Subcommands
//!
//! Downloads report exports to a file and queries the service health.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};

use seo_audit_client::AuditClient;

/// Export document kind.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportFormat {
    /// Implementation guide as PDF.
    Pdf,
    /// Recommendations with structured data, as JSON.
    Json,
}

impl ExportFormat {
    fn default_file_name(self, audit_id: &str) -> String {
        match self {
            Self::Pdf => format!("audit_{audit_id}_guide.pdf"),
            Self::Json => format!("audit_{audit_id}_recommendations.json"),
        }
    }
}

/// Arguments for `seo-audit export`.
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Audit to export.
    #[arg(value_name = "AUDIT_ID")]
    pub audit_id: String,
    /// Document to download.
    #[arg(long, value_enum, default_value_t = ExportFormat::Pdf)]
    pub format: ExportFormat,
    /// Destination file (default: `audit_{id}_guide.pdf` or `audit_{id}_recommendations.json`).
    #[arg(long, value_name = "FILE")]
    pub out: Option<PathBuf>,
}

impl ExportArgs {
    pub fn destination(&self) -> PathBuf {
        self.out
            .clone()
            .unwrap_or_else(|| PathBuf::from(self.format.default_file_name(&self.audit_id)))
    }
}

/// Execute `seo-audit export`.
pub async fn run_export(args: &ExportArgs, client: &AuditClient) -> Result<u8> {
    let bytes = match args.format {
        ExportFormat::Pdf => client
            .export_guide_pdf(&args.audit_id)
            .await
            .with_context(|| format!("PDF export of audit {}", args.audit_id))?,
        ExportFormat::Json => {
            let doc = client
                .export_recommendations(&args.audit_id)
                .await
                .with_context(|| format!("JSON export of audit {}", args.audit_id))?;
            serde_json::to_vec_pretty(&doc).context("failed to serialize export")?
        }
    };

    let dest = args.destination();
    write_export(&dest, &bytes)?;
    println!("OK: wrote {} bytes to {}", bytes.len(), dest.display());
    Ok(0)
}

/// Execute `seo-audit health`.
pub async fn run_health(client: &AuditClient) -> Result<u8> {
    let report = client.health_check().await.context("health check")?;
    println!(
        "{} {} {} ({})",
        report.service,
        report.version,
        report.status,
        report.phase.as_deref().unwrap_or("-")
    );
    Ok(if report.is_healthy() { 0 } else { 1 })
}

fn write_export(dest: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = dest.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory: {}", parent.display()))?;
    }
    std::fs::write(dest, bytes).with_context(|| format!("failed to write {}", dest.display()))
}
