//! # Gauge Subcommand
//!
//! Renders a score gauge offline, as SVG markup or a terminal bar.

use anyhow::{bail, Result};
use clap::{Args, ValueEnum};

use seo_audit_client::score::{render_score_gauge, render_text_gauge, score_color};

/// Gauge output format.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum GaugeFormat {
    /// HTML fragment with an inline SVG.
    Svg,
    /// One-line text bar.
    Text,
}

/// Arguments for `seo-audit gauge`.
#[derive(Args, Debug)]
pub struct GaugeArgs {
    /// Score to render; expected in 0..=100 but not clamped.
    #[arg(value_name = "SCORE", allow_negative_numbers = true)]
    pub score: f64,
    /// Output format.
    #[arg(long, value_enum, default_value_t = GaugeFormat::Svg)]
    pub format: GaugeFormat,
}

/// Execute `seo-audit gauge`.
pub fn run_gauge(args: &GaugeArgs) -> Result<u8> {
    if args.score.is_nan() {
        bail!("score must be a number");
    }
    if !(0.0..=100.0).contains(&args.score) {
        tracing::warn!(score = args.score, "score outside 0..=100; rendering unclamped");
    }

    match args.format {
        GaugeFormat::Svg => println!("{}", render_score_gauge(args.score)),
        GaugeFormat::Text => println!(
            "{} {}",
            render_text_gauge(args.score, 20),
            score_color(args.score).hex()
        ),
    }
    Ok(0)
}
