//! # Score Formatting
//!
//! Color bands and the circular gauge used to display a visibility score.
//!
//! Scores are expected in `[0, 100]` but are not clamped or validated:
//! - below 0, the arc length is negative and the color is "bad";
//! - above 100, the arc length exceeds the circumference and the color is "good";
//! - NaN compares false against both thresholds and is colored "bad".
//!
//! Callers that need a bounded gauge should clamp before rendering.

use std::fmt;

/// Radius of the gauge circles, in SVG user units.
pub const GAUGE_RADIUS: u32 = 90;

/// Dash-array period of the gauge arc: `2 * pi * 90`, rounded.
pub const GAUGE_CIRCUMFERENCE: f64 = 565.0;

/// Stroke color of the background track.
pub const TRACK_COLOR: &str = "#e2e8f0";

/// Lower bound of the "good" band.
pub const GOOD_THRESHOLD: f64 = 75.0;

/// Lower bound of the "warning" band.
pub const WARNING_THRESHOLD: f64 = 50.0;

/// Color band of a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScoreColor {
    /// `score >= 75`.
    Good,
    /// `50 <= score < 75`.
    Warning,
    /// `score < 50`.
    Bad,
}

impl ScoreColor {
    /// CSS hex color for the band.
    pub fn hex(self) -> &'static str {
        match self {
            Self::Good => "#48bb78",
            Self::Warning => "#f6ad55",
            Self::Bad => "#fc8181",
        }
    }
}

impl fmt::Display for ScoreColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.hex())
    }
}

/// Map a score to its color band.
pub fn score_color(score: f64) -> ScoreColor {
    if score >= GOOD_THRESHOLD {
        ScoreColor::Good
    } else if score >= WARNING_THRESHOLD {
        ScoreColor::Warning
    } else {
        ScoreColor::Bad
    }
}

/// Length of the filled arc for `score`.
pub fn arc_length(score: f64) -> f64 {
    score * GAUGE_CIRCUMFERENCE / 100.0
}

/// The score label: rounded to the nearest integer, halves rounding up.
pub fn score_label(score: f64) -> String {
    format!("{}", round_half_up(score))
}

/// Nearest integer, ties toward positive infinity, never `-0`.
fn round_half_up(x: f64) -> f64 {
    let floor = x.floor();
    // `x - floor` is exact; `x + 0.5` may itself round up.
    let rounded = if x - floor >= 0.5 { floor + 1.0 } else { floor };
    rounded + 0.0
}

/// Render the circular score gauge as an HTML fragment with an inline SVG.
pub fn render_score_gauge(score: f64) -> String {
    let color = score_color(score);
    let arc = arc_length(score);
    let label = score_label(score);

    format!(
        r#"
        <div class="score-gauge">
            <svg width="200" height="200" viewBox="0 0 200 200">
                <circle cx="100" cy="100" r="{GAUGE_RADIUS}" fill="none" stroke="{TRACK_COLOR}" stroke-width="12"/>
                <circle cx="100" cy="100" r="{GAUGE_RADIUS}" fill="none" stroke="{color}" stroke-width="12"
                    stroke-dasharray="{arc} {GAUGE_CIRCUMFERENCE}"
                    stroke-linecap="round"
                    transform="rotate(-90 100 100)"/>
            </svg>
            <div style="position: absolute; top: 50%; left: 50%; transform: translate(-50%, -50%);">
                <div class="score-number">{label}</div>
                <div class="score-label">/ 100</div>
            </div>
        </div>
    "#
    )
}

/// Render a one-line text gauge for terminals, e.g. `[#####-----] 50/100`.
pub fn render_text_gauge(score: f64, width: usize) -> String {
    let filled = if score.is_nan() {
        0
    } else {
        ((score.clamp(0.0, 100.0) / 100.0) * width as f64).round() as usize
    };
    format!(
        "[{}{}] {}/100",
        "#".repeat(filled),
        "-".repeat(width - filled),
        score_label(score)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn thresholds() {
        assert_eq!(score_color(0.0), ScoreColor::Bad);
        assert_eq!(score_color(49.99), ScoreColor::Bad);
        assert_eq!(score_color(50.0), ScoreColor::Warning);
        assert_eq!(score_color(74.9), ScoreColor::Warning);
        assert_eq!(score_color(75.0), ScoreColor::Good);
        assert_eq!(score_color(100.0), ScoreColor::Good);
    }

    #[test]
    fn out_of_range_scores_are_not_clamped() {
        assert_eq!(score_color(-10.0), ScoreColor::Bad);
        assert_eq!(score_color(250.0), ScoreColor::Good);
        assert_eq!(score_color(f64::NAN), ScoreColor::Bad);
        assert_eq!(arc_length(-10.0), -56.5);
        assert_eq!(arc_length(200.0), 1130.0);
    }

    #[test]
    fn arc_lengths_at_landmarks() {
        assert_eq!(arc_length(0.0), 0.0);
        assert_eq!(arc_length(50.0), GAUGE_CIRCUMFERENCE / 2.0);
        assert_eq!(arc_length(100.0), GAUGE_CIRCUMFERENCE);
    }

    #[test]
    fn gauge_markup() {
        let html = render_score_gauge(100.0);
        assert!(html.contains(r#"stroke-dasharray="565 565""#));
        assert!(html.contains(r##"stroke="#48bb78""##));
        assert!(html.contains(r##"stroke="#e2e8f0""##));
        assert!(html.contains(r#"<div class="score-number">100</div>"#));

        let html = render_score_gauge(0.0);
        assert!(html.contains(r#"stroke-dasharray="0 565""#));
        assert!(html.contains(r##"stroke="#fc8181""##));

        let html = render_score_gauge(50.0);
        assert!(html.contains(r#"stroke-dasharray="282.5 565""#));
        assert!(html.contains(r##"stroke="#f6ad55""##));
    }

    #[test]
    fn label_rounds_half_up() {
        assert_eq!(score_label(62.5), "63");
        assert_eq!(score_label(62.49), "62");
        assert_eq!(score_label(-0.5), "0");
        assert_eq!(score_label(-1.5), "-1");
        assert_eq!(score_label(-0.0), "0");
    }

    #[test]
    fn label_does_not_round_just_below_a_half_up() {
        assert_eq!(score_label(0.49999999999999994), "0");
        assert_eq!(score_label(99.49999999999999), "99");
    }

    #[test]
    fn text_gauge() {
        assert_eq!(render_text_gauge(50.0, 10), "[#####-----] 50/100");
        assert_eq!(render_text_gauge(150.0, 4), "[####] 150/100");
        assert_eq!(render_text_gauge(f64::NAN, 4), "[----] NaN/100");
    }

    proptest! {
        #[test]
        fn color_bands_partition_the_range(score in 0.0f64..100.0) {
            let expected = if score < 50.0 {
                ScoreColor::Bad
            } else if score < 75.0 {
                ScoreColor::Warning
            } else {
                ScoreColor::Good
            };
            prop_assert_eq!(score_color(score), expected);
        }

        #[test]
        fn arc_is_proportional(score in 0.0f64..=100.0) {
            let arc = arc_length(score);
            prop_assert!((0.0..=GAUGE_CIRCUMFERENCE).contains(&arc));
            prop_assert!((arc / GAUGE_CIRCUMFERENCE * 100.0 - score).abs() < 1e-9);
        }

        #[test]
        fn label_is_nearest_integer(score in 0.0f64..=100.0) {
            let label: f64 = score_label(score).parse().unwrap();
            prop_assert_eq!(label.fract(), 0.0);
            prop_assert!((label - score).abs() <= 0.5);
        }
    }
}
