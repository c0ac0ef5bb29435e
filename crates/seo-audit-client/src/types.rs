//! # Request and Response Types
//!
//! Explicit schemas for every JSON payload the client sends or receives.
//!
//! Response types are lenient: optional fields use `#[serde(default)]` and
//! unknown fields are kept in an `extra` map rather than rejected, so the
//! server can evolve its payloads without breaking deployed clients.
//! `serde(deny_unknown_fields)` is intentionally NOT used.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Language used when the form leaves the language field empty.
pub const DEFAULT_LANGUAGE: &str = "fr";

// -- Audit creation ----------------------------------------------------------

/// Body of `POST /api/audit/create`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditRequest {
    pub company_name: String,
    pub sector: String,
    pub location: String,
    pub email: String,
    pub plan: String,
    pub language: String,
}

impl AuditRequest {
    /// Build a request, substituting [`DEFAULT_LANGUAGE`] for an empty language.
    pub fn new(
        company_name: impl Into<String>,
        sector: impl Into<String>,
        location: impl Into<String>,
        email: impl Into<String>,
        plan: impl Into<String>,
        language: impl Into<String>,
    ) -> Self {
        let language = language.into();
        Self {
            company_name: company_name.into(),
            sector: sector.into(),
            location: location.into(),
            email: email.into(),
            plan: plan.into(),
            language: if language.is_empty() {
                DEFAULT_LANGUAGE.to_string()
            } else {
                language
            },
        }
    }
}

/// An audit as returned by the creation endpoint.
///
/// Only `audit_id` is guaranteed. The server currently also reports the
/// initial status; anything else is kept in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Audit {
    pub audit_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<AuditState>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_step: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// -- Status ------------------------------------------------------------------

/// Lifecycle state of an audit.
///
/// Values the client does not know are carried through unchanged in
/// [`AuditState::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AuditState {
    Pending,
    Running,
    Completed,
    Failed,
    Other(String),
}

impl AuditState {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Pending => "pending",
            Self::Running => "running",
            Self::Completed => "completed",
            Self::Failed => "failed",
            Self::Other(s) => s,
        }
    }
}

impl From<String> for AuditState {
    fn from(s: String) -> Self {
        match s.as_str() {
            "pending" => Self::Pending,
            "running" => Self::Running,
            "completed" => Self::Completed,
            "failed" => Self::Failed,
            _ => Self::Other(s),
        }
    }
}

impl From<&str> for AuditState {
    fn from(s: &str) -> Self {
        Self::from(s.to_string())
    }
}

impl From<AuditState> for String {
    fn from(state: AuditState) -> Self {
        match state {
            AuditState::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for AuditState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Response of `GET /api/audit/{id}/status`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditStatus {
    pub status: AuditState,
    #[serde(default)]
    pub progress: u32,
    #[serde(default)]
    pub current_step: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audit_id: Option<String>,
    #[serde(
        default,
        deserialize_with = "timestamp::lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub estimated_completion: Option<DateTime<Utc>>,
}

impl AuditStatus {
    /// Text for the progress element, e.g. `"50%"`.
    pub fn progress_text(&self) -> String {
        format!("{}%", self.progress)
    }

    /// Text for the current-step element; a missing step renders empty.
    pub fn step_text(&self) -> &str {
        self.current_step.as_deref().unwrap_or("")
    }
}

// -- Results -----------------------------------------------------------------

/// A competitor mentioned by the assistants queried during the audit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompetitorInfo {
    pub name: String,
    #[serde(default)]
    pub mention_count: u32,
    #[serde(default)]
    pub avg_position: Option<f64>,
}

/// A visibility gap found by the analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GapInfo {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub severity: String,
    #[serde(default)]
    pub affected_queries: Vec<String>,
}

/// A generated optimization recommendation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationInfo {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub priority: i32,
    #[serde(default)]
    pub estimated_impact: String,
    #[serde(default)]
    pub content: Value,
    #[serde(default)]
    pub integration_guide: String,
}

/// Response of `GET /api/audit/{id}/results`.
///
/// The results object is owned by the server; every field here is
/// optional-with-default and unrecognized fields land in `extra`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AuditResults {
    #[serde(default)]
    pub audit_id: String,
    #[serde(default)]
    pub company_name: String,
    #[serde(default)]
    pub sector: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub visibility_score: f64,
    #[serde(default)]
    pub status: Option<AuditState>,
    #[serde(default)]
    pub queries_tested: u32,
    #[serde(default)]
    pub competitors: Vec<CompetitorInfo>,
    #[serde(default)]
    pub gaps: Vec<GapInfo>,
    #[serde(default)]
    pub recommendations: Vec<RecommendationInfo>,
    #[serde(default, deserialize_with = "timestamp::lenient")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "timestamp::lenient")]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// -- Payment -----------------------------------------------------------------

/// Body of `POST /api/payment/create-checkout`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutRequest {
    pub audit_id: String,
    pub plan: String,
    pub success_url: String,
    pub cancel_url: String,
}

/// Checkout session created by the server; `checkout_url` is the redirect target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckoutSession {
    pub checkout_url: String,
    #[serde(default)]
    pub session_id: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// -- Service -----------------------------------------------------------------

/// Response of `GET /health`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthReport {
    pub status: String,
    #[serde(default)]
    pub service: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub phase: Option<String>,
}

impl HealthReport {
    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}

/// Error body shape used by the API for rejected requests.
///
/// The audit and results endpoints are read for `message` only. The export
/// endpoints also report refusals in the server framework's `detail` field.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    message: Option<Value>,
    #[serde(default)]
    detail: Option<Value>,
}

impl ErrorBody {
    /// The `message` field, when it is a non-empty string.
    pub(crate) fn into_message(self) -> Option<String> {
        non_empty(self.message)
    }

    /// `message`, else `detail`, whichever is first a non-empty string.
    pub(crate) fn into_message_or_detail(self) -> Option<String> {
        non_empty(self.message).or_else(|| non_empty(self.detail))
    }
}

fn non_empty(value: Option<Value>) -> Option<String> {
    match value {
        Some(Value::String(s)) if !s.is_empty() => Some(s),
        _ => None,
    }
}

mod timestamp {
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::{Deserialize, Deserializer};

    /// Accept RFC 3339 timestamps and offset-less ISO 8601 ones (read as UTC).
    /// Unparsable values become `None`.
    pub(super) fn lenient<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.and_then(|s| parse(&s)))
    }

    pub(super) fn parse(s: &str) -> Option<DateTime<Utc>> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Some(dt.with_timezone(&Utc));
        }
        NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
            .ok()
            .map(|naive| naive.and_utc())
    }
}
