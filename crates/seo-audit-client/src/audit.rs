//! Audit lifecycle endpoints.
//!
//! | Method | Path | Operation | Failure message |
//! |--------|------|-----------|-----------------|
//! | POST   | `/api/audit/create` | [`AuditClient::start_audit`] | body `message`, else "Audit creation failed" |
//! | GET    | `/api/audit/{id}/status` | [`AuditClient::poll_audit_status`] | "Failed to get audit status" |
//! | GET    | `/api/audit/{id}/results` | [`AuditClient::get_audit_results`] | body `message`, else "Failed to get results" |

use crate::error::AuditApiError;
use crate::http::{read_json, OnReject};
use crate::routes::endpoint_url;
use crate::types::{Audit, AuditRequest, AuditResults, AuditStatus};
use crate::AuditClient;

pub const CREATE_FAILED: &str = "Audit creation failed";
pub const STATUS_FAILED: &str = "Failed to get audit status";
pub const RESULTS_FAILED: &str = "Failed to get results";

impl AuditClient {
    /// Create an audit. The server starts processing it in the background.
    ///
    /// Calls `POST {origin}/api/audit/create`.
    pub async fn start_audit(&self, req: &AuditRequest) -> Result<Audit, AuditApiError> {
        let endpoint = "POST /api/audit/create";
        let url = endpoint_url(&self.origin, &["api", "audit", "create"])?;

        let resp = self
            .execute(
                endpoint,
                self.post(url).json(req),
                OnReject::BodyMessage(CREATE_FAILED),
            )
            .await?;

        let audit: Audit = read_json(endpoint, resp).await?;
        tracing::info!(audit_id = %audit.audit_id, company = %req.company_name, "audit created");
        Ok(audit)
    }

    /// Fetch the current status of an audit.
    ///
    /// Calls `GET {origin}/api/audit/{audit_id}/status`.
    pub async fn poll_audit_status(&self, audit_id: &str) -> Result<AuditStatus, AuditApiError> {
        let endpoint = "GET /api/audit/{id}/status";
        let url = endpoint_url(&self.origin, &["api", "audit", audit_id, "status"])?;

        let resp = self
            .execute(endpoint, self.get(url), OnReject::Fixed(STATUS_FAILED))
            .await?;

        read_json(endpoint, resp).await
    }

    /// Fetch the results of a completed audit.
    ///
    /// Calls `GET {origin}/api/audit/{audit_id}/results`. The server rejects
    /// this with a message while the audit is still running.
    pub async fn get_audit_results(&self, audit_id: &str) -> Result<AuditResults, AuditApiError> {
        let endpoint = "GET /api/audit/{id}/results";
        let url = endpoint_url(&self.origin, &["api", "audit", audit_id, "results"])?;

        let resp = self
            .execute(endpoint, self.get(url), OnReject::BodyMessage(RESULTS_FAILED))
            .await?;

        read_json(endpoint, resp).await
    }
}
