//! Export downloads and the service health check.
//!
//! Exports are only served for completed audits on paid plans; the server
//! explains refusals in the error body.

use crate::error::AuditApiError;
use crate::http::{read_json, OnReject};
use crate::routes::endpoint_url;
use crate::types::HealthReport;
use crate::AuditClient;

pub const EXPORT_FAILED: &str = "Export failed";
pub const HEALTH_FAILED: &str = "Health check failed";

impl AuditClient {
    /// Download the implementation guide PDF.
    ///
    /// Calls `GET {origin}/api/export/{audit_id}/guide.pdf`.
    pub async fn export_guide_pdf(&self, audit_id: &str) -> Result<Vec<u8>, AuditApiError> {
        let endpoint = "GET /api/export/{id}/guide.pdf";
        let url = endpoint_url(&self.origin, &["api", "export", audit_id, "guide.pdf"])?;

        let resp = self
            .execute(endpoint, self.get(url), OnReject::BodyMessageOrDetail(EXPORT_FAILED))
            .await?;

        let bytes = resp.bytes().await.map_err(|e| AuditApiError::Http {
            endpoint: endpoint.into(),
            source: e,
        })?;
        Ok(bytes.to_vec())
    }

    /// Download the recommendations, including their structured data.
    ///
    /// Calls `GET {origin}/api/export/{audit_id}/recommendations.json`.
    pub async fn export_recommendations(
        &self,
        audit_id: &str,
    ) -> Result<serde_json::Value, AuditApiError> {
        let endpoint = "GET /api/export/{id}/recommendations.json";
        let url = endpoint_url(
            &self.origin,
            &["api", "export", audit_id, "recommendations.json"],
        )?;

        let resp = self
            .execute(endpoint, self.get(url), OnReject::BodyMessageOrDetail(EXPORT_FAILED))
            .await?;

        read_json(endpoint, resp).await
    }

    /// Query the service health endpoint.
    ///
    /// Calls `GET {origin}/health`.
    pub async fn health_check(&self) -> Result<HealthReport, AuditApiError> {
        let endpoint = "GET /health";
        let url = endpoint_url(&self.origin, &["health"])?;

        let resp = self
            .execute(endpoint, self.get(url), OnReject::Fixed(HEALTH_FAILED))
            .await?;

        read_json(endpoint, resp).await
    }
}
