//! Payment checkout endpoint.
//!
//! The server creates a hosted checkout session and returns its URL. The
//! payment provider sends the user back to the success page or, on
//! cancellation, to the audit's results page.

use crate::error::AuditApiError;
use crate::http::{read_json, OnReject};
use crate::routes::{endpoint_url, results_url, success_url};
use crate::types::{CheckoutRequest, CheckoutSession};
use crate::AuditClient;

pub const CHECKOUT_FAILED: &str = "Failed to create checkout session";

impl AuditClient {
    /// Build the checkout body for `audit_id` on `plan`, with return URLs
    /// under this client's origin.
    pub fn checkout_request(&self, audit_id: &str, plan: &str) -> Result<CheckoutRequest, AuditApiError> {
        Ok(CheckoutRequest {
            audit_id: audit_id.to_string(),
            plan: plan.to_string(),
            success_url: success_url(&self.origin, audit_id)?.into(),
            cancel_url: results_url(&self.origin, audit_id)?.into(),
        })
    }

    /// Create a checkout session for upgrading an audit to a paid plan.
    ///
    /// Calls `POST {origin}/api/payment/create-checkout`.
    pub async fn create_checkout(
        &self,
        audit_id: &str,
        plan: &str,
    ) -> Result<CheckoutSession, AuditApiError> {
        let endpoint = "POST /api/payment/create-checkout";
        let url = endpoint_url(&self.origin, &["api", "payment", "create-checkout"])?;
        let body = self.checkout_request(audit_id, plan)?;

        let resp = self
            .execute(
                endpoint,
                self.post(url).json(&body),
                OnReject::Fixed(CHECKOUT_FAILED),
            )
            .await?;

        let session: CheckoutSession = read_json(endpoint, resp).await?;
        tracing::info!(audit_id, plan, session_id = %session.session_id, "checkout session created");
        Ok(session)
    }
}
