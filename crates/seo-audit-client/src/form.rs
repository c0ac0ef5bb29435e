//! # Audit Form Submission
//!
//! Handles a submission of the landing page's audit form: read the six
//! fields, lock the submit control, create the audit, then either navigate
//! to the results page or report the error and unlock the control.
//! Submission is attempted once; there is no retry.

use crate::page::{Page, AUDIT_FORM};
use crate::routes::results_path;
use crate::types::AuditRequest;
use crate::AuditClient;

/// Submit label while the creation request is in flight.
pub const STARTING_LABEL: &str = "Démarrage de l'audit...";

/// Submit label restored after a failed submission.
pub const SUBMIT_LABEL: &str = "Lancer l'audit gratuit";

/// Prefix of the alert shown when submission fails.
pub const ERROR_PREFIX: &str = "Erreur: ";

/// Result of one submission, for callers that continue after the page effects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The audit was created and the page navigated to its results.
    Redirected { audit_id: String, path: String },
    /// Creation failed; the user was alerted and the form re-enabled.
    Failed { message: String },
}

/// Handle to the audit form on a page. Only obtainable when the form exists.
#[derive(Debug, Clone, Copy)]
pub struct AuditForm {
    _private: (),
}

/// Wire the submission handler if the page carries the audit form.
pub fn wire_audit_form<P: Page>(page: &P) -> Option<AuditForm> {
    if page.has_element(AUDIT_FORM) {
        Some(AuditForm { _private: () })
    } else {
        tracing::debug!("no audit form on page; submission handler not wired");
        None
    }
}

impl AuditForm {
    /// Read the form fields into a request. Absent fields read as empty;
    /// an empty language falls back to the default.
    pub fn read_request<P: Page>(&self, page: &P) -> AuditRequest {
        let field = |name: &str| page.field_value(name).unwrap_or_default();
        AuditRequest::new(
            field("company_name"),
            field("sector"),
            field("location"),
            field("email"),
            field("plan"),
            field("language"),
        )
    }

    /// Handle one submission of the form.
    pub async fn submit<P: Page>(&self, client: &AuditClient, page: &mut P) -> SubmitOutcome {
        let request = self.read_request(page);

        page.set_submit_state(false, STARTING_LABEL);

        let created = client.start_audit(&request).await.and_then(|audit| {
            let path = results_path(client.origin(), &audit.audit_id)?;
            Ok((audit, path))
        });

        match created {
            Ok((audit, path)) => {
                page.navigate(&path);
                SubmitOutcome::Redirected {
                    audit_id: audit.audit_id,
                    path,
                }
            }
            Err(e) => {
                let message = e.to_string();
                tracing::warn!(error = %message, "audit submission failed");
                page.alert(&format!("{ERROR_PREFIX}{message}"));
                page.set_submit_state(true, SUBMIT_LABEL);
                SubmitOutcome::Failed { message }
            }
        }
    }
}
