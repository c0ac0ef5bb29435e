//! URL construction for API endpoints and front-end pages.
//!
//! Every URL is built from the origin alone; any path on the configured
//! origin is discarded, matching `location.origin` semantics. Audit ids are
//! percent-encoded as a path segment or query value.
//!
//! | Page | Path |
//! |------|------|
//! | Results | `/results/{audit_id}` |
//! | Payment success | `/success?audit_id={audit_id}` |

use url::{Position, Url};

use crate::error::AuditApiError;

/// Build `{origin}/{segments...}`.
pub fn endpoint_url(origin: &Url, segments: &[&str]) -> Result<Url, AuditApiError> {
    let mut url = origin.clone();
    url.set_query(None);
    url.set_fragment(None);
    url.path_segments_mut()
        .map_err(|()| AuditApiError::InvalidUrl {
            endpoint: segments.join("/"),
            source: url::ParseError::RelativeUrlWithCannotBeABaseBase,
        })?
        .clear()
        .extend(segments);
    Ok(url)
}

/// Absolute URL of the results page for `audit_id`.
pub fn results_url(origin: &Url, audit_id: &str) -> Result<Url, AuditApiError> {
    endpoint_url(origin, &["results", audit_id])
}

/// Absolute URL of the payment success page for `audit_id`.
pub fn success_url(origin: &Url, audit_id: &str) -> Result<Url, AuditApiError> {
    let mut url = endpoint_url(origin, &["success"])?;
    url.query_pairs_mut().append_pair("audit_id", audit_id);
    Ok(url)
}

/// Origin-relative results path, used for in-page navigation.
pub fn results_path(origin: &Url, audit_id: &str) -> Result<String, AuditApiError> {
    Ok(results_url(origin, audit_id)?[Position::BeforePath..].to_string())
}

/// Origin-relative payment success path.
pub fn success_path(origin: &Url, audit_id: &str) -> Result<String, AuditApiError> {
    Ok(success_url(origin, audit_id)?[Position::BeforePath..].to_string())
}
