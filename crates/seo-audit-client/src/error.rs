//! SEO audit API client error types.

/// Errors from SEO audit API calls.
///
/// Transport and body-parse failures keep the underlying [`reqwest::Error`]
/// as their source. Non-2xx responses are normalized into
/// [`AuditApiError::Rejected`], whose `Display` output is exactly the
/// human-readable message shown to the user.
#[derive(Debug, thiserror::Error)]
pub enum AuditApiError {
    /// HTTP transport error.
    #[error("HTTP error calling {endpoint}: {source}")]
    Http {
        endpoint: String,
        source: reqwest::Error,
    },
    /// The API returned a non-2xx status.
    #[error("{message}")]
    Rejected {
        endpoint: String,
        status: u16,
        message: String,
    },
    /// Response deserialization failed.
    #[error("failed to deserialize response from {endpoint}: {source}")]
    Deserialization {
        endpoint: String,
        source: reqwest::Error,
    },
    /// A request URL could not be built from the configured origin.
    #[error("invalid URL for {endpoint}: {source}")]
    InvalidUrl {
        endpoint: String,
        source: url::ParseError,
    },
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(#[from] super::config::ConfigError),
}

impl AuditApiError {
    /// The HTTP status of a rejected request, if the server answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the failure happened below the HTTP status level
    /// (connection, timeout, or an unparsable success body).
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Http { .. } | Self::Deserialization { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejected_displays_message_only() {
        let err = AuditApiError::Rejected {
            endpoint: "POST /api/audit/create".into(),
            status: 400,
            message: "invalid email".into(),
        };
        assert_eq!(err.to_string(), "invalid email");
        assert_eq!(err.status(), Some(400));
        assert!(!err.is_transport());
    }

    #[test]
    fn config_error_converts() {
        let err: AuditApiError = super::super::config::ConfigError::InvalidUrl(
            "SEO_AUDIT_ORIGIN".into(),
            "relative URL without a base".into(),
        )
        .into();
        assert!(err.to_string().starts_with("configuration error"));
        assert_eq!(err.status(), None);
    }
}
