//! # seo-audit-client -- Typed Rust client for the SEO audit API
//!
//! Drives the audit workflow of the web front end:
//! - **Audit creation** via `POST /api/audit/create`
//! - **Status polling** via `GET /api/audit/{id}/status`
//! - **Results** via `GET /api/audit/{id}/results`
//! - **Checkout** via `POST /api/payment/create-checkout`
//!
//! Plus the export downloads and the service health check.
//!
//! ## Page Context
//!
//! The browser globals the front end relies on (DOM elements, navigation,
//! blocking alerts) are modeled by the [`page::Page`] trait and passed in
//! explicitly. [`form`] implements the audit form submission and [`poll`]
//! the completion polling loop on top of it.
//!
//! ## Error Convention
//!
//! Transport and parse failures surface unchanged as the error source.
//! Non-2xx responses become [`AuditApiError::Rejected`] carrying a
//! human-readable message: the body's `message` for endpoints that provide
//! one, otherwise a fixed fallback.

pub mod audit;
pub mod config;
pub mod error;
pub mod export;
pub mod form;
pub(crate) mod http;
pub mod page;
pub mod payment;
pub mod poll;
pub mod routes;
pub mod score;
pub mod types;

pub use config::AuditApiConfig;
pub use error::AuditApiError;
pub use page::{Page, RecordingPage};
pub use poll::{PollErrorPolicy, PollOutcome, PollSettings, StatusSource};
pub use types::{AuditRequest, AuditResults, AuditState, AuditStatus, CheckoutSession};

use std::time::Duration;

use url::Url;

/// SEO audit API client. Cheap to clone; clones share one connection pool.
#[derive(Debug, Clone)]
pub struct AuditClient {
    http: reqwest::Client,
    origin: Url,
    poll: PollSettings,
}

impl AuditClient {
    /// Create a new client from configuration.
    pub fn new(config: AuditApiConfig) -> Result<Self, AuditApiError> {
        config.validate()?;

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| config::ConfigError::ClientInit(e.to_string()))?;

        Ok(Self {
            http,
            poll: config.poll_settings(),
            origin: config.origin,
        })
    }

    /// Create a client configured from the environment (see [`AuditApiConfig::from_env`]).
    pub fn from_env() -> Result<Self, AuditApiError> {
        Self::new(AuditApiConfig::from_env()?)
    }

    /// The origin all requests and page URLs are resolved against.
    pub fn origin(&self) -> &Url {
        &self.origin
    }

    /// Polling cadence used by [`AuditClient::wait_for_completion`].
    pub fn poll_settings(&self) -> &PollSettings {
        &self.poll
    }

    /// Poll the audit until it completes, fails, or the attempt cap is hit,
    /// reflecting progress on `page`.
    pub async fn wait_for_completion<P: Page>(&self, audit_id: &str, page: &mut P) -> PollOutcome {
        poll::wait_for_audit_completion(self, audit_id, page, &self.poll).await
    }
}
