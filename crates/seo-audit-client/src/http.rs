//! Shared request plumbing: send, classify non-2xx responses, decode bodies.

use serde::de::DeserializeOwned;

use crate::error::AuditApiError;
use crate::types::ErrorBody;
use crate::AuditClient;

/// How a non-2xx response is turned into a user-facing message.
#[derive(Debug, Clone, Copy)]
pub(crate) enum OnReject {
    /// Read the JSON error body's `message`, else use the fallback.
    BodyMessage(&'static str),
    /// Read `message`, then `detail`, else use the fallback.
    BodyMessageOrDetail(&'static str),
    /// Use this message without reading the body.
    Fixed(&'static str),
}

impl AuditClient {
    /// Send `req`, returning the response only when its status is 2xx.
    pub(crate) async fn execute(
        &self,
        endpoint: &str,
        req: reqwest::RequestBuilder,
        on_reject: OnReject,
    ) -> Result<reqwest::Response, AuditApiError> {
        tracing::debug!(endpoint, "sending request");

        let resp = req.send().await.map_err(|e| AuditApiError::Http {
            endpoint: endpoint.into(),
            source: e,
        })?;

        if !resp.status().is_success() {
            return Err(rejection(endpoint, resp, on_reject).await);
        }

        Ok(resp)
    }

    pub(crate) fn get(&self, url: url::Url) -> reqwest::RequestBuilder {
        self.http.get(url)
    }

    pub(crate) fn post(&self, url: url::Url) -> reqwest::RequestBuilder {
        self.http.post(url)
    }
}

/// Decode a successful response body as JSON.
pub(crate) async fn read_json<T: DeserializeOwned>(
    endpoint: &str,
    resp: reqwest::Response,
) -> Result<T, AuditApiError> {
    resp.json().await.map_err(|e| AuditApiError::Deserialization {
        endpoint: endpoint.into(),
        source: e,
    })
}

async fn rejection(endpoint: &str, resp: reqwest::Response, on_reject: OnReject) -> AuditApiError {
    let status = resp.status().as_u16();
    let (fallback, with_detail) = match on_reject {
        OnReject::Fixed(message) => return rejected(endpoint, status, message.to_string()),
        OnReject::BodyMessage(fallback) => (fallback, false),
        OnReject::BodyMessageOrDetail(fallback) => (fallback, true),
    };

    let body = match resp.bytes().await {
        Ok(body) => body,
        Err(e) => {
            return AuditApiError::Http {
                endpoint: endpoint.into(),
                source: e,
            }
        }
    };

    // An empty or non-JSON error body falls back like a missing field.
    let message = serde_json::from_slice::<ErrorBody>(&body)
        .ok()
        .and_then(|body| {
            if with_detail {
                body.into_message_or_detail()
            } else {
                body.into_message()
            }
        })
        .unwrap_or_else(|| fallback.to_string());

    rejected(endpoint, status, message)
}

fn rejected(endpoint: &str, status: u16, message: String) -> AuditApiError {
    tracing::debug!(endpoint, status, %message, "request rejected");

    AuditApiError::Rejected {
        endpoint: endpoint.into(),
        status,
        message,
    }
}
