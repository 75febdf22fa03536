//! Low-level HTTP client for the cloud account API.
//!
//! All API calls go through [`AccountClient`] which handles:
//! - Bearer token injection
//! - Base URL routing
//! - Status code to [`ApiError`] mapping

use crate::auth::masked;
use crate::types::CloudAccountConfig;
use log::{debug, error};
use oauth2::AccessToken;
use qeek_core::{ApiError, ErrorCause, TransportError};
use reqwest::header::ACCEPT;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use url::Url;

const TRANSPORT_LABEL: &str = "account http request";
const DECODE_LABEL: &str = "account json unmarshal";
const OP_CLIENT: &str = "Cloud account client fail";

/// HTTP client bound to one API base URL.
#[derive(Clone)]
pub struct AccountClient {
    http: reqwest::blocking::Client,
    base_url: Url,
}

impl std::fmt::Debug for AccountClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccountClient")
            .field("base_url", &self.base_url.as_str())
            .finish()
    }
}

impl AccountClient {
    pub fn new(config: &CloudAccountConfig) -> Result<Self, ApiError> {
        let mut base_url = Url::parse(&config.base_url).map_err(|e| {
            ApiError::invalid_argument(OP_CLIENT, format!("invalid base url {:?}: {e}", config.base_url))
        })?;
        // Url::join replaces the last segment unless the path ends in '/'.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let mut builder = reqwest::blocking::Client::builder();
        if !config.user_agent.is_empty() {
            builder = builder.user_agent(config.user_agent.clone());
        }
        if !config.use_system_proxy {
            builder = builder.no_proxy();
        }
        let http = builder.build().map_err(|e| {
            ApiError::internal(
                OP_CLIENT,
                ErrorCause::Transport {
                    label: TRANSPORT_LABEL,
                    source: TransportError::Http {
                        url: base_url.to_string(),
                        source: Box::new(e),
                    },
                },
            )
        })?;

        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve `route` (e.g. `v1.1/me`) against the base URL.
    pub fn endpoint(&self, operation: &'static str, route: &str) -> Result<Url, ApiError> {
        self.base_url
            .join(route.trim_start_matches('/'))
            .map_err(|e| log_error(ApiError::invalid_argument(operation, format!("invalid route {route:?}: {e}"))))
    }

    /// `GET {base}/{route}` with a bearer token, decoding a JSON body.
    pub fn get_json<R: DeserializeOwned>(
        &self,
        operation: &'static str,
        route: &str,
        token: &AccessToken,
    ) -> Result<R, ApiError> {
        let url = self.endpoint(operation, route)?;
        debug!("GET {} (token {})", url, masked(token));

        let resp = self
            .http
            .get(url.clone())
            .bearer_auth(token.secret())
            .header(ACCEPT, "application/json")
            .send()
            .map_err(|e| map_http(operation, &url, e))?;

        let status = resp.status();
        let body = resp.text().map_err(|e| map_http(operation, &url, e))?;
        debug!("GET {} -> {}", url, status);

        check_status(operation, status, &body)?;
        serde_json::from_str(&body).map_err(|source| {
            log_error(ApiError::internal(
                operation,
                ErrorCause::Decode {
                    label: DECODE_LABEL,
                    source,
                },
            ))
        })
    }
}

fn log_error(err: ApiError) -> ApiError {
    error!("{}", err);
    err
}

fn map_http(operation: &'static str, url: &Url, e: reqwest::Error) -> ApiError {
    log_error(ApiError::internal(
        operation,
        ErrorCause::Transport {
            label: TRANSPORT_LABEL,
            source: TransportError::Http {
                url: url.to_string(),
                source: Box::new(e),
            },
        },
    ))
}

/// 4xx is the caller's fault, 5xx is ours.
fn check_status(operation: &'static str, status: StatusCode, body: &str) -> Result<(), ApiError> {
    if status.is_success() {
        return Ok(());
    }
    if status.is_client_error() {
        return Err(log_error(ApiError::bad_request(
            operation,
            i64::from(status.as_u16()),
            error_message(status, body),
        )));
    }
    Err(log_error(ApiError::internal(
        operation,
        ErrorCause::Transport {
            label: TRANSPORT_LABEL,
            source: TransportError::HttpStatus {
                status: status.as_u16(),
                body: body.trim().to_string(),
            },
        },
    )))
}

/// Pull a human message out of an error body.
fn error_message(status: StatusCode, body: &str) -> String {
    if let Ok(serde_json::Value::Object(map)) = serde_json::from_str::<serde_json::Value>(body) {
        for key in ["message", "error_description", "error"] {
            if let Some(msg) = map.get(key).and_then(|v| v.as_str()).filter(|m| !m.is_empty()) {
                return msg.to_string();
            }
        }
    }
    let trimmed = body.trim();
    if trimmed.is_empty() {
        status.canonical_reason().unwrap_or("request rejected").to_string()
    } else {
        trimmed.to_string()
    }
}
