//! Delivery of a finished report to the remote endpoint.

use crate::errors::{AppError, AppResult};
use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use std::time::Duration;

pub trait Transport {
    /// Deliver the JSON body. `Ok` means the endpoint acknowledged it.
    fn send(&self, body: &[u8]) -> AppResult<()>;
}

/// HTTP POST with a bounded wait.
pub struct HttpTransport {
    client: Client,
    endpoint: String,
    timeout_secs: u64,
}

impl HttpTransport {
    pub fn new(endpoint: &str, timeout_secs: u64) -> AppResult<Self> {
        let endpoint = endpoint.trim();
        if endpoint.is_empty() {
            return Err(AppError::Config(
                "no submission endpoint configured (set `endpoint` or pass --endpoint)".into(),
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| AppError::Transport(format!("cannot build HTTP client: {e}")))?;

        Ok(Self {
            client,
            endpoint: endpoint.to_string(),
            timeout_secs,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl Transport for HttpTransport {
    fn send(&self, body: &[u8]) -> AppResult<()> {
        let response = self
            .client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "text/plain;charset=utf-8")
            .body(body.to_vec())
            .send()
            .map_err(|e| {
                if e.is_timeout() {
                    AppError::Timeout(self.timeout_secs)
                } else {
                    AppError::Transport(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Transport(format!(
                "endpoint answered HTTP {}",
                status.as_u16()
            )));
        }
        Ok(())
    }
}
