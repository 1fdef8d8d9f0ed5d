//! HTTP client for the registration endpoint
//!
//! Posts the form values as JSON. Both success and rejection responses carry
//! a `message` field that is shown to the user verbatim.

use super::error::ApiError;
use super::traits::RegistrationApi;
use crate::state::FormValues;
use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Deserialize;
use std::time::Duration;

/// Default registration endpoint
pub const DEFAULT_ENDPOINT: &str = "https://webapis.bloomtechdev.com/registration";

/// Default request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Body of both success and rejection responses
#[derive(Debug, Deserialize)]
struct MessageBody {
    message: String,
}

/// Client for the registration endpoint
pub struct HttpRegistrationClient {
    client: Client,
    endpoint: Url,
}

impl HttpRegistrationClient {
    /// Create a new client for `endpoint`
    pub fn new(endpoint: Url, timeout: Duration) -> Result<Self, ApiError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl RegistrationApi for HttpRegistrationClient {
    async fn submit_registration(&self, values: &FormValues) -> Result<String, ApiError> {
        tracing::debug!("POST {}", self.endpoint);

        let response = self
            .client
            .post(self.endpoint.clone())
            .json(values)
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("Registration response status: {}", status);
        let body = response.bytes().await?;

        if status.is_success() {
            let parsed: MessageBody = serde_json::from_slice(&body)?;
            return Ok(parsed.message);
        }

        match serde_json::from_slice::<MessageBody>(&body) {
            Ok(parsed) => Err(ApiError::Rejected {
                status: status.as_u16(),
                message: parsed.message,
            }),
            Err(_) => Err(ApiError::UnexpectedStatus {
                status: status.as_u16(),
            }),
        }
    }
}
