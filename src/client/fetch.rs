use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;

use crate::config::AccountConfig;
use crate::error::AccountError;

/// Raw HTTP response: status code and body text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResponse {
    pub status: u16,
    pub body: String,
}

impl FetchResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Fail with [`AccountError::Http`] on a non-2xx status
    pub fn error_for_status(self) -> Result<Self, AccountError> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(AccountError::Http {
                status: self.status,
                body: self.body,
            })
        }
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, AccountError> {
        Ok(serde_json::from_str(&self.body)?)
    }
}

/// HTTP capability injected into the account actions
#[async_trait]
pub trait Fetch: Send + Sync {
    async fn get(&self, url: &str, authorization: Option<&str>)
        -> Result<FetchResponse, AccountError>;

    async fn post_json(
        &self,
        url: &str,
        authorization: Option<&str>,
        body: &Value,
    ) -> Result<FetchResponse, AccountError>;
}

/// `Authorization` header value for the core node API
pub fn authorization_header_value(core_api_password: &str) -> String {
    format!("bearer {}", core_api_password)
}

/// [`Fetch`] over a shared `reqwest::Client`
#[derive(Clone)]
pub struct ReqwestFetch {
    client: reqwest::Client,
}

impl ReqwestFetch {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self, AccountError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }

    pub fn from_config(config: &AccountConfig) -> Result<Self, AccountError> {
        Self::with_timeout(config.http_timeout)
    }

    async fn read(response: reqwest::Response) -> Result<FetchResponse, AccountError> {
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(FetchResponse { status, body })
    }
}

impl Default for ReqwestFetch {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Fetch for ReqwestFetch {
    async fn get(
        &self,
        url: &str,
        authorization: Option<&str>,
    ) -> Result<FetchResponse, AccountError> {
        let mut request = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json");
        if let Some(value) = authorization {
            request = request.header(reqwest::header::AUTHORIZATION, value);
        }

        let response = request.send().await?;
        Self::read(response).await
    }

    async fn post_json(
        &self,
        url: &str,
        authorization: Option<&str>,
        body: &Value,
    ) -> Result<FetchResponse, AccountError> {
        let mut request = self
            .client
            .post(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .json(body);
        if let Some(value) = authorization {
            request = request.header(reqwest::header::AUTHORIZATION, value);
        }

        let response = request.send().await?;
        Self::read(response).await
    }
}
