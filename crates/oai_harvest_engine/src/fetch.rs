use std::time::Duration;

use futures_util::StreamExt;
use oai_harvest_core::PageRequest;
use reqwest::header::{CONTENT_TYPE, RETRY_AFTER};
use url::Url;

use crate::{FailureKind, TransportError};

/// arXiv's OAI-PMH endpoint.
pub const DEFAULT_ENDPOINT: &str = "http://export.arxiv.org/oai2";

#[derive(Debug, Clone)]
pub struct FetchSettings {
    pub endpoint: Url,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub redirect_limit: usize,
    pub max_bytes: u64,
    pub allowed_content_types: Vec<String>,
    pub user_agent: String,
}

impl FetchSettings {
    pub fn new(endpoint: Url) -> Self {
        Self {
            endpoint,
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(120),
            redirect_limit: 5,
            max_bytes: 64 * 1024 * 1024,
            allowed_content_types: vec![
                "text/xml".to_string(),
                "application/xml".to_string(),
            ],
            user_agent: concat!("oai-harvest/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Issues one ListRecords request and returns the response body.
#[async_trait::async_trait]
pub trait PageSource: Send + Sync {
    async fn fetch(&self, request: &PageRequest) -> Result<String, TransportError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestPageSource {
    settings: FetchSettings,
    client: reqwest::Client,
}

impl ReqwestPageSource {
    pub fn new(settings: FetchSettings) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .redirect(reqwest::redirect::Policy::limited(settings.redirect_limit))
            .user_agent(settings.user_agent.clone())
            .build()
            .map_err(|err| TransportError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self { settings, client })
    }

    pub fn settings(&self) -> &FetchSettings {
        &self.settings
    }

    fn is_content_type_allowed(&self, content_type: &str) -> bool {
        let ct = content_type.split(';').next().unwrap_or(content_type).trim();
        self.settings
            .allowed_content_types
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(ct))
    }
}

#[async_trait::async_trait]
impl PageSource for ReqwestPageSource {
    async fn fetch(&self, request: &PageRequest) -> Result<String, TransportError> {
        let url = request.to_url(&self.settings.endpoint);
        if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
            return Err(TransportError::new(FailureKind::InvalidUrl, url.to_string()));
        }

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            let retry_after = response
                .headers()
                .get(RETRY_AFTER)
                .and_then(|value| value.to_str().ok())
                .and_then(|value| value.trim().parse::<u64>().ok())
                .map(Duration::from_secs);
            return Err(TransportError {
                retry_after,
                ..TransportError::new(FailureKind::HttpStatus(status.as_u16()), status.to_string())
            });
        }

        if let Some(content_len) = response.content_length() {
            if content_len > self.settings.max_bytes {
                return Err(TransportError::new(
                    FailureKind::TooLarge {
                        max_bytes: self.settings.max_bytes,
                        actual: Some(content_len),
                    },
                    "response too large",
                ));
            }
        }

        if let Some(ct) = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
        {
            if !self.is_content_type_allowed(ct) {
                return Err(TransportError::new(
                    FailureKind::UnsupportedContentType {
                        content_type: ct.to_string(),
                    },
                    "unsupported content type",
                ));
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > self.settings.max_bytes {
                return Err(TransportError::new(
                    FailureKind::TooLarge {
                        max_bytes: self.settings.max_bytes,
                        actual: Some(next_len),
                    },
                    "response too large",
                ));
            }
            bytes.extend_from_slice(&chunk);
        }

        String::from_utf8(bytes)
            .map_err(|err| TransportError::new(FailureKind::InvalidUtf8, err.to_string()))
    }
}

fn map_reqwest_error(err: reqwest::Error) -> TransportError {
    if err.is_timeout() {
        return TransportError::new(FailureKind::Timeout, err.to_string());
    }
    if err.is_redirect() {
        return TransportError::new(FailureKind::RedirectLimitExceeded, err.to_string());
    }
    TransportError::new(FailureKind::Network, err.to_string())
}
