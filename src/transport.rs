//! HTTP transport and response classification.
//!
//! The SDK owns request construction and response interpretation; the
//! [`HttpTransport`] only moves bytes. Swap it out to add proxies, custom TLS
//! or test doubles.

use async_trait::async_trait;
use reqwest::header::HeaderMap;
use reqwest::{Client, Method};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use crate::error::{BoxError, Result, SdkError};

/// A fully-formed request ready to be sent.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: HeaderMap,
    pub body: Option<Vec<u8>>,
}

/// What came back over the wire.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

/// Performs a single HTTP exchange.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn send(&self, request: HttpRequest) -> std::result::Result<HttpResponse, BoxError>;
}

/// Default transport over a shared `reqwest::Client`.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    /// Use a preconfigured reqwest client (proxies, TLS, pooling).
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> std::result::Result<HttpResponse, BoxError> {
        let mut builder = self
            .client
            .request(request.method, &request.url)
            .headers(request.headers);
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let headers = response.headers().clone();
        let body = response.bytes().await?.to_vec();

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

/// Sends built requests and classifies the outcome. One attempt, no retries.
#[derive(Clone)]
pub struct Executor {
    transport: Arc<dyn HttpTransport>,
    timeout: Option<Duration>,
    debug: bool,
}

impl Executor {
    pub fn new(transport: Arc<dyn HttpTransport>, timeout: Option<Duration>, debug: bool) -> Self {
        Self {
            transport,
            timeout,
            debug,
        }
    }

    /// Send `request` and return the raw response body.
    ///
    /// Transport errors and an expired deadline become
    /// [`SdkError::HttpFailure`]; any status >= 400 becomes
    /// [`SdkError::UnexpectedStatus`] with the body attached.
    pub async fn execute(&self, request: HttpRequest) -> Result<Vec<u8>> {
        let exchange = self.transport.send(request);

        let outcome = match self.timeout {
            Some(limit) => match tokio::time::timeout(limit, exchange).await {
                Ok(outcome) => outcome,
                Err(elapsed) => return Err(SdkError::HttpFailure(Box::new(elapsed))),
            },
            None => exchange.await,
        };

        let response = outcome.map_err(SdkError::HttpFailure)?;

        if self.debug {
            debug!(status = response.status, "http response");
            debug!(
                body = %String::from_utf8_lossy(&response.body),
                "http response body"
            );
        }

        if response.status >= 400 {
            return Err(SdkError::UnexpectedStatus {
                status: response.status,
                body: String::from_utf8_lossy(&response.body).into_owned(),
            });
        }

        Ok(response.body)
    }
}
