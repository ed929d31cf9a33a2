use std::time::Duration;

use reqwest::{Method, RequestBuilder, Response};

use crate::{config::SimkitConfig, error::SimkitError};

/// A simple wrapper on an HTTP client for making requests. Sets the user-agent, applies
/// the configured timeout (if any) and ensures HTTPS unless insecure transport is allowed.
///
/// Requests are sent once. Failed requests are not retried.
pub struct Request {
    client: reqwest::Client,
    timeout: Option<Duration>,
    allow_insecure: bool,
}

impl Request {
    /// Initializes a new `Request` instance from the configuration.
    pub(crate) fn new(config: &SimkitConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            timeout: config.timeout,
            allow_insecure: config.allow_insecure,
        }
    }

    /// Creates a request builder with defaults applied.
    pub(crate) fn req(
        &self,
        method: Method,
        url: &str,
    ) -> Result<RequestBuilder, SimkitError> {
        if !self.allow_insecure && !url.starts_with("https") {
            return Err(SimkitError::InsecureUrl(url.to_string()));
        }

        let builder = self.client.request(method, url).header(
            "User-Agent",
            format!("simkit-core/{}", env!("CARGO_PKG_VERSION")),
        );

        Ok(match self.timeout {
            Some(timeout) => builder.timeout(timeout),
            None => builder,
        })
    }

    /// Creates a POST request builder with defaults applied.
    pub(crate) fn post(&self, url: &str) -> Result<RequestBuilder, SimkitError> {
        self.req(Method::POST, url)
    }

    /// Sends a request built by `req`/`post`.
    pub(crate) async fn handle(
        request_builder: RequestBuilder,
    ) -> Result<Response, SimkitError> {
        let (client, request) = request_builder.build_split();
        let request = request.map_err(|err| SimkitError::NetworkError {
            url: err
                .url()
                .map_or_else(|| "<unknown>".to_string(), ToString::to_string),
            status: None,
            error: format!("request build failed: {err}"),
        })?;
        let url = request.url().to_string();

        client
            .execute(request)
            .await
            .map_err(|err| SimkitError::NetworkError {
                url,
                status: None,
                error: format!("request failed: {err}"),
            })
    }
}
