//! Shared OpenRouteService HTTP client.
//!
//! Both adapters are synchronous at their trait boundary. The client owns a
//! current-thread Tokio runtime and blocks on it, or borrows the caller's
//! runtime through [`tokio::task::block_in_place`] when invoked from inside a
//! multi-threaded runtime.

use std::future::Future;
use std::time::Duration;

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tokio::runtime::{Handle, Runtime, RuntimeFlavor};
use voyager_core::{DistanceError, GeocodeError};

use crate::ors::ErrorBody;

/// Public OpenRouteService endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.openrouteservice.org";

/// Routing profile used for matrix requests.
pub const DEFAULT_PROFILE: &str = "driving-car";

/// Default user agent for OpenRouteService requests.
pub const DEFAULT_USER_AGENT: &str = "voyager-ors/0.1";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Pause before the single retry of a rate-limited request.
const RATE_LIMIT_RETRY_DELAY: Duration = Duration::from_secs(1);

/// Errors raised while constructing an OpenRouteService adapter.
#[derive(Debug, Error)]
pub enum OrsBuildError {
    /// No API key was supplied.
    #[error("OpenRouteService API key is empty")]
    MissingApiKey,
    /// The API key cannot be sent as an HTTP header.
    #[error("OpenRouteService API key contains characters not allowed in a header")]
    InvalidApiKey,
    /// Failed to build the HTTP client.
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
    /// Failed to build the Tokio runtime.
    #[error("failed to build Tokio runtime: {0}")]
    Runtime(#[source] std::io::Error),
}

/// Connection settings shared by the OpenRouteService adapters.
#[derive(Clone, PartialEq, Eq)]
pub struct OrsConfig {
    /// Service root, e.g. `"https://api.openrouteservice.org"`.
    pub base_url: String,
    /// API key sent in the `Authorization` header.
    pub api_key: String,
    /// Routing profile such as `driving-car` or `foot-walking`.
    pub profile: String,
    /// Connect and request timeout.
    pub timeout: Duration,
    /// User agent string for requests.
    pub user_agent: String,
}

impl std::fmt::Debug for OrsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrsConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("profile", &self.profile)
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl OrsConfig {
    /// Configuration for the public endpoint with the given API key.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            api_key: api_key.into(),
            profile: DEFAULT_PROFILE.to_owned(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }

    /// Point the adapters at a different service root.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the routing profile.
    #[must_use]
    pub fn with_profile(mut self, profile: impl Into<String>) -> Self {
        self.profile = profile.into();
        self
    }

    /// Set the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent string.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

/// Transport-level failure, converted into the caller's error type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum TransportError {
    Timeout { url: String, timeout_secs: u64 },
    Http { url: String, status: u16, message: String },
    Network { url: String, message: String },
    Parse { message: String },
}

impl From<TransportError> for DistanceError {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::Timeout { url, timeout_secs } => Self::Timeout { url, timeout_secs },
            TransportError::Http {
                url,
                status,
                message,
            } => Self::HttpError {
                url,
                status,
                message,
            },
            TransportError::Network { url, message } => Self::NetworkError { url, message },
            TransportError::Parse { message } => Self::ParseError { message },
        }
    }
}

impl From<TransportError> for GeocodeError {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::Timeout { url, timeout_secs } => Self::Timeout { url, timeout_secs },
            TransportError::Http {
                url,
                status,
                message,
            } => Self::HttpError {
                url,
                status,
                message,
            },
            TransportError::Network { url, message } => Self::NetworkError { url, message },
            TransportError::Parse { message } => Self::ParseError { message },
        }
    }
}

/// HTTP client, configuration and runtime bundled for one adapter.
pub(crate) struct OrsClient {
    client: Client,
    config: OrsConfig,
    runtime: Runtime,
}

impl std::fmt::Debug for OrsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrsClient")
            .field("config", &self.config)
            .field("runtime", &"<tokio::runtime::Runtime>")
            .finish_non_exhaustive()
    }
}

impl OrsClient {
    pub(crate) fn new(config: OrsConfig) -> Result<Self, OrsBuildError> {
        let key = config.api_key.trim();
        if key.is_empty() {
            return Err(OrsBuildError::MissingApiKey);
        }
        let mut authorization =
            HeaderValue::from_str(key).map_err(|_| OrsBuildError::InvalidApiKey)?;
        authorization.set_sensitive(true);
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, authorization);

        let client = Client::builder()
            .user_agent(&config.user_agent)
            .default_headers(headers)
            .connect_timeout(config.timeout)
            .timeout(config.timeout)
            .build()
            .map_err(OrsBuildError::HttpClient)?;
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(OrsBuildError::Runtime)?;
        Ok(Self {
            client,
            config,
            runtime,
        })
    }

    pub(crate) const fn config(&self) -> &OrsConfig {
        &self.config
    }

    /// Join `path` onto the configured base URL.
    pub(crate) fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Drive `future` to completion from synchronous code.
    ///
    /// Inside a `current_thread` runtime this falls back to the owned
    /// runtime, which may deadlock if the caller's runtime drives IO this
    /// request depends on.
    pub(crate) fn block_on<F: Future>(&self, future: F) -> F::Output {
        match Handle::try_current() {
            Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
                tokio::task::block_in_place(|| handle.block_on(future))
            }
            _ => self.runtime.block_on(future),
        }
    }

    /// Send the request built by `request` and decode a JSON body.
    ///
    /// A `429 Too Many Requests` answer is retried once after a short pause.
    pub(crate) async fn send_json<T, F>(&self, url: &str, request: F) -> Result<T, TransportError>
    where
        T: DeserializeOwned,
        F: Fn(&Client) -> RequestBuilder,
    {
        let mut response = self.dispatch(url, &request).await?;
        if response.status() == StatusCode::TOO_MANY_REQUESTS {
            log::warn!(
                "rate limited by {url}, retrying in {}s",
                RATE_LIMIT_RETRY_DELAY.as_secs()
            );
            tokio::time::sleep(RATE_LIMIT_RETRY_DELAY).await;
            response = self.dispatch(url, &request).await?;
        }

        let status = response.status();
        if status.is_client_error() || status.is_server_error() {
            let body = response.text().await.unwrap_or_default();
            return Err(TransportError::Http {
                url: url.to_owned(),
                status: status.as_u16(),
                message: error_message(&body, status),
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|err| TransportError::Parse {
                message: err.to_string(),
            })
    }

    async fn dispatch<F>(&self, url: &str, request: &F) -> Result<Response, TransportError>
    where
        F: Fn(&Client) -> RequestBuilder,
    {
        request(&self.client)
            .send()
            .await
            .map_err(|err| self.convert_reqwest_error(&err, url))
    }

    fn convert_reqwest_error(&self, error: &reqwest::Error, url: &str) -> TransportError {
        if error.is_timeout() {
            return TransportError::Timeout {
                url: url.to_owned(),
                timeout_secs: self.config.timeout.as_secs(),
            };
        }

        if let Some(status) = error.status() {
            return TransportError::Http {
                url: url.to_owned(),
                status: status.as_u16(),
                message: error.to_string(),
            };
        }

        TransportError::Network {
            url: url.to_owned(),
            message: error.to_string(),
        }
    }
}

/// Best human-readable message for an error response body.
fn error_message(body: &str, status: StatusCode) -> String {
    if let Some(message) = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(ErrorBody::into_message)
    {
        return message;
    }
    let text = body.trim();
    if text.is_empty() {
        status.canonical_reason().unwrap_or("no response body").to_owned()
    } else {
        text.to_owned()
    }
}
