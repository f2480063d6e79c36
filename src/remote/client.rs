use async_trait::async_trait;
use http::header::{CONTENT_ENCODING, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use url::Url;

use crate::config::{OutputConfig, RemoteAuth};
use crate::error::TransportError;

use super::prompb::{TimeSeries, encode_write_request};

const USER_AGENT: &str = concat!(
    "strest-remote-write/",
    env!("CARGO_PKG_VERSION"),
    " (+https://github.com/Lythaeon/strest)"
);
const REMOTE_WRITE_VERSION_HEADER: &str = "x-prometheus-remote-write-version";
const REMOTE_WRITE_VERSION: &str = "0.1.0";
const MAX_ERROR_BODY_CHARS: usize = 512;

/// Destination of encoded flush batches.
#[async_trait]
pub trait WriteTransport: Send + Sync {
    /// Delivers one batch.
    ///
    /// # Errors
    ///
    /// Returns an error if the batch could not be delivered; the caller drops
    /// the batch.
    async fn store(&self, series: Vec<TimeSeries>) -> Result<(), TransportError>;
}

/// HTTP client for a Prometheus-compatible remote write endpoint.
#[derive(Debug, Clone)]
pub struct RemoteWriteClient {
    client: reqwest::Client,
    url: Url,
    auth: Option<RemoteAuth>,
}

impl RemoteWriteClient {
    /// Builds the client from validated output settings.
    ///
    /// # Errors
    ///
    /// Returns an error if a configured header is not a valid HTTP header or
    /// the underlying client cannot be built.
    pub fn new(config: &OutputConfig) -> Result<Self, TransportError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_ENCODING, HeaderValue::from_static("snappy"));
        headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_static("application/x-protobuf"),
        );
        headers.insert(
            HeaderName::from_static(REMOTE_WRITE_VERSION_HEADER),
            HeaderValue::from_static(REMOTE_WRITE_VERSION),
        );
        for (name, value) in &config.headers {
            let header_name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|_invalid| TransportError::InvalidHeader { name: name.clone() })?;
            let header_value = HeaderValue::from_str(value)
                .map_err(|_invalid| TransportError::InvalidHeader { name: name.clone() })?;
            headers.insert(header_name, header_value);
        }

        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.timeout)
            .danger_accept_invalid_certs(config.insecure_skip_tls_verify)
            .default_headers(headers)
            .build()
            .map_err(|source| TransportError::BuildClient { source })?;

        Ok(Self {
            client,
            url: config.url.clone(),
            auth: config.auth.clone(),
        })
    }

    #[must_use]
    pub const fn url(&self) -> &Url {
        &self.url
    }
}

#[async_trait]
impl WriteTransport for RemoteWriteClient {
    async fn store(&self, series: Vec<TimeSeries>) -> Result<(), TransportError> {
        let body = compress_write_request(series)?;
        let request = self.client.post(self.url.clone()).body(body);
        let request = match self.auth.as_ref() {
            Some(RemoteAuth::Basic { username, password }) => {
                request.basic_auth(username, password.as_deref())
            }
            Some(RemoteAuth::Bearer { token }) => request.bearer_auth(token),
            None => request,
        };

        let response = request
            .send()
            .await
            .map_err(|source| TransportError::Request { source })?;
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response
            .text()
            .await
            .map(|text| text.chars().take(MAX_ERROR_BODY_CHARS).collect())
            .unwrap_or_default();
        Err(TransportError::Status {
            status: status.as_u16(),
            body,
        })
    }
}

/// Protobuf-encodes and snappy-compresses (block format) a batch.
///
/// # Errors
///
/// Returns an error if compression fails.
pub fn compress_write_request(series: Vec<TimeSeries>) -> Result<Vec<u8>, TransportError> {
    let raw = encode_write_request(series);
    snap::raw::Encoder::new()
        .compress_vec(&raw)
        .map_err(|source| TransportError::Compress { source })
}
