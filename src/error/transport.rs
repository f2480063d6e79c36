use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Failed to build remote write client: {source}")]
    BuildClient {
        #[source]
        source: reqwest::Error,
    },
    #[error("Invalid header '{name}' for remote write requests.")]
    InvalidHeader { name: String },
    #[error("Failed to compress remote write payload: {source}")]
    Compress {
        #[source]
        source: snap::Error,
    },
    #[error("Remote write request failed: {source}")]
    Request {
        #[source]
        source: reqwest::Error,
    },
    #[error("Remote write endpoint returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[cfg(test)]
    #[error("Test expectation failed: {message}")]
    TestExpectation { message: &'static str },
    #[cfg(test)]
    #[error("Test expectation failed: {message}: {value}")]
    TestExpectationValue {
        message: &'static str,
        value: String,
    },
}
