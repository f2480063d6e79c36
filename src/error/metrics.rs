use thiserror::Error;

#[derive(Debug, Error)]
pub enum MetricsError {
    #[error("Unknown metric type '{value}'. Use counter, gauge, rate or trend.")]
    UnknownKind { value: String },
    #[error("Invalid sample on line {line}: {source}")]
    ParseRecord {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
    #[error("Invalid sample timestamp on line {line}.")]
    InvalidTimestamp { line: usize },
    #[error("I/O error during {context}: {source}")]
    Io {
        context: &'static str,
        #[source]
        source: std::io::Error,
    },
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
