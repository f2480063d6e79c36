mod app;
mod config;
mod metrics;
mod output;
mod transport;

#[cfg(test)]
mod test_support;

pub use app::{AppError, AppResult};
pub use config::ConfigError;
pub use metrics::MetricsError;
pub use output::OutputError;
pub use transport::TransportError;
