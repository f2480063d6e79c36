use thiserror::Error;

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Remote write output is already running.")]
    AlreadyStarted,
    #[error("Remote write output was not started.")]
    NotStarted,
}
