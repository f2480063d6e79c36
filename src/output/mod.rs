//! The remote write output: a shared sample buffer feeding a periodic
//! flusher that aggregates, encodes and ships time series.
mod buffer;
mod flush;
mod ingest;
mod periodic;


use std::sync::Arc;

pub use buffer::SampleBuffer;
pub use flush::{FlushOutcome, FlushPipeline};
pub use ingest::{IngestSummary, ingest_json_lines};
pub use periodic::PeriodicFlusher;

use crate::aggregation::SeriesTable;
use crate::config::OutputConfig;
use crate::error::{AppError, AppResult, OutputError};
use crate::remote::{RemoteWriteClient, SeriesEncoder, WriteTransport};

pub struct RemoteWriteOutput {
    config: OutputConfig,
    buffer: SampleBuffer,
    transport: Arc<dyn WriteTransport>,
    flusher: Option<PeriodicFlusher>,
}

impl RemoteWriteOutput {
    /// Builds the output and its HTTP client. Nothing is sent until
    /// [`RemoteWriteOutput::start`].
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built from the config.
    pub fn new(config: OutputConfig) -> AppResult<Self> {
        let client = RemoteWriteClient::new(&config).map_err(AppError::transport)?;
        Ok(Self::with_transport(config, Arc::new(client)))
    }

    #[must_use]
    pub fn with_transport(config: OutputConfig, transport: Arc<dyn WriteTransport>) -> Self {
        Self {
            config,
            buffer: SampleBuffer::new(),
            transport,
            flusher: None,
        }
    }

    #[must_use]
    pub fn description(&self) -> String {
        format!("Prometheus remote write ({})", self.config.url)
    }

    /// Handle for producers; samples added here go out with the next flush.
    #[must_use]
    pub fn buffer(&self) -> SampleBuffer {
        self.buffer.clone()
    }

    #[must_use]
    pub const fn config(&self) -> &OutputConfig {
        &self.config
    }

    /// Spawns the periodic flusher on the current tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns an error if the output is already running.
    pub fn start(&mut self) -> Result<(), OutputError> {
        if self.flusher.is_some() {
            return Err(OutputError::AlreadyStarted);
        }
        let pipeline = FlushPipeline::new(
            self.buffer.clone(),
            SeriesTable::new(self.config.sink_factory()),
            SeriesEncoder::new(self.config.metric_prefix.clone()),
            Arc::clone(&self.transport),
            self.config.push_interval,
        );
        self.flusher = Some(PeriodicFlusher::spawn(
            pipeline,
            self.config.push_interval,
        ));
        tracing::debug!(
            "{} initialized, flushing every {:?}.",
            self.description(),
            self.config.push_interval
        );
        Ok(())
    }

    /// Stops the flusher after one last flush of whatever is buffered.
    /// Samples added afterwards are not sent.
    ///
    /// # Errors
    ///
    /// Returns an error if the output was not started or the flush task
    /// failed.
    pub async fn stop(&mut self) -> AppResult<()> {
        let flusher = self
            .flusher
            .take()
            .ok_or_else(|| AppError::output(OutputError::NotStarted))?;
        tracing::debug!("Stopping {}.", self.description());
        flusher.stop().await?;
        tracing::debug!("{} stopped.", self.description());
        Ok(())
    }
}
