use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use tokio::io::BufReader;

use strest_remote_write::args::RemoteWriteArgs;
use strest_remote_write::config::{OutputConfig, load_config, overrides_from_env};
use strest_remote_write::error::{AppError, AppResult, MetricsError};
use strest_remote_write::logger;
use strest_remote_write::output::{IngestSummary, RemoteWriteOutput, ingest_json_lines};
use strest_remote_write::shutdown::{setup_signal_shutdown_handler, shutdown_channel};

const STDIN_SHUTDOWN_GRACE: Duration = Duration::from_millis(200);

pub(crate) fn run() -> AppResult<()> {
    let args = RemoteWriteArgs::parse();
    let _installed = logger::init_logging(args.verbose, args.no_color);

    let config = resolve_config(&args)?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    let result = runtime.block_on(run_async(args.input, config));
    // A pending stdin read would otherwise hold the runtime open.
    runtime.shutdown_timeout(STDIN_SHUTDOWN_GRACE);
    result
}

/// Config file, then `STREST_RW_*` variables, then command line flags.
fn resolve_config(args: &RemoteWriteArgs) -> AppResult<OutputConfig> {
    let file = load_config(args.config.as_deref())?.unwrap_or_default();
    let env = overrides_from_env().map_err(AppError::config)?;
    let layered = file.merge(env).merge(args.overrides());
    OutputConfig::from_file(layered).map_err(|err| {
        tracing::error!("Invalid remote write configuration: {}", err);
        AppError::config(err)
    })
}

async fn run_async(input: Option<PathBuf>, config: OutputConfig) -> AppResult<()> {
    let mut output = RemoteWriteOutput::new(config)?;
    tracing::info!("Streaming samples to {}.", output.description());
    output.start()?;

    let (shutdown_tx, mut shutdown_rx) = shutdown_channel();
    let signal_handle = setup_signal_shutdown_handler(&shutdown_tx);
    let buffer = output.buffer();

    let ingest = async {
        match input.as_ref() {
            Some(path) => {
                let file = tokio::fs::File::open(path)
                    .await
                    .map_err(|source| MetricsError::Io {
                        context: "opening the input file",
                        source,
                    })?;
                ingest_json_lines(BufReader::new(file), &buffer).await
            }
            None => ingest_json_lines(BufReader::new(tokio::io::stdin()), &buffer).await,
        }
    };

    let ingested: Result<Option<IngestSummary>, MetricsError> = tokio::select! {
        result = ingest => result.map(Some),
        _ = shutdown_rx.recv() => {
            tracing::info!("Shutdown requested, flushing buffered samples.");
            Ok(None)
        }
    };

    drop(shutdown_tx.send(()));
    signal_handle.await?;
    output.stop().await?;

    match ingested? {
        Some(summary) => tracing::info!(
            "Sent {} samples ({} lines rejected).",
            summary.samples,
            summary.rejected
        ),
        None => tracing::info!("Stopped before the end of input."),
    }
    Ok(())
}
