use anyhow::Result;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer, Registry};

use rewards_infrastructure::LogFormat;

const LOG_FILE_PREFIX: &str = "rewards-backend.log";

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Keeps the file writer flushing; drop it only at process exit.
pub struct TelemetryGuard {
    _file_guard: Option<WorkerGuard>,
}

pub fn init_tracing(format: LogFormat, log_dir: Option<&str>) -> Result<TelemetryGuard> {
    let mut layers: Vec<BoxedLayer> = vec![fmt_layer(format, std::io::stdout, true)];
    let mut file_guard = None;
    if let Some(dir) = log_dir {
        let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
        let (writer, guard) = tracing_appender::non_blocking(appender);
        layers.push(fmt_layer(format, writer, false));
        file_guard = Some(guard);
    }

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(layers)
        .with(filter)
        .try_init()?;

    Ok(TelemetryGuard {
        _file_guard: file_guard,
    })
}

fn fmt_layer<W>(format: LogFormat, writer: W, ansi: bool) -> BoxedLayer
where
    W: for<'writer> MakeWriter<'writer> + Send + Sync + 'static,
{
    match format {
        LogFormat::Text => fmt::layer().with_writer(writer).with_ansi(ansi).boxed(),
        LogFormat::Json => fmt::layer().json().with_writer(writer).boxed(),
    }
}
