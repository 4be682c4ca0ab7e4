use anyhow::{Context, Result};
use opentelemetry_appender_tracing::layer::OpenTelemetryTracingBridge;
use opentelemetry_sdk::logs::SdkLoggerProvider;
use tracing_appender::{
    non_blocking,
    non_blocking::WorkerGuard,
    rolling::{RollingFileAppender, Rotation},
};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

const QUIET_TARGETS: [&str; 5] = [
    "hyper=off",
    "opentelemetry=off",
    "tonic=off",
    "h2=off",
    "sqlx=warn",
];

fn quiet_filter(base: &str) -> EnvFilter {
    QUIET_TARGETS
        .iter()
        .filter_map(|d| d.parse().ok())
        .fold(EnvFilter::new(base), |filter, directive| {
            filter.add_directive(directive)
        })
}

/// Installs the global subscriber: pretty console output, an optional JSON
/// rolling file, and an optional bridge into the OTLP log pipeline.
///
/// The returned guard flushes the file writer and must be held until exit.
pub fn init_logger(
    sdk_logger_provider: Option<SdkLoggerProvider>,
    component: &str,
    is_dev: bool,
    is_enable_file: bool,
) -> Result<Option<WorkerGuard>> {
    let mut guard = None;

    let file_layer = if is_enable_file {
        let log_dir = if is_dev { "./logs" } else { "/var/log/app" };
        let file_name = format!("rust_app_{component}.log");
        let file_appender = RollingFileAppender::new(Rotation::DAILY, log_dir, file_name);
        let (file_writer, file_guard) = non_blocking(file_appender);
        guard = Some(file_guard);

        Some(
            fmt::layer()
                .with_writer(file_writer)
                .with_ansi(false)
                .json()
                .with_filter(EnvFilter::new("info")),
        )
    } else {
        None
    };

    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| quiet_filter("info"));

    let console_layer = fmt::layer()
        .pretty()
        .with_thread_names(true)
        .with_ansi(is_dev)
        .with_filter(console_filter);

    let otel_layer = sdk_logger_provider.as_ref().map(|provider| {
        OpenTelemetryTracingBridge::new(provider).with_filter(quiet_filter("info"))
    });

    tracing_subscriber::registry()
        .with(file_layer)
        .with(console_layer)
        .with(otel_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    Ok(guard)
}
