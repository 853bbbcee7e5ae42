use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    fmt::writer::MakeWriterExt, prelude::__tracing_subscriber_SubscriberExt,
    util::SubscriberInitExt, EnvFilter, Layer,
};

pub const LOG_FILE_NAME: &str = "./steam_lookup.log";

/// HTTP plumbing is chatty at debug level.
const QUIET_DEPENDENCIES: [&str; 2] = ["hyper=warn", "reqwest=warn"];

fn quiet_dependencies(mut filter: EnvFilter) -> EnvFilter {
    for directive in QUIET_DEPENDENCIES {
        match directive.parse() {
            Ok(directive) => filter = filter.add_directive(directive),
            Err(e) => eprintln!("Ignoring bad log directive {directive}: {e}"),
        }
    }
    filter
}

/// Logs to stderr filtered by `RUST_LOG` (default `info`), and at debug level
/// to `log_file` when it can be created. The returned guard must be held for
/// the file writer to keep flushing.
pub fn init_tracing(log_file: &Path) -> Option<WorkerGuard> {
    let stderr_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = tracing_subscriber::registry().with(
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_filter(quiet_dependencies(stderr_filter)),
    );

    match std::fs::File::create(log_file) {
        Ok(latest_log) => {
            let (file_writer, guard) = tracing_appender::non_blocking(latest_log);
            subscriber
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_ansi(false)
                        .with_writer(file_writer.with_max_level(tracing::Level::TRACE))
                        .with_filter(quiet_dependencies(EnvFilter::new("debug"))),
                )
                .init();
            Some(guard)
        }
        Err(e) => {
            subscriber.init();
            tracing::error!(
                "Failed to create log file {log_file:?}, continuing without persistent logs: {e}"
            );
            None
        }
    }
}
