//! Tracing setup: a human-readable console layer plus a JSON-lines audit
//! log file, mirroring the console + rotating-file handler split in
//! `examples/original_source/services/common/logging_config.py`.
//!
//! Unlike the Python version's size-based `RotatingFileHandler`, this keeps
//! a single stable `audit.log` file so `/api/v1/audit/logs` always has a
//! well-known path to serve; external log rotation (e.g. `logrotate`) is
//! expected to archive it, which is the usual split in services that expose
//! their own log file over HTTP.

use std::path::PathBuf;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Directory the audit log file lives in. Configurable via `AUDIT_LOG_DIR`,
/// default `./logs`.
pub fn audit_log_dir() -> PathBuf {
    std::env::var("AUDIT_LOG_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("./logs"))
}

pub const AUDIT_LOG_FILE: &str = "audit.log";

/// Install the global tracing subscriber for `service_name`. The returned
/// guard must be kept alive for the lifetime of the process (dropping it
/// stops the background writer thread that flushes the audit log).
pub fn init(service_name: &str) -> WorkerGuard {
    let dir = audit_log_dir();
    std::fs::create_dir_all(&dir).expect("failed to create audit log directory");

    let file_appender = tracing_appender::rolling::never(&dir, AUDIT_LOG_FILE);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let console_layer = fmt::layer()
        .with_target(true)
        .with_level(true);

    let audit_layer = fmt::layer()
        .json()
        .with_writer(non_blocking)
        .with_current_span(false);

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(console_layer)
        .with(audit_layer)
        .init();

    tracing::info!(service = service_name, "logging initialized");
    guard
}

/// Full path to the audit log file, used by the generator's download
/// endpoint.
pub fn audit_log_path() -> PathBuf {
    audit_log_dir().join(AUDIT_LOG_FILE)
}
