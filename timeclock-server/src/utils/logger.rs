//! Logging Infrastructure
//!
//! Structured logging setup with support for both development and
//! production environments.

use tracing_subscriber::EnvFilter;

/// Initialize the logger
///
/// `level` is an env-filter directive (e.g. `info`,
/// `timeclock_server=debug`); when `log_dir` is set, output rolls daily
/// into `<log_dir>/timeclock-server.<date>`.
pub fn init_logger(level: &str, log_dir: Option<&str>) {
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(false);

    if let Some(dir) = log_dir
        && std::path::Path::new(dir).exists()
    {
        let file_appender = tracing_appender::rolling::daily(dir, "timeclock-server");
        subscriber.with_writer(file_appender).with_ansi(false).init();
        return;
    }

    subscriber.init();
}
