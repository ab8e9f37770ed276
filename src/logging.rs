use std::path::Path;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

fn filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// `{base}.{timestamp}.{pid}`, so concurrent runs don't clobber each other.
fn unique_log_path(base: &Path, timestamp: u64, pid: u32) -> String {
    format!("{}.{}.{}", base.display(), timestamp, pid)
}

/// Log to a file for TUI mode. Writing to the terminal would corrupt the display.
pub fn init_tracing(log_path: &Path) {
    let pid = std::process::id();
    let timestamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    let unique_path = unique_log_path(log_path, timestamp, pid);

    let Ok(file) = std::fs::File::create(&unique_path) else {
        eprintln!("Warning: Failed to create log file: {}", unique_path);
        return;
    };

    let file_layer = fmt::layer()
        .with_writer(file)
        .with_ansi(false)
        .with_target(true)
        .with_level(true);

    tracing_subscriber::registry()
        .with(filter())
        .with(file_layer)
        .init();
}

/// Log to stderr, used by `--once` where there is no TUI to protect.
pub fn init_stderr_tracing() {
    tracing_subscriber::registry()
        .with(filter())
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}
