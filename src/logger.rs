use chrono::Local;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Default filter when `RUST_LOG` is unset
const DEFAULT_FILTER: &str = "shipbox=info,shipbox_lib=info";

/// Create a session log file under `<data dir>/logs` and route tracing
/// output into it (the terminal belongs to the UI, so nothing goes to the
/// console). Returns the log file path.
pub fn init_logger(data_dir: &Path) -> std::io::Result<PathBuf> {
    let log_dir = data_dir.join("logs");
    fs::create_dir_all(&log_dir)?;

    let session_file = log_dir.join(format!(
        "session-{}.log",
        Local::now().format("%Y%m%d-%H%M%S")
    ));
    let file = File::create(&session_file)?;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    // Ignore the error if a subscriber is already installed
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .try_init();

    Ok(session_file)
}
