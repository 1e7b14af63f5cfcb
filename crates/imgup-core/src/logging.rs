//! Logging: append to `~/.local/state/imgup/imgup.log`, or stderr when the
//! state dir is unusable.
//!
//! Stdout carries only result blocks, so diagnostics never go there.

use anyhow::{Context, Result};
use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use tracing_subscriber::fmt::writer::{BoxMakeWriter, EitherWriter, MakeWriter};
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info,imgup=debug,imgup_core=debug";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Path of the log file under the XDG state dir.
pub fn log_file_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("imgup")?;
    Ok(xdg_dirs.get_state_home().join("imgup").join("imgup.log"))
}

/// Create parent dirs and open `path` for appending.
fn open_log_file(path: &Path) -> Result<File> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("open {}", path.display()))
}

/// Hands out clones of one log file; a failed clone degrades to unlocked stderr
/// for that event only.
struct LogFile(File);

impl<'a> MakeWriter<'a> for LogFile {
    type Writer = EitherWriter<File, io::Stderr>;

    fn make_writer(&'a self) -> Self::Writer {
        match self.0.try_clone() {
            Ok(f) => EitherWriter::A(f),
            Err(_) => EitherWriter::B(io::stderr()),
        }
    }
}

/// Initialize structured logging to the XDG state log file.
/// Returns Err when the file cannot be opened so the caller can use `init_logging_stderr`.
pub fn init_logging() -> Result<()> {
    let path = log_file_path()?;
    let file = open_log_file(&path)?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(BoxMakeWriter::new(LogFile(file)))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("tracing init: {}", e))?;

    tracing::info!("imgup logging initialized at {}", path.display());
    Ok(())
}

/// Log to stderr only. Each event locks stderr just for its own write.
pub fn init_logging_stderr() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(io::stderr)
        .with_ansi(false)
        .try_init();
}
