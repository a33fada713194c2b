use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use env_logger::{Builder, Env, Target};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("Cannot open log file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    AlreadyInitialized(#[from] log::SetLoggerError),
}

/// Default filter for a `-v` count. `RUST_LOG` takes precedence.
pub fn level_for_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Sends log output to `path`, appending.
///
/// The terminal is in raw mode on the alternate screen while the app runs,
/// so nothing may be written to stdout or stderr.
///
/// # Errors
///
/// Returns [`LoggingError::Io`] if the file cannot be opened and
/// [`LoggingError::AlreadyInitialized`] if a logger is already installed.
pub fn init(path: &Path, verbose: u8) -> Result<(), LoggingError> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| LoggingError::Io {
            path: path.to_path_buf(),
            source,
        })?;

    Builder::from_env(Env::default().default_filter_or(level_for_verbosity(verbose)))
        .target(Target::Pipe(Box::new(file)))
        .format_timestamp_millis()
        .try_init()?;
    Ok(())
}
