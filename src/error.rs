//! Error type shared by every pipeline stage.

use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

/// Everything that can abort a run. All variants are fatal to the run; the
/// recoverable cases (missing stylesheet, temp directory removal) never
/// surface here.
#[derive(Error, Debug)]
pub enum Error {
    #[error("failed to read '{}': {source}", .path.display())]
    ReadInput { path: PathBuf, source: io::Error },

    #[error("failed to write '{}': {source}", .path.display())]
    WriteOutput { path: PathBuf, source: io::Error },

    #[error("Chrome path could not be found or is not set (tried: {})", .candidates.join(", "))]
    BrowserNotFound { candidates: Vec<String> },

    #[error("failed to create temporary browser profile: {0}")]
    TempDir(#[source] io::Error),

    #[error("failed to launch '{}': {source}", .browser.display())]
    BrowserSpawn { browser: PathBuf, source: io::Error },

    #[error("'{}' exited with {status}", .browser.display())]
    BrowserFailed { browser: PathBuf, status: ExitStatus },
}

pub type Result<T> = std::result::Result<T, Error>;
