/// Error type for everything that is not a flash outcome the user sees
/// Converted to `String` at the IPC boundary

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LaunchError {
    /// The running executable's location could not be determined
    #[error("unable to resolve the launcher directory: {0}")]
    WorkingDirectory(#[source] io::Error),

    /// The resolved directory is gone or is not a directory
    #[error("working directory `{}` does not exist", .0.display())]
    MissingDirectory(PathBuf),

    /// Spawning the tool failed for a reason other than it being absent
    #[error("failed to run `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Tauri(#[from] tauri::Error),
}
