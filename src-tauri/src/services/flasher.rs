/// Flasher Service
/// Runs `cargo flash` against the target board and classifies the result

use std::ffi::{OsStr, OsString};
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::LaunchError;
use crate::models::{FlashAttempt, FlashOutcome};

/// Flashing tool, invoked as a cargo subcommand
pub const FLASH_TOOL: &str = "cargo";

/// Target microcontroller part
pub const CHIP_ID: &str = "STM32F103C8T6";

/// Arguments passed to the tool on every attempt
pub const FLASH_ARGS: [&str; 4] = ["flash", "--chip", CHIP_ID, "--release"];

/// Directory containing the running executable
///
/// The flashing tool is run from here so that `Cargo.toml`, `.cargo/config.toml`
/// and `Embed.toml` shipped next to the launcher are picked up no matter
/// where the launcher was started from.
pub fn resolve_working_directory() -> Result<PathBuf, LaunchError> {
    let exe = std::env::current_exe().map_err(LaunchError::WorkingDirectory)?;
    exe.parent().map(Path::to_path_buf).ok_or_else(|| {
        LaunchError::WorkingDirectory(io::Error::new(
            io::ErrorKind::NotFound,
            format!("`{}` has no parent directory", exe.display()),
        ))
    })
}

/// Invokes the flashing tool with fixed arguments in a fixed directory
#[derive(Debug, Clone)]
pub struct Flasher {
    program: OsString,
    working_dir: PathBuf,
}

impl Flasher {
    /// Flasher for `cargo flash`, run from `working_dir`
    pub fn new(working_dir: impl Into<PathBuf>) -> Self {
        Self::with_program(FLASH_TOOL, working_dir)
    }

    /// Flasher that runs `program` instead of `cargo`
    pub fn with_program(program: impl AsRef<OsStr>, working_dir: impl Into<PathBuf>) -> Self {
        Self {
            program: program.as_ref().to_os_string(),
            working_dir: working_dir.into(),
        }
    }

    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(FLASH_ARGS).current_dir(&self.working_dir);
        cmd
    }

    /// Run the tool to completion and capture its output
    ///
    /// Only a tool that cannot be found is turned into an outcome; other
    /// spawn failures are returned as errors.
    pub fn flash(&self) -> Result<FlashAttempt, LaunchError> {
        let program = self.program.to_string_lossy().into_owned();

        // A missing cwd also surfaces as NotFound from spawn, so rule it out first
        if !self.working_dir.is_dir() {
            return Err(LaunchError::MissingDirectory(self.working_dir.clone()));
        }

        log::info!(
            "[Flash] Running `{} {}` in {}",
            program,
            FLASH_ARGS.join(" "),
            self.working_dir.display()
        );

        let outcome = match self.command().output() {
            Ok(output) => {
                let stdout = String::from_utf8_lossy(&output.stdout);
                let stderr = String::from_utf8_lossy(&output.stderr).to_string();
                log::debug!("[Flash] stdout:\n{}", stdout);
                log::debug!("[Flash] stderr:\n{}", stderr);

                if output.status.success() {
                    log::info!("[Flash] Upload finished");
                    FlashOutcome::Success
                } else {
                    log::warn!("[Flash] `{}` exited with {}", program, output.status);
                    FlashOutcome::Failed { stderr }
                }
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::warn!("[Flash] `{}` not found", program);
                FlashOutcome::ToolMissing
            }
            Err(source) => return Err(LaunchError::Spawn { program, source }),
        };

        Ok(FlashAttempt {
            working_directory: self.working_dir.clone(),
            outcome,
        })
    }
}
