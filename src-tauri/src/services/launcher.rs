/// Launcher Service
/// Application state behind the Upload button: one attempt at a time,
/// and the detail text of the last failure

use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use super::flasher::Flasher;
use crate::error::LaunchError;
use crate::models::{DetailView, FlashOutcome, FlashReport, StatusIndicator, Tone};

pub const STATUS_SUCCESS: &str = "Upload succeeded!";
pub const STATUS_FAILED: &str = "Upload failed!";
pub const STATUS_MISSING: &str = "Cargo not found!";
pub const STATUS_BUSY: &str = "Upload already in progress";

/// Shown instead of stderr when the tool could not be started at all
pub const TOOL_MISSING_MESSAGE: &str =
    "The 'cargo' command was not found. Is Rust installed and in PATH?";

/// Build the UI report for a finished attempt
pub fn report_for(outcome: &FlashOutcome) -> FlashReport {
    match outcome {
        FlashOutcome::Success => FlashReport {
            status: StatusIndicator::new(STATUS_SUCCESS, Tone::Success),
            detail: None,
        },
        FlashOutcome::Failed { stderr } => FlashReport {
            status: StatusIndicator::new(STATUS_FAILED, Tone::Failure),
            detail: Some(DetailView {
                heading: STATUS_FAILED.to_string(),
                body: stderr.clone(),
            }),
        },
        FlashOutcome::ToolMissing => FlashReport {
            status: StatusIndicator::new(STATUS_MISSING, Tone::Missing),
            detail: Some(DetailView {
                heading: STATUS_FAILED.to_string(),
                body: TOOL_MISSING_MESSAGE.to_string(),
            }),
        },
    }
}

/// Clears the in-flight flag when the attempt ends, however it ends
struct AttemptGuard<'a>(&'a AtomicBool);

impl<'a> AttemptGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for AttemptGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Launcher - owns the flasher and everything the click handler touches
pub struct Launcher {
    flasher: Flasher,
    in_flight: AtomicBool,
    detail: Mutex<Option<DetailView>>,
}

impl Launcher {
    pub fn new(flasher: Flasher) -> Self {
        Self {
            flasher,
            in_flight: AtomicBool::new(false),
            detail: Mutex::new(None),
        }
    }

    /// Run one flash attempt and describe how the UI should change
    ///
    /// Blocks until the tool exits. A call made while another attempt is
    /// running returns a busy status without starting the tool.
    pub fn activate(&self) -> Result<FlashReport, LaunchError> {
        let Some(_guard) = AttemptGuard::acquire(&self.in_flight) else {
            log::warn!("[Flash] Ignoring activation, an upload is already running");
            return Ok(FlashReport {
                status: StatusIndicator::new(STATUS_BUSY, Tone::Busy),
                detail: None,
            });
        };

        let attempt = self.flasher.flash()?;
        let report = report_for(&attempt.outcome);
        log::info!(
            "[Flash] Attempt in {} finished: {}",
            attempt.working_directory.display(),
            report.status.text
        );

        if let Some(detail) = &report.detail {
            *self.detail.lock() = Some(detail.clone());
        }

        Ok(report)
    }

    /// Detail text of the most recent failure, if any
    pub fn detail(&self) -> Option<DetailView> {
        self.detail.lock().clone()
    }

    #[cfg(test)]
    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    pub fn flasher(&self) -> &Flasher {
        &self.flasher
    }
}
