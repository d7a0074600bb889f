/// Models module
/// Shared data types passed between the Rust backend and the webview
/// All types here are serialized for IPC

use serde::Serialize;
use std::path::PathBuf;

/// One invocation of the flashing tool
/// Lives only until its report has been produced
#[derive(Debug, Clone)]
pub struct FlashAttempt {
    pub working_directory: PathBuf,
    pub outcome: FlashOutcome,
}

/// How a single flash attempt ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlashOutcome {
    /// Tool exited with status zero
    Success,
    /// Tool ran but exited non-zero
    Failed { stderr: String },
    /// Tool binary could not be located
    ToolMissing,
}

/// Visual style of the status line in the main window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Tone {
    Success,
    Failure,
    Missing,
    Busy,
}

/// Status line shown under the Upload button
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusIndicator {
    pub text: String,
    pub tone: Tone,
}

impl StatusIndicator {
    pub fn new(text: impl Into<String>, tone: Tone) -> Self {
        Self {
            text: text.into(),
            tone,
        }
    }
}

/// Content of the secondary failure window
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailView {
    pub heading: String,
    pub body: String,
}

/// Result of one activation of the Upload button
///
/// `detail` is `None` exactly when no detail window should open.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlashReport {
    pub status: StatusIndicator,
    pub detail: Option<DetailView>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_serializes_for_the_webview() {
        let report = FlashReport {
            status: StatusIndicator::new("Upload failed", Tone::Failure),
            detail: Some(DetailView {
                heading: "Upload failed".to_string(),
                body: "ERR123".to_string(),
            }),
        };

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["status"]["tone"], "failure");
        assert_eq!(json["status"]["text"], "Upload failed");
        assert_eq!(json["detail"]["body"], "ERR123");
    }

    #[test]
    fn successful_report_has_null_detail() {
        let report = FlashReport {
            status: StatusIndicator::new("Upload successful", Tone::Success),
            detail: None,
        };

        let json = serde_json::to_value(&report).unwrap();
        assert!(json["detail"].is_null());
        assert_eq!(json["status"]["tone"], "success");
    }
}
