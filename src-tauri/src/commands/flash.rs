/// Flash Commands
/// Upload button handler and the failure detail window

use crate::error::LaunchError;
use crate::models::{DetailView, FlashReport};
use crate::services::Launcher;
use std::sync::Arc;
use tauri::{AppHandle, Emitter, Manager, Runtime, State, WebviewUrl, WebviewWindowBuilder};

/// Label of the secondary failure window
pub const DETAIL_WINDOW: &str = "detail";

pub const DETAIL_TITLE: &str = "Upload Error";

/// Emitted to an already open detail window when a new failure arrives
pub const DETAIL_UPDATED_EVENT: &str = "detail-updated";

/// Flash the board
///
/// The tool runs on the blocking pool so the window keeps painting; the
/// report comes back to the webview as the command's response.
#[tauri::command]
pub async fn flash_firmware(
    app: AppHandle,
    launcher: State<'_, Arc<Launcher>>,
) -> Result<FlashReport, String> {
    let worker = Arc::clone(launcher.inner());

    let report = tauri::async_runtime::spawn_blocking(move || worker.activate())
        .await
        .map_err(LaunchError::from)
        .and_then(|result| result)
        .map_err(|e| {
            log::error!("[Flash] {}", e);
            e.to_string()
        })?;

    if let Some(detail) = &report.detail {
        show_detail_window(&app, detail).map_err(|e| {
            log::error!("[Flash] Failed to open detail window: {}", e);
            e.to_string()
        })?;
    }

    Ok(report)
}

/// Detail text for the detail window to render on load
#[tauri::command]
pub fn detail_view(launcher: State<'_, Arc<Launcher>>) -> Option<DetailView> {
    launcher.detail()
}

fn show_detail_window<R: Runtime>(app: &AppHandle<R>, detail: &DetailView) -> Result<(), LaunchError> {
    if let Some(window) = app.get_webview_window(DETAIL_WINDOW) {
        app.emit_to(DETAIL_WINDOW, DETAIL_UPDATED_EVENT, detail)?;
        window.set_focus()?;
        return Ok(());
    }

    WebviewWindowBuilder::new(app, DETAIL_WINDOW, WebviewUrl::App("detail.html".into()))
        .title(DETAIL_TITLE)
        .inner_size(600.0, 400.0)
        .build()?;

    log::info!("[Flash] Opened detail window");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;
    use std::time::Duration;
    use tauri::test::{mock_builder, mock_context, noop_assets, MockRuntime};
    use tauri::Listener;

    fn mock_app() -> tauri::App<MockRuntime> {
        mock_builder().build(mock_context(noop_assets())).unwrap()
    }

    fn detail(body: &str) -> DetailView {
        DetailView {
            heading: "Upload failed!".to_string(),
            body: body.to_string(),
        }
    }

    #[test]
    fn first_failure_creates_detail_window() {
        let app = mock_app();
        let (tx, rx) = mpsc::channel();
        app.listen_any(DETAIL_UPDATED_EVENT, move |event| {
            let _ = tx.send(event.payload().to_string());
        });

        assert!(app.get_webview_window(DETAIL_WINDOW).is_none());
        show_detail_window(app.handle(), &detail("ERR123")).unwrap();

        assert!(app.get_webview_window(DETAIL_WINDOW).is_some());
        assert!(rx.recv_timeout(Duration::from_millis(200)).is_err());
    }

    #[test]
    fn open_detail_window_is_updated_in_place() {
        let app = mock_app();
        let (tx, rx) = mpsc::channel();
        app.listen_any(DETAIL_UPDATED_EVENT, move |event| {
            let _ = tx.send(event.payload().to_string());
        });

        show_detail_window(app.handle(), &detail("first")).unwrap();
        show_detail_window(app.handle(), &detail("second")).unwrap();

        let payload = rx.recv_timeout(Duration::from_secs(1)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&payload).unwrap();
        assert_eq!(value["body"], "second");
        assert_eq!(value["heading"], "Upload failed!");

        let detail_windows = app
            .webview_windows()
            .into_keys()
            .filter(|label| label == DETAIL_WINDOW)
            .count();
        assert_eq!(detail_windows, 1);
    }
}
