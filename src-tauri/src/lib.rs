/// Flash Launcher
/// One-button desktop app that flashes firmware with `cargo flash`
///
/// Module structure:
/// - commands: Tauri IPC handlers (webview → backend)
/// - services: Flashing and application state, no Tauri types
/// - models: Types crossing the IPC boundary

mod commands;
mod error;
mod models;
mod services;

use services::{resolve_working_directory, Flasher, Launcher};
use std::sync::Arc;
use tauri::Manager;

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    let log_level = if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    tauri::Builder::default()
        .plugin(tauri_plugin_log::Builder::default().level(log_level).build())
        .setup(|app| {
            let launcher = Launcher::new(Flasher::new(resolve_working_directory()?));
            log::info!(
                "Flash launcher ready, tool runs in {}",
                launcher.flasher().working_dir().display()
            );
            app.manage(Arc::new(launcher));
            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            commands::flash_firmware,
            commands::detail_view,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
