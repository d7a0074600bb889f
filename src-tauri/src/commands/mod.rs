/// Commands module
/// Tauri IPC handlers invoked from the main and detail windows

pub mod flash;

pub use flash::{detail_view, flash_firmware};
