/// Services module
/// Flashing logic, kept free of Tauri types so it can be tested directly

pub mod flasher;
pub mod launcher;

pub use flasher::{resolve_working_directory, Flasher};
pub use launcher::Launcher;
