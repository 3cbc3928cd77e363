//! Input module - Mouse capture for the viewer window
//!
//! This module provides:
//! - Platform-independent input events
//! - Shortcut modifier configuration
//! - The mouse capture controller and its winit pointer backend

mod events;
#[cfg(test)]
pub(crate) mod mock;
mod mouse_capture;
mod shortcut;
mod traits;
mod winit_pointer;

// Re-export common types
pub use events::*;
pub use mouse_capture::MouseCapture;
pub use shortcut::ShortcutMods;
pub use traits::*;
pub use winit_pointer::WinitPointer;

/// Get the current platform name
pub fn platform_name() -> &'static str {
    #[cfg(target_os = "macos")]
    return "macOS";

    #[cfg(target_os = "linux")]
    return "Linux";

    #[cfg(target_os = "windows")]
    return "Windows";

    #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
    return "Unknown";
}
