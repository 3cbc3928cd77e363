//! Input trait definitions
//!
//! Defines the pointer interface that the windowing backend must provide to
//! the mouse capture controller.

use thiserror::Error;

/// Errors that can occur during pointer operations
#[derive(Error, Debug)]
pub enum PlatformError {
    #[error("Could not grab pointer: {0}")]
    Grab(String),

    #[error("Not supported on this platform: {0}")]
    NotSupported(String),
}

pub type PlatformResult<T> = Result<T, PlatformError>;

/// Pointer operations of the windowing layer, for a single window
pub trait PointerPlatform {
    /// Current relative-pointer mode of the window, as the platform reports it
    fn relative_mouse_mode(&self) -> bool;

    /// Enable or disable relative-pointer mode for the window
    fn set_relative_mouse_mode(&mut self, enabled: bool) -> PlatformResult<()>;

    /// Global (screen) pointer position, `None` if unknown
    fn global_pointer_position(&self) -> Option<(f64, f64)>;

    /// Global position of the window's client area
    fn window_position(&self) -> PlatformResult<(i32, i32)>;

    /// Size of the window's client area
    fn window_size(&self) -> (u32, u32);

    /// Move the pointer to a window-local position
    fn warp_pointer_in_window(&mut self, x: f64, y: f64) -> PlatformResult<()>;
}

/// What to do with the pointer right before relative mode is enabled
///
/// On macOS relative mode does not reliably take effect while the pointer is
/// outside the window (<https://github.com/libsdl-org/SDL/issues/5340>), so the
/// pointer is first moved to the window center.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerWarp {
    None,
    CenterIfOutside,
}

impl PointerWarp {
    /// Strategy needed by the platform this binary runs on
    pub fn for_current_platform() -> Self {
        if cfg!(target_os = "macos") {
            PointerWarp::CenterIfOutside
        } else {
            PointerWarp::None
        }
    }
}

impl std::fmt::Display for PointerWarp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PointerWarp::None => write!(f, "none"),
            PointerWarp::CenterIfOutside => write!(f, "center-if-outside"),
        }
    }
}
