//! Window module
//!
//! Builds the viewer window from declarative parameters.

use bitflags::bitflags;
use thiserror::Error;
use winit::dpi::{PhysicalPosition, PhysicalSize};
use winit::event_loop::ActiveEventLoop;
use winit::window::{Fullscreen, Window, WindowAttributes, WindowLevel};

#[derive(Error, Debug)]
pub enum WindowError {
    #[error("Invalid window size: {width}x{height}")]
    InvalidSize { width: u32, height: u32 },

    #[error("Could not create window: {0}")]
    Os(#[from] winit::error::OsError),
}

pub type WindowResult<T> = Result<T, WindowError>;

bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
    pub struct WindowFlags: u32 {
        const RESIZABLE = 1 << 0;
        const BORDERLESS = 1 << 1;
        const ALWAYS_ON_TOP = 1 << 2;
        const FULLSCREEN = 1 << 3;
        const HIDDEN = 1 << 4;
        const MAXIMIZED = 1 << 5;
    }
}

/// Parameters of the window to create
#[derive(Debug, Clone, PartialEq)]
pub struct WindowParams {
    pub title: String,
    /// Position of the client area; the platform decides unless both are set
    pub x: Option<i32>,
    pub y: Option<i32>,
    pub width: u32,
    pub height: u32,
    pub flags: WindowFlags,
}

/// Translate window parameters to winit attributes
pub fn window_attributes(params: &WindowParams) -> WindowResult<WindowAttributes> {
    if params.width == 0 || params.height == 0 {
        return Err(WindowError::InvalidSize {
            width: params.width,
            height: params.height,
        });
    }

    let flags = params.flags;
    let mut attributes = Window::default_attributes()
        .with_title(params.title.as_str())
        .with_inner_size(PhysicalSize::new(params.width, params.height))
        .with_resizable(flags.contains(WindowFlags::RESIZABLE))
        .with_decorations(!flags.contains(WindowFlags::BORDERLESS))
        .with_visible(!flags.contains(WindowFlags::HIDDEN))
        .with_maximized(flags.contains(WindowFlags::MAXIMIZED));

    if let (Some(x), Some(y)) = (params.x, params.y) {
        attributes = attributes.with_position(PhysicalPosition::new(x, y));
    }

    if flags.contains(WindowFlags::ALWAYS_ON_TOP) {
        attributes = attributes.with_window_level(WindowLevel::AlwaysOnTop);
    }

    if flags.contains(WindowFlags::FULLSCREEN) {
        attributes = attributes.with_fullscreen(Some(Fullscreen::Borderless(None)));
    }

    Ok(attributes)
}

/// Create a window on the running event loop
pub fn create_window(event_loop: &ActiveEventLoop, params: &WindowParams) -> WindowResult<Window> {
    let attributes = window_attributes(params)?;
    let window = event_loop.create_window(attributes).map_err(|e| {
        tracing::error!("Could not create window: {}", e);
        WindowError::from(e)
    })?;

    tracing::info!(
        "Created window '{}' ({}x{})",
        params.title,
        params.width,
        params.height
    );
    Ok(window)
}
