//! winit pointer backend
//!
//! Relative mode is a locked (or, where locking is unsupported, confined)
//! and hidden cursor.

use std::sync::Arc;

use winit::dpi::{PhysicalPosition, PhysicalSize};
use winit::event::WindowEvent;
use winit::window::{CursorGrabMode, Window};

use super::traits::{PlatformError, PlatformResult, PointerPlatform};

pub struct WinitPointer {
    window: Arc<Window>,
    /// Grab mode last applied successfully; winit has no getter for it
    relative: bool,
    /// Window-local cursor position, `None` while the cursor is outside
    cursor: Option<PhysicalPosition<f64>>,
}

impl WinitPointer {
    pub fn new(window: Arc<Window>) -> Self {
        Self {
            window,
            relative: false,
            cursor: None,
        }
    }

    /// Track the cursor position from window events
    pub fn observe(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::CursorMoved { position, .. } => self.cursor = Some(*position),
            WindowEvent::CursorLeft { .. } => self.cursor = None,
            _ => {}
        }
    }

    fn grab(&self) -> PlatformResult<()> {
        self.window
            .set_cursor_grab(CursorGrabMode::Locked)
            .or_else(|_| self.window.set_cursor_grab(CursorGrabMode::Confined))
            .map_err(|e| PlatformError::Grab(e.to_string()))?;
        self.window.set_cursor_visible(false);
        Ok(())
    }

    fn release(&self) -> PlatformResult<()> {
        self.window
            .set_cursor_grab(CursorGrabMode::None)
            .map_err(|e| PlatformError::Grab(e.to_string()))?;
        self.window.set_cursor_visible(true);
        Ok(())
    }
}

impl PointerPlatform for WinitPointer {
    fn relative_mouse_mode(&self) -> bool {
        self.relative
    }

    fn set_relative_mouse_mode(&mut self, enabled: bool) -> PlatformResult<()> {
        if enabled {
            self.grab()?;
        } else {
            self.release()?;
        }
        self.relative = enabled;
        Ok(())
    }

    fn global_pointer_position(&self) -> Option<(f64, f64)> {
        let cursor = self.cursor?;
        let origin = self.window.inner_position().ok()?;
        Some((origin.x as f64 + cursor.x, origin.y as f64 + cursor.y))
    }

    fn window_position(&self) -> PlatformResult<(i32, i32)> {
        let pos = self
            .window
            .inner_position()
            .map_err(|e| PlatformError::NotSupported(e.to_string()))?;
        Ok((pos.x, pos.y))
    }

    fn window_size(&self) -> (u32, u32) {
        let PhysicalSize { width, height } = self.window.inner_size();
        (width, height)
    }

    fn warp_pointer_in_window(&mut self, x: f64, y: f64) -> PlatformResult<()> {
        self.window
            .set_cursor_position(PhysicalPosition::new(x, y))
            .map_err(|e| PlatformError::NotSupported(e.to_string()))
    }
}
