//! Mock pointer platform for tests

use super::traits::{PlatformError, PlatformResult, PointerPlatform};

/// Records every call made by the controller
#[derive(Debug, Default)]
pub struct MockPointer {
    pub relative: bool,
    pub fail_set: bool,
    pub set_calls: Vec<bool>,
    pub warps: Vec<(f64, f64)>,
    pub pointer: Option<(f64, f64)>,
    pub position: (i32, i32),
    pub size: (u32, u32),
}

impl PointerPlatform for MockPointer {
    fn relative_mouse_mode(&self) -> bool {
        self.relative
    }

    fn set_relative_mouse_mode(&mut self, enabled: bool) -> PlatformResult<()> {
        self.set_calls.push(enabled);
        if self.fail_set {
            return Err(PlatformError::Grab("denied".to_string()));
        }
        self.relative = enabled;
        Ok(())
    }

    fn global_pointer_position(&self) -> Option<(f64, f64)> {
        self.pointer
    }

    fn window_position(&self) -> PlatformResult<(i32, i32)> {
        Ok(self.position)
    }

    fn window_size(&self) -> (u32, u32) {
        self.size
    }

    fn warp_pointer_in_window(&mut self, x: f64, y: f64) -> PlatformResult<()> {
        self.warps.push((x, y));
        Ok(())
    }
}
