//! Mouse capture
//!
//! Decides, from the stream of window and input events, when the pointer
//! enters and leaves relative mode. A click in the window captures the mouse;
//! pressing then releasing a single shortcut modifier key toggles capture;
//! losing focus releases it.
//!
//! Events consumed here must not be forwarded to the device.

use std::collections::HashSet;

use super::events::{Event, Keycode};
use super::shortcut::ShortcutMods;
use super::traits::{PointerPlatform, PointerWarp};

/// Mouse capture state for one window
pub struct MouseCapture<P: PointerPlatform> {
    platform: P,
    /// Keys acting as capture toggles
    capture_keys: HashSet<Keycode>,
    /// Capture key currently held down, if any
    pending_key: Option<Keycode>,
    warp: PointerWarp,
}

impl<P: PointerPlatform> MouseCapture<P> {
    /// Create a capture controller bound to `platform`
    pub fn new(platform: P, mods: ShortcutMods, warp: PointerWarp) -> Self {
        Self {
            platform,
            capture_keys: mods.keys().into_iter().collect(),
            pending_key: None,
            warp,
        }
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    pub fn platform_mut(&mut self) -> &mut P {
        &mut self.platform
    }

    fn is_capture_key(&self, key: Keycode) -> bool {
        self.capture_keys.contains(&key)
    }

    /// Process one event
    ///
    /// Returns `true` if the event was consumed, `false` if it must be
    /// forwarded.
    pub fn handle_event(&mut self, event: &Event) -> bool {
        match event {
            Event::FocusLost => {
                self.set_active(false);
                true
            }
            Event::Key(key) if self.is_capture_key(key.keycode) => {
                if key.pressed {
                    match self.pending_key {
                        None => self.pending_key = Some(key.keycode),
                        Some(pending) if pending == key.keycode => {}
                        // Another capture key pressed, cancel the toggle
                        Some(_) => self.pending_key = None,
                    }
                } else {
                    let pending = self.pending_key.take();
                    if pending == Some(key.keycode) {
                        self.toggle();
                    }
                }
                // Capture keys are never forwarded
                true
            }
            Event::Key(_) => false,
            Event::MouseWheel(_) | Event::MouseMotion(_) => !self.is_active(),
            Event::MouseButton(button) => {
                if self.is_active() {
                    return false;
                }
                // Capture happens on release, so that the click is not
                // forwarded
                if !button.pressed {
                    self.set_active(true);
                }
                true
            }
            // Touch coordinates are absolute, incompatible with relative mode
            Event::Touch(_) => true,
            Event::Other => false,
        }
    }

    /// Enable or disable relative mode
    ///
    /// Failures are logged, not returned.
    pub fn set_active(&mut self, capture: bool) {
        if capture && self.warp == PointerWarp::CenterIfOutside {
            self.center_pointer_if_outside();
        }

        match self.platform.set_relative_mouse_mode(capture) {
            Ok(()) => {
                tracing::debug!("Mouse capture {}", if capture { "enabled" } else { "disabled" })
            }
            Err(e) => {
                tracing::warn!("Could not set relative mouse mode to {}: {}", capture, e)
            }
        }
    }

    fn center_pointer_if_outside(&mut self) {
        let (x, y) = match self.platform.window_position() {
            Ok(pos) => pos,
            Err(e) => {
                tracing::warn!("Could not get window position: {}", e);
                return;
            }
        };
        let (w, h) = self.platform.window_size();

        let outside = match self.platform.global_pointer_position() {
            Some((px, py)) => {
                let (x, y, w, h) = (x as f64, y as f64, w as f64, h as f64);
                px < x || px >= x + w || py < y || py >= y + h
            }
            None => true,
        };

        if outside {
            let (cx, cy) = ((w / 2) as f64, (h / 2) as f64);
            tracing::debug!("Pointer outside window, warping to ({}, {})", cx, cy);
            if let Err(e) = self.platform.warp_pointer_in_window(cx, cy) {
                tracing::warn!("Could not warp pointer: {}", e);
            }
        }
    }

    /// Current capture state, read from the platform
    pub fn is_active(&self) -> bool {
        self.platform.relative_mouse_mode()
    }

    pub fn toggle(&mut self) {
        let capture = !self.is_active();
        self.set_active(capture);
    }
}
