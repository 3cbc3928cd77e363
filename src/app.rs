//! Viewer application
//!
//! Owns the window and feeds every window and device event, in delivery
//! order, to the mouse capture controller. Events it does not consume are
//! forwarded to the device input pipeline.

use std::sync::Arc;

use winit::application::ApplicationHandler;
use winit::event::{DeviceEvent, DeviceId, WindowEvent};
use winit::event_loop::ActiveEventLoop;
use winit::window::{Window, WindowId};

use crate::input::{Event, MouseCapture, PointerPlatform, PointerWarp, ShortcutMods, WinitPointer};
use crate::window::{self, WindowError, WindowParams};

/// Options for the viewer window
#[derive(Debug, Clone)]
pub struct ViewerOptions {
    pub window: WindowParams,
    pub mouse_capture: bool,
    pub shortcut_mod: ShortcutMods,
    pub warp: PointerWarp,
}

pub struct Viewer<P: PointerPlatform> {
    options: ViewerOptions,
    window: Option<Arc<Window>>,
    capture: Option<MouseCapture<P>>,
    /// Set if the window could not be created
    error: Option<WindowError>,
    forwarded: u64,
}

impl<P: PointerPlatform> Viewer<P> {
    pub fn new(options: ViewerOptions) -> Self {
        Self {
            options,
            window: None,
            capture: None,
            error: None,
            forwarded: 0,
        }
    }

    /// Error that stopped the event loop, if any
    pub fn take_error(&mut self) -> Option<WindowError> {
        self.error.take()
    }

    /// Number of input events forwarded so far
    pub fn forwarded(&self) -> u64 {
        self.forwarded
    }

    /// Attach the capture controller, if mouse capture is enabled
    fn start_capture(&mut self, platform: P) {
        if !self.options.mouse_capture {
            return;
        }
        tracing::info!(
            "Mouse capture enabled (toggle: {}, pointer warp: {})",
            self.options.shortcut_mod,
            self.options.warp
        );
        self.capture = Some(MouseCapture::new(
            platform,
            self.options.shortcut_mod,
            self.options.warp,
        ));
    }

    // With a capture controller, pointer motion is taken from the raw device
    // deltas only; cursor positions just feed the backend. Without one, the
    // cursor positions are the motion and device deltas are ignored.
    fn dispatch_window_event(&mut self, event: &WindowEvent) {
        if self.capture.is_some() && matches!(event, WindowEvent::CursorMoved { .. }) {
            return;
        }
        self.dispatch(Event::from_window_event(event));
    }

    fn dispatch_device_event(&mut self, event: &DeviceEvent) {
        if self.capture.is_none() {
            return;
        }
        if let Some(event) = Event::from_device_event(event) {
            self.dispatch(event);
        }
    }

    fn dispatch(&mut self, event: Event) {
        let consumed = match &mut self.capture {
            Some(capture) => capture.handle_event(&event),
            None => false,
        };
        if !consumed {
            self.forward(event);
        }
    }

    fn forward(&mut self, event: Event) {
        if event == Event::Other {
            return;
        }
        // No device connection here: forwarded input is only traced
        tracing::trace!("Forwarding {:?}", event);
        self.forwarded += 1;
    }
}

impl ApplicationHandler for Viewer<WinitPointer> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window = match window::create_window(event_loop, &self.options.window) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                self.error = Some(e);
                event_loop.exit();
                return;
            }
        };

        self.start_capture(WinitPointer::new(window.clone()));
        self.window = Some(window);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if let WindowEvent::CloseRequested = event {
            tracing::info!("Window closed, {} events forwarded", self.forwarded);
            event_loop.exit();
            return;
        }

        if let Some(capture) = &mut self.capture {
            capture.platform_mut().observe(&event);
        }
        self.dispatch_window_event(&event);
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: DeviceId,
        event: DeviceEvent,
    ) {
        self.dispatch_device_event(&event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::dpi::PhysicalPosition;
    use winit::event::{ElementState, MouseButton};
    use winit::keyboard::{KeyCode, PhysicalKey};

    use crate::input::mock::MockPointer;
    use crate::input::KeyboardEvent;
    use crate::window::WindowFlags;

    fn options(mouse_capture: bool) -> ViewerOptions {
        ViewerOptions {
            window: WindowParams {
                title: "test".to_string(),
                x: None,
                y: None,
                width: 320,
                height: 240,
                flags: WindowFlags::empty(),
            },
            mouse_capture,
            shortcut_mod: ShortcutMods::default(),
            warp: PointerWarp::None,
        }
    }

    fn viewer(mouse_capture: bool) -> Viewer<MockPointer> {
        let mut viewer = Viewer::new(options(mouse_capture));
        viewer.start_capture(MockPointer::default());
        viewer
    }

    fn is_active(viewer: &Viewer<MockPointer>) -> bool {
        viewer.capture.as_ref().map_or(false, |c| c.is_active())
    }

    fn device_id() -> DeviceId {
        // SAFETY: only used as an opaque tag in synthetic events.
        unsafe { DeviceId::dummy() }
    }

    fn key(code: KeyCode, pressed: bool) -> Event {
        Event::Key(KeyboardEvent::new(PhysicalKey::Code(code), pressed, false))
    }

    fn click(state: ElementState) -> WindowEvent {
        WindowEvent::MouseInput {
            device_id: device_id(),
            state,
            button: MouseButton::Left,
        }
    }

    fn cursor_moved() -> WindowEvent {
        WindowEvent::CursorMoved {
            device_id: device_id(),
            position: PhysicalPosition::new(10.0, 20.0),
        }
    }

    fn raw_motion() -> DeviceEvent {
        DeviceEvent::MouseMotion { delta: (2.0, -3.0) }
    }

    #[test]
    fn test_forward_without_capture() {
        let mut viewer = viewer(false);
        assert!(viewer.capture.is_none());
        viewer.dispatch(key(KeyCode::AltLeft, true));
        viewer.dispatch(Event::Other);
        assert_eq!(viewer.forwarded(), 1);
        assert!(viewer.take_error().is_none());
    }

    #[test]
    fn test_consumed_events_are_not_forwarded() {
        let mut viewer = viewer(true);

        // Capture key gesture
        viewer.dispatch(key(KeyCode::AltLeft, true));
        viewer.dispatch(key(KeyCode::AltLeft, false));
        assert!(is_active(&viewer));
        viewer.dispatch(key(KeyCode::AltLeft, true));
        viewer.dispatch(key(KeyCode::AltLeft, false));
        assert!(!is_active(&viewer));

        // Click while inactive, and motion before capture
        viewer.dispatch_device_event(&raw_motion());
        viewer.dispatch_window_event(&click(ElementState::Pressed));
        viewer.dispatch_window_event(&click(ElementState::Released));
        assert!(is_active(&viewer));
        assert_eq!(viewer.forwarded(), 0);

        viewer.dispatch_device_event(&raw_motion());
        assert_eq!(viewer.forwarded(), 1);
    }

    #[test]
    fn test_captured_motion_forwarded_once() {
        let mut viewer = viewer(true);
        viewer.dispatch_window_event(&click(ElementState::Released));
        assert!(is_active(&viewer));

        // A physical move produces both events; only the delta is forwarded
        viewer.dispatch_window_event(&cursor_moved());
        viewer.dispatch_device_event(&raw_motion());
        assert_eq!(viewer.forwarded(), 1);
    }

    #[test]
    fn test_cursor_motion_without_capture() {
        let mut viewer = viewer(false);
        viewer.dispatch_window_event(&cursor_moved());
        viewer.dispatch_device_event(&raw_motion());
        assert_eq!(viewer.forwarded(), 1);
    }

    #[test]
    fn test_unmapped_key_forwarded_while_captured() {
        let mut viewer = viewer(true);
        viewer.dispatch_window_event(&click(ElementState::Released));
        viewer.dispatch(key(KeyCode::NumpadAdd, true));
        viewer.dispatch(key(KeyCode::NumpadAdd, false));
        assert_eq!(viewer.forwarded(), 2);
    }
}
