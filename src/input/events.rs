//! Input event types
//!
//! Platform-independent representation of the window and input events fed to
//! the mouse capture controller, plus the conversions from winit events.

use winit::event::{
    DeviceEvent, ElementState, MouseScrollDelta, Touch, TouchPhase as WinitTouchPhase,
    WindowEvent,
};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Platform-independent keycode (USB HID usage ID)
pub type Keycode = u32;

/// Mouse button identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Button4,
    Button5,
    /// Any further button, by platform index
    Other(u16),
}

/// A mouse movement event
#[derive(Debug, Clone, PartialEq)]
pub struct MouseMoveEvent {
    /// Window-local X position (if available)
    pub x: Option<i32>,
    /// Window-local Y position (if available)
    pub y: Option<i32>,
    /// Relative X movement
    pub dx: i32,
    /// Relative Y movement
    pub dy: i32,
}

/// A mouse button event
#[derive(Debug, Clone, PartialEq)]
pub struct MouseButtonEvent {
    pub button: MouseButton,
    pub pressed: bool,
}

/// A mouse wheel event
#[derive(Debug, Clone, PartialEq)]
pub struct MouseScrollEvent {
    /// Horizontal scroll delta
    pub dx: f32,
    /// Vertical scroll delta
    pub dy: f32,
}

/// A keyboard event
#[derive(Debug, Clone, PartialEq)]
pub struct KeyboardEvent {
    /// HID usage ID, `keycodes::KEY_UNKNOWN` for keys without one
    pub keycode: Keycode,
    /// Physical key as reported by the platform
    pub physical: PhysicalKey,
    /// Whether the key is pressed (true) or released (false)
    pub pressed: bool,
    /// Auto-repeat of a key that is already held down
    pub repeat: bool,
}

impl KeyboardEvent {
    pub fn new(physical: PhysicalKey, pressed: bool, repeat: bool) -> Self {
        let keycode = match physical {
            PhysicalKey::Code(code) => keycode_from_winit(code),
            PhysicalKey::Unidentified(_) => None,
        };
        Self {
            keycode: keycode.unwrap_or(keycodes::KEY_UNKNOWN),
            physical,
            pressed,
            repeat,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchPhase {
    Down,
    Motion,
    Up,
}

/// A touch (finger) event, in window coordinates
#[derive(Debug, Clone, PartialEq)]
pub struct TouchEvent {
    pub finger_id: u64,
    pub phase: TouchPhase,
    pub x: f64,
    pub y: f64,
}

/// Union of all events the capture controller looks at
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// The window lost keyboard focus
    FocusLost,
    Key(KeyboardEvent),
    MouseMotion(MouseMoveEvent),
    MouseButton(MouseButtonEvent),
    MouseWheel(MouseScrollEvent),
    Touch(TouchEvent),
    /// Anything else (resize, focus gained, ...)
    Other,
}

impl Event {
    /// Convert a winit window event
    pub fn from_window_event(event: &WindowEvent) -> Self {
        match event {
            WindowEvent::Focused(false) => Event::FocusLost,
            WindowEvent::KeyboardInput { event, .. } => Event::Key(KeyboardEvent::new(
                event.physical_key,
                event.state == ElementState::Pressed,
                event.repeat,
            )),
            WindowEvent::CursorMoved { position, .. } => Event::MouseMotion(MouseMoveEvent {
                x: Some(position.x as i32),
                y: Some(position.y as i32),
                dx: 0,
                dy: 0,
            }),
            WindowEvent::MouseInput { state, button, .. } => {
                Event::MouseButton(MouseButtonEvent {
                    button: mouse_button_from_winit(*button),
                    pressed: *state == ElementState::Pressed,
                })
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let (dx, dy) = match delta {
                    MouseScrollDelta::LineDelta(dx, dy) => (*dx, *dy),
                    MouseScrollDelta::PixelDelta(pos) => (pos.x as f32, pos.y as f32),
                };
                Event::MouseWheel(MouseScrollEvent { dx, dy })
            }
            WindowEvent::Touch(touch) => Event::Touch(touch_from_winit(touch)),
            _ => Event::Other,
        }
    }

    /// Convert a winit device event
    ///
    /// Only raw pointer motion is of interest: it carries the deltas once the
    /// pointer is locked in relative mode.
    pub fn from_device_event(event: &DeviceEvent) -> Option<Self> {
        match event {
            DeviceEvent::MouseMotion { delta: (dx, dy) } => {
                Some(Event::MouseMotion(MouseMoveEvent {
                    x: None,
                    y: None,
                    dx: dx.round() as i32,
                    dy: dy.round() as i32,
                }))
            }
            _ => None,
        }
    }
}

fn mouse_button_from_winit(button: winit::event::MouseButton) -> MouseButton {
    match button {
        winit::event::MouseButton::Left => MouseButton::Left,
        winit::event::MouseButton::Right => MouseButton::Right,
        winit::event::MouseButton::Middle => MouseButton::Middle,
        winit::event::MouseButton::Back => MouseButton::Button4,
        winit::event::MouseButton::Forward => MouseButton::Button5,
        winit::event::MouseButton::Other(n) => MouseButton::Other(n),
    }
}

fn touch_from_winit(touch: &Touch) -> TouchEvent {
    let phase = match touch.phase {
        WinitTouchPhase::Started => TouchPhase::Down,
        WinitTouchPhase::Moved => TouchPhase::Motion,
        WinitTouchPhase::Ended | WinitTouchPhase::Cancelled => TouchPhase::Up,
    };
    TouchEvent {
        finger_id: touch.id,
        phase,
        x: touch.location.x,
        y: touch.location.y,
    }
}

/// Map a winit physical key to its HID usage ID
pub fn keycode_from_winit(code: KeyCode) -> Option<Keycode> {
    use keycodes::*;

    let keycode = match code {
        KeyCode::KeyA => KEY_A,
        KeyCode::KeyB => KEY_B,
        KeyCode::KeyC => KEY_C,
        KeyCode::KeyD => KEY_D,
        KeyCode::KeyE => KEY_E,
        KeyCode::KeyF => KEY_F,
        KeyCode::KeyG => KEY_G,
        KeyCode::KeyH => KEY_H,
        KeyCode::KeyI => KEY_I,
        KeyCode::KeyJ => KEY_J,
        KeyCode::KeyK => KEY_K,
        KeyCode::KeyL => KEY_L,
        KeyCode::KeyM => KEY_M,
        KeyCode::KeyN => KEY_N,
        KeyCode::KeyO => KEY_O,
        KeyCode::KeyP => KEY_P,
        KeyCode::KeyQ => KEY_Q,
        KeyCode::KeyR => KEY_R,
        KeyCode::KeyS => KEY_S,
        KeyCode::KeyT => KEY_T,
        KeyCode::KeyU => KEY_U,
        KeyCode::KeyV => KEY_V,
        KeyCode::KeyW => KEY_W,
        KeyCode::KeyX => KEY_X,
        KeyCode::KeyY => KEY_Y,
        KeyCode::KeyZ => KEY_Z,

        KeyCode::Digit1 => KEY_1,
        KeyCode::Digit2 => KEY_2,
        KeyCode::Digit3 => KEY_3,
        KeyCode::Digit4 => KEY_4,
        KeyCode::Digit5 => KEY_5,
        KeyCode::Digit6 => KEY_6,
        KeyCode::Digit7 => KEY_7,
        KeyCode::Digit8 => KEY_8,
        KeyCode::Digit9 => KEY_9,
        KeyCode::Digit0 => KEY_0,

        KeyCode::Enter => KEY_ENTER,
        KeyCode::Escape => KEY_ESCAPE,
        KeyCode::Backspace => KEY_BACKSPACE,
        KeyCode::Tab => KEY_TAB,
        KeyCode::Space => KEY_SPACE,

        KeyCode::F1 => KEY_F1,
        KeyCode::F2 => KEY_F2,
        KeyCode::F3 => KEY_F3,
        KeyCode::F4 => KEY_F4,
        KeyCode::F5 => KEY_F5,
        KeyCode::F6 => KEY_F6,
        KeyCode::F7 => KEY_F7,
        KeyCode::F8 => KEY_F8,
        KeyCode::F9 => KEY_F9,
        KeyCode::F10 => KEY_F10,
        KeyCode::F11 => KEY_F11,
        KeyCode::F12 => KEY_F12,

        KeyCode::ArrowRight => KEY_RIGHT_ARROW,
        KeyCode::ArrowLeft => KEY_LEFT_ARROW,
        KeyCode::ArrowDown => KEY_DOWN_ARROW,
        KeyCode::ArrowUp => KEY_UP_ARROW,

        KeyCode::ControlLeft => KEY_LEFT_CTRL,
        KeyCode::ShiftLeft => KEY_LEFT_SHIFT,
        KeyCode::AltLeft => KEY_LEFT_ALT,
        KeyCode::SuperLeft => KEY_LEFT_META,
        KeyCode::ControlRight => KEY_RIGHT_CTRL,
        KeyCode::ShiftRight => KEY_RIGHT_SHIFT,
        KeyCode::AltRight => KEY_RIGHT_ALT,
        KeyCode::SuperRight => KEY_RIGHT_META,

        _ => return None,
    };
    Some(keycode)
}

/// USB HID Keyboard keycodes (subset of common keys)
pub mod keycodes {
    use super::Keycode;

    /// Key with no HID usage ID in this table
    pub const KEY_UNKNOWN: Keycode = 0x00;

    pub const KEY_A: Keycode = 0x04;
    pub const KEY_B: Keycode = 0x05;
    pub const KEY_C: Keycode = 0x06;
    pub const KEY_D: Keycode = 0x07;
    pub const KEY_E: Keycode = 0x08;
    pub const KEY_F: Keycode = 0x09;
    pub const KEY_G: Keycode = 0x0A;
    pub const KEY_H: Keycode = 0x0B;
    pub const KEY_I: Keycode = 0x0C;
    pub const KEY_J: Keycode = 0x0D;
    pub const KEY_K: Keycode = 0x0E;
    pub const KEY_L: Keycode = 0x0F;
    pub const KEY_M: Keycode = 0x10;
    pub const KEY_N: Keycode = 0x11;
    pub const KEY_O: Keycode = 0x12;
    pub const KEY_P: Keycode = 0x13;
    pub const KEY_Q: Keycode = 0x14;
    pub const KEY_R: Keycode = 0x15;
    pub const KEY_S: Keycode = 0x16;
    pub const KEY_T: Keycode = 0x17;
    pub const KEY_U: Keycode = 0x18;
    pub const KEY_V: Keycode = 0x19;
    pub const KEY_W: Keycode = 0x1A;
    pub const KEY_X: Keycode = 0x1B;
    pub const KEY_Y: Keycode = 0x1C;
    pub const KEY_Z: Keycode = 0x1D;

    pub const KEY_1: Keycode = 0x1E;
    pub const KEY_2: Keycode = 0x1F;
    pub const KEY_3: Keycode = 0x20;
    pub const KEY_4: Keycode = 0x21;
    pub const KEY_5: Keycode = 0x22;
    pub const KEY_6: Keycode = 0x23;
    pub const KEY_7: Keycode = 0x24;
    pub const KEY_8: Keycode = 0x25;
    pub const KEY_9: Keycode = 0x26;
    pub const KEY_0: Keycode = 0x27;

    pub const KEY_ENTER: Keycode = 0x28;
    pub const KEY_ESCAPE: Keycode = 0x29;
    pub const KEY_BACKSPACE: Keycode = 0x2A;
    pub const KEY_TAB: Keycode = 0x2B;
    pub const KEY_SPACE: Keycode = 0x2C;

    pub const KEY_F1: Keycode = 0x3A;
    pub const KEY_F2: Keycode = 0x3B;
    pub const KEY_F3: Keycode = 0x3C;
    pub const KEY_F4: Keycode = 0x3D;
    pub const KEY_F5: Keycode = 0x3E;
    pub const KEY_F6: Keycode = 0x3F;
    pub const KEY_F7: Keycode = 0x40;
    pub const KEY_F8: Keycode = 0x41;
    pub const KEY_F9: Keycode = 0x42;
    pub const KEY_F10: Keycode = 0x43;
    pub const KEY_F11: Keycode = 0x44;
    pub const KEY_F12: Keycode = 0x45;

    pub const KEY_RIGHT_ARROW: Keycode = 0x4F;
    pub const KEY_LEFT_ARROW: Keycode = 0x50;
    pub const KEY_DOWN_ARROW: Keycode = 0x51;
    pub const KEY_UP_ARROW: Keycode = 0x52;

    pub const KEY_LEFT_CTRL: Keycode = 0xE0;
    pub const KEY_LEFT_SHIFT: Keycode = 0xE1;
    pub const KEY_LEFT_ALT: Keycode = 0xE2;
    pub const KEY_LEFT_META: Keycode = 0xE3;
    pub const KEY_RIGHT_CTRL: Keycode = 0xE4;
    pub const KEY_RIGHT_SHIFT: Keycode = 0xE5;
    pub const KEY_RIGHT_ALT: Keycode = 0xE6;
    pub const KEY_RIGHT_META: Keycode = 0xE7;
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::dpi::PhysicalPosition;
    use winit::event::DeviceId;
    use winit::keyboard::NativeKeyCode;

    fn device_id() -> DeviceId {
        // SAFETY: only used as an opaque tag in synthetic events.
        unsafe { DeviceId::dummy() }
    }

    #[test]
    fn test_modifier_keycodes() {
        assert_eq!(keycode_from_winit(KeyCode::ControlLeft), Some(keycodes::KEY_LEFT_CTRL));
        assert_eq!(keycode_from_winit(KeyCode::SuperRight), Some(keycodes::KEY_RIGHT_META));
        assert_eq!(keycode_from_winit(KeyCode::KeyQ), Some(keycodes::KEY_Q));
        assert_eq!(keycode_from_winit(KeyCode::MediaPlayPause), None);
    }

    #[test]
    fn test_focus_events() {
        assert_eq!(Event::from_window_event(&WindowEvent::Focused(false)), Event::FocusLost);
        assert_eq!(Event::from_window_event(&WindowEvent::Focused(true)), Event::Other);
    }

    #[test]
    fn test_mouse_input() {
        let event = Event::from_window_event(&WindowEvent::MouseInput {
            device_id: device_id(),
            state: ElementState::Released,
            button: winit::event::MouseButton::Right,
        });
        assert_eq!(
            event,
            Event::MouseButton(MouseButtonEvent {
                button: MouseButton::Right,
                pressed: false,
            })
        );
    }

    #[test]
    fn test_extra_mouse_button() {
        let event = Event::from_window_event(&WindowEvent::MouseInput {
            device_id: device_id(),
            state: ElementState::Pressed,
            button: winit::event::MouseButton::Other(8),
        });
        assert_eq!(
            event,
            Event::MouseButton(MouseButtonEvent {
                button: MouseButton::Other(8),
                pressed: true,
            })
        );
    }

    #[test]
    fn test_keyboard_event_keycodes() {
        let ctrl = KeyboardEvent::new(PhysicalKey::Code(KeyCode::ControlLeft), true, false);
        assert_eq!(ctrl.keycode, keycodes::KEY_LEFT_CTRL);

        // Keys without a HID mapping keep their physical key
        let plus = KeyboardEvent::new(PhysicalKey::Code(KeyCode::NumpadAdd), false, false);
        assert_eq!(plus.keycode, keycodes::KEY_UNKNOWN);
        assert_eq!(plus.physical, PhysicalKey::Code(KeyCode::NumpadAdd));
        assert!(!plus.pressed);

        let native = PhysicalKey::Unidentified(NativeKeyCode::Xkb(0x1b4));
        let unidentified = KeyboardEvent::new(native, true, true);
        assert_eq!(unidentified.keycode, keycodes::KEY_UNKNOWN);
        assert_eq!(unidentified.physical, native);
        assert!(unidentified.repeat);
    }

    #[test]
    fn test_cursor_moved() {
        let event = Event::from_window_event(&WindowEvent::CursorMoved {
            device_id: device_id(),
            position: PhysicalPosition::new(12.4, 30.0),
        });
        match event {
            Event::MouseMotion(motion) => {
                assert_eq!(motion.x, Some(12));
                assert_eq!(motion.y, Some(30));
            }
            other => panic!("Expected motion, got {:?}", other),
        }
    }

    #[test]
    fn test_touch_phases() {
        let mut touch = Touch {
            device_id: device_id(),
            phase: WinitTouchPhase::Cancelled,
            location: PhysicalPosition::new(1.0, 2.0),
            force: None,
            id: 7,
        };
        assert_eq!(touch_from_winit(&touch).phase, TouchPhase::Up);

        touch.phase = WinitTouchPhase::Started;
        let event = Event::from_window_event(&WindowEvent::Touch(touch));
        assert!(matches!(
            event,
            Event::Touch(TouchEvent {
                finger_id: 7,
                phase: TouchPhase::Down,
                ..
            })
        ));
    }

    #[test]
    fn test_raw_motion() {
        let event = Event::from_device_event(&DeviceEvent::MouseMotion { delta: (3.6, -1.2) });
        assert_eq!(
            event,
            Some(Event::MouseMotion(MouseMoveEvent {
                x: None,
                y: None,
                dx: 4,
                dy: -1,
            }))
        );
        assert_eq!(Event::from_device_event(&DeviceEvent::Added), None);
    }
}
