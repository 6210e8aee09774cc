//! Input device registry and seat routing
//!
//! All raw input events pass through here. Pointer motion moves the single
//! logical cursor; while a grab is active the grab consumes motion and the
//! terminating button release, otherwise events are forwarded to the
//! client under the cursor. Scroll and keyboard events are never
//! intercepted.

pub mod keyboard;
pub mod pointer;

use tracing::{debug, info};

use crate::backend::{
    AxisEvent, Backend, ButtonState, DeviceId, KeyState, Modifiers, SeatCaps,
};
use crate::shell::grabs::SeatGrab;
use crate::state::WavoState;
use crate::utils::Point;

pub use keyboard::Keyboard;
pub use pointer::Pointer;

/// Primary pointer button, per the Linux input event codes
pub const BTN_LEFT: u32 = 0x110;

/// What the device backend reports a device as
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceKind {
    Keyboard,
    Pointer,
    /// Touch, tablet, switch and anything else we do not drive
    Other,
}

/// Attachment notification payload from the device backend
#[derive(Debug, Clone)]
pub struct DeviceInfo {
    pub id: DeviceId,
    pub kind: DeviceKind,
    pub name: String,
}

/// Seat state: devices, the logical cursor and the grab slot
///
/// The cursor position and the active grab are owned here exclusively and
/// mutated only from the seat router's own handlers.
#[derive(Debug, Default)]
pub struct InputManager {
    keyboards: Vec<Keyboard>,
    pointers: Vec<Pointer>,
    /// Last-added keyboard wins; key events are delivered on its behalf
    active_keyboard: Option<DeviceId>,
    cursor: Point,
    grab: Option<SeatGrab>,
}

impl InputManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current cursor position in screen space
    pub fn cursor(&self) -> Point {
        self.cursor
    }

    pub fn grab(&self) -> Option<&SeatGrab> {
        self.grab.as_ref()
    }

    pub(crate) fn grab_mut(&mut self) -> Option<&mut SeatGrab> {
        self.grab.as_mut()
    }

    pub(crate) fn set_grab(&mut self, grab: SeatGrab) {
        self.grab = Some(grab);
    }

    pub(crate) fn take_grab(&mut self) -> Option<SeatGrab> {
        self.grab.take()
    }

    pub fn active_keyboard(&self) -> Option<DeviceId> {
        self.active_keyboard
    }

    pub fn keyboard_count(&self) -> usize {
        self.keyboards.len()
    }

    pub fn pointer_count(&self) -> usize {
        self.pointers.len()
    }

    /// Capability set implied by the current device collections
    ///
    /// Pointer support is assumed constantly available; keyboard capability
    /// holds iff at least one keyboard is attached.
    pub fn capabilities(&self) -> SeatCaps {
        let mut caps = SeatCaps::POINTER;
        if !self.keyboards.is_empty() {
            caps |= SeatCaps::KEYBOARD;
        }
        caps
    }
}

impl<B: Backend> WavoState<B> {
    /// The device backend attached a new input device
    pub fn handle_device_added(&mut self, device: DeviceInfo) {
        match device.kind {
            DeviceKind::Keyboard => {
                let rate = self.config.repeat_rate;
                let delay = self.config.repeat_delay;
                self.backend.set_repeat_info(device.id, rate, delay);
                self.input
                    .keyboards
                    .push(Keyboard::new(device.id, device.name, rate, delay));
                self.input.active_keyboard = Some(device.id);
                self.backend.set_active_keyboard(Some(device.id));
            }
            DeviceKind::Pointer => {
                // Attached to the shared cursor: its motion events feed the
                // one logical cursor position.
                self.input
                    .pointers
                    .push(Pointer::new(device.id, device.name));
            }
            DeviceKind::Other => {
                info!("Unsupported input device kind for {}", device.id);
            }
        }
        self.update_capabilities();
    }

    /// The device backend detached a device
    ///
    /// Membership is removed first, so a duplicate notification for the
    /// same device is a no-op.
    pub fn handle_device_removed(&mut self, id: DeviceId) {
        if let Some(index) = self.input.keyboards.iter().position(|k| k.id == id) {
            self.input.keyboards.remove(index);
            if self.input.active_keyboard == Some(id) {
                let fallback = self.input.keyboards.last().map(|k| k.id);
                self.input.active_keyboard = fallback;
                self.backend.set_active_keyboard(fallback);
            }
        } else if let Some(index) = self.input.pointers.iter().position(|p| p.id == id) {
            self.input.pointers.remove(index);
        } else {
            debug!("Removal for unknown device {id}, ignoring");
            return;
        }
        self.update_capabilities();
    }

    fn update_capabilities(&mut self) {
        let caps = self.input.capabilities();
        self.backend.set_capabilities(caps);
    }

    /// Relative pointer motion
    pub fn handle_pointer_motion(&mut self, delta_x: f64, delta_y: f64, time_msec: u32) {
        self.input.cursor = self.input.cursor.offset(delta_x, delta_y);
        self.process_cursor(time_msec);
    }

    /// Absolute pointer motion, e.g. from tablet-style backends
    pub fn handle_pointer_motion_absolute(&mut self, x: f64, y: f64, time_msec: u32) {
        self.input.cursor = Point::new(x, y);
        self.process_cursor(time_msec);
    }

    fn process_cursor(&mut self, time_msec: u32) {
        let cursor = self.input.cursor;
        if self.input.grab.is_some() {
            // Motion is consumed by the grab, not forwarded.
            self.update_grab(cursor);
            return;
        }
        self.backend.pointer_motion(time_msec, cursor.x, cursor.y);
    }

    /// Pointer button press or release
    ///
    /// A release ends any active grab and is consumed with it. A press
    /// focuses the view under the cursor, and the primary button starts an
    /// interactive move.
    pub fn handle_pointer_button(&mut self, button: u32, state: ButtonState, time_msec: u32) {
        if state == ButtonState::Released {
            if self.input.take_grab().is_some() {
                return;
            }
            self.backend.pointer_button(time_msec, button, state);
            return;
        }

        let cursor = self.input.cursor;
        let Some(view) = self.view_under(cursor) else {
            return;
        };
        self.activate(view, true);
        if button == BTN_LEFT {
            self.start_move_grab(view);
        }
    }

    /// Scroll events pass through untouched; grabs do not affect them
    pub fn handle_pointer_axis(&mut self, event: AxisEvent, time_msec: u32) {
        self.backend.pointer_axis(time_msec, event);
    }

    pub fn handle_pointer_frame(&mut self) {
        self.backend.pointer_frame();
    }

    /// Key events pass through; the transport knows which client holds
    /// keyboard focus
    pub fn handle_keyboard_key(
        &mut self,
        device: DeviceId,
        keycode: u32,
        state: KeyState,
        time_msec: u32,
    ) {
        if self.input.keyboards.iter().all(|k| k.id != device) {
            debug!("Key event from unknown keyboard {device}, ignoring");
            return;
        }
        self.backend.keyboard_key(time_msec, keycode, state);
    }

    pub fn handle_keyboard_modifiers(&mut self, device: DeviceId, modifiers: Modifiers) {
        if self.input.keyboards.iter().all(|k| k.id != device) {
            debug!("Modifier event from unknown keyboard {device}, ignoring");
            return;
        }
        self.backend.keyboard_modifiers(modifiers);
    }
}
