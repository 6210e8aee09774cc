//! Inbound event types for the compositor core
//!
//! Collaborator notifications arrive as `Event` values on one queue and
//! are processed to completion, strictly in arrival order, by
//! [`crate::state::WavoState::dispatch`]. No handler suspends and no two
//! handlers run concurrently.

use crate::backend::{
    AxisEvent, ButtonState, DeviceId, KeyState, Modifiers, OutputId,
};
use crate::input::DeviceInfo;
use crate::shell::{ResizeEdges, SurfaceHandle};

/// One raw event from a collaborator
#[derive(Debug, Clone)]
pub enum Event {
    /// The device backend attached a new input device
    DeviceAdded(DeviceInfo),
    /// The device backend detached an input device
    DeviceRemoved(DeviceId),

    /// Relative pointer motion
    PointerMotion {
        delta_x: f64,
        delta_y: f64,
        time_msec: u32,
    },
    /// Absolute pointer motion, e.g. from tablet-style devices
    PointerMotionAbsolute { x: f64, y: f64, time_msec: u32 },
    PointerButton {
        button: u32,
        state: ButtonState,
        time_msec: u32,
    },
    PointerAxis { event: AxisEvent, time_msec: u32 },
    PointerFrame,

    KeyboardKey {
        device: DeviceId,
        keycode: u32,
        state: KeyState,
        time_msec: u32,
    },
    KeyboardModifiers {
        device: DeviceId,
        modifiers: Modifiers,
    },

    /// A client created a new toplevel surface
    NewToplevel(SurfaceHandle),
    /// The surface committed its first buffer and became visible
    SurfaceMap(SurfaceHandle),
    SurfaceUnmap(SurfaceHandle),
    SurfaceDestroy(SurfaceHandle),
    /// Client-initiated interactive move
    RequestMove(SurfaceHandle),
    /// Client-initiated interactive resize along the given edges
    RequestResize {
        surface: SurfaceHandle,
        edges: ResizeEdges,
    },
    RequestMaximize(SurfaceHandle),
    RequestFullscreen(SurfaceHandle),

    OutputAdded(OutputId),
    /// The output is ready for the next frame
    OutputFrame(OutputId),
    OutputRemoved(OutputId),
}
