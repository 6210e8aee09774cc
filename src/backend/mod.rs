//! Collaborator contract for the compositor core
//!
//! The scene/compositing engine, the display-protocol transport and the
//! output hardware are external to the core. This module defines the one
//! trait the core drives them through, plus the identifier and payload
//! types shared across that seam. Inbound traffic takes the opposite path:
//! the surrounding event loop turns collaborator notifications into
//! [`crate::event::Event`] values and feeds them to
//! [`crate::state::WavoState::dispatch`].

pub mod headless;

use std::fmt;
use std::num::NonZeroU64;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use crate::error::WavoResult;
use crate::utils::{Point, Rect};

/// Unique identifier for scene nodes
///
/// Allocated by the scene engine; guaranteed non-zero so `Option<NodeId>`
/// is free.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct NodeId(NonZeroU64);

static NODE_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

impl NodeId {
    /// Allocate a fresh node id
    pub fn next() -> Self {
        let id = NODE_ID_COUNTER.fetch_add(1, Ordering::Relaxed);
        // The counter starts at 1 and only increments
        NodeId(NonZeroU64::new(id).expect("node id counter overflow"))
    }

    pub fn get(&self) -> u64 {
        self.0.get()
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Node({})", self.0)
    }
}

/// Handle for one physical display, assigned by the output hardware layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct OutputId(pub u64);

impl fmt::Display for OutputId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Output({})", self.0)
    }
}

/// Handle for one physical input device, assigned by the device backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct DeviceId(pub u64);

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Device({})", self.0)
    }
}

/// What kind of drawable a scene node is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// A logical grouping node; views own one group each
    Group,
    /// A drawable node carrying client buffer content
    Buffer,
}

/// Result of a scene hit-test query
#[derive(Debug, Clone, Copy)]
pub struct HitTarget {
    /// The topmost node intersecting the query point
    pub node: NodeId,
    pub kind: NodeKind,
    /// The node's immediate parent group, if any
    pub parent: Option<NodeId>,
}

/// State of a pointer button or keyboard key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonState {
    Pressed,
    Released,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyState {
    Pressed,
    Released,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisOrientation {
    Vertical,
    Horizontal,
}

/// One scroll event, forwarded to clients untouched
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisEvent {
    pub orientation: AxisOrientation,
    pub delta: f64,
    pub delta_discrete: i32,
}

/// Keyboard modifier state, forwarded to clients untouched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub depressed: u32,
    pub latched: u32,
    pub locked: u32,
    pub group: u32,
}

bitflags::bitflags! {
    /// Input capabilities advertised on the seat
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct SeatCaps: u32 {
        const POINTER = 1;
        const KEYBOARD = 2;
    }
}

/// The collaborator contract the compositor core is written against
///
/// Real sessions implement this on top of a scene-graph renderer and a
/// protocol transport; tests use [`headless::HeadlessBackend`]. All calls
/// are synchronous and are assumed to succeed unless the signature says
/// otherwise; the transport owns its own failure handling.
pub trait Backend {
    /// Name the seat is advertised under
    fn seat_name(&self) -> String;

    // Scene engine

    /// Create the scene group holding one view's drawable content,
    /// positioned at `position` under the shared views layer.
    fn create_view_node(
        &mut self,
        surface: crate::shell::SurfaceHandle,
        position: Point,
    ) -> WavoResult<NodeId>;
    fn destroy_node(&mut self, node: NodeId);
    fn set_node_position(&mut self, node: NodeId, position: Point);
    /// Topmost node intersecting the point, if any
    fn node_at(&self, x: f64, y: f64) -> Option<HitTarget>;
    fn create_scene_output(&mut self, output: OutputId) -> WavoResult<NodeId>;
    fn destroy_scene_output(&mut self, binding: NodeId);
    /// Render and present the output's current composition
    fn render_output(&mut self, binding: NodeId) -> WavoResult<()>;
    fn send_frame_done(&mut self, binding: NodeId, now: Duration);

    // Output hardware

    fn init_output_render(&mut self, output: OutputId) -> WavoResult<()>;
    fn commit_preferred_mode(&mut self, output: OutputId) -> WavoResult<()>;
    fn layout_add_auto(&mut self, output: OutputId);
    fn layout_remove(&mut self, output: OutputId);
    fn enable_output(&mut self, output: OutputId) -> WavoResult<()>;

    // Seat / client event delivery

    fn set_capabilities(&mut self, caps: SeatCaps);
    fn set_active_keyboard(&mut self, keyboard: Option<DeviceId>);
    fn set_repeat_info(&mut self, keyboard: DeviceId, rate: i32, delay: i32);
    fn pointer_motion(&mut self, time_msec: u32, x: f64, y: f64);
    fn pointer_button(&mut self, time_msec: u32, button: u32, state: ButtonState);
    fn pointer_axis(&mut self, time_msec: u32, event: AxisEvent);
    fn pointer_frame(&mut self);
    fn keyboard_key(&mut self, time_msec: u32, keycode: u32, state: KeyState);
    fn keyboard_modifiers(&mut self, modifiers: Modifiers);

    // Toplevel control

    /// Whether the surface still carries a toplevel role
    fn is_toplevel(&self, surface: crate::shell::SurfaceHandle) -> bool;
    /// The surface's current committed geometry
    fn surface_geometry(&self, surface: crate::shell::SurfaceHandle) -> Rect;
    /// Ask the client to resize; takes effect when it commits a new buffer
    fn request_size(&mut self, surface: crate::shell::SurfaceHandle, width: f64, height: f64);
    fn set_activated(&mut self, surface: crate::shell::SurfaceHandle, activated: bool);
    /// Prompt the client to re-negotiate its state
    fn schedule_configure(&mut self, surface: crate::shell::SurfaceHandle);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_id_is_unique() {
        let a = NodeId::next();
        let b = NodeId::next();
        assert_ne!(a, b);
    }

    #[test]
    fn node_id_never_zero() {
        for _ in 0..100 {
            assert_ne!(NodeId::next().get(), 0);
        }
    }
}
