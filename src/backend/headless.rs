//! In-memory backend for tests and headless runs
//!
//! Implements the full collaborator contract with plain data structures:
//! a flat scene of rectangles for hit-testing, per-surface geometry, and a
//! log of every event that would have been delivered to clients. Failure
//! injection flags let tests exercise the error paths of output setup and
//! rendering.

use std::collections::{HashMap, HashSet};
use std::time::Duration;

use tracing::{debug, info};

use crate::backend::{
    AxisEvent, Backend, ButtonState, DeviceId, HitTarget, KeyState, Modifiers, NodeId, NodeKind,
    OutputId, SeatCaps,
};
use crate::config::Config;
use crate::error::{WavoError, WavoResult};
use crate::event::Event;
use crate::input::{DeviceInfo, DeviceKind};
use crate::shell::SurfaceHandle;
use crate::state::WavoState;
use crate::utils::{Point, Rect};

/// One event that would have reached a client
#[derive(Debug, Clone, PartialEq)]
pub enum ClientEvent {
    Motion { time_msec: u32, x: f64, y: f64 },
    Button {
        time_msec: u32,
        button: u32,
        state: ButtonState,
    },
    Axis { time_msec: u32, event: AxisEvent },
    Frame,
    Key {
        time_msec: u32,
        keycode: u32,
        state: KeyState,
    },
    Modifiers(Modifiers),
    SizeRequested {
        surface: SurfaceHandle,
        width: f64,
        height: f64,
    },
    Activated {
        surface: SurfaceHandle,
        activated: bool,
    },
    Configure { surface: SurfaceHandle },
    FrameDone { output: OutputId },
}

#[derive(Debug)]
struct MockNode {
    kind: NodeKind,
    rect: Rect,
    parent: Option<NodeId>,
}

#[derive(Debug)]
struct MockSurface {
    geometry: Rect,
    toplevel: bool,
}

/// Backend with no hardware behind it
#[derive(Debug, Default)]
pub struct HeadlessBackend {
    nodes: HashMap<NodeId, MockNode>,
    /// Buffer nodes in stacking order, topmost first
    stacking: Vec<NodeId>,
    surfaces: HashMap<SurfaceHandle, MockSurface>,
    scene_outputs: HashMap<NodeId, OutputId>,
    layout: HashSet<OutputId>,
    events: Vec<ClientEvent>,
    caps: SeatCaps,
    active_keyboard: Option<DeviceId>,
    repeat_info: HashMap<DeviceId, (i32, i32)>,
    fail_mode_commit: HashSet<OutputId>,
    fail_scene_output: HashSet<OutputId>,
    fail_enable: HashSet<OutputId>,
    fail_render: HashSet<OutputId>,
}

impl HeadlessBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a client surface with its committed geometry and role
    pub fn add_surface(&mut self, surface: SurfaceHandle, geometry: Rect, toplevel: bool) {
        self.surfaces
            .insert(surface, MockSurface { geometry, toplevel });
    }

    pub fn set_surface_geometry(&mut self, surface: SurfaceHandle, geometry: Rect) {
        if let Some(s) = self.surfaces.get_mut(&surface) {
            s.geometry = geometry;
        }
    }

    /// Drain the log of delivered client events
    pub fn take_events(&mut self) -> Vec<ClientEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn events(&self) -> &[ClientEvent] {
        &self.events
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn scene_output_count(&self) -> usize {
        self.scene_outputs.len()
    }

    pub fn in_layout(&self, output: OutputId) -> bool {
        self.layout.contains(&output)
    }

    pub fn capabilities(&self) -> SeatCaps {
        self.caps
    }

    pub fn active_keyboard(&self) -> Option<DeviceId> {
        self.active_keyboard
    }

    pub fn repeat_info(&self, keyboard: DeviceId) -> Option<(i32, i32)> {
        self.repeat_info.get(&keyboard).copied()
    }

    pub fn node_position(&self, node: NodeId) -> Option<Point> {
        self.nodes.get(&node).map(|n| Point::new(n.rect.x, n.rect.y))
    }

    // Failure injection

    pub fn fail_mode_commit_for(&mut self, output: OutputId) {
        self.fail_mode_commit.insert(output);
    }

    pub fn fail_scene_output_for(&mut self, output: OutputId) {
        self.fail_scene_output.insert(output);
    }

    pub fn fail_enable_for(&mut self, output: OutputId) {
        self.fail_enable.insert(output);
    }

    pub fn fail_render_for(&mut self, output: OutputId) {
        self.fail_render.insert(output);
    }

    pub fn clear_render_failure(&mut self, output: OutputId) {
        self.fail_render.remove(&output);
    }
}

impl Backend for HeadlessBackend {
    fn seat_name(&self) -> String {
        "seat0".to_string()
    }

    fn create_view_node(&mut self, surface: SurfaceHandle, position: Point) -> WavoResult<NodeId> {
        let geometry = self
            .surfaces
            .get(&surface)
            .ok_or_else(|| WavoError::Scene(format!("no committed content for {surface}")))?
            .geometry;
        let rect = Rect::new(position.x, position.y, geometry.width, geometry.height);

        let group = NodeId::next();
        self.nodes.insert(
            group,
            MockNode {
                kind: NodeKind::Group,
                rect,
                parent: None,
            },
        );
        let buffer = NodeId::next();
        self.nodes.insert(
            buffer,
            MockNode {
                kind: NodeKind::Buffer,
                rect,
                parent: Some(group),
            },
        );
        self.stacking.insert(0, buffer);
        Ok(group)
    }

    fn destroy_node(&mut self, node: NodeId) {
        let children: Vec<_> = self
            .nodes
            .iter()
            .filter(|(_, n)| n.parent == Some(node))
            .map(|(id, _)| *id)
            .collect();
        for child in children {
            self.nodes.remove(&child);
            self.stacking.retain(|n| *n != child);
        }
        self.nodes.remove(&node);
        self.stacking.retain(|n| *n != node);
    }

    fn set_node_position(&mut self, node: NodeId, position: Point) {
        let Some(group) = self.nodes.get_mut(&node) else {
            return;
        };
        let dx = position.x - group.rect.x;
        let dy = position.y - group.rect.y;
        group.rect.x = position.x;
        group.rect.y = position.y;
        for n in self.nodes.values_mut() {
            if n.parent == Some(node) {
                n.rect.x += dx;
                n.rect.y += dy;
            }
        }
    }

    fn node_at(&self, x: f64, y: f64) -> Option<HitTarget> {
        let point = Point::new(x, y);
        for id in &self.stacking {
            let node = self.nodes.get(id)?;
            if node.rect.contains(point) {
                return Some(HitTarget {
                    node: *id,
                    kind: node.kind,
                    parent: node.parent,
                });
            }
        }
        None
    }

    fn create_scene_output(&mut self, output: OutputId) -> WavoResult<NodeId> {
        if self.fail_scene_output.contains(&output) {
            return Err(WavoError::Scene(format!("scene binding refused for {output}")));
        }
        let binding = NodeId::next();
        self.scene_outputs.insert(binding, output);
        Ok(binding)
    }

    fn destroy_scene_output(&mut self, binding: NodeId) {
        self.scene_outputs.remove(&binding);
    }

    fn render_output(&mut self, binding: NodeId) -> WavoResult<()> {
        let output = self
            .scene_outputs
            .get(&binding)
            .ok_or_else(|| WavoError::Render(format!("unknown binding {binding}")))?;
        if self.fail_render.contains(output) {
            return Err(WavoError::Render(format!("swapchain lost on {output}")));
        }
        Ok(())
    }

    fn send_frame_done(&mut self, binding: NodeId, _now: Duration) {
        if let Some(output) = self.scene_outputs.get(&binding) {
            self.events.push(ClientEvent::FrameDone { output: *output });
        }
    }

    fn init_output_render(&mut self, _output: OutputId) -> WavoResult<()> {
        Ok(())
    }

    fn commit_preferred_mode(&mut self, output: OutputId) -> WavoResult<()> {
        if self.fail_mode_commit.contains(&output) {
            return Err(WavoError::Output(format!("mode commit refused on {output}")));
        }
        Ok(())
    }

    fn layout_add_auto(&mut self, output: OutputId) {
        self.layout.insert(output);
    }

    fn layout_remove(&mut self, output: OutputId) {
        self.layout.remove(&output);
    }

    fn enable_output(&mut self, output: OutputId) -> WavoResult<()> {
        if self.fail_enable.contains(&output) {
            return Err(WavoError::Output(format!("enable refused on {output}")));
        }
        Ok(())
    }

    fn set_capabilities(&mut self, caps: SeatCaps) {
        self.caps = caps;
    }

    fn set_active_keyboard(&mut self, keyboard: Option<DeviceId>) {
        self.active_keyboard = keyboard;
    }

    fn set_repeat_info(&mut self, keyboard: DeviceId, rate: i32, delay: i32) {
        self.repeat_info.insert(keyboard, (rate, delay));
    }

    fn pointer_motion(&mut self, time_msec: u32, x: f64, y: f64) {
        self.events.push(ClientEvent::Motion { time_msec, x, y });
    }

    fn pointer_button(&mut self, time_msec: u32, button: u32, state: ButtonState) {
        self.events.push(ClientEvent::Button {
            time_msec,
            button,
            state,
        });
    }

    fn pointer_axis(&mut self, time_msec: u32, event: AxisEvent) {
        self.events.push(ClientEvent::Axis { time_msec, event });
    }

    fn pointer_frame(&mut self) {
        self.events.push(ClientEvent::Frame);
    }

    fn keyboard_key(&mut self, time_msec: u32, keycode: u32, state: KeyState) {
        self.events.push(ClientEvent::Key {
            time_msec,
            keycode,
            state,
        });
    }

    fn keyboard_modifiers(&mut self, modifiers: Modifiers) {
        self.events.push(ClientEvent::Modifiers(modifiers));
    }

    fn is_toplevel(&self, surface: SurfaceHandle) -> bool {
        self.surfaces.get(&surface).is_some_and(|s| s.toplevel)
    }

    fn surface_geometry(&self, surface: SurfaceHandle) -> Rect {
        self.surfaces
            .get(&surface)
            .map(|s| s.geometry)
            .unwrap_or_default()
    }

    fn request_size(&mut self, surface: SurfaceHandle, width: f64, height: f64) {
        self.events.push(ClientEvent::SizeRequested {
            surface,
            width,
            height,
        });
    }

    fn set_activated(&mut self, surface: SurfaceHandle, activated: bool) {
        self.events.push(ClientEvent::Activated { surface, activated });
    }

    fn schedule_configure(&mut self, surface: SurfaceHandle) {
        self.events.push(ClientEvent::Configure { surface });
    }
}

/// Run a short scripted headless session
///
/// Stands in for a real backend the way an ASCII test backend would:
/// attaches devices, maps one view, drives a few frames and shuts down.
pub fn run_headless(config: Config) -> WavoResult<()> {
    let mut backend = HeadlessBackend::new();
    let surface = SurfaceHandle(1);
    backend.add_surface(surface, Rect::new(0.0, 0.0, 640.0, 480.0), true);

    let mut state = WavoState::new(backend, config);
    let output = OutputId(1);

    for event in [
        Event::OutputAdded(output),
        Event::DeviceAdded(DeviceInfo {
            id: DeviceId(1),
            kind: DeviceKind::Keyboard,
            name: "headless-keyboard".to_string(),
        }),
        Event::DeviceAdded(DeviceInfo {
            id: DeviceId(2),
            kind: DeviceKind::Pointer,
            name: "headless-pointer".to_string(),
        }),
        Event::NewToplevel(surface),
        Event::SurfaceMap(surface),
        Event::PointerMotion {
            delta_x: 320.0,
            delta_y: 240.0,
            time_msec: 16,
        },
        Event::OutputFrame(output),
        Event::PointerButton {
            button: crate::input::BTN_LEFT,
            state: ButtonState::Pressed,
            time_msec: 32,
        },
        Event::PointerMotion {
            delta_x: 40.0,
            delta_y: 0.0,
            time_msec: 48,
        },
        Event::PointerButton {
            button: crate::input::BTN_LEFT,
            state: ButtonState::Released,
            time_msec: 64,
        },
        Event::OutputFrame(output),
    ] {
        state.dispatch(event);
    }

    info!(
        "Headless session: {} view(s), {} output(s), {} client event(s) delivered",
        state.views.len(),
        state.outputs.len(),
        state.backend.events().len()
    );
    debug!("Cursor ended at {:?}", state.input.cursor());

    state.shutdown();
    Ok(())
}
