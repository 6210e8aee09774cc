//! Central compositor state
//!
//! One `WavoState` exists per session. All collaborator notifications are
//! dispatched through it, one event at a time; handlers never block and
//! never run concurrently, so the state needs no synchronization.

use std::time::Instant;

use tracing::info;

use crate::backend::Backend;
use crate::config::Config;
use crate::event::Event;
use crate::input::InputManager;
use crate::output::OutputManager;
use crate::shell::ViewRegistry;

/// The compositor core
pub struct WavoState<B: Backend> {
    pub backend: B,
    pub config: Config,
    /// Seat state: devices, cursor, grab slot
    pub input: InputManager,
    pub views: ViewRegistry,
    pub outputs: OutputManager,
    /// Monotonic session clock for presentation feedback
    pub(crate) clock: Instant,
}

impl<B: Backend> WavoState<B> {
    pub fn new(backend: B, config: Config) -> Self {
        info!("Compositor core starting on seat {}", backend.seat_name());
        Self {
            backend,
            config,
            input: InputManager::new(),
            views: ViewRegistry::new(),
            outputs: OutputManager::new(),
            clock: Instant::now(),
        }
    }

    /// Process one event to completion
    ///
    /// Events must be fed strictly in arrival order from a single queue.
    pub fn dispatch(&mut self, event: Event) {
        match event {
            Event::DeviceAdded(device) => self.handle_device_added(device),
            Event::DeviceRemoved(id) => self.handle_device_removed(id),
            Event::PointerMotion {
                delta_x,
                delta_y,
                time_msec,
            } => self.handle_pointer_motion(delta_x, delta_y, time_msec),
            Event::PointerMotionAbsolute { x, y, time_msec } => {
                self.handle_pointer_motion_absolute(x, y, time_msec)
            }
            Event::PointerButton {
                button,
                state,
                time_msec,
            } => self.handle_pointer_button(button, state, time_msec),
            Event::PointerAxis { event, time_msec } => self.handle_pointer_axis(event, time_msec),
            Event::PointerFrame => self.handle_pointer_frame(),
            Event::KeyboardKey {
                device,
                keycode,
                state,
                time_msec,
            } => self.handle_keyboard_key(device, keycode, state, time_msec),
            Event::KeyboardModifiers { device, modifiers } => {
                self.handle_keyboard_modifiers(device, modifiers)
            }
            Event::NewToplevel(surface) => self.handle_new_toplevel(surface),
            Event::SurfaceMap(surface) => self.handle_surface_map(surface),
            Event::SurfaceUnmap(surface) => self.handle_surface_unmap(surface),
            Event::SurfaceDestroy(surface) => self.handle_surface_destroy(surface),
            Event::RequestMove(surface) => self.handle_request_move(surface),
            Event::RequestResize { surface, edges } => {
                self.handle_request_resize(surface, edges)
            }
            Event::RequestMaximize(surface) => self.handle_request_maximize(surface),
            Event::RequestFullscreen(surface) => self.handle_request_fullscreen(surface),
            Event::OutputAdded(id) => self.handle_output_added(id),
            Event::OutputFrame(id) => self.handle_output_frame(id),
            Event::OutputRemoved(id) => self.handle_output_removed(id),
        }
    }

    /// Tear down owned resources in dependency order
    ///
    /// Input state first, then views and their scene nodes, then output
    /// bindings. The backend's own resources outlive the core and are
    /// released by whoever constructed it.
    pub fn shutdown(&mut self) {
        info!("Compositor core shutting down");

        let _ = self.input.take_grab();
        self.backend.set_active_keyboard(None);

        let view_ids: Vec<_> = self.views.mapped_views().collect();
        for id in view_ids {
            if let Some(node) = self.views.mark_unmapped(id) {
                self.backend.destroy_node(node);
            }
        }

        let output_ids: Vec<_> = self.outputs.ids().collect();
        for id in output_ids {
            self.handle_output_removed(id);
        }
    }
}
