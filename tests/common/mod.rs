//! Common testing utilities for wavo integration tests

use wavo::backend::headless::{ClientEvent, HeadlessBackend};
use wavo::backend::{ButtonState, DeviceId, OutputId};
use wavo::config::Config;
use wavo::event::Event;
use wavo::input::{DeviceInfo, DeviceKind, BTN_LEFT};
use wavo::shell::{SurfaceHandle, ViewId};
use wavo::utils::Rect;
use wavo::WavoState;

/// A compositor core wired to the headless backend
pub struct TestCompositor {
    pub state: WavoState<HeadlessBackend>,
}

#[allow(dead_code)]
impl TestCompositor {
    pub fn new() -> Self {
        Self {
            state: WavoState::new(HeadlessBackend::new(), Config::default()),
        }
    }

    pub fn with_config(config: Config) -> Self {
        Self {
            state: WavoState::new(HeadlessBackend::new(), config),
        }
    }

    pub fn dispatch(&mut self, event: Event) {
        self.state.dispatch(event);
    }

    pub fn add_keyboard(&mut self, id: u64) -> DeviceId {
        let device = DeviceId(id);
        self.dispatch(Event::DeviceAdded(DeviceInfo {
            id: device,
            kind: DeviceKind::Keyboard,
            name: format!("test-keyboard-{id}"),
        }));
        device
    }

    pub fn add_pointer(&mut self, id: u64) -> DeviceId {
        let device = DeviceId(id);
        self.dispatch(Event::DeviceAdded(DeviceInfo {
            id: device,
            kind: DeviceKind::Pointer,
            name: format!("test-pointer-{id}"),
        }));
        device
    }

    pub fn add_output(&mut self, id: u64) -> OutputId {
        let output = OutputId(id);
        self.dispatch(Event::OutputAdded(output));
        output
    }

    /// Announce a toplevel surface with the given committed geometry and
    /// map it, returning the resulting view
    pub fn map_view(&mut self, surface_id: u64, geometry: Rect) -> ViewId {
        let surface = SurfaceHandle(surface_id);
        self.state.backend.add_surface(surface, geometry, true);
        self.dispatch(Event::NewToplevel(surface));
        self.dispatch(Event::SurfaceMap(surface));
        self.state
            .views
            .view_for_surface(surface)
            .expect("view was not created for mapped surface")
    }

    /// Move the cursor to an absolute position
    pub fn warp_cursor(&mut self, x: f64, y: f64) {
        self.dispatch(Event::PointerMotionAbsolute {
            x,
            y,
            time_msec: 0,
        });
    }

    pub fn press_left(&mut self) {
        self.dispatch(Event::PointerButton {
            button: BTN_LEFT,
            state: ButtonState::Pressed,
            time_msec: 0,
        });
    }

    pub fn release(&mut self, button: u32) {
        self.dispatch(Event::PointerButton {
            button,
            state: ButtonState::Released,
            time_msec: 0,
        });
    }

    pub fn take_events(&mut self) -> Vec<ClientEvent> {
        self.state.backend.take_events()
    }
}
