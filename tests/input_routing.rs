//! Seat routing: capability tracking, grab interception and pass-through

mod common;
use common::TestCompositor;

use wavo::backend::{
    AxisEvent, AxisOrientation, ButtonState, DeviceId, KeyState, Modifiers, SeatCaps,
};
use wavo::event::Event;
use wavo::input::BTN_LEFT;
use wavo::utils::Rect;

#[test]
fn keyboard_capability_tracks_keyboard_collection() {
    let mut comp = TestCompositor::new();

    let kb1 = comp.add_keyboard(1);
    assert!(comp.state.backend.capabilities().contains(SeatCaps::KEYBOARD));

    let kb2 = comp.add_keyboard(2);
    assert!(comp.state.backend.capabilities().contains(SeatCaps::KEYBOARD));

    comp.dispatch(Event::DeviceRemoved(kb1));
    assert!(comp.state.backend.capabilities().contains(SeatCaps::KEYBOARD));

    comp.dispatch(Event::DeviceRemoved(kb2));
    assert!(!comp.state.backend.capabilities().contains(SeatCaps::KEYBOARD));

    comp.add_keyboard(3);
    assert!(comp.state.backend.capabilities().contains(SeatCaps::KEYBOARD));
}

#[test]
fn pointer_capability_is_always_asserted() {
    let mut comp = TestCompositor::new();
    comp.add_pointer(1);
    assert!(comp.state.backend.capabilities().contains(SeatCaps::POINTER));

    comp.dispatch(Event::DeviceRemoved(DeviceId(1)));
    assert!(comp.state.backend.capabilities().contains(SeatCaps::POINTER));
}

#[test]
fn duplicate_device_removal_is_a_noop() {
    let mut comp = TestCompositor::new();
    let kb = comp.add_keyboard(1);
    comp.dispatch(Event::DeviceRemoved(kb));
    comp.dispatch(Event::DeviceRemoved(kb));
    assert_eq!(comp.state.input.keyboard_count(), 0);
    assert!(!comp.state.backend.capabilities().contains(SeatCaps::KEYBOARD));
}

#[test]
fn last_added_keyboard_is_active_and_removal_falls_back() {
    let mut comp = TestCompositor::new();
    let kb1 = comp.add_keyboard(1);
    let kb2 = comp.add_keyboard(2);
    assert_eq!(comp.state.backend.active_keyboard(), Some(kb2));

    comp.dispatch(Event::DeviceRemoved(kb2));
    assert_eq!(comp.state.backend.active_keyboard(), Some(kb1));

    comp.dispatch(Event::DeviceRemoved(kb1));
    assert_eq!(comp.state.backend.active_keyboard(), None);
}

#[test]
fn repeat_info_comes_from_config() {
    let mut config = wavo::config::Config::default();
    config.repeat_rate = 42;
    config.repeat_delay = 200;
    let mut comp = TestCompositor::with_config(config);

    let kb = comp.add_keyboard(1);
    assert_eq!(comp.state.backend.repeat_info(kb), Some((42, 200)));
}

#[test]
fn unknown_device_kind_is_ignored() {
    let mut comp = TestCompositor::new();
    comp.dispatch(Event::DeviceAdded(wavo::input::DeviceInfo {
        id: DeviceId(9),
        kind: wavo::input::DeviceKind::Other,
        name: "touchscreen".to_string(),
    }));
    assert_eq!(comp.state.input.keyboard_count(), 0);
    assert_eq!(comp.state.input.pointer_count(), 0);
    // Capabilities are still recomputed
    assert_eq!(comp.state.backend.capabilities(), SeatCaps::POINTER);
}

#[test]
fn motion_is_forwarded_when_no_grab_is_active() {
    let mut comp = TestCompositor::new();
    comp.dispatch(Event::PointerMotion {
        delta_x: 10.0,
        delta_y: 5.0,
        time_msec: 7,
    });
    comp.dispatch(Event::PointerMotion {
        delta_x: -2.0,
        delta_y: 0.0,
        time_msec: 8,
    });

    use wavo::backend::headless::ClientEvent;
    assert_eq!(
        comp.take_events(),
        vec![
            ClientEvent::Motion {
                time_msec: 7,
                x: 10.0,
                y: 5.0
            },
            ClientEvent::Motion {
                time_msec: 8,
                x: 8.0,
                y: 5.0
            },
        ]
    );
}

#[test]
fn grab_intercepts_motion_but_not_axis() {
    let mut comp = TestCompositor::new();
    comp.map_view(1, Rect::new(0.0, 0.0, 200.0, 100.0));
    comp.warp_cursor(50.0, 50.0);
    comp.press_left();
    assert!(comp.state.input.grab().is_some());
    comp.take_events();

    comp.dispatch(Event::PointerMotion {
        delta_x: 10.0,
        delta_y: 0.0,
        time_msec: 1,
    });
    let axis = AxisEvent {
        orientation: AxisOrientation::Vertical,
        delta: 15.0,
        delta_discrete: 1,
    };
    comp.dispatch(Event::PointerAxis {
        event: axis,
        time_msec: 2,
    });
    comp.dispatch(Event::PointerFrame);

    use wavo::backend::headless::ClientEvent;
    // No Motion event reached the client; scroll passed through
    assert_eq!(
        comp.take_events(),
        vec![
            ClientEvent::Axis {
                time_msec: 2,
                event: axis
            },
            ClientEvent::Frame,
        ]
    );
}

#[test]
fn click_over_view_focuses_and_swallows_the_press() {
    let mut comp = TestCompositor::new();
    let view = comp.map_view(1, Rect::new(0.0, 0.0, 200.0, 100.0));
    let surface = comp.state.views.get(view).unwrap().surface;
    comp.warp_cursor(50.0, 50.0);
    comp.take_events();

    comp.press_left();

    use wavo::backend::headless::ClientEvent;
    assert_eq!(
        comp.take_events(),
        vec![ClientEvent::Activated {
            surface,
            activated: true
        }]
    );
}

#[test]
fn press_over_nothing_does_nothing() {
    let mut comp = TestCompositor::new();
    comp.warp_cursor(500.0, 500.0);
    comp.take_events();
    comp.press_left();
    assert!(comp.take_events().is_empty());
    assert!(comp.state.input.grab().is_none());
}

#[test]
fn release_without_grab_is_forwarded() {
    let mut comp = TestCompositor::new();
    comp.release(BTN_LEFT);

    use wavo::backend::headless::ClientEvent;
    assert_eq!(
        comp.take_events(),
        vec![ClientEvent::Button {
            time_msec: 0,
            button: BTN_LEFT,
            state: ButtonState::Released
        }]
    );
}

#[test]
fn keyboard_events_pass_through_for_known_devices() {
    let mut comp = TestCompositor::new();
    let kb = comp.add_keyboard(1);
    comp.take_events();

    comp.dispatch(Event::KeyboardKey {
        device: kb,
        keycode: 30,
        state: KeyState::Pressed,
        time_msec: 5,
    });
    let mods = Modifiers {
        depressed: 4,
        ..Default::default()
    };
    comp.dispatch(Event::KeyboardModifiers {
        device: kb,
        modifiers: mods,
    });
    // Events from a keyboard we never saw are dropped
    comp.dispatch(Event::KeyboardKey {
        device: DeviceId(99),
        keycode: 31,
        state: KeyState::Pressed,
        time_msec: 6,
    });

    use wavo::backend::headless::ClientEvent;
    assert_eq!(
        comp.take_events(),
        vec![
            ClientEvent::Key {
                time_msec: 5,
                keycode: 30,
                state: KeyState::Pressed
            },
            ClientEvent::Modifiers(mods),
        ]
    );
}
