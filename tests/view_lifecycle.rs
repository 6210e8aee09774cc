//! View lifecycle: create, map, unmap, re-map, destroy, hit-testing

mod common;
use common::TestCompositor;

use wavo::backend::headless::ClientEvent;
use wavo::event::Event;
use wavo::shell::SurfaceHandle;
use wavo::utils::{Point, Rect};

#[test]
fn full_lifecycle_leaves_no_scene_node() {
    let mut comp = TestCompositor::new();
    let surface = SurfaceHandle(1);
    let view = comp.map_view(1, Rect::new(0.0, 0.0, 200.0, 100.0));
    assert!(comp.state.views.get(view).unwrap().mapped);
    assert!(comp.state.backend.node_count() > 0);

    comp.dispatch(Event::SurfaceUnmap(surface));
    let unmapped = comp.state.views.get(view).unwrap();
    assert!(!unmapped.mapped);
    assert!(unmapped.node.is_none());
    assert_eq!(comp.state.backend.node_count(), 0);

    // Re-map is valid and creates a fresh node
    comp.dispatch(Event::SurfaceMap(surface));
    assert!(comp.state.views.get(view).unwrap().mapped);
    assert!(comp.state.backend.node_count() > 0);

    comp.dispatch(Event::SurfaceDestroy(surface));
    assert!(comp.state.views.get(view).is_none());
    assert_eq!(comp.state.backend.node_count(), 0);
    assert!(comp.state.views.is_empty());
}

#[test]
fn map_of_unknown_surface_is_ignored() {
    let mut comp = TestCompositor::new();
    comp.state
        .backend
        .add_surface(SurfaceHandle(5), Rect::new(0.0, 0.0, 100.0, 100.0), true);
    // No NewToplevel was dispatched for this surface
    comp.dispatch(Event::SurfaceMap(SurfaceHandle(5)));
    assert!(comp.state.views.is_empty());
    assert_eq!(comp.state.backend.node_count(), 0);
}

#[test]
fn map_without_toplevel_role_is_aborted() {
    let mut comp = TestCompositor::new();
    let surface = SurfaceHandle(1);
    comp.state
        .backend
        .add_surface(surface, Rect::new(0.0, 0.0, 100.0, 100.0), false);
    comp.dispatch(Event::NewToplevel(surface));
    comp.dispatch(Event::SurfaceMap(surface));

    let view = comp.state.views.view_for_surface(surface).unwrap();
    assert!(!comp.state.views.get(view).unwrap().mapped);
    assert_eq!(comp.state.backend.node_count(), 0);
}

#[test]
fn destroy_while_mapped_cleans_up() {
    let mut comp = TestCompositor::new();
    let surface = SurfaceHandle(1);
    comp.map_view(1, Rect::new(0.0, 0.0, 200.0, 100.0));

    comp.dispatch(Event::SurfaceDestroy(surface));
    assert!(comp.state.views.is_empty());
    assert_eq!(comp.state.backend.node_count(), 0);
    // The typed node table no longer resolves anything
    assert_eq!(comp.state.view_under(Point::new(50.0, 50.0)), None);
}

#[test]
fn hit_test_resolves_mapped_views_only() {
    let mut comp = TestCompositor::new();
    let surface = SurfaceHandle(1);
    let view = comp.map_view(1, Rect::new(0.0, 0.0, 200.0, 100.0));

    assert_eq!(comp.state.view_under(Point::new(10.0, 10.0)), Some(view));
    assert_eq!(comp.state.view_under(Point::new(250.0, 10.0)), None);

    comp.dispatch(Event::SurfaceUnmap(surface));
    assert_eq!(comp.state.view_under(Point::new(10.0, 10.0)), None);
}

#[test]
fn hit_test_returns_the_topmost_view() {
    let mut comp = TestCompositor::new();
    let below = comp.map_view(1, Rect::new(0.0, 0.0, 200.0, 100.0));
    let above = comp.map_view(2, Rect::new(0.0, 0.0, 200.0, 100.0));

    // Both cover the point; the most recently mapped wins
    assert_eq!(comp.state.view_under(Point::new(50.0, 50.0)), Some(above));

    comp.dispatch(Event::SurfaceUnmap(SurfaceHandle(2)));
    assert_eq!(comp.state.view_under(Point::new(50.0, 50.0)), Some(below));
}

#[test]
fn mapped_order_is_most_recent_first() {
    let mut comp = TestCompositor::new();
    let first = comp.map_view(1, Rect::new(0.0, 0.0, 100.0, 100.0));
    let second = comp.map_view(2, Rect::new(0.0, 0.0, 100.0, 100.0));

    let order: Vec<_> = comp.state.views.mapped_views().collect();
    assert_eq!(order, vec![second, first]);
}

#[test]
fn maximize_and_fullscreen_prompt_a_reconfigure() {
    let mut comp = TestCompositor::new();
    let surface = SurfaceHandle(1);
    comp.map_view(1, Rect::new(0.0, 0.0, 200.0, 100.0));
    comp.take_events();

    comp.dispatch(Event::RequestMaximize(surface));
    comp.dispatch(Event::RequestFullscreen(surface));
    assert_eq!(
        comp.take_events(),
        vec![
            ClientEvent::Configure { surface },
            ClientEvent::Configure { surface },
        ]
    );
}

#[test]
fn moved_view_is_hit_at_its_new_position() {
    let mut comp = TestCompositor::new();
    let view = comp.map_view(1, Rect::new(0.0, 0.0, 100.0, 100.0));

    comp.warp_cursor(50.0, 50.0);
    comp.press_left();
    comp.dispatch(Event::PointerMotion {
        delta_x: 300.0,
        delta_y: 0.0,
        time_msec: 0,
    });
    comp.release(wavo::input::BTN_LEFT);

    assert_eq!(comp.state.view_under(Point::new(320.0, 50.0)), Some(view));
    assert_eq!(comp.state.view_under(Point::new(50.0, 50.0)), None);
}
