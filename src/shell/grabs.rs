//! Interactive move and resize grabs
//!
//! At most one grab exists per seat. While it is active the seat router
//! feeds it cursor updates instead of forwarding motion to clients; any
//! button release ends it. The grab is owned exclusively by the input
//! manager's grab slot and never referenced from anywhere else.

use tracing::{debug, warn};

use crate::backend::Backend;
use crate::shell::ViewId;
use crate::state::WavoState;
use crate::utils::{Point, Rect};

/// Views are never resized below this, in screen units
pub const MIN_VIEW_SIZE: f64 = 50.0;

bitflags::bitflags! {
    /// Which edges of a view a resize drags
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ResizeEdges: u32 {
        const TOP = 1;
        const BOTTOM = 2;
        const LEFT = 4;
        const RIGHT = 8;
    }
}

/// An in-progress interactive move
#[derive(Debug)]
pub struct MoveGrab {
    pub view: ViewId,
    /// Cursor position at the last update; deltas apply incrementally
    pub anchor: Point,
}

/// An in-progress interactive resize
#[derive(Debug)]
pub struct ResizeGrab {
    pub view: ViewId,
    /// Cursor position at grab start; deltas are cumulative from here
    pub anchor: Point,
    /// View geometry captured at grab start
    pub start_geometry: Rect,
    pub edges: ResizeEdges,
}

impl ResizeGrab {
    /// Derive the geometry for a cumulative drag of `(dx, dy)`
    ///
    /// Top/bottom and left/right are mutually exclusive per update; a
    /// diagonal resize combines one edge of each pair. Both dimensions are
    /// clamped to [`MIN_VIEW_SIZE`] before the client is asked to resize.
    pub fn geometry_for_delta(&self, dx: f64, dy: f64) -> Rect {
        let start = self.start_geometry;
        let mut geo = start;

        if self.edges.contains(ResizeEdges::TOP) {
            geo.y = start.y + dy;
            geo.height = start.height - dy;
        } else if self.edges.contains(ResizeEdges::BOTTOM) {
            geo.height = start.height + dy;
        }
        if self.edges.contains(ResizeEdges::LEFT) {
            geo.x = start.x + dx;
            geo.width = start.width - dx;
        } else if self.edges.contains(ResizeEdges::RIGHT) {
            geo.width = start.width + dx;
        }

        geo.width = geo.width.max(MIN_VIEW_SIZE);
        geo.height = geo.height.max(MIN_VIEW_SIZE);
        geo
    }
}

/// The one interactive operation a seat may run
#[derive(Debug)]
pub enum SeatGrab {
    Move(MoveGrab),
    Resize(ResizeGrab),
}

impl<B: Backend> WavoState<B> {
    /// Begin an interactive move anchored at the current cursor position
    ///
    /// A no-op while another grab is active.
    pub fn start_move_grab(&mut self, view: ViewId) {
        if self.input.grab().is_some() {
            debug!("Grab already active, dropping move request for {view}");
            return;
        }
        if self.views.get(view).is_none() {
            warn!("Move request for missing {view}");
            return;
        }
        let anchor = self.input.cursor();
        self.input.set_grab(SeatGrab::Move(MoveGrab { view, anchor }));
    }

    /// Begin an interactive resize, capturing the view's current geometry
    ///
    /// A no-op while another grab is active.
    pub fn start_resize_grab(&mut self, view: ViewId, edges: ResizeEdges) {
        if self.input.grab().is_some() {
            debug!("Grab already active, dropping resize request for {view}");
            return;
        }
        let Some(v) = self.views.get(view) else {
            warn!("Resize request for missing {view}");
            return;
        };
        let start_geometry = self.backend.surface_geometry(v.surface);
        let anchor = self.input.cursor();
        self.input.set_grab(SeatGrab::Resize(ResizeGrab {
            view,
            anchor,
            start_geometry,
            edges,
        }));
    }

    /// Feed the current cursor position to the active grab
    pub(crate) fn update_grab(&mut self, cursor: Point) {
        let Some(grab) = self.input.grab_mut() else {
            return;
        };
        match grab {
            SeatGrab::Move(grab) => {
                let dx = cursor.x - grab.anchor.x;
                let dy = cursor.y - grab.anchor.y;
                grab.anchor = cursor;
                let view = grab.view;
                let Some(view) = self.views.get_mut(view) else {
                    warn!("Move grab on vanished view");
                    return;
                };
                view.position = view.position.offset(dx, dy);
                if let Some(node) = view.node {
                    self.backend.set_node_position(node, view.position);
                }
            }
            SeatGrab::Resize(grab) => {
                let dx = cursor.x - grab.anchor.x;
                let dy = cursor.y - grab.anchor.y;
                let geo = grab.geometry_for_delta(dx, dy);
                let view = grab.view;
                let Some(view) = self.views.get(view) else {
                    warn!("Resize grab on vanished view");
                    return;
                };
                // The client applies the new size asynchronously with its
                // next buffer commit.
                self.backend.request_size(view.surface, geo.width, geo.height);
            }
        }
    }
}
