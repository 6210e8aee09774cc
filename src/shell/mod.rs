//! View tracking and lifecycle
//!
//! A view is one client toplevel window. Views are created when the
//! transport announces a new toplevel surface, become mapped when the
//! client commits its first buffer (at which point their scene node
//! exists), may unmap and re-map any number of times, and are destroyed
//! with the surface. A view's scene node exists iff the view is mapped.

pub mod grabs;

use std::collections::HashMap;
use std::fmt;
use std::num::NonZeroU64;
use std::sync::atomic::{AtomicU64, Ordering};

use tracing::{debug, error, warn};

use crate::backend::{Backend, NodeId};
use crate::state::WavoState;
use crate::utils::Point;

pub use grabs::ResizeEdges;

/// Unique identifier for views
///
/// Non-zero so `Option<ViewId>` carries no overhead, unique for the
/// compositor lifetime, and not confusable with other id types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct ViewId(NonZeroU64);

static VIEW_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

impl ViewId {
    /// Generate a new unique view ID
    pub fn next() -> Self {
        let id = VIEW_ID_COUNTER.fetch_add(1, Ordering::Relaxed);
        // The counter starts at 1 and only increments
        ViewId(NonZeroU64::new(id).expect("view id counter overflow"))
    }

    pub fn get(&self) -> u64 {
        self.0.get()
    }
}

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "View({})", self.0)
    }
}

/// Opaque handle for a client surface, assigned by the transport
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct SurfaceHandle(pub u64);

impl fmt::Display for SurfaceHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Surface({})", self.0)
    }
}

/// One client toplevel window
#[derive(Debug)]
pub struct View {
    pub id: ViewId,
    /// Back-reference to the client surface
    pub surface: SurfaceHandle,
    /// Whether the view is currently visible
    pub mapped: bool,
    /// The view's scene group; `Some` iff mapped
    pub node: Option<NodeId>,
    /// Position in screen space
    pub position: Point,
}

impl View {
    pub fn new(surface: SurfaceHandle) -> Self {
        Self {
            id: ViewId::next(),
            surface,
            mapped: false,
            node: None,
            position: Point::default(),
        }
    }
}

/// Central registry for all views in the compositor
///
/// The `node_to_view` side table replaces opaque per-node metadata: the
/// hit-test resolver looks a scene group up here to find its view.
#[derive(Debug, Default)]
pub struct ViewRegistry {
    views: HashMap<ViewId, View>,
    surface_to_view: HashMap<SurfaceHandle, ViewId>,
    node_to_view: HashMap<NodeId, ViewId>,
    /// Mapped views, most recently mapped first
    mapped: Vec<ViewId>,
}

impl ViewRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a freshly created view
    pub fn insert(&mut self, view: View) -> ViewId {
        let id = view.id;
        self.surface_to_view.insert(view.surface, id);
        self.views.insert(id, view);
        id
    }

    /// Remove a view and all its registrations
    pub fn remove(&mut self, id: ViewId) -> Option<View> {
        let view = self.views.remove(&id)?;
        self.surface_to_view.remove(&view.surface);
        if let Some(node) = view.node {
            self.node_to_view.remove(&node);
        }
        self.mapped.retain(|v| *v != id);
        Some(view)
    }

    pub fn get(&self, id: ViewId) -> Option<&View> {
        self.views.get(&id)
    }

    pub fn get_mut(&mut self, id: ViewId) -> Option<&mut View> {
        self.views.get_mut(&id)
    }

    pub fn view_for_surface(&self, surface: SurfaceHandle) -> Option<ViewId> {
        self.surface_to_view.get(&surface).copied()
    }

    pub fn view_for_node(&self, node: NodeId) -> Option<ViewId> {
        self.node_to_view.get(&node).copied()
    }

    /// Record a view as mapped with its new scene node, at stack head
    pub fn mark_mapped(&mut self, id: ViewId, node: NodeId) {
        if let Some(view) = self.views.get_mut(&id) {
            view.mapped = true;
            view.node = Some(node);
            self.node_to_view.insert(node, id);
            self.mapped.insert(0, id);
        }
    }

    /// Record a view as unmapped, returning the node it held
    pub fn mark_unmapped(&mut self, id: ViewId) -> Option<NodeId> {
        let view = self.views.get_mut(&id)?;
        view.mapped = false;
        let node = view.node.take()?;
        self.node_to_view.remove(&node);
        self.mapped.retain(|v| *v != id);
        Some(node)
    }

    /// Mapped views, most recently mapped first
    pub fn mapped_views(&self) -> impl Iterator<Item = ViewId> + '_ {
        self.mapped.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.views.len()
    }

    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }
}

impl<B: Backend> WavoState<B> {
    /// A client created a new toplevel surface
    pub fn handle_new_toplevel(&mut self, surface: SurfaceHandle) {
        if self.views.view_for_surface(surface).is_some() {
            warn!("Duplicate toplevel announcement for {surface}");
            return;
        }
        let view = View::new(surface);
        debug!("New toplevel {surface} as {}", view.id);
        self.views.insert(view);
    }

    /// The surface committed its first buffer and wants to become visible
    pub fn handle_surface_map(&mut self, surface: SurfaceHandle) {
        let Some(id) = self.views.view_for_surface(surface) else {
            debug!("Map for unknown surface {surface}, ignoring");
            return;
        };
        if !self.backend.is_toplevel(surface) {
            error!("Surface {surface} has no toplevel role, not mapping");
            return;
        }
        let Some(view) = self.views.get(id) else {
            return;
        };
        if view.mapped {
            return;
        }
        let position = view.position;
        let node = match self.backend.create_view_node(surface, position) {
            Ok(node) => node,
            Err(err) => {
                error!("Failed to create scene node for {id}: {err}");
                return;
            }
        };
        self.views.mark_mapped(id, node);
    }

    /// The client hid the surface; it may map again later
    pub fn handle_surface_unmap(&mut self, surface: SurfaceHandle) {
        let Some(id) = self.views.view_for_surface(surface) else {
            debug!("Unmap for unknown surface {surface}, ignoring");
            return;
        };
        if let Some(node) = self.views.mark_unmapped(id) {
            self.backend.destroy_node(node);
        }
    }

    /// The client destroyed the surface; the view goes with it
    pub fn handle_surface_destroy(&mut self, surface: SurfaceHandle) {
        let Some(id) = self.views.view_for_surface(surface) else {
            debug!("Destroy for unknown surface {surface}, ignoring");
            return;
        };
        if let Some(view) = self.views.remove(id) {
            if let Some(node) = view.node {
                self.backend.destroy_node(node);
            }
        }
    }

    /// Client-initiated interactive move
    pub fn handle_request_move(&mut self, surface: SurfaceHandle) {
        let Some(id) = self.views.view_for_surface(surface) else {
            debug!("Move request for unknown surface {surface}, ignoring");
            return;
        };
        self.start_move_grab(id);
    }

    /// Client-initiated interactive resize
    pub fn handle_request_resize(&mut self, surface: SurfaceHandle, edges: ResizeEdges) {
        let Some(id) = self.views.view_for_surface(surface) else {
            debug!("Resize request for unknown surface {surface}, ignoring");
            return;
        };
        self.start_resize_grab(id, edges);
    }

    /// Maximize policy is deferred; prompt the client to re-negotiate
    pub fn handle_request_maximize(&mut self, surface: SurfaceHandle) {
        self.backend.schedule_configure(surface);
    }

    /// Fullscreen policy is deferred; prompt the client to re-negotiate
    pub fn handle_request_fullscreen(&mut self, surface: SurfaceHandle) {
        self.backend.schedule_configure(surface);
    }

    /// Set or clear the client-visible activated flag
    pub fn activate(&mut self, id: ViewId, activated: bool) {
        let Some(view) = self.views.get(id) else {
            warn!("Activate for missing {id}");
            return;
        };
        if !self.backend.is_toplevel(view.surface) {
            return;
        }
        self.backend.set_activated(view.surface, activated);
    }
}
