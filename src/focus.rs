//! Hit-testing screen coordinates against the scene
//!
//! The scene engine answers "which node is topmost here"; the resolver
//! turns that into a view by requiring a drawable buffer node, walking to
//! its enclosing group and looking the group up in the view registry's
//! node side table.

use tracing::debug;

use crate::backend::{Backend, NodeKind};
use crate::shell::ViewId;
use crate::state::WavoState;
use crate::utils::Point;

impl<B: Backend> WavoState<B> {
    /// The mapped view under the given screen coordinate, if any
    pub fn view_under(&self, point: Point) -> Option<ViewId> {
        let hit = self.backend.node_at(point.x, point.y)?;
        if hit.kind != NodeKind::Buffer {
            return None;
        }
        let group = hit.parent?;
        let view = self.views.view_for_node(group);
        if view.is_none() {
            debug!("Buffer node {} has no view group", hit.node);
        }
        view
    }
}
