//! Output lifecycle and the frame cycle
//!
//! Each physical display gets a scene-output binding and is placed in the
//! output layout. Setup is a sequence of fallible steps; a failure at any
//! step releases exactly the resources acquired so far, in reverse order,
//! and leaves other outputs untouched.

use std::collections::HashMap;

use tracing::{debug, error, warn};

use crate::backend::{Backend, NodeId, OutputId};
use crate::error::WavoResult;
use crate::state::WavoState;

/// One active physical display
#[derive(Debug)]
pub struct OutputWrapper {
    pub id: OutputId,
    /// Scene-output binding driving render and presentation
    pub scene_output: NodeId,
}

/// Registry of active outputs
#[derive(Debug, Default)]
pub struct OutputManager {
    outputs: HashMap<OutputId, OutputWrapper>,
}

impl OutputManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: OutputId) -> Option<&OutputWrapper> {
        self.outputs.get(&id)
    }

    pub fn len(&self) -> usize {
        self.outputs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outputs.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = OutputId> + '_ {
        self.outputs.keys().copied()
    }
}

/// Tracks partially constructed output state during setup
///
/// `release` unwinds whatever `setup` acquired before failing, newest
/// acquisition first.
struct PendingOutput {
    id: OutputId,
    scene_output: Option<NodeId>,
    in_layout: bool,
}

impl PendingOutput {
    fn new(id: OutputId) -> Self {
        Self {
            id,
            scene_output: None,
            in_layout: false,
        }
    }

    fn setup<B: Backend>(&mut self, backend: &mut B) -> WavoResult<()> {
        backend.init_output_render(self.id)?;
        backend.commit_preferred_mode(self.id)?;
        self.scene_output = Some(backend.create_scene_output(self.id)?);
        backend.layout_add_auto(self.id);
        self.in_layout = true;
        backend.enable_output(self.id)?;
        Ok(())
    }

    fn release<B: Backend>(self, backend: &mut B) {
        if self.in_layout {
            backend.layout_remove(self.id);
        }
        if let Some(binding) = self.scene_output {
            backend.destroy_scene_output(binding);
        }
    }

    fn finish(self) -> OutputWrapper {
        OutputWrapper {
            id: self.id,
            // setup() populated this before it could return Ok
            scene_output: self.scene_output.expect("finished output without binding"),
        }
    }
}

impl<B: Backend> WavoState<B> {
    /// A new physical display appeared
    pub fn handle_output_added(&mut self, id: OutputId) {
        if self.outputs.outputs.contains_key(&id) {
            warn!("Duplicate add for {id}, ignoring");
            return;
        }
        let mut pending = PendingOutput::new(id);
        match pending.setup(&mut self.backend) {
            Ok(()) => {
                debug!("Enabled {id}");
                self.outputs.outputs.insert(id, pending.finish());
            }
            Err(err) => {
                error!("Failed to set up {id}: {err}");
                pending.release(&mut self.backend);
            }
        }
    }

    /// The output is ready for its next frame
    ///
    /// A render failure skips only this cycle's frame-done notification;
    /// the next frame proceeds normally.
    pub fn handle_output_frame(&mut self, id: OutputId) {
        let Some(output) = self.outputs.outputs.get(&id) else {
            debug!("Frame for unknown {id}, ignoring");
            return;
        };
        let binding = output.scene_output;
        let now = self.clock.elapsed();
        if let Err(err) = self.backend.render_output(binding) {
            error!("Failed to render {id}: {err}");
            return;
        }
        self.backend.send_frame_done(binding, now);
    }

    /// The display was disconnected
    pub fn handle_output_removed(&mut self, id: OutputId) {
        let Some(output) = self.outputs.outputs.remove(&id) else {
            debug!("Removal for unknown {id}, ignoring");
            return;
        };
        self.backend.layout_remove(id);
        self.backend.destroy_scene_output(output.scene_output);
    }
}
