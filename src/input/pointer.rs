//! Pointer device wrapper

use crate::backend::DeviceId;

/// One attached pointer device
///
/// All pointers feed the single logical cursor; the wrapper only tracks
/// membership so removal notifications can be matched to a device.
#[derive(Debug)]
pub struct Pointer {
    pub id: DeviceId,
    pub name: String,
}

impl Pointer {
    pub fn new(id: DeviceId, name: String) -> Self {
        Self { id, name }
    }
}
