//! Keyboard device wrapper

use crate::backend::DeviceId;

/// One attached keyboard
///
/// Key repeat configuration is pushed to the device at attach time from
/// the loaded configuration; the wrapper records what was applied.
#[derive(Debug)]
pub struct Keyboard {
    pub id: DeviceId,
    pub name: String,
    pub repeat_rate: i32,
    pub repeat_delay: i32,
}

impl Keyboard {
    pub fn new(id: DeviceId, name: String, repeat_rate: i32, repeat_delay: i32) -> Self {
        Self {
            id,
            name,
            repeat_rate,
            repeat_delay,
        }
    }
}
