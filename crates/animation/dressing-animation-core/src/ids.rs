//! Identifiers for controls and parameter slots.
//!
//! Controls are compared by identity, not by content: composing the same
//! `ControlId` twice is a no-op.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct ControlId(pub u32);

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct SlotId(pub u32);

impl fmt::Display for ControlId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "control#{}", self.0)
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "slot#{}", self.0)
    }
}

/// Monotonic allocator for ControlId and SlotId.
#[derive(Default, Debug)]
pub struct IdAllocator {
    next_control: u32,
    next_slot: u32,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn alloc_control(&mut self) -> ControlId {
        let id = ControlId(self.next_control);
        self.next_control = self.next_control.wrapping_add(1);
        id
    }

    #[inline]
    pub fn alloc_slot(&mut self) -> SlotId {
        let id = SlotId(self.next_slot);
        self.next_slot = self.next_slot.wrapping_add(1);
        id
    }
}
