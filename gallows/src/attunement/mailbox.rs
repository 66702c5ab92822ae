//! # The Mailbox - One Slot Between Two Worlds
//!
//! The keyboard interrupt publishes here and the main loop drains it. The
//! slot holds a single byte, 0 meaning empty; a newer keystroke overwrites
//! an undrained one.

use core::sync::atomic::{AtomicU8, Ordering};

pub struct Mailbox {
    slot: AtomicU8,
}

impl Mailbox {
    pub const fn new() -> Self {
        Mailbox {
            slot: AtomicU8::new(0),
        }
    }

    /// Overwrite the slot. Posting 0 empties it.
    pub fn post(&self, key: u8) {
        self.slot.store(key, Ordering::Release);
    }

    /// The pending key, if any, left in place
    pub fn peek(&self) -> Option<u8> {
        match self.slot.load(Ordering::Acquire) {
            0 => None,
            key => Some(key),
        }
    }

    pub fn clear(&self) {
        self.slot.store(0, Ordering::Release);
    }

    pub fn is_empty(&self) -> bool {
        self.peek().is_none()
    }
}
