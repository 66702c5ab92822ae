//! # The Attunement Layer
//!
//! The Grand Design: Four Quests to Enable Keyboard Input
//! 1. The Law (IDT) - one gate, for the keyboard vector
//! 2. The Guardian (PIC) - remap both chips past the exception vectors
//! 3. The Silence - mask every line but IRQ 1
//! 4. The Binding - load the table and open the gates

pub mod idt;
pub mod keyboard;
pub mod mailbox;
pub mod pic;
pub mod port;

#[cfg(test)]
pub(crate) mod mock;

pub use mailbox::Mailbox;
pub use pic::{EndOfInterrupt, PICS};
pub use port::{HardwarePorts, PortIo};

use crate::config::{KEYBOARD_IRQ, KEYBOARD_VECTOR, PIC_1_OFFSET, PIC_2_OFFSET};

/// The single slot between the keyboard interrupt and the main loop
pub static MAILBOX: Mailbox = Mailbox::new();

/// Initialize the Attunement Layer. Runs once, with interrupts still off.
pub fn init() {
    crate::serial_println!("[ATTUNEMENT] Starting attunement sequence...");

    // Quest 1: Scribe the Law
    idt::build();
    crate::serial_println!("[ATTUNEMENT] Keyboard gate written at vector {:#x}", KEYBOARD_VECTOR);

    // Quests 2 and 3: Tame the Guardian
    // SAFETY: boot runs in ring 0 with interrupts off and nothing else owns
    // the PICs yet
    unsafe { pic::program(&mut PICS.lock(), KEYBOARD_IRQ) };
    crate::serial_println!(
        "[ATTUNEMENT] PICs remapped to {:#x}/{:#x}, only IRQ {} unmasked",
        PIC_1_OFFSET,
        PIC_2_OFFSET,
        KEYBOARD_IRQ
    );

    // Quest 4: Bind the table and open the gates
    idt::load();
    x86_64::instructions::interrupts::enable();
    crate::serial_println!("[ATTUNEMENT] Interrupts enabled");
}
