//! # The Laws of Reaction - Interrupt Descriptor Table
//!
//! Using the x86_64 crate's table. Only the keyboard vector is ever
//! populated; every other slot stays missing (not present), so a stray
//! vector faults instead of running garbage.

use lazy_static::lazy_static;
use x86_64::structures::idt::{InterruptDescriptorTable, InterruptStackFrame};

use super::port::HardwarePorts;
use crate::config::KEYBOARD_VECTOR;

lazy_static! {
    static ref IDT: InterruptDescriptorTable = {
        let mut idt = InterruptDescriptorTable::new();
        // The Keyboard Spell - IRQ 1 = Interrupt 0x21
        idt[KEYBOARD_VECTOR as usize].set_handler_fn(keyboard_entry);
        idt
    };
}

/// Build the table (idempotent)
pub fn build() {
    lazy_static::initialize(&IDT);
}

/// Load the table into the CPU
pub fn load() {
    IDT.load();
}

/// The Keyboard Interrupt Handler - The Spell of Perception
///
/// The x86-interrupt ABI saves and restores machine state and returns with
/// `iretq`; the body only forwards to the keyboard pipeline.
extern "x86-interrupt" fn keyboard_entry(_stack_frame: InterruptStackFrame) {
    // SAFETY: we are the keyboard interrupt; the PS/2 controller is ours
    // to read.
    let mut ports = unsafe { HardwarePorts::new() };
    super::keyboard::on_interrupt(&mut ports, &mut *super::PICS.lock(), &super::MAILBOX);
}

#[cfg(test)]
mod tests {
    use super::*;
    use x86_64::structures::idt::Entry;

    #[test]
    fn test_only_keyboard_vector_populated() {
        build();
        assert!(IDT[KEYBOARD_VECTOR as usize] != Entry::missing());

        for vector in 32..256 {
            if vector != KEYBOARD_VECTOR as usize {
                assert!(IDT[vector] == Entry::missing(), "vector {:#x} is present", vector);
            }
        }

        assert!(IDT.divide_error == Entry::missing());
        assert!(IDT.breakpoint == Entry::missing());
        assert!(IDT.page_fault == Entry::missing());
        assert!(IDT.double_fault == Entry::missing());
        assert!(IDT.general_protection_fault == Entry::missing());
    }
}
