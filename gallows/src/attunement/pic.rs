//! # The Guardian - Chained 8259 PICs
//!
//! Remaps IRQs 0-15 away from the CPU exception vectors and masks every
//! line but the keyboard. The chips are driven through `pic8259`.

use pic8259::ChainedPics;
use spin::Mutex;

use crate::config::{PIC_1_OFFSET, PIC_2_OFFSET};

/// Master input the slave is wired to
const CASCADE_IRQ: u8 = 2;

/// The Guardian - Our Programmable Interrupt Controllers
///
/// Locked by boot code before interrupts are enabled and afterwards only by
/// the keyboard handler, so the lock never spins in interrupt context.
pub static PICS: Mutex<ChainedPics> =
    // SAFETY: the offsets clear the 32 exception vectors and do not overlap
    Mutex::new(unsafe { ChainedPics::new(PIC_1_OFFSET, PIC_2_OFFSET) });

/// The acknowledgement the keyboard handler owes its controller
pub trait EndOfInterrupt {
    fn end_of_interrupt(&mut self);
}

impl EndOfInterrupt for ChainedPics {
    /// Acknowledge on both chips, whichever one raised the line.
    fn end_of_interrupt(&mut self) {
        // A vector in the slave range makes pic8259 notify the slave and
        // then the master.
        // SAFETY: only called at the end of an interrupt handler
        unsafe { self.notify_end_of_interrupt(PIC_2_OFFSET) };
    }
}

/// Run the initialization sequence on both chips (ICW1-ICW4: remap, cascade
/// on IRQ 2, 8086 mode), then leave only `irq` unmasked.
///
/// # Safety
/// Ring 0, interrupts disabled, and nothing else may be driving the PICs.
pub unsafe fn program(pics: &mut ChainedPics, irq: u8) {
    pics.initialize();
    let [master, slave] = masks_enabling_only(irq);
    pics.write_masks(master, slave);
}

/// Masks leaving exactly one IRQ line open (a set bit masks the line).
///
/// A slave line also needs the master's cascade input open.
pub const fn masks_enabling_only(irq: u8) -> [u8; 2] {
    if irq < 8 {
        [!(1 << irq), 0xFF]
    } else {
        [!(1 << CASCADE_IRQ), !(1 << (irq - 8))]
    }
}
