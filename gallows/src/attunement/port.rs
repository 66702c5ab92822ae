//! # Port I/O - The Narrow Gate
//!
//! Every byte the keyboard pipeline reads from the PS/2 controller crosses
//! this trait. The kernel uses `HardwarePorts`; tests substitute a scripted
//! bus.

use x86_64::instructions::port::Port;

/// Byte reads from numbered I/O ports
pub trait PortIo {
    fn read_u8(&mut self, port: u16) -> u8;
}

/// Real `in` instructions
pub struct HardwarePorts {
    _private: (),
}

impl HardwarePorts {
    /// # Safety
    /// Port reads can have side effects (reading 0x60 drains the controller).
    /// The caller must run in ring 0 and own every device it addresses.
    pub const unsafe fn new() -> Self {
        HardwarePorts { _private: () }
    }
}

impl PortIo for HardwarePorts {
    fn read_u8(&mut self, port: u16) -> u8 {
        // SAFETY: upheld by the caller of `HardwarePorts::new`
        unsafe { Port::<u8>::new(port).read() }
    }
}
