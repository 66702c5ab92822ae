#![no_std]
#![no_main]

//! # The Gallows
//!
//! Boot stub. The bootloader switches to long mode, identity-maps the VGA
//! buffer and jumps here; everything else lives in the library.

use bootloader::{entry_point, BootInfo};

entry_point!(start);

fn start(_boot_info: &'static BootInfo) -> ! {
    gallows::kernel_main()
}
