//! # The Gallows - A Hangman Kernel
//!
//! A bare-metal x86_64 kernel that does one thing: plays hangman on the VGA
//! text screen with input from the PS/2 keyboard.
//!
//! The library holds everything; the binary only hands the bootloader's
//! entry point to `kernel_main`. Host test builds link `std` for the test
//! harness and never touch real hardware.

#![no_std]
#![feature(abi_x86_interrupt)]

#[cfg(test)]
extern crate std;

pub mod attunement; // Interrupts, PICs and the keyboard
pub mod config;
pub mod drivers; // Serial diagnostics
pub mod hangman;
pub mod vga_buffer;
pub mod vigil; // The main loop

pub use config::GameConfig;
pub use hangman::{GameError, GuessOutcome, Phase};
pub use vigil::Console;

/// The kernel proper, entered once the bootloader has us in long mode
pub fn kernel_main() -> ! {
    drivers::serial::init();
    crate::serial_println!("[BOOT] The Gallows awakens");

    let mut console = match Console::new(GameConfig::DEFAULT, &vga_buffer::WRITER, &attunement::MAILBOX) {
        Ok(console) => console,
        Err(e) => {
            crate::serial_println!("[BOOT] Invalid game configuration: {}", e);
            crate::println!("Invalid game configuration: {}", e);
            hlt_loop();
        }
    };

    // Draw the first board before any key can arrive
    console.reset();
    attunement::init();

    crate::serial_println!("[BOOT] Ready");
    console.run()
}

/// Halt forever
pub fn hlt_loop() -> ! {
    loop {
        x86_64::instructions::hlt();
    }
}

#[cfg(not(test))]
#[panic_handler]
fn panic(info: &core::panic::PanicInfo) -> ! {
    use core::fmt::Write;

    x86_64::instructions::interrupts::disable();
    drivers::serial::emergency_print(format_args!("\n[PANIC] {}\n", info));

    // The panicking code may hold the screen; only draw if it is free
    if let Some(mut screen) = vga_buffer::WRITER.try_lock() {
        let _ = write!(screen, "\nKERNEL PANIC: {}", info);
    }

    hlt_loop()
}
