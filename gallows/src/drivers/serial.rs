//! Serial Port Driver (UART 16550)
//!
//! COM1 is the kernel's diagnostic channel: every subsystem logs through
//! `serial_println!` with a bracketed tag, e.g. `[GAME]`.
//!
//! Host test builds never touch the port; the macros print to stderr there.

use core::fmt;
use lazy_static::lazy_static;
use spin::Mutex;
use uart_16550::SerialPort;

/// COM1 base port
const COM1: u16 = 0x3F8;

lazy_static! {
    /// Global serial port instance, initialized on first use
    static ref SERIAL1: Mutex<SerialPort> = {
        // SAFETY: COM1 is a standard port and nothing else drives it.
        let mut serial_port = unsafe { SerialPort::new(COM1) };
        serial_port.init();
        Mutex::new(serial_port)
    };
}

/// Bring up COM1 eagerly so the first log line is not delayed
pub fn init() {
    lazy_static::initialize(&SERIAL1);
}

/// Macro for serial output (like print!)
#[macro_export]
macro_rules! serial_print {
    ($($arg:tt)*) => {
        $crate::drivers::serial::_print(format_args!($($arg)*))
    };
}

/// Macro for serial output with newline (like println!)
#[macro_export]
macro_rules! serial_println {
    () => ($crate::serial_print!("\n"));
    ($($arg:tt)*) => ($crate::serial_print!("{}\n", format_args!($($arg)*)));
}

/// Internal print function for macro
#[doc(hidden)]
#[cfg(not(test))]
pub fn _print(args: fmt::Arguments) {
    use core::fmt::Write;
    // A log line is never worth a fault; drop it if the UART refuses
    let _ = SERIAL1.lock().write_fmt(args);
}

#[doc(hidden)]
#[cfg(test)]
pub fn _print(args: fmt::Arguments) {
    std::eprint!("{}", args);
}

/// Write a panic report without waiting on a lock the panicking code may hold
pub fn emergency_print(args: fmt::Arguments) {
    use core::fmt::Write;
    if let Some(mut serial) = SERIAL1.try_lock() {
        let _ = serial.write_fmt(args);
    }
}
