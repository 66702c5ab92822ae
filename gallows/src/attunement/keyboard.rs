//! # Keyboard - The Voice of Intent
//!
//! Body of the keyboard interrupt. It runs with the line blocked by the
//! interrupt gate, never waits and never logs: it reads one scancode,
//! translates it, publishes the result to the mailbox and acknowledges the
//! PICs.

use bitflags::bitflags;

use super::mailbox::Mailbox;
use super::pic::EndOfInterrupt;
use super::port::PortIo;
use crate::config::{KEYBOARD_DATA_PORT, KEYBOARD_STATUS_PORT};

bitflags! {
    /// PS/2 controller status register (port 0x64)
    pub struct StatusFlags: u8 {
        /// A byte is waiting in the data port
        const OUTPUT_FULL = 1 << 0;
        const INPUT_FULL = 1 << 1;
        const SYSTEM = 1 << 2;
        const COMMAND = 1 << 3;
        const TIMEOUT = 1 << 6;
        const PARITY_ERROR = 1 << 7;
    }
}

/// Scan code set 1 make codes 0x00..=0x39, US layout, lowercase.
/// Codes past the end of this prefix map to 0.
const SET1_PREFIX: &[u8] = b"\0\x001234567890-=\x08\0qwertyuiop[]\n\0asdfghjkl;'`\0\\zxcvbnm,./\0*\0 ";

const fn build_table() -> [u8; 128] {
    let mut table = [0u8; 128];
    let mut i = 0;
    while i < SET1_PREFIX.len() {
        table[i] = SET1_PREFIX[i];
        i += 1;
    }
    table
}

/// Scancode to ASCII; 0 means the key has no character
pub static SCANCODE_TABLE: [u8; 128] = build_table();

/// Translate a raw scancode. Break codes (bit 7 set) are outside the
/// table and yield `None`.
pub fn translate(scancode: u8) -> Option<u8> {
    SCANCODE_TABLE.get(scancode as usize).copied()
}

/// What the game may see: uppercase letters and Enter. Everything else
/// becomes 0 so it wipes whatever stale key is still in the mailbox.
pub fn normalize(ascii: u8) -> u8 {
    match ascii {
        b'a'..=b'z' => ascii.to_ascii_uppercase(),
        b'\n' => b'\n',
        _ => 0,
    }
}

/// Called when a keyboard interrupt occurs
pub fn on_interrupt<P: PortIo, C: EndOfInterrupt>(ports: &mut P, pics: &mut C, mailbox: &Mailbox) {
    let status = StatusFlags::from_bits_truncate(ports.read_u8(KEYBOARD_STATUS_PORT));

    // Spurious or already drained: nothing to read
    if status.contains(StatusFlags::OUTPUT_FULL) {
        let scancode = ports.read_u8(KEYBOARD_DATA_PORT);

        // Releases and presses are not told apart; any code below 0x80 counts
        if let Some(ascii) = translate(scancode) {
            mailbox.post(normalize(ascii));
        }
    }

    // CRITICAL: without the EOI no further keyboard interrupt is delivered
    pics.end_of_interrupt();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attunement::mock::{MockPics, MockPorts};

    fn press(scancode: u8, mailbox: &Mailbox) -> (MockPorts, MockPics) {
        let mut ports = MockPorts::new();
        let mut pics = MockPics::default();
        ports.script(0x64, 0x01).script(0x60, scancode);
        on_interrupt(&mut ports, &mut pics, mailbox);
        (ports, pics)
    }

    #[test]
    fn test_table_layout() {
        assert_eq!(translate(0x02), Some(b'1'));
        assert_eq!(translate(0x0E), Some(b'\x08'));
        assert_eq!(translate(0x10), Some(b'q'));
        assert_eq!(translate(0x1C), Some(b'\n'));
        assert_eq!(translate(0x1E), Some(b'a'));
        assert_eq!(translate(0x2B), Some(b'\\'));
        assert_eq!(translate(0x32), Some(b'm'));
        assert_eq!(translate(0x35), Some(b'/'));
        assert_eq!(translate(0x37), Some(b'*'));
        assert_eq!(translate(0x39), Some(b' '));
        assert_eq!(translate(0x3A), Some(0));
        assert_eq!(translate(0x7F), Some(0));
        assert_eq!(translate(0x80), None);
    }

    #[test]
    fn test_letter_is_uppercased() {
        let mailbox = Mailbox::new();
        let (ports, pics) = press(0x2E, &mailbox); // 'c'
        assert_eq!(mailbox.peek(), Some(b'C'));
        assert_eq!(ports.reads(), &[0x64, 0x60]);
        assert_eq!(pics.acknowledged, 1);
    }

    #[test]
    fn test_enter_is_published() {
        let mailbox = Mailbox::new();
        press(0x1C, &mailbox);
        assert_eq!(mailbox.peek(), Some(b'\n'));
    }

    #[test]
    fn test_unmapped_key_clears_stale_key() {
        let mailbox = Mailbox::new();
        mailbox.post(b'A');
        press(0x02, &mailbox); // '1' is not actionable
        assert!(mailbox.is_empty());

        mailbox.post(b'A');
        press(0x2A, &mailbox); // left shift has no mapping
        assert!(mailbox.is_empty());
    }

    #[test]
    fn test_newer_key_overwrites() {
        let mailbox = Mailbox::new();
        press(0x1E, &mailbox); // 'a'
        press(0x30, &mailbox); // 'b'
        assert_eq!(mailbox.peek(), Some(b'B'));
    }

    #[test]
    fn test_break_code_leaves_mailbox() {
        let mailbox = Mailbox::new();
        mailbox.post(b'A');
        let (_, pics) = press(0x9E, &mailbox); // release of 'a'
        assert_eq!(mailbox.peek(), Some(b'A'));
        assert_eq!(pics.acknowledged, 1);
    }

    #[test]
    fn test_empty_output_buffer_only_acknowledges() {
        let mailbox = Mailbox::new();
        mailbox.post(b'Z');
        let mut ports = MockPorts::new();
        let mut pics = MockPics::default();
        ports.script(0x64, 0x1C); // status without OUTPUT_FULL
        on_interrupt(&mut ports, &mut pics, &mailbox);

        assert_eq!(ports.reads(), &[0x64]);
        assert_eq!(pics.acknowledged, 1);
        assert_eq!(mailbox.peek(), Some(b'Z'));
    }
}
