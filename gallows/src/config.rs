//! # Configuration - The Fixed Laws
//!
//! Every tunable of the kernel lives here as a compile-time constant.
//! Nothing is read at runtime: there is no storage to read it from.

/// The standard offset for remapping the PICs
/// IRQs 0-15 become interrupts 32-47
pub const PIC_1_OFFSET: u8 = 0x20;
pub const PIC_2_OFFSET: u8 = PIC_1_OFFSET + 8;

/// The keyboard sits on IRQ 1 of the master PIC
pub const KEYBOARD_IRQ: u8 = 1;

/// Vector the keyboard IRQ lands on after remapping (0x21)
pub const KEYBOARD_VECTOR: u8 = PIC_1_OFFSET + KEYBOARD_IRQ;

/// PS/2 controller ports
pub const KEYBOARD_DATA_PORT: u16 = 0x60;
pub const KEYBOARD_STATUS_PORT: u16 = 0x64;

/// Longest secret word a session can hold
pub const MAX_WORD_LEN: usize = 15;

/// One slot per letter of the alphabet
pub const MAX_GUESSES: usize = 26;

/// Largest word pool the game accepts
pub const MAX_POOL_WORDS: usize = 8;

/// Game tunables
#[derive(Debug, Clone, Copy)]
pub struct GameConfig {
    /// Candidate secret words, picked round-robin
    pub words: &'static [&'static str],
    /// Attempts at the start of each round (rendered as one digit)
    pub max_attempts: u8,
    /// Mask character for letters not yet revealed
    pub placeholder: u8,
}

impl GameConfig {
    pub const DEFAULT: GameConfig = GameConfig {
        words: &["PIRAMIDE", "FURTIVO", "CONCATENACAO"],
        max_attempts: 6,
        placeholder: b'_',
    };
}

// The header prints the attempts counter as a single digit.
const _: () = assert!(GameConfig::DEFAULT.max_attempts <= 9);
const _: () = assert!(GameConfig::DEFAULT.max_attempts > 0);
