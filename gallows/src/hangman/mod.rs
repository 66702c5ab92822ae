//! # Hangman - The Game on the Gallows
//!
//! A round is a secret word, a mask of revealed letters, the letters tried
//! so far and a budget of misses. The session holds that state; the word
//! pool decides which word the next round gets.

pub mod session;
pub mod words;


pub use session::{GuessOutcome, Phase, Session, Word};
pub use words::WordPool;

use core::fmt;

/// Things that can go wrong in the game layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameError {
    /// The configured pool has no words
    EmptyWordPool,
    /// The configured pool has more words than the pool can hold
    TooManyWords,
    /// A configured word is the empty string
    EmptyWord,
    /// A configured word exceeds the session's capacity
    WordTooLong { len: usize },
    /// A configured word contains something other than A-Z
    InvalidWordCharacter(u8),
    /// The attempts budget cannot be shown as one digit
    AttemptsOutOfRange(u8),
    /// The mask character is a control byte or a letter
    InvalidPlaceholder(u8),
    /// A guess that is not an uppercase letter
    InvalidLetter(u8),
    /// A guess after the round was won or lost
    RoundOver,
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            GameError::EmptyWordPool => write!(f, "Word pool is empty"),
            GameError::TooManyWords => write!(f, "Word pool holds at most {} words", crate::config::MAX_POOL_WORDS),
            GameError::EmptyWord => write!(f, "Word pool contains an empty word"),
            GameError::WordTooLong { len } => write!(
                f,
                "Word of {} letters exceeds the limit of {}",
                len,
                crate::config::MAX_WORD_LEN
            ),
            GameError::InvalidWordCharacter(byte) => write!(f, "Word contains invalid character {:#04x}", byte),
            GameError::AttemptsOutOfRange(n) => write!(f, "Attempts must be 1-9, got {}", n),
            GameError::InvalidPlaceholder(byte) => {
                write!(f, "Placeholder {:#04x} must be printable and not a letter A-Z", byte)
            }
            GameError::InvalidLetter(byte) => write!(f, "Guess {:#04x} is not a letter A-Z", byte),
            GameError::RoundOver => write!(f, "The round is over"),
        }
    }
}
