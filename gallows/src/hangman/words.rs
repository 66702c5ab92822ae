//! Word pool - validated once, then handed out round-robin

use heapless::Vec;

use super::session::Word;
use super::GameError;
use crate::config::{MAX_POOL_WORDS, MAX_WORD_LEN};

pub struct WordPool {
    words: Vec<Word, MAX_POOL_WORDS>,
    next: usize,
}

impl WordPool {
    pub fn new(words: &[&str]) -> Result<WordPool, GameError> {
        if words.is_empty() {
            return Err(GameError::EmptyWordPool);
        }

        let mut pool = Vec::new();
        for word in words {
            pool.push(parse_word(word)?).map_err(|_| GameError::TooManyWords)?;
        }

        Ok(WordPool { words: pool, next: 0 })
    }

    /// The word for the next round; advances the rotation
    pub fn next_word(&mut self) -> &Word {
        let index = self.next;
        self.next = (self.next + 1) % self.words.len();
        &self.words[index]
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }
}

fn parse_word(word: &str) -> Result<Word, GameError> {
    let bytes = word.as_bytes();
    if bytes.is_empty() {
        return Err(GameError::EmptyWord);
    }
    if bytes.len() > MAX_WORD_LEN {
        return Err(GameError::WordTooLong { len: bytes.len() });
    }
    if let Some(&bad) = bytes.iter().find(|b| !b.is_ascii_uppercase()) {
        return Err(GameError::InvalidWordCharacter(bad));
    }

    // Length was checked above
    Word::from_slice(bytes).map_err(|_| GameError::WordTooLong { len: bytes.len() })
}
