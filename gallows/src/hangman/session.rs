//! Session - one round of hangman
//!
//! Owns the secret, the mask and the guess history. Pure state: drawing
//! goes through `render`, which only needs a writer.

use heapless::Vec;

use super::GameError;
use crate::config::{MAX_GUESSES, MAX_WORD_LEN};
use crate::vga_buffer::Writer;

/// A secret word or its mask
pub type Word = Vec<u8, MAX_WORD_LEN>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Playing,
    Won,
    Lost,
}

/// What a valid guess did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuessOutcome {
    /// Letter was guessed before; nothing changed
    AlreadyTried,
    /// Letter revealed `revealed` positions, round goes on
    Hit { revealed: usize },
    /// Letter is not in the word; one attempt spent
    Miss,
    /// Last hidden letter revealed
    Won,
    /// Last attempt spent
    Lost,
}

pub struct Session {
    secret: Word,
    mask: Word,
    guessed: Vec<u8, MAX_GUESSES>,
    attempts_left: u8,
    hidden: usize,
    placeholder: u8,
}

impl Session {
    /// A fresh round on `secret`: everything hidden, full attempts budget
    pub fn new(secret: &Word, max_attempts: u8, placeholder: u8) -> Session {
        let mut mask = Word::new();
        for _ in 0..secret.len() {
            // Same capacity as the secret
            let _ = mask.push(placeholder);
        }

        Session {
            secret: secret.clone(),
            mask,
            guessed: Vec::new(),
            attempts_left: max_attempts,
            hidden: secret.len(),
            placeholder,
        }
    }

    /// A session with no word, standing in until the first reset
    pub fn blank(placeholder: u8) -> Session {
        Session::new(&Word::new(), 0, placeholder)
    }

    pub fn phase(&self) -> Phase {
        if self.hidden == 0 {
            Phase::Won
        } else if self.attempts_left == 0 {
            Phase::Lost
        } else {
            Phase::Playing
        }
    }

    pub fn secret(&self) -> &[u8] {
        &self.secret
    }

    pub fn mask(&self) -> &[u8] {
        &self.mask
    }

    /// Letters tried this round, in the order they were tried
    pub fn guessed(&self) -> &[u8] {
        &self.guessed
    }

    pub fn attempts_left(&self) -> u8 {
        self.attempts_left
    }

    /// Letters of the secret still showing the placeholder
    pub fn hidden(&self) -> usize {
        self.hidden
    }

    /// Evaluate one guess. Only valid while playing, only for A-Z.
    pub fn guess(&mut self, letter: u8) -> Result<GuessOutcome, GameError> {
        if self.phase() != Phase::Playing {
            return Err(GameError::RoundOver);
        }
        if !letter.is_ascii_uppercase() {
            return Err(GameError::InvalidLetter(letter));
        }
        if self.guessed.contains(&letter) {
            return Ok(GuessOutcome::AlreadyTried);
        }

        // 26 slots for at most 26 distinct letters
        let _ = self.guessed.push(letter);

        let placeholder = self.placeholder;
        let mut revealed = 0;
        for (secret, shown) in self.secret.iter().zip(self.mask.iter_mut()) {
            if *secret == letter && *shown == placeholder {
                *shown = letter;
                revealed += 1;
            }
        }

        self.hidden -= revealed;
        if revealed == 0 {
            self.attempts_left -= 1;
        }

        Ok(match self.phase() {
            Phase::Won => GuessOutcome::Won,
            Phase::Lost => GuessOutcome::Lost,
            Phase::Playing if revealed > 0 => GuessOutcome::Hit { revealed },
            Phase::Playing => GuessOutcome::Miss,
        })
    }

    /// Draw the whole round from scratch
    pub fn render(&self, screen: &mut Writer) {
        screen.clear();
        screen.put_str("= KERNEL HANGMAN (Attempts: ");
        // Budget is 1-9, validated when the console is built
        screen.put_char(b'0' + self.attempts_left);
        screen.put_str(") =\n\n");

        screen.put_str("Word: ");
        for &c in self.mask.iter() {
            screen.put_char(c);
            screen.put_char(b' ');
        }
        screen.put_str("\n\n");

        screen.put_str("Guessed: ");
        for &c in self.guessed.iter() {
            screen.put_char(c);
            screen.put_char(b' ');
        }
        screen.put_str("\n\n");

        match self.phase() {
            Phase::Playing => screen.put_str("Guess a letter (A-Z): "),
            Phase::Won => self.render_ending(screen, "\nYOU WON! The word was: "),
            Phase::Lost => self.render_ending(screen, "\nYOU LOST! The word was: "),
        }
    }

    fn render_ending(&self, screen: &mut Writer, verdict: &str) {
        screen.put_str(verdict);
        for &c in self.secret.iter() {
            screen.put_char(c);
        }
        screen.put_str("\nPress Enter to play again.");
    }
}
