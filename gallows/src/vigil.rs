//! # The Vigil - The Kernel's Waking Loop
//!
//! The console is the one piece of long-lived game state: the word pool,
//! the round in progress and the two things it borrows from the world (the
//! screen and the keyboard mailbox). The loop drains the mailbox one key at
//! a time and sleeps with `hlt` while it is empty.

use spin::Mutex;
use x86_64::instructions::interrupts;

use crate::attunement::Mailbox;
use crate::config::GameConfig;
use crate::hangman::{GameError, GuessOutcome, Phase, Session, WordPool};
use crate::vga_buffer::Writer;

/// Shown under the board when a letter is guessed twice
pub const ALREADY_TRIED_NOTICE: &str = "\nThat letter was already tried! Pick another.\n";

pub struct Console<'a> {
    pool: WordPool,
    session: Session,
    config: GameConfig,
    screen: &'a Mutex<Writer>,
    mailbox: &'a Mailbox,
}

impl<'a> Console<'a> {
    /// Validate `config` and bind the console to its screen and mailbox.
    /// Nothing is drawn until the first `reset`.
    pub fn new(config: GameConfig, screen: &'a Mutex<Writer>, mailbox: &'a Mailbox) -> Result<Self, GameError> {
        if !(1..=9).contains(&config.max_attempts) {
            return Err(GameError::AttemptsOutOfRange(config.max_attempts));
        }
        // Drawn once per hidden letter: it must take exactly one cell and
        // must not pass for a revealed letter
        let placeholder = config.placeholder;
        if !(b' '..=b'~').contains(&placeholder) || placeholder.is_ascii_uppercase() {
            return Err(GameError::InvalidPlaceholder(placeholder));
        }
        let pool = WordPool::new(config.words)?;

        Ok(Console {
            pool,
            session: Session::blank(config.placeholder),
            config,
            screen,
            mailbox,
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Start a new round on the next word of the pool
    pub fn reset(&mut self) {
        self.session = Session::new(self.pool.next_word(), self.config.max_attempts, self.config.placeholder);
        self.mailbox.clear();
        self.render();

        crate::serial_println!(
            "[GAME] New round: {} letters, {} attempts",
            self.session.secret().len(),
            self.session.attempts_left()
        );
    }

    pub fn render(&self) {
        self.session.render(&mut self.screen.lock());
    }

    /// Play one letter and redraw the board
    pub fn guess(&mut self, letter: u8) -> Result<GuessOutcome, GameError> {
        let outcome = self.session.guess(letter)?;

        {
            let mut screen = self.screen.lock();
            self.session.render(&mut screen);
            if outcome == GuessOutcome::AlreadyTried {
                screen.put_str(ALREADY_TRIED_NOTICE);
            }
        }

        match outcome {
            GuessOutcome::AlreadyTried => crate::serial_println!("[GAME] {} was already tried", letter as char),
            GuessOutcome::Hit { revealed } => {
                crate::serial_println!("[GAME] {} revealed {} position(s)", letter as char, revealed)
            }
            GuessOutcome::Miss => crate::serial_println!(
                "[GAME] {} missed, {} attempt(s) left",
                letter as char,
                self.session.attempts_left()
            ),
            GuessOutcome::Won => crate::serial_println!("[GAME] Round won"),
            GuessOutcome::Lost => crate::serial_println!("[GAME] Round lost"),
        }

        Ok(outcome)
    }

    /// Handle the pending key, if any. Returns whether a key was consumed.
    pub fn poll(&mut self) -> bool {
        let key = match self.mailbox.peek() {
            Some(key) => key,
            None => return false,
        };

        match (self.session.phase(), key) {
            (Phase::Won | Phase::Lost, b'\n') => self.reset(),
            (Phase::Playing, b'A'..=b'Z') => {
                if let Err(e) = self.guess(key) {
                    crate::serial_println!("[VIGIL] Guess rejected: {}", e);
                }
            }
            // Everything else is ignored in the current phase
            _ => {}
        }

        // A key posted while we were busy is dropped with this one
        self.mailbox.clear();
        true
    }

    /// The main loop. Never returns.
    pub fn run(&mut self) -> ! {
        crate::serial_println!("[VIGIL] Entering main loop");
        loop {
            // Check-then-sleep with interrupts off, or a key landing between
            // the check and `hlt` would sleep until the next one.
            interrupts::disable();
            if self.mailbox.is_empty() {
                interrupts::enable_and_hlt();
            } else {
                interrupts::enable();
                self.poll();
            }
        }
    }
}
