//! Keyboard input
//!
//! Front ends translate their native key events into [`KeyEvent`]s, queue
//! them, and the game drains the queue once per frame.

/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Left,
    Right,
    Enter,
    Backspace,
    Space,
    /// Printable character (digits, letters for pause, save prompt and initials)
    Char(char),
}

/// A key was pressed or released
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEvent {
    Down(Key),
    Up(Key),
}

impl Key {
    /// True for the given letter in either case
    pub fn is_letter(self, letter: char) -> bool {
        matches!(self, Key::Char(c) if c.eq_ignore_ascii_case(&letter))
    }

    /// Difficulty digit 1-3
    pub fn difficulty_tier(self) -> Option<u8> {
        match self {
            Key::Char(c @ '1'..='3') => c.to_digit(10).map(|d| d as u8),
            _ => None,
        }
    }
}

/// Pending key events, drained every frame
#[derive(Debug, Default)]
pub struct InputQueue {
    events: Vec<KeyEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(16),
        }
    }

    pub fn push(&mut self, event: KeyEvent) {
        self.events.push(event);
    }

    /// Take every pending event in arrival order
    pub fn drain(&mut self) -> Vec<KeyEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}
