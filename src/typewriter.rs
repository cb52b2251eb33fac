//! Type-in / type-out loop for the hero line.
//!
//! The machine never terminates: it grows one character per tick up to the
//! full text, pauses, shrinks one character per tick down to nothing, pauses,
//! and starts over. Scheduling is left to the caller, which asks
//! [`Typewriter::next_delay_ms`] how long to wait before calling
//! [`Typewriter::tick`].

use std::fmt;

use crate::config::{PAUSE_DELAY_MS, TYPE_DELAY_MS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Growing,
    Shrinking,
}

/// What a single tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Typed,
    Deleted,
    /// The pause at an extreme ended and the direction flipped.
    Reversed(Direction),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimingError {
    ZeroDelay,
    PauseTooShort { type_ms: u32, pause_ms: u32 },
}

impl fmt::Display for TimingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimingError::ZeroDelay => write!(f, "Typewriter delays must be non-zero"),
            TimingError::PauseTooShort { type_ms, pause_ms } => write!(
                f,
                "Typewriter pause ({}ms) must be longer than the per-character delay ({}ms)",
                pause_ms, type_ms
            ),
        }
    }
}

impl std::error::Error for TimingError {}

/// Per-character delay and the longer pause held at both extremes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypewriterTiming {
    type_ms: u32,
    pause_ms: u32,
}

impl TypewriterTiming {
    pub fn new(type_ms: u32, pause_ms: u32) -> Result<Self, TimingError> {
        if type_ms == 0 || pause_ms == 0 {
            return Err(TimingError::ZeroDelay);
        }
        if pause_ms <= type_ms {
            return Err(TimingError::PauseTooShort { type_ms, pause_ms });
        }
        Ok(Self { type_ms, pause_ms })
    }

    pub fn type_ms(&self) -> u32 {
        self.type_ms
    }

    pub fn pause_ms(&self) -> u32 {
        self.pause_ms
    }
}

impl Default for TypewriterTiming {
    fn default() -> Self {
        Self {
            type_ms: TYPE_DELAY_MS,
            pause_ms: PAUSE_DELAY_MS,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Typewriter {
    text: String,
    /// Byte offset of every prefix length, so `ends[n]` is where an
    /// `n`-character prefix stops. Always `char_count + 1` entries.
    ends: Vec<usize>,
    len: usize,
    direction: Direction,
    timing: TypewriterTiming,
}

impl Typewriter {
    pub fn new(text: impl Into<String>, timing: TypewriterTiming) -> Self {
        let text = text.into();
        let ends = text
            .char_indices()
            .map(|(i, _)| i)
            .chain(std::iter::once(text.len()))
            .collect();
        Self {
            text,
            ends,
            len: 0,
            direction: Direction::Growing,
            timing,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn timing(&self) -> TypewriterTiming {
        self.timing
    }

    /// Number of characters in the full text.
    pub fn char_count(&self) -> usize {
        self.ends.len() - 1
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// The currently visible prefix.
    pub fn rendered(&self) -> &str {
        &self.text[..self.ends[self.len]]
    }

    fn at_extreme(&self) -> bool {
        match self.direction {
            Direction::Growing => self.len == self.char_count(),
            Direction::Shrinking => self.len == 0,
        }
    }

    /// How long to wait before the next [`tick`](Self::tick).
    pub fn next_delay_ms(&self) -> u32 {
        if self.at_extreme() {
            self.timing.pause_ms
        } else {
            self.timing.type_ms
        }
    }

    /// Apply exactly one transition.
    pub fn tick(&mut self) -> Step {
        match (self.direction, self.at_extreme()) {
            (Direction::Growing, false) => {
                self.len += 1;
                Step::Typed
            }
            (Direction::Shrinking, false) => {
                self.len -= 1;
                Step::Deleted
            }
            (Direction::Growing, true) => {
                self.direction = Direction::Shrinking;
                Step::Reversed(Direction::Shrinking)
            }
            (Direction::Shrinking, true) => {
                self.direction = Direction::Growing;
                Step::Reversed(Direction::Growing)
            }
        }
    }

    /// Total time of one full grow/pause/shrink/pause cycle.
    pub fn period_ms(&self) -> u64 {
        2 * self.char_count() as u64 * self.timing.type_ms as u64 + 2 * self.timing.pause_ms as u64
    }
}
