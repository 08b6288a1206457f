//! Cycling typewriter text as an explicit state machine.
//!
//! A host scheduler calls [`Typewriter::step`] and waits for the returned delay
//! before calling it again. Every step performs exactly one transition:
//!
//! | phase       | action                         | next phase / delay                  |
//! |-------------|--------------------------------|-------------------------------------|
//! | `Typing`    | append one character           | `HoldFull` + hold when complete, else type delay |
//! | `HoldFull`  | nothing                        | `Deleting` + delete delay           |
//! | `Deleting`  | remove one character           | `HoldEmpty` + hold when empty, else delete delay |
//! | `HoldEmpty` | advance to the next title      | `Typing` + type delay               |

use std::time::Duration;

use crate::TypewriterSettings;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Typing,
    HoldFull,
    Deleting,
    HoldEmpty,
}

/// Delays between steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cadence {
    pub type_delay: Duration,
    pub delete_delay: Duration,
    pub hold_full: Duration,
    pub hold_empty: Duration,
}

impl Default for Cadence {
    fn default() -> Self {
        Self::from(&TypewriterSettings::default())
    }
}

impl From<&TypewriterSettings> for Cadence {
    fn from(settings: &TypewriterSettings) -> Self {
        Self {
            type_delay: Duration::from_millis(settings.type_delay_ms.into()),
            delete_delay: Duration::from_millis(settings.delete_delay_ms.into()),
            hold_full: Duration::from_millis(settings.hold_full_ms.into()),
            hold_empty: Duration::from_millis(settings.hold_empty_ms.into()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Typewriter {
    titles: Vec<Vec<char>>,
    index: usize,
    shown: usize,
    phase: Phase,
    cadence: Cadence,
}

impl Typewriter {
    /// Returns `None` when there is nothing to type.
    #[must_use]
    pub fn new<I, S>(titles: I, cadence: Cadence) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let titles: Vec<Vec<char>> = titles
            .into_iter()
            .map(|title| title.as_ref().chars().collect())
            .collect();
        if titles.is_empty() {
            return None;
        }
        Some(Self {
            titles,
            index: 0,
            shown: 0,
            phase: Phase::Typing,
            cadence,
        })
    }

    /// Decode titles from a JSON array attribute value.
    pub fn titles_from_json(raw: &str) -> Result<Vec<String>, serde_json::Error> {
        serde_json::from_str(raw)
    }

    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Index of the title being typed or deleted.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Text currently on screen.
    #[must_use]
    pub fn text(&self) -> String {
        self.titles[self.index][..self.shown].iter().collect()
    }

    /// Delay before the very first step.
    #[must_use]
    pub const fn initial_delay(&self) -> Duration {
        self.cadence.type_delay
    }

    /// Perform one transition and return the wait before the next.
    pub fn step(&mut self) -> Duration {
        let len = self.titles[self.index].len();
        match self.phase {
            Phase::Typing => {
                self.shown = (self.shown + 1).min(len);
                if self.shown == len {
                    self.phase = Phase::HoldFull;
                    self.cadence.hold_full
                } else {
                    self.cadence.type_delay
                }
            }
            Phase::HoldFull => {
                self.phase = Phase::Deleting;
                self.cadence.delete_delay
            }
            Phase::Deleting => {
                self.shown = self.shown.saturating_sub(1);
                if self.shown == 0 {
                    self.phase = Phase::HoldEmpty;
                    self.cadence.hold_empty
                } else {
                    self.cadence.delete_delay
                }
            }
            Phase::HoldEmpty => {
                self.index = (self.index + 1) % self.titles.len();
                self.phase = Phase::Typing;
                self.cadence.type_delay
            }
        }
    }
}
