//! Deck is the shuffled working queue of card repetitions for one session.
//!
//! Each card contributes a number of copies depending on its history:
//! - already solved today: no copies
//! - last attempt solved: `YES_WEIGHT` copies
//! - last attempt unsolved, or never attempted: `NO_WEIGHT` copies
//!
//! The whole multiset is shuffled once so repeats of different cards interleave.

use super::{Card, HistoryLog, Verdict};
use crate::config::ConfigError;
use chrono::NaiveDate;
use rand::Rng;
use rand::seq::SliceRandom;

/// Copies of a card whose last attempt was solved.
pub const YES_WEIGHT: usize = 2;
/// Copies of a card that is new or whose last attempt was unsolved.
pub const NO_WEIGHT: usize = 5;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DeckWeights {
    solved: usize,
    unsolved: usize,
}

impl Default for DeckWeights {
    fn default() -> Self {
        Self {
            solved: YES_WEIGHT,
            unsolved: NO_WEIGHT,
        }
    }
}

impl DeckWeights {
    /// `unsolved` must be at least 2 so that a failed card can be reinserted at least once.
    pub fn new(solved: usize, unsolved: usize) -> Result<Self, ConfigError> {
        if solved == 0 {
            return Err(ConfigError::InvalidWeight(
                "solved weight must be at least 1".to_string(),
            ));
        }
        if unsolved < 2 {
            return Err(ConfigError::InvalidWeight(
                "unsolved weight must be at least 2".to_string(),
            ));
        }
        Ok(Self { solved, unsolved })
    }

    pub fn solved(&self) -> usize {
        self.solved
    }

    pub fn unsolved(&self) -> usize {
        self.unsolved
    }

    /// Upper bound (inclusive) on copies added back after an unsolved verdict.
    pub fn max_reinsertions(&self) -> usize {
        self.unsolved - 1
    }
}

/// Ordered sequence of indices into the session's card bank. Indices may repeat.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Deck {
    entries: Vec<usize>,
}

impl Deck {
    pub fn from_entries(entries: Vec<usize>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[usize] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, position: usize) -> Option<usize> {
        self.entries.get(position).copied()
    }

    /// Number of entries referring to `card`.
    pub fn count_of(&self, card: usize) -> usize {
        self.entries.iter().filter(|&&entry| entry == card).count()
    }

    /// Inserts `copies` contiguous entries for `card` starting at `position`,
    /// shifting later entries right. `position` may equal `len()`.
    pub fn insert_copies(&mut self, position: usize, card: usize, copies: usize) {
        let position = position.min(self.entries.len());
        self.entries
            .splice(position..position, std::iter::repeat(card).take(copies));
    }
}

/// Builds today's deck from the card bank and the (already purged) history log.
pub fn build_deck<R: Rng + ?Sized>(
    cards: &[Card],
    log: &HistoryLog,
    today: NaiveDate,
    weights: DeckWeights,
    rng: &mut R,
) -> Deck {
    let mut entries = Vec::new();
    let mut excluded = 0;

    for (idx, card) in cards.iter().enumerate() {
        // Solved earlier today (e.g. a run that was killed): skip entirely
        if let Some(event) = log.latest_for_on(&card.title, today) {
            if event.status == Verdict::Solved {
                excluded += 1;
                continue;
            }
        }

        let copies = match log.latest_for(&card.title) {
            Some(event) if event.status == Verdict::Solved => weights.solved(),
            _ => weights.unsolved(),
        };
        entries.extend(std::iter::repeat(idx).take(copies));
    }

    entries.shuffle(rng);

    log::debug!(
        "Built deck of {} entries from {} cards ({} already solved today)",
        entries.len(),
        cards.len(),
        excluded
    );

    Deck { entries }
}
