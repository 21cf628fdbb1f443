//! Review session: walks the day's deck, records verdicts and reinserts failed cards.

use super::deck::build_deck;
use super::{Card, Deck, DeckWeights, HistoryLog, OutcomeEvent, Verdict};
use crate::storage::{HistoryStore, StorageError};
use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Which face of the current card is shown.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CardSide {
    Front,
    Back,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    Active { index: usize, side: CardSide },
    Finished,
}

/// What the presentation layer should show right now.
#[derive(Debug, PartialEq)]
pub enum SessionView<'a> {
    Card {
        card: &'a Card,
        side: CardSide,
        /// 1-based position in the deck.
        position: usize,
        total: usize,
    },
    Complete,
}

impl SessionView<'_> {
    /// Text of the visible face, or `None` once the session is complete.
    pub fn text(&self) -> Option<String> {
        match self {
            SessionView::Card { card, side, .. } => Some(match side {
                CardSide::Front => card.front_text(),
                CardSide::Back => card.back_text(),
            }),
            SessionView::Complete => None,
        }
    }

    /// Position indicator such as `3/12`.
    pub fn counter(&self) -> Option<String> {
        match self {
            SessionView::Card {
                position, total, ..
            } => Some(format!("{}/{}", position, total)),
            SessionView::Complete => None,
        }
    }
}

/// Extra copies of a failed card placed later in the deck.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Reinsertion {
    pub position: usize,
    pub copies: usize,
}

/// Owns everything for one day's review: the card bank, the deck, the history log and
/// where the log is saved. Every verdict is written to disk before the cursor moves.
pub struct ReviewSession<R = StdRng> {
    cards: Vec<Card>,
    deck: Deck,
    history: HistoryLog,
    store: HistoryStore,
    today: NaiveDate,
    weights: DeckWeights,
    state: SessionState,
    rng: R,
}

impl ReviewSession<StdRng> {
    /// Starts a session with an entropy-seeded random source.
    pub fn start(
        cards: Vec<Card>,
        history: HistoryLog,
        store: HistoryStore,
        today: NaiveDate,
        weights: DeckWeights,
    ) -> Self {
        Self::with_rng(cards, history, store, today, weights, StdRng::from_entropy())
    }
}

impl<R: Rng> ReviewSession<R> {
    /// Builds the deck from `history` and starts on the first card.
    /// `history` is expected to have today's events purged already.
    pub fn with_rng(
        cards: Vec<Card>,
        history: HistoryLog,
        store: HistoryStore,
        today: NaiveDate,
        weights: DeckWeights,
        mut rng: R,
    ) -> Self {
        let deck = build_deck(&cards, &history, today, weights, &mut rng);
        let state = if deck.is_empty() {
            SessionState::Finished
        } else {
            SessionState::Active {
                index: 0,
                side: CardSide::Front,
            }
        };

        log::info!(
            "Review session for {} started with {} cards in deck",
            today,
            deck.len()
        );

        Self {
            cards,
            deck,
            history,
            store,
            today,
            weights,
            state,
            rng,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state == SessionState::Finished
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn deck_len(&self) -> usize {
        self.deck.len()
    }

    /// Cursor position; equals `deck_len()` once finished.
    pub fn index(&self) -> usize {
        match self.state {
            SessionState::Active { index, .. } => index,
            SessionState::Finished => self.deck.len(),
        }
    }

    pub fn history(&self) -> &HistoryLog {
        &self.history
    }

    pub fn history_store(&self) -> &HistoryStore {
        &self.store
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// (solved, unsolved) verdicts recorded today in this session.
    pub fn today_tally(&self) -> (usize, usize) {
        self.history.tally_on(self.today)
    }

    pub fn current_card(&self) -> Option<&Card> {
        match self.state {
            SessionState::Active { index, .. } => {
                self.deck.get(index).and_then(|idx| self.cards.get(idx))
            }
            SessionState::Finished => None,
        }
    }

    pub fn current_view(&self) -> SessionView<'_> {
        match (self.state, self.current_card()) {
            (SessionState::Active { index, side }, Some(card)) => SessionView::Card {
                card,
                side,
                position: index + 1,
                total: self.deck.len(),
            },
            _ => SessionView::Complete,
        }
    }

    /// Front shows the back; back goes back to the front of the same card.
    /// Never moves to another card.
    pub fn flip(&mut self) {
        if let SessionState::Active { side, .. } = &mut self.state {
            *side = match *side {
                CardSide::Front => CardSide::Back,
                CardSide::Back => CardSide::Front,
            };
        }
    }

    /// Records `verdict` for the current card, saves the whole log, and moves on.
    ///
    /// An unsolved card gets 1..=`max_reinsertions` extra copies inserted together at a
    /// random position after the current one. Does nothing once finished.
    /// If the save fails the verdict is dropped from the log, the session finishes and the
    /// error is returned.
    pub fn mark(&mut self, verdict: Verdict) -> Result<Option<Reinsertion>, StorageError> {
        let SessionState::Active { index, .. } = self.state else {
            return Ok(None);
        };
        let Some(card_idx) = self.deck.get(index) else {
            self.state = SessionState::Finished;
            return Ok(None);
        };
        let title = self.cards[card_idx].title.clone();

        self.history
            .push(OutcomeEvent::new(self.today, verdict, title.as_str()));
        if let Err(e) = self.store.save(&self.history) {
            // Memory must not hold verdicts the file never got
            self.history.pop();
            self.state = SessionState::Finished;
            log::error!("Could not save verdict for '{}', session stopped: {}", title, e);
            return Err(e);
        }
        log::info!("Marked '{}' as {:?}", title, verdict);

        let reinsertion = if verdict == Verdict::Unsolved {
            let copies = self.rng.gen_range(1..=self.weights.max_reinsertions());
            let position = self.rng.gen_range(index + 1..=self.deck.len());
            self.deck.insert_copies(position, card_idx, copies);
            log::debug!(
                "Reinserted {} copies of '{}' at position {}",
                copies,
                title,
                position
            );
            Some(Reinsertion { position, copies })
        } else {
            None
        };

        let next = index + 1;
        self.state = if next >= self.deck.len() {
            log::info!("Review session for {} finished", self.today);
            SessionState::Finished
        } else {
            SessionState::Active {
                index: next,
                side: CardSide::Front,
            }
        };

        Ok(reinsertion)
    }
}
