pub mod card;
pub mod deck;
pub mod outcome;
pub mod review_session;

pub use card::{Card, Level};
pub use deck::{Deck, DeckWeights, NO_WEIGHT, YES_WEIGHT, build_deck};
pub use outcome::{HistoryLog, OutcomeEvent, Verdict};
pub use review_session::{CardSide, Reinsertion, ReviewSession, SessionState, SessionView};
