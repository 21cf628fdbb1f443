pub mod config;
pub mod import;
pub mod models;
pub mod storage;

pub use config::Config;
pub use models::{Card, HistoryLog, OutcomeEvent, ReviewSession, SessionView, Verdict};
pub use storage::HistoryStore;
