pub mod history;

pub use history::{HistoryStore, StorageError};
