//! JSON question bank loading.
//! The bank is a JSON array of card objects, read once at startup.

use crate::models::Card;
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImportError {
    #[error("Cannot read question bank {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Question bank {path:?} is not valid: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Question bank {path:?} contains '{title}' more than once")]
    DuplicateTitle { path: PathBuf, title: String },
}

/// Loads the question bank at `path`, keeping file order.
/// Fails if the file is missing, is not a JSON array of cards, or repeats a title.
pub fn load_questions(path: &Path) -> Result<Vec<Card>, ImportError> {
    let file = File::open(path).map_err(|source| ImportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let cards = parse_questions(BufReader::new(file), path)?;

    log::info!("Loaded {} questions from {:?}", cards.len(), path);
    Ok(cards)
}

fn parse_questions<R: Read>(reader: R, path: &Path) -> Result<Vec<Card>, ImportError> {
    let cards: Vec<Card> = serde_json::from_reader(reader).map_err(|source| ImportError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    // Titles key the history log, so they must be unique
    let mut seen = HashSet::new();
    for card in &cards {
        if !seen.insert(card.title.as_str()) {
            return Err(ImportError::DuplicateTitle {
                path: path.to_path_buf(),
                title: card.title.clone(),
            });
        }
    }

    Ok(cards)
}
