//! History file operations
//!
//! The outcome log is persisted as a CSV table with the header `date,status,title`.
//! The whole table is rewritten on every save; the in-memory log is the source of truth.

use crate::models::{HistoryLog, OutcomeEvent};
use chrono::NaiveDate;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

const COLUMNS: [&str; 3] = ["date", "status", "title"];

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("History file {path:?} is malformed: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("History file {path:?} is not valid UTF-8: {source}")]
    NotUtf8 {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("History file {path:?} is missing column '{column}'")]
    MissingColumn { path: PathBuf, column: &'static str },
}

/// Handle on the history file. Holds only the path; every call goes to disk.
#[derive(Clone, Debug)]
pub struct HistoryStore {
    path: PathBuf,
}

impl HistoryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the log and drops every event dated `today`, so a rerun on the same day
    /// starts from a clean slate while keeping earlier days.
    ///
    /// A missing or blank file is an empty log. Anything else that fails to parse is an error.
    pub fn load(&self, today: NaiveDate) -> Result<HistoryLog, StorageError> {
        let mut log = self.read()?;
        let purged = log.purge_date(today);

        log::info!(
            "Loaded {} history events from {:?} ({} from today discarded)",
            log.len(),
            self.path,
            purged
        );
        Ok(log)
    }

    fn read(&self) -> Result<HistoryLog, StorageError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::info!("No history file at {:?}, starting fresh", self.path);
                return Ok(HistoryLog::new());
            }
            Err(e) if e.kind() == io::ErrorKind::InvalidData => {
                return Err(StorageError::NotUtf8 {
                    path: self.path.clone(),
                    source: e,
                });
            }
            Err(e) => return Err(e.into()),
        };

        if content.trim().is_empty() {
            log::info!("History file {:?} is empty, starting fresh", self.path);
            return Ok(HistoryLog::new());
        }

        let mut reader = csv::Reader::from_reader(content.as_bytes());

        let headers = reader.headers().map_err(|source| self.malformed(source))?;
        for column in COLUMNS {
            if !headers.iter().any(|h| h.trim() == column) {
                return Err(StorageError::MissingColumn {
                    path: self.path.clone(),
                    column,
                });
            }
        }

        let events = reader
            .deserialize::<OutcomeEvent>()
            .collect::<Result<Vec<_>, _>>()
            .map_err(|source| self.malformed(source))?;

        Ok(HistoryLog::from_events(events))
    }

    /// Replaces the history file with the full contents of `log`.
    ///
    /// Writes to a sibling `.tmp` file then renames it into place.
    pub fn save(&self, log: &HistoryLog) -> Result<(), StorageError> {
        let buffer = encode(log)?;

        let tmp_path = self.tmp_path();
        fs::write(&tmp_path, buffer)?;
        fs::rename(&tmp_path, &self.path)?;

        log::debug!("Saved {} history events to {:?}", log.len(), self.path);
        Ok(())
    }

    /// Copies the current history table to `dest`. Writes an empty table if there is no
    /// history file yet.
    pub fn export_to(&self, dest: &Path) -> Result<(), StorageError> {
        if self.path.exists() {
            fs::copy(&self.path, dest)?;
        } else {
            fs::write(dest, encode(&HistoryLog::new())?)?;
        }
        log::info!("Exported history from {:?} to {:?}", self.path, dest);
        Ok(())
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self.path.clone().into_os_string();
        name.push(".tmp");
        PathBuf::from(name)
    }

    fn malformed(&self, source: csv::Error) -> StorageError {
        StorageError::Malformed {
            path: self.path.clone(),
            source,
        }
    }
}

fn encode(log: &HistoryLog) -> Result<Vec<u8>, StorageError> {
    // Header is written by hand so an empty log still produces it
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    writer.write_record(COLUMNS)?;
    for event in log.events() {
        writer.serialize(event)?;
    }
    let buffer = writer.into_inner().map_err(|e| e.into_error())?;
    Ok(buffer)
}
