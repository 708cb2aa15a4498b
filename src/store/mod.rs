//! Bracket persistence: full create-or-replace per competition, last write wins.

mod json_file;
mod memory;
mod pending;

pub use json_file::JsonFileBracketStore;
pub use memory::MemoryBracketStore;
pub use pending::{DrawId, PendingDraws};

use crate::models::{Bracket, BracketError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Competition identifier (document store id).
pub type CompetitionId = String;

/// A persisted draw.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredBracket {
    pub competition_id: CompetitionId,
    pub saved_at: DateTime<Utc>,
    pub matches: Bracket,
}

/// Errors from a bracket store. A failed write leaves the previously saved bracket in place.
#[derive(Debug)]
pub enum StoreError {
    Io(std::io::Error),
    Serde(serde_json::Error),
    /// The bracket was refused before anything was written.
    Rejected(BracketError),
    /// The competition id cannot be used as a storage key.
    InvalidCompetitionId(String),
    /// A stored record does not hold a valid bracket for its key.
    Corrupt { competition_id: CompetitionId, reason: String },
    /// Store lock poisoned by a panicking writer.
    Lock,
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::Io(e) => write!(f, "Storage I/O error: {}", e),
            StoreError::Serde(e) => write!(f, "Storage encoding error: {}", e),
            StoreError::Rejected(e) => write!(f, "Draw rejected: {}", e),
            StoreError::InvalidCompetitionId(id) => write!(f, "Invalid competition id {:?}", id),
            StoreError::Corrupt {
                competition_id,
                reason,
            } => write!(f, "Stored draw for {} is corrupt: {}", competition_id, reason),
            StoreError::Lock => write!(f, "lock error"),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Io(e) => Some(e),
            StoreError::Serde(e) => Some(e),
            StoreError::Rejected(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> Self {
        StoreError::Io(e)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Serde(e)
    }
}

/// Persistence contract for draws.
///
/// There is no version check: two concurrent saves for one competition race and the last
/// write wins.
pub trait BracketStore: Send + Sync {
    /// Replace the whole persisted draw for `competition_id` in one write.
    fn create_or_replace_pairings(
        &self,
        competition_id: &str,
        bracket: &Bracket,
    ) -> Result<StoredBracket, StoreError>;

    fn load_pairings(&self, competition_id: &str) -> Result<Option<StoredBracket>, StoreError>;
}

/// Validate a bracket for saving and stamp it.
fn prepare(competition_id: &str, bracket: &Bracket) -> Result<StoredBracket, StoreError> {
    if !is_valid_competition_id(competition_id) {
        return Err(StoreError::InvalidCompetitionId(competition_id.to_string()));
    }
    if bracket.is_empty() {
        return Err(StoreError::Rejected(BracketError::EmptyBracket));
    }
    bracket.verify().map_err(StoreError::Rejected)?;
    Ok(StoredBracket {
        competition_id: competition_id.to_string(),
        saved_at: Utc::now(),
        matches: bracket.clone(),
    })
}

/// Ids are used as file names, so only `[A-Za-z0-9_-]` is accepted.
pub fn is_valid_competition_id(id: &str) -> bool {
    !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}
