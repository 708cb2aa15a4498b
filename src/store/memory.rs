//! In-memory store, used when no data directory is configured and in tests.

use crate::models::Bracket;
use crate::store::{
    is_valid_competition_id, prepare, BracketStore, CompetitionId, StoreError, StoredBracket,
};
use std::collections::HashMap;
use std::sync::RwLock;

#[derive(Debug, Default)]
pub struct MemoryBracketStore {
    brackets: RwLock<HashMap<CompetitionId, StoredBracket>>,
}

impl MemoryBracketStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BracketStore for MemoryBracketStore {
    fn create_or_replace_pairings(
        &self,
        competition_id: &str,
        bracket: &Bracket,
    ) -> Result<StoredBracket, StoreError> {
        let record = prepare(competition_id, bracket)?;
        let mut g = self.brackets.write().map_err(|_| StoreError::Lock)?;
        g.insert(record.competition_id.clone(), record.clone());
        Ok(record)
    }

    fn load_pairings(&self, competition_id: &str) -> Result<Option<StoredBracket>, StoreError> {
        if !is_valid_competition_id(competition_id) {
            return Err(StoreError::InvalidCompetitionId(competition_id.to_string()));
        }
        let g = self.brackets.read().map_err(|_| StoreError::Lock)?;
        Ok(g.get(competition_id).cloned())
    }
}
