//! Generated draws waiting for the save action. Only the latest draw per competition is kept.

use crate::models::Bracket;
use crate::store::{CompetitionId, StoreError};
use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};
use uuid::Uuid;

/// Identifier of one generated (not yet saved) draw.
pub type DrawId = Uuid;

#[derive(Debug)]
struct PendingDraw {
    competition_id: CompetitionId,
    bracket: Bracket,
    last_activity: Instant,
}

#[derive(Debug, Default)]
pub struct PendingDraws {
    draws: RwLock<HashMap<DrawId, PendingDraw>>,
}

impl PendingDraws {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hold `bracket` as the competition's current unsaved draw, dropping any earlier one.
    /// Empty draws cannot be saved, so they are not held and get no id.
    pub fn insert(
        &self,
        competition_id: &str,
        bracket: Bracket,
    ) -> Result<Option<DrawId>, StoreError> {
        let mut g = self.draws.write().map_err(|_| StoreError::Lock)?;
        g.retain(|_, d| d.competition_id != competition_id);
        if bracket.is_empty() {
            return Ok(None);
        }
        let draw_id = Uuid::new_v4();
        g.insert(
            draw_id,
            PendingDraw {
                competition_id: competition_id.to_string(),
                bracket,
                last_activity: Instant::now(),
            },
        );
        Ok(Some(draw_id))
    }

    /// A copy of the draw if it exists and belongs to `competition_id`. Refreshes its activity.
    pub fn get(&self, competition_id: &str, draw_id: DrawId) -> Result<Option<Bracket>, StoreError> {
        let mut g = self.draws.write().map_err(|_| StoreError::Lock)?;
        Ok(match g.get_mut(&draw_id) {
            Some(d) if d.competition_id == competition_id => {
                d.last_activity = Instant::now();
                Some(d.bracket.clone())
            }
            _ => None,
        })
    }

    pub fn remove(&self, draw_id: DrawId) -> Result<(), StoreError> {
        let mut g = self.draws.write().map_err(|_| StoreError::Lock)?;
        g.remove(&draw_id);
        Ok(())
    }

    /// Drop draws idle for at least `timeout`; returns how many were dropped.
    pub fn sweep(&self, timeout: Duration) -> Result<usize, StoreError> {
        let mut g = self.draws.write().map_err(|_| StoreError::Lock)?;
        let before = g.len();
        g.retain(|_, d| d.last_activity.elapsed() < timeout);
        Ok(before - g.len())
    }

    pub fn len(&self) -> usize {
        self.draws.read().map(|g| g.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
