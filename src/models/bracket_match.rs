//! Match node, slot and stage types for the bracket.

use crate::models::competitor::CompetitorId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Court (mat) identifier.
pub type Court = u32;

/// Position of a match inside its bracket. References between matches are always one of these,
/// never a bare integer.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MatchRef(usize);

impl MatchRef {
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for MatchRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One of the two competitor positions in a match. Serialized as `1` or `2`.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Slot {
    One,
    Two,
}

impl Slot {
    /// Standard pairing: even positions feed slot 1, odd positions slot 2.
    pub fn for_position(pos: usize) -> Self {
        if pos % 2 == 0 {
            Slot::One
        } else {
            Slot::Two
        }
    }
}

impl From<Slot> for u8 {
    fn from(slot: Slot) -> u8 {
        match slot {
            Slot::One => 1,
            Slot::Two => 2,
        }
    }
}

impl TryFrom<u8> for Slot {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Slot::One),
            2 => Ok(Slot::Two),
            other => Err(format!("invalid slot {other}, expected 1 or 2")),
        }
    }
}

/// Which part of the draw a match belongs to.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    #[default]
    Main,
    /// Third-place match between the semifinal losers.
    Bronze,
}

/// Lifecycle of a match. Construction only ever produces `Pending`.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    #[default]
    Pending,
}

/// A node of the bracket, stored at `index` in the bracket's match list.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    pub index: MatchRef,
    /// 1-based; the preliminary round, when present, is round 1.
    pub round: u32,
    pub stage: Stage,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mat: Option<Court>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub athlete1_id: Option<CompetitorId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub athlete2_id: Option<CompetitorId>,
    #[serde(default)]
    pub status: MatchStatus,
    #[serde(default)]
    pub winner_id: Option<CompetitorId>,
    /// Match and slot the winner moves on to. None for the final and the bronze match.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_index: Option<MatchRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_slot: Option<Slot>,
    /// Upstream match whose winner fills slot 1. None when slot 1 is filled from the pool.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from1: Option<MatchRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from2: Option<MatchRef>,
    /// Only set on semifinals when a bronze match exists.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loser_next_index: Option<MatchRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loser_next_slot: Option<Slot>,
}

impl Match {
    /// Create an empty pending match with no links, competitors or court.
    pub fn new(index: MatchRef, round: u32, stage: Stage) -> Self {
        Self {
            index,
            round,
            stage,
            mat: None,
            athlete1_id: None,
            athlete2_id: None,
            status: MatchStatus::Pending,
            winner_id: None,
            next_index: None,
            next_slot: None,
            from1: None,
            from2: None,
            loser_next_index: None,
            loser_next_slot: None,
        }
    }

    /// The main-stage match nobody advances out of.
    pub fn is_final(&self) -> bool {
        self.stage == Stage::Main && self.next_index.is_none()
    }

    pub fn is_bronze(&self) -> bool {
        self.stage == Stage::Bronze
    }

    /// Upstream match feeding the given slot.
    pub fn feeder(&self, slot: Slot) -> Option<MatchRef> {
        match slot {
            Slot::One => self.from1,
            Slot::Two => self.from2,
        }
    }

    pub fn set_feeder(&mut self, slot: Slot, from: MatchRef) {
        match slot {
            Slot::One => self.from1 = Some(from),
            Slot::Two => self.from2 = Some(from),
        }
    }

    pub fn athlete(&self, slot: Slot) -> Option<&CompetitorId> {
        match slot {
            Slot::One => self.athlete1_id.as_ref(),
            Slot::Two => self.athlete2_id.as_ref(),
        }
    }

    pub fn set_athlete(&mut self, slot: Slot, id: CompetitorId) {
        match slot {
            Slot::One => self.athlete1_id = Some(id),
            Slot::Two => self.athlete2_id = Some(id),
        }
    }

    /// Competitors placed directly into this match (not via an upstream winner).
    pub fn athletes(&self) -> impl Iterator<Item = &CompetitorId> {
        self.athlete1_id.iter().chain(self.athlete2_id.iter())
    }
}
