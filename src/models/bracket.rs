//! Bracket (ordered match list) and BracketShape (structural facts for a field size).

use crate::models::bracket_match::{Match, MatchRef, Slot, Stage};
use crate::models::competitor::CompetitorId;
use crate::models::error::BracketError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Structural facts of a single-elimination draw for `field_size` competitors.
///
/// Depends only on the field size, so regenerating a draw always yields the same shape.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BracketShape {
    pub field_size: usize,
    /// Largest power of two not above the field size (0 for an empty field).
    pub main_size: usize,
    /// Preliminary (play-in) matches needed to cut the field down to `main_size`.
    pub prelim_count: usize,
    /// Matches per round: the preliminary round first (if any), then `main_size / 2, ..., 1`.
    pub round_sizes: Vec<usize>,
    pub has_bronze: bool,
    /// Total matches including the bronze match.
    pub match_count: usize,
}

impl BracketShape {
    pub fn for_field(field_size: usize) -> Self {
        if field_size == 0 {
            return Self::default();
        }
        let main_size = 1usize << field_size.ilog2();
        let prelim_count = field_size - main_size;

        let mut round_sizes = Vec::new();
        if prelim_count > 0 {
            round_sizes.push(prelim_count);
        }
        let mut size = main_size / 2;
        while size >= 1 {
            round_sizes.push(size);
            size /= 2;
        }

        let has_bronze = main_size >= 4;
        let match_count = main_size - 1 + prelim_count + usize::from(has_bronze);
        Self {
            field_size,
            main_size,
            prelim_count,
            round_sizes,
            has_bronze,
            match_count,
        }
    }

    /// Position of main round 1 in `round_sizes`.
    pub fn first_main_round(&self) -> usize {
        usize::from(self.prelim_count > 0)
    }

    /// Number of matches before the bronze match is appended.
    pub fn elimination_match_count(&self) -> usize {
        self.round_sizes.iter().sum()
    }
}

/// The ordered sequence of all matches of one competition's draw.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Bracket {
    pub matches: Vec<Match>,
}

impl Bracket {
    pub fn new(matches: Vec<Match>) -> Self {
        Self { matches }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            matches: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    /// Append a new empty match and return its reference.
    pub fn push(&mut self, round: u32, stage: Stage) -> MatchRef {
        let index = MatchRef::new(self.matches.len());
        self.matches.push(Match::new(index, round, stage));
        index
    }

    pub fn get(&self, index: MatchRef) -> Option<&Match> {
        self.matches.get(index.index())
    }

    pub fn get_mut(&mut self, index: MatchRef) -> Option<&mut Match> {
        self.matches.get_mut(index.index())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Match> {
        self.matches.iter()
    }

    pub fn final_match(&self) -> Option<&Match> {
        self.matches.iter().find(|m| m.is_final())
    }

    pub fn bronze_match(&self) -> Option<&Match> {
        self.matches.iter().find(|m| m.is_bronze())
    }

    /// The two matches feeding the final, when both are upstream matches.
    pub fn semifinals(&self) -> Option<(MatchRef, MatchRef)> {
        let final_match = self.final_match()?;
        Some((final_match.from1?, final_match.from2?))
    }

    /// Main-stage matches of the given 1-based round, in construction order.
    pub fn round(&self, round: u32) -> impl Iterator<Item = &Match> {
        self.matches
            .iter()
            .filter(move |m| m.stage == Stage::Main && m.round == round)
    }

    /// Every competitor placed directly into a slot, in match order.
    pub fn competitor_ids(&self) -> Vec<&CompetitorId> {
        self.matches.iter().flat_map(|m| m.athletes()).collect()
    }

    /// Check the structural invariants of a draw.
    ///
    /// - every match sits at its own index and every reference is in range
    /// - winners only move to strictly later rounds, into a slot that points back at them
    /// - loser links only target the bronze match
    /// - every `from1`/`from2` names a match whose winner (or, for bronze, loser) comes back here
    /// - exactly one final and at most one bronze match (an empty bracket has neither)
    /// - no competitor is placed twice
    pub fn verify(&self) -> Result<(), BracketError> {
        if self.matches.is_empty() {
            return Ok(());
        }
        for (pos, m) in self.matches.iter().enumerate() {
            let broken = BracketError::BrokenLink { index: m.index };
            if m.index.index() != pos {
                return Err(broken);
            }
            for link in [m.from1, m.from2, m.next_index, m.loser_next_index]
                .into_iter()
                .flatten()
            {
                if self.get(link).is_none() {
                    return Err(broken);
                }
            }
            match (m.next_index, m.next_slot) {
                (Some(next), Some(slot)) => {
                    let target = &self.matches[next.index()];
                    if target.round <= m.round || target.feeder(slot) != Some(m.index) {
                        return Err(broken);
                    }
                }
                (None, None) => {}
                _ => return Err(broken),
            }
            match (m.loser_next_index, m.loser_next_slot) {
                (Some(next), Some(slot)) => {
                    let target = &self.matches[next.index()];
                    if !target.is_bronze() || target.feeder(slot) != Some(m.index) {
                        return Err(broken);
                    }
                }
                (None, None) => {}
                _ => return Err(broken),
            }
            for slot in [Slot::One, Slot::Two] {
                let Some(from) = m.feeder(slot) else {
                    continue;
                };
                let upstream = &self.matches[from.index()];
                let points_back = if m.is_bronze() {
                    upstream.loser_next_index == Some(m.index) && upstream.loser_next_slot == Some(slot)
                } else {
                    upstream.next_index == Some(m.index) && upstream.next_slot == Some(slot)
                };
                if !points_back {
                    return Err(broken);
                }
            }
        }

        let finals = self.matches.iter().filter(|m| m.is_final()).count();
        let bronzes = self.matches.iter().filter(|m| m.is_bronze()).count();
        if finals != 1 || bronzes > 1 {
            return Err(BracketError::MalformedRoot);
        }

        let mut seen = HashSet::new();
        for id in self.competitor_ids() {
            if !seen.insert(id) {
                return Err(BracketError::PlacedTwice(id.clone()));
            }
        }
        Ok(())
    }
}
