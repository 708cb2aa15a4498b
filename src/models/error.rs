//! Errors raised while building or checking a bracket.

use crate::models::bracket_match::MatchRef;
use crate::models::competitor::CompetitorId;

/// Errors that can occur while constructing or verifying a draw.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum BracketError {
    /// The same competitor id was registered twice.
    DuplicateCompetitor(CompetitorId),
    /// A seeded id is not in the pool.
    UnknownSeed(CompetitorId),
    /// A seeded id was listed twice.
    DuplicateSeed(CompetitorId),
    /// Slot filling ran out of competitors.
    PoolExhausted { needed: usize, available: usize },
    /// Slot filling finished with competitors left unplaced.
    LeftoverCompetitors(usize),
    /// No matches; nothing to save.
    EmptyBracket,
    /// A match reference is out of range or points the wrong way.
    BrokenLink { index: MatchRef },
    /// Wrong number of final or bronze matches.
    MalformedRoot,
    /// A competitor was placed in more than one slot.
    PlacedTwice(CompetitorId),
}

impl std::fmt::Display for BracketError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BracketError::DuplicateCompetitor(id) => write!(f, "Competitor {} is registered twice", id),
            BracketError::UnknownSeed(id) => write!(f, "Seeded competitor {} is not registered", id),
            BracketError::DuplicateSeed(id) => write!(f, "Competitor {} is seeded twice", id),
            BracketError::PoolExhausted { needed, available } => write!(
                f,
                "Not enough competitors to fill the draw (needed {}, had {})",
                needed, available
            ),
            BracketError::LeftoverCompetitors(count) => {
                write!(f, "{} competitor(s) were not placed in the draw", count)
            }
            BracketError::EmptyBracket => write!(f, "The draw has no matches"),
            BracketError::BrokenLink { index } => write!(f, "Match {} has an invalid link", index),
            BracketError::MalformedRoot => {
                write!(f, "The draw must have exactly one final and at most one bronze match")
            }
            BracketError::PlacedTwice(id) => write!(f, "Competitor {} is placed more than once", id),
        }
    }
}

impl std::error::Error for BracketError {}
