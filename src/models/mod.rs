//! Data structures for a draw: competitors, matches, the bracket and its shape.

mod bracket;
mod bracket_match;
mod competitor;
mod error;

pub use bracket::{Bracket, BracketShape};
pub use bracket_match::{Court, Match, MatchRef, MatchStatus, Slot, Stage};
pub use competitor::{ClubId, Competitor, CompetitorId};
pub use error::BracketError;
