//! Competitor identity as registered for a competition.

use serde::{Deserialize, Serialize};

/// Opaque athlete identifier from the roster (document store id).
pub type CompetitorId = String;

/// Opaque club identifier.
pub type ClubId = String;

/// A registered competitor. The draw only looks at identity, never at names or rank.
#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Competitor {
    #[serde(alias = "athleteId")]
    pub id: CompetitorId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub club_id: Option<ClubId>,
}

impl Competitor {
    /// Create a competitor with no club.
    pub fn new(id: impl Into<CompetitorId>) -> Self {
        Self {
            id: id.into(),
            club_id: None,
        }
    }

    /// Create a competitor registered through a club.
    pub fn with_club(id: impl Into<CompetitorId>, club_id: impl Into<ClubId>) -> Self {
        Self {
            id: id.into(),
            club_id: Some(club_id.into()),
        }
    }
}
