//! Court assignment for matches not already pinned.

use crate::models::{Bracket, Court};

/// Cycle through `courts` over every match without a court, in construction order.
/// Pinned matches are skipped and do not advance the cycle.
pub fn assign_courts(bracket: &mut Bracket, courts: &[Court]) {
    let mut cycle = courts.iter().copied().cycle();
    for m in bracket.matches.iter_mut().filter(|m| m.mat.is_none()) {
        m.mat = cycle.next();
    }
}
