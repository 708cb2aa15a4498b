//! Third-place match between the semifinal losers.

use crate::config::EngineConfig;
use crate::models::{Bracket, BracketShape, MatchRef, Slot, Stage};

/// Append the bronze match when the main bracket has semifinals (main size at least 4).
///
/// Wires both semifinal loser links into it (first semifinal to slot 1) and pins the final and
/// the bronze match to distinct courts. Returns the bronze match, or None when not applicable.
pub fn inject_bronze_match(
    bracket: &mut Bracket,
    shape: &BracketShape,
    config: &EngineConfig,
) -> Option<MatchRef> {
    if !shape.has_bronze || shape.round_sizes.len() < 2 {
        return None;
    }
    let final_ref = bracket.final_match()?.index;
    let (semi_1, semi_2) = bracket.semifinals()?;
    let final_round = bracket.matches[final_ref.index()].round;

    let bronze = bracket.push(final_round, Stage::Bronze);
    for (semi, slot) in [(semi_1, Slot::One), (semi_2, Slot::Two)] {
        let m = &mut bracket.matches[semi.index()];
        m.loser_next_index = Some(bronze);
        m.loser_next_slot = Some(slot);
        bracket.matches[bronze.index()].set_feeder(slot, semi);
    }

    bracket.matches[final_ref.index()].mat = Some(config.final_court());
    bracket.matches[bronze.index()].mat = Some(config.bronze_court());
    log::debug!("Bronze match {} fed by semifinals {} and {}", bronze, semi_1, semi_2);
    Some(bronze)
}
