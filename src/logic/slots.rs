//! Slot filling: place the ordered pool into preliminary and main round 1 matches.

use crate::models::{Bracket, BracketError, BracketShape, CompetitorId, Slot, Stage};

/// Fill every slot that is not fed by an upstream match, consuming `ordered` front to back.
///
/// Preliminary matches take two competitors each. In main round 1 a slot already fed by a
/// preliminary match stays empty; every other slot takes the next competitor. The pool must
/// cover the open slots exactly, otherwise nothing is placed.
pub fn fill_slots(
    bracket: &mut Bracket,
    shape: &BracketShape,
    ordered: Vec<CompetitorId>,
) -> Result<(), BracketError> {
    let Some(&first_round_size) = shape.round_sizes.get(shape.first_main_round()) else {
        return Ok(());
    };
    let first_round_end = shape.prelim_count + first_round_size;

    let open: Vec<(usize, Slot)> = bracket
        .matches
        .iter()
        .take(first_round_end)
        .enumerate()
        .filter(|(_, m)| m.stage == Stage::Main)
        .flat_map(|(pos, m)| {
            [Slot::One, Slot::Two]
                .into_iter()
                .filter(move |&slot| m.feeder(slot).is_none())
                .map(move |slot| (pos, slot))
        })
        .collect();

    if open.len() > ordered.len() {
        return Err(BracketError::PoolExhausted {
            needed: open.len(),
            available: ordered.len(),
        });
    }
    if open.len() < ordered.len() {
        return Err(BracketError::LeftoverCompetitors(ordered.len() - open.len()));
    }

    for ((pos, slot), id) in open.into_iter().zip(ordered) {
        bracket.matches[pos].set_athlete(slot, id);
    }
    Ok(())
}
