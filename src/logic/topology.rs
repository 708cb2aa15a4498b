//! Bracket topology: allocate every elimination match and wire winner links both ways.

use crate::models::{Bracket, BracketShape, MatchRef, Slot, Stage};

/// Allocate all preliminary and main matches for `shape` with forward (`next_index`/`next_slot`)
/// and backward (`from1`/`from2`) links. No competitors or courts yet.
///
/// Ordinary rounds pair up: position `pos` feeds `pos / 2` of the next round, slot 1 when
/// `pos` is even. Preliminary match `k` feeds slot 1 of main round 1 match `k`; when there are
/// more preliminary matches than round 1 matches the rest wrap onto slot 2 from position 0.
pub fn build_topology(shape: &BracketShape) -> Bracket {
    let mut bracket = Bracket::with_capacity(shape.match_count);
    let mut bases = Vec::with_capacity(shape.round_sizes.len());
    for (ri, &size) in shape.round_sizes.iter().enumerate() {
        bases.push(bracket.len());
        for _ in 0..size {
            bracket.push(round_number(ri), Stage::Main);
        }
    }

    let has_prelim = shape.prelim_count > 0;
    for ri in 0..shape.round_sizes.len().saturating_sub(1) {
        let base = bases[ri];
        let next_base = bases[ri + 1];
        let next_size = shape.round_sizes[ri + 1];
        for pos in 0..shape.round_sizes[ri] {
            let (target, slot) = if has_prelim && ri == 0 {
                if pos < next_size {
                    (next_base + pos, Slot::One)
                } else {
                    (next_base + pos - next_size, Slot::Two)
                }
            } else {
                (next_base + pos / 2, Slot::for_position(pos))
            };
            link(&mut bracket, MatchRef::new(base + pos), MatchRef::new(target), slot);
        }
    }

    log::debug!(
        "Built topology for {} competitors: main size {}, {} preliminary, rounds {:?}",
        shape.field_size,
        shape.main_size,
        shape.prelim_count,
        shape.round_sizes
    );
    bracket
}

/// 1-based round number for a position in the round list.
fn round_number(round_pos: usize) -> u32 {
    u32::try_from(round_pos + 1).unwrap_or(u32::MAX)
}

fn link(bracket: &mut Bracket, from: MatchRef, to: MatchRef, slot: Slot) {
    let upstream = &mut bracket.matches[from.index()];
    upstream.next_index = Some(to);
    upstream.next_slot = Some(slot);
    bracket.matches[to.index()].set_feeder(slot, from);
}

