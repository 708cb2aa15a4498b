//! Draw generation: the full pipeline from registrations to a court-assigned bracket.

use crate::config::EngineConfig;
use crate::logic::bronze::inject_bronze_match;
use crate::logic::courts::assign_courts;
use crate::logic::pool::order_competitors;
use crate::logic::slots::fill_slots;
use crate::logic::topology::build_topology;
use crate::models::{Bracket, BracketError, BracketShape, Competitor, CompetitorId};
use rand::Rng;

/// Build a single-elimination draw for `competitors`.
///
/// 1. Order the pool (seeds first, the rest shuffled with `rng`).
/// 2. Allocate preliminary and main matches with winner links.
/// 3. Add the bronze match and pin final/bronze courts when there are semifinals.
/// 4. Fill open slots from the ordered pool.
/// 5. Round-robin the remaining matches over the configured courts.
///
/// Fewer than two competitors yields an empty bracket. The result depends only on the inputs
/// and the rng state, so a seeded rng replays a draw exactly.
pub fn generate_bracket<R: Rng + ?Sized>(
    competitors: &[Competitor],
    seeding: &[CompetitorId],
    config: &EngineConfig,
    rng: &mut R,
) -> Result<Bracket, BracketError> {
    let ordered = order_competitors(competitors, seeding, rng)?;
    let shape = BracketShape::for_field(ordered.len());
    if shape.round_sizes.is_empty() {
        log::info!("Field of {} competitor(s) yields an empty draw", shape.field_size);
        return Ok(Bracket::default());
    }

    let mut bracket = build_topology(&shape);
    inject_bronze_match(&mut bracket, &shape, config);
    fill_slots(&mut bracket, &shape, ordered)?;
    assign_courts(&mut bracket, config.courts());

    log::info!(
        "Generated draw: {} competitors, {} matches ({} preliminary, bronze: {})",
        shape.field_size,
        bracket.len(),
        shape.prelim_count,
        shape.has_bronze
    );
    Ok(bracket)
}
