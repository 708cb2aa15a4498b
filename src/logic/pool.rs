//! Competitor pool: turn the raw registrations into the order slots are filled in.

use crate::models::{BracketError, Competitor, CompetitorId};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashSet;

/// Order the pool for slot filling.
///
/// 1. Reject duplicate registrations and seeds that are unknown or listed twice.
/// 2. Without seeding, shuffle everyone.
/// 3. With seeding, seeded ids go first in the given order, then everyone else shuffled.
pub fn order_competitors<R: Rng + ?Sized>(
    competitors: &[Competitor],
    seeding: &[CompetitorId],
    rng: &mut R,
) -> Result<Vec<CompetitorId>, BracketError> {
    let mut registered = HashSet::with_capacity(competitors.len());
    for c in competitors {
        if !registered.insert(c.id.as_str()) {
            return Err(BracketError::DuplicateCompetitor(c.id.clone()));
        }
    }

    let mut seeded = HashSet::with_capacity(seeding.len());
    for id in seeding {
        if !registered.contains(id.as_str()) {
            return Err(BracketError::UnknownSeed(id.clone()));
        }
        if !seeded.insert(id.as_str()) {
            return Err(BracketError::DuplicateSeed(id.clone()));
        }
    }

    let mut others: Vec<CompetitorId> = competitors
        .iter()
        .filter(|c| !seeded.contains(c.id.as_str()))
        .map(|c| c.id.clone())
        .collect();
    others.shuffle(rng);

    let mut ordered = Vec::with_capacity(competitors.len());
    ordered.extend(seeding.iter().cloned());
    ordered.append(&mut others);
    Ok(ordered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn pool(ids: &[&str]) -> Vec<Competitor> {
        ids.iter().map(|id| Competitor::new(*id)).collect()
    }

    #[test]
    fn keeps_everyone_exactly_once() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut ordered = order_competitors(&pool(&["a", "b", "c", "d", "e"]), &[], &mut rng).unwrap();
        ordered.sort();
        assert_eq!(ordered, vec!["a", "b", "c", "d", "e"]);
    }

    #[test]
    fn seeds_lead_in_given_order() {
        let mut rng = StdRng::seed_from_u64(7);
        let seeding = vec!["d".to_string(), "b".to_string()];
        let ordered = order_competitors(&pool(&["a", "b", "c", "d", "e"]), &seeding, &mut rng).unwrap();
        assert_eq!(&ordered[..2], &["d", "b"]);
        assert_eq!(ordered.len(), 5);
    }

    #[test]
    fn rejects_unknown_and_repeated_seeds() {
        let mut rng = StdRng::seed_from_u64(7);
        let competitors = pool(&["a", "b"]);
        assert_eq!(
            order_competitors(&competitors, &["z".to_string()], &mut rng),
            Err(BracketError::UnknownSeed("z".to_string()))
        );
        assert_eq!(
            order_competitors(&competitors, &["a".to_string(), "a".to_string()], &mut rng),
            Err(BracketError::DuplicateSeed("a".to_string()))
        );
    }

    #[test]
    fn rejects_duplicate_registration() {
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(
            order_competitors(&pool(&["a", "b", "a"]), &[], &mut rng),
            Err(BracketError::DuplicateCompetitor("a".to_string()))
        );
    }
}
