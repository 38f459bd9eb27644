//! crates/daily_spark_core/src/selection.rs
//!
//! The quote selection policy: a plain set difference over a bounded
//! history window, then a uniform random pick.

use rand::seq::IndexedRandom;
use rand::Rng;
use std::collections::HashSet;
use uuid::Uuid;

/// Pick a quote id for a session.
///
/// Candidates are `universe` minus `recent`. If every quote has been shown
/// recently the whole universe becomes eligible again, so repeats are
/// possible but starvation is not. Returns `None` only when `universe` is
/// empty, which callers treat as a configuration error.
pub fn choose_quote_id<R: Rng + ?Sized>(
    universe: &[Uuid],
    recent: &[Uuid],
    rng: &mut R,
) -> Option<Uuid> {
    if universe.is_empty() {
        return None;
    }

    let recent: HashSet<&Uuid> = recent.iter().collect();
    let candidates: Vec<Uuid> = universe
        .iter()
        .filter(|id| !recent.contains(id))
        .copied()
        .collect();

    let pool: &[Uuid] = if candidates.is_empty() {
        universe
    } else {
        &candidates
    };
    pool.choose(rng).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(n: usize) -> Vec<Uuid> {
        (0..n).map(|_| Uuid::new_v4()).collect()
    }

    #[test]
    fn chosen_id_is_always_in_universe() {
        let universe = ids(10);
        let recent = vec![universe[0], universe[1]];
        let mut rng = rand::rng();
        for _ in 0..100 {
            let chosen = choose_quote_id(&universe, &recent, &mut rng).unwrap();
            assert!(universe.contains(&chosen));
        }
    }

    #[test]
    fn recent_quotes_are_excluded_while_alternatives_exist() {
        let universe = ids(5);
        let recent = universe[..4].to_vec();
        let mut rng = rand::rng();
        for _ in 0..50 {
            let chosen = choose_quote_id(&universe, &recent, &mut rng).unwrap();
            assert_eq!(chosen, universe[4]);
        }
    }

    #[test]
    fn single_remaining_candidate_is_deterministic() {
        // universe = {Q1, Q2, Q3}, recently shown [Q1, Q2] => must pick Q3
        let universe = ids(3);
        let recent = vec![universe[0], universe[1]];
        let mut rng = rand::rng();
        let chosen = choose_quote_id(&universe, &recent, &mut rng).unwrap();
        assert_eq!(chosen, universe[2]);
    }

    #[test]
    fn falls_back_to_full_universe_when_everything_is_recent() {
        let universe = ids(3);
        let recent = universe.clone();
        let mut rng = rand::rng();
        let chosen = choose_quote_id(&universe, &recent, &mut rng).unwrap();
        assert!(universe.contains(&chosen));
    }

    #[test]
    fn empty_universe_yields_none() {
        let mut rng = rand::rng();
        assert!(choose_quote_id(&[], &ids(2), &mut rng).is_none());
    }
}
