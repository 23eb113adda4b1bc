use rand::{seq::SliceRandom, Rng};

use crate::models::Candidate;

/// Default shortlist size
pub const DEFAULT_LIMIT: usize = 3;

/// Default number of ingredients a candidate may still be missing
pub const DEFAULT_MAX_MISSING: usize = 2;

/// Narrows matcher results down to a short, shuffled list.
///
/// Keeps candidates missing at most `max_missing` ingredients, shuffles them
/// so the same top result is not always surfaced, then keeps `limit`.
pub fn select<R: Rng + ?Sized>(
    candidates: &[Candidate],
    limit: usize,
    max_missing: usize,
    rng: &mut R,
) -> Vec<Candidate> {
    let mut eligible: Vec<Candidate> = candidates
        .iter()
        .filter(|candidate| candidate.missing_count() <= max_missing)
        .cloned()
        .collect();

    eligible.shuffle(rng);
    eligible.truncate(limit);
    eligible
}
