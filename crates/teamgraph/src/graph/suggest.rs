//! Friend-of-friend suggestions ranked by mutual teammates.

use super::GraphIndex;
use crate::domain::PersonId;
use std::collections::hash_map::Entry;
use std::collections::HashMap;

/// Number of suggestions returned when the caller does not choose.
pub const DEFAULT_SUGGESTION_LIMIT: usize = 5;

/// Candidates two hops from `person`, with their mutual-teammate counts.
///
/// Only the neighbors of `person`'s direct teammates are considered;
/// `person` and their direct teammates are never candidates. Higher counts
/// come first and equal counts keep the order in which candidates were first
/// reached, so results are deterministic for a given index.
pub(crate) fn suggest(index: &GraphIndex, person: PersonId, limit: usize) -> Vec<(PersonId, usize)> {
    let direct = index.neighbor_set(person);
    if direct.is_empty() {
        return Vec::new();
    }

    let mut candidates: Vec<(PersonId, usize)> = Vec::new();
    let mut slots: HashMap<PersonId, usize> = HashMap::new();

    for teammate in index.neighbors(person) {
        for candidate in index.neighbors(teammate) {
            if candidate == person || direct.contains(&candidate) {
                continue;
            }
            match slots.entry(candidate) {
                Entry::Occupied(slot) => candidates[*slot.get()].1 += 1,
                Entry::Vacant(slot) => {
                    slot.insert(candidates.len());
                    candidates.push((candidate, 1));
                }
            }
        }
    }

    // Stable, so ties stay in discovery order.
    candidates.sort_by(|a, b| b.1.cmp(&a.1));
    candidates.truncate(limit);
    candidates
}
