//! Shortest paths by breadth-first search.

use super::GraphIndex;
use crate::domain::PersonId;
use std::collections::{HashMap, VecDeque};

/// Ids along a shortest path from `from` to `to`, both ends included.
///
/// Returns `[from]` when the ends coincide and an empty vector when either
/// end is unknown or `to` is unreachable. Neighbors are explored in index
/// order; when several shortest paths exist any one of them may come back.
pub(crate) fn shortest_path(index: &GraphIndex, from: PersonId, to: PersonId) -> Vec<PersonId> {
    if !index.contains(from) || !index.contains(to) {
        return Vec::new();
    }
    if from == to {
        return vec![from];
    }

    // Doubles as the visited set.
    let mut parents: HashMap<PersonId, Option<PersonId>> = HashMap::from([(from, None)]);
    let mut frontier = VecDeque::from([from]);

    'search: while let Some(current) = frontier.pop_front() {
        for neighbor in index.neighbors(current) {
            if parents.contains_key(&neighbor) {
                continue;
            }
            parents.insert(neighbor, Some(current));
            if neighbor == to {
                break 'search;
            }
            frontier.push_back(neighbor);
        }
    }

    if !parents.contains_key(&to) {
        return Vec::new();
    }

    let mut path = vec![to];
    let mut step = to;
    while let Some(&Some(parent)) = parents.get(&step) {
        path.push(parent);
        step = parent;
    }
    path.reverse();
    path
}

/// Edge count of a shortest path, `None` when there is no path.
pub(crate) fn degrees_of_separation(
    index: &GraphIndex,
    from: PersonId,
    to: PersonId,
) -> Option<usize> {
    shortest_path(index, from, to).len().checked_sub(1)
}
