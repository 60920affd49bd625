//! Adjacency index over a snapshot, backed by petgraph.

use crate::domain::PersonId;
use crate::snapshot::Snapshot;
use petgraph::algo;
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::{HashMap, HashSet};

/// Person id -> neighbor ids, built once per snapshot in O(N + E).
///
/// Each stored teammate entry becomes one directed edge, so a node's
/// outgoing edges are exactly the teammate list the snapshot holds for that
/// person. Symmetry is not re-derived: if A lists B but B does not list A,
/// only `A -> B` exists here.
///
/// Teammate ids that name nobody in the snapshot are left out, since no
/// person could be returned for them.
#[derive(Debug, Clone)]
pub struct GraphIndex {
    graph: DiGraph<PersonId, ()>,
    node_map: HashMap<PersonId, NodeIndex>,
}

impl GraphIndex {
    /// Index every person and stored teammate entry of `snapshot`.
    #[must_use]
    pub fn build(snapshot: &Snapshot) -> Self {
        let mut graph = DiGraph::with_capacity(snapshot.len(), 0);
        let node_map: HashMap<PersonId, NodeIndex> = snapshot
            .people()
            .iter()
            .map(|person| (person.id, graph.add_node(person.id)))
            .collect();

        for (person, teammates) in snapshot.entries() {
            let Some(&source) = node_map.get(&person.id) else {
                continue;
            };
            let targets: Vec<NodeIndex> = teammates
                .iter()
                .filter_map(|teammate| {
                    let target = node_map.get(teammate).copied();
                    if target.is_none() {
                        tracing::debug!(person = %person.id, %teammate, "Skipping unknown teammate");
                    }
                    target
                })
                .collect();
            // petgraph walks outgoing edges newest first; add in reverse so
            // neighbors come back in stored order.
            for &target in targets.iter().rev() {
                graph.add_edge(source, target, ());
            }
        }

        Self { graph, node_map }
    }

    /// Whether `id` is a person in the indexed snapshot.
    #[must_use]
    pub fn contains(&self, id: PersonId) -> bool {
        self.node_map.contains_key(&id)
    }

    /// Neighbors of `id` in stored order; nothing for unknown or isolated ids.
    pub fn neighbors(&self, id: PersonId) -> impl Iterator<Item = PersonId> + '_ {
        self.node_map
            .get(&id)
            .into_iter()
            .flat_map(move |&node| self.graph.neighbors(node).map(move |n| self.graph[n]))
    }

    /// Neighbors of `id` as a set.
    #[must_use]
    pub fn neighbor_set(&self, id: PersonId) -> HashSet<PersonId> {
        self.neighbors(id).collect()
    }

    /// Number of neighbors of `id`, 0 for unknown ids.
    #[must_use]
    pub fn degree(&self, id: PersonId) -> usize {
        self.node_map
            .get(&id)
            .map_or(0, |&node| self.graph.edges(node).count())
    }

    /// Number of indexed people.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of directed teammate entries (twice the relation count when
    /// the data is symmetric).
    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Number of connected components, ignoring edge direction.
    #[must_use]
    pub fn component_count(&self) -> usize {
        algo::connected_components(&self.graph)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Person, PersonRecord};
    use rstest::rstest;

    fn snapshot(entries: &[(u64, &[u64])]) -> Snapshot {
        Snapshot::from_records(entries.iter().map(|&(id, teammates)| PersonRecord {
            person: Person::new(id, format!("P{id}")),
            teammates: teammates.iter().copied().map(PersonId).collect(),
        }))
    }

    fn ids(raw: &[u64]) -> Vec<PersonId> {
        raw.iter().copied().map(PersonId).collect()
    }

    #[test]
    fn neighbors_follow_stored_order() {
        let index = GraphIndex::build(&snapshot(&[(1, &[4, 2, 3]), (2, &[1]), (3, &[1]), (4, &[1])]));

        assert_eq!(index.neighbors(PersonId(1)).collect::<Vec<_>>(), ids(&[4, 2, 3]));
    }

    #[rstest]
    #[case::unknown(99)]
    #[case::isolated(5)]
    fn missing_neighbors_are_empty(#[case] id: u64) {
        let index = GraphIndex::build(&snapshot(&[(1, &[2]), (2, &[1]), (5, &[])]));

        assert_eq!(index.neighbors(PersonId(id)).count(), 0);
        assert_eq!(index.degree(PersonId(id)), 0);
    }

    #[test]
    fn asymmetric_entries_are_not_mirrored() {
        let index = GraphIndex::build(&snapshot(&[(1, &[2]), (2, &[])]));

        assert_eq!(index.neighbor_set(PersonId(1)), HashSet::from([PersonId(2)]));
        assert!(index.neighbor_set(PersonId(2)).is_empty());
    }

    #[test]
    fn unknown_teammates_are_left_out() {
        let index = GraphIndex::build(&snapshot(&[(1, &[2, 77]), (2, &[1])]));

        assert_eq!(index.degree(PersonId(1)), 1);
        assert_eq!(index.entry_count(), 2);
    }

    #[test]
    fn components_ignore_direction() {
        let index = GraphIndex::build(&snapshot(&[(1, &[2]), (2, &[]), (3, &[4]), (4, &[3]), (5, &[])]));

        assert_eq!(index.node_count(), 5);
        assert_eq!(index.component_count(), 3);
    }
}
