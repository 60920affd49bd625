//! Read-only queries over a snapshot.
//!
//! [`TeamGraph`] pairs a borrowed [`Snapshot`] with a [`GraphIndex`] built
//! from it and answers every analytical query the application needs:
//!
//! - shortest path and degrees of separation (breadth-first search)
//! - friend-of-friend suggestions ranked by mutual teammates
//! - connection ranking, role distribution, isolation and relationship totals
//! - a node/edge export and summary statistics
//!
//! Queries are synchronous and never fail. Unknown ids and disconnected
//! people produce empty results or `None`, never errors.
//!
//! # Example
//!
//! ```
//! use teamgraph::graph::TeamGraph;
//! use teamgraph::snapshot::demo::demo_snapshot;
//! use teamgraph::domain::PersonId;
//!
//! let snapshot = demo_snapshot();
//! let graph = TeamGraph::new(&snapshot);
//!
//! let names: Vec<&str> = graph
//!     .shortest_path(PersonId(9), PersonId(6))
//!     .iter()
//!     .map(|person| person.name.as_str())
//!     .collect();
//! assert_eq!(names.first(), Some(&"Iris Johnson"));
//! assert_eq!(graph.degrees_of_separation(PersonId(9), PersonId(6)), Some(5));
//! ```

mod aggregate;
mod index;
mod path;
mod suggest;

pub use index::GraphIndex;
pub use suggest::DEFAULT_SUGGESTION_LIMIT;

use crate::domain::{
    ConnectionCount, GraphStats, GraphView, Person, PersonId, RoleCount, Suggestion,
};
use crate::snapshot::Snapshot;

/// Number of people listed in [`GraphStats::top_connections`].
pub const TOP_CONNECTIONS: usize = 5;

/// Query engine over one snapshot.
///
/// Building it indexes the snapshot once; every query afterwards is a pure
/// lookup against that index.
#[derive(Debug, Clone)]
pub struct TeamGraph<'a> {
    snapshot: &'a Snapshot,
    index: GraphIndex,
}

impl<'a> TeamGraph<'a> {
    /// Index `snapshot` for querying.
    #[must_use]
    pub fn new(snapshot: &'a Snapshot) -> Self {
        let index = GraphIndex::build(snapshot);
        tracing::debug!(
            people = index.node_count(),
            entries = index.entry_count(),
            "Indexed snapshot"
        );
        Self { snapshot, index }
    }

    /// The snapshot being queried.
    #[must_use]
    pub fn snapshot(&self) -> &'a Snapshot {
        self.snapshot
    }

    /// The adjacency index.
    #[must_use]
    pub fn index(&self) -> &GraphIndex {
        &self.index
    }

    /// People along a shortest path from `from` to `to`, both included.
    ///
    /// `[from]` when both ids are the same person; empty when either id is
    /// unknown or the two are in different components.
    #[must_use]
    pub fn shortest_path(&self, from: PersonId, to: PersonId) -> Vec<&'a Person> {
        let path: Vec<&'a Person> = path::shortest_path(&self.index, from, to)
            .into_iter()
            .filter_map(|id| self.snapshot.person(id))
            .collect();
        tracing::debug!(%from, %to, hops = path.len().saturating_sub(1), found = !path.is_empty(), "Shortest path");
        path
    }

    /// Hops on a shortest path, `None` when no path exists.
    #[must_use]
    pub fn degrees_of_separation(&self, from: PersonId, to: PersonId) -> Option<usize> {
        path::degrees_of_separation(&self.index, from, to)
    }

    /// Up to `limit` people two hops from `person`, most mutual teammates
    /// first, ties in first-discovery order.
    #[must_use]
    pub fn suggest(&self, person: PersonId, limit: usize) -> Vec<Suggestion> {
        suggest::suggest(&self.index, person, limit)
            .into_iter()
            .filter_map(|(id, mutual_connections)| {
                self.snapshot.person(id).map(|candidate| Suggestion {
                    id,
                    name: candidate.name.clone(),
                    mutual_connections,
                })
            })
            .collect()
    }

    /// [`suggest`](Self::suggest) with [`DEFAULT_SUGGESTION_LIMIT`].
    #[must_use]
    pub fn suggest_default(&self, person: PersonId) -> Vec<Suggestion> {
        self.suggest(person, DEFAULT_SUGGESTION_LIMIT)
    }

    /// Everyone with their teammate count, most connected first.
    #[must_use]
    pub fn connection_ranking(&self) -> Vec<ConnectionCount> {
        aggregate::connection_ranking(self.snapshot, &self.index)
    }

    /// People per non-empty role, most common first.
    #[must_use]
    pub fn role_distribution(&self) -> Vec<RoleCount> {
        aggregate::role_distribution(self.snapshot)
    }

    /// Number of undirected teammate relations.
    ///
    /// Computed as half the sum of all teammate counts, so it is only exact
    /// when every relation is stored on both sides.
    #[must_use]
    pub fn total_relationships(&self) -> usize {
        aggregate::total_relationships(self.snapshot, &self.index)
    }

    /// People with no teammates, in snapshot order.
    #[must_use]
    pub fn isolated_people(&self) -> Vec<&'a Person> {
        aggregate::isolated_people(self.snapshot, &self.index)
    }

    /// Node and edge lists for visualisation.
    #[must_use]
    pub fn graph_view(&self) -> GraphView {
        aggregate::graph_view(self.snapshot, &self.index)
    }

    /// Dashboard summary.
    #[must_use]
    pub fn stats(&self) -> GraphStats {
        let mut top_connections = self.connection_ranking();
        top_connections.truncate(TOP_CONNECTIONS);

        GraphStats {
            people: self.snapshot.len(),
            relationships: self.total_relationships(),
            isolated: self.isolated_people().len(),
            components: self.index.component_count(),
            top_connections,
            roles: self.role_distribution(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::demo::demo_snapshot;
    use rstest::rstest;

    #[rstest]
    #[case::alice_to_bob(1, 2, Some(1))]
    #[case::iris_to_frank(9, 6, Some(5))]
    #[case::emma_to_grace(5, 7, Some(4))]
    #[case::same_person(4, 4, Some(0))]
    #[case::unknown(1, 99, None)]
    fn demo_degrees(#[case] from: u64, #[case] to: u64, #[case] expected: Option<usize>) {
        let snapshot = demo_snapshot();
        let graph = TeamGraph::new(&snapshot);

        assert_eq!(graph.degrees_of_separation(PersonId(from), PersonId(to)), expected);
    }

    #[test]
    fn demo_path_walks_existing_relations() {
        let snapshot = demo_snapshot();
        let graph = TeamGraph::new(&snapshot);

        let path = graph.shortest_path(PersonId(9), PersonId(6));

        assert_eq!(path.len(), 6);
        for pair in path.windows(2) {
            assert!(snapshot.teammate_ids(pair[0].id).contains(&pair[1].id));
        }
    }

    #[test]
    fn demo_suggestions_for_alice() {
        let snapshot = demo_snapshot();
        let graph = TeamGraph::new(&snapshot);

        let suggestions: Vec<(u64, usize)> = graph
            .suggest_default(PersonId(1))
            .iter()
            .map(|s| (s.id.get(), s.mutual_connections))
            .collect();

        // Bob and Jack both know Henry; Bob and Carol both know Emma.
        assert_eq!(suggestions, vec![(5, 2), (8, 2), (9, 1), (7, 1)]);
    }

    #[test]
    fn demo_stats() {
        let snapshot = demo_snapshot();
        let graph = TeamGraph::new(&snapshot);

        let stats = graph.stats();

        assert_eq!(stats.people, 10);
        assert_eq!(stats.relationships, 12);
        assert_eq!(stats.isolated, 0);
        assert_eq!(stats.components, 1);
        assert_eq!(stats.top_connections.len(), TOP_CONNECTIONS);
        assert_eq!(stats.top_connections[0].name, "Alice Chen");
        assert_eq!(stats.roles[0].role, "Developer");
        assert_eq!(stats.roles[0].count, 4);
    }

    #[test]
    fn empty_snapshot_answers_with_empty_results() {
        let snapshot = Snapshot::empty();
        let graph = TeamGraph::new(&snapshot);

        assert!(graph.connection_ranking().is_empty());
        assert!(graph.suggest_default(PersonId(1)).is_empty());
        assert_eq!(graph.total_relationships(), 0);
        assert_eq!(graph.stats().components, 0);
    }
}
