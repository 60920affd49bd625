//! Whole-graph aggregates: rankings, role counts, isolation and export.

use super::GraphIndex;
use crate::domain::{ConnectionCount, GraphEdge, GraphNode, GraphView, Person, PersonId, RoleCount};
use crate::snapshot::Snapshot;
use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};

/// Everyone with their teammate count, most connected first.
///
/// Equal counts keep snapshot order.
pub(crate) fn connection_ranking(snapshot: &Snapshot, index: &GraphIndex) -> Vec<ConnectionCount> {
    let mut ranking: Vec<ConnectionCount> = snapshot
        .people()
        .iter()
        .map(|person| ConnectionCount {
            id: person.id,
            name: person.name.clone(),
            connections: index.degree(person.id),
        })
        .collect();
    ranking.sort_by(|a, b| b.connections.cmp(&a.connections));
    ranking
}

/// People per non-empty role, most common first.
///
/// People without a role are left out entirely. Equal counts keep the order
/// in which roles first appear in the snapshot.
pub(crate) fn role_distribution(snapshot: &Snapshot) -> Vec<RoleCount> {
    let mut roles: Vec<RoleCount> = Vec::new();
    let mut slots: HashMap<&str, usize> = HashMap::new();

    for role in snapshot.people().iter().filter_map(Person::role_label) {
        match slots.entry(role) {
            Entry::Occupied(slot) => roles[*slot.get()].count += 1,
            Entry::Vacant(slot) => {
                slot.insert(roles.len());
                roles.push(RoleCount {
                    role: role.to_string(),
                    count: 1,
                });
            }
        }
    }

    roles.sort_by(|a, b| b.count.cmp(&a.count));
    roles
}

/// Undirected relations, counted as the sum of all neighbor counts halved.
///
/// Exact only while every relation is stored on both sides. One-sided
/// entries each add half a relation and the result rounds down.
pub(crate) fn total_relationships(snapshot: &Snapshot, index: &GraphIndex) -> usize {
    let entries: usize = snapshot
        .people()
        .iter()
        .map(|person| index.degree(person.id))
        .sum();
    entries / 2
}

/// People with no teammates, in snapshot order.
pub(crate) fn isolated_people<'a>(snapshot: &'a Snapshot, index: &GraphIndex) -> Vec<&'a Person> {
    snapshot
        .people()
        .iter()
        .filter(|person| index.degree(person.id) == 0)
        .collect()
}

/// Nodes for every person and each undirected relation once.
///
/// An edge keeps the direction in which it was first met while walking the
/// snapshot. Self-references are not drawn.
pub(crate) fn graph_view(snapshot: &Snapshot, index: &GraphIndex) -> GraphView {
    let nodes = snapshot
        .people()
        .iter()
        .map(|person| GraphNode {
            id: person.id,
            label: person.name.clone(),
            role: person.role_label().unwrap_or("Unknown").to_string(),
            email: person.email.clone().unwrap_or_default(),
            teammate_count: index.degree(person.id),
        })
        .collect();

    let mut drawn: HashSet<(PersonId, PersonId)> = HashSet::new();
    let mut edges = Vec::new();
    for person in snapshot.people() {
        for teammate in index.neighbors(person.id) {
            if teammate == person.id {
                continue;
            }
            if drawn.insert((person.id.min(teammate), person.id.max(teammate))) {
                edges.push(GraphEdge {
                    from: person.id,
                    to: teammate,
                });
            }
        }
    }

    GraphView { nodes, edges }
}
