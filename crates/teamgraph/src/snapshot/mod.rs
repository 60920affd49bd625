//! Point-in-time snapshots of the team graph and the providers that load them.
//!
//! A [`Snapshot`] is immutable: people in load order, each with the ordered,
//! deduplicated list of teammate ids stored on their side of the relation.
//! Queries never mutate it and never keep state beyond a single call, so a
//! fresh snapshot is taken per top-level query (or batch of related queries)
//! and dropped afterwards.
//!
//! Changes go through [`SnapshotBuilder`], the single place where the
//! teammate relation is written, always in both directions.
//!
//! # Providers
//!
//! The engine consumes snapshots through [`SnapshotProvider`]:
//!
//! - [`JsonlSnapshotProvider`]: reads a JSONL people file
//! - [`InMemorySnapshotProvider`]: hands out copies of a prepared snapshot
//!
//! # Example
//!
//! ```
//! use teamgraph::domain::NewPerson;
//! use teamgraph::snapshot::SnapshotBuilder;
//!
//! # fn main() -> teamgraph::error::Result<()> {
//! let mut builder = SnapshotBuilder::new();
//! let alice = builder.add_person(NewPerson::new("Alice", "alice@company.com", "Manager"));
//! let bob = builder.add_person(NewPerson::new("Bob", "bob@company.com", "Developer"));
//! builder.add_teammate(alice, bob)?;
//!
//! let snapshot = builder.build();
//! assert_eq!(snapshot.teammate_ids(bob), &[alice]);
//! # Ok(())
//! # }
//! ```

mod builder;
pub mod demo;
mod jsonl;

pub use builder::SnapshotBuilder;
pub use jsonl::{load_snapshot_from_jsonl, save_snapshot_to_jsonl, JsonlSnapshotProvider, LoadWarning};

use crate::domain::{Person, PersonId, PersonRecord};
use crate::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::{HashMap, HashSet};

/// Source of snapshots for the query engine.
///
/// Implementations do all blocking work (file reads, network) here, before
/// the synchronous engine runs. Each call must return a self-consistent view.
#[async_trait]
pub trait SnapshotProvider: Send + Sync {
    /// Load the current state of the graph.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing data cannot be read at all. Damaged
    /// individual entries are skipped, not reported as errors.
    async fn load_snapshot(&self) -> Result<Snapshot>;
}

/// Immutable view of all people and their direct teammates.
#[derive(Debug, Clone)]
pub struct Snapshot {
    people: Vec<Person>,
    /// Teammate ids per person, parallel to `people`.
    teammates: Vec<Vec<PersonId>>,
    positions: HashMap<PersonId, usize>,
    loaded_at: DateTime<Utc>,
}

impl Snapshot {
    /// A snapshot with no people.
    #[must_use]
    pub fn empty() -> Self {
        Self::from_parts(Vec::new(), Vec::new())
    }

    /// Build a snapshot from people records, in the given order.
    ///
    /// The first record for an id wins; later duplicates are dropped. Each
    /// teammate list is deduplicated keeping first occurrences. Nothing else
    /// is validated: asymmetric lists, self-references and ids of unknown
    /// people are kept exactly as given.
    pub fn from_records(records: impl IntoIterator<Item = PersonRecord>) -> Self {
        let mut people = Vec::new();
        let mut teammates = Vec::new();
        let mut seen = HashSet::new();

        for record in records {
            if !seen.insert(record.person.id) {
                tracing::debug!(id = %record.person.id, "Dropping duplicate person record");
                continue;
            }
            let mut listed = HashSet::new();
            let ids = record
                .teammates
                .into_iter()
                .filter(|id| listed.insert(*id))
                .collect();
            people.push(record.person);
            teammates.push(ids);
        }

        Self::from_parts(people, teammates)
    }

    /// Callers guarantee unique ids and deduplicated teammate lists.
    pub(crate) fn from_parts(people: Vec<Person>, teammates: Vec<Vec<PersonId>>) -> Self {
        debug_assert_eq!(people.len(), teammates.len());
        let positions = people
            .iter()
            .enumerate()
            .map(|(position, person)| (person.id, position))
            .collect();

        Self {
            people,
            teammates,
            positions,
            loaded_at: Utc::now(),
        }
    }

    /// When this snapshot was taken.
    #[must_use]
    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }

    /// Number of people.
    #[must_use]
    pub fn len(&self) -> usize {
        self.people.len()
    }

    /// Whether the snapshot has no people.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.people.is_empty()
    }

    /// All people in snapshot order.
    #[must_use]
    pub fn people(&self) -> &[Person] {
        &self.people
    }

    /// People paired with their stored teammate ids, in snapshot order.
    pub fn entries(&self) -> impl Iterator<Item = (&Person, &[PersonId])> {
        self.people
            .iter()
            .zip(self.teammates.iter().map(Vec::as_slice))
    }

    /// Whether a person with this id exists.
    #[must_use]
    pub fn contains(&self, id: PersonId) -> bool {
        self.positions.contains_key(&id)
    }

    /// Look up a person by id.
    #[must_use]
    pub fn person(&self, id: PersonId) -> Option<&Person> {
        self.positions.get(&id).map(|&position| &self.people[position])
    }

    /// Teammate ids exactly as stored for `id`; empty for unknown ids.
    #[must_use]
    pub fn teammate_ids(&self, id: PersonId) -> &[PersonId] {
        self.positions
            .get(&id)
            .map(|&position| self.teammates[position].as_slice())
            .unwrap_or_default()
    }

    /// Teammates of `id` that exist in this snapshot.
    #[must_use]
    pub fn teammates(&self, id: PersonId) -> Vec<&Person> {
        self.teammate_ids(id)
            .iter()
            .filter_map(|&teammate| self.person(teammate))
            .collect()
    }

    /// First person whose name matches exactly.
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<&Person> {
        self.people.iter().find(|person| person.name == name)
    }

    /// People whose name contains `term`, ignoring case.
    #[must_use]
    pub fn search(&self, term: &str) -> Vec<&Person> {
        let term = term.to_lowercase();
        self.people
            .iter()
            .filter(|person| person.name.to_lowercase().contains(&term))
            .collect()
    }

    /// People holding exactly this role.
    #[must_use]
    pub fn people_with_role(&self, role: &str) -> Vec<&Person> {
        self.people
            .iter()
            .filter(|person| person.role.as_deref() == Some(role))
            .collect()
    }

    /// The snapshot as persistable records, in snapshot order.
    pub fn records(&self) -> impl Iterator<Item = PersonRecord> + '_ {
        self.entries().map(|(person, teammates)| PersonRecord {
            person: person.clone(),
            teammates: teammates.to_vec(),
        })
    }
}

impl Default for Snapshot {
    fn default() -> Self {
        Self::empty()
    }
}

/// Provider that returns copies of a fixed snapshot.
///
/// Useful for tests and for serving the built-in demo data.
#[derive(Debug, Clone)]
pub struct InMemorySnapshotProvider {
    snapshot: Snapshot,
}

impl InMemorySnapshotProvider {
    /// Serve copies of `snapshot`.
    #[must_use]
    pub fn new(snapshot: Snapshot) -> Self {
        Self { snapshot }
    }
}

#[async_trait]
impl SnapshotProvider for InMemorySnapshotProvider {
    async fn load_snapshot(&self) -> Result<Snapshot> {
        Ok(self.snapshot.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    fn record(id: u64, name: &str, role: Option<&str>, teammates: &[u64]) -> PersonRecord {
        let mut person = Person::new(id, name);
        person.role = role.map(str::to_string);
        PersonRecord {
            person,
            teammates: teammates.iter().copied().map(PersonId).collect(),
        }
    }

    #[fixture]
    fn snapshot() -> Snapshot {
        Snapshot::from_records([
            record(1, "Alice Chen", Some("Manager"), &[2, 3]),
            record(2, "Bob Smith", Some("Developer"), &[1]),
            record(3, "Carol Davis", Some("Developer"), &[1]),
            record(4, "Dan", None, &[]),
        ])
    }

    #[rstest]
    fn lookups_by_id(snapshot: Snapshot) {
        assert_eq!(snapshot.len(), 4);
        assert_eq!(snapshot.person(PersonId(2)).unwrap().name, "Bob Smith");
        assert!(snapshot.person(PersonId(99)).is_none());
        assert!(snapshot.contains(PersonId(4)));
    }

    #[rstest]
    fn unknown_id_has_no_teammates(snapshot: Snapshot) {
        assert!(snapshot.teammate_ids(PersonId(42)).is_empty());
        assert!(snapshot.teammates(PersonId(42)).is_empty());
    }

    #[rstest]
    #[case::lowercase("bob", &[2])]
    #[case::mixed_case("cHeN", &[1])]
    #[case::shared_fragment("a", &[1, 3, 4])]
    #[case::no_match("zed", &[])]
    fn search_is_case_insensitive(snapshot: Snapshot, #[case] term: &str, #[case] expected: &[u64]) {
        let ids: Vec<u64> = snapshot.search(term).iter().map(|p| p.id.get()).collect();
        assert_eq!(ids, expected);
    }

    #[rstest]
    fn role_and_name_lookups(snapshot: Snapshot) {
        assert_eq!(snapshot.people_with_role("Developer").len(), 2);
        assert!(snapshot.people_with_role("QA").is_empty());
        assert_eq!(snapshot.find_by_name("Dan").unwrap().id, PersonId(4));
        assert!(snapshot.find_by_name("dan").is_none());
    }

    #[test]
    fn from_records_dedupes_people_and_teammates() {
        let snapshot = Snapshot::from_records([
            record(1, "First", None, &[2, 2, 3, 2]),
            record(1, "Second", None, &[]),
            record(2, "Bob", None, &[1]),
        ]);

        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot.person(PersonId(1)).unwrap().name, "First");
        assert_eq!(snapshot.teammate_ids(PersonId(1)), &[PersonId(2), PersonId(3)]);
    }

    #[rstest]
    fn records_preserve_order_and_lists(snapshot: Snapshot) {
        let records: Vec<PersonRecord> = snapshot.records().collect();
        let rebuilt = Snapshot::from_records(records.clone());

        assert_eq!(records[0].teammates, vec![PersonId(2), PersonId(3)]);
        assert_eq!(rebuilt.people(), snapshot.people());
    }

    #[tokio::test]
    async fn in_memory_provider_hands_out_copies() {
        let provider = InMemorySnapshotProvider::new(Snapshot::from_records([record(
            7,
            "Solo",
            None,
            &[],
        )]));

        let first = provider.load_snapshot().await.unwrap();
        let second = provider.load_snapshot().await.unwrap();

        assert_eq!(first.people(), second.people());
    }
}
