//! The single mutation boundary for the teammate relation.

use super::Snapshot;
use crate::domain::{NewPerson, Person, PersonId, PersonUpdate};
use crate::error::{Result, SnapshotError};
use std::collections::HashMap;

/// Mutable staging area that produces [`Snapshot`]s.
///
/// Every teammate change is written to both people at once and self-teammate
/// relations are refused, so snapshots built here always satisfy the
/// symmetric, loop-free invariant.
#[derive(Debug, Clone, Default)]
pub struct SnapshotBuilder {
    people: Vec<Person>,
    teammates: Vec<Vec<PersonId>>,
    positions: HashMap<PersonId, usize>,
    /// Highest id ever handed out or inserted.
    last_id: u64,
}

impl SnapshotBuilder {
    /// An empty builder. Generated ids start at 1.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from the contents of an existing snapshot.
    ///
    /// The snapshot's teammate lists are copied as they are; data that was
    /// loaded asymmetric stays asymmetric until changed through the builder.
    #[must_use]
    pub fn from_snapshot(snapshot: &Snapshot) -> Self {
        let mut builder = Self::new();
        for (person, teammates) in snapshot.entries() {
            builder.push(person.clone(), teammates.to_vec());
        }
        builder
    }

    /// Add a person under the next free id.
    pub fn add_person(&mut self, new_person: NewPerson) -> PersonId {
        let id = PersonId(self.last_id + 1);
        self.push(
            Person {
                id,
                name: new_person.name,
                email: new_person.email,
                role: new_person.role,
            },
            Vec::new(),
        );
        tracing::debug!(%id, "Added person");
        id
    }

    /// Add a person that already has an id.
    ///
    /// # Errors
    ///
    /// Returns `SnapshotError::DuplicatePerson` if the id is taken.
    pub fn insert_person(&mut self, person: Person) -> Result<PersonId> {
        let id = person.id;
        if self.positions.contains_key(&id) {
            return Err(SnapshotError::DuplicatePerson(id).into());
        }
        self.push(person, Vec::new());
        Ok(id)
    }

    /// Change a person's attributes. Only fields present in `update` change.
    ///
    /// # Errors
    ///
    /// Returns `SnapshotError::PersonNotFound` for an unknown id.
    pub fn update_person(&mut self, id: PersonId, update: PersonUpdate) -> Result<&Person> {
        let position = self.position(id)?;
        let person = &mut self.people[position];
        if let Some(name) = update.name {
            person.name = name;
        }
        if let Some(email) = update.email {
            person.email = email;
        }
        if let Some(role) = update.role {
            person.role = role;
        }
        Ok(&*person)
    }

    /// Remove a person and every relation pointing at them.
    ///
    /// # Errors
    ///
    /// Returns `SnapshotError::PersonNotFound` for an unknown id.
    pub fn remove_person(&mut self, id: PersonId) -> Result<Person> {
        let position = self.position(id)?;
        let person = self.people.remove(position);
        self.teammates.remove(position);
        for teammates in &mut self.teammates {
            teammates.retain(|&teammate| teammate != id);
        }
        self.reindex();
        tracing::debug!(%id, "Removed person");
        Ok(person)
    }

    /// Record that `a` and `b` work together, on both sides.
    ///
    /// Adding an existing relation is a no-op.
    ///
    /// # Errors
    ///
    /// - `SnapshotError::SelfTeammate` if `a == b`
    /// - `SnapshotError::PersonNotFound` if either person is unknown
    pub fn add_teammate(&mut self, a: PersonId, b: PersonId) -> Result<()> {
        if a == b {
            return Err(SnapshotError::SelfTeammate(a).into());
        }
        let (first, second) = (self.position(a)?, self.position(b)?);
        for (position, other) in [(first, b), (second, a)] {
            let teammates = &mut self.teammates[position];
            if !teammates.contains(&other) {
                teammates.push(other);
            }
        }
        tracing::debug!(%a, %b, "Added teammate relation");
        Ok(())
    }

    /// Remove the relation between `a` and `b` from both sides.
    ///
    /// Removing a relation that does not exist is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `SnapshotError::PersonNotFound` if either person is unknown.
    pub fn remove_teammate(&mut self, a: PersonId, b: PersonId) -> Result<()> {
        let (first, second) = (self.position(a)?, self.position(b)?);
        self.teammates[first].retain(|&teammate| teammate != b);
        self.teammates[second].retain(|&teammate| teammate != a);
        tracing::debug!(%a, %b, "Removed teammate relation");
        Ok(())
    }

    /// Number of people staged.
    #[must_use]
    pub fn len(&self) -> usize {
        self.people.len()
    }

    /// Whether no people are staged.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.people.is_empty()
    }

    /// Freeze the current state into a snapshot.
    #[must_use]
    pub fn build(&self) -> Snapshot {
        Snapshot::from_parts(self.people.clone(), self.teammates.clone())
    }

    fn push(&mut self, person: Person, teammates: Vec<PersonId>) {
        self.last_id = self.last_id.max(person.id.get());
        self.positions.insert(person.id, self.people.len());
        self.people.push(person);
        self.teammates.push(teammates);
    }

    fn position(&self, id: PersonId) -> Result<usize> {
        self.positions
            .get(&id)
            .copied()
            .ok_or_else(|| SnapshotError::PersonNotFound(id).into())
    }

    fn reindex(&mut self) {
        self.positions = self
            .people
            .iter()
            .enumerate()
            .map(|(position, person)| (person.id, position))
            .collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use rstest::{fixture, rstest};

    #[fixture]
    fn trio() -> (SnapshotBuilder, PersonId, PersonId, PersonId) {
        let mut builder = SnapshotBuilder::new();
        let alice = builder.add_person(NewPerson::new("Alice", "alice@company.com", "Manager"));
        let bob = builder.add_person(NewPerson::new("Bob", "bob@company.com", "Developer"));
        let carol = builder.add_person(NewPerson::new("Carol", "carol@company.com", "Developer"));
        (builder, alice, bob, carol)
    }

    fn snapshot_error(result: Result<impl std::fmt::Debug>) -> SnapshotError {
        match result {
            Err(Error::Snapshot(err)) => err,
            other => panic!("expected snapshot error, got {other:?}"),
        }
    }

    #[rstest]
    fn ids_are_sequential_from_one(trio: (SnapshotBuilder, PersonId, PersonId, PersonId)) {
        let (_, alice, bob, carol) = trio;
        assert_eq!((alice, bob, carol), (PersonId(1), PersonId(2), PersonId(3)));
    }

    #[rstest]
    fn add_teammate_writes_both_directions(trio: (SnapshotBuilder, PersonId, PersonId, PersonId)) {
        let (mut builder, alice, bob, _) = trio;

        builder.add_teammate(alice, bob).unwrap();
        builder.add_teammate(bob, alice).unwrap();
        let snapshot = builder.build();

        assert_eq!(snapshot.teammate_ids(alice), &[bob]);
        assert_eq!(snapshot.teammate_ids(bob), &[alice]);
    }

    #[rstest]
    fn self_teammate_is_rejected(trio: (SnapshotBuilder, PersonId, PersonId, PersonId)) {
        let (mut builder, alice, _, _) = trio;

        let err = snapshot_error(builder.add_teammate(alice, alice));

        assert_eq!(err, SnapshotError::SelfTeammate(alice));
        assert!(builder.build().teammate_ids(alice).is_empty());
    }

    #[rstest]
    fn unknown_people_are_rejected(trio: (SnapshotBuilder, PersonId, PersonId, PersonId)) {
        let (mut builder, alice, _, _) = trio;

        let err = snapshot_error(builder.add_teammate(alice, PersonId(99)));

        assert_eq!(err, SnapshotError::PersonNotFound(PersonId(99)));
        assert!(builder.build().teammate_ids(alice).is_empty());
    }

    #[rstest]
    fn remove_teammate_clears_both_sides(trio: (SnapshotBuilder, PersonId, PersonId, PersonId)) {
        let (mut builder, alice, bob, carol) = trio;
        builder.add_teammate(alice, bob).unwrap();
        builder.add_teammate(alice, carol).unwrap();

        builder.remove_teammate(bob, alice).unwrap();
        let snapshot = builder.build();

        assert_eq!(snapshot.teammate_ids(alice), &[carol]);
        assert!(snapshot.teammate_ids(bob).is_empty());
    }

    #[rstest]
    fn remove_person_drops_their_relations(trio: (SnapshotBuilder, PersonId, PersonId, PersonId)) {
        let (mut builder, alice, bob, carol) = trio;
        builder.add_teammate(alice, bob).unwrap();
        builder.add_teammate(bob, carol).unwrap();

        let removed = builder.remove_person(bob).unwrap();
        let snapshot = builder.build();

        assert_eq!(removed.name, "Bob");
        assert_eq!(snapshot.len(), 2);
        assert!(snapshot.teammate_ids(alice).is_empty());
        assert!(snapshot.teammate_ids(carol).is_empty());
        assert_eq!(snapshot.person(carol).unwrap().name, "Carol");
    }

    #[rstest]
    fn ids_are_not_reused_after_removal(trio: (SnapshotBuilder, PersonId, PersonId, PersonId)) {
        let (mut builder, _, _, carol) = trio;
        builder.remove_person(carol).unwrap();

        let dave = builder.add_person(NewPerson::new("Dave", "dave@company.com", "QA"));

        assert_eq!(dave, PersonId(4));
    }

    #[rstest]
    fn update_changes_only_given_fields(trio: (SnapshotBuilder, PersonId, PersonId, PersonId)) {
        let (mut builder, alice, _, _) = trio;

        let updated = builder
            .update_person(
                alice,
                PersonUpdate {
                    role: Some(Some("Director".to_string())),
                    email: Some(None),
                    ..PersonUpdate::default()
                },
            )
            .unwrap();

        assert_eq!(updated.name, "Alice");
        assert_eq!(updated.role.as_deref(), Some("Director"));
        assert_eq!(updated.email, None);
    }

    #[test]
    fn insert_person_rejects_duplicates_and_advances_ids() {
        let mut builder = SnapshotBuilder::new();
        builder.insert_person(Person::new(10, "Ten")).unwrap();

        let err = snapshot_error(builder.insert_person(Person::new(10, "Again")));
        let next = builder.add_person(NewPerson::default());

        assert_eq!(err, SnapshotError::DuplicatePerson(PersonId(10)));
        assert_eq!(next, PersonId(11));
    }

    #[test]
    fn from_snapshot_round_trips() {
        let mut builder = SnapshotBuilder::new();
        let a = builder.add_person(NewPerson::new("A", "a@x", "QA"));
        let b = builder.add_person(NewPerson::new("B", "b@x", "QA"));
        builder.add_teammate(a, b).unwrap();

        let copy = SnapshotBuilder::from_snapshot(&builder.build()).build();

        assert_eq!(copy.teammate_ids(a), &[b]);
        assert_eq!(copy.len(), 2);
    }
}
