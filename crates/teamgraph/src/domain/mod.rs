//! Domain types for the team graph.
//!
//! People, the records they are persisted as, and the plain result types
//! returned by graph queries. Everything here is `Serialize` so a CLI or an
//! HTTP layer can emit results directly.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique, immutable identifier of a person.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct PersonId(pub u64);

impl PersonId {
    /// Create a new person ID
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// The raw numeric value
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for PersonId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// A team member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    /// Unique identifier
    pub id: PersonId,

    /// Display name
    pub name: String,

    /// Contact address (optional)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Role label such as "Developer" (optional)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

impl Person {
    /// Create a person with only a name.
    pub fn new(id: impl Into<PersonId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: None,
            role: None,
        }
    }

    /// Set the role label.
    #[must_use]
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    /// Set the contact address.
    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// The role label, treating an empty string as absent.
    #[must_use]
    pub fn role_label(&self) -> Option<&str> {
        self.role.as_deref().filter(|role| !role.is_empty())
    }
}

/// One line of the people file: a person plus the ids they list as teammates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonRecord {
    /// The person's attributes
    #[serde(flatten)]
    pub person: Person,

    /// Ids of this person's teammates, as stored on this person's side
    #[serde(default)]
    pub teammates: Vec<PersonId>,
}

/// Data for adding a person through the snapshot builder
#[derive(Debug, Clone, Default)]
pub struct NewPerson {
    /// Display name
    pub name: String,

    /// Contact address (optional)
    pub email: Option<String>,

    /// Role label (optional)
    pub role: Option<String>,
}

impl NewPerson {
    /// Create with name, email and role all given, like the seed data does.
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        role: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: Some(email.into()),
            role: Some(role.into()),
        }
    }
}

/// Data for updating an existing person
#[derive(Debug, Clone, Default)]
pub struct PersonUpdate {
    /// New name (if updating)
    pub name: Option<String>,

    /// New email (if updating, None inside to clear)
    pub email: Option<Option<String>>,

    /// New role (if updating, None inside to clear)
    pub role: Option<Option<String>>,
}

/// A friend-of-friend candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    /// Candidate id
    pub id: PersonId,

    /// Candidate display name
    pub name: String,

    /// How many of the query person's teammates also work with the candidate
    pub mutual_connections: usize,
}

/// A person's entry in the connection ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionCount {
    /// Person id
    pub id: PersonId,

    /// Display name
    pub name: String,

    /// Size of the person's teammate set
    pub connections: usize,
}

/// Number of people holding a role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleCount {
    /// Role label
    pub role: String,

    /// People with this role
    pub count: usize,
}

/// Node of the exported graph view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphNode {
    /// Person id
    pub id: PersonId,

    /// Display name
    pub label: String,

    /// Role label, `"Unknown"` when absent
    pub role: String,

    /// Contact address, empty when absent
    pub email: String,

    /// Number of teammates
    pub teammate_count: usize,
}

/// Undirected edge of the exported graph view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphEdge {
    /// Endpoint the edge was first seen from
    pub from: PersonId,

    /// The other endpoint
    pub to: PersonId,
}

/// Whole-graph export suitable for a visualisation front end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphView {
    /// One node per person, in snapshot order
    pub nodes: Vec<GraphNode>,

    /// Each undirected teammate relation exactly once
    pub edges: Vec<GraphEdge>,
}

/// Dashboard summary of the graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphStats {
    /// Number of people
    pub people: usize,

    /// Undirected teammate relations
    pub relationships: usize,

    /// People without teammates
    pub isolated: usize,

    /// Weakly connected components
    pub components: usize,

    /// Best-connected people, highest first
    pub top_connections: Vec<ConnectionCount>,

    /// People per role, most common first
    pub roles: Vec<RoleCount>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn person_record_round_trips_flattened() {
        let json = r#"{"id":1,"name":"Alice Chen","email":"alice@company.com","role":"Manager","teammates":[2,3]}"#;

        let record: PersonRecord = serde_json::from_str(json).unwrap();

        assert_eq!(record.person.id, PersonId(1));
        assert_eq!(record.person.role.as_deref(), Some("Manager"));
        assert_eq!(record.teammates, vec![PersonId(2), PersonId(3)]);
        assert_eq!(serde_json::to_string(&record).unwrap(), json);
    }

    #[test]
    fn person_record_optional_fields_default() {
        let record: PersonRecord = serde_json::from_str(r#"{"id":9,"name":"Solo"}"#).unwrap();

        assert_eq!(record.person, Person::new(9, "Solo"));
        assert!(record.teammates.is_empty());
    }

    #[test]
    fn empty_role_is_not_a_label() {
        assert_eq!(Person::new(1, "A").with_role("").role_label(), None);
        assert_eq!(Person::new(1, "A").role_label(), None);
        assert_eq!(Person::new(1, "A").with_role("QA").role_label(), Some("QA"));
    }
}
