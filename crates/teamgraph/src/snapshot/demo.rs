//! Built-in demo team.
//!
//! Ten people across five roles. Alice is the best-connected hub, Jack
//! bridges the managers to the QA/DevOps pair, and David and Iris form a
//! designer pair hanging off Alice.

use super::Snapshot;
use crate::domain::{Person, PersonId, PersonRecord};

/// (id, name, email, role, teammates)
const DEMO_TEAM: &[(u64, &str, &str, &str, &[u64])] = &[
    (1, "Alice Chen", "alice@company.com", "Manager", &[2, 3, 4, 10]),
    (2, "Bob Smith", "bob@company.com", "Developer", &[1, 3, 5, 8]),
    (3, "Carol Davis", "carol@company.com", "Developer", &[1, 2, 5]),
    (4, "David Kim", "david@company.com", "Designer", &[1, 9]),
    (5, "Emma Wilson", "emma@company.com", "Developer", &[2, 3]),
    (6, "Frank Lopez", "frank@company.com", "QA", &[7]),
    (7, "Grace Patel", "grace@company.com", "DevOps", &[6, 10]),
    (8, "Henry Zhang", "henry@company.com", "Developer", &[2, 10]),
    (9, "Iris Johnson", "iris@company.com", "Designer", &[4]),
    (10, "Jack Brown", "jack@company.com", "Manager", &[1, 8, 7]),
];

/// The demo team as persistable records, in id order.
pub fn demo_records() -> Vec<PersonRecord> {
    DEMO_TEAM
        .iter()
        .map(|&(id, name, email, role, teammates)| PersonRecord {
            person: Person::new(id, name).with_email(email).with_role(role),
            teammates: teammates.iter().copied().map(PersonId).collect(),
        })
        .collect()
}

/// The demo team as a snapshot.
#[must_use]
pub fn demo_snapshot() -> Snapshot {
    Snapshot::from_records(demo_records())
}
