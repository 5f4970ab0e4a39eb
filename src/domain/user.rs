use serde::{Deserialize, Serialize};

pub type UserId = u64;

/// Display name used when a record points at a user that is not loaded.
pub const UNKNOWN_USER: &str = "Unknown";

/// A member of the household. Reference data: the ledger never mutates users.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
}

impl User {
    pub fn new(id: UserId, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
        }
    }
}
