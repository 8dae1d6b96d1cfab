//! The persisted document and its records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A short post
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chirp {
    pub id: u64,
    pub body: String,
    pub author_id: u64,
}

/// A stored account. Carries the password hash, so it is never sent to clients as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub email: String,
    pub password_hash: String,
    #[serde(default)]
    pub is_chirpy_red: bool,
}

/// Highest id ever handed out per collection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sequences {
    #[serde(default)]
    pub chirps: u64,
    #[serde(default)]
    pub users: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Chirps,
    Users,
}

/// Ordering of chirp listings, by id
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

/// The whole database: everything in the JSON file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub chirps: BTreeMap<u64, Chirp>,
    #[serde(default)]
    pub users: BTreeMap<u64, User>,
    #[serde(default)]
    pub revoked_tokens: BTreeMap<String, DateTime<Utc>>,
    #[serde(default)]
    pub sequences: Sequences,
}

impl Document {
    /// Id the next insert into `collection` will get.
    ///
    /// Files written before sequences existed have none, so the largest
    /// existing id is taken into account as well.
    pub fn next_id(&self, collection: Collection) -> u64 {
        let (sequence, highest) = match collection {
            Collection::Chirps => (self.sequences.chirps, self.chirps.keys().next_back()),
            Collection::Users => (self.sequences.users, self.users.keys().next_back()),
        };
        sequence.max(highest.copied().unwrap_or(0)) + 1
    }

    /// Reserve the next id of `collection`
    pub(crate) fn claim_id(&mut self, collection: Collection) -> u64 {
        let id = self.next_id(collection);
        match collection {
            Collection::Chirps => self.sequences.chirps = id,
            Collection::Users => self.sequences.users = id,
        }
        id
    }

    pub fn find_user_by_email(&self, email: &str) -> Option<&User> {
        self.users.values().find(|user| user.email == email)
    }
}
