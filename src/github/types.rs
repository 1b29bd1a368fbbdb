// GitHub API entity types.
// Structs for the issue and milestone documents stored in the cache.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// GitHub user, as embedded in issues and milestones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub login: String,
    pub html_url: String,
}

/// GitHub issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    /// Per-repository issue number.
    pub number: u64,
    pub id: u64,
    pub html_url: String,
    pub title: String,
    /// `open` or `closed`.
    pub state: String,
    pub created_at: DateTime<Utc>,
    pub user: User,
    /// `None` when unassigned.
    #[serde(default)]
    pub assignee: Option<User>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub body: String,
}

/// GitHub milestone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Milestone {
    pub number: u64,
    pub id: u64,
    pub html_url: String,
    pub title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
    pub creator: User,
    pub state: String,
    pub created_at: DateTime<Utc>,
}

// GitHub sends null for empty issue bodies and milestone descriptions.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
