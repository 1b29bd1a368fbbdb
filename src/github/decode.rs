// Decoding of cached resource documents.
// Turns the raw bytes of a cache file into ordered entity lists.

use serde::de::DeserializeOwned;

use crate::error::Result;

use super::types::{Issue, Milestone};

/// Decode a JSON array of issues, preserving document order.
pub fn decode_issues(bytes: &[u8]) -> Result<Vec<Issue>> {
    decode_array(bytes)
}

/// Decode a JSON array of milestones, preserving document order.
pub fn decode_milestones(bytes: &[u8]) -> Result<Vec<Milestone>> {
    decode_array(bytes)
}

fn decode_array<T: DeserializeOwned>(bytes: &[u8]) -> Result<Vec<T>> {
    let items: Vec<T> = serde_json::from_slice(bytes)?;
    Ok(items)
}
