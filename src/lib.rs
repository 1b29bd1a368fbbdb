// Write-once local cache for GitHub repository resources.
// Fetches issues and milestones once, then serves them from disk for reporting.

pub mod cache;
pub mod config;
pub mod error;
pub mod github;
pub mod logger;
pub mod report;

pub use cache::{RepositoryId, ResourceCache, ResourceKind};
pub use config::CacheConfig;
pub use error::{CacheError, ErrorKind, Result, TransportError};
