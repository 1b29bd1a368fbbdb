// Cache module for local filesystem caching.
// Stores raw GitHub API documents so repeated runs never go back to the network.

pub mod paths;
pub mod store;

pub use paths::{RepositoryId, ResourceKind};
pub use store::{COPY_BUFFER_SIZE, ResourceCache};
