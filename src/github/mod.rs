// GitHub API module.
// Provides the transport and entity types for the cached REST resources.

pub mod decode;
pub mod transport;
pub mod types;

pub use decode::{decode_issues, decode_milestones};
pub use transport::{BodyStream, HttpTransport, Transport};
pub use types::*;
