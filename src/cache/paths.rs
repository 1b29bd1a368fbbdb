// Cache path utilities.
// Maps a repository and resource kind to its cache file and remote endpoint.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::CacheError;

/// Sub-resource of a repository that can be cached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Issues,
    Milestones,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 2] = [ResourceKind::Issues, ResourceKind::Milestones];

    /// Endpoint suffix under `/repos/<repo>/`.
    pub fn name(&self) -> &'static str {
        match self {
            ResourceKind::Issues => "issues",
            ResourceKind::Milestones => "milestones",
        }
    }

    /// File name of the cached document.
    pub fn file_name(&self) -> &'static str {
        match self {
            ResourceKind::Issues => "issues.json",
            ResourceKind::Milestones => "milestones.json",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ResourceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ResourceKind::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown resource kind: {}", s))
    }
}

/// Validated `owner/name` style identifier.
///
/// Each `/`-separated segment becomes one directory level under the cache root,
/// so segments that could escape the root or alias another path are rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepositoryId(String);

impl RepositoryId {
    pub fn new(repo: &str) -> Result<Self, CacheError> {
        let invalid = |reason| CacheError::InvalidRepository {
            repo: repo.to_string(),
            reason,
        };

        if repo.is_empty() {
            return Err(invalid("empty identifier"));
        }
        if repo.starts_with('/') {
            return Err(invalid("absolute path"));
        }
        for segment in repo.split('/') {
            match segment {
                "" => return Err(invalid("empty segment")),
                "." | ".." => return Err(invalid("relative segment")),
                _ if segment.chars().any(is_forbidden) => {
                    return Err(invalid("forbidden character"));
                }
                _ => {}
            }
        }

        Ok(Self(repo.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('/')
    }
}

impl fmt::Display for RepositoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for RepositoryId {
    type Err = CacheError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

// Characters that would escape the cache root or change the meaning of the request URI.
fn is_forbidden(c: char) -> bool {
    matches!(c, '\\' | ':' | '?' | '#' | '%') || c.is_whitespace() || c.is_control()
}

/// Path to a repository's cache directory.
pub fn repo_dir(root: &Path, repo: &RepositoryId) -> PathBuf {
    repo.segments().fold(root.to_path_buf(), |dir, seg| dir.join(seg))
}

/// Path to a cached resource document.
pub fn resource_path(root: &Path, repo: &RepositoryId, kind: ResourceKind) -> PathBuf {
    repo_dir(root, repo).join(kind.file_name())
}

/// Sibling path written during a fetch and renamed into place on success.
pub fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Remote endpoint for a resource.
pub fn resource_uri(api_base: &str, repo: &RepositoryId, kind: ResourceKind) -> String {
    format!("{}/repos/{}/{}", api_base, repo, kind.name())
}
