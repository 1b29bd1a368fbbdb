// Write-once resource store.
// Materializes a resource on disk on first access and serves every later read from the file.

use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use crate::config::CacheConfig;
use crate::error::{CacheError, Result, TransportError};
use crate::github::decode::{decode_issues, decode_milestones};
use crate::github::transport::Transport;
use crate::github::types::{Issue, Milestone};
use crate::logger::{Logger, NoopLogger};

use super::paths::{RepositoryId, ResourceKind, resource_path, resource_uri, temp_path};

/// Size of the buffer used to move a response body to disk.
pub const COPY_BUFFER_SIZE: usize = 8 * 1024;

/// File-backed cache of raw resource documents.
///
/// A document is fetched once through the transport and never re-validated
/// against the remote afterwards. Writes go to a temporary sibling and are
/// renamed into place only after the whole body has been copied, so an
/// interrupted fetch never leaves a file at the canonical path.
pub struct ResourceCache<T> {
    root: PathBuf,
    api_base: String,
    transport: T,
    logger: Arc<dyn Logger>,
    locks: Mutex<HashMap<PathBuf, Arc<Mutex<()>>>>,
}

impl<T: Transport> ResourceCache<T> {
    pub fn new(config: &CacheConfig, transport: T) -> Self {
        Self {
            root: config.cache_root.clone(),
            api_base: config.api_base.clone(),
            transport,
            logger: Arc::new(NoopLogger),
            locks: Mutex::new(HashMap::new()),
        }
    }

    pub fn with_logger(mut self, logger: Arc<dyn Logger>) -> Self {
        self.logger = logger;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Canonical cache file for a resource.
    pub fn path_for(&self, repo: &RepositoryId, kind: ResourceKind) -> PathBuf {
        resource_path(&self.root, repo, kind)
    }

    /// Whether the resource is already materialized on disk.
    pub fn is_cached(&self, repo: &RepositoryId, kind: ResourceKind) -> Result<bool> {
        let path = self.path_for(repo, kind);
        match fs::metadata(&path) {
            Ok(_) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(CacheError::io(path, e)),
        }
    }

    /// Return the raw cached bytes of a resource, fetching it first if absent.
    pub fn fetch(&self, repo: &RepositoryId, kind: ResourceKind) -> Result<Vec<u8>> {
        let path = self.path_for(repo, kind);

        let lock = self.lock_for(&path);
        let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);

        if self.is_cached(repo, kind)? {
            self.logger
                .debug(format_args!("Cache hit for {} {}", repo, kind));
        } else {
            self.materialize(repo, kind, &path)?;
        }

        fs::read(&path).map_err(|e| CacheError::io(&path, e))
    }

    /// Fetch and decode a repository's issues.
    pub fn issues(&self, repo: &RepositoryId) -> Result<Vec<Issue>> {
        let bytes = self.fetch(repo, ResourceKind::Issues)?;
        decode_issues(&bytes)
    }

    /// Fetch and decode a repository's milestones.
    pub fn milestones(&self, repo: &RepositoryId) -> Result<Vec<Milestone>> {
        let bytes = self.fetch(repo, ResourceKind::Milestones)?;
        decode_milestones(&bytes)
    }

    fn lock_for(&self, path: &Path) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(locks.entry(path.to_path_buf()).or_default())
    }

    fn materialize(&self, repo: &RepositoryId, kind: ResourceKind, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| {
                self.logger.error(format_args!(
                    "Failed to create cache directory {}: {}",
                    parent.display(),
                    source
                ));
                CacheError::Path {
                    path: parent.to_path_buf(),
                    source,
                }
            })?;
        }

        let temp = temp_path(path);
        let result = self.download(repo, kind, &temp);
        match result {
            Ok(bytes) => {
                fs::rename(&temp, path).map_err(|e| CacheError::io(path, e))?;
                self.logger.info(format_args!(
                    "Cached {} {} ({} bytes) at {}",
                    repo,
                    kind,
                    bytes,
                    path.display()
                ));
                Ok(())
            }
            Err(e) => {
                if let Err(cleanup) = fs::remove_file(&temp) {
                    if cleanup.kind() != io::ErrorKind::NotFound {
                        self.logger.warn(format_args!(
                            "Failed to remove {}: {}",
                            temp.display(),
                            cleanup
                        ));
                    }
                }
                Err(e)
            }
        }
    }

    fn download(&self, repo: &RepositoryId, kind: ResourceKind, temp: &Path) -> Result<u64> {
        let mut file = File::create(temp).map_err(|e| CacheError::io(temp, e))?;

        let uri = resource_uri(&self.api_base, repo, kind);
        let mut stream = self
            .transport
            .get_stream(&uri)
            .map_err(|source| CacheError::Transport {
                uri: uri.clone(),
                source,
            })?;

        let copied = copy_stream(&mut stream, &mut file).map_err(|e| match e {
            CopyError::Read(source) => CacheError::Transport {
                uri,
                source: TransportError::Stream(source),
            },
            CopyError::Write(source) => CacheError::io(temp, source),
        })?;
        drop(stream);

        file.sync_all().map_err(|e| CacheError::io(temp, e))?;
        Ok(copied)
    }
}

#[derive(Debug)]
enum CopyError {
    Read(io::Error),
    Write(io::Error),
}

/// Copy `reader` into `writer` through a fixed `COPY_BUFFER_SIZE` buffer.
fn copy_stream<R: Read + ?Sized, W: Write + ?Sized>(
    reader: &mut R,
    writer: &mut W,
) -> std::result::Result<u64, CopyError> {
    let mut buf = [0u8; COPY_BUFFER_SIZE];
    let mut total = 0u64;

    loop {
        let n = match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(CopyError::Read(e)),
        };
        writer.write_all(&buf[..n]).map_err(CopyError::Write)?;
        total += n as u64;
    }

    writer.flush().map_err(CopyError::Write)?;
    Ok(total)
}
