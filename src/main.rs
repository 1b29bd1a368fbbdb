// repocache command-line entry point.
// Fetches (or reuses) cached issues and milestones for a repository and prints reports.

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use log::{error, info, warn};

use repocache::github::HttpTransport;
use repocache::logger::{LogFacade, Logger};
use repocache::report::{render_issues, render_milestones};
use repocache::{CacheConfig, CacheError, RepositoryId, ResourceCache, ResourceKind, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum KindArg {
    Issues,
    Milestones,
    All,
}

impl KindArg {
    fn kinds(self) -> Vec<ResourceKind> {
        match self {
            KindArg::Issues => vec![ResourceKind::Issues],
            KindArg::Milestones => vec![ResourceKind::Milestones],
            KindArg::All => ResourceKind::ALL.to_vec(),
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "repocache")]
#[command(about = "Cache GitHub issues and milestones locally and print reports")]
#[command(version)]
struct Args {
    /// Repository as owner/name
    #[arg(default_value = "kubernetes-sigs/kubebuilder")]
    repo: String,

    /// Which resources to report
    #[arg(short, long, value_enum, default_value_t = KindArg::All)]
    kind: KindArg,

    /// Maximum number of issues to print
    #[arg(short, long, default_value_t = 10)]
    limit: usize,

    /// Cache directory (default: $REPOCACHE_CACHE_DIR or the platform cache dir)
    #[arg(long)]
    cache_dir: Option<PathBuf>,

    /// API base URL (default: $REPOCACHE_API_BASE or https://api.github.com)
    #[arg(long)]
    api_base: Option<String>,

    /// Request timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    match run(&args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

/// Returns whether at least one requested report was produced.
fn run(args: &Args) -> Result<bool> {
    let mut config = CacheConfig::from_env()?;
    if let Some(dir) = &args.cache_dir {
        config = config.with_cache_root(dir);
    }
    if let Some(base) = &args.api_base {
        config = config.with_api_base(base);
    }
    if let Some(secs) = args.timeout {
        config = config.with_timeout(Duration::from_secs(secs));
    }

    let repo = RepositoryId::new(&args.repo)?;
    let logger: Arc<dyn Logger> = Arc::new(LogFacade);

    let transport = HttpTransport::new(config.timeout)
        .map_err(|source| CacheError::Transport {
            uri: config.api_base.clone(),
            source,
        })?
        .with_logger(Arc::clone(&logger));
    let cache = ResourceCache::new(&config, transport).with_logger(logger);

    info!("Using cache at {}", cache.root().display());

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut produced = false;

    for kind in args.kind.kinds() {
        let rendered = match kind {
            ResourceKind::Issues => cache.issues(&repo).map(|issues| {
                info!("Found {} issues for {}", issues.len(), repo);
                render_issues(&mut out, &issues, args.limit)
            }),
            ResourceKind::Milestones => cache.milestones(&repo).map(|milestones| {
                info!("Found {} milestones for {}", milestones.len(), repo);
                render_milestones(&mut out, &milestones)
            }),
        };

        match rendered {
            Ok(Ok(())) => produced = true,
            Ok(Err(e)) => error!("Failed to write {} report: {}", kind, e),
            Err(e) => warn!("Failed to get {} for {}: {}", kind, repo, e),
        }
    }

    if let Err(e) = out.flush() {
        error!("Failed to flush output: {}", e);
    }

    Ok(produced)
}
