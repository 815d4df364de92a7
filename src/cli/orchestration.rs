//! Resolve workflow orchestration
//!
//! Combines configuration, command line overrides and the libgit2 history
//! adapter into one resolver call. Kept free of clap so the workflow can be
//! driven programmatically.

use std::path::PathBuf;

use crate::config::load_config;
use crate::error::Result;
use crate::git::Git2History;
use crate::resolver::{Resolution, VersionResolver};

/// Arguments for the resolve workflow
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResolveArgs {
    /// Root of the tree to version
    pub root: PathBuf,

    /// Path to custom config file
    pub config_path: Option<PathBuf>,

    /// Release branch prefix; overrides the configuration
    pub prefix: Option<String>,

    /// Mainline branch; overrides the configuration
    pub mainline: Option<String>,
}

/// Resolve the version of `args.root`
///
/// Settings given on the command line take precedence over the configuration
/// file, which takes precedence over built-in defaults.
pub fn run_resolve(args: ResolveArgs) -> Result<Resolution> {
    let config = load_config(args.config_path.as_deref(), &args.root)?;

    let prefix = args.prefix.unwrap_or(config.prefix);
    let mainline = args.mainline.unwrap_or(config.mainline);
    tracing::debug!(root = %args.root.display(), %prefix, %mainline, "resolving version");

    let resolver = VersionResolver::new(Git2History::new(mainline), prefix);
    let resolution = resolver.resolve(&args.root)?;

    tracing::debug!(version = %resolution.version, source = ?resolution.source, "resolved");
    Ok(resolution)
}
