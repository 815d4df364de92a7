//! Read-only history queries against a working tree
//!
//! This module provides a trait-based abstraction over the four questions the
//! resolver asks a repository, allowing for a real libgit2-backed
//! implementation and a scripted one for testing.
//!
//! # Overview
//!
//! - [repository::Git2History]: real implementation using the `git2` crate
//! - [mock::MockHistory]: scripted answers for tests
//!
//! Implementations return raw text and never interpret it; all decisions
//! belong to [crate::resolver].
//!
//! ```no_run
//! # use findversion::git::{Git2History, HistoryQuery};
//! # use std::path::Path;
//! # fn example() -> findversion::Result<()> {
//! let history = Git2History::new("master");
//! if history.is_version_controlled(Path::new(".")) {
//!     let branch = history.current_branch(Path::new("."))?;
//!     println!("on {}", branch);
//! }
//! # Ok(())
//! # }
//! ```

pub mod mock;
pub mod repository;

pub use mock::MockHistory;
pub use repository::Git2History;

use crate::error::Result;
use std::path::Path;

/// History queries the version resolver depends on
///
/// ## Thread Safety
///
/// All implementors must be `Send + Sync`; implementations keep no state
/// between calls, so independent resolutions may share one instance.
///
/// ## Error Handling
///
/// Failures are reported as [crate::error::FindVersionError::Query] carrying
/// the underlying message verbatim. Nothing is retried.
pub trait HistoryQuery: Send + Sync {
    /// Whether `path` sits inside a working tree whose metadata directory exists
    ///
    /// Every failure, including "not a repository", collapses to `false`.
    fn is_version_controlled(&self, path: &Path) -> bool;

    /// Abbreviated name of the checked-out branch (`"HEAD"` when detached)
    ///
    /// # Returns
    /// * `Ok(String)` - Branch name such as `release-branch.1.0`
    /// * `Err` - If HEAD is unborn or the repository cannot be read
    fn current_branch(&self, path: &Path) -> Result<String>;

    /// Decorations of every commit reachable from `branch` but not from the
    /// mainline, newest commit first
    ///
    /// Each line is either empty or a parenthesised, comma separated list of
    /// fully qualified references, for example
    /// ` (HEAD -> refs/heads/release-branch.1.0, tag: refs/tags/v1.0.0)`.
    /// An empty listing is not an error.
    fn decoration_listing(&self, path: &Path, branch: &str) -> Result<Vec<String>>;

    /// Identity of the commit at HEAD, e.g. ` +abc1234 Mon Jan 02 15:04:05 2006 -0700`
    fn latest_commit_identity(&self, path: &Path) -> Result<String>;
}
