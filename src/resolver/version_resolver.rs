use crate::domain::{find_closest_tag, BranchContext, TagCandidate};
use crate::error::{FindVersionError, Result};
use crate::git::HistoryQuery;
use crate::resolver::read_override;
use std::fmt;
use std::path::Path;

/// Where a resolved version came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionSource {
    /// Content of the override file, returned verbatim
    Override,
    /// Branch name followed by the commit identity
    Branch,
    /// Closest tag; suffixed with the commit identity unless precise
    Tag { precise: bool },
}

/// Final version string together with its source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub version: String,
    pub source: VersionSource,
}

impl Resolution {
    fn new(version: impl Into<String>, source: VersionSource) -> Self {
        Resolution {
            version: version.into(),
            source,
        }
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.version)
    }
}

/// Turns a working tree into a version string
///
/// Resolution is a linear pipeline; the first failing step ends it:
/// 1. override file at the tree root
/// 2. version control check
/// 3. current branch
/// 4. closest tag, when the branch carries the release prefix
/// 5. commit identity suffix, unless a precise tag was found
pub struct VersionResolver<H: HistoryQuery> {
    history: H,
    prefix: String,
}

impl<H: HistoryQuery> VersionResolver<H> {
    /// Create a resolver searching tags on branches starting with `prefix`
    pub fn new(history: H, prefix: impl Into<String>) -> Self {
        VersionResolver {
            history,
            prefix: prefix.into(),
        }
    }

    /// The history adapter used for queries
    pub fn history(&self) -> &H {
        &self.history
    }

    /// Resolve the version of the tree rooted at `root`
    pub fn resolve(&self, root: &Path) -> Result<Resolution> {
        if let Some(version) = self.check_override(root)? {
            return Ok(Resolution::new(version, VersionSource::Override));
        }

        self.check_version_control(root)?;
        let branch = self.resolve_branch(root)?;

        let (version, source) = match self.search_closest_tag(root, &branch)? {
            Some(TagCandidate {
                name,
                precise: true,
            }) => {
                tracing::debug!(tag = %name, "tag decorates the branch tip");
                return Ok(Resolution::new(name, VersionSource::Tag { precise: true }));
            }
            Some(TagCandidate { name, .. }) => (name, VersionSource::Tag { precise: false }),
            None => (branch.name, VersionSource::Branch),
        };

        self.append_suffix(root, version, source)
    }

    fn check_override(&self, root: &Path) -> Result<Option<String>> {
        let version = read_override(root)?;
        if let Some(version) = &version {
            tracing::debug!(version = %version, "using override file");
        }
        Ok(version)
    }

    fn check_version_control(&self, root: &Path) -> Result<()> {
        if self.history.is_version_controlled(root) {
            Ok(())
        } else {
            Err(FindVersionError::not_version_controlled(root))
        }
    }

    fn resolve_branch(&self, root: &Path) -> Result<BranchContext> {
        let branch = BranchContext::new(self.history.current_branch(root)?, &self.prefix);
        tracing::debug!(
            branch = %branch.name,
            prefix = %self.prefix,
            release = branch.is_release_branch(),
            "resolved branch"
        );
        Ok(branch)
    }

    fn search_closest_tag(&self, root: &Path, branch: &BranchContext) -> Result<Option<TagCandidate>> {
        if !branch.is_release_branch() {
            return Ok(None);
        }

        let listing = self.history.decoration_listing(root, &branch.name)?;
        let candidate = find_closest_tag(&listing);
        match &candidate {
            Some(tag) => tracing::debug!(tag = %tag.name, precise = tag.precise, "closest tag"),
            None => tracing::debug!(branch = %branch.name, "no tag on branch, falling back to its name"),
        }
        Ok(candidate)
    }

    fn append_suffix(&self, root: &Path, version: String, source: VersionSource) -> Result<Resolution> {
        let identity = self.history.latest_commit_identity(root)?;
        Ok(Resolution::new(version + &identity, source))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::mock::{MockHistory, MOCK_IDENTITY};
    use crate::resolver::OVERRIDE_FILE_NAME;
    use std::fs;
    use tempfile::TempDir;

    const PREFIX: &str = "release-branch.";

    fn resolve(history: MockHistory) -> (Result<Resolution>, Vec<String>) {
        let dir = TempDir::new().unwrap();
        resolve_in(&dir, history)
    }

    fn resolve_in(dir: &TempDir, history: MockHistory) -> (Result<Resolution>, Vec<String>) {
        let resolver = VersionResolver::new(history, PREFIX);
        let result = resolver.resolve(dir.path());
        (result, resolver.history().calls())
    }

    #[test]
    fn test_override_wins_without_queries() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(OVERRIDE_FILE_NAME), "2.0.0-custom\n").unwrap();

        let (result, calls) = resolve_in(&dir, MockHistory::new().untracked());
        let resolution = result.unwrap();
        assert_eq!(resolution.version, "2.0.0-custom");
        assert_eq!(resolution.source, VersionSource::Override);
        assert!(calls.is_empty());
    }

    #[test]
    fn test_blank_override_falls_through() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(OVERRIDE_FILE_NAME), "  \n").unwrap();

        let (result, _) = resolve_in(&dir, MockHistory::new().with_branch("main"));
        assert_eq!(result.unwrap().version, format!("main{}", MOCK_IDENTITY));
    }

    #[test]
    fn test_untracked_tree_is_fatal() {
        let (result, calls) = resolve(MockHistory::new().untracked());
        assert!(matches!(
            result.unwrap_err(),
            FindVersionError::NotVersionControlled { .. }
        ));
        assert_eq!(calls, vec!["is_version_controlled"]);
    }

    #[test]
    fn test_branch_failure_is_fatal() {
        let (result, _) = resolve(MockHistory::new().failing_branch("reference 'HEAD' not found"));
        assert_eq!(result.unwrap_err().to_string(), "reference 'HEAD' not found");
    }

    #[test]
    fn test_prefix_gating_skips_tag_search() {
        let history = MockHistory::new()
            .with_branch("main")
            .with_decorations(vec![" refs/tags/v1.0.0, refs/heads/main"]);

        let (result, calls) = resolve(history);
        let resolution = result.unwrap();
        assert_eq!(resolution.version, format!("main{}", MOCK_IDENTITY));
        assert_eq!(resolution.source, VersionSource::Branch);
        assert!(!calls.iter().any(|c| c.starts_with("decoration_listing")));
    }

    #[test]
    fn test_precise_tag_has_no_suffix() {
        let history = MockHistory::new()
            .with_branch("release-branch.1.0")
            .with_decorations(vec![" refs/tags/v1.0.0, refs/heads/release-branch.1.0"]);

        let (result, calls) = resolve(history);
        let resolution = result.unwrap();
        assert_eq!(resolution.version, "v1.0.0");
        assert_eq!(resolution.source, VersionSource::Tag { precise: true });
        assert!(!calls.iter().any(|c| c == "latest_commit_identity"));
    }

    #[test]
    fn test_ancestor_tag_is_suffixed() {
        let history = MockHistory::new()
            .with_branch("release-branch.1.0")
            .with_decorations(vec![
                " (HEAD -> refs/heads/release-branch.1.0)",
                " (tag: refs/tags/v1.0.0)",
            ]);

        let (result, _) = resolve(history);
        let resolution = result.unwrap();
        assert_eq!(resolution.version, format!("v1.0.0{}", MOCK_IDENTITY));
        assert_eq!(resolution.source, VersionSource::Tag { precise: false });
    }

    #[test]
    fn test_no_tag_falls_back_to_branch() {
        let history = MockHistory::new()
            .with_branch("release-branch.1.0")
            .with_decorations(vec![" (HEAD -> refs/heads/release-branch.1.0)", ""]);

        let (result, calls) = resolve(history);
        assert_eq!(
            result.unwrap().version,
            format!("release-branch.1.0{}", MOCK_IDENTITY)
        );
        assert_eq!(
            calls,
            vec![
                "is_version_controlled",
                "current_branch",
                "decoration_listing release-branch.1.0",
                "latest_commit_identity"
            ]
        );
    }

    #[test]
    fn test_empty_listing_falls_back_to_branch() {
        let history = MockHistory::new().with_branch("release-branch.2");
        let (result, _) = resolve(history);
        assert_eq!(result.unwrap().source, VersionSource::Branch);
    }

    #[test]
    fn test_newest_tag_wins() {
        let history = MockHistory::new()
            .with_branch("release-branch.1.0")
            .with_decorations(vec![
                " (HEAD -> refs/heads/release-branch.1.0, tag: refs/tags/v1.0.1)",
                " (tag: refs/tags/v1.0.0)",
            ]);

        let (result, _) = resolve(history);
        assert_eq!(result.unwrap().version, format!("v1.0.1{}", MOCK_IDENTITY));
    }

    #[test]
    fn test_decoration_failure_is_fatal() {
        let history = MockHistory::new()
            .with_branch("release-branch.1.0")
            .failing_decorations("revspec 'master' not found");

        let (result, calls) = resolve(history);
        assert_eq!(result.unwrap_err().to_string(), "revspec 'master' not found");
        assert!(!calls.iter().any(|c| c == "latest_commit_identity"));
    }

    #[test]
    fn test_identity_failure_is_fatal() {
        let history = MockHistory::new().failing_identity("unborn branch");
        let (result, _) = resolve(history);
        assert_eq!(result.unwrap_err().to_string(), "unborn branch");
    }

    #[test]
    fn test_custom_prefix() {
        let dir = TempDir::new().unwrap();
        let history = MockHistory::new()
            .with_branch("rel/3")
            .with_decorations(vec![" (tag: refs/tags/v3.0.0)"]);
        let resolver = VersionResolver::new(history, "rel/");

        let resolution = resolver.resolve(dir.path()).unwrap();
        assert_eq!(resolution.version, format!("v3.0.0{}", MOCK_IDENTITY));
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let history = MockHistory::new()
            .with_branch("release-branch.1.0")
            .with_decorations(vec![" (tag: refs/tags/v1.0.0)"]);
        let resolver = VersionResolver::new(history, PREFIX);

        let first = resolver.resolve(dir.path()).unwrap();
        let second = resolver.resolve(dir.path()).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.to_string(), first.version);
    }
}
