use crate::error::{FindVersionError, Result};
use crate::git::HistoryQuery;
use std::path::Path;
use std::sync::Mutex;

/// Identity returned by a fresh [MockHistory]
pub const MOCK_IDENTITY: &str = " +abc1234 Mon Jan 02 15:04:05 2006 -0700";

/// Scripted history for testing without a repository on disk
#[derive(Debug)]
pub struct MockHistory {
    version_controlled: bool,
    branch: std::result::Result<String, String>,
    decorations: std::result::Result<Vec<String>, String>,
    identity: std::result::Result<String, String>,
    calls: Mutex<Vec<String>>,
}

impl MockHistory {
    /// Create a mock repository on `master` with no decorations
    pub fn new() -> Self {
        MockHistory {
            version_controlled: true,
            branch: Ok("master".to_string()),
            decorations: Ok(Vec::new()),
            identity: Ok(MOCK_IDENTITY.to_string()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Pretend the tree is not under version control
    pub fn untracked(mut self) -> Self {
        self.version_controlled = false;
        self
    }

    /// Set the checked-out branch
    pub fn with_branch(mut self, branch: impl Into<String>) -> Self {
        self.branch = Ok(branch.into());
        self
    }

    /// Set the decoration listing, newest commit first
    pub fn with_decorations<I, S>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.decorations = Ok(lines.into_iter().map(Into::into).collect());
        self
    }

    /// Set the latest commit identity
    pub fn with_identity(mut self, identity: impl Into<String>) -> Self {
        self.identity = Ok(identity.into());
        self
    }

    /// Make the branch query fail with `message`
    pub fn failing_branch(mut self, message: impl Into<String>) -> Self {
        self.branch = Err(message.into());
        self
    }

    /// Make the decoration query fail with `message`
    pub fn failing_decorations(mut self, message: impl Into<String>) -> Self {
        self.decorations = Err(message.into());
        self
    }

    /// Make the identity query fail with `message`
    pub fn failing_identity(mut self, message: impl Into<String>) -> Self {
        self.identity = Err(message.into());
        self
    }

    /// Names of the queries issued so far, in order
    pub fn calls(&self) -> Vec<String> {
        self.calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }

    fn record(&self, call: impl Into<String>) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call.into());
        }
    }
}

impl Default for MockHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl HistoryQuery for MockHistory {
    fn is_version_controlled(&self, _path: &Path) -> bool {
        self.record("is_version_controlled");
        self.version_controlled
    }

    fn current_branch(&self, _path: &Path) -> Result<String> {
        self.record("current_branch");
        self.branch.clone().map_err(FindVersionError::query)
    }

    fn decoration_listing(&self, _path: &Path, branch: &str) -> Result<Vec<String>> {
        self.record(format!("decoration_listing {}", branch));
        self.decorations.clone().map_err(FindVersionError::query)
    }

    fn latest_commit_identity(&self, _path: &Path) -> Result<String> {
        self.record("latest_commit_identity");
        self.identity.clone().map_err(FindVersionError::query)
    }
}
