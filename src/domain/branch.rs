/// Represents the checked-out branch together with the release prefix decision
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchContext {
    pub name: String,
    pub is_release: bool,
}

impl BranchContext {
    /// Create a branch context, matching `name` against the release `prefix`
    pub fn new(name: impl Into<String>, prefix: &str) -> Self {
        let name = name.into();
        let is_release = name.starts_with(prefix);

        BranchContext { name, is_release }
    }

    /// Check if the closest-tag search applies to this branch
    pub fn is_release_branch(&self) -> bool {
        self.is_release
    }
}
