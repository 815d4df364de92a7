use crate::domain::CommitIdentity;
use crate::error::{FindVersionError, Result};
use crate::git::HistoryQuery;
use git2::{Oid, ReferenceType, Repository};
use std::cmp::Reverse;
use std::collections::HashMap;
use std::path::Path;

/// One decoration of a commit: the full reference name it sorts by and the
/// label printed for it.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Decoration {
    is_head: bool,
    refname: String,
    label: String,
}

impl Decoration {
    fn new(is_head: bool, refname: impl Into<String>, label: impl Into<String>) -> Self {
        Decoration {
            is_head,
            refname: refname.into(),
            label: label.into(),
        }
    }
}

/// HEAD first, then full reference names in descending order, as git prints them.
fn sort_decorations(decorations: &mut [Decoration]) {
    decorations.sort_by(|a, b| {
        (!a.is_head, Reverse(&a.refname)).cmp(&(!b.is_head, Reverse(&b.refname)))
    });
}

/// [HistoryQuery] backed by libgit2
///
/// The repository is discovered and opened afresh by every query and dropped
/// before the query returns.
#[derive(Debug, Clone)]
pub struct Git2History {
    mainline: String,
}

impl Git2History {
    /// Create a history adapter excluding commits reachable from `mainline`
    pub fn new(mainline: impl Into<String>) -> Self {
        Git2History {
            mainline: mainline.into(),
        }
    }

    fn open(path: &Path) -> Result<Repository> {
        Ok(Repository::discover(path)?)
    }

    fn commit_id(repo: &Repository, spec: &str) -> Result<Oid> {
        let object = repo.revparse_single(spec)?;
        Ok(object.peel_to_commit()?.id())
    }

    /// Map every decorated commit to its `%d`-style labels
    fn decorations(repo: &Repository) -> Result<HashMap<Oid, Vec<Decoration>>> {
        let mut decorations: HashMap<Oid, Vec<Decoration>> = HashMap::new();

        let head_branch = if repo.head_detached().unwrap_or(false) {
            if let Ok(commit) = repo.head().and_then(|head| head.peel_to_commit()) {
                decorations
                    .entry(commit.id())
                    .or_default()
                    .push(Decoration::new(true, "HEAD", "HEAD"));
            }
            None
        } else {
            repo.head()
                .ok()
                .and_then(|head| head.name().map(str::to_string))
        };

        for reference in repo.references()? {
            let reference = reference?;
            if reference.kind() == Some(ReferenceType::Symbolic) {
                continue;
            }
            let Some(name) = reference.name() else {
                continue;
            };
            // Tags on trees or blobs decorate no commit.
            let Ok(commit) = reference.peel_to_commit() else {
                continue;
            };

            let entry = if head_branch.as_deref() == Some(name) {
                Decoration::new(true, name, format!("HEAD -> {}", name))
            } else if name.starts_with("refs/tags/") {
                Decoration::new(false, name, format!("tag: {}", name))
            } else {
                Decoration::new(false, name, name)
            };
            decorations.entry(commit.id()).or_default().push(entry);
        }

        for labels in decorations.values_mut() {
            sort_decorations(labels);
        }
        Ok(decorations)
    }
}

/// Render one commit's decorations the way `git log --decorate=full --format=%d` does
fn render_line(labels: Option<&Vec<Decoration>>) -> String {
    match labels {
        Some(labels) if !labels.is_empty() => {
            let names: Vec<&str> = labels.iter().map(|d| d.label.as_str()).collect();
            format!(" ({})", names.join(", "))
        }
        _ => String::new(),
    }
}

impl HistoryQuery for Git2History {
    fn is_version_controlled(&self, path: &Path) -> bool {
        let repo = match Repository::discover(path) {
            Ok(repo) => repo,
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e.message(), "not a git working tree");
                return false;
            }
        };

        let git_dir = repo.path();
        let git_dir = if git_dir.is_absolute() {
            git_dir.to_path_buf()
        } else {
            path.join(git_dir)
        };
        git_dir.is_dir()
    }

    fn current_branch(&self, path: &Path) -> Result<String> {
        let repo = Self::open(path)?;
        let head = repo.head()?;

        if repo.head_detached()? {
            return Ok("HEAD".to_string());
        }

        head.shorthand()
            .map(str::to_string)
            .ok_or_else(|| FindVersionError::query("HEAD name is not valid UTF-8"))
    }

    fn decoration_listing(&self, path: &Path, branch: &str) -> Result<Vec<String>> {
        let repo = Self::open(path)?;
        let decorations = Self::decorations(&repo)?;

        let mut revwalk = repo.revwalk()?;
        revwalk.push(Self::commit_id(&repo, branch)?)?;
        revwalk.hide(Self::commit_id(&repo, &self.mainline)?)?;

        let mut lines = Vec::new();
        for oid in revwalk {
            lines.push(render_line(decorations.get(&oid?)));
        }

        tracing::debug!(branch, mainline = %self.mainline, commits = lines.len(), "decoration listing");
        Ok(lines)
    }

    fn latest_commit_identity(&self, path: &Path) -> Result<String> {
        let repo = Self::open(path)?;
        let commit = repo.head()?.peel_to_commit()?;

        let short_id = commit.as_object().short_id()?;
        let short_hash = short_id
            .as_str()
            .ok_or_else(|| FindVersionError::query("abbreviated commit id is not valid UTF-8"))?;

        let when = commit.committer().when();
        let identity = CommitIdentity::from_epoch(short_hash, when.seconds(), when.offset_minutes())
            .ok_or_else(|| {
                FindVersionError::query(format!("commit {} has an out of range date", commit.id()))
            })?;

        Ok(identity.to_string())
    }
}
