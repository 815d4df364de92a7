#![allow(dead_code)]

use git2::{Oid, Repository, RepositoryInitOptions, Signature, Time};
use std::cell::Cell;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Commit time of the first commit: Mon Jan 02 15:04:05 2006 -0700
pub const BASE_TIME: i64 = 1_136_239_445;
pub const BASE_OFFSET_MINUTES: i32 = -7 * 60;

/// A scratch repository whose commits get fixed, one minute apart timestamps
pub struct TestRepo {
    pub repo: Repository,
    pub dir: TempDir,
    commits: Cell<i64>,
}

impl TestRepo {
    /// Initialise a repository on `master` with one commit
    pub fn init() -> Self {
        let test_repo = Self::init_empty();
        test_repo.commit("Initial commit");
        test_repo
    }

    /// Initialise a repository on `master` without any commit
    pub fn init_empty() -> Self {
        let dir = TempDir::new().expect("Could not create temp dir");
        let mut opts = RepositoryInitOptions::new();
        opts.initial_head("master");
        let repo = Repository::init_opts(dir.path(), &opts).expect("Could not init git repo");

        TestRepo {
            repo,
            dir,
            commits: Cell::new(0),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Signature for the next commit
    fn signature(&self) -> Signature<'static> {
        let n = self.commits.get();
        Signature::new(
            "Test User",
            "test@example.com",
            &Time::new(BASE_TIME + n * 60, BASE_OFFSET_MINUTES),
        )
        .expect("Could not build signature")
    }

    /// Commit a new file on the checked-out branch
    pub fn commit(&self, message: &str) -> Oid {
        let n = self.commits.get();
        let file_name = format!("file{}.txt", n);
        fs::write(self.path().join(&file_name), message).expect("Could not write file");

        let mut index = self.repo.index().expect("Could not get index");
        index
            .add_path(Path::new(&file_name))
            .expect("Could not add file to index");
        index.write().expect("Could not write index");
        let tree_id = index.write_tree().expect("Could not write tree");
        let tree = self.repo.find_tree(tree_id).expect("Could not find tree");

        let parent = self.repo.head().ok().and_then(|h| h.peel_to_commit().ok());
        let parents: Vec<&git2::Commit> = parent.iter().collect();

        let sig = self.signature();
        let oid = self
            .repo
            .commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
            .expect("Could not create commit");
        self.commits.set(n + 1);
        oid
    }

    /// Create `name` at HEAD and check it out
    pub fn checkout_new_branch(&self, name: &str) {
        let head = self
            .repo
            .head()
            .and_then(|h| h.peel_to_commit())
            .expect("Could not resolve HEAD");
        self.repo
            .branch(name, &head, false)
            .expect("Could not create branch");
        self.repo
            .set_head(&format!("refs/heads/{}", name))
            .expect("Could not switch branch");
    }

    /// Create `name` at HEAD without checking it out
    pub fn create_branch(&self, name: &str) {
        let head = self
            .repo
            .head()
            .and_then(|h| h.peel_to_commit())
            .expect("Could not resolve HEAD");
        self.repo
            .branch(name, &head, false)
            .expect("Could not create branch");
    }

    /// Lightweight tag at HEAD
    pub fn tag(&self, name: &str) {
        let head = self.repo.head().and_then(|h| h.peel(git2::ObjectType::Commit)).unwrap();
        self.repo
            .tag_lightweight(name, &head, false)
            .expect("Could not create tag");
    }

    /// Annotated tag at HEAD
    pub fn annotated_tag(&self, name: &str) {
        let head = self.repo.head().and_then(|h| h.peel(git2::ObjectType::Commit)).unwrap();
        let sig = self.signature();
        self.repo
            .tag(name, &head, &sig, "release", false)
            .expect("Could not create annotated tag");
    }

    /// Detach HEAD at the current commit
    pub fn detach(&self) {
        let oid = self.head_oid();
        self.repo.set_head_detached(oid).expect("Could not detach HEAD");
    }

    pub fn head_oid(&self) -> Oid {
        self.repo.head().unwrap().peel_to_commit().unwrap().id()
    }

    /// Abbreviated id of HEAD as libgit2 computes it
    pub fn short_head(&self) -> String {
        let commit = self.repo.head().unwrap().peel_to_commit().unwrap();
        let short = commit.as_object().short_id().unwrap();
        short.as_str().unwrap().to_string()
    }
}
