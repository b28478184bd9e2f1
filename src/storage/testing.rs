//! Throwaway repositories for tests.
//!
//! ```text
//! README.md              blob
//! bin/run.sh             executable blob
//! docs/guide/intro.txt   blob
//! latest                 link -> docs/guide/intro.txt
//! vendor                 submodule
//! ```

use git2::{FileMode, Oid, Repository, Signature, Time};
use tempfile::TempDir;

use crate::storage::types::{CommitId, TreeId};

pub(crate) struct Fixture {
    repo: Repository,
    dir: TempDir,
    commit: Oid,
    tree: Oid,
}

impl Fixture {
    pub const COMMIT_TIME: i64 = 1_600_000_000;
    pub const README: &'static [u8] = b"hello\n";
    pub const RUN: &'static [u8] = b"#!/bin/sh\necho hi\n";
    pub const INTRO: &'static [u8] = b"intro text, long enough to slice\n";
    pub const LINK_TARGET: &'static [u8] = b"docs/guide/intro.txt";
    pub const ROOT_NAMES: [&'static str; 5] = ["README.md", "bin", "docs", "latest", "vendor"];

    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let repo = Repository::init(dir.path()).unwrap();

        let tree = Self::build_tree(&repo);
        let commit = Self::commit(&repo, tree, Self::COMMIT_TIME, &[]);

        Self {
            repo,
            dir,
            commit,
            tree,
        }
    }

    fn build_tree(repo: &Repository) -> Oid {
        let readme = repo.blob(Self::README).unwrap();
        let run = repo.blob(Self::RUN).unwrap();
        let intro = repo.blob(Self::INTRO).unwrap();
        let link = repo.blob(Self::LINK_TARGET).unwrap();

        let mut guide = repo.treebuilder(None).unwrap();
        guide.insert("intro.txt", intro, FileMode::Blob.into()).unwrap();
        let guide = guide.write().unwrap();

        let mut docs = repo.treebuilder(None).unwrap();
        docs.insert("guide", guide, FileMode::Tree.into()).unwrap();
        let docs = docs.write().unwrap();

        let mut bin = repo.treebuilder(None).unwrap();
        bin.insert("run.sh", run, FileMode::BlobExecutable.into()).unwrap();
        let bin = bin.write().unwrap();

        // submodules point at commits that live in another repository
        let submodule = Oid::from_str("1111111111111111111111111111111111111111").unwrap();

        let mut root = repo.treebuilder(None).unwrap();
        root.insert("vendor", submodule, FileMode::Commit.into()).unwrap();
        root.insert("latest", link, FileMode::Link.into()).unwrap();
        root.insert("docs", docs, FileMode::Tree.into()).unwrap();
        root.insert("bin", bin, FileMode::Tree.into()).unwrap();
        root.insert("README.md", readme, FileMode::Blob.into()).unwrap();
        root.write().unwrap()
    }

    fn commit(repo: &Repository, tree: Oid, time: i64, parents: &[Oid]) -> Oid {
        let sig = Signature::new("Test", "test@test.com", &Time::new(time, 0)).unwrap();
        let tree = repo.find_tree(tree).unwrap();
        let parents: Vec<git2::Commit<'_>> = parents
            .iter()
            .map(|id| repo.find_commit(*id).unwrap())
            .collect();
        let parent_refs: Vec<&git2::Commit<'_>> = parents.iter().collect();

        repo.commit(Some("HEAD"), &sig, &sig, "snapshot", &tree, &parent_refs)
            .unwrap()
    }

    /// commit an empty tree on top of HEAD, moving the branch
    pub fn advance_head(&self) -> CommitId {
        let empty = self.repo.treebuilder(None).unwrap().write().unwrap();
        let head = self.repo.head().unwrap().peel_to_commit().unwrap().id();
        CommitId::new(Self::commit(&self.repo, empty, Self::COMMIT_TIME + 60, &[head]))
    }

    pub fn repo(&self) -> &Repository {
        &self.repo
    }

    pub fn path(&self) -> &std::path::Path {
        self.dir.path()
    }

    pub fn commit_id(&self) -> CommitId {
        CommitId::new(self.commit)
    }

    pub fn root_tree_id(&self) -> TreeId {
        TreeId::new(self.tree)
    }
}
