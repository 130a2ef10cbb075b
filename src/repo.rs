//! Git repository doorway built on git2.
//!
//! Every git interaction flows through [`Repo`]; no other module imports
//! `git2` types beyond [`git2::Oid`] and the index carried by
//! [`RevertAttempt`].

use std::path::Path;

use git2::build::CheckoutBuilder;
use git2::{BranchType, Oid, Sort};

use crate::error::{Error, Result};

/// Owned display data for a single commit.
#[derive(Debug, Clone)]
pub struct CommitSummary {
    /// Full content-addressed identity.
    pub id: Oid,
    /// Unambiguous short form of the identity.
    pub short_id: String,
    /// Author name.
    pub author: String,
    /// Commit timestamp, seconds since the epoch.
    pub time: i64,
    /// Full commit message.
    pub message: String,
}

/// Outcome of attempting to revert one commit against a baseline.
///
/// The analyzer records this as data; the cascade treats `Conflicted` as a
/// terminating condition.
pub enum RevertAttempt {
    /// The revert applied cleanly; the index holds the merged result.
    Clean(git2::Index),
    /// The revert produced unresolved conflicts.
    Conflicted,
}

/// A git repository handle that provides the operations this crate needs.
pub struct Repo {
    inner: git2::Repository,
}

impl Repo {
    /// Open the repository at the given path.
    pub fn open(path: &Path) -> Result<Self> {
        let inner = git2::Repository::open(path).map_err(|e| match e.code() {
            git2::ErrorCode::NotFound => Error::NotARepo {
                path: path.to_path_buf(),
            },
            _ => Error::Git(e),
        })?;
        Ok(Self { inner })
    }

    /// Check out a local branch: update the working copy, then move HEAD.
    pub fn checkout(&self, branch: &str) -> Result<()> {
        let refname = format!("refs/heads/{branch}");
        let object = self.inner.revparse_single(&refname)?;
        self.inner.checkout_tree(&object, None)?;
        self.inner.set_head(&refname)?;
        Ok(())
    }

    /// Tip commit of a local branch.
    pub fn branch_tip(&self, branch: &str) -> Result<Oid> {
        let branch = self.inner.find_branch(branch, BranchType::Local)?;
        Ok(branch.get().peel_to_commit()?.id())
    }

    /// Walk history from `tip`, descendants before ancestors.
    ///
    /// When `until` is given the walk stops after yielding that commit, so
    /// the returned range is bounded inclusive of the target.
    pub fn walk(&self, tip: Oid, until: Option<Oid>) -> Result<Vec<Oid>> {
        let mut revwalk = self.inner.revwalk()?;
        revwalk.set_sorting(Sort::TOPOLOGICAL)?;
        revwalk.push(tip)?;

        let mut commits = Vec::new();
        for oid in revwalk {
            let oid = oid?;
            commits.push(oid);
            if until == Some(oid) {
                break;
            }
        }
        Ok(commits)
    }

    /// Load the display data for a commit.
    pub fn commit_summary(&self, oid: Oid) -> Result<CommitSummary> {
        let commit = self.inner.find_commit(oid)?;
        let short_id = match commit.as_object().short_id()?.as_str() {
            Some(short) => short.to_string(),
            None => oid.to_string(),
        };
        Ok(CommitSummary {
            id: oid,
            short_id,
            author: commit.author().name().unwrap_or_default().to_string(),
            time: commit.time().seconds(),
            message: commit.message().unwrap_or_default().to_string(),
        })
    }

    /// Attempt to revert `commit` against `baseline` without touching
    /// persistent history. The merge result lives only in the returned
    /// in-memory index.
    pub fn try_revert(&self, commit: Oid, baseline: Oid) -> Result<RevertAttempt> {
        let commit = self.inner.find_commit(commit)?;
        let baseline = self.inner.find_commit(baseline)?;
        let index = self.inner.revert_commit(&commit, &baseline, 0, None)?;
        if index.has_conflicts() {
            Ok(RevertAttempt::Conflicted)
        } else {
            Ok(RevertAttempt::Clean(index))
        }
    }

    /// Write `index` as a tree and commit it onto `refname` with the
    /// repository-configured identity, then sync the working copy to the
    /// new head. `refname` must currently point at `parent`.
    pub fn commit_index(
        &self,
        refname: &str,
        index: &mut git2::Index,
        message: &str,
        parent: Oid,
    ) -> Result<Oid> {
        let tree_id = index.write_tree_to(&self.inner)?;
        let tree = self.inner.find_tree(tree_id)?;
        let signature = self.inner.signature()?;
        let parent = self.inner.find_commit(parent)?;
        let oid = self
            .inner
            .commit(Some(refname), &signature, &signature, message, &tree, &[&parent])?;
        self.inner
            .checkout_tree(tree.as_object(), Some(CheckoutBuilder::new().force()))?;
        Ok(oid)
    }

    /// Check whether a local branch exists.
    pub fn branch_exists(&self, name: &str) -> bool {
        self.inner.find_branch(name, BranchType::Local).is_ok()
    }

    /// Create a local branch pointing at `target`.
    pub fn create_branch(&self, name: &str, target: Oid) -> Result<()> {
        let commit = self.inner.find_commit(target)?;
        self.inner.branch(name, &commit, false)?;
        Ok(())
    }

    /// Delete a local branch.
    pub fn delete_branch(&self, name: &str) -> Result<()> {
        let mut branch = self.inner.find_branch(name, BranchType::Local)?;
        branch.delete()?;
        Ok(())
    }

    /// Names of all local branches.
    pub fn local_branches(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in self.inner.branches(Some(BranchType::Local))? {
            let (branch, _) = entry?;
            if let Some(name) = branch.name()? {
                names.push(name.to_string());
            }
        }
        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{commit_file, init_repo};

    #[test]
    fn walk_yields_tip_first() {
        let (temp, _branch) = init_repo();
        let c1 = commit_file(temp.path(), "a.txt", "a\n", "Add a");
        let c2 = commit_file(temp.path(), "b.txt", "b\n", "Add b");
        let c3 = commit_file(temp.path(), "c.txt", "c\n", "Add c");

        let repo = Repo::open(temp.path()).unwrap();
        let commits = repo.walk(c3, Some(c1)).unwrap();
        assert_eq!(commits, vec![c3, c2, c1]);
    }

    #[test]
    fn walk_is_bounded_at_target() {
        let (temp, _branch) = init_repo();
        let _c1 = commit_file(temp.path(), "a.txt", "a\n", "Add a");
        let c2 = commit_file(temp.path(), "b.txt", "b\n", "Add b");
        let c3 = commit_file(temp.path(), "c.txt", "c\n", "Add c");

        let repo = Repo::open(temp.path()).unwrap();
        let commits = repo.walk(c3, Some(c2)).unwrap();
        assert_eq!(commits, vec![c3, c2]);
    }

    #[test]
    fn try_revert_is_clean_for_tip() {
        let (temp, _branch) = init_repo();
        commit_file(temp.path(), "file.txt", "one\n", "one");
        let c2 = commit_file(temp.path(), "file.txt", "two\n", "two");

        let repo = Repo::open(temp.path()).unwrap();
        let attempt = repo.try_revert(c2, c2).unwrap();
        assert!(matches!(attempt, RevertAttempt::Clean(_)));
    }

    #[test]
    fn try_revert_reports_conflicts() {
        let (temp, _branch) = init_repo();
        commit_file(temp.path(), "file.txt", "one\n", "one");
        let c2 = commit_file(temp.path(), "file.txt", "two\n", "two");
        let c3 = commit_file(temp.path(), "file.txt", "three\n", "three");

        // c2 changed a line that c3 rewrote, so undoing c2 alone cannot
        // merge against the c3 baseline.
        let repo = Repo::open(temp.path()).unwrap();
        let attempt = repo.try_revert(c2, c3).unwrap();
        assert!(matches!(attempt, RevertAttempt::Conflicted));
    }

    #[test]
    fn commit_index_uses_configured_identity() {
        let (temp, branch) = init_repo();
        commit_file(temp.path(), "extra.txt", "x\n", "Add extra");
        let tip = commit_file(temp.path(), "other.txt", "y\n", "Add other");

        let repo = Repo::open(temp.path()).unwrap();
        let attempt = repo.try_revert(tip, tip).unwrap();
        let RevertAttempt::Clean(mut index) = attempt else {
            panic!("expected a clean revert");
        };
        let refname = format!("refs/heads/{branch}");
        let oid = repo
            .commit_index(&refname, &mut index, "Revert Add other\n", tip)
            .unwrap();

        let raw = git2::Repository::open(temp.path()).unwrap();
        let commit = raw.find_commit(oid).unwrap();
        assert_eq!(commit.author().name(), Some("Test"));
        assert_eq!(commit.message(), Some("Revert Add other\n"));
        assert_eq!(commit.parent_id(0).unwrap(), tip);
        assert_eq!(repo.branch_tip(&branch).unwrap(), oid);
    }
}
