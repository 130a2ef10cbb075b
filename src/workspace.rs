//! Disposable workspace branches.
//!
//! Every mutating run happens on an ephemeral branch created from the
//! target reference's tip, so the caller's branch is never touched until
//! the operator promotes the result.

use chrono::{DateTime, Local};
use git2::Oid;
use tracing::debug;

use crate::error::{Error, Result};
use crate::repo::Repo;

/// Reserved prefix for workspace branch names.
pub const WORKSPACE_PREFIX: &str = "revert-workspace-";

/// An ephemeral branch checked out for the duration of one run.
///
/// Returned by [`Workspace::open`] and consumed by [`Workspace::close`];
/// holding the value is the only way to reach the branch, which keeps the
/// open/close pairing explicit at every call site.
#[derive(Debug)]
pub struct Workspace {
    name: String,
    base_ref: String,
    head: Oid,
}

impl Workspace {
    /// Create a workspace branch from the tip of `base_ref` and check it
    /// out. The branch name carries a one-second creation stamp; opening
    /// twice within the same second fails with
    /// [`Error::WorkspaceCollision`] instead of reusing the branch.
    pub fn open(repo: &Repo, base_ref: &str) -> Result<Self> {
        Self::create(repo, base_ref, workspace_name(Local::now()))
    }

    pub(crate) fn create(repo: &Repo, base_ref: &str, name: String) -> Result<Self> {
        repo.checkout(base_ref)?;
        let head = repo.branch_tip(base_ref)?;
        if repo.branch_exists(&name) {
            return Err(Error::WorkspaceCollision { name });
        }
        repo.create_branch(&name, head)?;
        repo.checkout(&name)?;
        debug!(workspace = %name, head = %head, "opened workspace");
        Ok(Self {
            name,
            base_ref: base_ref.to_string(),
            head,
        })
    }

    /// Check the base reference back out and delete the workspace branch.
    pub fn close(self, repo: &Repo) -> Result<()> {
        repo.checkout(&self.base_ref)?;
        repo.delete_branch(&self.name)?;
        debug!(workspace = %self.name, "closed workspace");
        Ok(())
    }

    /// Branch name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Full refname of the workspace branch.
    pub fn refname(&self) -> String {
        format!("refs/heads/{}", self.name)
    }

    /// The commit the workspace pointed at when it was created; the fixed
    /// baseline for feasibility analysis.
    pub fn head(&self) -> Oid {
        self.head
    }
}

fn workspace_name(stamp: DateTime<Local>) -> String {
    format!("{WORKSPACE_PREFIX}{}", stamp.format("%Y-%m-%d-%H%M%S"))
}

/// Delete every leftover workspace branch, returning the deleted names.
///
/// Idempotent maintenance sweep; deleting zero branches is not an error.
pub fn sweep(repo: &Repo) -> Result<Vec<String>> {
    let mut deleted = Vec::new();
    for name in repo.local_branches()? {
        if name.starts_with(WORKSPACE_PREFIX) {
            repo.delete_branch(&name)?;
            debug!(branch = %name, "deleted workspace branch");
            deleted.push(name);
        }
    }
    Ok(deleted)
}
