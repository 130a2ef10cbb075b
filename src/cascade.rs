//! Sequential, cumulative reverts on a workspace branch.

use git2::Oid;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::repo::{Repo, RevertAttempt};
use crate::workspace::Workspace;

/// Result of a fully successful cascade.
#[derive(Debug)]
pub struct CascadeOutcome {
    /// The workspace branch now holding the revert chain, left checked out
    /// for the operator to inspect and promote.
    pub workspace: String,
    /// Created revert commits, newest original undone first.
    pub created: Vec<Oid>,
}

/// Revert every commit from the tip of `reference` down to `target`
/// (inclusive), newest first, building one revert commit per step on a
/// fresh workspace branch.
///
/// Unlike analysis, each attempt merges against the head left by the
/// previous step. The first unresolved conflict aborts the cascade with
/// [`Error::RevertConflict`]; commits already created stay in place and
/// the workspace branch is kept for inspection. On success the branch tip
/// holds a tree equal to the commit preceding the reverted range.
pub fn revert_cascade(repo: &Repo, reference: &str, target: Oid) -> Result<CascadeOutcome> {
    let workspace = Workspace::open(repo, reference)?;
    let commits = repo.walk(workspace.head(), Some(target))?;
    info!(
        workspace = %workspace.name(),
        commits = commits.len(),
        "starting cascading revert"
    );
    let created = cascade_over(repo, &workspace, &commits)?;
    info!(commits = created.len(), "cascade complete");
    Ok(CascadeOutcome {
        workspace: workspace.name().to_string(),
        created,
    })
}

pub(crate) fn cascade_over(repo: &Repo, workspace: &Workspace, commits: &[Oid]) -> Result<Vec<Oid>> {
    let refname = workspace.refname();
    let mut created = Vec::with_capacity(commits.len());
    for &oid in commits {
        let head = repo.branch_tip(workspace.name())?;
        match repo.try_revert(oid, head)? {
            RevertAttempt::Conflicted => {
                return Err(Error::RevertConflict {
                    commit: oid.to_string(),
                });
            }
            RevertAttempt::Clean(mut index) => {
                let message = format!("Revert {}", repo.commit_summary(oid)?.message);
                let new_head = repo.commit_index(&refname, &mut index, &message, head)?;
                debug!(reverted = %oid, commit = %new_head, "created revert commit");
                created.push(new_head);
            }
        }
    }
    Ok(created)
}
