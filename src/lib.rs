//! Unpick: analyze and apply cascading reverts over linear git history.
//!
//! Given a branch and a target commit, unpick either reports, for every
//! commit from the tip down to the target, whether reverting it in
//! isolation would conflict, or actually builds the revert chain — newest
//! commit first — on a disposable workspace branch, leaving the original
//! branch untouched until the operator promotes the result.
//!
//! # Architecture
//!
//! - **Repo**: typed doorway over git2; the only module touching libgit2
//! - **Locate**: resolve the target commit from a hash prefix
//! - **Workspace**: disposable branches isolating every run
//! - **Analyze**: per-commit revert feasibility against a fixed baseline
//! - **Cascade**: sequential cumulative reverts, one commit per step

mod analyze;
mod cascade;
mod error;
mod locate;
mod repo;
mod workspace;

#[cfg(test)]
mod testutil;

pub use analyze::{analyze, render_report, RevertOutcome};
pub use cascade::{revert_cascade, CascadeOutcome};
pub use error::{Error, Result};
pub use locate::locate_commit;
pub use repo::{CommitSummary, Repo, RevertAttempt};
pub use workspace::{sweep, Workspace, WORKSPACE_PREFIX};
