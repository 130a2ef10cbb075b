//! Crate-wide error and result types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by locate, analyze, cascade, and workspace operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The supplied path does not contain a git repository.
    #[error("not a git repository: {path}")]
    NotARepo { path: PathBuf },

    /// No commit on the reference matches the supplied hash prefix.
    #[error("commit {prefix} not found on ref {reference}")]
    CommitNotFound { prefix: String, reference: String },

    /// The supplied hash prefix matches more than one commit.
    #[error("commit prefix {prefix} is ambiguous: matches {count} commits on ref {reference}")]
    AmbiguousPrefix {
        prefix: String,
        reference: String,
        count: usize,
    },

    /// A workspace branch with this name already exists.
    #[error("workspace branch {name} already exists")]
    WorkspaceCollision { name: String },

    /// A cascading revert hit unresolved conflicts and stopped.
    ///
    /// The workspace branch is left in its last successful state for
    /// inspection; it is not cleaned up automatically.
    #[error("commit {commit} cannot be reverted due to conflicts")]
    RevertConflict { commit: String },

    #[error(transparent)]
    Git(#[from] git2::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
