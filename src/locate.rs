//! Resolve a target commit from a hash prefix.

use git2::Oid;
use tracing::debug;

use crate::error::{Error, Result};
use crate::repo::Repo;

/// Find the commit on `reference` whose identity starts with `prefix`.
///
/// Checks out `reference`, then walks from its tip collecting every match.
/// A prefix that matches nothing fails with [`Error::CommitNotFound`]; one
/// that matches more than one commit fails with [`Error::AmbiguousPrefix`]
/// rather than silently picking the first hit.
pub fn locate_commit(repo: &Repo, reference: &str, prefix: &str) -> Result<Oid> {
    repo.checkout(reference)?;
    let tip = repo.branch_tip(reference)?;

    let mut matches = Vec::new();
    for oid in repo.walk(tip, None)? {
        if oid.to_string().starts_with(prefix) {
            matches.push(oid);
        }
    }

    match matches.as_slice() {
        [] => Err(Error::CommitNotFound {
            prefix: prefix.to_string(),
            reference: reference.to_string(),
        }),
        [target] => {
            debug!(commit = %target, reference, "resolved target commit");
            Ok(*target)
        }
        many => Err(Error::AmbiguousPrefix {
            prefix: prefix.to_string(),
            reference: reference.to_string(),
            count: many.len(),
        }),
    }
}
