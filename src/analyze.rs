//! Per-commit revert feasibility analysis.

use git2::Oid;
use tracing::{debug, info};

use crate::error::Result;
use crate::repo::{CommitSummary, Repo, RevertAttempt};
use crate::workspace::Workspace;

/// One analyzed commit and whether reverting it alone would conflict.
#[derive(Debug, Clone)]
pub struct RevertOutcome {
    pub commit: CommitSummary,
    pub conflicts: bool,
}

/// Test every commit from the tip of `reference` down to `target`
/// (inclusive) for revert feasibility.
///
/// Each attempt merges against the workspace's fixed head snapshot and is
/// discarded; nothing is committed and no tree is written. Conflicts are
/// data here, never errors. The workspace is closed before returning, on
/// success and failure alike, restoring `reference` as the checked-out
/// branch. The returned outcomes preserve walk order, tip first.
pub fn analyze(repo: &Repo, reference: &str, target: Oid) -> Result<Vec<RevertOutcome>> {
    let workspace = Workspace::open(repo, reference)?;
    let outcomes = run(repo, &workspace, target);
    let closed = workspace.close(repo);
    let outcomes = outcomes?;
    closed?;
    info!(commits = outcomes.len(), "analysis complete");
    Ok(outcomes)
}

fn run(repo: &Repo, workspace: &Workspace, target: Oid) -> Result<Vec<RevertOutcome>> {
    let commits = repo.walk(workspace.head(), Some(target))?;
    let mut outcomes = Vec::with_capacity(commits.len());
    for oid in commits {
        let attempt = repo.try_revert(oid, workspace.head())?;
        let conflicts = matches!(attempt, RevertAttempt::Conflicted);
        debug!(commit = %oid, conflicts, "tested revert");
        outcomes.push(RevertOutcome {
            commit: repo.commit_summary(oid)?,
            conflicts,
        });
    }
    Ok(outcomes)
}

/// Render outcomes as the fixed-width report table, one row per commit in
/// walk order.
pub fn render_report(outcomes: &[RevertOutcome]) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:<8} {:<10} {:<20} {:<20} {:<50}\n",
        "Commit", "Conflicts", "Author", "Time", "Message"
    ));
    for outcome in outcomes {
        out.push_str(&format!(
            "{:<8} {:<10} {:<20} {:<20} {:<50}\n",
            outcome.commit.short_id,
            outcome.conflicts,
            outcome.commit.author,
            format_time(outcome.commit.time),
            outcome.commit.message.trim(),
        ));
    }
    out
}

fn format_time(seconds: i64) -> String {
    chrono::DateTime::from_timestamp(seconds, 0)
        .map(|time| {
            time.with_timezone(&chrono::Local)
                .format("%Y-%m-%d %H:%M:%S")
                .to_string()
        })
        .unwrap_or_default()
}
