use std::path::PathBuf;

use anyhow::Context;
use clap::{ArgGroup, Parser};
use tracing::info;
use tracing_subscriber::EnvFilter;

use unpick::{analyze, locate_commit, render_report, revert_cascade, sweep, Repo};

#[derive(Parser)]
#[command(name = "unpick")]
#[command(about = "Analyze and apply cascading reverts over linear git history")]
#[command(group(ArgGroup::new("mode").required(true).multiple(false)))]
struct Cli {
    /// Path to the local git repository
    #[arg(long, value_name = "PATH")]
    path: PathBuf,

    /// Target branch
    #[arg(long = "ref", value_name = "BRANCH")]
    reference: String,

    /// Target commit hash prefix
    #[arg(long, value_name = "HASH")]
    commit: String,

    /// Report, for each commit down to and including the target, whether
    /// reverting it on its own would conflict
    #[arg(long, group = "mode")]
    analyze: bool,

    /// Revert all commits down to and including the target, newest first,
    /// on a disposable workspace branch
    #[arg(long, group = "mode")]
    revert: bool,

    /// Delete leftover workspace branches from prior runs
    #[arg(long, group = "mode")]
    cleanup: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let repo = Repo::open(&cli.path)
        .with_context(|| format!("failed to open repository at {}", cli.path.display()))?;
    let target = locate_commit(&repo, &cli.reference, &cli.commit)?;

    if cli.analyze {
        let outcomes = analyze(&repo, &cli.reference, target)?;
        print!("{}", render_report(&outcomes));
    } else if cli.revert {
        let outcome = revert_cascade(&repo, &cli.reference, target)?;
        info!(
            workspace = %outcome.workspace,
            commits = outcome.created.len(),
            "revert chain ready for review"
        );
    } else {
        for name in sweep(&repo)? {
            println!("deleted {name}");
        }
    }

    Ok(())
}
