use anyhow::Context;
use soulguard_core::{
    gate::{self, CommitCheck},
    git::GitIndex,
};
use std::path::Path;

/// Commit gate entry point, invoked by the generated pre-commit hook.
/// Exit 0 allows the commit; any block propagates as an error and the
/// hook aborts the commit.
pub fn run(root: &Path) -> anyhow::Result<()> {
    let index = GitIndex::open(root).context("commit gate requires a git repository")?;
    match gate::check_staged(&index).context("commit blocked")? {
        CommitCheck::NotApplicable => {}
        CommitCheck::Verified { digest } => {
            println!("soulguard: staged soul verified ({digest})");
        }
    }
    Ok(())
}
