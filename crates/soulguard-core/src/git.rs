//! Access to the staged (index) version of files.
//!
//! The commit gate must read what is about to be committed, not the working
//! tree — a committer can have unstaged edits that differ from the staged
//! content. `GitIndex` shells out to git; the `StagedSource` trait keeps the
//! gate itself pure and unit-testable.

use crate::error::{Result, SoulguardError};
use std::path::{Path, PathBuf};

/// A view of the staged tree for the current commit attempt.
pub trait StagedSource {
    /// Repo-relative paths of all files staged for commit.
    fn staged_paths(&self) -> Result<Vec<String>>;

    /// Content of `path` as staged in the index.
    fn staged_content(&self, path: &str) -> Result<String>;

    /// Whether `path` is staged for deletion.
    fn staged_deletion(&self, path: &str) -> Result<bool>;
}

// ---------------------------------------------------------------------------
// GitIndex
// ---------------------------------------------------------------------------

pub struct GitIndex {
    root: PathBuf,
}

impl GitIndex {
    /// Open the repository at `root`. Fails if `root` is not inside a git
    /// work tree.
    pub fn open(root: &Path) -> Result<Self> {
        let output = std::process::Command::new("git")
            .args(["rev-parse", "--git-dir"])
            .current_dir(root)
            .output()
            .map_err(|e| SoulguardError::GitCommand(e.to_string()))?;
        if !output.status.success() {
            return Err(SoulguardError::NotARepository(
                root.display().to_string(),
            ));
        }
        Ok(Self {
            root: root.to_path_buf(),
        })
    }

    fn git(&self, args: &[&str]) -> Result<String> {
        let output = std::process::Command::new("git")
            .args(args)
            .current_dir(&self.root)
            .output()
            .map_err(|e| SoulguardError::GitCommand(e.to_string()))?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(SoulguardError::GitCommand(format!(
                "git {}: {}",
                args.join(" "),
                stderr.trim()
            )));
        }
        String::from_utf8(output.stdout)
            .map_err(|e| SoulguardError::GitCommand(e.to_string()))
    }
}

impl StagedSource for GitIndex {
    fn staged_paths(&self) -> Result<Vec<String>> {
        // Covers adds, modifications, and deletions of tracked paths.
        let out = self.git(&["diff", "--cached", "--name-only"])?;
        Ok(out.lines().map(|l| l.to_string()).collect())
    }

    fn staged_content(&self, path: &str) -> Result<String> {
        // ":<path>" addresses the index, not HEAD or the working tree.
        self.git(&["show", &format!(":{path}")])
    }

    fn staged_deletion(&self, path: &str) -> Result<bool> {
        let out = self.git(&["diff", "--cached", "--name-only", "--diff-filter=D"])?;
        Ok(out.lines().any(|l| l == path))
    }
}

// ---------------------------------------------------------------------------
// In-memory source for tests
// ---------------------------------------------------------------------------
