use crate::error::{Result, SoulguardError};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

// ---------------------------------------------------------------------------
// Directory and file constants
// ---------------------------------------------------------------------------

pub const SOULGUARD_DIR: &str = ".soulguard";
pub const SOUL_FILE: &str = ".soulguard/soul.yaml";

/// External hash record, kept under the CI configuration directory so the
/// CI job can verify it independently of the soul file itself.
pub const RECORD_FILE: &str = ".github/soul.sha256";

pub const HOOKS_DIR: &str = ".git/hooks";
pub const PRECOMMIT_HOOK: &str = ".git/hooks/pre-commit";

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

pub fn soulguard_dir(root: &Path) -> PathBuf {
    root.join(SOULGUARD_DIR)
}

pub fn soul_path(root: &Path) -> PathBuf {
    root.join(SOUL_FILE)
}

pub fn record_path(root: &Path) -> PathBuf {
    root.join(RECORD_FILE)
}

pub fn precommit_hook_path(root: &Path) -> PathBuf {
    root.join(PRECOMMIT_HOOK)
}

// ---------------------------------------------------------------------------
// Name validation
// ---------------------------------------------------------------------------

static NAME_RE: OnceLock<Regex> = OnceLock::new();

fn name_re() -> &'static Regex {
    NAME_RE.get_or_init(|| Regex::new(r"^[a-z0-9]+(-[a-z0-9]+)*$").unwrap())
}

/// Validate an agent name: lowercase alphanumeric with hyphens.
pub fn validate_name(name: &str) -> Result<()> {
    if name_re().is_match(name) {
        Ok(())
    } else {
        Err(SoulguardError::InvalidName(name.to_string()))
    }
}
