//! Commit gate: blocks commits that touch the soul file unless the pinned
//! digest, the directives, and the external hash record all agree.
//!
//! Two terminal states, per the protocol: Pass (commit proceeds) and
//! Blocked (non-zero exit, diagnostic to the operator). There is no retry —
//! recovery is a human fixing the literals and re-staging.

use crate::error::{Result, SoulguardError};
use crate::git::StagedSource;
use crate::record;
use crate::soul::SoulFile;
use crate::{digest, paths};

// ---------------------------------------------------------------------------
// CommitCheck
// ---------------------------------------------------------------------------

/// Outcome of a passing gate run. Blocks surface as errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitCheck {
    /// The soul file is not part of this commit; nothing to verify.
    NotApplicable,
    /// The staged soul file verified against its pin and record.
    Verified { digest: String },
}

// ---------------------------------------------------------------------------
// Gate
// ---------------------------------------------------------------------------

/// Run the commit gate against the staged tree.
///
/// Decision order:
///   1. soul file not staged                      → NotApplicable
///   2. soul file staged for deletion             → SoulDeleted
///   3. staged pin not a hex literal              → ComputedPin
///   4. staged digest != staged pin               → DigestMismatch
///   5. record file not staged alongside          → UnpairedChange
///   6. staged record value != staged pin         → RecordMismatch
///   7. otherwise                                 → Verified
///
/// Everything is extracted from the index, never the working tree.
pub fn check_staged<S: StagedSource>(src: &S) -> Result<CommitCheck> {
    let staged = src.staged_paths()?;
    if !staged.iter().any(|p| p == paths::SOUL_FILE) {
        return Ok(CommitCheck::NotApplicable);
    }

    if src.staged_deletion(paths::SOUL_FILE)? {
        return Err(SoulguardError::SoulDeleted(paths::SOUL_FILE.to_string()));
    }

    let soul = SoulFile::parse(&src.staged_content(paths::SOUL_FILE)?)?;
    let pinned = soul.pin()?.to_string();

    let computed = digest::sha256_hex(soul.directives.as_bytes());
    if computed != pinned {
        return Err(SoulguardError::DigestMismatch { computed, pinned });
    }

    if !staged.iter().any(|p| p == paths::RECORD_FILE) {
        return Err(SoulguardError::UnpairedChange(
            paths::RECORD_FILE.to_string(),
        ));
    }

    let rec = record::parse(&src.staged_content(paths::RECORD_FILE)?)?;
    record::check_lockstep(&rec, &pinned)?;

    Ok(CommitCheck::Verified { digest: pinned })
}
