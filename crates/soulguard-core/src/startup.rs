//! Startup gate: the hosting process refuses to initialize unless the
//! on-disk soul file verifies against its pinned digest.
//!
//! This is the runtime half of the protection. The commit gate answers "can
//! this change be committed"; this gate answers "is this the identity that
//! is actually running" — a force-push or a direct edit on the deployment
//! host bypasses the commit gate but is still caught here.

use crate::error::{Result, SoulguardError};
use crate::soul::SoulFile;
use std::path::Path;

/// An identity that passed verification at process start.
///
/// The directives are reachable only through read accessors; nothing can
/// mutate them after the check. The gate runs once at startup — it is a
/// precondition, not a per-request check.
#[derive(Debug, Clone)]
pub struct VerifiedSoul {
    name: String,
    directives: String,
    digest: String,
    pinned_at: chrono::DateTime<chrono::Utc>,
}

impl VerifiedSoul {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn directives(&self) -> &str {
        &self.directives
    }

    pub fn digest(&self) -> &str {
        &self.digest
    }

    pub fn pinned_at(&self) -> chrono::DateTime<chrono::Utc> {
        self.pinned_at
    }
}

/// Verify the on-disk soul file and hand back the verified identity.
///
/// On mismatch the error is [`SoulguardError::StartupIntegrity`], whose
/// message carries the fixed `soul integrity check FAILED` phrase so
/// operators can grep deployment logs for it. No partial startup, no
/// degraded mode.
pub fn verify(root: &Path) -> Result<VerifiedSoul> {
    let soul = SoulFile::load(root)?;
    let pinned = soul.pin()?.to_string();
    let computed = soul.computed_digest();
    if computed != pinned {
        return Err(SoulguardError::StartupIntegrity { computed, pinned });
    }
    Ok(VerifiedSoul {
        name: soul.name,
        directives: soul.directives,
        digest: pinned,
        pinned_at: soul.pinned_at,
    })
}
