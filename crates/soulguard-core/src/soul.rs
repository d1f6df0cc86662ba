//! The soul file: an agent's core directives plus their pinned digest.
//!
//! Layout (`.soulguard/soul.yaml`):
//!   name:          agent slug
//!   directives:    the identity text — the first block of every system
//!                  prompt, authored by the team and changed only through
//!                  the reviewed pin protocol
//!   pinned_digest: literal lowercase hex SHA-256 of `directives`. This is
//!                  an asserted constant, never recomputed at load time — a
//!                  self-computing pin would always match and protect
//!                  nothing.
//!   pinned_at:     timestamp of the last reviewed pin update

use crate::digest;
use crate::error::{Result, SoulguardError};
use crate::io;
use crate::paths;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

// ---------------------------------------------------------------------------
// SoulFile
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SoulFile {
    pub name: String,
    pub directives: String,
    /// Raw pin value as found in the file. Use [`SoulFile::pin`] to get the
    /// validated literal.
    pub pinned_digest: String,
    pub pinned_at: DateTime<Utc>,
}

impl SoulFile {
    /// Author a new soul file, computing the initial pin from `directives`.
    /// Computing is legal here: pinning is authoring, not verification.
    pub fn new(name: &str, directives: &str) -> Result<Self> {
        paths::validate_name(name)?;
        Ok(Self {
            name: name.to_string(),
            directives: directives.to_string(),
            pinned_digest: digest::sha256_hex(directives.as_bytes()),
            pinned_at: Utc::now(),
        })
    }

    pub fn load(root: &Path) -> Result<Self> {
        let path = paths::soul_path(root);
        if !path.exists() {
            return Err(SoulguardError::NotInitialized);
        }
        let data = std::fs::read_to_string(&path)?;
        Self::parse(&data)
    }

    /// Parse a soul file from its YAML text (used for both on-disk and
    /// staged-tree content, so the two gates cannot diverge in how they
    /// read the file).
    pub fn parse(data: &str) -> Result<Self> {
        let soul: SoulFile = serde_yaml::from_str(data)?;
        Ok(soul)
    }

    pub fn save(&self, root: &Path) -> Result<()> {
        let path = paths::soul_path(root);
        let data = serde_yaml::to_string(self)?;
        io::atomic_write(&path, data.as_bytes())
    }

    /// The pinned digest, validated to be a literal hex constant.
    /// Returns [`SoulguardError::ComputedPin`] for anything else.
    pub fn pin(&self) -> Result<&str> {
        let raw = self.pinned_digest.trim();
        if !digest::is_hex_digest(raw) {
            return Err(SoulguardError::ComputedPin(self.pinned_digest.clone()));
        }
        Ok(raw)
    }

    /// Digest of the directives as they stand right now. Exact bytes — no
    /// normalization.
    pub fn computed_digest(&self) -> String {
        digest::sha256_hex(self.directives.as_bytes())
    }

    /// Verify `sha256(directives) == pinned_digest`.
    ///
    /// Fails with `ComputedPin` if the pin is not a literal, or
    /// `DigestMismatch` carrying both values if it is but does not match.
    pub fn verify(&self) -> Result<()> {
        let pinned = self.pin()?;
        let computed = self.computed_digest();
        if computed != pinned {
            return Err(SoulguardError::DigestMismatch {
                computed,
                pinned: pinned.to_string(),
            });
        }
        Ok(())
    }

    /// Re-pin after a reviewed directives change: recompute the digest and
    /// stamp the time. The caller writes the external record in lockstep.
    pub fn repin(&mut self) -> String {
        self.pinned_digest = self.computed_digest();
        self.pinned_at = Utc::now();
        self.pinned_digest.clone()
    }
}
