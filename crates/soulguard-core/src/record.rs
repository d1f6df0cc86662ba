//! External hash record: a second, independently stored copy of the pinned
//! digest under `.github/` so CI can verify it without parsing the soul
//! file. Must change in lockstep with the soul file — the commit gate
//! enforces that, CI re-checks it.

use crate::digest;
use crate::error::{Result, SoulguardError};
use crate::io;
use crate::paths;
use std::path::Path;

/// Read the record and validate its shape. The file is a single hex line;
/// a trailing newline is tolerated.
pub fn load(root: &Path) -> Result<String> {
    let path = paths::record_path(root);
    if !path.exists() {
        return Err(SoulguardError::RecordNotFound(
            paths::RECORD_FILE.to_string(),
        ));
    }
    let data = std::fs::read_to_string(&path)?;
    parse(&data)
}

/// Parse record content (used for both on-disk and staged-tree copies).
pub fn parse(data: &str) -> Result<String> {
    let value = data.trim();
    if !digest::is_hex_digest(value) {
        return Err(SoulguardError::InvalidRecord(value.to_string()));
    }
    Ok(value.to_string())
}

/// Write the record with a trailing newline.
pub fn save(root: &Path, digest_hex: &str) -> Result<()> {
    let path = paths::record_path(root);
    io::atomic_write(&path, format!("{digest_hex}\n").as_bytes())
}

/// Check the record agrees with the pinned digest.
pub fn check_lockstep(record: &str, pinned: &str) -> Result<()> {
    if record != pinned {
        return Err(SoulguardError::RecordMismatch {
            record: record.to_string(),
            pinned: pinned.to_string(),
        });
    }
    Ok(())
}
