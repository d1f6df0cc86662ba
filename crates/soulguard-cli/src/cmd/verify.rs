use crate::output::print_json;
use anyhow::Context;
use soulguard_core::{paths, record, startup};
use std::path::Path;

/// Full on-disk check: startup gate plus the record cross-check — the same
/// three-way agreement CI asserts.
pub fn run(root: &Path, json: bool) -> anyhow::Result<()> {
    let verified = startup::verify(root).context("soul verification failed")?;

    let rec = record::load(root).context("hash record check failed")?;
    record::check_lockstep(&rec, verified.digest()).context("hash record check failed")?;

    if json {
        print_json(&serde_json::json!({
            "name": verified.name(),
            "digest": verified.digest(),
            "pinned_at": verified.pinned_at(),
            "verified": true,
            "record": paths::RECORD_FILE,
        }))?;
    } else {
        println!("OK: soul '{}' verified", verified.name());
        println!("  digest:    {}", verified.digest());
        println!("  pinned at: {}", verified.pinned_at().to_rfc3339());
        println!("  record:    {} in lockstep", paths::RECORD_FILE);
    }
    Ok(())
}
