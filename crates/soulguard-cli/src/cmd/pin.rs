use crate::output::print_json;
use anyhow::Context;
use soulguard_core::{record, soul::SoulFile};
use std::path::Path;

/// Re-pin after a reviewed directives change. Writes the new digest to both
/// the soul file and the external record so they cannot drift apart.
pub fn run(root: &Path, json: bool) -> anyhow::Result<()> {
    let mut soul = SoulFile::load(root).context("failed to load soul file")?;
    let previous = soul.pinned_digest.clone();
    let pinned = soul.repin();
    soul.save(root).context("failed to write soul file")?;
    record::save(root, &pinned).context("failed to write hash record")?;

    if json {
        print_json(&serde_json::json!({
            "previous": previous,
            "pinned": pinned,
            "pinned_at": soul.pinned_at,
        }))?;
    } else if previous == pinned {
        println!("Pin unchanged: {pinned}");
    } else {
        println!("Re-pinned: {previous} -> {pinned}");
        println!("Updated soul file and hash record in lockstep. Stage both in one commit.");
    }
    Ok(())
}
