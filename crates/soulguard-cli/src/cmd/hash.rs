use crate::output::print_json;
use anyhow::Context;
use soulguard_core::soul::SoulFile;
use std::path::Path;

/// Print the digest of the directives as they stand in the working tree.
/// This is the value a reviewer pins — the command never verifies.
pub fn run(root: &Path, json: bool) -> anyhow::Result<()> {
    let soul = SoulFile::load(root).context("failed to load soul file")?;
    let computed = soul.computed_digest();
    if json {
        print_json(&serde_json::json!({ "digest": computed }))?;
    } else {
        println!("{computed}");
    }
    Ok(())
}
