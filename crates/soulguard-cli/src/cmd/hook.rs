use anyhow::{bail, Context};
use soulguard_core::{io, paths};
use std::path::Path;

/// Marker identifying a hook we generated. A hook without it belongs to
/// someone else and is never overwritten without --force.
const MANAGED_MARKER: &str = "# soulguard:managed";

/// The hook defers every decision to the binary, so there is a single
/// cross-platform gate implementation instead of per-shell scripts that
/// can drift apart.
const HOOK_SCRIPT: &str = "\
#!/bin/sh
# soulguard:managed — regenerate with `soulguard install-hook`
exec soulguard precommit
";

pub fn run(root: &Path, force: bool) -> anyhow::Result<()> {
    let hooks_dir = root.join(paths::HOOKS_DIR);
    if !root.join(".git").is_dir() {
        bail!("not a git repository: {}", root.display());
    }

    let hook_path = paths::precommit_hook_path(root);
    if hook_path.exists() && !force {
        let existing = std::fs::read_to_string(&hook_path).unwrap_or_default();
        if !existing.contains(MANAGED_MARKER) {
            bail!(
                "a pre-commit hook already exists at {} and is not managed by soulguard; \
                 re-run with --force to replace it",
                hook_path.display()
            );
        }
    }

    io::ensure_dir(&hooks_dir)?;
    io::atomic_write(&hook_path, HOOK_SCRIPT.as_bytes()).context("failed to write hook")?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mut perms = std::fs::metadata(&hook_path)?.permissions();
        perms.set_mode(0o755);
        std::fs::set_permissions(&hook_path, perms)?;
    }

    println!("Installed commit gate: {}", hook_path.display());
    Ok(())
}
