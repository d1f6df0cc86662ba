use soulguard_core::startup::VerifiedSoul;

pub mod get_directives;
pub mod soul_status;

/// A tool exposed over MCP. Tools receive the identity that was verified at
/// startup — they never re-read the disk, so a post-start edit cannot leak
/// unverified directives into a session.
pub trait SoulTool: Send + Sync {
    fn name(&self) -> &str;
    fn description(&self) -> &str;
    fn schema(&self) -> serde_json::Value;
    fn call(&self, args: serde_json::Value, soul: &VerifiedSoul)
        -> Result<serde_json::Value, String>;
}

pub fn all_tools() -> Vec<Box<dyn SoulTool>> {
    vec![
        Box::new(get_directives::GetDirectivesTool),
        Box::new(soul_status::SoulStatusTool),
    ]
}
