use super::SoulTool;
use soulguard_core::startup::VerifiedSoul;

pub struct SoulStatusTool;

impl SoulTool for SoulStatusTool {
    fn name(&self) -> &str {
        "soul_status"
    }

    fn description(&self) -> &str {
        "Report the verified identity's digest and when it was last pinned"
    }

    fn schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {}
        })
    }

    fn call(
        &self,
        _args: serde_json::Value,
        soul: &VerifiedSoul,
    ) -> Result<serde_json::Value, String> {
        Ok(serde_json::json!({
            "name": soul.name(),
            "digest": soul.digest(),
            "pinned_at": soul.pinned_at().to_rfc3339(),
            "verified": true,
        }))
    }
}
