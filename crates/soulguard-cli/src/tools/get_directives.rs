use super::SoulTool;
use soulguard_core::startup::VerifiedSoul;

pub struct GetDirectivesTool;

impl SoulTool for GetDirectivesTool {
    fn name(&self) -> &str {
        "get_directives"
    }

    fn description(&self) -> &str {
        "Get the agent's verified core directives — the immutable first block of every system prompt"
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
            "directives": soul.directives(),
        }))
    }
}
