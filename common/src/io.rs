use crate::levels::LevelDescription;

// ============================================================================
// Level Encoding
// ============================================================================

// Level descriptions are handed to external renderers as JSON
pub fn encode_level(level: &LevelDescription) -> serde_json::Result<String> {
    serde_json::to_string_pretty(level)
}

pub fn decode_level(data: &str) -> serde_json::Result<LevelDescription> {
    serde_json::from_str(data)
}
