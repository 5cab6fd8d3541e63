// File: src/config.rs
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Settings for a [`Chatter`](crate::chatter::Chatter), read from JSON.
/// Any field left out takes its default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatterConfig {
    /// Where the model is loaded from and saved to.
    pub brain_file: PathBuf,
    /// Name that addresses the bot, matched case-insensitively.
    pub nickname: String,
    /// Characters that may follow the nickname to ask for a reply.
    pub attention_chars: String,
    /// Put in front of a reply that only repeats what was said.
    pub identical_reply_prefix: Option<String>,
}

impl Default for ChatterConfig {
    fn default() -> Self {
        Self {
            brain_file: PathBuf::from("brain.bin"),
            nickname: "chatter".to_string(),
            attention_chars: ",:".to_string(),
            identical_reply_prefix: Some("I understand: ".to_string()),
        }
    }
}

impl ChatterConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ChatterError;

    #[test]
    fn test_missing_fields_take_defaults() {
        let config = ChatterConfig::from_json(r#"{ "nickname": "brigand" }"#).unwrap();
        assert_eq!(config.nickname, "brigand");
        assert_eq!(config.brain_file, PathBuf::from("brain.bin"));
        assert_eq!(config.attention_chars, ",:");
    }

    #[test]
    fn test_null_prefix_disables_it() {
        let config = ChatterConfig::from_json(r#"{ "identical_reply_prefix": null }"#).unwrap();
        assert_eq!(config.identical_reply_prefix, None);
    }

    #[test]
    fn test_bad_json_is_a_config_error() {
        let result = ChatterConfig::from_json("{ nope");
        assert!(matches!(result, Err(ChatterError::Config(_))));
    }
}
