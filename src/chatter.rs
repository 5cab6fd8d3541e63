// File: src/chatter.rs
use crate::config::ChatterConfig;
use crate::core::model::{Model, ModelStats};
use crate::error::Result;
use log::debug;
use rand::rngs::StdRng;
use rand::Rng;
use std::path::Path;

/// A model wired up the way a chat channel uses it: lines addressed to the
/// bot get a reply, everything else is learned.
pub struct Chatter<R = StdRng> {
    config: ChatterConfig,
    model: Model<R>,
}

impl Chatter<StdRng> {
    /// Loads the configured brain file, or starts empty if there is none.
    pub fn open(config: ChatterConfig) -> Result<Self> {
        let model = Model::from_file_or_new(&config.brain_file)?;
        Ok(Self { config, model })
    }
}

impl<R: Rng> Chatter<R> {
    pub fn with_model(config: ChatterConfig, model: Model<R>) -> Self {
        Self { config, model }
    }

    pub fn config(&self) -> &ChatterConfig {
        &self.config
    }

    pub fn model(&self) -> &Model<R> {
        &self.model
    }

    /// The text after "nickname:" (or any other attention char), if `raw` is addressed to us.
    fn addressed_text<'a>(&self, raw: &'a str) -> Option<&'a str> {
        let nick = &self.config.nickname;
        if raw.len() <= nick.len() {
            return None;
        }
        let head = raw.get(..nick.len())?;
        if head.to_lowercase() != nick.to_lowercase() {
            return None;
        }
        let rest = &raw[nick.len()..];
        let attn = rest.chars().next()?;
        if !self.config.attention_chars.contains(attn) {
            return None;
        }
        Some(rest[attn.len_utf8()..].trim())
    }

    /// Handles one line of chat. Returns the reply, if one is due.
    pub fn hear(&mut self, line: &str) -> Result<Option<String>> {
        let raw = line.trim();
        let Some(text) = self.addressed_text(raw) else {
            self.model.learn(raw)?;
            return Ok(None);
        };

        let reply = self.model.reply_to(text)?;
        if reply.is_empty() {
            debug!("nothing to say to {:?}", text);
            return Ok(None);
        }
        let mut answer = reply.text();
        if reply.echoes_input() {
            if let Some(prefix) = &self.config.identical_reply_prefix {
                answer.insert_str(0, prefix);
            }
        }
        Ok(Some(answer))
    }

    pub fn train(&mut self, path: impl AsRef<Path>) -> Result<usize> {
        self.model.train_file(path)
    }

    pub fn stats(&self) -> ModelStats {
        self.model.stats()
    }

    /// Human-readable size report, one line per figure.
    pub fn stats_report(&self) -> Vec<String> {
        let stats = self.stats();
        vec![
            format!("Total unique symbols: {}", stats.symbols),
            format!("Total unique tuples: {}", stats.tuples),
            format!("Total nodes: {}", stats.nodes),
            format!("Memory usage: {}", stats.bytes),
        ]
    }

    /// The same figures as one JSON object.
    pub fn stats_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.stats())?)
    }

    pub fn save(&self) -> Result<()> {
        self.model.save(&self.config.brain_file)
    }

    pub fn clear(&mut self) {
        self.model.clear();
    }
}
