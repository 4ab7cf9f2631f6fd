//! Serializable configuration for splitters.
//!
//! Collaborators are always passed in explicitly; this module only turns a config
//! file into the objects a caller would otherwise build by hand.
//!
//! ```
//! use ironchain::config::SplitterConfig;
//! use ironchain::TextSplitter;
//!
//! # fn main() -> anyhow::Result<()> {
//! let cfg = SplitterConfig::from_json_str(
//!     r#"{ "max_length": 12, "streamer": { "kind": "word" }, "metric": "chars" }"#,
//! )?;
//! let parts = cfg.build()?.split("one two three four")?;
//! assert_eq!(parts, vec!["one two ", "three four"]);
//! # Ok(())
//! # }
//! ```

use crate::error::ChainError;
use crate::split::{
    CharCount, FixedWidthStreamer, LengthMetric, MaxLengthSplitter, SentenceStreamer,
    TextStreamer, TokenEstimate, WordStreamer,
};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::sync::Arc;

/// Which boundary streamer to use.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum StreamerKind {
    #[default]
    Sentence,
    Word,
    FixedWidth { width: usize },
}

/// Which length metric to use.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    #[default]
    Chars,
    Tokens,
}

/// Settings for a [`MaxLengthSplitter`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitterConfig {
    pub max_length: usize,
    #[serde(default)]
    pub streamer: StreamerKind,
    #[serde(default)]
    pub metric: MetricKind,
}

impl SplitterConfig {
    pub fn new(max_length: usize) -> Self {
        Self {
            max_length,
            streamer: StreamerKind::default(),
            metric: MetricKind::default(),
        }
    }

    /// # Errors
    /// Malformed JSON or invalid values.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let cfg: Self = serde_json::from_str(json).context("parse splitter config")?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// # Errors
    /// Unreadable file, malformed JSON or invalid values.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
        Self::from_json_str(&raw).with_context(|| format!("load splitter config {}", path.display()))
    }

    /// # Errors
    /// [`ChainError::Configuration`] for a zero `max_length` or fixed width.
    pub fn validate(&self) -> Result<()> {
        if self.max_length == 0 {
            return Err(ChainError::config("max_length must be above zero").into());
        }
        if let StreamerKind::FixedWidth { width: 0 } = self.streamer {
            return Err(ChainError::config("fixed_width streamer needs a width above zero").into());
        }
        Ok(())
    }

    /// # Errors
    /// Same as [`validate`](Self::validate).
    pub fn build(&self) -> Result<MaxLengthSplitter> {
        self.validate()?;
        let streamer: Arc<dyn TextStreamer> = match self.streamer {
            StreamerKind::Sentence => Arc::new(SentenceStreamer),
            StreamerKind::Word => Arc::new(WordStreamer),
            StreamerKind::FixedWidth { width } => Arc::new(FixedWidthStreamer::new(width)?),
        };
        let metric: Arc<dyn LengthMetric> = match self.metric {
            MetricKind::Chars => Arc::new(CharCount),
            MetricKind::Tokens => Arc::new(TokenEstimate::new()),
        };
        MaxLengthSplitter::from_parts(self.max_length, streamer, metric)
    }
}
