//! Identity stage that reports the values flowing through a pipeline.
//!
//! Events go to [`tracing`]; ironchain never installs a subscriber, so nothing is
//! printed unless the application sets one up.

use crate::chain::Chain;
use crate::document::Document;
use anyhow::Result;
use std::fmt::Debug;
use std::sync::Arc;
use tracing::Level;

type Serializer<T> = Arc<dyn Fn(&T) -> String + Send + Sync>;

/// Passes its input through unchanged after logging it.
pub struct LoggingChain<T> {
    prefix: String,
    level: Level,
    serializer: Serializer<T>,
}

impl<T: Debug + 'static> LoggingChain<T> {
    /// Log with the value's `Debug` representation at `INFO`.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self::with_serializer(prefix, |t: &T| format!("{t:?}"))
    }
}

impl<T> LoggingChain<T> {
    /// Log with a custom rendering of the value.
    pub fn with_serializer<F>(prefix: impl Into<String>, serializer: F) -> Self
    where
        F: Fn(&T) -> String + Send + Sync + 'static,
    {
        Self {
            prefix: prefix.into(),
            level: Level::INFO,
            serializer: Arc::new(serializer),
        }
    }

    /// Change the level events are emitted at.
    #[must_use]
    pub fn level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Render `input` the way it will be logged.
    pub fn render(&self, input: &T) -> String {
        format!("{}{}", self.prefix, (self.serializer)(input))
    }
}

impl LoggingChain<Document> {
    /// Log documents as JSON objects.
    pub fn json(prefix: impl Into<String>) -> Self {
        Self::with_serializer(prefix, |d: &Document| {
            serde_json::to_string(d).unwrap_or_else(|e| format!("<unserializable document: {e}>"))
        })
    }
}

/// A framed prefix: the title between two separator lines.
#[must_use]
pub fn banner(title: &str) -> String {
    let line = "=".repeat(80);
    format!("\n{line}\n{title}\n{line}\n")
}

impl<T: Send> Chain<T, T> for LoggingChain<T> {
    fn run(&self, input: T) -> Result<T> {
        let message = self.render(&input);
        if self.level == Level::ERROR {
            tracing::error!("{message}");
        } else if self.level == Level::WARN {
            tracing::warn!("{message}");
        } else if self.level == Level::INFO {
            tracing::info!("{message}");
        } else if self.level == Level::DEBUG {
            tracing::debug!("{message}");
        } else {
            tracing::trace!("{message}");
        }
        Ok(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passes_input_through() {
        let log = LoggingChain::<Vec<u8>>::new("bytes: ").level(Level::DEBUG);
        assert_eq!(log.run(vec![1, 2]).unwrap(), vec![1, 2]);
        assert_eq!(log.render(&vec![3]), "bytes: [3]");
    }

    #[test]
    fn json_renders_documents_in_insertion_order() {
        let doc = Document::new().with("source", "a").with("content", "b");
        let log = LoggingChain::json("");
        assert_eq!(log.render(&doc), r#"{"source":"a","content":"b"}"#);
    }

    #[test]
    fn banner_frames_title() {
        let b = banner("Answer");
        assert!(b.starts_with('\n'));
        assert!(b.contains("\nAnswer\n"));
    }
}
