//! Splitting text into length-bounded chunks.
//!
//! A [`TextStreamer`] cuts the text at boundaries (sentences by default), [`pack`]
//! greedily groups the partitions into chunks under a [`LengthMetric`] bound, and
//! [`SplitDocuments`] applies both to the `content` of every document in a sequence.
//!
//! ```
//! use ironchain::*;
//!
//! # fn main() -> anyhow::Result<()> {
//! let splitter = MaxLengthSplitter::new(50, CharCount)?;
//! let chunks = splitter.split("Hi there. This is an example text used for unit testing.")?;
//! assert_eq!(chunks, vec!["Hi there. ", "This is an example text used for unit testing."]);
//! # Ok(())
//! # }
//! ```

pub mod documents;
pub mod metric;
pub mod packer;
pub mod streamer;

pub use documents::SplitDocuments;
pub use metric::{CharCount, LengthMetric, MetricFn, TokenEstimate, metric_fn};
pub use packer::{Packed, pack};
pub use streamer::{FixedWidthStreamer, SentenceStreamer, TextStreamer, WordStreamer};

use crate::chain::Chain;
use crate::error::ChainError;
use crate::seq::Seq;
use anyhow::Result;
use std::fmt;
use std::sync::Arc;

/// Splits a text into one or more parts.
pub trait TextSplitter: Send + Sync {
    /// # Errors
    /// Implementation specific; [`MaxLengthSplitter`] fails on partitions that do not
    /// fit the bound.
    fn split(&self, text: &str) -> Result<Vec<String>>;
}

impl<S: TextSplitter + ?Sized> TextSplitter for Arc<S> {
    fn split(&self, text: &str) -> Result<Vec<String>> {
        (**self).split(text)
    }
}

/// Streams a text and packs the partitions under a length bound.
#[derive(Clone)]
pub struct MaxLengthSplitter {
    max_length: usize,
    streamer: Arc<dyn TextStreamer>,
    metric: Arc<dyn LengthMetric>,
}

impl MaxLengthSplitter {
    /// Sentence partitions measured with `metric`.
    ///
    /// # Errors
    /// [`ChainError::Configuration`] when `max_length` is zero.
    pub fn new(max_length: usize, metric: impl LengthMetric + 'static) -> Result<Self> {
        Self::with_streamer(max_length, SentenceStreamer, metric)
    }

    /// # Errors
    /// [`ChainError::Configuration`] when `max_length` is zero.
    pub fn with_streamer(
        max_length: usize,
        streamer: impl TextStreamer + 'static,
        metric: impl LengthMetric + 'static,
    ) -> Result<Self> {
        Self::from_parts(max_length, Arc::new(streamer), Arc::new(metric))
    }

    pub(crate) fn from_parts(
        max_length: usize,
        streamer: Arc<dyn TextStreamer>,
        metric: Arc<dyn LengthMetric>,
    ) -> Result<Self> {
        if max_length == 0 {
            return Err(ChainError::config("maximum chunk length must be above zero").into());
        }
        Ok(Self {
            max_length,
            streamer,
            metric,
        })
    }

    pub fn max_length(&self) -> usize {
        self.max_length
    }

    /// Lazily pack `text`.
    pub fn chunks<'a>(
        &'a self,
        text: &'a str,
    ) -> Packed<Box<dyn Iterator<Item = &'a str> + 'a>, &'a dyn LengthMetric> {
        pack(self.streamer.stream(text), self.max_length, self.metric.as_ref())
    }
}

impl fmt::Debug for MaxLengthSplitter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MaxLengthSplitter")
            .field("max_length", &self.max_length)
            .finish_non_exhaustive()
    }
}

impl TextSplitter for MaxLengthSplitter {
    fn split(&self, text: &str) -> Result<Vec<String>> {
        self.chunks(text).collect()
    }
}

/// The splitter as a stage: one text in, its chunks out.
impl Chain<String, Seq<String>> for MaxLengthSplitter {
    fn run(&self, input: String) -> Result<Seq<String>> {
        Ok(Seq::from_vec(self.split(&input)?))
    }
}
