//! Length metrics used to bound chunk size.

use regex::Regex;
use std::sync::{Arc, LazyLock};

/// Measures a piece of text.
pub trait LengthMetric: Send + Sync {
    fn measure(&self, text: &str) -> usize;
}

/// Number of Unicode scalar values.
#[derive(Clone, Copy, Debug, Default)]
pub struct CharCount;

impl LengthMetric for CharCount {
    fn measure(&self, text: &str) -> usize {
        text.chars().count()
    }
}

static WORD_PIECES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\w+|[^\w\s]").expect("static token pattern"));

/// Approximate token count: every run of word characters and every other
/// non-whitespace character counts as one token.
///
/// This tracks BPE tokenizers closely enough on prose for chunk sizing. When the
/// exact count of a specific model matters, wrap that model's tokenizer with
/// [`metric_fn`].
#[derive(Clone, Debug)]
pub struct TokenEstimate {
    pattern: Regex,
}

impl TokenEstimate {
    #[must_use]
    pub fn new() -> Self {
        Self {
            pattern: WORD_PIECES.clone(),
        }
    }

    /// Count matches of a custom pattern instead.
    pub fn with_pattern(pattern: Regex) -> Self {
        Self { pattern }
    }
}

impl Default for TokenEstimate {
    fn default() -> Self {
        Self::new()
    }
}

impl LengthMetric for TokenEstimate {
    fn measure(&self, text: &str) -> usize {
        self.pattern.find_iter(text).count()
    }
}

/// A closure used as a metric. See [`metric_fn`].
#[derive(Clone)]
pub struct MetricFn<F>(F);

/// Use `f` as a length metric, e.g. a model tokenizer's counting function.
pub fn metric_fn<F>(f: F) -> MetricFn<F>
where
    F: Fn(&str) -> usize + Send + Sync,
{
    MetricFn(f)
}

impl<F> LengthMetric for MetricFn<F>
where
    F: Fn(&str) -> usize + Send + Sync,
{
    fn measure(&self, text: &str) -> usize {
        (self.0)(text)
    }
}

impl<M: LengthMetric + ?Sized> LengthMetric for &M {
    fn measure(&self, text: &str) -> usize {
        (**self).measure(text)
    }
}

impl<M: LengthMetric + ?Sized> LengthMetric for Arc<M> {
    fn measure(&self, text: &str) -> usize {
        (**self).measure(text)
    }
}
