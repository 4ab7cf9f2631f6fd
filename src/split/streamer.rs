//! Boundary streamers: partition a text into ordered, non-overlapping slices.
//!
//! Every streamer here yields slices that concatenate back to the exact input. No
//! character is dropped, trimmed or duplicated; whitespace belongs to the partition
//! it follows.

use crate::error::ChainError;
use anyhow::Result;
use unicode_segmentation::UnicodeSegmentation;

/// Produces the partitions of a text, in order.
pub trait TextStreamer: Send + Sync {
    fn stream<'a>(&self, text: &'a str) -> Box<dyn Iterator<Item = &'a str> + 'a>;

    /// Collect all partitions of `text`.
    fn partitions<'a>(&self, text: &'a str) -> Vec<&'a str> {
        self.stream(text).collect()
    }
}

/// Sentence partitions.
///
/// Boundaries follow Unicode sentence segmentation (UAX #29), so CJK full stops and
/// full-width `！`/`？` end sentences as `.`, `!` and `?` do. A period before a
/// lowercase word (`"e.g. this"`) or a digit (`"3.14"`) does not break. Every line
/// feed ends a sentence, and the whitespace after a sentence belongs to it, blank
/// lines included.
#[derive(Clone, Copy, Debug, Default)]
pub struct SentenceStreamer;

impl TextStreamer for SentenceStreamer {
    fn stream<'a>(&self, text: &'a str) -> Box<dyn Iterator<Item = &'a str> + 'a> {
        let mut bounds = text.split_sentence_bound_indices().peekable();
        Box::new(std::iter::from_fn(move || {
            let (start, first) = bounds.next()?;
            let mut end = start + first.len();
            while let Some((_, blank)) =
                bounds.next_if(|(_, s)| s.chars().all(char::is_whitespace))
            {
                end += blank.len();
            }
            Some(&text[start..end])
        }))
    }
}

/// Byte offset just past the whitespace run starting at `from`.
fn skip_whitespace(text: &str, from: usize) -> usize {
    text[from..]
        .char_indices()
        .find(|(_, c)| !c.is_whitespace())
        .map_or(text.len(), |(i, _)| from + i)
}

/// Word partitions: each word with the whitespace after it. Whitespace before the
/// first word is a partition of its own.
#[derive(Clone, Copy, Debug, Default)]
pub struct WordStreamer;

impl TextStreamer for WordStreamer {
    fn stream<'a>(&self, text: &'a str) -> Box<dyn Iterator<Item = &'a str> + 'a> {
        let mut pos = 0;
        Box::new(std::iter::from_fn(move || {
            if pos >= text.len() {
                return None;
            }
            let start = pos;
            let after_leading = skip_whitespace(text, start);
            if after_leading > start {
                pos = after_leading;
                return Some(&text[start..pos]);
            }
            let word_end = text[start..]
                .char_indices()
                .find(|(_, c)| c.is_whitespace())
                .map_or(text.len(), |(i, _)| start + i);
            let end = skip_whitespace(text, word_end);
            pos = end;
            Some(&text[start..end])
        }))
    }
}

/// Partitions of at most `width` characters.
#[derive(Clone, Copy, Debug)]
pub struct FixedWidthStreamer {
    width: usize,
}

impl FixedWidthStreamer {
    /// # Errors
    /// [`ChainError::Configuration`] when `width` is zero.
    pub fn new(width: usize) -> Result<Self> {
        if width == 0 {
            return Err(ChainError::config("fixed-width streamer needs a width above zero").into());
        }
        Ok(Self { width })
    }

    pub fn width(&self) -> usize {
        self.width
    }
}

impl TextStreamer for FixedWidthStreamer {
    fn stream<'a>(&self, text: &'a str) -> Box<dyn Iterator<Item = &'a str> + 'a> {
        let width = self.width;
        let mut rest = text;
        Box::new(std::iter::from_fn(move || {
            if rest.is_empty() {
                return None;
            }
            let cut = rest.char_indices().nth(width).map_or(rest.len(), |(i, _)| i);
            let (head, tail) = rest.split_at(cut);
            rest = tail;
            Some(head)
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn period_before_lowercase_does_not_break() {
        let parts = SentenceStreamer.partitions("See e.g. this one. Next!");
        assert_eq!(parts, vec!["See e.g. this one. ", "Next!"]);
    }

    #[test]
    fn decimals_stay_together() {
        let parts = SentenceStreamer.partitions("Pi is 3.14 roughly. Yes.");
        assert_eq!(parts, vec!["Pi is 3.14 roughly. ", "Yes."]);
    }

    #[test]
    fn closing_quote_belongs_to_sentence() {
        let parts = SentenceStreamer.partitions("He said \"stop.\" Then left?! Ok");
        assert_eq!(parts, vec!["He said \"stop.\" ", "Then left?! ", "Ok"]);
    }

    #[test]
    fn blank_line_ends_partition() {
        let parts = SentenceStreamer.partitions("Heading\n\nBody text");
        assert_eq!(parts, vec!["Heading\n\n", "Body text"]);
    }

    #[test]
    fn leading_blank_lines_form_one_partition() {
        let parts = SentenceStreamer.partitions("\n\n  Hello. World.");
        assert_eq!(parts, vec!["\n\n", "  Hello. ", "World."]);
    }

    #[test]
    fn words_keep_trailing_whitespace() {
        let parts = WordStreamer.partitions("  two  words\n");
        assert_eq!(parts, vec!["  ", "two  ", "words\n"]);
    }

    #[test]
    fn fixed_width_respects_char_boundaries() -> Result<()> {
        let parts = FixedWidthStreamer::new(2)?.partitions("héllo");
        assert_eq!(parts, vec!["hé", "ll", "o"]);
        Ok(())
    }
}
