//! Lazy, single-pass sequences flowing between stages.
//!
//! A [`Seq<T>`] is a boxed iterator of `anyhow::Result<T>`. Stages that operate on
//! sequences ([`MapEach`](crate::MapEach), [`SplitDocuments`](crate::SplitDocuments),
//! sequential [`Join`](crate::Join)) do their work only when an element is pulled, so
//! a failure inside them surfaces as an `Err` item at consumption time instead of at
//! `run` time.
//!
//! Sequences are `Send` so they can be handed to another thread, but they are not
//! shareable and cannot be restarted.

use anyhow::Result;
use std::fmt;

/// Lazy single-pass sequence of fallible items.
pub struct Seq<T> {
    inner: Box<dyn Iterator<Item = Result<T>> + Send>,
}

impl<T: Send + 'static> Seq<T> {
    /// Wrap an iterator of fallible items.
    pub fn new<It>(iter: It) -> Self
    where
        It: Iterator<Item = Result<T>> + Send + 'static,
    {
        Self {
            inner: Box::new(iter),
        }
    }

    /// Wrap an iterator of plain values.
    pub fn from_values<It>(iter: It) -> Self
    where
        It: IntoIterator<Item = T>,
        It::IntoIter: Send + 'static,
    {
        Self::new(iter.into_iter().map(Ok))
    }

    /// A sequence over an owned vector.
    #[must_use]
    pub fn from_vec(items: Vec<T>) -> Self {
        Self::from_values(items)
    }

    /// A sequence yielding exactly `item`.
    pub fn once(item: T) -> Self {
        Self::new(std::iter::once(Ok(item)))
    }

    /// A sequence with no elements.
    #[must_use]
    pub fn empty() -> Self {
        Self::new(std::iter::empty())
    }

    /// Drain the sequence into a vector, stopping at the first failure.
    ///
    /// # Errors
    /// Returns the first `Err` item encountered.
    pub fn try_collect(self) -> Result<Vec<T>> {
        self.collect()
    }

    /// Lazily transform every successful item, passing failures through.
    pub fn map_ok<O, F>(self, f: F) -> Seq<O>
    where
        O: Send + 'static,
        F: FnMut(T) -> Result<O> + Send + 'static,
    {
        let mut f = f;
        Seq::new(self.inner.map(move |item| item.and_then(&mut f)))
    }
}

impl<T> Iterator for Seq<T> {
    type Item = Result<T>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> fmt::Debug for Seq<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Seq")
            .field("size_hint", &self.inner.size_hint())
            .finish()
    }
}

impl<T: Send + 'static> From<Vec<T>> for Seq<T> {
    fn from(items: Vec<T>) -> Self {
        Self::from_vec(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    #[test]
    fn try_collect_stops_at_first_failure() {
        let seq = Seq::new(vec![Ok(1), Err(anyhow!("boom")), Ok(3)].into_iter());
        let err = seq.try_collect().unwrap_err();
        assert_eq!(err.to_string(), "boom");
    }

    #[test]
    fn map_ok_is_lazy() {
        use std::sync::Arc;
        use std::sync::atomic::{AtomicUsize, Ordering};

        let calls = Arc::new(AtomicUsize::new(0));
        let c = Arc::clone(&calls);
        let mut seq = Seq::from_vec(vec![1, 2, 3]).map_ok(move |x| {
            c.fetch_add(1, Ordering::SeqCst);
            Ok(x * 10)
        });
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(seq.next().unwrap().unwrap(), 10);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
