//! Greedy, order-preserving packing of partitions into length-bounded chunks.
//!
//! Chunks are contiguous runs of partitions, so concatenating them reproduces the
//! partitioned text exactly. Under that contiguity constraint a single left-to-right
//! pass yields the fewest chunks for a given partitioning.

use crate::error::ChainError;
use crate::split::metric::LengthMetric;
use anyhow::Result;
use std::mem;

/// Pack `partitions` into chunks whose measured length does not exceed `max_length`.
///
/// The returned iterator is lazy: partitions are pulled only as chunks are consumed.
/// It yields `Err` once and then stops when
/// - `max_length` is zero ([`ChainError::Configuration`]), or
/// - a single partition measures more than `max_length` on its own
///   ([`ChainError::PartitionTooLarge`]). Chunks completed before that partition are
///   still yielded first.
///
/// ```
/// use ironchain::{pack, CharCount};
///
/// let chunks: Vec<String> = pack(["ab", "cd", "e"], 4, CharCount)
///     .collect::<anyhow::Result<_>>()
///     .unwrap();
/// assert_eq!(chunks, vec!["abcd", "e"]);
/// ```
pub fn pack<P, M>(partitions: P, max_length: usize, metric: M) -> Packed<P::IntoIter, M>
where
    P: IntoIterator,
    P::Item: AsRef<str>,
    M: LengthMetric,
{
    Packed {
        partitions: partitions.into_iter(),
        max_length,
        metric,
        acc: String::new(),
        pending: None,
        done: false,
    }
}

/// Iterator returned by [`pack`].
pub struct Packed<P, M> {
    partitions: P,
    max_length: usize,
    metric: M,
    acc: String,
    pending: Option<ChainError>,
    done: bool,
}

impl<P, M> Packed<P, M> {
    fn fail(&mut self, err: ChainError) -> Option<Result<String>> {
        self.done = true;
        self.acc.clear();
        Some(Err(err.into()))
    }
}

impl<P, M> Iterator for Packed<P, M>
where
    P: Iterator,
    P::Item: AsRef<str>,
    M: LengthMetric,
{
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        if self.max_length == 0 {
            return self.fail(ChainError::config("maximum chunk length must be above zero"));
        }
        if let Some(err) = self.pending.take() {
            return self.fail(err);
        }

        while let Some(part) = self.partitions.next() {
            let part = part.as_ref();
            let was_empty = self.acc.is_empty();
            self.acc.push_str(part);
            let length = self.metric.measure(&self.acc);

            if length < self.max_length {
                continue;
            }
            if length == self.max_length {
                tracing::debug!(length, "chunk filled to the bound");
                return Some(Ok(mem::take(&mut self.acc)));
            }
            if was_empty {
                return self.fail(ChainError::PartitionTooLarge {
                    length,
                    max_length: self.max_length,
                });
            }

            // Close the chunk before `part`; `part` opens the next one.
            let split_at = self.acc.len() - part.len();
            let carried = self.acc.split_off(split_at);
            let chunk = mem::replace(&mut self.acc, carried);
            let carried_length = self.metric.measure(&self.acc);
            if carried_length > self.max_length {
                self.acc.clear();
                self.pending = Some(ChainError::PartitionTooLarge {
                    length: carried_length,
                    max_length: self.max_length,
                });
            }
            return Some(Ok(chunk));
        }

        self.done = true;
        if self.acc.is_empty() {
            None
        } else {
            Some(Ok(mem::take(&mut self.acc)))
        }
    }
}
