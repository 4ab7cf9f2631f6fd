//! Assertion functions for testing stage outputs.

use crate::error::{ChainError, chain_error};
use crate::split::LengthMetric;
use std::fmt::Debug;

/// Assert that two collections are equal in order and content.
///
/// # Panics
///
/// Panics if the collections differ in length or content.
///
/// # Example
///
/// ```
/// use ironchain::testing::assert_collections_equal;
///
/// assert_collections_equal(&[1, 2, 3], &[1, 2, 3]);
/// ```
pub fn assert_collections_equal<T: Debug + PartialEq>(actual: &[T], expected: &[T]) {
    assert_eq!(
        actual.len(),
        expected.len(),
        "Collection length mismatch:\n  Expected length: {}\n  Actual length: {}\n  Expected: {expected:?}\n  Actual: {actual:?}",
        expected.len(),
        actual.len()
    );

    for (i, (a, e)) in actual.iter().zip(expected.iter()).enumerate() {
        assert_eq!(
            a, e,
            "Collection mismatch at index {i}:\n  Expected: {e:?}\n  Actual: {a:?}\n  Full expected: {expected:?}\n  Full actual: {actual:?}"
        );
    }
}

/// Assert that all elements in a collection satisfy a predicate.
///
/// # Panics
///
/// Panics if any element does not satisfy the predicate.
pub fn assert_all<T: Debug>(collection: &[T], predicate: impl Fn(&T) -> bool) {
    for (i, item) in collection.iter().enumerate() {
        assert!(
            predicate(item),
            "Predicate failed for element at index {i}:\n  Element: {item:?}\n  Collection: {collection:?}"
        );
    }
}

/// Assert that a collection has the expected size.
///
/// # Panics
///
/// Panics if the collection size doesn't match the expected size.
pub fn assert_collection_size<T>(collection: &[T], expected_size: usize) {
    assert_eq!(
        collection.len(),
        expected_size,
        "Collection size mismatch:\n  Expected: {expected_size}\n  Actual: {}",
        collection.len()
    );
}

/// Assert that `chunks` concatenate back to `text`.
///
/// # Panics
///
/// Panics with the first diverging byte offset.
///
/// # Example
///
/// ```
/// use ironchain::testing::assert_lossless;
///
/// assert_lossless(&["Hi. ", "Bye."], "Hi. Bye.");
/// ```
pub fn assert_lossless<S: AsRef<str> + Debug>(chunks: &[S], text: &str) {
    let joined: String = chunks.iter().map(AsRef::as_ref).collect();
    if joined != text {
        let at = joined
            .bytes()
            .zip(text.bytes())
            .position(|(a, b)| a != b)
            .unwrap_or_else(|| joined.len().min(text.len()));
        panic!(
            "Chunks do not reconstruct the text (diverge at byte {at}):\n  Text: {text:?}\n  Chunks: {chunks:?}"
        );
    }
}

/// Assert that every chunk measures at most `max_length`.
///
/// # Panics
///
/// Panics on the first oversized chunk.
pub fn assert_chunks_within<S, M>(chunks: &[S], max_length: usize, metric: M)
where
    S: AsRef<str> + Debug,
    M: LengthMetric,
{
    for (i, chunk) in chunks.iter().enumerate() {
        let length = metric.measure(chunk.as_ref());
        assert!(
            length <= max_length,
            "Chunk {i} exceeds the bound:\n  Length: {length}\n  Max: {max_length}\n  Chunk: {chunk:?}"
        );
    }
}

/// Assert that `result` failed with a [`ChainError`] matching `expected`.
///
/// # Panics
///
/// Panics when `result` is `Ok`, or the error is not a matching [`ChainError`].
///
/// # Example
///
/// ```
/// use ironchain::*;
/// use ironchain::testing::assert_chain_error;
///
/// let r = MaxLengthSplitter::new(0, CharCount);
/// assert_chain_error(&r, |e| matches!(e, ChainError::Configuration(_)));
/// ```
pub fn assert_chain_error<T: Debug>(
    result: &anyhow::Result<T>,
    expected: impl Fn(&ChainError) -> bool,
) {
    match result {
        Ok(v) => panic!("Expected a chain error, got Ok({v:?})"),
        Err(e) => match chain_error(e) {
            Some(ce) => assert!(expected(ce), "Unexpected chain error: {ce:?}"),
            None => panic!("Expected a chain error, got: {e:#}"),
        },
    }
}
