//! Error taxonomy for the composition engine and the text splitter.
//!
//! Every fallible operation in ironchain returns [`anyhow::Result`]. Failures raised
//! by member stages travel through the engine untouched, so a caller sees exactly the
//! error its stage produced. Failures the crate raises itself are [`ChainError`]
//! values wrapped in [`anyhow::Error`]; recover them with
//! [`anyhow::Error::downcast_ref`]:
//!
//! ```
//! use ironchain::{ChainError, pack, CharCount};
//!
//! let err = pack(["way too long"], 4, CharCount).next().unwrap().unwrap_err();
//! assert!(matches!(
//!     err.downcast_ref::<ChainError>(),
//!     Some(ChainError::PartitionTooLarge { .. })
//! ));
//! ```

use thiserror::Error;

/// Failures raised by ironchain itself.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChainError {
    /// A single-element unwrap received an empty sequence.
    #[error("expected exactly one element but the sequence was empty")]
    EmptySequence,

    /// A single-element unwrap received more than one element.
    /// Only the second element is pulled; the rest of the sequence is left unread.
    #[error("expected exactly one element but the sequence had more")]
    AmbiguousSequence,

    /// One partition alone is longer than the chunk bound. The packer never splits
    /// inside a partition; a finer-grained streamer is required.
    #[error(
        "text partition of length {length} exceeds the maximum chunk length {max_length}; \
         use a finer-grained text streamer"
    )]
    PartitionTooLarge {
        /// Measured length of the offending partition.
        length: usize,
        /// Configured maximum.
        max_length: usize,
    },

    /// Invalid construction parameters.
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// A document lacked a field the stage needs.
    #[error("document has no `{0}` field")]
    MissingField(String),

    /// The stage was cancelled before it started.
    #[error("stage cancelled")]
    Cancelled,
}

impl ChainError {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }
}

/// Returns the [`ChainError`] carried by `err`, if it is one.
///
/// Looks through the whole context chain, so errors decorated with
/// [`anyhow::Context`] still match.
pub fn chain_error(err: &anyhow::Error) -> Option<&ChainError> {
    err.chain().find_map(|e| e.downcast_ref::<ChainError>())
}
