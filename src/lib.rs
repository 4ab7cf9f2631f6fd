//! # Ironchain
//!
//! A **stage composition engine** for document pipelines, with a length-bounded text
//! splitter for feeding language models. Ironchain gives you typed building blocks
//! that plug into each other, plus the document-shaping stages that sit between
//! retrieval and generation.
//!
//! ## Key Features
//!
//! - **Typed stages** - anything implementing [`Chain<I, O>`] composes with [`then`](ChainExt::then)
//! - **Fan-out** - run several stages on one input, sequentially or on a Rayon pool, with results in declared order
//! - **Element-wise mapping** - lift a per-element stage over a lazy [`Seq`]
//! - **Cardinality adapters** - move between single values and sequences
//! - **Bounded chunking** - sentence streaming plus greedy packing under any [`LengthMetric`]
//! - **Document stages** - split, combine, rewrite content and parse answers with sources
//! - **I/O** - JSON Lines readers and writers (optional via feature flag)
//!
//! ## Quick Start
//!
//! ```
//! use ironchain::*;
//! # use anyhow::Result;
//!
//! # fn main() -> Result<()> {
//! let docs = vec![
//!     Document::new().with(SOURCE, "book of john").with(CONTENT, "Hi there. This is an example text used for unit testing."),
//! ];
//!
//! let split = SplitDocuments::new(MaxLengthSplitter::new(50, CharCount)?);
//! let chunks = split.run(Seq::from_vec(docs))?.try_collect()?;
//!
//! assert_eq!(chunks.len(), 2);
//! assert_eq!(chunks[0].content(), Some("Hi there. "));
//! assert_eq!(chunks[1].source(), Some("book of john"));
//! # Ok(())
//! # }
//! ```
//!
//! ## Core Concepts
//!
//! ### Stages
//!
//! A [`Chain<I, O>`] runs on one input and returns one output or an error. Closures
//! become stages with [`from_fn`]. [`ChainExt::then`] composes two stages into a
//! [`ChainLink`]; composition is associative and nesting is observable through
//! [`Chain::topology`].
//!
//! ### Sequences
//!
//! A [`Seq<T>`] is a lazy, single-pass sequence of `anyhow::Result<T>`. Stages that take
//! sequences do their work as items are pulled, so a failure surfaces as an `Err`
//! item when it is reached.
//!
//! ### Composites
//!
//! - [`Join`] - fan-out of one input to many stages, sequential or parallel
//! - [`MapEach`] - apply a stage to every element of a sequence
//! - [`WrapSingle`] / [`UnwrapSingle`] - value to one-element sequence and back
//! - [`LoggingChain`] - identity stage reporting what flows through it
//! - [`Cancellable`] - refuses to start once a [`CancellationToken`] is set
//!
//! ### Execution Modes
//!
//! Parallel composites take an [`ExecMode`]:
//! - **Sequential** - lazy, in-order, on the calling thread
//! - **Parallel** - eager, on Rayon's global pool or a dedicated pool of `threads` workers
//!
//! Both modes produce the same outputs in the same order.
//!
//! ## Splitting
//!
//! The [`split`] module cuts text with a [`TextStreamer`] and packs partitions with
//! [`pack`]. Chunks concatenate back to the original text, and no chunk exceeds the
//! bound. A partition that alone exceeds it fails with
//! [`ChainError::PartitionTooLarge`].
//!
//! ```
//! use ironchain::*;
//!
//! # fn main() -> anyhow::Result<()> {
//! let splitter = MaxLengthSplitter::new(10, TokenEstimate::new())?;
//! let parts = splitter.split("This is a short text. This is another short text.")?;
//! assert_eq!(parts, vec!["This is a short text. ", "This is another short text."]);
//! # Ok(())
//! # }
//! ```
//!
//! ## Feature Flags
//!
//! - `io-jsonl` - Enable JSON Lines I/O support (on by default)
//!
//! ## Module Overview
//!
//! - [`chain`] - The stage trait, composition and topology
//! - [`join`] / [`map_each`] / [`adapters`] - Composite stages
//! - [`split`] - Streamers, metrics, the packer and document splitting
//! - [`qa`] - Combining documents and parsing answers with sources
//! - [`config`] - Serializable splitter settings
//! - [`io`] - JSON Lines document I/O
//! - [`testing`] - Assertions, fixtures and mock stages for tests

pub mod adapters;
pub mod cancel;
pub mod chain;
pub mod config;
pub mod document;
pub mod error;
pub mod io;
pub mod join;
pub mod logging;
pub mod map_each;
pub mod qa;
pub mod runner;
pub mod seq;
pub mod split;
pub mod testing;

// General re-exports
pub use adapters::{Cardinality, UnwrapSingle, WrapSingle};
pub use cancel::{Cancellable, CancellationToken};
pub use chain::{BoxChain, Chain, ChainExt, ChainLink, FnChain, Topology, from_fn};
pub use config::{MetricKind, SplitterConfig, StreamerKind};
pub use document::{CONTENT, Document, QUESTION, SOURCE};
pub use error::{ChainError, chain_error};
pub use join::{Join, JoinFailure, join};
pub use logging::{LoggingChain, banner};
pub use map_each::{MapEach, map_each};
pub use qa::{
    AnswerWithSources, CombineDocuments, DEFAULT_SOURCES_PATTERN, MapAnswerWithSources,
    ModifyDocumentsContent, render,
};
pub use runner::ExecMode;
pub use seq::Seq;
pub use split::{
    CharCount, FixedWidthStreamer, LengthMetric, MaxLengthSplitter, MetricFn, Packed,
    SentenceStreamer, SplitDocuments, TextSplitter, TextStreamer, TokenEstimate, WordStreamer,
    metric_fn, pack,
};

// Gated re-exports
#[cfg(feature = "io-jsonl")]
pub use io::jsonl::{ReadDocumentsJsonl, WriteDocumentsJsonl, read_jsonl_vec, write_jsonl_vec};
