//! Testing utilities for ironchain pipelines.
//!
//! This module provides a testing facility for end-users to write idiomatic Rust
//! tests for their stages and chunkers. It includes:
//!
//! - **Assertions**: compare sequence outputs, check chunk bounds and losslessness,
//!   match crate errors
//! - **Fixtures**: small documents and texts for common scenarios
//! - **Mock stages**: recording, failing and delayed stages for composition tests
//!
//! # Quick Start
//!
//! ```no_run
//! use ironchain::*;
//! use ironchain::testing::*;
//!
//! #[test]
//! fn split_keeps_sources() -> anyhow::Result<()> {
//!     let split = SplitDocuments::new(MaxLengthSplitter::new(10, TokenEstimate::new())?);
//!     let out = split.run(Seq::from_vec(sample_documents()))?.try_collect()?;
//!     assert_collection_size(&out, 3);
//!     Ok(())
//! }
//! ```

pub mod assertions;
pub mod fixtures;
pub mod mock;

pub use assertions::*;
pub use fixtures::*;
pub use mock::*;
