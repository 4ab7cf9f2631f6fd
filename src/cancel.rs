//! Cooperative cancellation for stages.
//!
//! The engine itself has no timeouts. A [`CancellationToken`] lets a caller stop
//! stages that have not started yet; stages already running finish normally.

use crate::chain::{Chain, Topology};
use crate::error::ChainError;
use anyhow::Result;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Shared flag; clones observe the same state.
#[derive(Clone, Debug, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// Wraps a stage so it fails with [`ChainError::Cancelled`] once its token is set.
pub struct Cancellable<C> {
    inner: C,
    token: CancellationToken,
}

impl<C> Cancellable<C> {
    pub fn new(inner: C, token: CancellationToken) -> Self {
        Self { inner, token }
    }
}

impl<I, O, C: Chain<I, O>> Chain<I, O> for Cancellable<C> {
    fn run(&self, input: I) -> Result<O> {
        if self.token.is_cancelled() {
            return Err(ChainError::Cancelled.into());
        }
        self.inner.run(input)
    }

    fn topology(&self) -> Topology {
        self.inner.topology()
    }
}
