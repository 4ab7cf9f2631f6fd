//! Apply a stage to every element of a sequence.

use crate::chain::{Chain, Topology};
use crate::runner::{ExecMode, par_map_ordered};
use crate::seq::Seq;
use anyhow::Result;
use std::marker::PhantomData;
use std::sync::Arc;

/// Lifts a `Chain<I, O>` to a `Chain<Seq<I>, Seq<O>>`.
///
/// In sequential mode nothing runs until the output is consumed, one element per pull.
/// In parallel mode the input is drained and mapped on rayon before `run` returns; the
/// output keeps input order and the first failing element (in input order) fails `run`.
/// Failed input items pass through unchanged in sequential mode.
pub struct MapEach<C, I, O> {
    inner: Arc<C>,
    mode: ExecMode,
    _t: PhantomData<fn(I) -> O>,
}

/// Map `inner` over a sequence, lazily and in order.
pub fn map_each<C, I, O>(inner: C) -> MapEach<C, I, O>
where
    C: Chain<I, O>,
{
    MapEach {
        inner: Arc::new(inner),
        mode: ExecMode::Sequential,
        _t: PhantomData,
    }
}

impl<C, I, O> MapEach<C, I, O> {
    #[must_use]
    pub fn parallel(self, parallel: bool) -> Self {
        self.mode(ExecMode::from(parallel))
    }

    #[must_use]
    pub fn mode(mut self, mode: ExecMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn inner(&self) -> &C {
        &self.inner
    }
}

impl<C, I, O> Chain<Seq<I>, Seq<O>> for MapEach<C, I, O>
where
    C: Chain<I, O> + 'static,
    I: Send + 'static,
    O: Send + 'static,
{
    fn run(&self, input: Seq<I>) -> Result<Seq<O>> {
        match self.mode {
            ExecMode::Sequential => {
                let inner = Arc::clone(&self.inner);
                Ok(input.map_ok(move |item| inner.run(item)))
            }
            ExecMode::Parallel { threads } => {
                let items = input.try_collect()?;
                tracing::trace!(items = items.len(), "map each in parallel");
                let inner = &self.inner;
                let results = par_map_ordered(threads, items, |item| inner.run(item))?;
                let values = results.into_iter().collect::<Result<Vec<O>>>()?;
                Ok(Seq::from_vec(values))
            }
        }
    }

    fn topology(&self) -> Topology {
        self.inner.topology()
    }
}
