//! Fan-out/join: run several stages against one input.
//!
//! The output sequence always lists results in the declared order of the stages,
//! whatever order they finished in.
//!
//! ```
//! use ironchain::*;
//!
//! # fn main() -> anyhow::Result<()> {
//! let fan = Join::new(vec![
//!     from_fn(|x: u32| Ok(x + 1)).boxed(),
//!     from_fn(|x: u32| Ok(x * 10)).boxed(),
//! ])
//! .parallel(true);
//!
//! let out = fan.run(4)?.try_collect()?;
//! assert_eq!(out, vec![5, 40]);
//! # Ok(())
//! # }
//! ```

use crate::chain::{BoxChain, Chain};
use crate::runner::{ExecMode, par_map_ordered};
use crate::seq::Seq;
use anyhow::Result;
use std::sync::Arc;

/// What a join does when a member fails.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum JoinFailure {
    /// The first failure, in declared order, fails the join.
    #[default]
    Abort,
    /// Every member's result becomes an item; failures are `Err` items in place.
    Collect,
}

/// Runs all member stages on the same input and gathers their outputs in order.
pub struct Join<I, O> {
    stages: Arc<Vec<BoxChain<I, O>>>,
    mode: ExecMode,
    on_failure: JoinFailure,
}

/// Sequential join over `stages`.
pub fn join<I, O>(stages: Vec<BoxChain<I, O>>) -> Join<I, O> {
    Join::new(stages)
}

impl<I, O> Join<I, O> {
    /// Join `stages` in declared order. Starts sequential with [`JoinFailure::Abort`].
    pub fn new(stages: Vec<BoxChain<I, O>>) -> Self {
        Self {
            stages: Arc::new(stages),
            mode: ExecMode::Sequential,
            on_failure: JoinFailure::Abort,
        }
    }

    /// Switch between sequential and parallel (global pool) execution.
    #[must_use]
    pub fn parallel(self, parallel: bool) -> Self {
        self.mode(ExecMode::from(parallel))
    }

    /// Pick the execution mode, including a dedicated pool size for parallel runs.
    #[must_use]
    pub fn mode(mut self, mode: ExecMode) -> Self {
        self.mode = mode;
        self
    }

    /// What a failing member does to the join.
    #[must_use]
    pub fn on_failure(mut self, policy: JoinFailure) -> Self {
        self.on_failure = policy;
        self
    }

    /// Number of member stages.
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// `true` when the join has no members; running it yields an empty sequence.
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }
}

impl<I, O> Chain<I, Seq<O>> for Join<I, O>
where
    I: Clone + Send + Sync + 'static,
    O: Send + 'static,
{
    fn run(&self, input: I) -> Result<Seq<O>> {
        match self.mode {
            ExecMode::Sequential => {
                let stages = Arc::clone(&self.stages);
                let results = (0..stages.len()).map(move |i| stages[i].run(input.clone()));
                Ok(match self.on_failure {
                    JoinFailure::Collect => Seq::new(results),
                    // Stop pulling members once one has failed.
                    JoinFailure::Abort => Seq::new(results.scan(false, |failed, r| {
                        if *failed {
                            return None;
                        }
                        *failed = r.is_err();
                        Some(r)
                    })),
                })
            }
            ExecMode::Parallel { threads } => {
                tracing::debug!(stages = self.stages.len(), ?threads, "fan-out dispatch");
                let stages = &self.stages;
                let input = &input;
                let results = par_map_ordered(threads, (0..stages.len()).collect(), |i| {
                    stages[i].run(input.clone())
                })?;
                match self.on_failure {
                    JoinFailure::Collect => Ok(Seq::new(results.into_iter())),
                    JoinFailure::Abort => {
                        let values = results.into_iter().collect::<Result<Vec<O>>>()?;
                        Ok(Seq::from_vec(values))
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::{ChainExt, from_fn};
    use anyhow::anyhow;

    #[test]
    fn abort_stops_sequential_pulls_after_failure() {
        let j = join(vec![
            from_fn(|_: ()| Ok(1)).boxed(),
            from_fn(|_: ()| Err(anyhow!("second"))).boxed(),
            from_fn(|_: ()| Ok(3)).boxed(),
        ]);
        let items: Vec<_> = j.run(()).unwrap().collect();
        assert_eq!(items.len(), 2);
        assert!(items[1].is_err());
    }

    #[test]
    fn empty_join_yields_nothing() {
        let j: Join<(), i32> = join(vec![]).parallel(true);
        assert!(j.is_empty());
        assert_eq!(j.run(()).unwrap().count(), 0);
    }
}
