//! Execution modes for the combinators that can fan work out.
//!
//! Parallel execution is a bounded fork/join on rayon: all work is joined before the
//! call returns, even when a task fails, and results come back in input order.

use anyhow::{Context, Result};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// How a combinator executes its members.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "mode")]
pub enum ExecMode {
    /// One member at a time on the calling thread, lazily where the combinator allows.
    #[default]
    Sequential,
    /// All members at once. `threads: None` uses rayon's global pool; `Some(n)` runs
    /// on a dedicated pool of `n` workers that lives for the duration of the call.
    Parallel { threads: Option<usize> },
}

impl ExecMode {
    /// Parallel on the global pool.
    #[must_use]
    pub fn parallel() -> Self {
        ExecMode::Parallel { threads: None }
    }

    #[must_use]
    pub fn is_parallel(&self) -> bool {
        matches!(self, ExecMode::Parallel { .. })
    }
}

impl From<bool> for ExecMode {
    fn from(parallel: bool) -> Self {
        if parallel {
            ExecMode::parallel()
        } else {
            ExecMode::Sequential
        }
    }
}

/// Apply `f` to every item in parallel, keeping input order in the output.
///
/// `f` returns a per-item result; they are all collected, none is dropped.
pub(crate) fn par_map_ordered<T, R, F>(
    threads: Option<usize>,
    items: Vec<T>,
    f: F,
) -> Result<Vec<R>>
where
    T: Send,
    R: Send,
    F: Fn(T) -> R + Send + Sync,
{
    let work = move || items.into_par_iter().map(f).collect::<Vec<R>>();
    match threads {
        None => Ok(work()),
        Some(n) => {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(n.max(1))
                .build()
                .with_context(|| format!("build thread pool with {n} workers"))?;
            Ok(pool.install(work))
        }
    }
}
