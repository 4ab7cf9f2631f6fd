//! Stand-in stages for exercising compositions.

use crate::chain::Chain;
use anyhow::{Result, anyhow};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

/// Identity stage that records every input it receives.
///
/// Clones share the same record, so a clone can be handed to a pipeline while the
/// original is kept for inspection.
///
/// # Example
///
/// ```
/// use ironchain::*;
/// use ironchain::testing::RecordingChain;
///
/// let rec = RecordingChain::new();
/// let pipeline = from_fn(|x: i32| Ok(x + 1)).then(rec.clone());
/// pipeline.run(1).unwrap();
/// assert_eq!(rec.calls(), vec![2]);
/// ```
pub struct RecordingChain<T> {
    calls: Arc<Mutex<Vec<T>>>,
}

impl<T> RecordingChain<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Number of recorded runs.
    pub fn call_count(&self) -> usize {
        self.calls.lock().map_or(0, |c| c.len())
    }
}

impl<T: Clone> RecordingChain<T> {
    /// The recorded inputs, in call order.
    pub fn calls(&self) -> Vec<T> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

impl<T> Clone for RecordingChain<T> {
    fn clone(&self) -> Self {
        Self {
            calls: Arc::clone(&self.calls),
        }
    }
}

impl<T> Default for RecordingChain<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + Send> Chain<T, T> for RecordingChain<T> {
    fn run(&self, input: T) -> Result<T> {
        self.calls
            .lock()
            .map_err(|_| anyhow!("recording lock poisoned"))?
            .push(input.clone());
        Ok(input)
    }
}

/// Stage that always fails with `message`.
#[derive(Clone, Debug)]
pub struct FailingChain {
    message: String,
}

impl FailingChain {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl<I, O> Chain<I, O> for FailingChain {
    fn run(&self, _input: I) -> Result<O> {
        Err(anyhow!("{}", self.message))
    }
}

/// Stage that sleeps for `delay` and then returns a fixed value.
///
/// Staggered delays make completion order differ from declared order, which is what
/// ordering tests for parallel joins need.
#[derive(Clone, Debug)]
pub struct DelayedChain<O> {
    delay: Duration,
    value: O,
}

impl<O> DelayedChain<O> {
    pub fn new(delay: Duration, value: O) -> Self {
        Self { delay, value }
    }

    pub fn millis(ms: u64, value: O) -> Self {
        Self::new(Duration::from_millis(ms), value)
    }
}

impl<I, O: Clone + Send + Sync> Chain<I, O> for DelayedChain<O> {
    fn run(&self, _input: I) -> Result<O> {
        thread::sleep(self.delay);
        Ok(self.value.clone())
    }
}
