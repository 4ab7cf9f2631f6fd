//! The [`Chain`] trait and sequential composition.
//!
//! A chain consumes one input value and produces one output value or fails.
//! Anything implementing the trait can be composed with [`ChainExt::then`]; the
//! composite only relies on `run`, never on the internals of its members.
//!
//! ```
//! use ironchain::*;
//!
//! # fn main() -> anyhow::Result<()> {
//! let shout = from_fn(|s: String| Ok(s.to_uppercase()));
//! let count = from_fn(|s: String| Ok(s.len()));
//! let pipeline = shout.then(count);
//! assert_eq!(pipeline.run("hello".to_string())?, 5);
//! # Ok(())
//! # }
//! ```

use anyhow::Result;
use std::marker::PhantomData;
use std::sync::Arc;

/// A typed stage of a pipeline.
///
/// Implementations must tolerate concurrent `run` calls when they are used inside a
/// parallel [`Join`](crate::Join) or [`MapEach`](crate::MapEach); the engine adds no
/// synchronization of its own.
pub trait Chain<I, O>: Send + Sync {
    /// Execute this stage.
    ///
    /// # Errors
    /// Whatever the stage fails with. Composites return member failures unchanged.
    fn run(&self, input: I) -> Result<O>;

    /// Structural shape of this stage. Plain stages are leaves.
    fn topology(&self) -> Topology {
        Topology::Leaf
    }
}

/// Shape of a (possibly composite) stage.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Topology {
    /// A stage that is not a composition.
    Leaf,
    /// `head` runs first, its output feeds `tail`.
    Link {
        head: Box<Topology>,
        tail: Box<Topology>,
    },
}

impl Topology {
    /// Whether this shape is a composition.
    #[must_use]
    pub fn is_link(&self) -> bool {
        matches!(self, Topology::Link { .. })
    }

    /// Number of leaf stages.
    #[must_use]
    pub fn leaf_count(&self) -> usize {
        match self {
            Topology::Leaf => 1,
            Topology::Link { head, tail } => head.leaf_count() + tail.leaf_count(),
        }
    }

    /// Nesting depth; a leaf has depth 0.
    #[must_use]
    pub fn depth(&self) -> usize {
        match self {
            Topology::Leaf => 0,
            Topology::Link { head, tail } => 1 + head.depth().max(tail.depth()),
        }
    }
}

/// Two stages run back to back: `tail.run(head.run(x)?)`.
///
/// Built with [`ChainExt::then`]. Owns both members.
pub struct ChainLink<A, B, M> {
    head: A,
    tail: B,
    _m: PhantomData<fn() -> M>,
}

impl<A, B, M> ChainLink<A, B, M> {
    pub(crate) fn new(head: A, tail: B) -> Self {
        Self {
            head,
            tail,
            _m: PhantomData,
        }
    }

    /// The input-side stage.
    pub fn head(&self) -> &A {
        &self.head
    }

    /// The output-side stage.
    pub fn tail(&self) -> &B {
        &self.tail
    }
}

impl<A, B, M> ChainLink<A, B, M> {
    /// True when the input side is not itself a composition, i.e. this link is the
    /// first one of the whole pipeline.
    pub fn is_head<I>(&self) -> bool
    where
        A: Chain<I, M>,
    {
        !self.head.topology().is_link()
    }

    /// True when the output side is not itself a composition, i.e. this link is the
    /// last one of the whole pipeline.
    pub fn is_tail<O>(&self) -> bool
    where
        B: Chain<M, O>,
    {
        !self.tail.topology().is_link()
    }
}

impl<I, M, O, A, B> Chain<I, O> for ChainLink<A, B, M>
where
    A: Chain<I, M>,
    B: Chain<M, O>,
{
    fn run(&self, input: I) -> Result<O> {
        let mid = self.head.run(input)?;
        tracing::trace!(
            from = std::any::type_name::<M>(),
            "chain link passed intermediate output"
        );
        self.tail.run(mid)
    }

    fn topology(&self) -> Topology {
        Topology::Link {
            head: Box::new(self.head.topology()),
            tail: Box::new(self.tail.topology()),
        }
    }
}

/// A closure used as a stage. See [`from_fn`].
pub struct FnChain<F, I, O> {
    f: F,
    _t: PhantomData<fn(I) -> O>,
}

/// Turn a closure into a stage.
pub fn from_fn<I, O, F>(f: F) -> FnChain<F, I, O>
where
    F: Fn(I) -> Result<O> + Send + Sync,
{
    FnChain { f, _t: PhantomData }
}

impl<I, O, F> Chain<I, O> for FnChain<F, I, O>
where
    F: Fn(I) -> Result<O> + Send + Sync,
{
    fn run(&self, input: I) -> Result<O> {
        (self.f)(input)
    }
}

/// Type-erased stage, handy for heterogeneous lists such as [`Join`](crate::Join).
pub type BoxChain<I, O> = Box<dyn Chain<I, O>>;

impl<I, O> Chain<I, O> for Box<dyn Chain<I, O>> {
    fn run(&self, input: I) -> Result<O> {
        (**self).run(input)
    }

    fn topology(&self) -> Topology {
        (**self).topology()
    }
}

impl<I, O, C: Chain<I, O> + ?Sized> Chain<I, O> for Arc<C> {
    fn run(&self, input: I) -> Result<O> {
        (**self).run(input)
    }

    fn topology(&self) -> Topology {
        (**self).topology()
    }
}

/// Combinators available on every stage.
pub trait ChainExt<I, O>: Chain<I, O> + Sized {
    /// Feed this stage's output into `next`.
    fn then<P, N>(self, next: N) -> ChainLink<Self, N, O>
    where
        N: Chain<O, P>,
    {
        ChainLink::new(self, next)
    }

    /// Log this stage's output under `label` and pass it on unchanged.
    fn inspect(self, label: impl Into<String>) -> ChainLink<Self, crate::LoggingChain<O>, O>
    where
        O: std::fmt::Debug + Send + 'static,
    {
        self.then(crate::LoggingChain::new(label))
    }

    /// Refuse to start once `token` is cancelled.
    fn with_cancellation(self, token: crate::CancellationToken) -> crate::Cancellable<Self> {
        crate::Cancellable::new(self, token)
    }

    /// Erase the concrete type.
    fn boxed(self) -> BoxChain<I, O>
    where
        Self: 'static,
    {
        Box::new(self)
    }
}

impl<I, O, C: Chain<I, O>> ChainExt<I, O> for C {}
