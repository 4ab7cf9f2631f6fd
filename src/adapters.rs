//! Adapters between single values and sequences.

use crate::chain::Chain;
use crate::error::ChainError;
use crate::seq::Seq;
use anyhow::Result;
use std::marker::PhantomData;

/// Turns a value into a one-element sequence.
pub struct WrapSingle<T>(PhantomData<fn(T)>);

impl<T> WrapSingle<T> {
    #[must_use]
    pub fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T> Default for WrapSingle<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Send + 'static> Chain<T, Seq<T>> for WrapSingle<T> {
    fn run(&self, input: T) -> Result<Seq<T>> {
        Ok(Seq::once(input))
    }
}

/// How many elements [`UnwrapSingle`] accepts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Cardinality {
    /// Zero elements fail with [`ChainError::EmptySequence`], a second element with
    /// [`ChainError::AmbiguousSequence`]. Nothing past the second element is pulled.
    #[default]
    ExactlyOne,
    /// Return the first element and leave the rest unconsumed. Zero elements still
    /// fail with [`ChainError::EmptySequence`].
    First,
}

/// Extracts the element of a singleton sequence.
pub struct UnwrapSingle<T> {
    cardinality: Cardinality,
    _t: PhantomData<fn() -> T>,
}

impl<T> UnwrapSingle<T> {
    /// Require exactly one element.
    #[must_use]
    pub fn new() -> Self {
        Self {
            cardinality: Cardinality::ExactlyOne,
            _t: PhantomData,
        }
    }

    /// Accept any non-empty sequence and take its first element.
    #[must_use]
    pub fn first() -> Self {
        Self {
            cardinality: Cardinality::First,
            _t: PhantomData,
        }
    }

    pub fn cardinality(&self) -> Cardinality {
        self.cardinality
    }
}

impl<T> Default for UnwrapSingle<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Chain<Seq<T>, T> for UnwrapSingle<T> {
    fn run(&self, mut input: Seq<T>) -> Result<T> {
        let first = input.next().ok_or(ChainError::EmptySequence)??;
        if self.cardinality == Cardinality::ExactlyOne && input.next().is_some() {
            return Err(ChainError::AmbiguousSequence.into());
        }
        Ok(first)
    }
}
