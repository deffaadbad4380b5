//! Paths into a math list.
//!
//! A math list is a list of atoms, some of which own further lists: a
//! fraction has a numerator and a denominator, a radical has a radicand and a
//! degree, and any atom may carry a superscript and a subscript. An [`Index`]
//! names one position anywhere in that tree and a [`Range`] names a run of
//! neighbouring atoms on one line. Neither type knows about the tree itself;
//! callers check them against their own lists.

pub use crate::{
    index::{Index, SubIndexType},
    range::Range,
};

pub mod index;
pub mod range;
