use std::{fmt, ops};

use thiserror::Error;

use crate::index::Index;

/// A run of `length` consecutive atoms, starting at the atom `start` points to.
///
/// Only the innermost atom of `start` is stretched: the range covers
/// `start.final_index()..start.final_index() + length` within the line
/// `start` points into. A length of 0 is an insertion point.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Range {
    start: Index,
    length: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("cannot union ranges on different lines: {first} and {second}")]
    IncompatibleRange { first: Index, second: Index },
    #[error("cannot union an empty list of ranges")]
    EmptyInput,
    #[error("range at {start} of length {length} runs past the last addressable atom")]
    Overflow { start: Index, length: usize },
}

impl Range {
    pub fn new(start: Index, length: usize) -> Self {
        Self { start, length }
    }

    /// A range covering the single atom at `start`.
    pub fn single(start: Index) -> Self {
        Self::new(start, 1)
    }

    /// A range covering the single top-level atom at `location`.
    pub fn for_index(location: usize) -> Self {
        Self::single(Index::level0(location))
    }

    pub fn start(&self) -> &Index {
        &self.start
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// The atom indices covered within the line `start` points into, or `None`
    /// if the end does not fit in a `usize`.
    pub fn final_range(&self) -> Option<ops::Range<usize>> {
        let location = self.start.final_index();
        let end = location.checked_add(self.length)?;
        Some(location..end)
    }

    fn checked_final_range(&self) -> Result<ops::Range<usize>, Error> {
        self.final_range().ok_or_else(|| {
            log::debug!("range {} runs past the last addressable atom", self);
            Error::Overflow {
                start: self.start.clone(),
                length: self.length,
            }
        })
    }

    /// Projects the range one level down into the content `start` points into.
    /// Returns `None` if `start` has no sub-index.
    pub fn sub_index_range(&self) -> Option<Self> {
        let start = self.start.sub_index()?;
        Some(Self::new(start.clone(), self.length))
    }

    /// The smallest range covering both ranges, including any atoms between
    /// them. Both ranges must start on the same line.
    pub fn union(&self, other: &Range) -> Result<Self, Error> {
        if !self.start.is_at_same_level_with(&other.start) {
            log::debug!("refusing to union ranges on different lines: {} and {}", self, other);
            return Err(Error::IncompatibleRange {
                first: self.start.clone(),
                second: other.start.clone(),
            });
        }

        let r1 = self.checked_final_range()?;
        let r2 = other.checked_final_range()?;
        let start = if r1.start <= r2.start {
            &self.start
        } else {
            &other.start
        };
        let length = r1.end.max(r2.end) - r1.start.min(r2.start);

        Ok(Self::new(start.clone(), length))
    }

    /// Unions all of the given ranges, left to right.
    pub fn union_all<'a, I>(ranges: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = &'a Range>,
    {
        let mut ranges = ranges.into_iter();
        let first = ranges.next().ok_or(Error::EmptyInput)?.clone();

        ranges.try_fold(first, |acc, range| {
            log::trace!("union of {acc} with {range}");
            acc.union(range)
        })
    }
}

/// A range over top-level atoms.
impl From<ops::Range<usize>> for Range {
    fn from(range: ops::Range<usize>) -> Self {
        Self::new(Index::level0(range.start), range.len())
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.start, self.length)
    }
}
