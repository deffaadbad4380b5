use std::{
    fmt,
    hash::{Hash, Hasher},
    iter,
};

use itertools::{EitherOrBoth, Itertools};
use thiserror::Error;

pub use self::sub_index_type::SubIndexType;

mod sub_index_type;

/// A path to a single position inside a math list.
///
/// The path is a linked list: each node names an atom at its level and, when
/// it descends further, the branch it takes and the index into that branch.
/// In `25^{2/4}` the `4` sits at `(1, superscript) -> (0, denominator) -> (0)`:
/// the `5`, its superscript, the fraction in there, its denominator, and the
/// first atom of that denominator.
///
/// The number of links in the chain is the index's level.
#[derive(Debug, Clone)]
pub struct Index {
    atom_index: usize,
    sub_index: Option<Box<Link>>,
}

/// The branch out of an atom. `ty` is never `SubIndexType::None`.
#[derive(Debug, Clone)]
struct Link {
    ty: SubIndexType,
    index: Index,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error(
        "invalid path at atom {atom_index}: sub-index type `{sub_index_type}` {}",
        presence(.has_sub_index)
    )]
    InvalidPath {
        atom_index: usize,
        sub_index_type: SubIndexType,
        has_sub_index: bool,
    },
}

fn presence(has_sub_index: &bool) -> &'static str {
    if *has_sub_index {
        "cannot carry a sub-index"
    } else {
        "requires a sub-index"
    }
}

impl Index {
    /// An index with no sub-index, pointing at the whole atom.
    pub fn level0(atom_index: usize) -> Self {
        Self {
            atom_index,
            sub_index: None,
        }
    }

    /// Creates an index descending into `sub_index` through the given branch.
    ///
    /// The sub-index must be present exactly when `sub_index_type` is not
    /// `SubIndexType::None`.
    pub fn with_sub_index(
        atom_index: usize,
        sub_index: Option<Index>,
        sub_index_type: SubIndexType,
    ) -> Result<Self, Error> {
        match (sub_index, sub_index_type) {
            (None, SubIndexType::None) => Ok(Self::level0(atom_index)),
            (Some(index), ty) if !ty.is_none() => Ok(Self::link(atom_index, ty, index)),
            (sub_index, sub_index_type) => {
                let has_sub_index = sub_index.is_some();
                log::debug!(
                    "rejecting path at atom {atom_index}: type {sub_index_type}, sub-index present: {has_sub_index}"
                );
                Err(Error::InvalidPath {
                    atom_index,
                    sub_index_type,
                    has_sub_index,
                })
            }
        }
    }

    fn link(atom_index: usize, ty: SubIndexType, index: Index) -> Self {
        debug_assert!(!ty.is_none());
        Self {
            atom_index,
            sub_index: Some(Box::new(Link { ty, index })),
        }
    }

    pub fn atom_index(&self) -> usize {
        self.atom_index
    }

    /// The branch this node takes, `SubIndexType::None` at the end of the chain.
    pub fn sub_index_type(&self) -> SubIndexType {
        self.sub_index
            .as_ref()
            .map_or(SubIndexType::None, |link| link.ty)
    }

    pub fn sub_index(&self) -> Option<&Index> {
        self.sub_index.as_ref().map(|link| &link.index)
    }

    /// Walks the chain from this node down to the innermost one.
    pub fn nodes(&self) -> impl Iterator<Item = &Index> {
        iter::successors(Some(self), |index| index.sub_index())
    }

    pub fn level(&self) -> usize {
        self.nodes().count() - 1
    }

    fn innermost(&self) -> &Index {
        let mut index = self;
        while let Some(sub_index) = index.sub_index() {
            index = sub_index;
        }
        index
    }

    /// The atom index of the innermost node.
    pub fn final_index(&self) -> usize {
        self.innermost().atom_index
    }

    /// Returns the next index. There is no upper bound at this layer.
    ///
    /// # Panics
    ///
    /// Panics if the innermost atom index is `usize::MAX`.
    pub fn next(&self) -> Self {
        match &self.sub_index {
            None => Self::level0(
                self.atom_index
                    .checked_add(1)
                    .expect("atom index overflow"),
            ),
            Some(link) => Self::link(self.atom_index, link.ty, link.index.next()),
        }
    }

    /// Returns the previous index, or `None` if the innermost atom index is 0.
    pub fn previous(&self) -> Option<Self> {
        match &self.sub_index {
            None => self.atom_index.checked_sub(1).map(Self::level0),
            Some(link) => Some(Self::link(
                self.atom_index,
                link.ty,
                link.index.previous()?,
            )),
        }
    }

    /// Whether the innermost node points at the start of its line. Every
    /// nested sub-list (a superscript, a numerator, ...) is a line of its own.
    pub fn is_at_beginning_of_line(&self) -> bool {
        self.final_index() == 0
    }

    pub fn final_sub_index_type(&self) -> SubIndexType {
        self.innermost().sub_index_type()
    }

    /// Whether any node of the chain has the given type. The innermost node
    /// always has type `SubIndexType::None`.
    pub fn has_sub_index_of_type(&self, sub_index_type: SubIndexType) -> bool {
        self.nodes()
            .any(|index| index.sub_index_type() == sub_index_type)
    }

    /// Attaches `sub_index` at the end of the chain, one level deeper.
    pub fn level_up(
        &self,
        sub_index: Option<Index>,
        sub_index_type: SubIndexType,
    ) -> Result<Self, Error> {
        match &self.sub_index {
            None => Self::with_sub_index(self.atom_index, sub_index, sub_index_type),
            Some(link) => Ok(Self::link(
                self.atom_index,
                link.ty,
                link.index.level_up(sub_index, sub_index_type)?,
            )),
        }
    }

    /// Drops the last node of the chain. Returns `None` at level 0.
    pub fn level_down(&self) -> Option<Self> {
        let link = self.sub_index.as_ref()?;
        Some(match link.index.level_down() {
            Some(index) => Self::link(self.atom_index, link.ty, index),
            None => Self::level0(self.atom_index),
        })
    }

    /// Whether both chains agree on every node except the final atom index,
    /// i.e. they point into the same line.
    pub fn is_at_same_level_with(&self, other: &Index) -> bool {
        self.nodes()
            .zip_longest(other.nodes())
            .all(|pair| match pair {
                EitherOrBoth::Both(a, b) => {
                    a.sub_index_type() == b.sub_index_type()
                        && (a.sub_index.is_none() || a.atom_index == b.atom_index)
                }
                EitherOrBoth::Left(_) | EitherOrBoth::Right(_) => false,
            })
    }

    fn key(&self) -> (usize, SubIndexType) {
        (self.atom_index, self.sub_index_type())
    }
}

impl PartialEq for Index {
    fn eq(&self, other: &Self) -> bool {
        self.nodes().map(Index::key).eq(other.nodes().map(Index::key))
    }
}

impl Eq for Index {}

impl Hash for Index {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for key in self.nodes().map(Index::key) {
            key.hash(state);
        }
    }
}

impl fmt::Display for Index {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.sub_index {
            None => write!(f, "[{}]", self.atom_index),
            Some(link) => write!(f, "[{}, {}:{}]", self.atom_index, link.ty, link.index),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::hash_map::DefaultHasher;

    use super::*;

    fn hash_of(index: &Index) -> u64 {
        let mut hasher = DefaultHasher::new();
        index.hash(&mut hasher);
        hasher.finish()
    }

    /// The `4` in `25^{2/4}`.
    fn four_in_exponent() -> Index {
        let denominator = Index::with_sub_index(
            0,
            Some(Index::level0(0)),
            SubIndexType::Denominator,
        )
        .unwrap();
        Index::with_sub_index(1, Some(denominator), SubIndexType::Superscript).unwrap()
    }

    #[test]
    fn test_level0() {
        let index = Index::level0(7);
        assert_eq!(index.atom_index(), 7);
        assert_eq!(index.sub_index_type(), SubIndexType::None);
        assert_eq!(index.sub_index(), None);
        assert_eq!(index.level(), 0);
        assert_eq!(index.level_down(), None);
    }

    #[test]
    fn test_with_sub_index_mismatch() {
        assert_eq!(
            Index::with_sub_index(3, None, SubIndexType::Numerator),
            Err(Error::InvalidPath {
                atom_index: 3,
                sub_index_type: SubIndexType::Numerator,
                has_sub_index: false,
            }),
        );
        assert_eq!(
            Index::with_sub_index(3, Some(Index::level0(0)), SubIndexType::None),
            Err(Error::InvalidPath {
                atom_index: 3,
                sub_index_type: SubIndexType::None,
                has_sub_index: true,
            }),
        );
        assert_eq!(
            Index::with_sub_index(3, None, SubIndexType::None),
            Ok(Index::level0(3)),
        );
    }

    #[test]
    fn test_error_message() {
        let err = Index::with_sub_index(2, None, SubIndexType::Radicand).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid path at atom 2: sub-index type `radicand` requires a sub-index",
        );
    }

    #[test]
    fn test_chain_queries() {
        let index = four_in_exponent();
        assert_eq!(index.level(), 2);
        assert_eq!(index.atom_index(), 1);
        assert_eq!(index.sub_index_type(), SubIndexType::Superscript);
        assert_eq!(index.final_index(), 0);
        assert_eq!(index.final_sub_index_type(), SubIndexType::None);
        assert!(index.is_at_beginning_of_line());
        assert!(index.has_sub_index_of_type(SubIndexType::Superscript));
        assert!(index.has_sub_index_of_type(SubIndexType::Denominator));
        assert!(!index.has_sub_index_of_type(SubIndexType::Numerator));
        assert!(!index.has_sub_index_of_type(SubIndexType::Subscript));
    }

    #[test]
    fn test_next_previous() {
        let index = four_in_exponent();
        let next = index.next();
        assert_eq!(next.to_string(), "[1, superscript:[0, denominator:[1]]]");
        assert_eq!(next.atom_index(), 1);
        assert!(!next.is_at_beginning_of_line());
        assert_eq!(next.previous(), Some(index.clone()));
        assert_eq!(index.previous(), None);

        assert_eq!(Index::level0(0).previous(), None);
        assert_eq!(Index::level0(4).previous(), Some(Index::level0(3)));
    }

    #[test]
    #[should_panic(expected = "atom index overflow")]
    fn test_next_at_end_of_usize() {
        let index =
            Index::with_sub_index(1, Some(Index::level0(usize::MAX)), SubIndexType::Nucleus)
                .unwrap();
        index.next();
    }

    #[test]
    fn test_level_up_down() {
        let index = Index::level0(2);
        let up = index
            .level_up(Some(Index::level0(1)), SubIndexType::Subscript)
            .unwrap();
        assert_eq!(up.to_string(), "[2, subscript:[1]]");

        let upper = up
            .level_up(Some(Index::level0(0)), SubIndexType::Nucleus)
            .unwrap();
        assert_eq!(upper.to_string(), "[2, subscript:[1, nucleus:[0]]]");
        assert_eq!(upper.level_down(), Some(up.clone()));
        assert_eq!(up.level_down(), Some(index.clone()));

        assert_eq!(index.level_up(None, SubIndexType::None), Ok(index.clone()));
        assert!(up.level_up(None, SubIndexType::Degree).is_err());
        assert!(up
            .level_up(Some(Index::level0(0)), SubIndexType::None)
            .is_err());
    }

    #[test]
    fn test_equality_and_hash() {
        let a = four_in_exponent();
        let b = four_in_exponent();
        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));

        let c = Index::with_sub_index(1, Some(Index::level0(0)), SubIndexType::Superscript)
            .unwrap();
        assert_ne!(a, c);
        assert_ne!(c, Index::level0(1));
        assert_ne!(
            c,
            Index::with_sub_index(1, Some(Index::level0(0)), SubIndexType::Subscript).unwrap(),
        );
    }

    #[test]
    fn test_same_level() {
        let sup = |i| {
            Index::with_sub_index(5, Some(Index::level0(i)), SubIndexType::Superscript).unwrap()
        };
        assert!(Index::level0(0).is_at_same_level_with(&Index::level0(9)));
        assert!(sup(0).is_at_same_level_with(&sup(3)));
        assert!(!sup(0).is_at_same_level_with(&Index::level0(5)));
        assert!(!sup(0).is_at_same_level_with(
            &Index::with_sub_index(4, Some(Index::level0(0)), SubIndexType::Superscript).unwrap()
        ));
    }

    #[test]
    fn test_display() {
        assert_eq!(Index::level0(3).to_string(), "[3]");
        assert_eq!(four_in_exponent().to_string(), "[1, superscript:[0, denominator:[0]]]");
    }
}
