use std::ops::{BitAnd, BitOr, BitOrAssign};

use smallvec::SmallVec;

use crate::GoTermId;

/// A set of [`GoTermId`]s, e.g. the parents or the ancestors of a term
///
/// The ids are kept sorted and deduplicated, so intersections and unions
/// run as linear merges and iteration yields ids in ascending order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TermGroup {
    ids: SmallVec<[GoTermId; 8]>,
}

impl TermGroup {
    /// Constructs a new, empty [`TermGroup`]
    pub fn new() -> Self {
        Self::default()
    }

    /// Constructs a new, empty [`TermGroup`] with the given capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            ids: SmallVec::with_capacity(capacity),
        }
    }

    /// Returns `true` if the group contains no [`GoTermId`]s
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Returns the number of [`GoTermId`]s in the group
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Adds a new [`GoTermId`] to the group
    ///
    /// Returns whether the id was newly inserted:
    ///
    /// - `true` if the group did not previously contain the id
    /// - `false` if the id was already present
    pub fn insert(&mut self, id: GoTermId) -> bool {
        match self.ids.binary_search(&id) {
            Ok(_) => false,
            Err(idx) => {
                self.ids.insert(idx, id);
                true
            }
        }
    }

    /// Returns `true` if the group contains the given [`GoTermId`]
    pub fn contains(&self, id: GoTermId) -> bool {
        self.ids.binary_search(&id).is_ok()
    }

    /// Returns the smallest [`GoTermId`] in the group, if any
    pub fn first(&self) -> Option<GoTermId> {
        self.ids.first().copied()
    }

    /// Iterates the [`GoTermId`]s in ascending order
    pub fn iter(&self) -> std::iter::Copied<std::slice::Iter<'_, GoTermId>> {
        self.ids.iter().copied()
    }
}

impl FromIterator<GoTermId> for TermGroup {
    fn from_iter<T: IntoIterator<Item = GoTermId>>(iter: T) -> Self {
        let mut group = TermGroup::new();
        for id in iter {
            group.insert(id);
        }
        group
    }
}

impl<'a> IntoIterator for &'a TermGroup {
    type Item = GoTermId;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, GoTermId>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl BitAnd for &TermGroup {
    type Output = TermGroup;

    /// Intersection of both groups as a linear merge of the sorted id lists
    fn bitand(self, other: &TermGroup) -> TermGroup {
        let mut result = TermGroup::with_capacity(self.len().min(other.len()));
        let mut lhs = self.ids.iter().peekable();
        let mut rhs = other.ids.iter().peekable();
        while let (Some(&&a), Some(&&b)) = (lhs.peek(), rhs.peek()) {
            match a.cmp(&b) {
                std::cmp::Ordering::Less => {
                    lhs.next();
                }
                std::cmp::Ordering::Greater => {
                    rhs.next();
                }
                std::cmp::Ordering::Equal => {
                    result.ids.push(a);
                    lhs.next();
                    rhs.next();
                }
            }
        }
        result
    }
}

impl BitOr for &TermGroup {
    type Output = TermGroup;

    /// Union of both groups as a linear merge of the sorted id lists
    fn bitor(self, other: &TermGroup) -> TermGroup {
        let mut result = TermGroup::with_capacity(self.len() + other.len());
        let mut lhs = self.ids.iter().peekable();
        let mut rhs = other.ids.iter().peekable();
        loop {
            match (lhs.peek(), rhs.peek()) {
                (Some(&&a), Some(&&b)) => match a.cmp(&b) {
                    std::cmp::Ordering::Less => {
                        result.ids.push(a);
                        lhs.next();
                    }
                    std::cmp::Ordering::Greater => {
                        result.ids.push(b);
                        rhs.next();
                    }
                    std::cmp::Ordering::Equal => {
                        result.ids.push(a);
                        lhs.next();
                        rhs.next();
                    }
                },
                (Some(&&a), None) => {
                    result.ids.push(a);
                    lhs.next();
                }
                (None, Some(&&b)) => {
                    result.ids.push(b);
                    rhs.next();
                }
                (None, None) => break,
            }
        }
        result
    }
}

impl BitOrAssign<&TermGroup> for TermGroup {
    fn bitor_assign(&mut self, other: &TermGroup) {
        if self.is_empty() {
            self.ids = other.ids.clone();
            return;
        }
        for id in other {
            self.insert(id);
        }
    }
}
