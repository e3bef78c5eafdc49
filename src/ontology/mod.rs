//! The DAG of all GO terms

use core::fmt::Debug;
use std::collections::VecDeque;

use tracing::debug;

use crate::term::internal::GoTermInternal;
use crate::term::{GoTerm, Namespace, TermGroup};
use crate::GoResult;
use crate::{GoError, GoTermId};

mod termarena;
use termarena::Arena;

#[cfg_attr(doc, aquamarine::aquamarine)]
/// `Ontology` holds all [`GoTerm`]s and their `is_a` relations
///
/// The ontology is built once by the caller from already-parsed data and is
/// read-only afterwards. The expected build sequence is:
///
/// 1. construct an empty ontology with [`Ontology::default`]
/// 2. add all terms with [`Ontology::insert_term`]
/// 3. connect terms to their parents with [`Ontology::add_parent`]
/// 4. freeze the ontology with [`Ontology::create_cache`], which computes
///    every term's ancestor closure and depth
///
/// After step 4 the ontology must not be modified; shared references to it
/// can then be handed to any number of concurrent readers.
///
/// The parent relation must be acyclic. This is an invariant of the data
/// source (GO itself is a DAG) and is not re-validated here; a cyclic input
/// would make [`Ontology::create_cache`] loop forever.
///
/// # Layout
///
/// ```mermaid
/// erDiagram
///     ONTOLOGY ||--|{ GOTERM : contains
///     GOTERM ||--o{ GOTERM : is_a
///     GOTERM {
///         str name
///         GoTermId id
///         Namespace namespace
///         TermGroup parents
///         TermGroup children
///     }
/// ```
///
/// # Examples
///
/// ```
/// use gosim::{Namespace, Ontology};
///
/// let mut ontology = Ontology::default();
/// ontology.insert_term("biological_process", 8150u32, Namespace::BiologicalProcess);
/// ontology.insert_term("metabolic process", 8152u32, Namespace::BiologicalProcess);
/// ontology.add_parent(8150u32, 8152u32).unwrap();
/// ontology.create_cache();
///
/// let term = ontology.term(8152u32.into()).unwrap();
/// assert_eq!(term.name(), "metabolic process");
/// assert_eq!(term.depth(), 1);
/// assert!(term.ancestor_ids().contains(8150u32.into()));
/// ```
#[derive(Default)]
pub struct Ontology {
    terms: Arena,
    roots: TermGroup,
}

impl Debug for Ontology {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Ontology with {} terms", self.terms.len())
    }
}

impl Ontology {
    /// Returns the number of terms in the ontology
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Returns `true` if the ontology does not contain any terms
    pub fn is_empty(&self) -> bool {
        self.terms.len() == 0
    }

    /// Returns the [`GoTerm`] with the given id, if present
    pub fn term(&self, term_id: GoTermId) -> Option<GoTerm<'_>> {
        self.terms.get(term_id).map(|term| GoTerm::new(self, term))
    }

    /// Returns `true` if a term with the given id is part of the ontology
    pub fn contains(&self, term_id: GoTermId) -> bool {
        self.terms.get(term_id).is_some()
    }

    /// Returns an iterator over all terms of the ontology
    pub fn terms(&self) -> Iter<'_> {
        Iter {
            inner: self.terms.values(),
            ontology: self,
        }
    }

    /// Returns an iterator over the namespace roots
    ///
    /// Roots are the terms without parents; they are recorded during
    /// [`Ontology::create_cache`].
    pub fn roots(&self) -> crate::term::GoTerms<'_> {
        crate::term::GoTerms::new(&self.roots, self)
    }

    /// Returns the root term of the given namespace
    ///
    /// Returns `None` before [`Ontology::create_cache`] has run or if no
    /// term of the namespace was inserted.
    pub fn root(&self, namespace: Namespace) -> Option<GoTerm<'_>> {
        self.roots
            .iter()
            .map(|id| {
                self.term(id)
                    .expect("all ids in a TermGroup belong to the ontology")
            })
            .find(|term| term.namespace() == namespace)
    }

    /// Adds a term to the ontology
    ///
    /// This method does not connect the term to any parents,
    /// use [`Ontology::add_parent`] for that.
    ///
    /// # Examples
    ///
    /// ```
    /// use gosim::{Namespace, Ontology};
    ///
    /// let mut ontology = Ontology::default();
    /// ontology.insert_term("metabolic process", 8152u32, Namespace::BiologicalProcess);
    /// assert_eq!(ontology.len(), 1);
    /// ```
    pub fn insert_term<I: Into<GoTermId>>(&mut self, name: &str, id: I, namespace: Namespace) {
        self.terms
            .insert(GoTermInternal::new(name.to_string(), id.into(), namespace));
    }

    /// Connects a child term to one of its parents
    ///
    /// Both the parent and the child record the connection, so the graph
    /// can be traversed in both directions.
    ///
    /// # Errors
    ///
    /// [`GoError::UnknownTerm`] if either id was not inserted before. The
    /// ontology is unchanged in that case.
    pub fn add_parent<I: Into<GoTermId> + Copy, J: Into<GoTermId> + Copy>(
        &mut self,
        parent_id: I,
        child_id: J,
    ) -> GoResult<()> {
        let parent_id = parent_id.into();
        let child_id = child_id.into();
        if self.terms.get(parent_id).is_none() {
            return Err(GoError::UnknownTerm(parent_id));
        }
        let child = self
            .terms
            .get_mut(child_id)
            .ok_or(GoError::UnknownTerm(child_id))?;
        child.add_parent(parent_id);
        self.terms.get_unchecked_mut(parent_id).add_child(child_id);
        Ok(())
    }

    /// Freezes the ontology for querying
    ///
    /// Computes the reflexive ancestor closure of every term, the depth
    /// (longest path from a namespace root) of every term and records the
    /// namespace roots. Must be called once after all terms and parent
    /// connections have been added and before similarity queries run.
    pub fn create_cache(&mut self) {
        let term_ids = self.terms.keys();

        for id in &term_ids {
            self.cache_ancestors(*id);
        }
        for id in &term_ids {
            self.cache_depth(*id);
        }

        let mut roots = TermGroup::new();
        for term in self.terms.values() {
            if term.parents().is_empty() {
                roots.insert(term.id());
            }
        }
        self.roots = roots;

        debug!(
            "cached ancestors and depths for {} terms, {} roots",
            term_ids.len(),
            self.roots.len()
        );
    }

    /// Returns the term itself and every term reachable by following
    /// parent edges, as required for count aggregation
    ///
    /// The traversal is an iterative upward walk with a visited set, so
    /// shared ancestors are collected exactly once and terms reachable
    /// through multiple paths do not cause redundant work. After
    /// [`Ontology::create_cache`] the closure is served from the cache.
    ///
    /// # Errors
    ///
    /// [`GoError::UnknownTerm`] if the id is not part of the ontology
    ///
    /// # Examples
    ///
    /// ```
    /// use gosim::{GoError, Namespace, Ontology};
    ///
    /// let mut ontology = Ontology::default();
    /// ontology.insert_term("biological_process", 8150u32, Namespace::BiologicalProcess);
    /// ontology.insert_term("metabolic process", 8152u32, Namespace::BiologicalProcess);
    /// ontology.add_parent(8150u32, 8152u32).unwrap();
    /// ontology.create_cache();
    ///
    /// let ancestors = ontology.ancestors_of(8152u32.into()).unwrap();
    /// assert_eq!(ancestors.len(), 2);
    ///
    /// assert_eq!(
    ///     ontology.ancestors_of(9999999u32.into()),
    ///     Err(GoError::UnknownTerm(9999999u32.into()))
    /// );
    /// ```
    pub fn ancestors_of(&self, term_id: GoTermId) -> GoResult<TermGroup> {
        let term = self
            .terms
            .get(term_id)
            .ok_or(GoError::UnknownTerm(term_id))?;
        if term.ancestors_cached() {
            return Ok(term.all_ancestors().clone());
        }

        let mut seen = TermGroup::new();
        seen.insert(term_id);
        let mut queue: VecDeque<GoTermId> = term.parents().iter().collect();
        while let Some(parent_id) = queue.pop_front() {
            let parent = self
                .terms
                .get(parent_id)
                .ok_or(GoError::UnknownTerm(parent_id))?;
            if seen.insert(parent_id) {
                queue.extend(parent.parents().iter());
            }
        }
        Ok(seen)
    }

    pub(crate) fn get(&self, term_id: GoTermId) -> Option<&GoTermInternal> {
        self.terms.get(term_id)
    }

    /// Fills the ancestor cache of `term_id` and of every ancestor of it
    ///
    /// Uses an explicit worklist instead of recursion, so even degenerate,
    /// very deep DAGs cannot overflow the stack. A term is computed once
    /// all its parents are cached; its own closure is then the union of
    /// the parent closures plus itself.
    fn cache_ancestors(&mut self, term_id: GoTermId) {
        let mut stack = vec![term_id];
        while let Some(&current) = stack.last() {
            if self.terms.get_unchecked(current).ancestors_cached() {
                stack.pop();
                continue;
            }
            let parents = self.terms.get_unchecked(current).parents().clone();
            let pending: Vec<GoTermId> = parents
                .iter()
                .filter(|parent_id| !self.terms.get_unchecked(*parent_id).ancestors_cached())
                .collect();
            if pending.is_empty() {
                let mut all = TermGroup::new();
                all.insert(current);
                for parent_id in &parents {
                    all |= self.terms.get_unchecked(parent_id).all_ancestors();
                }
                *self.terms.get_unchecked_mut(current).all_ancestors_mut() = all;
                stack.pop();
            } else {
                stack.extend(pending);
            }
        }
    }

    /// Fills the depth of `term_id` and of every ancestor of it
    ///
    /// The depth is the longest path from a namespace root, so a term is
    /// computed once all its parents are done: one more than the largest
    /// parent depth, or zero for roots.
    fn cache_depth(&mut self, term_id: GoTermId) {
        let mut stack = vec![term_id];
        while let Some(&current) = stack.last() {
            if self.terms.get_unchecked(current).depth().is_some() {
                stack.pop();
                continue;
            }
            let parents = self.terms.get_unchecked(current).parents().clone();
            let mut max_parent_depth: Option<u32> = None;
            let mut pending: Vec<GoTermId> = Vec::new();
            for parent_id in &parents {
                match self.terms.get_unchecked(parent_id).depth() {
                    Some(depth) => {
                        max_parent_depth = Some(max_parent_depth.unwrap_or(0).max(depth));
                    }
                    None => pending.push(parent_id),
                }
            }
            if pending.is_empty() {
                let depth = max_parent_depth.map_or(0, |d| d + 1);
                self.terms.get_unchecked_mut(current).set_depth(depth);
                stack.pop();
            } else {
                stack.extend(pending);
            }
        }
    }
}

/// Iterates the [`Ontology`] and yields every [`GoTerm`]
pub struct Iter<'a> {
    inner: std::collections::hash_map::Values<'a, GoTermId, GoTermInternal>,
    ontology: &'a Ontology,
}

impl<'a> Iterator for Iter<'a> {
    type Item = GoTerm<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|term| GoTerm::new(self.ontology, term))
    }
}

impl<'a> IntoIterator for &'a Ontology {
    type Item = GoTerm<'a>;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.terms()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    /// A small diamond below the `biological_process` root:
    ///
    /// 1 -> 2 -> 4
    /// 1 -> 3 -> 4 -> 5
    fn diamond() -> Ontology {
        let mut ontology = Ontology::default();
        for id in 1u32..=5 {
            ontology.insert_term(&format!("term {id}"), id, Namespace::BiologicalProcess);
        }
        ontology.add_parent(1u32, 2u32).unwrap();
        ontology.add_parent(1u32, 3u32).unwrap();
        ontology.add_parent(2u32, 4u32).unwrap();
        ontology.add_parent(3u32, 4u32).unwrap();
        ontology.add_parent(4u32, 5u32).unwrap();
        ontology
    }

    #[test]
    fn ancestors_without_cache() {
        let ontology = diamond();
        let ancestors = ontology.ancestors_of(4u32.into()).unwrap();
        let expected: TermGroup = [1u32, 2, 3, 4].iter().map(|n| GoTermId::from(*n)).collect();
        assert_eq!(ancestors, expected);
    }

    #[test]
    fn ancestors_with_cache() {
        let mut ontology = diamond();
        ontology.create_cache();
        let ancestors = ontology.ancestors_of(4u32.into()).unwrap();
        let expected: TermGroup = [1u32, 2, 3, 4].iter().map(|n| GoTermId::from(*n)).collect();
        assert_eq!(ancestors, expected);

        let root_ancestors = ontology.ancestors_of(1u32.into()).unwrap();
        assert_eq!(root_ancestors.len(), 1);
    }

    #[test]
    fn unknown_term() {
        let ontology = diamond();
        assert_eq!(
            ontology.ancestors_of(9_999_999u32.into()),
            Err(GoError::UnknownTerm(9_999_999u32.into()))
        );
        assert!(ontology.term(9_999_999u32.into()).is_none());
    }

    #[test]
    fn add_parent_of_unknown_term() {
        let mut ontology = diamond();
        assert_eq!(
            ontology.add_parent(1u32, 17u32),
            Err(GoError::UnknownTerm(17u32.into()))
        );
        assert_eq!(
            ontology.add_parent(17u32, 1u32),
            Err(GoError::UnknownTerm(17u32.into()))
        );
    }

    #[test]
    fn depths() {
        let mut ontology = diamond();
        ontology.create_cache();
        assert_eq!(ontology.term(1u32.into()).unwrap().depth(), 0);
        assert_eq!(ontology.term(2u32.into()).unwrap().depth(), 1);
        assert_eq!(ontology.term(4u32.into()).unwrap().depth(), 2);
        assert_eq!(ontology.term(5u32.into()).unwrap().depth(), 3);
    }

    #[test]
    fn roots() {
        let mut ontology = diamond();
        ontology.insert_term("molecular_function", 3674u32, Namespace::MolecularFunction);
        ontology.create_cache();

        assert_eq!(ontology.roots().count(), 2);
        assert_eq!(
            ontology.root(Namespace::BiologicalProcess).unwrap().id(),
            GoTermId::from(1u32)
        );
        assert_eq!(
            ontology.root(Namespace::MolecularFunction).unwrap().id(),
            GoTermId::from(3674u32)
        );
        assert!(ontology.root(Namespace::CellularComponent).is_none());
    }

    #[test]
    fn term_navigation() {
        let mut ontology = diamond();
        ontology.create_cache();
        let term4 = ontology.term(4u32.into()).unwrap();
        let term1 = ontology.term(1u32.into()).unwrap();
        let term5 = ontology.term(5u32.into()).unwrap();

        assert!(term4.child_of(&term1));
        assert!(term1.parent_of(&term4));
        assert!(!term4.child_of(&term4));
        assert_eq!(term4.parents().count(), 2);
        assert_eq!(term4.children().count(), 1);
        assert_eq!(term4.distance_to_ancestor(&term1), Some(2));
        assert_eq!(term1.distance_to_ancestor(&term4), None);
        assert_eq!(term5.distance_to_term(&term4), Some(1));
    }
}
