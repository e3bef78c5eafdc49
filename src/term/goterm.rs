use crate::term::internal::GoTermInternal;
use crate::term::{GoTerms, Namespace, TermChildren, TermGroup, TermParents};
use crate::GoError;
use crate::GoResult;
use crate::GoTermId;
use crate::Ontology;

/// A single term of the Gene Ontology
///
/// `GoTerm` is a cheap, copyable view into the [`Ontology`]. It provides
/// navigation along the `is_a` relation and is the input type of the
/// [`crate::similarity::Similarity`] algorithms.
///
/// Ancestor-based methods rely on the closure cache and return correct
/// results only after [`Ontology::create_cache`] has run.
#[derive(Debug, Clone, Copy)]
pub struct GoTerm<'a> {
    id: GoTermId,
    name: &'a str,
    namespace: Namespace,
    depth: u32,
    parents: &'a TermParents,
    children: &'a TermChildren,
    all_ancestors: &'a TermGroup,
    ontology: &'a Ontology,
}

impl<'a> GoTerm<'a> {
    /// Constructs a new [`GoTerm`]
    ///
    /// # Errors
    ///
    /// [`GoError::UnknownTerm`] if the given [`GoTermId`] does not match
    /// an existing term
    pub fn try_new(ontology: &'a Ontology, id: GoTermId) -> GoResult<GoTerm<'a>> {
        let term = ontology.get(id).ok_or(GoError::UnknownTerm(id))?;
        Ok(GoTerm::new(ontology, term))
    }

    pub(crate) fn new(ontology: &'a Ontology, term: &'a GoTermInternal) -> GoTerm<'a> {
        GoTerm {
            id: term.id(),
            name: term.name(),
            namespace: term.namespace(),
            depth: term.depth().unwrap_or(0),
            parents: term.parents(),
            children: term.children(),
            all_ancestors: term.all_ancestors(),
            ontology,
        }
    }

    /// Returns the [`GoTermId`] of the term
    ///
    /// e.g.: `GO:0048364`
    pub fn id(&self) -> GoTermId {
        self.id
    }

    /// Returns the name of the term
    ///
    /// e.g.: `root development`
    pub fn name(&self) -> &str {
        self.name
    }

    /// Returns the [`Namespace`] the term belongs to
    pub fn namespace(&self) -> Namespace {
        self.namespace
    }

    /// Returns the length of the longest path from the namespace root
    /// to the term
    ///
    /// Available after [`Ontology::create_cache`]; roots have depth `0`.
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Returns the [`GoTermId`]s of the direct parents
    pub fn parent_ids(&self) -> &TermParents {
        self.parents
    }

    /// Returns an iterator of the direct parents of the term
    pub fn parents(&self) -> GoTerms<'a> {
        GoTerms::new(self.parents, self.ontology)
    }

    /// Returns the [`GoTermId`]s of the direct children
    pub fn child_ids(&self) -> &TermChildren {
        self.children
    }

    /// Returns an iterator of the direct children of the term
    pub fn children(&self) -> GoTerms<'a> {
        GoTerms::new(self.children, self.ontology)
    }

    /// Returns the [`GoTermId`]s of the term itself and all its direct
    /// and indirect parents
    pub fn ancestor_ids(&self) -> &TermGroup {
        self.all_ancestors
    }

    /// Returns an iterator of the term itself and all its direct and
    /// indirect parents
    pub fn ancestors(&self) -> GoTerms<'a> {
        GoTerms::new(self.all_ancestors, self.ontology)
    }

    /// Returns the [`GoTermId`]s that are ancestors of both `self` **and** `other`
    ///
    /// The closures are reflexive, so if one term is an ancestor of the
    /// other it is itself part of the result.
    pub fn common_ancestor_ids(&self, other: &GoTerm) -> TermGroup {
        self.ancestor_ids() & other.ancestor_ids()
    }

    /// Returns the [`GoTermId`]s that are ancestors of either `self` **or** `other`
    pub fn union_ancestor_ids(&self, other: &GoTerm) -> TermGroup {
        self.ancestor_ids() | other.ancestor_ids()
    }

    /// Returns `true` if `self` is a child (direct or indirect) of `other`
    pub fn child_of(&self, other: &GoTerm) -> bool {
        if self.id == other.id() {
            return false;
        }
        self.ancestor_ids().contains(other.id())
    }

    /// Returns `true` if `self` is a parent (direct or indirect) of `other`
    pub fn parent_of(&self, other: &GoTerm) -> bool {
        other.child_of(self)
    }

    /// Returns the number of steps of the shortest upward path from `self`
    /// to `other`, if `other` is an ancestor of `self`
    pub fn distance_to_ancestor(&self, other: &GoTerm) -> Option<usize> {
        if self.id() == other.id() {
            return Some(0);
        }
        if self.parent_ids().contains(other.id()) {
            return Some(1);
        }
        if !self.ancestor_ids().contains(other.id()) {
            return None;
        }
        self.parents()
            .filter_map(|p| p.distance_to_ancestor(other))
            .min()
            .map(|c| c + 1)
    }

    /// Returns the number of steps of the shortest path from `self` to
    /// `other` through any common ancestor
    ///
    /// Returns `None` if the terms share no ancestor.
    pub fn distance_to_term(&self, other: &GoTerm) -> Option<usize> {
        let common = self.common_ancestor_ids(other);
        common
            .iter()
            .filter_map(|id| {
                let parent = self.resolve(id);
                Some(self.distance_to_ancestor(&parent)? + other.distance_to_ancestor(&parent)?)
            })
            .min()
    }

    /// Returns the common ancestor with the largest depth
    ///
    /// When several common ancestors share the maximum depth the one with
    /// the lowest [`GoTermId`] is returned, so results are reproducible.
    /// Returns `None` if the terms share no ancestor.
    pub fn deepest_common_ancestor(&self, other: &GoTerm) -> Option<GoTerm<'a>> {
        let common = self.common_ancestor_ids(other);
        let mut deepest: Option<GoTerm<'a>> = None;
        for id in common.iter() {
            let ancestor = self.resolve(id);
            match deepest {
                Some(best) if ancestor.depth() <= best.depth() => {}
                _ => deepest = Some(ancestor),
            }
        }
        deepest
    }

    /// Looks up an id that is known to be part of the ontology
    fn resolve(&self, id: GoTermId) -> GoTerm<'a> {
        self.ontology
            .term(id)
            .expect("all ids in a TermGroup belong to the ontology")
    }
}

impl PartialEq for GoTerm<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for GoTerm<'_> {}
