//! Methods to calculate the similarity between two GO terms
//!
//! The annotation-based scores ([`Resnik`], [`Lin`]) need a [`TermCounts`]
//! instance; the topological [`PathLength`] score works on the bare
//! [`Ontology`] and is the fallback when no annotation data is available.
//! [`SimilarityEngine`] bundles both inputs behind an id-keyed interface.

use crate::term::GoTerm;
use crate::GoResult;
use crate::Ontology;
use crate::TermCounts;
use crate::TermGroup;
use crate::{GoError, GoTermId};

mod defaults;

pub use defaults::{Lin, PathLength, Resnik};

/// Trait for similarity score calculation between 2 [`GoTerm`]s
///
/// The built-in algorithms ([`Resnik`], [`Lin`], [`PathLength`]) implement
/// this trait; custom scores can plug into [`SimilarityEngine::similarity`]
/// the same way.
pub trait Similarity {
    /// Calculates the actual similarity between term a and term b
    ///
    /// # Errors
    ///
    /// Undefined scores are typed errors, never silent sentinel values;
    /// see [`crate::GoError`] for the failure conditions of the built-in
    /// algorithms.
    fn calculate(&self, a: &GoTerm, b: &GoTerm) -> GoResult<f64>;
}

/// Returns the most informative common ancestor (MICA) of both terms
///
/// The MICA is the common ancestor with the maximum information content.
/// Ties are broken deterministically to the lowest [`GoTermId`].
/// Common ancestors without annotations carry no information and are
/// skipped; since the namespace root is always a common ancestor of two
/// same-namespace terms, at least one candidate remains whenever the
/// namespace has annotations at all.
///
/// # Errors
///
/// - [`GoError::EmptyIntersection`] if the terms share no ancestor,
///   i.e. they live in different namespaces
/// - [`GoError::EmptyNamespace`] if the shared namespace has no
///   annotations
/// - [`GoError::ZeroCount`] if no common ancestor has annotations
///   (malformed input, cannot happen in a well-formed build)
pub(crate) fn mica(a: &GoTerm, b: &GoTerm, counts: &TermCounts) -> GoResult<GoTermId> {
    let common = a.common_ancestor_ids(b);
    let Some(lowest) = common.first() else {
        return Err(GoError::EmptyIntersection(a.id(), b.id()));
    };

    let mut best: Option<(GoTermId, f64)> = None;
    for term_id in &common {
        let ic = match counts.information_content(term_id) {
            Ok(ic) => ic,
            Err(GoError::ZeroCount(_)) => continue,
            Err(err) => return Err(err),
        };
        match best {
            // iteration is in ascending id order, so on a tie the
            // lowest id wins
            Some((_, best_ic)) if ic <= best_ic => {}
            _ => best = Some((term_id, ic)),
        }
    }
    best.map(|(id, _)| id).ok_or(GoError::ZeroCount(lowest))
}

/// Shortest-path distance between both terms through their deepest
/// common ancestor
///
/// Counts the edges from each term up to the common ancestor with the
/// largest depth: `(depth(a) - depth(dca)) + (depth(b) - depth(dca))`.
/// A term has distance `0` to itself.
pub(crate) fn dca_distance(a: &GoTerm, b: &GoTerm) -> GoResult<usize> {
    let dca = a
        .deepest_common_ancestor(b)
        .ok_or(GoError::EmptyIntersection(a.id(), b.id()))?;
    let up = a.depth() - dca.depth();
    let down = b.depth() - dca.depth();
    Ok(u32_to_usize(up) + u32_to_usize(down))
}

/// Topological distance between two terms, without annotation data
///
/// # Errors
///
/// [`GoError::UnknownTerm`] if either id is absent,
/// [`GoError::EmptyIntersection`] if the terms share no ancestor
///
/// # Examples
///
/// ```
/// use gosim::similarity::semantic_distance;
/// use gosim::{Namespace, Ontology};
///
/// let mut ontology = Ontology::default();
/// ontology.insert_term("root", 1u32, Namespace::BiologicalProcess);
/// ontology.insert_term("a", 2u32, Namespace::BiologicalProcess);
/// ontology.insert_term("b", 3u32, Namespace::BiologicalProcess);
/// ontology.add_parent(1u32, 2u32).unwrap();
/// ontology.add_parent(2u32, 3u32).unwrap();
/// ontology.create_cache();
///
/// assert_eq!(semantic_distance(&ontology, 3u32.into(), 1u32.into()).unwrap(), 2);
/// assert_eq!(semantic_distance(&ontology, 3u32.into(), 3u32.into()).unwrap(), 0);
/// ```
pub fn semantic_distance(ontology: &Ontology, a: GoTermId, b: GoTermId) -> GoResult<usize> {
    let term_a = GoTerm::try_new(ontology, a)?;
    let term_b = GoTerm::try_new(ontology, b)?;
    dca_distance(&term_a, &term_b)
}

/// Topological similarity between two terms, without annotation data
///
/// The inverse of [`semantic_distance`]; a term compared to itself
/// scores `1.0`. Clearly distinguished from the annotation-based
/// [`Resnik`] and [`Lin`] scores: it only takes the [`Ontology`].
///
/// # Errors
///
/// Same conditions as [`semantic_distance`]
pub fn semantic_similarity(ontology: &Ontology, a: GoTermId, b: GoTermId) -> GoResult<f64> {
    let distance = semantic_distance(ontology, a, b)?;
    if distance == 0 {
        return Ok(1.0);
    }
    Ok(1.0 / usize_to_f64(distance))
}

/// An id-keyed facade over one [`Ontology`] and one [`TermCounts`]
///
/// The engine borrows both inputs and holds no state of its own; every
/// query is a pure function. Construction is free, the expensive step is
/// building the [`TermCounts`].
///
/// # Examples
///
/// ```
/// use gosim::{AnnotationIndex, Namespace, Ontology, SimilarityEngine, TermCounts};
///
/// let mut ontology = Ontology::default();
/// ontology.insert_term("root", 1u32, Namespace::BiologicalProcess);
/// ontology.insert_term("a", 2u32, Namespace::BiologicalProcess);
/// ontology.add_parent(1u32, 2u32).unwrap();
/// ontology.create_cache();
///
/// let mut annotations = AnnotationIndex::new();
/// annotations.annotate("gene_a", 2u32.into());
/// annotations.annotate("gene_b", 1u32.into());
/// let counts = TermCounts::new(&ontology, &annotations).unwrap();
///
/// let engine = SimilarityEngine::new(&ontology, &counts);
/// assert!((engine.lin_sim(2u32.into(), 2u32.into()).unwrap() - 1.0).abs() < 1e-9);
/// ```
pub struct SimilarityEngine<'a> {
    ontology: &'a Ontology,
    counts: &'a TermCounts,
}

impl<'a> SimilarityEngine<'a> {
    /// Constructs a new engine over an [`Ontology`] and the [`TermCounts`]
    /// built from it
    pub fn new(ontology: &'a Ontology, counts: &'a TermCounts) -> Self {
        Self { ontology, counts }
    }

    /// Returns the information content of a single term
    ///
    /// # Errors
    ///
    /// See [`TermCounts::information_content`]
    pub fn info_content(&self, term_id: GoTermId) -> GoResult<f64> {
        self.counts.information_content(term_id)
    }

    /// Returns the ids of all common ancestors of both terms
    ///
    /// The result includes the terms themselves where applicable (the
    /// ancestor sets are reflexive) and may be empty for terms of
    /// different namespaces.
    ///
    /// # Errors
    ///
    /// [`GoError::UnknownTerm`] if either id is absent
    pub fn common_ancestors(&self, a: GoTermId, b: GoTermId) -> GoResult<TermGroup> {
        let term_a = self.term(a)?;
        let term_b = self.term(b)?;
        Ok(term_a.common_ancestor_ids(&term_b))
    }

    /// Returns the most informative common ancestor of both terms
    ///
    /// # Errors
    ///
    /// [`GoError::UnknownTerm`] if either id is absent,
    /// [`GoError::EmptyIntersection`] if the terms are incomparable,
    /// [`GoError::EmptyNamespace`] if the namespace has no annotations
    pub fn mica(&self, a: GoTermId, b: GoTermId) -> GoResult<GoTermId> {
        let term_a = self.term(a)?;
        let term_b = self.term(b)?;
        mica(&term_a, &term_b, self.counts)
    }

    /// Returns the Resnik similarity of both terms, the information
    /// content of their most informative common ancestor
    ///
    /// # Errors
    ///
    /// [`GoError::UnknownTerm`] if either id is absent,
    /// [`GoError::EmptyIntersection`] if the terms are incomparable,
    /// [`GoError::EmptyNamespace`] if the namespace has no annotations
    pub fn resnik_sim(&self, a: GoTermId, b: GoTermId) -> GoResult<f64> {
        let term_a = self.term(a)?;
        let term_b = self.term(b)?;
        Resnik::new(self.counts).calculate(&term_a, &term_b)
    }

    /// Returns the Lin similarity of both terms,
    /// `2 * IC(MICA) / (IC(a) + IC(b))`
    ///
    /// # Errors
    ///
    /// In addition to the [`SimilarityEngine::resnik_sim`] conditions:
    /// [`GoError::ZeroCount`] if either term itself has no annotations and
    /// [`GoError::DivisionUndefined`] if both information contents are
    /// exactly zero
    pub fn lin_sim(&self, a: GoTermId, b: GoTermId) -> GoResult<f64> {
        let term_a = self.term(a)?;
        let term_b = self.term(b)?;
        Lin::new(self.counts).calculate(&term_a, &term_b)
    }

    /// Returns the topological distance between both terms
    ///
    /// # Errors
    ///
    /// See [`semantic_distance`]
    pub fn semantic_distance(&self, a: GoTermId, b: GoTermId) -> GoResult<usize> {
        semantic_distance(self.ontology, a, b)
    }

    /// Returns the topological similarity between both terms
    ///
    /// # Errors
    ///
    /// See [`semantic_similarity`]
    pub fn semantic_similarity(&self, a: GoTermId, b: GoTermId) -> GoResult<f64> {
        semantic_similarity(self.ontology, a, b)
    }

    /// Scores both terms with a caller-provided [`Similarity`] algorithm
    ///
    /// # Errors
    ///
    /// [`GoError::UnknownTerm`] if either id is absent, plus whatever the
    /// algorithm itself reports
    pub fn similarity(
        &self,
        a: GoTermId,
        b: GoTermId,
        similarity: &impl Similarity,
    ) -> GoResult<f64> {
        let term_a = self.term(a)?;
        let term_b = self.term(b)?;
        similarity.calculate(&term_a, &term_b)
    }

    fn term(&self, term_id: GoTermId) -> GoResult<GoTerm<'a>> {
        GoTerm::try_new(self.ontology, term_id)
    }
}

/// Distances are bounded by twice the DAG depth, far below `u32::MAX`.
fn usize_to_f64(n: usize) -> f64 {
    <usize as TryInto<u32>>::try_into(n)
        .map(f64::from)
        .expect("distance exceeds u32::MAX")
}

fn u32_to_usize(n: u32) -> usize {
    n.try_into()
        .expect("u32 always fits into usize on supported platforms")
}
