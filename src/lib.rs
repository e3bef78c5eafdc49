//! A library to compute semantic similarity between Gene Ontology terms
//!
//! `gosim` works on a fully materialized, read-only [`Ontology`] of GO terms
//! and a set of gene annotations ([`AnnotationIndex`]). From those two inputs
//! it aggregates annotation counts ([`TermCounts`]), derives the information
//! content of every term and scores term pairs with the Resnik and Lin
//! similarity measures, as well as a purely topological fallback measure.
//!
//! Parsing of `obo` and `gaf` files is not part of this crate. The caller
//! builds the [`Ontology`] and [`AnnotationIndex`] from already-parsed data
//! and freezes the ontology with [`Ontology::create_cache`] before querying.
//!
//! # Examples
//!
//! ```
//! use gosim::{AnnotationIndex, Namespace, Ontology, SimilarityEngine, TermCounts};
//!
//! let mut ontology = Ontology::default();
//! ontology.insert_term("metabolic process", 8152u32, Namespace::BiologicalProcess);
//! ontology.insert_term("catabolic process", 9056u32, Namespace::BiologicalProcess);
//! ontology.add_parent(8152u32, 9056u32).unwrap();
//! ontology.create_cache();
//!
//! let mut annotations = AnnotationIndex::new();
//! annotations.annotate("gene_a", 9056u32.into());
//! annotations.annotate("gene_b", 8152u32.into());
//!
//! let counts = TermCounts::new(&ontology, &annotations).unwrap();
//! assert_eq!(counts.count(9056u32.into()).unwrap(), 1);
//! assert_eq!(counts.count(8152u32.into()).unwrap(), 2);
//!
//! let engine = SimilarityEngine::new(&ontology, &counts);
//! let sim = engine.resnik_sim(9056u32.into(), 9056u32.into()).unwrap();
//! assert!((sim - 1.0).abs() < 1e-9);
//! ```

use thiserror::Error;

pub mod annotations;
pub mod counts;
pub mod ontology;
pub mod similarity;
pub mod term;

pub use annotations::AnnotationIndex;
pub use counts::TermCounts;
pub use ontology::Ontology;
pub use similarity::{Lin, PathLength, Resnik, Similarity, SimilarityEngine};
pub use term::{GoTerm, GoTermId, Namespace, TermGroup};

const DEFAULT_NUM_PARENTS: usize = 8;
const DEFAULT_NUM_ALL_ANCESTORS: usize = 32;
const DEFAULT_NUM_TERMS_PER_GENE: usize = 16;
const DEFAULT_NUM_TERMS: usize = 50_000;

/// Failures surfaced by ontology lookups, count aggregation and
/// similarity scores
///
/// Every failure is reported to the immediate caller. The computations are
/// deterministic, so no error in this crate is worth retrying.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum GoError {
    /// The queried term id is not part of the ontology
    #[error("term {0} does not exist in the ontology")]
    UnknownTerm(GoTermId),
    /// The term was never annotated, its information content is undefined
    #[error("term {0} has no annotated genes")]
    ZeroCount(GoTermId),
    /// No gene is annotated anywhere in the namespace
    #[error("namespace {0} has no annotated genes")]
    EmptyNamespace(Namespace),
    /// The two terms share no ancestor, they are incomparable
    #[error("terms {0} and {1} have no common ancestor")]
    EmptyIntersection(GoTermId, GoTermId),
    /// The combined information content of both terms is zero, the Lin
    /// score is undefined
    #[error("combined information content of both terms is zero")]
    DivisionUndefined,
    /// A string could not be parsed into a [`GoTermId`]
    #[error("invalid GO term id: {0}")]
    InvalidTermId(String),
    /// A string does not name one of the GO namespaces
    #[error("unknown GO namespace: {0}")]
    UnknownNamespace(String),
}

/// The `Result` type of this crate
pub type GoResult<T> = Result<T, GoError>;
