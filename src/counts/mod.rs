//! Aggregated annotation counts and information content

use std::collections::HashMap;

use tracing::debug;

use crate::term::Namespace;
use crate::AnnotationIndex;
use crate::Ontology;
use crate::TermGroup;
use crate::{GoError, GoResult, GoTermId};

/// Per-term annotation counts, aggregated over the whole ontology
///
/// For every term the count records how many distinct genes are annotated
/// to the term itself or to any of its descendants. A gene annotated to a
/// term therefore contributes one unit to that term and to every ancestor
/// of it, but never more than one unit per term, regardless of how many of
/// the gene's annotations reach the same ancestor.
///
/// Aggregation happens once, during [`TermCounts::new`]; the result is
/// immutable and can be shared between any number of readers.
///
/// # Examples
///
/// ```
/// use gosim::{AnnotationIndex, Namespace, Ontology, TermCounts};
///
/// let mut ontology = Ontology::default();
/// ontology.insert_term("biological_process", 8150u32, Namespace::BiologicalProcess);
/// ontology.insert_term("metabolic process", 8152u32, Namespace::BiologicalProcess);
/// ontology.add_parent(8150u32, 8152u32).unwrap();
/// ontology.create_cache();
///
/// let mut annotations = AnnotationIndex::new();
/// annotations.annotate("gene_a", 8152u32.into());
/// annotations.annotate("gene_b", 8150u32.into());
///
/// let counts = TermCounts::new(&ontology, &annotations).unwrap();
/// assert_eq!(counts.count(8152u32.into()).unwrap(), 1);
/// assert_eq!(counts.count(8150u32.into()).unwrap(), 2);
/// assert_eq!(counts.total(Namespace::BiologicalProcess), 2);
/// assert_eq!(counts.total(Namespace::MolecularFunction), 0);
/// ```
#[derive(Debug)]
pub struct TermCounts {
    counts: HashMap<GoTermId, (Namespace, u64)>,
    totals: [u64; 3],
}

impl TermCounts {
    /// Aggregates the annotation counts for every term of the ontology
    ///
    /// For each gene the reflexive ancestor sets of all its direct
    /// annotations are unioned first, so shared ancestors are counted
    /// exactly once per gene. Each namespace a gene touches is counted
    /// once toward that namespace's total.
    ///
    /// # Errors
    ///
    /// [`GoError::UnknownTerm`] if a gene is annotated to an id that is
    /// not part of the ontology. The annotation provider is expected to
    /// filter such annotations beforehand.
    pub fn new(ontology: &Ontology, annotations: &AnnotationIndex) -> GoResult<Self> {
        let mut counts: HashMap<GoTermId, (Namespace, u64)> =
            HashMap::with_capacity(ontology.len());
        for term in ontology {
            counts.insert(term.id(), (term.namespace(), 0));
        }

        let mut totals = [0u64; 3];
        for (_gene, direct_terms) in annotations {
            let mut reached = TermGroup::new();
            for term_id in direct_terms {
                reached |= &ontology.ancestors_of(term_id)?;
            }

            let mut touched = [false; 3];
            for term_id in &reached {
                let (namespace, count) = counts
                    .get_mut(&term_id)
                    .expect("ancestors_of only returns ids of the ontology");
                *count += 1;
                touched[namespace.index()] = true;
            }
            for namespace in Namespace::ALL {
                if touched[namespace.index()] {
                    totals[namespace.index()] += 1;
                }
            }
        }

        debug!(
            "aggregated counts of {} genes across {} terms",
            annotations.len(),
            counts.len()
        );

        Ok(TermCounts { counts, totals })
    }

    /// Returns the aggregated count of the given term
    ///
    /// A count of `0` means the term exists but was never reached by any
    /// gene's annotations.
    ///
    /// # Errors
    ///
    /// [`GoError::UnknownTerm`] if the id is not part of the ontology the
    /// counts were built from
    pub fn count(&self, term_id: GoTermId) -> GoResult<u64> {
        self.counts
            .get(&term_id)
            .map(|(_, count)| *count)
            .ok_or(GoError::UnknownTerm(term_id))
    }

    /// Returns the number of distinct genes annotated anywhere in the
    /// given namespace
    ///
    /// This is the denominator of the information content of every term
    /// of the namespace.
    pub fn total(&self, namespace: Namespace) -> u64 {
        self.totals[namespace.index()]
    }

    /// Returns the information content of the given term
    ///
    /// Defined as `-log2(count(term) / total(namespace))`. Rare, specific
    /// terms score high; a namespace root, which every annotated gene of
    /// the namespace reaches, scores `0`.
    ///
    /// # Errors
    ///
    /// - [`GoError::UnknownTerm`] if the id is not part of the ontology
    /// - [`GoError::ZeroCount`] if the term was never annotated; its
    ///   information content is undefined and deliberately not clamped
    ///   to a sentinel value
    /// - [`GoError::EmptyNamespace`] if no gene is annotated anywhere in
    ///   the term's namespace
    pub fn information_content(&self, term_id: GoTermId) -> GoResult<f64> {
        let (namespace, count) = self
            .counts
            .get(&term_id)
            .ok_or(GoError::UnknownTerm(term_id))?;
        let total = self.totals[namespace.index()];
        if total == 0 {
            return Err(GoError::EmptyNamespace(*namespace));
        }
        if *count == 0 {
            return Err(GoError::ZeroCount(term_id));
        }
        Ok((count_to_f64(total) / count_to_f64(*count)).log2())
    }
}

/// Counts larger than `u32::MAX` cannot be converted to `f64` without
/// losing precision; no real-world annotation set comes close.
fn count_to_f64(n: u64) -> f64 {
    <u64 as TryInto<u32>>::try_into(n)
        .map(f64::from)
        .expect("more than u32::MAX annotated genes")
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::Namespace;

    /// The chain root(1) -> a(2) -> b(3) with 10 genes on b and 2 on a
    fn chain() -> (Ontology, AnnotationIndex) {
        let mut ontology = Ontology::default();
        ontology.insert_term("root", 1u32, Namespace::BiologicalProcess);
        ontology.insert_term("a", 2u32, Namespace::BiologicalProcess);
        ontology.insert_term("b", 3u32, Namespace::BiologicalProcess);
        ontology.add_parent(1u32, 2u32).unwrap();
        ontology.add_parent(2u32, 3u32).unwrap();
        ontology.create_cache();

        let mut annotations = AnnotationIndex::new();
        for i in 0..10 {
            annotations.annotate(&format!("gene_b{i}"), 3u32.into());
        }
        for i in 0..2 {
            annotations.annotate(&format!("gene_a{i}"), 2u32.into());
        }
        (ontology, annotations)
    }

    #[test]
    fn counts_accumulate_towards_the_root() {
        let (ontology, annotations) = chain();
        let counts = TermCounts::new(&ontology, &annotations).unwrap();

        assert_eq!(counts.count(3u32.into()).unwrap(), 10);
        assert_eq!(counts.count(2u32.into()).unwrap(), 12);
        assert_eq!(counts.count(1u32.into()).unwrap(), 12);
        assert_eq!(counts.total(Namespace::BiologicalProcess), 12);
    }

    #[test]
    fn information_content_of_the_chain() {
        let (ontology, annotations) = chain();
        let counts = TermCounts::new(&ontology, &annotations).unwrap();

        let ic_b = counts.information_content(3u32.into()).unwrap();
        assert!((ic_b - 0.263_034_4).abs() < 1e-6);

        let ic_a = counts.information_content(2u32.into()).unwrap();
        assert!(ic_a.abs() < 1e-9);

        let ic_root = counts.information_content(1u32.into()).unwrap();
        assert!(ic_root.abs() < 1e-9);
    }

    #[test]
    fn no_double_counting_through_shared_ancestors() {
        // diamond: one gene annotated to both leaves below a shared parent
        let mut ontology = Ontology::default();
        ontology.insert_term("root", 1u32, Namespace::BiologicalProcess);
        ontology.insert_term("left", 2u32, Namespace::BiologicalProcess);
        ontology.insert_term("right", 3u32, Namespace::BiologicalProcess);
        ontology.add_parent(1u32, 2u32).unwrap();
        ontology.add_parent(1u32, 3u32).unwrap();
        ontology.create_cache();

        let mut annotations = AnnotationIndex::new();
        annotations.annotate("gene_a", 2u32.into());
        annotations.annotate("gene_a", 3u32.into());

        let counts = TermCounts::new(&ontology, &annotations).unwrap();
        assert_eq!(counts.count(1u32.into()).unwrap(), 1);
        assert_eq!(counts.total(Namespace::BiologicalProcess), 1);
    }

    #[test]
    fn monotonicity() {
        let (ontology, annotations) = chain();
        let counts = TermCounts::new(&ontology, &annotations).unwrap();

        for term in &ontology {
            let own = counts.count(term.id()).unwrap();
            for ancestor in term.ancestors() {
                assert!(counts.count(ancestor.id()).unwrap() >= own);
            }
        }
    }

    #[test]
    fn zero_count_is_an_error() {
        let (mut ontology, annotations) = chain();
        ontology.insert_term("unused", 4u32, Namespace::BiologicalProcess);
        ontology.add_parent(1u32, 4u32).unwrap();
        ontology.create_cache();

        let counts = TermCounts::new(&ontology, &annotations).unwrap();
        assert_eq!(counts.count(4u32.into()).unwrap(), 0);
        assert_eq!(
            counts.information_content(4u32.into()),
            Err(GoError::ZeroCount(4u32.into()))
        );
    }

    #[test]
    fn empty_namespace_is_an_error() {
        let (mut ontology, annotations) = chain();
        ontology.insert_term("molecular_function", 3674u32, Namespace::MolecularFunction);
        ontology.create_cache();

        let counts = TermCounts::new(&ontology, &annotations).unwrap();
        assert_eq!(counts.total(Namespace::MolecularFunction), 0);
        assert_eq!(
            counts.information_content(3674u32.into()),
            Err(GoError::EmptyNamespace(Namespace::MolecularFunction))
        );
    }

    #[test]
    fn unknown_term_is_an_error() {
        let (ontology, annotations) = chain();
        let counts = TermCounts::new(&ontology, &annotations).unwrap();

        let absent = GoTermId::try_from("GO:9999999").unwrap();
        assert_eq!(counts.count(absent), Err(GoError::UnknownTerm(absent)));
        assert_eq!(
            counts.information_content(absent),
            Err(GoError::UnknownTerm(absent))
        );
    }

    #[test]
    fn annotation_to_foreign_id_is_rejected() {
        let (ontology, mut annotations) = chain();
        annotations.annotate("gene_x", 99u32.into());

        assert_eq!(
            TermCounts::new(&ontology, &annotations).unwrap_err(),
            GoError::UnknownTerm(99u32.into())
        );
    }
}
