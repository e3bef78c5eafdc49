//! Gene annotations, the primary input for information content

use std::collections::hash_map::Iter;
use std::collections::HashMap;

use crate::TermGroup;
use crate::{GoTermId, DEFAULT_NUM_TERMS_PER_GENE};

/// The direct term annotations of a set of genes or gene products
///
/// Every gene maps to the set of [`GoTermId`]s it is directly annotated to.
/// A gene can be annotated to a term at most once; repeated calls to
/// [`AnnotationIndex::annotate`] with the same pair are no-ops.
///
/// The index is built by the annotation provider, e.g. from an
/// already-parsed `gaf` file. All annotated ids must exist in the
/// [`crate::Ontology`] the index is later paired with; filtering
/// annotations to obsolete or foreign ids is the provider's job.
///
/// # Examples
///
/// ```
/// use gosim::AnnotationIndex;
///
/// let mut annotations = AnnotationIndex::new();
/// annotations.annotate("AT1G01010", 3674u32.into());
/// annotations.annotate("AT1G01010", 8150u32.into());
/// annotations.annotate("AT1G01010", 3674u32.into());
///
/// assert_eq!(annotations.len(), 1);
/// assert_eq!(annotations.terms_of("AT1G01010").unwrap().len(), 2);
/// ```
#[derive(Debug, Default)]
pub struct AnnotationIndex {
    genes: HashMap<String, TermGroup>,
}

impl AnnotationIndex {
    /// Constructs a new, empty [`AnnotationIndex`]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of annotated genes
    pub fn len(&self) -> usize {
        self.genes.len()
    }

    /// Returns `true` if no gene is annotated
    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    /// Records the direct annotation of `gene` to `term`
    pub fn annotate(&mut self, gene: &str, term: GoTermId) {
        self.genes
            .entry(gene.to_string())
            .or_insert_with(|| TermGroup::with_capacity(DEFAULT_NUM_TERMS_PER_GENE))
            .insert(term);
    }

    /// Returns the direct annotations of a gene, if it has any
    pub fn terms_of(&self, gene: &str) -> Option<&TermGroup> {
        self.genes.get(gene)
    }

    /// Iterates all genes and their direct annotations
    ///
    /// The iteration order is unspecified; count aggregation does not
    /// depend on it.
    pub fn iter(&self) -> Iter<'_, String, TermGroup> {
        self.genes.iter()
    }
}

impl<'a> IntoIterator for &'a AnnotationIndex {
    type Item = (&'a String, &'a TermGroup);
    type IntoIter = Iter<'a, String, TermGroup>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
