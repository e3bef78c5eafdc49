//! The built-in similarity algorithms

use crate::similarity::{dca_distance, mica, usize_to_f64, Similarity};
use crate::term::GoTerm;
use crate::GoError;
use crate::GoResult;
use crate::TermCounts;

/// Similarity score from Resnik
///
/// The information content of the most informative common ancestor of
/// both terms. For a detailed description see
/// [Resnik P, Proceedings of the 14th IJCAI, (1995)](https://www.ijcai.org/Proceedings/95-1/Papers/059.pdf)
#[derive(Debug)]
pub struct Resnik<'a> {
    counts: &'a TermCounts,
}

impl<'a> Resnik<'a> {
    /// Constructs a new struct to calculate the Resnik based similarity
    /// scores between two terms
    pub fn new(counts: &'a TermCounts) -> Self {
        Self { counts }
    }
}

impl Similarity for Resnik<'_> {
    fn calculate(&self, a: &GoTerm, b: &GoTerm) -> GoResult<f64> {
        let mica = mica(a, b, self.counts)?;
        self.counts.information_content(mica)
    }
}

/// Similarity score from Lin
///
/// The Resnik score normalized by the mean information content of both
/// terms, which bounds the score to `[0, 1]`. For a detailed description
/// see [Lin D, Proceedings of the 15th ICML, (1998)](https://dl.acm.org/doi/10.5555/645527.657297)
#[derive(Debug)]
pub struct Lin<'a> {
    counts: &'a TermCounts,
}

impl<'a> Lin<'a> {
    /// Constructs a new struct to calculate the Lin based similarity
    /// scores between two terms
    pub fn new(counts: &'a TermCounts) -> Self {
        Self { counts }
    }
}

impl Similarity for Lin<'_> {
    fn calculate(&self, a: &GoTerm, b: &GoTerm) -> GoResult<f64> {
        let ic_a = self.counts.information_content(a.id())?;
        let ic_b = self.counts.information_content(b.id())?;
        let ic_combined = ic_a + ic_b;

        if ic_combined == 0.0 {
            return Err(GoError::DivisionUndefined);
        }

        let resnik = Resnik::new(self.counts).calculate(a, b)?;

        Ok(2.0 * resnik / ic_combined)
    }
}

/// Similarity score based on the path length between terms
///
/// The inverse of the number of edges between both terms through their
/// deepest common ancestor. Works without annotation data and is the
/// fallback when no [`TermCounts`] can be built.
#[derive(Default, Debug)]
pub struct PathLength {}

impl PathLength {
    /// Constructs a new struct to calculate the path length based
    /// similarity scores between two terms
    pub fn new() -> Self {
        Self::default()
    }
}

impl Similarity for PathLength {
    fn calculate(&self, a: &GoTerm, b: &GoTerm) -> GoResult<f64> {
        let distance = dca_distance(a, b)?;
        if distance == 0 {
            return Ok(1.0);
        }
        Ok(1.0 / usize_to_f64(distance))
    }
}
