//! GO terms, their identifiers and groups of terms

use std::fmt::Display;

use crate::{GoError, GoResult, Ontology};

mod goterm;
mod group;
pub(crate) mod internal;
mod termid;

pub use goterm::GoTerm;
pub use group::TermGroup;
pub use termid::GoTermId;

/// The ids of the direct parents of a term
pub type TermParents = TermGroup;
/// The ids of the direct children of a term
pub type TermChildren = TermGroup;

/// The three disjoint sub-hierarchies of the Gene Ontology
///
/// Every term belongs to exactly one namespace and similarity scores are
/// only meaningful between terms of the same namespace.
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq)]
pub enum Namespace {
    /// `biological_process`, rooted at `GO:0008150`
    BiologicalProcess,
    /// `cellular_component`, rooted at `GO:0005575`
    CellularComponent,
    /// `molecular_function`, rooted at `GO:0003674`
    MolecularFunction,
}

impl Namespace {
    /// All namespaces, in the order used for internal indexing
    pub const ALL: [Namespace; 3] = [
        Namespace::BiologicalProcess,
        Namespace::CellularComponent,
        Namespace::MolecularFunction,
    ];

    pub(crate) fn index(self) -> usize {
        match self {
            Namespace::BiologicalProcess => 0,
            Namespace::CellularComponent => 1,
            Namespace::MolecularFunction => 2,
        }
    }
}

impl TryFrom<&str> for Namespace {
    type Error = GoError;

    /// Parses an OBO-style namespace name, e.g. `biological_process`
    ///
    /// # Errors
    ///
    /// [`GoError::UnknownNamespace`] if the string does not name a
    /// GO namespace
    fn try_from(s: &str) -> GoResult<Self> {
        match s {
            "biological_process" => Ok(Namespace::BiologicalProcess),
            "cellular_component" => Ok(Namespace::CellularComponent),
            "molecular_function" => Ok(Namespace::MolecularFunction),
            _ => Err(GoError::UnknownNamespace(s.to_string())),
        }
    }
}

impl Display for Namespace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Namespace::BiologicalProcess => "biological_process",
            Namespace::CellularComponent => "cellular_component",
            Namespace::MolecularFunction => "molecular_function",
        };
        write!(f, "{name}")
    }
}

/// Iterates a [`TermGroup`] and yields [`GoTerm`]s
pub struct GoTerms<'a> {
    ids: std::iter::Copied<std::slice::Iter<'a, GoTermId>>,
    ontology: &'a Ontology,
}

impl<'a> GoTerms<'a> {
    pub(crate) fn new(group: &'a TermGroup, ontology: &'a Ontology) -> Self {
        GoTerms {
            ids: group.iter(),
            ontology,
        }
    }
}

impl<'a> Iterator for GoTerms<'a> {
    type Item = GoTerm<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.ids.next().map(|id| {
            self.ontology
                .term(id)
                .expect("all ids in a TermGroup belong to the ontology")
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn namespace_roundtrip() {
        for ns in Namespace::ALL {
            assert_eq!(Namespace::try_from(ns.to_string().as_str()).unwrap(), ns);
        }
        assert!(Namespace::try_from("regulation_of_things").is_err());
    }
}
