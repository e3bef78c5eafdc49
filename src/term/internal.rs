use crate::term::{Namespace, TermChildren, TermGroup, TermParents};
use crate::GoTermId;
use crate::DEFAULT_NUM_ALL_ANCESTORS;
use crate::DEFAULT_NUM_PARENTS;

/// Ontology-internal representation of a single GO term
///
/// The `all_ancestors` group is the reflexive transitive closure over the
/// parent relation and is filled in by `Ontology::create_cache`. A cached
/// group always contains the term itself, so an empty group marks a term
/// whose closure has not been computed yet.
#[derive(Debug)]
pub(crate) struct GoTermInternal {
    id: GoTermId,
    name: String,
    namespace: Namespace,
    parents: TermParents,
    children: TermChildren,
    all_ancestors: TermGroup,
    depth: Option<u32>,
}

impl GoTermInternal {
    pub fn new(name: String, id: GoTermId, namespace: Namespace) -> GoTermInternal {
        GoTermInternal {
            id,
            name,
            namespace,
            parents: TermGroup::with_capacity(DEFAULT_NUM_PARENTS),
            children: TermGroup::with_capacity(DEFAULT_NUM_PARENTS),
            all_ancestors: TermGroup::with_capacity(DEFAULT_NUM_ALL_ANCESTORS),
            depth: None,
        }
    }

    pub fn id(&self) -> GoTermId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn namespace(&self) -> Namespace {
        self.namespace
    }

    pub fn parents(&self) -> &TermParents {
        &self.parents
    }

    pub fn children(&self) -> &TermChildren {
        &self.children
    }

    pub fn all_ancestors(&self) -> &TermGroup {
        &self.all_ancestors
    }

    pub fn all_ancestors_mut(&mut self) -> &mut TermGroup {
        &mut self.all_ancestors
    }

    pub fn ancestors_cached(&self) -> bool {
        !self.all_ancestors.is_empty()
    }

    pub fn depth(&self) -> Option<u32> {
        self.depth
    }

    pub fn set_depth(&mut self, depth: u32) {
        self.depth = Some(depth);
    }

    pub fn add_parent(&mut self, parent_id: GoTermId) {
        self.parents.insert(parent_id);
    }

    pub fn add_child(&mut self, child_id: GoTermId) {
        self.children.insert(child_id);
    }
}

impl PartialEq for GoTermInternal {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for GoTermInternal {}
