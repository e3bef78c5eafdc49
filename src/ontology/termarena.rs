use std::collections::hash_map::Values;
use std::collections::HashMap;

use crate::term::internal::GoTermInternal;
use crate::GoTermId;
use crate::DEFAULT_NUM_TERMS;

/// Storage of all terms, indexed by [`GoTermId`]
pub(crate) struct Arena {
    terms: HashMap<GoTermId, GoTermInternal>,
}

impl Arena {
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn insert(&mut self, term: GoTermInternal) {
        let id = term.id();
        self.terms.insert(id, term);
    }

    pub fn get(&self, id: GoTermId) -> Option<&GoTermInternal> {
        self.terms.get(&id)
    }

    pub fn get_unchecked(&self, id: GoTermId) -> &GoTermInternal {
        self.terms
            .get(&id)
            .expect("the id belongs to the ontology")
    }

    pub fn get_mut(&mut self, id: GoTermId) -> Option<&mut GoTermInternal> {
        self.terms.get_mut(&id)
    }

    pub fn get_unchecked_mut(&mut self, id: GoTermId) -> &mut GoTermInternal {
        self.terms
            .get_mut(&id)
            .expect("the id belongs to the ontology")
    }

    pub fn values(&self) -> Values<'_, GoTermId, GoTermInternal> {
        self.terms.values()
    }

    pub fn keys(&self) -> Vec<GoTermId> {
        self.terms.keys().copied().collect()
    }
}

impl Default for Arena {
    fn default() -> Self {
        Self {
            terms: HashMap::with_capacity(DEFAULT_NUM_TERMS),
        }
    }
}
