use super::*;
use std::collections::HashMap;

/// Two-way mapping between string identifiers and dense numeric IDs.
///
/// IDs are assigned in first-seen order and are never re-assigned, so
/// the translation of a given string is stable for the whole lifetime
/// of the graph that owns the vocabulary.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Vocabulary<IndexT: ToFromUsize> {
    pub(crate) map: HashMap<String, IndexT>,
    pub(crate) reverse_map: Vec<String>,
}

impl<IndexT: ToFromUsize> Vocabulary<IndexT> {
    pub fn new() -> Vocabulary<IndexT> {
        Vocabulary {
            map: HashMap::new(),
            reverse_map: Vec::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Vocabulary<IndexT> {
        Vocabulary {
            map: HashMap::with_capacity(capacity),
            reverse_map: Vec::with_capacity(capacity),
        }
    }

    /// Insert the given name if not already present and return its ID.
    ///
    /// # Arguments
    ///
    /// * `name`: String - The name to be inserted.
    pub fn insert<S: Into<String>>(&mut self, name: S) -> Result<IndexT> {
        let name = name.into();
        if name.is_empty() {
            return Err("The given name is empty. Names cannot be empty.".to_owned());
        }
        if let Some(id) = self.map.get(&name) {
            return Ok(*id);
        }
        if self.map.len() == IndexT::to_usize(IndexT::get_max()) {
            return Err(format!(
                "The vocabulary reached its maximum capacity of {} terms.",
                IndexT::get_max()
            ));
        }
        let id = IndexT::from_usize(self.map.len());
        self.map.insert(name.clone(), id);
        self.reverse_map.push(name);
        Ok(id)
    }

    /// Return the ID of the given name, if present.
    pub fn get(&self, name: &str) -> Option<&IndexT> {
        self.map.get(name)
    }

    /// Translate the given ID back to its name.
    ///
    /// # Arguments
    ///
    /// * `id`: IndexT - The ID to be translated, panics if out of range.
    pub fn translate(&self, id: IndexT) -> &str {
        &self.reverse_map[IndexT::to_usize(id)]
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.map.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

/// Vocabulary paired with the per-element IDs it describes.
///
/// Used for the edge type and node type assignments: `ids[i]` is the
/// type of the i-th edge (or node) and `vocabulary` translates the
/// numeric types back to their original string tags.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct VocabularyVec<IndexT: ToFromUsize> {
    pub ids: Vec<IndexT>,
    pub vocabulary: Vocabulary<IndexT>,
}

impl<IndexT: ToFromUsize> VocabularyVec<IndexT> {
    pub fn new() -> VocabularyVec<IndexT> {
        VocabularyVec {
            ids: Vec::new(),
            vocabulary: Vocabulary::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vocabulary.is_empty()
    }

    pub fn translate(&self, id: IndexT) -> &str {
        self.vocabulary.translate(id)
    }
}
