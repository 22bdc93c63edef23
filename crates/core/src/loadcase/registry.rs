//! Ordered registry of load case specs

use std::collections::HashMap;

use super::{LoadCaseId, LoadCaseSpec};
use crate::error::{Error, Result};

/// Insertion-ordered mapping from [`LoadCaseId`] to [`LoadCaseSpec`].
#[derive(Debug, Clone, Default)]
pub struct LoadCaseRegistry {
    specs: Vec<LoadCaseSpec>,
    index: HashMap<LoadCaseId, usize>,
}

impl LoadCaseRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a spec. Ids must be unique.
    pub fn insert(&mut self, spec: LoadCaseSpec) -> Result<()> {
        if self.index.contains_key(spec.id()) {
            return Err(Error::DuplicateLoadCase(spec.id().to_string()));
        }
        self.index.insert(spec.id().clone(), self.specs.len());
        self.specs.push(spec);
        Ok(())
    }

    pub fn get(&self, id: &LoadCaseId) -> Option<&LoadCaseSpec> {
        self.index.get(id).map(|&i| &self.specs[i])
    }

    pub fn contains(&self, id: &LoadCaseId) -> bool {
        self.index.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    /// Specs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &LoadCaseSpec> {
        self.specs.iter()
    }
}

impl<'a> IntoIterator for &'a LoadCaseRegistry {
    type Item = &'a LoadCaseSpec;
    type IntoIter = std::slice::Iter<'a, LoadCaseSpec>;

    fn into_iter(self) -> Self::IntoIter {
        self.specs.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loadcase::{Dimension, Scheme};

    fn spec(id: u32) -> LoadCaseSpec {
        LoadCaseSpec::new(id, format!("LC {id}"), Dimension::TwoD, Scheme::Linear)
    }

    #[test]
    fn test_preserves_insertion_order() {
        let mut reg = LoadCaseRegistry::new();
        for id in [125, 126, 127, 124] {
            reg.insert(spec(id)).unwrap();
        }
        let ids: Vec<&str> = reg.iter().map(|s| s.id().as_str()).collect();
        assert_eq!(ids, vec!["125", "126", "127", "124"]);
        assert_eq!(reg.len(), 4);
    }

    #[test]
    fn test_rejects_duplicate_id() {
        let mut reg = LoadCaseRegistry::new();
        reg.insert(spec(1)).unwrap();
        let err = reg.insert(spec(1)).unwrap_err();
        assert!(matches!(err, Error::DuplicateLoadCase(ref id) if id == "1"));
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn test_lookup() {
        let mut reg = LoadCaseRegistry::new();
        reg.insert(spec(7)).unwrap();
        assert!(reg.contains(&LoadCaseId::from(7u32)));
        assert_eq!(reg.get(&LoadCaseId::from("7")).unwrap().title(), "LC 7");
        assert!(reg.get(&LoadCaseId::from(8u32)).is_none());
    }
}
