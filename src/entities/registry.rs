// 🗂️ Registry - id-keyed in-memory collection
//
// Records keep the order in which their id was first seen, so reports come
// out in input order. Lookups go through an id → slot index.

use std::collections::HashMap;

use super::RecordId;

#[derive(Debug, Clone)]
pub struct Registry<T> {
    records: Vec<(RecordId, T)>,
    index: HashMap<RecordId, usize>,
}

impl<T> Registry<T> {
    pub fn new() -> Self {
        Registry {
            records: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Insert a record under `id`.
    ///
    /// An existing id keeps its slot and the previous record is returned.
    pub fn insert(&mut self, id: RecordId, record: T) -> Option<T> {
        match self.index.get(&id) {
            Some(&slot) => Some(std::mem::replace(&mut self.records[slot].1, record)),
            None => {
                self.index.insert(id, self.records.len());
                self.records.push((id, record));
                None
            }
        }
    }

    pub fn get(&self, id: RecordId) -> Option<&T> {
        self.index.get(&id).map(|&slot| &self.records[slot].1)
    }

    pub fn get_mut(&mut self, id: RecordId) -> Option<&mut T> {
        match self.index.get(&id) {
            Some(&slot) => Some(&mut self.records[slot].1),
            None => None,
        }
    }

    pub fn contains(&self, id: RecordId) -> bool {
        self.index.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = RecordId> + '_ {
        self.records.iter().map(|(id, _)| *id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (RecordId, &T)> {
        self.records.iter().map(|(id, record)| (*id, record))
    }

    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.records.iter().map(|(_, record)| record)
    }

    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.records.iter_mut().map(|(_, record)| record)
    }
}

impl<T> Default for Registry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<(RecordId, T)> for Registry<T> {
    fn from_iter<I: IntoIterator<Item = (RecordId, T)>>(iter: I) -> Self {
        let mut registry = Registry::new();
        for (id, record) in iter {
            registry.insert(id, record);
        }
        registry
    }
}
