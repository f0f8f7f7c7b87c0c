//! Insertion-ordered storage keyed by employee identifier.

use std::collections::HashMap;

use crate::models::EmployeeId;

/// A map from [`EmployeeId`] that iterates in first-insertion order.
///
/// Overwriting an existing key keeps its original position.
#[derive(Debug, Clone)]
pub struct IdMap<V> {
    entries: HashMap<EmployeeId, V>,
    order: Vec<EmployeeId>,
}

impl<V> Default for IdMap<V> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
            order: Vec::new(),
        }
    }
}

impl<V> IdMap<V> {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or overwrites the value for `id`, returning the previous value.
    pub fn insert(&mut self, id: EmployeeId, value: V) -> Option<V> {
        let previous = self.entries.insert(id, value);
        if previous.is_none() {
            self.order.push(id);
        }
        previous
    }

    /// Returns the value for `id`.
    pub fn get(&self, id: &EmployeeId) -> Option<&V> {
        self.entries.get(id)
    }

    /// Returns true if `id` is present.
    pub fn contains(&self, id: &EmployeeId) -> bool {
        self.entries.contains_key(id)
    }

    /// Removes the value for `id`.
    pub fn remove(&mut self, id: &EmployeeId) -> Option<V> {
        let removed = self.entries.remove(id);
        if removed.is_some() {
            self.order.retain(|existing| existing != id);
        }
        removed
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the map is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates values in insertion order.
    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.order.iter().filter_map(|id| self.entries.get(id))
    }
}
