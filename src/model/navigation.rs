//! Cursor over an ordered collection with wraparound stepping

use crate::error::ArchiveError;

/// A collection plus the index currently selected in it.
///
/// The index is always in range while the collection is non-empty and is
/// parked (`None`) while it is empty.
#[derive(Clone, Debug, PartialEq)]
pub struct NavigationState<T> {
    collection: Vec<T>,
    index: Option<usize>,
}

impl<T> Default for NavigationState<T> {
    fn default() -> Self {
        Self {
            collection: Vec::new(),
            index: None,
        }
    }
}

impl<T> NavigationState<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the collection and select `index`, wrapped into range
    pub fn seek(&mut self, collection: Vec<T>, index: isize) {
        self.index = wrap(index, collection.len());
        self.collection = collection;
    }

    /// Select `index` in the current collection, wrapped into range
    pub fn seek_index(&mut self, index: isize) -> Result<usize, ArchiveError> {
        let new_index = wrap(index, self.collection.len()).ok_or(ArchiveError::EmptyCollection)?;
        self.index = Some(new_index);
        Ok(new_index)
    }

    pub fn next(&mut self) -> Result<usize, ArchiveError> {
        self.step(1)
    }

    pub fn prev(&mut self) -> Result<usize, ArchiveError> {
        self.step(-1)
    }

    fn step(&mut self, delta: isize) -> Result<usize, ArchiveError> {
        let current = self.index.ok_or(ArchiveError::EmptyCollection)?;
        self.seek_index(current as isize + delta)
    }

    pub fn current(&self) -> Result<&T, ArchiveError> {
        self.index
            .and_then(|i| self.collection.get(i))
            .ok_or(ArchiveError::NotFound)
    }

    pub fn index(&self) -> Option<usize> {
        self.index
    }

    pub fn collection(&self) -> &[T] {
        &self.collection
    }

    pub fn len(&self) -> usize {
        self.collection.len()
    }

    pub fn is_empty(&self) -> bool {
        self.collection.is_empty()
    }
}

fn wrap(index: isize, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let n = len as isize;
    Some((((index % n) + n) % n) as usize)
}
