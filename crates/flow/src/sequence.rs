//! Append-only result sequences.

use serde::{Deserialize, Serialize};

/// A sequence that only ever grows.
///
/// Roll, hit, and damage results are appended by the steps that produce them
/// and are never removed for the rest of the run, so the type offers no way
/// to remove or reorder entries.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AppendOnly<T>(Vec<T>);

impl<T> AppendOnly<T> {
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    #[inline]
    pub fn push(&mut self, value: T) {
        self.0.push(value);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.0.get(index)
    }

    pub fn last(&self) -> Option<&T> {
        self.0.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.0
    }
}

impl<T> Default for AppendOnly<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Extend<T> for AppendOnly<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl<T> From<Vec<T>> for AppendOnly<T> {
    fn from(values: Vec<T>) -> Self {
        Self(values)
    }
}

impl<'a, T> IntoIterator for &'a AppendOnly<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grows_in_insertion_order() {
        let mut seq = AppendOnly::new();
        seq.push(1);
        seq.extend([2, 3]);

        assert_eq!(seq.as_slice(), &[1, 2, 3]);
        assert_eq!(seq.last(), Some(&3));
    }

    #[test]
    fn empty_sequence_has_no_entries() {
        let seq: AppendOnly<u8> = AppendOnly::default();

        assert!(seq.is_empty());
        assert_eq!(seq.get(0), None);
        assert_eq!(seq.iter().count(), 0);
    }
}
