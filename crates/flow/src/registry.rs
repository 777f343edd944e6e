//! Ordered, named collection of steps.
//!
//! Iteration order is execution order. Concrete flows start from a generic
//! sequence and surgically replace, add, or drop stages before the run
//! begins, instead of duplicating the whole sequence.

use std::sync::Arc;

use crate::Step;

type Entry<D, O> = (String, Arc<dyn Step<D, O>>);

/// Ordered mapping from step name to step.
///
/// # Semantics
///
/// - `set` with a new name appends at the end
/// - `set` with a known name replaces the step **in place**, keeping its
///   first-seen position
/// - `delete` removes a step if present; deleting an unknown name is a no-op
pub struct StepRegistry<D, O = ()> {
    entries: Vec<Entry<D, O>>,
}

impl<D, O> StepRegistry<D, O> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Inserts or replaces a step.
    ///
    /// Returns the replaced step, if any.
    pub fn set<S>(&mut self, name: impl Into<String>, step: S) -> Option<Arc<dyn Step<D, O>>>
    where
        S: Step<D, O> + 'static,
    {
        self.set_shared(name, Arc::new(step))
    }

    /// Inserts or replaces a step that is already shared.
    pub fn set_shared(
        &mut self,
        name: impl Into<String>,
        step: Arc<dyn Step<D, O>>,
    ) -> Option<Arc<dyn Step<D, O>>> {
        let name = name.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => Some(std::mem::replace(slot, step)),
            None => {
                self.entries.push((name, step));
                None
            }
        }
    }

    /// Removes a step by name. Returns `true` if a step was removed.
    pub fn delete(&mut self, name: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(existing, _)| existing != name);
        self.entries.len() != before
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(existing, _)| existing == name)
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn Step<D, O>>> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, step)| step)
    }

    /// Step names in execution order.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    /// `(name, step)` pairs in execution order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &Arc<dyn Step<D, O>>)> + '_ {
        self.entries.iter().map(|(name, step)| (name.as_str(), step))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Frozen copy of the current order, taken when a run starts.
    pub(crate) fn snapshot(&self) -> Arc<[Entry<D, O>]> {
        self.entries.clone().into()
    }
}

impl<D, O> Default for StepRegistry<D, O> {
    fn default() -> Self {
        Self::new()
    }
}
