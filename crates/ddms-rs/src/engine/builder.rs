// crates/ddms-rs/src/engine/builder.rs

//! Mutable counterparts of components.

use super::component::Component;
use crate::error::ValidationError;
use crate::version::DdmsVersion;
use log::debug;
use std::fmt::Debug;

/// Assembles partial data for one component type.
///
/// Every field of a builder is optional. Singular child builders are plain
/// fields that start out empty; repeatable ones live in a [`BuilderList`].
pub trait Builder: Default + Clone + Debug {
    type Target: Component;

    /// True when no scalar is set and every child builder is empty.
    fn is_empty(&self) -> bool;

    /// Validates the assembled data under `version`.
    ///
    /// Returns `Ok(None)` for an empty builder. Empty entries in child lists are
    /// dropped before the component's value-path constructor runs; its failure
    /// is returned unchanged.
    fn commit(&self, version: DdmsVersion) -> Result<Option<Self::Target>, ValidationError>;
}

/// An ordered list of child builders that grows on indexed access.
#[derive(Debug, Clone, PartialEq)]
pub struct BuilderList<B> {
    items: Vec<B>,
}

impl<B> Default for BuilderList<B> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<B: Default> BuilderList<B> {
    pub fn new() -> Self {
        Self::default()
    }

    /// The builder at `index`, extending the list with defaults as needed.
    pub fn slot(&mut self, index: usize) -> &mut B {
        if self.items.len() <= index {
            self.items.resize_with(index + 1, B::default);
        }
        &mut self.items[index]
    }

    pub fn push(&mut self, builder: B) -> &mut B {
        self.items.push(builder);
        let last = self.items.len() - 1;
        &mut self.items[last]
    }

    pub fn get(&self, index: usize) -> Option<&B> {
        self.items.get(index)
    }

    /// Number of slots, empty ones included.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, B> {
        self.items.iter()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Builds a list from existing components.
    pub fn of<'a, C: 'a>(components: impl IntoIterator<Item = &'a C>) -> Self
    where
        B: From<&'a C>,
    {
        components.into_iter().map(B::from).collect()
    }
}

impl<B: Builder> BuilderList<B> {
    /// True when every slot is empty.
    pub fn is_empty(&self) -> bool {
        self.items.iter().all(Builder::is_empty)
    }

    /// Commits every non-empty slot in order.
    pub fn commit_all(&self, version: DdmsVersion) -> Result<Vec<B::Target>, ValidationError> {
        let mut components = Vec::with_capacity(self.items.len());
        for builder in &self.items {
            if let Some(component) = builder.commit(version)? {
                components.push(component);
            }
        }
        let skipped = self.items.len() - components.len();
        if skipped > 0 {
            debug!(
                "Skipped {} empty {} entries",
                skipped,
                std::any::type_name::<B>()
            );
        }
        Ok(components)
    }
}

impl<B> FromIterator<B> for BuilderList<B> {
    fn from_iter<I: IntoIterator<Item = B>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl<B> From<Vec<B>> for BuilderList<B> {
    fn from(items: Vec<B>) -> Self {
        Self { items }
    }
}

/// A coordinate slot. Unset slots are dropped on commit.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DoubleBuilder {
    pub value: Option<f64>,
}

impl DoubleBuilder {
    pub fn new(value: f64) -> Self {
        Self { value: Some(value) }
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_none()
    }
}

impl From<f64> for DoubleBuilder {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_extends_with_defaults() {
        let mut list: BuilderList<DoubleBuilder> = BuilderList::new();
        list.slot(2).value = Some(4.5);
        assert_eq!(list.len(), 3);
        assert!(list.get(0).is_some_and(DoubleBuilder::is_empty));
        assert_eq!(list.get(2).and_then(|d| d.value), Some(4.5));

        // Indexing within range does not grow the list.
        list.slot(1).value = Some(1.0);
        assert_eq!(list.len(), 3);
    }

    #[test]
    fn test_push_and_clear() {
        let mut list: BuilderList<DoubleBuilder> = vec![DoubleBuilder::new(1.0)].into();
        list.push(DoubleBuilder::default()).value = Some(2.0);
        let values: Vec<Option<f64>> = list.iter().map(|d| d.value).collect();
        assert_eq!(values, vec![Some(1.0), Some(2.0)]);
        list.clear();
        assert_eq!(list.len(), 0);
    }
}
