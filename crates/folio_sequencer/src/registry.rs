// SPDX-License-Identifier: MIT OR Apache-2.0
//! Ordered, de-duplicated set of elements for a one-shot stagger.

use crate::target::{ElementId, Target};
use indexmap::IndexSet;

/// Elements collected during a render pass, in first-registration order
#[derive(Debug, Clone, Default)]
pub struct ElementRegistry {
    elements: IndexSet<ElementId>,
}

impl ElementRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an element. Returns false if it was already registered,
    /// in which case its position is unchanged.
    pub fn add(&mut self, element: ElementId) -> bool {
        self.elements.insert(element)
    }

    /// Check whether an element is registered
    pub fn contains(&self, element: ElementId) -> bool {
        self.elements.contains(&element)
    }

    /// Registered elements in stagger order
    pub fn iter(&self) -> impl Iterator<Item = ElementId> + '_ {
        self.elements.iter().copied()
    }

    /// Number of registered elements
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Check whether nothing is registered
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// All registered elements as one ordered target
    pub fn as_target(&self) -> Target {
        Target::elements(self.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reregistration_keeps_order() {
        let (x, y, z) = (ElementId::new(), ElementId::new(), ElementId::new());
        let mut registry = ElementRegistry::new();

        assert!(registry.add(x));
        assert!(registry.add(y));
        assert!(registry.add(z));
        assert!(!registry.add(x));

        assert_eq!(registry.iter().collect::<Vec<_>>(), vec![x, y, z]);
        assert_eq!(registry.as_target(), Target::Elements(vec![x, y, z]));
        assert_eq!(registry.len(), 3);
    }
}
