// SPDX-License-Identifier: MIT OR Apache-2.0
//! Element references and animation targets.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Element ID in a render tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ElementId(pub Uuid);

impl ElementId {
    /// Create a new random element ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ElementId {
    fn default() -> Self {
        Self::new()
    }
}

/// What a tween or trigger applies to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Target {
    /// Selector such as `.sky`, `#contact` or `.main .text`
    Selector(String),
    /// A single element
    Element(ElementId),
    /// An ordered list of elements
    Elements(Vec<ElementId>),
}

impl Target {
    /// Target elements matching a selector
    pub fn selector(selector: impl Into<String>) -> Self {
        Self::Selector(selector.into())
    }

    /// Target an explicit, ordered list of elements
    pub fn elements(elements: impl IntoIterator<Item = ElementId>) -> Self {
        Self::Elements(elements.into_iter().collect())
    }
}

impl From<ElementId> for Target {
    fn from(id: ElementId) -> Self {
        Self::Element(id)
    }
}

impl From<&str> for Target {
    fn from(selector: &str) -> Self {
        Self::Selector(selector.to_string())
    }
}
