// SPDX-License-Identifier: MIT OR Apache-2.0
//! Render tree abstraction and an in-memory scene.
//!
//! The driver and sequencers only see [`RenderTree`]. [`Scene`] is a
//! headless element tree with selector lookup, used by the page session
//! and by tests.

use crate::target::{ElementId, Target};
use crate::value::{Property, Value};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Element rectangle in document coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Bounds {
    /// Left edge
    pub x: f32,
    /// Top edge
    pub y: f32,
    /// Width
    pub width: f32,
    /// Height
    pub height: f32,
}

impl Bounds {
    /// Create bounds
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }
}

/// What the animation driver needs from the thing it animates
pub trait RenderTree {
    /// Resolve a target to the live elements it names, in document order.
    /// Missing elements are skipped.
    fn resolve(&self, target: &Target) -> Vec<ElementId>;

    /// Current value of a property, `None` if the element is gone
    fn value(&self, element: ElementId, property: Property) -> Option<Value>;

    /// Write a property; ignored if the element is gone
    fn set_value(&mut self, element: ElementId, property: Property, value: Value);

    /// Layout bounds of an element
    fn bounds(&self, element: ElementId) -> Option<Bounds>;

    /// Remove the targeted elements and their descendants, returning how many
    /// elements were removed
    fn remove(&mut self, target: &Target) -> usize;
}

/// A node in the scene
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Element {
    /// Unique element ID
    pub id: ElementId,
    /// Tag name (`div`, `img`, ...)
    pub tag: String,
    /// Class list
    pub classes: Vec<String>,
    /// Document-level ID
    pub dom_id: Option<String>,
    /// Parent element
    pub parent: Option<ElementId>,
    /// Attributes such as `src` or `title`
    pub attributes: IndexMap<String, String>,
    /// Text content
    pub text: Option<String>,
    /// Animated property values
    pub values: IndexMap<Property, Value>,
    /// Layout bounds
    pub bounds: Option<Bounds>,
}

impl Element {
    /// Create an element with a tag
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            id: ElementId::new(),
            tag: tag.into(),
            classes: Vec::new(),
            dom_id: None,
            parent: None,
            attributes: IndexMap::new(),
            text: None,
            values: IndexMap::new(),
            bounds: None,
        }
    }

    /// Add whitespace-separated classes
    pub fn with_class(mut self, classes: &str) -> Self {
        self.classes
            .extend(classes.split_whitespace().map(str::to_string));
        self
    }

    /// Set the document ID
    pub fn with_dom_id(mut self, dom_id: impl Into<String>) -> Self {
        self.dom_id = Some(dom_id.into());
        self
    }

    /// Nest under a parent
    pub fn child_of(mut self, parent: ElementId) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Set an attribute
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Set text content
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Set an initial property value
    pub fn with_value(mut self, property: Property, value: Value) -> Self {
        self.values.insert(property, value);
        self
    }

    /// Set layout bounds
    pub fn with_bounds(mut self, bounds: Bounds) -> Self {
        self.bounds = Some(bounds);
        self
    }

    /// Check whether the element carries a class
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }
}

/// One compound selector such as `img.sky` or `#contact`
#[derive(Debug, Default)]
struct SimpleSelector<'a> {
    tag: Option<&'a str>,
    dom_id: Option<&'a str>,
    classes: Vec<&'a str>,
}

impl<'a> SimpleSelector<'a> {
    fn parse(part: &'a str) -> Self {
        let mut selector = SimpleSelector::default();
        let mut rest = part;

        // Leading tag name
        let tag_end = rest.find(['.', '#']).unwrap_or(rest.len());
        if tag_end > 0 {
            selector.tag = Some(&rest[..tag_end]);
        }
        rest = &rest[tag_end..];

        while let Some(marker) = rest.chars().next() {
            let body = &rest[1..];
            let end = body.find(['.', '#']).unwrap_or(body.len());
            let name = &body[..end];
            if marker == '.' {
                selector.classes.push(name);
            } else {
                selector.dom_id = Some(name);
            }
            rest = &body[end..];
        }

        selector
    }

    fn matches(&self, element: &Element) -> bool {
        self.tag.map_or(true, |tag| element.tag == tag)
            && self
                .dom_id
                .map_or(true, |id| element.dom_id.as_deref() == Some(id))
            && self.classes.iter().all(|class| element.has_class(class))
    }
}

/// In-memory element tree
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scene {
    /// Elements in document order
    elements: IndexMap<ElementId, Element>,
}

impl Scene {
    /// Create an empty scene
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an element, returning its ID
    pub fn add(&mut self, element: Element) -> ElementId {
        let id = element.id;
        self.elements.insert(id, element);
        id
    }

    /// Get an element
    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(&id)
    }

    /// Get a mutable element
    pub fn element_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.elements.get_mut(&id)
    }

    /// Check whether an element is mounted
    pub fn contains(&self, id: ElementId) -> bool {
        self.elements.contains_key(&id)
    }

    /// All elements in document order
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.elements.values()
    }

    /// Element count
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Check whether the scene has no elements
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Elements matching a selector, in document order.
    ///
    /// Supports tag, `.class` and `#id` compounds joined by descendant
    /// combinators (whitespace).
    pub fn query(&self, selector: &str) -> Vec<ElementId> {
        let parts: Vec<SimpleSelector<'_>> =
            selector.split_whitespace().map(SimpleSelector::parse).collect();
        let Some((last, ancestors)) = parts.split_last() else {
            return Vec::new();
        };

        self.elements
            .values()
            .filter(|element| last.matches(element) && self.has_ancestors(element, ancestors))
            .map(|element| element.id)
            .collect()
    }

    /// First element matching a selector
    pub fn query_one(&self, selector: &str) -> Option<ElementId> {
        self.query(selector).into_iter().next()
    }

    /// Check that `ancestors` match, innermost last, along the parent chain
    fn has_ancestors(&self, element: &Element, ancestors: &[SimpleSelector<'_>]) -> bool {
        let mut remaining = ancestors;
        let mut current = element.parent.and_then(|p| self.elements.get(&p));
        while let Some((innermost, rest)) = remaining.split_last() {
            let Some(node) = current else {
                return false;
            };
            if innermost.matches(node) {
                remaining = rest;
            }
            current = node.parent.and_then(|p| self.elements.get(&p));
        }
        true
    }

    fn is_descendant_of(&self, id: ElementId, ancestor: ElementId) -> bool {
        let mut current = self.elements.get(&id).and_then(|e| e.parent);
        while let Some(parent) = current {
            if parent == ancestor {
                return true;
            }
            current = self.elements.get(&parent).and_then(|e| e.parent);
        }
        false
    }
}

impl RenderTree for Scene {
    fn resolve(&self, target: &Target) -> Vec<ElementId> {
        match target {
            Target::Selector(selector) => self.query(selector),
            Target::Element(id) => {
                if self.contains(*id) {
                    vec![*id]
                } else {
                    Vec::new()
                }
            }
            Target::Elements(ids) => ids.iter().copied().filter(|id| self.contains(*id)).collect(),
        }
    }

    fn value(&self, element: ElementId, property: Property) -> Option<Value> {
        let element = self.elements.get(&element)?;
        Some(
            element
                .values
                .get(&property)
                .copied()
                .unwrap_or_else(|| property.neutral()),
        )
    }

    fn set_value(&mut self, element: ElementId, property: Property, value: Value) {
        if let Some(element) = self.elements.get_mut(&element) {
            element.values.insert(property, value);
        }
    }

    fn bounds(&self, element: ElementId) -> Option<Bounds> {
        self.elements.get(&element)?.bounds
    }

    fn remove(&mut self, target: &Target) -> usize {
        let roots = self.resolve(target);
        if roots.is_empty() {
            return 0;
        }

        let doomed: Vec<ElementId> = self
            .elements
            .keys()
            .copied()
            .filter(|id| roots.contains(id) || roots.iter().any(|r| self.is_descendant_of(*id, *r)))
            .collect();
        for id in &doomed {
            self.elements.shift_remove(id);
        }
        doomed.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn landing() -> (Scene, ElementId, ElementId, ElementId) {
        let mut scene = Scene::new();
        let main = scene.add(Element::new("div").with_class("main w-full"));
        let text = scene.add(Element::new("div").with_class("text").child_of(main));
        let stray = scene.add(Element::new("div").with_class("text"));
        (scene, main, text, stray)
    }

    #[test]
    fn test_class_and_descendant_queries() {
        let (scene, main, text, stray) = landing();
        assert_eq!(scene.query(".main"), vec![main]);
        assert_eq!(scene.query(".text"), vec![text, stray]);
        assert_eq!(scene.query(".main .text"), vec![text]);
        assert_eq!(scene.query("div.main"), vec![main]);
        assert!(scene.query(".missing").is_empty());
        assert!(scene.query("   ").is_empty());
    }

    #[test]
    fn test_dom_id_query() {
        let mut scene = Scene::new();
        let contact = scene.add(Element::new("section").with_dom_id("contact"));
        assert_eq!(scene.query_one("#contact"), Some(contact));
    }

    #[test]
    fn test_values_default_to_neutral() {
        let (mut scene, main, _, _) = landing();
        assert_eq!(scene.value(main, Property::Scale), Some(Value::number(1.0)));
        scene.set_value(main, Property::Scale, Value::number(1.7));
        assert_eq!(scene.value(main, Property::Scale), Some(Value::number(1.7)));
    }

    #[test]
    fn test_remove_takes_descendants() {
        let (mut scene, main, text, stray) = landing();
        assert_eq!(scene.remove(&Target::selector(".main")), 2);
        assert!(!scene.contains(main));
        assert!(!scene.contains(text));
        assert!(scene.contains(stray));
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let (mut scene, ..) = landing();
        assert_eq!(scene.remove(&Target::selector(".svg")), 0);
        assert_eq!(scene.remove(&Target::Element(ElementId::new())), 0);
        assert_eq!(scene.len(), 3);
    }

    #[test]
    fn test_resolve_skips_unmounted_elements() {
        let (scene, main, _, _) = landing();
        let ghost = ElementId::new();
        assert_eq!(scene.resolve(&Target::elements([ghost, main])), vec![main]);
        assert!(scene.value(ghost, Property::Opacity).is_none());
    }
}
