// SPDX-License-Identifier: MIT OR Apache-2.0
//! Scroll-position triggers.

use crate::scene::{Bounds, RenderTree};
use crate::target::{ElementId, Target};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Visible window onto the document
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Width in pixels
    pub width: f32,
    /// Height in pixels
    pub height: f32,
    /// Vertical scroll offset in pixels
    pub scroll_y: f32,
}

impl Viewport {
    /// Create a viewport scrolled to the top
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            scroll_y: 0.0,
        }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1280.0, 720.0)
    }
}

/// A point along an element's or the viewport's height
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Anchor {
    /// Top edge
    Top,
    /// Vertical center
    Center,
    /// Bottom edge
    Bottom,
    /// Percent of the height from the top
    Percent(f32),
    /// Pixels from the top
    Px(f32),
}

impl Anchor {
    /// Offset from the top edge for a box of `size` pixels
    pub fn offset(&self, size: f32) -> f32 {
        match self {
            Anchor::Top => 0.0,
            Anchor::Center => size * 0.5,
            Anchor::Bottom => size,
            Anchor::Percent(p) => size * p / 100.0,
            Anchor::Px(px) => *px,
        }
    }
}

impl FromStr for Anchor {
    type Err = ScrollPositionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ScrollPositionParseError(s.to_string());
        match s {
            "top" => Ok(Anchor::Top),
            "center" => Ok(Anchor::Center),
            "bottom" => Ok(Anchor::Bottom),
            _ => {
                if let Some(p) = s.strip_suffix('%') {
                    p.parse().map(Anchor::Percent).map_err(|_| invalid())
                } else {
                    let px = s.strip_suffix("px").unwrap_or(s);
                    px.parse().map(Anchor::Px).map_err(|_| invalid())
                }
            }
        }
    }
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Anchor::Top => write!(f, "top"),
            Anchor::Center => write!(f, "center"),
            Anchor::Bottom => write!(f, "bottom"),
            Anchor::Percent(p) => write!(f, "{p}%"),
            Anchor::Px(px) => write!(f, "{px}px"),
        }
    }
}

/// Error parsing a scroll position
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Invalid scroll position: {0}")]
pub struct ScrollPositionParseError(pub String);

/// "When this point of the element meets that point of the viewport"
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ScrollPosition {
    /// Point on the trigger element
    pub element: Anchor,
    /// Point on the viewport
    pub viewport: Anchor,
}

impl ScrollPosition {
    /// Create a position
    pub fn new(element: Anchor, viewport: Anchor) -> Self {
        Self { element, viewport }
    }

    /// Scroll offset at which the two anchors line up
    pub fn scroll_offset(&self, bounds: &Bounds, viewport_height: f32) -> f32 {
        bounds.y + self.element.offset(bounds.height) - self.viewport.offset(viewport_height)
    }
}

impl FromStr for ScrollPosition {
    type Err = ScrollPositionParseError;

    /// Parses `"<element anchor> <viewport anchor>"`, e.g. `"top center"`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        let (Some(element), Some(viewport), None) = (parts.next(), parts.next(), parts.next())
        else {
            return Err(ScrollPositionParseError(s.to_string()));
        };
        Ok(Self::new(element.parse()?, viewport.parse()?))
    }
}

impl TryFrom<String> for ScrollPosition {
    type Error = ScrollPositionParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ScrollPosition> for String {
    fn from(position: ScrollPosition) -> Self {
        position.to_string()
    }
}

impl fmt::Display for ScrollPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.element, self.viewport)
    }
}

/// Unique identifier for a registered trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TriggerId(pub Uuid);

impl TriggerId {
    /// Create a new random trigger ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for TriggerId {
    fn default() -> Self {
        Self::new()
    }
}

/// A viewport-intersection condition on one element
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollTrigger {
    /// Element whose position is watched
    pub trigger: Target,
    /// Where the active region begins
    pub start: ScrollPosition,
    /// Where the active region ends
    pub end: ScrollPosition,
}

impl ScrollTrigger {
    /// Watch `trigger` with the default `top bottom` / `bottom top` region
    pub fn new(trigger: impl Into<Target>) -> Self {
        Self {
            trigger: trigger.into(),
            start: ScrollPosition::new(Anchor::Top, Anchor::Bottom),
            end: ScrollPosition::new(Anchor::Bottom, Anchor::Top),
        }
    }

    /// Set the start position
    pub fn start(mut self, start: ScrollPosition) -> Self {
        self.start = start;
        self
    }

    /// Set the end position
    pub fn end(mut self, end: ScrollPosition) -> Self {
        self.end = end;
        self
    }
}

/// Crossing reported by a trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollEdge {
    /// Scrolled forward past the start
    Enter,
    /// Scrolled forward past the end
    Leave,
    /// Scrolled backward past the end
    EnterBack,
    /// Scrolled backward past the start
    LeaveBack,
}

/// Which side of the active region the scroll offset is on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Zone {
    Before,
    Inside,
    After,
}

/// Live trigger state held by the driver
#[derive(Debug, Clone)]
pub(crate) struct TriggerState {
    pub(crate) id: TriggerId,
    element: Option<ElementId>,
    spec: ScrollTrigger,
    zone: Zone,
}

impl TriggerState {
    pub(crate) fn new<T: RenderTree + ?Sized>(tree: &T, spec: ScrollTrigger) -> Self {
        let element = tree.resolve(&spec.trigger).into_iter().next();
        Self {
            id: TriggerId::new(),
            element,
            spec,
            zone: Zone::Before,
        }
    }

    /// Re-evaluate against the viewport and return the crossings, in order
    pub(crate) fn update<T: RenderTree + ?Sized>(
        &mut self,
        tree: &T,
        viewport: &Viewport,
    ) -> Vec<ScrollEdge> {
        let Some(bounds) = self.element.and_then(|e| tree.bounds(e)) else {
            return Vec::new();
        };

        let start = self.spec.start.scroll_offset(&bounds, viewport.height);
        let end = self.spec.end.scroll_offset(&bounds, viewport.height);
        let zone = if viewport.scroll_y < start {
            Zone::Before
        } else if viewport.scroll_y <= end {
            Zone::Inside
        } else {
            Zone::After
        };

        let edges = match (self.zone, zone) {
            (Zone::Before, Zone::Inside) => vec![ScrollEdge::Enter],
            (Zone::Before, Zone::After) => vec![ScrollEdge::Enter, ScrollEdge::Leave],
            (Zone::Inside, Zone::After) => vec![ScrollEdge::Leave],
            (Zone::After, Zone::Inside) => vec![ScrollEdge::EnterBack],
            (Zone::After, Zone::Before) => vec![ScrollEdge::EnterBack, ScrollEdge::LeaveBack],
            (Zone::Inside, Zone::Before) => vec![ScrollEdge::LeaveBack],
            _ => Vec::new(),
        };
        self.zone = zone;
        edges
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{Element, Scene};

    fn about_section(viewport: &Viewport) -> Scene {
        let mut scene = Scene::new();
        scene.add(
            Element::new("div")
                .with_class("about")
                .with_bounds(Bounds::new(0.0, viewport.height, viewport.width, viewport.height)),
        );
        scene
    }

    #[test]
    fn test_position_parsing() {
        let position: ScrollPosition = "top center".parse().unwrap();
        assert_eq!(position, ScrollPosition::new(Anchor::Top, Anchor::Center));
        let position: ScrollPosition = "top 80%".parse().unwrap();
        assert_eq!(position.viewport, Anchor::Percent(80.0));
        assert!("top".parse::<ScrollPosition>().is_err());
        assert!("top middle".parse::<ScrollPosition>().is_err());
        assert!("top center extra".parse::<ScrollPosition>().is_err());
        assert_eq!(position.to_string(), "top 80%");
    }

    #[test]
    fn test_top_center_offset() {
        let bounds = Bounds::new(0.0, 720.0, 1280.0, 720.0);
        let position = ScrollPosition::new(Anchor::Top, Anchor::Center);
        assert_eq!(position.scroll_offset(&bounds, 720.0), 360.0);
    }

    #[test]
    fn test_edges_follow_scroll_direction() {
        let mut viewport = Viewport::new(1280.0, 720.0);
        let scene = about_section(&viewport);
        let spec = ScrollTrigger::new(".about").start("top center".parse().unwrap());
        let mut state = TriggerState::new(&scene, spec);

        assert!(state.update(&scene, &viewport).is_empty());

        viewport.scroll_y = 400.0;
        assert_eq!(state.update(&scene, &viewport), vec![ScrollEdge::Enter]);
        assert!(state.update(&scene, &viewport).is_empty());

        // end = bottom top = 1440
        viewport.scroll_y = 1500.0;
        assert_eq!(state.update(&scene, &viewport), vec![ScrollEdge::Leave]);

        viewport.scroll_y = 1000.0;
        assert_eq!(state.update(&scene, &viewport), vec![ScrollEdge::EnterBack]);

        viewport.scroll_y = 0.0;
        assert_eq!(state.update(&scene, &viewport), vec![ScrollEdge::LeaveBack]);
    }

    #[test]
    fn test_jumping_past_region_reports_both_edges() {
        let mut viewport = Viewport::new(1280.0, 720.0);
        let scene = about_section(&viewport);
        let mut state = TriggerState::new(&scene, ScrollTrigger::new(".about"));

        viewport.scroll_y = 5000.0;
        assert_eq!(
            state.update(&scene, &viewport),
            vec![ScrollEdge::Enter, ScrollEdge::Leave]
        );
    }

    #[test]
    fn test_missing_trigger_element_never_fires() {
        let mut viewport = Viewport::new(1280.0, 720.0);
        let scene = Scene::new();
        let mut state = TriggerState::new(&scene, ScrollTrigger::new(".about"));
        viewport.scroll_y = 1000.0;
        assert!(state.update(&scene, &viewport).is_empty());
    }
}
