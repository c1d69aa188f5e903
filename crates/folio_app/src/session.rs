// SPDX-License-Identifier: MIT OR Apache-2.0
//! Page session.
//!
//! This module handles:
//! - Running the intro and mounting content once the gate opens
//! - The fixed-rate frame loop and driver event routing
//! - Pointer, scroll, click and resize input
//! - Snapshots of the rendered page

use crate::config::{AssetSettings, PortfolioConfig};
use crate::page::{self, MountedPage, CONTACT_ID};
use crate::script::{InputEvent, Script};
use folio_sequencer::{
    Driver, DriverEvent, ElementRegistry, IntroPhase, IntroSequencer, LandingReveal,
    ParallaxTracker, PointerSample, RenderTree, RevealGate, Scene, ScrollRevealPhase,
    ScrollRevealSequencer, TimelineError, Viewport,
};
use serde::Serialize;
use std::collections::BTreeMap;

/// Session errors
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// A timeline could not be laid out
    #[error("Timeline error: {0}")]
    Timeline(#[from] TimelineError),
}

/// Counters for the session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SessionStats {
    /// Frames rendered
    pub frames: u64,
    /// Pointer moves received
    pub pointer_moves: u64,
    /// Pointer moves that arrived before the parallax was attached
    pub dropped_pointer_moves: u64,
    /// Scroll crossings reported by the driver
    pub scroll_edges: u64,
}

/// One element in a snapshot
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ElementSnapshot {
    /// Tag name
    pub tag: String,
    /// Class list
    pub classes: Vec<String>,
    /// Document-level ID
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dom_id: Option<String>,
    /// Animated values, formatted with their units
    pub values: BTreeMap<String, String>,
}

/// Serializable state of the page at one instant
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageSnapshot {
    /// Driver clock in seconds
    pub time: f32,
    /// Whether the content has been revealed
    pub content_visible: bool,
    /// Intro phase name
    pub intro: &'static str,
    /// Scroll reveal phase name
    pub scroll_reveal: &'static str,
    /// Viewport at snapshot time
    pub viewport: Viewport,
    /// Counters
    pub stats: SessionStats,
    /// Named elements, in document order
    pub elements: Vec<ElementSnapshot>,
}

/// A headless run of the portfolio page
pub struct PortfolioSession {
    config: PortfolioConfig,
    assets: AssetSettings,
    scene: Scene,
    driver: Driver,
    viewport: Viewport,
    gate: RevealGate,
    intro: IntroSequencer,
    landing: LandingReveal,
    parallax: ParallaxTracker,
    about: Option<ScrollRevealSequencer>,
    page: Option<MountedPage>,
    stats: SessionStats,
}

impl PortfolioSession {
    /// Create a session; nothing is built until [`start`](Self::start)
    pub fn new(config: PortfolioConfig) -> Self {
        let (assets, warnings) = config.assets.normalized();
        for warning in &warnings {
            tracing::warn!(
                "Asset path '{}' for {} looks mistyped, using '{}'",
                warning.path,
                warning.slot,
                warning.normalized
            );
        }

        Self {
            viewport: Viewport::new(config.viewport.width, config.viewport.height),
            intro: IntroSequencer::new(config.intro.clone()),
            parallax: ParallaxTracker::new(config.parallax.clone()),
            landing: LandingReveal::standard(),
            assets,
            config,
            scene: Scene::new(),
            driver: Driver::new(),
            gate: RevealGate::new(),
            about: None,
            page: None,
            stats: SessionStats::default(),
        }
    }

    /// Build the overlay and start the intro. Later calls do nothing.
    pub fn start(&mut self) -> Result<(), SessionError> {
        if self.intro.phase() != IntroPhase::Idle {
            return Ok(());
        }
        page::build_overlay(&mut self.scene, &self.viewport, &self.assets);
        self.intro.activate(&mut self.driver, &self.scene)?;
        Ok(())
    }

    /// Seconds per frame
    pub fn frame_duration(&self) -> f32 {
        1.0 / self.config.frame_rate
    }

    /// Render one frame
    pub fn frame(&mut self) -> Result<(), SessionError> {
        let dt = self.frame_duration();
        let events = self.driver.tick(&mut self.scene, dt);
        self.route(&events);
        self.mount_if_revealed()?;
        self.stats.frames += 1;
        Ok(())
    }

    /// Render frames covering `seconds`
    pub fn advance(&mut self, seconds: f32) -> Result<(), SessionError> {
        let frames = (seconds * self.config.frame_rate).round().max(0.0) as u64;
        for _ in 0..frames {
            self.frame()?;
        }
        Ok(())
    }

    fn route(&mut self, events: &[DriverEvent]) {
        for event in events {
            if matches!(event, DriverEvent::Scroll { .. }) {
                self.stats.scroll_edges += 1;
            }
            self.intro
                .handle_event(event, &mut self.driver, &mut self.scene, &mut self.gate);
            if let Some(about) = self.about.as_mut() {
                about.handle_event(event, &mut self.driver);
            }
        }
    }

    /// Mount the content on the frame the gate opens, then wire up the
    /// landing reveal, parallax and scroll reveal against it
    fn mount_if_revealed(&mut self) -> Result<(), SessionError> {
        if !self.gate.is_open() || self.page.is_some() {
            return Ok(());
        }

        let mut registry = ElementRegistry::new();
        let page = page::mount_content(&mut self.scene, &self.viewport, &self.assets, &mut registry);
        self.page = Some(page);

        self.landing.arm(&self.gate, &mut self.driver, &self.scene);
        self.parallax.attach(&self.scene);

        let mut about = ScrollRevealSequencer::with_registry(
            self.config.about.clone(),
            page.about,
            page.hero,
            page.panel,
            registry,
        );
        about.arm(&mut self.driver, &mut self.scene, &self.viewport)?;
        self.about = Some(about);

        // The about trigger may already be in view
        let events = self.driver.update_scroll(&self.scene, &self.viewport);
        self.route(&events);
        Ok(())
    }

    /// Feed a pointer move to the parallax. Moves before the content is
    /// revealed are dropped.
    pub fn pointer_move(&mut self, sample: PointerSample) {
        self.stats.pointer_moves += 1;
        if !self.parallax.is_attached() {
            self.stats.dropped_pointer_moves += 1;
            tracing::debug!("Pointer move at ({}, {}) before reveal, dropped", sample.x, sample.y);
            return;
        }
        self.parallax
            .on_pointer_move(sample, self.viewport.width, &mut self.driver, &self.scene);
    }

    /// Height of the scrollable document
    pub fn document_height(&self) -> f32 {
        self.page
            .and_then(|page| self.scene.bounds(page.main))
            .map_or(self.viewport.height, |bounds| bounds.height.max(self.viewport.height))
    }

    /// Scroll to `y`, clamped to the document
    pub fn scroll_to(&mut self, y: f32) {
        let max = (self.document_height() - self.viewport.height).max(0.0);
        self.viewport.scroll_y = y.clamp(0.0, max);
        tracing::debug!("Scrolled to {}", self.viewport.scroll_y);

        let events = self.driver.update_scroll(&self.scene, &self.viewport);
        self.route(&events);
    }

    /// Press the scroll-down button. Returns false if the contact section
    /// is not mounted.
    pub fn click_scroll_down(&mut self) -> bool {
        let Some(bounds) = self
            .page
            .and_then(|page| self.scene.bounds(page.contact))
        else {
            tracing::debug!("Scroll-down pressed before '#{CONTACT_ID}' exists");
            return false;
        };
        self.scroll_to(bounds.y);
        true
    }

    /// Change the viewport size. Layout stays as mounted; triggers are
    /// re-evaluated against the new height.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.viewport.width = width;
        self.viewport.height = height;
        tracing::debug!("Viewport resized to {width}x{height}");
        let scroll_y = self.viewport.scroll_y;
        self.scroll_to(scroll_y);
    }

    /// Apply one scripted input
    pub fn apply(&mut self, event: &InputEvent) -> Result<(), SessionError> {
        match *event {
            InputEvent::Wait(seconds) => self.advance(seconds)?,
            InputEvent::PointerMove(x, y) => self.pointer_move(PointerSample::new(x, y)),
            InputEvent::Scroll(y) => self.scroll_to(y),
            InputEvent::ClickScrollDown => {
                self.click_scroll_down();
            }
            InputEvent::Resize(width, height) => self.resize(width, height),
        }
        Ok(())
    }

    /// Start the session if needed and apply every event of a script
    pub fn run(&mut self, script: &Script) -> Result<(), SessionError> {
        self.start()?;
        for event in &script.events {
            self.apply(event)?;
        }
        tracing::info!(
            "Script finished after {} frames ({} pointer moves dropped)",
            self.stats.frames,
            self.stats.dropped_pointer_moves
        );
        Ok(())
    }

    /// Whether the content has been revealed
    pub fn content_visible(&self) -> bool {
        self.gate.is_open()
    }

    /// Scene being animated
    #[allow(dead_code)] // Inspection API for tests and embedders
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Current viewport
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Session counters
    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    /// Scroll reveal sequencer, once content is mounted
    #[allow(dead_code)] // Inspection API for tests and embedders
    pub fn about(&self) -> Option<&ScrollRevealSequencer> {
        self.about.as_ref()
    }

    /// Capture the named elements and their animated values
    pub fn snapshot(&self) -> PageSnapshot {
        let elements = self
            .scene
            .elements()
            .filter(|element| !element.classes.is_empty() || element.dom_id.is_some())
            .map(|element| ElementSnapshot {
                tag: element.tag.clone(),
                classes: element.classes.clone(),
                dom_id: element.dom_id.clone(),
                values: element
                    .values
                    .iter()
                    .map(|(property, value)| (property.name().to_string(), value.to_string()))
                    .collect(),
            })
            .collect();

        PageSnapshot {
            time: self.driver.time(),
            content_visible: self.content_visible(),
            intro: match self.intro.phase() {
                IntroPhase::Idle => "idle",
                IntroPhase::Playing(_) => "playing",
                IntroPhase::Revealed => "revealed",
            },
            scroll_reveal: match self.about.as_ref().map(ScrollRevealSequencer::phase) {
                None | Some(ScrollRevealPhase::Idle) => "idle",
                Some(ScrollRevealPhase::Armed { .. }) => "armed",
                Some(ScrollRevealPhase::Fired { .. }) => "fired",
            },
            viewport: self.viewport,
            stats: self.stats,
            elements,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_sequencer::{Property, Value};

    fn session() -> PortfolioSession {
        let mut session = PortfolioSession::new(PortfolioConfig::default());
        session.start().unwrap();
        session
    }

    fn value(session: &PortfolioSession, selector: &str, property: Property) -> Value {
        let id = session.scene().query_one(selector).unwrap();
        session.scene().value(id, property).unwrap()
    }

    #[test]
    fn test_reveal_happens_once_near_two_seconds() {
        let mut session = session();
        assert!(session.scene().query_one(".svg").is_some());

        session.advance(1.9).unwrap();
        assert!(!session.content_visible());
        assert!(session.scene().query_one(".main").is_none());

        session.advance(0.2).unwrap();
        assert!(session.content_visible());
        assert!(session.scene().query_one(".svg").is_none());
        assert!(session.scene().query_one(".vi-mask-group").is_none());
        assert_eq!(session.scene().query(".main").len(), 1);

        session.advance(2.0).unwrap();
        assert_eq!(session.scene().query(".main").len(), 1);
        assert_eq!(session.snapshot().intro, "revealed");
    }

    #[test]
    fn test_landing_settles_after_reveal() {
        let mut session = session();
        session.advance(6.0).unwrap();

        assert_eq!(value(&session, ".main", Property::Scale), Value::number(1.0));
        assert_eq!(value(&session, ".main", Property::Rotate), Value::deg(0.0));
        assert_eq!(value(&session, ".sky", Property::Scale), Value::number(1.1));
        assert_eq!(value(&session, ".character", Property::X), Value::percent(-50.0));
        assert_eq!(value(&session, ".character", Property::Bottom), Value::percent(-25.0));
    }

    #[test]
    fn test_pointer_moves_before_reveal_are_dropped() {
        let mut session = session();
        session.pointer_move(PointerSample::new(0.0, 100.0));
        assert_eq!(session.stats().dropped_pointer_moves, 1);

        session.advance(3.5).unwrap();
        session.pointer_move(PointerSample::new(0.0, 100.0));
        session.advance(1.0).unwrap();
        assert_eq!(session.stats().dropped_pointer_moves, 1);

        // 1280 wide: x_move = -20
        let sky = value(&session, ".sky", Property::X);
        assert!((sky.amount + 20.0).abs() < 1e-3);
        let text = value(&session, ".main .text", Property::X);
        assert_eq!(text.unit, folio_sequencer::Unit::Percent);
        assert!((text.amount + 8.0).abs() < 1e-3);
    }

    #[test]
    fn test_scroll_reveal_fires_once() {
        let mut session = session();
        session.advance(2.5).unwrap();
        assert_eq!(session.snapshot().scroll_reveal, "armed");

        let items = session.about().unwrap().registry().len();
        assert_eq!(items, 18);

        // About top at 720 meets the viewport center at scroll 360
        session.scroll_to(200.0);
        assert_eq!(session.snapshot().scroll_reveal, "armed");
        session.scroll_to(400.0);
        assert_eq!(session.snapshot().scroll_reveal, "fired");

        session.scroll_to(0.0);
        session.scroll_to(400.0);
        session.advance(6.0).unwrap();

        let about = session.about().unwrap();
        for id in about.registry().iter() {
            assert_eq!(session.scene().value(id, Property::Opacity), Some(Value::number(1.0)));
        }
    }

    #[test]
    fn test_click_scroll_down_targets_contact() {
        let mut session = session();
        assert!(!session.click_scroll_down());

        session.advance(2.5).unwrap();
        assert!(session.click_scroll_down());
        assert_eq!(session.viewport().scroll_y, 1440.0);
        // Passing the about trigger on the way fires it
        assert_eq!(session.snapshot().scroll_reveal, "fired");
    }

    #[test]
    fn test_scroll_is_clamped() {
        let mut session = session();
        session.scroll_to(500.0);
        assert_eq!(session.viewport().scroll_y, 0.0);

        session.advance(2.5).unwrap();
        session.scroll_to(1.0e6);
        assert_eq!(session.viewport().scroll_y, 1440.0);
    }

    #[test]
    fn test_demo_script_runs_through() {
        let mut session = PortfolioSession::new(PortfolioConfig::default());
        session.run(&Script::demo(1280.0, 720.0)).unwrap();

        let snapshot = session.snapshot();
        assert!(snapshot.content_visible);
        assert_eq!(snapshot.scroll_reveal, "fired");
        assert_eq!(snapshot.stats.dropped_pointer_moves, 1);
        assert!(snapshot.elements.iter().any(|e| e.dom_id.as_deref() == Some("contact")));

        let json = serde_json::to_string(&snapshot).unwrap();
        assert!(json.contains("\"content_visible\":true"));
    }

    #[test]
    fn test_zero_width_resize_ignores_parallax() {
        let mut session = session();
        session.advance(3.5).unwrap();
        session.resize(0.0, 720.0);
        session.pointer_move(PointerSample::new(10.0, 10.0));
        session.advance(1.0).unwrap();
        assert_eq!(value(&session, ".sky", Property::X), Value::px(0.0));
    }
}
