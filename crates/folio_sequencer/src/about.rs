// SPDX-License-Identifier: MIT OR Apache-2.0
//! Scroll reveal for the "about" panel.
//!
//! Hero image, info panel and every registered element start hidden and
//! shifted down. The first time the container's top passes the trigger
//! line, a three-stage timeline brings them in; later crossings do
//! nothing.

use crate::driver::{AnimationHandle, Driver, DriverEvent};
use crate::ease::{Ease, EaseDirection};
use crate::registry::ElementRegistry;
use crate::scene::RenderTree;
use crate::scroll::{Anchor, ScrollEdge, ScrollPosition, ScrollTrigger, TriggerId, Viewport};
use crate::target::{ElementId, Target};
use crate::timeline::{Offset, Timeline, TimelineError};
use crate::tween::TweenSpec;
use crate::value::{Property, PropertyMap, Value};
use serde::{Deserialize, Serialize};

/// Timing of the scroll reveal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollRevealSettings {
    /// Trigger line
    pub start: ScrollPosition,
    /// Opacity before the reveal
    pub initial_opacity: f32,
    /// Downward shift before the reveal, in pixels
    pub initial_y: f32,
    /// Ease for stages that set none
    pub default_ease: Ease,
    /// Hero stage duration
    pub hero_duration: f32,
    /// Hero stage ease
    pub hero_ease: Ease,
    /// Panel stage duration
    pub panel_duration: f32,
    /// Panel stage position
    pub panel_offset: Offset,
    /// Per-element duration of the item stage
    pub items_duration: f32,
    /// Delay between items
    pub items_stagger: f32,
    /// Item stage position
    pub items_offset: Offset,
}

impl Default for ScrollRevealSettings {
    fn default() -> Self {
        Self {
            start: ScrollPosition::new(Anchor::Top, Anchor::Center),
            initial_opacity: 0.0,
            initial_y: 50.0,
            default_ease: Ease::Power(3, EaseDirection::Out),
            hero_duration: 1.0,
            hero_ease: Ease::Back(1.9, EaseDirection::Out),
            panel_duration: 1.0,
            panel_offset: Offset::Relative(-0.5),
            items_duration: 0.8,
            items_stagger: 0.15,
            items_offset: Offset::Relative(-0.3),
        }
    }
}

/// Lifecycle of the reveal
#[derive(Debug, Clone, PartialEq)]
pub enum ScrollRevealPhase {
    /// Content not mounted yet
    Idle,
    /// Initial state applied, waiting for the trigger
    Armed {
        /// Trigger watching the container
        trigger: TriggerId,
        /// Timeline to play on entry
        timeline: Timeline,
    },
    /// Timeline started; never re-armed
    Fired {
        /// The playing (or finished) timeline
        handle: AnimationHandle,
    },
}

/// One-shot scroll reveal of a container's contents
#[derive(Debug, Clone)]
pub struct ScrollRevealSequencer {
    settings: ScrollRevealSettings,
    container: ElementId,
    hero: ElementId,
    panel: ElementId,
    registry: ElementRegistry,
    phase: ScrollRevealPhase,
}

impl ScrollRevealSequencer {
    /// Create a sequencer for a container and its hero and panel elements
    pub fn new(
        settings: ScrollRevealSettings,
        container: ElementId,
        hero: ElementId,
        panel: ElementId,
    ) -> Self {
        Self::with_registry(settings, container, hero, panel, ElementRegistry::new())
    }

    /// Create a sequencer over elements already registered during rendering
    pub fn with_registry(
        settings: ScrollRevealSettings,
        container: ElementId,
        hero: ElementId,
        panel: ElementId,
        registry: ElementRegistry,
    ) -> Self {
        Self {
            settings,
            container,
            hero,
            panel,
            registry,
            phase: ScrollRevealPhase::Idle,
        }
    }

    /// Register an element for the staggered stage. Idempotent.
    pub fn register(&mut self, element: ElementId) -> bool {
        self.registry.add(element)
    }

    /// Registered elements
    pub fn registry(&self) -> &ElementRegistry {
        &self.registry
    }

    /// Current phase
    pub fn phase(&self) -> &ScrollRevealPhase {
        &self.phase
    }

    /// Whether the timeline has been started
    pub fn has_fired(&self) -> bool {
        matches!(self.phase, ScrollRevealPhase::Fired { .. })
    }

    /// Build the three-stage entrance
    pub fn timeline<T: RenderTree + ?Sized>(&self, tree: &T) -> Result<Timeline, TimelineError> {
        let s = &self.settings;
        let settle = |target: Target| {
            TweenSpec::to(target)
                .set(Property::Opacity, 1.0)
                .set(Property::Y, 0.0)
        };

        Timeline::builder("about")
            .default_ease(s.default_ease)
            .then(
                settle(Target::Element(self.hero))
                    .duration(s.hero_duration)
                    .ease(s.hero_ease),
            )
            .then_at(
                settle(Target::Element(self.panel)).duration(s.panel_duration),
                s.panel_offset,
            )
            .then_at(
                settle(self.registry.as_target())
                    .duration(s.items_duration)
                    .stagger(s.items_stagger),
                s.items_offset,
            )
            .build(tree)
    }

    /// Hide everything and start watching the container. Only the first
    /// call does anything.
    pub fn arm<T: RenderTree + ?Sized>(
        &mut self,
        driver: &mut Driver,
        tree: &mut T,
        viewport: &Viewport,
    ) -> Result<bool, TimelineError> {
        if self.phase != ScrollRevealPhase::Idle {
            return Ok(false);
        }

        let timeline = self.timeline(&*tree)?;

        let mut hidden = PropertyMap::new();
        hidden.insert(Property::Opacity, Value::number(self.settings.initial_opacity));
        hidden.insert(Property::Y, Value::px(self.settings.initial_y));
        let tracked = Target::elements(
            [self.hero, self.panel].into_iter().chain(self.registry.iter()),
        );
        driver.set(tree, &tracked, &hidden);

        let trigger = driver.register_scroll_trigger(
            &*tree,
            viewport,
            ScrollTrigger::new(Target::Element(self.container)).start(self.settings.start),
        );
        tracing::info!(
            "Scroll reveal armed ({} staggered elements, start '{}')",
            self.registry.len(),
            self.settings.start
        );
        self.phase = ScrollRevealPhase::Armed { trigger, timeline };
        Ok(true)
    }

    /// Route a driver event. Returns true if it started the reveal.
    pub fn handle_event(&mut self, event: &DriverEvent, driver: &mut Driver) -> bool {
        let DriverEvent::Scroll { trigger, edge } = event else {
            return false;
        };

        let entering = matches!(
            &self.phase,
            ScrollRevealPhase::Armed { trigger: ours, .. }
                if ours == trigger && *edge == ScrollEdge::Enter
        );
        if !entering {
            if self.has_fired() {
                tracing::debug!("Scroll reveal already played, ignoring {edge:?}");
            }
            return false;
        }

        let phase = std::mem::replace(&mut self.phase, ScrollRevealPhase::Idle);
        let ScrollRevealPhase::Armed { timeline, .. } = phase else {
            return false;
        };
        let handle = driver.play_sequence(timeline);
        self.phase = ScrollRevealPhase::Fired { handle };
        tracing::info!("Scroll reveal fired");
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{Bounds, Element, Scene};

    const FRAME: f32 = 1.0 / 60.0;

    struct Fixture {
        scene: Scene,
        driver: Driver,
        viewport: Viewport,
        sequencer: ScrollRevealSequencer,
        items: Vec<ElementId>,
    }

    fn fixture() -> Fixture {
        let viewport = Viewport::new(1000.0, 800.0);
        let mut scene = Scene::new();
        let container = scene.add(
            Element::new("div")
                .with_class("about")
                .with_bounds(Bounds::new(0.0, 800.0, 1000.0, 800.0)),
        );
        let hero = scene.add(Element::new("div").child_of(container));
        let panel = scene.add(Element::new("div").child_of(container));
        let items: Vec<_> = ["x", "y", "z"]
            .into_iter()
            .map(|name| scene.add(Element::new("p").with_text(name).child_of(panel)))
            .collect();

        let mut sequencer =
            ScrollRevealSequencer::new(ScrollRevealSettings::default(), container, hero, panel);
        for &item in &items {
            sequencer.register(item);
        }
        // Re-rendering registers the first element again
        sequencer.register(items[0]);

        Fixture {
            scene,
            driver: Driver::new(),
            viewport,
            sequencer,
            items,
        }
    }

    fn scroll(f: &mut Fixture, y: f32) -> bool {
        f.viewport.scroll_y = y;
        let events = f.driver.update_scroll(&f.scene, &f.viewport);
        let mut fired = false;
        for event in &events {
            fired |= f.sequencer.handle_event(event, &mut f.driver);
        }
        fired
    }

    fn run(f: &mut Fixture, seconds: f32) {
        for _ in 0..(seconds / FRAME).round() as usize {
            f.driver.tick(&mut f.scene, FRAME);
        }
    }

    #[test]
    fn test_registry_has_no_duplicates() {
        let f = fixture();
        assert_eq!(f.sequencer.registry().iter().collect::<Vec<_>>(), f.items);
    }

    #[test]
    fn test_timeline_layout() {
        let f = fixture();
        let timeline = f.sequencer.timeline(&f.scene).unwrap();
        let steps = timeline.steps();
        assert!((steps[1].start - 0.5).abs() < 1e-5);
        assert!((steps[2].start - 1.2).abs() < 1e-5);
        assert_eq!(steps[0].ease, Ease::Back(1.9, EaseDirection::Out));
        assert_eq!(steps[1].ease, Ease::Power(3, EaseDirection::Out));
        assert_eq!(steps[2].elements, f.items);
        assert!((steps[2].element_start(2) - steps[2].element_start(1) - 0.15).abs() < 1e-5);
    }

    #[test]
    fn test_arm_hides_tracked_elements() {
        let mut f = fixture();
        assert!(f.sequencer.arm(&mut f.driver, &mut f.scene, &f.viewport).unwrap());
        assert!(!f.sequencer.arm(&mut f.driver, &mut f.scene, &f.viewport).unwrap());

        for &item in &f.items {
            assert_eq!(f.scene.value(item, Property::Opacity), Some(Value::number(0.0)));
            assert_eq!(f.scene.value(item, Property::Y), Some(Value::px(50.0)));
        }
        assert!(matches!(f.sequencer.phase(), ScrollRevealPhase::Armed { .. }));
    }

    #[test]
    fn test_fires_once_on_entry() {
        let mut f = fixture();
        f.sequencer.arm(&mut f.driver, &mut f.scene, &f.viewport).unwrap();

        // Trigger line is at 800 - 400 = 400
        assert!(!scroll(&mut f, 300.0));
        assert!(scroll(&mut f, 450.0));
        assert!(f.sequencer.has_fired());

        // Leave and come back twice
        assert!(!scroll(&mut f, 0.0));
        assert!(!scroll(&mut f, 450.0));
        assert!(!scroll(&mut f, 5000.0));
        assert!(!scroll(&mut f, 450.0));

        run(&mut f, 3.0);
        for &item in &f.items {
            assert_eq!(f.scene.value(item, Property::Opacity), Some(Value::number(1.0)));
            assert_eq!(f.scene.value(item, Property::Y), Some(Value::px(0.0)));
        }
    }

    #[test]
    fn test_stagger_follows_registration_order() {
        let mut f = fixture();
        f.sequencer.arm(&mut f.driver, &mut f.scene, &f.viewport).unwrap();
        scroll(&mut f, 450.0);

        // Item stage starts at 1.2s; at 1.4s x and y have started, z has not
        run(&mut f, 1.4);
        let opacity = |f: &Fixture, i: usize| f.scene.value(f.items[i], Property::Opacity).unwrap().amount;
        assert!(opacity(&f, 0) > opacity(&f, 1));
        assert!(opacity(&f, 1) > 0.0);
        assert_eq!(opacity(&f, 2), 0.0);
    }

    #[test]
    fn test_never_entering_leaves_elements_hidden() {
        let mut f = fixture();
        f.sequencer.arm(&mut f.driver, &mut f.scene, &f.viewport).unwrap();
        assert!(!scroll(&mut f, 100.0));
        run(&mut f, 5.0);
        assert!(!f.sequencer.has_fired());
        assert_eq!(f.scene.value(f.items[0], Property::Opacity), Some(Value::number(0.0)));
    }

    #[test]
    fn test_settings_read_from_ron() {
        let settings: ScrollRevealSettings = ron::from_str(
            r#"(start: "top 80%", items_offset: "-=0.4", hero_ease: "back.out(2)")"#,
        )
        .unwrap();
        assert_eq!(settings.start.viewport, Anchor::Percent(80.0));
        assert_eq!(settings.items_offset, Offset::Relative(-0.4));
        assert_eq!(settings.hero_ease, Ease::Back(2.0, EaseDirection::Out));
        assert_eq!(settings.items_stagger, 0.15);
    }
}
