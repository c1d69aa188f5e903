// SPDX-License-Identifier: MIT OR Apache-2.0
//! Pointer-driven horizontal parallax over the revealed content.
//!
//! Every pointer move re-targets each layer straight away. Nothing is
//! queued or throttled; the driver's overwrite rule makes the latest
//! move win.

use crate::driver::{AnimationHandle, Driver};
use crate::ease::Ease;
use crate::scene::RenderTree;
use crate::target::Target;
use crate::tween::TweenSpec;
use crate::value::{Property, Unit, Value};
use serde::{Deserialize, Serialize};

/// Pointer position in viewport pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerSample {
    /// Horizontal position
    pub x: f32,
    /// Vertical position
    pub y: f32,
}

impl PointerSample {
    /// Create a sample
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// One element moved by the parallax
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParallaxLayer {
    /// Selector of the moved element
    pub target: String,
    /// Multiplier applied to the normalized displacement
    pub factor: f32,
    /// Unit of the resulting offset
    pub unit: Unit,
}

impl ParallaxLayer {
    /// Create a layer
    pub fn new(target: impl Into<String>, factor: f32, unit: Unit) -> Self {
        Self {
            target: target.into(),
            factor,
            unit,
        }
    }
}

/// Parallax configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParallaxSettings {
    /// Element the listener is scoped to
    pub container: String,
    /// Displacement at the viewport edges, before layer factors
    pub amplitude: f32,
    /// Layers, in the order their tweens are issued
    pub layers: Vec<ParallaxLayer>,
    /// Duration of each re-target tween
    pub duration: f32,
    /// Ease of each re-target tween
    pub ease: Ease,
}

impl Default for ParallaxSettings {
    fn default() -> Self {
        Self {
            container: ".main".to_string(),
            amplitude: 40.0,
            layers: vec![
                ParallaxLayer::new(".main .text", 0.4, Unit::Percent),
                ParallaxLayer::new(".sky", 1.0, Unit::Px),
                ParallaxLayer::new(".bg", 1.7, Unit::Px),
            ],
            duration: 0.5,
            ease: Ease::default(),
        }
    }
}

impl ParallaxSettings {
    /// Normalized displacement `(x / width - 0.5) * amplitude`.
    /// `None` for a degenerate viewport.
    pub fn x_move(&self, sample: PointerSample, viewport_width: f32) -> Option<f32> {
        if viewport_width <= 0.0 || !viewport_width.is_finite() {
            return None;
        }
        Some((sample.x / viewport_width - 0.5) * self.amplitude)
    }

    /// Offset for every layer, in layer order
    pub fn offsets(&self, sample: PointerSample, viewport_width: f32) -> Option<Vec<Value>> {
        let x_move = self.x_move(sample, viewport_width)?;
        Some(
            self.layers
                .iter()
                .map(|layer| Value::new(x_move * layer.factor, layer.unit))
                .collect(),
        )
    }
}

/// Listens for pointer moves once the container exists
#[derive(Debug, Clone)]
pub struct ParallaxTracker {
    settings: ParallaxSettings,
    attached: bool,
}

impl ParallaxTracker {
    /// Create a detached tracker
    pub fn new(settings: ParallaxSettings) -> Self {
        Self {
            settings,
            attached: false,
        }
    }

    /// Settings in use
    pub fn settings(&self) -> &ParallaxSettings {
        &self.settings
    }

    /// Whether the listener is live
    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Attach to the container if it is mounted. Returns true on the call
    /// that attached; the listener then lives as long as the tracker.
    pub fn attach<T: RenderTree + ?Sized>(&mut self, tree: &T) -> bool {
        if self.attached {
            return false;
        }
        let container = Target::selector(self.settings.container.as_str());
        if tree.resolve(&container).is_empty() {
            tracing::debug!("Parallax container '{}' not mounted yet", self.settings.container);
            return false;
        }
        self.attached = true;
        tracing::info!("Parallax attached to '{}'", self.settings.container);
        true
    }

    /// Re-target every layer for a pointer move
    pub fn on_pointer_move<T: RenderTree + ?Sized>(
        &self,
        sample: PointerSample,
        viewport_width: f32,
        driver: &mut Driver,
        tree: &T,
    ) -> Vec<AnimationHandle> {
        if !self.attached {
            return Vec::new();
        }
        let Some(offsets) = self.settings.offsets(sample, viewport_width) else {
            return Vec::new();
        };

        self.settings
            .layers
            .iter()
            .zip(offsets)
            .map(|(layer, offset)| {
                let spec = TweenSpec::to(layer.target.as_str())
                    .set_value(Property::X, offset)
                    .duration(self.settings.duration)
                    .ease(self.settings.ease);
                driver.play(tree, spec)
            })
            .collect()
    }
}

impl Default for ParallaxTracker {
    fn default() -> Self {
        Self::new(ParallaxSettings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{Element, Scene};

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    fn parallax_scene() -> Scene {
        let mut scene = Scene::new();
        let main = scene.add(Element::new("div").with_class("main"));
        for class in ["sky", "bg", "text"] {
            scene.add(Element::new("div").with_class(class).child_of(main));
        }
        scene
    }

    #[test]
    fn test_left_edge_offsets() {
        let settings = ParallaxSettings::default();
        let sample = PointerSample::new(0.0, 300.0);

        assert!(approx(settings.x_move(sample, 1000.0).unwrap(), -20.0));
        let offsets = settings.offsets(sample, 1000.0).unwrap();
        assert!(approx(offsets[0].amount, -8.0));
        assert_eq!(offsets[0].unit, Unit::Percent);
        assert!(approx(offsets[1].amount, -20.0));
        assert_eq!(offsets[1].unit, Unit::Px);
        assert!(approx(offsets[2].amount, -34.0));
    }

    #[test]
    fn test_offsets_scale_with_displacement() {
        let settings = ParallaxSettings::default();
        for (x, width) in [(250.0, 1000.0), (1280.0, 1280.0), (333.0, 1920.0)] {
            let sample = PointerSample::new(x, 0.0);
            let x_move = (x / width - 0.5) * 40.0;
            let offsets = settings.offsets(sample, width).unwrap();
            assert!(approx(offsets[0].amount, x_move * 0.4));
            assert!(approx(offsets[1].amount, x_move));
            assert!(approx(offsets[2].amount, x_move * 1.7));
        }
        assert!(approx(settings.x_move(PointerSample::new(500.0, 0.0), 1000.0).unwrap(), 0.0));
    }

    #[test]
    fn test_degenerate_viewport() {
        let settings = ParallaxSettings::default();
        assert!(settings.x_move(PointerSample::new(10.0, 0.0), 0.0).is_none());
    }

    #[test]
    fn test_detached_tracker_ignores_moves() {
        let scene = Scene::new();
        let mut driver = Driver::new();
        let mut tracker = ParallaxTracker::default();
        assert!(!tracker.attach(&scene));
        let handles = tracker.on_pointer_move(PointerSample::new(0.0, 0.0), 1000.0, &mut driver, &scene);
        assert!(handles.is_empty());
    }

    #[test]
    fn test_latest_move_wins() {
        let mut scene = parallax_scene();
        let mut driver = Driver::new();
        let mut tracker = ParallaxTracker::default();
        assert!(tracker.attach(&scene));
        assert!(!tracker.attach(&scene));

        // Left edge, then immediately the right edge
        tracker.on_pointer_move(PointerSample::new(0.0, 0.0), 1000.0, &mut driver, &scene);
        driver.tick(&mut scene, 1.0 / 60.0);
        let handles =
            tracker.on_pointer_move(PointerSample::new(1000.0, 0.0), 1000.0, &mut driver, &scene);
        assert_eq!(handles.len(), 3);

        for _ in 0..60 {
            driver.tick(&mut scene, 1.0 / 60.0);
        }

        let sky = scene.query_one(".sky").unwrap();
        let bg = scene.query_one(".bg").unwrap();
        let text = scene.query_one(".main .text").unwrap();
        assert!(approx(scene.value(sky, Property::X).unwrap().amount, 20.0));
        assert!(approx(scene.value(bg, Property::X).unwrap().amount, 34.0));
        assert_eq!(scene.value(text, Property::X), Some(Value::percent(8.0)));
        assert_eq!(driver.active_count(), 0);
    }
}
