// SPDX-License-Identifier: MIT OR Apache-2.0
//! Declarative tween descriptions.

use crate::ease::Ease;
use crate::target::Target;
use crate::value::{Property, PropertyMap, Value};

/// Duration used when a tween sets none
pub const DEFAULT_DURATION: f32 = 0.5;

/// One "animate these properties of these targets" request
#[derive(Debug, Clone, PartialEq)]
pub struct TweenSpec {
    /// What to animate
    pub target: Target,
    /// End values by property
    pub properties: PropertyMap,
    /// Seconds per element
    pub duration: f32,
    /// Ease, `None` falls back to the timeline default
    pub ease: Option<Ease>,
    /// Extra start delay in seconds (may be negative)
    pub delay: f32,
    /// Delay between consecutive elements in seconds
    pub stagger: f32,
    /// Emit progress events while running
    pub report_progress: bool,
}

impl TweenSpec {
    /// Start describing a tween towards new values
    pub fn to(target: impl Into<Target>) -> Self {
        Self {
            target: target.into(),
            properties: PropertyMap::new(),
            duration: DEFAULT_DURATION,
            ease: None,
            delay: 0.0,
            stagger: 0.0,
            report_progress: false,
        }
    }

    /// Animate a property to a bare number in its default unit
    pub fn set(self, property: Property, amount: f32) -> Self {
        let unit = property.default_unit();
        self.set_value(property, Value::new(amount, unit))
    }

    /// Animate a property to an explicit value
    pub fn set_value(mut self, property: Property, value: Value) -> Self {
        self.properties.insert(property, value);
        self
    }

    /// Set the duration
    pub fn duration(mut self, seconds: f32) -> Self {
        self.duration = seconds.max(0.0);
        self
    }

    /// Set the ease
    pub fn ease(mut self, ease: Ease) -> Self {
        self.ease = Some(ease);
        self
    }

    /// Set the start delay
    pub fn delay(mut self, seconds: f32) -> Self {
        self.delay = seconds;
        self
    }

    /// Set the per-element stagger
    pub fn stagger(mut self, seconds: f32) -> Self {
        self.stagger = seconds.max(0.0);
        self
    }

    /// Ask for progress events
    pub fn report_progress(mut self) -> Self {
        self.report_progress = true;
        self
    }
}
