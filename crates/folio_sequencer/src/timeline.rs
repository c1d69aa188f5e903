// SPDX-License-Identifier: MIT OR Apache-2.0
//! Timelines: ordered tweens positioned relative to each other.

use crate::ease::Ease;
use crate::scene::RenderTree;
use crate::target::ElementId;
use crate::tween::TweenSpec;
use crate::value::PropertyMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Where a step is placed on its timeline
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Offset {
    /// At the current end of the timeline
    #[default]
    AfterPrevious,
    /// Seconds relative to the current end (negative overlaps)
    Relative(f32),
    /// Seconds from the start of the timeline
    Absolute(f32),
}

/// Error parsing a position string
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Invalid timeline offset: {0}")]
pub struct OffsetParseError(pub String);

impl FromStr for Offset {
    type Err = OffsetParseError;

    /// Accepts `>`, `-=N`, `+=N`, `-N` (relative) and `N` (absolute)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim();
        let number = |text: &str| {
            text.trim()
                .parse::<f32>()
                .map_err(|_| OffsetParseError(s.to_string()))
        };

        if raw.is_empty() || raw == ">" {
            Ok(Offset::AfterPrevious)
        } else if let Some(rest) = raw.strip_prefix("-=") {
            Ok(Offset::Relative(-number(rest)?))
        } else if let Some(rest) = raw.strip_prefix("+=") {
            Ok(Offset::Relative(number(rest)?))
        } else if raw.starts_with('-') {
            Ok(Offset::Relative(number(raw)?))
        } else {
            Ok(Offset::Absolute(number(raw)?))
        }
    }
}

impl TryFrom<String> for Offset {
    type Error = OffsetParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Offset> for String {
    fn from(offset: Offset) -> Self {
        offset.to_string()
    }
}

impl fmt::Display for Offset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Offset::AfterPrevious => write!(f, ">"),
            Offset::Relative(d) if *d < 0.0 => write!(f, "-={}", -d),
            Offset::Relative(d) => write!(f, "+={d}"),
            Offset::Absolute(t) => write!(f, "{t}"),
        }
    }
}

/// Error building a timeline
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TimelineError {
    /// A step would start before the timeline does
    #[error("Step {step} resolves to start time {start}s, before the timeline start")]
    NegativeStart {
        /// Step index
        step: usize,
        /// Resolved start time
        start: f32,
    },
}

/// A resolved step
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    /// Elements in stagger order
    pub elements: Vec<ElementId>,
    /// End values
    pub properties: PropertyMap,
    /// Seconds per element
    pub duration: f32,
    /// Effective ease
    pub ease: Ease,
    /// Delay between consecutive elements
    pub stagger: f32,
    /// Start time relative to the timeline start
    pub start: f32,
    /// Emit progress events while running
    pub report_progress: bool,
}

impl Step {
    /// Time from the first element starting to the last one finishing
    pub fn span(&self) -> f32 {
        let extra = self.elements.len().saturating_sub(1) as f32 * self.stagger;
        extra + self.duration
    }

    /// End time relative to the timeline start
    pub fn end(&self) -> f32 {
        self.start + self.span()
    }

    /// Start time of the element at `index`
    pub fn element_start(&self, index: usize) -> f32 {
        self.start + index as f32 * self.stagger
    }

    /// Linear progress of the whole step at a local time
    pub fn progress_at(&self, local_time: f32) -> f32 {
        let span = self.span();
        if span <= 0.0 {
            return if local_time >= self.start { 1.0 } else { 0.0 };
        }
        ((local_time - self.start) / span).clamp(0.0, 1.0)
    }
}

/// An ordered composition of steps
#[derive(Debug, Clone, PartialEq)]
pub struct Timeline {
    /// Name used in logs
    pub name: String,
    steps: Vec<Step>,
}

impl Timeline {
    /// Start building a timeline
    pub fn builder(name: impl Into<String>) -> TimelineBuilder {
        TimelineBuilder::new(name)
    }

    /// Wrap a single tween; its delay becomes its start time
    pub(crate) fn single(name: impl Into<String>, step: Step) -> Self {
        Self {
            name: name.into(),
            steps: vec![step],
        }
    }

    /// Resolved steps in declaration order
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Get a step
    pub fn step(&self, index: usize) -> Option<&Step> {
        self.steps.get(index)
    }

    /// Total duration (end of the latest step)
    pub fn duration(&self) -> f32 {
        self.steps.iter().map(Step::end).fold(0.0, f32::max)
    }
}

/// Builder collecting steps before placement
#[derive(Debug, Clone)]
pub struct TimelineBuilder {
    name: String,
    default_ease: Option<Ease>,
    entries: Vec<(TweenSpec, Offset)>,
}

impl TimelineBuilder {
    /// Create an empty builder
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            default_ease: None,
            entries: Vec::new(),
        }
    }

    /// Ease for steps that set none
    pub fn default_ease(mut self, ease: Ease) -> Self {
        self.default_ease = Some(ease);
        self
    }

    /// Append a step after everything so far
    pub fn then(self, spec: TweenSpec) -> Self {
        self.then_at(spec, Offset::AfterPrevious)
    }

    /// Append a step at an explicit position
    pub fn then_at(mut self, spec: TweenSpec, offset: Offset) -> Self {
        self.entries.push((spec, offset));
        self
    }

    /// Resolve targets against `tree` and place every step
    pub fn build<T: RenderTree + ?Sized>(self, tree: &T) -> Result<Timeline, TimelineError> {
        let fallback = self.default_ease.unwrap_or_default();
        let mut end = 0.0f32;
        let mut steps = Vec::with_capacity(self.entries.len());

        for (index, (spec, offset)) in self.entries.into_iter().enumerate() {
            let position = match offset {
                Offset::AfterPrevious => end,
                Offset::Relative(delta) => end + delta,
                Offset::Absolute(time) => time,
            };
            let start = position + spec.delay;
            if start < 0.0 {
                return Err(TimelineError::NegativeStart { step: index, start });
            }

            let step = resolve_step(tree, spec, start, fallback);
            end = end.max(step.end());
            steps.push(step);
        }

        Ok(Timeline {
            name: self.name,
            steps,
        })
    }
}

/// Resolve a tween's targets into a placed step
pub(crate) fn resolve_step<T: RenderTree + ?Sized>(
    tree: &T,
    spec: TweenSpec,
    start: f32,
    fallback_ease: Ease,
) -> Step {
    Step {
        elements: tree.resolve(&spec.target),
        properties: spec.properties,
        duration: spec.duration,
        ease: spec.ease.unwrap_or(fallback_ease),
        stagger: spec.stagger,
        start,
        report_progress: spec.report_progress,
    }
}
