// SPDX-License-Identifier: MIT OR Apache-2.0
//! Intro sequencer: the masked-text entrance that opens the reveal gate.
//!
//! The entrance timeline rotates the mask, then scales it up while fading
//! it out. Once the second stage's progress reaches the threshold, the
//! overlay is removed, the gate opens, and the timeline is killed. That
//! transition happens at most once per sequencer.

use crate::driver::{AnimationHandle, Driver, DriverEvent};
use crate::ease::{Ease, EaseDirection};
use crate::reveal::RevealGate;
use crate::scene::RenderTree;
use crate::target::Target;
use crate::timeline::{Timeline, TimelineError};
use crate::tween::TweenSpec;
use crate::value::Property;
use serde::{Deserialize, Serialize};

/// Index of the scale/fade stage within the intro timeline
const FADE_STAGE: usize = 1;

/// Timing and targets of the intro
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntroSettings {
    /// Overlay removed on reveal
    pub overlay: String,
    /// Masked group that is animated
    pub mask: String,
    /// Stage 1 rotation in degrees
    pub rotate: f32,
    /// Stage 1 duration
    pub rotate_duration: f32,
    /// Stage 1 ease
    pub rotate_ease: Ease,
    /// Stage 2 scale factor
    pub scale: f32,
    /// Stage 2 duration
    pub scale_duration: f32,
    /// Stage 2 ease
    pub scale_ease: Ease,
    /// Stage 2 delay relative to the end of stage 1 (negative overlaps)
    pub scale_delay: f32,
    /// Stage 2 progress that opens the gate
    pub threshold: f32,
}

impl Default for IntroSettings {
    fn default() -> Self {
        Self {
            overlay: ".svg".to_string(),
            mask: ".vi-mask-group".to_string(),
            rotate: 10.0,
            rotate_duration: 2.0,
            rotate_ease: Ease::Power(4, EaseDirection::InOut),
            scale: 10.0,
            scale_duration: 2.0,
            scale_ease: Ease::Expo(EaseDirection::InOut),
            scale_delay: -1.8,
            threshold: 0.9,
        }
    }
}

/// Where the intro is in its single run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntroPhase {
    /// Not yet activated
    Idle,
    /// Entrance timeline running
    Playing(AnimationHandle),
    /// Gate opened; nothing left to do
    Revealed,
}

/// Runs the entrance once and opens the gate
#[derive(Debug, Clone)]
pub struct IntroSequencer {
    settings: IntroSettings,
    phase: IntroPhase,
}

impl IntroSequencer {
    /// Create an idle sequencer
    pub fn new(settings: IntroSettings) -> Self {
        Self {
            settings,
            phase: IntroPhase::Idle,
        }
    }

    /// Current phase
    pub fn phase(&self) -> IntroPhase {
        self.phase
    }

    /// Settings in use
    pub fn settings(&self) -> &IntroSettings {
        &self.settings
    }

    /// Whether `progress` is at or past the reveal threshold
    pub fn crosses_threshold(&self, progress: f32) -> bool {
        progress >= self.settings.threshold
    }

    /// Build the two-stage entrance timeline
    pub fn timeline<T: RenderTree + ?Sized>(&self, tree: &T) -> Result<Timeline, TimelineError> {
        let s = &self.settings;
        Timeline::builder("intro")
            .then(
                TweenSpec::to(s.mask.as_str())
                    .set(Property::Rotate, s.rotate)
                    .duration(s.rotate_duration)
                    .ease(s.rotate_ease),
            )
            .then(
                TweenSpec::to(s.mask.as_str())
                    .set(Property::Scale, s.scale)
                    .set(Property::Opacity, 0.0)
                    .duration(s.scale_duration)
                    .delay(s.scale_delay)
                    .ease(s.scale_ease)
                    .report_progress(),
            )
            .build(tree)
    }

    /// Start the entrance. Returns false, doing nothing, if it already ran.
    pub fn activate<T: RenderTree + ?Sized>(
        &mut self,
        driver: &mut Driver,
        tree: &T,
    ) -> Result<bool, TimelineError> {
        if self.phase != IntroPhase::Idle {
            tracing::debug!("Intro already activated, ignoring");
            return Ok(false);
        }

        let timeline = self.timeline(tree)?;
        let handle = driver.play_sequence(timeline);
        self.phase = IntroPhase::Playing(handle);
        tracing::info!("Intro started");
        Ok(true)
    }

    /// Route a driver event. Returns true if it triggered the reveal.
    pub fn handle_event<T: RenderTree + ?Sized>(
        &mut self,
        event: &DriverEvent,
        driver: &mut Driver,
        tree: &mut T,
        gate: &mut RevealGate,
    ) -> bool {
        match (event, self.phase) {
            (
                DriverEvent::Progress {
                    handle,
                    step: FADE_STAGE,
                    progress,
                },
                IntroPhase::Playing(ours),
            ) if *handle == ours => self.on_progress(*progress, driver, tree, gate),
            _ => false,
        }
    }

    /// Feed one progress sample of the fade stage. The first sample at or
    /// past the threshold removes the overlay, opens the gate and kills the
    /// timeline; every later sample is dropped.
    pub fn on_progress<T: RenderTree + ?Sized>(
        &mut self,
        progress: f32,
        driver: &mut Driver,
        tree: &mut T,
        gate: &mut RevealGate,
    ) -> bool {
        if !self.crosses_threshold(progress) {
            return false;
        }

        let handle = match self.phase {
            IntroPhase::Playing(handle) => handle,
            IntroPhase::Revealed => {
                tracing::debug!("Intro already revealed, dropping progress {progress:.3}");
                return false;
            }
            IntroPhase::Idle => return false,
        };

        // Stop sampling first so nothing re-enters this transition
        self.phase = IntroPhase::Revealed;
        driver.kill(handle);

        let removed = tree.remove(&Target::selector(self.settings.overlay.as_str()));
        if removed == 0 {
            tracing::debug!("Overlay '{}' already gone", self.settings.overlay);
        }
        gate.open();

        tracing::info!("Intro reached {progress:.3}, content revealed");
        true
    }
}

impl Default for IntroSequencer {
    fn default() -> Self {
        Self::new(IntroSettings::default())
    }
}
