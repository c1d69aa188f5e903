// SPDX-License-Identifier: MIT OR Apache-2.0
//! Landing reveal: the batch of tweens that settles the hero after the gate opens.

use crate::driver::{AnimationHandle, Driver};
use crate::ease::{Ease, EaseDirection};
use crate::reveal::{RevealGate, RevealWatcher};
use crate::scene::RenderTree;
use crate::tween::TweenSpec;
use crate::value::{Property, Value};

/// Fire-and-forget tweens played once on the reveal edge
#[derive(Debug, Clone)]
pub struct LandingReveal {
    tweens: Vec<TweenSpec>,
    watcher: RevealWatcher,
}

impl LandingReveal {
    /// Use a custom batch of tweens
    pub fn new(tweens: Vec<TweenSpec>) -> Self {
        Self {
            tweens,
            watcher: RevealWatcher::new(),
        }
    }

    /// The wrapper, sky, background, character and name text settling to rest
    pub fn standard() -> Self {
        let settle = |selector: &str, delay: f32| {
            TweenSpec::to(selector)
                .set(Property::Rotate, 0.0)
                .duration(2.0)
                .delay(delay)
                .ease(Ease::Expo(EaseDirection::InOut))
        };

        Self::new(vec![
            settle(".main", -1.0).set(Property::Scale, 1.0),
            settle(".sky", -0.8).set(Property::Scale, 1.1),
            settle(".bg", -0.8).set(Property::Scale, 1.1),
            settle(".character", -0.8)
                .set(Property::Scale, 1.4)
                .set_value(Property::X, Value::percent(-50.0))
                .set_value(Property::Bottom, Value::percent(-25.0)),
            settle(".text", -0.8).set(Property::Scale, 1.0),
        ])
    }

    /// Tweens in the batch
    pub fn tweens(&self) -> &[TweenSpec] {
        &self.tweens
    }

    /// Play the batch if the gate has just opened. Returns the handles of
    /// the started tweens, empty on every other call.
    pub fn arm<T: RenderTree + ?Sized>(
        &mut self,
        gate: &RevealGate,
        driver: &mut Driver,
        tree: &T,
    ) -> Vec<AnimationHandle> {
        if !self.watcher.observe(gate) {
            return Vec::new();
        }

        tracing::info!("Playing landing reveal ({} tweens)", self.tweens.len());
        self.tweens
            .iter()
            .cloned()
            .map(|spec| driver.play(tree, spec))
            .collect()
    }
}

impl Default for LandingReveal {
    fn default() -> Self {
        Self::standard()
    }
}
