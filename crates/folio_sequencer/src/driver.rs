// SPDX-License-Identifier: MIT OR Apache-2.0
//! Animation driver: plays tweens and timelines against a render tree.
//!
//! The driver is advanced explicitly with [`Driver::tick`] (one call per
//! animation frame) and reports what happened as [`DriverEvent`]s rather
//! than invoking callbacks. Standalone tweens overwrite: the newest tween
//! to start on an element/property pair takes it over from older ones.

use crate::ease::Ease;
use crate::scene::RenderTree;
use crate::scroll::{ScrollEdge, ScrollTrigger, TriggerId, TriggerState, Viewport};
use crate::target::{ElementId, Target};
use crate::timeline::{resolve_step, Step, Timeline};
use crate::tween::TweenSpec;
use crate::value::{Property, PropertyMap, Value};
use indexmap::{IndexMap, IndexSet};
use uuid::Uuid;

/// Handle to a playing tween or timeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AnimationHandle(pub Uuid);

impl AnimationHandle {
    /// Create a new random handle
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for AnimationHandle {
    fn default() -> Self {
        Self::new()
    }
}

/// Something the driver observed during a frame
#[derive(Debug, Clone, PartialEq)]
pub enum DriverEvent {
    /// Linear progress of a step that asked for it
    Progress {
        /// Owning animation
        handle: AnimationHandle,
        /// Step index within the animation
        step: usize,
        /// Progress in 0..=1
        progress: f32,
    },
    /// An animation finished and was dropped
    Complete {
        /// Finished animation
        handle: AnimationHandle,
    },
    /// A scroll trigger crossed an edge
    Scroll {
        /// Trigger that fired
        trigger: TriggerId,
        /// Which edge
        edge: ScrollEdge,
    },
}

/// Per-element playback state
#[derive(Debug, Clone)]
struct ElementTrack {
    element: ElementId,
    started: bool,
    from: PropertyMap,
    /// Properties taken over by a newer tween
    released: IndexSet<Property>,
}

#[derive(Debug, Clone)]
struct StepPlayback {
    step: Step,
    tracks: Vec<ElementTrack>,
    finished: bool,
}

#[derive(Debug, Clone)]
struct Playback {
    name: String,
    /// Driver time at local time zero
    origin: f32,
    steps: Vec<StepPlayback>,
    overwrite: bool,
}

impl Playback {
    fn new(timeline: Timeline, origin: f32, overwrite: bool) -> Self {
        let steps = timeline
            .steps()
            .iter()
            .map(|step| StepPlayback {
                tracks: step
                    .elements
                    .iter()
                    .map(|&element| ElementTrack {
                        element,
                        started: false,
                        from: PropertyMap::new(),
                        released: IndexSet::new(),
                    })
                    .collect(),
                step: step.clone(),
                finished: false,
            })
            .collect();

        Self {
            name: timeline.name,
            origin,
            steps,
            overwrite,
        }
    }

    fn is_finished(&self) -> bool {
        self.steps.iter().all(|s| s.finished)
    }

    fn release(&mut self, element: ElementId, properties: &[Property]) {
        for step in &mut self.steps {
            for track in step.tracks.iter_mut().filter(|t| t.element == element) {
                track.released.extend(properties.iter().copied());
            }
        }
    }
}

/// Element/property pairs a standalone tween claimed this frame
struct Claim {
    index: usize,
    element: ElementId,
    properties: Vec<Property>,
}

/// Headless animation engine
#[derive(Debug, Default)]
pub struct Driver {
    time: f32,
    playbacks: IndexMap<AnimationHandle, Playback>,
    triggers: Vec<TriggerState>,
    pending: Vec<DriverEvent>,
}

impl Driver {
    /// Create an idle driver at time zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Seconds elapsed since the driver was created
    pub fn time(&self) -> f32 {
        self.time
    }

    /// Number of live animations
    pub fn active_count(&self) -> usize {
        self.playbacks.len()
    }

    /// Check whether an animation is still live
    pub fn is_active(&self, handle: AnimationHandle) -> bool {
        self.playbacks.contains_key(&handle)
    }

    /// Apply values immediately, without animating
    pub fn set<T: RenderTree + ?Sized>(&self, tree: &mut T, target: &Target, properties: &PropertyMap) {
        for element in tree.resolve(target) {
            for (&property, &value) in properties {
                tree.set_value(element, property, value);
            }
        }
    }

    /// Play a standalone tween starting `spec.delay` seconds from now
    pub fn play<T: RenderTree + ?Sized>(&mut self, tree: &T, spec: TweenSpec) -> AnimationHandle {
        let origin = self.time + spec.delay;
        let step = resolve_step(tree, spec, 0.0, Ease::default());
        let timeline = Timeline::single("tween", step);
        self.insert(Playback::new(timeline, origin, true))
    }

    /// Play a timeline starting now
    pub fn play_sequence(&mut self, timeline: Timeline) -> AnimationHandle {
        tracing::debug!(
            "Playing timeline '{}' ({:.2}s, {} steps)",
            timeline.name,
            timeline.duration(),
            timeline.steps().len()
        );
        self.insert(Playback::new(timeline, self.time, false))
    }

    fn insert(&mut self, playback: Playback) -> AnimationHandle {
        let handle = AnimationHandle::new();
        self.playbacks.insert(handle, playback);
        handle
    }

    /// Stop an animation where it is. Returns false if it was not live.
    pub fn kill(&mut self, handle: AnimationHandle) -> bool {
        match self.playbacks.shift_remove(&handle) {
            Some(playback) => {
                tracing::debug!("Killed animation '{}'", playback.name);
                true
            }
            None => false,
        }
    }

    /// Watch an element's scroll position. The trigger is evaluated
    /// immediately; crossings are delivered with the next batch of events.
    pub fn register_scroll_trigger<T: RenderTree + ?Sized>(
        &mut self,
        tree: &T,
        viewport: &Viewport,
        trigger: ScrollTrigger,
    ) -> TriggerId {
        let mut state = TriggerState::new(tree, trigger);
        let id = state.id;
        for edge in state.update(tree, viewport) {
            self.pending.push(DriverEvent::Scroll { trigger: id, edge });
        }
        self.triggers.push(state);
        id
    }

    /// Stop watching a trigger
    pub fn remove_scroll_trigger(&mut self, id: TriggerId) -> bool {
        let before = self.triggers.len();
        self.triggers.retain(|t| t.id != id);
        self.triggers.len() != before
    }

    /// Re-evaluate every trigger after the viewport scrolled or resized
    pub fn update_scroll<T: RenderTree + ?Sized>(
        &mut self,
        tree: &T,
        viewport: &Viewport,
    ) -> Vec<DriverEvent> {
        for state in &mut self.triggers {
            for edge in state.update(tree, viewport) {
                self.pending.push(DriverEvent::Scroll {
                    trigger: state.id,
                    edge,
                });
            }
        }
        std::mem::take(&mut self.pending)
    }

    /// Advance every animation by `delta_time` seconds and render it
    pub fn tick<T: RenderTree + ?Sized>(&mut self, tree: &mut T, delta_time: f32) -> Vec<DriverEvent> {
        self.time += delta_time.max(0.0);
        let mut events = std::mem::take(&mut self.pending);
        let mut claims = Vec::new();
        let mut finished = Vec::new();

        for (index, (&handle, playback)) in self.playbacks.iter_mut().enumerate() {
            let local = self.time - playback.origin;
            let overwrite = playback.overwrite;

            for (step_index, step) in playback.steps.iter_mut().enumerate() {
                if step.finished || local < step.step.start {
                    continue;
                }

                render_step(tree, step, local, |element, properties| {
                    if overwrite {
                        claims.push(Claim {
                            index,
                            element,
                            properties,
                        });
                    }
                });

                let progress = step.step.progress_at(local);
                if step.step.report_progress {
                    events.push(DriverEvent::Progress {
                        handle,
                        step: step_index,
                        progress,
                    });
                }
                if progress >= 1.0 {
                    step.finished = true;
                }
            }

            if playback.is_finished() {
                finished.push(handle);
            }
        }

        // Newer standalone tweens take properties away from older ones
        for claim in claims {
            for (_, other) in self
                .playbacks
                .iter_mut()
                .take(claim.index)
                .filter(|(_, p)| p.overwrite)
            {
                other.release(claim.element, &claim.properties);
            }
        }

        for handle in finished {
            self.playbacks.shift_remove(&handle);
            events.push(DriverEvent::Complete { handle });
        }

        events
    }
}

/// Render every started element of a step at `local` time. `on_start` is
/// called once per element when it captures its start values.
fn render_step<T, F>(tree: &mut T, playback: &mut StepPlayback, local: f32, mut on_start: F)
where
    T: RenderTree + ?Sized,
    F: FnMut(ElementId, Vec<Property>),
{
    let step = &playback.step;
    for (index, track) in playback.tracks.iter_mut().enumerate() {
        let element_start = step.element_start(index);
        if local < element_start {
            continue;
        }

        if !track.started {
            track.started = true;
            for &property in step.properties.keys() {
                if let Some(value) = tree.value(track.element, property) {
                    track.from.insert(property, value);
                }
            }
            on_start(track.element, step.properties.keys().copied().collect());
        }

        let t = if step.duration <= 0.0 {
            1.0
        } else {
            (local - element_start) / step.duration
        };
        let eased = step.ease.apply(t);

        for (property, to) in &step.properties {
            if track.released.contains(property) {
                continue;
            }
            if let Some(from) = track.from.get(property) {
                let value: Value = from.lerp(to, eased);
                tree.set_value(track.element, *property, value);
            }
        }
    }
}
