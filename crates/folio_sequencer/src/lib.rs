// SPDX-License-Identifier: MIT OR Apache-2.0
//! Animation sequencing for the folio portfolio page.
//!
//! This crate provides the page's motion logic, independent of any
//! browser:
//! - Intro sequencer (masked entrance that opens the reveal gate)
//! - Landing reveal (one-shot batch played on the gate's opening edge)
//! - Pointer parallax
//! - Scroll reveal for the "about" panel
//!
//! ## Architecture
//!
//! The sequencers are built on:
//! - A headless driver playing tweens and timelines frame by frame
//! - A [`RenderTree`] abstraction over the animated elements
//! - Scroll triggers evaluated against a [`Viewport`]
//! - Events instead of callbacks: the driver reports progress, completion
//!   and scroll crossings, and the caller routes them

pub mod about;
pub mod driver;
pub mod ease;
pub mod intro;
pub mod landing;
pub mod parallax;
pub mod registry;
pub mod reveal;
pub mod scene;
pub mod scroll;
pub mod target;
pub mod timeline;
pub mod tween;
pub mod value;

pub use about::{ScrollRevealPhase, ScrollRevealSequencer, ScrollRevealSettings};
pub use driver::{AnimationHandle, Driver, DriverEvent};
pub use ease::{Ease, EaseDirection, EaseParseError};
pub use intro::{IntroPhase, IntroSequencer, IntroSettings};
pub use landing::LandingReveal;
pub use parallax::{ParallaxLayer, ParallaxSettings, ParallaxTracker, PointerSample};
pub use registry::ElementRegistry;
pub use reveal::{RevealGate, RevealWatcher};
pub use scene::{Bounds, Element, RenderTree, Scene};
pub use scroll::{
    Anchor, ScrollEdge, ScrollPosition, ScrollPositionParseError, ScrollTrigger, TriggerId,
    Viewport,
};
pub use target::{ElementId, Target};
pub use timeline::{Offset, OffsetParseError, Step, Timeline, TimelineBuilder, TimelineError};
pub use tween::TweenSpec;
pub use value::{Property, PropertyMap, Unit, Value};
