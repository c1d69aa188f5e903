// SPDX-License-Identifier: MIT OR Apache-2.0
//! Scripted user input for headless sessions.
//!
//! A script is a RON list of [`InputEvent`]s applied in order, for example
//! `[Wait(3.0), PointerMove(0.0, 300.0), Scroll(900.0), Wait(2.0)]`.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Script loading errors
#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    /// File could not be read
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// File is not a valid event list
    #[error("Parse error: {0}")]
    Parse(#[from] ron::error::SpannedError),

    /// An event carries an unusable value
    #[error("Event {index}: {reason}")]
    Invalid {
        /// Position in the script
        index: usize,
        /// What is wrong
        reason: String,
    },
}

/// One user input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    /// Let frames run for this many seconds
    Wait(f32),
    /// Pointer moved to viewport coordinates
    PointerMove(f32, f32),
    /// Scroll to an absolute offset
    Scroll(f32),
    /// Press the landing section's scroll-down button
    ClickScrollDown,
    /// Viewport resized
    Resize(f32, f32),
}

impl InputEvent {
    fn validate(&self) -> Result<(), String> {
        let finite = |values: &[f32]| values.iter().all(|v| v.is_finite());
        match *self {
            InputEvent::Wait(seconds) if !(seconds >= 0.0 && seconds.is_finite()) => {
                Err(format!("wait must be a non-negative duration, got {seconds}"))
            }
            InputEvent::PointerMove(x, y) if !finite(&[x, y]) => {
                Err("pointer position must be finite".to_string())
            }
            InputEvent::Scroll(y) if !y.is_finite() => Err("scroll offset must be finite".to_string()),
            InputEvent::Resize(w, h) if !finite(&[w, h]) || w < 0.0 || h < 0.0 => {
                Err(format!("invalid viewport size {w}x{h}"))
            }
            _ => Ok(()),
        }
    }
}

/// Ordered input events
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Script {
    /// Events in the order they are applied
    pub events: Vec<InputEvent>,
}

impl Script {
    /// Parse a RON event list
    pub fn from_ron(text: &str) -> Result<Self, ScriptError> {
        let events: Vec<InputEvent> = ron::from_str(text)?;
        for (index, event) in events.iter().enumerate() {
            event
                .validate()
                .map_err(|reason| ScriptError::Invalid { index, reason })?;
        }
        Ok(Self { events })
    }

    /// Load a script file
    pub fn load(path: &Path) -> Result<Self, ScriptError> {
        let content = std::fs::read_to_string(path)?;
        let script = Self::from_ron(&content)?;
        tracing::info!("Loaded {} input events from {}", script.events.len(), path.display());
        Ok(script)
    }

    /// Walk through the whole page: watch the intro, wiggle the pointer,
    /// scroll past the about panel, then jump to the contact section
    pub fn demo(viewport_width: f32, viewport_height: f32) -> Self {
        Self {
            events: vec![
                InputEvent::PointerMove(viewport_width * 0.5, viewport_height * 0.5),
                InputEvent::Wait(3.0),
                InputEvent::PointerMove(0.0, viewport_height * 0.5),
                InputEvent::Wait(0.25),
                InputEvent::PointerMove(viewport_width, viewport_height * 0.5),
                InputEvent::Wait(1.0),
                InputEvent::Scroll(viewport_height * 0.25),
                InputEvent::Wait(0.5),
                InputEvent::Scroll(viewport_height * 0.75),
                InputEvent::Wait(2.5),
                InputEvent::ClickScrollDown,
                InputEvent::Wait(1.0),
            ],
        }
    }

    /// Total waiting time
    pub fn duration(&self) -> f32 {
        self.events
            .iter()
            .map(|event| match event {
                InputEvent::Wait(seconds) => *seconds,
                _ => 0.0,
            })
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_script() {
        let script = Script::from_ron(
            "[Wait(2.5), PointerMove(0.0, 300.0), Scroll(900.0), ClickScrollDown, Resize(800.0, 600.0)]",
        )
        .unwrap();
        assert_eq!(script.events.len(), 5);
        assert_eq!(script.events[1], InputEvent::PointerMove(0.0, 300.0));
        assert_eq!(script.events[3], InputEvent::ClickScrollDown);
        assert_eq!(script.duration(), 2.5);
    }

    #[test]
    fn test_invalid_events_rejected() {
        let result = Script::from_ron("[Wait(1.0), Wait(-1.0)]");
        assert!(matches!(result, Err(ScriptError::Invalid { index: 1, .. })));

        let result = Script::from_ron("[Teleport(1.0)]");
        assert!(matches!(result, Err(ScriptError::Parse(_))));
    }

    #[test]
    fn test_demo_outlasts_intro() {
        let script = Script::demo(1280.0, 720.0);
        assert!(script.duration() > 4.0);
        assert!(script.events.contains(&InputEvent::ClickScrollDown));
        assert!(script.events.iter().all(|event| event.validate().is_ok()));
    }
}
