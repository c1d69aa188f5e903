// SPDX-License-Identifier: MIT OR Apache-2.0
//! The reveal gate: whether the page content is mounted.

/// One-way "content visible" flag
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RevealGate {
    content_visible: bool,
}

impl RevealGate {
    /// Create a closed gate
    pub fn new() -> Self {
        Self::default()
    }

    /// Open the gate. Returns true only on the call that actually opened it.
    pub fn open(&mut self) -> bool {
        let opened = !self.content_visible;
        self.content_visible = true;
        opened
    }

    /// Whether content should be mounted
    pub fn is_open(&self) -> bool {
        self.content_visible
    }
}

/// Detects the closed-to-open edge of a [`RevealGate`] from the reader side
#[derive(Debug, Clone, Copy, Default)]
pub struct RevealWatcher {
    seen_open: bool,
}

impl RevealWatcher {
    /// Create a watcher that has seen a closed gate
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true the first time `gate` is observed open
    pub fn observe(&mut self, gate: &RevealGate) -> bool {
        if gate.is_open() && !self.seen_open {
            self.seen_open = true;
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gate_is_monotonic() {
        let mut gate = RevealGate::new();
        assert!(!gate.is_open());
        assert!(gate.open());
        assert!(gate.is_open());
        assert!(!gate.open());
        assert!(gate.is_open());
    }

    #[test]
    fn test_watcher_sees_one_edge() {
        let mut gate = RevealGate::new();
        let mut watcher = RevealWatcher::new();

        assert!(!watcher.observe(&gate));
        gate.open();
        assert!(watcher.observe(&gate));
        assert!(!watcher.observe(&gate));
        gate.open();
        assert!(!watcher.observe(&gate));
    }
}
