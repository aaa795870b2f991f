//! Player intent, already reduced from raw devices to booleans.

/// What the player wants this frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlayerIntent {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    /// Fire button currently held.
    pub fire: bool,
}

/// Edge trigger for manual fire: one shot per press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FireLatch {
    can_fire: bool,
}

impl Default for FireLatch {
    fn default() -> Self {
        Self { can_fire: true }
    }
}

impl FireLatch {
    /// Feed the held state of the fire button; returns `true` when a manual
    /// shot should be taken.
    ///
    /// While rapid fire is active presses are ignored (auto-fire takes over)
    /// and do not close the latch.
    pub fn update(&mut self, fire_held: bool, rapid_fire_active: bool) -> bool {
        if !fire_held {
            self.can_fire = true;
            return false;
        }
        if self.can_fire && !rapid_fire_active {
            self.can_fire = false;
            return true;
        }
        false
    }

    /// Reopen after a press that produced no shot, so it is not lost to the
    /// fire-rate cooldown.
    pub fn rearm(&mut self) {
        self.can_fire = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn holding_fires_once_until_release() {
        let mut latch = FireLatch::default();
        assert!(latch.update(true, false));
        assert!(!latch.update(true, false));
        assert!(!latch.update(false, false));
        assert!(latch.update(true, false));
    }

    #[test]
    fn rearmed_latch_fires_on_the_held_press() {
        let mut latch = FireLatch::default();
        assert!(latch.update(true, false));
        latch.rearm();
        assert!(latch.update(true, false));
        assert!(!latch.update(true, false));
    }

    #[test]
    fn rapid_fire_suppresses_manual_shots() {
        let mut latch = FireLatch::default();
        assert!(!latch.update(true, true));
        // Latch stays open: once rapid fire ends the held button fires.
        assert!(latch.update(true, false));
    }
}
