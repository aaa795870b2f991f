//! Power-up tutorial gate.
//!
//! The first time each power-up kind appears, a short explanation pauses the
//! game until the player dismisses it.  While a tutorial is open the session
//! skips all gameplay work.

use std::collections::BTreeSet;

use crate::actor::PowerUpKind;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tutorial {
    enabled: bool,
    /// Kinds with a pending announcement.
    announced: BTreeSet<PowerUpKind>,
    /// Kinds the player has already seen explained.
    explained: BTreeSet<PowerUpKind>,
    active: Option<PowerUpKind>,
}

impl Tutorial {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            ..Self::default()
        }
    }

    /// A power-up of `kind` just spawned.  Returns `true` if a tutorial
    /// should be scheduled for it.
    pub fn announce(&mut self, kind: PowerUpKind) -> bool {
        self.enabled && !self.explained.contains(&kind) && self.announced.insert(kind)
    }

    /// Open the tutorial for `kind` if nothing else is showing.
    ///
    /// A kind that could not be opened may be announced again later.
    pub fn open(&mut self, kind: PowerUpKind) -> bool {
        self.announced.remove(&kind);
        if self.active.is_some() || self.explained.contains(&kind) {
            return false;
        }
        self.explained.insert(kind);
        self.active = Some(kind);
        true
    }

    /// Close the open tutorial, if any.
    pub fn dismiss(&mut self) -> Option<PowerUpKind> {
        self.active.take()
    }

    #[inline]
    pub fn active(&self) -> Option<PowerUpKind> {
        self.active
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.active.is_some()
    }

    pub fn is_explained(&self, kind: PowerUpKind) -> bool {
        self.explained.contains(&kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_kind_is_announced_once() {
        let mut tutorial = Tutorial::new(true);
        assert!(tutorial.announce(PowerUpKind::Shield));
        assert!(!tutorial.announce(PowerUpKind::Shield));
        assert!(tutorial.open(PowerUpKind::Shield));
        assert!(tutorial.is_paused());
        assert_eq!(tutorial.dismiss(), Some(PowerUpKind::Shield));
        assert!(!tutorial.announce(PowerUpKind::Shield));
        assert!(tutorial.is_explained(PowerUpKind::Shield));
    }

    #[test]
    fn busy_gate_lets_kind_come_back() {
        let mut tutorial = Tutorial::new(true);
        tutorial.announce(PowerUpKind::Shield);
        tutorial.announce(PowerUpKind::RapidFire);
        assert!(tutorial.open(PowerUpKind::Shield));
        assert!(!tutorial.open(PowerUpKind::RapidFire));
        tutorial.dismiss();
        assert!(tutorial.announce(PowerUpKind::RapidFire));
    }

    #[test]
    fn disabled_gate_never_announces() {
        let mut tutorial = Tutorial::new(false);
        assert!(!tutorial.announce(PowerUpKind::Health));
        assert!(!tutorial.is_paused());
    }
}
