//! Power-up effect engine.
//!
//! [`apply`] turns a collected power-up into a change on the ship.  Timed
//! effects are [`EffectTimer`]s on the ship; [`expire`] runs from the ship's
//! own update and switches lapsed timers back off, restoring the stat they
//! overrode to its *base* value.  Re-collecting a power-up only moves the end
//! time, so an earlier activation never reverts a later one.

use crate::actor::PowerUpKind;
use crate::config::GameConfig;
use crate::spaceship::Spaceship;
use crate::timer::EffectTimer;

/// What happened when a power-up was applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Applied {
    /// Health restored; carries the new health.
    Healed(u32),
    /// A timed effect is now active until the given session time.
    Timed { kind: PowerUpKind, until: f64 },
    /// Instant effect that the session must resolve: clear every enemy.
    Napalm,
}

/// How long a timed kind lasts; `None` for instant kinds.
pub fn duration_ms(kind: PowerUpKind, config: &GameConfig) -> Option<f32> {
    match kind {
        PowerUpKind::RapidFire => Some(config.rapid_fire_ms),
        PowerUpKind::Shield => Some(config.shield_ms),
        PowerUpKind::TripleShot => Some(config.triple_shot_ms),
        PowerUpKind::SpeedBoost => Some(config.speed_boost_ms),
        PowerUpKind::StrongLaser => Some(config.strong_laser_ms),
        PowerUpKind::SupportShips => Some(config.support_ships_ms),
        PowerUpKind::Health | PowerUpKind::NapalmBomb => None,
    }
}

/// The ship's timer for a timed kind.
pub fn timer_mut(ship: &mut Spaceship, kind: PowerUpKind) -> Option<&mut EffectTimer> {
    let timers = &mut ship.timers;
    match kind {
        PowerUpKind::RapidFire => Some(&mut timers.rapid_fire),
        PowerUpKind::Shield => Some(&mut timers.shield),
        PowerUpKind::TripleShot => Some(&mut timers.triple_shot),
        PowerUpKind::SpeedBoost => Some(&mut timers.speed_boost),
        PowerUpKind::StrongLaser => Some(&mut timers.strong_laser),
        PowerUpKind::SupportShips => Some(&mut timers.support_ships),
        PowerUpKind::Health | PowerUpKind::NapalmBomb => None,
    }
}

/// Read-only counterpart of [`timer_mut`].
pub fn timer(ship: &Spaceship, kind: PowerUpKind) -> Option<EffectTimer> {
    let timers = &ship.timers;
    match kind {
        PowerUpKind::RapidFire => Some(timers.rapid_fire),
        PowerUpKind::Shield => Some(timers.shield),
        PowerUpKind::TripleShot => Some(timers.triple_shot),
        PowerUpKind::SpeedBoost => Some(timers.speed_boost),
        PowerUpKind::StrongLaser => Some(timers.strong_laser),
        PowerUpKind::SupportShips => Some(timers.support_ships),
        PowerUpKind::Health | PowerUpKind::NapalmBomb => None,
    }
}

/// Apply `kind` to `ship` at session time `now`.
pub fn apply(kind: PowerUpKind, ship: &mut Spaceship, now: f64, config: &GameConfig) -> Applied {
    match kind {
        PowerUpKind::Health => {
            ship.heal(1);
            Applied::Healed(ship.health)
        }
        PowerUpKind::NapalmBomb => Applied::Napalm,
        timed => {
            let duration = duration_ms(timed, config).unwrap_or_default();
            match timed {
                PowerUpKind::RapidFire => ship.fire_rate_ms = config.ship_rapid_fire_rate_ms,
                PowerUpKind::SpeedBoost => ship.max_speed = ship.base_max_speed * 2.0,
                _ => {}
            }
            let mut until = now;
            if let Some(timer) = timer_mut(ship, timed) {
                timer.activate(now, duration);
                until = now + duration as f64;
            }
            Applied::Timed { kind: timed, until }
        }
    }
}

/// Switch off every timer whose end time has passed and restore base stats.
///
/// Returns the kinds that expired.
pub fn expire(ship: &mut Spaceship, now: f64) -> Vec<PowerUpKind> {
    let mut expired = Vec::new();
    for kind in PowerUpKind::ALL {
        let lapsed = timer_mut(ship, kind).is_some_and(|timer| timer.expire(now));
        if !lapsed {
            continue;
        }
        match kind {
            PowerUpKind::RapidFire => ship.fire_rate_ms = ship.base_fire_rate_ms,
            PowerUpKind::SpeedBoost => ship.max_speed = ship.base_max_speed,
            _ => {}
        }
        expired.push(kind);
    }
    expired
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ship() -> (Spaceship, GameConfig) {
        let config = GameConfig {
            ship_entrance_ms: 0.0,
            ..GameConfig::default()
        };
        (Spaceship::new(&config), config)
    }

    #[test]
    fn rapid_fire_overrides_then_restores_fire_rate() {
        let (mut ship, config) = ship();
        apply(PowerUpKind::RapidFire, &mut ship, 0.0, &config);
        assert_eq!(ship.fire_rate_ms, config.ship_rapid_fire_rate_ms);
        assert!(expire(&mut ship, config.rapid_fire_ms as f64 - 1.0).is_empty());
        assert_eq!(expire(&mut ship, config.rapid_fire_ms as f64), vec![PowerUpKind::RapidFire]);
        assert_eq!(ship.fire_rate_ms, config.ship_fire_rate_ms);
    }

    #[test]
    fn speed_boost_doubles_base_speed_once() {
        let (mut ship, config) = ship();
        apply(PowerUpKind::SpeedBoost, &mut ship, 0.0, &config);
        apply(PowerUpKind::SpeedBoost, &mut ship, 10.0, &config);
        assert_eq!(ship.max_speed, config.ship_max_speed * 2.0);
        expire(&mut ship, 1.0e9);
        assert_eq!(ship.max_speed, config.ship_max_speed);
    }

    #[test]
    fn recollecting_extends_without_early_revert() {
        let (mut ship, config) = ship();
        let d = config.speed_boost_ms as f64;
        apply(PowerUpKind::SpeedBoost, &mut ship, 0.0, &config);
        apply(PowerUpKind::SpeedBoost, &mut ship, d - 100.0, &config);
        // The first activation's end time passes: still boosted.
        assert!(expire(&mut ship, d).is_empty());
        assert_eq!(ship.max_speed, config.ship_max_speed * 2.0);
        assert_eq!(expire(&mut ship, 2.0 * d - 100.0), vec![PowerUpKind::SpeedBoost]);
    }

    #[test]
    fn shield_is_a_single_state() {
        let (mut ship, config) = ship();
        apply(PowerUpKind::Shield, &mut ship, 0.0, &config);
        apply(PowerUpKind::Shield, &mut ship, 5.0, &config);
        assert!(ship.shield_active());
        assert_eq!(ship.timers.shield, EffectTimer::ActiveUntil(5.0 + config.shield_ms as f64));
    }

    #[test]
    fn health_and_napalm_are_instant() {
        let (mut ship, config) = ship();
        ship.health = 1;
        assert_eq!(apply(PowerUpKind::Health, &mut ship, 0.0, &config), Applied::Healed(2));
        assert_eq!(apply(PowerUpKind::NapalmBomb, &mut ship, 0.0, &config), Applied::Napalm);
        assert!(duration_ms(PowerUpKind::Health, &config).is_none());
        assert!(timer(&ship, PowerUpKind::NapalmBomb).is_none());
    }
}
