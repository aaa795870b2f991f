//! Simulated-time timers.
//!
//! Everything here is advanced by the same frame delta that drives the
//! entities, so a paused session freezes every timer at once.

/// A timed effect: either off, or on until an absolute session timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum EffectTimer {
    #[default]
    Inactive,
    /// Active until the session clock reaches this timestamp (ms).
    ActiveUntil(f64),
}

impl EffectTimer {
    /// Start (or extend) the effect so it ends `duration_ms` from `now`.
    ///
    /// Re-activating an active effect moves the end time; it never stacks.
    pub fn activate(&mut self, now: f64, duration_ms: f32) {
        *self = EffectTimer::ActiveUntil(now + duration_ms as f64);
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        matches!(self, EffectTimer::ActiveUntil(_))
    }

    /// Milliseconds left, or 0 when inactive.
    pub fn remaining_ms(&self, now: f64) -> f32 {
        match *self {
            EffectTimer::Inactive => 0.0,
            EffectTimer::ActiveUntil(until) => (until - now).max(0.0) as f32,
        }
    }

    /// Switch back to `Inactive` once `now` has reached the end time.
    ///
    /// Returns `true` only on the call that performs the transition.
    pub fn expire(&mut self, now: f64) -> bool {
        match *self {
            EffectTimer::ActiveUntil(until) if now >= until => {
                *self = EffectTimer::Inactive;
                true
            }
            _ => false,
        }
    }
}

#[derive(Debug, Clone)]
struct Scheduled<E> {
    remaining_ms: f32,
    event: E,
}

/// Per-session list of one-shot deferred events.
///
/// Events fire from [`Scheduler::advance`] in the order they were scheduled,
/// once their delay has fully elapsed.
#[derive(Debug, Clone)]
pub struct Scheduler<E> {
    entries: Vec<Scheduled<E>>,
}

impl<E> Default for Scheduler<E> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<E> Scheduler<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `event` to fire after `delay_ms` of simulated time.
    pub fn schedule(&mut self, delay_ms: f32, event: E) {
        self.entries.push(Scheduled {
            remaining_ms: delay_ms.max(0.0),
            event,
        });
    }

    /// Advance every entry by `delta_ms` and return the events that came due.
    pub fn advance(&mut self, delta_ms: f32) -> Vec<E> {
        let mut due = Vec::new();
        let mut pending = Vec::with_capacity(self.entries.len());
        for mut entry in self.entries.drain(..) {
            entry.remaining_ms -= delta_ms;
            if entry.remaining_ms <= 0.0 {
                due.push(entry.event);
            } else {
                pending.push(entry);
            }
        }
        self.entries = pending;
        due
    }

    /// Drop every queued event matching `pred`.
    pub fn cancel_where(&mut self, mut pred: impl FnMut(&E) -> bool) {
        self.entries.retain(|entry| !pred(&entry.event));
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
