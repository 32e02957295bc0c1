//! Phase timers
//!
//! One scheduler per session holding at most one armed timer. Arming a new
//! timer cancels the old one, so two timers can never race on the same
//! session. Time is a logical offset from session start.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::types::Phase;
use crate::{ADVANCE_MS, COUNTDOWN_TICKS, HOLD_TICKS, PREPARATION_MS, TICK_INTERVAL_MS};

/// Phase duration table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhaseTimings {
    pub preparation_ms: u64,
    pub tick_interval_ms: u64,
    pub countdown_ticks: u32,
    pub hold_ticks: u32,
    pub advance_ms: u64,
}

impl Default for PhaseTimings {
    fn default() -> Self {
        Self {
            preparation_ms: PREPARATION_MS,
            tick_interval_ms: TICK_INTERVAL_MS,
            countdown_ticks: COUNTDOWN_TICKS,
            hold_ticks: HOLD_TICKS,
            advance_ms: ADVANCE_MS,
        }
    }
}

/// How a phase is timed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseTimer {
    /// Single-shot delay
    Once(Duration),
    /// `ticks` firings, `every` apart
    Interval { every: Duration, ticks: u32 },
}

impl PhaseTimings {
    /// Timer for a phase, `None` for phases that wait on frames
    pub fn for_phase(&self, phase: Phase) -> Option<PhaseTimer> {
        let every = Duration::from_millis(self.tick_interval_ms);
        match phase {
            Phase::Preparation => Some(PhaseTimer::Once(Duration::from_millis(self.preparation_ms))),
            Phase::Countdown => Some(PhaseTimer::Interval { every, ticks: self.countdown_ticks }),
            Phase::Hold => Some(PhaseTimer::Interval { every, ticks: self.hold_ticks }),
            Phase::Advance => Some(PhaseTimer::Once(Duration::from_millis(self.advance_ms))),
            Phase::Idle | Phase::Fixed | Phase::Finished => None,
        }
    }
}

/// A single firing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerFire {
    /// Phase the timer was armed for
    pub phase: Phase,
    /// Deadline this firing was scheduled for
    pub at: Duration,
    /// Ticks left after this one; 0 means the timer is done
    pub remaining: u32,
}

#[derive(Debug, Clone)]
struct ArmedTimer {
    phase: Phase,
    deadline: Duration,
    every: Duration,
    remaining: u32,
}

/// Holds the session's one outstanding timer
#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    armed: Option<ArmedTimer>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm a timer for `phase` starting at `now`, cancelling any other
    pub fn arm(&mut self, phase: Phase, timer: PhaseTimer, now: Duration) {
        let (every, remaining) = match timer {
            PhaseTimer::Once(delay) => (delay, 1),
            PhaseTimer::Interval { every, ticks } => (every, ticks),
        };
        self.armed = Some(ArmedTimer {
            phase,
            deadline: now + every,
            every,
            remaining,
        });
    }

    /// Drop the outstanding timer, if any
    pub fn cancel(&mut self) {
        self.armed = None;
    }

    /// When the next firing is due
    pub fn next_deadline(&self) -> Option<Duration> {
        self.armed.as_ref().map(|t| t.deadline)
    }

    /// Pop one firing due at or before `now`
    ///
    /// Interval timers are rescheduled from their previous deadline, not from
    /// `now`, so late polling does not stretch the phase.
    pub fn fire_due(&mut self, now: Duration) -> Option<TimerFire> {
        let timer = self.armed.as_mut()?;
        if timer.deadline > now {
            return None;
        }

        timer.remaining = timer.remaining.saturating_sub(1);
        let fire = TimerFire {
            phase: timer.phase,
            at: timer.deadline,
            remaining: timer.remaining,
        };

        if timer.remaining == 0 {
            self.armed = None;
        } else {
            timer.deadline += timer.every;
        }
        Some(fire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secs(s: f64) -> Duration {
        Duration::from_millis((s * 1000.0).round() as u64)
    }

    #[test]
    fn test_phase_table() {
        let t = PhaseTimings::default();
        assert_eq!(t.for_phase(Phase::Preparation), Some(PhaseTimer::Once(Duration::from_millis(1500))));
        assert_eq!(
            t.for_phase(Phase::Hold),
            Some(PhaseTimer::Interval { every: Duration::from_secs(1), ticks: 5 })
        );
        assert_eq!(t.for_phase(Phase::Idle), None);
        assert_eq!(t.for_phase(Phase::Fixed), None);
    }

    #[test]
    fn test_once_fires_once() {
        let mut s = Scheduler::new();
        s.arm(Phase::Preparation, PhaseTimer::Once(secs(1.5)), secs(0.0));
        assert!(s.fire_due(secs(1.4)).is_none());
        let fire = s.fire_due(secs(1.5)).unwrap();
        assert_eq!(fire.remaining, 0);
        assert_eq!(fire.at, secs(1.5));
        assert_eq!(s.next_deadline(), None);
        assert!(s.fire_due(secs(10.0)).is_none());
    }

    #[test]
    fn test_interval_ticks_then_disarms() {
        let mut s = Scheduler::new();
        s.arm(Phase::Countdown, PhaseTimer::Interval { every: secs(1.0), ticks: 3 }, secs(0.0));
        // Polled late: all three ticks come out in order
        let remaining: Vec<u32> = std::iter::from_fn(|| s.fire_due(secs(5.0)))
            .map(|f| f.remaining)
            .collect();
        assert_eq!(remaining, vec![2, 1, 0]);
        assert_eq!(s.next_deadline(), None);
    }

    #[test]
    fn test_rearm_cancels_previous() {
        let mut s = Scheduler::new();
        s.arm(Phase::Countdown, PhaseTimer::Interval { every: secs(1.0), ticks: 3 }, secs(0.0));
        s.arm(Phase::Advance, PhaseTimer::Once(secs(1.0)), secs(0.5));
        assert_eq!(s.next_deadline(), Some(secs(1.5)));

        assert!(s.fire_due(secs(1.0)).is_none(), "old interval must not tick");
        let fire = s.fire_due(secs(1.5)).unwrap();
        assert_eq!(fire.phase, Phase::Advance);
        assert_eq!(fire.remaining, 0);
        assert!(s.fire_due(secs(10.0)).is_none());
    }

    #[test]
    fn test_cancel() {
        let mut s = Scheduler::new();
        s.arm(Phase::Hold, PhaseTimer::Interval { every: secs(1.0), ticks: 5 }, secs(0.0));
        s.cancel();
        assert_eq!(s.next_deadline(), None);
        assert!(s.fire_due(secs(100.0)).is_none());
    }
}
