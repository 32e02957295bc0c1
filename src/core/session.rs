//! Challenge session state machine
//!
//! Phase transitions:
//! - IDLE → PREPARATION: start pose detected on a frame
//! - PREPARATION → COUNTDOWN: 1.5 s single shot
//! - COUNTDOWN → HOLD: after 3 ticks at 1 Hz
//! - HOLD → FIXED: after 5 ticks at 1 Hz, frames live-scored meanwhile
//! - FIXED → ADVANCE: first frame is frozen and scored, exactly once
//! - ADVANCE → IDLE (next challenge) | FINISHED: 1 s single shot
//!
//! [`SessionState`] is a value: each transition returns a new state plus the
//! events it produced. [`ChallengeSession`] is the dispatcher that applies
//! them as frames and clock updates arrive.

use std::time::Duration;

use crate::config::SessionConfig;
use crate::core::aggregator::ResultAggregator;
use crate::core::gate::PoseGate;
use crate::core::scorer::ScoreEvaluator;
use crate::core::timer::{PhaseTimings, Scheduler, TimerFire};
use crate::types::{
    Challenge, CountdownIndicator, OverlayKind, Phase, RenderFrame, ScoreTier, SessionEvent,
    SessionReport, Skeleton,
};

/// Read-only collaborators used by every transition
#[derive(Debug, Clone)]
pub struct SessionRules {
    pub gate: PoseGate,
    pub evaluator: ScoreEvaluator,
    pub timings: PhaseTimings,
    pub aggregator: ResultAggregator,
}

impl SessionRules {
    pub fn from_config(config: &SessionConfig) -> Self {
        Self {
            gate: PoseGate::new(config.scoring),
            evaluator: ScoreEvaluator::new(config.scoring),
            timings: config.timings,
            aggregator: ResultAggregator::new(),
        }
    }
}

/// Result of one transition
#[derive(Debug, Clone)]
pub struct Step {
    pub state: SessionState,
    pub events: Vec<SessionEvent>,
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct SessionState {
    challenges: Vec<Challenge>,
    active_index: usize,
    phase: Phase,
    /// Set at finalization, cleared when the next challenge starts
    frozen_skeleton: Option<Skeleton>,
    display_score: f64,
    message: String,
    countdown_remaining: u32,
    hold_remaining: u32,
    /// Finalization guard for the active challenge
    finalized: bool,
    scheduler: Scheduler,
    /// Logical clock: time since session start
    now: Duration,
    report: Option<SessionReport>,
}

impl SessionState {
    /// Fresh session at t=0, first challenge idle
    ///
    /// Any scores already present on `challenges` are cleared.
    pub fn new(mut challenges: Vec<Challenge>) -> Self {
        for c in &mut challenges {
            c.score = None;
        }
        let message = challenges
            .first()
            .map(|c| c.guide_message.clone())
            .unwrap_or_default();
        let phase = if challenges.is_empty() { Phase::Finished } else { Phase::Idle };
        Self {
            challenges,
            active_index: 0,
            phase,
            frozen_skeleton: None,
            display_score: 0.0,
            message,
            countdown_remaining: 0,
            hold_remaining: 0,
            finalized: false,
            scheduler: Scheduler::new(),
            now: Duration::ZERO,
            report: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn active_index(&self) -> usize {
        self.active_index
    }

    pub fn active_challenge(&self) -> Option<&Challenge> {
        self.challenges.get(self.active_index)
    }

    pub fn challenges(&self) -> &[Challenge] {
        &self.challenges
    }

    pub fn display_score(&self) -> f64 {
        self.display_score
    }

    pub fn frozen_skeleton(&self) -> Option<&Skeleton> {
        self.frozen_skeleton.as_ref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn countdown_remaining(&self) -> u32 {
        self.countdown_remaining
    }

    pub fn hold_remaining(&self) -> u32 {
        self.hold_remaining
    }

    pub fn report(&self) -> Option<&SessionReport> {
        self.report.as_ref()
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    /// When the armed timer next fires, if any
    pub fn next_deadline(&self) -> Option<Duration> {
        self.scheduler.next_deadline()
    }

    pub fn is_finished(&self) -> bool {
        self.phase == Phase::Finished
    }

    /// Fire every timer due at or before `now`
    pub fn advance_to(&self, rules: &SessionRules, now: Duration) -> Step {
        let mut next = self.clone();
        let mut events = Vec::new();
        next.fire_timers(rules, now, &mut events);
        Step { state: next, events }
    }

    /// Handle one detector frame arriving at `now`
    ///
    /// Due timers fire first, so the frame always sees a committed phase.
    pub fn on_frame(&self, rules: &SessionRules, frame: Option<&Skeleton>, now: Duration) -> Step {
        let mut next = self.clone();
        let mut events = Vec::new();
        next.fire_timers(rules, now, &mut events);

        if let Some(skeleton) = frame {
            match next.phase {
                Phase::Idle => {
                    if rules.gate.is_start_pose(skeleton) {
                        next.enter(rules, Phase::Preparation, &mut events);
                    }
                }
                Phase::Hold => {
                    if let Some(challenge) = next.challenges.get(next.active_index) {
                        let score = rules.evaluator.score(challenge, Some(skeleton));
                        next.display_score = score;
                        events.push(SessionEvent::LiveScore { score });
                    }
                }
                Phase::Fixed => next.finalize(rules, skeleton, &mut events),
                Phase::Preparation | Phase::Countdown | Phase::Advance | Phase::Finished => {}
            }
        }

        Step { state: next, events }
    }

    /// Drawing instructions for the current state
    ///
    /// Draws the frozen skeleton once one exists, otherwise `live`.
    pub fn render(&self, live: Option<&Skeleton>) -> RenderFrame {
        let (skeleton, overlay) = match &self.frozen_skeleton {
            Some(frozen) => (Some(frozen.clone()), OverlayKind::Frozen),
            None => (live.cloned(), OverlayKind::Live),
        };
        let (connector, landmark) = overlay.colors();
        let tier = ScoreTier::from_score(self.display_score);
        let hold_remaining = (self.phase == Phase::Hold).then_some(self.hold_remaining);
        let countdown = match self.phase {
            Phase::Countdown => Some(CountdownIndicator::Seconds(self.countdown_remaining)),
            Phase::Hold => Some(CountdownIndicator::Go),
            _ => None,
        };

        RenderFrame {
            phase: self.phase,
            challenge_index: self.active_index,
            challenge_count: self.challenges.len(),
            challenge_name: self
                .active_challenge()
                .map(|c| c.name.clone())
                .unwrap_or_default(),
            skeleton,
            overlay,
            connector_color: connector.to_string(),
            landmark_color: landmark.to_string(),
            guide_message: self.message.clone(),
            score: self.display_score,
            score_tier: tier,
            score_color: tier.color().to_string(),
            countdown,
            hold_remaining,
        }
    }

    fn fire_timers(&mut self, rules: &SessionRules, now: Duration, events: &mut Vec<SessionEvent>) {
        // Clock never runs backwards
        let now = now.max(self.now);
        while let Some(fire) = self.scheduler.fire_due(now) {
            // Timers armed while handling this firing start from its deadline
            self.now = self.now.max(fire.at);
            self.on_timer(rules, fire, events);
        }
        self.now = now;
    }

    fn on_timer(&mut self, rules: &SessionRules, fire: TimerFire, events: &mut Vec<SessionEvent>) {
        if fire.phase != self.phase {
            // Ghost tick from a phase already left
            return;
        }
        match self.phase {
            Phase::Preparation => self.enter(rules, Phase::Countdown, events),
            Phase::Countdown => {
                self.countdown_remaining = fire.remaining;
                events.push(SessionEvent::CountdownTick { remaining: fire.remaining });
                if fire.remaining == 0 {
                    self.enter(rules, Phase::Hold, events);
                }
            }
            Phase::Hold => {
                self.hold_remaining = fire.remaining;
                events.push(SessionEvent::HoldTick { remaining: fire.remaining });
                if fire.remaining == 0 {
                    self.enter(rules, Phase::Fixed, events);
                }
            }
            Phase::Advance => self.advance(rules, events),
            Phase::Idle | Phase::Fixed | Phase::Finished => {}
        }
    }

    /// Switch phase and arm its timer, replacing any outstanding one
    fn enter(&mut self, rules: &SessionRules, phase: Phase, events: &mut Vec<SessionEvent>) {
        let from = self.phase;
        self.phase = phase;
        events.push(SessionEvent::PhaseChanged { from, to: phase });

        match rules.timings.for_phase(phase) {
            Some(timer) => {
                self.scheduler.arm(phase, timer, self.now);
            }
            None => self.scheduler.cancel(),
        }

        match phase {
            Phase::Countdown => {
                self.countdown_remaining = rules.timings.countdown_ticks;
                if rules.timings.countdown_ticks == 0 {
                    self.enter(rules, Phase::Hold, events);
                }
            }
            Phase::Hold => {
                self.hold_remaining = rules.timings.hold_ticks;
                if rules.timings.hold_ticks == 0 {
                    self.enter(rules, Phase::Fixed, events);
                }
            }
            _ => {}
        }
    }

    /// Commit the active challenge's score from the first frame seen in FIXED
    fn finalize(&mut self, rules: &SessionRules, skeleton: &Skeleton, events: &mut Vec<SessionEvent>) {
        if self.finalized {
            return;
        }
        let Some(challenge) = self.challenges.get_mut(self.active_index) else {
            return;
        };
        if challenge.is_scored() {
            return;
        }

        let score = rules.evaluator.score(challenge, Some(skeleton));
        challenge.score = Some(score);
        let name = challenge.name.clone();

        self.finalized = true;
        self.frozen_skeleton = Some(skeleton.clone());
        self.display_score = score;
        self.message = ScoreTier::from_score(score).completion_message().to_string();

        events.push(SessionEvent::Finalized {
            index: self.active_index,
            name,
            score,
            message: self.message.clone(),
        });
        self.enter(rules, Phase::Advance, events);
    }

    /// Move to the next challenge, or finish
    fn advance(&mut self, rules: &SessionRules, events: &mut Vec<SessionEvent>) {
        if self.active_index + 1 < self.challenges.len() {
            self.active_index += 1;
            self.reset_challenge_flags();
            self.message = self.challenges[self.active_index].guide_message.clone();
            self.enter(rules, Phase::Idle, events);
        } else {
            self.scheduler.cancel();
            let report = rules.aggregator.aggregate(&self.challenges);
            self.message = report.headline.clone();
            self.report = Some(report.clone());
            let from = self.phase;
            self.phase = Phase::Finished;
            events.push(SessionEvent::PhaseChanged { from, to: Phase::Finished });
            events.push(SessionEvent::Finished { report });
        }
    }

    fn reset_challenge_flags(&mut self) {
        self.scheduler.cancel();
        self.frozen_skeleton = None;
        self.display_score = 0.0;
        self.countdown_remaining = 0;
        self.hold_remaining = 0;
        self.finalized = false;
    }
}

/// Dispatcher owning the rules and the current state
#[derive(Debug)]
pub struct ChallengeSession {
    rules: SessionRules,
    state: SessionState,
}

impl ChallengeSession {
    pub fn new(config: &SessionConfig) -> Self {
        Self {
            rules: SessionRules::from_config(config),
            state: SessionState::new(config.challenges.clone()),
        }
    }

    /// Handle a detector frame (or its absence) at `now`
    pub fn on_frame(&mut self, frame: Option<&Skeleton>, now: Duration) -> Vec<SessionEvent> {
        let step = self.state.on_frame(&self.rules, frame, now);
        self.apply(step)
    }

    /// Let the clock run to `now`, firing due timers
    pub fn advance_to(&mut self, now: Duration) -> Vec<SessionEvent> {
        let step = self.state.advance_to(&self.rules, now);
        self.apply(step)
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    pub fn next_deadline(&self) -> Option<Duration> {
        self.state.next_deadline()
    }

    pub fn render(&self, live: Option<&Skeleton>) -> RenderFrame {
        self.state.render(live)
    }

    pub fn report(&self) -> Option<&SessionReport> {
        self.state.report()
    }

    fn apply(&mut self, step: Step) -> Vec<SessionEvent> {
        self.state = step.state;
        step.events
    }
}

// =============================================================================
// TESTS
// =============================================================================
