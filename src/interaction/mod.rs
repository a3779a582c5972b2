//! Press/release handling for the five keys.
//!
//! The host feeds press and release events with its own clock and the bomb
//! timer; timed side effects are queued on an [`EffectScheduler`] and run
//! from [`InteractionState::advance`].

pub mod conditions;
pub mod scheduler;

pub use conditions::{KeyCondition, LightColor, WrongColorEffect};
pub use scheduler::{EffectKind, EffectScheduler, EffectScope, EpisodeToken, ScheduledEffect};

use crate::assignment::KeyInstance;
use crate::config::TimingParams;
use crate::consts::KEY_COUNT;
use crate::facts::TimerReading;
use crate::presentation::{switch_readout, KeyMaterial, PresentationSink, SoundCue};
use conditions::{
    incorrect_color_effect, no_color_release_digit, tap_color_effect, INCORRECT_COLORS, TAP_COLORS,
};
use fastrand::Rng;
use serde::Serialize;
use strum_macros::Display;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize)]
pub enum StrikeReason {
    #[strum(serialize = "key was locked out")]
    LockedOut,
    #[strum(serialize = "pressed on the wrong timer digit")]
    PressDigitMismatch,
    #[strum(serialize = "wrong key held")]
    WrongKey,
    #[strum(serialize = "released on the wrong timer digit")]
    ReleaseDigitMismatch,
    #[strum(serialize = "released too early")]
    ReleasedTooEarly,
    #[strum(serialize = "faulty key held too long")]
    FaultyHeldTooLong,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PressOutcome {
    Pressed {
        episode: EpisodeToken,
        strike_armed: bool,
    },
    /// Another key is already down.
    Ignored,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ReleaseOutcome {
    Tap,
    CorrectHold { progress: usize },
    Solved,
    Strike(StrikeReason),
    /// The slot was not the one being held.
    Ignored,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Phase {
    Idle,
    Pressed {
        slot: usize,
        since: f32,
        episode: EpisodeToken,
    },
}

/// Interaction bookkeeping for one round.
#[derive(Debug, Clone)]
pub struct InteractionState {
    timing: TimingParams,
    tag: String,
    phase: Phase,
    epoch: u64,
    presses: u64,
    expected: usize,
    release_digit: Option<u8>,
    press_digits: [Option<u8>; KEY_COUNT],
    locked_out: [bool; KEY_COUNT],
    armed: Option<StrikeReason>,
    scheduler: EffectScheduler,
}

impl InteractionState {
    pub fn new(timing: TimingParams, tag: impl Into<String>) -> Self {
        Self {
            timing,
            tag: tag.into(),
            phase: Phase::Idle,
            epoch: 0,
            presses: 0,
            expected: 0,
            release_digit: None,
            press_digits: [None; KEY_COUNT],
            locked_out: [false; KEY_COUNT],
            armed: None,
            scheduler: EffectScheduler::new(),
        }
    }

    /// Starts a new round epoch. Anything scheduled earlier becomes stale.
    pub fn reset_round(&mut self) {
        self.epoch += 1;
        self.phase = Phase::Idle;
        self.expected = 0;
        self.release_digit = None;
        self.press_digits = [None; KEY_COUNT];
        self.locked_out = [false; KEY_COUNT];
        self.armed = None;
        self.scheduler.clear();
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn expected_index(&self) -> usize {
        self.expected
    }

    pub fn held_slot(&self) -> Option<usize> {
        match self.phase {
            Phase::Pressed { slot, .. } => Some(slot),
            Phase::Idle => None,
        }
    }

    pub fn current_episode(&self) -> Option<EpisodeToken> {
        match self.phase {
            Phase::Pressed { episode, .. } => Some(episode),
            Phase::Idle => None,
        }
    }

    pub fn is_locked_out(&self, slot: usize) -> bool {
        self.locked_out.get(slot).copied().unwrap_or(false)
    }

    pub fn press_digit(&self, slot: usize) -> Option<u8> {
        self.press_digits.get(slot).copied().flatten()
    }

    pub fn release_digit(&self) -> Option<u8> {
        self.release_digit
    }

    pub fn scheduler(&self) -> &EffectScheduler {
        &self.scheduler
    }

    pub fn press<S: PresentationSink + ?Sized>(
        &mut self,
        key: &KeyInstance,
        now: f32,
        timer: TimerReading,
        sink: &mut S,
    ) -> PressOutcome {
        if self.phase != Phase::Idle {
            return PressOutcome::Ignored;
        }
        let slot = key.slot;
        let spec = &key.switch;

        sink.play_sound(SoundCue::Hold(spec.sound));
        sink.set_light(slot, true);
        sink.show_text(&switch_readout(spec.force, spec.actuation, spec.travel));

        self.presses += 1;
        let episode = EpisodeToken {
            epoch: self.epoch,
            press: self.presses,
        };
        self.phase = Phase::Pressed {
            slot,
            since: now,
            episode,
        };

        self.armed = if self.is_locked_out(slot) {
            Some(StrikeReason::LockedOut)
        } else {
            match self.press_digit(slot) {
                Some(d) if d != timer.last_digit => Some(StrikeReason::PressDigitMismatch),
                _ => None,
            }
        };
        if let Some(reason) = self.armed {
            debug!("{} Key {} press armed a strike: {}", self.tag, key.label, reason);
        }

        if key.condition.acts_on_hold() {
            self.scheduler.schedule(
                now + self.timing.hold_effect_delay,
                slot,
                EffectKind::HoldEffect,
                EffectScope::Episode(episode),
            );
        }

        PressOutcome::Pressed {
            episode,
            strike_armed: self.armed.is_some(),
        }
    }

    /// Handles a release. `hold_order` is the rank sequence the player must
    /// follow. Once `solved`, every release counts as a harmless tap.
    #[allow(clippy::too_many_arguments)]
    pub fn release<S: PresentationSink + ?Sized>(
        &mut self,
        key: &mut KeyInstance,
        hold_order: &[u8],
        now: f32,
        timer: TimerReading,
        rng: &mut Rng,
        sink: &mut S,
        solved: bool,
    ) -> ReleaseOutcome {
        let (since, episode) = match self.phase {
            Phase::Pressed {
                slot,
                since,
                episode,
            } if slot == key.slot => (since, episode),
            _ => return ReleaseOutcome::Ignored,
        };
        let slot = key.slot;

        sink.play_sound(SoundCue::Release(key.switch.sound));
        sink.set_light(slot, false);
        sink.show_text("");

        self.phase = Phase::Idle;
        self.scheduler.cancel_episode(episode);
        let held = now - since;
        let armed = self.armed.take();
        let release_digit = self.release_digit.take();
        if let Some(d) = self.press_digits.get_mut(slot) {
            *d = None;
        }

        if solved || (held < self.timing.tap_threshold && armed.is_none()) {
            if key.condition.acts_on_tap() {
                self.apply_tap_condition(key, now, rng, sink);
            }
            return ReleaseOutcome::Tap;
        }

        let faulty = key.condition == KeyCondition::Faulty;
        let expected_rank = hold_order.get(self.expected).copied();

        let strike = armed.or_else(|| {
            if expected_rank != Some(key.rank) {
                Some(StrikeReason::WrongKey)
            } else if release_digit.is_some_and(|d| d != timer.last_digit) {
                Some(StrikeReason::ReleaseDigitMismatch)
            } else if !faulty && held < self.timing.min_hold {
                Some(StrikeReason::ReleasedTooEarly)
            } else if faulty && held > self.timing.faulty_release_window {
                Some(StrikeReason::FaultyHeldTooLong)
            } else {
                None
            }
        });

        if let Some(reason) = strike {
            info!(
                "{} Key {} was not held correctly ({}).",
                self.tag, key.label, reason
            );
            return ReleaseOutcome::Strike(reason);
        }

        info!("{} Key {} was held correctly.", self.tag, key.label);
        self.expected += 1;
        if self.expected >= hold_order.len() {
            ReleaseOutcome::Solved
        } else {
            ReleaseOutcome::CorrectHold {
                progress: self.expected,
            }
        }
    }

    /// Runs every effect due at `now`. Returns how many actually fired.
    pub fn advance<S: PresentationSink + ?Sized>(
        &mut self,
        now: f32,
        keys: &mut [KeyInstance],
        rng: &mut Rng,
        sink: &mut S,
    ) -> usize {
        let mut fired = 0;
        while let Some(effect) = self.scheduler.pop_due(now) {
            if !self.is_live(effect.scope) {
                continue;
            }
            let Some(key) = keys.iter_mut().find(|k| k.slot == effect.slot) else {
                continue;
            };
            self.fire(effect, key, rng, sink);
            fired += 1;
        }
        fired
    }

    fn is_live(&self, scope: EffectScope) -> bool {
        match scope {
            EffectScope::Episode(token) => self.current_episode() == Some(token),
            EffectScope::Round(epoch) => epoch == self.epoch,
        }
    }

    fn fire<S: PresentationSink + ?Sized>(
        &mut self,
        effect: ScheduledEffect,
        key: &mut KeyInstance,
        rng: &mut Rng,
        sink: &mut S,
    ) {
        let slot = effect.slot;
        let blink = self.timing.faulty_blink_interval;
        match effect.kind {
            EffectKind::HoldEffect => self.apply_hold_condition(effect, key, rng, sink),
            EffectKind::BlinkOff | EffectKind::BlinkOn => {
                let lit = effect.kind == EffectKind::BlinkOn;
                sink.set_light(slot, lit);
                // A non-positive interval would refire at the same instant forever.
                if blink > 0.0 {
                    let next = if lit {
                        EffectKind::BlinkOff
                    } else {
                        EffectKind::BlinkOn
                    };
                    self.scheduler
                        .schedule(effect.due + blink, slot, next, effect.scope);
                }
            }
            EffectKind::LockoutExpired => {
                if let Some(l) = self.locked_out.get_mut(slot) {
                    *l = false;
                }
                debug!("{} Key {} is safe to press again.", self.tag, key.label);
            }
        }
    }

    fn apply_hold_condition<S: PresentationSink + ?Sized>(
        &mut self,
        effect: ScheduledEffect,
        key: &mut KeyInstance,
        rng: &mut Rng,
        sink: &mut S,
    ) {
        let slot = key.slot;
        match key.condition {
            KeyCondition::IncorrectColor => {
                let pick = rng.usize(0..INCORRECT_COLORS.len());
                if let Some(shown) = incorrect_color_effect(&key.switch, pick) {
                    sink.set_material(slot, KeyMaterial::Light(shown.color));
                    info!(
                        "{} Key {} is flashing an incorrect color ({}).",
                        self.tag, key.label, shown.color
                    );
                    if let Some(d) = shown.digit {
                        self.release_digit = Some(d);
                        info!(
                            "{} Release key {} when the last digit of the timer is a {}.",
                            self.tag, key.label, d
                        );
                    }
                }
                key.condition = KeyCondition::Normal;
            }
            KeyCondition::Faulty => {
                info!(
                    "{} Key {} is faulty. Release it immediately.",
                    self.tag, key.label
                );
                self.scheduler.schedule(
                    effect.due + self.timing.faulty_blink_interval,
                    slot,
                    EffectKind::BlinkOff,
                    effect.scope,
                );
            }
            KeyCondition::NoColor => {
                sink.set_material(slot, KeyMaterial::Blank);
                info!("{} Key {} is not flashing a color.", self.tag, key.label);
                if let Some(d) = no_color_release_digit(&key.switch) {
                    self.release_digit = Some(d);
                    info!(
                        "{} Release key {} when the last digit of the timer is a {}.",
                        self.tag, key.label, d
                    );
                }
                key.condition = KeyCondition::Normal;
            }
            _ => {}
        }
    }

    fn apply_tap_condition<S: PresentationSink + ?Sized>(
        &mut self,
        key: &mut KeyInstance,
        now: f32,
        rng: &mut Rng,
        sink: &mut S,
    ) {
        let slot = key.slot;
        match key.condition {
            KeyCondition::LitAfterTap => {
                sink.set_light(slot, true);
                if let Some(l) = self.locked_out.get_mut(slot) {
                    *l = true;
                }
                self.scheduler.schedule(
                    now + self.timing.lockout_duration,
                    slot,
                    EffectKind::LockoutExpired,
                    EffectScope::Round(self.epoch),
                );
                info!(
                    "{} Key {}'s light is still on after tapping. Do not interact with it for {}s.",
                    self.tag, key.label, self.timing.lockout_duration
                );
                key.condition = KeyCondition::Normal;
            }
            KeyCondition::LitWrongColorAfterTap => {
                let pick = rng.usize(0..TAP_COLORS.len());
                if let Some(WrongColorEffect {
                    color,
                    digit: Some(d),
                }) = tap_color_effect(&key.switch, pick)
                {
                    sink.set_material(slot, KeyMaterial::Light(color));
                    sink.set_light(slot, true);
                    if let Some(p) = self.press_digits.get_mut(slot) {
                        *p = Some(d);
                    }
                    info!(
                        "{} Key {}'s light is {} after tapping. Only press it when the last digit of the timer is a {}.",
                        self.tag, key.label, color, d
                    );
                    key.condition = KeyCondition::Normal;
                }
            }
            _ => {}
        }
    }
}
