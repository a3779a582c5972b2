use serde::Serialize;

/// Identifies one press-to-release of a key within a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct EpisodeToken {
    pub epoch: u64,
    pub press: u64,
}

/// What a scheduled effect is bound to. It is dropped once that scope ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EffectScope {
    Episode(EpisodeToken),
    Round(u64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EffectKind {
    /// Condition effect that starts after the hold delay.
    HoldEffect,
    BlinkOff,
    BlinkOn,
    LockoutExpired,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScheduledEffect {
    pub due: f32,
    pub slot: usize,
    pub kind: EffectKind,
    pub scope: EffectScope,
    seq: u64,
}

/// Timed actions, drained one at a time by `InteractionState::advance`
/// through `pop_due`.
#[derive(Debug, Clone, Default)]
pub struct EffectScheduler {
    pending: Vec<ScheduledEffect>,
    next_seq: u64,
}

impl EffectScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, due: f32, slot: usize, kind: EffectKind, scope: EffectScope) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.pending.push(ScheduledEffect {
            due,
            slot,
            kind,
            scope,
            seq,
        });
    }

    /// Removes and returns the earliest effect due at or before `now`.
    pub fn pop_due(&mut self, now: f32) -> Option<ScheduledEffect> {
        let idx = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, e)| e.due <= now)
            .min_by(|(_, a), (_, b)| a.due.total_cmp(&b.due).then(a.seq.cmp(&b.seq)))
            .map(|(i, _)| i)?;
        Some(self.pending.remove(idx))
    }

    pub fn cancel_episode(&mut self, token: EpisodeToken) {
        self.pending
            .retain(|e| e.scope != EffectScope::Episode(token));
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn pending(&self) -> &[ScheduledEffect] {
        &self.pending
    }
}
