use crate::error::{MechSwitchError, MsResult};
use clap::Args;

#[derive(Args, Debug, Clone, PartialEq, Default)]
pub struct RoundConfig {
    #[command(flatten)]
    pub timing: TimingParams,
    #[command(flatten)]
    pub conditions: ConditionParams,
}

impl RoundConfig {
    pub fn validate(&self) -> MsResult<()> {
        self.timing.validate()
    }
}

/// Durations in seconds of host time.
#[derive(Args, Debug, Clone, Copy, PartialEq)]
pub struct TimingParams {
    // Releases quicker than this count as taps
    #[arg(long, default_value_t = 0.5)]
    pub tap_threshold: f32,
    #[arg(long, default_value_t = 5.0)]
    pub min_hold: f32,
    #[arg(long, default_value_t = 2.5)]
    pub faulty_release_window: f32,
    #[arg(long, default_value_t = 0.5)]
    pub hold_effect_delay: f32,
    #[arg(long, default_value_t = 0.15)]
    pub faulty_blink_interval: f32,
    #[arg(long, default_value_t = 60.0)]
    pub lockout_duration: f32,
}

impl Default for TimingParams {
    fn default() -> Self {
        Self {
            tap_threshold: 0.5,
            min_hold: 5.0,
            faulty_release_window: 2.5,
            hold_effect_delay: 0.5,
            faulty_blink_interval: 0.15,
            lockout_duration: 60.0,
        }
    }
}

impl TimingParams {
    pub fn validate(&self) -> MsResult<()> {
        let fields = [
            ("tap_threshold", self.tap_threshold),
            ("min_hold", self.min_hold),
            ("faulty_release_window", self.faulty_release_window),
            ("hold_effect_delay", self.hold_effect_delay),
            ("faulty_blink_interval", self.faulty_blink_interval),
            ("lockout_duration", self.lockout_duration),
        ];
        for (name, value) in fields {
            if !(value.is_finite() && value > 0.0) {
                return Err(MechSwitchError::Config(format!(
                    "{} must be a positive number of seconds (got {})",
                    name, value
                )));
            }
        }
        if self.tap_threshold >= self.min_hold {
            return Err(MechSwitchError::Config(format!(
                "tap_threshold ({}) must be shorter than min_hold ({})",
                self.tap_threshold, self.min_hold
            )));
        }
        Ok(())
    }
}

#[derive(Args, Debug, Clone, Copy, PartialEq)]
pub struct ConditionParams {
    /// Size of the per-key condition roll; values 1..=5 pick a condition
    #[arg(long, default_value_t = 30)]
    pub condition_roll_range: u32,
    #[arg(long, default_value_t = false)]
    pub no_conditions: bool,
}

impl Default for ConditionParams {
    fn default() -> Self {
        Self {
            condition_roll_range: 30,
            no_conditions: false,
        }
    }
}
