use crate::catalog::{SwitchColor, SwitchSpec};
use crate::config::ConditionParams;
use fastrand::Rng;
use serde::Serialize;
use strum_macros::{Display, EnumIter, EnumString};

/// Side condition rolled for each key at round reset.
#[derive(
    Debug, Clone, Copy, Default, EnumIter, EnumString, Display, PartialEq, Eq, Hash, Serialize,
)]
pub enum KeyCondition {
    #[default]
    Normal,
    /// Shows a wrong light colour shortly after the press starts.
    #[strum(serialize = "Incorrect Color")]
    IncorrectColor,
    /// Light blinks while held; must be released quickly.
    Faulty,
    /// Light turns blank shortly after the press starts.
    #[strum(serialize = "No Color")]
    NoColor,
    /// Light stays on after a tap and the key locks out.
    #[strum(serialize = "Lit After Tap")]
    LitAfterTap,
    /// Light stays on in a wrong colour after a tap.
    #[strum(serialize = "Lit Wrong Color After Tap")]
    LitWrongColorAfterTap,
}

impl KeyCondition {
    /// Maps a raw roll onto a condition. Only 1..=5 select one; every other
    /// value, 6 included, leaves the key normal.
    pub fn from_roll(roll: u32) -> Self {
        match roll {
            1 => Self::IncorrectColor,
            2 => Self::Faulty,
            3 => Self::NoColor,
            4 => Self::LitAfterTap,
            5 => Self::LitWrongColorAfterTap,
            _ => Self::Normal,
        }
    }

    pub fn roll(rng: &mut Rng, params: &ConditionParams) -> Self {
        if params.no_conditions || params.condition_roll_range == 0 {
            return Self::Normal;
        }
        Self::from_roll(rng.u32(0..params.condition_roll_range))
    }

    /// Conditions that act while the key is held.
    pub fn acts_on_hold(self) -> bool {
        matches!(self, Self::IncorrectColor | Self::Faulty | Self::NoColor)
    }

    /// Conditions that act after the key is tapped.
    pub fn acts_on_tap(self) -> bool {
        matches!(self, Self::LitAfterTap | Self::LitWrongColorAfterTap)
    }
}

/// Colours a key light can show instead of its own.
#[derive(Debug, Clone, Copy, EnumIter, Display, PartialEq, Eq, Hash, Serialize)]
pub enum LightColor {
    Red,
    Orange,
    Yellow,
    Green,
    Blue,
    Purple,
    White,
    Black,
}

impl LightColor {
    pub fn as_switch_color(self) -> SwitchColor {
        match self {
            Self::Red => SwitchColor::Red,
            Self::Orange => SwitchColor::Orange,
            Self::Yellow => SwitchColor::Yellow,
            Self::Green => SwitchColor::Green,
            Self::Blue => SwitchColor::Blue,
            Self::Purple => SwitchColor::Purple,
            Self::White => SwitchColor::White,
            Self::Black => SwitchColor::Black,
        }
    }
}

/// Wrong colours shown while held, each with its subtrahend for the
/// release digit.
pub const INCORRECT_COLORS: [(LightColor, u8); 7] = [
    (LightColor::Red, 1),
    (LightColor::Orange, 2),
    (LightColor::Yellow, 3),
    (LightColor::Green, 4),
    (LightColor::Blue, 5),
    (LightColor::Purple, 6),
    (LightColor::White, 10),
];

/// Wrong colours left lit after a tap, each with the digit the next press
/// must be made on.
pub const TAP_COLORS: [(LightColor, u8); 8] = [
    (LightColor::Red, 2),
    (LightColor::Orange, 4),
    (LightColor::Yellow, 7),
    (LightColor::Green, 2),
    (LightColor::Blue, 0),
    (LightColor::Purple, 6),
    (LightColor::White, 0),
    (LightColor::Black, 9),
];

/// Warm switch colours whose release timing follows a wrong colour.
pub fn release_follows_column(color: SwitchColor) -> bool {
    matches!(
        color,
        SwitchColor::Red
            | SwitchColor::Orange
            | SwitchColor::BurntOrange
            | SwitchColor::Yellow
            | SwitchColor::DarkYellow
            | SwitchColor::Green
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WrongColorEffect {
    pub color: LightColor,
    pub digit: Option<u8>,
}

/// Outcome of the incorrect-colour hold effect for entry `pick` of
/// [`INCORRECT_COLORS`]. `None` when the pick equals the switch colour.
pub fn incorrect_color_effect(switch: &SwitchSpec, pick: usize) -> Option<WrongColorEffect> {
    let &(color, b) = INCORRECT_COLORS.get(pick)?;
    if color.as_switch_color() == switch.color {
        return None;
    }
    let digit = release_follows_column(switch.color).then(|| switch.column.abs_diff(b));
    Some(WrongColorEffect { color, digit })
}

/// Release digit imposed by the blank-light hold effect.
pub fn no_color_release_digit(switch: &SwitchSpec) -> Option<u8> {
    (switch.color != SwitchColor::Clear).then_some(switch.column)
}

/// Outcome of the wrong-colour tap effect for entry `pick` of
/// [`TAP_COLORS`]. `None` when the pick equals the switch colour.
pub fn tap_color_effect(switch: &SwitchSpec, pick: usize) -> Option<WrongColorEffect> {
    let &(color, digit) = TAP_COLORS.get(pick)?;
    if color.as_switch_color() == switch.color {
        return None;
    }
    Some(WrongColorEffect {
        color,
        digit: Some(digit),
    })
}
