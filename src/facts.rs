use crate::error::{MechSwitchError, MsResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use strum_macros::{Display, EnumIter, EnumString};

pub const SERIAL_LENGTH: usize = 6;

#[derive(
    Debug, Clone, Copy, Default, EnumIter, EnumString, Display, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
pub enum Weekday {
    #[default]
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

#[derive(Debug, Clone, Copy, EnumIter, EnumString, Display, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Port {
    #[serde(alias = "DVI")]
    #[strum(serialize = "DVI-D")]
    Dvi,
    Parallel,
    #[serde(alias = "PS2")]
    #[strum(serialize = "PS/2")]
    Ps2,
    #[serde(alias = "RJ45")]
    Rj45,
    Serial,
    StereoRca,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Indicator {
    pub label: String,
    #[serde(default)]
    pub lit: bool,
}

/// Read-only view of the bomb the module sits on.
///
/// Polled once per round; the core never mutates what it reads.
pub trait FactsProvider {
    fn serial_number(&self) -> &str;
    fn indicators(&self) -> &[Indicator];
    fn battery_count(&self) -> u32;
    fn port_plates(&self) -> &[Vec<Port>];
    fn module_names(&self) -> &[String];
    fn solvable_module_names(&self) -> &[String];
    fn day_of_week(&self) -> Weekday;

    fn serial_letters(&self) -> Vec<char> {
        self.serial_number()
            .chars()
            .filter(|c| c.is_ascii_alphabetic())
            .collect()
    }

    fn serial_digits(&self) -> Vec<u8> {
        self.serial_number()
            .chars()
            .filter_map(|c| c.to_digit(10).map(|d| d as u8))
            .collect()
    }

    fn lit_indicator_count(&self) -> usize {
        self.indicators().iter().filter(|i| i.lit).count()
    }

    fn port_count(&self) -> usize {
        self.port_plates().iter().map(|p| p.len()).sum()
    }

    fn port_count_of(&self, port: Port) -> usize {
        self.port_plates()
            .iter()
            .flatten()
            .filter(|&&p| p == port)
            .count()
    }

    fn has_empty_port_plate(&self) -> bool {
        self.port_plates().iter().any(|p| p.is_empty())
    }

    /// Number of solvable modules whose name contains `needle`.
    fn solvable_count_containing(&self, needle: &str) -> usize {
        self.solvable_module_names()
            .iter()
            .filter(|n| n.contains(needle))
            .count()
    }
}

/// A serialisable snapshot of bomb facts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BombFacts {
    pub serial_number: String,
    #[serde(default)]
    pub indicators: Vec<Indicator>,
    #[serde(default)]
    pub batteries: u32,
    #[serde(default)]
    pub port_plates: Vec<Vec<Port>>,
    #[serde(default)]
    pub modules: Vec<String>,
    /// Defaults to `modules` when omitted.
    #[serde(default)]
    pub solvable_modules: Option<Vec<String>>,
    #[serde(default)]
    pub day_of_week: Weekday,
}

impl BombFacts {
    pub fn new(serial_number: &str) -> Self {
        Self {
            serial_number: serial_number.to_string(),
            indicators: Vec::new(),
            batteries: 0,
            port_plates: Vec::new(),
            modules: vec!["Mechanical Switches".to_string()],
            solvable_modules: None,
            day_of_week: Weekday::Monday,
        }
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> MsResult<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> MsResult<Self> {
        let mut facts: BombFacts = serde_json::from_str(content)?;
        facts.serial_number = facts.serial_number.to_ascii_uppercase();
        facts.validate()?;
        Ok(facts)
    }

    pub fn validate(&self) -> MsResult<()> {
        let serial = &self.serial_number;
        if serial.chars().count() != SERIAL_LENGTH {
            return Err(MechSwitchError::Validation(format!(
                "Serial number '{}' must be {} characters",
                serial, SERIAL_LENGTH
            )));
        }
        if !serial.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(MechSwitchError::Validation(format!(
                "Serial number '{}' must be alphanumeric",
                serial
            )));
        }
        Ok(())
    }
}

impl FactsProvider for BombFacts {
    fn serial_number(&self) -> &str {
        &self.serial_number
    }

    fn indicators(&self) -> &[Indicator] {
        &self.indicators
    }

    fn battery_count(&self) -> u32 {
        self.batteries
    }

    fn port_plates(&self) -> &[Vec<Port>] {
        &self.port_plates
    }

    fn module_names(&self) -> &[String] {
        &self.modules
    }

    fn solvable_module_names(&self) -> &[String] {
        self.solvable_modules.as_deref().unwrap_or(&self.modules)
    }

    fn day_of_week(&self) -> Weekday {
        self.day_of_week
    }
}

/// The bomb timer as seen at the moment of a press or release.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TimerReading {
    pub last_digit: u8,
    /// Seconds field of the `mm:ss` display, 0..=59.
    pub seconds: u8,
}

impl TimerReading {
    pub fn from_seconds(seconds: f32) -> Self {
        let whole = seconds.max(0.0).floor() as u32;
        Self {
            last_digit: (whole % 10) as u8,
            seconds: (whole % 60) as u8,
        }
    }
}
