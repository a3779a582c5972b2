//! The 41 rule flags that decide which board cells are significant.
//!
//! Flags split into two groups. Static flags depend only on the bomb and are
//! fixed for a round. Dynamic flags describe the key currently moving and are
//! rebuilt for every key the simulation processes.

use crate::catalog::{Brand, SwitchColor, SwitchSpec};
use crate::consts::RULE_COUNT;
use crate::facts::{FactsProvider, Port, Weekday};

/// Rule ids (1-based) that describe the bomb.
pub const STATIC_RULE_IDS: [u8; 27] = [
    1, 2, 4, 5, 6, 9, 10, 11, 12, 13, 15, 16, 19, 20, 21, 22, 23, 24, 30, 31, 33, 34, 36, 38, 39,
    40, 41,
];

/// Rule ids (1-based) that describe the moving key.
pub const DYNAMIC_RULE_IDS: [u8; 14] = [3, 7, 8, 14, 17, 18, 25, 26, 27, 28, 29, 32, 35, 37];

pub fn is_dynamic_rule(id: u8) -> bool {
    DYNAMIC_RULE_IDS.contains(&id)
}

/// Bomb-derived flags, computed once per round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticFacts {
    flags: [bool; RULE_COUNT],
}

impl StaticFacts {
    pub fn evaluate<F: FactsProvider + ?Sized>(facts: &F) -> Self {
        let mut f = [false; RULE_COUNT];
        let mut set = |id: usize, value: bool| f[id - 1] = value;

        let letters = facts.serial_letters();
        let digits = facts.serial_digits();
        let mut distinct_digits = digits.clone();
        distinct_digits.sort_unstable();
        distinct_digits.dedup();

        let indicators = facts.indicators().len();
        let batteries = facts.battery_count();
        let ports = facts.port_count();
        let plates = facts.port_plates().len();
        let simon = facts.solvable_count_containing("Simon");
        let solvable = facts.solvable_module_names();

        set(1, facts.lit_indicator_count() >= 2);
        set(2, letters.iter().any(|c| "AEIOU".contains(*c)));
        set(4, facts.module_names().len() % 2 == 0);
        set(5, facts.day_of_week() == Weekday::Sunday);
        set(6, distinct_digits.len() >= 3);
        set(9, simon >= 2);
        set(10, indicators == 1);
        set(11, batteries % 2 == 0);
        set(12, facts.port_count_of(Port::Dvi) % 2 == 1);
        set(13, facts.has_empty_port_plate());
        set(15, ports == 0);
        set(16, plates == 0);
        set(19, simon == 0);
        set(20, facts.solvable_count_containing("Mechanical Switches") == 1);
        set(21, batteries % 2 == 1);
        set(22, facts.solvable_count_containing("Piano Keys") >= 1);
        set(
            23,
            solvable
                .iter()
                .any(|n| n == "Turn The Key" || n == "Forget Me Not"),
        );
        set(24, plates == 3);
        set(30, indicators % 2 == 1);
        set(31, facts.port_count_of(Port::Parallel) % 2 == 1);
        set(33, digits.iter().any(|d| d % 2 == 0));
        set(34, batteries == 2);
        set(36, digits.contains(&0));
        set(38, batteries == 1);
        set(39, ports == 5);
        set(40, indicators == 3);
        set(41, facts.solvable_count_containing("Souvenir") == 1);

        Self { flags: f }
    }

    /// Value of a static rule. Dynamic ids and out-of-range ids read false.
    pub fn get(&self, id: u8) -> bool {
        if id == 0 || id as usize > RULE_COUNT || is_dynamic_rule(id) {
            return false;
        }
        self.flags[id as usize - 1]
    }

    pub fn true_ids(&self) -> Vec<u8> {
        STATIC_RULE_IDS
            .iter()
            .copied()
            .filter(|&id| self.get(id))
            .collect()
    }
}

/// Flags describing the key currently being simulated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DynamicKeyFacts {
    pub brand: Option<Brand>,
    pub color: Option<SwitchColor>,
    pub rank: u8,
}

impl DynamicKeyFacts {
    pub fn for_key(switch: &SwitchSpec, rank: u8) -> Self {
        Self {
            brand: Some(switch.brand),
            color: Some(switch.color),
            rank,
        }
    }

    /// Value of a dynamic rule, or `None` for static ids.
    pub fn get(&self, id: u8) -> Option<bool> {
        let brand = |b: Brand| self.brand == Some(b);
        let color = |c: SwitchColor| self.color == Some(c);
        let r = self.rank;

        let value = match id {
            3 => brand(Brand::KailhPro),
            7 => brand(Brand::Cherry),
            8 => color(SwitchColor::Red),
            14 => self.color.is_some_and(SwitchColor::is_blue),
            17 => brand(Brand::KailhBox),
            18 => color(SwitchColor::Clear),
            25 => brand(Brand::Gateron),
            26 => r == 3 || r == 4,
            27 => r == 2,
            28 => r == 3,
            29 => r == 2 || r == 5,
            32 => color(SwitchColor::Purple) || color(SwitchColor::Yellow),
            35 => brand(Brand::Razer),
            37 => color(SwitchColor::Brown) || color(SwitchColor::Black),
            _ => return None,
        };
        Some(value)
    }
}

/// The full 41-flag view for one key: static facts plus that key's facts.
#[derive(Debug, Clone, Copy)]
pub struct RuleFlags<'a> {
    pub statics: &'a StaticFacts,
    pub dynamic: DynamicKeyFacts,
}

impl<'a> RuleFlags<'a> {
    pub fn new(statics: &'a StaticFacts, dynamic: DynamicKeyFacts) -> Self {
        Self { statics, dynamic }
    }

    /// Looks up rule `id` (1..=41). Id 0 marks an empty cell and reads false.
    pub fn is_set(&self, id: u8) -> bool {
        match self.dynamic.get(id) {
            Some(v) => v,
            None => self.statics.get(id),
        }
    }

    pub fn as_array(&self) -> [bool; RULE_COUNT] {
        let mut out = [false; RULE_COUNT];
        for (i, o) in out.iter_mut().enumerate() {
            *o = self.is_set(i as u8 + 1);
        }
        out
    }
}
