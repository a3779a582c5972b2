use fastrand::Rng;
use serde::Serialize;
use strum_macros::{Display, EnumIter, EnumString};

/// Number of switch archetypes in the catalog.
pub const CATALOG_SIZE: usize = 39;

#[derive(Debug, Clone, Copy, EnumIter, EnumString, Display, PartialEq, Eq, Hash, Serialize)]
pub enum Brand {
    Cherry,
    Gateron,
    Kailh,
    #[strum(serialize = "Kailh Box")]
    KailhBox,
    #[strum(serialize = "Kailh Pro")]
    KailhPro,
    Razer,
}

#[derive(Debug, Clone, Copy, EnumIter, EnumString, Display, PartialEq, Eq, Hash, Serialize)]
pub enum SwitchColor {
    Aliaz,
    Black,
    Blue,
    Bronze,
    Brown,
    Burgundy,
    #[strum(serialize = "Burnt Orange")]
    BurntOrange,
    Clear,
    Copper,
    #[strum(serialize = "Dark Yellow")]
    DarkYellow,
    Green,
    Grey,
    Jade,
    Navy,
    Orange,
    #[strum(serialize = "Pale Blue")]
    PaleBlue,
    Purple,
    Red,
    #[strum(serialize = "Speed Gold")]
    SpeedGold,
    #[strum(serialize = "Speed Silver")]
    SpeedSilver,
    Tealios,
    White,
    Yellow,
    Zealios,
}

impl SwitchColor {
    pub fn is_blue(self) -> bool {
        matches!(self, Self::Blue | Self::PaleBlue)
    }

    /// Kailh/Cherry "Speed" family: Silver, Bronze, Gold and Copper.
    pub fn is_speed_family(self) -> bool {
        matches!(
            self,
            Self::SpeedSilver | Self::Bronze | Self::SpeedGold | Self::Copper
        )
    }
}

#[derive(Debug, Clone, Copy, EnumIter, EnumString, Display, PartialEq, Eq, Hash, Serialize)]
pub enum SoundClass {
    Linear,
    Tactile,
    Clicky,
    Silent,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SwitchSpec {
    pub name: &'static str,
    pub brand: Brand,
    pub color: SwitchColor,
    pub sound: SoundClass,
    pub force: f32,      // Actuation force (cN)
    pub actuation: f32,  // Actuation point (mm)
    pub travel: f32,     // Total travel (mm)
    pub column: u8,      // Manual category column, 1..=9
    pub is_clear: bool, // Transparent housing
}

impl SwitchSpec {
    #[allow(clippy::too_many_arguments)]
    const fn new(
        name: &'static str,
        brand: Brand,
        color: SwitchColor,
        is_clear: bool,
        sound: SoundClass,
        force: f32,
        actuation: f32,
        travel: f32,
        column: u8,
    ) -> Self {
        Self {
            name,
            brand,
            color,
            sound,
            force,
            actuation,
            travel,
            column,
            is_clear,
        }
    }
}

/// The 39 switch archetypes, ordered by manual column.
///
/// Built once per module instance. Gateron Zealios and Gateron Aliaz roll
/// their actuation force at construction; every other entry is fixed.
#[derive(Debug, Clone)]
pub struct SwitchCatalog {
    switches: Vec<SwitchSpec>,
}

impl SwitchCatalog {
    pub const ZEALIOS_INDEX: usize = 35;
    pub const ALIAZ_INDEX: usize = 36;

    pub fn new(rng: &mut Rng) -> Self {
        let zealios_force = rng.u32(62..78) as f32;
        let aliaz_force = rng.u32(60..100) as f32;
        Self::with_forces(zealios_force, aliaz_force)
    }

    /// Builds the catalog with explicit forces for the two rolled entries.
    pub fn with_forces(zealios_force: f32, aliaz_force: f32) -> Self {
        use Brand::*;
        use SoundClass::*;
        use SwitchColor as C;

        let switches = vec![
            // Column 1
            SwitchSpec::new("Cherry Black", Cherry, C::Black, false, Linear, 60.0, 2.0, 4.0, 1),
            SwitchSpec::new("Cherry Speed Silver", Cherry, C::SpeedSilver, false, Linear, 45.0, 1.2, 3.4, 1),
            SwitchSpec::new("Gateron Black", Gateron, C::Black, false, Linear, 50.0, 2.0, 4.0, 1),
            SwitchSpec::new("Kailh Box Black", KailhBox, C::Black, false, Linear, 60.0, 1.8, 3.6, 1),
            SwitchSpec::new("Kailh Pro Burgundy", KailhPro, C::Burgundy, false, Linear, 50.0, 1.7, 3.6, 1),
            // Column 2
            SwitchSpec::new("Cherry Red", Cherry, C::Red, false, Linear, 45.0, 2.0, 4.0, 2),
            SwitchSpec::new("Gateron Red", Gateron, C::Red, false, Linear, 50.0, 2.0, 4.0, 2),
            SwitchSpec::new("Kailh Box Red", KailhBox, C::Red, false, Linear, 45.0, 1.8, 3.6, 2),
            SwitchSpec::new("Kailh Pro Purple", KailhPro, C::Purple, false, Tactile, 50.0, 1.7, 3.6, 2),
            // Column 3
            SwitchSpec::new("Cherry Brown", Cherry, C::Brown, false, Tactile, 45.0, 2.0, 4.0, 3),
            SwitchSpec::new("Gateron Brown", Gateron, C::Brown, false, Tactile, 50.0, 2.0, 4.0, 3),
            SwitchSpec::new("Kailh Box Brown", KailhBox, C::Brown, false, Tactile, 60.0, 1.8, 3.6, 3),
            SwitchSpec::new("Kailh Pro Green", KailhPro, C::Green, false, Clicky, 50.0, 1.7, 3.6, 3),
            // Column 4
            SwitchSpec::new("Cherry Blue", Cherry, C::Blue, false, Clicky, 50.0, 2.2, 4.0, 4),
            SwitchSpec::new("Gateron Blue", Gateron, C::Blue, false, Clicky, 55.0, 2.2, 4.0, 4),
            SwitchSpec::new("Kailh Box White", KailhBox, C::White, false, Clicky, 55.0, 1.8, 3.6, 4),
            SwitchSpec::new("Kailh Speed Silver", Kailh, C::SpeedSilver, false, Linear, 50.0, 1.1, 3.5, 4),
            // Column 5
            SwitchSpec::new("Cherry Clear", Cherry, C::Clear, true, Tactile, 65.0, 2.0, 4.0, 5),
            SwitchSpec::new("Gateron Clear", Gateron, C::Clear, true, Linear, 35.0, 2.0, 4.0, 5),
            SwitchSpec::new("Kailh Box Navy", KailhBox, C::Navy, false, Clicky, 75.0, 1.7, 3.6, 5),
            SwitchSpec::new("Kailh Speed Copper", Kailh, C::Copper, false, Tactile, 50.0, 1.1, 3.5, 5),
            // Column 6
            SwitchSpec::new("Cherry White", Cherry, C::White, false, Clicky, 85.0, 2.0, 4.0, 6),
            SwitchSpec::new("Gateron Yellow", Gateron, C::Yellow, false, Linear, 50.0, 2.0, 4.0, 6),
            SwitchSpec::new("Kailh Box Jade", KailhBox, C::Jade, false, Clicky, 65.0, 1.7, 3.6, 6),
            SwitchSpec::new("Kailh Speed Bronze", Kailh, C::Bronze, false, Clicky, 50.0, 1.1, 3.5, 6),
            // Column 7
            SwitchSpec::new("Cherry Green", Cherry, C::Green, false, Tactile, 80.0, 2.2, 4.0, 7),
            SwitchSpec::new("Gateron Green", Gateron, C::Green, false, Clicky, 80.0, 2.0, 4.0, 7),
            SwitchSpec::new("Kailh Box Dark Yellow", KailhBox, C::DarkYellow, false, Linear, 70.0, 1.8, 3.6, 7),
            SwitchSpec::new("Kailh Speed Gold", Kailh, C::SpeedGold, false, Clicky, 50.0, 1.4, 3.5, 7),
            SwitchSpec::new("Razer Green", Razer, C::Green, false, Clicky, 50.0, 1.9, 4.0, 7),
            // Column 8
            SwitchSpec::new("Cherry Grey (Linear)", Cherry, C::Grey, false, Linear, 80.0, 2.0, 4.0, 8),
            SwitchSpec::new("Gateron Tealios", Gateron, C::Tealios, false, Linear, 67.0, 2.0, 4.0, 8),
            SwitchSpec::new("Kailh Box Burnt Orange", KailhBox, C::BurntOrange, false, Tactile, 70.0, 1.8, 3.6, 8),
            SwitchSpec::new("Razer Orange", Razer, C::Orange, false, Silent, 45.0, 1.9, 4.0, 8),
            // Column 9
            SwitchSpec::new("Cherry Grey (Tactile)", Cherry, C::Grey, false, Tactile, 80.0, 2.0, 4.0, 9),
            SwitchSpec::new("Gateron Zealios", Gateron, C::Zealios, false, Tactile, zealios_force, 2.0, 4.0, 9),
            SwitchSpec::new("Gateron Aliaz", Gateron, C::Aliaz, false, Silent, aliaz_force, 2.0, 4.0, 9),
            SwitchSpec::new("Kailh Box Pale Blue", KailhBox, C::PaleBlue, false, Clicky, 70.0, 1.8, 3.6, 9),
            SwitchSpec::new("Razer Yellow", Razer, C::Yellow, false, Linear, 45.0, 1.2, 3.5, 9),
        ];

        debug_assert_eq!(switches.len(), CATALOG_SIZE);
        Self { switches }
    }

    pub fn get(&self, index: usize) -> Option<&SwitchSpec> {
        self.switches.get(index)
    }

    pub fn len(&self) -> usize {
        self.switches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.switches.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SwitchSpec> {
        self.switches.iter()
    }

    pub fn find(&self, name: &str) -> Option<usize> {
        self.switches
            .iter()
            .position(|s| s.name.eq_ignore_ascii_case(name))
    }
}

impl std::ops::Index<usize> for SwitchCatalog {
    type Output = SwitchSpec;

    fn index(&self, index: usize) -> &Self::Output {
        &self.switches[index]
    }
}
