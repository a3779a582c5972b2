use crate::catalog::{Brand, SwitchColor, SwitchSpec};
use crate::consts::KEY_COUNT;
use serde::Serialize;
use strum_macros::{Display, EnumIter};

/// Brand and colour counts over the five keys.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SwitchTally {
    pub cherry: usize,
    pub gateron: usize,
    pub kailh: usize,
    pub kailh_box: usize,
    pub kailh_pro: usize,
    pub razer: usize,
    pub blue: usize,
    pub brown: usize,
    pub green: usize,
    pub red: usize,
    pub speed: usize,
    pub tealios: usize,
    pub white: usize,
    pub zealios: usize,
}

impl SwitchTally {
    pub fn from_switches<'a, I: IntoIterator<Item = &'a SwitchSpec>>(switches: I) -> Self {
        let mut t = SwitchTally::default();
        for s in switches {
            match s.brand {
                Brand::Cherry => t.cherry += 1,
                Brand::Gateron => t.gateron += 1,
                Brand::Kailh => t.kailh += 1,
                Brand::KailhBox => t.kailh_box += 1,
                Brand::KailhPro => t.kailh_pro += 1,
                Brand::Razer => t.razer += 1,
            }

            if s.color.is_blue() {
                t.blue += 1;
            }
            if s.color.is_speed_family() {
                t.speed += 1;
            }
            match s.color {
                SwitchColor::Brown => t.brown += 1,
                SwitchColor::Green => t.green += 1,
                SwitchColor::Red => t.red += 1,
                SwitchColor::Tealios => t.tealios += 1,
                SwitchColor::White => t.white += 1,
                SwitchColor::Zealios => t.zealios += 1,
                _ => {}
            }
        }
        t
    }

    fn every_brand_below_two(&self) -> bool {
        [
            self.cherry,
            self.gateron,
            self.kailh,
            self.kailh_box,
            self.kailh_pro,
            self.razer,
        ]
        .iter()
        .all(|&n| n < 2)
    }
}

/// The starting-order rules, in priority order.
#[derive(Debug, Clone, Copy, EnumIter, Display, PartialEq, Eq, Hash, Serialize)]
pub enum OrderRule {
    #[strum(serialize = "All switches are Cherry")]
    AllCherry,
    #[strum(serialize = "Exactly two red switches")]
    TwoRed,
    #[strum(serialize = "Exactly three blue switches")]
    ThreeBlue,
    #[strum(serialize = "Exactly one Speed switch")]
    OneSpeed,
    #[strum(serialize = "Exactly four brown switches")]
    FourBrown,
    #[strum(serialize = "Exactly two Razer switches")]
    TwoRazer,
    #[strum(serialize = "Exactly one white switch")]
    OneWhite,
    #[strum(serialize = "Exactly three Kailh Box switches")]
    ThreeKailhBox,
    #[strum(serialize = "Exactly three green switches")]
    ThreeGreen,
    #[strum(serialize = "More than two Razer switches")]
    ManyRazer,
    #[strum(serialize = "Gateron and Kailh Pro are the majority")]
    GateronKailhProMajority,
    #[strum(serialize = "Exactly one Gateron switch")]
    OneGateron,
    #[strum(serialize = "All switches are Kailh Box")]
    AllKailhBox,
    #[strum(serialize = "Exactly four Gateron switches")]
    FourGateron,
    #[strum(serialize = "At least one Tealios and one Zealios")]
    TealiosAndZealios,
    #[strum(serialize = "Every brand appears at most once")]
    AllDifferentBrands,
    #[strum(serialize = "Otherwise")]
    Otherwise,
}

impl OrderRule {
    /// Rank placed into each of the five starting slots.
    pub fn permutation(self) -> [u8; KEY_COUNT] {
        match self {
            Self::AllCherry => [1, 2, 3, 4, 5],
            Self::TwoRed => [2, 4, 5, 3, 1],
            Self::ThreeBlue => [1, 4, 5, 2, 3],
            Self::OneSpeed => [5, 2, 1, 4, 3],
            Self::FourBrown => [4, 1, 2, 3, 5],
            Self::TwoRazer => [2, 3, 5, 4, 1],
            Self::OneWhite => [4, 1, 5, 2, 3],
            Self::ThreeKailhBox => [1, 5, 2, 3, 4],
            Self::ThreeGreen => [2, 5, 3, 4, 1],
            Self::ManyRazer => [3, 4, 1, 5, 2],
            Self::GateronKailhProMajority => [2, 3, 1, 4, 5],
            Self::OneGateron => [4, 3, 5, 1, 2],
            Self::AllKailhBox => [3, 1, 2, 4, 5],
            Self::FourGateron => [2, 4, 1, 3, 5],
            Self::TealiosAndZealios => [1, 5, 4, 3, 2],
            Self::AllDifferentBrands => [4, 2, 3, 1, 5],
            Self::Otherwise => [5, 4, 3, 2, 1],
        }
    }

    pub fn matches(self, t: &SwitchTally) -> bool {
        match self {
            Self::AllCherry => t.cherry == 5,
            Self::TwoRed => t.red == 2,
            Self::ThreeBlue => t.blue == 3,
            Self::OneSpeed => t.speed == 1,
            Self::FourBrown => t.brown == 4,
            Self::TwoRazer => t.razer == 2,
            Self::OneWhite => t.white == 1,
            Self::ThreeKailhBox => t.kailh_box == 3,
            Self::ThreeGreen => t.green == 3,
            Self::ManyRazer => t.razer > 2,
            Self::GateronKailhProMajority => t.gateron + t.kailh_pro > 2,
            Self::OneGateron => t.gateron == 1,
            Self::AllKailhBox => t.kailh_box == 5,
            Self::FourGateron => t.gateron == 4,
            Self::TealiosAndZealios => t.tealios >= 1 && t.zealios >= 1,
            Self::AllDifferentBrands => t.every_brand_below_two(),
            Self::Otherwise => true,
        }
    }
}

/// Picks the first matching rule. `Otherwise` always matches, so the
/// chain is total.
pub fn select_rule(tally: &SwitchTally) -> OrderRule {
    use strum::IntoEnumIterator;
    OrderRule::iter()
        .find(|r| r.matches(tally))
        .unwrap_or(OrderRule::Otherwise)
}

pub fn starting_order<'a, I: IntoIterator<Item = &'a SwitchSpec>>(
    switches: I,
) -> (OrderRule, [u8; KEY_COUNT]) {
    let tally = SwitchTally::from_switches(switches);
    let rule = select_rule(&tally);
    (rule, rule.permutation())
}
