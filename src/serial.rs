use crate::consts::SERIAL_BIT_COUNT;

/// Classifies a serial character by the digital root of its value.
///
/// Digits use their own value, uppercase letters their alphabet position
/// (A = 1). Roots 5..=9 are "high" (`true`); 0..=4 and anything else are "low".
pub fn numeral_conversion(c: char) -> bool {
    let value = match c {
        '0'..='9' => c as u32 - '0' as u32,
        'A'..='Z' => c as u32 - 'A' as u32 + 1,
        _ => return false,
    };
    digital_root(value) >= 5
}

fn digital_root(n: u32) -> u32 {
    if n == 0 {
        0
    } else {
        1 + (n - 1) % 9
    }
}

/// The 15 movement bits derived from the serial number.
///
/// Entry `i` is the class of serial character `i mod len`, so a six
/// character serial wraps mid-cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SerialBitVector {
    bits: [bool; SERIAL_BIT_COUNT],
}

impl SerialBitVector {
    pub fn from_serial(serial: &str) -> Self {
        let classes: Vec<bool> = serial.chars().map(numeral_conversion).collect();
        let mut bits = [false; SERIAL_BIT_COUNT];
        if !classes.is_empty() {
            for (i, bit) in bits.iter_mut().enumerate() {
                *bit = classes[i % classes.len()];
            }
        }
        Self { bits }
    }

    pub fn from_bits(bits: [bool; SERIAL_BIT_COUNT]) -> Self {
        Self { bits }
    }

    pub fn get(&self, index: usize) -> bool {
        self.bits[index % SERIAL_BIT_COUNT]
    }

    pub fn as_slice(&self) -> &[bool] {
        &self.bits
    }

    pub fn to_bit_string(&self) -> String {
        self.bits.iter().map(|&b| if b { '1' } else { '0' }).collect()
    }
}
