pub mod catalog;
pub mod solve;
pub mod survey;

use mechswitch::error::{MechSwitchError, MsResult};
use mechswitch::facts::BombFacts;

/// Facts from `--facts`, with `--serial` taking precedence over the file.
pub fn resolve_facts(path: Option<&str>, serial: Option<&str>) -> MsResult<BombFacts> {
    let mut facts = match path {
        Some(p) => BombFacts::load_from_file(p)?,
        None => BombFacts::new(serial.unwrap_or("AB1C2D")),
    };
    if let Some(s) = serial {
        facts.serial_number = s.to_ascii_uppercase();
    }
    facts.validate()?;
    Ok(facts)
}

pub fn seeded_rng(seed: Option<u64>) -> fastrand::Rng {
    match seed {
        Some(s) => fastrand::Rng::with_seed(s),
        None => fastrand::Rng::new(),
    }
}

pub fn parse_draws(raw: &str) -> MsResult<[usize; 5]> {
    let parts: Vec<&str> = raw.split(',').map(str::trim).collect();
    if parts.len() != 5 {
        return Err(MechSwitchError::Config(format!(
            "--draws needs 5 comma separated catalog indices, got {}",
            parts.len()
        )));
    }
    let mut draws = [0usize; 5];
    for (d, p) in draws.iter_mut().zip(&parts) {
        *d = p
            .parse()
            .map_err(|_| MechSwitchError::Config(format!("Invalid catalog index '{}'", p)))?;
        if *d >= mechswitch::catalog::CATALOG_SIZE {
            return Err(MechSwitchError::Config(format!(
                "Catalog index {} out of range (0..{})",
                d,
                mechswitch::catalog::CATALOG_SIZE
            )));
        }
    }
    Ok(draws)
}
