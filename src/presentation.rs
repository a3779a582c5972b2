//! Write-only view of the module's lights, keycaps, screen and speaker.
//!
//! The core never reads anything back from a sink; hosts decide how (and
//! whether) each request is rendered.

use crate::catalog::{SoundClass, SwitchColor};
use crate::interaction::LightColor;
use serde::Serialize;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum KeyMaterial {
    /// The key's own switch colour.
    Switch(SwitchColor),
    Light(LightColor),
    Blank,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SoundCue {
    Hold(SoundClass),
    Release(SoundClass),
    Strike,
    Solve,
}

pub trait PresentationSink {
    fn set_light(&mut self, slot: usize, on: bool);
    fn set_material(&mut self, slot: usize, material: KeyMaterial);
    fn show_text(&mut self, text: &str);
    fn play_sound(&mut self, cue: SoundCue);
}

/// Discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl PresentationSink for NullSink {
    fn set_light(&mut self, _slot: usize, _on: bool) {}
    fn set_material(&mut self, _slot: usize, _material: KeyMaterial) {}
    fn show_text(&mut self, _text: &str) {}
    fn play_sound(&mut self, _cue: SoundCue) {}
}

/// Logs every request at debug level under the module's tag.
#[derive(Debug, Clone)]
pub struct TracingSink {
    tag: String,
}

impl TracingSink {
    pub fn new(tag: impl Into<String>) -> Self {
        Self { tag: tag.into() }
    }
}

impl PresentationSink for TracingSink {
    fn set_light(&mut self, slot: usize, on: bool) {
        debug!("{} Light {} {}", self.tag, slot, if on { "on" } else { "off" });
    }

    fn set_material(&mut self, slot: usize, material: KeyMaterial) {
        debug!("{} Key {} material {:?}", self.tag, slot, material);
    }

    fn show_text(&mut self, text: &str) {
        debug!("{} Screen: {:?}", self.tag, text);
    }

    fn play_sound(&mut self, cue: SoundCue) {
        debug!("{} Sound {:?}", self.tag, cue);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum PresentationEvent {
    Light { slot: usize, on: bool },
    Material { slot: usize, material: KeyMaterial },
    Text(String),
    Sound(SoundCue),
}

/// Keeps every request in order. Handy for hosts that batch updates.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    pub events: Vec<PresentationEvent>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last light state requested for `slot`, if any.
    pub fn light(&self, slot: usize) -> Option<bool> {
        self.events.iter().rev().find_map(|e| match *e {
            PresentationEvent::Light { slot: s, on } if s == slot => Some(on),
            _ => None,
        })
    }

    pub fn material(&self, slot: usize) -> Option<KeyMaterial> {
        self.events.iter().rev().find_map(|e| match *e {
            PresentationEvent::Material { slot: s, material } if s == slot => Some(material),
            _ => None,
        })
    }

    pub fn last_text(&self) -> Option<&str> {
        self.events.iter().rev().find_map(|e| match e {
            PresentationEvent::Text(t) => Some(t.as_str()),
            _ => None,
        })
    }

    pub fn sounds(&self) -> Vec<SoundCue> {
        self.events
            .iter()
            .filter_map(|e| match *e {
                PresentationEvent::Sound(c) => Some(c),
                _ => None,
            })
            .collect()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl PresentationSink for RecordingSink {
    fn set_light(&mut self, slot: usize, on: bool) {
        self.events.push(PresentationEvent::Light { slot, on });
    }

    fn set_material(&mut self, slot: usize, material: KeyMaterial) {
        self.events.push(PresentationEvent::Material { slot, material });
    }

    fn show_text(&mut self, text: &str) {
        self.events.push(PresentationEvent::Text(text.to_string()));
    }

    fn play_sound(&mut self, cue: SoundCue) {
        self.events.push(PresentationEvent::Sound(cue));
    }
}

/// Screen text shown while a key is down.
pub fn switch_readout(force: f32, actuation: f32, travel: f32) -> String {
    format!(
        "FOR {} CN\nACT {} MM\nDIS {} MM",
        force, actuation, travel
    )
}
