use serde::{Deserialize, Serialize};

use crate::anagram::{PhraseCatalog, SourceLetters};
use crate::extensions::easing::Easing;
use crate::extensions::tween::{Tween, TweenLoop};
use crate::flight::FlightProfile;
use crate::layout::LayoutConfig;

/// Random start offsets, per trigger mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StaggerConfig {
    /// Upper bound when each letter is clicked individually.
    pub per_letter_max_ms: f32,
    /// Upper bound when one tap releases every letter.
    pub tap_all_max_ms: f32,
}

impl Default for StaggerConfig {
    fn default() -> Self {
        Self {
            per_letter_max_ms: 150.0,
            tap_all_max_ms: 3000.0,
        }
    }
}

/// The "settle pulse" played once every letter has landed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PulseConfig {
    /// Peak scale of the pulse.
    pub scale: f32,
    /// Duration of each half of the pulse.
    pub leg_ms: f32,
    pub easing: Easing,
    /// Slack added after the last letter is expected to rest.
    pub settle_margin_ms: f32,
}

impl Default for PulseConfig {
    fn default() -> Self {
        Self {
            scale: 1.15,
            leg_ms: 300.0,
            easing: Easing::QuadInOut,
            settle_margin_ms: 500.0,
        }
    }
}

impl PulseConfig {
    pub fn tween(&self) -> Tween {
        Tween::new(1.0, self.scale, self.leg_ms, self.easing).with_loop(TweenLoop::Yoyo)
    }
}

/// Everything tunable about the easter egg. Every field has a default, so a
/// JSON override only needs the keys it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EggConfig {
    pub layout: LayoutConfig,
    pub standard: FlightProfile,
    pub compact: FlightProfile,
    pub stagger: StaggerConfig,
    pub pulse: PulseConfig,
    /// Fixed RNG seed; the host picks one when absent.
    pub seed: Option<u64>,
    /// Replacement phrase list; the built-in anagrams when absent.
    pub phrases: Option<Vec<String>>,
}

impl Default for EggConfig {
    fn default() -> Self {
        Self {
            layout: LayoutConfig::default(),
            standard: FlightProfile::standard(),
            compact: FlightProfile::compact(),
            stagger: StaggerConfig::default(),
            pulse: PulseConfig::default(),
            seed: None,
            phrases: None,
        }
    }
}

impl EggConfig {
    /// Parse a config from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// The phrase catalog this config selects.
    pub fn catalog(&self, source: &SourceLetters) -> PhraseCatalog {
        match &self.phrases {
            Some(list) => PhraseCatalog::from_phrases(list.iter().cloned(), source),
            None => PhraseCatalog::builtin(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_json_is_default() {
        let cfg = EggConfig::from_json("{}").unwrap();
        assert_eq!(cfg, EggConfig::default());
    }

    #[test]
    fn partial_override() {
        let json = r#"{
            "seed": 42,
            "stagger": { "tap_all_max_ms": 1200 },
            "layout": { "compact_max_width": 768 },
            "phrases": ["WEIRD", "TRUE"]
        }"#;
        let cfg = EggConfig::from_json(json).unwrap();
        assert_eq!(cfg.seed, Some(42));
        assert_eq!(cfg.stagger.tap_all_max_ms, 1200.0);
        assert_eq!(cfg.stagger.per_letter_max_ms, 150.0);
        assert_eq!(cfg.layout.compact_max_width, 768.0);
        assert_eq!(cfg.layout.standard_advance, 28.0);

        let catalog = cfg.catalog(&SourceLetters::heading());
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(EggConfig::from_json("{ \"seed\": \"soon\" }").is_err());
    }

    #[test]
    fn pulse_returns_to_rest() {
        let t = PulseConfig::default().tween();
        assert!((t.sample(300.0) - 1.15).abs() < 1e-5);
        assert!((t.sample(600.0) - 1.0).abs() < 1e-5);
    }
}
