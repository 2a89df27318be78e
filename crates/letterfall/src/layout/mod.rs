//! Layout planner: pixel destinations for every character of the target phrase.
//!
//! Two regimes, picked by viewport width:
//! - standard: one line centered on the viewport, resting a fixed offset
//!   above the footer landmark;
//! - compact: one centered line on the navigation grid for single words,
//!   otherwise all but the last word on line 1 and the last word on line 2.
//!
//! A missing landmark never fails the plan; the landing line falls back to a
//! fraction of the viewport height.

use serde::{Deserialize, Serialize};

use crate::anagram::{Disposition, LetterAssignment, Phrase};
use crate::api::types::{AnchorRect, Destination, SourceIndex, Viewport};

/// Layout regime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutMode {
    Standard,
    Compact,
}

impl LayoutMode {
    pub fn for_viewport(viewport: Viewport, config: &LayoutConfig) -> Self {
        if viewport.width <= config.compact_max_width {
            LayoutMode::Compact
        } else {
            LayoutMode::Standard
        }
    }
}

/// Tunables for both regimes, in CSS pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Widest viewport still treated as compact (inclusive).
    pub compact_max_width: f32,
    pub standard_advance: f32,
    pub standard_word_gap: f32,
    /// Landing line sits this far above the footer's top edge.
    pub standard_anchor_offset: f32,
    pub standard_fallback_fraction: f32,
    pub compact_advance: f32,
    pub compact_word_gap: f32,
    /// Vertical distance from line 1 to line 2.
    pub compact_line_gap: f32,
    /// Landing line sits this far above the navigation grid's top edge.
    pub compact_anchor_offset: f32,
    pub compact_fallback_fraction: f32,
    /// How far beyond the viewport edge offscreen letters are sent.
    pub exit_margin: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            compact_max_width: 1000.0,
            standard_advance: 28.0,
            standard_word_gap: 15.0,
            standard_anchor_offset: 60.0,
            standard_fallback_fraction: 0.85,
            compact_advance: 20.0,
            compact_word_gap: 12.0,
            compact_line_gap: 35.0,
            compact_anchor_offset: 0.0,
            compact_fallback_fraction: 0.6,
            exit_margin: 200.0,
        }
    }
}

/// Output of [`plan_layout`].
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutPlan {
    pub mode: LayoutMode,
    /// The landing line (line 1 in compact two-line layouts).
    pub landing_y: f32,
    /// One destination per target character, reading order.
    pub slots: Vec<Destination>,
}

impl LayoutPlan {
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

/// Place a run of words on one line centered at `viewport.center_x()`.
fn place_line(words: &[Vec<char>], y: f32, advance: f32, word_gap: f32, viewport: Viewport, out: &mut Vec<Destination>) {
    let chars: usize = words.iter().map(Vec::len).sum();
    let gaps = words.len().saturating_sub(1);
    let width = chars as f32 * advance + gaps as f32 * word_gap;
    let mut x = viewport.center_x() - width / 2.0;

    for (w, word) in words.iter().enumerate() {
        if w > 0 {
            x += word_gap;
        }
        for _ in word {
            out.push(Destination::landing(x, y));
            x += advance;
        }
    }
}

/// Compute where each character of `phrase` lands.
pub fn plan_layout(phrase: &Phrase, viewport: Viewport, anchor: Option<AnchorRect>, config: &LayoutConfig) -> LayoutPlan {
    let mode = LayoutMode::for_viewport(viewport, config);
    let (offset, fallback) = match mode {
        LayoutMode::Standard => (config.standard_anchor_offset, config.standard_fallback_fraction),
        LayoutMode::Compact => (config.compact_anchor_offset, config.compact_fallback_fraction),
    };
    let landing_y = match anchor {
        Some(rect) => rect.top - offset,
        None => {
            log::debug!("layout: landmark missing, landing at {:.2} of viewport height", fallback);
            viewport.height * fallback
        }
    };

    let words = phrase.words();
    let mut slots = Vec::with_capacity(phrase.char_count());
    match mode {
        LayoutMode::Standard => {
            place_line(words, landing_y, config.standard_advance, config.standard_word_gap, viewport, &mut slots);
        }
        LayoutMode::Compact if words.len() <= 1 => {
            place_line(words, landing_y, config.compact_advance, config.compact_word_gap, viewport, &mut slots);
        }
        LayoutMode::Compact => {
            let (head, last) = words.split_at(words.len() - 1);
            place_line(head, landing_y, config.compact_advance, config.compact_word_gap, viewport, &mut slots);
            place_line(
                last,
                landing_y + config.compact_line_gap,
                config.compact_advance,
                config.compact_word_gap,
                viewport,
                &mut slots,
            );
        }
    }

    LayoutPlan { mode, landing_y, slots }
}

/// Map every source letter to its destination: its slot, or an exit point
/// beyond the matching viewport edge at the landing line.
pub fn resolve_destinations(
    assignment: &LetterAssignment,
    plan: &LayoutPlan,
    viewport: Viewport,
    config: &LayoutConfig,
) -> Vec<Option<Destination>> {
    assignment
        .iter()
        .map(|(SourceIndex(i), disposition)| match disposition {
            Disposition::Slot(n) => {
                let dest = plan.slots.get(n).copied();
                if dest.is_none() {
                    log::debug!("layout: source {} assigned to unplanned slot {}", i, n);
                }
                dest
            }
            Disposition::OffscreenLeft => Some(Destination::exit(-config.exit_margin, plan.landing_y)),
            Disposition::OffscreenRight => Some(Destination::exit(viewport.width + config.exit_margin, plan.landing_y)),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anagram::{match_letters, SourceLetters};
    use crate::core::rng::Rng;

    const DESKTOP: Viewport = Viewport { width: 1440.0, height: 900.0 };
    const PHONE: Viewport = Viewport { width: 390.0, height: 844.0 };

    fn footer() -> Option<AnchorRect> {
        Some(AnchorRect::new(0.0, 820.0, 1440.0, 80.0))
    }

    fn nav_grid() -> Option<AnchorRect> {
        Some(AnchorRect::new(16.0, 500.0, 358.0, 200.0))
    }

    #[test]
    fn mode_threshold_is_inclusive() {
        let cfg = LayoutConfig::default();
        assert_eq!(LayoutMode::for_viewport(Viewport::new(1000.0, 800.0), &cfg), LayoutMode::Compact);
        assert_eq!(LayoutMode::for_viewport(Viewport::new(1001.0, 800.0), &cfg), LayoutMode::Standard);
    }

    #[test]
    fn one_destination_per_character() {
        let cfg = LayoutConfig::default();
        for text in ["WEIRD", "WIDE WORLD", "WORLDWIDE WALTHER"] {
            let phrase = Phrase::new(text);
            assert_eq!(plan_layout(&phrase, DESKTOP, footer(), &cfg).len(), phrase.char_count());
            assert_eq!(plan_layout(&phrase, PHONE, nav_grid(), &cfg).len(), phrase.char_count());
        }
    }

    #[test]
    fn standard_is_single_centered_line() {
        let cfg = LayoutConfig::default();
        let plan = plan_layout(&Phrase::new("WIDE WORLD"), DESKTOP, footer(), &cfg);
        assert_eq!(plan.mode, LayoutMode::Standard);
        assert!(plan.slots.iter().all(|d| d.pos.y == 760.0));

        // 9 chars * 28 + 1 gap * 15 = 267 px wide.
        let first = plan.slots[0].pos.x;
        let last = plan.slots[8].pos.x + cfg.standard_advance;
        assert!((first - (720.0 - 133.5)).abs() < 1e-3);
        assert!((last - (720.0 + 133.5)).abs() < 1e-3);
        // The gap sits between E and W.
        assert!((plan.slots[4].pos.x - plan.slots[3].pos.x - 43.0).abs() < 1e-3);
    }

    #[test]
    fn compact_single_word_shares_y() {
        let cfg = LayoutConfig::default();
        let plan = plan_layout(&Phrase::new("WEALTH"), PHONE, nav_grid(), &cfg);
        assert_eq!(plan.mode, LayoutMode::Compact);
        assert!(plan.slots.iter().all(|d| d.pos.y == 500.0));
        assert!((plan.slots[0].pos.x - (195.0 - 60.0)).abs() < 1e-3);
    }

    #[test]
    fn compact_wide_world_uses_two_lines() {
        let cfg = LayoutConfig::default();
        let plan = plan_layout(&Phrase::new("WIDE WORLD"), PHONE, nav_grid(), &cfg);
        let (line1, line2) = plan.slots.split_at(4);

        assert!(line1.iter().all(|d| d.pos.y == 500.0));
        assert!(line2.iter().all(|d| d.pos.y == 535.0));
        // WIDE: 80 px centered; WORLD: 100 px centered.
        assert!((line1[0].pos.x - 155.0).abs() < 1e-3);
        assert!((line2[0].pos.x - 145.0).abs() < 1e-3);
    }

    #[test]
    fn last_word_is_strictly_lower() {
        let cfg = LayoutConfig::default();
        let phrase = Phrase::new("WALTHER WORLDED");
        let plan = plan_layout(&phrase, PHONE, None, &cfg);
        let split = phrase.words()[0].len();
        let max_head = plan.slots[..split].iter().map(|d| d.pos.y).fold(f32::MIN, f32::max);
        assert!(plan.slots[split..].iter().all(|d| d.pos.y > max_head));
    }

    #[test]
    fn missing_landmark_uses_viewport_fraction() {
        let cfg = LayoutConfig::default();
        let plan = plan_layout(&Phrase::new("LAW"), DESKTOP, None, &cfg);
        assert!((plan.landing_y - 900.0 * 0.85).abs() < 1e-3);
        let plan = plan_layout(&Phrase::new("LAW"), PHONE, None, &cfg);
        assert!((plan.landing_y - 844.0 * 0.6).abs() < 1e-3);
    }

    #[test]
    fn offscreen_letters_exit_past_the_edges() {
        let cfg = LayoutConfig::default();
        let src = SourceLetters::heading();
        let phrase = Phrase::new("WEIRD");
        let assignment = match_letters(&src, &phrase, &mut Rng::new(3));
        let plan = plan_layout(&phrase, DESKTOP, footer(), &cfg);
        let dests = resolve_destinations(&assignment, &plan, DESKTOP, &cfg);

        assert_eq!(dests.len(), src.len());
        for (idx, d) in assignment.iter() {
            let dest = dests[idx.0].expect("every source letter resolves");
            match d {
                Disposition::Slot(n) => assert_eq!(dest, plan.slots[n]),
                Disposition::OffscreenLeft => {
                    assert!(dest.offscreen);
                    assert_eq!(dest.pos.x, -200.0);
                }
                Disposition::OffscreenRight => {
                    assert!(dest.offscreen);
                    assert_eq!(dest.pos.x, 1640.0);
                }
            }
            assert_eq!(dest.pos.y, plan.landing_y);
        }
    }
}
