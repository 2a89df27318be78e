//! Greedy letter-inventory matching between the source heading and a target phrase.

use crate::api::types::SourceIndex;
use crate::core::rng::Rng;

use super::catalog::{Phrase, SourceLetters};

/// What a single source letter does once the egg fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Disposition {
    /// Lands in target slot `n` (reading order, spaces stripped).
    Slot(usize),
    OffscreenLeft,
    OffscreenRight,
}

impl Disposition {
    pub fn is_offscreen(self) -> bool {
        !matches!(self, Disposition::Slot(_))
    }
}

/// One disposition per source letter, indexed by [`SourceIndex`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LetterAssignment {
    dispositions: Vec<Disposition>,
    slot_count: usize,
}

impl LetterAssignment {
    pub fn get(&self, index: SourceIndex) -> Option<Disposition> {
        self.dispositions.get(index.0).copied()
    }

    /// Number of filled target slots. Equals the target's character count
    /// unless some characters could not be matched.
    pub fn slot_count(&self) -> usize {
        self.slot_count
    }

    pub fn len(&self) -> usize {
        self.dispositions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dispositions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (SourceIndex, Disposition)> + '_ {
        self.dispositions
            .iter()
            .enumerate()
            .map(|(i, d)| (SourceIndex(i), *d))
    }

    /// Source index filling target slot `slot`.
    pub fn source_for_slot(&self, slot: usize) -> Option<SourceIndex> {
        self.iter()
            .find(|(_, d)| *d == Disposition::Slot(slot))
            .map(|(i, _)| i)
    }
}

/// Assign source letters to the characters of `target`.
///
/// Each target character takes the leftmost unused source letter equal to it.
/// Characters with no remaining match are dropped without consuming a slot.
/// Leftover source letters go offscreen, side chosen by coin flip.
pub fn match_letters(source: &SourceLetters, target: &Phrase, rng: &mut Rng) -> LetterAssignment {
    let letters = source.as_slice();
    let mut used = vec![false; letters.len()];
    let mut slots: Vec<Option<usize>> = vec![None; letters.len()];
    let mut next_slot = 0;

    for wanted in target.chars() {
        let found = letters
            .iter()
            .enumerate()
            .find(|(i, c)| !used[*i] && **c == wanted)
            .map(|(i, _)| i);
        match found {
            Some(i) => {
                used[i] = true;
                slots[i] = Some(next_slot);
                next_slot += 1;
            }
            None => log::debug!("matcher: no source letter left for '{}' in '{}'", wanted, target.text()),
        }
    }

    let dispositions = slots
        .into_iter()
        .map(|slot| match slot {
            Some(n) => Disposition::Slot(n),
            None if rng.coin() => Disposition::OffscreenLeft,
            None => Disposition::OffscreenRight,
        })
        .collect();

    LetterAssignment {
        dispositions,
        slot_count: next_slot,
    }
}
