//! Source heading letters and the catalog of phrases they can be rearranged into.

use std::collections::HashMap;

use crate::core::rng::Rng;

/// The heading whose letters take part in the animation.
pub const SOURCE_PHRASE: &str = "WALTHER WORLDWIDE";

/// Anagrams of (a subset of) [`SOURCE_PHRASE`]. Every entry can be spelled from
/// the source inventory; `catalog_phrases_are_feasible` keeps it that way.
pub const ANAGRAMS: &[&str] = &[
    "WORLDWIDE WALTHER", "WIDE WORLD", "WORLD WIDE", "WORLD HELD", "WIDE EARTH",
    "EARTH WIDE", "WORLD LAW", "WORLD WEARIED", "WORLDED EARTH", "HARD WORLD",
    "REAL WORLD", "WIDE LAW", "WORLD HARD", "WORLD REAL", "EARTH WORLDED",
    "WORLD RAW", "WORLD WEAR", "WEALTH", "LAW", "WALTHER WORLDED",
    "WALTHER WIDE", "WALTHER WIRED", "WALTHER WEIRD", "WALTHER WIDER", "WALTHER WIELD",
    "WALTHER WOLD", "WEIRD WALTHER", "WIDER WALTHER", "WIELD WALTHER", "WORLDED WALTHER",
    "WEIRD WORLD", "WORLD WEIRD", "WEIRD EARTH", "EARTH WEIRD", "WEIRD LAW",
    "WEIRD RAW", "RAW WEIRD", "WEIRD", "DRAWL", "ALTER",
    "ALERT", "LATHER", "HEATED", "THAWED", "HOARDED",
    "WHALED", "WREATHED", "HALTER", "WIRED", "HERALD",
    "READ", "DWELT", "HEARD", "ROAD", "WARD",
    "DEAL", "RITE", "RIDE", "WEIR", "EWER",
    "THEW", "RATHE", "THOLE",
];

/// Ordered letters of a source phrase with spaces removed. Position in the
/// sequence is the letter's [`SourceIndex`](crate::api::types::SourceIndex).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLetters {
    letters: Vec<char>,
}

impl SourceLetters {
    pub fn from_phrase(phrase: &str) -> Self {
        Self {
            letters: phrase.chars().filter(|c| !c.is_whitespace()).collect(),
        }
    }

    /// The site heading.
    pub fn heading() -> Self {
        Self::from_phrase(SOURCE_PHRASE)
    }

    pub fn len(&self) -> usize {
        self.letters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.letters.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<char> {
        self.letters.get(index).copied()
    }

    pub fn as_slice(&self) -> &[char] {
        &self.letters
    }

    /// Letter multiset.
    fn inventory(&self) -> HashMap<char, usize> {
        let mut counts = HashMap::new();
        for &c in &self.letters {
            *counts.entry(c).or_insert(0) += 1;
        }
        counts
    }

    /// Whether every non-space character of `phrase` can be drawn from this
    /// inventory without reuse.
    pub fn can_spell(&self, phrase: &str) -> bool {
        let mut counts = self.inventory();
        phrase.chars().filter(|c| !c.is_whitespace()).all(|c| match counts.get_mut(&c) {
            Some(n) if *n > 0 => {
                *n -= 1;
                true
            }
            _ => false,
        })
    }
}

/// A target phrase split into words.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Phrase {
    text: String,
    words: Vec<Vec<char>>,
}

impl Phrase {
    pub fn new(text: &str) -> Self {
        let words = text
            .split_whitespace()
            .map(|w| w.chars().collect())
            .collect();
        Self { text: text.to_string(), words }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn words(&self) -> &[Vec<char>] {
        &self.words
    }

    /// Characters in reading order, spaces stripped.
    pub fn chars(&self) -> impl Iterator<Item = char> + '_ {
        self.words.iter().flatten().copied()
    }

    pub fn char_count(&self) -> usize {
        self.words.iter().map(Vec::len).sum()
    }
}

/// The pool of phrases the egg chooses from.
#[derive(Debug, Clone)]
pub struct PhraseCatalog {
    phrases: Vec<String>,
}

impl PhraseCatalog {
    /// The built-in anagram list.
    pub fn builtin() -> Self {
        Self {
            phrases: ANAGRAMS.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Parse a JSON array of strings. Phrases the source cannot spell are
    /// dropped with a warning.
    pub fn from_json(json: &str, source: &SourceLetters) -> Result<Self, serde_json::Error> {
        let raw: Vec<String> = serde_json::from_str(json)?;
        Ok(Self::from_phrases(raw, source))
    }

    /// Build a catalog from candidate phrases, keeping only spellable ones.
    pub fn from_phrases(candidates: impl IntoIterator<Item = String>, source: &SourceLetters) -> Self {
        let phrases = candidates
            .into_iter()
            .filter(|p| {
                let ok = !p.trim().is_empty() && source.can_spell(p);
                if !ok {
                    log::warn!("catalog: skipping '{}', not spellable from source letters", p);
                }
                ok
            })
            .collect();
        Self { phrases }
    }

    /// Pick a phrase. An empty catalog falls back to the source phrase itself.
    pub fn choose(&self, rng: &mut Rng) -> Phrase {
        match rng.pick(&self.phrases) {
            Some(text) => Phrase::new(text),
            None => Phrase::new(SOURCE_PHRASE),
        }
    }

    pub fn len(&self) -> usize {
        self.phrases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phrases.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.phrases.iter().map(String::as_str)
    }
}

impl Default for PhraseCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}
