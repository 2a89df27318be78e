pub mod catalog;
pub mod matcher;

pub use catalog::{Phrase, PhraseCatalog, SourceLetters, ANAGRAMS, SOURCE_PHRASE};
pub use matcher::{match_letters, Disposition, LetterAssignment};
