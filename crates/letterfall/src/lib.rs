pub mod api;
pub mod core;
pub mod anagram;
pub mod layout;
pub mod flight;
pub mod config;
pub mod orchestrator;
pub mod extensions;
#[cfg(feature = "gallery")]
pub mod gallery;

// Re-export key types at crate root for convenience
pub use api::types::{SourceIndex, Viewport, AnchorRect, Destination};
pub use core::rng::Rng;
pub use core::time::FlightClock;
pub use anagram::{Phrase, PhraseCatalog, SourceLetters, ANAGRAMS, SOURCE_PHRASE};
pub use anagram::{match_letters, Disposition, LetterAssignment};
pub use layout::{plan_layout, resolve_destinations, LayoutConfig, LayoutMode, LayoutPlan};
pub use flight::{FlightFrame, LetterFlight, CueLatch, SoundCue, Tone, Waveform};
pub use flight::{FlightPath, FlightPhase, FlightSample, FlightProfile, LegSpec};
pub use config::{EggConfig, StaggerConfig, PulseConfig};
pub use orchestrator::{Orchestrator, EggPlan, EggState, TriggerMode};

#[cfg(feature = "gallery")]
pub use gallery::{
    Artwork, Gallery, Series, Lightbox, LightboxConfig, LightboxView, Direction,
    ZoomPan, ZoomConfig,
};

// Extensions: decoupled interpolation helpers
pub use extensions::{Easing, lerp, ease, arc, Tween, TweenLoop};
