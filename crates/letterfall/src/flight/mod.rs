pub mod animator;
pub mod cues;
pub mod path;
pub mod profile;

pub use animator::{FlightFrame, LetterFlight};
pub use cues::{CueLatch, SoundCue, Tone, Waveform};
pub use path::{FlightPath, FlightPhase, FlightSample};
pub use profile::{FlightProfile, LegSpec};
