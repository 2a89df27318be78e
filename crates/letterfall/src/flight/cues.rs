//! Sound cues fired at flight milestones, and the latch that keeps each one
//! from firing twice.

use serde::{Deserialize, Serialize};

use super::path::FlightPhase;

/// Oscillator shape for a synthesized cue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Waveform {
    Sine,
    Square,
    Triangle,
}

/// A short synthesized tone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    pub frequency_hz: f32,
    pub duration_s: f64,
    pub waveform: Waveform,
}

impl Tone {
    /// Gain at tone onset.
    pub const START_GAIN: f32 = 0.15;
    /// Gain the exponential ramp decays to by the end of the tone.
    pub const END_GAIN: f32 = 0.01;
}

/// The four milestone cues of a letter flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundCue {
    /// Letter leaves the heading.
    Pop,
    /// First bounce off the landing line.
    Boing1,
    /// Second, smaller bounce.
    Boing2,
    /// Letter comes to rest.
    Bonk,
}

impl SoundCue {
    pub const ALL: [SoundCue; 4] = [SoundCue::Pop, SoundCue::Boing1, SoundCue::Boing2, SoundCue::Bonk];

    pub fn tone(self) -> Tone {
        match self {
            SoundCue::Pop => Tone { frequency_hz: 800.0, duration_s: 0.08, waveform: Waveform::Square },
            SoundCue::Boing1 => Tone { frequency_hz: 400.0, duration_s: 0.15, waveform: Waveform::Sine },
            SoundCue::Boing2 => Tone { frequency_hz: 350.0, duration_s: 0.12, waveform: Waveform::Sine },
            SoundCue::Bonk => Tone { frequency_hz: 200.0, duration_s: 0.1, waveform: Waveform::Triangle },
        }
    }

    /// Phase whose entry fires this cue.
    pub fn phase(self) -> FlightPhase {
        match self {
            SoundCue::Pop => FlightPhase::Freefall,
            SoundCue::Boing1 => FlightPhase::Bounce1,
            SoundCue::Boing2 => FlightPhase::Bounce2,
            SoundCue::Bonk => FlightPhase::Settle,
        }
    }

    fn bit(self) -> u8 {
        match self {
            SoundCue::Pop => 1,
            SoundCue::Boing1 => 1 << 1,
            SoundCue::Boing2 => 1 << 2,
            SoundCue::Bonk => 1 << 3,
        }
    }
}

/// Per-flight record of which cues have already fired.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CueLatch {
    fired: u8,
}

impl CueLatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fire every cue due by `phase` that has not fired yet, in milestone order.
    /// A frame that skips whole phases still fires each skipped cue once.
    pub fn fire_through(&mut self, phase: FlightPhase) -> Vec<SoundCue> {
        let mut due = Vec::new();
        for cue in SoundCue::ALL {
            if cue.phase() <= phase && self.fired & cue.bit() == 0 {
                self.fired |= cue.bit();
                due.push(cue);
            }
        }
        due
    }

    pub fn has_fired(&self, cue: SoundCue) -> bool {
        self.fired & cue.bit() != 0
    }
}
