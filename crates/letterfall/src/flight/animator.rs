//! Per-letter flight driver: one path, one clock, one cue latch.

use crate::api::types::SourceIndex;
use crate::core::time::FlightClock;

use super::cues::{CueLatch, SoundCue};
use super::path::{FlightPath, FlightPhase, FlightSample};

/// What the host should do for one letter on one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct FlightFrame {
    pub sample: FlightSample,
    /// Cues that became due on this frame, in milestone order.
    pub cues: Vec<SoundCue>,
    /// True on the single frame the letter first comes to rest.
    pub landed: bool,
}

/// A letter in flight. Owned exclusively by whoever schedules its frames.
#[derive(Debug, Clone)]
pub struct LetterFlight {
    source: SourceIndex,
    path: FlightPath,
    clock: FlightClock,
    cues: CueLatch,
    landed: bool,
    phase: FlightPhase,
}

impl LetterFlight {
    pub fn new(source: SourceIndex, path: FlightPath, clock: FlightClock) -> Self {
        Self {
            source,
            path,
            clock,
            cues: CueLatch::new(),
            landed: false,
            phase: FlightPhase::Pending,
        }
    }

    pub fn source(&self) -> SourceIndex {
        self.source
    }

    pub fn path(&self) -> &FlightPath {
        &self.path
    }

    pub fn phase(&self) -> FlightPhase {
        self.phase
    }

    pub fn is_done(&self) -> bool {
        self.phase == FlightPhase::Done
    }

    /// Advance to the host timestamp `now_ms`.
    pub fn tick(&mut self, now_ms: f64) -> FlightFrame {
        let elapsed = self.clock.elapsed(now_ms);
        let sample = self.path.sample(elapsed);
        // Phases only move forward even if the host clock jitters backwards.
        self.phase = self.phase.max(sample.phase);

        let cues = self.cues.fire_through(self.phase);
        let landed = !self.landed && self.phase >= FlightPhase::Settle;
        if landed {
            self.landed = true;
            log::debug!("letter {} landed at {:?}", self.source.0, self.path.landing());
        }

        FlightFrame { sample, cues, landed }
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;
    use crate::api::types::{Destination, Viewport};
    use crate::flight::profile::FlightProfile;

    fn flight(delay_ms: f32) -> LetterFlight {
        let path = FlightPath::new(
            Vec2::new(100.0, 50.0),
            Destination::landing(400.0, 600.0),
            &FlightProfile::standard(),
            7.0,
            Viewport::new(1280.0, 800.0),
        );
        LetterFlight::new(SourceIndex(3), path, FlightClock::new(delay_ms))
    }

    #[test]
    fn each_cue_fires_once_at_sixty_fps() {
        let mut f = flight(0.0);
        let mut fired = Vec::new();
        let mut landed_frames = 0;
        let mut now = 10_000.0;
        while now < 10_000.0 + 2000.0 {
            let frame = f.tick(now);
            fired.extend(frame.cues);
            landed_frames += frame.landed as u32;
            now += 1000.0 / 60.0;
        }
        assert_eq!(fired, SoundCue::ALL.to_vec());
        assert_eq!(landed_frames, 1);
        assert_eq!(f.phase(), FlightPhase::Settle);
    }

    #[test]
    fn one_late_frame_fires_everything_once() {
        let mut f = flight(0.0);
        assert_eq!(f.tick(0.0).cues, vec![SoundCue::Pop]);
        let frame = f.tick(5000.0);
        assert_eq!(frame.cues, vec![SoundCue::Boing1, SoundCue::Boing2, SoundCue::Bonk]);
        assert!(frame.landed);
        assert_eq!(frame.sample.rotation, 367.0);
        assert!(f.tick(6000.0).cues.is_empty());
    }

    #[test]
    fn stagger_holds_the_letter_in_place() {
        let mut f = flight(250.0);
        let frame = f.tick(0.0);
        assert_eq!(frame.sample.phase, FlightPhase::Pending);
        assert_eq!(frame.sample.pos, Vec2::new(100.0, 50.0));
        assert!(frame.cues.is_empty());
        assert_eq!(f.tick(250.0).cues, vec![SoundCue::Pop]);
    }

    #[test]
    fn phase_never_regresses() {
        let mut f = flight(0.0);
        f.tick(1000.0);
        f.tick(1800.0);
        let frame = f.tick(1200.0);
        assert_eq!(f.phase(), FlightPhase::Bounce1);
        assert!(frame.cues.is_empty());
    }
}
