//! The flight path of one letter as a pure function of elapsed time.
//!
//! ```text
//!   Pending ─▶ Freefall ─▶ Bounce1 ─▶ Bounce2 ─▶ Settle ─┬─▶ (rests forever)
//!                                                        └─▶ Exit ─▶ Done   (offscreen letters)
//! ```
//!
//! Screen coordinates: y grows downward, so arcs are subtracted from y.

use glam::Vec2;

use crate::api::types::{Destination, Viewport};
use crate::extensions::easing::{arc, ease, Easing};
use crate::extensions::tween::Tween;

use super::profile::{FlightProfile, LegSpec};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FlightPhase {
    /// Waiting out the stagger delay at the launch point.
    Pending,
    Freefall,
    Bounce1,
    Bounce2,
    /// Resting at the landing point.
    Settle,
    /// Leaving past the viewport edge.
    Exit,
    /// Gone; the floater can be detached.
    Done,
}

/// Pose of a letter at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlightSample {
    pub pos: Vec2,
    /// Degrees, clockwise.
    pub rotation: f32,
    pub opacity: f32,
    pub phase: FlightPhase,
}

/// Precomputed geometry for one airborne leg.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Leg {
    phase: FlightPhase,
    start_ms: f32,
    duration_ms: f32,
    from_x: f32,
    to_x: f32,
    rot_from: f32,
    rot_to: f32,
    arc_height: f32,
    easing: Easing,
}

impl Leg {
    fn progress(&self, elapsed: f32) -> f32 {
        if self.duration_ms <= 0.0 {
            1.0
        } else {
            ((elapsed - self.start_ms) / self.duration_ms).clamp(0.0, 1.0)
        }
    }

    fn end_ms(&self) -> f32 {
        self.start_ms + self.duration_ms.max(0.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FlightPath {
    start: Vec2,
    landing: Vec2,
    legs: [Leg; 3],
    fall_easing: Easing,
    rest_rotation: f32,
    /// Horizontal clamp range while airborne.
    x_bounds: Option<(f32, f32)>,
    /// Smallest y (highest point on screen) the letter may reach while airborne.
    y_ceiling: Option<f32>,
    exit_x: Option<Tween>,
    exit_fade: Option<Tween>,
}

impl FlightPath {
    /// Plan a flight from `start` to `destination`. `tilt_deg` is the final
    /// resting tilt on top of the full turn.
    pub fn new(start: Vec2, destination: Destination, profile: &FlightProfile, tilt_deg: f32, viewport: Viewport) -> Self {
        let x_bounds = profile.horizontal_margin.and_then(|m| {
            let (lo, hi) = (m, viewport.width - m);
            (lo <= hi).then_some((lo, hi))
        });
        let clamp_x = |x: f32| match x_bounds {
            Some((lo, hi)) => x.clamp(lo, hi),
            None => x,
        };

        let landing = if destination.offscreen && !profile.land_before_exit {
            destination.pos
        } else {
            Vec2::new(clamp_x(destination.pos.x), destination.pos.y)
        };

        let y_ceiling = profile.max_bounce_rise.map(|cap| start.y.min(landing.y) - cap);

        let dx = landing.x - start.x;
        let dy = (landing.y - start.y).abs();
        let rest_rotation = profile.bounce2.rotation_deg + tilt_deg;

        let mut legs = [Leg {
            phase: FlightPhase::Freefall,
            start_ms: 0.0,
            duration_ms: 0.0,
            from_x: start.x,
            to_x: start.x,
            rot_from: 0.0,
            rot_to: 0.0,
            arc_height: 0.0,
            easing: Easing::Linear,
        }; 3];

        let specs: [(&LegSpec, FlightPhase); 3] = [
            (&profile.freefall, FlightPhase::Freefall),
            (&profile.bounce1, FlightPhase::Bounce1),
            (&profile.bounce2, FlightPhase::Bounce2),
        ];
        let mut t = 0.0;
        let mut x = start.x;
        let mut rot = 0.0;
        for (i, (spec, phase)) in specs.iter().enumerate() {
            let to_x = if i == 2 { landing.x } else { start.x + dx * spec.x_progress };
            let rot_to = if i == 2 { rest_rotation } else { spec.rotation_deg };
            let mut arc_height = dy * spec.arc_fraction;
            if i > 0 {
                if let Some(cap) = profile.max_bounce_rise {
                    arc_height = arc_height.min(cap);
                }
            }
            legs[i] = Leg {
                phase: *phase,
                start_ms: t,
                duration_ms: spec.duration_ms.max(0.0),
                from_x: x,
                to_x,
                rot_from: rot,
                rot_to,
                arc_height,
                easing: spec.easing,
            };
            t += spec.duration_ms.max(0.0);
            x = to_x;
            rot = rot_to;
        }

        let (exit_x, exit_fade) = if destination.offscreen {
            (
                Some(
                    Tween::new(landing.x, destination.pos.x, profile.exit_duration_ms, profile.exit_easing)
                        .with_delay(profile.exit_pause_ms),
                ),
                Some(Tween::fade_out(profile.exit_duration_ms, Easing::Linear).with_delay(profile.exit_pause_ms)),
            )
        } else {
            (None, None)
        };

        Self {
            start,
            landing,
            legs,
            fall_easing: profile.fall_easing,
            rest_rotation,
            x_bounds,
            y_ceiling,
            exit_x,
            exit_fade,
        }
    }

    pub fn start(&self) -> Vec2 {
        self.start
    }

    /// Where the letter comes to rest (before any exit).
    pub fn landing(&self) -> Vec2 {
        self.landing
    }

    pub fn rest_rotation(&self) -> f32 {
        self.rest_rotation
    }

    pub fn exits(&self) -> bool {
        self.exit_x.is_some()
    }

    /// Milliseconds from launch to rest.
    pub fn flight_ms(&self) -> f32 {
        self.legs[2].end_ms()
    }

    /// Milliseconds from launch until the path is finished: rest for landed
    /// letters, detachment for exiting ones.
    pub fn total_ms(&self) -> f32 {
        self.flight_ms() + self.exit_x.map_or(0.0, |t| t.total_ms())
    }

    /// Launch instant and the start of each later phase.
    pub fn phase_starts(&self) -> [f32; 4] {
        [self.legs[0].start_ms, self.legs[1].start_ms, self.legs[2].start_ms, self.flight_ms()]
    }

    fn clamp_x(&self, x: f32) -> f32 {
        match self.x_bounds {
            Some((lo, hi)) => x.clamp(lo, hi),
            None => x,
        }
    }

    /// Pose `elapsed_ms` after launch. Negative values are still pending.
    pub fn sample(&self, elapsed_ms: f32) -> FlightSample {
        if elapsed_ms < 0.0 {
            return FlightSample {
                pos: self.start,
                rotation: 0.0,
                opacity: 1.0,
                phase: FlightPhase::Pending,
            };
        }

        if let Some(leg) = self.legs.iter().find(|l| elapsed_ms < l.end_ms()) {
            let t = leg.progress(elapsed_ms);
            let x = self.clamp_x(ease(leg.from_x, leg.to_x, t, leg.easing));
            let y = match leg.phase {
                FlightPhase::Freefall => ease(self.start.y, self.landing.y, t, self.fall_easing) - arc(leg.arc_height, t),
                _ => self.landing.y - arc(leg.arc_height, t),
            };
            let y = self.y_ceiling.map_or(y, |ceiling| y.max(ceiling));
            return FlightSample {
                pos: Vec2::new(x, y),
                rotation: ease(leg.rot_from, leg.rot_to, t, leg.easing),
                opacity: 1.0,
                phase: leg.phase,
            };
        }

        let rest = FlightSample {
            pos: self.landing,
            rotation: self.rest_rotation,
            opacity: 1.0,
            phase: FlightPhase::Settle,
        };
        let (Some(exit_x), Some(fade)) = (self.exit_x, self.exit_fade) else {
            return rest;
        };

        let since_rest = elapsed_ms - self.flight_ms();
        if since_rest < exit_x.delay_ms {
            return rest;
        }
        let phase = if exit_x.is_complete(since_rest) {
            FlightPhase::Done
        } else {
            FlightPhase::Exit
        };
        FlightSample {
            pos: Vec2::new(exit_x.sample(since_rest), self.landing.y),
            rotation: self.rest_rotation,
            opacity: fade.sample(since_rest),
            phase,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEW: Viewport = Viewport { width: 1200.0, height: 800.0 };

    fn path_to(dest: Destination, tilt: f32) -> FlightPath {
        FlightPath::new(Vec2::new(300.0, 100.0), dest, &FlightProfile::standard(), tilt, VIEW)
    }

    #[test]
    fn phases_follow_the_clock() {
        let p = path_to(Destination::landing(600.0, 700.0), 0.0);
        assert_eq!(p.sample(-1.0).phase, FlightPhase::Pending);
        assert_eq!(p.sample(0.0).phase, FlightPhase::Freefall);
        assert_eq!(p.sample(699.0).phase, FlightPhase::Freefall);
        assert_eq!(p.sample(700.0).phase, FlightPhase::Bounce1);
        assert_eq!(p.sample(1150.0).phase, FlightPhase::Bounce2);
        assert_eq!(p.sample(1450.0).phase, FlightPhase::Settle);
        assert_eq!(p.sample(1_000_000.0).phase, FlightPhase::Settle);
    }

    #[test]
    fn rotation_is_monotone_at_phase_starts() {
        for tilt in [-15.0, 0.0, 15.0] {
            let p = path_to(Destination::landing(600.0, 700.0), tilt);
            let rots: Vec<f32> = p.phase_starts().iter().map(|&t| p.sample(t).rotation).collect();
            assert_eq!(rots[0], 0.0);
            assert!((rots[3] - (360.0 + tilt)).abs() < 1e-3);
            for w in rots.windows(2) {
                assert!(w[1] >= w[0], "{:?}", rots);
            }
        }
    }

    #[test]
    fn rotation_never_decreases_between_frames() {
        let p = path_to(Destination::landing(600.0, 700.0), -15.0);
        let mut last = p.sample(0.0).rotation;
        let mut t = 0.0;
        while t < p.flight_ms() + 100.0 {
            let r = p.sample(t).rotation;
            assert!(r + 1e-3 >= last, "rotation fell from {} to {} at {}", last, r, t);
            last = r;
            t += 7.0;
        }
    }

    #[test]
    fn lands_exactly_on_destination() {
        let p = path_to(Destination::landing(600.0, 700.0), 4.0);
        let s = p.sample(p.flight_ms());
        assert_eq!(s.pos, Vec2::new(600.0, 700.0));
        assert_eq!(s.rotation, 364.0);
    }

    #[test]
    fn bounces_peak_above_the_landing_line() {
        let p = path_to(Destination::landing(600.0, 700.0), 0.0);
        let [_, b1, b2, end] = p.phase_starts();
        let peak1 = p.sample(b1 + (b2 - b1) / 2.0).pos.y;
        let peak2 = p.sample(b2 + (end - b2) / 2.0).pos.y;
        // 600 px of vertical travel: 18% then 8%.
        assert!((700.0 - peak1 - 108.0).abs() < 1e-2);
        assert!((700.0 - peak2 - 48.0).abs() < 1e-2);
        assert!(peak2 > peak1);
    }

    #[test]
    fn freefall_tosses_half_the_drop() {
        let p = path_to(Destination::landing(600.0, 700.0), 0.0);
        let [ff, b1, _, _] = p.phase_starts();
        let mid = p.sample(ff + (b1 - ff) / 2.0).pos.y;
        // QuadIn fall reaches 25% of the 600 px drop, minus a 300 px toss.
        assert!((mid - (100.0 + 150.0 - 300.0)).abs() < 1e-2, "mid-freefall y = {}", mid);
    }

    #[test]
    fn standard_exit_falls_toward_the_exit_then_detaches() {
        let p = path_to(Destination::exit(-200.0, 700.0), 0.0);
        assert!(p.exits());
        assert_eq!(p.landing(), Vec2::new(-200.0, 700.0));
        let rest = p.flight_ms();
        assert_eq!(p.sample(rest + 100.0).phase, FlightPhase::Settle);
        let leaving = p.sample(rest + 350.0 + 300.0);
        assert_eq!(leaving.phase, FlightPhase::Exit);
        assert!(leaving.opacity < 1.0 && leaving.opacity > 0.0);
        assert_eq!(p.sample(p.total_ms()).phase, FlightPhase::Done);
    }

    #[test]
    fn compact_clamps_and_lands_before_exit() {
        let profile = FlightProfile::compact();
        let view = Viewport::new(390.0, 844.0);
        let p = FlightPath::new(Vec2::new(40.0, 120.0), Destination::exit(590.0, 500.0), &profile, 0.0, view);

        assert_eq!(p.landing(), Vec2::new(366.0, 500.0));
        let mut t = 0.0;
        while t < p.flight_ms() {
            let x = p.sample(t).pos.x;
            assert!((24.0..=366.0).contains(&x), "x = {} at {}", x, t);
            t += 10.0;
        }
        let exit = p.sample(p.flight_ms() + 350.0 + 599.0);
        assert_eq!(exit.phase, FlightPhase::Exit);
        assert!(exit.pos.x > 366.0);
        assert_eq!(p.sample(p.total_ms() + 1.0).phase, FlightPhase::Done);
    }

    #[test]
    fn compact_bounces_are_capped() {
        let profile = FlightProfile::compact();
        let view = Viewport::new(390.0, 844.0);
        let p = FlightPath::new(Vec2::new(100.0, 0.0), Destination::landing(200.0, 800.0), &profile, 0.0, view);
        let [_, b1, b2, _] = p.phase_starts();
        let peak = p.sample(b1 + (b2 - b1) / 2.0).pos.y;
        assert!((800.0 - peak - 40.0).abs() < 1e-2);
    }

    #[test]
    fn compact_freefall_stays_below_the_ceiling() {
        let profile = FlightProfile::compact();
        let view = Viewport::new(390.0, 844.0);
        let p = FlightPath::new(Vec2::new(100.0, 120.0), Destination::landing(200.0, 500.0), &profile, 0.0, view);

        let ceiling = 120.0 - 40.0;
        let mut min_y = f32::MAX;
        let mut t = 0.0;
        while t <= p.flight_ms() {
            min_y = min_y.min(p.sample(t).pos.y);
            t += 5.0;
        }
        assert!(min_y >= ceiling - 1e-3, "letter rose to y = {}", min_y);
        assert!(min_y >= 0.0);
        // The uncapped toss would peak well above the ceiling, so it is reached.
        assert!((min_y - ceiling).abs() < 1e-3);
    }
}
