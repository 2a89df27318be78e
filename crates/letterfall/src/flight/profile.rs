//! Tunable flight profiles. One animator, two tables: standard (desktop) and
//! compact (phones), selectable from JSON.

use serde::{Deserialize, Serialize};

use crate::extensions::easing::Easing;

/// One airborne leg of a flight.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LegSpec {
    pub duration_ms: f32,
    /// Fraction of the horizontal travel covered by the end of this leg.
    pub x_progress: f32,
    /// Arc peak as a fraction of the total vertical travel.
    pub arc_fraction: f32,
    /// Rotation reached at the end of this leg, degrees.
    pub rotation_deg: f32,
    pub easing: Easing,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlightProfile {
    pub freefall: LegSpec,
    pub bounce1: LegSpec,
    /// `rotation_deg` here is the full turn; the letter's tilt is added on top.
    pub bounce2: LegSpec,
    /// Vertical easing of the fall from the heading to the landing line.
    pub fall_easing: Easing,
    /// Final resting tilt is uniform in `[-max_tilt_deg, max_tilt_deg]`.
    pub max_tilt_deg: f32,
    /// Rest before an offscreen letter starts leaving.
    pub exit_pause_ms: f32,
    pub exit_duration_ms: f32,
    pub exit_easing: Easing,
    /// Keep x at least this far from both viewport edges while airborne.
    pub horizontal_margin: Option<f32>,
    /// Cap on how far a bounce may rise above the landing line, px. Also
    /// bounds the toss: no higher than this above the start or landing line.
    pub max_bounce_rise: Option<f32>,
    /// Offscreen letters land inside the viewport before leaving it.
    pub land_before_exit: bool,
}

impl FlightProfile {
    /// Desktop tuning: long toss, two decaying bounces, letters bound for the
    /// exit fall straight toward it.
    pub fn standard() -> Self {
        Self {
            freefall: LegSpec {
                duration_ms: 700.0,
                x_progress: 0.6,
                arc_fraction: 0.5,
                rotation_deg: 45.0,
                easing: Easing::QuadOut,
            },
            bounce1: LegSpec {
                duration_ms: 450.0,
                x_progress: 0.9,
                arc_fraction: 0.18,
                rotation_deg: 180.0,
                easing: Easing::QuadInOut,
            },
            bounce2: LegSpec {
                duration_ms: 300.0,
                x_progress: 1.0,
                arc_fraction: 0.08,
                rotation_deg: 360.0,
                easing: Easing::QuadInOut,
            },
            fall_easing: Easing::QuadIn,
            max_tilt_deg: 15.0,
            exit_pause_ms: 350.0,
            exit_duration_ms: 600.0,
            exit_easing: Easing::CubicIn,
            horizontal_margin: None,
            max_bounce_rise: None,
            land_before_exit: false,
        }
    }

    /// Phone tuning: same legs, clamped to the screen, shallow bounces, and
    /// leftover letters visibly land before flying off.
    pub fn compact() -> Self {
        Self {
            horizontal_margin: Some(24.0),
            max_bounce_rise: Some(40.0),
            land_before_exit: true,
            ..Self::standard()
        }
    }

    pub fn legs(&self) -> [&LegSpec; 3] {
        [&self.freefall, &self.bounce1, &self.bounce2]
    }

    /// Airborne time from launch to rest.
    pub fn flight_ms(&self) -> f32 {
        self.legs().iter().map(|l| l.duration_ms.max(0.0)).sum()
    }

    /// Extra time an offscreen letter spends leaving after it rests.
    pub fn exit_ms(&self) -> f32 {
        self.exit_pause_ms.max(0.0) + self.exit_duration_ms.max(0.0)
    }
}

impl Default for FlightProfile {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_totals() {
        let p = FlightProfile::standard();
        assert_eq!(p.flight_ms(), 1450.0);
        assert_eq!(p.exit_ms(), 950.0);
    }

    #[test]
    fn arcs_decay_leg_over_leg() {
        let p = FlightProfile::standard();
        assert!(p.freefall.arc_fraction > p.bounce1.arc_fraction);
        assert!(p.bounce1.arc_fraction > p.bounce2.arc_fraction);
    }

    #[test]
    fn compact_inherits_legs() {
        let c = FlightProfile::compact();
        assert_eq!(c.flight_ms(), FlightProfile::standard().flight_ms());
        assert_eq!(c.horizontal_margin, Some(24.0));
        assert!(c.land_before_exit);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let json = r#"{ "max_tilt_deg": 5.0, "exit_easing": "linear" }"#;
        let p: FlightProfile = serde_json::from_str(json).unwrap();
        assert_eq!(p.max_tilt_deg, 5.0);
        assert_eq!(p.exit_easing, Easing::Linear);
        assert_eq!(p.freefall.duration_ms, 700.0);
    }
}
