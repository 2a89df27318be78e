/// Wall-clock anchor for one animation.
///
/// Frame callbacks hand us absolute timestamps; the clock latches the first
/// one it sees and reports elapsed time from there minus a start delay. Time
/// is never integrated per frame, so a dropped frame just shows up as a
/// larger elapsed value on the next one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlightClock {
    /// Delay before the clock starts counting (stagger).
    delay_ms: f32,
    /// First frame timestamp observed, in the host's millisecond timebase.
    origin_ms: Option<f64>,
}

impl FlightClock {
    pub fn new(delay_ms: f32) -> Self {
        Self {
            delay_ms: delay_ms.max(0.0),
            origin_ms: None,
        }
    }

    /// A clock whose origin is already known (e.g. the click timestamp).
    pub fn started_at(origin_ms: f64, delay_ms: f32) -> Self {
        Self {
            delay_ms: delay_ms.max(0.0),
            origin_ms: Some(origin_ms),
        }
    }

    /// Elapsed milliseconds past the delay. Negative while still waiting.
    pub fn elapsed(&mut self, now_ms: f64) -> f32 {
        let origin = *self.origin_ms.get_or_insert(now_ms);
        ((now_ms - origin) as f32) - self.delay_ms
    }

    pub fn delay_ms(&self) -> f32 {
        self.delay_ms
    }

    pub fn origin_ms(&self) -> Option<f64> {
        self.origin_ms
    }
}
