// extensions/tween.rs
//
// Time-sampled tweens for scalar properties (scale pulse, exit slide, fade).
// A tween never accumulates frame deltas: callers pass the elapsed wall-clock
// time since the tween began, so a skipped frame simply lands further along.
//
// Usage:
//   let pulse = Tween::new(1.0, 1.15, 300.0, Easing::QuadInOut).with_loop(TweenLoop::Yoyo);
//   let scale = pulse.sample(now - pulse_started);

use serde::{Deserialize, Serialize};

use super::easing::{ease, Easing};

/// What happens when a tween reaches its end value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TweenLoop {
    /// Hold the end value.
    #[default]
    Once,
    /// Play back to the start value once, then hold it.
    Yoyo,
}

/// A single scalar tween.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    pub from: f32,
    pub to: f32,
    /// Duration of one leg in milliseconds.
    pub duration_ms: f32,
    /// Hold time before the tween starts moving.
    pub delay_ms: f32,
    pub easing: Easing,
    pub loop_mode: TweenLoop,
}

impl Tween {
    pub fn new(from: f32, to: f32, duration_ms: f32, easing: Easing) -> Self {
        Self {
            from,
            to,
            duration_ms,
            delay_ms: 0.0,
            easing,
            loop_mode: TweenLoop::Once,
        }
    }

    /// Fade out to transparent.
    pub fn fade_out(duration_ms: f32, easing: Easing) -> Self {
        Self::new(1.0, 0.0, duration_ms, easing)
    }

    // -- Builder methods --

    pub fn with_loop(mut self, mode: TweenLoop) -> Self {
        self.loop_mode = mode;
        self
    }

    pub fn with_delay(mut self, delay_ms: f32) -> Self {
        self.delay_ms = delay_ms.max(0.0);
        self
    }

    /// Total running time including delay and, for yoyo, the return leg.
    pub fn total_ms(&self) -> f32 {
        let legs = match self.loop_mode {
            TweenLoop::Once => 1.0,
            TweenLoop::Yoyo => 2.0,
        };
        self.delay_ms + self.duration_ms * legs
    }

    /// Whether the tween has finished at `elapsed_ms`.
    pub fn is_complete(&self, elapsed_ms: f32) -> bool {
        elapsed_ms >= self.total_ms()
    }

    /// Value of the tween `elapsed_ms` after it began.
    pub fn sample(&self, elapsed_ms: f32) -> f32 {
        let moving = (elapsed_ms - self.delay_ms).max(0.0);
        if self.duration_ms <= 0.0 {
            return match self.loop_mode {
                TweenLoop::Once => self.to,
                TweenLoop::Yoyo => self.from,
            };
        }

        let raw = moving / self.duration_ms;
        match self.loop_mode {
            TweenLoop::Once => ease(self.from, self.to, raw.min(1.0), self.easing),
            TweenLoop::Yoyo => {
                if raw <= 1.0 {
                    ease(self.from, self.to, raw, self.easing)
                } else {
                    ease(self.to, self.from, (raw - 1.0).min(1.0), self.easing)
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn once_holds_end_value() {
        let t = Tween::new(0.0, 100.0, 1000.0, Easing::Linear);
        assert!((t.sample(500.0) - 50.0).abs() < 0.01);
        assert_eq!(t.sample(1000.0), 100.0);
        assert_eq!(t.sample(5000.0), 100.0);
        assert!(t.is_complete(1000.0));
        assert!(!t.is_complete(999.0));
    }

    #[test]
    fn yoyo_returns_to_start() {
        let t = Tween::new(1.0, 1.15, 300.0, Easing::QuadInOut).with_loop(TweenLoop::Yoyo);
        assert_eq!(t.sample(0.0), 1.0);
        assert!((t.sample(300.0) - 1.15).abs() < 1e-5);
        assert!((t.sample(600.0) - 1.0).abs() < 1e-5);
        assert!((t.sample(10_000.0) - 1.0).abs() < 1e-5);
        assert_eq!(t.total_ms(), 600.0);
    }

    #[test]
    fn delay_holds_start_value() {
        let t = Tween::fade_out(600.0, Easing::Linear).with_delay(350.0);
        assert_eq!(t.sample(0.0), 1.0);
        assert_eq!(t.sample(350.0), 1.0);
        assert!((t.sample(650.0) - 0.5).abs() < 1e-4);
        assert_eq!(t.total_ms(), 950.0);
    }

    #[test]
    fn zero_duration_jumps() {
        let t = Tween::new(3.0, 7.0, 0.0, Easing::Linear);
        assert_eq!(t.sample(0.0), 7.0);
    }
}
