// gallery/zoom.rs
//
// Pinch-zoom and pan for the lightbox image. Pure gesture math: the host
// feeds touch points in client pixels plus the image's rendered size, and
// applies `offset`/`scale` as a CSS transform.

use glam::Vec2;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoomConfig {
    pub min_scale: f32,
    pub max_scale: f32,
    /// Scale a double-tap or click toggles to.
    pub toggle_scale: f32,
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self {
            min_scale: 1.0,
            max_scale: 4.0,
            toggle_scale: 2.5,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Gesture {
    Idle,
    Pan {
        origin: Vec2,
        start_offset: Vec2,
    },
    Pinch {
        start_distance: f32,
        start_scale: f32,
        start_mid: Vec2,
        start_offset: Vec2,
    },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomPan {
    config: ZoomConfig,
    scale: f32,
    offset: Vec2,
    gesture: Gesture,
}

impl Default for ZoomPan {
    fn default() -> Self {
        Self::new(ZoomConfig::default())
    }
}

impl ZoomPan {
    pub fn new(config: ZoomConfig) -> Self {
        Self {
            config,
            scale: config.min_scale,
            offset: Vec2::ZERO,
            gesture: Gesture::Idle,
        }
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    pub fn is_zoomed(&self) -> bool {
        self.scale > self.config.min_scale + 1e-3
    }

    /// Whether a gesture is in progress (swipes are ignored while true).
    pub fn is_gesturing(&self) -> bool {
        self.gesture != Gesture::Idle
    }

    pub fn reset(&mut self) {
        self.scale = self.config.min_scale;
        self.offset = Vec2::ZERO;
        self.gesture = Gesture::Idle;
    }

    /// Click or double-tap: zoom in to the toggle scale, or back out.
    pub fn toggle(&mut self) {
        if self.is_zoomed() {
            self.reset();
        } else {
            self.scale = self.config.toggle_scale.clamp(self.config.min_scale, self.config.max_scale);
            self.offset = Vec2::ZERO;
        }
    }

    /// A touch started or a finger was added/lifted; `touches` are all
    /// fingers currently down.
    pub fn touch_start(&mut self, touches: &[Vec2]) {
        self.gesture = match touches {
            [a, b, ..] => Gesture::Pinch {
                start_distance: a.distance(*b).max(1.0),
                start_scale: self.scale,
                start_mid: (*a + *b) * 0.5,
                start_offset: self.offset,
            },
            [p] if self.is_zoomed() => Gesture::Pan {
                origin: *p,
                start_offset: self.offset,
            },
            _ => Gesture::Idle,
        };
    }

    /// Fingers moved. `frame` is the image's unscaled rendered size.
    pub fn touch_move(&mut self, touches: &[Vec2], frame: Vec2) {
        match (self.gesture, touches) {
            (
                Gesture::Pinch {
                    start_distance,
                    start_scale,
                    start_mid,
                    start_offset,
                },
                [a, b, ..],
            ) => {
                let ratio = a.distance(*b) / start_distance;
                self.scale = (start_scale * ratio).clamp(self.config.min_scale, self.config.max_scale);
                let mid = (*a + *b) * 0.5;
                self.offset = start_offset + (mid - start_mid);
            }
            (Gesture::Pan { origin, start_offset }, [p, ..]) => {
                self.offset = start_offset + (*p - origin);
            }
            _ => return,
        }
        self.clamp_offset(frame);
    }

    /// All fingers lifted, or the remaining ones restart a gesture.
    pub fn touch_end(&mut self, remaining: &[Vec2]) {
        if remaining.is_empty() {
            self.gesture = Gesture::Idle;
            if !self.is_zoomed() {
                self.reset();
            }
        } else {
            self.touch_start(remaining);
        }
    }

    /// Keep the scaled image covering its frame: the offset can never
    /// exceed the overflow on either side.
    fn clamp_offset(&mut self, frame: Vec2) {
        let max = (frame * (self.scale - 1.0) * 0.5).max(Vec2::ZERO);
        self.offset = self.offset.clamp(-max, max);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: Vec2 = Vec2::new(400.0, 300.0);

    #[test]
    fn toggle_zooms_in_and_out() {
        let mut z = ZoomPan::default();
        assert!(!z.is_zoomed());
        z.toggle();
        assert_eq!(z.scale(), 2.5);
        z.toggle();
        assert_eq!(z.scale(), 1.0);
        assert_eq!(z.offset(), Vec2::ZERO);
    }

    #[test]
    fn pinch_scale_is_clamped() {
        let mut z = ZoomPan::default();
        z.touch_start(&[Vec2::new(100.0, 100.0), Vec2::new(200.0, 100.0)]);
        z.touch_move(&[Vec2::new(50.0, 100.0), Vec2::new(250.0, 100.0)], FRAME);
        assert!((z.scale() - 2.0).abs() < 1e-5);

        z.touch_move(&[Vec2::new(0.0, 100.0), Vec2::new(1000.0, 100.0)], FRAME);
        assert_eq!(z.scale(), 4.0);

        z.touch_move(&[Vec2::new(140.0, 100.0), Vec2::new(160.0, 100.0)], FRAME);
        assert_eq!(z.scale(), 1.0);
    }

    #[test]
    fn pan_is_clamped_to_overflow() {
        let mut z = ZoomPan::default();
        z.toggle(); // 2.5x: overflow 300 x 225
        z.touch_start(&[Vec2::new(200.0, 150.0)]);
        z.touch_move(&[Vec2::new(300.0, 100.0)], FRAME);
        assert_eq!(z.offset(), Vec2::new(100.0, -50.0));

        z.touch_move(&[Vec2::new(2000.0, -2000.0)], FRAME);
        assert_eq!(z.offset(), Vec2::new(300.0, -225.0));
    }

    #[test]
    fn single_finger_does_not_pan_unzoomed() {
        let mut z = ZoomPan::default();
        z.touch_start(&[Vec2::new(10.0, 10.0)]);
        assert!(!z.is_gesturing());
        z.touch_move(&[Vec2::new(90.0, 10.0)], FRAME);
        assert_eq!(z.offset(), Vec2::ZERO);
    }

    #[test]
    fn releasing_at_rest_scale_recenters() {
        let mut z = ZoomPan::default();
        z.touch_start(&[Vec2::new(100.0, 100.0), Vec2::new(200.0, 100.0)]);
        z.touch_move(&[Vec2::new(120.0, 140.0), Vec2::new(180.0, 140.0)], FRAME);
        z.touch_end(&[]);
        assert!(!z.is_gesturing());
        assert_eq!(z.offset(), Vec2::ZERO);
        assert_eq!(z.scale(), 1.0);
    }
}
