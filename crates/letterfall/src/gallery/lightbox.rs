// gallery/lightbox.rs
//
// Lightbox navigation as a state machine over a `Gallery`. Moving past the
// end of a series shows a series title card that advances on its own after
// a short hold, unless the lightbox was closed in the meantime.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::series::{Artwork, Gallery, Series};
use super::zoom::{ZoomConfig, ZoomPan};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Next,
    Prev,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightboxConfig {
    /// How long the series title card holds before advancing.
    pub transition_ms: f64,
    /// Minimum vertical travel for a swipe to change series.
    pub swipe_threshold_px: f32,
    /// Neighbours on each side to preload.
    pub preload_radius: usize,
    pub zoom: ZoomConfig,
}

impl Default for LightboxConfig {
    fn default() -> Self {
        Self {
            transition_ms: 1500.0,
            swipe_threshold_px: 50.0,
            preload_radius: 2,
            zoom: ZoomConfig::default(),
        }
    }
}

/// What the host should be showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightboxView {
    Closed,
    Image { series: usize, image: usize },
    /// Title card for the series about to be entered.
    SeriesCard { series: usize, direction: Direction },
}

impl LightboxView {
    /// Whether the overlay covers the page (and the page should not scroll).
    pub fn is_open(self) -> bool {
        self != LightboxView::Closed
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct PendingCard {
    target: usize,
    direction: Direction,
    shown_at_ms: f64,
}

pub struct Lightbox {
    gallery: Gallery,
    config: LightboxConfig,
    open: bool,
    series: usize,
    image: usize,
    pending: Option<PendingCard>,
    zoom: ZoomPan,
}

impl Lightbox {
    pub fn new(gallery: Gallery, config: LightboxConfig) -> Self {
        Self {
            gallery,
            config,
            open: false,
            series: 0,
            image: 0,
            pending: None,
            zoom: ZoomPan::new(config.zoom),
        }
    }

    pub fn gallery(&self) -> &Gallery {
        &self.gallery
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn zoom(&self) -> &ZoomPan {
        &self.zoom
    }

    pub fn zoom_mut(&mut self) -> &mut ZoomPan {
        &mut self.zoom
    }

    pub fn view(&self) -> LightboxView {
        if !self.open {
            return LightboxView::Closed;
        }
        match self.pending {
            Some(card) => LightboxView::SeriesCard {
                series: card.target,
                direction: card.direction,
            },
            None => LightboxView::Image {
                series: self.series,
                image: self.image,
            },
        }
    }

    pub fn current(&self) -> Option<&Artwork> {
        if !self.open {
            return None;
        }
        self.gallery.artwork(self.series, self.image)
    }

    pub fn current_series(&self) -> Option<&Series> {
        self.gallery.get(self.series)
    }

    /// Open on a thumbnail. Out-of-range indices leave the lightbox as is.
    pub fn open(&mut self, series: usize, image: usize) -> LightboxView {
        if self.gallery.artwork(series, image).is_none() {
            log::warn!("lightbox: no artwork at {}/{}", series, image);
            return self.view();
        }
        self.open = true;
        self.series = series;
        self.image = image;
        self.pending = None;
        self.zoom.reset();
        self.view()
    }

    /// Close. A pending title card is left to expire and is then discarded.
    pub fn close(&mut self) -> LightboxView {
        self.open = false;
        self.zoom.reset();
        LightboxView::Closed
    }

    pub fn next_image(&mut self, now_ms: f64) -> LightboxView {
        self.step_image(Direction::Next, now_ms)
    }

    pub fn prev_image(&mut self, now_ms: f64) -> LightboxView {
        self.step_image(Direction::Prev, now_ms)
    }

    fn step_image(&mut self, direction: Direction, now_ms: f64) -> LightboxView {
        if !self.open || self.pending.is_some() {
            return self.view();
        }
        let count = self.gallery.image_count(self.series);
        match direction {
            Direction::Next if self.image + 1 < count => self.show(self.series, self.image + 1),
            Direction::Prev if self.image > 0 => self.show(self.series, self.image - 1),
            Direction::Next if self.series + 1 < self.gallery.len() => {
                self.begin_card(self.series + 1, direction, now_ms)
            }
            Direction::Prev if self.series > 0 => self.begin_card(self.series - 1, direction, now_ms),
            _ => self.view(),
        }
    }

    /// Jump straight to the first image of the next series.
    pub fn next_series(&mut self) -> LightboxView {
        if !self.open || self.pending.is_some() || self.series + 1 >= self.gallery.len() {
            return self.view();
        }
        self.show(self.series + 1, 0)
    }

    /// Jump straight to the last image of the previous series.
    pub fn prev_series(&mut self) -> LightboxView {
        if !self.open || self.pending.is_some() || self.series == 0 {
            return self.view();
        }
        let target = self.series - 1;
        let last = self.gallery.image_count(target).saturating_sub(1);
        self.show(target, last)
    }

    /// Advance a title card whose hold has elapsed. Returns the new view
    /// when something changed.
    pub fn poll(&mut self, now_ms: f64) -> Option<LightboxView> {
        let card = self.pending?;
        if now_ms - card.shown_at_ms < self.config.transition_ms {
            return None;
        }
        self.pending = None;
        if !self.open {
            log::debug!("lightbox: closed during series card, dropping it");
            return None;
        }
        let image = match card.direction {
            Direction::Next => 0,
            Direction::Prev => self.gallery.image_count(card.target).saturating_sub(1),
        };
        Some(self.show(card.target, image))
    }

    /// Keyboard navigation; `key` is a DOM `KeyboardEvent.key`.
    pub fn handle_key(&mut self, key: &str, now_ms: f64) -> Option<LightboxView> {
        if !self.open {
            return None;
        }
        let view = match key {
            "Escape" => self.close(),
            "ArrowRight" => self.next_image(now_ms),
            "ArrowLeft" => self.prev_image(now_ms),
            "ArrowDown" => self.next_series(),
            "ArrowUp" => self.prev_series(),
            _ => return None,
        };
        Some(view)
    }

    /// Vertical swipe between series. Upward travel (`start.y > end.y`)
    /// goes to the next series. Ignored while zoomed so panning wins.
    pub fn swipe(&mut self, start: Vec2, end: Vec2) -> Option<LightboxView> {
        if !self.open || self.zoom.is_zoomed() {
            return None;
        }
        let diff = start.y - end.y;
        if diff.abs() <= self.config.swipe_threshold_px {
            return None;
        }
        Some(if diff > 0.0 {
            self.next_series()
        } else {
            self.prev_series()
        })
    }

    /// Image indices in the current series worth fetching ahead of time.
    pub fn preload_indices(&self) -> Vec<usize> {
        if !self.open {
            return Vec::new();
        }
        let count = self.gallery.image_count(self.series);
        let r = self.config.preload_radius;
        let lo = self.image.saturating_sub(r);
        let hi = (self.image + r).min(count.saturating_sub(1));
        (lo..=hi).filter(|&i| i != self.image).collect()
    }

    fn show(&mut self, series: usize, image: usize) -> LightboxView {
        self.series = series;
        self.image = image;
        self.zoom.reset();
        self.view()
    }

    fn begin_card(&mut self, target: usize, direction: Direction, now_ms: f64) -> LightboxView {
        self.pending = Some(PendingCard {
            target,
            direction,
            shown_at_ms: now_ms,
        });
        self.zoom.reset();
        self.view()
    }
}
