//! Animation orchestrator: owns the one-shot trigger state, builds the plan
//! (phrase → assignment → layout → destinations → staggers) and hands out
//! one flight per letter.

use glam::Vec2;

use crate::anagram::{match_letters, LetterAssignment, Phrase, PhraseCatalog, SourceLetters};
use crate::api::types::{AnchorRect, Destination, SourceIndex, Viewport};
use crate::config::EggConfig;
use crate::core::rng::Rng;
use crate::core::time::FlightClock;
use crate::extensions::tween::Tween;
use crate::flight::{FlightPath, FlightProfile, LetterFlight};
use crate::layout::{plan_layout, resolve_destinations, LayoutMode, LayoutPlan};

/// How the visitor sets the letters off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerMode {
    /// Standard viewports: each letter falls when it is clicked.
    PerLetter,
    /// Compact viewports: one tap on the heading releases every letter.
    TapAll,
}

impl TriggerMode {
    pub fn for_viewport(viewport: Viewport, config: &EggConfig) -> Self {
        match LayoutMode::for_viewport(viewport, &config.layout) {
            LayoutMode::Standard => TriggerMode::PerLetter,
            LayoutMode::Compact => TriggerMode::TapAll,
        }
    }
}

/// Everything decided at trigger time.
#[derive(Debug, Clone)]
pub struct EggPlan {
    pub phrase: Phrase,
    pub mode: TriggerMode,
    pub viewport: Viewport,
    pub layout: LayoutPlan,
    pub assignment: LetterAssignment,
    /// Indexed by source letter.
    pub destinations: Vec<Option<Destination>>,
    /// Indexed by source letter.
    pub staggers_ms: Vec<f32>,
    launched: Vec<bool>,
    pulse_due_ms: Option<f64>,
    pulse_fired: bool,
}

impl EggPlan {
    pub fn destination(&self, index: SourceIndex) -> Option<Destination> {
        self.destinations.get(index.0).copied().flatten()
    }

    pub fn is_launched(&self, index: SourceIndex) -> bool {
        self.launched.get(index.0).copied().unwrap_or(false)
    }

    /// Every letter that has somewhere to go has been launched.
    pub fn all_launched(&self) -> bool {
        self.destinations
            .iter()
            .zip(&self.launched)
            .all(|(dest, launched)| dest.is_none() || *launched)
    }

    /// When the settle pulse is scheduled, once known.
    pub fn pulse_due_ms(&self) -> Option<f64> {
        self.pulse_due_ms
    }
}

/// One-shot trigger state. Moves from `Idle` to `Triggered` exactly once.
#[derive(Debug, Clone, Default)]
pub enum EggState {
    #[default]
    Idle,
    Triggered(Box<EggPlan>),
}

pub struct Orchestrator {
    config: EggConfig,
    source: SourceLetters,
    catalog: PhraseCatalog,
    rng: Rng,
    state: EggState,
}

impl Orchestrator {
    pub fn new(config: EggConfig, source: SourceLetters, rng: Rng) -> Self {
        let catalog = config.catalog(&source);
        Self {
            config,
            source,
            catalog,
            rng,
            state: EggState::Idle,
        }
    }

    /// The site heading with the config's phrase list. `fallback_seed` is used
    /// unless the config pins one.
    pub fn for_heading(config: EggConfig, fallback_seed: u64) -> Self {
        let seed = config.seed.unwrap_or(fallback_seed);
        Self::new(config, SourceLetters::heading(), Rng::new(seed))
    }

    pub fn config(&self) -> &EggConfig {
        &self.config
    }

    pub fn source(&self) -> &SourceLetters {
        &self.source
    }

    pub fn state(&self) -> &EggState {
        &self.state
    }

    pub fn plan(&self) -> Option<&EggPlan> {
        match &self.state {
            EggState::Idle => None,
            EggState::Triggered(plan) => Some(plan.as_ref()),
        }
    }

    pub fn is_triggered(&self) -> bool {
        matches!(self.state, EggState::Triggered(_))
    }

    fn profile_for(&self, mode: TriggerMode) -> &FlightProfile {
        match mode {
            TriggerMode::PerLetter => &self.config.standard,
            TriggerMode::TapAll => &self.config.compact,
        }
    }

    fn max_stagger(&self, mode: TriggerMode) -> f32 {
        match mode {
            TriggerMode::PerLetter => self.config.stagger.per_letter_max_ms,
            TriggerMode::TapAll => self.config.stagger.tap_all_max_ms,
        }
    }

    /// Time from a launch until its letter has surely come to rest.
    fn settle_after_ms(&self, mode: TriggerMode) -> f64 {
        (self.max_stagger(mode) + self.profile_for(mode).flight_ms() + self.config.pulse.settle_margin_ms) as f64
    }

    /// Fire the egg. Returns `None` if it has already fired.
    pub fn trigger(&mut self, viewport: Viewport, anchor: Option<AnchorRect>, now_ms: f64) -> Option<&EggPlan> {
        if self.is_triggered() {
            log::debug!("egg: trigger ignored, already fired");
            return None;
        }

        let mode = TriggerMode::for_viewport(viewport, &self.config);
        let phrase = self.catalog.choose(&mut self.rng);
        let assignment = match_letters(&self.source, &phrase, &mut self.rng);
        let layout = plan_layout(&phrase, viewport, anchor, &self.config.layout);
        let destinations = resolve_destinations(&assignment, &layout, viewport, &self.config.layout);

        let max_stagger = self.max_stagger(mode).max(0.0);
        let staggers_ms = (0..self.source.len())
            .map(|_| self.rng.range_f32(0.0, max_stagger))
            .collect();

        // One tap releases everything, so the pulse time is known right away.
        let pulse_due_ms = match mode {
            TriggerMode::TapAll => Some(now_ms + self.settle_after_ms(mode)),
            TriggerMode::PerLetter => None,
        };

        log::info!("egg: '{}' ({:?}, {} letters)", phrase.text(), mode, assignment.slot_count());

        let plan = EggPlan {
            phrase,
            mode,
            viewport,
            layout,
            assignment,
            destinations,
            staggers_ms,
            launched: vec![false; self.source.len()],
            pulse_due_ms,
            pulse_fired: false,
        };
        self.state = EggState::Triggered(Box::new(plan));
        self.plan()
    }

    /// Start one letter's flight from `start`. `None` before the trigger, for
    /// letters without a destination and for letters already launched.
    pub fn launch(&mut self, index: SourceIndex, start: Vec2, now_ms: f64) -> Option<LetterFlight> {
        let settle_after = match self.plan() {
            Some(plan) => self.settle_after_ms(plan.mode),
            None => return None,
        };
        let EggState::Triggered(plan) = &mut self.state else {
            return None;
        };
        if plan.is_launched(index) {
            log::debug!("egg: letter {} already launched", index.0);
            return None;
        }
        let destination = plan.destination(index)?;
        let stagger = plan.staggers_ms.get(index.0).copied().unwrap_or(0.0);

        let profile = match plan.mode {
            TriggerMode::PerLetter => &self.config.standard,
            TriggerMode::TapAll => &self.config.compact,
        };
        let tilt = self.rng.range_f32(-profile.max_tilt_deg, profile.max_tilt_deg);
        let path = FlightPath::new(start, destination, profile, tilt, plan.viewport);
        let clock = FlightClock::started_at(now_ms, stagger);

        plan.launched[index.0] = true;
        if plan.mode == TriggerMode::PerLetter && plan.pulse_due_ms.is_none() && plan.all_launched() {
            plan.pulse_due_ms = Some(now_ms + settle_after);
            log::debug!("egg: all letters launched, pulse at {:.0}", now_ms + settle_after);
        }

        Some(LetterFlight::new(index, path, clock))
    }

    /// The settle pulse tween, returned exactly once when it becomes due.
    pub fn poll_pulse(&mut self, now_ms: f64) -> Option<Tween> {
        let pulse = self.config.pulse.tween();
        let EggState::Triggered(plan) = &mut self.state else {
            return None;
        };
        match plan.pulse_due_ms {
            Some(due) if !plan.pulse_fired && now_ms >= due => {
                plan.pulse_fired = true;
                Some(pulse)
            }
            _ => None,
        }
    }

    /// Whether the pulse has played; the egg has nothing left to do after it.
    pub fn is_finished(&self) -> bool {
        self.plan().is_some_and(|p| p.pulse_fired)
    }
}
