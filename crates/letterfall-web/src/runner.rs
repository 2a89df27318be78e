use letterfall::{
    EggConfig, FlightPhase, LetterFlight, Orchestrator, SourceIndex, TriggerMode, Tween,
};
use wasm_bindgen::JsValue;
use web_sys::HtmlElement;

use crate::audio::ToneSynth;
use crate::dom;

/// Landmark the letters land on, per trigger mode.
const STANDARD_ANCHOR: &str = "footer";
const COMPACT_ANCHOR: &str = ".mobile-nav-grid";

/// A detached copy of one heading letter, driven by its flight.
struct Floater {
    flight: LetterFlight,
    el: HtmlElement,
    /// Landed for good; no more frames needed until the pulse.
    resting: bool,
}

struct Pulse {
    tween: Tween,
    started_ms: f64,
}

/// Owns the orchestrator and every DOM node the easter egg touches.
///
/// Lives in the bridge's `thread_local!` slot; event handlers and the
/// animation frame callback reach it through `with_runner`.
pub struct EggRunner {
    orchestrator: Orchestrator,
    letters: Vec<HtmlElement>,
    floaters: Vec<Floater>,
    pulse: Option<Pulse>,
    synth: Option<ToneSynth>,
    audio_tried: bool,
    frame_loop_running: bool,
}

impl EggRunner {
    pub fn new(config: EggConfig, letters: Vec<HtmlElement>, seed: u64) -> Self {
        let orchestrator = Orchestrator::for_heading(config, seed);
        if letters.len() != orchestrator.source().len() {
            log::warn!(
                "egg: {} title letters for a {}-letter heading",
                letters.len(),
                orchestrator.source().len()
            );
        }
        Self {
            orchestrator,
            letters,
            floaters: Vec::new(),
            pulse: None,
            synth: None,
            audio_tried: false,
            frame_loop_running: false,
        }
    }

    pub fn mode_for_current_viewport(&self) -> Result<TriggerMode, JsValue> {
        Ok(TriggerMode::for_viewport(dom::viewport()?, self.orchestrator.config()))
    }

    /// Pick the phrase and destinations. `false` if already triggered.
    pub fn trigger(&mut self, now_ms: f64) -> Result<bool, JsValue> {
        let viewport = dom::viewport()?;
        let selector = match TriggerMode::for_viewport(viewport, self.orchestrator.config()) {
            TriggerMode::PerLetter => STANDARD_ANCHOR,
            TriggerMode::TapAll => COMPACT_ANCHOR,
        };
        let anchor = dom::anchor_rect(selector);
        if anchor.is_none() {
            log::debug!("egg: no '{}' on page, using fallback landing line", selector);
        }
        Ok(self.orchestrator.trigger(viewport, anchor, now_ms).is_some())
    }

    /// Release one heading letter. Re-clicks and letters with nowhere to go
    /// are ignored.
    pub fn launch(&mut self, index: usize, now_ms: f64) -> Result<(), JsValue> {
        let Some(letter) = self.letters.get(index).cloned() else {
            return Ok(());
        };
        let rect = dom::rect_of(&letter);
        let Some(flight) = self.orchestrator.launch(SourceIndex(index), rect.center(), now_ms) else {
            return Ok(());
        };
        self.ensure_audio();

        let el = dom::create("div", "floating-letter")?;
        el.set_text_content(letter.text_content().as_deref());
        for (prop, value) in [
            ("position", "fixed"),
            ("font-family", "inherit"),
            ("font-weight", "inherit"),
            ("z-index", "99999"),
            ("pointer-events", "none"),
            ("transform-origin", "center center"),
        ] {
            dom::set_style(&el, prop, value)?;
        }
        dom::set_style(&el, "font-size", &format!("{}px", rect.height))?;
        dom::body()?.append_child(&el)?;
        dom::set_style(&letter, "opacity", "0")?;

        let mut floater = Floater {
            flight,
            el,
            resting: false,
        };
        apply_frame(&mut floater, now_ms, self.synth.as_ref())?;
        self.floaters.push(floater);
        Ok(())
    }

    /// Launch every letter at once (compact viewports).
    pub fn launch_all(&mut self, now_ms: f64) -> Result<(), JsValue> {
        for index in 0..self.letters.len() {
            self.launch(index, now_ms)?;
        }
        Ok(())
    }

    /// Mark the frame loop as running. Returns `true` if the caller should
    /// start it.
    pub fn claim_frame_loop(&mut self) -> bool {
        !std::mem::replace(&mut self.frame_loop_running, true)
    }

    /// Advance every active floater and the settle pulse. Returns whether
    /// another frame is needed. The loop is released on `Ok(false)` and on
    /// any error, so the next launch can start a fresh one.
    pub fn frame(&mut self, now_ms: f64) -> Result<bool, JsValue> {
        let result = self.advance(now_ms);
        if !matches!(result, Ok(true)) {
            self.frame_loop_running = false;
        }
        result
    }

    fn advance(&mut self, now_ms: f64) -> Result<bool, JsValue> {
        for floater in self.floaters.iter_mut().filter(|f| !f.resting) {
            apply_frame(floater, now_ms, self.synth.as_ref())?;
        }
        self.floaters.retain(|f| {
            if f.flight.is_done() {
                f.el.remove();
                false
            } else {
                true
            }
        });

        if let Some(tween) = self.orchestrator.poll_pulse(now_ms) {
            log::info!("egg: settled, pulsing {} letters", self.floaters.len());
            self.pulse = Some(Pulse {
                tween,
                started_ms: now_ms,
            });
        }
        if let Some(pulse) = &self.pulse {
            let elapsed = (now_ms - pulse.started_ms) as f32;
            let scale = pulse.tween.sample(elapsed);
            for floater in self.floaters.iter().filter(|f| f.resting) {
                let rotation = floater.flight.path().rest_rotation();
                dom::set_style(&floater.el, "transform", &dom::floater_transform(rotation, scale))?;
            }
            if pulse.tween.is_complete(elapsed) {
                self.pulse = None;
                self.lock_letters()?;
            }
        }

        let flying = self.floaters.iter().any(|f| !f.resting);
        let pulse_pending = self
            .orchestrator
            .plan()
            .is_some_and(|p| p.pulse_due_ms().is_some())
            && !self.orchestrator.is_finished();
        Ok(flying || pulse_pending || self.pulse.is_some())
    }

    /// Strip the heading letters of their click affordances.
    fn lock_letters(&self) -> Result<(), JsValue> {
        for letter in &self.letters {
            dom::set_style(letter, "cursor", "default")?;
            dom::set_style(letter, "pointer-events", "none")?;
        }
        Ok(())
    }

    fn ensure_audio(&mut self) {
        if !self.audio_tried {
            self.audio_tried = true;
            self.synth = ToneSynth::new();
        }
    }
}

fn apply_frame(floater: &mut Floater, now_ms: f64, synth: Option<&ToneSynth>) -> Result<(), JsValue> {
    let frame = floater.flight.tick(now_ms);
    let s = frame.sample;
    dom::set_style(&floater.el, "left", &format!("{:.1}px", s.pos.x))?;
    dom::set_style(&floater.el, "top", &format!("{:.1}px", s.pos.y))?;
    dom::set_style(&floater.el, "transform", &dom::floater_transform(s.rotation, 1.0))?;
    dom::set_style(&floater.el, "opacity", &format!("{:.3}", s.opacity))?;

    if let Some(synth) = synth {
        for cue in &frame.cues {
            synth.play(*cue);
        }
    }
    if frame.landed {
        floater.el.class_list().add_1("landed")?;
    }
    if s.phase == FlightPhase::Settle && !floater.flight.path().exits() {
        floater.resting = true;
    }
    Ok(())
}
