//! Web Audio synth for the flight cues. Every failure is swallowed: a page
//! without audio still gets the animation.

use letterfall::{SoundCue, Tone, Waveform};
use wasm_bindgen::JsValue;
use web_sys::{AudioContext, OscillatorType};

pub struct ToneSynth {
    ctx: AudioContext,
}

impl ToneSynth {
    /// `None` when the browser refuses an audio context.
    pub fn new() -> Option<Self> {
        match AudioContext::new() {
            Ok(ctx) => Some(Self { ctx }),
            Err(err) => {
                log::debug!("audio: unavailable ({:?})", err);
                None
            }
        }
    }

    pub fn play(&self, cue: SoundCue) {
        if let Err(err) = self.play_tone(cue.tone()) {
            log::debug!("audio: {:?} failed ({:?})", cue, err);
        }
    }

    fn play_tone(&self, tone: Tone) -> Result<(), JsValue> {
        // Contexts created outside a gesture start suspended.
        let _ = self.ctx.resume();

        let now = self.ctx.current_time();
        let end = now + tone.duration_s;

        let gain = self.ctx.create_gain()?;
        gain.gain().set_value_at_time(Tone::START_GAIN, now)?;
        gain.gain().exponential_ramp_to_value_at_time(Tone::END_GAIN, end)?;
        gain.connect_with_audio_node(&self.ctx.destination())?;

        let osc = self.ctx.create_oscillator()?;
        osc.set_type(oscillator_type(tone.waveform));
        osc.frequency().set_value(tone.frequency_hz);
        osc.connect_with_audio_node(&gain)?;
        osc.start_with_when(now)?;
        osc.stop_with_when(end)?;
        Ok(())
    }
}

fn oscillator_type(waveform: Waveform) -> OscillatorType {
    match waveform {
        Waveform::Sine => OscillatorType::Sine,
        Waveform::Square => OscillatorType::Square,
        Waveform::Triangle => OscillatorType::Triangle,
    }
}
