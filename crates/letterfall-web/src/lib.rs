pub mod audio;
pub mod dom;
#[cfg(feature = "gallery")]
pub mod gallery;
pub mod runner;

use std::cell::RefCell;
use std::rc::Rc;

use letterfall::{EggConfig, TriggerMode};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

pub use runner::EggRunner;

thread_local! {
    static RUNNER: RefCell<Option<EggRunner>> = RefCell::new(None);
}

/// Run `f` against the installed runner. `None` before `install_easter_egg`.
fn with_runner<R>(f: impl FnOnce(&mut EggRunner) -> R) -> Option<R> {
    RUNNER.with(|cell| cell.borrow_mut().as_mut().map(f))
}

fn log_err(context: &str, result: Result<(), JsValue>) {
    if let Err(err) = result {
        log::warn!("{}: {:?}", context, err);
    }
}

#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
}

/// Wire the heading letters. `config_json` overrides any subset of the
/// defaults; unparseable config falls back to the defaults.
#[wasm_bindgen]
pub fn install_easter_egg(config_json: Option<String>) -> Result<(), JsValue> {
    let config = match config_json.as_deref().map(EggConfig::from_json) {
        Some(Ok(config)) => config,
        Some(Err(err)) => {
            log::warn!("egg: bad config ({}), using defaults", err);
            EggConfig::default()
        }
        None => EggConfig::default(),
    };

    let document = dom::document()?;
    let Some(title) = document.get_element_by_id("main-title") else {
        log::info!("egg: no #main-title on this page");
        return Ok(());
    };
    let letters = dom::query_all(&document, ".title-letter")?;
    let seed = js_sys::Date::now() as u64;

    let runner = EggRunner::new(config, letters.clone(), seed);
    let mode = runner.mode_for_current_viewport()?;
    RUNNER.with(|cell| *cell.borrow_mut() = Some(runner));

    match mode {
        TriggerMode::PerLetter => {
            with_runner(|r| r.trigger(dom::now_ms())).transpose()?;
            for (index, letter) in letters.iter().enumerate() {
                dom::set_style(letter, "cursor", "pointer")?;
                dom::listen(letter, "click", move |_| {
                    let launched = with_runner(|r| r.launch(index, dom::now_ms()));
                    if let Some(result) = launched {
                        log_err("egg: launch", result);
                        start_frame_loop();
                    }
                })?;
            }
        }
        TriggerMode::TapAll => {
            if let Some(title) = title.dyn_ref::<web_sys::HtmlElement>() {
                dom::set_style(title, "cursor", "pointer")?;
            }
            dom::listen(&title, "click", |_| {
                let fired = with_runner(|r| {
                    let now = dom::now_ms();
                    if !r.trigger(now)? {
                        return Ok(false);
                    }
                    r.launch_all(now)?;
                    Ok::<bool, JsValue>(true)
                });
                match fired {
                    Some(Ok(true)) => start_frame_loop(),
                    Some(Err(err)) => log::warn!("egg: tap trigger: {:?}", err),
                    _ => {}
                }
            })?;
        }
    }

    log::info!("egg: installed ({:?}, {} letters)", mode, letters.len());
    Ok(())
}

/// Whether the frame loop schedules another frame. Errors end the loop; the
/// runner has already released it.
fn continue_loop<E: std::fmt::Debug>(outcome: Option<Result<bool, E>>) -> bool {
    match outcome {
        Some(Ok(keep)) => keep,
        Some(Err(err)) => {
            log::warn!("egg: frame loop stopped: {:?}", err);
            false
        }
        None => false,
    }
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// Drive `EggRunner::frame` from `requestAnimationFrame` until it reports
/// nothing left to animate. A no-op while a loop is already running.
fn start_frame_loop() {
    if !with_runner(|r| r.claim_frame_loop()).unwrap_or(false) {
        return;
    }
    let f: FrameCallback = Rc::new(RefCell::new(None));
    let g = f.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move |ts: f64| {
        if !continue_loop(with_runner(|r| r.frame(ts))) {
            return;
        }
        if let (Some(w), Some(cb)) = (web_sys::window(), f.borrow().as_ref()) {
            let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
        }
    }) as Box<dyn FnMut(f64)>));
    if let (Some(w), Some(cb)) = (web_sys::window(), g.borrow().as_ref()) {
        let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    };
}

#[cfg(feature = "gallery")]
pub use gallery::init_gallery;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_errors_stop_the_loop() {
        assert!(continue_loop::<String>(Some(Ok(true))));
        assert!(!continue_loop::<String>(Some(Ok(false))));
        assert!(!continue_loop(Some(Err("style write failed".to_string()))));
        assert!(!continue_loop::<String>(None));
    }
}
