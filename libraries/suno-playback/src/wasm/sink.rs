//! `HtmlAudioElement` media sink

use crate::controller::log_play_rejection;
use crate::MediaSink;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::HtmlAudioElement;

/// Media sink backed by the page's `<audio>` element
///
/// Listeners stay on the JavaScript side; they call the matching
/// `WasmPlayer::handle_*` method.
pub struct HtmlAudioSink {
    audio: HtmlAudioElement,
}

impl HtmlAudioSink {
    pub fn new(audio: HtmlAudioElement) -> Self {
        Self { audio }
    }

    pub fn element(&self) -> &HtmlAudioElement {
        &self.audio
    }
}

impl MediaSink for HtmlAudioSink {
    fn source(&self) -> Option<String> {
        let src = self.audio.src();
        if src.is_empty() {
            None
        } else {
            Some(src)
        }
    }

    fn set_source(&mut self, url: &str) {
        self.audio.set_src(url);
    }

    fn volume(&self) -> f64 {
        self.audio.volume()
    }

    fn set_volume(&mut self, gain: f64) {
        self.audio.set_volume(gain);
    }

    fn current_time(&self) -> f64 {
        self.audio.current_time()
    }

    fn set_current_time(&mut self, seconds: f64) {
        self.audio.set_current_time(seconds);
    }

    fn duration(&self) -> f64 {
        self.audio.duration()
    }

    fn paused(&self) -> bool {
        self.audio.paused()
    }

    fn play(&mut self) {
        let requested = self.audio.src();

        match self.audio.play() {
            Ok(promise) => {
                let audio = self.audio.clone();
                spawn_local(async move {
                    if let Err(err) = JsFuture::from(promise).await {
                        let current = audio.src();
                        let current = Some(current.as_str()).filter(|s| !s.is_empty());
                        if log_play_rejection(&requested, current, &describe_js_error(&err)) {
                            report_to_console(&err);
                        }
                    }
                });
            }
            Err(err) => {
                let reason = describe_js_error(&err);
                if log_play_rejection(&requested, Some(requested.as_str()), &reason) {
                    report_to_console(&err);
                }
            }
        }
    }

    fn pause(&mut self) {
        if let Err(err) = self.audio.pause() {
            tracing::warn!(reason = %describe_js_error(&err), "Pause failed");
        }
    }
}

// No tracing subscriber runs in the page, so failures also go to the console
fn report_to_console(err: &JsValue) {
    web_sys::console::error_2(&JsValue::from_str("Playback failed:"), err);
}

fn describe_js_error(err: &JsValue) -> String {
    if let Some(message) = err.as_string() {
        return message;
    }

    if let Some(error) = err.dyn_ref::<js_sys::Error>() {
        return String::from(error.message());
    }

    format!("{:?}", err)
}
