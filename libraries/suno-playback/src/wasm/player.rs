//! WASM-compatible PlaybackController wrapper

use super::sink::HtmlAudioSink;
use super::types::WasmTrack;
use crate::{
    PlaybackController, PlayerConfig, PlayerError, PlayerEvent, SinkEvent, TrackDescriptor,
};
use js_sys::Function;
use serde::Serialize;
use wasm_bindgen::prelude::*;
use web_sys::HtmlAudioElement;

/// WASM-compatible player
///
/// This wraps the core PlaybackController with a JavaScript-friendly API.
/// The page wires its buttons, sliders and `<audio>` listeners to these
/// methods and renders from the registered callbacks.
#[wasm_bindgen]
pub struct WasmPlayer {
    inner: PlaybackController<HtmlAudioSink>,

    // Event callbacks
    on_now_playing: Option<Function>,
    on_play_state: Option<Function>,
    on_progress: Option<Function>,
    on_duration: Option<Function>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ProgressPayload<'a> {
    percent: f64,
    elapsed_label: &'a str,
}

#[wasm_bindgen]
impl WasmPlayer {
    /// Create a player around the page's audio element
    #[wasm_bindgen(constructor)]
    pub fn new(audio: HtmlAudioElement) -> Self {
        Self::with_player_config(audio, &PlayerConfig::default())
    }

    /// Create a player with a configuration object
    #[wasm_bindgen(js_name = withConfig)]
    pub fn with_config(audio: HtmlAudioElement, config: JsValue) -> Result<WasmPlayer, JsValue> {
        let config: PlayerConfig = serde_wasm_bindgen::from_value(config)?;
        config.validate().map_err(to_js_error)?;
        Ok(Self::with_player_config(audio, &config))
    }

    // ===== Starting Playback =====

    /// Play one song with no surrounding list
    #[wasm_bindgen(js_name = playSingle)]
    pub fn play_single(&mut self, track: JsValue) -> Result<(), JsValue> {
        let track = parse_track(track)?;
        self.inner.start_from_single(track);
        self.dispatch_events();
        Ok(())
    }

    /// Play a list starting at `anchor`, or shuffled from the top
    #[wasm_bindgen(js_name = playScope)]
    pub fn play_scope(
        &mut self,
        tracks: JsValue,
        anchor: usize,
        shuffle: bool,
    ) -> Result<(), JsValue> {
        let tracks: Vec<WasmTrack> = serde_wasm_bindgen::from_value(tracks)?;
        let entries = tracks
            .into_iter()
            .map(TrackDescriptor::try_from)
            .collect::<Result<Vec<_>, _>>()
            .map_err(to_js_error)?;

        let result = self.inner.start_from_scope(entries, anchor, shuffle);
        self.dispatch_events();
        result.map_err(to_js_error)
    }

    // ===== Transport =====

    #[wasm_bindgen(js_name = togglePlayPause)]
    pub fn toggle_play_pause(&mut self) {
        self.inner.toggle_play_pause();
        self.dispatch_events();
    }

    pub fn next(&mut self) {
        self.inner.skip_to_next();
        self.dispatch_events();
    }

    pub fn previous(&mut self) {
        self.inner.skip_to_previous();
        self.dispatch_events();
    }

    /// Seek by progress bar position (0-100)
    #[wasm_bindgen(js_name = seekPercent)]
    pub fn seek_percent(&mut self, percent: f64) {
        self.inner.seek_to_percent(percent);
    }

    /// Set volume from the slider (0-100)
    #[wasm_bindgen(js_name = setVolume)]
    pub fn set_volume(&mut self, level: f64) {
        self.inner.set_volume(crate::Volume::from_slider(level).level());
    }

    #[wasm_bindgen(js_name = getVolume)]
    pub fn get_volume(&self) -> u8 {
        self.inner.volume()
    }

    // ===== Audio Element Listeners =====

    /// `timeupdate`
    #[wasm_bindgen(js_name = handleTimeUpdate)]
    pub fn handle_time_update(&mut self) {
        self.forward(SinkEvent::TimeAdvanced);
    }

    /// `loadedmetadata`
    #[wasm_bindgen(js_name = handleLoadedMetadata)]
    pub fn handle_loaded_metadata(&mut self) {
        self.forward(SinkEvent::MetadataReady);
    }

    /// `ended`
    #[wasm_bindgen(js_name = handleEnded)]
    pub fn handle_ended(&mut self) {
        self.forward(SinkEvent::Ended);
    }

    /// `play`
    #[wasm_bindgen(js_name = handlePlay)]
    pub fn handle_play(&mut self) {
        self.forward(SinkEvent::PlayStarted);
    }

    /// `pause`
    #[wasm_bindgen(js_name = handlePause)]
    pub fn handle_pause(&mut self) {
        self.forward(SinkEvent::PlayPaused);
    }

    // ===== State Queries =====

    /// Id of the loaded track, for row highlighting
    #[wasm_bindgen(js_name = currentTrackId)]
    pub fn current_track_id(&self) -> Option<String> {
        self.inner.current_track().map(|t| t.id().to_string())
    }

    #[wasm_bindgen(js_name = isPlaying)]
    pub fn is_playing(&self) -> bool {
        self.inner.is_playing()
    }

    /// Current playlist as page-style track objects
    pub fn playlist(&self) -> Result<JsValue, JsValue> {
        let tracks: Vec<WasmTrack> = self
            .inner
            .playlist()
            .entries()
            .iter()
            .map(WasmTrack::from)
            .collect();
        Ok(serde_wasm_bindgen::to_value(&tracks)?)
    }

    // ===== Event Callbacks =====

    /// Called with `{ id, title, artist, cover }`
    #[wasm_bindgen(js_name = onNowPlaying)]
    pub fn on_now_playing(&mut self, callback: Function) {
        self.on_now_playing = Some(callback);
    }

    /// Called with `true` (playing) or `false` (paused)
    #[wasm_bindgen(js_name = onPlayState)]
    pub fn on_play_state(&mut self, callback: Function) {
        self.on_play_state = Some(callback);
    }

    /// Called with `{ percent, elapsedLabel }`
    #[wasm_bindgen(js_name = onProgress)]
    pub fn on_progress(&mut self, callback: Function) {
        self.on_progress = Some(callback);
    }

    /// Called with the duration label
    #[wasm_bindgen(js_name = onDuration)]
    pub fn on_duration(&mut self, callback: Function) {
        self.on_duration = Some(callback);
    }
}

impl WasmPlayer {
    fn with_player_config(audio: HtmlAudioElement, config: &PlayerConfig) -> Self {
        // Enable panic hooks for better error messages in console
        console_error_panic_hook::set_once();

        Self {
            inner: PlaybackController::new(HtmlAudioSink::new(audio), config),
            on_now_playing: None,
            on_play_state: None,
            on_progress: None,
            on_duration: None,
        }
    }

    fn forward(&mut self, event: SinkEvent) {
        self.inner.handle_sink_event(event);
        self.dispatch_events();
    }

    fn dispatch_events(&mut self) {
        for event in self.inner.drain_events() {
            let (callback, payload) = match &event {
                PlayerEvent::NowPlayingChanged(now) => {
                    (&self.on_now_playing, serde_wasm_bindgen::to_value(now))
                }
                PlayerEvent::PlayStateChanged { playing } => {
                    (&self.on_play_state, Ok(JsValue::from_bool(*playing)))
                }
                PlayerEvent::ProgressChanged {
                    percent,
                    elapsed_label,
                } => (
                    &self.on_progress,
                    serde_wasm_bindgen::to_value(&ProgressPayload {
                        percent: *percent,
                        elapsed_label,
                    }),
                ),
                PlayerEvent::DurationKnown { label } => {
                    (&self.on_duration, Ok(JsValue::from_str(label)))
                }
            };

            let Some(callback) = callback else {
                continue;
            };

            match payload {
                Ok(payload) => {
                    if let Err(err) = callback.call1(&JsValue::NULL, &payload) {
                        tracing::warn!(kind = event.kind(), error = ?err, "Event callback threw");
                    }
                }
                Err(err) => {
                    tracing::warn!(kind = event.kind(), error = ?err, "Failed to serialize event");
                }
            }
        }
    }
}

fn parse_track(value: JsValue) -> Result<TrackDescriptor, JsValue> {
    let track: WasmTrack = serde_wasm_bindgen::from_value(value)?;
    TrackDescriptor::try_from(track).map_err(to_js_error)
}

fn to_js_error(err: PlayerError) -> JsValue {
    JsError::new(&err.to_string()).into()
}
