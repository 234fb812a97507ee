//! WASM bindings for suno-playback
//!
//! Lets the library pages drive playback from JavaScript: an
//! `HtmlAudioElement` backs the media sink and `WasmPlayer` forwards
//! player events to registered callbacks.

pub mod player;
pub mod sink;
pub mod types;

pub use player::WasmPlayer;
pub use sink::HtmlAudioSink;
pub use types::WasmTrack;
