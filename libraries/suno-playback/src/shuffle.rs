//! Shuffle for "shuffle all" playback
//!
//! Fisher-Yates over the scope, driven by the caller's RNG so tests can seed it.

use crate::types::TrackDescriptor;
use rand::Rng;

/// Randomize track order in place
///
/// For each position from the last down to 1, swap it with a position picked
/// uniformly from `[0, i]`. Every permutation is equally likely.
pub fn shuffle_tracks<R: Rng + ?Sized>(tracks: &mut [TrackDescriptor], rng: &mut R) {
    for i in (1..tracks.len()).rev() {
        let j = rng.gen_range(0..=i);
        tracks.swap(i, j);
    }
}
