//! Main-thread view of the background music track.
//!
//! The audio thread owns the actual stream; [`MusicTrack`] mirrors what the
//! game asked for so ramps can read the current volume without a round trip.
//! Every volume write is forwarded to the thread by
//! [`sync_music_volume`](crate::systems::audio::sync_music_volume).

use bevy_ecs::prelude::Resource;

#[derive(Resource, Debug, Clone)]
pub struct MusicTrack {
    /// Id the audio thread knows the track by.
    pub id: String,
    /// File the track was loaded from.
    pub path: String,
    /// Whether the track restarts when it ends.
    pub looped: bool,
    /// Last playback state reported by the audio thread.
    pub playing: bool,
    volume: f32,
}

impl MusicTrack {
    pub fn new(id: impl Into<String>, path: impl Into<String>, volume: f32) -> Self {
        MusicTrack {
            id: id.into(),
            path: path.into(),
            looped: true,
            playing: false,
            volume: volume.clamp(0.0, 1.0),
        }
    }

    pub fn with_looped(mut self, looped: bool) -> Self {
        self.looped = looped;
        self
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    /// Set the volume, clamped to `[0.0, 1.0]` like the audio device does.
    pub fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
    }
}
