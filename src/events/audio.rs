//! Messages exchanged with the background audio thread.
//!
//! [`AudioCmd`] travels from the ECS world to the thread (through
//! `Messages<AudioCmd>` and [`forward_audio_cmds`](crate::systems::audio::forward_audio_cmds)),
//! [`AudioMessage`] travels back and is read by
//! [`music_status_system`](crate::systems::audio::music_status_system).

use bevy_ecs::message::Message;

/// Commands sent *to* the audio thread
#[derive(Message, Debug, Clone, PartialEq)]
pub enum AudioCmd {
    LoadMusic { id: String, path: String },
    UnloadMusic { id: String },
    PlayMusic { id: String, looped: bool },
    StopMusic { id: String },
    VolumeMusic { id: String, vol: f32 },
    Shutdown,
}

/// Events sent *back* from the audio thread
#[derive(Message, Debug, Clone, PartialEq)]
pub enum AudioMessage {
    MusicLoaded { id: String },
    MusicUnloaded { id: String },
    MusicLoadFailed { id: String, error: String },
    MusicPlayStarted { id: String },
    MusicStopped { id: String },
    MusicFinished { id: String }, // reached end for non looping
    MusicVolumeChanged { id: String, vol: f32 },
}
