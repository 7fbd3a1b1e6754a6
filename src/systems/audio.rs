//! Audio system implementation backed by a dedicated thread and Raylib.
//!
//! This module hosts the background audio thread and the systems that bridge
//! it with the ECS world:
//! - [`audio_thread`] runs on its own OS thread, owns the Raylib audio device,
//!   and processes [`AudioCmd`] messages, emitting [`AudioMessage`] responses.
//! - [`sync_music_volume`] turns every change of the
//!   [`MusicTrack`] volume into an [`AudioCmd::VolumeMusic`].
//! - [`forward_audio_cmds`] / [`poll_audio_messages`] move messages across
//!   the channels; the `update_bevy_*` systems advance the ECS queues.
//! - [`music_status_system`] mirrors playback state reported by the thread
//!   into [`MusicTrack::playing`].
//!
//! Without an [`AudioBridge`] (headless runs, tests) the forwarding systems
//! are no-ops and commands are simply dropped when the queue rotates.

use crate::events::audio::{AudioCmd, AudioMessage};
use crate::resources::audio::AudioBridge;
use crate::resources::music::MusicTrack;
use bevy_ecs::prelude::*;
use crossbeam_channel::{Receiver, Sender};
use log::{debug, info, warn};
use raylib::core::audio::{Music, RaylibAudio};
use rustc_hash::{FxHashMap, FxHashSet};

/// Queue a volume command whenever the music track volume changed.
pub fn sync_music_volume(music: Option<Res<MusicTrack>>, mut writer: MessageWriter<AudioCmd>) {
    let Some(music) = music else {
        return;
    };
    if music.is_changed() {
        writer.write(AudioCmd::VolumeMusic {
            id: music.id.clone(),
            vol: music.volume(),
        });
    }
}

/// Drain any pending messages from the audio thread into the ECS
/// [`Messages<AudioMessage>`] mailbox.
pub fn poll_audio_messages(
    bridge: Option<Res<AudioBridge>>,
    mut writer: MessageWriter<AudioMessage>,
) {
    if let Some(bridge) = bridge {
        writer.write_batch(bridge.rx_msg.try_iter());
    }
}

/// Advance the ECS message queue for [`AudioMessage`].
pub fn update_bevy_audio_messages(mut msgs: ResMut<Messages<AudioMessage>>) {
    msgs.update();
}

/// Forward ECS AudioCmd messages to the audio thread via the AudioBridge sender.
pub fn forward_audio_cmds(bridge: Option<Res<AudioBridge>>, mut reader: MessageReader<AudioCmd>) {
    let Some(bridge) = bridge else {
        // Mark as read so the queue does not grow in headless runs.
        reader.clear();
        return;
    };
    for cmd in reader.read() {
        // ignore send error on shutdown
        let _ = bridge.tx_cmd.send(cmd.clone());
    }
}

/// Advance the ECS message queue for AudioCmd so same-frame readers can observe writes.
pub fn update_bevy_audio_cmds(mut msgs: ResMut<Messages<AudioCmd>>) {
    msgs.update();
}

/// Mirror playback state of the controller's track from audio thread reports.
pub fn music_status_system(
    music: Option<ResMut<MusicTrack>>,
    mut reader: MessageReader<AudioMessage>,
) {
    let Some(mut music) = music else {
        reader.clear();
        return;
    };
    for msg in reader.read() {
        match msg {
            AudioMessage::MusicPlayStarted { id } if *id == music.id => {
                // Playback flag only; leave volume change detection alone.
                music.bypass_change_detection().playing = true;
            }
            AudioMessage::MusicStopped { id } | AudioMessage::MusicFinished { id }
                if *id == music.id =>
            {
                music.bypass_change_detection().playing = false;
            }
            AudioMessage::MusicLoadFailed { id, error } => {
                warn!("Music '{}' failed to load: {}", id, error);
            }
            other => debug!("Audio message: {:?}", other),
        }
    }
}

/// Entry point of the dedicated audio thread.
///
/// Responsibilities:
/// - Initialize the Raylib audio device once for the life of the thread.
/// - Own all `Music` handles, preventing use from other threads.
/// - React to [`AudioCmd`] inputs to load/unload and control playback.
/// - Emit [`AudioMessage`] outputs for state changes.
/// - Periodically pump music streams and detect when playback finishes.
///
/// This function blocks until it receives [`AudioCmd::Shutdown`], at which
/// point it unloads resources and exits cleanly. If the audio device cannot
/// be opened the thread drains commands until shutdown without playing
/// anything.
pub fn audio_thread(rx_cmd: Receiver<AudioCmd>, tx_msg: Sender<AudioMessage>) {
    let audio = match RaylibAudio::init_audio_device() {
        Ok(device) => device,
        Err(e) => {
            warn!("[audio] device unavailable, music disabled: {}", e);
            for cmd in rx_cmd.iter() {
                if matches!(cmd, AudioCmd::Shutdown) {
                    break;
                }
            }
            return;
        }
    };

    info!("[audio] thread starting (id={:?})", std::thread::current().id());

    let mut musics: FxHashMap<String, Music> = FxHashMap::default();
    let mut playing: FxHashSet<String> = FxHashSet::default();
    let mut looped: FxHashSet<String> = FxHashSet::default();

    'run: loop {
        // 1) Drain commands
        for cmd in rx_cmd.try_iter() {
            match cmd {
                AudioCmd::LoadMusic { id, path } => match audio.new_music(&path) {
                    Ok(music) => {
                        info!("[audio] loaded id='{}' path='{}'", id, path);
                        musics.insert(id.clone(), music);
                        let _ = tx_msg.send(AudioMessage::MusicLoaded { id });
                    }
                    Err(e) => {
                        warn!("[audio] load failed id='{}' path='{}' error='{}'", id, path, e);
                        let _ = tx_msg.send(AudioMessage::MusicLoadFailed {
                            id,
                            error: e.to_string(),
                        });
                    }
                },
                AudioCmd::PlayMusic {
                    id,
                    looped: want_loop,
                } => {
                    if let Some(music) = musics.get(&id) {
                        info!("[audio] play start id='{}' looped={}", id, want_loop);
                        music.seek_stream(0.0);
                        music.play_stream();
                        playing.insert(id.clone());
                        if want_loop {
                            looped.insert(id.clone());
                        } else {
                            looped.remove(&id);
                        }
                        let _ = tx_msg.send(AudioMessage::MusicPlayStarted { id });
                    }
                }
                AudioCmd::StopMusic { id } => {
                    if let Some(music) = musics.get(&id) {
                        info!("[audio] stop id='{}'", id);
                        music.stop_stream();
                        playing.remove(&id);
                        looped.remove(&id);
                        let _ = tx_msg.send(AudioMessage::MusicStopped { id });
                    }
                }
                AudioCmd::VolumeMusic { id, vol } => {
                    if let Some(music) = musics.get(&id) {
                        debug!("[audio] volume id='{}' vol={}", id, vol);
                        music.set_volume(vol);
                        let _ = tx_msg.send(AudioMessage::MusicVolumeChanged { id, vol });
                    }
                }
                AudioCmd::UnloadMusic { id } => {
                    if let Some(music) = musics.remove(&id) {
                        info!("[audio] unload id='{}'", id);
                        drop(music);
                        playing.remove(&id);
                        looped.remove(&id);
                        let _ = tx_msg.send(AudioMessage::MusicUnloaded { id });
                    }
                }
                AudioCmd::Shutdown => {
                    info!("[audio] shutdown requested");
                    musics.clear();
                    playing.clear();
                    looped.clear();
                    break 'run;
                }
            }
        }
        // 2) Pump streaming + detect ends
        //    `update_stream()` must be called regularly while playing.
        //    If a track ended and isn't looped, emit Finished exactly once.
        let mut ended: Vec<String> = Vec::new();
        for id in playing.iter() {
            if let Some(music) = musics.get(id) {
                if music.is_stream_playing() {
                    music.update_stream();
                } else {
                    // time_played >= time_length - epsilon
                    let len = music.get_time_length();
                    let played = music.get_time_played();
                    if played >= len - 0.01 {
                        ended.push(id.clone());
                    }
                }
            }
        }
        for id in ended.iter() {
            if looped.contains(id) {
                if let Some(music) = musics.get(id) {
                    debug!("[audio] restarting looped id='{}'", id);
                    music.seek_stream(0.0);
                    music.play_stream();
                    let _ = tx_msg.send(AudioMessage::MusicPlayStarted { id: id.clone() });
                }
            } else {
                info!("[audio] finished id='{}'", id);
                playing.remove(id);
                let _ = tx_msg.send(AudioMessage::MusicFinished { id: id.clone() });
            }
        }
        std::thread::sleep(std::time::Duration::from_millis(10));
    } // 'run

    info!("[audio] thread exiting (id={:?})", std::thread::current().id());

    // On exit, musics drop before `audio`, satisfying lifetimes
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_world() -> World {
        let mut world = World::new();
        world.init_resource::<Messages<AudioCmd>>();
        world.init_resource::<Messages<AudioMessage>>();
        world
    }

    fn drain_cmds(world: &mut World) -> Vec<AudioCmd> {
        world
            .resource_mut::<Messages<AudioCmd>>()
            .drain()
            .collect()
    }

    #[test]
    fn test_volume_change_queues_command() {
        let mut world = make_world();
        world.insert_resource(MusicTrack::new("bgm", "bgm.ogg", 1.0));
        let mut schedule = Schedule::default();
        schedule.add_systems(sync_music_volume);

        schedule.run(&mut world);
        assert_eq!(
            drain_cmds(&mut world),
            vec![AudioCmd::VolumeMusic {
                id: "bgm".into(),
                vol: 1.0
            }]
        );

        schedule.run(&mut world);
        assert!(drain_cmds(&mut world).is_empty());

        world.resource_mut::<MusicTrack>().set_volume(0.5);
        schedule.run(&mut world);
        assert_eq!(
            drain_cmds(&mut world),
            vec![AudioCmd::VolumeMusic {
                id: "bgm".into(),
                vol: 0.5
            }]
        );
    }

    #[test]
    fn test_music_status_tracks_play_and_stop() {
        let mut world = make_world();
        world.insert_resource(MusicTrack::new("bgm", "bgm.ogg", 1.0));
        let mut schedule = Schedule::default();
        schedule.add_systems(music_status_system);

        world.write_message(AudioMessage::MusicPlayStarted { id: "bgm".into() });
        schedule.run(&mut world);
        assert!(world.resource::<MusicTrack>().playing);

        world.write_message(AudioMessage::MusicFinished { id: "other".into() });
        schedule.run(&mut world);
        assert!(world.resource::<MusicTrack>().playing);

        world.write_message(AudioMessage::MusicStopped { id: "bgm".into() });
        schedule.run(&mut world);
        assert!(!world.resource::<MusicTrack>().playing);
    }

    #[test]
    fn test_forward_without_bridge_is_noop() {
        let mut world = make_world();
        world.write_message(AudioCmd::StopMusic { id: "bgm".into() });
        let mut schedule = Schedule::default();
        schedule.add_systems(forward_audio_cmds);
        schedule.run(&mut world);
    }
}
