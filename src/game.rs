//! Controller lifecycle and level loading.
//!
//! These functions take `&mut World` and are meant to be called by the
//! application loop (or tests) outside of any schedule:
//!
//! - [`register_observers`] – install the controller's observers once
//! - [`init_camera_controller`] – create the single camera controller
//! - [`shutdown_camera_controller`] – tear it down again
//! - [`load_level`] – replace the current level with another layout

use bevy_ecs::observer::Observer;
use bevy_ecs::prelude::*;
use log::{info, warn};
use raylib::prelude::Vector2;

use crate::components::follow::Follow;
use crate::components::maincamera::MainCamera;
use crate::components::peg::Peg;
use crate::components::persistent::Persistent;
use crate::components::player::Player;
use crate::components::ramp::Ramp;
use crate::components::worldposition::WorldPosition;
use crate::events::audio::AudioCmd;
use crate::events::fademusic::observe_fade_music;
use crate::events::levelloaded::{LevelLoadedEvent, observe_level_loaded};
use crate::events::ramp::observe_ramp_finished;
use crate::events::seteffect::observe_set_effect;
use crate::resources::audio::setup_audio_messages;
use crate::resources::controller::CameraController;
use crate::resources::controllerconfig::ControllerConfig;
use crate::resources::levelstore::{ActiveLevel, LevelStore, LevelTransition};
use crate::resources::music::MusicTrack;

/// Id the controller's background track is registered under.
pub const MUSIC_ID: &str = "bgm";

/// Spawn the controller's observers as persistent entities.
pub fn register_observers(world: &mut World) {
    world.spawn((Observer::new(observe_set_effect), Persistent));
    world.spawn((Observer::new(observe_fade_music), Persistent));
    world.spawn((Observer::new(observe_level_loaded), Persistent));
    world.spawn((Observer::new(observe_ramp_finished), Persistent));
    // Ensure the observers are registered before anything triggers events.
    world.flush();
}

/// Create the camera controller.
///
/// Spawns the persistent camera entity at the standard depth, registers the
/// music track, starts playback and launches the music fade-out. Returns
/// `false` and changes nothing if a controller already exists.
///
/// Uses the world's [`ControllerConfig`], inserting the defaults if there is
/// none.
pub fn init_camera_controller(world: &mut World) -> bool {
    if world.contains_resource::<CameraController>() {
        warn!("Camera controller already initialized; discarding the new one");
        return false;
    }
    if !world.contains_resource::<ControllerConfig>() {
        world.insert_resource(ControllerConfig::new());
    }
    if !world.contains_resource::<Messages<AudioCmd>>() {
        setup_audio_messages(world);
    }
    let config = world.resource::<ControllerConfig>().clone();

    let camera = world
        .spawn((
            MainCamera,
            WorldPosition::new(0.0, 0.0, config.standard_depth),
            Follow::new(None),
            Persistent,
        ))
        .id();

    let music = MusicTrack::new(MUSIC_ID, config.music_path.clone(), config.music_volume)
        .with_looped(config.music_looped);
    world.write_message(AudioCmd::LoadMusic {
        id: music.id.clone(),
        path: music.path.clone(),
    });
    world.write_message(AudioCmd::PlayMusic {
        id: music.id.clone(),
        looped: music.looped,
    });

    let mut controller = CameraController::new(camera, config.ramp_policy);
    {
        let mut commands = world.commands();
        controller.fade_out_music(&mut commands, &config, &music);
    }
    world.insert_resource(music);
    world.insert_resource(controller);
    world.flush();

    info!(
        "Camera controller ready: camera={:?} depth={} ramps={}",
        camera, config.standard_depth, config.ramp_policy
    );
    true
}

/// Remove the camera controller, its camera, its ramps and its music.
///
/// Returns `false` if there was no controller.
pub fn shutdown_camera_controller(world: &mut World) -> bool {
    let Some(controller) = world.remove_resource::<CameraController>() else {
        return false;
    };
    let ramps: Vec<Entity> = world
        .query_filtered::<Entity, With<Ramp>>()
        .iter(world)
        .collect();
    for ramp in ramps {
        world.despawn(ramp);
    }
    world.despawn(controller.camera());

    if let Some(music) = world.remove_resource::<MusicTrack>() {
        world.write_message(AudioCmd::StopMusic {
            id: music.id.clone(),
        });
        world.write_message(AudioCmd::UnloadMusic { id: music.id });
    }
    info!("Camera controller shut down");
    true
}

/// Replace the current level with the layout `id` from the [`LevelStore`].
///
/// Despawns every positioned entity that is not [`Persistent`] (the previous
/// level's player and pegs), spawns the new player and pegs,
/// marks the level active and triggers [`LevelLoadedEvent`].
pub fn load_level(world: &mut World, id: u32) -> Result<(), String> {
    let layout = world
        .get_resource::<LevelStore>()
        .ok_or_else(|| "No LevelStore resource".to_string())?
        .get(id)
        .cloned()
        .ok_or_else(|| format!("Unknown level {}", id))?;

    let stale: Vec<Entity> = world
        .query_filtered::<Entity, (With<WorldPosition>, Without<Persistent>)>()
        .iter(world)
        .collect();
    for entity in stale {
        world.despawn(entity);
    }

    world.spawn((
        Player::new(layout.player_speed),
        WorldPosition::new(layout.player_start[0], layout.player_start[1], 0.0),
    ));
    for peg in &layout.pegs {
        world.spawn((
            Peg::new(peg.zoom, peg.lock)
                .with_offset(Vector2 {
                    x: peg.offset_x,
                    y: peg.offset_y,
                })
                .with_radius(peg.radius),
            WorldPosition::new(peg.x, peg.y, 0.0),
        ));
    }

    world.insert_resource(ActiveLevel(id));
    world.get_resource_or_insert_with(LevelTransition::default).clear();
    info!(
        "Loaded level {} '{}' with {} pegs",
        layout.id,
        layout.name,
        layout.pegs.len()
    );
    world.trigger(LevelLoadedEvent { level: id });
    world.flush();
    Ok(())
}
