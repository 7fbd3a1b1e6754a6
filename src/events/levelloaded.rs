//! Level-loaded notification.
//!
//! [`load_level`](crate::game::load_level) triggers [`LevelLoadedEvent`]
//! after spawning a level. The controller then re-binds the player and the
//! camera follow target, checks the music track is still there, and restarts
//! the music fade-out when the loaded level is the active one.

use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::{info, warn};

use crate::components::follow::Follow;
use crate::components::player::Player;
use crate::resources::controller::{CameraController, FadeDirection};
use crate::resources::controllerconfig::ControllerConfig;
use crate::resources::levelstore::ActiveLevel;
use crate::resources::music::MusicTrack;

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelLoadedEvent {
    pub level: u32,
}

pub fn observe_level_loaded(
    trigger: On<LevelLoadedEvent>,
    mut commands: Commands,
    controller: Option<ResMut<CameraController>>,
    config: Res<ControllerConfig>,
    active: Option<Res<ActiveLevel>>,
    music: Option<Res<MusicTrack>>,
    players: Query<Entity, With<Player>>,
    mut follows: Query<&mut Follow>,
) {
    let level = trigger.event().level;
    let Some(mut controller) = controller else {
        warn!("Level {} loaded without a camera controller", level);
        return;
    };

    let player = players.iter().next();
    if player.is_none() {
        warn!("Level {} has no player entity", level);
    }
    controller.bind_player(player);
    if let Ok(mut follow) = follows.get_mut(controller.camera()) {
        follow.target = player;
    }

    let Some(music) = music else {
        warn!("Level {} loaded without a music track", level);
        return;
    };
    if active.is_some_and(|active| active.0 == level) {
        info!("Level {} loaded, fading music out", level);
        controller.fade_music(&mut commands, &config, &music, FadeDirection::Out);
    }
}
