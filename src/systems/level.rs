//! Level end detection and level switching.
//!
//! - [`level_end_system`] notices the player crossing the level's end line,
//!   fades the music back in and schedules the next level.
//! - [`level_transition_system`] counts the pause down and loads the
//!   scheduled level through [`load_level`](crate::game::load_level).

use bevy_ecs::prelude::*;
use log::{error, info};

use crate::components::player::Player;
use crate::components::worldposition::WorldPosition;
use crate::events::fademusic::FadeMusicEvent;
use crate::game::load_level;
use crate::resources::controllerconfig::ControllerConfig;
use crate::resources::levelstore::{ActiveLevel, LevelStore, LevelTransition};
use crate::resources::worldtime::WorldTime;

pub fn level_end_system(
    store: Res<LevelStore>,
    active: Option<Res<ActiveLevel>>,
    config: Res<ControllerConfig>,
    players: Query<&WorldPosition, With<Player>>,
    mut transition: ResMut<LevelTransition>,
    mut commands: Commands,
) {
    if transition.is_pending() {
        return;
    }
    let Some(active) = active else {
        return;
    };
    let Some(layout) = store.get(active.0) else {
        return;
    };
    let Some(player) = players.iter().next() else {
        return;
    };
    if player.pos.x < layout.end_x {
        return;
    }
    let Some(next) = store.next_after(active.0) else {
        return;
    };
    info!(
        "Level {} '{}' finished, next level {} in {}s",
        layout.id, layout.name, next, config.transition_pause
    );
    commands.trigger(FadeMusicEvent::fade_in());
    transition.schedule(next, config.transition_pause);
}

pub fn level_transition_system(world: &mut World) {
    let dt = world.resource::<WorldTime>().delta;
    let due = {
        let mut transition = world.resource_mut::<LevelTransition>();
        let Some(next) = transition.pending else {
            return;
        };
        transition.remaining -= dt;
        if transition.remaining > 0.0 {
            return;
        }
        next
    };
    if let Err(e) = load_level(world, due) {
        error!("Failed to switch to level {}: {}", due, e);
        world.resource_mut::<LevelTransition>().clear();
    }
}
