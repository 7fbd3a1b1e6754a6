//! Scripted player motion for the demo levels.

use bevy_ecs::prelude::*;

use crate::components::player::Player;
use crate::components::worldposition::WorldPosition;
use crate::resources::worldtime::WorldTime;

/// Move every player along +X at its run speed.
pub fn player_autorun_system(
    world_time: Res<WorldTime>,
    mut players: Query<(&Player, &mut WorldPosition)>,
) {
    let dt = world_time.delta;
    for (player, mut pos) in players.iter_mut() {
        pos.pos.x += player.speed * dt;
    }
}
