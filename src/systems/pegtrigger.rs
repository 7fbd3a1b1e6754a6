//! Peg trigger detection.
//!
//! A peg fires a [`SetEffectEvent`] when the player comes within its
//! [`Peg::radius`] on the level plane. It fires once per visit: the peg
//! disarms on entry and re-arms once the player leaves the radius.

use bevy_ecs::prelude::*;
use log::debug;

use crate::components::peg::Peg;
use crate::components::player::Player;
use crate::components::worldposition::WorldPosition;
use crate::events::seteffect::SetEffectEvent;

pub fn peg_trigger_system(
    players: Query<&WorldPosition, With<Player>>,
    mut pegs: Query<(Entity, &WorldPosition, &mut Peg), Without<Player>>,
    mut commands: Commands,
) {
    let Some(player) = players.iter().next() else {
        return;
    };
    let player_pos = player.planar();
    for (entity, pos, mut peg) in pegs.iter_mut() {
        let inside = pos.planar().distance_to(player_pos) <= peg.radius;
        if inside && peg.armed {
            peg.armed = false;
            debug!("Player reached peg {:?}", entity);
            commands.trigger(SetEffectEvent::from_peg(entity, &peg));
        } else if !inside && !peg.armed {
            peg.armed = true;
        }
    }
}
