//! Ramp stepping system.
//!
//! [`ramp_system`] advances every [`Ramp`] by the frame delta, writes the
//! stepped value to its target and retires ramps that wrote their last value.
//! Targets that no longer exist (camera despawned, music removed) are skipped
//! silently; the ramp still runs to completion.

use bevy_ecs::prelude::*;

use crate::components::ramp::{Ramp, RampHandle, RampTarget};
use crate::components::worldposition::WorldPosition;
use crate::events::ramp::RampFinishedEvent;
use crate::resources::controller::CameraController;
use crate::resources::music::MusicTrack;
use crate::resources::worldtime::WorldTime;

pub fn ramp_system(
    world_time: Res<WorldTime>,
    mut ramps: Query<(Entity, &mut Ramp)>,
    mut positions: Query<&mut WorldPosition>,
    mut music: Option<ResMut<MusicTrack>>,
    mut controller: Option<ResMut<CameraController>>,
    mut commands: Commands,
) {
    let dt = world_time.delta.max(0.0);
    for (entity, mut ramp) in ramps.iter_mut() {
        if let Some(value) = ramp.tick(dt) {
            match ramp.target {
                RampTarget::CameraDepth(camera) => {
                    if let Ok(mut pos) = positions.get_mut(camera) {
                        pos.pos.z = value;
                    }
                }
                RampTarget::MusicVolume => {
                    if let Some(music) = music.as_deref_mut() {
                        music.set_volume(value);
                    }
                }
            }
        }
        if ramp.is_finished() {
            let handle = RampHandle(entity);
            if let Some(controller) = controller.as_deref_mut() {
                controller.clear_ramp(ramp.kind, handle);
            }
            commands.entity(entity).try_despawn();
            commands.trigger(RampFinishedEvent {
                handle,
                kind: ramp.kind,
            });
        }
    }
}
