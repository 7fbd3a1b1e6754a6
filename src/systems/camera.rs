//! Per-frame camera clamp.
//!
//! Runs after [`follow_system`](crate::systems::follow::follow_system) so a
//! lock always wins over following: a horizontal lock overwrites the camera
//! X with the locked X, a vertical lock overwrites Y. Depth is never touched.

use bevy_ecs::prelude::*;

use crate::components::worldposition::WorldPosition;
use crate::resources::controller::CameraController;

pub fn camera_lock_system(
    controller: Option<Res<CameraController>>,
    mut cameras: Query<&mut WorldPosition>,
) {
    let Some(controller) = controller else {
        return;
    };
    let state = controller.state();
    if !state.hor_lock() && !state.ver_lock() {
        return;
    }
    if let Ok(mut pos) = cameras.get_mut(controller.camera()) {
        pos.pos = state.clamp(pos.pos);
    }
}
