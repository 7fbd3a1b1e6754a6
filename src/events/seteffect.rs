//! Peg effect requests.
//!
//! Pegs (or anything else acting as a trigger) ask for camera effects by
//! triggering a [`SetEffectEvent`]. The [`observe_set_effect`] observer looks
//! up the peg position, updates the
//! [`CameraController`](crate::resources::controller::CameraController) and
//! launches a zoom ramp when the zoom effect calls for one. A lock from a peg
//! without a position is skipped; its zoom still applies.

use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::warn;
use raylib::prelude::Vector2;

use crate::components::peg::{LockEffect, Peg, ZoomEffect};
use crate::components::worldposition::WorldPosition;
use crate::resources::controller::CameraController;
use crate::resources::controllerconfig::ControllerConfig;

#[derive(Event, Debug, Clone, Copy)]
pub struct SetEffectEvent {
    /// Peg requesting the effect; its position anchors any lock.
    pub peg: Entity,
    pub zoom: ZoomEffect,
    pub lock: LockEffect,
    /// Added to the peg position to get the locked coordinates.
    pub offset: Vector2,
}

impl SetEffectEvent {
    pub fn new(peg: Entity, zoom: ZoomEffect, lock: LockEffect) -> Self {
        SetEffectEvent {
            peg,
            zoom,
            lock,
            offset: Vector2 { x: 0.0, y: 0.0 },
        }
    }

    pub fn with_offset(mut self, offset: Vector2) -> Self {
        self.offset = offset;
        self
    }

    /// The effect a [`Peg`] component describes.
    pub fn from_peg(entity: Entity, peg: &Peg) -> Self {
        SetEffectEvent::new(entity, peg.zoom, peg.lock).with_offset(peg.offset)
    }
}

pub fn observe_set_effect(
    trigger: On<SetEffectEvent>,
    mut commands: Commands,
    controller: Option<ResMut<CameraController>>,
    config: Res<ControllerConfig>,
    positions: Query<&WorldPosition>,
) {
    let event = *trigger.event();
    let Some(mut controller) = controller else {
        warn!("SetEffect from {:?} ignored: no camera controller", event.peg);
        return;
    };
    let needs_position = matches!(
        event.lock,
        LockEffect::HLock | LockEffect::VLock | LockEffect::FullLock
    );
    let (peg_pos, lock) = match positions.get(event.peg) {
        Ok(pos) => (pos.planar(), event.lock),
        Err(_) if needs_position => {
            warn!("Lock from {:?} ignored: peg has no position", event.peg);
            (Vector2 { x: 0.0, y: 0.0 }, LockEffect::DoNotChange)
        }
        Err(_) => (Vector2 { x: 0.0, y: 0.0 }, event.lock),
    };
    if let Some(direction) =
        controller.set_effect(event.peg, peg_pos, event.zoom, lock, event.offset)
    {
        controller.zoom(&mut commands, &config, direction);
    }
}
