//! The camera controller resource.
//!
//! [`CameraController`] owns the [`CameraState`], the bindings to the camera
//! and player entities, and the handles of the in-flight zoom and fade ramps.
//! It is created by [`init_camera_controller`](crate::game::init_camera_controller)
//! and removed by [`shutdown_camera_controller`](crate::game::shutdown_camera_controller);
//! only one can live in a world at a time.
//!
//! Ramp launches go through [`Commands`] so they can be issued from observers
//! and systems alike. Under [`RampPolicy::Replace`] launching a ramp cancels
//! the in-flight ramp of the same kind; under [`RampPolicy::Parallel`] both
//! keep writing the shared field until they finish.

use bevy_ecs::prelude::*;
use log::{debug, info};
use raylib::prelude::Vector2;

use crate::components::peg::{LockEffect, ZoomEffect};
use crate::components::persistent::Persistent;
use crate::components::ramp::{Ramp, RampHandle, RampKind, RampTarget};
use crate::resources::camerastate::{CameraState, ZoomDirection};
use crate::resources::controllerconfig::{ControllerConfig, RampPolicy};
use crate::resources::music::MusicTrack;

/// Direction of a music fade.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FadeDirection {
    /// Back up to the reconstructed full volume.
    In,
    /// Down to the configured floor fraction.
    Out,
}

#[derive(Resource, Debug)]
pub struct CameraController {
    state: CameraState,
    camera: Entity,
    player: Option<Entity>,
    zoom_ramp: Option<RampHandle>,
    fade_ramp: Option<RampHandle>,
    policy: RampPolicy,
}

impl CameraController {
    pub fn new(camera: Entity, policy: RampPolicy) -> Self {
        CameraController {
            state: CameraState::new(),
            camera,
            player: None,
            zoom_ramp: None,
            fade_ramp: None,
            policy,
        }
    }

    pub fn state(&self) -> &CameraState {
        &self.state
    }

    pub fn hor_lock(&self) -> bool {
        self.state.hor_lock()
    }

    pub fn ver_lock(&self) -> bool {
        self.state.ver_lock()
    }

    pub fn camera(&self) -> Entity {
        self.camera
    }

    pub fn player(&self) -> Option<Entity> {
        self.player
    }

    pub fn bind_player(&mut self, player: Option<Entity>) {
        self.player = player;
    }

    pub fn policy(&self) -> RampPolicy {
        self.policy
    }

    /// Handle of the newest ramp of `kind`, if it has not finished yet.
    pub fn ramp(&self, kind: RampKind) -> Option<RampHandle> {
        match kind {
            RampKind::Zoom => self.zoom_ramp,
            RampKind::Fade => self.fade_ramp,
        }
    }

    fn ramp_slot(&mut self, kind: RampKind) -> &mut Option<RampHandle> {
        match kind {
            RampKind::Zoom => &mut self.zoom_ramp,
            RampKind::Fade => &mut self.fade_ramp,
        }
    }

    /// Forget `handle` if it is still the current ramp of `kind`.
    ///
    /// Called when a ramp finishes; an older ramp finishing under
    /// [`RampPolicy::Parallel`] leaves the newer handle in place.
    pub fn clear_ramp(&mut self, kind: RampKind, handle: RampHandle) {
        let slot = self.ramp_slot(kind);
        if *slot == Some(handle) {
            *slot = None;
        }
    }

    /// Apply the zoom and lock effects a peg requests.
    ///
    /// Only updates state; returns the zoom ramp the caller should launch.
    /// `peg_pos` is the peg's position on the level plane.
    pub fn set_effect(
        &mut self,
        peg: Entity,
        peg_pos: Vector2,
        zoom: ZoomEffect,
        lock: LockEffect,
        offset: Vector2,
    ) -> Option<ZoomDirection> {
        let direction = self.state.apply_zoom(zoom);
        if self.state.apply_lock(peg, peg_pos, lock, offset) {
            debug!(
                "Camera locked by {:?}: mode={:?} x={} y={}",
                peg,
                self.state.lock_mode(),
                self.state.lock_x(),
                self.state.lock_y()
            );
        }
        direction
    }

    /// Spawn `ramp` and record it as the current ramp of its kind.
    fn launch(&mut self, commands: &mut Commands, ramp: Ramp) -> RampHandle {
        let kind = ramp.kind;
        let handle = RampHandle(commands.spawn((ramp, Persistent)).id());
        let policy = self.policy;
        let previous = self.ramp_slot(kind).replace(handle);
        if let Some(previous) = previous {
            match policy {
                RampPolicy::Replace => {
                    debug!("Cancelling {:?} ramp {:?}", kind, previous);
                    commands.entity(previous.entity()).try_despawn();
                }
                RampPolicy::Parallel => {
                    debug!("{:?} ramp {:?} keeps running alongside", kind, previous);
                }
            }
        }
        handle
    }

    /// Mark the camera as zoomed in or out and ramp its depth accordingly.
    pub fn zoom(
        &mut self,
        commands: &mut Commands,
        config: &ControllerConfig,
        direction: ZoomDirection,
    ) -> RampHandle {
        let (from, to) = match direction {
            ZoomDirection::In => (config.wide_depth, config.standard_depth),
            ZoomDirection::Out => (config.standard_depth, config.wide_depth),
        };
        self.state.set_zoomed_out(direction == ZoomDirection::Out);
        info!("Zooming {:?}: depth {} -> {}", direction, from, to);
        let ramp = Ramp::new(
            RampKind::Zoom,
            RampTarget::CameraDepth(self.camera),
            from,
            to,
            config.zoom_step,
        )
        .with_interval(config.zoom_interval);
        self.launch(commands, ramp)
    }

    pub fn zoom_in(&mut self, commands: &mut Commands, config: &ControllerConfig) -> RampHandle {
        self.zoom(commands, config, ZoomDirection::In)
    }

    pub fn zoom_out(&mut self, commands: &mut Commands, config: &ControllerConfig) -> RampHandle {
        self.zoom(commands, config, ZoomDirection::Out)
    }

    /// Ramp the music volume relative to the volume `music` has right now.
    ///
    /// Fading out scales the current volume from 1.0 down to the floor
    /// fraction after the configured delay. Fading in assumes the current
    /// volume is what a completed fade-out left behind and scales back up to
    /// `volume / floor`; any other volume change in between skews the result.
    pub fn fade_music(
        &mut self,
        commands: &mut Commands,
        config: &ControllerConfig,
        music: &MusicTrack,
        direction: FadeDirection,
    ) -> RampHandle {
        let floor = config.fade_floor;
        let ramp = match direction {
            FadeDirection::Out => Ramp::new(
                RampKind::Fade,
                RampTarget::MusicVolume,
                1.0,
                floor,
                config.fade_step,
            )
            .with_scale(music.volume())
            .with_delay(config.fade_delay),
            FadeDirection::In => Ramp::new(
                RampKind::Fade,
                RampTarget::MusicVolume,
                floor,
                1.0,
                config.fade_step,
            )
            .with_scale(music.volume() / floor),
        }
        .with_interval(config.fade_interval);
        info!(
            "Fading music '{}' {:?} from volume {}",
            music.id,
            direction,
            music.volume()
        );
        self.launch(commands, ramp)
    }

    pub fn fade_out_music(
        &mut self,
        commands: &mut Commands,
        config: &ControllerConfig,
        music: &MusicTrack,
    ) -> RampHandle {
        self.fade_music(commands, config, music, FadeDirection::Out)
    }

    pub fn fade_in_music(
        &mut self,
        commands: &mut Commands,
        config: &ControllerConfig,
        music: &MusicTrack,
    ) -> RampHandle {
        self.fade_music(commands, config, music, FadeDirection::In)
    }
}
