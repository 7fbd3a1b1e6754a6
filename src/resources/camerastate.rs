//! Lock and zoom state of the controlled camera.
//!
//! [`CameraState`] is plain data owned by the
//! [`CameraController`](super::controller::CameraController). It is mutated
//! only by [`CameraState::apply_lock`] / [`CameraState::apply_zoom`] (through
//! `set_effect`) and read by the per-frame clamp in
//! [`camera_lock_system`](crate::systems::camera::camera_lock_system).

use bevy_ecs::prelude::Entity;
use raylib::prelude::{Vector2, Vector3};

use crate::components::peg::{LockEffect, ZoomEffect};

/// The four mutually exclusive lock configurations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockMode {
    Free,
    Horizontal,
    Vertical,
    Full,
}

/// Direction of a zoom ramp requested by a zoom effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomDirection {
    /// Towards the standard (closer) depth.
    In,
    /// Towards the wide (farther) depth.
    Out,
}

#[derive(Debug, Clone, Default)]
pub struct CameraState {
    hor_lock: bool,
    ver_lock: bool,
    lock_x: f32,
    lock_y: f32,
    zoomed_out: bool,
    lock_peg: Option<Entity>,
}

impl CameraState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the camera X is currently pinned.
    pub fn hor_lock(&self) -> bool {
        self.hor_lock
    }

    /// Whether the camera Y is currently pinned.
    pub fn ver_lock(&self) -> bool {
        self.ver_lock
    }

    pub fn lock_x(&self) -> f32 {
        self.lock_x
    }

    pub fn lock_y(&self) -> f32 {
        self.lock_y
    }

    pub fn is_zoomed_out(&self) -> bool {
        self.zoomed_out
    }

    /// Peg that established the current lock, if any.
    pub fn lock_peg(&self) -> Option<Entity> {
        self.lock_peg
    }

    pub fn lock_mode(&self) -> LockMode {
        match (self.hor_lock, self.ver_lock) {
            (false, false) => LockMode::Free,
            (true, false) => LockMode::Horizontal,
            (false, true) => LockMode::Vertical,
            (true, true) => LockMode::Full,
        }
    }

    /// Decide whether `zoom` needs a ramp and flip the zoomed-out flag if so.
    ///
    /// The flag changes immediately, before any ramp has run.
    pub fn apply_zoom(&mut self, zoom: ZoomEffect) -> Option<ZoomDirection> {
        match zoom {
            ZoomEffect::DoNotChange => None,
            ZoomEffect::Standard if self.zoomed_out => {
                self.zoomed_out = false;
                Some(ZoomDirection::In)
            }
            ZoomEffect::Wide if !self.zoomed_out => {
                self.zoomed_out = true;
                Some(ZoomDirection::Out)
            }
            _ => None,
        }
    }

    /// Apply a lock effect requested by `peg`, located at `peg_pos`.
    ///
    /// Locked coordinates are only recomputed when `peg` differs from the
    /// peg that set the current lock. Returns true when they were recomputed.
    pub fn apply_lock(
        &mut self,
        peg: Entity,
        peg_pos: Vector2,
        lock: LockEffect,
        offset: Vector2,
    ) -> bool {
        let (hor, ver) = match lock {
            LockEffect::DoNotChange => return false,
            LockEffect::NoLock => {
                self.hor_lock = false;
                self.ver_lock = false;
                self.lock_peg = None;
                return false;
            }
            LockEffect::HLock => (true, false),
            LockEffect::VLock => (false, true),
            LockEffect::FullLock => (true, true),
        };
        self.hor_lock = hor;
        self.ver_lock = ver;

        if self.lock_peg == Some(peg) {
            return false;
        }
        if hor {
            self.lock_x = peg_pos.x + offset.x;
        }
        if ver {
            self.lock_y = peg_pos.y + offset.y;
        }
        self.lock_peg = Some(peg);
        true
    }

    /// Pin the locked axes of `pos` to the stored coordinates.
    ///
    /// Depth and unlocked axes pass through unchanged.
    pub fn clamp(&self, pos: Vector3) -> Vector3 {
        let mut out = pos;
        if self.hor_lock {
            out.x = self.lock_x;
        }
        if self.ver_lock {
            out.y = self.lock_y;
        }
        out
    }

    /// Force the zoomed-out flag, used when the camera is placed at a depth
    /// directly instead of through a ramp.
    pub fn set_zoomed_out(&mut self, zoomed_out: bool) {
        self.zoomed_out = zoomed_out;
    }
}
