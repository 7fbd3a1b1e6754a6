//! Level trigger points ("pegs") and the camera effects they request.
//!
//! A [`Peg`] sits on the level plane at its entity's
//! [`WorldPosition`](super::worldposition::WorldPosition). When the player
//! reaches it, the peg asks the camera controller to apply its
//! [`ZoomEffect`] and [`LockEffect`]. Locked coordinates are computed from the
//! peg position plus [`Peg::offset`].

use bevy_ecs::prelude::Component;
use raylib::prelude::Vector2;
use serde::Deserialize;

/// Which of the two preset camera depths a peg selects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Deserialize)]
pub enum ZoomEffect {
    /// Keep the current depth.
    #[default]
    DoNotChange,
    /// Zoom in to the standard depth if currently wide.
    Standard,
    /// Zoom out to the wide depth if currently standard.
    Wide,
}

/// Which camera axes a peg pins.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Deserialize)]
pub enum LockEffect {
    /// Leave the lock flags and locked coordinates untouched.
    #[default]
    DoNotChange,
    /// Release both axes and forget the locking peg.
    NoLock,
    /// Pin X only.
    HLock,
    /// Pin Y only.
    VLock,
    /// Pin both X and Y.
    FullLock,
}

/// Trigger point that requests camera effects when the player reaches it.
#[derive(Component, Clone, Debug)]
pub struct Peg {
    pub zoom: ZoomEffect,
    pub lock: LockEffect,
    /// Offset added to the peg position when computing locked coordinates.
    pub offset: Vector2,
    /// Distance from the peg at which the player triggers it.
    pub radius: f32,
    /// Cleared while the player is inside `radius` and set again once the
    /// player leaves, so the peg fires once per visit.
    pub armed: bool,
}

impl Peg {
    pub fn new(zoom: ZoomEffect, lock: LockEffect) -> Self {
        Peg {
            zoom,
            lock,
            offset: Vector2 { x: 0.0, y: 0.0 },
            radius: 1.0,
            armed: true,
        }
    }

    pub fn with_offset(mut self, offset: Vector2) -> Self {
        self.offset = offset;
        self
    }

    pub fn with_radius(mut self, radius: f32) -> Self {
        self.radius = radius;
        self
    }
}
