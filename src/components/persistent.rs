//! Persistent entity marker component.
//!
//! Entities with the [`Persistent`] component survive level loads. The camera
//! entity owned by the [`CameraController`](crate::resources::controller::CameraController)
//! and the registered observers carry it.

use bevy_ecs::prelude::Component;

/// Tag component used to mark entities that should persist across level loads.
///
/// [`load_level`](crate::game::load_level) despawns every entity without it.
#[derive(Component, Clone, Debug)]
pub struct Persistent;
