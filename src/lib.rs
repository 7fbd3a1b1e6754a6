//! PegCam library.
//!
//! A camera and music controller for 2D levels built on `bevy_ecs`: pegs lock
//! the camera on one or both axes, zoom it between two preset depths, and the
//! background music fades out when a level starts and back in when it ends.
//! This module exposes the components, resources, systems and events for the
//! demo binary and the integration tests.

pub mod components;
pub mod events;
pub mod game;
pub mod resources;
pub mod systems;
