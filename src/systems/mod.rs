//! Controller systems.
//!
//! This module groups the ECS systems that advance the controller, the demo
//! level and the audio bridge each frame.
//!
//! Submodules overview
//! - [`audio`] – bridge with the audio thread and music volume sync
//! - [`camera`] – pin locked camera axes every frame
//! - [`follow`] – make followers track their target on the level plane
//! - [`level`] – detect level ends and switch levels
//! - [`pegtrigger`] – fire peg effects when the player reaches a peg
//! - [`player`] – scripted player motion
//! - [`ramp`] – step zoom and fade ramps
//! - [`render`] – draw the level through the controlled camera using Raylib
//! - [`time`] – update simulation time and delta

pub mod audio;
pub mod camera;
pub mod follow;
pub mod level;
pub mod pegtrigger;
pub mod player;
pub mod ramp;
pub mod render;
pub mod time;
