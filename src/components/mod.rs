//! ECS components for entities.
//!
//! This module groups all component types that can be attached to entities in
//! the level. Components define data such as position, peg effects, camera
//! following and running ramps.
//!
//! Submodules overview:
//! - [`follow`] – make an entity track another entity on the level plane
//! - [`maincamera`] – marker for the camera driven by the controller
//! - [`peg`] – level trigger points and the zoom/lock effects they request
//! - [`persistent`] – marker for entities that persist across level loads
//! - [`player`] – marker for the player entity and its run speed
//! - [`ramp`] – step-wise linear ramps for camera depth and music volume
//! - [`worldposition`] – world-space position including depth

pub mod follow;
pub mod maincamera;
pub mod peg;
pub mod persistent;
pub mod player;
pub mod ramp;
pub mod worldposition;
