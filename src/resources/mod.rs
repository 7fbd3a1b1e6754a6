//! ECS resources made available to systems.
//!
//! This module groups the long-lived data injected into the ECS world and
//! accessed by systems during execution. Each submodule documents the
//! semantics and intended usage of its resource(s).
//!
//! Overview
//! - `audio` – bridge and channels for the background audio thread
//! - `camerastate` – lock and zoom state of the controlled camera
//! - `controller` – the camera controller: state, bindings and ramp handles
//! - `controllerconfig` – INI-backed window, zoom, fade and level settings
//! - `levelstore` – level layouts, the active level and pending transitions
//! - `music` – main-thread view of the background music track
//! - `worldtime` – simulation time and delta
pub mod audio;
pub mod camerastate;
pub mod controller;
pub mod controllerconfig;
pub mod levelstore;
pub mod music;
pub mod worldtime;
