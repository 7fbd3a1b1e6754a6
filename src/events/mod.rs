//! Event types and observers used by the controller.
//!
//! Events provide a decoupled way for triggers, level logic and systems to
//! reach the camera controller without holding on to it.
//!
//! Submodules:
//! - [`audio`] – commands and messages for the background audio thread
//! - [`fademusic`] – requests to fade the music in or out
//! - [`levelloaded`] – notification that a level finished spawning
//! - [`ramp`] – notification that a ramp wrote its last value
//! - [`seteffect`] – zoom/lock effect requests from pegs
pub mod audio;
pub mod fademusic;
pub mod levelloaded;
pub mod ramp;
pub mod seteffect;
