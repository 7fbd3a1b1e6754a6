//! Ramp completion notification.

use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::debug;

use crate::components::ramp::{RampHandle, RampKind};

/// Triggered by [`ramp_system`](crate::systems::ramp::ramp_system) after a
/// ramp wrote its last value. Cancelled ramps do not trigger it.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct RampFinishedEvent {
    pub handle: RampHandle,
    pub kind: RampKind,
}

/// Log ramp completions.
pub fn observe_ramp_finished(trigger: On<RampFinishedEvent>) {
    let event = trigger.event();
    debug!("{:?} ramp {:?} finished", event.kind, event.handle);
}
