//! Music fade requests.
//!
//! Level-end logic triggers [`FadeMusicEvent`] with [`FadeDirection::In`] to
//! bring the music back up; level loads fade it out through
//! [`observe_level_loaded`](crate::events::levelloaded::observe_level_loaded).

use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::warn;

pub use crate::resources::controller::FadeDirection;
use crate::resources::controller::CameraController;
use crate::resources::controllerconfig::ControllerConfig;
use crate::resources::music::MusicTrack;

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct FadeMusicEvent {
    pub direction: FadeDirection,
}

impl FadeMusicEvent {
    pub fn fade_in() -> Self {
        FadeMusicEvent {
            direction: FadeDirection::In,
        }
    }

    pub fn fade_out() -> Self {
        FadeMusicEvent {
            direction: FadeDirection::Out,
        }
    }
}

/// Launch the requested fade on the controller's music track.
pub fn observe_fade_music(
    trigger: On<FadeMusicEvent>,
    mut commands: Commands,
    controller: Option<ResMut<CameraController>>,
    config: Res<ControllerConfig>,
    music: Option<Res<MusicTrack>>,
) {
    let direction = trigger.event().direction;
    let (Some(mut controller), Some(music)) = (controller, music) else {
        warn!("Fade {:?} requested without a camera controller or music track", direction);
        return;
    };
    controller.fade_music(&mut commands, &config, &music, direction);
}
