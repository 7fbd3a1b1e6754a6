use bevy_ecs::prelude::Component;

/// Marks the single camera entity driven by the controller.
#[derive(Component, Clone, Copy, Debug, Default)]
pub struct MainCamera;
