//! System for entities following other entities.
//!
//! Updates the planar position of every entity with a [`Follow`] component to
//! track its target. The camera uses it to track the player; depth stays
//! with the zoom ramps.
//!
//! # Related
//!
//! - [`Follow`](crate::components::follow::Follow) – the follow component
//! - [`camera_lock_system`](crate::systems::camera::camera_lock_system) –
//!   overrides followed axes while a lock is active

use bevy_ecs::prelude::*;

use crate::components::follow::Follow;
use crate::components::worldposition::WorldPosition;

/// Updates positions of entities with `Follow` to track their targets.
///
/// Followers whose target is unset or gone keep their position.
pub fn follow_system(
    mut followers: Query<(&Follow, &mut WorldPosition)>,
    targets: Query<&WorldPosition, Without<Follow>>,
) {
    for (follow, mut follower_pos) in followers.iter_mut() {
        let Some(target) = follow.target else {
            continue;
        };
        if let Ok(target_pos) = targets.get(target) {
            if follow.follow_x {
                follower_pos.pos.x = target_pos.pos.x + follow.offset.x;
            }
            if follow.follow_y {
                follower_pos.pos.y = target_pos.pos.y + follow.offset.y;
            }
        }
    }
}
