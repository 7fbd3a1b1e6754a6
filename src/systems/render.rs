use bevy_ecs::prelude::*;
use raylib::prelude::*;

use crate::components::peg::{LockEffect, Peg};
use crate::components::player::Player;
use crate::components::worldposition::WorldPosition;
use crate::resources::controller::CameraController;
use crate::resources::levelstore::ActiveLevel;
use crate::resources::music::MusicTrack;

/// Half-length of the guide lines drawn for active locks.
const GUIDE_EXTENT: f32 = 100.0;

/// Level space looks at the plane from negative depth with +X to the right.
/// Raylib is right-handed, so depth is mirrored to keep +X on the right.
fn to_render(v: Vector3) -> Vector3 {
    Vector3 {
        x: v.x,
        y: v.y,
        z: -v.z,
    }
}

fn peg_color(lock: LockEffect) -> Color {
    match lock {
        LockEffect::DoNotChange => Color::GRAY,
        LockEffect::NoLock => Color::GREEN,
        LockEffect::HLock => Color::ORANGE,
        LockEffect::VLock => Color::SKYBLUE,
        LockEffect::FullLock => Color::RED,
    }
}

/// Draw the level through the controlled camera plus a small status overlay.
pub fn render_system(
    mut rl: NonSendMut<RaylibHandle>,
    th: NonSend<RaylibThread>,
    controller: Option<Res<CameraController>>,
    positions: Query<&WorldPosition>,
    pegs: Query<(&WorldPosition, &Peg)>,
    players: Query<&WorldPosition, With<Player>>,
    music: Option<Res<MusicTrack>>,
    active: Option<Res<ActiveLevel>>,
) {
    let cam_pos = controller
        .as_deref()
        .and_then(|c| positions.get(c.camera()).ok())
        .map(|p| p.pos)
        .unwrap_or(Vector3 {
            x: 0.0,
            y: 0.0,
            z: -10.0,
        });
    let eye = to_render(cam_pos);
    let camera = Camera3D::perspective(
        eye,
        Vector3 {
            x: eye.x,
            y: eye.y,
            z: 0.0,
        },
        Vector3::up(),
        45.0,
    );

    let mut d = rl.begin_drawing(&th);
    d.clear_background(Color::RAYWHITE);
    {
        let mut d3 = d.begin_mode3D(camera);
        for (pos, peg) in pegs.iter() {
            let p = to_render(pos.pos);
            let color = if peg.armed {
                peg_color(peg.lock)
            } else {
                peg_color(peg.lock).fade(0.4)
            };
            d3.draw_cube(p, 0.4, 0.4, 0.4, color);
            d3.draw_circle_3D(p, peg.radius, Vector3::zero(), 0.0, Color::LIGHTGRAY);
        }
        for pos in players.iter() {
            d3.draw_sphere(to_render(pos.pos), 0.3, Color::MAROON);
        }
        if let Some(controller) = controller.as_deref() {
            let state = controller.state();
            if state.hor_lock() {
                d3.draw_line_3D(
                    Vector3::new(state.lock_x(), -GUIDE_EXTENT, 0.0),
                    Vector3::new(state.lock_x(), GUIDE_EXTENT, 0.0),
                    Color::ORANGE,
                );
            }
            if state.ver_lock() {
                d3.draw_line_3D(
                    Vector3::new(-GUIDE_EXTENT, state.lock_y(), 0.0),
                    Vector3::new(GUIDE_EXTENT, state.lock_y(), 0.0),
                    Color::SKYBLUE,
                );
            }
        }
    }

    if let Some(active) = active.as_deref() {
        d.draw_text(&format!("Level {}", active.0), 10, 10, 20, Color::DARKGRAY);
    }
    if let Some(controller) = controller.as_deref() {
        let state = controller.state();
        let text = format!(
            "Camera: ({:.2}, {:.2}, {:.2}) lock={:?} wide={}",
            cam_pos.x,
            cam_pos.y,
            cam_pos.z,
            state.lock_mode(),
            state.is_zoomed_out()
        );
        d.draw_text(&text, 10, 35, 10, Color::BLACK);
    }
    if let Some(music) = music.as_deref() {
        let text = format!("Music '{}': volume {:.2}", music.id, music.volume());
        d.draw_text(&text, 10, 50, 10, Color::BLACK);
    }
    d.draw_fps(10, 70);
}
