//! Frame tick integration tests: the full per-frame pipeline run headless
//! over the built-in levels, plus the follow and autorun systems on their own.

use bevy_ecs::prelude::*;
use raylib::prelude::Vector2;

use pegcam::components::follow::Follow;
use pegcam::components::player::Player;
use pegcam::components::worldposition::WorldPosition;
use pegcam::game::{init_camera_controller, load_level, register_observers};
use pegcam::resources::audio::setup_audio_messages;
use pegcam::resources::camerastate::LockMode;
use pegcam::resources::controller::CameraController;
use pegcam::resources::controllerconfig::ControllerConfig;
use pegcam::resources::levelstore::{ActiveLevel, LevelStore, LevelTransition};
use pegcam::resources::music::MusicTrack;
use pegcam::resources::worldtime::WorldTime;
use pegcam::systems::audio::{
    forward_audio_cmds, music_status_system, poll_audio_messages, sync_music_volume,
    update_bevy_audio_cmds, update_bevy_audio_messages,
};
use pegcam::systems::camera::camera_lock_system;
use pegcam::systems::follow::follow_system;
use pegcam::systems::level::{level_end_system, level_transition_system};
use pegcam::systems::pegtrigger::peg_trigger_system;
use pegcam::systems::player::player_autorun_system;
use pegcam::systems::ramp::ramp_system;
use pegcam::systems::time::update_world_time;

const EPSILON: f32 = 1e-4;
const DT: f32 = 1.0 / 60.0;

fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn make_world(delta: f32) -> World {
    let mut world = World::new();
    world.insert_resource(WorldTime {
        elapsed: 0.0,
        delta,
        time_scale: 1.0,
        frame_count: 0,
    });
    world
}

fn pipeline() -> Schedule {
    let mut schedule = Schedule::default();
    schedule.add_systems(
        (
            player_autorun_system,
            peg_trigger_system,
            ramp_system,
            follow_system,
            camera_lock_system,
        )
            .chain(),
    );
    schedule.add_systems(level_end_system.after(player_autorun_system));
    schedule.add_systems(
        (
            sync_music_volume,
            update_bevy_audio_cmds,
            forward_audio_cmds,
            poll_audio_messages,
            update_bevy_audio_messages,
            music_status_system,
        )
            .chain()
            .after(ramp_system),
    );
    schedule.add_systems(
        level_transition_system
            .after(level_end_system)
            .after(camera_lock_system)
            .after(music_status_system),
    );
    schedule
}

fn make_demo_world() -> World {
    make_demo_world_with(ControllerConfig::new())
}

fn make_demo_world_with(config: ControllerConfig) -> World {
    let mut world = make_world(0.0);
    world.insert_resource(config);
    world.insert_resource(LevelStore::builtin().unwrap());
    world.insert_resource(LevelTransition::default());
    setup_audio_messages(&mut world);
    register_observers(&mut world);
    assert!(init_camera_controller(&mut world));
    load_level(&mut world, 1).unwrap();
    world
}

fn run_frames(world: &mut World, schedule: &mut Schedule, frames: usize) {
    for _ in 0..frames {
        update_world_time(world, DT);
        schedule.run(world);
        world.clear_trackers();
    }
}

fn camera_pos(world: &World) -> WorldPosition {
    let camera = world.resource::<CameraController>().camera();
    *world.get::<WorldPosition>(camera).unwrap()
}

fn player_pos(world: &World) -> WorldPosition {
    let player = world.resource::<CameraController>().player().unwrap();
    *world.get::<WorldPosition>(player).unwrap()
}

#[test]
fn camera_follows_player_before_first_peg() {
    let mut world = make_demo_world();
    let mut schedule = pipeline();

    run_frames(&mut world, &mut schedule, 60);

    let camera = camera_pos(&world);
    let player = player_pos(&world);
    assert!(player.pos.x > 2.9 && player.pos.x < 3.1);
    assert_eq!(camera.pos.x, player.pos.x);
    assert_eq!(camera.pos.y, player.pos.y);
    assert!(approx_eq(camera.pos.z, -10.0));
}

#[test]
fn first_peg_zooms_out_and_pins_x() {
    let mut world = make_demo_world();
    let mut schedule = pipeline();

    // 5 seconds in, the player is past the first peg at x = 10.
    run_frames(&mut world, &mut schedule, 300);

    let state = world.resource::<CameraController>().state().clone();
    assert_eq!(state.lock_mode(), LockMode::Horizontal);
    assert!(state.is_zoomed_out());
    let camera = camera_pos(&world);
    assert!(approx_eq(camera.pos.x, 12.0));
    assert!(approx_eq(camera.pos.z, -15.0));
    assert!(player_pos(&world).pos.x > 12.0);
}

#[test]
fn music_settles_at_fade_floor() {
    let mut world = make_demo_world();
    let mut schedule = pipeline();

    run_frames(&mut world, &mut schedule, 400);

    assert!(approx_eq(world.resource::<MusicTrack>().volume(), 0.3));
}

#[test]
fn vertical_peg_zooms_back_in() {
    let mut world = make_demo_world();
    let mut schedule = pipeline();

    // 15 seconds in: past the VLock peg at x = 35, before the last peg.
    run_frames(&mut world, &mut schedule, 900);

    let state = world.resource::<CameraController>().state().clone();
    assert_eq!(state.lock_mode(), LockMode::Vertical);
    assert!(!state.is_zoomed_out());
    let camera = camera_pos(&world);
    assert_eq!(camera.pos.x, player_pos(&world).pos.x);
    assert!(approx_eq(camera.pos.y, 1.5));
    assert!(approx_eq(camera.pos.z, -10.0));
}

#[test]
fn finishing_a_level_loads_the_next_one() {
    let mut world = make_demo_world();
    let mut schedule = pipeline();
    let camera = world.resource::<CameraController>().camera();

    // End line at x = 60 is crossed after 20 s, then a 4 s pause.
    run_frames(&mut world, &mut schedule, 1500);

    assert_eq!(*world.resource::<ActiveLevel>(), ActiveLevel(2));
    assert_eq!(world.resource::<CameraController>().camera(), camera);
    let player = world.resource::<CameraController>().player().unwrap();
    assert!(world.get::<Player>(player).is_some());
    assert_eq!(world.get::<Follow>(camera).unwrap().target, Some(player));
    assert!(player_pos(&world).pos.x < 60.0);
}

#[test]
fn music_is_back_at_full_volume_when_next_level_loads() {
    let mut config = ControllerConfig::new();
    config.music_volume = 0.8;
    let mut world = make_demo_world_with(config);
    let mut schedule = pipeline();

    let mut frames = 0;
    while *world.resource::<ActiveLevel>() == ActiveLevel(1) {
        run_frames(&mut world, &mut schedule, 1);
        frames += 1;
        assert!(frames < 2000, "level 2 never loaded");
    }
    assert!(approx_eq(world.resource::<MusicTrack>().volume(), 0.8));

    // The fade-out restarted by the load settles at the floor again.
    run_frames(&mut world, &mut schedule, 400);
    assert!(approx_eq(world.resource::<MusicTrack>().volume(), 0.8 * 0.3));
}

#[test]
fn follow_respects_axes_and_offset() {
    let mut world = make_world(DT);
    let target = world.spawn(WorldPosition::new(5.0, 7.0, 0.0)).id();
    let follower = world
        .spawn((
            Follow {
                follow_y: false,
                ..Follow::new(Some(target)).with_offset(Vector2 { x: 1.0, y: 1.0 })
            },
            WorldPosition::new(0.0, 0.0, -10.0),
        ))
        .id();
    let orphan = world
        .spawn((Follow::new(None), WorldPosition::new(3.0, 3.0, -10.0)))
        .id();

    let mut schedule = Schedule::default();
    schedule.add_systems(follow_system);
    schedule.run(&mut world);

    let pos = world.get::<WorldPosition>(follower).unwrap().pos;
    assert_eq!((pos.x, pos.y, pos.z), (6.0, 0.0, -10.0));
    let pos = world.get::<WorldPosition>(orphan).unwrap().pos;
    assert_eq!((pos.x, pos.y), (3.0, 3.0));
}

#[test]
fn autorun_moves_players_by_speed() {
    let mut world = make_world(0.5);
    let runner = world
        .spawn((Player::new(4.0), WorldPosition::new(1.0, 2.0, 0.0)))
        .id();

    let mut schedule = Schedule::default();
    schedule.add_systems(player_autorun_system);
    schedule.run(&mut world);

    let pos = world.get::<WorldPosition>(runner).unwrap().pos;
    assert!(approx_eq(pos.x, 3.0));
    assert!(approx_eq(pos.y, 2.0));
}
