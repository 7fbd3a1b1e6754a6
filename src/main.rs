//! PegCam demo entry point.
//!
//! Runs the camera controller over a sequence of levels:
//! - **raylib** for windowing, drawing and audio
//! - **bevy_ecs** for the entity-component-system architecture
//!
//! # Main Loop
//!
//! 1. Load `config.ini` and the level layouts
//! 2. Open the window (unless `--headless`) and start the audio thread
//! 3. Register observers, create the camera controller, load the first level
//! 4. Each frame: advance time, move the player, fire pegs, step ramps,
//!    follow and clamp the camera, forward audio commands, draw
//! 5. Shut the controller and the audio thread down on exit
//!
//! # Running
//!
//! ```sh
//! cargo run --release
//! cargo run -- --headless --frames 1200 --ramp-policy parallel
//! ```

use bevy_ecs::prelude::*;
use clap::Parser;
use log::{info, warn};
use std::path::PathBuf;

use pegcam::game::{
    init_camera_controller, load_level, register_observers, shutdown_camera_controller,
};
use pegcam::resources::audio::{setup_audio, setup_audio_messages, shutdown_audio};
use pegcam::resources::controller::CameraController;
use pegcam::resources::controllerconfig::{ControllerConfig, RampPolicy};
use pegcam::resources::levelstore::{LevelStore, LevelTransition};
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
use pegcam::systems::render::render_system;
use pegcam::systems::time::update_world_time;

/// Frame delta used when running without a window.
const HEADLESS_DT: f32 = 1.0 / 60.0;

/// PegCam: peg-driven camera locks, zooms and music fades for 2D levels
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Configuration file to load.
    #[arg(long, value_name = "PATH", default_value = "./config.ini")]
    config: PathBuf,

    /// Directory of level JSON files (overrides the config file).
    #[arg(long, value_name = "DIR")]
    levels: Option<PathBuf>,

    /// Run without a window or audio device.
    #[arg(long)]
    headless: bool,

    /// Number of frames to simulate in headless mode.
    #[arg(long, value_name = "N", default_value_t = 1200)]
    frames: u64,

    /// How overlapping ramps interact: replace or parallel.
    #[arg(long, value_name = "POLICY")]
    ramp_policy: Option<RampPolicy>,

    /// Write the effective configuration and exit.
    /// Optionally provide a path (default: the --config path).
    #[arg(long, value_name = "PATH")]
    write_config: Option<Option<PathBuf>>,
}

fn build_update_schedule() -> Schedule {
    let mut update = Schedule::default();
    update.add_systems(
        (
            player_autorun_system,
            peg_trigger_system,
            ramp_system,
            follow_system,
            camera_lock_system,
        )
            .chain(),
    );
    update.add_systems(level_end_system.after(player_autorun_system));
    update.add_systems(
        // audio systems must be together
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
    // Level switches despawn the player, so they go last.
    update.add_systems(
        level_transition_system
            .after(level_end_system)
            .after(camera_lock_system)
            .after(music_status_system),
    );
    update
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = ControllerConfig::with_path(&cli.config);
    if let Err(e) = config.load_from_file() {
        warn!("{}; using defaults", e);
    }
    if let Some(policy) = cli.ramp_policy {
        config.ramp_policy = policy;
    }
    if let Some(levels) = cli.levels {
        config.levels_dir = levels;
    }

    // Early-exit: write the configuration and quit (no window/audio needed)
    if let Some(maybe_path) = cli.write_config {
        if let Some(path) = maybe_path {
            config.config_path = path;
        }
        if let Err(e) = config.save_to_file() {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
        println!("Configuration written to {}", config.config_path.display());
        return;
    }

    let store = LevelStore::load_dir(&config.levels_dir).unwrap_or_else(|e| {
        warn!("{}; using built-in levels", e);
        LevelStore::builtin().expect("Built-in levels must parse")
    });
    let Some(first_level) = store.first() else {
        eprintln!("Error: no levels available");
        std::process::exit(1);
    };

    info!("Hello, world! This is PegCam!");
    // --------------- ECS world + resources ---------------
    let mut world = World::new();
    world.insert_resource(WorldTime::default().with_time_scale(1.0));
    world.insert_resource(store);
    world.insert_resource(LevelTransition::default());

    let mut render = None;
    if cli.headless {
        setup_audio_messages(&mut world);
    } else {
        let (width, height) = config.window_size();
        let (mut rl, thread) = raylib::init()
            .size(width as i32, height as i32)
            .resizable()
            .title("PegCam")
            .build();
        rl.set_target_fps(config.target_fps);
        world.insert_non_send_resource(rl);
        world.insert_non_send_resource(thread);

        let mut schedule = Schedule::default();
        schedule.add_systems(render_system);
        render = Some(schedule);

        // Init audio
        setup_audio(&mut world);
    }
    world.insert_resource(config);

    register_observers(&mut world);
    init_camera_controller(&mut world);
    if let Err(e) = load_level(&mut world, first_level) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    let mut update = build_update_schedule();
    update
        .initialize(&mut world)
        .expect("Failed to initialize schedule");

    // --------------- Main loop ---------------
    match render.as_mut() {
        Some(render) => {
            while !world
                .non_send_resource::<raylib::RaylibHandle>()
                .window_should_close()
            {
                let dt = world
                    .non_send_resource::<raylib::RaylibHandle>()
                    .get_frame_time();
                update_world_time(&mut world, dt);
                update.run(&mut world);
                render.run(&mut world);
                world.clear_trackers();
            }
        }
        None => {
            for _ in 0..cli.frames {
                update_world_time(&mut world, HEADLESS_DT);
                update.run(&mut world);
                world.clear_trackers();
            }
            if let Some(controller) = world.get_resource::<CameraController>() {
                let state = controller.state();
                info!(
                    "After {} frames: lock={:?} x={} y={} wide={}",
                    cli.frames,
                    state.lock_mode(),
                    state.lock_x(),
                    state.lock_y(),
                    state.is_zoomed_out()
                );
            }
        }
    }

    shutdown_camera_controller(&mut world);
    // Flush the stop/unload commands before the audio thread goes away.
    let mut flush = Schedule::default();
    flush.add_systems((update_bevy_audio_cmds, forward_audio_cmds).chain());
    flush.run(&mut world);
    shutdown_audio(&mut world);
}
