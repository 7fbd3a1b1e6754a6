//! Controller configuration resource.
//!
//! Holds the window settings of the demo and every constant the camera
//! controller ramps use, with defaults matching the classic behaviour. Values
//! can be overridden from an INI file.
//!
//! # Configuration File Format
//!
//! ```ini
//! [window]
//! width = 1280
//! height = 720
//! target_fps = 120
//!
//! [zoom]
//! standard_depth = -10.0
//! wide_depth = -15.0
//! step = 0.1
//! interval = 0.01
//!
//! [music]
//! path = assets/music/level.ogg
//! volume = 1.0
//! looped = true
//! fade_delay = 1.0
//! fade_floor = 0.3
//! fade_step = 0.02
//! fade_interval = 0.1
//!
//! [ramps]
//! policy = replace
//!
//! [levels]
//! dir = assets/levels
//! transition_pause = 4.0
//! ```

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::info;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Default safe values for startup
const DEFAULT_WINDOW_WIDTH: u32 = 1280;
const DEFAULT_WINDOW_HEIGHT: u32 = 720;
const DEFAULT_TARGET_FPS: u32 = 120;
const DEFAULT_STANDARD_DEPTH: f32 = -10.0;
const DEFAULT_WIDE_DEPTH: f32 = -15.0;
const DEFAULT_ZOOM_STEP: f32 = 0.1;
const DEFAULT_ZOOM_INTERVAL: f32 = 0.01;
const DEFAULT_MUSIC_PATH: &str = "./assets/music/level.ogg";
const DEFAULT_MUSIC_VOLUME: f32 = 1.0;
const DEFAULT_MUSIC_LOOPED: bool = true;
const DEFAULT_FADE_DELAY: f32 = 1.0;
const DEFAULT_FADE_FLOOR: f32 = 0.3;
const DEFAULT_FADE_STEP: f32 = 0.02;
const DEFAULT_FADE_INTERVAL: f32 = 0.1;
const DEFAULT_LEVELS_DIR: &str = "./assets/levels";
const DEFAULT_TRANSITION_PAUSE: f32 = 4.0;
const DEFAULT_CONFIG_PATH: &str = "./config.ini";

/// What happens when a ramp is launched while another of the same kind runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RampPolicy {
    /// Cancel the in-flight ramp and start the new one.
    #[default]
    Replace,
    /// Let both run; the last writer on the shared field wins each frame.
    Parallel,
}

impl FromStr for RampPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "replace" => Ok(RampPolicy::Replace),
            "parallel" => Ok(RampPolicy::Parallel),
            other => Err(format!(
                "Unknown ramp policy '{}', expected 'replace' or 'parallel'",
                other
            )),
        }
    }
}

impl fmt::Display for RampPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RampPolicy::Replace => write!(f, "replace"),
            RampPolicy::Parallel => write!(f, "parallel"),
        }
    }
}

/// Controller configuration resource.
#[derive(Resource, Debug, Clone)]
pub struct ControllerConfig {
    /// Window width in pixels.
    pub window_width: u32,
    /// Window height in pixels.
    pub window_height: u32,
    /// Target frames per second.
    pub target_fps: u32,
    /// Camera depth of the "Standard" zoom.
    pub standard_depth: f32,
    /// Camera depth of the "Wide" zoom.
    pub wide_depth: f32,
    /// Depth change per zoom ramp step.
    pub zoom_step: f32,
    /// Seconds between zoom ramp steps.
    pub zoom_interval: f32,
    /// Music file played by the controller.
    pub music_path: String,
    /// Volume the music starts at.
    pub music_volume: f32,
    /// Whether the music restarts when it ends.
    pub music_looped: bool,
    /// Seconds the fade-out waits before its first step.
    pub fade_delay: f32,
    /// Fraction of full volume the fade-out ends at and the fade-in starts at.
    pub fade_floor: f32,
    /// Multiplier change per fade ramp step.
    pub fade_step: f32,
    /// Seconds between fade ramp steps.
    pub fade_interval: f32,
    /// How concurrent ramps of the same kind interact.
    pub ramp_policy: RampPolicy,
    /// Directory holding level JSON files.
    pub levels_dir: PathBuf,
    /// Seconds between reaching a level end and loading the next level.
    pub transition_pause: f32,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl ControllerConfig {
    /// Create a new configuration with safe default values.
    pub fn new() -> Self {
        Self {
            window_width: DEFAULT_WINDOW_WIDTH,
            window_height: DEFAULT_WINDOW_HEIGHT,
            target_fps: DEFAULT_TARGET_FPS,
            standard_depth: DEFAULT_STANDARD_DEPTH,
            wide_depth: DEFAULT_WIDE_DEPTH,
            zoom_step: DEFAULT_ZOOM_STEP,
            zoom_interval: DEFAULT_ZOOM_INTERVAL,
            music_path: DEFAULT_MUSIC_PATH.to_string(),
            music_volume: DEFAULT_MUSIC_VOLUME,
            music_looped: DEFAULT_MUSIC_LOOPED,
            fade_delay: DEFAULT_FADE_DELAY,
            fade_floor: DEFAULT_FADE_FLOOR,
            fade_step: DEFAULT_FADE_STEP,
            fade_interval: DEFAULT_FADE_INTERVAL,
            ramp_policy: RampPolicy::default(),
            levels_dir: PathBuf::from(DEFAULT_LEVELS_DIR),
            transition_pause: DEFAULT_TRANSITION_PAUSE,
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a new configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current (default) values.
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(&mut self) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| format!("Failed to load config file: {}", e))?;
        self.apply_ini(&config)?;

        info!(
            "Loaded config: {}x{} window, fps={}, zoom {}..{}, fade floor={}, ramps={}",
            self.window_width,
            self.window_height,
            self.target_fps,
            self.standard_depth,
            self.wide_depth,
            self.fade_floor,
            self.ramp_policy
        );

        Ok(())
    }

    /// Load configuration from INI text instead of a file.
    pub fn load_from_str(&mut self, text: &str) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .read(text.to_string())
            .map_err(|e| format!("Failed to parse config: {}", e))?;
        self.apply_ini(&config)
    }

    /// Apply every key present in `config`, or nothing if any key is invalid.
    fn apply_ini(&mut self, config: &Ini) -> Result<(), String> {
        let mut next = self.clone();

        // [window] section
        if let Some(width) = get_uint(config, "window", "width")? {
            next.window_width = width as u32;
        }
        if let Some(height) = get_uint(config, "window", "height")? {
            next.window_height = height as u32;
        }
        if let Some(fps) = get_uint(config, "window", "target_fps")? {
            next.target_fps = fps as u32;
        }

        // [zoom] section
        if let Some(depth) = get_float(config, "zoom", "standard_depth")? {
            next.standard_depth = depth;
        }
        if let Some(depth) = get_float(config, "zoom", "wide_depth")? {
            next.wide_depth = depth;
        }
        if let Some(step) = get_float(config, "zoom", "step")? {
            next.zoom_step = step;
        }
        if let Some(interval) = get_float(config, "zoom", "interval")? {
            next.zoom_interval = interval;
        }

        // [music] section
        if let Some(path) = config.get("music", "path") {
            next.music_path = path;
        }
        if let Some(volume) = get_float(config, "music", "volume")? {
            next.music_volume = volume;
        }
        if let Some(looped) = config
            .getbool("music", "looped")
            .map_err(|e| format!("Invalid value for music.looped: {}", e))?
        {
            next.music_looped = looped;
        }
        if let Some(delay) = get_float(config, "music", "fade_delay")? {
            next.fade_delay = delay;
        }
        if let Some(floor) = get_float(config, "music", "fade_floor")? {
            if floor <= 0.0 {
                return Err(format!("music.fade_floor must be positive, got {}", floor));
            }
            next.fade_floor = floor;
        }
        if let Some(step) = get_float(config, "music", "fade_step")? {
            next.fade_step = step;
        }
        if let Some(interval) = get_float(config, "music", "fade_interval")? {
            next.fade_interval = interval;
        }

        // [ramps] section
        if let Some(policy) = config.get("ramps", "policy") {
            next.ramp_policy = policy.parse()?;
        }

        // [levels] section
        if let Some(dir) = config.get("levels", "dir") {
            next.levels_dir = PathBuf::from(dir);
        }
        if let Some(pause) = get_float(config, "levels", "transition_pause")? {
            next.transition_pause = pause;
        }

        *self = next;
        Ok(())
    }

    /// Save configuration to the INI file.
    ///
    /// Creates the file if it doesn't exist.
    pub fn save_to_file(&self) -> Result<(), String> {
        let mut config = Ini::new();

        config.set("window", "width", Some(self.window_width.to_string()));
        config.set("window", "height", Some(self.window_height.to_string()));
        config.set("window", "target_fps", Some(self.target_fps.to_string()));

        config.set("zoom", "standard_depth", Some(self.standard_depth.to_string()));
        config.set("zoom", "wide_depth", Some(self.wide_depth.to_string()));
        config.set("zoom", "step", Some(self.zoom_step.to_string()));
        config.set("zoom", "interval", Some(self.zoom_interval.to_string()));

        config.set("music", "path", Some(self.music_path.clone()));
        config.set("music", "volume", Some(self.music_volume.to_string()));
        config.set("music", "looped", Some(self.music_looped.to_string()));
        config.set("music", "fade_delay", Some(self.fade_delay.to_string()));
        config.set("music", "fade_floor", Some(self.fade_floor.to_string()));
        config.set("music", "fade_step", Some(self.fade_step.to_string()));
        config.set("music", "fade_interval", Some(self.fade_interval.to_string()));

        config.set("ramps", "policy", Some(self.ramp_policy.to_string()));

        config.set(
            "levels",
            "dir",
            Some(self.levels_dir.to_string_lossy().into_owned()),
        );
        config.set(
            "levels",
            "transition_pause",
            Some(self.transition_pause.to_string()),
        );

        config
            .write(&self.config_path)
            .map_err(|e| format!("Failed to save config file: {}", e))?;

        info!("Saved config to {:?}", self.config_path);

        Ok(())
    }

    /// Get the window size.
    pub fn window_size(&self) -> (u32, u32) {
        (self.window_width, self.window_height)
    }
}

fn get_float(config: &Ini, section: &str, key: &str) -> Result<Option<f32>, String> {
    config
        .getfloat(section, key)
        .map(|value| value.map(|v| v as f32))
        .map_err(|e| format!("Invalid value for {}.{}: {}", section, key, e))
}

fn get_uint(config: &Ini, section: &str, key: &str) -> Result<Option<u64>, String> {
    config
        .getuint(section, key)
        .map_err(|e| format!("Invalid value for {}.{}: {}", section, key, e))
}
