//! Step-wise linear ramps of a single scalar.
//!
//! A [`Ramp`] lives on its own entity and is advanced by
//! [`ramp_system`](crate::systems::ramp::ramp_system). Each step writes one
//! value to its [`RampTarget`] and then waits [`Ramp::interval`] seconds
//! before the next one. At most one step is applied per frame, so a ramp whose
//! interval is shorter than the frame time advances once per frame. Time
//! overshooting a step counts towards the next one, so a ramp whose interval
//! is not a multiple of the frame time still takes `steps * interval` seconds.
//!
//! Values are computed from the step index rather than accumulated, and the
//! last step always writes [`Ramp::to`] exactly.

use bevy_ecs::prelude::{Component, Entity};

/// Which controller slot a ramp occupies.
///
/// Launching a ramp of a kind that already has one in flight either replaces
/// it or runs alongside it, depending on the
/// [`RampPolicy`](crate::resources::controllerconfig::RampPolicy).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RampKind {
    Zoom,
    Fade,
}

/// Field a ramp writes on every step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RampTarget {
    /// Depth (`z`) of the given camera entity's world position.
    CameraDepth(Entity),
    /// Volume of the [`MusicTrack`](crate::resources::music::MusicTrack).
    MusicVolume,
}

/// Typed handle to an in-flight ramp.
///
/// The ramp entity is despawned when it completes or is cancelled, so a
/// handle may outlive its ramp.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RampHandle(pub Entity);

impl RampHandle {
    pub fn entity(&self) -> Entity {
        self.0
    }
}

#[derive(Component, Clone, Debug)]
pub struct Ramp {
    pub kind: RampKind,
    pub target: RampTarget,
    /// First value written.
    pub from: f32,
    /// Last value written.
    pub to: f32,
    /// Signed distance between consecutive values.
    pub increment: f32,
    /// Total number of values written, both ends included.
    pub steps: u32,
    /// Index of the next value to write.
    pub index: u32,
    /// Seconds to wait after each step.
    pub interval: f32,
    /// Seconds left before the next step.
    pub wait: f32,
    /// Multiplier applied to every value before it is written.
    pub scale: f32,
}

impl Ramp {
    /// Ramp from `from` to `to` in steps of `increment` (sign is ignored).
    ///
    /// The first step runs on the first frame after launch.
    pub fn new(kind: RampKind, target: RampTarget, from: f32, to: f32, increment: f32) -> Self {
        let distance = to - from;
        let magnitude = increment.abs();
        let steps = if magnitude <= f32::EPSILON {
            1
        } else {
            (distance.abs() / magnitude).round() as u32 + 1
        };
        Ramp {
            kind,
            target,
            from,
            to,
            increment: magnitude.copysign(distance),
            steps,
            index: 0,
            interval: 0.0,
            wait: 0.0,
            scale: 1.0,
        }
    }

    pub fn with_interval(mut self, interval: f32) -> Self {
        self.interval = interval.max(0.0);
        self
    }

    /// Hold the first step back by `delay` seconds.
    pub fn with_delay(mut self, delay: f32) -> Self {
        self.wait = delay.max(0.0);
        self
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    /// Unscaled value written at step `index`.
    pub fn value_at(&self, index: u32) -> f32 {
        if index + 1 >= self.steps {
            self.to
        } else {
            self.from + self.increment * index as f32
        }
    }

    pub fn is_finished(&self) -> bool {
        self.index >= self.steps
    }

    /// Advance the ramp clock by `dt` seconds.
    ///
    /// Returns the scaled value to write when a step fires this frame.
    pub fn tick(&mut self, dt: f32) -> Option<f32> {
        if self.is_finished() {
            return None;
        }
        self.wait -= dt;
        if self.wait > 0.0 {
            return None;
        }
        let value = self.value_at(self.index) * self.scale;
        self.index += 1;
        // Keep the overshoot so steps stay on the interval grid.
        self.wait += self.interval;
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-5;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    fn zoom_ramp(from: f32, to: f32) -> Ramp {
        Ramp::new(
            RampKind::Zoom,
            RampTarget::MusicVolume,
            from,
            to,
            0.1,
        )
    }

    #[test]
    fn test_step_count_includes_both_ends() {
        assert_eq!(zoom_ramp(-15.0, -10.0).steps, 51);
        assert_eq!(zoom_ramp(-10.0, -15.0).steps, 51);
        let fade = Ramp::new(RampKind::Fade, RampTarget::MusicVolume, 1.0, 0.3, 0.02);
        assert_eq!(fade.steps, 36);
    }

    #[test]
    fn test_increment_sign_follows_direction() {
        assert!(zoom_ramp(-15.0, -10.0).increment > 0.0);
        assert!(zoom_ramp(-10.0, -15.0).increment < 0.0);
        let fade = Ramp::new(RampKind::Fade, RampTarget::MusicVolume, 1.0, 0.3, 0.02);
        assert!(approx_eq(fade.increment, -0.02));
    }

    #[test]
    fn test_last_value_is_exact_end() {
        let ramp = zoom_ramp(-15.0, -10.0);
        assert_eq!(ramp.value_at(ramp.steps - 1), -10.0);
        assert!(approx_eq(ramp.value_at(0), -15.0));
        assert!(approx_eq(ramp.value_at(10), -14.0));
    }

    #[test]
    fn test_first_step_fires_immediately_without_delay() {
        let mut ramp = zoom_ramp(-15.0, -10.0).with_interval(0.01);
        let first = ramp.tick(0.0).unwrap();
        assert!(approx_eq(first, -15.0));
        assert_eq!(ramp.index, 1);
    }

    #[test]
    fn test_delay_holds_first_step() {
        let mut ramp = Ramp::new(RampKind::Fade, RampTarget::MusicVolume, 1.0, 0.3, 0.02)
            .with_interval(0.1)
            .with_delay(1.0);
        assert!(ramp.tick(0.5).is_none());
        assert!(ramp.tick(0.4).is_none());
        assert!(ramp.tick(0.2).is_some());
    }

    #[test]
    fn test_one_step_per_tick_even_with_large_dt() {
        let mut ramp = zoom_ramp(-15.0, -10.0).with_interval(0.01);
        ramp.tick(1.0);
        ramp.tick(1.0);
        assert_eq!(ramp.index, 2);
    }

    #[test]
    fn test_overshoot_carries_to_next_step() {
        // 0.1 s steps at 60 fps: 36 steps span 3.5 s after the first one.
        let mut ramp = Ramp::new(RampKind::Fade, RampTarget::MusicVolume, 0.3, 1.0, 0.02)
            .with_interval(0.1);
        let mut frames = 0;
        while !ramp.is_finished() {
            ramp.tick(1.0 / 60.0);
            frames += 1;
        }
        assert_eq!(ramp.steps, 36);
        assert!(frames <= 212, "took {} frames", frames);
    }

    #[test]
    fn test_scale_applies_to_written_value() {
        let mut ramp =
            Ramp::new(RampKind::Fade, RampTarget::MusicVolume, 1.0, 0.3, 0.02).with_scale(0.5);
        assert!(approx_eq(ramp.tick(0.0).unwrap(), 0.5));
    }

    #[test]
    fn test_finished_ramp_writes_nothing() {
        let mut ramp = zoom_ramp(-15.0, -10.0);
        let mut last = None;
        while !ramp.is_finished() {
            last = ramp.tick(0.016).or(last);
        }
        assert_eq!(last, Some(-10.0));
        assert!(ramp.tick(0.016).is_none());
    }

    #[test]
    fn test_zero_increment_is_a_single_step() {
        let mut ramp = Ramp::new(RampKind::Zoom, RampTarget::MusicVolume, 2.0, 4.0, 0.0);
        assert_eq!(ramp.steps, 1);
        assert_eq!(ramp.tick(0.0), Some(4.0));
        assert!(ramp.is_finished());
    }
}
