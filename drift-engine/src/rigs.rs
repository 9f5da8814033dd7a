//! Composed motion rigs that implement the [`Animator`](crate::driver::Animator) trait.
//!
//! A rig wanders a target pose with fbm noise and follows it with smoothing:
//! - position: three noise axes around `origin`, followed by a critically damped spring,
//! - rotation: three noise axes as Euler angles, followed by an exponential blend.
//!
//! Rigs are plain structs built from a [`RigConfig`], which loads from JSON
//! (every field optional, missing ones take the defaults below).

use drift_core::math::{Quat, Vec3};
use drift_core::noise::NoiseParams;
use drift_core::spring::SpringParams;
use drift_core::tween::ExpParams;
use serde::{Deserialize, Serialize};

use crate::driver::Animator;
use crate::error::{EngineError, EngineResult};
use crate::nodes::{CdsTween, ExpRotation, NoiseRotation, NoiseVector};

/// Upper bound on fbm octaves; past this the layers are below f32 resolution.
pub const MAX_OCTAVES: u32 = 16;

/// Full description of a [`Rig`].
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RigConfig {
    /// Rest position the noise wanders around.
    pub origin: Vec3,
    pub position_noise: NoiseParams<Vec3>,
    /// Amplitudes here are angles in degrees.
    pub rotation_noise: NoiseParams<Vec3>,
    pub position_spring: SpringParams,
    pub rotation_smoothing: ExpParams,
}

impl Default for RigConfig {
    fn default() -> Self {
        Self {
            origin: Vec3::ZERO,
            position_noise: NoiseParams {
                frequency: 0.5,
                octaves: 3,
                amplitude: Vec3::new(1.0, 0.5, 1.0),
                seed: 1,
            },
            rotation_noise: NoiseParams {
                frequency: 0.3,
                octaves: 2,
                amplitude: Vec3::splat(20.0),
                seed: 2,
            },
            position_spring: SpringParams::default(),
            rotation_smoothing: ExpParams::default(),
        }
    }
}

fn check_rate(what: &str, v: f32) -> EngineResult<()> {
    if v.is_finite() && v >= 0.0 {
        Ok(())
    } else {
        Err(EngineError::Config(format!("{what} must be finite and >= 0, got {v}")))
    }
}

fn check_noise(what: &str, p: &NoiseParams<Vec3>) -> EngineResult<()> {
    check_rate(&format!("{what}.frequency"), p.frequency)?;
    if p.octaves > MAX_OCTAVES {
        return Err(EngineError::Config(format!(
            "{what}.octaves must be <= {MAX_OCTAVES}, got {}",
            p.octaves
        )));
    }
    if !p.amplitude.is_finite() {
        return Err(EngineError::Config(format!("{what}.amplitude must be finite")));
    }
    Ok(())
}

impl RigConfig {
    /// Reject configurations the nodes would otherwise silently clamp.
    pub fn validate(&self) -> EngineResult<()> {
        if !self.origin.is_finite() {
            return Err(EngineError::Config("origin must be finite".into()));
        }
        check_noise("position_noise", &self.position_noise)?;
        check_noise("rotation_noise", &self.rotation_noise)?;
        check_rate("position_spring.speed", self.position_spring.speed)?;
        check_rate("rotation_smoothing.speed", self.rotation_smoothing.speed)?;
        Ok(())
    }

    /// Same config with both noise seeds derived from `seed`.
    pub fn with_seed(mut self, seed: u32) -> Self {
        self.position_noise.seed = seed;
        self.rotation_noise.seed = seed.wrapping_add(1);
        self
    }
}

/// One frame of rig output.
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct Pose {
    pub position: Vec3,
    pub rotation: Quat,
}

impl Default for Pose {
    fn default() -> Self {
        Self { position: Vec3::ZERO, rotation: Quat::IDENTITY }
    }
}

/// Noise-driven pose with spring/exp follow.
#[derive(Copy, Clone, Debug)]
pub struct Rig {
    config: RigConfig,
    position_noise: NoiseVector,
    rotation_noise: NoiseRotation,
    position: CdsTween<Vec3>,
    rotation: ExpRotation,
}

impl Rig {
    /// Build a rig; fails if `config` does not validate.
    pub fn new(config: RigConfig) -> EngineResult<Self> {
        config.validate()?;
        let mut rig = Self {
            config,
            position_noise: NoiseVector::new(config.position_noise),
            rotation_noise: NoiseRotation::new(config.rotation_noise),
            position: CdsTween::new(config.position_spring),
            rotation: ExpRotation::new(config.rotation_smoothing),
        };
        rig.rest();
        Ok(rig)
    }

    #[inline] pub fn config(&self) -> &RigConfig { &self.config }

    /// Current smoothed pose without advancing.
    #[inline]
    pub fn pose(&self) -> Pose {
        Pose {
            position: self.position.value().unwrap_or(self.config.origin),
            rotation: self.rotation.value().unwrap_or(Quat::IDENTITY),
        }
    }

    // Runtime tweaks. Setters clamp like the nodes do.
    #[inline] pub fn set_position_speed(&mut self, speed: f32) { self.position.set_speed(speed); }
    #[inline] pub fn set_rotation_speed(&mut self, speed: f32) { self.rotation.set_speed(speed); }
    #[inline] pub fn set_origin(&mut self, origin: Vec3) { self.config.origin = origin; }

    /// Move both noise fields to a new seed; smoothing state is kept so the
    /// pose glides to the new path.
    pub fn reseed(&mut self, seed: u32) {
        self.config = self.config.with_seed(seed);
        self.position_noise.set_seed(self.config.position_noise.seed);
        self.rotation_noise.set_seed(self.config.rotation_noise.seed);
    }

    fn rest(&mut self) {
        self.position_noise.reset();
        self.rotation_noise.reset();
        self.position.reset(self.config.origin);
        self.rotation.reset(Quat::IDENTITY);
    }
}

impl Animator for Rig {
    type Output = Pose;

    fn reset(&mut self) {
        log::debug!("rig reset to origin {:?}", self.config.origin);
        self.rest();
    }

    #[inline]
    fn tick(&mut self, dt: f32) -> Pose {
        let target_position = self.config.origin + self.position_noise.tick(dt);
        let target_rotation = self.rotation_noise.tick(dt);
        Pose {
            position: self.position.follow(target_position, dt),
            rotation: self.rotation.follow(target_rotation, dt),
        }
    }
}
