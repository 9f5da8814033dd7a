//! Building blocks (nodes) for drift rigs.
//!
//! Each node owns exactly one core state record plus its parameters, so a host
//! keeps one node per smoothed/noised quantity and drops it with the quantity.
//! Everything here is `Copy` or small and cheap to move; no locks, no heap.
//!
//! Contents:
//! - `CdsTween<T>`, `CdsRotation` : critically damped spring followers
//! - `ExpTween<T>`, `ExpRotation` : exponential followers
//! - `NoiseSource`, `NoiseVector`, `NoiseRotation` : fbm sources
//!
//! Notes:
//! - Spring/exp nodes expose `step(current, target, dt)` for hosts that supply
//!   `current` themselves, and `follow(target, dt)` which feeds back the node's
//!   own previous output. The spring state is created on the first step with
//!   value = `current`; `follow` on a fresh node starts at rest on the target.
//! - Setters clamp parameters into their valid domain.

use drift_core::math::{quat_to_raw, raw_to_unit, Quat, Smoothable, Vec3};
use drift_core::noise::{
    noise_step, noise_step_rotation, noise_step_vector, CoherentNoise, NoiseParams, NoiseState,
    Simplex2, MAX_OCTAVES,
};
use drift_core::spring::{
    spring_step, spring_step_rotation, RotationSpringState, SpringParams, SpringState,
};
use drift_core::tween::{exp_step, exp_step_rotation, ExpParams};

use crate::driver::Animator;

#[inline]
fn non_negative(x: f32) -> f32 {
    if x.is_finite() { x.max(0.0) } else { 0.0 }
}

// -------------------------------- Spring followers -------------------------------

/// Critically damped spring follower for scalars and vectors.
#[derive(Copy, Clone, Debug)]
pub struct CdsTween<T> {
    params: SpringParams,
    state: Option<SpringState<T>>,
}

impl<T: Smoothable> CdsTween<T> {
    #[inline]
    pub fn new(params: SpringParams) -> Self {
        Self { params: SpringParams { speed: non_negative(params.speed) }, state: None }
    }

    #[inline] pub fn set_speed(&mut self, speed: f32) { self.params.speed = non_negative(speed); }
    #[inline] pub fn params(&self) -> SpringParams { self.params }

    /// Step from an explicit `current` value.
    #[inline]
    pub fn step(&mut self, current: T, target: T, dt: f32) -> T {
        let state = self.state.get_or_insert_with(|| SpringState::new(current));
        spring_step(state, current, target, self.params.speed, dt)
    }

    /// Step from the previous output.
    #[inline]
    pub fn follow(&mut self, target: T, dt: f32) -> T {
        let current = self.value().unwrap_or(target);
        self.step(current, target, dt)
    }

    #[inline] pub fn value(&self) -> Option<T> { self.state.map(|s| s.value) }
    #[inline] pub fn velocity(&self) -> Option<T> { self.state.map(|s| s.velocity) }

    /// Put the spring at rest on `value`.
    #[inline]
    pub fn reset(&mut self, value: T) {
        log::debug!("spring follower reset");
        self.state = Some(SpringState::new(value));
    }

    /// Drop the state; the next step starts fresh.
    #[inline] pub fn clear(&mut self) { self.state = None; }
}

impl<T: Smoothable> Default for CdsTween<T> {
    fn default() -> Self {
        Self::new(SpringParams::default())
    }
}

/// Critically damped spring follower for rotations.
#[derive(Copy, Clone, Debug, Default)]
pub struct CdsRotation {
    params: SpringParams,
    state: Option<RotationSpringState>,
}

impl CdsRotation {
    #[inline]
    pub fn new(params: SpringParams) -> Self {
        Self { params: SpringParams { speed: non_negative(params.speed) }, state: None }
    }

    #[inline] pub fn set_speed(&mut self, speed: f32) { self.params.speed = non_negative(speed); }

    #[inline]
    pub fn step(&mut self, current: Quat, target: Quat, dt: f32) -> Quat {
        let state = self.state.get_or_insert_with(|| RotationSpringState::new(current));
        spring_step_rotation(state, current, target, self.params.speed, dt)
    }

    #[inline]
    pub fn follow(&mut self, target: Quat, dt: f32) -> Quat {
        let current = self.value().unwrap_or(target);
        self.step(current, target, dt)
    }

    #[inline] pub fn value(&self) -> Option<Quat> { self.state.map(|s| s.value) }

    #[inline]
    pub fn reset(&mut self, value: Quat) {
        log::debug!("rotation spring reset to {value:?}");
        self.state = Some(RotationSpringState::new(value));
    }

    #[inline] pub fn clear(&mut self) { self.state = None; }
}

// ----------------------------- Exponential followers -----------------------------

/// Exponential follower for scalars and vectors.
#[derive(Copy, Clone, Debug)]
pub struct ExpTween<T> {
    params: ExpParams,
    last: Option<T>,
}

impl<T: Smoothable> ExpTween<T> {
    #[inline]
    pub fn new(params: ExpParams) -> Self {
        Self { params: ExpParams { speed: non_negative(params.speed) }, last: None }
    }

    #[inline] pub fn set_speed(&mut self, speed: f32) { self.params.speed = non_negative(speed); }

    #[inline]
    pub fn step(&mut self, current: T, target: T, dt: f32) -> T {
        let v = exp_step(current, target, self.params.speed, dt);
        self.last = Some(v);
        v
    }

    #[inline]
    pub fn follow(&mut self, target: T, dt: f32) -> T {
        let current = self.last.unwrap_or(target);
        self.step(current, target, dt)
    }

    #[inline] pub fn value(&self) -> Option<T> { self.last }

    #[inline]
    pub fn reset(&mut self, value: T) {
        log::debug!("exp follower reset");
        self.last = Some(value);
    }
}

impl<T: Smoothable> Default for ExpTween<T> {
    fn default() -> Self {
        Self::new(ExpParams::default())
    }
}

/// Exponential follower for rotations (normalized linear blend).
#[derive(Copy, Clone, Debug, Default)]
pub struct ExpRotation {
    params: ExpParams,
    last: Option<Quat>,
}

impl ExpRotation {
    #[inline]
    pub fn new(params: ExpParams) -> Self {
        Self { params: ExpParams { speed: non_negative(params.speed) }, last: None }
    }

    #[inline] pub fn set_speed(&mut self, speed: f32) { self.params.speed = non_negative(speed); }

    #[inline]
    pub fn step(&mut self, current: Quat, target: Quat, dt: f32) -> Quat {
        let q = exp_step_rotation(current, target, self.params.speed, dt);
        self.last = Some(q);
        q
    }

    #[inline]
    pub fn follow(&mut self, target: Quat, dt: f32) -> Quat {
        let current = self.last.unwrap_or(target);
        self.step(current, target, dt)
    }

    #[inline] pub fn value(&self) -> Option<Quat> { self.last }

    /// A zero-length `value` resets to identity.
    #[inline]
    pub fn reset(&mut self, value: Quat) {
        log::debug!("exp rotation reset to {value:?}");
        self.last = Some(raw_to_unit(quat_to_raw(value)));
    }
}

// ---------------------------------- Noise sources --------------------------------

macro_rules! noise_node {
    ($(#[$doc:meta])* $name:ident, $amp:ty, $out:ty, $step:ident) => {
        $(#[$doc])*
        #[derive(Copy, Clone, Debug)]
        pub struct $name<N = Simplex2> {
            params: NoiseParams<$amp>,
            state: NoiseState,
            noise: N,
        }

        impl $name<Simplex2> {
            #[inline]
            pub fn new(params: NoiseParams<$amp>) -> Self {
                Self::with_noise(params, Simplex2)
            }
        }

        impl<N: CoherentNoise> $name<N> {
            /// Use a custom coherent-noise primitive.
            #[inline]
            pub fn with_noise(mut params: NoiseParams<$amp>, noise: N) -> Self {
                params.frequency = non_negative(params.frequency);
                params.octaves = params.octaves.min(MAX_OCTAVES);
                Self { params, state: NoiseState::new(), noise }
            }

            #[inline] pub fn set_frequency(&mut self, hz: f32) { self.params.frequency = non_negative(hz); }
            #[inline] pub fn set_octaves(&mut self, octaves: u32) { self.params.octaves = octaves.min(MAX_OCTAVES); }
            #[inline] pub fn set_amplitude(&mut self, amplitude: $amp) { self.params.amplitude = amplitude; }
            #[inline] pub fn set_seed(&mut self, seed: u32) { self.params.seed = seed; }
            #[inline] pub fn params(&self) -> &NoiseParams<$amp> { &self.params }

            /// Current position along the time axis.
            #[inline] pub fn time(&self) -> f32 { self.state.time }
        }

        impl<N: CoherentNoise> Animator for $name<N> {
            type Output = $out;

            #[inline]
            fn reset(&mut self) {
                log::debug!(concat!(stringify!($name), " reset at time {}"), self.state.time);
                self.state = NoiseState::new();
            }

            #[inline]
            fn tick(&mut self, dt: f32) -> $out {
                $step(&mut self.state, &self.noise, &self.params, dt)
            }
        }

        impl Default for $name<Simplex2> {
            fn default() -> Self {
                Self::new(NoiseParams::default())
            }
        }
    };
}

noise_node!(
    /// Scalar fbm source.
    NoiseSource, f32, f32, noise_step
);
noise_node!(
    /// Three-axis fbm source with per-axis amplitude.
    NoiseVector, Vec3, Vec3, noise_step_vector
);
noise_node!(
    /// Rotation source: three fbm axes as Euler angles (degrees) scaled per axis.
    NoiseRotation, Vec3, Quat, noise_step_rotation
);
