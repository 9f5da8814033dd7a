#![cfg_attr(not(feature = "std"), no_std)]
//! Drift Core — no_std-ready procedural-motion math.
//!
//! Features
//! - `std`       : (default) use the Rust standard library
//! - `no-std`    : build with `#![no_std]` and use the `libm` math backend
//! - `micromath` : use `micromath` for the scalar trig/exp backend
//! - `serde`     : derive `Serialize`/`Deserialize` on parameter records
//!
//! Modules
//! - [`hash`]   : seeded xxHash32 mix and uniform int/float/vector/direction/rotation draws
//! - [`spring`] : critically damped spring for scalars, vectors, rotations
//! - [`tween`]  : stateless exponential-decay smoothing
//! - [`noise`]  : fbm over a 2-D coherent-noise primitive (simplex by default)
//! - [`math`]   : math backend, value space, rotation helpers
//! - [`error`]  : [`DriftError`]
//!
//! Design
//! - No heap allocations, no global state
//! - Per-instance state records are plain structs owned by the caller and
//!   passed in by `&mut` each tick
//! - Integer hashing is bit-exact across platforms (explicit wrapping arithmetic)

pub mod error;
pub mod hash;
pub mod math;
pub mod noise;
pub mod spring;
pub mod tween;

pub use error::{DriftError, Result};

/// Commonly used types/functions for convenience:
pub mod prelude {
    pub use crate::error::{DriftError, Result};
    pub use crate::hash;
    pub use crate::math::{lerp, Quat, Smoothable, Vec3, Vec4};
    pub use crate::noise::{
        fbm, noise_step, noise_step_rotation, noise_step_vector, CoherentNoise, NoiseParams,
        NoiseState, Simplex2,
    };
    pub use crate::spring::{
        spring_step, spring_step_rotation, RotationSpringState, SpringParams, SpringState,
    };
    pub use crate::tween::{exp_step, exp_step_rotation, exp_weight, ExpParams};
}
