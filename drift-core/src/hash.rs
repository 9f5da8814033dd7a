//! Seeded 32-bit avalanche hash and the uniform distributions built on it.
//!
//! `calculate` is xxHash32 of a single 32-bit word: identical `(seed, key)`
//! pairs give identical results on every platform, in every process. All
//! arithmetic is explicit `wrapping_*` so debug builds (with overflow checks)
//! and release builds agree bit for bit.
//!
//! Distributions:
//! - [`int`]       : uniform integer in `[min, max)`, validated range
//! - [`float`]     : uniform `f32` in `[min, max)`
//! - [`vector`]    : per-axis uniform `Vec3` with per-axis bounds
//! - [`direction`] : uniform point on the unit sphere
//! - [`rotation`]  : shortest rotation from `+Z` onto a random direction

use num_traits::PrimInt;

use crate::error::{DriftError, Result};
use crate::math::{m_acos, m_cos, m_sin, next_below, Quat, Vec3, TAU};

pub const PRIME32_1: u32 = 2_654_435_761;
pub const PRIME32_2: u32 = 2_246_822_519;
pub const PRIME32_3: u32 = 3_266_489_917;
pub const PRIME32_4: u32 = 668_265_263;
pub const PRIME32_5: u32 = 374_761_393;

/// Key offset separating the second axis draw from the first.
pub const AXIS_KEY_STRIDE: u32 = 0x1000_0000;

/// `2^32` as `f64`.
const U32_SPAN: f64 = 4_294_967_296.0;

/// Avalanche mix of `(seed, key)`.
#[inline]
#[must_use]
pub fn calculate(seed: u32, key: u32) -> u32 {
    let mut h = seed.wrapping_add(PRIME32_5).wrapping_add(4);
    h = h.wrapping_add(key.wrapping_mul(PRIME32_3));
    h = h.rotate_left(17).wrapping_mul(PRIME32_4);
    h ^= h >> 15;
    h = h.wrapping_mul(PRIME32_2);
    h ^= h >> 13;
    h = h.wrapping_mul(PRIME32_3);
    h ^= h >> 16;
    h
}

/// Uniform integer in `[min, max)`.
///
/// `(calculate >> 1) mod (max - min) + min`, evaluated in 128-bit arithmetic so
/// the width never overflows. Fails with [`DriftError::InvalidRange`] when
/// `max <= min`.
pub fn int<T: PrimInt>(seed: u32, key: u32, min: T, max: T) -> Result<T> {
    let lo = min.to_i128().ok_or(DriftError::Unrepresentable)?;
    let hi = max.to_i128().ok_or(DriftError::Unrepresentable)?;
    if hi <= lo {
        return Err(DriftError::InvalidRange { min: lo, max: hi });
    }
    let width = hi.checked_sub(lo).ok_or(DriftError::Unrepresentable)?;
    let r = i128::from(calculate(seed, key) >> 1) % width + lo;
    num_traits::cast::<i128, T>(r).ok_or(DriftError::Unrepresentable)
}

/// Uniform `f32` in `[min, max)`.
#[inline]
#[must_use]
pub fn float(seed: u32, key: u32, min: f32, max: f32) -> f32 {
    scale_to_range(calculate(seed, key), min, max)
}

/// Map a raw hash onto `[min, max)`.
///
/// The unit fraction `h / 2^32` is always `< 1`; rounding the result back to
/// `f32` can still land on `max` for wide ranges, in which case it is stepped
/// down one ulp.
#[inline]
#[allow(clippy::cast_possible_truncation)]
fn scale_to_range(h: u32, min: f32, max: f32) -> f32 {
    let t = f64::from(h) / U32_SPAN;
    let v = (t * (f64::from(max) - f64::from(min)) + f64::from(min)) as f32;
    if max > min && v >= max { next_below(max) } else { v }
}

/// Per-axis uniform vector; axis keys are `key`, `key + stride`, `key + 2*stride`.
#[must_use]
pub fn vector(seed: u32, key: u32, min: Vec3, max: Vec3) -> Vec3 {
    Vec3::new(
        float(seed, key, min.x, max.x),
        float(seed, key.wrapping_add(AXIS_KEY_STRIDE), min.y, max.y),
        float(seed, key.wrapping_add(2 * AXIS_KEY_STRIDE), min.z, max.z),
    )
}

/// Uniform direction on the unit sphere.
///
/// `theta` is uniform in `[0, 2π)` and `cos(phi)` uniform in `[-1, 1)`, which
/// is what makes the surface density uniform.
#[must_use]
pub fn direction(seed: u32, key: u32) -> Vec3 {
    let theta = float(seed, key, 0.0, TAU);
    let phi = m_acos(float(seed, key.wrapping_add(AXIS_KEY_STRIDE), -1.0, 1.0));
    let sin_phi = m_sin(phi);
    Vec3::new(sin_phi * m_cos(theta), sin_phi * m_sin(theta), m_cos(phi))
}

/// Shortest rotation taking `+Z` onto [`direction`]`(seed, key)`.
#[must_use]
pub fn rotation(seed: u32, key: u32) -> Quat {
    let dir = direction(seed, key).normalize_or_zero();
    if dir == Vec3::ZERO {
        return Quat::IDENTITY;
    }
    Quat::from_rotation_arc(Vec3::Z, dir)
}

// ------------------------------------ Tests --------------------------------------
