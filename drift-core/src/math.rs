//! Math backend, value-space abstraction and rotation helpers.
//!
//! Design goals:
//! - `no_std` ready (guarded by the crate feature `no-std`)
//! - Scalar backend selection that works in both `std` and `no_std` contexts
//! - One generic value space ([`Smoothable`]) so every smoother is written once
//! - An explicit two-layer rotation representation: raw [`Vec4`] for
//!   integration, unit [`Quat`] at the boundary
//!
//! Features used by this file:
//! - `micromath` : use `micromath::F32Ext` for the scalar backend
//! - `no-std`    : use `libm` for the scalar backend

use core::ops::{Add, Div, Mul, Sub};

use cfg_if::cfg_if;
pub use glam::{Quat, Vec3, Vec4};

// ----------------------------- Math backend selection -----------------------------

cfg_if! {
    // micromath preferred if explicitly requested (works in no_std)
    if #[cfg(feature = "micromath")] {
        // Called through the trait so the std inherent methods don't win.
        use micromath::F32Ext;
        #[inline] pub(crate) fn m_sin(x: f32) -> f32 { F32Ext::sin(x) }
        #[inline] pub(crate) fn m_cos(x: f32) -> f32 { F32Ext::cos(x) }
        #[inline] pub(crate) fn m_acos(x: f32) -> f32 { F32Ext::acos(x) }
        #[inline] pub(crate) fn m_exp(x: f32) -> f32 { F32Ext::exp(x) }
        #[inline] pub(crate) fn m_floor(x: f32) -> f32 { F32Ext::floor(x) }
    // libm (C math) in no_std
    } else if #[cfg(feature = "no-std")] {
        #[inline] pub(crate) fn m_sin(x: f32) -> f32 { libm::sinf(x) }
        #[inline] pub(crate) fn m_cos(x: f32) -> f32 { libm::cosf(x) }
        #[inline] pub(crate) fn m_acos(x: f32) -> f32 { libm::acosf(x) }
        #[inline] pub(crate) fn m_exp(x: f32) -> f32 { libm::expf(x) }
        #[inline] pub(crate) fn m_floor(x: f32) -> f32 { libm::floorf(x) }
    // std backend
    } else {
        #[inline] pub(crate) fn m_sin(x: f32) -> f32 { x.sin() }
        #[inline] pub(crate) fn m_cos(x: f32) -> f32 { x.cos() }
        #[inline] pub(crate) fn m_acos(x: f32) -> f32 { x.acos() }
        #[inline] pub(crate) fn m_exp(x: f32) -> f32 { x.exp() }
        #[inline] pub(crate) fn m_floor(x: f32) -> f32 { x.floor() }
    }
}

// --------------------------------- Constants -------------------------------------

/// 2π
pub const TAU: f32 = core::f32::consts::TAU;

// --------------------------------- Value space -----------------------------------

/// A value that can be smoothed: a vector space over `f32`.
///
/// Implemented for `f32`, [`Vec3`] and [`Vec4`] (the raw rotation space).
pub trait Smoothable:
    Copy
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<f32, Output = Self>
    + Div<f32, Output = Self>
{
    /// Additive identity.
    const ZERO: Self;
}

impl Smoothable for f32 {
    const ZERO: Self = 0.0;
}

impl Smoothable for Vec3 {
    const ZERO: Self = Vec3::ZERO;
}

impl Smoothable for Vec4 {
    const ZERO: Self = Vec4::ZERO;
}

#[inline]
pub fn lerp<T: Smoothable>(a: T, b: T, t: f32) -> T {
    a + (b - a) * t
}

// --------------------------------- Rotations -------------------------------------

/// Rotation as raw `(x, y, z, w)` components.
#[inline]
pub fn quat_to_raw(q: Quat) -> Vec4 {
    Vec4::from(q)
}

/// Normalize a raw 4-vector back into a unit rotation.
///
/// A zero (or non-finite) length maps to the identity rotation.
#[inline]
pub fn raw_to_unit(v: Vec4) -> Quat {
    let n = v.normalize_or_zero();
    if n == Vec4::ZERO {
        Quat::IDENTITY
    } else {
        Quat::from_vec4(n)
    }
}

/// Flip `target` onto the hemisphere of `reference` (double-cover handling).
#[inline]
pub fn same_hemisphere(reference: Vec4, target: Vec4) -> Vec4 {
    if reference.dot(target) < 0.0 { -target } else { target }
}

/// Largest `f32` strictly below `x` (finite, non-NaN input).
#[inline]
pub(crate) fn next_below(x: f32) -> f32 {
    if x == 0.0 {
        return -f32::from_bits(1);
    }
    let bits = x.to_bits();
    if x > 0.0 {
        f32::from_bits(bits - 1)
    } else {
        f32::from_bits(bits + 1)
    }
}

// --------------------------------- Tests ------------------------------------------
