//! Critically damped spring (CDS) smoothing.
//!
//! One implicit integration step per tick:
//!
//! ```text
//! n1        = velocity - (current - target) * (speed^2 * dt)
//! n2        = 1 + speed * dt
//! velocity' = n1 / n2^2
//! value'    = current + velocity' * dt
//! ```
//!
//! `speed` is an angular frequency (1/seconds). The same step is applied to
//! scalars, 3-vectors and, for rotations, to the raw 4-component space with
//! the result re-normalized. State records are plain `Copy` structs owned by
//! the caller and passed in by `&mut`; nothing here allocates.
//!
//! Degenerate inputs are well defined: `speed = 0` applies no restoring force
//! and `dt = 0` leaves velocity untouched and resets the value to `current`.

use crate::math::{quat_to_raw, raw_to_unit, same_hemisphere, Quat, Smoothable, Vec4};

// -------------------------------- Parameters -------------------------------------

/// Spring parameters.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SpringParams {
    /// Angular frequency in 1/seconds. Higher converges faster.
    pub speed: f32,
}

impl Default for SpringParams {
    fn default() -> Self {
        Self { speed: 5.0 }
    }
}

// -------------------------------- Linear spaces ----------------------------------

/// Per-instance spring state for a scalar or vector quantity.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SpringState<T> {
    pub velocity: T,
    pub value: T,
}

impl<T: Smoothable> SpringState<T> {
    /// Fresh state at rest on `initial`.
    #[inline]
    pub fn new(initial: T) -> Self {
        Self { velocity: T::ZERO, value: initial }
    }

    /// Put the spring back at rest on `value`.
    #[inline]
    pub fn reset(&mut self, value: T) {
        *self = Self::new(value);
    }
}

impl<T: Smoothable> Default for SpringState<T> {
    fn default() -> Self {
        Self::new(T::ZERO)
    }
}

#[inline]
fn integrate<T: Smoothable>(velocity: T, current: T, target: T, speed: f32, dt: f32) -> (T, T) {
    let n1 = velocity - (current - target) * (speed * speed * dt);
    let n2 = 1.0 + speed * dt;
    let velocity = n1 / (n2 * n2);
    (velocity, current + velocity * dt)
}

/// Advance `state` one tick and return the new smoothed value.
#[inline]
pub fn spring_step<T: Smoothable>(
    state: &mut SpringState<T>,
    current: T,
    target: T,
    speed: f32,
    dt: f32,
) -> T {
    let (velocity, value) = integrate(state.velocity, current, target, speed, dt);
    state.velocity = velocity;
    state.value = value;
    value
}

// --------------------------------- Rotations -------------------------------------

/// Per-instance spring state for a rotation.
///
/// `velocity` lives in the raw `(x, y, z, w)` space and is never normalized;
/// `value` is always a unit quaternion.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RotationSpringState {
    pub velocity: Vec4,
    pub value: Quat,
}

impl RotationSpringState {
    #[inline]
    pub fn new(initial: Quat) -> Self {
        Self { velocity: Vec4::ZERO, value: raw_to_unit(quat_to_raw(initial)) }
    }

    #[inline]
    pub fn reset(&mut self, value: Quat) {
        *self = Self::new(value);
    }
}

impl Default for RotationSpringState {
    fn default() -> Self {
        Self::new(Quat::IDENTITY)
    }
}

/// Advance a rotation spring one tick.
///
/// `target` is flipped onto `current`'s hemisphere first so the spring always
/// takes the short way round.
#[inline]
pub fn spring_step_rotation(
    state: &mut RotationSpringState,
    current: Quat,
    target: Quat,
    speed: f32,
    dt: f32,
) -> Quat {
    let current = quat_to_raw(current);
    let target = same_hemisphere(current, quat_to_raw(target));
    let (velocity, raw) = integrate(state.velocity, current, target, speed, dt);
    state.velocity = velocity;
    state.value = raw_to_unit(raw);
    state.value
}

// ------------------------------------ Tests --------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Vec3;
    use approx::assert_abs_diff_eq;

    const DT: f32 = 1.0 / 60.0;

    #[test]
    fn rest_state_is_stable() {
        for (speed, dt) in [(0.0, DT), (5.0, DT), (40.0, 0.1), (1.0, 1.0)] {
            let mut s = SpringState::new(3.5_f32);
            for _ in 0..100 {
                let v = spring_step(&mut s, 3.5, 3.5, speed, dt);
                assert_eq!(v, 3.5);
                assert_eq!(s.velocity, 0.0);
            }
        }
    }

    #[test]
    fn vector_rest_state_is_stable() {
        let p = Vec3::new(1.0, -2.0, 3.0);
        let mut s = SpringState::new(p);
        for _ in 0..100 {
            assert_eq!(spring_step(&mut s, p, p, 5.0, DT), p);
        }
        assert_eq!(s.velocity, Vec3::ZERO);
    }

    #[test]
    fn undamped_spring_never_moves() {
        let mut s = SpringState::new(10.0_f32);
        let v = spring_step(&mut s, 10.0, 0.0, 0.0, DT);
        assert_eq!(v, 10.0);
        assert_eq!(s.velocity, 0.0);
    }

    #[test]
    fn zero_at_zero_stays_zero() {
        let mut s = SpringState::default();
        let v = spring_step(&mut s, 0.0_f32, 0.0, 5.0, DT);
        assert_eq!(v, 0.0);
        assert_eq!(s.velocity, 0.0);
    }

    #[test]
    fn zero_dt_keeps_velocity_and_resets_value() {
        let mut s = SpringState { velocity: 2.0_f32, value: 7.0 };
        let v = spring_step(&mut s, 1.0, 9.0, 5.0, 0.0);
        assert_eq!(v, 1.0);
        assert_eq!(s.velocity, 2.0);
    }

    #[test]
    fn zero_speed_coasts_on_existing_velocity() {
        let mut s = SpringState { velocity: 3.0_f32, value: 0.0 };
        let v = spring_step(&mut s, 1.0, 100.0, 0.0, 0.5);
        assert_eq!(s.velocity, 3.0);
        assert_eq!(v, 2.5);
    }

    #[test]
    fn converges_without_overshoot() {
        let mut s = SpringState::new(1.0_f32);
        let mut x = 1.0;
        for _ in 0..120 {
            x = spring_step(&mut s, x, 0.0, 5.0, DT);
            assert!(x >= 0.0, "overshoot: {x}");
        }
        assert!(x < 1e-3, "x={x}");
    }

    #[test]
    fn vector_matches_scalar_componentwise() {
        let mut sv = SpringState::new(Vec3::new(1.0, 2.0, 3.0));
        let mut sx = SpringState::new(1.0_f32);
        let mut sz = SpringState::new(3.0_f32);
        let (mut v, mut x, mut z) = (sv.value, 1.0, 3.0);
        for _ in 0..30 {
            v = spring_step(&mut sv, v, Vec3::ZERO, 4.0, DT);
            x = spring_step(&mut sx, x, 0.0, 4.0, DT);
            z = spring_step(&mut sz, z, 0.0, 4.0, DT);
        }
        assert_abs_diff_eq!(v.x, x, epsilon = 1e-6);
        assert_abs_diff_eq!(v.z, z, epsilon = 1e-6);
    }

    #[test]
    fn degenerate_initial_rotation_is_identity() {
        let s = RotationSpringState::new(Quat::from_xyzw(0.0, 0.0, 0.0, 0.0));
        assert_eq!(s.value, Quat::IDENTITY);
        let s = RotationSpringState::new(Quat::from_xyzw(0.0, 2.0, 0.0, 0.0));
        assert_eq!(s.value, Quat::from_xyzw(0.0, 1.0, 0.0, 0.0));
    }

    #[test]
    fn rotation_output_is_unit_and_continuous() {
        let target = Quat::from_rotation_y(2.5) * Quat::from_rotation_x(-1.2);
        let mut s = RotationSpringState::default();
        let mut q = s.value;
        for _ in 0..300 {
            let next = spring_step_rotation(&mut s, q, target, 6.0, DT);
            assert_abs_diff_eq!(next.length(), 1.0, epsilon = 1e-5);
            assert!(next.dot(q) >= 0.0, "sign flip between ticks");
            q = next;
        }
        assert_abs_diff_eq!(q.dot(target).abs(), 1.0, epsilon = 1e-4);
    }

    #[test]
    fn rotation_takes_short_path_for_negated_target() {
        let mut s = RotationSpringState::default();
        let target = -Quat::IDENTITY;
        let q = spring_step_rotation(&mut s, Quat::IDENTITY, target, 5.0, DT);
        assert_eq!(s.velocity, Vec4::ZERO);
        assert_abs_diff_eq!(q.w, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn rotation_velocity_is_not_normalized() {
        let mut s = RotationSpringState::default();
        spring_step_rotation(&mut s, Quat::IDENTITY, Quat::from_rotation_z(1.0), 5.0, DT);
        let len = s.velocity.length();
        assert!(len > 0.0 && (len - 1.0).abs() > 1e-3, "len={len}");
    }
}
