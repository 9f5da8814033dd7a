//! Exponential-decay smoothing.
//!
//! Stateless: `out = lerp(target, current, exp(-speed * dt))`. The caller feeds
//! the previous output back in as `current`, which makes the sequence an
//! exponential approach that is independent of the tick rate.

use crate::math::{lerp, m_exp, quat_to_raw, raw_to_unit, same_hemisphere, Quat, Smoothable};

/// Exponential smoother parameters.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ExpParams {
    /// Decay rate in 1/seconds.
    pub speed: f32,
}

impl Default for ExpParams {
    fn default() -> Self {
        Self { speed: 5.0 }
    }
}

/// Weight kept by `current` after `dt` seconds.
#[inline]
#[must_use]
pub fn exp_weight(speed: f32, dt: f32) -> f32 {
    m_exp(-speed * dt)
}

/// One smoothing step for scalars and vectors.
#[inline]
#[must_use]
pub fn exp_step<T: Smoothable>(current: T, target: T, speed: f32, dt: f32) -> T {
    lerp(target, current, exp_weight(speed, dt))
}

/// One smoothing step for rotations.
///
/// This is a normalized *linear* blend of the raw components (after the
/// shortest-path sign flip), not a spherical one, so the angular rate is not
/// constant across the blend.
#[inline]
#[must_use]
pub fn exp_step_rotation(current: Quat, target: Quat, speed: f32, dt: f32) -> Quat {
    let c = quat_to_raw(current);
    let t = same_hemisphere(c, quat_to_raw(target));
    raw_to_unit(lerp(t, c, exp_weight(speed, dt)))
}

// ------------------------------------ Tests --------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Vec3;
    use approx::assert_abs_diff_eq;

    #[test]
    fn zero_dt_is_identity() {
        for speed in [0.0, 1.0, 5.0, 1e6] {
            assert_eq!(exp_step(3.0_f32, 9.0, speed, 0.0), 3.0);
        }
    }

    #[test]
    fn zero_speed_never_converges() {
        for dt in [1.0 / 60.0, 1.0, 1e4] {
            assert_eq!(exp_step(3.0_f32, 9.0, 0.0, dt), 3.0);
        }
    }

    #[test]
    fn large_speed_reaches_target() {
        assert_abs_diff_eq!(exp_step(3.0_f32, 9.0, 1e4, 1.0), 9.0);
        assert_abs_diff_eq!(exp_step(3.0_f32, 9.0, 1.0, 1e4), 9.0);
    }

    #[test]
    fn matches_closed_form() {
        let v = exp_step(3.0_f32, 9.0, 5.0, 0.5);
        assert_abs_diff_eq!(v, 9.0 - 6.0 * (-2.5_f32).exp(), epsilon = 1e-5);
    }

    #[test]
    fn frame_rate_independent() {
        let mut a = 0.0_f32;
        for _ in 0..60 {
            a = exp_step(a, 1.0, 3.0, 1.0 / 60.0);
        }
        let mut b = 0.0_f32;
        for _ in 0..30 {
            b = exp_step(b, 1.0, 3.0, 1.0 / 30.0);
        }
        assert_abs_diff_eq!(a, b, epsilon = 1e-4);
    }

    #[test]
    fn vector_is_componentwise() {
        let v = exp_step(Vec3::new(0.0, 10.0, -4.0), Vec3::ONE, 2.0, 0.25);
        assert_abs_diff_eq!(v.y, exp_step(10.0_f32, 1.0, 2.0, 0.25), epsilon = 1e-6);
        assert_abs_diff_eq!(v.z, exp_step(-4.0_f32, 1.0, 2.0, 0.25), epsilon = 1e-6);
    }

    #[test]
    fn rotation_blend_is_linear_not_spherical() {
        let a = Quat::IDENTITY;
        let b = Quat::from_rotation_z(core::f32::consts::FRAC_PI_2);
        let w = exp_weight(1.0, 2.0_f32.ln());
        assert_abs_diff_eq!(w, 0.5, epsilon = 1e-6);

        let q = exp_step_rotation(a, b, 1.0, 2.0_f32.ln());
        let expected = raw_to_unit(quat_to_raw(a) * 0.5 + quat_to_raw(b) * 0.5);
        assert_abs_diff_eq!(q.dot(expected), 1.0, epsilon = 1e-6);
        assert_abs_diff_eq!(q.length(), 1.0, epsilon = 1e-6);
    }

    #[test]
    fn rotation_zero_dt_keeps_current() {
        let c = Quat::from_rotation_x(0.3);
        let q = exp_step_rotation(c, Quat::from_rotation_y(2.0), 5.0, 0.0);
        assert_abs_diff_eq!(q.dot(c), 1.0, epsilon = 1e-6);
    }

    #[test]
    fn rotation_uses_short_path() {
        let c = Quat::from_rotation_x(0.3);
        let q = exp_step_rotation(c, -c, 5.0, 0.1);
        assert_abs_diff_eq!(q.dot(c), 1.0, epsilon = 1e-6);
    }
}
