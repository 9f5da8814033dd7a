//! C ABI wrapper for drift.
//!
//! Exposes the core operations (hash draws, spring/exp smoothing, fbm noise)
//! over plain `#[repr(C)]` records, plus an opaque rig handle.
//!
//! ABI notes
//! - All functions are `extern "C"` and `#[no_mangle]`.
//! - State records (`DriftSpring*`, `DriftNoiseState`) are owned by the host;
//!   we only read and write them through the pointer passed in. One record per
//!   smoothed/noised quantity.
//! - Opaque handle type: `DriftRig` (heap-allocated; you own/delete it).
//! - Fallible calls return a status: `DRIFT_OK`, `DRIFT_ERR_NULL` or
//!   `DRIFT_ERR_RANGE`, and write their result through an out-pointer.
//!   Null state pointers passed to infallible calls are ignored.
//!
//! Threading
//! - Nothing here is shared; a record must not be stepped from two threads at once.

use drift_core::math::{Quat, Vec3, Vec4};
use drift_core::noise::{noise_step, noise_step_rotation, noise_step_vector, NoiseParams, NoiseState, Simplex2};
use drift_core::spring::{spring_step, spring_step_rotation, RotationSpringState, SpringState};
use drift_core::{hash, tween};
use drift_engine::{Animator, Rig, RigConfig};

pub const DRIFT_OK: i32 = 0;
pub const DRIFT_ERR_NULL: i32 = -1;
pub const DRIFT_ERR_RANGE: i32 = -2;

// --- Records ---------------------------------------------------------------------

#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct DriftVec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

/// Quaternion components `(x, y, z, w)`. Also used for the raw rotation velocity.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DriftQuat {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Default for DriftQuat {
    fn default() -> Self {
        Self { x: 0.0, y: 0.0, z: 0.0, w: 1.0 }
    }
}

impl From<Vec3> for DriftVec3 {
    fn from(v: Vec3) -> Self { Self { x: v.x, y: v.y, z: v.z } }
}
impl From<DriftVec3> for Vec3 {
    fn from(v: DriftVec3) -> Self { Vec3::new(v.x, v.y, v.z) }
}
impl From<Vec4> for DriftQuat {
    fn from(v: Vec4) -> Self { Self { x: v.x, y: v.y, z: v.z, w: v.w } }
}
impl From<Quat> for DriftQuat {
    fn from(q: Quat) -> Self { Self { x: q.x, y: q.y, z: q.z, w: q.w } }
}
impl From<DriftQuat> for Vec4 {
    fn from(q: DriftQuat) -> Self { Vec4::new(q.x, q.y, q.z, q.w) }
}
impl From<DriftQuat> for Quat {
    // Normalizing; a zero quaternion becomes identity.
    fn from(q: DriftQuat) -> Self { drift_core::math::raw_to_unit(Vec4::from(q)) }
}

#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct DriftSpringF32 {
    pub velocity: f32,
    pub value: f32,
}

#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct DriftSpringVec3 {
    pub velocity: DriftVec3,
    pub value: DriftVec3,
}

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DriftSpringQuat {
    /// Raw, never normalized.
    pub velocity: DriftQuat,
    pub value: DriftQuat,
}

#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct DriftNoiseState {
    pub time: f32,
}

#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct DriftPose {
    pub position: DriftVec3,
    pub rotation: DriftQuat,
}

// --- Hash ------------------------------------------------------------------------

#[no_mangle]
pub extern "C" fn drift_hash_calculate(seed: u32, key: u32) -> u32 {
    hash::calculate(seed, key)
}

/// Integer in `[min, max)`. Returns `DRIFT_ERR_RANGE` when `max <= min`.
#[no_mangle]
pub extern "C" fn drift_hash_int(seed: u32, key: u32, min: i32, max: i32, out: *mut i32) -> i32 {
    if out.is_null() { return DRIFT_ERR_NULL; }
    match hash::int(seed, key, min, max) {
        Ok(v) => {
            unsafe { *out = v; }
            DRIFT_OK
        }
        Err(_) => DRIFT_ERR_RANGE,
    }
}

#[no_mangle]
pub extern "C" fn drift_hash_float(seed: u32, key: u32, min: f32, max: f32) -> f32 {
    hash::float(seed, key, min, max)
}

#[no_mangle]
pub extern "C" fn drift_hash_direction(seed: u32, key: u32, out: *mut DriftVec3) -> i32 {
    if out.is_null() { return DRIFT_ERR_NULL; }
    unsafe { *out = hash::direction(seed, key).into(); }
    DRIFT_OK
}

#[no_mangle]
pub extern "C" fn drift_hash_rotation(seed: u32, key: u32, out: *mut DriftQuat) -> i32 {
    if out.is_null() { return DRIFT_ERR_NULL; }
    unsafe { *out = hash::rotation(seed, key).into(); }
    DRIFT_OK
}

// --- Spring ----------------------------------------------------------------------

/// Put a scalar spring at rest on `initial`.
#[no_mangle]
pub extern "C" fn drift_spring_init_f32(state: *mut DriftSpringF32, initial: f32) {
    if state.is_null() { return; }
    let s = unsafe { &mut *state };
    *s = DriftSpringF32 { velocity: 0.0, value: initial };
}

/// Step a scalar spring. A null state returns `current` unchanged.
#[no_mangle]
pub extern "C" fn drift_spring_step_f32(
    state: *mut DriftSpringF32,
    current: f32,
    target: f32,
    speed: f32,
    dt: f32,
) -> f32 {
    if state.is_null() { return current; }
    let s = unsafe { &mut *state };
    let mut st = SpringState { velocity: s.velocity, value: s.value };
    let v = spring_step(&mut st, current, target, speed, dt);
    *s = DriftSpringF32 { velocity: st.velocity, value: st.value };
    v
}

#[no_mangle]
pub extern "C" fn drift_spring_init_vec3(state: *mut DriftSpringVec3, initial: DriftVec3) {
    if state.is_null() { return; }
    let s = unsafe { &mut *state };
    *s = DriftSpringVec3 { velocity: DriftVec3::default(), value: initial };
}

#[no_mangle]
pub extern "C" fn drift_spring_step_vec3(
    state: *mut DriftSpringVec3,
    current: DriftVec3,
    target: DriftVec3,
    speed: f32,
    dt: f32,
    out: *mut DriftVec3,
) -> i32 {
    if state.is_null() || out.is_null() { return DRIFT_ERR_NULL; }
    let (s, o) = unsafe { (&mut *state, &mut *out) };
    let mut st = SpringState::<Vec3> { velocity: s.velocity.into(), value: s.value.into() };
    let v = spring_step(&mut st, current.into(), target.into(), speed, dt);
    *s = DriftSpringVec3 { velocity: st.velocity.into(), value: st.value.into() };
    *o = v.into();
    DRIFT_OK
}

#[no_mangle]
pub extern "C" fn drift_spring_init_quat(state: *mut DriftSpringQuat, initial: DriftQuat) {
    if state.is_null() { return; }
    let s = unsafe { &mut *state };
    let st = RotationSpringState::new(initial.into());
    *s = DriftSpringQuat { velocity: st.velocity.into(), value: st.value.into() };
}

#[no_mangle]
pub extern "C" fn drift_spring_step_quat(
    state: *mut DriftSpringQuat,
    current: DriftQuat,
    target: DriftQuat,
    speed: f32,
    dt: f32,
    out: *mut DriftQuat,
) -> i32 {
    if state.is_null() || out.is_null() { return DRIFT_ERR_NULL; }
    let (s, o) = unsafe { (&mut *state, &mut *out) };
    let mut st = RotationSpringState { velocity: s.velocity.into(), value: s.value.into() };
    let q = spring_step_rotation(&mut st, current.into(), target.into(), speed, dt);
    *s = DriftSpringQuat { velocity: st.velocity.into(), value: st.value.into() };
    *o = q.into();
    DRIFT_OK
}

// --- Exponential -----------------------------------------------------------------

#[no_mangle]
pub extern "C" fn drift_exp_step_f32(current: f32, target: f32, speed: f32, dt: f32) -> f32 {
    tween::exp_step(current, target, speed, dt)
}

#[no_mangle]
pub extern "C" fn drift_exp_step_vec3(current: DriftVec3, target: DriftVec3, speed: f32, dt: f32) -> DriftVec3 {
    tween::exp_step(Vec3::from(current), Vec3::from(target), speed, dt).into()
}

#[no_mangle]
pub extern "C" fn drift_exp_step_quat(current: DriftQuat, target: DriftQuat, speed: f32, dt: f32) -> DriftQuat {
    tween::exp_step_rotation(current.into(), target.into(), speed, dt).into()
}

// --- Noise -----------------------------------------------------------------------

/// Advance and sample a scalar fbm source. A null state returns 0.
#[no_mangle]
pub extern "C" fn drift_noise_step_f32(
    state: *mut DriftNoiseState,
    frequency: f32,
    octaves: u32,
    amplitude: f32,
    seed: u32,
    dt: f32,
) -> f32 {
    if state.is_null() { return 0.0; }
    let s = unsafe { &mut *state };
    let mut st = NoiseState { time: s.time };
    let params = NoiseParams { frequency, octaves, amplitude, seed };
    let v = noise_step(&mut st, &Simplex2, &params, dt);
    s.time = st.time;
    v
}

#[no_mangle]
pub extern "C" fn drift_noise_step_vec3(
    state: *mut DriftNoiseState,
    frequency: f32,
    octaves: u32,
    amplitude: DriftVec3,
    seed: u32,
    dt: f32,
    out: *mut DriftVec3,
) -> i32 {
    if state.is_null() || out.is_null() { return DRIFT_ERR_NULL; }
    let (s, o) = unsafe { (&mut *state, &mut *out) };
    let mut st = NoiseState { time: s.time };
    let params = NoiseParams::<Vec3> { frequency, octaves, amplitude: amplitude.into(), seed };
    *o = noise_step_vector(&mut st, &Simplex2, &params, dt).into();
    s.time = st.time;
    DRIFT_OK
}

/// `angles` are per-axis Euler amplitudes in degrees.
#[no_mangle]
pub extern "C" fn drift_noise_step_quat(
    state: *mut DriftNoiseState,
    frequency: f32,
    octaves: u32,
    angles: DriftVec3,
    seed: u32,
    dt: f32,
    out: *mut DriftQuat,
) -> i32 {
    if state.is_null() || out.is_null() { return DRIFT_ERR_NULL; }
    let (s, o) = unsafe { (&mut *state, &mut *out) };
    let mut st = NoiseState { time: s.time };
    let params = NoiseParams::<Vec3> { frequency, octaves, amplitude: angles.into(), seed };
    *o = noise_step_rotation(&mut st, &Simplex2, &params, dt).into();
    s.time = st.time;
    DRIFT_OK
}

// --- Rig handle ------------------------------------------------------------------

/// Opaque rig wrapper we hand to C.
pub struct DriftRig {
    inner: Rig,
}

/// Create a rig with default settings and both noise seeds derived from `seed`.
/// Returns null if the configuration is rejected.
#[no_mangle]
pub extern "C" fn drift_rig_create(seed: u32) -> *mut DriftRig {
    match Rig::new(RigConfig::default().with_seed(seed)) {
        Ok(inner) => Box::into_raw(Box::new(DriftRig { inner })),
        Err(_) => std::ptr::null_mut(),
    }
}

/// Destroy a rig previously returned by `drift_rig_create`.
#[no_mangle]
pub extern "C" fn drift_rig_destroy(rig: *mut DriftRig) {
    if !rig.is_null() {
        unsafe { drop(Box::from_raw(rig)); }
    }
}

#[no_mangle]
pub extern "C" fn drift_rig_reset(rig: *mut DriftRig) {
    if rig.is_null() { return; }
    let r = unsafe { &mut *rig };
    r.inner.reset();
}

/// Advance the rig by `dt` seconds. Invalid `dt` is treated as 0.
#[no_mangle]
pub extern "C" fn drift_rig_tick(rig: *mut DriftRig, dt: f32, out: *mut DriftPose) -> i32 {
    if rig.is_null() || out.is_null() { return DRIFT_ERR_NULL; }
    let (r, o) = unsafe { (&mut *rig, &mut *out) };
    let pose = r.inner.tick(drift_engine::driver::sanitize_dt(dt));
    *o = DriftPose { position: pose.position.into(), rotation: pose.rotation.into() };
    DRIFT_OK
}

/// Set position/rotation follow speeds (clamped to `>= 0`).
#[no_mangle]
pub extern "C" fn drift_rig_set_speeds(rig: *mut DriftRig, position_speed: f32, rotation_speed: f32) {
    if rig.is_null() { return; }
    let r = unsafe { &mut *rig };
    r.inner.set_position_speed(position_speed);
    r.inner.set_rotation_speed(rotation_speed);
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::ptr;

    #[test]
    fn hash_matches_core() {
        assert_eq!(drift_hash_calculate(0, 0), 0x08D6_D969);
        let mut v = 0;
        assert_eq!(drift_hash_int(42, 7, -5, 5, &mut v), DRIFT_OK);
        assert_eq!(v, -3);
        assert_eq!(drift_hash_int(42, 7, 5, 5, &mut v), DRIFT_ERR_RANGE);
        assert_eq!(drift_hash_int(42, 7, 0, 5, ptr::null_mut()), DRIFT_ERR_NULL);
    }

    #[test]
    fn direction_is_unit() {
        let mut d = DriftVec3::default();
        assert_eq!(drift_hash_direction(3, 9, &mut d), DRIFT_OK);
        assert_abs_diff_eq!(Vec3::from(d).length(), 1.0, epsilon = 1e-5);
    }

    #[test]
    fn spring_state_round_trips_through_record() {
        let mut s = DriftSpringF32::default();
        drift_spring_init_f32(&mut s, 1.0);
        let mut core = SpringState::new(1.0_f32);
        let mut cur = 1.0;
        for _ in 0..30 {
            let a = drift_spring_step_f32(&mut s, cur, 0.0, 5.0, 1.0 / 60.0);
            let b = spring_step(&mut core, cur, 0.0, 5.0, 1.0 / 60.0);
            assert_eq!(a, b);
            cur = a;
        }
        assert_eq!(s.velocity, core.velocity);
    }

    #[test]
    fn null_state_is_ignored() {
        assert_eq!(drift_spring_step_f32(ptr::null_mut(), 2.0, 0.0, 5.0, 0.1), 2.0);
        assert_eq!(drift_noise_step_f32(ptr::null_mut(), 1.0, 1, 1.0, 1, 0.1), 0.0);
        drift_spring_init_f32(ptr::null_mut(), 1.0);
        drift_rig_reset(ptr::null_mut());
        drift_rig_destroy(ptr::null_mut());
    }

    #[test]
    fn quat_spring_keeps_unit_value() {
        let mut s = DriftSpringQuat { velocity: DriftQuat::default(), value: DriftQuat::default() };
        drift_spring_init_quat(&mut s, DriftQuat::default());
        assert_eq!(s.velocity, DriftQuat { x: 0.0, y: 0.0, z: 0.0, w: 0.0 });
        let target: DriftQuat = Quat::from_rotation_y(1.2).into();
        let mut out = DriftQuat::default();
        let mut cur = DriftQuat::default();
        for _ in 0..60 {
            assert_eq!(drift_spring_step_quat(&mut s, cur, target, 5.0, 1.0 / 60.0, &mut out), DRIFT_OK);
            assert_abs_diff_eq!(Vec4::from(out).length(), 1.0, epsilon = 1e-5);
            cur = out;
        }
    }

    #[test]
    fn noise_state_accumulates_time() {
        let mut s = DriftNoiseState::default();
        let mut out = DriftVec3::default();
        for _ in 0..4 {
            drift_noise_step_vec3(&mut s, 2.0, 2, DriftVec3 { x: 1.0, y: 1.0, z: 1.0 }, 1, 0.25, &mut out);
        }
        assert_abs_diff_eq!(s.time, 2.0, epsilon = 1e-6);
    }

    #[test]
    fn deep_octave_counts_stay_finite() {
        let mut s = DriftNoiseState::default();
        assert!(drift_noise_step_f32(&mut s, 1.0, 200, 1.0, 1, 1.0 / 60.0).is_finite());
        let mut q = DriftQuat::default();
        let angles = DriftVec3 { x: 45.0, y: 45.0, z: 45.0 };
        assert_eq!(drift_noise_step_quat(&mut s, 1.0, u32::MAX, angles, 1, 1.0 / 60.0, &mut q), DRIFT_OK);
        assert_abs_diff_eq!(Vec4::from(q).length(), 1.0, epsilon = 1e-5);
    }

    #[test]
    fn rig_lifecycle() {
        let rig = drift_rig_create(11);
        assert!(!rig.is_null());
        let mut a = DriftPose::default();
        let mut b = DriftPose::default();
        drift_rig_tick(rig, 1.0 / 60.0, &mut a);
        drift_rig_reset(rig);
        drift_rig_tick(rig, 1.0 / 60.0, &mut b);
        assert_eq!(a, b);
        assert_eq!(drift_rig_tick(rig, 0.1, ptr::null_mut()), DRIFT_ERR_NULL);
        drift_rig_destroy(rig);
    }
}
