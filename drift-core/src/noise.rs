//! Fractal Brownian motion (fbm) noise sources.
//!
//! Contents
//! - [`CoherentNoise`] : the 2-D coherent-noise primitive the fbm sums
//! - [`Simplex2`]      : default primitive, 2-D simplex gradient noise in ≈[-1, 1]
//! - [`fbm`]           : octave sum at doubling frequency / halving weight
//! - [`noise_step`], [`noise_step_vector`], [`noise_step_rotation`] :
//!   per-tick sources driven by a caller-owned [`NoiseState`]
//!
//! Notes
//! - Each axis of a vector/rotation source reads its own 1-D slice of the 2-D
//!   field: the x coordinate is a hashed offset in `[-1000, 1000)` chosen by
//!   `(seed, axis)`, the y coordinate is the shared time accumulator.
//! - Outputs are divided by [`AMPLITUDE_NORMALIZER`] so the typical peak of an
//!   fbm sum maps to roughly `±amplitude`.

use crate::hash;
use crate::math::{m_floor, Quat, Vec3};
use glam::EulerRot;

/// Empirical peak of an fbm sum; outputs are divided by this.
pub const AMPLITUDE_NORMALIZER: f32 = 0.75;

/// Half-extent of the hashed x offset that selects an axis' noise slice.
pub const AXIS_SPREAD: f32 = 1000.0;

/// Upper bound on the layers [`fbm`] sums.
pub const MAX_OCTAVES: u32 = 32;

const DEG_TO_RAD: f32 = core::f32::consts::PI / 180.0;

// -------------------------------- Primitive --------------------------------------

/// A 2-D coherent-noise field with values in roughly `[-1, 1]`.
pub trait CoherentNoise {
    fn sample(&self, x: f32, y: f32) -> f32;
}

impl<F: Fn(f32, f32) -> f32> CoherentNoise for F {
    #[inline]
    fn sample(&self, x: f32, y: f32) -> f32 {
        self(x, y)
    }
}

/// 2-D simplex noise over a fixed permutation table.
#[derive(Copy, Clone, Debug, Default)]
pub struct Simplex2;

// (sqrt(3) - 1) / 2 and (3 - sqrt(3)) / 6
const F2: f32 = 0.366_025_42;
const G2: f32 = 0.211_324_87;

const GRAD2: [[f32; 2]; 12] = [
    [1.0, 1.0], [-1.0, 1.0], [1.0, -1.0], [-1.0, -1.0],
    [1.0, 0.0], [-1.0, 0.0], [1.0, 0.0], [-1.0, 0.0],
    [0.0, 1.0], [0.0, -1.0], [0.0, 1.0], [0.0, -1.0],
];

#[rustfmt::skip]
const PERM: [u8; 256] = [
    151,160,137, 91, 90, 15,131, 13,201, 95, 96, 53,194,233,  7,225,
    140, 36,103, 30, 69,142,  8, 99, 37,240, 21, 10, 23,190,  6,148,
    247,120,234, 75,  0, 26,197, 62, 94,252,219,203,117, 35, 11, 32,
     57,177, 33, 88,237,149, 56, 87,174, 20,125,136,171,168, 68,175,
     74,165, 71,134,139, 48, 27,166, 77,146,158,231, 83,111,229,122,
     60,211,133,230,220,105, 92, 41, 55, 46,245, 40,244,102,143, 54,
     65, 25, 63,161,  1,216, 80, 73,209, 76,132,187,208, 89, 18,169,
    200,196,135,130,116,188,159, 86,164,100,109,198,173,186,  3, 64,
     52,217,226,250,124,123,  5,202, 38,147,118,126,255, 82, 85,212,
    207,206, 59,227, 47, 16, 58, 17,182,189, 28, 42,223,183,170,213,
    119,248,152,  2, 44,154,163, 70,221,153,101,155,167, 43,172,  9,
    129, 22, 39,253, 19, 98,108,110, 79,113,224,232,178,185,112,104,
    218,246, 97,228,251, 34,242,193,238,210,144, 12,191,179,162,241,
     81, 51,145,235,249, 14,239,107, 49,192,214, 31,181,199,106,157,
    184, 84,204,176,115,121, 50, 45,127,  4,150,254,138,236,205, 93,
    222,114, 67, 29, 24, 72,243,141,128,195, 78, 66,215, 61,156,180,
];

#[inline]
fn perm(i: usize) -> usize {
    PERM[i & 255] as usize
}

#[inline]
fn corner(gi: usize, x: f32, y: f32) -> f32 {
    let t = 0.5 - x * x - y * y;
    if t < 0.0 {
        0.0
    } else {
        let g = GRAD2[gi];
        let t2 = t * t;
        t2 * t2 * (g[0] * x + g[1] * y)
    }
}

impl CoherentNoise for Simplex2 {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn sample(&self, x: f32, y: f32) -> f32 {
        // Skew into the simplex lattice and find the containing cell.
        let s = (x + y) * F2;
        let i = m_floor(x + s);
        let j = m_floor(y + s);
        let t = (i + j) * G2;
        let x0 = x - (i - t);
        let y0 = y - (j - t);

        // Upper or lower triangle of the cell.
        let (i1, j1) = if x0 > y0 { (1, 0) } else { (0, 1) };

        let x1 = x0 - i1 as f32 + G2;
        let y1 = y0 - j1 as f32 + G2;
        let x2 = x0 - 1.0 + 2.0 * G2;
        let y2 = y0 - 1.0 + 2.0 * G2;

        let ii = (i as i32 & 255) as usize;
        let jj = (j as i32 & 255) as usize;
        let g0 = perm(ii + perm(jj)) % 12;
        let g1 = perm(ii + i1 + perm(jj + j1)) % 12;
        let g2 = perm(ii + 1 + perm(jj + 1)) % 12;

        70.0 * (corner(g0, x0, y0) + corner(g1, x1, y1) + corner(g2, x2, y2))
    }
}

// ---------------------------------- Fbm ------------------------------------------

/// Sum `octaves` layers of `noise`, starting at weight 0.5 and halving the
/// weight while doubling the sample point each layer. Zero octaves is `0.0`.
///
/// At most [`MAX_OCTAVES`] layers are summed; later ones are below `f32`
/// resolution. The sum also stops once the sample point stops being finite.
#[inline]
pub fn fbm<N: CoherentNoise + ?Sized>(noise: &N, x: f32, y: f32, octaves: u32) -> f32 {
    let (mut px, mut py) = (x, y);
    let mut sum = 0.0;
    let mut weight = 0.5;
    for _ in 0..octaves.min(MAX_OCTAVES) {
        if !(px.is_finite() && py.is_finite()) {
            break;
        }
        sum += weight * noise.sample(px, py);
        px *= 2.0;
        py *= 2.0;
        weight *= 0.5;
    }
    sum
}

// -------------------------------- Sources ----------------------------------------

/// Noise source parameters. `A` is `f32` for scalar sources and `Vec3` for
/// vector amplitudes or rotation angles (degrees).
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NoiseParams<A> {
    /// Rate at which time advances through the field, in 1/seconds.
    pub frequency: f32,
    pub octaves: u32,
    pub amplitude: A,
    pub seed: u32,
}

impl Default for NoiseParams<f32> {
    fn default() -> Self {
        Self { frequency: 1.0, octaves: 1, amplitude: 1.0, seed: 1 }
    }
}

impl Default for NoiseParams<Vec3> {
    fn default() -> Self {
        Self { frequency: 1.0, octaves: 1, amplitude: Vec3::ONE, seed: 1 }
    }
}

/// Per-instance noise state: the time accumulator.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct NoiseState {
    pub time: f32,
}

impl NoiseState {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// `time += frequency * dt`, returning the new time.
    #[inline]
    pub fn advance(&mut self, frequency: f32, dt: f32) -> f32 {
        self.time += frequency * dt;
        self.time
    }
}

/// Hashed x coordinate of the slice read by `axis`.
#[inline]
#[must_use]
pub fn axis_offset(seed: u32, axis: u32) -> f32 {
    hash::float(seed, axis, -AXIS_SPREAD, AXIS_SPREAD)
}

#[inline]
fn axes<N: CoherentNoise + ?Sized>(noise: &N, seed: u32, octaves: u32, time: f32) -> Vec3 {
    Vec3::new(
        fbm(noise, axis_offset(seed, 0), time, octaves),
        fbm(noise, axis_offset(seed, 1), time, octaves),
        fbm(noise, axis_offset(seed, 2), time, octaves),
    )
}

/// Advance `state` and sample a scalar source.
#[inline]
pub fn noise_step<N: CoherentNoise + ?Sized>(
    state: &mut NoiseState,
    noise: &N,
    params: &NoiseParams<f32>,
    dt: f32,
) -> f32 {
    let time = state.advance(params.frequency, dt);
    let n = fbm(noise, axis_offset(params.seed, 0), time, params.octaves);
    n * params.amplitude / AMPLITUDE_NORMALIZER
}

/// Advance `state` and sample three decorrelated axes scaled per axis.
#[inline]
pub fn noise_step_vector<N: CoherentNoise + ?Sized>(
    state: &mut NoiseState,
    noise: &N,
    params: &NoiseParams<Vec3>,
    dt: f32,
) -> Vec3 {
    let time = state.advance(params.frequency, dt);
    axes(noise, params.seed, params.octaves, time) * params.amplitude / AMPLITUDE_NORMALIZER
}

/// Advance `state` and build a rotation from three noise axes used as Euler
/// angles in degrees (scaled by `params.amplitude`), applied Z, then X, then Y.
#[inline]
pub fn noise_step_rotation<N: CoherentNoise + ?Sized>(
    state: &mut NoiseState,
    noise: &N,
    params: &NoiseParams<Vec3>,
    dt: f32,
) -> Quat {
    let e = noise_step_vector(state, noise, params, dt) * DEG_TO_RAD;
    Quat::from_euler(EulerRot::YXZ, e.y, e.x, e.z)
}

// ------------------------------------ Tests --------------------------------------
