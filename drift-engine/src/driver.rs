//! Per-frame tick driver.
//!
//! This module defines the minimal `Animator` trait and a lightweight
//! `Driver<A>` wrapper that owns an animator (node or rig), tracks elapsed time
//! and tick count, and advances it one frame at a time.
//!
//! Design goals
//! - No dynamic allocations per tick
//! - Bad `dt` from the host (NaN, infinite, negative) never reaches the math;
//!   it is logged and treated as a zero-length frame
//! - Generic over the animator type, so rigs can be swapped without trait objects

/// Anything that produces one value per frame.
pub trait Animator {
    type Output;

    /// Return to the initial state (time zero, springs at rest).
    fn reset(&mut self);

    /// Advance by `dt` seconds and return the new output.
    fn tick(&mut self, dt: f32) -> Self::Output;
}

/// Clamp a host-supplied frame delta into the valid domain.
#[inline]
pub fn sanitize_dt(dt: f32) -> f32 {
    if dt.is_finite() && dt >= 0.0 {
        dt
    } else {
        log::warn!("ignoring invalid frame delta {dt}; using 0");
        0.0
    }
}

/// Owns an animator and feeds it frames.
pub struct Driver<A: Animator> {
    elapsed: f64,
    ticks: u64,
    anim: A,
}

impl<A: Animator> Driver<A> {
    /// Construct with an already-configured animator, resetting it first.
    #[inline]
    pub fn new(mut anim: A) -> Self {
        anim.reset();
        Self { elapsed: 0.0, ticks: 0, anim }
    }

    /// Advance one frame of `dt` seconds.
    #[inline]
    pub fn tick(&mut self, dt: f32) -> A::Output {
        let dt = sanitize_dt(dt);
        self.elapsed += f64::from(dt);
        self.ticks += 1;
        self.anim.tick(dt)
    }

    /// Advance `frames` frames at a fixed rate, handing each output to `sink`.
    pub fn run(&mut self, frames: usize, fps: f32, mut sink: impl FnMut(u64, A::Output)) {
        let dt = if fps > 0.0 { 1.0 / fps } else { 0.0 };
        for _ in 0..frames {
            let out = self.tick(dt);
            sink(self.ticks, out);
        }
    }

    /// Seconds of simulated time since creation or the last `reset`.
    #[inline] pub fn elapsed(&self) -> f64 { self.elapsed }

    /// Frames ticked since creation or the last `reset`.
    #[inline] pub fn ticks(&self) -> u64 { self.ticks }

    /// Reset the animator and the clock.
    #[inline]
    pub fn reset(&mut self) {
        self.anim.reset();
        self.elapsed = 0.0;
        self.ticks = 0;
    }

    /// Replace the animator; the new one is reset, the clock keeps running.
    #[inline]
    pub fn swap(&mut self, mut anim: A) -> A {
        anim.reset();
        core::mem::replace(&mut self.anim, anim)
    }

    #[inline] pub fn animator(&self) -> &A { &self.anim }

    /// Mutable access for live parameter tweaks.
    #[inline] pub fn animator_mut(&mut self) -> &mut A { &mut self.anim }
}
