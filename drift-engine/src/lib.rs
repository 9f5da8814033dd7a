//! Drift Engine — driver + building blocks + rigs.
//!
//! Crate layout:
//! - [`driver`]  : `Animator` trait and `Driver<A>` wrapper
//! - [`nodes`]   : spring, exponential and noise nodes over `drift-core`
//! - [`trigger`] : press-state edge detection
//! - [`rigs`]    : composed motion rigs that implement `Animator`
//!
//! Nothing here allocates per tick. Nodes and rigs are plain `Copy` structs;
//! parameters are simple floats clamped by their setters.

pub mod driver;
pub mod error;
pub mod nodes;
pub mod rigs;
pub mod trigger;

// Re-export some commonly used items to make downstream imports ergonomic.
pub use driver::{Animator, Driver};
pub use error::{EngineError, EngineResult};
pub use nodes::{CdsRotation, CdsTween, ExpRotation, ExpTween, NoiseRotation, NoiseSource, NoiseVector};
pub use rigs::{Pose, Rig, RigConfig};
pub use trigger::{PressState, Trigger};
