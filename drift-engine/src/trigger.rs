//! Press-state edge detection for host input.
//!
//! The host polls its own input device and hands us a boolean per frame; this
//! module only decides whether that boolean sequence fires.

/// Which phase of a press fires the trigger.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PressState {
    /// Fires on the frame the input goes down.
    #[default]
    Down,
    /// Fires on the frame the input is released.
    Up,
    /// Fires on every frame the input is held.
    Hold,
}

impl PressState {
    /// Given the previous and current pressed flags, does this state fire?
    #[inline]
    pub fn fires(self, was_pressed: bool, is_pressed: bool) -> bool {
        match self {
            PressState::Down => !was_pressed && is_pressed,
            PressState::Up => was_pressed && !is_pressed,
            PressState::Hold => is_pressed,
        }
    }
}

/// Remembers the previous frame's input so callers only pass the current one.
#[derive(Copy, Clone, Debug, Default)]
pub struct Trigger {
    state: PressState,
    was_pressed: bool,
}

impl Trigger {
    #[inline]
    pub fn new(state: PressState) -> Self {
        Self { state, was_pressed: false }
    }

    #[inline] pub fn state(&self) -> PressState { self.state }
    #[inline] pub fn set_state(&mut self, state: PressState) { self.state = state; }

    /// Feed this frame's input; returns `true` when the trigger fires.
    #[inline]
    pub fn update(&mut self, is_pressed: bool) -> bool {
        let fired = self.state.fires(self.was_pressed, is_pressed);
        self.was_pressed = is_pressed;
        fired
    }

    #[inline] pub fn reset(&mut self) { self.was_pressed = false; }
}
