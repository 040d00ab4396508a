use crate::surface::Surface;
use fieldlab_config::{Mode, Parameters};

/// One full-frame visualization for a single mode.
///
/// Renderers are stateless: phase time is owned by the clock and passed in
/// by value, so a fresh start always redraws from `t = 0`. A renderer only
/// ever touches the surface it is handed, which the lifecycle guarantees is
/// the one belonging to its own mode.
pub trait ModeRenderer: Send {
    fn mode(&self) -> Mode;

    /// Fixed per-frame phase increment. These differ per mode to tune the
    /// perceived animation speed of each visualization independently.
    fn phase_step(&self) -> f64;

    /// Clears the surface and draws one complete frame for the given
    /// parameters and phase time.
    fn draw(&self, surface: &mut Surface, params: &Parameters, t: f64);
}
