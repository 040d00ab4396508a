//! Mode selector and lifecycle controller: owns the active renderer, the
//! per-mode drawing surfaces, the single animation clock, and the current
//! parameter set.

use std::collections::HashMap;

use log::{debug, info, warn};

use crate::clock::AnimationClock;
use crate::render::ModeRenderer;
use crate::surface::Surface;
use fieldlab_config::{Mode, Parameters};

/// Drives the five mode renderers. At most one frame loop is live at any
/// instant; every mode switch or active-parameter edit tears the previous
/// one down before starting the next.
pub struct Lifecycle {
    renderers: Vec<Box<dyn ModeRenderer>>,
    surfaces: HashMap<Mode, Surface>,
    clock: AnimationClock,
    params: Parameters,
    active: Mode,
    surface_height: u32,
}

impl Lifecycle {
    pub fn new(
        renderers: Vec<Box<dyn ModeRenderer>>,
        params: Parameters,
        initial_mode: Mode,
        surface_height: u32,
    ) -> Self {
        for mode in Mode::ALL {
            if !renderers.iter().any(|r| r.mode() == mode) {
                warn!("No renderer registered for mode '{}'", mode);
            }
        }
        Self {
            renderers,
            surfaces: HashMap::new(),
            clock: AnimationClock::new(),
            params,
            active: initial_mode,
            surface_height,
        }
    }

    /// Attaches (or re-attaches) a mode's drawing surface, sized to the
    /// container width and the fixed mode height. If the attached mode is
    /// the active one and no loop is running yet, the deferred start fires.
    pub fn attach_surface(&mut self, mode: Mode, container_width: u32) {
        let height = self.surface_height;
        self.surfaces
            .entry(mode)
            .and_modify(|s| s.resize(container_width, height))
            .or_insert_with(|| Surface::new(container_width, height));
        debug!("Surface attached for '{}' at {}x{}", mode, container_width, height);
        if mode == self.active && !self.clock.is_live() {
            self.restart();
        }
    }

    /// Switches the active mode. The previous subscription is cancelled
    /// before the new renderer's loop starts.
    pub fn select_mode(&mut self, mode: Mode) {
        if mode == self.active {
            return;
        }
        info!("Switching mode: '{}' -> '{}'", self.active, mode);
        self.active = mode;
        self.restart();
    }

    /// Replaces the parameter set. Only an edit to the active mode's record
    /// restarts the frame loop; edits to inactive modes are stored silently.
    pub fn set_parameters(&mut self, params: Parameters) {
        let active_changed = !record_eq(self.active, &self.params, &params);
        self.params = params;
        if active_changed {
            self.restart();
        }
    }

    /// Runs one frame: checks cancellation at the top, draws the active
    /// renderer onto its surface, then advances phase time by the renderer's
    /// own step. Returns false when no frame was drawn.
    pub fn frame(&mut self) -> bool {
        if !self.clock.is_live() {
            return false;
        }
        let Some(renderer) = self.renderers.iter().find(|r| r.mode() == self.active) else {
            return false;
        };
        let Some(surface) = self.surfaces.get_mut(&self.active) else {
            return false;
        };
        renderer.draw(surface, &self.params, self.clock.phase());
        self.clock.advance(renderer.phase_step());
        true
    }

    /// Cancels the frame loop; used on unmount.
    pub fn shutdown(&mut self) {
        self.clock.cancel();
    }

    pub fn active_mode(&self) -> Mode {
        self.active
    }

    pub fn params(&self) -> &Parameters {
        &self.params
    }

    pub fn phase(&self) -> f64 {
        self.clock.phase()
    }

    pub fn clock(&self) -> &AnimationClock {
        &self.clock
    }

    pub fn surface(&self, mode: Mode) -> Option<&Surface> {
        self.surfaces.get(&mode)
    }

    /// Cancel-before-start re-entry point for every lifecycle trigger.
    /// A surface that is not attached yet makes this a silent no-op; the
    /// start is retried on the next trigger.
    fn restart(&mut self) {
        self.clock.cancel();
        if !self.surfaces.contains_key(&self.active) {
            debug!("Surface for '{}' not attached yet; start deferred", self.active);
            return;
        }
        self.clock.start();
    }
}

/// Compares the record belonging to one mode across two parameter sets.
fn record_eq(mode: Mode, a: &Parameters, b: &Parameters) -> bool {
    match mode {
        Mode::GaussE => a.gauss_e == b.gauss_e,
        Mode::GaussB => a.gauss_b == b.gauss_b,
        Mode::Faraday => a.faraday == b.faraday,
        Mode::Ampere => a.ampere == b.ampere,
        Mode::Wave => a.wave == b.wave,
    }
}
