//! Closed-form physics for the five field configurations. Pure, stateless
//! and infallible: inputs are pre-clamped to valid ranges by the parameter
//! layer, so no runtime validation happens here.

use std::f64::consts::{PI, TAU};

use serde::Serialize;

use fieldlab_config::{
    AmpereParams, FaradayParams, GaussBParams, GaussEParams, Mode, Parameters, WaveParams,
};

/// Vacuum permittivity in F/m.
pub const EPSILON_0: f64 = 8.854e-12;

/// Vacuum permeability in T·m/A.
pub const MU_0: f64 = 4.0 * PI * 1e-7;

// --- Per-Mode Readouts ---

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GaussEReadout {
    /// Electric flux through the gaussian surface in N·m²/C.
    pub flux: f64,
    /// Field magnitude at the surface radius in N/C.
    pub field: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GaussBReadout {
    /// Field magnitude at the sampling distance in T.
    pub field: f64,
    /// Magnetic flux through any closed surface. Identically zero; this is
    /// the physical statement of the law, not an approximation.
    pub flux: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FaradayReadout {
    /// Angular frequency in rad/s.
    pub omega: f64,
    /// Instantaneous field B(t) in T.
    pub field: f64,
    /// Instantaneous flux through the loop in Wb.
    pub flux: f64,
    /// Induced EMF in V.
    pub emf: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AmpereReadout {
    /// Field magnitude on the amperian path in T.
    pub field: f64,
    /// Circulation of B around the path in T·m. Independent of path radius.
    pub circulation: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WaveReadout {
    /// Angular frequency in rad/s.
    pub omega: f64,
    /// Wavenumber k in rad/m.
    pub wavenumber: f64,
    /// Wavelength in m.
    pub wavelength: f64,
}

/// The per-frame formula result for whichever mode is active. Pure value,
/// recomputed every frame, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "mode", content = "values", rename_all = "kebab-case")]
pub enum Readout {
    GaussE(GaussEReadout),
    GaussB(GaussBReadout),
    Faraday(FaradayReadout),
    Ampere(AmpereReadout),
    Wave(WaveReadout),
}

// --- Formula Groups ---

/// Gauss's law for E: point charge Q (μC) inside a spherical surface of
/// radius r (m).
pub fn gauss_e(p: &GaussEParams) -> GaussEReadout {
    let q = p.charge * 1e-6;
    GaussEReadout {
        flux: q / EPSILON_0,
        field: q / (4.0 * PI * EPSILON_0 * p.radius * p.radius),
    }
}

/// Gauss's law for B: field of a long straight wire at distance r, flux
/// always exactly zero.
pub fn gauss_b(p: &GaussBParams) -> GaussBReadout {
    GaussBReadout {
        field: MU_0 * p.current / (2.0 * PI * p.distance),
        flux: 0.0,
    }
}

/// Faraday's law: sinusoidally driven field through a circular loop.
/// Time-dependent, so recomputed every frame from phase time `t`.
pub fn faraday(p: &FaradayParams, t: f64) -> FaradayReadout {
    let omega = TAU * p.frequency;
    let field = p.b_field * (omega * t).cos();
    let area = PI * p.loop_radius * p.loop_radius;
    FaradayReadout {
        omega,
        field,
        flux: field * area,
        emf: -omega * p.b_field * area * (omega * t).sin(),
    }
}

/// Ampere's law: enclosed current I, circular path of radius r.
pub fn ampere(p: &AmpereParams) -> AmpereReadout {
    AmpereReadout {
        field: MU_0 * p.current / (2.0 * PI * p.path_radius),
        circulation: MU_0 * p.current,
    }
}

/// Plane-wave dispersion: ω = 2πf, k = ω/c, λ = 2π/k.
pub fn wave(p: &WaveParams) -> WaveReadout {
    let omega = TAU * p.frequency;
    let wavenumber = omega / p.speed;
    WaveReadout {
        omega,
        wavenumber,
        wavelength: TAU / wavenumber,
    }
}

/// Field sample of the traveling wave at position `x` and time `t`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaveSample {
    /// E(x,t) = E0·sin(kx − ωt)
    pub e: f64,
    /// Paired magnetic sample at the same phase, B = E/c.
    pub b: f64,
}

pub fn wave_sample(p: &WaveParams, x: f64, t: f64) -> WaveSample {
    let w = wave(p);
    let e = p.amplitude * (w.wavenumber * x - w.omega * t).sin();
    WaveSample { e, b: e / p.speed }
}

/// Evaluates the active mode's formula group for the current frame.
pub fn readout(mode: Mode, params: &Parameters, t: f64) -> Readout {
    match mode {
        Mode::GaussE => Readout::GaussE(gauss_e(&params.gauss_e)),
        Mode::GaussB => Readout::GaussB(gauss_b(&params.gauss_b)),
        Mode::Faraday => Readout::Faraday(faraday(&params.faraday, t)),
        Mode::Ampere => Readout::Ampere(ampere(&params.ampere)),
        Mode::Wave => Readout::Wave(wave(&params.wave)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64, rel: f64) -> bool {
        (a - b).abs() <= rel * b.abs().max(a.abs())
    }

    #[test]
    fn gauss_e_flux_is_independent_of_radius() {
        for radius in [0.5, 1.0, 2.0, 4.0] {
            let r = gauss_e(&GaussEParams { charge: 5.0, radius });
            assert!(approx(r.flux, 5e-6 / EPSILON_0, 1e-12));
        }
    }

    #[test]
    fn gauss_e_field_decreases_with_radius() {
        let mut previous = f64::INFINITY;
        for radius in [0.5, 1.0, 1.5, 2.0, 3.0, 4.0] {
            let r = gauss_e(&GaussEParams { charge: 3.0, radius });
            assert!(r.field < previous);
            previous = r.field;
        }
    }

    #[test]
    fn gauss_e_reference_values() {
        // Q = 5 μC, r = 2 m
        let r = gauss_e(&GaussEParams { charge: 5.0, radius: 2.0 });
        assert!(approx(r.flux, 5.648e5, 1e-3));
        assert!(approx(r.field, 1.124e4, 1e-3));
    }

    #[test]
    fn gauss_b_flux_is_exactly_zero() {
        for current in [0.5, 3.0, 5.0] {
            for distance in [0.5, 1.5, 3.0] {
                let r = gauss_b(&GaussBParams { current, distance });
                assert_eq!(r.flux, 0.0);
            }
        }
    }

    #[test]
    fn gauss_b_reference_value() {
        // I = 3 A, r = 1.5 m -> B = 4.0e-7 T
        let r = gauss_b(&GaussBParams { current: 3.0, distance: 1.5 });
        assert!(approx(r.field, 4.0e-7, 1e-9));
    }

    #[test]
    fn faraday_is_periodic_in_one_over_f() {
        let p = FaradayParams { b_field: 0.5, frequency: 2.0, loop_radius: 0.5 };
        let period = 1.0 / p.frequency;
        for t in [0.0, 0.13, 0.4, 1.77] {
            let a = faraday(&p, t);
            let b = faraday(&p, t + period);
            assert!((a.flux - b.flux).abs() < 1e-9);
            assert!((a.emf - b.emf).abs() < 1e-9);
        }
    }

    #[test]
    fn faraday_emf_vanishes_at_flux_extrema() {
        let p = FaradayParams { b_field: 0.8, frequency: 1.0, loop_radius: 0.4 };
        // Flux extrema sit at t = n/(2f); EMF must be zero there
        for n in 0..4 {
            let t = n as f64 / (2.0 * p.frequency);
            let r = faraday(&p, t);
            assert!(r.emf.abs() < 1e-9, "emf at extremum t={t}: {}", r.emf);
        }
        // And EMF peaks where flux crosses zero (quadrature)
        let quarter = faraday(&p, 1.0 / (4.0 * p.frequency));
        assert!(quarter.flux.abs() < 1e-9);
        let peak = quarter.omega * p.b_field * PI * p.loop_radius * p.loop_radius;
        assert!(approx(quarter.emf.abs(), peak, 1e-9));
    }

    #[test]
    fn ampere_circulation_ignores_path_radius() {
        for path_radius in [0.3, 1.0, 2.0] {
            let r = ampere(&AmpereParams { current: 2.5, path_radius });
            assert!(approx(r.circulation, MU_0 * 2.5, 1e-12));
        }
    }

    #[test]
    fn wave_dispersion_closes() {
        for frequency in [0.5, 1.0, 3.0] {
            for speed in [1.0, 3.0, 5.0] {
                let r = wave(&WaveParams { amplitude: 1.0, frequency, speed });
                assert!(approx(r.wavenumber * r.wavelength, TAU, 1e-12));
            }
        }
    }

    #[test]
    fn wave_sample_pairs_b_with_e_over_c() {
        let p = WaveParams { amplitude: 1.5, frequency: 2.0, speed: 3.0 };
        for (x, t) in [(0.0, 0.0), (2.5, 0.3), (7.1, 1.9)] {
            let s = wave_sample(&p, x, t);
            assert!(approx(s.b, s.e / p.speed, 1e-12) || (s.e == 0.0 && s.b == 0.0));
            assert!(s.e.abs() <= p.amplitude + 1e-12);
        }
    }

    #[test]
    fn readout_dispatches_per_mode() {
        let params = Parameters::default();
        assert!(matches!(readout(Mode::GaussE, &params, 0.0), Readout::GaussE(_)));
        assert!(matches!(readout(Mode::Faraday, &params, 1.0), Readout::Faraday(_)));
        assert!(matches!(readout(Mode::Wave, &params, 0.5), Readout::Wave(_)));
    }
}
