use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

// --- Error Type ---

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Validation(String),

    #[error("Unknown parameter '{0}' for mode '{1}'")]
    UnknownParameter(String, Mode),
}

// --- Simulation Modes ---

/// The five selectable field visualizations. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Mode {
    GaussE,
    GaussB,
    Faraday,
    Ampere,
    Wave,
}

impl Mode {
    pub const ALL: [Mode; 5] = [
        Mode::GaussE,
        Mode::GaussB,
        Mode::Faraday,
        Mode::Ampere,
        Mode::Wave,
    ];

    /// Position of this mode in the fixed tab order.
    pub fn index(self) -> usize {
        match self {
            Mode::GaussE => 0,
            Mode::GaussB => 1,
            Mode::Faraday => 2,
            Mode::Ampere => 3,
            Mode::Wave => 4,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Mode::GaussE => "Gauss's law (E)",
            Mode::GaussB => "Gauss's law (B)",
            Mode::Faraday => "Faraday's law",
            Mode::Ampere => "Ampere-Maxwell law",
            Mode::Wave => "EM waves",
        }
    }

    /// Parses the identifiers used on the wire and on the control channel.
    pub fn parse(name: &str) -> Option<Mode> {
        match name {
            "gauss-e" => Some(Mode::GaussE),
            "gauss-b" => Some(Mode::GaussB),
            "faraday" => Some(Mode::Faraday),
            "ampere" => Some(Mode::Ampere),
            "wave" => Some(Mode::Wave),
            _ => None,
        }
    }

    pub fn id(self) -> &'static str {
        match self {
            Mode::GaussE => "gauss-e",
            Mode::GaussB => "gauss-b",
            Mode::Faraday => "faraday",
            Mode::Ampere => "ampere",
            Mode::Wave => "wave",
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

// --- Parameter Ranges ---

/// Closed numeric range with a step granularity for one tunable parameter.
#[derive(Debug, Clone, Copy)]
pub struct ParamRange {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl ParamRange {
    pub const fn new(min: f64, max: f64, step: f64) -> Self {
        Self { min, max, step }
    }

    /// Snaps a value to the step grid and clamps it into the range.
    /// Non-finite inputs collapse to the minimum bound.
    pub fn clamp(&self, value: f64) -> f64 {
        if !value.is_finite() {
            return self.min;
        }
        let snapped = self.min + ((value - self.min) / self.step).round() * self.step;
        snapped.clamp(self.min, self.max)
    }

    pub fn contains(&self, value: f64) -> bool {
        value.is_finite() && value >= self.min && value <= self.max
    }
}

// --- Per-Mode Parameter Records ---

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GaussEParams {
    /// Enclosed charge in microcoulombs.
    pub charge: f64,
    /// Gaussian surface radius in meters.
    pub radius: f64,
}

impl GaussEParams {
    pub const CHARGE: ParamRange = ParamRange::new(-10.0, 10.0, 1.0);
    pub const RADIUS: ParamRange = ParamRange::new(0.5, 4.0, 0.1);

    pub fn clamped(self) -> Self {
        Self {
            charge: Self::CHARGE.clamp(self.charge),
            radius: Self::RADIUS.clamp(self.radius),
        }
    }
}

impl Default for GaussEParams {
    fn default() -> Self {
        Self { charge: 5.0, radius: 2.0 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GaussBParams {
    /// Wire current in amperes.
    pub current: f64,
    /// Distance from the wire in meters.
    pub distance: f64,
}

impl GaussBParams {
    pub const CURRENT: ParamRange = ParamRange::new(0.5, 5.0, 0.1);
    pub const DISTANCE: ParamRange = ParamRange::new(0.5, 3.0, 0.1);

    pub fn clamped(self) -> Self {
        Self {
            current: Self::CURRENT.clamp(self.current),
            distance: Self::DISTANCE.clamp(self.distance),
        }
    }
}

impl Default for GaussBParams {
    fn default() -> Self {
        Self { current: 3.0, distance: 1.5 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FaradayParams {
    /// Peak magnetic field B0 in teslas.
    pub b_field: f64,
    /// Oscillation frequency in hertz.
    pub frequency: f64,
    /// Induction loop radius in meters.
    pub loop_radius: f64,
}

impl FaradayParams {
    pub const B_FIELD: ParamRange = ParamRange::new(0.1, 1.0, 0.05);
    pub const FREQUENCY: ParamRange = ParamRange::new(0.2, 3.0, 0.1);
    pub const LOOP_RADIUS: ParamRange = ParamRange::new(0.2, 1.0, 0.05);

    pub fn clamped(self) -> Self {
        Self {
            b_field: Self::B_FIELD.clamp(self.b_field),
            frequency: Self::FREQUENCY.clamp(self.frequency),
            loop_radius: Self::LOOP_RADIUS.clamp(self.loop_radius),
        }
    }
}

impl Default for FaradayParams {
    fn default() -> Self {
        Self { b_field: 0.5, frequency: 1.0, loop_radius: 0.5 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AmpereParams {
    /// Enclosed current in amperes.
    pub current: f64,
    /// Amperian path radius in meters.
    pub path_radius: f64,
}

impl AmpereParams {
    pub const CURRENT: ParamRange = ParamRange::new(0.0, 5.0, 0.1);
    pub const PATH_RADIUS: ParamRange = ParamRange::new(0.3, 2.0, 0.1);

    pub fn clamped(self) -> Self {
        Self {
            current: Self::CURRENT.clamp(self.current),
            path_radius: Self::PATH_RADIUS.clamp(self.path_radius),
        }
    }
}

impl Default for AmpereParams {
    fn default() -> Self {
        Self { current: 2.0, path_radius: 1.0 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WaveParams {
    /// Electric field amplitude E0 in volts per meter.
    pub amplitude: f64,
    /// Wave frequency in hertz.
    pub frequency: f64,
    /// Propagation speed (scaled units).
    pub speed: f64,
}

impl WaveParams {
    pub const AMPLITUDE: ParamRange = ParamRange::new(0.1, 2.0, 0.1);
    pub const FREQUENCY: ParamRange = ParamRange::new(0.5, 3.0, 0.1);
    pub const SPEED: ParamRange = ParamRange::new(1.0, 5.0, 0.5);

    pub fn clamped(self) -> Self {
        Self {
            amplitude: Self::AMPLITUDE.clamp(self.amplitude),
            frequency: Self::FREQUENCY.clamp(self.frequency),
            speed: Self::SPEED.clamp(self.speed),
        }
    }
}

impl Default for WaveParams {
    fn default() -> Self {
        Self { amplitude: 1.0, frequency: 1.0, speed: 3.0 }
    }
}

/// All tunable parameters, one flat record per mode. Mutated only through
/// `apply`, which clamps to the documented ranges; read-only to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Parameters {
    pub gauss_e: GaussEParams,
    pub gauss_b: GaussBParams,
    pub faraday: FaradayParams,
    pub ampere: AmpereParams,
    pub wave: WaveParams,
}

impl Parameters {
    /// Re-clamps every field into its valid range.
    pub fn clamped(self) -> Self {
        Self {
            gauss_e: self.gauss_e.clamped(),
            gauss_b: self.gauss_b.clamped(),
            faraday: self.faraday.clamped(),
            ampere: self.ampere.clamped(),
            wave: self.wave.clamped(),
        }
    }

    /// Applies a named parameter edit for one mode. Returns the value that
    /// was actually stored after snapping and clamping.
    pub fn apply(&mut self, mode: Mode, key: &str, value: f64) -> Result<f64, ConfigError> {
        let stored = match (mode, key) {
            (Mode::GaussE, "charge") => {
                self.gauss_e.charge = GaussEParams::CHARGE.clamp(value);
                self.gauss_e.charge
            }
            (Mode::GaussE, "radius") => {
                self.gauss_e.radius = GaussEParams::RADIUS.clamp(value);
                self.gauss_e.radius
            }
            (Mode::GaussB, "current") => {
                self.gauss_b.current = GaussBParams::CURRENT.clamp(value);
                self.gauss_b.current
            }
            (Mode::GaussB, "distance") => {
                self.gauss_b.distance = GaussBParams::DISTANCE.clamp(value);
                self.gauss_b.distance
            }
            (Mode::Faraday, "b_field") => {
                self.faraday.b_field = FaradayParams::B_FIELD.clamp(value);
                self.faraday.b_field
            }
            (Mode::Faraday, "frequency") => {
                self.faraday.frequency = FaradayParams::FREQUENCY.clamp(value);
                self.faraday.frequency
            }
            (Mode::Faraday, "loop_radius") => {
                self.faraday.loop_radius = FaradayParams::LOOP_RADIUS.clamp(value);
                self.faraday.loop_radius
            }
            (Mode::Ampere, "current") => {
                self.ampere.current = AmpereParams::CURRENT.clamp(value);
                self.ampere.current
            }
            (Mode::Ampere, "path_radius") => {
                self.ampere.path_radius = AmpereParams::PATH_RADIUS.clamp(value);
                self.ampere.path_radius
            }
            (Mode::Wave, "amplitude") => {
                self.wave.amplitude = WaveParams::AMPLITUDE.clamp(value);
                self.wave.amplitude
            }
            (Mode::Wave, "frequency") => {
                self.wave.frequency = WaveParams::FREQUENCY.clamp(value);
                self.wave.frequency
            }
            (Mode::Wave, "speed") => {
                self.wave.speed = WaveParams::SPEED.clamp(value);
                self.wave.speed
            }
            _ => return Err(ConfigError::UnknownParameter(key.to_string(), mode)),
        };
        Ok(stored)
    }
}

// --- Transport Configuration ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SerializerType {
    Json,
    Binary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SenderType {
    Stdio,
    Null,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransportConfig {
    #[serde(rename = "type", default = "default_serializer")]
    pub serializer: SerializerType,
    #[serde(default = "default_sender")]
    pub sender: SenderType,
    /// Emit a frame snapshot every N frames.
    #[serde(default = "default_output_frequency")]
    pub output_frequency: u32,
}

fn default_serializer() -> SerializerType {
    SerializerType::Json
}

fn default_sender() -> SenderType {
    SenderType::Stdio
}

fn default_output_frequency() -> u32 {
    30
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            serializer: default_serializer(),
            sender: default_sender(),
            output_frequency: default_output_frequency(),
        }
    }
}

// --- Session / Surface Settings ---

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurfaceSettings {
    /// Container width in pixels; every mode surface is resized to this.
    #[serde(default = "default_surface_width")]
    pub width: u32,
    /// Fixed surface height in pixels.
    #[serde(default = "default_surface_height")]
    pub height: u32,
}

fn default_surface_width() -> u32 {
    800
}

fn default_surface_height() -> u32 {
    400
}

impl Default for SurfaceSettings {
    fn default() -> Self {
        Self {
            width: default_surface_width(),
            height: default_surface_height(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSettings {
    /// Guest sessions never persist progress.
    #[serde(default)]
    pub guest: bool,
    /// Module identifier reported to the progress store.
    #[serde(default = "default_module_id")]
    pub module_id: u32,
    /// Where the file-backed progress store writes, if configured.
    #[serde(default)]
    pub progress_path: Option<String>,
}

fn default_module_id() -> u32 {
    4
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            guest: false,
            module_id: default_module_id(),
            progress_path: None,
        }
    }
}

// --- Top-Level Config ---

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub framerate: u32,
    pub surface: SurfaceSettings,
    pub parameters: Parameters,
    pub session: SessionSettings,
    pub transport: TransportConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            framerate: 60,
            surface: SurfaceSettings::default(),
            parameters: Parameters::default(),
            session: SessionSettings::default(),
            transport: TransportConfig::default(),
        }
    }
}

/// Loads, validates and clamps a configuration from a JSON file.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = fs::read_to_string(path)?;
    let mut config: Config = serde_json::from_str(&content)?;
    validate(&config)?;
    // Out-of-range slider values in the file are snapped rather than rejected.
    config.parameters = config.parameters.clamped();
    Ok(config)
}

pub fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.framerate == 0 {
        return Err(ConfigError::Validation(
            "Framerate must be greater than 0".to_string(),
        ));
    }
    if config.surface.width == 0 || config.surface.height == 0 {
        return Err(ConfigError::Validation(
            "Surface dimensions must be positive".to_string(),
        ));
    }
    if config.transport.output_frequency == 0 {
        return Err(ConfigError::Validation(
            "Output frequency must be greater than 0".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn load_valid_config() {
        let content = r#"{
          "framerate": 30,
          "surface": { "width": 640, "height": 400 },
          "parameters": {
            "gauss_e": { "charge": -3.0, "radius": 1.5 }
          },
          "session": { "guest": true },
          "transport": { "type": "binary", "sender": "null", "output_frequency": 10 }
        }"#;
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.framerate, 30);
        assert_eq!(config.surface.width, 640);
        assert_eq!(config.parameters.gauss_e.charge, -3.0);
        // Unspecified records fall back to defaults
        assert_eq!(config.parameters.faraday, FaradayParams::default());
        assert!(config.session.guest);
        assert_eq!(config.transport.serializer, SerializerType::Binary);
        assert_eq!(config.transport.sender, SenderType::Null);
        assert_eq!(config.transport.output_frequency, 10);
    }

    #[test]
    fn load_invalid_framerate() {
        let content = r#"{ "framerate": 0 }"#;
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        let result = load_config(file.path());
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn out_of_range_values_are_clamped_on_load() {
        let content = r#"{
          "parameters": { "gauss_e": { "charge": 99.0, "radius": 0.0 } }
        }"#;
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        let config = load_config(file.path()).unwrap();
        assert_eq!(config.parameters.gauss_e.charge, 10.0);
        assert_eq!(config.parameters.gauss_e.radius, 0.5);
    }

    #[test]
    fn range_clamp_snaps_to_step() {
        let range = ParamRange::new(0.5, 4.0, 0.1);
        assert!((range.clamp(1.234) - 1.2).abs() < 1e-9);
        assert_eq!(range.clamp(10.0), 4.0);
        assert_eq!(range.clamp(-1.0), 0.5);
        assert_eq!(range.clamp(f64::NAN), 0.5);
        assert_eq!(range.clamp(f64::INFINITY), 0.5);
    }

    #[test]
    fn apply_clamps_and_rejects_unknown_keys() {
        let mut params = Parameters::default();
        let stored = params.apply(Mode::GaussE, "charge", 42.0).unwrap();
        assert_eq!(stored, 10.0);
        assert_eq!(params.gauss_e.charge, 10.0);

        let stored = params.apply(Mode::Wave, "speed", 2.3).unwrap();
        assert!((stored - 2.5).abs() < 1e-9); // snapped to 0.5 step

        let err = params.apply(Mode::GaussE, "frequency", 1.0);
        assert!(matches!(err, Err(ConfigError::UnknownParameter(_, _))));
        // Failed edits leave everything untouched
        assert_eq!(params.faraday, FaradayParams::default());
    }

    #[test]
    fn mode_identifiers_round_trip() {
        for mode in Mode::ALL {
            assert_eq!(Mode::parse(mode.id()), Some(mode));
        }
        assert_eq!(Mode::parse("bogus"), None);
        assert_eq!(Mode::GaussE.index(), 0);
        assert_eq!(Mode::Wave.index(), 4);
    }

    #[test]
    fn defaults_match_initial_slider_positions() {
        let params = Parameters::default();
        assert_eq!(params.gauss_e.charge, 5.0);
        assert_eq!(params.gauss_e.radius, 2.0);
        assert_eq!(params.gauss_b.current, 3.0);
        assert_eq!(params.gauss_b.distance, 1.5);
        assert_eq!(params.faraday.b_field, 0.5);
        assert_eq!(params.ampere.current, 2.0);
        assert_eq!(params.wave.speed, 3.0);
    }
}
