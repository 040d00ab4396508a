//! Frame-snapshot serialization and delivery, plus the progress-persistence
//! seam. The engine never talks to an output or a store directly; it goes
//! through the `Serializer`, `Sender` and `ProgressStore` traits here.

pub mod progress;

use std::io::{self, Write};

use serde::Serialize;
use thiserror::Error;

use fieldlab_config::{Mode, SenderType, SerializerType};
use fieldlab_simulation::Readout;

// --- Error Type ---

#[derive(Error, Debug)]
pub enum TransportError {
    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Binary encoding failed: {0}")]
    Encoding(#[from] bincode::Error),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Progress store rejected the update: {0}")]
    Store(String),
}

// --- Frame Snapshot ---

/// What the outside world sees of one frame: the active mode, the phase
/// time it was drawn at, and the live formula readout.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FrameSnapshot {
    pub mode: Mode,
    pub frame: u64,
    pub time: f64,
    pub readout: Readout,
}

// --- Traits ---

/// Turns a frame snapshot into a wire representation.
pub trait Serializer: Send + Sync {
    fn serialize(&self, snapshot: &FrameSnapshot) -> Result<String, TransportError>;
}

/// Delivers serialized data to a destination.
pub trait Sender {
    fn send(&mut self, data: &[u8]) -> Result<(), TransportError>;
}

// --- Implementations ---

pub struct JsonSerializer;

impl Serializer for JsonSerializer {
    fn serialize(&self, snapshot: &FrameSnapshot) -> Result<String, TransportError> {
        Ok(serde_json::to_string(snapshot)?)
    }
}

/// Compact binary encoding, base64-wrapped for line-oriented transports.
pub struct BinarySerializer;

impl Serializer for BinarySerializer {
    fn serialize(&self, snapshot: &FrameSnapshot) -> Result<String, TransportError> {
        let bytes = bincode::serialize(snapshot)?;
        Ok(base64::encode(bytes))
    }
}

/// Writes one snapshot per line to standard output.
pub struct StdioSender {
    stdout: io::Stdout,
}

impl StdioSender {
    pub fn new() -> Self {
        Self { stdout: io::stdout() }
    }
}

impl Default for StdioSender {
    fn default() -> Self {
        Self::new()
    }
}

impl Sender for StdioSender {
    fn send(&mut self, data: &[u8]) -> Result<(), TransportError> {
        self.stdout.write_all(data)?;
        self.stdout.write_all(b"\n")?;
        self.stdout.flush()?;
        Ok(())
    }
}

/// Discards everything; useful when only the visualization matters.
pub struct NullSender;

impl Sender for NullSender {
    fn send(&mut self, _data: &[u8]) -> Result<(), TransportError> {
        Ok(())
    }
}

pub fn create_serializer(kind: SerializerType) -> Box<dyn Serializer> {
    match kind {
        SerializerType::Json => Box::new(JsonSerializer),
        SerializerType::Binary => Box::new(BinarySerializer),
    }
}

pub fn create_sender(kind: SenderType) -> Box<dyn Sender> {
    match kind {
        SenderType::Stdio => Box::new(StdioSender::new()),
        SenderType::Null => Box::new(NullSender),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fieldlab_config::Parameters;
    use fieldlab_simulation::readout;

    fn snapshot() -> FrameSnapshot {
        FrameSnapshot {
            mode: Mode::GaussE,
            frame: 42,
            time: 0.84,
            readout: readout(Mode::GaussE, &Parameters::default(), 0.84),
        }
    }

    #[test]
    fn json_serializer_exposes_mode_and_readout() {
        let out = JsonSerializer.serialize(&snapshot()).unwrap();
        assert!(out.contains(r#""mode":"gauss-e"#));
        assert!(out.contains(r#""flux":"#));
        assert!(out.contains(r#""frame":42"#));
    }

    #[test]
    fn binary_serializer_produces_decodable_base64() {
        let out = BinarySerializer.serialize(&snapshot()).unwrap();
        let bytes = base64::decode(&out).unwrap();
        assert!(!bytes.is_empty());
    }

    #[test]
    fn null_sender_accepts_anything() {
        let mut sender = NullSender;
        assert!(sender.send(b"whatever").is_ok());
    }
}
