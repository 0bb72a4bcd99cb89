
use std::io::Cursor;
use std::str::FromStr;
use std::time::Duration;

use clap::ValueEnum;
use hound::WavReader;
use serde::{Deserialize, Serialize};

use crate::{SynthesisError, SynthesisErrorDescription};

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum AudioEncoding {
    #[default]
    Wav,
    Mp3,
}

impl AudioEncoding {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Wav => "wav",
            Self::Mp3 => "mp3",
        }
    }

    pub fn extension(&self) -> &'static str {
        self.as_str()
    }
}

impl FromStr for AudioEncoding {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "wav" => Ok(Self::Wav),
            "mp3" => Ok(Self::Mp3),
            other => Err(format!("unsupported encoding: {} (expected wav or mp3)", other)),
        }
    }
}

/// Header facts about a synthesized WAV payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavSummary {
    pub sample_rate: u32,
    pub channels: u16,
    pub bits_per_sample: u16,
    /// Sample frames, i.e. samples per channel.
    pub frames: u32,
}

impl WavSummary {
    pub fn duration(&self) -> Duration {
        if self.sample_rate == 0 {
            return Duration::ZERO;
        }
        Duration::from_secs_f64(self.frames as f64 / self.sample_rate as f64)
    }
}

pub fn inspect_wav(bytes: &[u8]) -> Result<WavSummary, SynthesisError> {
    let reader = WavReader::new(Cursor::new(bytes))
        .map_err(|e| SynthesisError::new(SynthesisErrorDescription::InvalidAudio(e)))?;
    let spec = reader.spec();
    Ok(WavSummary {
        sample_rate: spec.sample_rate,
        channels: spec.channels,
        bits_per_sample: spec.bits_per_sample,
        frames: reader.duration(),
    })
}
