
pub mod error;
pub mod types;
pub mod config;
pub mod audio;
pub mod voices;
mod client;

pub use client::*;
pub use config::SynthesisConfig;
pub use audio::{AudioEncoding, WavSummary, inspect_wav};

pub use error::{
    ErrorDescription,
    GenericError,
};

/// Status code the backend reports for a successful synthesis.
pub const SUCCESS_CODE: i64 = 3000;

#[non_exhaustive]
#[derive(Debug)]
pub enum SynthesisErrorDescription {
    /// Connection failure, timeout, or an interrupted response body.
    Transport(reqwest::Error),
    /// The response body is not JSON of the expected shape.
    Deserialization(serde_json::Error),
    /// The backend answered with a code other than [`SUCCESS_CODE`].
    /// The code itself is only logged.
    ResponseCode,
    /// The `data` field is not valid base64.
    Decode(base64::DecodeError),
    /// Success code, but no audio payload.
    EmptyAudio,
    InvalidConfiguration(String),
    Runtime(std::io::Error),
    InvalidAudio(hound::Error),
}

impl ErrorDescription for SynthesisErrorDescription {
    #[allow(refining_impl_trait)]
    fn description(&self) -> String {
        match self {
            Self::Transport(e) => format!("http post failed: {}", e),
            Self::Deserialization(e) => format!("unmarshal response failed: {}", e),
            Self::ResponseCode => "response code failure".to_string(),
            Self::Decode(e) => format!("audio payload is not valid base64: {}", e),
            Self::EmptyAudio => "response carried no audio data".to_string(),
            Self::InvalidConfiguration(msg) => format!("invalid configuration: {}", msg),
            Self::Runtime(e) => format!("failed to start async runtime: {}", e),
            Self::InvalidAudio(e) => format!("invalid WAV audio: {}", e),
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            Self::Transport(_) => "Transport",
            Self::Deserialization(_) => "Deserialization",
            Self::ResponseCode => "ResponseCode",
            Self::Decode(_) => "Decode",
            Self::EmptyAudio => "EmptyAudio",
            Self::InvalidConfiguration(_) => "InvalidConfiguration",
            Self::Runtime(_) => "Runtime",
            Self::InvalidAudio(_) => "InvalidAudio",
        }
    }

    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Transport(e) => Some(e),
            Self::Deserialization(e) => Some(e),
            Self::Decode(e) => Some(e),
            Self::Runtime(e) => Some(e),
            Self::InvalidAudio(e) => Some(e),
            Self::ResponseCode | Self::EmptyAudio | Self::InvalidConfiguration(_) => None,
        }
    }
}

pub type SynthesisError = GenericError<SynthesisErrorDescription>;

impl SynthesisError {
    pub fn invalid_configuration(msg: impl Into<String>) -> Self {
        Self::new(SynthesisErrorDescription::InvalidConfiguration(msg.into()))
    }

    /// True when the request was aborted by the client timeout.
    pub fn is_timeout(&self) -> bool {
        matches!(self.as_inner(), SynthesisErrorDescription::Transport(e) if e.is_timeout())
    }
}
