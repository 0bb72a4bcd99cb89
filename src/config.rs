//! Connection and voice settings for the synthesis endpoint.
//!
//! Settings come from the environment (`SEEDTTS_*`, with the `VOLCENGINE_*`
//! names accepted as fallbacks) or from a JSON file using the field names
//! of [`SynthesisConfig`].

use std::fmt::{self, Debug};
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::audio::AudioEncoding;
use crate::SynthesisError;

pub const DEFAULT_HOST: &str = "openspeech.bytedance.com";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_VOICE_TYPE: &str = "BV001_streaming";

/// Value of `app.token`. The backend ignores it; authentication happens
/// through the bearer token header.
pub const PLACEHOLDER_APP_TOKEN: &str = "access_token";

pub const SPEED_RATIO_RANGE: (f64, f64) = (0.2, 3.0);
pub const VOLUME_RATIO_RANGE: (f64, f64) = (0.1, 3.0);
pub const PITCH_RATIO_RANGE: (f64, f64) = (0.1, 3.0);

pub fn endpoint_for_host(host: &str) -> String {
    format!("https://{}/api/v1/tts", host.trim_end_matches('/'))
}

#[derive(Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SynthesisConfig {
    pub endpoint: String,
    pub bearer_token: String,
    pub app_id: String,
    pub app_token: String,
    pub cluster: String,
    pub uid: String,
    pub voice_type: String,
    pub encoding: AudioEncoding,
    pub speed_ratio: f64,
    pub volume_ratio: f64,
    pub pitch_ratio: f64,
    #[serde(rename = "timeout_secs", deserialize_with = "duration_from_secs")]
    pub timeout: Duration,
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            endpoint: endpoint_for_host(DEFAULT_HOST),
            bearer_token: String::new(),
            app_id: String::new(),
            app_token: PLACEHOLDER_APP_TOKEN.to_string(),
            cluster: String::new(),
            uid: "uid".to_string(),
            voice_type: DEFAULT_VOICE_TYPE.to_string(),
            encoding: AudioEncoding::default(),
            speed_ratio: 1.0,
            volume_ratio: 1.0,
            pitch_ratio: 1.0,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl Debug for SynthesisConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let token = if self.bearer_token.is_empty() { "<unset>" } else { "<redacted>" };
        f.debug_struct("SynthesisConfig")
            .field("endpoint", &self.endpoint)
            .field("bearer_token", &token)
            .field("app_id", &self.app_id)
            .field("cluster", &self.cluster)
            .field("uid", &self.uid)
            .field("voice_type", &self.voice_type)
            .field("encoding", &self.encoding)
            .field("speed_ratio", &self.speed_ratio)
            .field("volume_ratio", &self.volume_ratio)
            .field("pitch_ratio", &self.pitch_ratio)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl SynthesisConfig {
    pub fn new(
        endpoint: impl Into<String>,
        bearer_token: impl Into<String>,
        app_id: impl Into<String>,
        cluster: impl Into<String>,
        voice_type: impl Into<String>,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            bearer_token: bearer_token.into(),
            app_id: app_id.into(),
            cluster: cluster.into(),
            voice_type: voice_type.into(),
            ..Self::default()
        }
    }

    /// Reads the process environment, after loading `.env` if one exists.
    pub fn from_env() -> Result<Self, SynthesisError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary key lookup. Unset and empty values
    /// fall back to defaults; `validate` decides whether the result is usable.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, SynthesisError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(endpoint) = first_set(&lookup, &["SEEDTTS_ENDPOINT"]) {
            config.endpoint = endpoint;
        } else if let Some(host) = first_set(&lookup, &["SEEDTTS_HOST", "VOLCENGINE_HOST"]) {
            config.endpoint = endpoint_for_host(&host);
        }
        if let Some(token) = first_set(&lookup, &["SEEDTTS_BEARER_TOKEN", "SEEDTTS_ACCESS_TOKEN", "VOLCENGINE_ACCESS_TOKEN"]) {
            config.bearer_token = token;
        }
        if let Some(app_id) = first_set(&lookup, &["SEEDTTS_APP_ID", "VOLCENGINE_APP_ID"]) {
            config.app_id = app_id;
        }
        if let Some(cluster) = first_set(&lookup, &["SEEDTTS_CLUSTER", "VOLCENGINE_CLUSTER"]) {
            config.cluster = cluster;
        }
        if let Some(voice_type) = first_set(&lookup, &["SEEDTTS_VOICE_TYPE"]) {
            config.voice_type = voice_type;
        }
        if let Some(uid) = first_set(&lookup, &["SEEDTTS_UID"]) {
            config.uid = uid;
        }
        if let Some(encoding) = first_set(&lookup, &["SEEDTTS_ENCODING"]) {
            config.encoding = encoding.parse().map_err(|e| SynthesisError::invalid_configuration(format!("SEEDTTS_ENCODING: {}", e)))?;
        }
        if let Some(value) = first_set(&lookup, &["SEEDTTS_SPEED_RATIO"]) {
            config.speed_ratio = parse_number("SEEDTTS_SPEED_RATIO", &value)?;
        }
        if let Some(value) = first_set(&lookup, &["SEEDTTS_VOLUME_RATIO"]) {
            config.volume_ratio = parse_number("SEEDTTS_VOLUME_RATIO", &value)?;
        }
        if let Some(value) = first_set(&lookup, &["SEEDTTS_PITCH_RATIO"]) {
            config.pitch_ratio = parse_number("SEEDTTS_PITCH_RATIO", &value)?;
        }
        if let Some(value) = first_set(&lookup, &["SEEDTTS_TIMEOUT_SECS"]) {
            config.timeout = Duration::from_secs(parse_number("SEEDTTS_TIMEOUT_SECS", &value)?);
        }

        Ok(config)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, SynthesisError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| SynthesisError::invalid_configuration(format!("cannot read {}: {}", path.display(), e)))?;
        serde_json::from_str(&raw)
            .map_err(|e| SynthesisError::invalid_configuration(format!("cannot parse {}: {}", path.display(), e)))
    }

    pub fn validate(&self) -> Result<(), SynthesisError> {
        let required = [
            ("endpoint", &self.endpoint, "SEEDTTS_ENDPOINT"),
            ("bearer_token", &self.bearer_token, "SEEDTTS_BEARER_TOKEN"),
            ("app_id", &self.app_id, "SEEDTTS_APP_ID"),
            ("cluster", &self.cluster, "SEEDTTS_CLUSTER"),
            ("voice_type", &self.voice_type, "SEEDTTS_VOICE_TYPE"),
        ];
        for (name, value, env) in required {
            if value.trim().is_empty() {
                return Err(SynthesisError::invalid_configuration(format!("{} is required (set {})", name, env)));
            }
        }

        check_ratio("speed_ratio", self.speed_ratio, SPEED_RATIO_RANGE)?;
        check_ratio("volume_ratio", self.volume_ratio, VOLUME_RATIO_RANGE)?;
        check_ratio("pitch_ratio", self.pitch_ratio, PITCH_RATIO_RANGE)?;

        if self.timeout.is_zero() {
            return Err(SynthesisError::invalid_configuration("timeout must be greater than zero"));
        }

        Ok(())
    }
}

fn first_set<F>(lookup: &F, keys: &[&str]) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    keys.iter()
        .filter_map(|&key| lookup(key))
        .map(|value| value.trim().to_string())
        .find(|value| !value.is_empty())
}

fn parse_number<T>(key: &str, value: &str) -> Result<T, SynthesisError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value.parse().map_err(|e| SynthesisError::invalid_configuration(format!("{}: {:?} is not a number ({})", key, value, e)))
}

fn check_ratio(name: &str, value: f64, (min, max): (f64, f64)) -> Result<(), SynthesisError> {
    if !value.is_finite() || value < min || value > max {
        return Err(SynthesisError::invalid_configuration(format!("{} must be within {}..={}, got {}", name, min, max, value)));
    }
    Ok(())
}

fn duration_from_secs<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: serde::Deserializer<'de>,
{
    u64::deserialize(deserializer).map(Duration::from_secs)
}
