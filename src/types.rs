use serde::{Deserialize, Serialize};

use crate::audio::AudioEncoding;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SynthesisRequest {
    pub app: AppGroup,
    pub user: UserGroup,
    pub audio: AudioGroup,
    pub request: RequestGroup,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct AppGroup {
    pub appid: String,
    pub token: String,
    pub cluster: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct UserGroup {
    pub uid: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct AudioGroup {
    pub voice_type: String,
    pub encoding: AudioEncoding,
    pub speed_ratio: f64,
    pub volume_ratio: f64,
    pub pitch_ratio: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RequestGroup {
    pub reqid: String,
    pub text: String,
    pub text_type: String,
    pub operation: String,
}

/// Body returned by the synthesis endpoint. Absent fields take their zero
/// value, so an empty object parses and then fails the code check. Parse
/// bodies with [`SynthesisResponse::from_slice`], which only accepts objects.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct SynthesisResponse {
    pub reqid: String,
    pub code: i64,
    #[serde(rename = "Message", alias = "message")]
    pub message: String,
    pub operation: String,
    pub sequence: i64,
    /// Base64 encoded audio.
    pub data: String,
}

impl SynthesisResponse {
    /// Parses a response body. Only a JSON object is accepted; the derived
    /// deserializer alone would also take a positional array.
    pub fn from_slice(body: &[u8]) -> Result<Self, serde_json::Error> {
        match serde_json::from_slice(body)? {
            serde_json::Value::Object(map) => serde_json::from_value(serde_json::Value::Object(map)),
            other => Err(serde::de::Error::invalid_type(unexpected(&other), &"a JSON object")),
        }
    }

    pub fn is_success(&self) -> bool {
        self.code == crate::SUCCESS_CODE
    }

    /// One-line summary safe to log: the payload is reported by length only.
    pub fn redacted(&self) -> String {
        format!(
            "reqid={} code={} message={:?} operation={} sequence={} data=<{} base64 chars>",
            self.reqid, self.code, self.message, self.operation, self.sequence, self.data.len()
        )
    }
}

fn unexpected(value: &serde_json::Value) -> serde::de::Unexpected<'_> {
    use serde::de::Unexpected;
    match value {
        serde_json::Value::Null => Unexpected::Unit,
        serde_json::Value::Bool(b) => Unexpected::Bool(*b),
        serde_json::Value::Number(_) => Unexpected::Other("number"),
        serde_json::Value::String(s) => Unexpected::Str(s),
        serde_json::Value::Array(_) => Unexpected::Seq,
        serde_json::Value::Object(_) => Unexpected::Map,
    }
}
