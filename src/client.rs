
use base64::{Engine, engine::general_purpose::STANDARD as BASE64};
use uuid::Uuid;

use crate::types::{AppGroup, AudioGroup, RequestGroup, SynthesisRequest, SynthesisResponse, UserGroup};
use crate::config::SynthesisConfig;
use crate::{SynthesisError, SynthesisErrorDescription};

const TEXT_TYPE: &str = "plain";
const OPERATION: &str = "query";
const LOGGED_TEXT_CHARS: usize = 50;

/// Client for the synthesis endpoint. Each call is one POST with no retry;
/// the underlying connection pool is reused between calls.
#[derive(Debug, Clone)]
pub struct SynthesisClient {
    config: SynthesisConfig,
    http: reqwest::Client,
}

impl SynthesisClient {
    pub fn new(config: SynthesisConfig) -> Result<Self, SynthesisError> {
        config.validate()?;
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| SynthesisError::invalid_configuration(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self { config, http })
    }

    pub fn config(&self) -> &SynthesisConfig {
        &self.config
    }

    /// Request body for `text`, carrying a freshly generated reqid.
    pub fn build_request(&self, text: &str) -> SynthesisRequest {
        let config = &self.config;
        SynthesisRequest {
            app: AppGroup {
                appid: config.app_id.clone(),
                token: config.app_token.clone(),
                cluster: config.cluster.clone(),
            },
            user: UserGroup {
                uid: config.uid.clone(),
            },
            audio: AudioGroup {
                voice_type: config.voice_type.clone(),
                encoding: config.encoding,
                speed_ratio: config.speed_ratio,
                volume_ratio: config.volume_ratio,
                pitch_ratio: config.pitch_ratio,
            },
            request: RequestGroup {
                reqid: Uuid::new_v4().to_string(),
                text: text.to_owned(),
                text_type: TEXT_TYPE.to_string(),
                operation: OPERATION.to_string(),
            },
        }
    }

    pub async fn synthesize(&self, text: &str) -> Result<Vec<u8>, SynthesisError> {
        let request = self.build_request(text);

        log::info!(
            "Sending synthesis request: reqid={} voice_type={} encoding={} text={:?}",
            request.request.reqid,
            request.audio.voice_type,
            request.audio.encoding.as_str(),
            truncate_for_log(text),
        );

        let res = self.http
            .post(&self.config.endpoint)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .header(reqwest::header::AUTHORIZATION, format!("Bearer;{}", self.config.bearer_token))
            .json(&request)
            .send()
            .await;
        let res = match res {
            Ok(res) => res,
            Err(e) => {
                log::error!("http post fail [err:{}]", e);
                return Err(SynthesisError::new(SynthesisErrorDescription::Transport(e)));
            }
        };

        let status = res.status();
        let body = match res.bytes().await {
            Ok(body) => body,
            Err(e) => {
                log::error!("reading response body failed [status:{}] [err:{}]", status, e);
                return Err(SynthesisError::new(SynthesisErrorDescription::Transport(e)));
            }
        };

        let response = match SynthesisResponse::from_slice(&body) {
            Ok(v) => v,
            Err(e) => {
                log::error!("unmarshal response fail [status:{}] [body_len:{}] [err:{}]", status, body.len(), e);
                return Err(SynthesisError::new(SynthesisErrorDescription::Deserialization(e)));
            }
        };

        log::info!("Received response [status:{}] {}", status, response.redacted());

        decode_response(&response)
    }

    /// Runs [`Self::synthesize`] to completion on a private runtime.
    ///
    /// Panics if called from within an async context; use the async
    /// method there instead.
    pub fn synthesize_blocking(&self, text: &str) -> Result<Vec<u8>, SynthesisError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| SynthesisError::new(SynthesisErrorDescription::Runtime(e)))?;
        runtime.block_on(self.synthesize(text))
    }
}

/// Checks the status code and decodes the audio payload.
pub fn decode_response(response: &SynthesisResponse) -> Result<Vec<u8>, SynthesisError> {
    if !response.is_success() {
        log::error!("code fail [code:{}] [message:{}]", response.code, response.message);
        return Err(SynthesisError::new(SynthesisErrorDescription::ResponseCode));
    }

    if response.data.is_empty() {
        log::error!("no audio data in response [reqid:{}]", response.reqid);
        return Err(SynthesisError::new(SynthesisErrorDescription::EmptyAudio));
    }

    let audio = BASE64
        .decode(response.data.as_bytes())
        .map_err(|e| {
            log::error!("decoding audio payload failed [reqid:{}] [err:{}]", response.reqid, e);
            SynthesisError::new(SynthesisErrorDescription::Decode(e))
        })?;

    log::debug!("Decoded {} audio bytes", audio.len());

    Ok(audio)
}

fn truncate_for_log(text: &str) -> String {
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(LOGGED_TEXT_CHARS).collect();
    if chars.next().is_some() {
        format!("{}...", head)
    } else {
        head
    }
}
