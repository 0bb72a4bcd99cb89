
use seedtts_http::{SynthesisClient, SynthesisConfig, SynthesisError};

const DEMO_TEXT: &str = "字节跳动语音合成";

fn main() {
    env_logger::init();

    println!("{}", demo_outcome(SynthesisConfig::from_env()));
}

/// Every failure, including a bad environment, ends up as a printed line.
fn demo_outcome(config: Result<SynthesisConfig, SynthesisError>) -> String {
    let result = config
        .and_then(SynthesisClient::new)
        .and_then(|client| client.synthesize_blocking(DEMO_TEXT));

    match result {
        Ok(audio) => format!("get audio succ len[{}]", audio.len()),
        Err(e) => format!("synthesis fail [err:{}]", e),
    }
}
