
pub(crate) mod output;

use seedtts_http::{AudioEncoding, SynthesisClient, SynthesisConfig};
use seedtts_http::voices::KNOWN_VOICES;

use std::io::Read;
use std::io::Write;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

pub(crate) const DEMO_TEXT: &str = "字节跳动语音合成";

#[derive(Debug, Parser)]
#[command(about = "SeedTTS HTTP synthesis client", long_about = None, version)]
struct Cli {
    /// JSON configuration file (environment variables are used when omitted)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    subcommand: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// One-shot synthesis
    Synthesize(SynthesisArgs),

    /// List known voice types
    #[command()]
    ListVoices {
        /// JSON output
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Default, Args)]
struct SynthesisArgs {
    /// Text to synthesize (defaults to a sample sentence)
    text: Option<String>,

    /// Read the text from standard input
    #[arg(long, conflicts_with = "text")]
    read_stdin: bool,

    /// Voice type
    #[arg(long)]
    voice_type: Option<String>,

    /// Audio encoding
    #[arg(long, value_enum)]
    encoding: Option<AudioEncoding>,

    /// Speed ratio
    #[arg(long)]
    speed_ratio: Option<f64>,

    /// Volume ratio
    #[arg(long)]
    volume_ratio: Option<f64>,

    /// Pitch ratio
    #[arg(long)]
    pitch_ratio: Option<f64>,

    /// User id sent with the request
    #[arg(long)]
    uid: Option<String>,

    /// Write the audio to this file
    #[arg(long)]
    output: Option<PathBuf>,

    /// Write the raw audio to standard output
    #[arg(long, conflicts_with = "output")]
    stdout: bool,
}

impl SynthesisArgs {
    fn apply(&self, config: &mut SynthesisConfig) {
        if let Some(voice_type) = &self.voice_type {
            config.voice_type = voice_type.clone();
        }
        if let Some(encoding) = self.encoding {
            config.encoding = encoding;
        }
        if let Some(speed_ratio) = self.speed_ratio {
            config.speed_ratio = speed_ratio;
        }
        if let Some(volume_ratio) = self.volume_ratio {
            config.volume_ratio = volume_ratio;
        }
        if let Some(pitch_ratio) = self.pitch_ratio {
            config.pitch_ratio = pitch_ratio;
        }
        if let Some(uid) = &self.uid {
            config.uid = uid.clone();
        }
    }

    fn text(&self) -> anyhow::Result<String> {
        if self.read_stdin {
            let mut text = String::new();
            let _ = std::io::stdin().read_to_string(&mut text)?;
            return Ok(text);
        }
        Ok(self.text.clone().unwrap_or_else(|| DEMO_TEXT.to_string()))
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Cli::parse();

    match args.subcommand {
        Some(Command::ListVoices { json }) => {
            if json {
                let mut json = serde_json::to_string_pretty(KNOWN_VOICES)?;
                json.push('\n');
                std::io::stdout().write_all(json.as_bytes())?;
            } else {
                println!("VOICE_TYPE\tNAME\tCATEGORY\tLANGUAGE");
                for voice in KNOWN_VOICES {
                    println!("{}\t{}\t{}\t{}", voice.voice_id, voice.name, voice.category, voice.language);
                }
            }
        },

        Some(Command::Synthesize(synthesis)) => {
            run_synthesis(args.config, synthesis)?;
        },

        None => {
            run_synthesis(args.config, SynthesisArgs::default())?;
        },
    }

    Ok(())
}

fn load_config(path: Option<PathBuf>) -> anyhow::Result<SynthesisConfig> {
    let config = match path {
        Some(path) => {
            log::debug!("Loading configuration from {}", path.display());
            SynthesisConfig::from_json_file(path)?
        },
        None => SynthesisConfig::from_env()?,
    };
    Ok(config)
}

/// Synthesis failures are reported, not returned: the exit status only
/// reflects setup errors.
fn run_synthesis(config_path: Option<PathBuf>, args: SynthesisArgs) -> anyhow::Result<()> {
    let mut config = load_config(config_path)?;
    args.apply(&mut config);
    log::debug!("Using {:?}", config);

    if seedtts_http::voices::find_voice(&config.voice_type).is_none() {
        log::warn!("Voice type {} is not in the known voice list; sending it anyway.", config.voice_type);
    }

    let encoding = config.encoding;
    let client = SynthesisClient::new(config)?;
    let text = args.text()?;

    let sink = match (&args.output, args.stdout) {
        (Some(path), _) => output::AudioSink::File(path.clone()),
        (None, true) => output::AudioSink::Stdout,
        (None, false) => output::AudioSink::Discard,
    };

    match client.synthesize_blocking(&text) {
        Ok(audio) => {
            output::report_audio(&audio, encoding, &sink)?;
        },
        Err(e) => {
            log::error!("Synthesis failed: {:?}", e);
            output::report_failure(&e, &sink);
        },
    }

    Ok(())
}
