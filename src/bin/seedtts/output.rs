
use std::io::Write;
use std::path::{Path, PathBuf};

use seedtts_http::{AudioEncoding, SynthesisError, inspect_wav};

#[derive(Debug, Clone)]
pub(crate) enum AudioSink {
    File(PathBuf),
    Stdout,
    Discard,
}

impl AudioSink {
    /// Status lines go to stderr when stdout carries the audio itself.
    fn status_to_stderr(&self) -> bool {
        matches!(self, Self::Stdout)
    }

    fn status_line(&self, line: &str) {
        if self.status_to_stderr() {
            eprintln!("{}", line);
        } else {
            println!("{}", line);
        }
    }
}

/// Appends the encoding's extension when the path has none.
pub(crate) fn resolve_output_path(path: &Path, encoding: AudioEncoding) -> PathBuf {
    if path.extension().is_none() {
        path.with_extension(encoding.extension())
    } else {
        path.to_path_buf()
    }
}

pub(crate) fn report_audio(audio: &[u8], encoding: AudioEncoding, sink: &AudioSink) -> anyhow::Result<()> {
    if encoding == AudioEncoding::Wav {
        match inspect_wav(audio) {
            Ok(summary) => {
                log::info!(
                    "WAV audio: {} Hz, {} channel(s), {} bit, {:.2} s",
                    summary.sample_rate,
                    summary.channels,
                    summary.bits_per_sample,
                    summary.duration().as_secs_f64(),
                );
            },
            Err(e) => {
                log::warn!("Audio is not a readable WAV stream: {}", e);
            },
        }
    }

    match sink {
        AudioSink::File(path) => {
            let path = resolve_output_path(path, encoding);
            std::fs::write(&path, audio)?;
            log::info!("Wrote audio to {}", path.display());
        },
        AudioSink::Stdout => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(audio)?;
            stdout.flush()?;
        },
        AudioSink::Discard => {},
    }

    sink.status_line(&format!("get audio succ len[{}]", audio.len()));
    Ok(())
}

pub(crate) fn report_failure(err: &SynthesisError, sink: &AudioSink) {
    sink.status_line(&format!("synthesis fail [err:{}]", err));
}
