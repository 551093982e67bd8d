use std::process::{Command, Stdio};
use std::thread;

use thiserror::Error;

use crate::trainer::PronounceRequest;

#[derive(Debug, Error)]
pub enum SpeechError {
    #[error("no speech command configured")]
    NotConfigured,
    #[error("failed to start `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

/// Text-to-speech capability. Implementations must return without waiting
/// for the utterance to finish.
pub trait Speaker {
    fn speak(&self, request: &PronounceRequest) -> Result<(), SpeechError>;
}

/// Speaks by launching an external TTS program, e.g.
/// `espeak-ng -v {locale} {text}` or `say -v Monica {text}`.
pub struct CommandSpeaker {
    argv: Vec<String>,
}

impl CommandSpeaker {
    pub fn new(argv: Vec<String>) -> Self {
        Self { argv }
    }

    /// Substitute `{text}` and `{locale}` in the argument template.
    pub fn build_args(&self, request: &PronounceRequest) -> Vec<String> {
        let locale = speech_locale(&request.locale);
        self.argv
            .iter()
            .map(|arg| arg.replace("{locale}", &locale).replace("{text}", &request.text))
            .collect()
    }
}

impl Speaker for CommandSpeaker {
    fn speak(&self, request: &PronounceRequest) -> Result<(), SpeechError> {
        let args = self.build_args(request);
        let Some((program, rest)) = args.split_first() else {
            return Err(SpeechError::NotConfigured);
        };

        let mut child = Command::new(program)
            .args(rest)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| SpeechError::Spawn {
                program: program.clone(),
                source,
            })?;
        tracing::debug!(program = %program, text = %request.text, locale = %request.locale, "speaking");

        // Reap in the background so the UI never blocks on playback.
        thread::spawn(move || {
            let _ = child.wait();
        });
        Ok(())
    }
}

/// espeak-style voice name for a BCP-47 tag: "en-US" -> "en-us".
fn speech_locale(tag: &str) -> String {
    tag.to_ascii_lowercase().replace('_', "-")
}
