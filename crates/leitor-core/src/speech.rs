use std::{
    process::{Child, Command, Stdio},
    time::{Duration, Instant},
};

use tracing::{debug, warn};

use crate::error::SpeechError;

/// Wait between cancelling an utterance and starting the next one.
pub const REPLAY_DELAY: Duration = Duration::from_millis(100);

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Voice {
    /// Identifier handed back to the engine.
    pub id: String,
    pub name: String,
    pub language: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SpeechOptions {
    pub voice: Option<String>,
    pub rate: f32,
    pub pitch: f32,
    pub volume: f32,
}

impl Default for SpeechOptions {
    fn default() -> Self {
        Self {
            voice: None,
            rate: 1.0,
            pitch: 1.0,
            volume: 1.0,
        }
    }
}

pub trait SpeechPort: Send {
    fn speak(&mut self, text: &str, options: &SpeechOptions) -> Result<(), SpeechError>;
    fn cancel(&mut self);
    fn list_voices(&self) -> Result<Vec<Voice>, SpeechError>;
}

impl<T: SpeechPort + ?Sized> SpeechPort for Box<T> {
    fn speak(&mut self, text: &str, options: &SpeechOptions) -> Result<(), SpeechError> {
        (**self).speak(text, options)
    }

    fn cancel(&mut self) {
        (**self).cancel()
    }

    fn list_voices(&self) -> Result<Vec<Voice>, SpeechError> {
        (**self).list_voices()
    }
}

/// Port for hosts without a synthesizer.
#[derive(Debug, Default)]
pub struct NullSpeech;

impl SpeechPort for NullSpeech {
    fn speak(&mut self, _text: &str, _options: &SpeechOptions) -> Result<(), SpeechError> {
        Ok(())
    }

    fn cancel(&mut self) {}

    fn list_voices(&self) -> Result<Vec<Voice>, SpeechError> {
        Ok(Vec::new())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum EngineKind {
    Espeak,
    Say,
    Template,
    Plain,
}

/// Speaks by running an external synthesizer per utterance.
pub struct CommandSpeech {
    engine: String,
    child: Option<Child>,
}

impl CommandSpeech {
    pub fn new(engine: impl Into<String>) -> Self {
        Self {
            engine: engine.into(),
            child: None,
        }
    }

    fn kind(&self) -> EngineKind {
        if self.engine.contains("{}") {
            return EngineKind::Template;
        }
        match self.engine.rsplit('/').next().unwrap_or(&self.engine) {
            "espeak" | "espeak-ng" => EngineKind::Espeak,
            "say" => EngineKind::Say,
            _ => EngineKind::Plain,
        }
    }

    fn command_line(&self, text: &str, options: &SpeechOptions) -> (String, Vec<String>) {
        let mut args = Vec::new();
        match self.kind() {
            EngineKind::Template => {
                let expanded = self.engine.replace("{}", text);
                let mut parts = expanded.split_whitespace().map(str::to_string);
                let program = parts.next().unwrap_or_default();
                return (program, parts.collect());
            }
            EngineKind::Espeak => {
                if let Some(voice) = &options.voice {
                    args.extend(["-v".to_string(), voice.clone()]);
                }
                let speed = (175.0 * options.rate).round().clamp(80.0, 450.0) as u32;
                let pitch = (50.0 * options.pitch).round().clamp(0.0, 99.0) as u32;
                let amplitude = (100.0 * options.volume).round().clamp(0.0, 200.0) as u32;
                args.extend([
                    "-s".to_string(),
                    speed.to_string(),
                    "-p".to_string(),
                    pitch.to_string(),
                    "-a".to_string(),
                    amplitude.to_string(),
                ]);
            }
            EngineKind::Say => {
                if let Some(voice) = &options.voice {
                    args.extend(["-v".to_string(), voice.clone()]);
                }
                let speed = (175.0 * options.rate).round() as u32;
                args.extend(["-r".to_string(), speed.to_string()]);
            }
            EngineKind::Plain => {}
        }
        args.push(text.to_string());
        (self.engine.clone(), args)
    }
}

impl SpeechPort for CommandSpeech {
    fn speak(&mut self, text: &str, options: &SpeechOptions) -> Result<(), SpeechError> {
        self.cancel();
        let (program, args) = self.command_line(text, options);
        if program.is_empty() {
            return Err(SpeechError::Unavailable("empty engine command".into()));
        }
        let child = Command::new(&program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|err| match err.kind() {
                std::io::ErrorKind::NotFound => SpeechError::Unavailable(program.clone()),
                _ => SpeechError::Io(err),
            })?;
        debug!(engine = %program, "utterance started");
        self.child = Some(child);
        Ok(())
    }

    fn cancel(&mut self) {
        if let Some(mut child) = self.child.take() {
            let _ = child.kill();
            let _ = child.wait();
        }
    }

    fn list_voices(&self) -> Result<Vec<Voice>, SpeechError> {
        match self.kind() {
            EngineKind::Espeak => Ok(parse_espeak_voices(&self.run_listing(&["--voices"])?)),
            EngineKind::Say => Ok(parse_say_voices(&self.run_listing(&["-v", "?"])?)),
            EngineKind::Template | EngineKind::Plain => Ok(Vec::new()),
        }
    }
}

impl CommandSpeech {
    fn run_listing(&self, args: &[&str]) -> Result<String, SpeechError> {
        let output = Command::new(&self.engine)
            .args(args)
            .stdin(Stdio::null())
            .stderr(Stdio::null())
            .output()
            .map_err(|err| match err.kind() {
                std::io::ErrorKind::NotFound => SpeechError::Unavailable(self.engine.clone()),
                _ => SpeechError::Io(err),
            })?;
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl Drop for CommandSpeech {
    fn drop(&mut self) {
        self.cancel();
    }
}

// Pty Language       Age/Gender VoiceName          File        Other Languages
//  5  en-us           --/M      English_(America)  gmw/en-US   (en 10)
fn parse_espeak_voices(output: &str) -> Vec<Voice> {
    output
        .lines()
        .skip(1)
        .filter_map(|line| {
            let cols: Vec<&str> = line.split_whitespace().collect();
            if cols.len() < 4 {
                return None;
            }
            Some(Voice {
                id: cols[1].to_string(),
                name: cols[3].replace('_', " "),
                language: cols[1].to_string(),
            })
        })
        .collect()
}

// Alex                en_US    # Most people recognize me by my voice.
fn parse_say_voices(output: &str) -> Vec<Voice> {
    output
        .lines()
        .filter_map(|line| {
            let head = line.split('#').next()?.trim();
            let (name, language) = head.rsplit_once(char::is_whitespace)?;
            let name = name.trim();
            if name.is_empty() {
                return None;
            }
            Some(Voice {
                id: name.to_string(),
                name: name.to_string(),
                language: language.to_string(),
            })
        })
        .collect()
}

/// Pronunciation control over a [`SpeechPort`]: replays are debounced and
/// the voice is re-resolved whenever the catalog changes.
pub struct Player<S: SpeechPort> {
    port: S,
    options: SpeechOptions,
    preferred_voice: Option<String>,
    voices: Vec<Voice>,
    pending: Option<(String, Instant)>,
}

impl<S: SpeechPort> Player<S> {
    pub fn new(port: S, options: SpeechOptions) -> Self {
        Self {
            port,
            preferred_voice: options.voice.clone(),
            options,
            voices: Vec::new(),
            pending: None,
        }
    }

    pub fn options(&self) -> &SpeechOptions {
        &self.options
    }

    pub fn voices(&self) -> &[Voice] {
        &self.voices
    }

    /// Stops whatever is playing and schedules `text` after [`REPLAY_DELAY`].
    pub fn play(&mut self, text: &str, now: Instant) {
        self.port.cancel();
        self.pending = Some((text.to_string(), now + REPLAY_DELAY));
    }

    /// Starts the scheduled utterance once its delay has elapsed.
    pub fn tick(&mut self, now: Instant) -> bool {
        match &self.pending {
            Some((_, due)) if *due <= now => {}
            _ => return false,
        }
        let Some((text, _)) = self.pending.take() else {
            return false;
        };
        if let Err(err) = self.port.speak(&text, &self.options) {
            warn!(error = %err, "speech playback failed");
            return false;
        }
        true
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(_, due)| *due)
    }

    pub fn stop(&mut self) {
        self.pending = None;
        self.port.cancel();
    }

    /// Accepts a catalog that may arrive long after startup. An unknown
    /// preferred voice falls back to the engine default.
    pub fn set_voices(&mut self, voices: Vec<Voice>) {
        self.options.voice = match &self.preferred_voice {
            Some(wanted) => voices
                .iter()
                .find(|v| v.id.eq_ignore_ascii_case(wanted) || v.name.eq_ignore_ascii_case(wanted))
                .map(|v| v.id.clone()),
            None => None,
        };
        if self.preferred_voice.is_some() && self.options.voice.is_none() {
            debug!(voice = ?self.preferred_voice, "preferred voice not installed");
        }
        self.voices = voices;
    }
}
