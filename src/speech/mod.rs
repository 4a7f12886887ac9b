use std::{
    process::{
        Command,
        Stdio,
    },
    sync::Arc,
};

use tracing::{
    debug,
    warn,
};

pub const CUE_WRONG: &str = "wrong";
pub const CUE_SAVED: &str = "save successfully";
pub const CUE_LAST: &str = "it is the last vocabulary";

/// Fire-and-forget text-to-speech.
pub trait Speaker: Send + Sync {
    fn speak(&self, text: &str);
}

pub type SharedSpeaker = Option<Arc<dyn Speaker>>;

/// Speaks through `speaker` if there is one; blank text is ignored.
pub fn say(speaker: &SharedSpeaker, text: &str) {
    let text = text.trim();
    if text.is_empty() {
        return;
    }
    if let Some(speaker) = speaker {
        speaker.speak(text);
    }
}

/// Runs an external TTS program (`espeak`, `say`, ...) with the text as last argument.
#[derive(Debug, Clone)]
pub struct CommandSpeaker {
    program: String,
    args: Vec<String>,
}

impl CommandSpeaker {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self { program: program.into(), args }
    }

    pub fn from_settings(program: Option<&str>, args: &[String]) -> SharedSpeaker {
        let program = program.map(str::trim).filter(|p| !p.is_empty())?;
        Some(Arc::new(Self::new(program, args.to_vec())))
    }
}

impl Speaker for CommandSpeaker {
    fn speak(&self, text: &str) {
        let spawned = Command::new(&self.program)
            .args(&self.args)
            .arg(text)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn();

        match spawned {
            Ok(mut child) => {
                debug!(program = %self.program, text, "speaking");
                // Reap in the background so the UI never waits on playback.
                std::thread::spawn(move || {
                    let _ = child.wait();
                });
            }
            Err(e) => warn!(program = %self.program, "speech command failed: {e}"),
        }
    }
}

/// Remembers what was last announced so a cue fires once per transition.
#[derive(Debug, Clone, Default)]
pub struct SpokenMarker<K> {
    last: Option<K>,
}

impl<K: PartialEq + Clone> SpokenMarker<K> {
    pub fn new() -> Self {
        Self { last: None }
    }

    /// Returns true the first time `key` is seen since the previous different key.
    pub fn mark(&mut self, key: &K) -> bool {
        if self.last.as_ref() == Some(key) {
            return false;
        }
        self.last = Some(key.clone());
        true
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    #[derive(Default)]
    struct RecordingSpeaker {
        spoken: Mutex<Vec<String>>,
    }

    impl RecordingSpeaker {
        fn spoken(&self) -> Vec<String> {
            self.spoken.lock().unwrap().clone()
        }
    }

    impl Speaker for RecordingSpeaker {
        fn speak(&self, text: &str) {
            self.spoken.lock().unwrap().push(text.to_string());
        }
    }

    #[test]
    fn missing_speaker_and_blank_text_are_noops() {
        say(&None, "hello");

        let recorder = Arc::new(RecordingSpeaker::default());
        let speaker: SharedSpeaker = Some(recorder.clone());
        say(&speaker, "   ");
        say(&speaker, " wrong ");
        assert_eq!(recorder.spoken(), vec!["wrong".to_string()]);
    }

    #[test]
    fn marker_fires_once_per_key() {
        let mut marker = SpokenMarker::new();
        assert!(marker.mark(&0usize));
        assert!(!marker.mark(&0));
        assert!(marker.mark(&1));
        assert!(marker.mark(&0));
    }

    #[test]
    fn blank_program_gives_no_speaker() {
        assert!(CommandSpeaker::from_settings(None, &[]).is_none());
        assert!(CommandSpeaker::from_settings(Some("  "), &[]).is_none());
        assert!(CommandSpeaker::from_settings(Some("espeak"), &[]).is_some());
    }
}
