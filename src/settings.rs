use serde::{
    Deserialize,
    Serialize,
};

use crate::{
    api::DEFAULT_BASE_URL,
    core::VocabError,
    paging::DEFAULT_PAGE_SIZE,
    persistence::{
        load_json_or_default,
        save_json,
    },
    speech::{
        CommandSpeaker,
        SharedSpeaker,
    },
};

pub const SETTINGS_FILE: &str = "settings.json";
pub const BASE_URL_ENV: &str = "VOCAB_API_BASE_URL";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub api_base_url: String,
    pub list_page_size: usize,
    pub speech_command: Option<String>,
    pub speech_args: Vec<String>,
    pub dark_mode: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_BASE_URL.to_string(),
            list_page_size: DEFAULT_PAGE_SIZE,
            speech_command: None,
            speech_args: Vec::new(),
            dark_mode: true,
        }
    }
}

impl Settings {
    /// Stored settings, with the environment override applied.
    pub fn load() -> Self {
        let settings = load_json_or_default::<Settings>(SETTINGS_FILE);
        settings.with_base_url_override(std::env::var(BASE_URL_ENV).ok()).validated()
    }

    pub fn save(&self) -> Result<(), VocabError> {
        save_json(self, SETTINGS_FILE)
    }

    pub fn with_base_url_override(mut self, base_url: Option<String>) -> Self {
        if let Some(url) = base_url.filter(|u| !u.trim().is_empty()) {
            self.api_base_url = url.trim().to_string();
        }
        self
    }

    pub fn validated(mut self) -> Self {
        if self.api_base_url.trim().is_empty() {
            self.api_base_url = DEFAULT_BASE_URL.to_string();
        }
        if self.list_page_size == 0 {
            self.list_page_size = DEFAULT_PAGE_SIZE;
        }
        self
    }

    pub fn speaker(&self) -> SharedSpeaker {
        CommandSpeaker::from_settings(self.speech_command.as_deref(), &self.speech_args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_fills_defaults() {
        let settings: Settings =
            serde_json::from_str(r#"{ "list_page_size": 0, "api_base_url": "  " }"#).unwrap();
        let settings = settings.validated();
        assert_eq!(settings.api_base_url, DEFAULT_BASE_URL);
        assert_eq!(settings.list_page_size, DEFAULT_PAGE_SIZE);
        assert!(settings.speaker().is_none());
    }

    #[test]
    fn environment_override_wins_when_set() {
        let settings = Settings::default()
            .with_base_url_override(Some("http://10.0.0.2:8080/api".into()))
            .validated();
        assert_eq!(settings.api_base_url, "http://10.0.0.2:8080/api");

        let untouched = Settings::default().with_base_url_override(Some("   ".into()));
        assert_eq!(untouched.api_base_url, DEFAULT_BASE_URL);
    }
}
