use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

use crate::infrastructure::audio::DEFAULT_YT_DLP_PATH;
use crate::infrastructure::observability::DEFAULT_FILTER;

use super::Environment;

pub const SETTINGS_FILE_STEM: &str = "vid2mvp";
pub const ENV_PREFIX: &str = "APP__";
pub const ENV_SEPARATOR: &str = "__";
pub const OPENAI_API_KEY_VAR: &str = "OPENAI_API_KEY";
pub const OPENAI_MODEL_GPT_VAR: &str = "OPENAI_MODEL_GPT";
pub const OPENAI_WHISPER_MODEL_VAR: &str = "OPENAI_WHISPER_MODEL";
pub const YT_COOKIES_FILE_VAR: &str = "YT_COOKIES_FILE";

const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
     AppleWebKit/605.1.15 (KHTML, like Gecko) Version/15.1 Safari/605.1.15";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("configuration error: {0}")]
    Figment(#[from] figment::Error),
}

/// Unprefixed variables that seed the built-in defaults. Files and
/// `APP__` overrides still take precedence over them.
#[derive(Debug, Clone, Default)]
pub struct SeedVars {
    pub openai_api_key: Option<String>,
    pub generative_model: Option<String>,
    pub transcription_model: Option<String>,
    pub cookie_file: Option<String>,
}

impl SeedVars {
    pub fn from_process() -> Self {
        Self {
            openai_api_key: std::env::var(OPENAI_API_KEY_VAR).ok(),
            generative_model: std::env::var(OPENAI_MODEL_GPT_VAR).ok(),
            transcription_model: std::env::var(OPENAI_WHISPER_MODEL_VAR).ok(),
            cookie_file: std::env::var(YT_COOKIES_FILE_VAR).ok(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default)]
    pub pipeline: PipelineSettings,
    #[serde(default)]
    pub llm: LlmSettings,
    #[serde(default)]
    pub transcription: TranscriptionSettings,
    #[serde(default)]
    pub captions: CaptionSettings,
    #[serde(default)]
    pub audio: AudioSettings,
    #[serde(default)]
    pub storage: StorageSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// Credentials and model choices every component is built from.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PipelineSettings {
    #[serde(default)]
    pub speech_credential: Option<String>,
    #[serde(default)]
    pub generative_credential: Option<String>,
    pub primary_transcription_model: String,
    pub fallback_transcription_model: String,
    pub generative_model_name: String,
    #[serde(default)]
    pub cookie_file_path: Option<PathBuf>,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            speech_credential: None,
            generative_credential: None,
            primary_transcription_model: "gpt-4o-transcribe".to_string(),
            fallback_transcription_model: "whisper-1".to_string(),
            generative_model_name: "gpt-4o-mini".to_string(),
            cookie_file_path: None,
        }
    }
}

impl PipelineSettings {
    pub fn speech_credential(&self) -> Option<&str> {
        non_blank(self.speech_credential.as_deref())
    }

    pub fn generative_credential(&self) -> Option<&str> {
        non_blank(self.generative_credential.as_deref())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LlmSettings {
    #[serde(default)]
    pub base_url: Option<String>,
    pub max_tokens: usize,
    pub temperature: f32,
    pub timeout_secs: u64,
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            base_url: None,
            max_tokens: 1200,
            temperature: 0.2,
            timeout_secs: 60,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TranscriptionSettings {
    #[serde(default)]
    pub base_url: Option<String>,
    pub timeout_secs: u64,
}

impl Default for TranscriptionSettings {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout_secs: 300,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CaptionSettings {
    #[serde(default)]
    pub watch_base_url: Option<String>,
    #[serde(default)]
    pub timed_text_base_url: Option<String>,
    pub user_agent: String,
    pub timeout_secs: u64,
}

impl Default for CaptionSettings {
    fn default() -> Self {
        Self {
            watch_base_url: None,
            timed_text_base_url: None,
            user_agent: BROWSER_USER_AGENT.to_string(),
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AudioSettings {
    pub yt_dlp_path: PathBuf,
    pub user_agent: String,
    pub work_dir: PathBuf,
    pub timeout_secs: u64,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            yt_dlp_path: PathBuf::from(DEFAULT_YT_DLP_PATH),
            user_agent: BROWSER_USER_AGENT.to_string(),
            work_dir: PathBuf::from("data/work"),
            timeout_secs: 600,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageSettings {
    pub artifacts_dir: PathBuf,
    pub diagnostics_dir: PathBuf,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            artifacts_dir: PathBuf::from("data/artifacts"),
            diagnostics_dir: PathBuf::from("data/logs"),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingSettings {
    pub level: String,
    pub json: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: DEFAULT_FILTER.to_string(),
            json: false,
        }
    }
}

impl Settings {
    /// Built-in values for `environment`. Non-blank seeds replace the
    /// matching defaults; the API key fills both credentials.
    pub fn defaults_for(environment: Environment, seeds: &SeedVars) -> Self {
        let mut settings = Self::default();
        settings.logging.json = environment == Environment::Prod;

        let pipeline = &mut settings.pipeline;
        if let Some(key) = non_blank(seeds.openai_api_key.as_deref()) {
            pipeline.speech_credential = Some(key.to_string());
            pipeline.generative_credential = Some(key.to_string());
        }
        if let Some(model) = non_blank(seeds.generative_model.as_deref()) {
            pipeline.generative_model_name = model.to_string();
        }
        if let Some(model) = non_blank(seeds.transcription_model.as_deref()) {
            pipeline.primary_transcription_model = model.to_string();
        }
        if let Some(path) = non_blank(seeds.cookie_file.as_deref()) {
            pipeline.cookie_file_path = Some(PathBuf::from(path));
        }

        settings
    }

    /// Loads settings from the working directory and the process environment.
    pub fn load(environment: Environment) -> Result<Self, ConfigError> {
        Self::load_from(environment, Path::new("."), &SeedVars::from_process())
    }

    pub fn load_from(
        environment: Environment,
        config_dir: &Path,
        seeds: &SeedVars,
    ) -> Result<Self, ConfigError> {
        Self::figment(environment, config_dir, seeds)
            .extract()
            .map_err(ConfigError::from)
    }

    /// Provider chain, lowest priority first: built-in defaults,
    /// `vid2mvp.toml`, `vid2mvp.<env>.toml`, then `APP__SECTION__KEY`
    /// variables.
    pub fn figment(environment: Environment, config_dir: &Path, seeds: &SeedVars) -> Figment {
        let mut figment =
            Figment::from(Serialized::defaults(Self::defaults_for(environment, seeds)));

        let base_file = config_dir.join(format!("{}.toml", SETTINGS_FILE_STEM));
        if base_file.exists() {
            figment = figment.merge(Toml::file(base_file));
        }

        let env_file = config_dir.join(format!(
            "{}.{}.toml",
            SETTINGS_FILE_STEM,
            environment.file_suffix()
        ));
        if env_file.exists() {
            figment = figment.merge(Toml::file(env_file));
        }

        figment.merge(Env::prefixed(ENV_PREFIX).split(ENV_SEPARATOR))
    }
}
