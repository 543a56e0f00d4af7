mod environment;
mod settings;

pub use environment::{ENVIRONMENT_VAR, Environment};
pub use settings::{
    AudioSettings, CaptionSettings, ConfigError, LlmSettings, LoggingSettings, OPENAI_API_KEY_VAR,
    OPENAI_MODEL_GPT_VAR, OPENAI_WHISPER_MODEL_VAR, PipelineSettings, SeedVars, Settings,
    StorageSettings, TranscriptionSettings, YT_COOKIES_FILE_VAR,
};
