use std::sync::Arc;
use std::time::Duration;

use crate::application::ports::{TranscriptionEngine, TranscriptionError};

use super::openai_whisper_engine::OpenAiWhisperEngine;

/// Primary and secondary engines sharing one credential.
pub struct TranscriptionEnginePair {
    pub primary: Arc<dyn TranscriptionEngine>,
    pub secondary: Arc<dyn TranscriptionEngine>,
}

pub struct TranscriptionEngineFactory;

impl TranscriptionEngineFactory {
    pub fn create(
        model: &str,
        api_key: Option<String>,
        base_url: Option<String>,
        timeout: Duration,
    ) -> Result<Arc<dyn TranscriptionEngine>, TranscriptionError> {
        let key = api_key.filter(|k| !k.trim().is_empty()).ok_or_else(|| {
            TranscriptionError::ApiRequestFailed("speech credential required".to_string())
        })?;
        let engine = OpenAiWhisperEngine::new(key, base_url, model.to_string(), timeout)?;
        Ok(Arc::new(engine))
    }

    pub fn create_pair(
        primary_model: &str,
        secondary_model: &str,
        api_key: Option<String>,
        base_url: Option<String>,
        timeout: Duration,
    ) -> Result<TranscriptionEnginePair, TranscriptionError> {
        Ok(TranscriptionEnginePair {
            primary: Self::create(primary_model, api_key.clone(), base_url.clone(), timeout)?,
            secondary: Self::create(secondary_model, api_key, base_url, timeout)?,
        })
    }
}
