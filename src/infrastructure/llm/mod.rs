mod openai_client;

pub use openai_client::{DEFAULT_LLM_URL, OpenAiClient, OpenAiClientConfig};
