mod file_diagnostic_sink;
mod init_tracing;
mod memory_diagnostic_sink;
mod prompt_sanitizer;
mod tracing_config;

pub use file_diagnostic_sink::FileDiagnosticSink;
pub use init_tracing::init_tracing;
pub use memory_diagnostic_sink::InMemoryDiagnosticSink;
pub use prompt_sanitizer::sanitize_prompt;
pub use tracing_config::{DEFAULT_FILTER, TracingConfig};
