pub const DEFAULT_FILTER: &str = "info,vid2mvp=debug";

/// Configuration for tracing initialization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TracingConfig {
    pub environment: String,
    pub json_format: bool,
    /// `EnvFilter` directive; blank means [`DEFAULT_FILTER`].
    pub level: String,
}

impl TracingConfig {
    pub fn new(environment: impl Into<String>, level: impl Into<String>, json_format: bool) -> Self {
        Self {
            environment: environment.into(),
            json_format,
            level: level.into(),
        }
    }

    pub fn filter_directive(&self) -> &str {
        match self.level.trim() {
            "" => DEFAULT_FILTER,
            level => level,
        }
    }
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            environment: "local".to_string(),
            json_format: false,
            level: DEFAULT_FILTER.to_string(),
        }
    }
}
