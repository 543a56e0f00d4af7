use vid2mvp::infrastructure::observability::{DEFAULT_FILTER, TracingConfig};

#[test]
fn given_no_env_vars_when_creating_default_then_uses_plain_local_output() {
    let config = TracingConfig::default();
    assert!(!config.json_format);
    assert_eq!(config.environment, "local");
}

#[test]
fn given_default_config_when_reading_filter_then_uses_default_directive() {
    let config = TracingConfig::default();
    assert_eq!(config.filter_directive(), DEFAULT_FILTER);
}

#[test]
fn given_blank_level_when_reading_filter_then_falls_back_to_default() {
    let config = TracingConfig::new("Prod", "  ", true);
    assert_eq!(config.filter_directive(), DEFAULT_FILTER);
    assert!(config.json_format);
}

#[test]
fn given_explicit_level_when_reading_filter_then_uses_it() {
    let config = TracingConfig::new("Test", "warn,vid2mvp=trace", false);
    assert_eq!(config.filter_directive(), "warn,vid2mvp=trace");
}
