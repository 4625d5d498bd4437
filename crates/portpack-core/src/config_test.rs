use std::collections::HashMap;
use std::env::VarError;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

#[test]
fn build_app_config_uses_defaults_with_empty_env() {
    let map: HashMap<&str, &str> = HashMap::new();
    let result = build_app_config(lookup_from_map(&map));
    assert!(result.is_ok(), "expected Ok, got: {result:?}");
    let cfg = result.unwrap();
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.output_dir.to_str(), Some("output"));
    assert_eq!(cfg.user_agent, DEFAULT_USER_AGENT);
    assert_eq!(cfg.check_timeout_secs, 15);
    assert_eq!(cfg.page_timeout_secs, 20);
    assert_eq!(cfg.download_timeout_secs, 25);
    assert_eq!(cfg.min_kb, 30);
    assert_eq!(cfg.max_images_per_page, 15);
    assert_eq!(cfg.max_results, 10);
    assert!(cfg.bing_api_key.is_none());
    assert!(cfg.bing_endpoint.is_none());
    assert!(cfg.serpapi_api_key.is_none());
}

#[test]
fn build_app_config_reads_overrides() {
    let mut map = HashMap::new();
    map.insert("PORTPACK_OUTPUT_DIR", "/tmp/packs");
    map.insert("PORTPACK_MIN_KB", "50");
    map.insert("PORTPACK_MAX_IMAGES_PER_PAGE", "40");
    map.insert("PORTPACK_USER_AGENT", "custom-agent/2.0");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.output_dir.to_str(), Some("/tmp/packs"));
    assert_eq!(cfg.min_kb, 50);
    assert_eq!(cfg.max_images_per_page, 40);
    assert_eq!(cfg.user_agent, "custom-agent/2.0");
}

#[test]
fn build_app_config_rejects_non_numeric_min_kb() {
    let mut map = HashMap::new();
    map.insert("PORTPACK_MIN_KB", "thirty");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "PORTPACK_MIN_KB"),
        "expected InvalidEnvVar(PORTPACK_MIN_KB), got: {result:?}"
    );
}

#[test]
fn build_app_config_rejects_zero_max_images() {
    let mut map = HashMap::new();
    map.insert("PORTPACK_MAX_IMAGES_PER_PAGE", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "PORTPACK_MAX_IMAGES_PER_PAGE"),
        "expected InvalidEnvVar(PORTPACK_MAX_IMAGES_PER_PAGE), got: {result:?}"
    );
}

#[test]
fn blank_api_keys_are_treated_as_missing() {
    let mut map = HashMap::new();
    map.insert("SERPAPI_API_KEY", "   ");
    map.insert("BING_API_KEY", "bing-secret");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert!(cfg.serpapi_api_key.is_none());
    assert_eq!(cfg.bing_api_key.as_deref(), Some("bing-secret"));
}

#[test]
fn debug_output_redacts_api_keys() {
    let mut map = HashMap::new();
    map.insert("SERPAPI_API_KEY", "super-secret-serp");
    map.insert("BING_API_KEY", "super-secret-bing");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    let rendered = format!("{cfg:?}");
    assert!(!rendered.contains("super-secret"), "leaked secret: {rendered}");
    assert!(rendered.contains("[redacted]"));
}

#[test]
fn default_matches_empty_environment() {
    let from_env = build_app_config(lookup_from_map(&HashMap::new())).expect("defaults");
    assert_eq!(format!("{from_env:?}"), format!("{:?}", AppConfig::default()));
}
