use std::time::Duration;

use url::Url;

/// Page global holding an absolute API origin; unset means same-origin paths.
pub const GLOBAL_API_BASE: &str = "__FAMILY_HABITS_API_BASE__";
pub const GLOBAL_TASK_REDIRECT_MS: &str = "__FAMILY_HABITS_TASK_REDIRECT_MS__";
pub const GLOBAL_FORCE_DEMO: &str = "__FAMILY_HABITS_FORCE_DEMO__";
pub const DEFAULT_TASK_REDIRECT_DELAY: Duration = Duration::from_millis(1_500);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("base url must not be empty")]
    EmptyBaseUrl,
    #[error("base url must use http:// or https:// and include a host")]
    InvalidBaseUrl,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebAppConfig {
    pub api_base_url: Option<String>,
    pub task_redirect_delay: Duration,
    pub demo_mode_forced: bool,
}

impl Default for WebAppConfig {
    fn default() -> Self {
        Self {
            api_base_url: None,
            task_redirect_delay: DEFAULT_TASK_REDIRECT_DELAY,
            demo_mode_forced: false,
        }
    }
}

impl WebAppConfig {
    /// Builds the config from page-level overrides. Invalid values are logged
    /// and replaced by defaults so a bad override never blocks the page.
    pub fn resolve(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(raw) = non_empty(lookup(GLOBAL_API_BASE)) {
            match normalize_base_url(&raw) {
                Ok(base_url) => config.api_base_url = Some(base_url),
                Err(error) => {
                    tracing::warn!(%error, value = %raw, "ignoring api base override");
                }
            }
        }

        if let Some(raw) = non_empty(lookup(GLOBAL_TASK_REDIRECT_MS)) {
            match raw.parse::<u64>() {
                Ok(millis) => config.task_redirect_delay = Duration::from_millis(millis),
                Err(error) => {
                    tracing::warn!(%error, value = %raw, "ignoring task redirect override");
                }
            }
        }

        config.demo_mode_forced = non_empty(lookup(GLOBAL_FORCE_DEMO))
            .is_some_and(|raw| matches!(raw.to_ascii_lowercase().as_str(), "1" | "true" | "yes"));

        config
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Trims and drops trailing slashes; the result must be an absolute
/// `http`/`https` URL with a host.
pub fn normalize_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Err(ConfigError::EmptyBaseUrl);
    }
    let parsed = Url::parse(trimmed).map_err(|_| ConfigError::InvalidBaseUrl)?;
    let has_host = parsed.host_str().is_some_and(|host| !host.is_empty());
    if !matches!(parsed.scheme(), "http" | "https") || !has_host {
        return Err(ConfigError::InvalidBaseUrl);
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(values: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let values = values
            .iter()
            .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
            .collect::<HashMap<_, _>>();
        move |key| values.get(key).cloned()
    }

    #[test]
    fn defaults_without_overrides() {
        let config = WebAppConfig::resolve(lookup(&[]));
        assert_eq!(config, WebAppConfig::default());
        assert_eq!(config.task_redirect_delay, Duration::from_millis(1_500));
    }

    #[test]
    fn overrides_are_applied_and_normalized() {
        let config = WebAppConfig::resolve(lookup(&[
            (GLOBAL_API_BASE, " https://habits.example.com/ "),
            (GLOBAL_TASK_REDIRECT_MS, "250"),
            (GLOBAL_FORCE_DEMO, "TRUE"),
        ]));
        assert_eq!(
            config.api_base_url.as_deref(),
            Some("https://habits.example.com")
        );
        assert_eq!(config.task_redirect_delay, Duration::from_millis(250));
        assert!(config.demo_mode_forced);
    }

    #[test]
    fn invalid_overrides_fall_back_to_defaults() {
        let config = WebAppConfig::resolve(lookup(&[
            (GLOBAL_API_BASE, "habits.example.com"),
            (GLOBAL_TASK_REDIRECT_MS, "soon"),
            (GLOBAL_FORCE_DEMO, "0"),
        ]));
        assert_eq!(config, WebAppConfig::default());
    }

    #[test]
    fn normalize_base_url_requires_scheme_and_host() {
        assert_eq!(normalize_base_url("   "), Err(ConfigError::EmptyBaseUrl));
        assert_eq!(
            normalize_base_url("ftp://example.com"),
            Err(ConfigError::InvalidBaseUrl)
        );
        assert_eq!(normalize_base_url("https://"), Err(ConfigError::InvalidBaseUrl));
        assert_eq!(normalize_base_url("http://:8000"), Err(ConfigError::InvalidBaseUrl));
        assert_eq!(normalize_base_url("mailto:team@example.com"), Err(ConfigError::InvalidBaseUrl));
        assert_eq!(
            normalize_base_url("https://habits.example.com/api//"),
            Ok("https://habits.example.com/api".to_string())
        );
        assert_eq!(
            normalize_base_url("http://localhost:8000/"),
            Ok("http://localhost:8000".to_string())
        );
    }
}
