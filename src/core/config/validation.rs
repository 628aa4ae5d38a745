use super::service::{AppConfig, ConfigError};

const MAX_PAGE_SIZE: usize = 10_000;

pub fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.api_key.trim().is_empty() {
        return Err(ConfigError::Missing("OPENROUTER_API_KEY"));
    }

    validate_url("upstream_url", &config.upstream_url)?;
    validate_url("llm_base_url", &config.llm_base_url)?;

    if config.page_size == 0 || config.page_size > MAX_PAGE_SIZE {
        return Err(ConfigError::invalid(
            "page_size",
            format!("must be between 1 and {}", MAX_PAGE_SIZE),
        ));
    }
    if config.max_tokens == 0 {
        return Err(ConfigError::invalid("max_tokens", "must be at least 1"));
    }
    if config.fetch_timeout_secs == 0 {
        return Err(ConfigError::invalid("fetch_timeout_secs", "must be at least 1"));
    }
    if config.llm_timeout_secs == 0 {
        return Err(ConfigError::invalid("llm_timeout_secs", "must be at least 1"));
    }
    if config.model.trim().is_empty() {
        return Err(ConfigError::Missing("model"));
    }
    if config.cache_path.as_os_str().is_empty() {
        return Err(ConfigError::Missing("cache_path"));
    }

    Ok(())
}

fn validate_url(field: &'static str, value: &str) -> Result<(), ConfigError> {
    if value.starts_with("http://") || value.starts_with("https://") {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, "expected an http:// or https:// URL"))
    }
}
