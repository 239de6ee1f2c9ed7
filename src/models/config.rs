//! Configuration model loaded from external sources.

use serde::Deserialize;

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_cache_capacity() -> usize {
    32
}

#[derive(Clone, Debug, Deserialize)]
/// Settings of the vehicle discovery client.
pub struct ClientConfig {
    /// Root of the rental platform REST API, e.g. `https://api.example.com/api`.
    pub api_url: String,
    /// Bearer token attached to every request when present.
    #[serde(default)]
    pub api_token: Option<String>,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Maximum number of cached backend responses.
    #[serde(default = "default_cache_capacity")]
    pub cache_capacity: usize,
}

#[cfg(test)]
mod tests {
    use config::{Config, File, FileFormat};

    use super::*;

    #[test]
    fn loads_yaml_with_defaults() {
        let settings = Config::builder()
            .add_source(File::from_str(
                "api_url: http://localhost:8000/api\n",
                FileFormat::Yaml,
            ))
            .build()
            .expect("settings should build");

        let config: ClientConfig = settings.try_deserialize().expect("valid config");

        assert_eq!(config.api_url, "http://localhost:8000/api");
        assert_eq!(config.api_token, None);
        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(config.cache_capacity, 32);
    }

    #[test]
    fn later_sources_override_earlier_ones() {
        let settings = Config::builder()
            .add_source(File::from_str(
                "api_url: http://localhost:8000/api\nrequest_timeout_secs: 10\n",
                FileFormat::Yaml,
            ))
            .add_source(File::from_str(
                "api_token: secret\nrequest_timeout_secs: 3\n",
                FileFormat::Yaml,
            ))
            .build()
            .expect("settings should build");

        let config: ClientConfig = settings.try_deserialize().expect("valid config");

        assert_eq!(config.api_token.as_deref(), Some("secret"));
        assert_eq!(config.request_timeout_secs, 3);
    }

    #[test]
    fn missing_api_url_is_an_error() {
        let settings = Config::builder()
            .add_source(File::from_str("api_token: secret\n", FileFormat::Yaml))
            .build()
            .expect("settings should build");

        assert!(settings.try_deserialize::<ClientConfig>().is_err());
    }
}
