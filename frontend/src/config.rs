//! Frontend configuration loaded via OrthoConfig.

use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;

const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:10000/";

/// Errors raised while interpreting loaded settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// The API base URL did not parse.
    #[error("invalid API base URL `{value}`: {source}")]
    InvalidBaseUrl {
        /// Raw configured value.
        value: String,
        /// Underlying parse failure.
        source: url::ParseError,
    },
    /// The API base URL used a scheme other than http or https.
    #[error("API base URL must use http or https, got `{scheme}`")]
    UnsupportedScheme {
        /// Scheme found in the configured URL.
        scheme: String,
    },
    /// A request timeout of zero seconds was configured.
    #[error("request timeout must be at least one second")]
    ZeroTimeout,
}

/// Runtime settings for the terminal client.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "RECOMMENDER")]
pub struct FrontendSettings {
    /// Origin of the recommendation backend.
    pub api_base_url: Option<String>,
    /// Optional per-request timeout in seconds.
    pub request_timeout_secs: Option<u64>,
    /// Emit logs as JSON lines instead of human-readable text.
    #[ortho_config(default = false)]
    pub json_logs: bool,
}

impl FrontendSettings {
    /// Return the configured backend origin, normalised to end in `/` so
    /// relative endpoints keep any path prefix.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError`] when the value does not parse or does not use
    /// http(s).
    pub fn api_base_url(&self) -> Result<Url, SettingsError> {
        let raw = self.api_base_url.as_deref().unwrap_or(DEFAULT_API_BASE_URL);
        parse_base_url(raw)
    }

    /// Return the configured request timeout, if any.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::ZeroTimeout`] for a zero timeout.
    pub fn request_timeout(&self) -> Result<Option<Duration>, SettingsError> {
        match self.request_timeout_secs {
            Some(0) => Err(SettingsError::ZeroTimeout),
            Some(secs) => Ok(Some(Duration::from_secs(secs))),
            None => Ok(None),
        }
    }
}

/// Parse and normalise a backend origin.
///
/// # Errors
///
/// Returns [`SettingsError`] when `raw` does not parse or does not use http(s).
pub fn parse_base_url(raw: &str) -> Result<Url, SettingsError> {
    let mut url = Url::parse(raw.trim()).map_err(|source| SettingsError::InvalidBaseUrl {
        value: raw.to_owned(),
        source,
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(SettingsError::UnsupportedScheme {
            scheme: url.scheme().to_owned(),
        });
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    //! Unit tests for frontend configuration parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    fn load_from_empty_args() -> FrontendSettings {
        FrontendSettings::load_from_iter([OsString::from("recommender")])
            .expect("config should load")
    }

    #[rstest]
    fn default_values_are_used_when_missing() {
        let _guard = lock_env([
            ("RECOMMENDER_API_BASE_URL", None::<String>),
            ("RECOMMENDER_REQUEST_TIMEOUT_SECS", None::<String>),
            ("RECOMMENDER_JSON_LOGS", None::<String>),
        ]);

        let settings = load_from_empty_args();
        assert!(!settings.json_logs);
        assert_eq!(
            settings.api_base_url().expect("default URL").as_str(),
            DEFAULT_API_BASE_URL
        );
        assert_eq!(settings.request_timeout().expect("no timeout"), None);
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            (
                "RECOMMENDER_API_BASE_URL",
                Some("https://recommender.example/api".to_owned()),
            ),
            ("RECOMMENDER_REQUEST_TIMEOUT_SECS", Some("15".to_owned())),
            ("RECOMMENDER_JSON_LOGS", Some("true".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert!(settings.json_logs);
        assert_eq!(
            settings.api_base_url().expect("configured URL").as_str(),
            "https://recommender.example/api/"
        );
        assert_eq!(
            settings.request_timeout().expect("configured timeout"),
            Some(Duration::from_secs(15))
        );
    }

    #[rstest]
    #[case("not a url")]
    #[case("ftp://127.0.0.1/")]
    #[case("file:///tmp/backend")]
    fn rejects_unusable_base_urls(#[case] raw: &str) {
        assert!(parse_base_url(raw).is_err());
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let settings = FrontendSettings {
            api_base_url: None,
            request_timeout_secs: Some(0),
            json_logs: false,
        };
        assert!(matches!(
            settings.request_timeout(),
            Err(SettingsError::ZeroTimeout)
        ));
    }
}
