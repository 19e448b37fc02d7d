//! Shared configuration for every page: the users API base URL, where local
//! storage lives on disk, and the fixed page timings. Configuration values are
//! public; do not store secrets here.

use crate::errors::AppError;
use std::{path::PathBuf, time::Duration};
use url::Url;

/// Base URL of the mock users backend when nothing else is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:3000";

/// Collection path on the backend.
pub const USERS_PATH: &str = "/users";

const STORAGE_DIR: &str = "doorstep";
const STORAGE_FILE: &str = "local-storage.json";

/// Client configuration shared by all page controllers.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub api_base_url: String,
    pub storage_path: PathBuf,
    pub timings: Timings,
}

impl AppConfig {
    /// Builds a config after validating and normalizing the API base URL.
    ///
    /// # Errors
    /// Returns `AppError::Config` if the URL is empty, unparsable or not http(s).
    pub fn new(api_base_url: &str, storage_path: PathBuf) -> Result<Self, AppError> {
        Ok(Self {
            api_base_url: normalize_base_url(api_base_url)?,
            storage_path,
            timings: Timings::default(),
        })
    }

    #[must_use]
    pub fn with_timings(mut self, timings: Timings) -> Self {
        self.timings = timings;
        self
    }

    /// `<data-local-dir>/doorstep/local-storage.json`, falling back to the temp dir.
    #[must_use]
    pub fn default_storage_path() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join(STORAGE_DIR)
            .join(STORAGE_FILE)
    }
}

/// Fixed delays used by the pages.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Timings {
    /// Login success -> welcome.
    pub login_redirect: Duration,
    /// Signup success -> login.
    pub signup_redirect: Duration,
    /// Welcome failed to load the user -> login.
    pub restore_failure_redirect: Duration,
    /// Logout confirmed -> landing.
    pub logout_redirect: Duration,
    /// Banner dwell on login and signup.
    pub form_dwell: Duration,
    /// Banner dwell on welcome.
    pub welcome_dwell: Duration,
    /// Banner exit animation before removal.
    pub banner_exit: Duration,
    pub shake: Duration,
    pub card_press: Duration,
    pub clock_tick: Duration,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            login_redirect: Duration::from_millis(1500),
            signup_redirect: Duration::from_millis(2000),
            restore_failure_redirect: Duration::from_millis(2000),
            logout_redirect: Duration::from_millis(1000),
            form_dwell: Duration::from_millis(4000),
            welcome_dwell: Duration::from_millis(3000),
            banner_exit: Duration::from_millis(300),
            shake: Duration::from_millis(500),
            card_press: Duration::from_millis(200),
            clock_tick: Duration::from_millis(1000),
        }
    }
}

fn normalize_base_url(value: &str) -> Result<String, AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::Config("API base URL is required.".to_string()));
    }

    let url = Url::parse(trimmed)
        .map_err(|err| AppError::Config(format!("Invalid API base URL {trimmed}: {err}")))?;

    match url.scheme() {
        "http" | "https" => Ok(trimmed.trim_end_matches('/').to_string()),
        scheme => Err(AppError::Config(format!(
            "Unsupported API base URL scheme: {scheme}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_base_url_trims_whitespace_and_slashes() {
        assert_eq!(
            normalize_base_url("  http://localhost:3000/ "),
            Ok("http://localhost:3000".to_string())
        );
        assert_eq!(
            normalize_base_url("https://users.internal/api//"),
            Ok("https://users.internal/api".to_string())
        );
    }

    #[test]
    fn normalize_base_url_rejects_empty_and_foreign_schemes() {
        assert!(matches!(normalize_base_url("   "), Err(AppError::Config(_))));
        assert!(matches!(
            normalize_base_url("ftp://localhost"),
            Err(AppError::Config(_))
        ));
        assert!(matches!(
            normalize_base_url("localhost:3000/"),
            Err(AppError::Config(_))
        ));
    }

    #[test]
    fn default_timings_match_the_pages() {
        let timings = Timings::default();
        assert_eq!(timings.login_redirect, Duration::from_millis(1500));
        assert_eq!(timings.signup_redirect, Duration::from_secs(2));
        assert_eq!(timings.restore_failure_redirect, Duration::from_secs(2));
        assert_eq!(timings.logout_redirect, Duration::from_secs(1));
        assert_eq!(timings.form_dwell, Duration::from_secs(4));
        assert_eq!(timings.welcome_dwell, Duration::from_secs(3));
    }

    #[test]
    fn default_storage_path_ends_with_storage_file() {
        let path = AppConfig::default_storage_path();
        assert!(path.ends_with("doorstep/local-storage.json"));
    }

    #[test]
    fn new_uses_default_timings() -> Result<(), AppError> {
        let config = AppConfig::new(DEFAULT_API_URL, PathBuf::from("/tmp/storage.json"))?;
        assert_eq!(config.api_base_url, DEFAULT_API_URL);
        assert_eq!(config.timings, Timings::default());
        Ok(())
    }
}
