use crate::{config::AppConfig, errors::AppError};
use std::path::PathBuf;

/// Options shared by every page subcommand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlobalArgs {
    pub api_url: String,
    pub storage_file: Option<PathBuf>,
}

impl GlobalArgs {
    #[must_use]
    pub fn new(api_url: String) -> Self {
        Self {
            api_url,
            storage_file: None,
        }
    }

    pub fn set_storage_file(&mut self, path: PathBuf) {
        self.storage_file = Some(path);
    }

    /// # Errors
    /// Returns `AppError::Config` if the API URL is not a valid http(s) URL.
    pub fn config(&self) -> Result<AppConfig, AppError> {
        let storage = self
            .storage_file
            .clone()
            .unwrap_or_else(AppConfig::default_storage_path);
        AppConfig::new(&self.api_url, storage)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_args() {
        let mut args = GlobalArgs::new("http://localhost:3000/".to_string());
        args.set_storage_file(PathBuf::from("/tmp/doorstep.json"));

        let config = args.config().unwrap_or_else(|err| panic!("{err}"));
        assert_eq!(config.api_base_url, "http://localhost:3000");
        assert_eq!(config.storage_path, PathBuf::from("/tmp/doorstep.json"));
    }

    #[test]
    fn test_default_storage_and_bad_url() {
        let args = GlobalArgs::new("http://localhost:3000".to_string());
        let config = args.config().unwrap_or_else(|err| panic!("{err}"));
        assert_eq!(config.storage_path, AppConfig::default_storage_path());

        let args = GlobalArgs::new("ftp://localhost".to_string());
        assert!(matches!(args.config(), Err(AppError::Config(_))));
    }
}
