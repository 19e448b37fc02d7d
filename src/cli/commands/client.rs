use crate::config::DEFAULT_API_URL;
use clap::{Arg, Command};

pub const ARG_API_URL: &str = "api-url";
pub const ARG_STORAGE_FILE: &str = "storage-file";

#[must_use]
pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_API_URL)
                .long("api-url")
                .help("Base URL of the users backend")
                .default_value(DEFAULT_API_URL)
                .env("DOORSTEP_API_URL")
                .global(true),
        )
        .arg(
            Arg::new(ARG_STORAGE_FILE)
                .long("storage-file")
                .help("Local storage file holding the session marker")
                .long_help(
                    "Local storage file holding the session marker. Defaults to doorstep/local-storage.json under the user's local data directory.",
                )
                .env("DOORSTEP_STORAGE_FILE")
                .global(true)
                .value_parser(clap::value_parser!(std::path::PathBuf)),
        )
}
