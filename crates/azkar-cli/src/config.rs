//! Runtime configuration resolved from flags, environment and defaults.

use std::env;
use std::path::PathBuf;

use azkar_core::format::{TimeFormatter, TimeLocale};
use azkar_core::util::normalize_text_option;

use crate::error::CliError;

const LOCALE_ENV_VARS: [&str; 3] = ["LC_ALL", "LC_TIME", "LANG"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    pub db_path: PathBuf,
    pub locale: TimeLocale,
}

impl CliConfig {
    pub fn resolve(db_path: Option<PathBuf>, locale: Option<String>) -> Result<Self, CliError> {
        Ok(Self {
            db_path: resolve_db_path(db_path)?,
            locale: resolve_locale(locale, |key| env::var(key).ok())?,
        })
    }

    pub const fn formatter(&self) -> TimeFormatter {
        TimeFormatter::new(self.locale)
    }
}

pub fn resolve_db_path(cli_db_path: Option<PathBuf>) -> Result<PathBuf, CliError> {
    if let Some(path) = cli_db_path.or_else(|| env::var_os("AZKAR_DB_PATH").map(PathBuf::from)) {
        return Ok(path);
    }
    default_db_path()
}

pub fn default_db_path() -> Result<PathBuf, CliError> {
    dirs::data_dir()
        .map(|dir| dir.join("azkar").join("azkar.db"))
        .ok_or_else(|| CliError::Config("Failed to resolve data directory".to_string()))
}

/// An explicit `--locale` or `AZKAR_LOCALE` must be known; system locale
/// variables are best-effort and fall back to `en-US`.
pub fn resolve_locale(
    explicit: Option<String>,
    env_lookup: impl Fn(&str) -> Option<String>,
) -> Result<TimeLocale, CliError> {
    if let Some(tag) =
        normalize_text_option(explicit).or_else(|| normalize_text_option(env_lookup("AZKAR_LOCALE")))
    {
        return TimeLocale::from_tag(&tag)
            .ok_or_else(|| CliError::Config(format!("Unsupported locale: {tag}")));
    }

    Ok(LOCALE_ENV_VARS
        .iter()
        .filter_map(|key| normalize_text_option(env_lookup(key)))
        .find_map(|tag| TimeLocale::from_tag(&tag))
        .unwrap_or_default())
}
