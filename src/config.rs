use serde::Deserialize;
use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::Result;

const CONFIG_PATH_ENV_VAR: &str = "CALNOTE_CONFIG_FILE";

pub(crate) fn find_configfile_locations() -> io::Result<Vec<PathBuf>> {
    let config_env = env::var(CONFIG_PATH_ENV_VAR).ok().map(PathBuf::from);

    let home = dirs::home_dir().ok_or_else(|| {
        io::Error::new(io::ErrorKind::Other, "Unable to find home directory")
    })?;

    let home_config = home.join(".calnote.toml");

    let config_xdg = if let Ok(dir) = env::var("XDG_CONFIG_HOME") {
        PathBuf::from(dir)
    } else {
        dirs::config_dir().unwrap_or_else(|| home.join(".config"))
    }
    .join("calnote")
    .join("config.toml");

    let mut locations = vec![config_xdg, home_config];

    if let Some(path) = config_env {
        locations.insert(0, path);
    }

    Ok(locations)
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub today_char: Option<char>,
    pub selected_char: Option<char>,
    pub show_weekday_header: bool,
    pub warn_past_months: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            today_char: Some('*'),
            selected_char: Some('>'),
            show_weekday_header: true,
            warn_past_months: true,
        }
    }
}

impl Config {
    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Config::from_toml(&content)
    }
}

/// Loads `path` if given, otherwise the first existing file out of the
/// default locations. Without any config file the defaults are used.
pub fn load_suitable_config(path: Option<&Path>) -> Result<Config> {
    if let Some(path) = path {
        log::info!("Loading config from {}", path.display());
        return Config::from_path(path);
    }

    for candidate in find_configfile_locations()? {
        if candidate.is_file() {
            log::info!("Loading config from {}", candidate.display());
            return Config::from_path(&candidate);
        }
    }

    log::info!("No config file found, using defaults");
    Ok(Config::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn empty_file_yields_defaults() {
        assert_eq!(Config::from_toml("").unwrap(), Config::default());
    }

    #[test]
    fn values_override_defaults() {
        let config = Config::from_toml(
            r#"
            today_char = "@"
            show_weekday_header = false
            "#,
        )
        .unwrap();

        assert_eq!(config.today_char, Some('@'));
        assert!(!config.show_weekday_header);
        assert_eq!(config.selected_char, Some('>'));
        assert!(config.warn_past_months);
    }

    #[test]
    fn malformed_file_is_a_config_error() {
        let err = Config::from_toml("today_char = 12").unwrap_err();
        assert!(matches!(err.kind, ErrorKind::ConfigParse));
    }

    #[test]
    fn explicit_missing_path_is_an_io_error() {
        let err = load_suitable_config(Some(Path::new("/nonexistent/calnote.toml"))).unwrap_err();
        assert!(matches!(err.kind, ErrorKind::IOError(_)));
    }
}
