//! Config file discovery for the climate server
//!
//! Command-line flags and `HAWAII_CLIMATE_*` variables are layered on top of
//! whatever file is found here; built-in defaults fill the rest.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;

use crate::APP_NAME;

/// Where the settings file came from
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigSource {
    /// `--config` flag or the env var passed to [`find_config_file`]
    Explicit(PathBuf),
    CurrentDir(PathBuf),
    /// Under `$XDG_CONFIG_HOME/hawaii-climate`
    XdgConfig(PathBuf),
    /// Under `/etc/hawaii-climate`
    System(PathBuf),
    /// Nothing on disk; every setting takes its default
    Defaults,
}

impl ConfigSource {
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            ConfigSource::Explicit(p)
            | ConfigSource::CurrentDir(p)
            | ConfigSource::XdgConfig(p)
            | ConfigSource::System(p) => Some(p),
            ConfigSource::Defaults => None,
        }
    }
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.path() {
            Some(p) => write!(f, "{}", p.display()),
            None => write!(f, "(defaults)"),
        }
    }
}

/// First existing `filename`, looking at `$env_var`, the working directory,
/// the user config dir, then `/etc`.
pub fn find_config_file(env_var: &str, filename: &str) -> ConfigSource {
    let from_env = env::var_os(env_var)
        .map(PathBuf::from)
        .map(ConfigSource::Explicit);

    from_env
        .into_iter()
        .chain([
            ConfigSource::CurrentDir(PathBuf::from(filename)),
            ConfigSource::XdgConfig(user_config_dir().join(filename)),
            ConfigSource::System(Path::new("/etc").join(APP_NAME).join(filename)),
        ])
        .find(|candidate| candidate.path().is_some_and(|p| p.is_file()))
        .unwrap_or(ConfigSource::Defaults)
}

fn user_config_dir() -> PathBuf {
    env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|| env::var_os("HOME").map(|home| PathBuf::from(home).join(".config")))
        .unwrap_or_else(|| PathBuf::from(".config"))
        .join(APP_NAME)
}

/// Parse the TOML file behind `source`, or `T::default()` for
/// [`ConfigSource::Defaults`]
pub fn load_config<T: DeserializeOwned + Default>(source: &ConfigSource) -> anyhow::Result<T> {
    let Some(path) = source.path() else {
        return Ok(T::default());
    };
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}
