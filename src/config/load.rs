use std::env;
use std::path::PathBuf;

use super::schema::Settings;
use crate::error::Result;

const ENV_PREFIX: &str = "AUDIOCC";

impl Settings {
    /// Struct defaults, overlaid by the config file when there is one, then
    /// by `AUDIOCC__SECTION__KEY` environment variables.
    pub fn load() -> Result<Self> {
        let mut sources = ::config::Config::builder();

        if let Some(path) = resolve_config_path() {
            tracing::debug!(path = %path.display(), "reading config");
            sources = sources.add_source(::config::File::from(path.as_path()).required(false));
        }

        let env = ::config::Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("__")
            .separator("__")
            .try_parsing(true);

        let merged = sources.add_source(env).build()?;
        Ok(merged.try_deserialize()?)
    }

    /// Reject values the organizer cannot run with.
    pub fn validate(&self) -> std::result::Result<(), String> {
        let problems = [
            (
                self.organize.bitrate.trim().is_empty(),
                "organize.bitrate must not be empty",
            ),
            (self.organize.workers == Some(0), "organize.workers must be >= 1"),
            (
                self.library.extensions.iter().all(|e| e.trim().is_empty()),
                "library.extensions must list at least one extension",
            ),
        ];

        match problems.iter().find(|(bad, _)| *bad) {
            Some((_, msg)) => Err(msg.to_string()),
            None => Ok(()),
        }
    }

    /// Effective settings as TOML, for `--dump-config`.
    pub fn to_toml(&self) -> std::result::Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

/// `AUDIOCC_CONFIG_PATH` if set, else the XDG location.
pub fn resolve_config_path() -> Option<PathBuf> {
    env::var_os("AUDIOCC_CONFIG_PATH")
        .map(PathBuf::from)
        .or_else(default_config_path)
}

/// `$XDG_CONFIG_HOME/audiocc/config.toml`, falling back to
/// `~/.config/audiocc/config.toml`.
pub fn default_config_path() -> Option<PathBuf> {
    env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|| env::var_os("HOME").map(|home| PathBuf::from(home).join(".config")))
        .map(|dir| dir.join("audiocc").join("config.toml"))
}
