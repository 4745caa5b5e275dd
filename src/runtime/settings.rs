use crate::config::{Settings, resolve_config_path};

/// Settings for this run. An unreadable or invalid config file is reported
/// and replaced by the defaults instead of stopping the run.
pub fn load_settings() -> Settings {
    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            tracing::warn!(
                path = ?resolve_config_path(),
                error = %e,
                "failed to load config, using defaults"
            );
            return Settings::default();
        }
    };

    if let Err(msg) = settings.validate() {
        tracing::warn!(%msg, "invalid config, using defaults");
        return Settings::default();
    }
    settings
}
