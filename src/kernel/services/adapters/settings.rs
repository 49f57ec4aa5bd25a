use std::path::{Path, PathBuf};

use crate::kernel::error::{Result, SessionError};
use crate::kernel::services::ports::settings::Settings;

use super::paths::get_cache_dir;

const SETTINGS_DIR: &str = ".novel-session";
const SETTINGS_FILE: &str = "settings.json";

pub fn get_settings_path() -> Option<PathBuf> {
    get_cache_dir().map(|dir| dir.join(SETTINGS_DIR).join(SETTINGS_FILE))
}

pub fn ensure_settings_file() -> Result<PathBuf> {
    let path = get_settings_path().ok_or(SessionError::NoSettingsDir)?;
    ensure_settings_file_at(&path)?;
    Ok(path)
}

/// Writes the default settings to `path` unless the file already exists.
pub fn ensure_settings_file_at(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    if !path.exists() {
        let content = serde_json::to_string_pretty(&Settings::default())?;
        std::fs::write(path, content)?;
    }
    Ok(())
}

pub fn load_settings() -> Result<Settings> {
    let path = get_settings_path().ok_or(SessionError::NoSettingsDir)?;
    load_settings_from(&path)
}

pub fn load_settings_from(path: &Path) -> Result<Settings> {
    let data = std::fs::read_to_string(path)?;
    serde_json::from_str(&data).map_err(|source| SessionError::Settings {
        path: path.to_path_buf(),
        source,
    })
}

/// Falls back to defaults when the file is missing or malformed.
pub fn load_settings_or_default() -> Settings {
    match load_settings() {
        Ok(settings) => settings,
        Err(SessionError::Io(err)) if err.kind() == std::io::ErrorKind::NotFound => {
            Settings::default()
        }
        Err(err) => {
            tracing::warn!(error = %err, "failed to load settings; using defaults");
            Settings::default()
        }
    }
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/adapters/settings.rs"]
mod tests;
