//! Configuration loading and data folder resolution

use crate::{Error, Result};
use std::path::PathBuf;

/// File name of the shared BiteLog database inside the data folder
pub const DATABASE_FILE: &str = "bitelog.db";

/// Data folder resolution priority order:
/// 1. Command-line argument (highest priority)
/// 2. Environment variable
/// 3. TOML config file (`data_folder` key)
/// 4. OS-dependent compiled default (fallback)
pub fn resolve_data_folder(cli_arg: Option<&str>, env_var_name: &str) -> PathBuf {
    // Priority 1: Command-line argument
    if let Some(path) = cli_arg {
        return PathBuf::from(path);
    }

    // Priority 2: Environment variable
    if let Ok(path) = std::env::var(env_var_name) {
        if !path.trim().is_empty() {
            return PathBuf::from(path);
        }
    }

    // Priority 3: TOML config file
    if let Ok(config_path) = find_config_file() {
        if let Ok(toml_content) = std::fs::read_to_string(&config_path) {
            if let Ok(config) = toml::from_str::<toml::Value>(&toml_content) {
                if let Some(folder) = config.get("data_folder").and_then(|v| v.as_str()) {
                    return PathBuf::from(folder);
                }
            }
        }
    }

    // Priority 4: OS-dependent compiled default
    default_data_folder()
}

/// Full path of the BiteLog database inside a data folder
pub fn database_path(data_folder: &std::path::Path) -> PathBuf {
    data_folder.join(DATABASE_FILE)
}

/// Locate the platform config file, preferring the per-user location
fn find_config_file() -> Result<PathBuf> {
    if cfg!(target_os = "linux") {
        // Try ~/.config/bitelog/config.toml first, then /etc/bitelog/config.toml
        if let Some(path) = dirs::config_dir().map(|d| d.join("bitelog").join("config.toml")) {
            if path.exists() {
                return Ok(path);
            }
        }
        let system_config = PathBuf::from("/etc/bitelog/config.toml");
        if system_config.exists() {
            return Ok(system_config);
        }
        return Err(Error::Config("No config file found".to_string()));
    }

    let path = dirs::config_dir()
        .map(|d| d.join("bitelog").join("config.toml"))
        .ok_or_else(|| Error::Config("Could not determine config directory".to_string()))?;

    if path.exists() {
        Ok(path)
    } else {
        Err(Error::Config(format!("Config file not found: {:?}", path)))
    }
}

/// OS-dependent default data folder path
fn default_data_folder() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("bitelog"))
        .unwrap_or_else(|| PathBuf::from("./bitelog_data"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_argument_wins() {
        let folder = resolve_data_folder(Some("/tmp/bl-test"), "BITELOG_TEST_UNSET_VAR");
        assert_eq!(folder, PathBuf::from("/tmp/bl-test"));
    }

    #[test]
    fn env_var_used_when_no_cli_arg() {
        std::env::set_var("BITELOG_TEST_DATA_VAR", "/tmp/bl-env");
        let folder = resolve_data_folder(None, "BITELOG_TEST_DATA_VAR");
        std::env::remove_var("BITELOG_TEST_DATA_VAR");
        assert_eq!(folder, PathBuf::from("/tmp/bl-env"));
    }

    #[test]
    fn database_path_appends_file_name() {
        let path = database_path(std::path::Path::new("/var/lib/bitelog"));
        assert_eq!(path, PathBuf::from("/var/lib/bitelog/bitelog.db"));
    }
}
