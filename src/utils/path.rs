use std::path::{Path, PathBuf};

/// Environment variable that relocates the config directory
pub const CONFIG_DIR_ENV: &str = "ORPHANMAP_CONFIG_DIR";

/// Get the home directory, with fallback to "/"
pub fn get_home_dir() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from("/"))
}

/// Get the config directory path (`$ORPHANMAP_CONFIG_DIR`, else ~/.config/orphanmap
/// regardless of OS)
pub fn get_config_dir() -> PathBuf {
    match std::env::var(CONFIG_DIR_ENV) {
        Ok(dir) if !dir.trim().is_empty() => expand_path(dir.trim()),
        _ => get_home_dir().join(".config").join("orphanmap"),
    }
}

/// Get the config file path
pub fn get_config_path() -> PathBuf {
    get_config_dir().join("config.toml")
}

/// Directory the log file is written to ({cache_dir}/orphanmap)
pub fn get_log_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(get_home_dir)
        .join("orphanmap")
}

/// Expand a path string, handling ~ and relative paths
pub fn expand_path(path_str: &str) -> PathBuf {
    let home_dir = get_home_dir();

    if let Some(rest) = path_str.strip_prefix("~/") {
        home_dir.join(rest)
    } else if path_str == "~" {
        home_dir
    } else {
        PathBuf::from(path_str)
    }
}

/// Format a path for display (show ~ for home)
pub fn format_path_for_display(path: &Path) -> String {
    let home_dir = get_home_dir();

    if let Ok(relative) = path.strip_prefix(&home_dir) {
        if relative.as_os_str().is_empty() {
            "~".to_string()
        } else {
            format!("~/{}", relative.to_string_lossy())
        }
    } else {
        path.to_string_lossy().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_path() {
        let home = get_home_dir();
        assert_eq!(expand_path("~"), home);
        assert_eq!(expand_path("~/.config/x"), home.join(".config/x"));
        assert_eq!(expand_path("/etc/orphanmap"), PathBuf::from("/etc/orphanmap"));
        assert_eq!(expand_path("relative/dir"), PathBuf::from("relative/dir"));
    }

    #[test]
    fn test_format_path_for_display() {
        let home = get_home_dir();
        if home != Path::new("/") {
            assert_eq!(
                format_path_for_display(&home.join(".config/orphanmap/config.toml")),
                "~/.config/orphanmap/config.toml"
            );
            assert_eq!(format_path_for_display(Path::new("/tmp/c.toml")), "/tmp/c.toml");
        }
    }

    #[test]
    fn test_config_path_is_toml_in_config_dir() {
        assert_eq!(get_config_path(), get_config_dir().join("config.toml"));
        assert!(get_log_dir().ends_with("orphanmap"));
    }
}
