use std::path::PathBuf;

const CONFIG_FILE: &str = ".simfluxy.toml";
const APP_NAME: &str = "simfluxy";

/// Load config file content from CWD first, then the user config directory
///
/// Searches for:
/// 1. `.simfluxy.toml` in the current working directory
/// 2. `simfluxy/config.toml` in the platform config directory
///
/// Returns the file content if found, None otherwise.
pub fn load_config_file() -> Option<String> {
    let mut candidates = vec![PathBuf::from(CONFIG_FILE)];
    candidates.extend(user_config_path());
    read_first(&candidates)
}

/// Content of the first readable file among `candidates`
pub fn read_first(candidates: &[PathBuf]) -> Option<String> {
    candidates.iter().find_map(|path| {
        let content = std::fs::read_to_string(path).ok()?;
        log::debug!("Loaded config from {}", path.display());
        Some(content)
    })
}

/// Path of the config file in the platform config directory
///
/// Returns ~/.config/simfluxy/config.toml on Linux.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_NAME).join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_first_skips_missing_files() {
        let dir = std::env::temp_dir().join(format!("simfluxy-config-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let present = dir.join("present.toml");
        std::fs::write(&present, "name = \"found\"").unwrap();

        let content = read_first(&[dir.join("missing.toml"), present.clone()]);
        assert_eq!(content.as_deref(), Some("name = \"found\""));
        assert_eq!(read_first(&[dir.join("missing.toml")]), None);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_user_config_path_is_namespaced() {
        if let Some(path) = user_config_path() {
            assert!(path.ends_with("simfluxy/config.toml"));
        }
    }
}
