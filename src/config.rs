use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigFlags {
    pub read_only: bool,
    pub autosave_debounce_ms: Option<u64>,
    pub autosave_interval_ms: Option<u64>,
}

impl ConfigFlags {
    /// Merge two flag sets, the `other` side winning for valued options.
    pub fn union(&self, other: &Self) -> Self {
        Self {
            read_only: self.read_only || other.read_only,
            autosave_debounce_ms: other.autosave_debounce_ms.or(self.autosave_debounce_ms),
            autosave_interval_ms: other.autosave_interval_ms.or(self.autosave_interval_ms),
        }
    }
}

pub fn global_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return PathBuf::from(appdata).join("draftpad").join("config");
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join("Library")
                .join("Application Support")
                .join("draftpad")
                .join("config");
        }
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg).join("draftpad").join("config");
        }
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join(".config")
                .join("draftpad")
                .join("config");
        }
    }

    PathBuf::from(".draftpadrc")
}

pub fn local_override_path() -> PathBuf {
    PathBuf::from(".draftpadrc")
}

pub fn load_config_flags(path: &Path) -> Result<ConfigFlags> {
    if !path.exists() {
        return Ok(ConfigFlags::default());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let tokens = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .flat_map(|line| line.split_whitespace().map(ToOwned::to_owned))
        .collect::<Vec<_>>();
    Ok(parse_flag_tokens(&tokens))
}

pub fn save_config_flags(path: &Path, flags: &ConfigFlags) -> Result<()> {
    let mut lines = Vec::new();
    lines.push("# draftpad defaults (saved with --save)".to_string());
    if flags.read_only {
        lines.push("--read-only".to_string());
    }
    if let Some(ms) = flags.autosave_debounce_ms {
        lines.push(format!("--autosave-debounce-ms {ms}"));
    }
    if let Some(ms) = flags.autosave_interval_ms {
        lines.push(format!("--autosave-interval-ms {ms}"));
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config dir {}", parent.display()))?;
    }
    fs::write(path, format!("{}\n", lines.join("\n")))
        .with_context(|| format!("Failed to write config {}", path.display()))
}

pub fn clear_config_flags(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_file(path).with_context(|| format!("Failed to remove {}", path.display()))?;
    }
    Ok(())
}

pub fn parse_flag_tokens(tokens: &[String]) -> ConfigFlags {
    let mut flags = ConfigFlags::default();
    let mut i = 0;
    while i < tokens.len() {
        let token = &tokens[i];
        if token == "--read-only" {
            flags.read_only = true;
        } else if token == "--autosave-debounce-ms" {
            if let Some(next) = tokens.get(i + 1) {
                flags.autosave_debounce_ms = next.parse().ok();
                i += 1;
            }
        } else if let Some(value) = token.strip_prefix("--autosave-debounce-ms=") {
            flags.autosave_debounce_ms = value.parse().ok();
        } else if token == "--autosave-interval-ms" {
            if let Some(next) = tokens.get(i + 1) {
                flags.autosave_interval_ms = next.parse().ok();
                i += 1;
            }
        } else if let Some(value) = token.strip_prefix("--autosave-interval-ms=") {
            flags.autosave_interval_ms = value.parse().ok();
        }
        i += 1;
    }
    flags
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_parse_flag_tokens_extracts_known_flags() {
        let args = vec![
            "draftpad".to_string(),
            "--read-only".to_string(),
            "--autosave-debounce-ms".to_string(),
            "500".to_string(),
            "--autosave-interval-ms=5000".to_string(),
            "notes.draft.json".to_string(),
        ];
        let flags = parse_flag_tokens(&args);
        assert!(flags.read_only);
        assert_eq!(flags.autosave_debounce_ms, Some(500));
        assert_eq!(flags.autosave_interval_ms, Some(5000));
    }

    #[test]
    fn test_parse_flag_tokens_ignores_bad_values() {
        let args = vec!["--autosave-debounce-ms".to_string(), "soon".to_string()];
        let flags = parse_flag_tokens(&args);
        assert_eq!(flags.autosave_debounce_ms, None);
    }

    #[test]
    fn test_config_union_merges_cli_over_file_for_options() {
        let file = ConfigFlags {
            read_only: true,
            autosave_debounce_ms: Some(400),
            ..ConfigFlags::default()
        };
        let cli = ConfigFlags {
            autosave_debounce_ms: Some(900),
            autosave_interval_ms: Some(20_000),
            ..ConfigFlags::default()
        };
        let merged = file.union(&cli);
        assert!(merged.read_only);
        assert_eq!(merged.autosave_debounce_ms, Some(900));
        assert_eq!(merged.autosave_interval_ms, Some(20_000));
    }

    #[test]
    fn test_save_load_and_clear_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(".draftpadrc");
        let flags = ConfigFlags {
            read_only: true,
            autosave_debounce_ms: Some(500),
            autosave_interval_ms: Some(15_000),
        };

        save_config_flags(&path, &flags).unwrap();
        let loaded = load_config_flags(&path).unwrap();
        assert_eq!(loaded, flags);

        clear_config_flags(&path).unwrap();
        assert!(!path.exists());
    }
}
