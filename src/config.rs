use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::bar::{KeyBindings, KeymapPreset, ShortcutModifier};
use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Config {
    pub bar: BarConfig,
    pub appearance: AppearanceConfig,
    pub source: SourceConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct BarConfig {
    pub placeholder: String,
    pub icon: Option<String>,
    pub show_keyboard_shortcuts: bool,
    pub debounce_ms: u64,
    pub activity_delay_ms: u64,
    pub shortcut_modifier: String,
    pub keymap: String,
}

impl Default for BarConfig {
    fn default() -> Self {
        Self {
            placeholder: "Search".to_string(),
            icon: Some("🔍".to_string()),
            show_keyboard_shortcuts: false,
            debounce_ms: 200,
            activity_delay_ms: 120,
            shortcut_modifier: "alt".to_string(),
            keymap: "default".to_string(),
        }
    }
}

impl BarConfig {
    pub fn debounce_interval(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn activity_delay(&self) -> Duration {
        Duration::from_millis(self.activity_delay_ms)
    }

    pub fn key_bindings(&self) -> KeyBindings {
        KeyBindings {
            preset: KeymapPreset::parse(&self.keymap),
            shortcut_modifier: ShortcutModifier::parse(&self.shortcut_modifier)
                .unwrap_or(ShortcutModifier::Alt),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AppearanceConfig {
    pub width: u16,
    pub max_visible_rows: u16,
    pub reduce_transparency: bool,
}

impl Default for AppearanceConfig {
    fn default() -> Self {
        Self {
            width: 72,
            max_visible_rows: 10,
            reduce_transparency: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct SourceConfig {
    pub latency_ms: u64,
}

impl SourceConfig {
    pub fn latency(&self) -> Duration {
        Duration::from_millis(self.latency_ms)
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
    pub path: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            path: None,
        }
    }
}

impl Config {
    pub fn load() -> AppResult<Self> {
        let Some(path) = default_config_path() else {
            return Ok(Self::default());
        };
        Self::load_from_path(path)
    }

    pub fn load_from_path(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        if !path.is_file() {
            return Err(AppError::invalid_argument(format!(
                "config path is not a regular file: {}",
                path.display()
            )));
        }

        let raw = fs::read_to_string(path).map_err(|source| {
            AppError::io_with_context(source, format!("failed to read config: {}", path.display()))
        })?;
        let parsed = toml::from_str::<Self>(&raw)
            .map_err(|source| AppError::config(path.display().to_string(), source.to_string()))?;
        Ok(parsed.sanitized())
    }

    fn sanitized(mut self) -> Self {
        self.bar.debounce_ms = self.bar.debounce_ms.min(5_000);
        self.bar.activity_delay_ms = self.bar.activity_delay_ms.min(5_000);
        if ShortcutModifier::parse(&self.bar.shortcut_modifier).is_none() {
            self.bar.shortcut_modifier = BarConfig::default().shortcut_modifier;
        }
        if self.bar.icon.as_deref().is_some_and(str::is_empty) {
            self.bar.icon = None;
        }
        self.appearance.width = self.appearance.width.max(20);
        self.appearance.max_visible_rows = self.appearance.max_visible_rows.max(1);
        if self.log.level.trim().is_empty() {
            self.log.level = LogConfig::default().level;
        }
        self
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    if let Some(explicit) = std::env::var_os("QAB_CONFIG_PATH")
        && !explicit.is_empty()
    {
        return Some(PathBuf::from(explicit));
    }

    if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME")
        && !xdg.is_empty()
    {
        return Some(PathBuf::from(xdg).join("qab").join("config.toml"));
    }
    if let Some(home) = std::env::var_os("HOME")
        && !home.is_empty()
    {
        return Some(
            PathBuf::from(home)
                .join(".config")
                .join("qab")
                .join("config.toml"),
        );
    }
    if let Some(appdata) = std::env::var_os("APPDATA")
        && !appdata.is_empty()
    {
        return Some(PathBuf::from(appdata).join("qab").join("config.toml"));
    }
    None
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;
    use std::process;
    use std::time::{Duration, SystemTime, UNIX_EPOCH};

    use crate::bar::{KeymapPreset, ShortcutModifier};
    use crate::error::AppError;

    use super::Config;

    fn unique_temp_path(suffix: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock should be after unix epoch")
            .as_nanos();
        let mut path = std::env::temp_dir();
        path.push(format!("qab_config_{suffix}_{}_{}", process::id(), nanos));
        path
    }

    #[test]
    fn load_from_path_returns_defaults_for_missing_file() {
        let missing = unique_temp_path("missing.toml");
        let config = Config::load_from_path(&missing).expect("missing config should fallback");
        assert_eq!(config, Config::default());
        assert_eq!(config.bar.debounce_interval(), Duration::from_millis(200));
    }

    #[test]
    fn load_from_path_applies_partial_overrides_and_sanitizes() {
        let path = unique_temp_path("custom.toml");
        fs::write(
            &path,
            r#"
            [bar]
            placeholder = "Run command"
            icon = ""
            debounce_ms = 50
            shortcut_modifier = "hyper"
            keymap = "emacs"

            [appearance]
            width = 3
            max_visible_rows = 0
            reduce_transparency = true
            "#,
        )
        .expect("config file should be written");

        let config = Config::load_from_path(&path).expect("config should parse");
        assert_eq!(config.bar.placeholder, "Run command");
        assert_eq!(config.bar.icon, None);
        assert_eq!(config.bar.debounce_interval(), Duration::from_millis(50));
        assert_eq!(config.bar.shortcut_modifier, "alt");
        assert_eq!(config.bar.key_bindings().preset, KeymapPreset::Emacs);
        assert_eq!(
            config.bar.key_bindings().shortcut_modifier,
            ShortcutModifier::Alt
        );
        assert_eq!(config.appearance.width, 20);
        assert_eq!(config.appearance.max_visible_rows, 1);
        assert!(config.appearance.reduce_transparency);
        assert_eq!(config.source.latency_ms, 0);
        assert_eq!(config.log.level, "info");

        fs::remove_file(&path).expect("config file should be removed");
    }

    #[test]
    fn load_from_path_reports_parse_errors() {
        let path = unique_temp_path("broken.toml");
        fs::write(&path, "[bar\nplaceholder = 1").expect("config file should be written");

        let err = Config::load_from_path(&path).expect_err("broken config should fail");
        assert!(matches!(err, AppError::Config { .. }));

        fs::remove_file(&path).expect("config file should be removed");
    }
}
