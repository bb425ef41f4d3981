use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub packviz: PackvizConfig,
    #[serde(default)]
    pub layout: LayoutConfig,
    #[serde(default)]
    pub views: ViewsConfig,
}

/// packviz-specific configuration
#[derive(Debug, Clone, Deserialize)]
pub struct PackvizConfig {
    /// Snapshot to render: a JSON/YAML context file or a directory of record files.
    #[serde(default = "default_data_path")]
    pub data_path: PathBuf,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for PackvizConfig {
    fn default() -> Self {
        Self {
            data_path: default_data_path(),
            log_level: default_log_level(),
        }
    }
}

/// Radial layout canvas
#[derive(Debug, Clone, Deserialize)]
pub struct LayoutConfig {
    #[serde(default = "default_width")]
    pub width: f64,
    #[serde(default = "default_height")]
    pub height: f64,
    /// Satellite circle radius as a fraction of the shorter canvas side.
    #[serde(default = "default_radius_factor")]
    pub radius_factor: f64,
    #[serde(default = "default_label_max_chars")]
    pub label_max_chars: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            radius_factor: default_radius_factor(),
            label_max_chars: default_label_max_chars(),
        }
    }
}

/// Record categories used by the views
#[derive(Debug, Clone, Deserialize)]
pub struct ViewsConfig {
    #[serde(default = "default_root_type")]
    pub root_type: String,
    #[serde(default = "default_group_type")]
    pub group_type: String,
    #[serde(default = "default_member_type")]
    pub member_type: String,
    #[serde(default = "default_leaders_field")]
    pub leaders_field: String,
    /// Reject snapshots with duplicate record keys instead of keeping the first.
    #[serde(default)]
    pub strict_keys: bool,
}

impl Default for ViewsConfig {
    fn default() -> Self {
        Self {
            root_type: default_root_type(),
            group_type: default_group_type(),
            member_type: default_member_type(),
            leaders_field: default_leaders_field(),
            strict_keys: false,
        }
    }
}

fn default_data_path() -> PathBuf {
    PathBuf::from("records.json")
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_width() -> f64 {
    680.0
}

fn default_height() -> f64 {
    420.0
}

fn default_radius_factor() -> f64 {
    0.33
}

fn default_label_max_chars() -> usize {
    28
}

fn default_root_type() -> String {
    "pack".to_string()
}

fn default_group_type() -> String {
    "den".to_string()
}

fn default_member_type() -> String {
    "scout".to_string()
}

fn default_leaders_field() -> String {
    "leaders".to_string()
}

impl Config {
    /// Load configuration from file
    ///
    /// Loads environment variables from .env file (if present) before loading config.
    /// Looks for config file in this order:
    /// 1. Path specified in PACKVIZ_CONFIG environment variable
    /// 2. ./config.toml in current directory
    pub fn load() -> Result<Self> {
        // .env is optional
        let _ = dotenv::dotenv();

        let config_path = config_path();
        Self::from_file(&config_path)
    }

    /// Like [`Config::load`], but missing files yield the defaults.
    pub fn load_or_default() -> Result<Self> {
        let _ = dotenv::dotenv();

        let config_path = config_path();
        if !config_path.exists() {
            log::info!(
                "No config file at {}, using defaults",
                config_path.display()
            );
            return Ok(Self::default());
        }
        Self::from_file(&config_path)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let config_str = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&config_str)
            .with_context(|| format!("Failed to parse {}", path.display()))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        let layout = &self.layout;
        if !(layout.width > 0.0 && layout.height > 0.0) {
            anyhow::bail!("layout.width and layout.height must be greater than 0");
        }

        if !(layout.radius_factor > 0.0 && layout.radius_factor <= 0.5) {
            anyhow::bail!("layout.radius_factor must be in (0.0, 0.5]");
        }

        if layout.label_max_chars < 2 {
            anyhow::bail!("layout.label_max_chars must be at least 2");
        }

        for (name, value) in [
            ("views.root_type", &self.views.root_type),
            ("views.group_type", &self.views.group_type),
            ("views.member_type", &self.views.member_type),
            ("views.leaders_field", &self.views.leaders_field),
        ] {
            if value.trim().is_empty() {
                anyhow::bail!("{} must not be empty", name);
            }
        }

        self.log_level()?;

        Ok(())
    }

    /// `packviz.log_level` as a filter, e.g. `"debug"` or `"off"`.
    pub fn log_level(&self) -> Result<log::LevelFilter> {
        self.packviz
            .log_level
            .parse()
            .map_err(|_| anyhow::anyhow!("Invalid packviz.log_level: {}", self.packviz.log_level))
    }

    /// Get the snapshot path
    pub fn data_path(&self) -> &Path {
        &self.packviz.data_path
    }
}

fn config_path() -> PathBuf {
    std::env::var("PACKVIZ_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::sync::Mutex;
    use tempfile::TempDir;

    /// Serialize config tests that mutate process-wide env so they don't race.
    static CONFIG_TEST_LOCK: Mutex<()> = Mutex::new(());

    fn with_config_env(config_path: &Path, f: impl FnOnce()) {
        let original = std::env::var("PACKVIZ_CONFIG").ok();
        std::env::set_var("PACKVIZ_CONFIG", config_path);
        f();
        std::env::remove_var("PACKVIZ_CONFIG");
        if let Some(val) = original {
            std::env::set_var("PACKVIZ_CONFIG", val);
        }
    }

    #[test]
    fn test_config_load_success() {
        let _lock = CONFIG_TEST_LOCK.lock().unwrap();
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        fs::write(
            &config_path,
            r#"
[packviz]
data_path = "./dataset"
log_level = "debug"

[layout]
width = 800.0
height = 600.0

[views]
root_type = "troop"
strict_keys = true
"#,
        )
        .unwrap();

        with_config_env(&config_path, || {
            let config = Config::load();
            assert!(config.is_ok(), "Config::load() failed: {:?}", config.err());
            let config = config.unwrap();
            assert_eq!(config.packviz.log_level, "debug");
            assert_eq!(config.data_path(), Path::new("./dataset"));
            assert_eq!(config.layout.width, 800.0);
            assert_eq!(config.layout.radius_factor, 0.33);
            assert_eq!(config.layout.label_max_chars, 28);
            assert_eq!(config.views.root_type, "troop");
            assert_eq!(config.views.group_type, "den");
            assert!(config.views.strict_keys);
        });
    }

    #[test]
    fn test_config_rejects_bad_layout() {
        let _lock = CONFIG_TEST_LOCK.lock().unwrap();
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        fs::write(&config_path, "[layout]\nradius_factor = 0.9\n").unwrap();

        with_config_env(&config_path, || {
            let err = Config::load().unwrap_err();
            assert!(err.to_string().contains("radius_factor"));
        });
    }

    #[test]
    fn test_config_log_level() {
        let mut config = Config::default();
        assert_eq!(config.log_level().unwrap(), log::LevelFilter::Info);

        config.packviz.log_level = "DEBUG".to_string();
        assert_eq!(config.log_level().unwrap(), log::LevelFilter::Debug);

        config.packviz.log_level = "chatty".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("log_level"));
    }

    #[test]
    fn test_config_invalid_path() {
        let _lock = CONFIG_TEST_LOCK.lock().unwrap();
        with_config_env(Path::new("nonexistent.toml"), || {
            assert!(Config::load().is_err());
        });
    }

    #[test]
    fn test_config_missing_file_uses_defaults() {
        let _lock = CONFIG_TEST_LOCK.lock().unwrap();
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("absent.toml");
        with_config_env(&missing, || {
            let config = Config::load_or_default().unwrap();
            assert_eq!(config.layout.width, 680.0);
            assert_eq!(config.layout.height, 420.0);
            assert_eq!(config.views.member_type, "scout");
            assert!(config.validate().is_ok());
        });
    }

    #[test]
    fn test_validate_empty_type_name() {
        let mut config = Config::default();
        config.views.group_type = " ".to_string();
        assert!(config.validate().is_err());
    }
}
