//! Dashboard configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::state::Controls;

/// Environment variable naming a JSON config file.
pub const CONFIG_ENV: &str = "SUNDASH_CONFIG";
/// Environment variable overriding the dataset path.
pub const DATA_ENV: &str = "SUNDASH_DATA";

/// Main configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Monthly sunspot table to load at startup
    pub data_path: PathBuf,
    /// Latest solar image shown under the charts
    pub sun_image_url: String,
    /// Animated full-rotation view of the Sun
    pub sun_animation_url: String,
    /// Slider positions on startup
    pub initial: Controls,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("SN_m_tot_V2.0.csv"),
            sun_image_url: "https://soho.nascom.nasa.gov/data/realtime/hmi_igr/1024/latest.jpg"
                .to_string(),
            sun_animation_url: "https://cdn.mos.cms.futurecdn.net/7nvSn2t3q7bjkZGMvRzh9M.gif"
                .to_string(),
            initial: Controls::default(),
        }
    }
}

impl DashboardConfig {
    /// Read a JSON config file. Missing keys fall back to defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        let config: DashboardConfig = serde_json::from_str(&text)
            .with_context(|| format!("parsing config file {}", path.display()))?;
        Ok(config.normalized())
    }

    /// Resolve the effective configuration.
    ///
    /// Precedence, lowest first: built-in defaults, the file named by
    /// `SUNDASH_CONFIG`, `SUNDASH_DATA`, then `data_arg` (first CLI argument).
    pub fn resolve(
        config_file: Option<PathBuf>,
        data_env: Option<PathBuf>,
        data_arg: Option<PathBuf>,
    ) -> Result<Self> {
        let mut config = match config_file {
            Some(path) => Self::from_file(&path)?,
            None => Self::default(),
        };
        if let Some(path) = data_arg.or(data_env) {
            config.data_path = path;
        }
        Ok(config)
    }

    /// [`resolve`](Self::resolve) from the process environment and arguments.
    pub fn from_env() -> Result<Self> {
        let config_file = std::env::var_os(CONFIG_ENV).map(PathBuf::from);
        let data_env = std::env::var_os(DATA_ENV).map(PathBuf::from);
        let data_arg = std::env::args_os().nth(1).map(PathBuf::from);
        Self::resolve(config_file, data_env, data_arg)
    }

    fn normalized(mut self) -> Self {
        self.initial = self.initial.clamped();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_without_sources() {
        let config = DashboardConfig::resolve(None, None, None).unwrap();
        assert_eq!(config, DashboardConfig::default());
        assert_eq!(config.initial.year_range, (1850, 2000));
        assert_eq!(config.initial.smoothing_window, 12);
        assert_eq!(config.initial.cycle_years, 11);
    }

    #[test]
    fn file_overrides_and_clamps() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sundash.json");
        std::fs::write(
            &path,
            r#"{ "data_path": "/data/sn.csv", "initial": { "smoothing_window": 99, "cycle_years": 9 } }"#,
        )
        .unwrap();

        let config = DashboardConfig::resolve(Some(path), None, None).unwrap();
        assert_eq!(config.data_path, PathBuf::from("/data/sn.csv"));
        assert_eq!(config.initial.smoothing_window, 30);
        assert_eq!(config.initial.cycle_years, 9);
        assert_eq!(config.initial.year_range, (1850, 2000));
        assert_eq!(config.sun_image_url, DashboardConfig::default().sun_image_url);
    }

    #[test]
    fn argument_beats_environment() {
        let config = DashboardConfig::resolve(
            None,
            Some(PathBuf::from("env.csv")),
            Some(PathBuf::from("arg.csv")),
        )
        .unwrap();
        assert_eq!(config.data_path, PathBuf::from("arg.csv"));

        let config = DashboardConfig::resolve(None, Some(PathBuf::from("env.csv")), None).unwrap();
        assert_eq!(config.data_path, PathBuf::from("env.csv"));
    }

    #[test]
    fn bad_json_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{ not json").unwrap();
        let err = DashboardConfig::resolve(Some(path), None, None).unwrap_err();
        assert!(format!("{err:#}").contains("broken.json"));
    }
}
