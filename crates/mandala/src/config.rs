use directories::ProjectDirs;
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use serde::{Deserialize, Serialize};
use serde_with::{DefaultOnError, DeserializeFromStr, serde_as};
use std::path::{Path, PathBuf};
use strum::{Display as StrumDisplay, EnumIter, EnumString};
use thiserror::Error;
use zodiac::{Chart, ChartError, Direction, PlanetPosition};

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    DeserializeFromStr,
    EnumString,
    EnumIter,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    #[default]
    #[strum(to_string = "rasi", serialize = "d1")]
    Rasi,
    #[strum(to_string = "navamsa", serialize = "d9")]
    Navamsa,
}

impl ChartKind {
    pub fn toggled(self) -> Self {
        match self {
            Self::Rasi => Self::Navamsa,
            Self::Navamsa => Self::Rasi,
        }
    }
}

#[serde_as]
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
pub struct ChartConfig {
    #[serde(default)]
    #[serde_as(as = "DefaultOnError")]
    pub ascendant: f64,
    #[serde(default)]
    pub planets: Vec<PlanetPosition>,
}

impl ChartConfig {
    pub fn to_chart(&self) -> Result<Chart, ChartError> {
        Chart::new(self.ascendant, self.planets.clone())
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    #[serde(default)]
    pub direction: Direction,
    #[serde(default)]
    pub active_chart: ChartKind,
    pub glyph_dir: Option<PathBuf>,
    #[serde(default)]
    pub rasi: ChartConfig,
    pub navamsa: Option<ChartConfig>,
}

impl Config {
    /// Chart data for `kind`. A missing navamsa falls back to the rasi chart.
    pub fn chart_config(&self, kind: ChartKind) -> &ChartConfig {
        match kind {
            ChartKind::Navamsa => self.navamsa.as_ref().unwrap_or(&self.rasi),
            ChartKind::Rasi => &self.rasi,
        }
    }

    pub fn chart(&self, kind: ChartKind) -> Result<Chart, ChartError> {
        self.chart_config(kind).to_chart()
    }

    pub fn has_navamsa(&self) -> bool {
        self.navamsa.is_some()
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Notify error: {0}")]
    Notify(#[from] notify::Error),
}

pub fn get_config_path() -> Result<PathBuf, ConfigError> {
    let proj_dirs =
        ProjectDirs::from("org", "mandala", "mandala").ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

/// The `--config` path when given, the per-user config file otherwise.
pub fn resolve_config_path(explicit: Option<PathBuf>) -> Result<PathBuf, ConfigError> {
    explicit.map_or_else(get_config_path, Ok)
}

pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let s = config::Config::builder()
        .add_source(config::File::from(path).required(false))
        .add_source(config::Environment::with_prefix("MANDALA"))
        .build()?;

    Ok(s.try_deserialize()?)
}

pub fn default_config() -> Result<Config, ConfigError> {
    let s = config::Config::builder()
        .add_source(config::File::from_str(
            DEFAULT_CONFIG,
            config::FileFormat::Toml,
        ))
        .build()?;
    Ok(s.try_deserialize()?)
}

/// Loads the config at `path`, writing the default file on first run. Any
/// failure falls back to the built-in sample chart.
pub fn load_or_setup(path: &Path) -> Config {
    if !path.exists() {
        match write_default_config(path) {
            Ok(()) => log::info!("Wrote default config to {}", path.display()),
            Err(e) => log::warn!("Could not write default config: {}", e),
        }
    }

    load_config(path)
        .or_else(|e| {
            log::error!("Failed to load config {}: {}", path.display(), e);
            default_config()
        })
        .unwrap_or_default()
}

pub fn write_default_config(path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent)?;
    }
    if !path.exists() {
        fs_err::write(path, DEFAULT_CONFIG)?;
    }
    Ok(())
}

const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

use crate::events::AppEvent;
use async_channel::Sender;

pub async fn run_async_watcher(config_path: PathBuf, tx: Sender<AppEvent>) {
    let config_dir = match config_path.parent() {
        Some(p) => p.to_path_buf(),
        None => return,
    };

    if let Err(e) = fs_err::create_dir_all(&config_dir) {
        log::error!("Failed to create config directory for watching: {}", e);
        return;
    }

    let (bridge_tx, bridge_rx) = async_channel::unbounded();

    let mut watcher = match RecommendedWatcher::new(
        move |res| {
            let _ = bridge_tx.send_blocking(res);
        },
        notify::Config::default(),
    ) {
        Ok(w) => w,
        Err(e) => {
            log::error!("Failed to create watcher: {}", e);
            return;
        }
    };

    if let Err(e) = watcher.watch(&config_dir, RecursiveMode::NonRecursive) {
        log::error!("Failed to watch config directory: {}", e);
        return;
    }

    while let Ok(res) = bridge_rx.recv().await {
        match res {
            Ok(event) => {
                let meaningful_event = matches!(
                    event.kind,
                    EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
                );

                if meaningful_event
                    && event.paths.iter().any(|p| p == &config_path)
                    && tx.send(AppEvent::ConfigReload).await.is_err()
                {
                    break;
                }
            }
            Err(e) => log::error!("Watch error: {}", e),
        }
    }
}
