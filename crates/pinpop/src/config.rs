use crate::menu::action::Action;
use crate::menu::theme::HexColor;
use crate::menu::{
    BAND_ORIGIN, BUTTON_DIAMETER, COMMIT_THRESHOLD, EMPHASIS_SCALE, GAP_ANGLE, LONG_PRESS_SECS,
    POP_DISTANCE, STRETCH_RATIO,
};
use crate::events::AppEvent;
use crate::sys::dispatch::ShellCommand;
use async_channel::Sender;
use directories::ProjectDirs;
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use popctl::geom::Point;
use popctl::protocol::SOCKET_PATH;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::path::{Path, PathBuf};
use std::time::Duration;
use strum::EnumCount;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct MenuConfig {
    /// Degrees between neighbouring buttons.
    pub gap_angle: f64,
    /// Center of the first band in `band_order`.
    pub band_origin: f64,
    pub band_order: Vec<Action>,
    pub pop_distance: f64,
    pub commit_threshold: f64,
    pub stretch_ratio: f64,
    pub long_press_secs: f64,
    pub button_diameter: f64,
    /// Center of the trigger in its own coordinate space.
    pub anchor: Point,
    pub emphasis_scale: f64,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            gap_angle: GAP_ANGLE,
            band_origin: BAND_ORIGIN,
            band_order: vec![Action::More, Action::Cross, Action::Share, Action::Pin],
            pop_distance: POP_DISTANCE,
            commit_threshold: COMMIT_THRESHOLD,
            stretch_ratio: STRETCH_RATIO,
            long_press_secs: LONG_PRESS_SECS,
            button_diameter: BUTTON_DIAMETER,
            anchor: Point::new(BUTTON_DIAMETER / 2.0, BUTTON_DIAMETER / 2.0),
            emphasis_scale: EMPHASIS_SCALE,
        }
    }
}

impl MenuConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let finite = [
            ("gap_angle", self.gap_angle),
            ("band_origin", self.band_origin),
            ("pop_distance", self.pop_distance),
            ("commit_threshold", self.commit_threshold),
            ("stretch_ratio", self.stretch_ratio),
            ("long_press_secs", self.long_press_secs),
            ("button_diameter", self.button_diameter),
            ("anchor.x", self.anchor.x),
            ("anchor.y", self.anchor.y),
            ("emphasis_scale", self.emphasis_scale),
        ];
        if let Some(&(name, _)) = finite.iter().find(|(_, v)| !v.is_finite()) {
            return Err(ConfigError::NotFinite(name));
        }

        if self.commit_threshold <= 0.0 {
            return Err(ConfigError::Threshold(self.commit_threshold));
        }

        let count = Action::COUNT;
        let steps = 360.0 / self.gap_angle;
        if self.gap_angle <= 0.0
            || (steps - steps.round()).abs() > 1e-9
            || self.gap_angle * count as f64 > 360.0
        {
            return Err(ConfigError::Gap {
                gap: self.gap_angle,
                count,
            });
        }

        let distinct: BTreeSet<_> = self.band_order.iter().collect();
        if self.band_order.len() != count || distinct.len() != count {
            let names: Vec<String> = self.band_order.iter().map(|a| a.to_string()).collect();
            return Err(ConfigError::BandOrder(names.join(", ")));
        }

        let non_negative = [
            ("pop_distance", self.pop_distance),
            ("stretch_ratio", self.stretch_ratio),
            ("long_press_secs", self.long_press_secs),
            ("button_diameter", self.button_diameter),
        ];
        if let Some(&(name, value)) = non_negative.iter().find(|(_, v)| *v < 0.0) {
            return Err(ConfigError::Negative(name, value));
        }

        if self.emphasis_scale <= 0.0 {
            return Err(ConfigError::Negative("emphasis_scale", self.emphasis_scale));
        }

        Ok(())
    }

    pub fn long_press(&self) -> Duration {
        Duration::from_nanos((self.long_press_secs.max(0.0) * 1e9).round() as u64)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct Spring {
    pub duration: f64,
    pub extra_bounce: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct AnimationConfig {
    pub engage: Spring,
    pub release: Spring,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            engage: Spring {
                duration: 0.36,
                extra_bounce: 0.12,
            },
            release: Spring {
                duration: 0.3,
                extra_bounce: 0.1,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ThemeConfig {
    pub focus_fill: HexColor,
    pub focus_glyph: HexColor,
    pub idle_fill: HexColor,
    pub idle_glyph: HexColor,
    pub trigger: HexColor,
    pub backdrop: HexColor,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            focus_fill: HexColor::from_rgb(0xc33532),
            focus_glyph: HexColor::from_rgb(0xffffff),
            idle_fill: HexColor::from_rgb(0xffffff),
            idle_glyph: HexColor::from_rgb(0x636064),
            trigger: HexColor::from_rgb(0x007aff),
            backdrop: HexColor::from_rgb(0xffcc00),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    pub socket: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            socket: PathBuf::from(SOCKET_PATH),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct Config {
    pub menu: MenuConfig,
    pub animation: AnimationConfig,
    pub theme: ThemeConfig,
    pub server: ServerConfig,
    /// Shell command run when an action fires.
    pub actions: HashMap<Action, ShellCommand>,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Notify error: {0}")]
    Notify(#[from] notify::Error),
    #[error("menu.{0} must be a finite number")]
    NotFinite(&'static str),
    #[error("menu.commit_threshold must be positive, got {0}")]
    Threshold(f64),
    #[error("menu.gap_angle {gap} cannot place {count} bands evenly around the circle")]
    Gap { gap: f64, count: usize },
    #[error("menu.band_order must list every action exactly once, got [{0}]")]
    BandOrder(String),
    #[error("menu.{0} must not be negative, got {1}")]
    Negative(&'static str, f64),
}

pub fn get_config_path() -> Result<PathBuf, ConfigError> {
    let proj_dirs =
        ProjectDirs::from("org", "pinpop", "pinpop").ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

fn environment() -> config::Environment {
    config::Environment::with_prefix("PINPOP")
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

/// `file` first, then `env` on top of it.
fn layered<S>(file: S, env: config::Environment) -> Result<Config, ConfigError>
where
    S: config::Source + Send + Sync + 'static,
{
    let s = config::Config::builder()
        .add_source(file)
        .add_source(env)
        .build()?;

    let config: Config = s.try_deserialize()?;
    config.menu.validate()?;
    Ok(config)
}

pub fn load_config() -> Result<Config, ConfigError> {
    let config_path = get_config_path()?;
    layered(
        config::File::from(config_path).required(false),
        environment(),
    )
}

pub fn parse_config(toml: &str) -> Result<Config, ConfigError> {
    let s = config::Config::builder()
        .add_source(config::File::from_str(toml, config::FileFormat::Toml))
        .build()?;

    let config: Config = s.try_deserialize()?;
    config.menu.validate()?;
    Ok(config)
}

pub fn load_or_default() -> Config {
    match load_config() {
        Ok(c) => c,
        Err(e) => {
            log::warn!("Using default configuration: {}", e);
            Config::default()
        }
    }
}

pub fn write_default_config() -> std::io::Result<PathBuf> {
    let path =
        get_config_path().map_err(|e| std::io::Error::new(std::io::ErrorKind::NotFound, e))?;
    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent)?;
    }
    if !path.exists() {
        fs_err::write(&path, DEFAULT_CONFIG)?;
    }
    Ok(path)
}

pub const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

/// Whether a filesystem event touched the config file itself.
fn touches(event: &notify::Event, config_path: &Path) -> bool {
    matches!(
        event.kind,
        EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
    ) && event.paths.iter().any(|p| p == config_path)
}

/// Sends [`AppEvent::ConfigReload`] whenever the config file changes.
pub async fn run_async_watcher(tx: Sender<AppEvent>) {
    let config_path = match get_config_path() {
        Ok(p) => p,
        Err(e) => {
            log::error!("Config watcher error: {}", e);
            return;
        }
    };
    let Some(config_dir) = config_path.parent().map(Path::to_path_buf) else {
        return;
    };

    // editors replace the file, so watch the directory
    if let Err(e) = fs_err::create_dir_all(&config_dir) {
        log::error!("Failed to create config directory for watching: {}", e);
        return;
    }

    let (bridge_tx, bridge_rx) = async_channel::unbounded();
    let watcher = RecommendedWatcher::new(
        move |res| {
            let _ = bridge_tx.send_blocking(res);
        },
        notify::Config::default(),
    )
    .and_then(|mut w| w.watch(&config_dir, RecursiveMode::NonRecursive).map(|_| w));

    let _watcher = match watcher {
        Ok(w) => w,
        Err(e) => {
            log::error!("Failed to watch {}: {}", config_dir.display(), e);
            return;
        }
    };

    while let Ok(res) = bridge_rx.recv().await {
        match res {
            Ok(event) if touches(&event, &config_path) => {
                log::debug!("Config changed: {:?}", event.kind);
                if tx.send(AppEvent::ConfigReload).await.is_err() {
                    break;
                }
            }
            Ok(_) => {}
            Err(e) => log::error!("Watch error: {}", e),
        }
    }
}
