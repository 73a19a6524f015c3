use anyhow::{anyhow, Result};
use geoasset_entities::geo::MapPoint;
use log::LevelFilter;

#[cfg(not(target_arch = "wasm32"))]
use std::{env, fs, io::ErrorKind, path::Path};

mod raw;

pub use raw::DEFAULT_CONFIG;

#[cfg(not(target_arch = "wasm32"))]
const DEFAULT_CONFIG_FILE_NAME: &str = "geoasset.toml";

#[cfg(not(target_arch = "wasm32"))]
const ENV_NAME_API_URL: &str = "GEOASSET_API_URL";

const DEFAULT_API_URL: &str = "/api";
const DEFAULT_TOKEN_STORAGE_KEY: &str = "token";
const DEFAULT_CENTER_LAT: f64 = 30.0444;
const DEFAULT_CENTER_LNG: f64 = 31.2357;
const DEFAULT_ZOOM: f64 = 10.0;
const DEFAULT_FOCUS_ZOOM: f64 = 15.0;
const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Debug;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub api: Api,
    pub auth: Auth,
    pub map: Map,
    pub log: Log,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Api {
    /// Without trailing slash
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Auth {
    pub token_storage_key: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Map {
    pub center: MapPoint,
    pub zoom: f64,
    /// Zoom level of [`crate::manager::AssetManager::select`].
    pub focus_zoom: f64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Log {
    pub level: LevelFilter,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: Api {
                url: DEFAULT_API_URL.to_string(),
            },
            auth: Auth {
                token_storage_key: DEFAULT_TOKEN_STORAGE_KEY.to_string(),
            },
            map: Map {
                center: MapPoint::from_lat_lng_deg(DEFAULT_CENTER_LAT, DEFAULT_CENTER_LNG),
                zoom: DEFAULT_ZOOM,
                focus_zoom: DEFAULT_FOCUS_ZOOM,
            },
            log: Log {
                level: DEFAULT_LOG_LEVEL,
            },
        }
    }
}

impl Config {
    /// Missing values are taken from the defaults.
    pub fn from_toml_str(toml: &str) -> Result<Self> {
        let raw_config: raw::Config = toml::from_str(toml)?;
        Self::try_from(raw_config)
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn try_load_from_file_or_default<P: AsRef<Path>>(file_path: Option<P>) -> Result<Self> {
        let file_path: &Path = file_path.as_ref().map(|p| p.as_ref()).unwrap_or_else(|| {
            log::info!("No configuration file specified. load {DEFAULT_CONFIG_FILE_NAME}");
            Path::new(DEFAULT_CONFIG_FILE_NAME)
        });

        let mut cfg = match fs::read_to_string(file_path) {
            Ok(cfg_string) => Self::from_toml_str(&cfg_string)?,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                log::info!("{} not found => load default configuration.", file_path.display());
                Self::default()
            }
            Err(err) => return Err(err.into()),
        };
        if let Ok(api_url) = env::var(ENV_NAME_API_URL) {
            cfg.api.url = normalize_url(&api_url)?;
        }
        Ok(cfg)
    }
}

fn normalize_url(url: &str) -> Result<String> {
    let url = url.trim().trim_end_matches('/');
    if url.contains(char::is_whitespace) {
        return Err(anyhow!("Invalid API URL '{url}'"));
    }
    Ok(url.to_string())
}

fn valid_zoom(zoom: f64, name: &str) -> Result<f64> {
    if !zoom.is_finite() || zoom < 0.0 {
        return Err(anyhow!("Invalid {name} level: {zoom}"));
    }
    Ok(zoom)
}

impl TryFrom<raw::Config> for Config {
    type Error = anyhow::Error;
    fn try_from(from: raw::Config) -> Result<Self> {
        let raw::Config {
            api,
            auth,
            map,
            log,
        } = from;
        let defaults = Self::default();

        let url = match api.and_then(|a| a.url) {
            Some(url) => normalize_url(&url)?,
            None => defaults.api.url,
        };

        let token_storage_key = auth
            .and_then(|a| a.token_storage_key)
            .filter(|key| !key.trim().is_empty())
            .unwrap_or(defaults.auth.token_storage_key);

        let raw::Map {
            center_lat,
            center_lng,
            zoom,
            focus_zoom,
        } = map.unwrap_or_default();
        let (default_lat, default_lng) = defaults.map.center.to_lat_lng_deg();
        let lat = center_lat.unwrap_or(default_lat);
        let lng = center_lng.unwrap_or(default_lng);
        let center = MapPoint::try_from_lat_lng_deg(lat, lng)
            .ok_or_else(|| anyhow!("Invalid map center: lat = {lat}, lng = {lng}"))?;
        let zoom = valid_zoom(zoom.unwrap_or(defaults.map.zoom), "zoom")?;
        let focus_zoom = valid_zoom(
            focus_zoom.unwrap_or(defaults.map.focus_zoom),
            "focus zoom",
        )?;

        let level = match log.and_then(|l| l.level) {
            Some(level) => level
                .parse()
                .map_err(|_| anyhow!("Invalid log level '{level}'"))?,
            None => defaults.log.level,
        };

        Ok(Self {
            api: Api { url },
            auth: Auth { token_storage_key },
            map: Map {
                center,
                zoom,
                focus_zoom,
            },
            log: Log { level },
        })
    }
}
