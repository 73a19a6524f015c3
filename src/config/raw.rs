use serde::Deserialize;

pub const DEFAULT_CONFIG: &str = include_str!("geoasset.default.toml");

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    pub api: Option<Api>,
    pub auth: Option<Auth>,
    pub map: Option<Map>,
    pub log: Option<Log>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Api {
    pub url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Auth {
    pub token_storage_key: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Map {
    pub center_lat: Option<f64>,
    pub center_lng: Option<f64>,
    pub zoom: Option<f64>,
    pub focus_zoom: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Log {
    pub level: Option<String>,
}
