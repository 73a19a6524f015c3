//! # geoasset
//!
//! Browse, search, create, edit and delete named point assets on a map.
//!
//! The [`manager::AssetManager`] keeps the list of locations, the search
//! view and the map markers in line with the remote locations API.

use log::{LevelFilter, SetLoggerError};

use geoasset_frontend_api::{LocalStorageCredentials, LocationsApi, PublicApi};

pub mod config;
pub mod manager;

pub use geoasset_boundary as boundary;
pub use geoasset_entities as entities;
pub use geoasset_frontend_api as api;

use self::{config::Config, manager::AssetManager};

/// [`AssetManager`] backed by the HTTP API.
pub type ApiAssetManager<S> = AssetManager<LocationsApi<LocalStorageCredentials>, S>;

/// Wires the HTTP API and the token storage according to the configuration.
pub fn connect<S>(config: &Config, surface: S) -> ApiAssetManager<S>
where
    S: geoasset_core::gateways::map::MapSurface + 'static,
    S::Graphic: 'static,
{
    log::info!("Connect to locations API at {}", config.api.url);
    let credentials = LocalStorageCredentials::new(config.auth.token_storage_key.clone());
    let api = LocationsApi::new(config.api.url.clone(), credentials);
    AssetManager::new(api, surface, config.map.clone())
}

pub fn public_api(config: &Config) -> PublicApi {
    PublicApi::new(config.api.url.clone())
}

#[cfg(target_arch = "wasm32")]
pub fn init_logging(level: LevelFilter) -> Result<(), SetLoggerError> {
    console_error_panic_hook::set_once();
    match level.to_level() {
        Some(level) => console_log::init_with_level(level),
        None => Ok(()),
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn init_logging(level: LevelFilter) -> Result<(), SetLoggerError> {
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .try_init()
}
