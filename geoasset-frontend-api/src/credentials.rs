use gloo_storage::{LocalStorage, Storage};

use geoasset_core::gateways::credentials::CredentialProvider;

/// Keeps the API token in the `LocalStorage` of the browser.
#[derive(Debug, Clone)]
pub struct LocalStorageCredentials {
    key: String,
}

impl LocalStorageCredentials {
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}

impl CredentialProvider for LocalStorageCredentials {
    fn get(&self) -> Option<String> {
        LocalStorage::get(&self.key).ok()
    }

    fn set(&self, token: String) {
        if let Err(err) = LocalStorage::set(&self.key, token) {
            log::error!("Unable to save token in LocalStorage: {err}");
        }
    }

    fn clear(&self) {
        LocalStorage::delete(&self.key);
    }
}
