use gloo_net::http::Request;

use geoasset_boundary::{Credentials, JwtToken, Registration};
use geoasset_core::gateways::credentials::CredentialProvider;

use crate::{into_empty, into_json, Result};

/// Endpoints that do not require a token.
#[derive(Clone)]
pub struct PublicApi {
    url: String,
}

impl PublicApi {
    #[must_use]
    pub const fn new(url: String) -> Self {
        Self { url }
    }

    pub async fn register(&self, registration: &Registration) -> Result<()> {
        let url = format!("{}/Account/register", self.url);
        let response = Request::post(&url).json(registration)?.send().await?;
        into_empty(response).await
    }

    pub async fn login(&self, credentials: &Credentials) -> Result<JwtToken> {
        let url = format!("{}/Account/login", self.url);
        let response = Request::post(&url).json(credentials)?.send().await?;
        into_json(response).await
    }

    /// Logs in and keeps the token for subsequent requests.
    pub async fn sign_in<C>(&self, credentials: &Credentials, store: &C) -> Result<()>
    where
        C: CredentialProvider + ?Sized,
    {
        let JwtToken { token } = self.login(credentials).await?;
        log::debug!("API is now authorized: save token");
        store.set(token);
        Ok(())
    }
}

pub fn sign_out<C>(store: &C)
where
    C: CredentialProvider + ?Sized,
{
    log::debug!("API is no longer authorized: delete token");
    store.clear();
}
