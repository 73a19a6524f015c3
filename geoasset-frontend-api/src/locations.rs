use async_trait::async_trait;
use gloo_net::http::{Request, RequestBuilder};
use web_sys::RequestCredentials;

use geoasset_boundary as json;
use geoasset_core::gateways::{
    credentials::CredentialProvider, locations::LocationGateway, TransportError,
};
use geoasset_entities::{id::LocationId, location::*};

use crate::{auth_header_value, into_empty, into_json, into_optional_json, Result};

/// Client of the `/Locations` resource.
#[derive(Clone)]
pub struct LocationsApi<C> {
    url: String,
    credentials: C,
}

impl<C> LocationsApi<C>
where
    C: CredentialProvider,
{
    #[must_use]
    pub const fn new(url: String, credentials: C) -> Self {
        Self { url, credentials }
    }

    pub const fn credentials(&self) -> &C {
        &self.credentials
    }

    fn collection_url(&self) -> String {
        format!("{}/Locations", self.url)
    }

    fn item_url(&self, id: LocationId) -> String {
        format!("{}/Locations/{id}", self.url)
    }

    fn add_auth_headers(&self, req: RequestBuilder) -> RequestBuilder {
        let req = req
            .header("Content-Type", "application/json")
            .credentials(RequestCredentials::Include);
        match self.credentials.get() {
            Some(token) => req.header("Authorization", &auth_header_value(&token)),
            None => {
                log::debug!("No API token available: send request without authorization");
                req
            }
        }
    }

    async fn fetch_locations(&self) -> Result<Vec<json::Location>> {
        let request = self.add_auth_headers(Request::get(&self.collection_url()));
        let response = request.send().await?;
        into_json(response).await
    }

    async fn post_location(&self, location: &json::NewLocation) -> Result<Option<json::Location>> {
        let request = self
            .add_auth_headers(Request::post(&self.collection_url()))
            .json(location)?;
        let response = request.send().await?;
        into_optional_json(response).await
    }

    async fn put_location(
        &self,
        id: LocationId,
        location: &json::Location,
    ) -> Result<Option<json::Location>> {
        let request = self
            .add_auth_headers(Request::put(&self.item_url(id)))
            .json(location)?;
        let response = request.send().await?;
        into_optional_json(response).await
    }

    async fn delete(&self, id: LocationId) -> Result<()> {
        let request = self.add_auth_headers(Request::delete(&self.item_url(id)));
        let response = request.send().await?;
        into_empty(response).await
    }
}

/// Drops records that do not describe a valid location.
pub fn into_locations(records: Vec<json::Location>) -> Vec<Location> {
    records.into_iter().filter_map(into_location).collect()
}

fn into_location(record: json::Location) -> Option<Location> {
    let id = record.id;
    Location::try_from(record)
        .map_err(|err| log::warn!("Ignoring invalid location {id:?}: {err}"))
        .ok()
}

fn update_payload(id: LocationId, location: &NewLocation) -> json::Location {
    Location {
        id: Some(id),
        ..location.clone().into()
    }
    .into()
}

#[async_trait(?Send)]
impl<C> LocationGateway for LocationsApi<C>
where
    C: CredentialProvider,
{
    async fn all_locations(&self) -> std::result::Result<Vec<Location>, TransportError> {
        let records = self.fetch_locations().await?;
        log::debug!("Received {} location records", records.len());
        Ok(into_locations(records))
    }

    async fn create_location(
        &self,
        new_location: &NewLocation,
    ) -> std::result::Result<Option<Location>, TransportError> {
        let payload = json::NewLocation::from(new_location.clone());
        let record = self.post_location(&payload).await?;
        Ok(record.and_then(into_location))
    }

    async fn update_location(
        &self,
        id: LocationId,
        location: &NewLocation,
    ) -> std::result::Result<Option<Location>, TransportError> {
        let payload = update_payload(id, location);
        let record = self.put_location(id, &payload).await?;
        Ok(record.and_then(into_location))
    }

    async fn delete_location(&self, id: LocationId) -> std::result::Result<(), TransportError> {
        Ok(self.delete(id).await?)
    }
}

#[cfg(test)]
mod tests {
    use geoasset_core::gateways::credentials::MemoryCredentials;

    use super::*;

    fn record(id: Option<i64>, name: &str, latitude: f64, longitude: f64) -> json::Location {
        json::Location {
            id,
            name: name.into(),
            description: None,
            latitude,
            longitude,
        }
    }

    #[test]
    fn drop_invalid_records() {
        let locations = into_locations(vec![
            record(Some(1), "Depot", 30.0, 31.0),
            record(Some(2), "Nowhere", 91.0, 0.0),
            record(Some(3), " ", 0.0, 0.0),
            record(Some(4), "Harbour", 31.2, 29.9),
        ]);
        let ids: Vec<_> = locations.iter().filter_map(|l| l.id).map(i64::from).collect();
        assert_eq!(ids, [1, 4]);
    }

    #[test]
    fn update_payload_contains_the_id() {
        let location = NewLocation {
            name: "Tower".into(),
            description: "".into(),
            pos: geoasset_entities::geo::MapPoint::from_lat_lng_deg(30.1, 31.2),
        };
        let payload = update_payload(LocationId::new(5), &location);
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            serde_json::json!({
                "id": 5,
                "name": "Tower",
                "description": "",
                "latitude": 30.1,
                "longitude": 31.2
            })
        );
    }

    #[test]
    fn resource_urls() {
        let api = LocationsApi::new("/api".into(), MemoryCredentials::default());
        assert_eq!(api.collection_url(), "/api/Locations");
        assert_eq!(api.item_url(LocationId::new(7)), "/api/Locations/7");
    }
}
