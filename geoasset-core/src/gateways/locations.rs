use async_trait::async_trait;
use geoasset_entities::{id::LocationId, location::*};

use super::TransportError;

type Result<T> = std::result::Result<T, TransportError>;

/// Remote storage of locations.
///
/// Implementations only transfer data; keeping the local
/// state consistent is the job of the [`LocationStore`](crate::store::LocationStore).
#[async_trait(?Send)]
pub trait LocationGateway {
    async fn all_locations(&self) -> Result<Vec<Location>>;

    /// Returns `None` if the response did not contain
    /// a usable representation of the created location.
    async fn create_location(&self, new_location: &NewLocation) -> Result<Option<Location>>;

    /// Returns `None` if the server accepted the update
    /// without sending back the updated location.
    async fn update_location(
        &self,
        id: LocationId,
        location: &NewLocation,
    ) -> Result<Option<Location>>;

    async fn delete_location(&self, id: LocationId) -> Result<()>;
}
