use geoasset_entities::id::LocationId;
use thiserror::Error;

use crate::{gateways::TransportError, util::validate::LocationInvalidation};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] LocationInvalidation),
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error("Unable to delete location {id}: {source}")]
    Delete {
        id: LocationId,
        #[source]
        source: TransportError,
    },
    #[error("Location {0} is unknown")]
    UnknownLocation(LocationId),
}

impl Error {
    /// The underlying transport error, if any.
    pub const fn transport(&self) -> Option<&TransportError> {
        match self {
            Self::Transport(err) | Self::Delete { source: err, .. } => Some(err),
            _ => None,
        }
    }
}
