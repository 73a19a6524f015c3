use super::*;
use e::{geo::MapPoint, id::LocationId};
use geoasset_entities as e;
use std::convert::TryFrom;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidLocation {
    #[error("Missing name")]
    Name,
    #[error("Invalid position: lat = {0}, lng = {1}")]
    Position(f64, f64),
}

impl From<e::location::Location> for Location {
    fn from(from: e::location::Location) -> Self {
        let e::location::Location {
            id,
            name,
            description,
            pos,
        } = from;
        let (latitude, longitude) = pos.to_lat_lng_deg();
        Self {
            id: id.map(Into::into),
            name,
            description: Some(description),
            latitude,
            longitude,
        }
    }
}

impl From<e::location::NewLocation> for NewLocation {
    fn from(from: e::location::NewLocation) -> Self {
        let e::location::NewLocation {
            name,
            description,
            pos,
        } = from;
        let (latitude, longitude) = pos.to_lat_lng_deg();
        Self {
            name,
            description: Some(description),
            latitude,
            longitude,
        }
    }
}

impl TryFrom<Location> for e::location::Location {
    type Error = InvalidLocation;
    fn try_from(from: Location) -> Result<Self, Self::Error> {
        let Location {
            id,
            name,
            description,
            latitude,
            longitude,
        } = from;
        if name.trim().is_empty() {
            return Err(InvalidLocation::Name);
        }
        let pos = MapPoint::try_from_lat_lng_deg(latitude, longitude)
            .ok_or(InvalidLocation::Position(latitude, longitude))?;
        Ok(Self {
            id: id.map(LocationId::from),
            name,
            description: description.unwrap_or_default(),
            pos,
        })
    }
}
