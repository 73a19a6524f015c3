use geoasset_entities::{geo::MapPoint, location::NewLocation};
use thiserror::Error;

pub trait Validate {
    type Error;
    fn validate(&self) -> Result<(), Self::Error>;
}

pub fn is_valid_name(name: &str) -> bool {
    !name.trim().is_empty()
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LocationInvalidation {
    #[error("The name is missing")]
    Name,
    #[error("Latitude {0} is out of range [-90, 90]")]
    Latitude(f64),
    #[error("Longitude {0} is out of range [-180, 180]")]
    Longitude(f64),
}

impl Validate for MapPoint {
    type Error = LocationInvalidation;
    fn validate(&self) -> Result<(), Self::Error> {
        if !self.lat().is_valid() {
            return Err(Self::Error::Latitude(self.lat().to_deg()));
        }
        if !self.lng().is_valid() {
            return Err(Self::Error::Longitude(self.lng().to_deg()));
        }
        Ok(())
    }
}

impl Validate for NewLocation {
    type Error = LocationInvalidation;
    fn validate(&self) -> Result<(), Self::Error> {
        if !is_valid_name(&self.name) {
            return Err(Self::Error::Name);
        }
        self.pos.validate()
    }
}
