use geoasset_entities::{
    geo::{LatCoord, LngCoord, MapPoint},
    location::{Location, LocationPatch, NewLocation},
};
use thiserror::Error;

use crate::util::validate::is_valid_name;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FormInvalidation {
    #[error("Name is required")]
    NameRequired,
    #[error("Latitude is required")]
    LatitudeRequired,
    #[error("Latitude must be a number")]
    InvalidLatitude,
    #[error("Latitude must be between -90 and 90")]
    LatitudeRange,
    #[error("Longitude is required")]
    LongitudeRequired,
    #[error("Longitude must be a number")]
    InvalidLongitude,
    #[error("Longitude must be between -180 and 180")]
    LongitudeRange,
}

/// Raw user input of the location dialog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocationForm {
    pub name: String,
    pub description: String,
    pub latitude: String,
    pub longitude: String,
}

struct CoordErrors {
    required: FormInvalidation,
    invalid: FormInvalidation,
    range: FormInvalidation,
}

const LAT_ERRORS: CoordErrors = CoordErrors {
    required: FormInvalidation::LatitudeRequired,
    invalid: FormInvalidation::InvalidLatitude,
    range: FormInvalidation::LatitudeRange,
};

const LNG_ERRORS: CoordErrors = CoordErrors {
    required: FormInvalidation::LongitudeRequired,
    invalid: FormInvalidation::InvalidLongitude,
    range: FormInvalidation::LongitudeRange,
};

fn parse_deg(
    input: &str,
    is_valid_deg: fn(f64) -> bool,
    errors: CoordErrors,
) -> Result<f64, FormInvalidation> {
    let input = input.trim();
    if input.is_empty() {
        return Err(errors.required);
    }
    let deg = input
        .parse::<f64>()
        .ok()
        .filter(|deg| !deg.is_nan())
        .ok_or(errors.invalid)?;
    if !is_valid_deg(deg) {
        return Err(errors.range);
    }
    Ok(deg)
}

impl LocationForm {
    /// An empty form with the position prefilled, e.g. from a map click.
    pub fn at(pos: MapPoint) -> Self {
        let (lat, lng) = pos.to_lat_lng_deg();
        Self {
            latitude: lat.to_string(),
            longitude: lng.to_string(),
            ..Default::default()
        }
    }

    /// Collects all invalid fields instead of stopping at the first one.
    pub fn parse(&self) -> Result<NewLocation, Vec<FormInvalidation>> {
        let mut errors = Vec::new();
        if !is_valid_name(&self.name) {
            errors.push(FormInvalidation::NameRequired);
        }
        let lat = parse_deg(&self.latitude, LatCoord::is_valid_deg, LAT_ERRORS)
            .map_err(|err| errors.push(err))
            .ok();
        let lng = parse_deg(&self.longitude, LngCoord::is_valid_deg, LNG_ERRORS)
            .map_err(|err| errors.push(err))
            .ok();
        match (lat, lng) {
            (Some(lat), Some(lng)) if errors.is_empty() => Ok(NewLocation {
                name: self.name.trim().to_string(),
                description: self.description.trim().to_string(),
                pos: MapPoint::from_lat_lng_deg(lat, lng),
            }),
            _ => Err(errors),
        }
    }

    /// A patch that replaces every field of the edited location.
    pub fn into_patch(self) -> Result<LocationPatch, Vec<FormInvalidation>> {
        let NewLocation {
            name,
            description,
            pos,
        } = self.parse()?;
        Ok(LocationPatch {
            name: Some(name),
            description: Some(description),
            pos: Some(pos),
        })
    }
}

impl From<&Location> for LocationForm {
    fn from(from: &Location) -> Self {
        let (lat, lng) = from.pos.to_lat_lng_deg();
        Self {
            name: from.name.clone(),
            description: from.description.clone(),
            latitude: lat.to_string(),
            longitude: lng.to_string(),
        }
    }
}
