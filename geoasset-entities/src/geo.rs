use itertools::Itertools;
use thiserror::Error;

/// Latitude in degrees, valid within [-90, 90].
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct LatCoord(f64);

impl LatCoord {
    pub const DEG_MAX: f64 = 90.0;
    pub const DEG_MIN: f64 = -90.0;

    pub const fn max() -> Self {
        Self(Self::DEG_MAX)
    }

    pub const fn min() -> Self {
        Self(Self::DEG_MIN)
    }

    pub fn is_valid_deg(deg: f64) -> bool {
        (Self::DEG_MIN..=Self::DEG_MAX).contains(&deg)
    }

    pub const fn to_deg(self) -> f64 {
        self.0
    }

    /// Unchecked conversion, the result might be invalid.
    pub fn from_deg<T: Into<f64>>(deg: T) -> Self {
        Self(deg.into())
    }

    pub fn is_valid(self) -> bool {
        Self::is_valid_deg(self.0)
    }

    pub fn try_from_deg<T: Into<f64>>(deg: T) -> Option<Self> {
        let deg = deg.into();
        Self::is_valid_deg(deg).then_some(Self(deg))
    }
}

impl std::fmt::Display for LatCoord {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> Result<(), std::fmt::Error> {
        write!(f, "{}", self.to_deg())
    }
}

/// Longitude in degrees, valid within [-180, 180].
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct LngCoord(f64);

impl LngCoord {
    pub const DEG_MAX: f64 = 180.0;
    pub const DEG_MIN: f64 = -180.0;

    pub const fn max() -> Self {
        Self(Self::DEG_MAX)
    }

    pub const fn min() -> Self {
        Self(Self::DEG_MIN)
    }

    pub fn is_valid_deg(deg: f64) -> bool {
        (Self::DEG_MIN..=Self::DEG_MAX).contains(&deg)
    }

    pub const fn to_deg(self) -> f64 {
        self.0
    }

    /// Unchecked conversion, the result might be invalid.
    pub fn from_deg<T: Into<f64>>(deg: T) -> Self {
        Self(deg.into())
    }

    pub fn is_valid(self) -> bool {
        Self::is_valid_deg(self.0)
    }

    pub fn try_from_deg<T: Into<f64>>(deg: T) -> Option<Self> {
        let deg = deg.into();
        Self::is_valid_deg(deg).then_some(Self(deg))
    }
}

impl std::fmt::Display for LngCoord {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> Result<(), std::fmt::Error> {
        write!(f, "{}", self.to_deg())
    }
}

/// A geographical position on a (flat) map.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MapPoint {
    lat: LatCoord,
    lng: LngCoord,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MapPointParseError {
    #[error("Invalid latitude '{0}'")]
    Latitude(String),
    #[error("Invalid longitude '{0}'")]
    Longitude(String),
    #[error("Failed to parse MapPoint: {0}")]
    Format(String),
}

impl MapPoint {
    pub const fn new(lat: LatCoord, lng: LngCoord) -> Self {
        Self { lat, lng }
    }

    pub const fn lat(self) -> LatCoord {
        self.lat
    }

    pub const fn lng(self) -> LngCoord {
        self.lng
    }

    pub fn is_valid(self) -> bool {
        self.lat.is_valid() && self.lng.is_valid()
    }

    pub const fn to_lat_lng_deg(self) -> (f64, f64) {
        (self.lat.to_deg(), self.lng.to_deg())
    }

    pub fn from_lat_lng_deg<LAT: Into<f64>, LNG: Into<f64>>(lat: LAT, lng: LNG) -> Self {
        Self::new(LatCoord::from_deg(lat), LngCoord::from_deg(lng))
    }

    pub fn try_from_lat_lng_deg<LAT: Into<f64>, LNG: Into<f64>>(
        lat: LAT,
        lng: LNG,
    ) -> Option<Self> {
        match (LatCoord::try_from_deg(lat), LngCoord::try_from_deg(lng)) {
            (Some(lat), Some(lng)) => Some(Self::new(lat, lng)),
            _ => None,
        }
    }

    fn parse_lat_lng_deg(lat_deg_str: &str, lng_deg_str: &str) -> Result<Self, MapPointParseError> {
        let lat = lat_deg_str
            .trim()
            .parse::<f64>()
            .ok()
            .and_then(LatCoord::try_from_deg)
            .ok_or_else(|| MapPointParseError::Latitude(lat_deg_str.to_string()))?;
        let lng = lng_deg_str
            .trim()
            .parse::<f64>()
            .ok()
            .and_then(LngCoord::try_from_deg)
            .ok_or_else(|| MapPointParseError::Longitude(lng_deg_str.to_string()))?;
        Ok(Self::new(lat, lng))
    }
}

impl std::fmt::Display for MapPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> Result<(), std::fmt::Error> {
        write!(f, "{},{}", self.lat, self.lng)
    }
}

impl std::str::FromStr for MapPoint {
    type Err = MapPointParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some((lat_deg_str, lng_deg_str)) = s.split(',').collect_tuple() {
            Self::parse_lat_lng_deg(lat_deg_str, lng_deg_str)
        } else {
            Err(MapPointParseError::Format(s.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inclusive_bounds() {
        assert!(MapPoint::try_from_lat_lng_deg(90.0, 180.0).is_some());
        assert!(MapPoint::try_from_lat_lng_deg(-90.0, -180.0).is_some());
        assert!(MapPoint::try_from_lat_lng_deg(90.0001, 0.0).is_none());
        assert!(MapPoint::try_from_lat_lng_deg(0.0, -180.0001).is_none());
    }

    #[test]
    fn unchecked_points_can_be_invalid() {
        assert!(MapPoint::from_lat_lng_deg(90.0, -180.0).is_valid());
        assert!(!MapPoint::from_lat_lng_deg(90.0001, 0.0).is_valid());
        assert!(!MapPoint::from_lat_lng_deg(0.0, -180.0001).is_valid());
    }

    #[test]
    fn reject_non_finite_degrees() {
        assert!(LatCoord::try_from_deg(f64::NAN).is_none());
        assert!(LngCoord::try_from_deg(f64::INFINITY).is_none());
    }

    #[test]
    fn parse_map_point() {
        let p: MapPoint = "30.0444, 31.2357".parse().unwrap();
        assert_eq!(p.to_lat_lng_deg(), (30.0444, 31.2357));
        assert_eq!(p.to_string(), "30.0444,31.2357");
        assert_eq!(
            "91,0".parse::<MapPoint>(),
            Err(MapPointParseError::Latitude("91".into()))
        );
        assert_eq!(
            "0,abc".parse::<MapPoint>(),
            Err(MapPointParseError::Longitude("abc".into()))
        );
        assert!(matches!(
            "1,2,3".parse::<MapPoint>(),
            Err(MapPointParseError::Format(_))
        ));
    }
}
