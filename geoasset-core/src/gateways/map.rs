use geoasset_entities::{geo::MapPoint, location::Location};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkerStyle {
    /// A persisted location.
    Location,
    /// A location that has not been confirmed by the server.
    Draft,
    /// The current search or selection result.
    Highlight,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub pos: MapPoint,
    pub title: String,
    pub description: String,
    pub style: MarkerStyle,
}

impl Marker {
    pub fn new(location: &Location, style: MarkerStyle) -> Self {
        Self {
            pos: location.pos,
            title: location.name.clone(),
            description: location.description.clone(),
            style,
        }
    }
}

/// The drawing surface of the map, e.g. a leaflet or ArcGIS view.
pub trait MapSurface {
    /// Handle of a marker that has been added to the surface.
    type Graphic;

    fn add_marker(&mut self, marker: &Marker) -> Self::Graphic;
    fn remove_marker(&mut self, graphic: Self::Graphic);
    fn go_to(&mut self, center: MapPoint, zoom: f64);
}
