pub trait Builder {
    type Build;
    fn build() -> Self::Build;
}

pub use self::location_builder::*;

pub mod location_builder {

    use super::*;
    use crate::{geo::*, id::*, location::*};

    #[derive(Debug)]
    pub struct LocationBuild {
        location: Location,
    }

    impl LocationBuild {
        pub fn id(mut self, id: i64) -> Self {
            self.location.id = Some(id.into());
            self
        }
        pub fn draft(mut self) -> Self {
            self.location.id = None;
            self
        }
        pub fn name(mut self, name: &str) -> Self {
            self.location.name = name.into();
            self
        }
        pub fn description(mut self, desc: &str) -> Self {
            self.location.description = desc.into();
            self
        }
        pub fn pos(mut self, pos: MapPoint) -> Self {
            self.location.pos = pos;
            self
        }
        pub fn lat_lng(self, lat: f64, lng: f64) -> Self {
            self.pos(MapPoint::from_lat_lng_deg(lat, lng))
        }
        pub fn finish(self) -> Location {
            self.location
        }
        pub fn finish_new(self) -> NewLocation {
            let Location {
                name,
                description,
                pos,
                ..
            } = self.location;
            NewLocation {
                name,
                description,
                pos,
            }
        }
    }

    impl Builder for Location {
        type Build = LocationBuild;
        fn build() -> LocationBuild {
            LocationBuild {
                location: Location {
                    id: Some(LocationId::new(0)),
                    name: "".into(),
                    description: "".into(),
                    pos: MapPoint::from_lat_lng_deg(0.0, 0.0),
                },
            }
        }
    }
}
