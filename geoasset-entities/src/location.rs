use crate::{geo::*, id::*};

/// A named point asset on the map.
///
/// A location without an `id` is a draft that has not been
/// confirmed by the server yet.
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    pub id: Option<LocationId>,
    pub name: String,
    pub description: String,
    pub pos: MapPoint,
}

impl Location {
    pub const fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    /// Compares the attributes that identify a freshly
    /// created record when no id is available.
    pub fn same_name_and_pos(&self, name: &str, pos: MapPoint) -> bool {
        self.name == name && self.pos == pos
    }
}

// Essential attributes of a location that is about to be created.
#[derive(Debug, Clone, PartialEq)]
pub struct NewLocation {
    pub name: String,
    pub description: String,
    pub pos: MapPoint,
}

impl From<NewLocation> for Location {
    fn from(from: NewLocation) -> Self {
        let NewLocation {
            name,
            description,
            pos,
        } = from;
        Self {
            id: None,
            name,
            description,
            pos,
        }
    }
}

/// Changes of an existing location; `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocationPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub pos: Option<MapPoint>,
}

impl LocationPatch {
    pub fn is_empty(&self) -> bool {
        let Self {
            name,
            description,
            pos,
        } = self;
        name.is_none() && description.is_none() && pos.is_none()
    }

    pub fn apply_to(self, location: &Location) -> NewLocation {
        let Self {
            name,
            description,
            pos,
        } = self;
        NewLocation {
            name: name.unwrap_or_else(|| location.name.clone()),
            description: description.unwrap_or_else(|| location.description.clone()),
            pos: pos.unwrap_or(location.pos),
        }
    }
}
