//! # geoasset-core
//!
//! Keeps an in-memory list of locations consistent with the remote API
//! and derives the search view and the map markers from it.

pub mod form;
pub mod gateways;
pub mod markers;
pub mod search;
pub mod store;
pub mod util;

pub mod entities {
    pub use geoasset_entities::{geo::*, id::*, location::*};
}
