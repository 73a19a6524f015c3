//! Connects the location store with the search view and the map.

use std::{
    cell::{Cell, Ref, RefCell},
    rc::Rc,
};

use thiserror::Error;

use geoasset_core::{
    form::{FormInvalidation, LocationForm},
    gateways::{locations::LocationGateway, map::MapSurface},
    markers::MarkerReconciler,
    search::SearchProjection,
    store::{self, Created, LocationStore, Subscription},
    util::validate::is_valid_name,
};
use geoasset_entities::{geo::MapPoint, id::LocationId, location::*};

use crate::config;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error(transparent)]
    Store(#[from] store::Error),
    #[error("Invalid input: {}", join(.0))]
    Form(Vec<FormInvalidation>),
    #[error("Location {0} is unknown")]
    UnknownLocation(LocationId),
}

fn join(invalidations: &[FormInvalidation]) -> String {
    invalidations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

pub type Result<T> = std::result::Result<T, Error>;

pub struct AssetManager<G, S>
where
    S: MapSurface,
{
    store: LocationStore<G>,
    projection: Rc<RefCell<SearchProjection>>,
    markers: Rc<RefCell<MarkerReconciler<S>>>,
    map: config::Map,
    add_mode: Cell<bool>,
    editing: Cell<Option<LocationId>>,
    selected: Cell<Option<LocationId>>,
    _subscription: Subscription,
}

impl<G, S> AssetManager<G, S>
where
    G: LocationGateway,
    S: MapSurface + 'static,
    S::Graphic: 'static,
{
    pub fn new(gateway: G, mut surface: S, map: config::Map) -> Self {
        surface.go_to(map.center, map.zoom);
        let store = LocationStore::new(gateway);
        let projection = Rc::new(RefCell::new(SearchProjection::new(store.items())));
        let markers = Rc::new(RefCell::new(MarkerReconciler::new(surface)));
        let subscription = store.subscribe({
            let projection = Rc::clone(&projection);
            let markers = Rc::clone(&markers);
            move |items: &Rc<[Location]>| {
                projection.borrow_mut().set_source(Rc::clone(items));
                markers.borrow_mut().reconcile(items);
            }
        });
        Self {
            store,
            projection,
            markers,
            map,
            add_mode: Cell::new(false),
            editing: Cell::new(None),
            selected: Cell::new(None),
            _subscription: subscription,
        }
    }

    pub const fn store(&self) -> &LocationStore<G> {
        &self.store
    }

    pub fn markers(&self) -> Ref<'_, MarkerReconciler<S>> {
        self.markers.borrow()
    }

    pub async fn load(&self) -> Result<Rc<[Location]>> {
        Ok(self.store.load_all().await?)
    }

    pub fn is_add_mode_active(&self) -> bool {
        self.add_mode.get()
    }

    pub fn toggle_add_mode(&self) -> bool {
        let active = !self.add_mode.get();
        self.add_mode.set(active);
        log::debug!("Add mode active: {active}");
        active
    }

    /// Creates a location at the clicked point while add mode is active.
    ///
    /// A blank name cancels the creation.
    pub async fn on_map_click(
        &self,
        pos: MapPoint,
        name: &str,
        description: &str,
    ) -> Result<Option<Created>> {
        if !self.add_mode.get() {
            return Ok(None);
        }
        if !is_valid_name(name) {
            log::debug!("No name entered: location at {pos} not created");
            return Ok(None);
        }
        let new_location = NewLocation {
            name: name.trim().to_string(),
            description: description.trim().to_string(),
            pos,
        };
        let created = self.store.create(new_location).await?;
        Ok(Some(created))
    }

    pub fn editing(&self) -> Option<LocationId> {
        self.editing.get()
    }

    pub fn begin_edit(&self, id: LocationId) -> Result<LocationForm> {
        let location = self.store.get(id).ok_or(Error::UnknownLocation(id))?;
        self.editing.set(Some(id));
        Ok(LocationForm::from(&location))
    }

    pub fn cancel_edit(&self) {
        self.editing.set(None);
    }

    /// Updates the edited location or creates a new one.
    pub async fn save(&self, form: &LocationForm) -> Result<Location> {
        let Some(id) = self.editing.get() else {
            let new_location = form.parse().map_err(Error::Form)?;
            let Created { location, .. } = self.store.create(new_location).await?;
            return Ok(location);
        };
        let patch = form.clone().into_patch().map_err(Error::Form)?;
        let updated = self.store.update(id, patch).await?;
        if self.editing.get() == Some(id) {
            self.editing.set(None);
        }
        Ok(updated)
    }

    pub async fn delete(&self, id: LocationId) -> Result<()> {
        self.store.delete(id).await?;
        if self.editing.get() == Some(id) {
            self.editing.set(None);
        }
        if self.selected.get() == Some(id) {
            self.clear_selection();
        }
        Ok(())
    }

    /// Highlights the location and zooms to it.
    pub fn select(&self, id: LocationId) -> Result<Location> {
        let location = self.store.get(id).ok_or(Error::UnknownLocation(id))?;
        self.markers
            .borrow_mut()
            .focus(&location, self.map.focus_zoom);
        self.selected.set(Some(id));
        Ok(location)
    }

    pub fn selected(&self) -> Option<LocationId> {
        self.selected.get()
    }

    pub fn clear_selection(&self) {
        self.selected.set(None);
        self.markers.borrow_mut().clear_highlight();
    }

    pub fn search(&self, query: &str) {
        self.projection.borrow_mut().set_query(query);
    }

    pub fn clear_search(&self) {
        self.projection.borrow_mut().clear();
    }

    pub fn filtered(&self) -> Vec<Location> {
        self.projection.borrow().view().to_vec()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use async_trait::async_trait;
    use geoasset_core::gateways::{map::Marker, map::MarkerStyle, TransportError};
    use geoasset_entities::builders::*;

    use super::*;

    #[derive(Default)]
    struct MockGateway {
        server: RefCell<Vec<Location>>,
        calls: Cell<usize>,
    }

    #[async_trait(?Send)]
    impl LocationGateway for MockGateway {
        async fn all_locations(&self) -> std::result::Result<Vec<Location>, TransportError> {
            self.calls.set(self.calls.get() + 1);
            Ok(self.server.borrow().clone())
        }

        async fn create_location(
            &self,
            new_location: &NewLocation,
        ) -> std::result::Result<Option<Location>, TransportError> {
            self.calls.set(self.calls.get() + 1);
            let id = self.server.borrow().len() as i64 + 1;
            let location = Location {
                id: Some(id.into()),
                ..new_location.clone().into()
            };
            self.server.borrow_mut().push(location.clone());
            Ok(Some(location))
        }

        async fn update_location(
            &self,
            id: LocationId,
            location: &NewLocation,
        ) -> std::result::Result<Option<Location>, TransportError> {
            self.calls.set(self.calls.get() + 1);
            let updated = Location {
                id: Some(id),
                ..location.clone().into()
            };
            for entry in self.server.borrow_mut().iter_mut() {
                if entry.id == Some(id) {
                    *entry = updated.clone();
                }
            }
            Ok(Some(updated))
        }

        async fn delete_location(&self, id: LocationId) -> std::result::Result<(), TransportError> {
            self.calls.set(self.calls.get() + 1);
            self.server.borrow_mut().retain(|l| l.id != Some(id));
            Ok(())
        }
    }

    #[derive(Default)]
    struct MockSurface {
        next_handle: usize,
        live: HashMap<usize, Marker>,
        views: Vec<(MapPoint, f64)>,
    }

    impl MapSurface for MockSurface {
        type Graphic = usize;

        fn add_marker(&mut self, marker: &Marker) -> usize {
            self.next_handle += 1;
            self.live.insert(self.next_handle, marker.clone());
            self.next_handle
        }

        fn remove_marker(&mut self, graphic: usize) {
            self.live.remove(&graphic);
        }

        fn go_to(&mut self, center: MapPoint, zoom: f64) {
            self.views.push((center, zoom));
        }
    }

    fn id(id: i64) -> LocationId {
        LocationId::new(id)
    }

    async fn manager() -> AssetManager<MockGateway, MockSurface> {
        let gateway = MockGateway::default();
        gateway.server.borrow_mut().extend([
            Location::build()
                .id(1)
                .name("Depot")
                .lat_lng(30.0, 31.0)
                .finish(),
            Location::build()
                .id(2)
                .name("Harbour")
                .lat_lng(31.2, 29.9)
                .finish(),
        ]);
        let manager =
            AssetManager::new(gateway, MockSurface::default(), config::Config::default().map);
        manager.load().await.unwrap();
        manager.store().gateway().calls.set(0);
        manager
    }

    fn form(name: &str, latitude: &str, longitude: &str) -> LocationForm {
        LocationForm {
            name: name.into(),
            description: "".into(),
            latitude: latitude.into(),
            longitude: longitude.into(),
        }
    }

    #[tokio::test]
    async fn load_updates_search_view_and_markers() {
        let manager = manager().await;
        assert_eq!(manager.filtered().len(), 2);
        assert_eq!(manager.markers().marker_count(), 2);
        let center = config::Config::default().map.center;
        assert_eq!(manager.markers().surface().views, vec![(center, 10.0)]);
    }

    #[tokio::test]
    async fn map_click_creates_only_in_add_mode() {
        let manager = manager().await;
        let pos = MapPoint::from_lat_lng_deg(30.1, 31.2);

        assert_eq!(manager.on_map_click(pos, "Tower", "").await, Ok(None));
        assert_eq!(manager.store().gateway().calls.get(), 0);

        assert!(manager.toggle_add_mode());
        assert_eq!(manager.on_map_click(pos, "  ", "").await, Ok(None));
        assert_eq!(manager.store().gateway().calls.get(), 0);

        let created = manager
            .on_map_click(pos, "Tower", "Radio mast")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(created.location.id, Some(id(3)));
        assert_eq!(manager.markers().marker_count(), 3);
        assert_eq!(manager.filtered().len(), 3);
        assert!(manager.is_add_mode_active());

        assert!(!manager.toggle_add_mode());
    }

    #[tokio::test]
    async fn save_creates_without_edit() {
        let manager = manager().await;
        let location = manager.save(&form("Tower", "30.1", "31.2")).await.unwrap();
        assert_eq!(location.id, Some(id(3)));
        assert_eq!(manager.store().items().len(), 3);
    }

    #[tokio::test]
    async fn save_updates_edited_location() {
        let manager = manager().await;
        let mut form = manager.begin_edit(id(1)).unwrap();
        assert_eq!(manager.editing(), Some(id(1)));
        assert_eq!(form.name, "Depot");
        form.name = "Central depot".into();
        let updated = manager.save(&form).await.unwrap();
        assert_eq!(updated.id, Some(id(1)));
        assert_eq!(updated.name, "Central depot");
        assert_eq!(manager.editing(), None);
        assert_eq!(manager.store().items().len(), 2);
    }

    #[tokio::test]
    async fn invalid_form_is_not_sent() {
        let manager = manager().await;
        let err = manager.save(&form("", "91", "x")).await.unwrap_err();
        assert_eq!(
            err,
            Error::Form(vec![
                FormInvalidation::NameRequired,
                FormInvalidation::LatitudeRange,
                FormInvalidation::InvalidLongitude,
            ])
        );
        assert_eq!(manager.store().gateway().calls.get(), 0);
    }

    #[tokio::test]
    async fn edit_unknown_location() {
        let manager = manager().await;
        assert_eq!(
            manager.begin_edit(id(9)),
            Err(Error::UnknownLocation(id(9)))
        );
        assert_eq!(manager.editing(), None);
    }

    #[tokio::test]
    async fn delete_edited_location_ends_editing() {
        let manager = manager().await;
        manager.begin_edit(id(2)).unwrap();
        manager.delete(id(2)).await.unwrap();
        assert_eq!(manager.editing(), None);
        assert_eq!(manager.markers().marker_count(), 1);
        assert_eq!(manager.filtered().len(), 1);
    }

    #[tokio::test]
    async fn delete_selected_location_removes_highlight() {
        let manager = manager().await;
        manager.select(id(2)).unwrap();
        manager.delete(id(1)).await.unwrap();
        assert_eq!(manager.selected(), Some(id(2)));
        assert!(manager.markers().has_highlight());

        manager.delete(id(2)).await.unwrap();
        assert_eq!(manager.selected(), None);
        let markers = manager.markers();
        assert!(!markers.has_highlight());
        assert!(markers.surface().live.is_empty());
    }

    #[tokio::test]
    async fn select_highlights_and_zooms() {
        let manager = manager().await;
        manager.select(id(1)).unwrap();
        let selected = manager.select(id(2)).unwrap();
        let markers = manager.markers();
        let highlights: Vec<_> = markers
            .surface()
            .live
            .values()
            .filter(|m| m.style == MarkerStyle::Highlight)
            .collect();
        assert_eq!(highlights.len(), 1);
        assert_eq!(highlights[0].title, "Harbour");
        assert_eq!(markers.surface().views.last(), Some(&(selected.pos, 15.0)));
        drop(markers);

        manager.clear_selection();
        assert!(!manager.markers().has_highlight());
        assert_eq!(manager.select(id(7)), Err(Error::UnknownLocation(id(7))));
    }

    #[tokio::test]
    async fn search_filters_the_list_but_not_the_markers() {
        let manager = manager().await;
        manager.search("HAR");
        let names: Vec<_> = manager.filtered().into_iter().map(|l| l.name).collect();
        assert_eq!(names, ["Harbour"]);
        assert_eq!(manager.markers().marker_count(), 2);

        manager.save(&form("Harbour master", "31.0", "29.0")).await.unwrap();
        assert_eq!(manager.filtered().len(), 2);

        manager.clear_search();
        assert_eq!(manager.filtered().len(), 3);
    }
}
