//! Keeps the markers of a [`MapSurface`] in line with the location list.

use std::collections::{HashMap, HashSet};

use geoasset_entities::{id::LocationId, location::Location};

use crate::gateways::map::{MapSurface, Marker, MarkerStyle};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileStats {
    pub added: usize,
    pub updated: usize,
    pub removed: usize,
    pub drafted: usize,
}

pub struct MarkerReconciler<S: MapSurface> {
    surface: S,
    markers: HashMap<LocationId, (Marker, S::Graphic)>,
    drafts: Vec<S::Graphic>,
    highlight: Option<S::Graphic>,
}

impl<S> MarkerReconciler<S>
where
    S: MapSurface,
{
    pub fn new(surface: S) -> Self {
        Self {
            surface,
            markers: HashMap::new(),
            drafts: Vec::new(),
            highlight: None,
        }
    }

    pub const fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }

    pub fn draft_count(&self) -> usize {
        self.drafts.len()
    }

    pub const fn has_highlight(&self) -> bool {
        self.highlight.is_some()
    }

    /// Brings the markers in line with `items`.
    ///
    /// Persisted locations keep their marker as long as it is unchanged.
    /// Drafts are redrawn on every call.
    pub fn reconcile(&mut self, items: &[Location]) -> ReconcileStats {
        let mut stats = ReconcileStats::default();
        for graphic in self.drafts.drain(..) {
            self.surface.remove_marker(graphic);
        }
        let mut seen = HashSet::with_capacity(items.len());
        for location in items {
            let Some(id) = location.id else {
                let marker = Marker::new(location, MarkerStyle::Draft);
                self.drafts.push(self.surface.add_marker(&marker));
                stats.drafted += 1;
                continue;
            };
            if !seen.insert(id) {
                log::warn!("Skipping duplicate marker for location {id}");
                continue;
            }
            let marker = Marker::new(location, MarkerStyle::Location);
            match self.markers.remove(&id) {
                Some((current, graphic)) if current == marker => {
                    self.markers.insert(id, (current, graphic));
                    continue;
                }
                Some((_, graphic)) => {
                    self.surface.remove_marker(graphic);
                    stats.updated += 1;
                }
                None => {
                    stats.added += 1;
                }
            }
            let graphic = self.surface.add_marker(&marker);
            self.markers.insert(id, (marker, graphic));
        }
        let stale: Vec<_> = self
            .markers
            .keys()
            .filter(|id| !seen.contains(*id))
            .copied()
            .collect();
        for id in stale {
            if let Some((_, graphic)) = self.markers.remove(&id) {
                self.surface.remove_marker(graphic);
                stats.removed += 1;
            }
        }
        log::debug!("Reconciled markers: {stats:?}");
        stats
    }

    /// Replaces the current highlight marker.
    pub fn highlight(&mut self, location: &Location) {
        self.clear_highlight();
        let marker = Marker::new(location, MarkerStyle::Highlight);
        self.highlight = Some(self.surface.add_marker(&marker));
    }

    pub fn clear_highlight(&mut self) {
        if let Some(graphic) = self.highlight.take() {
            self.surface.remove_marker(graphic);
        }
    }

    /// Highlights the location and moves the view to it.
    pub fn focus(&mut self, location: &Location, zoom: f64) {
        self.highlight(location);
        self.surface.go_to(location.pos, zoom);
    }
}

#[cfg(test)]
mod tests {
    use geoasset_entities::{builders::*, geo::MapPoint};

    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    pub enum Call {
        Add(String, MarkerStyle),
        Remove(usize),
        GoTo(MapPoint, f64),
    }

    /// Records every call and keeps the live markers by handle.
    #[derive(Debug, Default)]
    pub struct MockSurface {
        next_handle: usize,
        pub live: HashMap<usize, Marker>,
        pub calls: Vec<Call>,
    }

    impl MockSurface {
        pub fn live_with_style(&self, style: MarkerStyle) -> Vec<&Marker> {
            self.live.values().filter(|m| m.style == style).collect()
        }
    }

    impl MapSurface for MockSurface {
        type Graphic = usize;

        fn add_marker(&mut self, marker: &Marker) -> usize {
            let handle = self.next_handle;
            self.next_handle += 1;
            self.live.insert(handle, marker.clone());
            self.calls.push(Call::Add(marker.title.clone(), marker.style));
            handle
        }

        fn remove_marker(&mut self, graphic: usize) {
            assert!(self.live.remove(&graphic).is_some(), "unknown graphic");
            self.calls.push(Call::Remove(graphic));
        }

        fn go_to(&mut self, center: MapPoint, zoom: f64) {
            self.calls.push(Call::GoTo(center, zoom));
        }
    }

    fn depot() -> Location {
        Location::build()
            .id(1)
            .name("Depot")
            .lat_lng(30.0, 31.0)
            .finish()
    }

    fn harbour() -> Location {
        Location::build()
            .id(2)
            .name("Harbour")
            .lat_lng(31.2, 29.9)
            .finish()
    }

    fn draft() -> Location {
        Location::build()
            .draft()
            .name("Tower")
            .lat_lng(30.1, 31.2)
            .finish()
    }

    fn reconciler() -> MarkerReconciler<MockSurface> {
        MarkerReconciler::new(MockSurface::default())
    }

    #[test]
    fn add_one_marker_per_location() {
        let mut r = reconciler();
        let stats = r.reconcile(&[depot(), harbour()]);
        assert_eq!(
            stats,
            ReconcileStats {
                added: 2,
                ..Default::default()
            }
        );
        assert_eq!(r.marker_count(), 2);
        let titles: HashSet<_> = r.surface().live.values().map(|m| m.title.as_str()).collect();
        assert_eq!(titles, HashSet::from(["Depot", "Harbour"]));
    }

    #[test]
    fn unchanged_list_needs_no_surface_calls() {
        let mut r = reconciler();
        r.reconcile(&[depot(), harbour()]);
        r.surface_mut().calls.clear();
        let stats = r.reconcile(&[depot(), harbour()]);
        assert_eq!(stats, ReconcileStats::default());
        assert!(r.surface().calls.is_empty());
    }

    #[test]
    fn changed_location_is_redrawn() {
        let mut r = reconciler();
        r.reconcile(&[depot(), harbour()]);
        let moved = Location {
            pos: MapPoint::from_lat_lng_deg(29.0, 31.0),
            ..depot()
        };
        let stats = r.reconcile(&[moved, harbour()]);
        assert_eq!(stats.updated, 1);
        assert_eq!(r.marker_count(), 2);
        assert!(r
            .surface()
            .live
            .values()
            .any(|m| m.pos == MapPoint::from_lat_lng_deg(29.0, 31.0)));
    }

    #[test]
    fn remove_markers_of_deleted_locations() {
        let mut r = reconciler();
        r.reconcile(&[depot(), harbour()]);
        let stats = r.reconcile(&[harbour()]);
        assert_eq!(stats.removed, 1);
        assert_eq!(r.marker_count(), 1);
        assert_eq!(r.surface().live.len(), 1);
    }

    #[test]
    fn drafts_are_drawn_outside_the_index() {
        let mut r = reconciler();
        let stats = r.reconcile(&[depot(), draft()]);
        assert_eq!(stats.added, 1);
        assert_eq!(stats.drafted, 1);
        assert_eq!(r.marker_count(), 1);
        assert_eq!(r.draft_count(), 1);
        assert_eq!(r.surface().live_with_style(MarkerStyle::Draft).len(), 1);

        let stats = r.reconcile(&[depot()]);
        assert_eq!(stats.drafted, 0);
        assert_eq!(r.draft_count(), 0);
        assert!(r.surface().live_with_style(MarkerStyle::Draft).is_empty());
    }

    #[test]
    fn duplicate_ids_get_a_single_marker() {
        let mut r = reconciler();
        r.reconcile(&[depot(), depot()]);
        assert_eq!(r.surface().live.len(), 1);
    }

    #[test]
    fn single_highlight() {
        let mut r = reconciler();
        r.reconcile(&[depot(), harbour()]);
        r.highlight(&depot());
        r.highlight(&harbour());
        let highlights = r.surface().live_with_style(MarkerStyle::Highlight);
        assert_eq!(highlights.len(), 1);
        assert_eq!(highlights[0].title, "Harbour");

        r.reconcile(&[]);
        assert!(r.has_highlight());
        r.clear_highlight();
        assert!(!r.has_highlight());
        assert!(r.surface().live.is_empty());
    }

    #[test]
    fn focus_moves_the_view() {
        let mut r = reconciler();
        r.focus(&harbour(), 15.0);
        assert_eq!(
            r.surface().calls,
            vec![
                Call::Add("Harbour".into(), MarkerStyle::Highlight),
                Call::GoTo(harbour().pos, 15.0),
            ]
        );
    }
}
