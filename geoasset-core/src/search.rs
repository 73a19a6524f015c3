//! Name search over the location list.

use std::rc::Rc;

use geoasset_entities::location::Location;

fn is_blank(query: &str) -> bool {
    query.trim().is_empty()
}

/// Case-insensitive substring match on the location name.
///
/// A blank query matches everything. The query is not trimmed,
/// i.e. `"dep "` does not match `"Depot"`.
pub fn filter_by_name(items: &[Location], query: &str) -> Vec<Location> {
    if is_blank(query) {
        return items.to_vec();
    }
    let query = query.to_lowercase();
    items
        .iter()
        .filter(|l| l.name.to_lowercase().contains(&query))
        .cloned()
        .collect()
}

/// The filtered view of the most recent list snapshot.
#[derive(Debug, Default)]
pub struct SearchProjection {
    query: String,
    source: Rc<[Location]>,
    view: Vec<Location>,
}

impl SearchProjection {
    pub fn new(source: Rc<[Location]>) -> Self {
        let view = source.to_vec();
        Self {
            query: String::new(),
            source,
            view,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn is_active(&self) -> bool {
        !is_blank(&self.query)
    }

    pub fn view(&self) -> &[Location] {
        &self.view
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.recompute();
    }

    pub fn clear(&mut self) {
        self.query.clear();
        self.recompute();
    }

    pub fn set_source(&mut self, source: Rc<[Location]>) {
        self.source = source;
        self.recompute();
    }

    fn recompute(&mut self) {
        self.view = filter_by_name(&self.source, &self.query);
        log::debug!(
            "Search '{}' matches {} of {} locations",
            self.query,
            self.view.len(),
            self.source.len()
        );
    }
}
