//! The single source of truth for all locations known to the client.
//!
//! Every write goes through the [`LocationGateway`] and the local list is
//! only updated after the server has answered. The list is never mutated
//! in place: each state transition publishes a complete new sequence, so
//! readers never observe a half-applied write.

use std::{
    cell::RefCell,
    collections::HashSet,
    rc::{Rc, Weak},
};

use geoasset_entities::{id::LocationId, location::*};

use crate::{gateways::locations::LocationGateway, util::validate::Validate};

mod error;


pub use self::error::Error;

type Result<T> = std::result::Result<T, Error>;

/// How a created location has been correlated with the server state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// The create response contained the new id.
    Confirmed,
    /// The id was found by reloading all locations.
    Matched,
    /// The location could not be identified; it stays a draft
    /// until the next full reload resolves it.
    Unresolved,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Created {
    pub location: Location,
    pub resolution: Resolution,
}

type Listener = Rc<dyn Fn(&Rc<[Location]>)>;

#[derive(Default)]
struct Listeners {
    next_id: u64,
    entries: Vec<(u64, Listener)>,
}

/// Keeps a change listener registered until dropped.
pub struct Subscription {
    id: u64,
    listeners: Weak<RefCell<Listeners>>,
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(listeners) = self.listeners.upgrade() {
            listeners
                .borrow_mut()
                .entries
                .retain(|(id, _)| *id != self.id);
        }
    }
}

pub struct LocationStore<G> {
    gateway: G,
    items: RefCell<Rc<[Location]>>,
    listeners: Rc<RefCell<Listeners>>,
}

impl<G> LocationStore<G>
where
    G: LocationGateway,
{
    pub fn new(gateway: G) -> Self {
        Self {
            gateway,
            items: RefCell::new(Rc::from(Vec::new())),
            listeners: Default::default(),
        }
    }

    pub const fn gateway(&self) -> &G {
        &self.gateway
    }

    /// Snapshot of the current list.
    pub fn items(&self) -> Rc<[Location]> {
        Rc::clone(&self.items.borrow())
    }

    pub fn get(&self, id: LocationId) -> Option<Location> {
        self.items.borrow().iter().find(|l| l.id == Some(id)).cloned()
    }

    /// Registers a listener that receives the current list
    /// immediately and every subsequent list afterwards.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&Rc<[Location]>) + 'static,
    {
        let listener: Listener = Rc::new(listener);
        let id = {
            let mut listeners = self.listeners.borrow_mut();
            let id = listeners.next_id;
            listeners.next_id += 1;
            listeners.entries.push((id, Rc::clone(&listener)));
            id
        };
        listener(&self.items());
        Subscription {
            id,
            listeners: Rc::downgrade(&self.listeners),
        }
    }

    fn publish(&self, items: Rc<[Location]>) {
        *self.items.borrow_mut() = Rc::clone(&items);
        let listeners: Vec<_> = self
            .listeners
            .borrow()
            .entries
            .iter()
            .map(|(_, l)| Rc::clone(l))
            .collect();
        for listener in listeners {
            listener(&items);
        }
    }

    async fn fetch_all(&self) -> Result<Vec<Location>> {
        let locations = self.gateway.all_locations().await?;
        Ok(unique_ids(locations))
    }

    /// Replaces the whole list with the server state.
    pub async fn load_all(&self) -> Result<Rc<[Location]>> {
        log::debug!("Loading all locations");
        let items: Rc<[Location]> = self.fetch_all().await?.into();
        log::debug!("Loaded {} locations", items.len());
        self.publish(Rc::clone(&items));
        Ok(items)
    }

    pub async fn create(&self, new_location: NewLocation) -> Result<Created> {
        new_location.validate()?;
        let known_ids: HashSet<_> = self.items().iter().filter_map(|l| l.id).collect();
        log::debug!("Creating location '{}'", new_location.name);
        let response = self.gateway.create_location(&new_location).await?;
        if let Some(location) = response.filter(Location::is_persisted) {
            log::info!(
                "Created location '{}' ({})",
                location.name,
                location.id.map(|id| id.to_string()).unwrap_or_default()
            );
            self.publish(upsert(&self.items(), location.clone()));
            return Ok(Created {
                location,
                resolution: Resolution::Confirmed,
            });
        }
        log::warn!(
            "The response for the created location '{}' contains no id: reload all locations",
            new_location.name
        );
        Ok(self.resolve_created(new_location, &known_ids).await)
    }

    async fn resolve_created(
        &self,
        new_location: NewLocation,
        known_ids: &HashSet<LocationId>,
    ) -> Created {
        let mut items = match self.fetch_all().await {
            Ok(items) => items,
            Err(err) => {
                log::warn!("Unable to reload locations after creating a location: {err}");
                let draft = Location::from(new_location);
                self.publish(append(&self.items(), draft.clone()));
                return Created {
                    location: draft,
                    resolution: Resolution::Unresolved,
                };
            }
        };
        if let Some(location) = find_created(&items, &new_location, known_ids).cloned() {
            log::info!("Found created location '{}' after reload", location.name);
            self.publish(items.into());
            return Created {
                location,
                resolution: Resolution::Matched,
            };
        }
        log::warn!(
            "Created location '{}' not found after reload: keep it as draft",
            new_location.name
        );
        let draft = Location::from(new_location);
        items.push(draft.clone());
        self.publish(items.into());
        Created {
            location: draft,
            resolution: Resolution::Unresolved,
        }
    }

    /// Updates a persisted location.
    ///
    /// The server response replaces the local entry,
    /// concurrent updates of the same location are not detected.
    pub async fn update(&self, id: LocationId, patch: LocationPatch) -> Result<Location> {
        let Some(current) = self.get(id) else {
            log::error!("Unable to update location {id}: not in store");
            return Err(Error::UnknownLocation(id));
        };
        let payload = patch.apply_to(&current);
        payload.validate()?;
        log::debug!("Updating location {id}");
        let response = self.gateway.update_location(id, &payload).await?;
        let updated = match response {
            Some(mut location) => {
                if location.id.is_some_and(|response_id| response_id != id) {
                    log::warn!(
                        "Update response of location {id} refers to another id: {:?}",
                        location.id
                    );
                }
                location.id = Some(id);
                location
            }
            None => Location {
                id: Some(id),
                ..payload.into()
            },
        };
        match replace(&self.items(), &updated) {
            Some(items) => {
                log::info!("Updated location {id}");
                self.publish(items);
            }
            None => {
                log::warn!("Location {id} has been removed while it was updated");
            }
        }
        Ok(updated)
    }

    pub async fn delete(&self, id: LocationId) -> Result<()> {
        log::debug!("Deleting location {id}");
        self.gateway
            .delete_location(id)
            .await
            .map_err(|source| Error::Delete { id, source })?;
        log::info!("Deleted location {id}");
        let remaining: Vec<_> = self
            .items()
            .iter()
            .filter(|l| l.id != Some(id))
            .cloned()
            .collect();
        self.publish(remaining.into());
        if let Err(err) = self.load_all().await {
            log::warn!("Unable to reload locations after deleting location {id}: {err}");
        }
        Ok(())
    }
}

// Keeps the first occurrence of every id.
fn unique_ids(locations: Vec<Location>) -> Vec<Location> {
    let mut ids = HashSet::new();
    locations
        .into_iter()
        .filter(|l| match l.id {
            Some(id) => {
                let first = ids.insert(id);
                if !first {
                    log::warn!("Ignoring duplicate location {id}");
                }
                first
            }
            None => true,
        })
        .collect()
}

fn append(items: &[Location], location: Location) -> Rc<[Location]> {
    items.iter().cloned().chain(Some(location)).collect()
}

fn upsert(items: &[Location], location: Location) -> Rc<[Location]> {
    replace(items, &location).unwrap_or_else(|| append(items, location))
}

fn replace(items: &[Location], location: &Location) -> Option<Rc<[Location]>> {
    debug_assert!(location.is_persisted());
    let index = items.iter().position(|l| l.id == location.id)?;
    let mut items = items.to_vec();
    items[index] = location.clone();
    Some(items.into())
}

// Correlation by value is a heuristic: records with the same name and
// position created concurrently by other users are indistinguishable.
fn find_created<'a>(
    items: &'a [Location],
    new_location: &NewLocation,
    known_ids: &HashSet<LocationId>,
) -> Option<&'a Location> {
    let (fresh, known): (Vec<_>, Vec<_>) = items
        .iter()
        .filter(|l| l.is_persisted() && l.same_name_and_pos(&new_location.name, new_location.pos))
        .partition(|l| l.id.is_some_and(|id| !known_ids.contains(&id)));
    fresh.last().or_else(|| known.last()).copied()
}
