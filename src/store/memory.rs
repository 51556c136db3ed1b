use std::collections::HashMap;

use parking_lot::RwLock;

use crate::model::{Beer, Brewery, Id};
use crate::store::traits::{BeerStore, BreweryStore, StoreError, StoreResult};

/// Volatile store backed by two maps, one per entity type.
///
/// Locks are only held for the duration of a map operation and never across
/// an `.await`, so the store is safe to share between request handlers.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    breweries: RwLock<HashMap<Id, Brewery>>,
    beers: RwLock<HashMap<Id, Beer>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn name_taken(breweries: &HashMap<Id, Brewery>, name: &str, except: &Id) -> bool {
        breweries
            .values()
            .any(|b| b.brewery == name && &b.id != except)
    }
}

fn duplicate_name(name: &str) -> StoreError {
    StoreError::Duplicate(format!("brewery {:?} already exists", name))
}

#[async_trait::async_trait]
impl BreweryStore for InMemoryStore {
    async fn get_brewery(&self, id: &Id) -> StoreResult<Option<Brewery>> {
        Ok(self.breweries.read().get(id).cloned())
    }

    async fn insert_brewery(&self, brewery: Brewery) -> StoreResult<Brewery> {
        let mut breweries = self.breweries.write();
        if Self::name_taken(&breweries, &brewery.brewery, &brewery.id) {
            return Err(duplicate_name(&brewery.brewery));
        }
        if breweries.contains_key(&brewery.id) {
            return Err(StoreError::Duplicate(format!("id {} already exists", brewery.id)));
        }
        breweries.insert(brewery.id, brewery.clone());
        Ok(brewery)
    }

    async fn update_brewery(&self, brewery: Brewery) -> StoreResult<Option<Brewery>> {
        let mut breweries = self.breweries.write();
        if !breweries.contains_key(&brewery.id) {
            return Ok(None);
        }
        if Self::name_taken(&breweries, &brewery.brewery, &brewery.id) {
            return Err(duplicate_name(&brewery.brewery));
        }
        breweries.insert(brewery.id, brewery.clone());
        Ok(Some(brewery))
    }

    async fn delete_brewery(&self, id: &Id) -> StoreResult<bool> {
        Ok(self.breweries.write().remove(id).is_some())
    }
}

#[async_trait::async_trait]
impl BeerStore for InMemoryStore {
    async fn get_beer(&self, id: &Id) -> StoreResult<Option<Beer>> {
        Ok(self.beers.read().get(id).cloned())
    }

    async fn insert_beer(&self, beer: Beer) -> StoreResult<Beer> {
        let mut beers = self.beers.write();
        if beers.contains_key(&beer.id) {
            return Err(StoreError::Duplicate(format!("id {} already exists", beer.id)));
        }
        beers.insert(beer.id, beer.clone());
        Ok(beer)
    }

    async fn update_beer(&self, beer: Beer) -> StoreResult<Option<Beer>> {
        let mut beers = self.beers.write();
        match beers.get_mut(&beer.id) {
            Some(slot) => {
                *slot = beer.clone();
                Ok(Some(beer))
            }
            None => Ok(None),
        }
    }

    async fn delete_beer(&self, id: &Id) -> StoreResult<bool> {
        Ok(self.beers.write().remove(id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{generate_id, NewBeer, NewBrewery};

    fn brewery(name: &str) -> Brewery {
        NewBrewery {
            brewery: Some(name.to_string()),
            location: Some("Seattle".to_string()),
            founded: None,
        }
        .into_brewery()
        .unwrap()
    }

    #[tokio::test]
    async fn insert_then_get_round_trips() {
        let store = InMemoryStore::new();
        let stored = store.insert_brewery(brewery("Fremont")).await.unwrap();

        let fetched = store.get_brewery(&stored.id).await.unwrap();
        assert_eq!(fetched, Some(stored));
        assert_eq!(store.get_brewery(&generate_id()).await.unwrap(), None);
    }

    #[tokio::test]
    async fn duplicate_name_is_rejected_on_insert() {
        let store = InMemoryStore::new();
        store.insert_brewery(brewery("Holy Mountain")).await.unwrap();

        let err = store
            .insert_brewery(brewery("Holy Mountain"))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Duplicate(_)));
    }

    #[tokio::test]
    async fn update_conflicts_only_with_other_records() {
        let store = InMemoryStore::new();
        store.insert_brewery(brewery("Holy Mountain")).await.unwrap();
        let mut fremont = store.insert_brewery(brewery("Fremont")).await.unwrap();

        // Re-saving a record under its own name is fine
        fremont.location = "Ballard".to_string();
        let saved = store.update_brewery(fremont.clone()).await.unwrap();
        assert_eq!(saved.map(|b| b.location), Some("Ballard".to_string()));

        fremont.brewery = "Holy Mountain".to_string();
        let err = store.update_brewery(fremont).await.unwrap_err();
        assert!(matches!(err, StoreError::Duplicate(_)));
    }

    #[tokio::test]
    async fn update_and_delete_missing_records() {
        let store = InMemoryStore::new();
        assert_eq!(store.update_brewery(brewery("Ghost")).await.unwrap(), None);
        assert!(!store.delete_brewery(&generate_id()).await.unwrap());

        let beer = NewBeer {
            name: Some("Ghost Ale".to_string()),
            style: Some("Amber".to_string()),
            ..Default::default()
        }
        .into_beer()
        .unwrap();
        assert_eq!(store.update_beer(beer.clone()).await.unwrap(), None);
        assert!(!store.delete_beer(&beer.id).await.unwrap());
    }

    #[tokio::test]
    async fn beers_are_deleted_independently_of_breweries() {
        let store = InMemoryStore::new();
        let fremont = store.insert_brewery(brewery("Fremont")).await.unwrap();
        let beer = NewBeer {
            name: Some("Interurban".to_string()),
            style: Some("IPA".to_string()),
            abv: None,
            brewery: Some(fremont.id.to_string()),
        }
        .into_beer()
        .unwrap();
        let beer = store.insert_beer(beer).await.unwrap();

        assert!(store.delete_brewery(&fremont.id).await.unwrap());
        assert_eq!(
            store.get_beer(&beer.id).await.unwrap().and_then(|b| b.brewery),
            Some(fremont.id)
        );
        assert!(store.delete_beer(&beer.id).await.unwrap());
        assert_eq!(store.get_beer(&beer.id).await.unwrap(), None);
    }
}
