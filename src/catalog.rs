// In-memory car catalog with TTL-based refresh from the backend

use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use chrono::{DateTime, Utc};
use reqwest::Client;
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::backend_api;
use crate::config::Settings;
use crate::models::Car;

// One immutable version of the car list. `generation` changes whenever the
// list is replaced, so it can stand in for the list's identity.
#[derive(Debug, Clone)]
pub struct CatalogSnapshot {
    pub generation: u64,
    pub cars: Arc<Vec<Car>>,
    pub fetched_at: DateTime<Utc>,
}

impl CatalogSnapshot {
    pub fn find(&self, id: i64) -> Option<&Car> {
        self.cars.iter().find(|car| car.id == id)
    }
}

struct CachedCatalog {
    snapshot: CatalogSnapshot,
    last_fetched: Instant,
}

pub struct Catalog {
    http_client: Arc<Client>,
    settings: Arc<Settings>,
    max_age: Duration,
    cache: RwLock<Option<CachedCatalog>>,
}

impl Catalog {
    pub fn new(http_client: Arc<Client>, settings: Arc<Settings>) -> Self {
        Self {
            max_age: settings.catalog_ttl(),
            http_client,
            settings,
            cache: RwLock::new(None),
        }
    }

    /// Returns the current car list, refreshing it from the backend once it is older than the TTL.
    /// A stale list is served when the refresh fails.
    pub async fn snapshot(&self) -> Result<CatalogSnapshot> {
        let read_guard = self.cache.read().await;
        if let Some(cached) = &*read_guard {
            if cached.last_fetched.elapsed() < self.max_age {
                return Ok(cached.snapshot.clone());
            }
        }
        drop(read_guard); // Release read lock before acquiring write lock

        let mut write_guard = self.cache.write().await;
        // Another request may have refreshed while we waited for the lock
        if let Some(cached) = &*write_guard {
            if cached.last_fetched.elapsed() < self.max_age {
                return Ok(cached.snapshot.clone());
            }
        }

        info!("Refreshing car catalog from backend.");
        match backend_api::fetch_cars(&self.http_client, &self.settings).await {
            Ok(cars) => Ok(Self::install(&mut write_guard, cars)),
            Err(e) => match &*write_guard {
                Some(cached) => {
                    warn!(
                        generation = cached.snapshot.generation,
                        "Catalog refresh failed, serving stale catalog: {:?}", e
                    );
                    Ok(cached.snapshot.clone())
                }
                None => Err(e),
            },
        }
    }

    /// Replaces the car list, bumping the generation.
    pub async fn store(&self, cars: Vec<Car>) -> CatalogSnapshot {
        let mut write_guard = self.cache.write().await;
        Self::install(&mut write_guard, cars)
    }

    fn install(slot: &mut Option<CachedCatalog>, cars: Vec<Car>) -> CatalogSnapshot {
        let generation = slot.as_ref().map_or(1, |cached| cached.snapshot.generation + 1);
        let snapshot = CatalogSnapshot {
            generation,
            cars: Arc::new(cars),
            fetched_at: Utc::now(),
        };
        info!(generation, cars = snapshot.cars.len(), "Catalog updated.");
        *slot = Some(CachedCatalog {
            snapshot: snapshot.clone(),
            last_fetched: Instant::now(),
        });
        snapshot
    }
}

// Distinct, sorted manufacturer names
pub fn manufacturers(cars: &[Car]) -> Vec<String> {
    cars.iter()
        .map(|car| car.manufacturer_name.as_str())
        .filter(|name| !name.trim().is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

// Distinct, sorted model names offered by one manufacturer
pub fn models_for(cars: &[Car], manufacturer: &str) -> Vec<String> {
    cars.iter()
        .filter(|car| car.manufacturer_name == manufacturer)
        .map(|car| car.model_name.as_str())
        .filter(|name| !name.trim().is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_settings;
    use crate::engine::filter::fixtures::car;

    fn catalog() -> Catalog {
        let settings = Arc::new(test_settings());
        let client = Arc::new(Client::new());
        Catalog::new(client, settings)
    }

    #[tokio::test]
    async fn fresh_catalog_is_served_from_cache() {
        let catalog = catalog();
        let stored = catalog.store(vec![car(1, "Tesla", "Model 3", 2024, None)]).await;

        let snapshot = catalog.snapshot().await.unwrap();
        assert_eq!(snapshot.generation, stored.generation);
        assert!(Arc::ptr_eq(&snapshot.cars, &stored.cars));
    }

    #[tokio::test]
    async fn each_store_bumps_the_generation() {
        let catalog = catalog();
        let first = catalog.store(Vec::new()).await;
        let second = catalog.store(vec![car(1, "Tesla", "Model 3", 2024, None)]).await;

        assert_eq!(first.generation, 1);
        assert_eq!(second.generation, 2);
        assert!(second.find(1).is_some());
        assert!(second.find(2).is_none());
    }

    #[test]
    fn facet_lists_are_distinct_and_sorted() {
        let cars = vec![
            car(1, "Tesla", "Model Y", 2024, None),
            car(2, "BYD", "Seal", 2024, None),
            car(3, "Tesla", "Model 3", 2023, None),
            car(4, "Tesla", "Model Y", 2022, None),
            car(5, "", "Ghost", 2022, None),
        ];

        assert_eq!(manufacturers(&cars), vec!["BYD", "Tesla"]);
        assert_eq!(models_for(&cars, "Tesla"), vec!["Model 3", "Model Y"]);
        assert!(models_for(&cars, "Volvo").is_empty());
    }
}
