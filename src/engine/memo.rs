//! Memoized filtering keyed by catalog generation and criteria value.

use std::sync::{Arc, Mutex};

use cached::{Cached, SizedCache};

use super::filter::filter_cars;
use crate::models::{Car, FilterCriteria};

pub struct FilterMemo {
    cache: Mutex<SizedCache<MemoKey, Arc<Vec<Car>>>>,
}

// Structural copy of the criteria. Price bounds are kept as raw bits so
// NaN and the infinities never collapse onto each other.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct MemoKey {
    generation: u64,
    manufacturer: Option<String>,
    model: Option<String>,
    category: Option<String>,
    years: (Option<i32>, Option<i32>),
    prices: (Option<u64>, Option<u64>),
    featured: Option<bool>,
    exterior_colors: Option<Vec<String>>,
    interior_colors: Option<Vec<String>>,
    colors: Option<Vec<i64>>,
}

impl MemoKey {
    fn new(generation: u64, criteria: &FilterCriteria) -> Self {
        Self {
            generation,
            manufacturer: criteria.manufacturer.clone(),
            model: criteria.model.clone(),
            category: criteria.category.clone(),
            years: (criteria.min_year, criteria.max_year),
            prices: (
                criteria.min_price.map(f64::to_bits),
                criteria.max_price.map(f64::to_bits),
            ),
            featured: criteria.featured,
            exterior_colors: criteria.exterior_colors.clone(),
            interior_colors: criteria.interior_colors.clone(),
            colors: criteria.colors.clone(),
        }
    }
}

impl FilterMemo {
    pub fn new(capacity: usize) -> Self {
        Self {
            cache: Mutex::new(SizedCache::with_size(capacity.max(1))),
        }
    }

    /// Returns the cars of `generation` matching `criteria`, filtering only on a miss.
    pub fn filtered(&self, generation: u64, cars: &[Car], criteria: &FilterCriteria) -> Arc<Vec<Car>> {
        let key = MemoKey::new(generation, criteria);

        let mut cache = match self.cache.lock() {
            Ok(cache) => cache,
            Err(_) => {
                tracing::warn!("Filter memo lock poisoned, filtering without cache");
                return Arc::new(filter_cars(cars, criteria));
            }
        };

        if let Some(hit) = cache.cache_get(&key) {
            tracing::debug!(generation, "Filter memo hit");
            return Arc::clone(hit);
        }

        let filtered = Arc::new(filter_cars(cars, criteria));
        tracing::debug!(generation, matched = filtered.len(), "Filter memo miss");
        cache.cache_set(key, Arc::clone(&filtered));
        filtered
    }

    #[cfg(test)]
    pub(crate) fn entries(&self) -> usize {
        self.cache.lock().map(|cache| cache.cache_size()).unwrap_or(0)
    }
}
