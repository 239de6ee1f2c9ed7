//! Response cache in front of any [`VehicleReader`].
//!
//! Repeated requests for the catalog, for the same filter parameters or for
//! the same vehicle are answered from memory until the cache is invalidated.
//! Entries are evicted FIFO once the capacity is reached. Failed fetches are
//! never stored.
//!
//! The lock is held only for the map lookup/insert, never across a call to
//! the inner reader, so two different requests may be in flight at once.

use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::domain::types::VehicleId;
use crate::domain::vehicle::Vehicle;
use crate::repository::errors::RepositoryResult;
use crate::repository::{VehicleFilterQuery, VehicleReader};

const DEFAULT_CAPACITY: usize = 32;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum CacheKey {
    Catalog,
    Filter(VehicleFilterQuery),
    Vehicle(VehicleId),
}

#[derive(Debug, Clone)]
enum CacheEntry {
    Vehicles(Vec<Vehicle>),
    Vehicle(Option<Vehicle>),
}

/// Statistics snapshot from a [`CachedVehicleReader`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: usize,
    pub capacity: usize,
}

struct CacheState {
    map: HashMap<CacheKey, CacheEntry>,
    order: VecDeque<CacheKey>,
    capacity: usize,
    hits: u64,
    misses: u64,
}

impl CacheState {
    fn new(capacity: usize) -> Self {
        Self {
            map: HashMap::with_capacity(capacity),
            order: VecDeque::with_capacity(capacity),
            capacity: capacity.max(1),
            hits: 0,
            misses: 0,
        }
    }

    fn get(&mut self, key: &CacheKey) -> Option<CacheEntry> {
        if let Some(entry) = self.map.get(key) {
            self.hits += 1;
            Some(entry.clone())
        } else {
            self.misses += 1;
            None
        }
    }

    fn insert(&mut self, key: CacheKey, entry: CacheEntry) {
        if self.map.contains_key(&key) {
            self.map.insert(key, entry);
            return;
        }
        if self.order.len() >= self.capacity
            && let Some(evicted) = self.order.pop_front()
        {
            self.map.remove(&evicted);
        }
        self.order.push_back(key.clone());
        self.map.insert(key, entry);
    }

    fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits,
            misses: self.misses,
            entries: self.map.len(),
            capacity: self.capacity,
        }
    }

    fn clear(&mut self) {
        self.map.clear();
        self.order.clear();
    }
}

/// Caching wrapper around a [`VehicleReader`].
pub struct CachedVehicleReader<R> {
    inner: R,
    state: Mutex<CacheState>,
}

impl<R> std::fmt::Debug for CachedVehicleReader<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let stats = self.cache_stats();
        f.debug_struct("CachedVehicleReader")
            .field("hits", &stats.hits)
            .field("misses", &stats.misses)
            .field("entries", &stats.entries)
            .field("capacity", &stats.capacity)
            .finish_non_exhaustive()
    }
}

impl<R> CachedVehicleReader<R> {
    #[must_use]
    pub fn new(inner: R, capacity: usize) -> Self {
        Self {
            inner,
            state: Mutex::new(CacheState::new(capacity)),
        }
    }

    #[must_use]
    pub fn with_default_capacity(inner: R) -> Self {
        Self::new(inner, DEFAULT_CAPACITY)
    }

    fn state_lock(&self) -> MutexGuard<'_, CacheState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    #[must_use]
    pub fn cache_stats(&self) -> CacheStats {
        self.state_lock().stats()
    }

    /// Drops every cached response so the next request reaches the backend.
    pub fn invalidate(&self) {
        log::debug!("Invalidating vehicle response cache");
        self.state_lock().clear();
    }

    pub fn inner(&self) -> &R {
        &self.inner
    }
}

impl<R> CachedVehicleReader<R>
where
    R: VehicleReader,
{
    fn cached_vehicles(
        &self,
        key: CacheKey,
        fetch: impl FnOnce(&R) -> RepositoryResult<Vec<Vehicle>>,
    ) -> RepositoryResult<Vec<Vehicle>> {
        if let Some(CacheEntry::Vehicles(vehicles)) = self.state_lock().get(&key) {
            log::debug!("Serving {key:?} from cache");
            return Ok(vehicles);
        }

        let vehicles = fetch(&self.inner)?;
        self.state_lock()
            .insert(key, CacheEntry::Vehicles(vehicles.clone()));
        Ok(vehicles)
    }
}

impl<R> VehicleReader for CachedVehicleReader<R>
where
    R: VehicleReader,
{
    fn list_vehicles(&self) -> RepositoryResult<Vec<Vehicle>> {
        self.cached_vehicles(CacheKey::Catalog, |inner| inner.list_vehicles())
    }

    fn filter_vehicles(&self, query: &VehicleFilterQuery) -> RepositoryResult<Vec<Vehicle>> {
        self.cached_vehicles(CacheKey::Filter(query.clone()), |inner| {
            inner.filter_vehicles(query)
        })
    }

    fn get_vehicle_by_id(&self, id: VehicleId) -> RepositoryResult<Option<Vehicle>> {
        let key = CacheKey::Vehicle(id);
        if let Some(CacheEntry::Vehicle(vehicle)) = self.state_lock().get(&key) {
            return Ok(vehicle);
        }

        let vehicle = self.inner.get_vehicle_by_id(id)?;
        self.state_lock()
            .insert(key, CacheEntry::Vehicle(vehicle.clone()));
        Ok(vehicle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::filter::SortOrder;
    use crate::domain::types::DailyRate;
    use crate::domain::vehicle::VehicleSpec;
    use crate::repository::errors::RepositoryError;
    use crate::repository::mock::MockVehicleRepository;

    fn fleet() -> Vec<Vehicle> {
        vec![Vehicle::new(
            VehicleId::new(1).expect("valid id"),
            VehicleSpec::new("Toyota", "Yaris"),
            DailyRate::new(30.0).expect("valid rate"),
        )]
    }

    #[test]
    fn repeated_catalog_requests_hit_the_backend_once() {
        let mut repo = MockVehicleRepository::new();
        repo.expect_list_vehicles().times(1).returning(|| Ok(fleet()));
        let cached = CachedVehicleReader::with_default_capacity(repo);

        assert_eq!(cached.list_vehicles().expect("catalog").len(), 1);
        assert_eq!(cached.list_vehicles().expect("catalog").len(), 1);

        let stats = cached.cache_stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.entries, 1);
    }

    #[test]
    fn filter_results_are_keyed_by_parameters() {
        let mut repo = MockVehicleRepository::new();
        repo.expect_filter_vehicles()
            .times(2)
            .returning(|_| Ok(fleet()));
        let cached = CachedVehicleReader::with_default_capacity(repo);
        let asc = VehicleFilterQuery::new().sort(SortOrder::DailyRateAsc);
        let desc = VehicleFilterQuery::new().sort(SortOrder::DailyRateDesc);

        cached.filter_vehicles(&asc).expect("asc");
        cached.filter_vehicles(&desc).expect("desc");
        cached.filter_vehicles(&asc).expect("asc again");

        assert_eq!(cached.cache_stats().hits, 1);
    }

    #[test]
    fn failures_are_not_cached() {
        let mut repo = MockVehicleRepository::new();
        let mut calls = 0;
        repo.expect_list_vehicles().times(2).returning(move || {
            calls += 1;
            if calls == 1 {
                Err(RepositoryError::ConnectionError("offline".to_string()))
            } else {
                Ok(fleet())
            }
        });
        let cached = CachedVehicleReader::with_default_capacity(repo);

        assert!(cached.list_vehicles().is_err());
        assert_eq!(cached.list_vehicles().expect("recovered").len(), 1);
    }

    #[test]
    fn invalidate_forces_a_refetch() {
        let mut repo = MockVehicleRepository::new();
        repo.expect_get_vehicle_by_id()
            .times(2)
            .returning(|_| Ok(fleet().pop()));
        let cached = CachedVehicleReader::with_default_capacity(repo);
        let id = VehicleId::new(1).expect("valid id");

        cached.get_vehicle_by_id(id).expect("first");
        cached.invalidate();
        cached.get_vehicle_by_id(id).expect("second");
    }

    #[test]
    fn oldest_entry_is_evicted_at_capacity() {
        let mut repo = MockVehicleRepository::new();
        repo.expect_filter_vehicles()
            .times(3)
            .returning(|_| Ok(Vec::new()));
        let cached = CachedVehicleReader::new(repo, 1);
        let first = VehicleFilterQuery::new().manufacturer("Kia");
        let second = VehicleFilterQuery::new().manufacturer("BMW");

        cached.filter_vehicles(&first).expect("first");
        cached.filter_vehicles(&second).expect("second");
        cached.filter_vehicles(&first).expect("first again");

        assert_eq!(cached.cache_stats().entries, 1);
        assert_eq!(cached.cache_stats().hits, 0);
    }
}
