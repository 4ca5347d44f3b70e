//! In-memory implementation of the city repository port.
//!
//! Backs handler tests and database-less development runs. Behaviour matches
//! the PostgreSQL adapter: queries see committed state only, commits apply a
//! whole change set atomically, and identifiers are assigned at commit time.

use std::collections::BTreeMap;
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use pagination::{PageRequest, PaginationMetadata};

use crate::domain::ports::{
    ChangeSet, CityFilter, CityRepository, CityRepositoryError, CommitOutcome, StagedChange,
};
use crate::domain::{
    City, CityId, Description, Name, PointOfInterest, PointOfInterestDraft, PointOfInterestId,
};

#[derive(Debug, Clone)]
struct StoredPoint {
    name: Name,
    description: Option<Description>,
}

#[derive(Debug, Clone)]
struct StoredCity {
    name: Name,
    description: Option<Description>,
    points: BTreeMap<i32, StoredPoint>,
}

#[derive(Debug, Clone, Default)]
struct StoreState {
    cities: BTreeMap<i32, StoredCity>,
    next_city_id: i32,
    next_point_id: i32,
}

/// In-memory city store guarded by a mutex.
///
/// The lock is held only for synchronous map operations, never across an
/// await point.
#[derive(Debug, Default)]
pub struct InMemoryCityRepository {
    state: Mutex<StoreState>,
}

impl InMemoryCityRepository {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store seeded with a handful of well-known cities, used by
    /// development runs when no database is configured.
    pub fn with_sample_data() -> Self {
        let repo = Self::new();
        repo.seed_city(
            "New York City",
            Some("The one with that big park"),
            &[
                ("Central Park", Some("The most visited urban park in the United States")),
                ("Empire State Building", Some("A 102-story skyscraper in Midtown Manhattan")),
            ],
        );
        repo.seed_city(
            "Antwerp",
            Some("The one with the cathedral that was never really finished"),
            &[
                (
                    "Cathedral of Our Lady",
                    Some("A Gothic style cathedral, conceived by architects Jan and Pieter Appelmans"),
                ),
                ("Antwerp Central Station", Some("The finest example of railway architecture in Belgium")),
            ],
        );
        repo.seed_city(
            "Paris",
            Some("The one with that big tower"),
            &[
                ("Eiffel Tower", Some("A wrought iron lattice tower on the Champ de Mars")),
                ("The Louvre", Some("The world's largest museum")),
            ],
        );
        repo
    }

    /// Insert a city (and its points) directly into committed state.
    ///
    /// # Panics
    ///
    /// Panics when the seed data violates the field invariants; intended for
    /// static fixtures only.
    pub fn seed_city(
        &self,
        name: &str,
        description: Option<&str>,
        points: &[(&str, Option<&str>)],
    ) -> CityId {
        let parse_name = |value: &str| {
            Name::new(value).unwrap_or_else(|err| panic!("seed name must be valid: {err}"))
        };
        let parse_description = |value: Option<&str>| {
            value.map(|v| {
                Description::new(v)
                    .unwrap_or_else(|err| panic!("seed description must be valid: {err}"))
            })
        };

        let mut state = self.lock_state();
        state.next_city_id += 1;
        let city_id = state.next_city_id;
        let mut stored_points = BTreeMap::new();
        for (point_name, point_description) in points {
            state.next_point_id += 1;
            stored_points.insert(
                state.next_point_id,
                StoredPoint {
                    name: parse_name(point_name),
                    description: parse_description(*point_description),
                },
            );
        }
        state.cities.insert(
            city_id,
            StoredCity {
                name: parse_name(name),
                description: parse_description(description),
                points: stored_points,
            },
        );
        CityId::new(city_id)
    }

    fn lock_state(&self) -> std::sync::MutexGuard<'_, StoreState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn matches_filter(city: &StoredCity, filter: &CityFilter) -> bool {
    if let Some(name) = filter.name() {
        if city.name.as_str() != name {
            return false;
        }
    }
    if let Some(search) = filter.search_query() {
        let in_name = city.name.as_str().contains(search);
        let in_description = city
            .description
            .as_ref()
            .is_some_and(|d| d.as_str().contains(search));
        if !in_name && !in_description {
            return false;
        }
    }
    true
}

fn to_point(id: i32, city_id: i32, point: &StoredPoint) -> PointOfInterest {
    PointOfInterest::new(
        PointOfInterestId::new(id),
        CityId::new(city_id),
        point.name.clone(),
        point.description.clone(),
    )
}

fn to_city(id: i32, city: &StoredCity) -> City {
    City::new(CityId::new(id), city.name.clone(), city.description.clone())
}

fn apply_change(
    state: &mut StoreState,
    change: StagedChange,
    created: &mut Vec<PointOfInterest>,
) -> Result<(), CityRepositoryError> {
    match change {
        StagedChange::AddPointOfInterest { city_id, draft } => {
            let PointOfInterestDraft { name, description } = draft;
            state.next_point_id += 1;
            let point_id = state.next_point_id;
            let city = state
                .cities
                .get_mut(&city_id.value())
                .ok_or_else(|| CityRepositoryError::missing_city(city_id))?;
            city.points.insert(
                point_id,
                StoredPoint {
                    name: name.clone(),
                    description: description.clone(),
                },
            );
            created.push(PointOfInterest::new(
                PointOfInterestId::new(point_id),
                city_id,
                name,
                description,
            ));
            Ok(())
        }
        StagedChange::UpdatePointOfInterest {
            city_id,
            point_id,
            draft,
        } => {
            let point = state
                .cities
                .get_mut(&city_id.value())
                .and_then(|city| city.points.get_mut(&point_id.value()))
                .ok_or_else(|| {
                    CityRepositoryError::missing_point_of_interest(city_id, point_id)
                })?;
            point.name = draft.name;
            point.description = draft.description;
            Ok(())
        }
        StagedChange::DeletePointOfInterest { city_id, point_id } => state
            .cities
            .get_mut(&city_id.value())
            .and_then(|city| city.points.remove(&point_id.value()))
            .map(|_| ())
            .ok_or_else(|| CityRepositoryError::missing_point_of_interest(city_id, point_id)),
    }
}

#[async_trait]
impl CityRepository for InMemoryCityRepository {
    async fn list_cities(
        &self,
        filter: &CityFilter,
        page: PageRequest,
    ) -> Result<(Vec<City>, PaginationMetadata), CityRepositoryError> {
        let state = self.lock_state();
        let mut matches: Vec<(&i32, &StoredCity)> = state
            .cities
            .iter()
            .filter(|(_, city)| matches_filter(city, filter))
            .collect();
        // Name ascending, id as the deterministic tiebreak.
        matches.sort_by(|(a_id, a), (b_id, b)| a.name.cmp(&b.name).then(a_id.cmp(b_id)));

        let total = matches.len() as u64;
        let metadata = PaginationMetadata::for_page(total, &page);
        let cities = matches
            .into_iter()
            .skip(usize::try_from(page.offset()).unwrap_or(usize::MAX))
            .take(usize::try_from(page.limit()).unwrap_or(0))
            .map(|(id, city)| to_city(*id, city))
            .collect();
        Ok((cities, metadata))
    }

    async fn find_city(
        &self,
        city_id: CityId,
        include_points_of_interest: bool,
    ) -> Result<Option<City>, CityRepositoryError> {
        let state = self.lock_state();
        Ok(state.cities.get(&city_id.value()).map(|stored| {
            let city = to_city(city_id.value(), stored);
            if include_points_of_interest {
                let points = stored
                    .points
                    .iter()
                    .map(|(id, point)| to_point(*id, city_id.value(), point))
                    .collect();
                city.with_points_of_interest(points)
            } else {
                city
            }
        }))
    }

    async fn city_exists(&self, city_id: CityId) -> Result<bool, CityRepositoryError> {
        Ok(self.lock_state().cities.contains_key(&city_id.value()))
    }

    async fn find_point_of_interest(
        &self,
        city_id: CityId,
        point_id: PointOfInterestId,
    ) -> Result<Option<PointOfInterest>, CityRepositoryError> {
        let state = self.lock_state();
        Ok(state
            .cities
            .get(&city_id.value())
            .and_then(|city| city.points.get(&point_id.value()))
            .map(|point| to_point(point_id.value(), city_id.value(), point)))
    }

    async fn list_points_of_interest(
        &self,
        city_id: CityId,
    ) -> Result<Vec<PointOfInterest>, CityRepositoryError> {
        let state = self.lock_state();
        Ok(state
            .cities
            .get(&city_id.value())
            .map(|city| {
                city.points
                    .iter()
                    .map(|(id, point)| to_point(*id, city_id.value(), point))
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn commit(&self, changes: ChangeSet) -> Result<CommitOutcome, CityRepositoryError> {
        let mut state = self.lock_state();
        // Apply to a working copy so a failed change leaves committed state
        // untouched, matching the transactional adapter.
        let mut working = state.clone();
        let mut created = Vec::new();
        for change in changes.into_changes() {
            apply_change(&mut working, change, &mut created)?;
        }
        *state = working;
        Ok(CommitOutcome::new(created))
    }
}
