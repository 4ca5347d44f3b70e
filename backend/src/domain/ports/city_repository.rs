//! Repository port for cities and their points of interest.
//!
//! In hexagonal terms this is a *driven* port: the domain defines the
//! contract and the persistence adapter implements it. Queries run
//! immediately; mutations are staged on a per-request [`ChangeSet`] and only
//! become durable when [`CityRepository::commit`] persists the whole set in
//! a single transaction. Dropping an uncommitted `ChangeSet` discards it.

use async_trait::async_trait;
use pagination::{PageRequest, PaginationMetadata};

use crate::domain::{City, CityId, Error, PointOfInterest, PointOfInterestDraft, PointOfInterestId};

/// Errors raised by city repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CityRepositoryError {
    /// The store could not be reached or a connection could not be obtained.
    #[error("city store unavailable: {message}")]
    Connection {
        /// Adapter-supplied failure description.
        message: String,
    },
    /// A query or staged mutation failed during execution.
    #[error("city store query failed: {message}")]
    Query {
        /// Adapter-supplied failure description.
        message: String,
    },
    /// A staged change referenced a city that does not exist.
    #[error("city {city_id} does not exist")]
    MissingCity {
        /// Identifier the staged change referenced.
        city_id: i32,
    },
    /// A staged change referenced a point of interest that does not exist.
    #[error("point of interest {point_id} does not exist in city {city_id}")]
    MissingPointOfInterest {
        /// Identifier of the owning city.
        city_id: i32,
        /// Identifier the staged change referenced.
        point_id: i32,
    },
}

impl CityRepositoryError {
    /// Create a connection error with the given message.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Create a query error with the given message.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }

    /// Create a missing-city error for the given identifier.
    pub fn missing_city(city_id: CityId) -> Self {
        Self::MissingCity {
            city_id: city_id.value(),
        }
    }

    /// Create a missing-point error for the given identifiers.
    pub fn missing_point_of_interest(city_id: CityId, point_id: PointOfInterestId) -> Self {
        Self::MissingPointOfInterest {
            city_id: city_id.value(),
            point_id: point_id.value(),
        }
    }
}

impl From<CityRepositoryError> for Error {
    fn from(err: CityRepositoryError) -> Self {
        match &err {
            CityRepositoryError::Connection { .. } => Error::service_unavailable(err.to_string()),
            CityRepositoryError::Query { .. } => Error::internal(err.to_string()),
            CityRepositoryError::MissingCity { .. }
            | CityRepositoryError::MissingPointOfInterest { .. } => {
                Error::not_found(err.to_string())
            }
        }
    }
}

/// Normalised filter for city listings.
///
/// The exact-name filter and the substring search are trimmed on
/// construction; blank input is treated as no filter at all. The substring
/// search is case sensitive and matches name or description, mirroring the
/// store's `LIKE` semantics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CityFilter {
    name: Option<String>,
    search_query: Option<String>,
}

impl CityFilter {
    /// Build a filter, trimming whitespace and dropping blank values.
    pub fn new(name: Option<String>, search_query: Option<String>) -> Self {
        let keep = |value: Option<String>| {
            value
                .map(|v| v.trim().to_owned())
                .filter(|v| !v.is_empty())
        };
        Self {
            name: keep(name),
            search_query: keep(search_query),
        }
    }

    /// Exact-name filter, if any.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Substring search over name or description, if any.
    pub fn search_query(&self) -> Option<&str> {
        self.search_query.as_deref()
    }
}

/// A single staged mutation awaiting commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StagedChange {
    /// Attach a new point of interest to a city.
    AddPointOfInterest {
        /// Owning city.
        city_id: CityId,
        /// Fields of the new point of interest.
        draft: PointOfInterestDraft,
    },
    /// Replace the mutable fields of an existing point of interest.
    UpdatePointOfInterest {
        /// Owning city.
        city_id: CityId,
        /// Point of interest to update.
        point_id: PointOfInterestId,
        /// Replacement fields.
        draft: PointOfInterestDraft,
    },
    /// Remove a point of interest from the store.
    DeletePointOfInterest {
        /// Owning city.
        city_id: CityId,
        /// Point of interest to remove.
        point_id: PointOfInterestId,
    },
}

/// Per-request unit of work holding staged mutations.
///
/// Handlers build one `ChangeSet` per request and pass it to
/// [`CityRepository::commit`]. Nothing touches the store until then.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeSet {
    changes: Vec<StagedChange>,
}

impl ChangeSet {
    /// Create an empty change set.
    pub fn new() -> Self {
        Self::default()
    }

    /// True when no mutations are staged.
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// Number of staged mutations.
    pub fn len(&self) -> usize {
        self.changes.len()
    }

    /// Stage the creation of a point of interest under `city_id`.
    ///
    /// Committing fails with [`CityRepositoryError::MissingCity`] when the
    /// city does not exist; the add is never silently dropped.
    pub fn add_point_of_interest(&mut self, city_id: CityId, draft: PointOfInterestDraft) {
        self.changes
            .push(StagedChange::AddPointOfInterest { city_id, draft });
    }

    /// Stage a full replacement of a point of interest's mutable fields.
    pub fn update_point_of_interest(
        &mut self,
        city_id: CityId,
        point_id: PointOfInterestId,
        draft: PointOfInterestDraft,
    ) {
        self.changes.push(StagedChange::UpdatePointOfInterest {
            city_id,
            point_id,
            draft,
        });
    }

    /// Stage the removal of a point of interest.
    pub fn delete_point_of_interest(&mut self, city_id: CityId, point_id: PointOfInterestId) {
        self.changes
            .push(StagedChange::DeletePointOfInterest { city_id, point_id });
    }

    /// Consume the set, yielding the staged changes in staging order.
    pub fn into_changes(self) -> Vec<StagedChange> {
        self.changes
    }
}

/// Entities created by a committed change set, in staging order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommitOutcome {
    created: Vec<PointOfInterest>,
}

impl CommitOutcome {
    /// Build an outcome from the points created during commit.
    pub fn new(created: Vec<PointOfInterest>) -> Self {
        Self { created }
    }

    /// Points of interest created by the commit, with store-assigned ids.
    pub fn created(&self) -> &[PointOfInterest] {
        &self.created
    }
}

/// Domain port for city and point-of-interest storage.
///
/// Queries never mutate; not-found is `Ok(None)` or an empty list, not an
/// error. All methods may suspend on store I/O.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CityRepository: Send + Sync {
    /// List cities matching `filter`, sorted by name ascending and sliced to
    /// `page`. The metadata counts matches before slicing.
    async fn list_cities(
        &self,
        filter: &CityFilter,
        page: PageRequest,
    ) -> Result<(Vec<City>, PaginationMetadata), CityRepositoryError>;

    /// Fetch a city by id. The points-of-interest collection is loaded only
    /// when `include_points_of_interest` is set; the default load is shallow.
    async fn find_city(
        &self,
        city_id: CityId,
        include_points_of_interest: bool,
    ) -> Result<Option<City>, CityRepositoryError>;

    /// Check whether a city exists without loading it.
    async fn city_exists(&self, city_id: CityId) -> Result<bool, CityRepositoryError>;

    /// Fetch a point of interest scoped to its owning city. Absent when
    /// either the point or the parent city does not exist.
    async fn find_point_of_interest(
        &self,
        city_id: CityId,
        point_id: PointOfInterestId,
    ) -> Result<Option<PointOfInterest>, CityRepositoryError>;

    /// List a city's points of interest ordered by id ascending. Empty when
    /// the city has none or does not exist; callers that need to distinguish
    /// should probe [`CityRepository::city_exists`] first.
    async fn list_points_of_interest(
        &self,
        city_id: CityId,
    ) -> Result<Vec<PointOfInterest>, CityRepositoryError>;

    /// Persist all staged changes atomically. Either every change applies or
    /// none do; failures surface to the caller unmodified.
    async fn commit(&self, changes: ChangeSet) -> Result<CommitOutcome, CityRepositoryError>;
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::Name;
    use rstest::rstest;

    #[rstest]
    #[case(Some("  Antwerp  ".into()), Some("Antwerp"))]
    #[case(Some("   ".into()), None)]
    #[case(None, None)]
    fn filter_trims_and_drops_blank_values(
        #[case] input: Option<String>,
        #[case] expected: Option<&str>,
    ) {
        let filter = CityFilter::new(input, None);
        assert_eq!(filter.name(), expected);
    }

    #[rstest]
    fn change_set_preserves_staging_order() {
        let mut changes = ChangeSet::new();
        let city = CityId::new(1);
        let draft = PointOfInterestDraft::new(Name::new("Central Park").expect("valid"), None);
        changes.add_point_of_interest(city, draft.clone());
        changes.delete_point_of_interest(city, PointOfInterestId::new(2));

        assert_eq!(changes.len(), 2);
        let staged = changes.into_changes();
        assert!(matches!(
            staged.first(),
            Some(StagedChange::AddPointOfInterest { .. })
        ));
        assert!(matches!(
            staged.last(),
            Some(StagedChange::DeletePointOfInterest { .. })
        ));
    }

    #[rstest]
    fn connection_errors_map_to_service_unavailable() {
        let err: Error = CityRepositoryError::connection("refused").into();
        assert_eq!(err.code(), crate::domain::ErrorCode::ServiceUnavailable);
    }

    #[rstest]
    fn missing_entities_map_to_not_found() {
        let err: Error = CityRepositoryError::missing_city(CityId::new(9)).into();
        assert_eq!(err.code(), crate::domain::ErrorCode::NotFound);

        let err: Error = CityRepositoryError::missing_point_of_interest(
            CityId::new(9),
            PointOfInterestId::new(3),
        )
        .into();
        assert_eq!(err.code(), crate::domain::ErrorCode::NotFound);
    }
}
