//! PostgreSQL-backed `CityRepository` implementation using Diesel ORM.
//!
//! Queries translate directly into SQL; staged change sets are replayed
//! inside a single transaction so a commit is all-or-nothing. The substring
//! search uses a case-sensitive `LIKE` over name and description with the
//! pattern metacharacters escaped.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt as _;
use diesel_async::{AsyncConnection, RunQueryDsl};
use pagination::{PageRequest, PaginationMetadata};
use tracing::debug;

use crate::domain::ports::{
    ChangeSet, CityFilter, CityRepository, CityRepositoryError, CommitOutcome, StagedChange,
};
use crate::domain::{
    City, CityId, Description, Name, PointOfInterest, PointOfInterestId,
};

use super::models::{CityRow, NewPointOfInterestRow, PointOfInterestChanges, PointOfInterestRow};
use super::pool::{DbPool, PoolError};
use super::schema::{cities, points_of_interest};

/// Diesel-backed implementation of the `CityRepository` port.
#[derive(Clone)]
pub struct DieselCityRepository {
    pool: DbPool,
}

impl DieselCityRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Map pool errors to repository errors.
fn map_pool_error(error: PoolError) -> CityRepositoryError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            CityRepositoryError::connection(message)
        }
    }
}

/// Map Diesel errors to repository errors.
fn map_diesel_error(error: diesel::result::Error) -> CityRepositoryError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            CityRepositoryError::connection("database connection error")
        }
        DieselError::NotFound => CityRepositoryError::query("record not found"),
        _ => CityRepositoryError::query("database error"),
    }
}

/// Escape `LIKE` metacharacters and wrap the term for substring matching.
fn like_pattern(search: &str) -> String {
    let escaped = search
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

fn row_to_city(row: CityRow) -> Result<City, CityRepositoryError> {
    let CityRow {
        id,
        name,
        description,
    } = row;
    let name = Name::new(name)
        .map_err(|err| CityRepositoryError::query(format!("invalid city row {id}: {err}")))?;
    let description = description
        .map(Description::new)
        .transpose()
        .map_err(|err| CityRepositoryError::query(format!("invalid city row {id}: {err}")))?;
    Ok(City::new(CityId::new(id), name, description))
}

fn row_to_point(row: PointOfInterestRow) -> Result<PointOfInterest, CityRepositoryError> {
    let PointOfInterestRow {
        id,
        name,
        description,
        city_id,
    } = row;
    let name = Name::new(name).map_err(|err| {
        CityRepositoryError::query(format!("invalid point-of-interest row {id}: {err}"))
    })?;
    let description = description.map(Description::new).transpose().map_err(|err| {
        CityRepositoryError::query(format!("invalid point-of-interest row {id}: {err}"))
    })?;
    Ok(PointOfInterest::new(
        PointOfInterestId::new(id),
        CityId::new(city_id),
        name,
        description,
    ))
}

/// Count matches and load one page, name ascending with id as tiebreak.
///
/// The four filter combinations are written out so each arm keeps a fully
/// static query type; the count always runs before the slice.
async fn query_cities_page<C>(
    conn: &mut C,
    filter: &CityFilter,
    page: PageRequest,
) -> Result<(i64, Vec<CityRow>), diesel::result::Error>
where
    C: AsyncConnection<Backend = diesel::pg::Pg> + Send,
{
    match (filter.name(), filter.search_query()) {
        (Some(name), Some(search)) => {
            let pattern = like_pattern(search);
            let query = cities::table
                .filter(cities::name.eq(name.to_owned()))
                .filter(
                    cities::name
                        .like(pattern.clone())
                        .nullable()
                        .or(cities::description.like(pattern)),
                );
            let total: i64 = query.clone().count().get_result(conn).await?;
            let rows = query
                .order(cities::name.asc())
                .then_order_by(cities::id.asc())
                .offset(page.offset())
                .limit(page.limit())
                .load::<CityRow>(conn)
                .await?;
            Ok((total, rows))
        }
        (Some(name), None) => {
            let query = cities::table.filter(cities::name.eq(name.to_owned()));
            let total: i64 = query.clone().count().get_result(conn).await?;
            let rows = query
                .order(cities::name.asc())
                .then_order_by(cities::id.asc())
                .offset(page.offset())
                .limit(page.limit())
                .load::<CityRow>(conn)
                .await?;
            Ok((total, rows))
        }
        (None, Some(search)) => {
            let pattern = like_pattern(search);
            let query = cities::table.filter(
                cities::name
                    .like(pattern.clone())
                    .nullable()
                    .or(cities::description.like(pattern)),
            );
            let total: i64 = query.clone().count().get_result(conn).await?;
            let rows = query
                .order(cities::name.asc())
                .then_order_by(cities::id.asc())
                .offset(page.offset())
                .limit(page.limit())
                .load::<CityRow>(conn)
                .await?;
            Ok((total, rows))
        }
        (None, None) => {
            let total: i64 = cities::table.count().get_result(conn).await?;
            let rows = cities::table
                .order(cities::name.asc())
                .then_order_by(cities::id.asc())
                .offset(page.offset())
                .limit(page.limit())
                .load::<CityRow>(conn)
                .await?;
            Ok((total, rows))
        }
    }
}

/// Transaction-internal error: either a store failure or a staged change
/// referencing a row that no longer exists.
enum CommitError {
    Diesel(diesel::result::Error),
    Stale(CityRepositoryError),
}

impl From<diesel::result::Error> for CommitError {
    fn from(err: diesel::result::Error) -> Self {
        Self::Diesel(err)
    }
}

async fn apply_staged_change<C>(
    conn: &mut C,
    change: StagedChange,
    created: &mut Vec<PointOfInterestRow>,
) -> Result<(), CommitError>
where
    C: AsyncConnection<Backend = diesel::pg::Pg> + Send,
{
    match change {
        StagedChange::AddPointOfInterest { city_id, draft } => {
            let city_present: bool = diesel::select(diesel::dsl::exists(
                cities::table.filter(cities::id.eq(city_id.value())),
            ))
            .get_result(conn)
            .await?;
            if !city_present {
                return Err(CommitError::Stale(CityRepositoryError::missing_city(
                    city_id,
                )));
            }

            let row: PointOfInterestRow = diesel::insert_into(points_of_interest::table)
                .values(NewPointOfInterestRow {
                    name: draft.name.as_str(),
                    description: draft.description.as_ref().map(Description::as_str),
                    city_id: city_id.value(),
                })
                .returning(PointOfInterestRow::as_returning())
                .get_result(conn)
                .await?;
            created.push(row);
            Ok(())
        }
        StagedChange::UpdatePointOfInterest {
            city_id,
            point_id,
            draft,
        } => {
            let updated = diesel::update(
                points_of_interest::table.filter(
                    points_of_interest::id
                        .eq(point_id.value())
                        .and(points_of_interest::city_id.eq(city_id.value())),
                ),
            )
            .set(PointOfInterestChanges {
                name: draft.name.as_str(),
                description: draft.description.as_ref().map(Description::as_str),
            })
            .execute(conn)
            .await?;
            if updated == 0 {
                return Err(CommitError::Stale(
                    CityRepositoryError::missing_point_of_interest(city_id, point_id),
                ));
            }
            Ok(())
        }
        StagedChange::DeletePointOfInterest { city_id, point_id } => {
            let deleted = diesel::delete(
                points_of_interest::table.filter(
                    points_of_interest::id
                        .eq(point_id.value())
                        .and(points_of_interest::city_id.eq(city_id.value())),
                ),
            )
            .execute(conn)
            .await?;
            if deleted == 0 {
                return Err(CommitError::Stale(
                    CityRepositoryError::missing_point_of_interest(city_id, point_id),
                ));
            }
            Ok(())
        }
    }
}

#[async_trait]
impl CityRepository for DieselCityRepository {
    async fn list_cities(
        &self,
        filter: &CityFilter,
        page: PageRequest,
    ) -> Result<(Vec<City>, PaginationMetadata), CityRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let (total, rows) = query_cities_page(&mut conn, filter, page)
            .await
            .map_err(map_diesel_error)?;

        let metadata =
            PaginationMetadata::for_page(u64::try_from(total).unwrap_or_default(), &page);
        let cities = rows
            .into_iter()
            .map(row_to_city)
            .collect::<Result<Vec<_>, _>>()?;
        Ok((cities, metadata))
    }

    async fn find_city(
        &self,
        city_id: CityId,
        include_points_of_interest: bool,
    ) -> Result<Option<City>, CityRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<CityRow> = cities::table
            .filter(cities::id.eq(city_id.value()))
            .select(CityRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        let Some(row) = row else {
            return Ok(None);
        };
        let city = row_to_city(row)?;

        if !include_points_of_interest {
            return Ok(Some(city));
        }

        let point_rows: Vec<PointOfInterestRow> = points_of_interest::table
            .filter(points_of_interest::city_id.eq(city_id.value()))
            .order(points_of_interest::id.asc())
            .select(PointOfInterestRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        let points = point_rows
            .into_iter()
            .map(row_to_point)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Some(city.with_points_of_interest(points)))
    }

    async fn city_exists(&self, city_id: CityId) -> Result<bool, CityRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::select(diesel::dsl::exists(
            cities::table.filter(cities::id.eq(city_id.value())),
        ))
        .get_result(&mut conn)
        .await
        .map_err(map_diesel_error)
    }

    async fn find_point_of_interest(
        &self,
        city_id: CityId,
        point_id: PointOfInterestId,
    ) -> Result<Option<PointOfInterest>, CityRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<PointOfInterestRow> = points_of_interest::table
            .filter(
                points_of_interest::id
                    .eq(point_id.value())
                    .and(points_of_interest::city_id.eq(city_id.value())),
            )
            .select(PointOfInterestRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_point).transpose()
    }

    async fn list_points_of_interest(
        &self,
        city_id: CityId,
    ) -> Result<Vec<PointOfInterest>, CityRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<PointOfInterestRow> = points_of_interest::table
            .filter(points_of_interest::city_id.eq(city_id.value()))
            .order(points_of_interest::id.asc())
            .select(PointOfInterestRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_point).collect()
    }

    async fn commit(&self, changes: ChangeSet) -> Result<CommitOutcome, CityRepositoryError> {
        if changes.is_empty() {
            return Ok(CommitOutcome::default());
        }

        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let staged = changes.into_changes();

        let created_rows = conn
            .transaction::<Vec<PointOfInterestRow>, CommitError, _>(|conn| {
                async move {
                    let mut created = Vec::new();
                    for change in staged {
                        apply_staged_change(conn, change, &mut created).await?;
                    }
                    Ok(created)
                }
                .scope_boxed()
            })
            .await
            .map_err(|err| match err {
                CommitError::Stale(stale) => stale,
                CommitError::Diesel(diesel_err) => map_diesel_error(diesel_err),
            })?;

        let created = created_rows
            .into_iter()
            .map(row_to_point)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(CommitOutcome::new(created))
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn pool_errors_map_to_connection_errors() {
        let err = map_pool_error(PoolError::checkout("connection refused"));
        assert!(matches!(err, CityRepositoryError::Connection { .. }));
        assert!(err.to_string().contains("connection refused"));
    }

    #[rstest]
    fn not_found_maps_to_query_error() {
        let err = map_diesel_error(diesel::result::Error::NotFound);
        assert!(matches!(err, CityRepositoryError::Query { .. }));
        assert!(err.to_string().contains("record not found"));
    }

    #[rstest]
    #[case("Antwerp", "%Antwerp%")]
    #[case("50%", "%50\\%%")]
    #[case("a_b", "%a\\_b%")]
    #[case("back\\slash", "%back\\\\slash%")]
    fn like_patterns_escape_metacharacters(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(like_pattern(input), expected);
    }

    #[rstest]
    fn rows_with_invalid_text_are_reported_as_query_errors() {
        let row = CityRow {
            id: 3,
            name: String::new(),
            description: None,
        };
        let err = row_to_city(row).expect_err("blank name is invalid");
        assert!(matches!(err, CityRepositoryError::Query { .. }));
        assert!(err.to_string().contains("invalid city row 3"));
    }

    #[rstest]
    fn valid_rows_convert_to_domain_entities() {
        let row = PointOfInterestRow {
            id: 7,
            name: "Central Park".to_owned(),
            description: Some("The most visited urban park".to_owned()),
            city_id: 1,
        };
        let point = row_to_point(row).expect("valid row");
        assert_eq!(point.id().value(), 7);
        assert_eq!(point.city_id().value(), 1);
        assert_eq!(point.name().as_str(), "Central Park");
    }
}
