//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. They exist solely to satisfy Diesel's
//! type requirements for queries and mutations.

use diesel::prelude::*;

use super::schema::{cities, points_of_interest};

/// Row struct for reading from the cities table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = cities)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CityRow {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
}

/// Row struct for reading from the points_of_interest table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = points_of_interest)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct PointOfInterestRow {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub city_id: i32,
}

/// Insertable struct for creating new point-of-interest records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = points_of_interest)]
pub(crate) struct NewPointOfInterestRow<'a> {
    pub name: &'a str,
    pub description: Option<&'a str>,
    pub city_id: i32,
}

/// Changeset struct for replacing a point of interest's mutable fields.
///
/// `treat_none_as_null` makes a `None` description clear the column instead
/// of skipping it; updates are full replacements, not merges.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = points_of_interest)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct PointOfInterestChanges<'a> {
    pub name: &'a str,
    pub description: Option<&'a str>,
}
