//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the database migrations exactly; Diesel uses
//! them for compile-time query validation and type-safe SQL generation.

diesel::table! {
    /// Cities table.
    ///
    /// The `id` column is a store-assigned serial primary key.
    cities (id) {
        /// Primary key.
        id -> Int4,
        /// Required city name (max 50 characters).
        #[max_length = 50]
        name -> Varchar,
        /// Optional description (max 200 characters).
        #[max_length = 200]
        description -> Nullable<Varchar>,
    }
}

diesel::table! {
    /// Points-of-interest table; each row belongs to exactly one city.
    ///
    /// The foreign key cascades deletes from the owning city.
    points_of_interest (id) {
        /// Primary key.
        id -> Int4,
        /// Required point-of-interest name (max 50 characters).
        #[max_length = 50]
        name -> Varchar,
        /// Optional description (max 200 characters).
        #[max_length = 200]
        description -> Nullable<Varchar>,
        /// Owning city.
        city_id -> Int4,
    }
}

diesel::joinable!(points_of_interest -> cities (city_id));
diesel::allow_tables_to_appear_in_same_query!(cities, points_of_interest);
