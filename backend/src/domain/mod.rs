//! Domain entities, validation newtypes, and ports.
//!
//! Purpose: define the strongly typed core shared by the HTTP and
//! persistence adapters. Types are immutable once constructed; invariants
//! live in the constructors and are documented per type.

pub mod auth;
pub mod city;
pub mod error;
pub mod fields;
pub mod point_of_interest;
pub mod ports;

pub use self::auth::{LoginCredentials, LoginValidationError, UserProfile};
pub use self::city::{City, CityId};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::fields::{DESCRIPTION_MAX, Description, FieldValidationError, NAME_MAX, Name};
pub use self::point_of_interest::{PointOfInterest, PointOfInterestDraft, PointOfInterestId};

/// Convenient result alias for domain operations.
pub type ApiResult<T> = Result<T, Error>;
