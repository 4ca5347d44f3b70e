//! Point-of-interest entity.

use std::fmt;

use crate::domain::city::CityId;
use crate::domain::fields::{Description, Name};

/// Store-assigned point-of-interest identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PointOfInterestId(i32);

impl PointOfInterestId {
    /// Wrap a raw store identifier.
    pub fn new(id: i32) -> Self {
        Self(id)
    }

    /// Raw store identifier.
    pub fn value(&self) -> i32 {
        self.0
    }
}

impl fmt::Display for PointOfInterestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i32> for PointOfInterestId {
    fn from(value: i32) -> Self {
        Self(value)
    }
}

/// A named, described sub-resource owned by exactly one city.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PointOfInterest {
    id: PointOfInterestId,
    city_id: CityId,
    name: Name,
    description: Option<Description>,
}

impl PointOfInterest {
    /// Build a point of interest from validated components.
    pub fn new(
        id: PointOfInterestId,
        city_id: CityId,
        name: Name,
        description: Option<Description>,
    ) -> Self {
        Self {
            id,
            city_id,
            name,
            description,
        }
    }

    /// Store-assigned identifier.
    pub fn id(&self) -> PointOfInterestId {
        self.id
    }

    /// Identifier of the owning city.
    pub fn city_id(&self) -> CityId {
        self.city_id
    }

    /// Point-of-interest name.
    pub fn name(&self) -> &Name {
        &self.name
    }

    /// Optional description.
    pub fn description(&self) -> Option<&Description> {
        self.description.as_ref()
    }
}

/// Caller-supplied fields for creating or replacing a point of interest.
///
/// Identifiers are store-assigned, so drafts carry only the mutable fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PointOfInterestDraft {
    /// Required name.
    pub name: Name,
    /// Optional description.
    pub description: Option<Description>,
}

impl PointOfInterestDraft {
    /// Build a draft from validated components.
    pub fn new(name: Name, description: Option<Description>) -> Self {
        Self { name, description }
    }
}
