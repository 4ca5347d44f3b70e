//! City aggregate.

use std::fmt;

use crate::domain::fields::{Description, Name};
use crate::domain::point_of_interest::PointOfInterest;

/// Store-assigned city identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CityId(i32);

impl CityId {
    /// Wrap a raw store identifier.
    pub fn new(id: i32) -> Self {
        Self(id)
    }

    /// Raw store identifier.
    pub fn value(&self) -> i32 {
        self.0
    }
}

impl fmt::Display for CityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i32> for CityId {
    fn from(value: i32) -> Self {
        Self(value)
    }
}

/// A city and, when eagerly loaded, the points of interest it owns.
///
/// ## Invariants
/// - `name` is non-empty and within the shared length bound.
/// - `points_of_interest` is empty on shallow loads; callers must request
///   eager loading explicitly to observe the collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct City {
    id: CityId,
    name: Name,
    description: Option<Description>,
    points_of_interest: Vec<PointOfInterest>,
}

impl City {
    /// Build a shallow city without its points of interest.
    pub fn new(id: CityId, name: Name, description: Option<Description>) -> Self {
        Self {
            id,
            name,
            description,
            points_of_interest: Vec::new(),
        }
    }

    /// Attach an eagerly loaded points-of-interest collection.
    pub fn with_points_of_interest(mut self, points: Vec<PointOfInterest>) -> Self {
        self.points_of_interest = points;
        self
    }

    /// Store-assigned identifier.
    pub fn id(&self) -> CityId {
        self.id
    }

    /// City name.
    pub fn name(&self) -> &Name {
        &self.name
    }

    /// Optional description.
    pub fn description(&self) -> Option<&Description> {
        self.description.as_ref()
    }

    /// Points of interest owned by this city. Empty unless eagerly loaded.
    pub fn points_of_interest(&self) -> &[PointOfInterest] {
        &self.points_of_interest
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::point_of_interest::PointOfInterestId;

    fn sample_city() -> City {
        City::new(
            CityId::new(1),
            Name::new("Antwerp").expect("valid name"),
            Some(Description::new("The one with the unfinished cathedral").expect("valid")),
        )
    }

    #[test]
    fn shallow_city_has_no_points_of_interest() {
        assert!(sample_city().points_of_interest().is_empty());
    }

    #[test]
    fn eager_load_attaches_the_collection() {
        let point = PointOfInterest::new(
            PointOfInterestId::new(7),
            CityId::new(1),
            Name::new("Antwerp Central Station").expect("valid"),
            None,
        );
        let city = sample_city().with_points_of_interest(vec![point.clone()]);
        assert_eq!(city.points_of_interest(), &[point]);
    }
}
