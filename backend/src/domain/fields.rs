//! Validated text fields shared by cities and points of interest.
//!
//! Both entities carry a required name and an optional description with the
//! same length bounds, so the newtypes live here rather than per entity.

use std::fmt;

/// Maximum length of an entity name, in characters.
pub const NAME_MAX: usize = 50;
/// Maximum length of an entity description, in characters.
pub const DESCRIPTION_MAX: usize = 200;

/// Validation errors raised by the field constructors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldValidationError {
    /// The name was empty once trimmed of whitespace.
    #[error("name must not be empty")]
    EmptyName,
    /// The name exceeded the maximum length.
    #[error("name must be at most {max} characters")]
    NameTooLong {
        /// Maximum allowed length.
        max: usize,
    },
    /// The description exceeded the maximum length.
    #[error("description must be at most {max} characters")]
    DescriptionTooLong {
        /// Maximum allowed length.
        max: usize,
    },
}

/// Required entity name: non-empty once trimmed, at most [`NAME_MAX`] chars.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Name(String);

impl Name {
    /// Validate and construct a [`Name`].
    pub fn new(name: impl Into<String>) -> Result<Self, FieldValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(FieldValidationError::EmptyName);
        }
        if name.chars().count() > NAME_MAX {
            return Err(FieldValidationError::NameTooLong { max: NAME_MAX });
        }
        Ok(Self(name))
    }

    /// Borrow the validated text.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for Name {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Name> for String {
    fn from(value: Name) -> Self {
        value.0
    }
}

/// Optional entity description: at most [`DESCRIPTION_MAX`] chars.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Description(String);

impl Description {
    /// Validate and construct a [`Description`].
    pub fn new(description: impl Into<String>) -> Result<Self, FieldValidationError> {
        let description = description.into();
        if description.chars().count() > DESCRIPTION_MAX {
            return Err(FieldValidationError::DescriptionTooLong {
                max: DESCRIPTION_MAX,
            });
        }
        Ok(Self(description))
    }

    /// Borrow the validated text.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for Description {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Description {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Description> for String {
    fn from(value: Description) -> Self {
        value.0
    }
}
