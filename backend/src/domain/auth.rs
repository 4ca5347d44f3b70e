//! Authentication primitives: credentials and the authenticated profile.

use std::fmt;

/// Validation errors raised by [`LoginCredentials::try_from_parts`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoginValidationError {
    /// The username was empty once trimmed.
    #[error("username must not be empty")]
    EmptyUsername,
    /// The password was empty.
    #[error("password must not be empty")]
    EmptyPassword,
}

/// Well-formed username/password pair.
///
/// Well-formed means non-empty; whether the pair identifies anyone is the
/// login service's concern.
#[derive(Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: String,
    password: String,
}

impl LoginCredentials {
    /// Validate and construct credentials from borrowed parts.
    pub fn try_from_parts(
        username: &str,
        password: &str,
    ) -> Result<Self, LoginValidationError> {
        if username.trim().is_empty() {
            return Err(LoginValidationError::EmptyUsername);
        }
        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }
        Ok(Self {
            username: username.to_owned(),
            password: password.to_owned(),
        })
    }

    /// Supplied username.
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Supplied password.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

// Keep passwords out of debug output.
impl fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Identity attributes of an authenticated user, embedded in issued tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    /// Stable numeric user identifier.
    pub user_id: i32,
    /// Given name claim.
    pub given_name: String,
    /// Family name claim.
    pub family_name: String,
    /// Tenant city claim.
    pub city: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("  ", "secret", LoginValidationError::EmptyUsername)]
    #[case("ada", "", LoginValidationError::EmptyPassword)]
    fn malformed_credentials_are_rejected(
        #[case] username: &str,
        #[case] password: &str,
        #[case] expected: LoginValidationError,
    ) {
        assert_eq!(
            LoginCredentials::try_from_parts(username, password),
            Err(expected)
        );
    }

    #[rstest]
    fn debug_output_redacts_the_password() {
        let creds = LoginCredentials::try_from_parts("ada", "secret").expect("valid");
        let rendered = format!("{creds:?}");
        assert!(rendered.contains("<redacted>"));
        assert!(!rendered.contains("secret"));
    }
}
