//! Authentication handling for GitHub API.

use secrecy::{ExposeSecret, SecretString};

use crate::error::{Error, Result};

/// Authentication method for GitHub API.
#[derive(Debug)]
pub enum Auth {
    /// Use token from environment variable.
    EnvVar(String),

    /// Use a specific token.
    Token(SecretString),

    /// Send requests without an `Authorization` header.
    Anonymous,
}

impl Auth {
    /// Create auth from the first available method.
    ///
    /// Uses `GITHUB_TOKEN` when set, anonymous access otherwise.
    #[must_use]
    pub fn auto() -> Self {
        if std::env::var("GITHUB_TOKEN").is_ok() {
            Self::EnvVar("GITHUB_TOKEN".into())
        } else {
            Self::Anonymous
        }
    }

    /// Resolve the authentication to a token, if any.
    ///
    /// # Errors
    /// Returns error if the environment variable is not set or empty.
    pub fn resolve(&self) -> Result<Option<SecretString>> {
        match self {
            Self::EnvVar(var) => match std::env::var(var) {
                Ok(token) if !token.trim().is_empty() => Ok(Some(SecretString::from(token))),
                _ => Err(Error::NoToken),
            },
            Self::Token(token) => Ok(Some(SecretString::from(
                token.expose_secret().to_owned(),
            ))),
            Self::Anonymous => Ok(None),
        }
    }
}

impl Default for Auth {
    fn default() -> Self {
        Self::auto()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_auto_follows_env() {
        let auth = Auth::auto();

        if std::env::var("GITHUB_TOKEN").is_ok() {
            assert!(matches!(auth, Auth::EnvVar(ref var) if var == "GITHUB_TOKEN"));
        } else {
            assert!(matches!(auth, Auth::Anonymous));
            assert!(auth.resolve().unwrap().is_none());
        }
    }

    #[test]
    fn test_token_auth() {
        let auth = Auth::Token(SecretString::from("test_token"));
        let token = auth.resolve().unwrap().unwrap();
        assert_eq!(token.expose_secret(), "test_token");
    }

    #[test]
    fn test_anonymous_auth() {
        assert!(Auth::Anonymous.resolve().unwrap().is_none());
    }

    #[test]
    fn test_missing_env_var() {
        let auth = Auth::EnvVar("HUBWIRE_TEST_TOKEN_THAT_IS_NEVER_SET".into());
        assert!(matches!(auth.resolve(), Err(Error::NoToken)));
    }
}
