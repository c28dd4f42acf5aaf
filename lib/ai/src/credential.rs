//! The generation service credential.
//!
//! Presence of a usable credential is what decides whether the resolver
//! may call out at all.

use secrecy::{ExposeSecret, SecretString};
use std::fmt;

/// Value shipped in sample environment files; never a real key.
pub const PLACEHOLDER_API_KEY: &str = "your-openai-api-key";

/// A bearer token for the generation service.
#[derive(Clone)]
pub struct ApiCredential(SecretString);

impl ApiCredential {
    /// Accepts a raw configured value.
    ///
    /// Returns `None` when the value is missing, blank, or still the
    /// placeholder.
    #[must_use]
    pub fn parse(raw: Option<&str>) -> Option<Self> {
        let key = raw?.trim();
        if key.is_empty() || key == PLACEHOLDER_API_KEY {
            return None;
        }
        Some(Self(SecretString::from(key.to_string())))
    }

    /// Returns the secret for use in an authorization header.
    pub(crate) fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl fmt::Debug for ApiCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiCredential(***)")
    }
}
