// ABOUTME: OAuth2 credential supplier definitions
// ABOUTME: Google, Facebook, GitHub and LinkedIn plus the local (non-OAuth2) account marker

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::OAuth2Error;

/// Supported OAuth2 credential suppliers. `Local` tags accounts registered
/// without an external supplier and has no user-info adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OAuth2Supplier {
    Google,
    Facebook,
    Github,
    LinkedIn,
    Local,
}

impl OAuth2Supplier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Google => "google",
            Self::Facebook => "facebook",
            Self::Github => "github",
            Self::LinkedIn => "linkedin",
            Self::Local => "local",
        }
    }

    /// All suppliers, external ones first.
    pub fn all() -> Vec<Self> {
        vec![Self::Google, Self::Facebook, Self::Github, Self::LinkedIn, Self::Local]
    }
}

impl fmt::Display for OAuth2Supplier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for OAuth2Supplier {
    type Err = OAuth2Error;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.to_ascii_lowercase().as_str() {
            "google" => Ok(Self::Google),
            "facebook" => Ok(Self::Facebook),
            "github" => Ok(Self::Github),
            "linkedin" => Ok(Self::LinkedIn),
            "local" => Ok(Self::Local),
            _ => {
                tracing::error!(supplier = raw, "passed value is not a valid credentials supplier name");
                Err(OAuth2Error::UnsupportedSupplier(raw.to_string()))
            }
        }
    }
}
