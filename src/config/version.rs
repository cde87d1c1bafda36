//! Seller Center API version definitions.
//!
//! This module provides the [`ApiVersion`] enum for specifying which version
//! of the Seller Center API a request targets.

use crate::error::ConfigError;
use std::fmt;
use std::str::FromStr;

/// Seller Center API version.
///
/// Every request carries its version in the `Version` query parameter.
/// Version `1.0` is the default and the one all bundled endpoints use.
///
/// # Example
///
/// ```rust
/// use seller_center::ApiVersion;
///
/// let version: ApiVersion = "2.0".parse().unwrap();
/// assert_eq!(version, ApiVersion::V2);
/// assert_eq!(ApiVersion::default().to_string(), "1.0");
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ApiVersion {
    /// API version 1.0
    #[default]
    V1,
    /// API version 2.0
    V2,
}

impl ApiVersion {
    /// Returns the wire representation of this version.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::V1 => "1.0",
            Self::V2 => "2.0",
        }
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApiVersion {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1.0" | "1" => Ok(Self::V1),
            "2.0" | "2" => Ok(Self::V2),
            other => Err(ConfigError::InvalidApiVersion {
                version: other.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_version_display() {
        assert_eq!(ApiVersion::V1.to_string(), "1.0");
        assert_eq!(ApiVersion::V2.to_string(), "2.0");
    }

    #[test]
    fn test_api_version_parses_known_versions() {
        assert_eq!("1.0".parse::<ApiVersion>().unwrap(), ApiVersion::V1);
        assert_eq!(" 2.0 ".parse::<ApiVersion>().unwrap(), ApiVersion::V2);
        assert_eq!("2".parse::<ApiVersion>().unwrap(), ApiVersion::V2);
    }

    #[test]
    fn test_api_version_rejects_invalid() {
        let result = "3.0".parse::<ApiVersion>();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidApiVersion { ref version }) if version == "3.0"
        ));
        assert!("".parse::<ApiVersion>().is_err());
    }

    #[test]
    fn test_api_version_defaults_to_v1() {
        assert_eq!(ApiVersion::default(), ApiVersion::V1);
        assert!(ApiVersion::V1 < ApiVersion::V2);
    }
}
