//! Status enums for licenses.

use serde::{Deserialize, Serialize};

/// Listing status of a license in the remote catalog.
///
/// The remote API models this as an `is_active` flag; the enum exists for
/// display and filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LicenseStatus {
    #[default]
    Active,
    Inactive,
}

impl LicenseStatus {
    /// Status for an `is_active` flag.
    #[must_use]
    pub const fn from_active(is_active: bool) -> Self {
        if is_active { Self::Active } else { Self::Inactive }
    }

    /// Whether the license is listed in the storefront.
    #[must_use]
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Active)
    }
}

impl std::fmt::Display for LicenseStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Active => write!(f, "active"),
            Self::Inactive => write!(f, "inactive"),
        }
    }
}

impl std::str::FromStr for LicenseStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "inactive" => Ok(Self::Inactive),
            _ => Err(format!("invalid license status: {s}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trips_through_str() {
        for status in [LicenseStatus::Active, LicenseStatus::Inactive] {
            assert_eq!(status.to_string().parse::<LicenseStatus>(), Ok(status));
        }
        assert!("archived".parse::<LicenseStatus>().is_err());
    }

    #[test]
    fn test_from_active() {
        assert!(LicenseStatus::from_active(true).is_active());
        assert!(!LicenseStatus::from_active(false).is_active());
    }
}
