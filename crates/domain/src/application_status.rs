// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Application status tracking.
//!
//! Status transitions are decided by the owning company or by staff; the
//! system never advances an application on its own.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Decision status of a single application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApplicationStatus {
    /// No decision has been made yet
    Pending,
    /// The company accepted the applicant
    Accepted,
    /// The company turned the applicant down
    Refused,
}

impl ApplicationStatus {
    /// Returns the string representation of the status.
    ///
    /// This is used for persistence and API serialization.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Accepted => "Accepted",
            Self::Refused => "Refused",
        }
    }

    /// Parses a status from its string representation.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidApplicationStatus` if the string is not
    /// a valid status.
    fn parse_str(s: &str) -> Result<Self, DomainError> {
        match s {
            "Pending" => Ok(Self::Pending),
            "Accepted" => Ok(Self::Accepted),
            "Refused" => Ok(Self::Refused),
            _ => Err(DomainError::InvalidApplicationStatus(s.to_string())),
        }
    }

    /// Returns true if this status represents a company decision.
    ///
    /// Only decided statuses trigger a notification to the applicant;
    /// reverting to `Pending` is silent.
    #[must_use]
    pub const fn is_decided(&self) -> bool {
        matches!(self, Self::Accepted | Self::Refused)
    }
}

impl FromStr for ApplicationStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_string_round_trip() {
        let statuses = vec![
            ApplicationStatus::Pending,
            ApplicationStatus::Accepted,
            ApplicationStatus::Refused,
        ];

        for status in statuses {
            let s = status.as_str();
            match ApplicationStatus::parse_str(s) {
                Ok(parsed) => assert_eq!(status, parsed),
                Err(e) => panic!("Failed to parse status string: {s}: {e}"),
            }
        }
    }

    #[test]
    fn test_invalid_status_string() {
        assert!(ApplicationStatus::parse_str("Waitlisted").is_err());
        assert!(ApplicationStatus::parse_str("pending").is_err());
        assert!(ApplicationStatus::parse_str("").is_err());
    }

    #[test]
    fn test_decided_statuses() {
        assert!(!ApplicationStatus::Pending.is_decided());
        assert!(ApplicationStatus::Accepted.is_decided());
        assert!(ApplicationStatus::Refused.is_decided());
    }
}
