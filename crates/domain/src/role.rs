// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Account roles.
//!
//! Every account carries exactly one role, assigned at registration and
//! changed only by an administrator. Authorization decisions are made from
//! this single field; there is no group-membership resolution.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The single role attached to an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    /// Browses validated offers, applies, bookmarks
    Student,
    /// Submits offers and decides on applications to its own offers
    Company,
    /// Reviews submitted offers (validate/refuse), reads statistics
    Manager,
    /// Full structural and corrective authority
    Admin,
}

impl Role {
    /// Returns the string representation of the role.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Student => "Student",
            Self::Company => "Company",
            Self::Manager => "Manager",
            Self::Admin => "Admin",
        }
    }

    /// Parses a role from its string representation.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidRole` if the string is not a valid role.
    fn parse_str(s: &str) -> Result<Self, DomainError> {
        match s {
            "Student" => Ok(Self::Student),
            "Company" => Ok(Self::Company),
            "Manager" => Ok(Self::Manager),
            "Admin" => Ok(Self::Admin),
            _ => Err(DomainError::InvalidRole(s.to_string())),
        }
    }

    /// Returns true if this role carries staff review authority.
    ///
    /// Managers and admins may validate and refuse offers and see every
    /// application.
    #[must_use]
    pub const fn is_staff(&self) -> bool {
        matches!(self, Self::Manager | Self::Admin)
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}
