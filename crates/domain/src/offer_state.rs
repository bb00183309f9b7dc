// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Offer state tracking and transition logic.
//!
//! This module defines the offer validation workflow states and the
//! transitions the workflow permits. State is only ever written through
//! the lifecycle engine; nothing else mutates an offer's state or its
//! closing reason.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Offer states tracking progress through the validation workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OfferState {
    /// Offer has been submitted and awaits staff review
    PendingValidation,
    /// Offer was approved and is visible to students
    Validated,
    /// Offer was rejected by staff
    Refused,
    /// Offer no longer accepts applications
    Closed,
}

impl OfferState {
    /// Returns the string representation of the state.
    ///
    /// This is used for persistence and API serialization.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::PendingValidation => "PendingValidation",
            Self::Validated => "Validated",
            Self::Refused => "Refused",
            Self::Closed => "Closed",
        }
    }

    /// Parses a state from its string representation.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidOfferState` if the string is not a valid state.
    fn parse_str(s: &str) -> Result<Self, DomainError> {
        match s {
            "PendingValidation" => Ok(Self::PendingValidation),
            "Validated" => Ok(Self::Validated),
            "Refused" => Ok(Self::Refused),
            "Closed" => Ok(Self::Closed),
            _ => Err(DomainError::InvalidOfferState(s.to_string())),
        }
    }

    /// Returns true if students may apply to an offer in this state.
    #[must_use]
    pub const fn accepts_applications(&self) -> bool {
        matches!(self, Self::Validated)
    }

    /// Validates if a workflow transition from this state to another is permitted.
    ///
    /// Admin free moves bypass this table; the workflow paths (validate,
    /// refuse, close, reopen) do not.
    ///
    /// # Errors
    ///
    /// Returns an error if the transition is not allowed.
    pub fn validate_transition(&self, new_state: Self) -> Result<(), DomainError> {
        let valid = match self {
            Self::PendingValidation => matches!(new_state, Self::Validated | Self::Refused),
            Self::Validated => matches!(new_state, Self::Closed),
            Self::Closed => matches!(new_state, Self::Validated),
            // Refused offers stay refused; resubmission creates a new offer
            Self::Refused => false,
        };

        if valid {
            Ok(())
        } else {
            Err(DomainError::InvalidOfferTransition {
                from: self.as_str().to_string(),
                to: new_state.as_str().to_string(),
                reason: "transition not permitted by offer lifecycle rules".to_string(),
            })
        }
    }
}

impl FromStr for OfferState {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}
