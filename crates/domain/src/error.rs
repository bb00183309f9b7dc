// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::types::APPLICATION_CAPACITY;

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Offer does not exist.
    OfferNotFound(i64),
    /// Application does not exist.
    ApplicationNotFound(i64),
    /// Account does not exist.
    AccountNotFound(i64),
    /// A student already applied to this offer.
    DuplicateApplication {
        /// The applying student account.
        student_id: i64,
        /// The offer applied to.
        offer_id: i64,
    },
    /// Apply attempted against an offer that is not open for applications.
    OfferNotOpen {
        /// The offer.
        offer_id: i64,
        /// The offer's current state.
        state: String,
    },
    /// The offer already holds the maximum number of applications.
    CapacityExceeded {
        /// The offer.
        offer_id: i64,
    },
    /// Withdrawal attempted by someone other than the applicant.
    NotOwner {
        /// The application.
        application_id: i64,
    },
    /// Offer state string is not one of the enumerated states.
    InvalidOfferState(String),
    /// Application status string is not one of the enumerated statuses.
    InvalidApplicationStatus(String),
    /// Role string is not one of the enumerated roles.
    InvalidRole(String),
    /// The offer lifecycle does not permit this transition.
    InvalidOfferTransition {
        /// The current state.
        from: String,
        /// The requested state.
        to: String,
        /// Why the transition is rejected.
        reason: String,
    },
    /// Offer title is empty or invalid.
    InvalidTitle(String),
    /// Offer description is empty or invalid.
    InvalidDescription(String),
    /// Organization name is empty or invalid.
    InvalidOrganization(String),
    /// Contact name is empty or invalid.
    InvalidContactName(String),
    /// Contact email is empty or malformed.
    InvalidContactEmail(String),
    /// Username is empty or invalid.
    InvalidUsername(String),
    /// Username already taken.
    DuplicateUsername(String),
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OfferNotFound(id) => write!(f, "Offer {id} not found"),
            Self::ApplicationNotFound(id) => write!(f, "Application {id} not found"),
            Self::AccountNotFound(id) => write!(f, "Account {id} not found"),
            Self::DuplicateApplication {
                student_id,
                offer_id,
            } => {
                write!(
                    f,
                    "Student {student_id} has already applied to offer {offer_id}"
                )
            }
            Self::OfferNotOpen { offer_id, state } => {
                write!(
                    f,
                    "Offer {offer_id} is not open for applications (state: {state})"
                )
            }
            Self::CapacityExceeded { offer_id } => {
                write!(
                    f,
                    "Offer {offer_id} already holds {APPLICATION_CAPACITY} applications"
                )
            }
            Self::NotOwner { application_id } => {
                write!(
                    f,
                    "Application {application_id} can only be withdrawn by its applicant"
                )
            }
            Self::InvalidOfferState(s) => write!(f, "Invalid offer state: '{s}'"),
            Self::InvalidApplicationStatus(s) => {
                write!(f, "Invalid application status: '{s}'")
            }
            Self::InvalidRole(s) => write!(f, "Invalid role: '{s}'"),
            Self::InvalidOfferTransition { from, to, reason } => {
                write!(f, "Cannot transition offer from {from} to {to}: {reason}")
            }
            Self::InvalidTitle(msg) => write!(f, "Invalid title: {msg}"),
            Self::InvalidDescription(msg) => write!(f, "Invalid description: {msg}"),
            Self::InvalidOrganization(msg) => write!(f, "Invalid organization: {msg}"),
            Self::InvalidContactName(msg) => write!(f, "Invalid contact name: {msg}"),
            Self::InvalidContactEmail(msg) => write!(f, "Invalid contact email: {msg}"),
            Self::InvalidUsername(msg) => write!(f, "Invalid username: {msg}"),
            Self::DuplicateUsername(name) => {
                write!(f, "Username '{name}' already exists")
            }
        }
    }
}

impl std::error::Error for DomainError {}
