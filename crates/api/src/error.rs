// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use crate::password_policy::PasswordPolicyError;
use intern_link::CoreError;
use intern_link_domain::DomainError;
use intern_link_persistence::PersistenceError;

/// Authorization errors raised by the gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// The actor may not perform the action.
    Forbidden {
        /// The action that was attempted.
        action: String,
        /// What the action requires.
        requirement: String,
    },
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Forbidden {
                action,
                requirement,
            } => {
                write!(f, "Forbidden: '{action}' requires {requirement}")
            }
        }
    }
}

impl std::error::Error for AuthError {}

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API
/// contract. `DomainRuleViolation::rule` carries the stable
/// machine-readable code callers branch on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// The actor does not have permission.
    Forbidden {
        /// The action that was attempted.
        action: String,
        /// What the action requires.
        requirement: String,
    },
    /// A domain rule was violated.
    DomainRuleViolation {
        /// The stable code of the rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// Password policy violation.
    PasswordPolicyViolation {
        /// A human-readable description of the policy violation.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Forbidden {
                action,
                requirement,
            } => {
                write!(f, "Forbidden: '{action}' requires {requirement}")
            }
            Self::DomainRuleViolation { rule, message } => {
                write!(f, "Domain rule violation ({rule}): {message}")
            }
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::PasswordPolicyViolation { message } => {
                write!(f, "Password policy violation: {message}")
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Forbidden {
                action,
                requirement,
            } => Self::Forbidden {
                action,
                requirement,
            },
        }
    }
}

impl From<PasswordPolicyError> for ApiError {
    fn from(err: PasswordPolicyError) -> Self {
        Self::PasswordPolicyViolation {
            message: err.to_string(),
        }
    }
}

impl From<PersistenceError> for ApiError {
    fn from(err: PersistenceError) -> Self {
        match err {
            PersistenceError::NotFound(message) => Self::ResourceNotFound {
                resource_type: String::from("Record"),
                message,
            },
            PersistenceError::DuplicateKey(message) => Self::DomainRuleViolation {
                rule: String::from("unique_constraint"),
                message,
            },
            other => Self::Internal {
                message: other.to_string(),
            },
        }
    }
}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked
/// directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::OfferNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Offer"),
            message: format!("Offer {id} not found"),
        },
        DomainError::ApplicationNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Application"),
            message: format!("Application {id} not found"),
        },
        DomainError::AccountNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Account"),
            message: format!("Account {id} not found"),
        },
        DomainError::DuplicateApplication {
            student_id,
            offer_id,
        } => ApiError::DomainRuleViolation {
            rule: String::from("duplicate_application"),
            message: format!("Student {student_id} has already applied to offer {offer_id}"),
        },
        DomainError::OfferNotOpen { offer_id, state } => ApiError::DomainRuleViolation {
            rule: String::from("offer_not_open"),
            message: format!("Offer {offer_id} is not open for applications (state: {state})"),
        },
        DomainError::CapacityExceeded { offer_id } => ApiError::DomainRuleViolation {
            rule: String::from("capacity_exceeded"),
            message: format!("Offer {offer_id} has reached its application capacity"),
        },
        DomainError::NotOwner { application_id } => ApiError::DomainRuleViolation {
            rule: String::from("not_owner"),
            message: format!(
                "Application {application_id} can only be withdrawn by its applicant"
            ),
        },
        DomainError::InvalidOfferTransition { from, to, reason } => ApiError::DomainRuleViolation {
            rule: String::from("invalid_transition"),
            message: format!("Cannot transition offer from {from} to {to}: {reason}"),
        },
        DomainError::InvalidOfferState(value) => ApiError::InvalidInput {
            field: String::from("state"),
            message: format!("'{value}' is not a valid offer state"),
        },
        DomainError::InvalidApplicationStatus(value) => ApiError::InvalidInput {
            field: String::from("status"),
            message: format!("'{value}' is not a valid application status"),
        },
        DomainError::InvalidRole(value) => ApiError::InvalidInput {
            field: String::from("role"),
            message: format!("'{value}' is not a valid role"),
        },
        DomainError::InvalidTitle(msg) => ApiError::InvalidInput {
            field: String::from("title"),
            message: msg,
        },
        DomainError::InvalidDescription(msg) => ApiError::InvalidInput {
            field: String::from("description"),
            message: msg,
        },
        DomainError::InvalidOrganization(msg) => ApiError::InvalidInput {
            field: String::from("organization"),
            message: msg,
        },
        DomainError::InvalidContactName(msg) => ApiError::InvalidInput {
            field: String::from("contact_name"),
            message: msg,
        },
        DomainError::InvalidContactEmail(msg) => ApiError::InvalidInput {
            field: String::from("contact_email"),
            message: msg,
        },
        DomainError::InvalidUsername(msg) => ApiError::InvalidInput {
            field: String::from("username"),
            message: msg,
        },
        DomainError::DuplicateUsername(name) => ApiError::DomainRuleViolation {
            rule: String::from("unique_username"),
            message: format!("Username '{name}' already exists"),
        },
    }
}

/// Translates a core error into an API error.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
    }
}
