// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Role-based authorization predicates.
//!
//! The gate decides which actor may invoke which lifecycle transition,
//! before a command is ever built. Superusers pass every check. The
//! engine itself never consults roles; everything role-shaped lives here
//! so it can be tested without request context.

use crate::error::AuthError;
use intern_link_domain::{Identity, Offer, Role};

/// Authorization service for the marketplace operations.
pub struct AuthorizationGate;

impl AuthorizationGate {
    /// Returns true if the actor owns the offer as a company.
    ///
    /// Ownership is the bound company account, or, for unbound legacy
    /// offers, a contact-email match.
    #[must_use]
    pub fn owns_offer(actor: &Identity, offer: &Offer) -> bool {
        if actor.role != Role::Company {
            return false;
        }
        match offer.company {
            Some(company_id) => company_id == actor.id,
            None => offer.contact_email == actor.email,
        }
    }

    /// Checks if an actor may validate or refuse a pending offer.
    ///
    /// Requires Manager or Admin.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor lacks staff authority.
    pub fn authorize_review_offer(actor: &Identity) -> Result<(), AuthError> {
        if actor.is_superuser || actor.role.is_staff() {
            return Ok(());
        }
        Err(AuthError::Forbidden {
            action: String::from("review_offer"),
            requirement: String::from("Manager or Admin role"),
        })
    }

    /// Checks if an actor may perform administrative offer moves:
    /// manual close, manual reopen, and arbitrary state changes.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor is not an Admin.
    pub fn authorize_admin_offer_action(actor: &Identity) -> Result<(), AuthError> {
        if actor.is_superuser || actor.role == Role::Admin {
            return Ok(());
        }
        Err(AuthError::Forbidden {
            action: String::from("admin_offer_action"),
            requirement: String::from("Admin role"),
        })
    }

    /// Checks if an actor may manage accounts (role reassignment).
    ///
    /// # Errors
    ///
    /// Returns an error if the actor is not an Admin.
    pub fn authorize_manage_accounts(actor: &Identity) -> Result<(), AuthError> {
        if actor.is_superuser || actor.role == Role::Admin {
            return Ok(());
        }
        Err(AuthError::Forbidden {
            action: String::from("manage_accounts"),
            requirement: String::from("Admin role"),
        })
    }

    /// Checks if an actor may apply to offers.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor is not a Student.
    pub fn authorize_apply(actor: &Identity) -> Result<(), AuthError> {
        if actor.is_superuser || actor.role == Role::Student {
            return Ok(());
        }
        Err(AuthError::Forbidden {
            action: String::from("apply"),
            requirement: String::from("Student role"),
        })
    }

    /// Checks if an actor may manage bookmarks.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor is not a Student.
    pub fn authorize_toggle_favorite(actor: &Identity) -> Result<(), AuthError> {
        if actor.is_superuser || actor.role == Role::Student {
            return Ok(());
        }
        Err(AuthError::Forbidden {
            action: String::from("toggle_favorite"),
            requirement: String::from("Student role"),
        })
    }

    /// Checks if an actor may read the staff dashboard.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor lacks staff authority.
    pub fn authorize_view_stats(actor: &Identity) -> Result<(), AuthError> {
        if actor.is_superuser || actor.role.is_staff() {
            return Ok(());
        }
        Err(AuthError::Forbidden {
            action: String::from("view_stats"),
            requirement: String::from("Manager or Admin role"),
        })
    }

    /// Checks if an actor may view or decide an offer's applications.
    ///
    /// Staff always may; a company only for offers it owns.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor is neither staff nor the owning
    /// company.
    pub fn authorize_manage_applications(actor: &Identity, offer: &Offer) -> Result<(), AuthError> {
        if actor.is_superuser || actor.role.is_staff() || Self::owns_offer(actor, offer) {
            return Ok(());
        }
        Err(AuthError::Forbidden {
            action: String::from("manage_applications"),
            requirement: String::from("owning Company, Manager, or Admin role"),
        })
    }

    /// Checks if an actor may export an offer's application roster.
    ///
    /// Same circle as application management.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor is neither staff nor the owning
    /// company.
    pub fn authorize_export_roster(actor: &Identity, offer: &Offer) -> Result<(), AuthError> {
        if actor.is_superuser || actor.role.is_staff() || Self::owns_offer(actor, offer) {
            return Ok(());
        }
        Err(AuthError::Forbidden {
            action: String::from("export_roster"),
            requirement: String::from("owning Company, Manager, or Admin role"),
        })
    }
}
