// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Core entity types for the marketplace.

use crate::application_status::ApplicationStatus;
use crate::offer_state::OfferState;
use crate::role::Role;
use serde::{Deserialize, Serialize};

/// Maximum number of concurrent applications per offer.
///
/// Reaching this count closes the offer automatically; dropping back below
/// it reopens a capacity-closed offer. Fixed policy, not configurable.
pub const APPLICATION_CAPACITY: usize = 5;

/// Closing reason recorded by the capacity auto-close.
///
/// The auto-reopen check compares against this exact marker, so the engine
/// can tell a capacity close apart from an administrative one.
pub const CAPACITY_CLOSING_REASON: &str = "Maximum number of applications reached (5)";

/// Default closing reason for administrative closes.
///
/// Admins may supply their own wording; this marker is used when they do
/// not. Anything other than [`CAPACITY_CLOSING_REASON`] makes a close
/// sticky: it never auto-reopens.
pub const ADMIN_CLOSING_REASON: &str = "Closed by administrator";

/// Storage identity of an offer.
///
/// Zero means "not yet persisted": the storage layer assigns the real
/// identifier at insert time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OfferId(i64);

impl OfferId {
    /// Placeholder identity for an offer that has not been stored yet.
    pub const UNASSIGNED: Self = Self(0);

    /// Creates an offer identity from its storage value.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the raw storage value.
    #[must_use]
    pub const fn value(&self) -> i64 {
        self.0
    }
}

/// Storage identity of an application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApplicationId(i64);

impl ApplicationId {
    /// Placeholder identity for an application that has not been stored yet.
    pub const UNASSIGNED: Self = Self(0);

    /// Creates an application identity from its storage value.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the raw storage value.
    #[must_use]
    pub const fn value(&self) -> i64 {
        self.0
    }
}

/// Storage identity of an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(i64);

impl AccountId {
    /// Creates an account identity from its storage value.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the raw storage value.
    #[must_use]
    pub const fn value(&self) -> i64 {
        self.0
    }
}

/// An authenticated account as the engine sees it.
///
/// The surrounding session machinery resolves credentials to an `Identity`;
/// the engine and the authorization gate only ever reason about this struct.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    /// The account's storage identity.
    pub id: AccountId,
    /// The login name.
    pub username: String,
    /// The contact email, also used for legacy offer ownership matching.
    pub email: String,
    /// The single role attached to this account.
    pub role: Role,
    /// Superusers bypass every authorization check.
    pub is_superuser: bool,
}

impl Identity {
    /// Creates a new identity.
    #[must_use]
    pub const fn new(
        id: AccountId,
        username: String,
        email: String,
        role: Role,
        is_superuser: bool,
    ) -> Self {
        Self {
            id,
            username,
            email,
            role,
            is_superuser,
        }
    }
}

/// The submission payload for a new offer.
///
/// Classification attributes are optional; legacy intake forms omit them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfferDraft {
    pub organization: String,
    pub contact_name: String,
    pub contact_email: String,
    pub title: String,
    pub description: String,
    pub city: Option<String>,
    pub duration: Option<String>,
    pub domain: Option<String>,
    pub remote: Option<bool>,
}

/// An internship offer moving through the validation workflow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Offer {
    /// The offer's storage identity.
    pub id: OfferId,
    /// The submitting company account, when the offer was submitted while
    /// authenticated. `None` for anonymous/legacy submissions.
    pub company: Option<AccountId>,
    /// The organization name shown to students.
    pub organization: String,
    /// Contact person for the offer.
    pub contact_name: String,
    /// Contact email; doubles as the legacy ownership key.
    pub contact_email: String,
    /// Offer title.
    pub title: String,
    /// Offer description.
    pub description: String,
    /// Optional city.
    pub city: Option<String>,
    /// Optional duration bucket (e.g. "2-4 months").
    pub duration: Option<String>,
    /// Optional domain tag.
    pub domain: Option<String>,
    /// Optional remote-work flag.
    pub remote: Option<bool>,
    /// Current workflow state.
    pub state: OfferState,
    /// Set iff `state` is `Closed`; written only by the lifecycle engine.
    pub closing_reason: Option<String>,
    /// Submission timestamp (RFC 3339), immutable after creation.
    pub submitted_at: String,
}

impl Offer {
    /// Builds an offer from a draft in the initial workflow state.
    #[must_use]
    pub fn from_draft(draft: OfferDraft, company: Option<AccountId>, submitted_at: String) -> Self {
        Self {
            id: OfferId::UNASSIGNED,
            company,
            organization: draft.organization,
            contact_name: draft.contact_name,
            contact_email: draft.contact_email,
            title: draft.title,
            description: draft.description,
            city: draft.city,
            duration: draft.duration,
            domain: draft.domain,
            remote: draft.remote,
            state: OfferState::PendingValidation,
            closing_reason: None,
            submitted_at,
        }
    }

    /// Returns true if the offer was closed by the capacity auto-close.
    #[must_use]
    pub fn is_capacity_closed(&self) -> bool {
        self.state == OfferState::Closed
            && self.closing_reason.as_deref() == Some(CAPACITY_CLOSING_REASON)
    }
}

/// A student's request to be considered for an offer.
///
/// At most one application exists per `(student, offer)` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Application {
    /// The application's storage identity.
    pub id: ApplicationId,
    /// The offer applied to.
    pub offer_id: OfferId,
    /// The applying student account.
    pub student_id: AccountId,
    /// Decision status.
    pub status: ApplicationStatus,
    /// Creation timestamp (RFC 3339), immutable after creation.
    pub applied_at: String,
}

impl Application {
    /// Creates a new pending application.
    #[must_use]
    pub const fn new(offer_id: OfferId, student_id: AccountId, applied_at: String) -> Self {
        Self {
            id: ApplicationId::UNASSIGNED,
            offer_id,
            student_id,
            status: ApplicationStatus::Pending,
            applied_at,
        }
    }
}

/// Optional profile data attached to a student account.
///
/// Created lazily on first access.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentProfile {
    pub account_id: AccountId,
    pub bio: Option<String>,
    pub phone: Option<String>,
    pub cv_url: Option<String>,
}

impl StudentProfile {
    /// Creates an empty profile for an account.
    #[must_use]
    pub const fn empty(account_id: AccountId) -> Self {
        Self {
            account_id,
            bio: None,
            phone: None,
            cv_url: None,
        }
    }
}

/// A student's bookmark on an offer. Unique per pair, no state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Favorite {
    pub student_id: AccountId,
    pub offer_id: OfferId,
}

impl Favorite {
    /// Creates a bookmark pair.
    #[must_use]
    pub const fn new(student_id: AccountId, offer_id: OfferId) -> Self {
        Self {
            student_id,
            offer_id,
        }
    }
}
