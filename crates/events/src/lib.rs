// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Notification events emitted by the lifecycle engine.
//!
//! Engine operations return these as data; a dispatcher outside the
//! transactional boundary turns them into messages. Delivery is best
//! effort and never feeds back into the engine.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

use intern_link_domain::{Application, ApplicationStatus, Identity, Offer, OfferState};
use serde::{Deserialize, Serialize};

/// Offer data captured at the moment an event fired.
///
/// Snapshots are self-contained: the dispatcher must be able to format a
/// message without reading the store again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfferSnapshot {
    /// The offer title.
    pub title: String,
    /// The organization name.
    pub organization: String,
    /// The contact person.
    pub contact_name: String,
    /// Where offer-related messages go.
    pub contact_email: String,
    /// The offer's state after the transition.
    pub state: OfferState,
    /// The submission timestamp (RFC 3339).
    pub submitted_at: String,
}

impl OfferSnapshot {
    /// Captures the relevant fields of an offer.
    #[must_use]
    pub fn of(offer: &Offer) -> Self {
        Self {
            title: offer.title.clone(),
            organization: offer.organization.clone(),
            contact_name: offer.contact_name.clone(),
            contact_email: offer.contact_email.clone(),
            state: offer.state,
            submitted_at: offer.submitted_at.clone(),
        }
    }
}

/// Application data captured at the moment an event fired.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationSnapshot {
    /// The offer applied to.
    pub offer: OfferSnapshot,
    /// The applicant's login name.
    pub student_username: String,
    /// Where applicant-facing messages go.
    pub student_email: String,
    /// The application status after the transition.
    pub status: ApplicationStatus,
    /// The application timestamp (RFC 3339).
    pub applied_at: String,
}

impl ApplicationSnapshot {
    /// Captures the relevant fields of an application and its offer.
    #[must_use]
    pub fn of(application: &Application, offer: &Offer, student: &Identity) -> Self {
        Self {
            offer: OfferSnapshot::of(offer),
            student_username: student.username.clone(),
            student_email: student.email.clone(),
            status: application.status,
            applied_at: application.applied_at.clone(),
        }
    }
}

/// A lifecycle event to be delivered outside the transaction.
///
/// Every successful engine transition returns zero or more of these.
/// Failed transitions return none.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum NotificationEvent {
    /// An offer was submitted and awaits validation.
    OfferSubmitted(OfferSnapshot),
    /// Staff approved the offer.
    OfferValidated(OfferSnapshot),
    /// Staff rejected the offer.
    OfferRefused(OfferSnapshot),
    /// The offer reached capacity and closed.
    OfferClosed(OfferSnapshot),
    /// A student applied to an offer.
    ApplicationCreated(ApplicationSnapshot),
    /// The company decided on an application.
    ApplicationStatusChanged(ApplicationSnapshot),
}

impl NotificationEvent {
    /// Returns the event name for logging and dispatch routing.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::OfferSubmitted(_) => "OfferSubmitted",
            Self::OfferValidated(_) => "OfferValidated",
            Self::OfferRefused(_) => "OfferRefused",
            Self::OfferClosed(_) => "OfferClosed",
            Self::ApplicationCreated(_) => "ApplicationCreated",
            Self::ApplicationStatusChanged(_) => "ApplicationStatusChanged",
        }
    }
}
