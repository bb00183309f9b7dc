// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use intern_link_domain::{AccountId, Application, ApplicationId, Offer};
use intern_link_events::NotificationEvent;

/// An offer together with its current applications.
///
/// Every lifecycle transition is scoped to one case: the engine receives
/// the case as loaded from the store, and returns a new case for the store
/// to persist. Application counts are always taken from the case handed
/// in, never from a cached counter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OfferCase {
    /// The offer under transition.
    pub offer: Offer,
    /// All current applications to this offer.
    pub applications: Vec<Application>,
}

impl OfferCase {
    /// Creates a case for an offer with no applications.
    #[must_use]
    pub const fn new(offer: Offer) -> Self {
        Self {
            offer,
            applications: Vec::new(),
        }
    }

    /// Returns the current application count.
    #[must_use]
    pub fn application_count(&self) -> usize {
        self.applications.len()
    }

    /// Looks up an application by identity.
    #[must_use]
    pub fn find_application(&self, id: ApplicationId) -> Option<&Application> {
        self.applications
            .iter()
            .find(|application| application.id == id)
    }

    /// Returns true if the student already has an application here.
    #[must_use]
    pub fn has_applicant(&self, student_id: AccountId) -> bool {
        self.applications
            .iter()
            .any(|application| application.student_id == student_id)
    }
}

/// The result of a successful lifecycle transition.
///
/// Transitions are atomic: they either succeed completely or fail without
/// side effects. The events are handed to the notification dispatcher
/// after the new case has been committed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionResult {
    /// The case after the transition.
    pub new_case: OfferCase,
    /// Notification events produced by this transition.
    pub events: Vec<NotificationEvent>,
}
