// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    AccountId, Application, ApplicationStatus, CAPACITY_CLOSING_REASON, Offer, OfferDraft, OfferId,
    OfferState,
};

fn create_test_draft() -> OfferDraft {
    OfferDraft {
        organization: String::from("Acme Robotics"),
        contact_name: String::from("Jane Doe"),
        contact_email: String::from("jane@acme.example"),
        title: String::from("Embedded firmware internship"),
        description: String::from("Six months working on motor controllers."),
        city: Some(String::from("Lyon")),
        duration: Some(String::from("4-6 months")),
        domain: Some(String::from("Embedded")),
        remote: Some(false),
    }
}

#[test]
fn test_offer_from_draft_starts_pending() {
    let draft: OfferDraft = create_test_draft();
    let offer: Offer = Offer::from_draft(draft, None, String::from("2026-01-10T09:00:00Z"));

    assert_eq!(offer.id, OfferId::UNASSIGNED);
    assert_eq!(offer.state, OfferState::PendingValidation);
    assert_eq!(offer.closing_reason, None);
    assert_eq!(offer.company, None);
}

#[test]
fn test_offer_from_draft_binds_company() {
    let draft: OfferDraft = create_test_draft();
    let company: AccountId = AccountId::new(7);
    let offer: Offer = Offer::from_draft(draft, Some(company), String::from("2026-01-10T09:00:00Z"));

    assert_eq!(offer.company, Some(company));
}

#[test]
fn test_capacity_closed_requires_marker_reason() {
    let draft: OfferDraft = create_test_draft();
    let mut offer: Offer = Offer::from_draft(draft, None, String::from("2026-01-10T09:00:00Z"));

    offer.state = OfferState::Closed;
    offer.closing_reason = Some(String::from(CAPACITY_CLOSING_REASON));
    assert!(offer.is_capacity_closed());

    offer.closing_reason = Some(String::from("Closed by administrator"));
    assert!(!offer.is_capacity_closed());

    offer.state = OfferState::Validated;
    offer.closing_reason = None;
    assert!(!offer.is_capacity_closed());
}

#[test]
fn test_new_application_is_pending() {
    let application: Application = Application::new(
        OfferId::new(3),
        AccountId::new(12),
        String::from("2026-02-01T12:00:00Z"),
    );

    assert_eq!(application.status, ApplicationStatus::Pending);
    assert_eq!(application.offer_id, OfferId::new(3));
    assert_eq!(application.student_id, AccountId::new(12));
}
