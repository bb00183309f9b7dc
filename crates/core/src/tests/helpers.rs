// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{Command, OfferCase, TransitionResult, apply};
use intern_link_domain::{AccountId, Identity, Offer, OfferDraft, OfferId, OfferState, Role};

pub fn create_test_draft() -> OfferDraft {
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

pub fn create_student(id: i64) -> Identity {
    Identity::new(
        AccountId::new(id),
        format!("student-{id}"),
        format!("student-{id}@uni.example"),
        Role::Student,
        false,
    )
}

pub fn create_company(id: i64) -> Identity {
    Identity::new(
        AccountId::new(id),
        format!("company-{id}"),
        format!("contact-{id}@corp.example"),
        Role::Company,
        false,
    )
}

pub fn create_manager() -> Identity {
    Identity::new(
        AccountId::new(900),
        String::from("manager"),
        String::from("manager@school.example"),
        Role::Manager,
        false,
    )
}

pub fn create_admin() -> Identity {
    Identity::new(
        AccountId::new(999),
        String::from("admin"),
        String::from("admin@school.example"),
        Role::Admin,
        true,
    )
}

/// Builds a validated offer case with a storage identity assigned.
pub fn create_validated_case(offer_id: i64) -> OfferCase {
    let mut offer: Offer = Offer::from_draft(
        create_test_draft(),
        None,
        String::from("2026-01-10T09:00:00Z"),
    );
    offer.id = OfferId::new(offer_id);
    offer.state = OfferState::Validated;
    OfferCase::new(offer)
}

/// Applies `student` to the case and gives the new application a storage
/// identity, as persistence would on commit.
pub fn apply_student(case: &OfferCase, student: &Identity, app_id: i64) -> TransitionResult {
    let mut result: TransitionResult = apply(
        case,
        Command::Apply {
            applied_at: String::from("2026-02-01T12:00:00Z"),
        },
        student,
    )
    .expect("apply should succeed");

    let last: usize = result.new_case.applications.len() - 1;
    result.new_case.applications[last].id = intern_link_domain::ApplicationId::new(app_id);
    result
}
