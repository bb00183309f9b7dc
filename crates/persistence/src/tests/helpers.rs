// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::Persistence;
use intern_link_domain::{AccountId, Identity, Offer, OfferDraft, OfferId, Role};

pub fn create_test_persistence() -> Persistence {
    Persistence::new_in_memory().expect("in-memory database should open")
}

pub fn create_test_draft(title: &str) -> OfferDraft {
    OfferDraft {
        organization: String::from("Acme Robotics"),
        contact_name: String::from("Jane Doe"),
        contact_email: String::from("jane@acme.example"),
        title: title.to_string(),
        description: String::from("Six months working on motor controllers."),
        city: Some(String::from("Lyon")),
        duration: Some(String::from("4-6 months")),
        domain: Some(String::from("Embedded")),
        remote: Some(false),
    }
}

/// Inserts an offer built from a draft and returns it with its identity.
pub fn insert_test_offer(persistence: &mut Persistence, title: &str, submitted_at: &str) -> Offer {
    let draft: OfferDraft = create_test_draft(title);
    let result = intern_link::submit(draft, None, submitted_at.to_string())
        .expect("submit should succeed");
    persistence
        .persist_submission(&result)
        .expect("persist should succeed")
}

/// Registers a student account and returns its identity.
pub fn register_student(persistence: &mut Persistence, username: &str) -> Identity {
    let account_id: AccountId = persistence
        .create_account(
            username,
            &format!("{username}@uni.example"),
            "correct-horse-battery",
            Role::Student,
            false,
            "2026-01-01T00:00:00Z",
        )
        .expect("account creation should succeed");
    persistence
        .get_account(account_id)
        .expect("account should exist")
}

/// Loads a case, applies the student through the engine, persists, and
/// returns the refreshed case.
pub fn apply_through_engine(
    persistence: &mut Persistence,
    offer_id: OfferId,
    student: &Identity,
    applied_at: &str,
) -> intern_link::OfferCase {
    let case = persistence
        .load_offer_case(offer_id)
        .expect("case should load");
    let result = intern_link::apply(
        &case,
        intern_link::Command::Apply {
            applied_at: applied_at.to_string(),
        },
        student,
    )
    .expect("apply should succeed");
    persistence
        .persist_transition(&result)
        .expect("persist should succeed")
}
