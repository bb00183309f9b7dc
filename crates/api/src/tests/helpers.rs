// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::handlers::{register_account, submit_offer, validate_offer};
use crate::request_response::{RegisterAccountRequest, SubmitOfferRequest};
use intern_link_domain::Identity;
use intern_link_persistence::Persistence;

pub fn create_test_persistence() -> Persistence {
    Persistence::new_in_memory().expect("in-memory database should open")
}

/// Registers an account through the API and returns its identity.
pub fn register(persistence: &mut Persistence, username: &str, role: &str) -> Identity {
    let request: RegisterAccountRequest = RegisterAccountRequest {
        username: username.to_string(),
        email: format!("{username}@example.org"),
        password: String::from("Tangerine42!"),
        password_confirmation: String::from("Tangerine42!"),
        role: Some(role.to_string()),
    };
    register_account(persistence, &request, "2026-01-01T00:00:00Z")
        .expect("registration should succeed");
    persistence
        .get_account_by_username(username)
        .expect("lookup should succeed")
        .expect("account should exist")
}

pub fn create_submit_request(title: &str) -> SubmitOfferRequest {
    SubmitOfferRequest {
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

/// Submits an anonymous offer and returns its identity value.
pub fn submit_anonymous_offer(persistence: &mut Persistence, title: &str) -> i64 {
    submit_offer(
        persistence,
        create_submit_request(title),
        None,
        "2026-01-10T09:00:00Z",
    )
    .expect("submission should succeed")
    .response
    .offer
    .id
}

/// Submits an offer bound to the given company account.
pub fn submit_company_offer(
    persistence: &mut Persistence,
    company: &Identity,
    title: &str,
) -> i64 {
    submit_offer(
        persistence,
        create_submit_request(title),
        Some(company),
        "2026-01-10T09:00:00Z",
    )
    .expect("submission should succeed")
    .response
    .offer
    .id
}

/// Submits and validates an offer, returning its identity value.
pub fn submit_validated_offer(
    persistence: &mut Persistence,
    manager: &Identity,
    title: &str,
) -> i64 {
    let offer_id: i64 = submit_anonymous_offer(persistence, title);
    validate_offer(persistence, offer_id, manager).expect("validation should succeed");
    offer_id
}
