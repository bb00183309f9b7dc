// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for the authorization gate across the API operations.

use crate::error::ApiError;
use crate::handlers::{
    apply_to_offer, change_offer_state, close_offer, dashboard_stats, list_offer_applications,
    refuse_offer, toggle_favorite_bookmark, update_application_status, validate_offer,
};
use crate::request_response::{ChangeStateRequest, UpdateStatusRequest};
use crate::roster_csv::export_roster_csv;
use intern_link_domain::Identity;
use intern_link_persistence::Persistence;

use super::helpers::{
    create_test_persistence, register, submit_anonymous_offer, submit_company_offer,
    submit_validated_offer,
};

#[test]
fn test_student_cannot_validate_offer() {
    let mut persistence: Persistence = create_test_persistence();
    let student: Identity = register(&mut persistence, "student1", "Student");
    let offer_id: i64 = submit_anonymous_offer(&mut persistence, "Firmware");

    let result = validate_offer(&mut persistence, offer_id, &student);
    assert!(matches!(result, Err(ApiError::Forbidden { .. })));
}

#[test]
fn test_company_cannot_refuse_offer() {
    let mut persistence: Persistence = create_test_persistence();
    let company: Identity = register(&mut persistence, "acme", "Company");
    let offer_id: i64 = submit_anonymous_offer(&mut persistence, "Firmware");

    let result = refuse_offer(&mut persistence, offer_id, &company);
    assert!(matches!(result, Err(ApiError::Forbidden { .. })));
}

#[test]
fn test_manager_can_validate_offer() {
    let mut persistence: Persistence = create_test_persistence();
    let manager: Identity = register(&mut persistence, "manager", "Manager");
    let offer_id: i64 = submit_anonymous_offer(&mut persistence, "Firmware");

    let result = validate_offer(&mut persistence, offer_id, &manager);
    assert!(result.is_ok());
}

#[test]
fn test_manager_cannot_change_state_freely() {
    let mut persistence: Persistence = create_test_persistence();
    let manager: Identity = register(&mut persistence, "manager", "Manager");
    let offer_id: i64 = submit_anonymous_offer(&mut persistence, "Firmware");

    let request: ChangeStateRequest = ChangeStateRequest {
        new_state: String::from("Closed"),
    };
    let result = change_offer_state(&mut persistence, offer_id, &request, &manager);
    assert!(matches!(result, Err(ApiError::Forbidden { .. })));
}

#[test]
fn test_manager_cannot_manually_close() {
    let mut persistence: Persistence = create_test_persistence();
    let manager: Identity = register(&mut persistence, "manager", "Manager");
    let offer_id: i64 = submit_validated_offer(&mut persistence, &manager, "Firmware");

    let result = close_offer(&mut persistence, offer_id, None, &manager);
    assert!(matches!(result, Err(ApiError::Forbidden { .. })));
}

#[test]
fn test_company_cannot_apply() {
    let mut persistence: Persistence = create_test_persistence();
    let manager: Identity = register(&mut persistence, "manager", "Manager");
    let company: Identity = register(&mut persistence, "acme", "Company");
    let offer_id: i64 = submit_validated_offer(&mut persistence, &manager, "Firmware");

    let result = apply_to_offer(&mut persistence, offer_id, &company, "2026-02-01T12:00:00Z");
    assert!(matches!(result, Err(ApiError::Forbidden { .. })));
}

#[test]
fn test_company_cannot_toggle_favorites() {
    let mut persistence: Persistence = create_test_persistence();
    let manager: Identity = register(&mut persistence, "manager", "Manager");
    let company: Identity = register(&mut persistence, "acme", "Company");
    let offer_id: i64 = submit_validated_offer(&mut persistence, &manager, "Firmware");

    let result = toggle_favorite_bookmark(&mut persistence, offer_id, &company);
    assert!(matches!(result, Err(ApiError::Forbidden { .. })));
}

// Scenario D: a company that does not own the offer cannot decide on its
// applications, regardless of payload validity.
#[test]
fn test_foreign_company_cannot_update_status() {
    let mut persistence: Persistence = create_test_persistence();
    let manager: Identity = register(&mut persistence, "manager", "Manager");
    let student: Identity = register(&mut persistence, "student1", "Student");
    let owner: Identity = register(&mut persistence, "acme", "Company");
    let rival: Identity = register(&mut persistence, "globex", "Company");

    let offer_id: i64 = submit_company_offer(&mut persistence, &owner, "Firmware");
    validate_offer(&mut persistence, offer_id, &manager).expect("validation should succeed");
    let application = apply_to_offer(&mut persistence, offer_id, &student, "2026-02-01T12:00:00Z")
        .expect("apply should succeed")
        .response
        .application;

    let request: UpdateStatusRequest = UpdateStatusRequest {
        status: String::from("Accepted"),
    };
    let result = update_application_status(&mut persistence, application.id, &request, &rival);
    assert!(matches!(result, Err(ApiError::Forbidden { .. })));

    // Status unchanged.
    let applications = list_offer_applications(&mut persistence, offer_id, &owner)
        .expect("owner can list applications");
    assert_eq!(applications[0].status, "Pending");
}

#[test]
fn test_owning_company_can_update_status() {
    let mut persistence: Persistence = create_test_persistence();
    let manager: Identity = register(&mut persistence, "manager", "Manager");
    let student: Identity = register(&mut persistence, "student1", "Student");
    let owner: Identity = register(&mut persistence, "acme", "Company");

    let offer_id: i64 = submit_company_offer(&mut persistence, &owner, "Firmware");
    validate_offer(&mut persistence, offer_id, &manager).expect("validation should succeed");
    let application = apply_to_offer(&mut persistence, offer_id, &student, "2026-02-01T12:00:00Z")
        .expect("apply should succeed")
        .response
        .application;

    let request: UpdateStatusRequest = UpdateStatusRequest {
        status: String::from("Accepted"),
    };
    let result = update_application_status(&mut persistence, application.id, &request, &owner);
    assert!(result.is_ok());
}

// Legacy fallback: an unbound offer is owned through its contact email.
#[test]
fn test_contact_email_fallback_grants_ownership() {
    let mut persistence: Persistence = create_test_persistence();
    let manager: Identity = register(&mut persistence, "manager", "Manager");
    let student: Identity = register(&mut persistence, "student1", "Student");
    // The test fixture's contact email is jane@acme.example; register a
    // company account with exactly that email.
    let legacy_owner: Identity = {
        let request = crate::request_response::RegisterAccountRequest {
            username: String::from("jane"),
            email: String::from("jane@acme.example"),
            password: String::from("Tangerine42!"),
            password_confirmation: String::from("Tangerine42!"),
            role: Some(String::from("Company")),
        };
        crate::handlers::register_account(&mut persistence, &request, "2026-01-01T00:00:00Z")
            .expect("registration should succeed");
        persistence
            .get_account_by_username("jane")
            .expect("lookup should succeed")
            .expect("account should exist")
    };

    let offer_id: i64 = submit_validated_offer(&mut persistence, &manager, "Firmware");
    let application = apply_to_offer(&mut persistence, offer_id, &student, "2026-02-01T12:00:00Z")
        .expect("apply should succeed")
        .response
        .application;

    let request: UpdateStatusRequest = UpdateStatusRequest {
        status: String::from("Refused"),
    };
    let result =
        update_application_status(&mut persistence, application.id, &request, &legacy_owner);
    assert!(result.is_ok());
}

#[test]
fn test_student_cannot_list_or_export_roster() {
    let mut persistence: Persistence = create_test_persistence();
    let manager: Identity = register(&mut persistence, "manager", "Manager");
    let student: Identity = register(&mut persistence, "student1", "Student");
    let offer_id: i64 = submit_validated_offer(&mut persistence, &manager, "Firmware");

    let listing = list_offer_applications(&mut persistence, offer_id, &student);
    assert!(matches!(listing, Err(ApiError::Forbidden { .. })));

    let export = export_roster_csv(&mut persistence, offer_id, &student);
    assert!(matches!(export, Err(ApiError::Forbidden { .. })));
}

#[test]
fn test_dashboard_requires_staff() {
    let mut persistence: Persistence = create_test_persistence();
    let manager: Identity = register(&mut persistence, "manager", "Manager");
    let student: Identity = register(&mut persistence, "student1", "Student");

    let denied = dashboard_stats(&mut persistence, &student, "2025-08-01T00:00:00Z");
    assert!(matches!(denied, Err(ApiError::Forbidden { .. })));

    let allowed = dashboard_stats(&mut persistence, &manager, "2025-08-01T00:00:00Z");
    assert!(allowed.is_ok());
}

#[test]
fn test_superuser_bypasses_role_checks() {
    let mut persistence: Persistence = create_test_persistence();
    let admin: Identity = register(&mut persistence, "root", "Admin");
    assert!(admin.is_superuser);

    let offer_id: i64 = submit_anonymous_offer(&mut persistence, "Firmware");
    let result = validate_offer(&mut persistence, offer_id, &admin);
    assert!(result.is_ok());

    let closed = close_offer(&mut persistence, offer_id, None, &admin);
    assert!(closed.is_ok());
}
