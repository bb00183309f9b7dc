// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! End-to-end tests for the application workflow, favorites, roster
//! export, and account registration.

use crate::error::ApiError;
use crate::handlers::{
    apply_to_offer, change_account_role, check_favorite, close_offer, get_offer,
    list_favorite_offers, list_my_applications, list_offer_applications, login, refuse_offer,
    register_account, toggle_favorite_bookmark, update_application_status, withdraw_application,
};
use crate::request_response::{
    ApplicationInfo, LoginRequest, RegisterAccountRequest, UpdateStatusRequest,
};
use crate::roster_csv::export_roster_csv;
use intern_link_domain::{APPLICATION_CAPACITY, Identity};
use intern_link_events::NotificationEvent;
use intern_link_persistence::Persistence;

use super::helpers::{
    create_test_persistence, register, submit_anonymous_offer, submit_validated_offer,
};

/// Registers `count` students and applies each to the offer in turn.
fn fill_offer(persistence: &mut Persistence, offer_id: i64, count: usize) -> Vec<Identity> {
    let mut students: Vec<Identity> = Vec::new();
    for i in 1..=count {
        let student: Identity = register(persistence, &format!("student{i}"), "Student");
        apply_to_offer(
            persistence,
            offer_id,
            &student,
            &format!("2026-02-0{i}T12:00:00Z"),
        )
        .expect("apply should succeed");
        students.push(student);
    }
    students
}

// Scenario A: five sequential applications close the offer; all five
// applications exist.
#[test]
fn test_fifth_application_closes_offer() {
    let mut persistence: Persistence = create_test_persistence();
    let manager: Identity = register(&mut persistence, "manager", "Manager");
    let offer_id: i64 = submit_validated_offer(&mut persistence, &manager, "Firmware");

    for i in 1..=4 {
        let student: Identity = register(&mut persistence, &format!("student{i}"), "Student");
        let result = apply_to_offer(
            &mut persistence,
            offer_id,
            &student,
            &format!("2026-02-0{i}T12:00:00Z"),
        )
        .expect("apply should succeed");
        assert_eq!(result.response.offer_state, "Validated");
        assert_eq!(result.events.len(), 1);
    }

    let fifth: Identity = register(&mut persistence, "student5", "Student");
    let result = apply_to_offer(&mut persistence, offer_id, &fifth, "2026-02-05T12:00:00Z")
        .expect("apply should succeed");

    assert_eq!(result.response.offer_state, "Closed");
    assert_eq!(result.events.len(), 2);
    assert!(matches!(
        result.events[0],
        NotificationEvent::ApplicationCreated(_)
    ));
    assert!(matches!(result.events[1], NotificationEvent::OfferClosed(_)));

    let applications: Vec<ApplicationInfo> =
        list_offer_applications(&mut persistence, offer_id, &manager)
            .expect("listing should succeed");
    assert_eq!(applications.len(), APPLICATION_CAPACITY);
}

// Scenario B: a withdrawal from the capacity-closed offer reopens it.
#[test]
fn test_withdrawal_reopens_capacity_closed_offer() {
    let mut persistence: Persistence = create_test_persistence();
    let manager: Identity = register(&mut persistence, "manager", "Manager");
    let offer_id: i64 = submit_validated_offer(&mut persistence, &manager, "Firmware");
    let students: Vec<Identity> = fill_offer(&mut persistence, offer_id, APPLICATION_CAPACITY);

    let mine: Vec<ApplicationInfo> = list_my_applications(&mut persistence, &students[2])
        .expect("listing should succeed");
    assert_eq!(mine.len(), 1);

    let result = withdraw_application(&mut persistence, mine[0].id, &students[2])
        .expect("withdrawal should succeed");
    assert_eq!(result.response.offer_state, "Validated");
    assert!(result.events.is_empty());

    let remaining = list_offer_applications(&mut persistence, offer_id, &manager)
        .expect("listing should succeed");
    assert_eq!(remaining.len(), 4);

    let offer = get_offer(&mut persistence, offer_id).expect("offer should load");
    assert_eq!(offer.closing_reason, None);
}

// Scenario C: manual closes are sticky under withdrawal.
#[test]
fn test_withdrawal_does_not_reopen_manually_closed_offer() {
    let mut persistence: Persistence = create_test_persistence();
    let manager: Identity = register(&mut persistence, "manager", "Manager");
    let admin: Identity = register(&mut persistence, "root", "Admin");
    let offer_id: i64 = submit_validated_offer(&mut persistence, &manager, "Firmware");

    let student: Identity = register(&mut persistence, "student1", "Student");
    apply_to_offer(&mut persistence, offer_id, &student, "2026-02-01T12:00:00Z")
        .expect("apply should succeed");

    close_offer(&mut persistence, offer_id, None, &admin).expect("close should succeed");

    let mine: Vec<ApplicationInfo> =
        list_my_applications(&mut persistence, &student).expect("listing should succeed");
    let result = withdraw_application(&mut persistence, mine[0].id, &student)
        .expect("withdrawal should succeed");

    assert_eq!(result.response.offer_state, "Closed");
    let offer = get_offer(&mut persistence, offer_id).expect("offer should load");
    assert!(offer.closing_reason.is_some());
}

// Scenario E: applying to a refused offer fails and records nothing.
#[test]
fn test_apply_to_refused_offer_is_rejected() {
    let mut persistence: Persistence = create_test_persistence();
    let manager: Identity = register(&mut persistence, "manager", "Manager");
    let student: Identity = register(&mut persistence, "student1", "Student");
    let offer_id: i64 = submit_anonymous_offer(&mut persistence, "Firmware");
    refuse_offer(&mut persistence, offer_id, &manager).expect("refusal should succeed");

    let result = apply_to_offer(&mut persistence, offer_id, &student, "2026-02-01T12:00:00Z");
    assert!(matches!(
        result,
        Err(ApiError::DomainRuleViolation { ref rule, .. }) if rule == "offer_not_open"
    ));

    let mine = list_my_applications(&mut persistence, &student).expect("listing should succeed");
    assert!(mine.is_empty());
}

// Uniqueness: a second application by the same student changes nothing.
#[test]
fn test_duplicate_application_is_rejected() {
    let mut persistence: Persistence = create_test_persistence();
    let manager: Identity = register(&mut persistence, "manager", "Manager");
    let student: Identity = register(&mut persistence, "student1", "Student");
    let offer_id: i64 = submit_validated_offer(&mut persistence, &manager, "Firmware");

    apply_to_offer(&mut persistence, offer_id, &student, "2026-02-01T12:00:00Z")
        .expect("apply should succeed");
    let result = apply_to_offer(&mut persistence, offer_id, &student, "2026-02-02T12:00:00Z");

    assert!(matches!(
        result,
        Err(ApiError::DomainRuleViolation { ref rule, .. }) if rule == "duplicate_application"
    ));

    let applications = list_offer_applications(&mut persistence, offer_id, &manager)
        .expect("listing should succeed");
    assert_eq!(applications.len(), 1);
}

#[test]
fn test_withdraw_by_non_applicant_is_rejected() {
    let mut persistence: Persistence = create_test_persistence();
    let manager: Identity = register(&mut persistence, "manager", "Manager");
    let student: Identity = register(&mut persistence, "student1", "Student");
    let other: Identity = register(&mut persistence, "student2", "Student");
    let offer_id: i64 = submit_validated_offer(&mut persistence, &manager, "Firmware");

    apply_to_offer(&mut persistence, offer_id, &student, "2026-02-01T12:00:00Z")
        .expect("apply should succeed");
    let mine = list_my_applications(&mut persistence, &student).expect("listing should succeed");

    let result = withdraw_application(&mut persistence, mine[0].id, &other);
    assert!(matches!(
        result,
        Err(ApiError::DomainRuleViolation { ref rule, .. }) if rule == "not_owner"
    ));
}

#[test]
fn test_update_status_rejects_unknown_literal() {
    let mut persistence: Persistence = create_test_persistence();
    let manager: Identity = register(&mut persistence, "manager", "Manager");
    let student: Identity = register(&mut persistence, "student1", "Student");
    let offer_id: i64 = submit_validated_offer(&mut persistence, &manager, "Firmware");

    let application = apply_to_offer(&mut persistence, offer_id, &student, "2026-02-01T12:00:00Z")
        .expect("apply should succeed")
        .response
        .application;

    let request: UpdateStatusRequest = UpdateStatusRequest {
        status: String::from("Waitlisted"),
    };
    let result = update_application_status(&mut persistence, application.id, &request, &manager);

    assert!(matches!(
        result,
        Err(ApiError::InvalidInput { ref field, .. }) if field == "status"
    ));
}

#[test]
fn test_decision_notifies_and_revert_is_silent() {
    let mut persistence: Persistence = create_test_persistence();
    let manager: Identity = register(&mut persistence, "manager", "Manager");
    let student: Identity = register(&mut persistence, "student1", "Student");
    let offer_id: i64 = submit_validated_offer(&mut persistence, &manager, "Firmware");

    let application = apply_to_offer(&mut persistence, offer_id, &student, "2026-02-01T12:00:00Z")
        .expect("apply should succeed")
        .response
        .application;

    let accept: UpdateStatusRequest = UpdateStatusRequest {
        status: String::from("Accepted"),
    };
    let accepted = update_application_status(&mut persistence, application.id, &accept, &manager)
        .expect("update should succeed");
    assert_eq!(accepted.response.status, "Accepted");
    assert_eq!(accepted.events.len(), 1);
    match &accepted.events[0] {
        NotificationEvent::ApplicationStatusChanged(snapshot) => {
            assert_eq!(snapshot.student_email, student.email);
        }
        other => panic!("unexpected event: {other:?}"),
    }

    let revert: UpdateStatusRequest = UpdateStatusRequest {
        status: String::from("Pending"),
    };
    let reverted = update_application_status(&mut persistence, application.id, &revert, &manager)
        .expect("update should succeed");
    assert_eq!(reverted.response.status, "Pending");
    assert!(reverted.events.is_empty());
}

#[test]
fn test_favorite_toggle_round_trip() {
    let mut persistence: Persistence = create_test_persistence();
    let manager: Identity = register(&mut persistence, "manager", "Manager");
    let student: Identity = register(&mut persistence, "student1", "Student");
    let offer_id: i64 = submit_validated_offer(&mut persistence, &manager, "Firmware");

    assert!(
        !check_favorite(&mut persistence, offer_id, &student).expect("check should succeed")
    );

    let added = toggle_favorite_bookmark(&mut persistence, offer_id, &student)
        .expect("toggle should succeed");
    assert!(added.is_favorite);

    let favorites =
        list_favorite_offers(&mut persistence, &student).expect("listing should succeed");
    assert_eq!(favorites.offers.len(), 1);

    let removed = toggle_favorite_bookmark(&mut persistence, offer_id, &student)
        .expect("toggle should succeed");
    assert!(!removed.is_favorite);
    assert!(
        !check_favorite(&mut persistence, offer_id, &student).expect("check should succeed")
    );
}

#[test]
fn test_toggle_favorite_on_missing_offer_is_not_found() {
    let mut persistence: Persistence = create_test_persistence();
    let student: Identity = register(&mut persistence, "student1", "Student");

    let result = toggle_favorite_bookmark(&mut persistence, 404, &student);
    assert!(matches!(result, Err(ApiError::ResourceNotFound { .. })));
}

#[test]
fn test_roster_export_lists_applicants() {
    let mut persistence: Persistence = create_test_persistence();
    let manager: Identity = register(&mut persistence, "manager", "Manager");
    let offer_id: i64 = submit_validated_offer(&mut persistence, &manager, "Firmware");
    fill_offer(&mut persistence, offer_id, 2);

    let csv_text: String = export_roster_csv(&mut persistence, offer_id, &manager)
        .expect("export should succeed");

    let mut lines = csv_text.lines();
    assert_eq!(lines.next(), Some("applicant,email,applied_at,status"));
    assert!(csv_text.contains("student1"));
    assert!(csv_text.contains("student2@example.org"));
    assert_eq!(csv_text.lines().count(), 3);
}

#[test]
fn test_registration_rejects_duplicates_and_bad_passwords() {
    let mut persistence: Persistence = create_test_persistence();
    register(&mut persistence, "student1", "Student");

    let duplicate: RegisterAccountRequest = RegisterAccountRequest {
        username: String::from("student1"),
        email: String::from("elsewhere@example.org"),
        password: String::from("Tangerine42!"),
        password_confirmation: String::from("Tangerine42!"),
        role: None,
    };
    let result = register_account(&mut persistence, &duplicate, "2026-01-02T00:00:00Z");
    assert!(matches!(
        result,
        Err(ApiError::DomainRuleViolation { ref rule, .. }) if rule == "unique_username"
    ));

    let weak: RegisterAccountRequest = RegisterAccountRequest {
        username: String::from("student9"),
        email: String::from("student9@example.org"),
        password: String::from("abc"),
        password_confirmation: String::from("abc"),
        role: None,
    };
    let result = register_account(&mut persistence, &weak, "2026-01-02T00:00:00Z");
    assert!(matches!(result, Err(ApiError::PasswordPolicyViolation { .. })));
}

#[test]
fn test_login_round_trip() {
    let mut persistence: Persistence = create_test_persistence();
    register(&mut persistence, "student1", "Student");

    let good: LoginRequest = LoginRequest {
        username: String::from("student1"),
        password: String::from("Tangerine42!"),
    };
    let identity = login(&mut persistence, &good).expect("login should succeed");
    assert_eq!(identity.username, "student1");
    assert_eq!(identity.role, "Student");

    let bad: LoginRequest = LoginRequest {
        username: String::from("student1"),
        password: String::from("wrong"),
    };
    let result = login(&mut persistence, &bad);
    assert!(matches!(result, Err(ApiError::AuthenticationFailed { .. })));
}

#[test]
fn test_role_reassignment_requires_admin_and_tracks_superuser() {
    let mut persistence: Persistence = create_test_persistence();
    let admin: Identity = register(&mut persistence, "root", "Admin");
    let student: Identity = register(&mut persistence, "student1", "Student");

    let denied = change_account_role(&mut persistence, admin.id.value(), "Manager", &student);
    assert!(matches!(denied, Err(ApiError::Forbidden { .. })));

    let promoted = change_account_role(&mut persistence, student.id.value(), "Admin", &admin)
        .expect("reassignment should succeed");
    assert_eq!(promoted.role, "Admin");
    assert!(promoted.is_superuser);

    let unknown = change_account_role(&mut persistence, 404, "Manager", &admin);
    assert!(matches!(unknown, Err(ApiError::ResourceNotFound { .. })));
}
