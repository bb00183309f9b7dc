// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{OfferFilter, OwnerKey, Persistence, PersistenceError};
use intern_link::{Command, apply};
use intern_link_domain::{Offer, OfferId, OfferState, Role};

use super::helpers::{create_test_persistence, insert_test_offer, register_student};

#[test]
fn test_persist_submission_assigns_identity() {
    let mut persistence: Persistence = create_test_persistence();
    let offer: Offer = insert_test_offer(&mut persistence, "Firmware", "2026-01-10T09:00:00Z");

    assert_ne!(offer.id, OfferId::UNASSIGNED);
    assert_eq!(offer.state, OfferState::PendingValidation);
    assert_eq!(offer.closing_reason, None);
}

#[test]
fn test_get_offer_round_trips_fields() {
    let mut persistence: Persistence = create_test_persistence();
    let stored: Offer = insert_test_offer(&mut persistence, "Firmware", "2026-01-10T09:00:00Z");

    let loaded: Offer = persistence
        .get_offer(stored.id)
        .expect("offer should load");

    assert_eq!(loaded, stored);
    assert_eq!(loaded.city.as_deref(), Some("Lyon"));
    assert_eq!(loaded.remote, Some(false));
}

#[test]
fn test_get_missing_offer_is_not_found() {
    let mut persistence: Persistence = create_test_persistence();

    let result = persistence.get_offer(OfferId::new(404));
    assert!(matches!(result, Err(PersistenceError::NotFound(_))));
}

#[test]
fn test_persist_transition_updates_lifecycle_fields() {
    let mut persistence: Persistence = create_test_persistence();
    let offer: Offer = insert_test_offer(&mut persistence, "Firmware", "2026-01-10T09:00:00Z");

    let case = persistence
        .load_offer_case(offer.id)
        .expect("case should load");
    let manager = intern_link_domain::Identity::new(
        intern_link_domain::AccountId::new(900),
        String::from("manager"),
        String::from("manager@school.example"),
        Role::Manager,
        false,
    );
    let result = apply(&case, Command::Validate, &manager).expect("validate should succeed");

    let refreshed = persistence
        .persist_transition(&result)
        .expect("persist should succeed");
    assert_eq!(refreshed.offer.state, OfferState::Validated);

    let reloaded: Offer = persistence
        .get_offer(offer.id)
        .expect("offer should load");
    assert_eq!(reloaded.state, OfferState::Validated);
}

#[test]
fn test_list_offers_filters_by_state() {
    let mut persistence: Persistence = create_test_persistence();
    insert_test_offer(&mut persistence, "Pending one", "2026-01-10T09:00:00Z");
    let validated: Offer =
        insert_test_offer(&mut persistence, "Validated one", "2026-01-11T09:00:00Z");

    let case = persistence
        .load_offer_case(validated.id)
        .expect("case should load");
    let manager = intern_link_domain::Identity::new(
        intern_link_domain::AccountId::new(900),
        String::from("manager"),
        String::from("manager@school.example"),
        Role::Manager,
        false,
    );
    let result = apply(&case, Command::Validate, &manager).expect("validate should succeed");
    persistence
        .persist_transition(&result)
        .expect("persist should succeed");

    let filter: OfferFilter = OfferFilter {
        states: Some(vec![OfferState::Validated]),
        ..OfferFilter::default()
    };
    let listed: Vec<Offer> = persistence
        .list_offers(&filter)
        .expect("list should succeed");

    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].title, "Validated one");
}

#[test]
fn test_list_offers_search_matches_title_and_organization() {
    let mut persistence: Persistence = create_test_persistence();
    insert_test_offer(&mut persistence, "Firmware internship", "2026-01-10T09:00:00Z");
    insert_test_offer(&mut persistence, "Web internship", "2026-01-11T09:00:00Z");

    let filter: OfferFilter = OfferFilter {
        search: Some(String::from("Firmware")),
        ..OfferFilter::default()
    };
    let by_title: Vec<Offer> = persistence
        .list_offers(&filter)
        .expect("list should succeed");
    assert_eq!(by_title.len(), 1);

    let filter: OfferFilter = OfferFilter {
        search: Some(String::from("Acme")),
        ..OfferFilter::default()
    };
    let by_organization: Vec<Offer> = persistence
        .list_offers(&filter)
        .expect("list should succeed");
    assert_eq!(by_organization.len(), 2);
}

#[test]
fn test_list_offers_orders_newest_first() {
    let mut persistence: Persistence = create_test_persistence();
    insert_test_offer(&mut persistence, "Older", "2026-01-10T09:00:00Z");
    insert_test_offer(&mut persistence, "Newer", "2026-03-01T09:00:00Z");

    let listed: Vec<Offer> = persistence
        .list_offers(&OfferFilter::default())
        .expect("list should succeed");

    assert_eq!(listed[0].title, "Newer");
    assert_eq!(listed[1].title, "Older");
}

#[test]
fn test_list_offers_owner_matches_contact_email_fallback() {
    let mut persistence: Persistence = create_test_persistence();
    insert_test_offer(&mut persistence, "Legacy offer", "2026-01-10T09:00:00Z");

    let filter: OfferFilter = OfferFilter {
        owner: Some(OwnerKey {
            account_id: 12345,
            contact_email: String::from("jane@acme.example"),
        }),
        ..OfferFilter::default()
    };
    let listed: Vec<Offer> = persistence
        .list_offers(&filter)
        .expect("list should succeed");

    assert_eq!(listed.len(), 1);

    let filter: OfferFilter = OfferFilter {
        owner: Some(OwnerKey {
            account_id: 12345,
            contact_email: String::from("someone-else@corp.example"),
        }),
        ..OfferFilter::default()
    };
    let listed: Vec<Offer> = persistence
        .list_offers(&filter)
        .expect("list should succeed");
    assert!(listed.is_empty());
}

#[test]
fn test_favorite_toggle_round_trip() {
    let mut persistence: Persistence = create_test_persistence();
    let offer: Offer = insert_test_offer(&mut persistence, "Firmware", "2026-01-10T09:00:00Z");
    let student = register_student(&mut persistence, "student1");

    let favorites = persistence
        .favorites_for_student(student.id)
        .expect("favorites should load");
    let toggle = intern_link::toggle_favorite(&favorites, &student, offer.id);
    persistence
        .persist_favorite_toggle(student.id, offer.id, &toggle)
        .expect("toggle should persist");

    assert!(
        persistence
            .is_favorite(student.id, offer.id)
            .expect("check should succeed")
    );
    let bookmarked: Vec<Offer> = persistence
        .favorite_offers(student.id)
        .expect("favorite offers should load");
    assert_eq!(bookmarked.len(), 1);

    let favorites = persistence
        .favorites_for_student(student.id)
        .expect("favorites should load");
    let toggle = intern_link::toggle_favorite(&favorites, &student, offer.id);
    persistence
        .persist_favorite_toggle(student.id, offer.id, &toggle)
        .expect("toggle should persist");

    assert!(
        !persistence
            .is_favorite(student.id, offer.id)
            .expect("check should succeed")
    );
}
