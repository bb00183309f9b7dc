// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Field-level validation rules.

use crate::error::DomainError;
use crate::types::{AccountId, Application, OfferDraft, OfferId};

/// Maximum length of an offer title.
const MAX_TITLE_LEN: usize = 200;

/// Maximum length of the organization and contact name fields.
const MAX_NAME_LEN: usize = 100;

/// Validates the fields of an offer draft.
///
/// # Errors
///
/// Returns an error if:
/// - The title is empty or longer than 200 characters
/// - The description is empty
/// - The organization or contact name is empty or longer than 100 characters
/// - The contact email is empty or has no `@`
pub fn validate_offer_draft(draft: &OfferDraft) -> Result<(), DomainError> {
    let title = draft.title.trim();
    if title.is_empty() {
        return Err(DomainError::InvalidTitle(String::from(
            "title must not be empty",
        )));
    }
    if title.chars().count() > MAX_TITLE_LEN {
        return Err(DomainError::InvalidTitle(format!(
            "title must be at most {MAX_TITLE_LEN} characters"
        )));
    }

    if draft.description.trim().is_empty() {
        return Err(DomainError::InvalidDescription(String::from(
            "description must not be empty",
        )));
    }

    let organization = draft.organization.trim();
    if organization.is_empty() {
        return Err(DomainError::InvalidOrganization(String::from(
            "organization must not be empty",
        )));
    }
    if organization.chars().count() > MAX_NAME_LEN {
        return Err(DomainError::InvalidOrganization(format!(
            "organization must be at most {MAX_NAME_LEN} characters"
        )));
    }

    let contact_name = draft.contact_name.trim();
    if contact_name.is_empty() {
        return Err(DomainError::InvalidContactName(String::from(
            "contact name must not be empty",
        )));
    }
    if contact_name.chars().count() > MAX_NAME_LEN {
        return Err(DomainError::InvalidContactName(format!(
            "contact name must be at most {MAX_NAME_LEN} characters"
        )));
    }

    validate_contact_email(&draft.contact_email)?;

    Ok(())
}

/// Validates a contact email address.
///
/// This is intentionally shallow: the address must be non-empty and carry
/// a local part and a domain around a single `@`. Deliverability is the
/// mail transport's problem.
///
/// # Errors
///
/// Returns `DomainError::InvalidContactEmail` if the address is malformed.
fn validate_contact_email(email: &str) -> Result<(), DomainError> {
    let email = email.trim();
    if email.is_empty() {
        return Err(DomainError::InvalidContactEmail(String::from(
            "contact email must not be empty",
        )));
    }

    let Some((local, domain)) = email.split_once('@') else {
        return Err(DomainError::InvalidContactEmail(String::from(
            "contact email must contain '@'",
        )));
    };
    if local.is_empty() || domain.is_empty() {
        return Err(DomainError::InvalidContactEmail(String::from(
            "contact email must have a local part and a domain",
        )));
    }

    Ok(())
}

/// Validates a login name.
///
/// # Errors
///
/// Returns `DomainError::InvalidUsername` if the name is empty or contains
/// whitespace.
pub fn validate_username(username: &str) -> Result<(), DomainError> {
    if username.is_empty() {
        return Err(DomainError::InvalidUsername(String::from(
            "username must not be empty",
        )));
    }
    if username.chars().any(char::is_whitespace) {
        return Err(DomainError::InvalidUsername(String::from(
            "username must not contain whitespace",
        )));
    }
    Ok(())
}

/// Validates that a student has not already applied to an offer.
///
/// # Errors
///
/// Returns `DomainError::DuplicateApplication` if an application by this
/// student already exists in the slice.
pub fn validate_applicant_unique(
    student_id: AccountId,
    offer_id: OfferId,
    applications: &[Application],
) -> Result<(), DomainError> {
    if applications
        .iter()
        .any(|application| application.student_id == student_id)
    {
        return Err(DomainError::DuplicateApplication {
            student_id: student_id.value(),
            offer_id: offer_id.value(),
        });
    }
    Ok(())
}
