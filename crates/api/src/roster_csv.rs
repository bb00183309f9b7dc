// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! CSV roster export for an offer's applications.
//!
//! Rendering stays here in the boundary layer; the engine knows nothing
//! about export formats. Rows are written in arrival order, one per
//! application.

use intern_link::OfferCase;
use intern_link_domain::{Identity, OfferId};
use intern_link_persistence::{Persistence, PersistenceError};

use crate::error::{ApiError, translate_domain_error};
use crate::gate::AuthorizationGate;

/// Renders an offer's application roster as CSV.
///
/// Columns: applicant username, applicant email, applied-at timestamp,
/// status. Requires the owning company or staff.
///
/// # Errors
///
/// Returns an error if the offer does not exist, the actor may not
/// export it, or an applicant account cannot be resolved.
pub fn export_roster_csv(
    persistence: &mut Persistence,
    offer_id: i64,
    actor: &Identity,
) -> Result<String, ApiError> {
    let case: OfferCase = persistence
        .load_offer_case(OfferId::new(offer_id))
        .map_err(|err| match err {
            PersistenceError::NotFound(_) => translate_domain_error(
                intern_link_domain::DomainError::OfferNotFound(offer_id),
            ),
            other => other.into(),
        })?;

    AuthorizationGate::authorize_export_roster(actor, &case.offer)?;

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(["applicant", "email", "applied_at", "status"])
        .map_err(|e| ApiError::Internal {
            message: format!("Failed to write CSV header: {e}"),
        })?;

    for application in &case.applications {
        let applicant: Identity = persistence.get_account(application.student_id)?;
        writer
            .write_record([
                applicant.username.as_str(),
                applicant.email.as_str(),
                application.applied_at.as_str(),
                application.status.as_str(),
            ])
            .map_err(|e| ApiError::Internal {
                message: format!("Failed to write CSV row: {e}"),
            })?;
    }

    let bytes: Vec<u8> = writer.into_inner().map_err(|e| ApiError::Internal {
        message: format!("Failed to finish CSV: {e}"),
    })?;

    String::from_utf8(bytes).map_err(|e| ApiError::Internal {
        message: format!("CSV output was not UTF-8: {e}"),
    })
}
