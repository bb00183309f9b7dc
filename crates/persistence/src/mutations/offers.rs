// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Offer mutations.

use crate::data_models::NewOfferRow;
use crate::diesel_schema::offers;
use crate::error::PersistenceError;
use diesel::prelude::*;
use intern_link_domain::{Offer, OfferState};

/// Inserts a new offer and returns its assigned identity.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_offer(conn: &mut SqliteConnection, offer: &Offer) -> Result<i64, PersistenceError> {
    let row: NewOfferRow = NewOfferRow::from_domain(offer);
    let offer_id: i64 = diesel::insert_into(offers::table)
        .values(&row)
        .returning(offers::offer_id)
        .get_result(conn)?;
    Ok(offer_id)
}

/// Writes an offer's lifecycle fields.
///
/// State and closing reason always travel together; the "reason set iff
/// closed" invariant is the engine's, this function just records both
/// sides of it atomically.
///
/// # Errors
///
/// Returns `NotFound` if the offer does not exist, or a query error.
pub fn update_offer_lifecycle(
    conn: &mut SqliteConnection,
    offer_id: i64,
    state: OfferState,
    closing_reason: Option<&str>,
) -> Result<(), PersistenceError> {
    let updated: usize =
        diesel::update(offers::table.filter(offers::offer_id.eq(offer_id)))
            .set((
                offers::state.eq(state.as_str()),
                offers::closing_reason.eq(closing_reason),
            ))
            .execute(conn)?;

    if updated == 0 {
        return Err(PersistenceError::NotFound(format!("offer {offer_id}")));
    }
    Ok(())
}
