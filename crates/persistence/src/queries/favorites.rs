// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Bookmark lookups.

use crate::data_models::{FavoriteRow, OfferRow};
use crate::diesel_schema::{favorites, offers};
use crate::error::PersistenceError;
use diesel::prelude::*;
use intern_link_domain::{Favorite, Offer};

/// Lists a student's bookmarks.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn favorites_for_student(
    conn: &mut SqliteConnection,
    student_id: i64,
) -> Result<Vec<Favorite>, PersistenceError> {
    let rows: Vec<FavoriteRow> = favorites::table
        .filter(favorites::student_id.eq(student_id))
        .load::<FavoriteRow>(conn)?;

    Ok(rows.into_iter().map(FavoriteRow::into_domain).collect())
}

/// Checks whether a single bookmark exists.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn is_favorite(
    conn: &mut SqliteConnection,
    student_id: i64,
    offer_id: i64,
) -> Result<bool, PersistenceError> {
    let count: i64 = favorites::table
        .filter(favorites::student_id.eq(student_id))
        .filter(favorites::offer_id.eq(offer_id))
        .count()
        .get_result(conn)?;
    Ok(count > 0)
}

/// Lists the offers a student has bookmarked, newest first.
///
/// # Errors
///
/// Returns an error if the query fails or a stored row cannot be decoded.
pub fn favorite_offers(
    conn: &mut SqliteConnection,
    student_id: i64,
) -> Result<Vec<Offer>, PersistenceError> {
    let rows: Vec<OfferRow> = offers::table
        .inner_join(favorites::table)
        .filter(favorites::student_id.eq(student_id))
        .select(offers::all_columns)
        .order(offers::submitted_at.desc())
        .load::<OfferRow>(conn)?;

    rows.into_iter().map(OfferRow::into_domain).collect()
}
