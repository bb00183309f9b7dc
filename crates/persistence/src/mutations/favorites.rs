// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Bookmark mutations.

use crate::data_models::NewFavoriteRow;
use crate::diesel_schema::favorites;
use crate::error::PersistenceError;
use diesel::prelude::*;

/// Inserts a bookmark pair.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_favorite(
    conn: &mut SqliteConnection,
    student_id: i64,
    offer_id: i64,
) -> Result<(), PersistenceError> {
    let row: NewFavoriteRow = NewFavoriteRow {
        student_id,
        offer_id,
    };
    diesel::insert_into(favorites::table)
        .values(&row)
        .execute(conn)?;
    Ok(())
}

/// Deletes a bookmark pair. Deleting an absent pair is a no-op.
///
/// # Errors
///
/// Returns an error if the delete fails.
pub fn delete_favorite(
    conn: &mut SqliteConnection,
    student_id: i64,
    offer_id: i64,
) -> Result<(), PersistenceError> {
    diesel::delete(
        favorites::table
            .filter(favorites::student_id.eq(student_id))
            .filter(favorites::offer_id.eq(offer_id)),
    )
    .execute(conn)?;
    Ok(())
}
