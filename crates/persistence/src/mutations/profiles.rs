// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Student profile mutations.

use crate::data_models::NewProfileRow;
use crate::diesel_schema::student_profiles;
use crate::error::PersistenceError;
use diesel::prelude::*;
use intern_link_domain::StudentProfile;

/// Inserts an empty profile for an account.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_profile(
    conn: &mut SqliteConnection,
    profile: &StudentProfile,
) -> Result<(), PersistenceError> {
    let row: NewProfileRow = NewProfileRow {
        account_id: profile.account_id.value(),
        bio: profile.bio.clone(),
        phone: profile.phone.clone(),
        cv_url: profile.cv_url.clone(),
    };
    diesel::insert_into(student_profiles::table)
        .values(&row)
        .execute(conn)?;
    Ok(())
}

/// Writes a profile's optional fields.
///
/// # Errors
///
/// Returns `NotFound` if the profile does not exist, or a query error.
pub fn update_profile(
    conn: &mut SqliteConnection,
    profile: &StudentProfile,
) -> Result<(), PersistenceError> {
    let updated: usize = diesel::update(
        student_profiles::table
            .filter(student_profiles::account_id.eq(profile.account_id.value())),
    )
    .set((
        student_profiles::bio.eq(profile.bio.clone()),
        student_profiles::phone.eq(profile.phone.clone()),
        student_profiles::cv_url.eq(profile.cv_url.clone()),
    ))
    .execute(conn)?;

    if updated == 0 {
        return Err(PersistenceError::NotFound(format!(
            "profile for account {}",
            profile.account_id.value()
        )));
    }
    Ok(())
}
