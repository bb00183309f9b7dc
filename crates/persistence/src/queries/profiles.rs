// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Student profile lookups.

use crate::data_models::ProfileRow;
use crate::diesel_schema::student_profiles;
use crate::error::PersistenceError;
use diesel::prelude::*;
use intern_link_domain::StudentProfile;

/// Retrieves a student's profile, if one has been created.
///
/// # Errors
///
/// Returns a query error. A missing profile is `Ok(None)`; creation is
/// the caller's call (profiles are created lazily on first access).
pub fn get_profile(
    conn: &mut SqliteConnection,
    account_id: i64,
) -> Result<Option<StudentProfile>, PersistenceError> {
    let row: Option<ProfileRow> = student_profiles::table
        .filter(student_profiles::account_id.eq(account_id))
        .first::<ProfileRow>(conn)
        .optional()?;

    Ok(row.map(ProfileRow::into_domain))
}
