// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Application lookups and the capacity count.

use crate::data_models::ApplicationRow;
use crate::diesel_schema::applications;
use crate::error::PersistenceError;
use diesel::prelude::*;
use intern_link_domain::Application;

/// Retrieves one application by identity.
///
/// # Errors
///
/// Returns `NotFound` if the application does not exist, or a query error.
pub fn get_application(
    conn: &mut SqliteConnection,
    application_id: i64,
) -> Result<Application, PersistenceError> {
    let row: ApplicationRow = applications::table
        .filter(applications::application_id.eq(application_id))
        .first::<ApplicationRow>(conn)
        .optional()?
        .ok_or_else(|| PersistenceError::NotFound(format!("application {application_id}")))?;

    row.into_domain()
}

/// Lists an offer's applications in arrival order.
///
/// # Errors
///
/// Returns an error if the query fails or a stored row cannot be decoded.
pub fn applications_for_offer(
    conn: &mut SqliteConnection,
    offer_id: i64,
) -> Result<Vec<Application>, PersistenceError> {
    let rows: Vec<ApplicationRow> = applications::table
        .filter(applications::offer_id.eq(offer_id))
        .order(applications::applied_at.asc())
        .load::<ApplicationRow>(conn)?;

    rows.into_iter().map(ApplicationRow::into_domain).collect()
}

/// Lists a student's applications, newest first.
///
/// # Errors
///
/// Returns an error if the query fails or a stored row cannot be decoded.
pub fn applications_for_student(
    conn: &mut SqliteConnection,
    student_id: i64,
) -> Result<Vec<Application>, PersistenceError> {
    let rows: Vec<ApplicationRow> = applications::table
        .filter(applications::student_id.eq(student_id))
        .order(applications::applied_at.desc())
        .load::<ApplicationRow>(conn)?;

    rows.into_iter().map(ApplicationRow::into_domain).collect()
}

/// Counts an offer's applications.
///
/// This is the fresh count the capacity decisions are made from.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn count_for_offer(
    conn: &mut SqliteConnection,
    offer_id: i64,
) -> Result<i64, PersistenceError> {
    let count: i64 = applications::table
        .filter(applications::offer_id.eq(offer_id))
        .count()
        .get_result(conn)?;
    Ok(count)
}
