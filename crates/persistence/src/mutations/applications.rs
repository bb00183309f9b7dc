// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Application mutations.

use crate::data_models::NewApplicationRow;
use crate::diesel_schema::applications;
use crate::error::PersistenceError;
use diesel::prelude::*;
use intern_link_domain::{Application, ApplicationStatus};

/// Inserts a new application and returns its assigned identity.
///
/// The `(student, offer)` uniqueness constraint backs up the engine's
/// duplicate check; a violation surfaces as `DuplicateKey`.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_application(
    conn: &mut SqliteConnection,
    application: &Application,
) -> Result<i64, PersistenceError> {
    let row: NewApplicationRow = NewApplicationRow::from_domain(application);
    let application_id: i64 = diesel::insert_into(applications::table)
        .values(&row)
        .returning(applications::application_id)
        .get_result(conn)?;
    Ok(application_id)
}

/// Deletes an application.
///
/// # Errors
///
/// Returns `NotFound` if the application does not exist, or a query error.
pub fn delete_application(
    conn: &mut SqliteConnection,
    application_id: i64,
) -> Result<(), PersistenceError> {
    let deleted: usize = diesel::delete(
        applications::table.filter(applications::application_id.eq(application_id)),
    )
    .execute(conn)?;

    if deleted == 0 {
        return Err(PersistenceError::NotFound(format!(
            "application {application_id}"
        )));
    }
    Ok(())
}

/// Writes an application's status.
///
/// # Errors
///
/// Returns `NotFound` if the application does not exist, or a query error.
pub fn update_application_status(
    conn: &mut SqliteConnection,
    application_id: i64,
    status: ApplicationStatus,
) -> Result<(), PersistenceError> {
    let updated: usize = diesel::update(
        applications::table.filter(applications::application_id.eq(application_id)),
    )
    .set(applications::status.eq(status.as_str()))
    .execute(conn)?;

    if updated == 0 {
        return Err(PersistenceError::NotFound(format!(
            "application {application_id}"
        )));
    }
    Ok(())
}
