// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Account mutations.

use crate::data_models::NewAccountRow;
use crate::diesel_schema::accounts;
use crate::error::PersistenceError;
use diesel::prelude::*;
use intern_link_domain::Role;
use tracing::info;

/// Creates a new account.
///
/// The password is hashed with bcrypt before it touches the database.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `username` - The login name (unique)
/// * `email` - The contact email
/// * `password` - The plaintext password to hash
/// * `role` - The single role assigned to the account
/// * `is_superuser` - Whether the account bypasses authorization checks
/// * `created_at` - Creation timestamp (RFC 3339)
///
/// # Errors
///
/// Returns `DuplicateKey` if the username is taken, or an error if
/// hashing or the insert fails.
#[allow(clippy::too_many_arguments)]
pub fn create_account(
    conn: &mut SqliteConnection,
    username: &str,
    email: &str,
    password: &str,
    role: Role,
    is_superuser: bool,
    created_at: &str,
) -> Result<i64, PersistenceError> {
    let password_hash: String = bcrypt::hash(password, bcrypt::DEFAULT_COST)
        .map_err(|e| PersistenceError::Other(format!("Failed to hash password: {e}")))?;

    let row: NewAccountRow = NewAccountRow {
        username: username.to_string(),
        email: email.to_string(),
        password_hash,
        role: role.as_str().to_string(),
        is_superuser: i32::from(is_superuser),
        created_at: created_at.to_string(),
    };

    let account_id: i64 = diesel::insert_into(accounts::table)
        .values(&row)
        .returning(accounts::account_id)
        .get_result(conn)?;

    info!(account_id, username, role = role.as_str(), "Created account");

    Ok(account_id)
}

/// Reassigns an account's role.
///
/// Granting Admin sets the superuser flag; any other role clears it.
///
/// # Errors
///
/// Returns `NotFound` if the account does not exist, or a query error.
pub fn update_account_role(
    conn: &mut SqliteConnection,
    account_id: i64,
    role: Role,
) -> Result<(), PersistenceError> {
    let is_superuser: i32 = i32::from(role == Role::Admin);

    let updated: usize = diesel::update(accounts::table.filter(accounts::account_id.eq(account_id)))
        .set((
            accounts::role.eq(role.as_str()),
            accounts::is_superuser.eq(is_superuser),
        ))
        .execute(conn)?;

    if updated == 0 {
        return Err(PersistenceError::NotFound(format!("account {account_id}")));
    }

    info!(account_id, role = role.as_str(), "Reassigned account role");

    Ok(())
}
