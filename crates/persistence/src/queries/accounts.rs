// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Account lookups.

use crate::data_models::AccountRow;
use crate::diesel_schema::accounts;
use crate::error::PersistenceError;
use diesel::prelude::*;
use intern_link_domain::Identity;

/// Retrieves one account as an identity.
///
/// # Errors
///
/// Returns `NotFound` if the account does not exist, or a query error.
pub fn get_account(
    conn: &mut SqliteConnection,
    account_id: i64,
) -> Result<Identity, PersistenceError> {
    let row: AccountRow = accounts::table
        .filter(accounts::account_id.eq(account_id))
        .first::<AccountRow>(conn)
        .optional()?
        .ok_or_else(|| PersistenceError::NotFound(format!("account {account_id}")))?;

    row.into_identity()
}

/// Retrieves the raw account row for a login name.
///
/// The raw row carries the password hash and is only consumed by the
/// credential check; everything else works with [`Identity`].
///
/// # Errors
///
/// Returns a query error. A missing account is `Ok(None)`.
pub fn get_account_by_username(
    conn: &mut SqliteConnection,
    username: &str,
) -> Result<Option<AccountRow>, PersistenceError> {
    let row: Option<AccountRow> = accounts::table
        .filter(accounts::username.eq(username))
        .first::<AccountRow>(conn)
        .optional()?;
    Ok(row)
}

/// Lists all accounts as identities.
///
/// # Errors
///
/// Returns an error if the query fails or a stored role cannot be decoded.
pub fn list_accounts(conn: &mut SqliteConnection) -> Result<Vec<Identity>, PersistenceError> {
    let rows: Vec<AccountRow> = accounts::table
        .order(accounts::username.asc())
        .load::<AccountRow>(conn)?;

    rows.into_iter().map(AccountRow::into_identity).collect()
}
