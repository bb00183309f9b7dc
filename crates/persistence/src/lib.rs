// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the InternLink marketplace.
//!
//! This crate provides `SQLite` persistence for offers, applications,
//! accounts, profiles, and bookmarks. It is built on Diesel with embedded
//! migrations.
//!
//! The lifecycle engine decides; this crate records. A request handler
//! loads an [`intern_link::OfferCase`], runs the engine, and hands the
//! resulting transition back to [`Persistence::persist_transition`], which
//! commits it in one transaction.
//!
//! ## Testing
//!
//! `new_in_memory()` gives every test its own uniquely named in-memory
//! database, so tests are deterministic and need no external
//! infrastructure.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, info};

use intern_link::{FavoriteToggle, OfferCase, TransitionResult};
use intern_link_domain::{
    AccountId, Application, ApplicationId, Favorite, Identity, Offer, OfferId, Role,
    StudentProfile,
};

mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

pub use error::PersistenceError;
pub use queries::offers::{OfferFilter, OwnerKey};
pub use queries::stats::{DashboardStats, MonthlyCount, TopOffer};

/// Atomic counter for generating unique in-memory database names.
///
/// This ensures deterministic test isolation by eliminating time-based
/// collisions. Each call to `new_in_memory()` receives a unique
/// sequential ID.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Embedded migrations, compiled into the binary.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// The `SQLite`-backed store.
pub struct Persistence {
    conn: SqliteConnection,
}

impl Persistence {
    /// Opens a uniquely named in-memory database and runs migrations.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection or migrations fail.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let url: String = format!("file:intern_link_mem_{id}?mode=memory&cache=shared");
        Self::establish(&url)
    }

    /// Opens (creating if needed) a database file and runs migrations.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection or migrations fail.
    pub fn open(path: &str) -> Result<Self, PersistenceError> {
        Self::establish(path)
    }

    fn establish(url: &str) -> Result<Self, PersistenceError> {
        let mut conn: SqliteConnection = SqliteConnection::establish(url)
            .map_err(|e| PersistenceError::DatabaseConnectionFailed(e.to_string()))?;

        diesel::sql_query("PRAGMA foreign_keys = ON")
            .execute(&mut conn)
            .map_err(|e| PersistenceError::DatabaseConnectionFailed(e.to_string()))?;

        conn.run_pending_migrations(MIGRATIONS)
            .map_err(|e| PersistenceError::MigrationFailed(e.to_string()))?;

        info!(url, "Opened database");

        Ok(Self { conn })
    }

    // ------------------------------------------------------------------
    // Offers and cases
    // ------------------------------------------------------------------

    /// Retrieves one offer.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the offer does not exist, or a query error.
    pub fn get_offer(&mut self, offer_id: OfferId) -> Result<Offer, PersistenceError> {
        queries::offers::get_offer(&mut self.conn, offer_id.value())
    }

    /// Lists offers matching a filter, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_offers(&mut self, filter: &OfferFilter) -> Result<Vec<Offer>, PersistenceError> {
        queries::offers::list_offers(&mut self.conn, filter)
    }

    /// Loads an offer together with its applications.
    ///
    /// This is the state the lifecycle engine transitions on. The
    /// application list is read fresh on every load.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the offer does not exist, or a query error.
    pub fn load_offer_case(&mut self, offer_id: OfferId) -> Result<OfferCase, PersistenceError> {
        let offer: Offer = queries::offers::get_offer(&mut self.conn, offer_id.value())?;
        let applications: Vec<Application> =
            queries::applications::applications_for_offer(&mut self.conn, offer_id.value())?;

        Ok(OfferCase {
            offer,
            applications,
        })
    }

    /// Persists a submission transition: inserts the new offer and
    /// returns it with its assigned identity.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn persist_submission(
        &mut self,
        result: &TransitionResult,
    ) -> Result<Offer, PersistenceError> {
        let offer_id: i64 = mutations::offers::insert_offer(&mut self.conn, &result.new_case.offer)?;
        debug!(offer_id, "Inserted offer");

        queries::offers::get_offer(&mut self.conn, offer_id)
    }

    /// Persists a lifecycle transition in one transaction.
    ///
    /// The stored rows are reconciled against the new case: the offer's
    /// lifecycle fields are written, removed applications are deleted,
    /// new ones inserted, and changed statuses updated. Returns the case
    /// as reloaded from the store, with fresh identities.
    ///
    /// # Errors
    ///
    /// Returns an error if any write fails; the transaction rolls back.
    pub fn persist_transition(
        &mut self,
        result: &TransitionResult,
    ) -> Result<OfferCase, PersistenceError> {
        let case: &OfferCase = &result.new_case;
        let offer_id: i64 = case.offer.id.value();

        self.conn.transaction::<_, PersistenceError, _>(|conn| {
            mutations::offers::update_offer_lifecycle(
                conn,
                offer_id,
                case.offer.state,
                case.offer.closing_reason.as_deref(),
            )?;

            let existing: Vec<Application> =
                queries::applications::applications_for_offer(conn, offer_id)?;

            for application in &existing {
                let kept: bool = case
                    .applications
                    .iter()
                    .any(|candidate| candidate.id == application.id);
                if !kept {
                    mutations::applications::delete_application(conn, application.id.value())?;
                    debug!(
                        application_id = application.id.value(),
                        offer_id, "Deleted application"
                    );
                }
            }

            for application in &case.applications {
                if application.id == ApplicationId::UNASSIGNED {
                    let application_id: i64 =
                        mutations::applications::insert_application(conn, application)?;
                    debug!(application_id, offer_id, "Inserted application");
                } else if let Some(previous) = existing
                    .iter()
                    .find(|candidate| candidate.id == application.id)
                {
                    if previous.status != application.status {
                        mutations::applications::update_application_status(
                            conn,
                            application.id.value(),
                            application.status,
                        )?;
                        debug!(
                            application_id = application.id.value(),
                            status = application.status.as_str(),
                            "Updated application status"
                        );
                    }
                }
            }

            Ok(())
        })?;

        info!(
            offer_id,
            state = case.offer.state.as_str(),
            "Persisted transition"
        );

        self.load_offer_case(case.offer.id)
    }

    // ------------------------------------------------------------------
    // Applications
    // ------------------------------------------------------------------

    /// Retrieves one application.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the application does not exist, or a query
    /// error.
    pub fn get_application(
        &mut self,
        application_id: ApplicationId,
    ) -> Result<Application, PersistenceError> {
        queries::applications::get_application(&mut self.conn, application_id.value())
    }

    /// Lists an offer's applications in arrival order.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn applications_for_offer(
        &mut self,
        offer_id: OfferId,
    ) -> Result<Vec<Application>, PersistenceError> {
        queries::applications::applications_for_offer(&mut self.conn, offer_id.value())
    }

    /// Lists a student's applications, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn applications_for_student(
        &mut self,
        student_id: AccountId,
    ) -> Result<Vec<Application>, PersistenceError> {
        queries::applications::applications_for_student(&mut self.conn, student_id.value())
    }

    /// Counts an offer's applications with a fresh query.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn count_applications(&mut self, offer_id: OfferId) -> Result<i64, PersistenceError> {
        queries::applications::count_for_offer(&mut self.conn, offer_id.value())
    }

    // ------------------------------------------------------------------
    // Favorites
    // ------------------------------------------------------------------

    /// Lists a student's bookmarks.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn favorites_for_student(
        &mut self,
        student_id: AccountId,
    ) -> Result<Vec<Favorite>, PersistenceError> {
        queries::favorites::favorites_for_student(&mut self.conn, student_id.value())
    }

    /// Checks whether a single bookmark exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn is_favorite(
        &mut self,
        student_id: AccountId,
        offer_id: OfferId,
    ) -> Result<bool, PersistenceError> {
        queries::favorites::is_favorite(&mut self.conn, student_id.value(), offer_id.value())
    }

    /// Lists the offers a student has bookmarked, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn favorite_offers(
        &mut self,
        student_id: AccountId,
    ) -> Result<Vec<Offer>, PersistenceError> {
        queries::favorites::favorite_offers(&mut self.conn, student_id.value())
    }

    /// Records the outcome of a bookmark toggle.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub fn persist_favorite_toggle(
        &mut self,
        student_id: AccountId,
        offer_id: OfferId,
        toggle: &FavoriteToggle,
    ) -> Result<(), PersistenceError> {
        if toggle.added {
            mutations::favorites::insert_favorite(
                &mut self.conn,
                student_id.value(),
                offer_id.value(),
            )?;
        } else {
            mutations::favorites::delete_favorite(
                &mut self.conn,
                student_id.value(),
                offer_id.value(),
            )?;
        }
        debug!(
            student_id = student_id.value(),
            offer_id = offer_id.value(),
            added = toggle.added,
            "Persisted favorite toggle"
        );
        Ok(())
    }

    // ------------------------------------------------------------------
    // Accounts and profiles
    // ------------------------------------------------------------------

    /// Creates an account with a bcrypt-hashed password.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateKey` if the username is taken, or an error if
    /// hashing or the insert fails.
    pub fn create_account(
        &mut self,
        username: &str,
        email: &str,
        password: &str,
        role: Role,
        is_superuser: bool,
        created_at: &str,
    ) -> Result<AccountId, PersistenceError> {
        let account_id: i64 = mutations::accounts::create_account(
            &mut self.conn,
            username,
            email,
            password,
            role,
            is_superuser,
            created_at,
        )?;
        Ok(AccountId::new(account_id))
    }

    /// Retrieves one account as an identity.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the account does not exist, or a query error.
    pub fn get_account(&mut self, account_id: AccountId) -> Result<Identity, PersistenceError> {
        queries::accounts::get_account(&mut self.conn, account_id.value())
    }

    /// Retrieves an account by login name.
    ///
    /// # Errors
    ///
    /// Returns a query error. A missing account is `Ok(None)`.
    pub fn get_account_by_username(
        &mut self,
        username: &str,
    ) -> Result<Option<Identity>, PersistenceError> {
        queries::accounts::get_account_by_username(&mut self.conn, username)?
            .map(data_models::AccountRow::into_identity)
            .transpose()
    }

    /// Checks a username/password pair against the stored hash.
    ///
    /// # Errors
    ///
    /// Returns a query error. Unknown usernames and wrong passwords are
    /// both `Ok(None)` so callers cannot tell them apart.
    pub fn verify_credentials(
        &mut self,
        username: &str,
        password: &str,
    ) -> Result<Option<Identity>, PersistenceError> {
        let Some(row) = queries::accounts::get_account_by_username(&mut self.conn, username)?
        else {
            return Ok(None);
        };

        let matches: bool = bcrypt::verify(password, &row.password_hash)
            .map_err(|e| PersistenceError::Other(format!("Failed to verify password: {e}")))?;
        if !matches {
            return Ok(None);
        }

        row.into_identity().map(Some)
    }

    /// Lists all accounts as identities.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_accounts(&mut self) -> Result<Vec<Identity>, PersistenceError> {
        queries::accounts::list_accounts(&mut self.conn)
    }

    /// Reassigns an account's role. Granting Admin sets the superuser
    /// flag; any other role clears it.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the account does not exist, or a query error.
    pub fn update_account_role(
        &mut self,
        account_id: AccountId,
        role: Role,
    ) -> Result<(), PersistenceError> {
        mutations::accounts::update_account_role(&mut self.conn, account_id.value(), role)
    }

    /// Retrieves a student's profile, creating an empty one on first
    /// access.
    ///
    /// # Errors
    ///
    /// Returns an error if the query or the lazy insert fails.
    pub fn get_or_create_profile(
        &mut self,
        account_id: AccountId,
    ) -> Result<StudentProfile, PersistenceError> {
        if let Some(profile) = queries::profiles::get_profile(&mut self.conn, account_id.value())? {
            return Ok(profile);
        }

        let profile: StudentProfile = StudentProfile::empty(account_id);
        mutations::profiles::insert_profile(&mut self.conn, &profile)?;
        debug!(
            account_id = account_id.value(),
            "Created student profile lazily"
        );
        Ok(profile)
    }

    /// Writes a profile's optional fields.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the profile does not exist, or a query error.
    pub fn update_profile(&mut self, profile: &StudentProfile) -> Result<(), PersistenceError> {
        mutations::profiles::update_profile(&mut self.conn, profile)
    }

    // ------------------------------------------------------------------
    // Statistics
    // ------------------------------------------------------------------

    /// Computes the staff dashboard summary.
    ///
    /// # Errors
    ///
    /// Returns an error if any aggregate query fails.
    pub fn dashboard_stats(&mut self, since: &str) -> Result<DashboardStats, PersistenceError> {
        queries::stats::dashboard_stats(&mut self.conn, since)
    }
}
