// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Row models and their conversions to domain types.
//!
//! Queryable structs mirror the column order of `diesel_schema.rs`
//! exactly. Enum-typed columns are stored as their string literals and
//! parsed on the way out; a parse failure means the stored data is
//! corrupt, reported as `SerializationError`.

use std::str::FromStr;

use crate::diesel_schema::{accounts, applications, favorites, offers, student_profiles};
use crate::error::PersistenceError;
use diesel::prelude::*;
use intern_link_domain::{
    AccountId, Application, ApplicationId, ApplicationStatus, Favorite, Identity, Offer, OfferId,
    OfferState, Role, StudentProfile,
};

/// A stored account row.
#[derive(Debug, Clone, Queryable)]
pub struct AccountRow {
    pub account_id: i64,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub is_superuser: i32,
    pub created_at: String,
}

impl AccountRow {
    /// Converts the row into the identity the engine reasons about.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored role is not a valid role literal.
    pub fn into_identity(self) -> Result<Identity, PersistenceError> {
        let role: Role = Role::from_str(&self.role)
            .map_err(|err| PersistenceError::SerializationError(err.to_string()))?;
        Ok(Identity::new(
            AccountId::new(self.account_id),
            self.username,
            self.email,
            role,
            self.is_superuser != 0,
        ))
    }
}

/// Insertable account row.
#[derive(Debug, Insertable)]
#[diesel(table_name = accounts)]
pub struct NewAccountRow {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub is_superuser: i32,
    pub created_at: String,
}

/// A stored student profile row.
#[derive(Debug, Clone, Queryable)]
pub struct ProfileRow {
    pub account_id: i64,
    pub bio: Option<String>,
    pub phone: Option<String>,
    pub cv_url: Option<String>,
}

impl ProfileRow {
    /// Converts the row into the domain profile.
    #[must_use]
    pub fn into_domain(self) -> StudentProfile {
        StudentProfile {
            account_id: AccountId::new(self.account_id),
            bio: self.bio,
            phone: self.phone,
            cv_url: self.cv_url,
        }
    }
}

/// Insertable student profile row.
#[derive(Debug, Insertable)]
#[diesel(table_name = student_profiles)]
pub struct NewProfileRow {
    pub account_id: i64,
    pub bio: Option<String>,
    pub phone: Option<String>,
    pub cv_url: Option<String>,
}

/// A stored offer row.
#[derive(Debug, Clone, Queryable)]
pub struct OfferRow {
    pub offer_id: i64,
    pub company_id: Option<i64>,
    pub organization: String,
    pub contact_name: String,
    pub contact_email: String,
    pub title: String,
    pub description: String,
    pub city: Option<String>,
    pub duration: Option<String>,
    pub domain: Option<String>,
    pub remote: Option<i32>,
    pub state: String,
    pub closing_reason: Option<String>,
    pub submitted_at: String,
}

impl OfferRow {
    /// Converts the row into the domain offer.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored state is not a valid state literal.
    pub fn into_domain(self) -> Result<Offer, PersistenceError> {
        let state: OfferState = OfferState::from_str(&self.state)
            .map_err(|err| PersistenceError::SerializationError(err.to_string()))?;
        Ok(Offer {
            id: OfferId::new(self.offer_id),
            company: self.company_id.map(AccountId::new),
            organization: self.organization,
            contact_name: self.contact_name,
            contact_email: self.contact_email,
            title: self.title,
            description: self.description,
            city: self.city,
            duration: self.duration,
            domain: self.domain,
            remote: self.remote.map(|value| value != 0),
            state,
            closing_reason: self.closing_reason,
            submitted_at: self.submitted_at,
        })
    }
}

/// Insertable offer row.
#[derive(Debug, Insertable)]
#[diesel(table_name = offers)]
pub struct NewOfferRow {
    pub company_id: Option<i64>,
    pub organization: String,
    pub contact_name: String,
    pub contact_email: String,
    pub title: String,
    pub description: String,
    pub city: Option<String>,
    pub duration: Option<String>,
    pub domain: Option<String>,
    pub remote: Option<i32>,
    pub state: String,
    pub closing_reason: Option<String>,
    pub submitted_at: String,
}

impl NewOfferRow {
    /// Builds an insertable row from a domain offer.
    #[must_use]
    pub fn from_domain(offer: &Offer) -> Self {
        Self {
            company_id: offer.company.map(|id| id.value()),
            organization: offer.organization.clone(),
            contact_name: offer.contact_name.clone(),
            contact_email: offer.contact_email.clone(),
            title: offer.title.clone(),
            description: offer.description.clone(),
            city: offer.city.clone(),
            duration: offer.duration.clone(),
            domain: offer.domain.clone(),
            remote: offer.remote.map(i32::from),
            state: offer.state.as_str().to_string(),
            closing_reason: offer.closing_reason.clone(),
            submitted_at: offer.submitted_at.clone(),
        }
    }
}

/// A stored application row.
#[derive(Debug, Clone, Queryable)]
pub struct ApplicationRow {
    pub application_id: i64,
    pub offer_id: i64,
    pub student_id: i64,
    pub status: String,
    pub applied_at: String,
}

impl ApplicationRow {
    /// Converts the row into the domain application.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored status is not a valid status literal.
    pub fn into_domain(self) -> Result<Application, PersistenceError> {
        let status: ApplicationStatus = ApplicationStatus::from_str(&self.status)
            .map_err(|err| PersistenceError::SerializationError(err.to_string()))?;
        Ok(Application {
            id: ApplicationId::new(self.application_id),
            offer_id: OfferId::new(self.offer_id),
            student_id: AccountId::new(self.student_id),
            status,
            applied_at: self.applied_at,
        })
    }
}

/// Insertable application row.
#[derive(Debug, Insertable)]
#[diesel(table_name = applications)]
pub struct NewApplicationRow {
    pub offer_id: i64,
    pub student_id: i64,
    pub status: String,
    pub applied_at: String,
}

impl NewApplicationRow {
    /// Builds an insertable row from a domain application.
    #[must_use]
    pub fn from_domain(application: &Application) -> Self {
        Self {
            offer_id: application.offer_id.value(),
            student_id: application.student_id.value(),
            status: application.status.as_str().to_string(),
            applied_at: application.applied_at.clone(),
        }
    }
}

/// A stored favorite row.
#[derive(Debug, Clone, Queryable)]
pub struct FavoriteRow {
    pub favorite_id: i64,
    pub student_id: i64,
    pub offer_id: i64,
}

impl FavoriteRow {
    /// Converts the row into the domain bookmark pair.
    #[must_use]
    pub const fn into_domain(self) -> Favorite {
        Favorite::new(
            AccountId::new(self.student_id),
            OfferId::new(self.offer_id),
        )
    }
}

/// Insertable favorite row.
#[derive(Debug, Insertable)]
#[diesel(table_name = favorites)]
pub struct NewFavoriteRow {
    pub student_id: i64,
    pub offer_id: i64,
}
