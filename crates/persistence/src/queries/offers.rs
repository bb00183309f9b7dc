// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Offer lookups and filtered listings.

use crate::data_models::OfferRow;
use crate::diesel_schema::offers;
use crate::error::PersistenceError;
use diesel::prelude::*;
use intern_link_domain::{Offer, OfferState};

/// Ownership key for company-scoped listings.
///
/// An offer belongs to a company if its bound account matches, or, for
/// unbound legacy offers, if the contact email matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnerKey {
    /// The company account.
    pub account_id: i64,
    /// The company contact email for the legacy fallback.
    pub contact_email: String,
}

/// Filter for offer listings.
///
/// Fields compose with AND; `None` means "don't filter". Visibility
/// scoping (which states a role may see) is expressed through `states`
/// and `owner` by the boundary layer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OfferFilter {
    /// Substring match over title, description, and organization.
    pub search: Option<String>,
    /// Substring match over the city.
    pub city: Option<String>,
    /// Exact duration bucket.
    pub duration: Option<String>,
    /// Exact domain tag.
    pub domain: Option<String>,
    /// Remote flag.
    pub remote: Option<bool>,
    /// Restrict to these states.
    pub states: Option<Vec<OfferState>>,
    /// Restrict to offers owned by this company.
    pub owner: Option<OwnerKey>,
}

/// Retrieves one offer by identity.
///
/// # Errors
///
/// Returns `NotFound` if the offer does not exist, or a query error.
pub fn get_offer(conn: &mut SqliteConnection, offer_id: i64) -> Result<Offer, PersistenceError> {
    let row: OfferRow = offers::table
        .filter(offers::offer_id.eq(offer_id))
        .first::<OfferRow>(conn)
        .optional()?
        .ok_or_else(|| PersistenceError::NotFound(format!("offer {offer_id}")))?;

    row.into_domain()
}

/// Lists offers matching a filter, newest first.
///
/// # Errors
///
/// Returns an error if the query fails or a stored row cannot be decoded.
pub fn list_offers(
    conn: &mut SqliteConnection,
    filter: &OfferFilter,
) -> Result<Vec<Offer>, PersistenceError> {
    let mut query = offers::table.into_boxed();

    if let Some(search) = &filter.search {
        let pattern: String = format!("%{search}%");
        query = query.filter(
            offers::title
                .like(pattern.clone())
                .or(offers::description.like(pattern.clone()))
                .or(offers::organization.like(pattern)),
        );
    }

    if let Some(city) = &filter.city {
        query = query.filter(offers::city.like(format!("%{city}%")));
    }

    if let Some(duration) = &filter.duration {
        query = query.filter(offers::duration.eq(duration.clone()));
    }

    if let Some(domain) = &filter.domain {
        query = query.filter(offers::domain.eq(domain.clone()));
    }

    if let Some(remote) = filter.remote {
        query = query.filter(offers::remote.eq(i32::from(remote)));
    }

    if let Some(states) = &filter.states {
        let literals: Vec<&'static str> = states.iter().map(OfferState::as_str).collect();
        query = query.filter(offers::state.eq_any(literals));
    }

    if let Some(owner) = &filter.owner {
        query = query.filter(
            offers::company_id
                .eq(owner.account_id)
                .or(offers::contact_email.eq(owner.contact_email.clone())),
        );
    }

    let rows: Vec<OfferRow> = query
        .order(offers::submitted_at.desc())
        .load::<OfferRow>(conn)?;

    rows.into_iter().map(OfferRow::into_domain).collect()
}
