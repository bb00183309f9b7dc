// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Dashboard statistics queries.
//!
//! Aggregations run entirely in the database. Monthly buckets key on the
//! `YYYY-MM` prefix of the stored RFC 3339 timestamps, which sorts and
//! groups correctly without parsing dates.

use crate::diesel_schema::{applications, offers};
use crate::error::PersistenceError;
use diesel::prelude::*;
use diesel::sql_types::{BigInt, Text};
use intern_link_domain::{ApplicationStatus, OfferState};
use serde::{Deserialize, Serialize};

/// One month's bucket in a time series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, QueryableByName)]
pub struct MonthlyCount {
    /// The month, formatted `YYYY-MM`.
    #[diesel(sql_type = Text)]
    pub month: String,
    /// The number of records created in that month.
    #[diesel(sql_type = BigInt)]
    pub count: i64,
}

/// One row of the most-applied-to offers list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, QueryableByName)]
pub struct TopOffer {
    /// The offer title.
    #[diesel(sql_type = Text)]
    pub title: String,
    /// Its application count.
    #[diesel(sql_type = BigInt)]
    pub count: i64,
}

/// Aggregate statistics for the staff dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_offers: i64,
    pub pending_offers: i64,
    pub validated_offers: i64,
    pub refused_offers: i64,
    pub closed_offers: i64,
    pub total_applications: i64,
    pub pending_applications: i64,
    pub accepted_applications: i64,
    pub refused_applications: i64,
    /// Offers submitted per month since the cutoff.
    pub offers_by_month: Vec<MonthlyCount>,
    /// Applications created per month since the cutoff.
    pub applications_by_month: Vec<MonthlyCount>,
    /// The five offers with the most applications.
    pub top_offers: Vec<TopOffer>,
}

fn count_offers_in_state(
    conn: &mut SqliteConnection,
    state: OfferState,
) -> Result<i64, PersistenceError> {
    let count: i64 = offers::table
        .filter(offers::state.eq(state.as_str()))
        .count()
        .get_result(conn)?;
    Ok(count)
}

fn count_applications_with_status(
    conn: &mut SqliteConnection,
    status: ApplicationStatus,
) -> Result<i64, PersistenceError> {
    let count: i64 = applications::table
        .filter(applications::status.eq(status.as_str()))
        .count()
        .get_result(conn)?;
    Ok(count)
}

/// Computes the full dashboard summary.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `since` - RFC 3339 cutoff for the monthly series (typically one year
///   back from now, supplied by the boundary)
///
/// # Errors
///
/// Returns an error if any of the aggregate queries fail.
pub fn dashboard_stats(
    conn: &mut SqliteConnection,
    since: &str,
) -> Result<DashboardStats, PersistenceError> {
    let total_offers: i64 = offers::table.count().get_result(conn)?;
    let total_applications: i64 = applications::table.count().get_result(conn)?;

    let offers_by_month: Vec<MonthlyCount> = diesel::sql_query(
        "SELECT substr(submitted_at, 1, 7) AS month, COUNT(*) AS count \
         FROM offers WHERE submitted_at >= ? GROUP BY month ORDER BY month",
    )
    .bind::<Text, _>(since)
    .load(conn)?;

    let applications_by_month: Vec<MonthlyCount> = diesel::sql_query(
        "SELECT substr(applied_at, 1, 7) AS month, COUNT(*) AS count \
         FROM applications WHERE applied_at >= ? GROUP BY month ORDER BY month",
    )
    .bind::<Text, _>(since)
    .load(conn)?;

    let top_offers: Vec<TopOffer> = diesel::sql_query(
        "SELECT offers.title AS title, COUNT(applications.application_id) AS count \
         FROM offers JOIN applications ON applications.offer_id = offers.offer_id \
         GROUP BY offers.offer_id ORDER BY count DESC, offers.title ASC LIMIT 5",
    )
    .load(conn)?;

    Ok(DashboardStats {
        total_offers,
        pending_offers: count_offers_in_state(conn, OfferState::PendingValidation)?,
        validated_offers: count_offers_in_state(conn, OfferState::Validated)?,
        refused_offers: count_offers_in_state(conn, OfferState::Refused)?,
        closed_offers: count_offers_in_state(conn, OfferState::Closed)?,
        total_applications,
        pending_applications: count_applications_with_status(conn, ApplicationStatus::Pending)?,
        accepted_applications: count_applications_with_status(conn, ApplicationStatus::Accepted)?,
        refused_applications: count_applications_with_status(conn, ApplicationStatus::Refused)?,
        offers_by_month,
        applications_by_month,
        top_offers,
    })
}
