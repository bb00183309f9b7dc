// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.

use intern_link_domain::{Application, Identity, Offer, OfferDraft};
use serde::{Deserialize, Serialize};

/// API request to submit a new offer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitOfferRequest {
    /// The organization name.
    pub organization: String,
    /// The contact person.
    pub contact_name: String,
    /// The contact email.
    pub contact_email: String,
    /// The offer title.
    pub title: String,
    /// The offer description.
    pub description: String,
    /// Optional city.
    pub city: Option<String>,
    /// Optional duration bucket.
    pub duration: Option<String>,
    /// Optional domain tag.
    pub domain: Option<String>,
    /// Optional remote-work flag.
    pub remote: Option<bool>,
}

impl SubmitOfferRequest {
    /// Converts the request into a domain draft.
    #[must_use]
    pub fn into_draft(self) -> OfferDraft {
        OfferDraft {
            organization: self.organization,
            contact_name: self.contact_name,
            contact_email: self.contact_email,
            title: self.title,
            description: self.description,
            city: self.city,
            duration: self.duration,
            domain: self.domain,
            remote: self.remote,
        }
    }
}

/// Wire representation of an offer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfferInfo {
    /// The offer identity.
    pub id: i64,
    /// The bound company account, if any.
    pub company_id: Option<i64>,
    /// The organization name.
    pub organization: String,
    /// The contact person.
    pub contact_name: String,
    /// The contact email.
    pub contact_email: String,
    /// The offer title.
    pub title: String,
    /// The offer description.
    pub description: String,
    /// Optional city.
    pub city: Option<String>,
    /// Optional duration bucket.
    pub duration: Option<String>,
    /// Optional domain tag.
    pub domain: Option<String>,
    /// Optional remote-work flag.
    pub remote: Option<bool>,
    /// The state literal.
    pub state: String,
    /// The closing reason, set iff closed.
    pub closing_reason: Option<String>,
    /// The submission timestamp.
    pub submitted_at: String,
}

impl OfferInfo {
    /// Builds the wire representation of an offer.
    #[must_use]
    pub fn from_offer(offer: &Offer) -> Self {
        Self {
            id: offer.id.value(),
            company_id: offer.company.map(|id| id.value()),
            organization: offer.organization.clone(),
            contact_name: offer.contact_name.clone(),
            contact_email: offer.contact_email.clone(),
            title: offer.title.clone(),
            description: offer.description.clone(),
            city: offer.city.clone(),
            duration: offer.duration.clone(),
            domain: offer.domain.clone(),
            remote: offer.remote,
            state: offer.state.as_str().to_string(),
            closing_reason: offer.closing_reason.clone(),
            submitted_at: offer.submitted_at.clone(),
        }
    }
}

/// API response for a successful offer submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitOfferResponse {
    /// The stored offer.
    pub offer: OfferInfo,
    /// A success message.
    pub message: String,
}

/// Listing filter parameters, straight from the query string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfferQuery {
    /// Substring search over title, description, and organization.
    pub search: Option<String>,
    /// Substring match over the city.
    pub city: Option<String>,
    /// Exact duration bucket.
    pub duration: Option<String>,
    /// Exact domain tag.
    pub domain: Option<String>,
    /// Remote flag.
    pub remote: Option<bool>,
}

/// API response for offer listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListOffersResponse {
    /// Matching offers, newest first.
    pub offers: Vec<OfferInfo>,
}

/// API response for a staff review decision or an admin move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewDecisionResponse {
    /// The offer after the transition.
    pub offer: OfferInfo,
    /// A success message.
    pub message: String,
}

/// API request for an admin free state change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeStateRequest {
    /// The target state literal.
    pub new_state: String,
}

/// Wire representation of an application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationInfo {
    /// The application identity.
    pub id: i64,
    /// The offer applied to.
    pub offer_id: i64,
    /// The applying student account.
    pub student_id: i64,
    /// The status literal.
    pub status: String,
    /// The application timestamp.
    pub applied_at: String,
}

impl ApplicationInfo {
    /// Builds the wire representation of an application.
    #[must_use]
    pub fn from_application(application: &Application) -> Self {
        Self {
            id: application.id.value(),
            offer_id: application.offer_id.value(),
            student_id: application.student_id.value(),
            status: application.status.as_str().to_string(),
            applied_at: application.applied_at.clone(),
        }
    }
}

/// API response for a successful application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplyResponse {
    /// The stored application.
    pub application: ApplicationInfo,
    /// The offer's state literal after the application (the fifth one
    /// closes the offer).
    pub offer_state: String,
    /// A success message.
    pub message: String,
}

/// API response for a successful withdrawal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithdrawResponse {
    /// The offer's state literal after the withdrawal.
    pub offer_state: String,
    /// A success message.
    pub message: String,
}

/// API request to record a decision on an application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateStatusRequest {
    /// The status literal: `Pending`, `Accepted`, or `Refused`.
    pub status: String,
}

/// API response for a bookmark toggle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToggleFavoriteResponse {
    /// Whether the offer is bookmarked after the toggle.
    pub is_favorite: bool,
    /// A success message.
    pub message: String,
}

/// API request to register an account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterAccountRequest {
    /// The login name.
    pub username: String,
    /// The contact email.
    pub email: String,
    /// The password.
    pub password: String,
    /// The password, repeated.
    pub password_confirmation: String,
    /// The role literal. Absent means Student.
    pub role: Option<String>,
}

/// API response for a successful registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterAccountResponse {
    /// The new account's identity value.
    pub account_id: i64,
    /// The login name.
    pub username: String,
    /// The role literal.
    pub role: String,
    /// A success message.
    pub message: String,
}

/// API request to check credentials.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    /// The login name.
    pub username: String,
    /// The password.
    pub password: String,
}

/// Wire representation of an authenticated identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityInfo {
    /// The account identity value.
    pub id: i64,
    /// The login name.
    pub username: String,
    /// The contact email.
    pub email: String,
    /// The role literal.
    pub role: String,
    /// Whether the account bypasses authorization checks.
    pub is_superuser: bool,
}

impl IdentityInfo {
    /// Builds the wire representation of an identity.
    #[must_use]
    pub fn from_identity(identity: &Identity) -> Self {
        Self {
            id: identity.id.value(),
            username: identity.username.clone(),
            email: identity.email.clone(),
            role: identity.role.as_str().to_string(),
            is_superuser: identity.is_superuser,
        }
    }
}

/// Wire representation of a student profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileInfo {
    /// The owning account identity value.
    pub account_id: i64,
    /// Optional bio.
    pub bio: Option<String>,
    /// Optional phone number.
    pub phone: Option<String>,
    /// Optional CV reference.
    pub cv_url: Option<String>,
}

/// API request to update a student profile. Absent fields are left as
/// they are.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateProfileRequest {
    /// New bio, if provided.
    pub bio: Option<String>,
    /// New phone number, if provided.
    pub phone: Option<String>,
    /// New CV reference, if provided.
    pub cv_url: Option<String>,
}
