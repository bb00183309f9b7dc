// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

mod error;
mod gate;
mod handlers;
mod password_policy;
mod request_response;
mod roster_csv;

#[cfg(test)]
mod tests;

pub use error::{ApiError, AuthError, translate_core_error, translate_domain_error};
pub use gate::AuthorizationGate;
pub use handlers::{
    ApiResult, apply_to_offer, change_offer_state, change_account_role, check_favorite,
    close_offer, dashboard_stats, get_offer, get_student_profile, list_favorite_offers,
    list_my_applications, list_offer_applications, list_offers, login, refuse_offer,
    register_account, reopen_offer, submit_offer, toggle_favorite_bookmark,
    update_application_status, update_student_profile, validate_offer, withdraw_application,
};
pub use password_policy::{PasswordPolicy, PasswordPolicyError};
pub use request_response::{
    ApplicationInfo, ApplyResponse, ChangeStateRequest, IdentityInfo, ListOffersResponse,
    LoginRequest, OfferInfo, OfferQuery, ProfileInfo, RegisterAccountRequest,
    RegisterAccountResponse, ReviewDecisionResponse, SubmitOfferRequest, SubmitOfferResponse,
    ToggleFavoriteResponse, UpdateProfileRequest, UpdateStatusRequest, WithdrawResponse,
};
pub use roster_csv::export_roster_csv;
