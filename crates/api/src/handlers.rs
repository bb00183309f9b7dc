// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API operation functions.
//!
//! Each state-changing operation follows the same shape: resolve the
//! resources, consult the authorization gate, run the lifecycle engine,
//! persist the transition, and hand back the response together with the
//! notification events for the dispatcher. Authorization always runs
//! before a command is built.

use std::str::FromStr;

use intern_link::{Command, OfferCase, TransitionResult, apply, submit, toggle_favorite};
use intern_link_domain::{
    Application, ApplicationId, ApplicationStatus, DomainError, Favorite, Identity, OfferId,
    OfferState, Role, StudentProfile, validate_username,
};
use intern_link_events::NotificationEvent;
use intern_link_persistence::{
    DashboardStats, OfferFilter, OwnerKey, Persistence, PersistenceError,
};

use crate::error::{ApiError, translate_core_error, translate_domain_error};
use crate::gate::AuthorizationGate;
use crate::password_policy::PasswordPolicy;
use crate::request_response::{
    ApplicationInfo, ApplyResponse, ChangeStateRequest, IdentityInfo, ListOffersResponse,
    LoginRequest, OfferInfo, OfferQuery, ProfileInfo, RegisterAccountRequest,
    RegisterAccountResponse, ReviewDecisionResponse, SubmitOfferRequest, SubmitOfferResponse,
    ToggleFavoriteResponse, UpdateProfileRequest, UpdateStatusRequest, WithdrawResponse,
};

/// The result of a state-changing API operation.
///
/// The events belong to the committed transition; the server dispatches
/// them after the response is on its way, outside the transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResult<T> {
    /// The API response.
    pub response: T,
    /// The notification events generated by this operation.
    pub events: Vec<NotificationEvent>,
}

/// Loads an offer case, reporting a missing offer by its identity.
fn load_case(persistence: &mut Persistence, offer_id: i64) -> Result<OfferCase, ApiError> {
    persistence
        .load_offer_case(OfferId::new(offer_id))
        .map_err(|err| match err {
            PersistenceError::NotFound(_) => {
                translate_domain_error(DomainError::OfferNotFound(offer_id))
            }
            other => other.into(),
        })
}

/// Loads an application, reporting a missing one by its identity.
fn load_application(
    persistence: &mut Persistence,
    application_id: i64,
) -> Result<Application, ApiError> {
    persistence
        .get_application(ApplicationId::new(application_id))
        .map_err(|err| match err {
            PersistenceError::NotFound(_) => {
                translate_domain_error(DomainError::ApplicationNotFound(application_id))
            }
            other => other.into(),
        })
}

/// Submits a new offer.
///
/// Anyone may submit. If the submitter is an authenticated Company the
/// offer binds to it; all other submitters leave it unbound.
///
/// # Errors
///
/// Returns an error if the draft fields are invalid or the insert fails.
pub fn submit_offer(
    persistence: &mut Persistence,
    request: SubmitOfferRequest,
    submitter: Option<&Identity>,
    submitted_at: &str,
) -> Result<ApiResult<SubmitOfferResponse>, ApiError> {
    let result: TransitionResult = submit(
        request.into_draft(),
        submitter,
        submitted_at.to_string(),
    )
    .map_err(translate_core_error)?;

    let offer = persistence.persist_submission(&result)?;

    let response: SubmitOfferResponse = SubmitOfferResponse {
        message: format!("Offer '{}' submitted and awaiting validation", offer.title),
        offer: OfferInfo::from_offer(&offer),
    };

    Ok(ApiResult {
        response,
        events: result.events,
    })
}

/// Lists offers visible to the viewer, newest first.
///
/// Anonymous and Student viewers see validated offers; Managers see
/// pending and validated; Companies see their own; Admins see all.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_offers(
    persistence: &mut Persistence,
    viewer: Option<&Identity>,
    query: &OfferQuery,
) -> Result<ListOffersResponse, ApiError> {
    let mut filter: OfferFilter = OfferFilter {
        search: query.search.clone(),
        city: query.city.clone(),
        duration: query.duration.clone(),
        domain: query.domain.clone(),
        remote: query.remote,
        states: None,
        owner: None,
    };

    match viewer {
        None => filter.states = Some(vec![OfferState::Validated]),
        Some(identity) if identity.is_superuser => {}
        Some(identity) => match identity.role {
            Role::Student => filter.states = Some(vec![OfferState::Validated]),
            Role::Manager => {
                filter.states = Some(vec![OfferState::PendingValidation, OfferState::Validated]);
            }
            Role::Company => {
                filter.owner = Some(OwnerKey {
                    account_id: identity.id.value(),
                    contact_email: identity.email.clone(),
                });
            }
            Role::Admin => {}
        },
    }

    let offers = persistence.list_offers(&filter)?;

    Ok(ListOffersResponse {
        offers: offers.iter().map(OfferInfo::from_offer).collect(),
    })
}

/// Retrieves one offer.
///
/// # Errors
///
/// Returns an error if the offer does not exist.
pub fn get_offer(persistence: &mut Persistence, offer_id: i64) -> Result<OfferInfo, ApiError> {
    let case: OfferCase = load_case(persistence, offer_id)?;
    Ok(OfferInfo::from_offer(&case.offer))
}

/// Runs a review or admin command against an offer case and persists it.
fn run_offer_command(
    persistence: &mut Persistence,
    offer_id: i64,
    command: Command,
    actor: &Identity,
    message: String,
) -> Result<ApiResult<ReviewDecisionResponse>, ApiError> {
    let case: OfferCase = load_case(persistence, offer_id)?;
    let result: TransitionResult =
        apply(&case, command, actor).map_err(translate_core_error)?;
    let refreshed: OfferCase = persistence.persist_transition(&result)?;

    Ok(ApiResult {
        response: ReviewDecisionResponse {
            offer: OfferInfo::from_offer(&refreshed.offer),
            message,
        },
        events: result.events,
    })
}

/// Validates a pending offer.
///
/// Requires Manager or Admin.
///
/// # Errors
///
/// Returns an error if the actor lacks staff authority or the offer is
/// not pending.
pub fn validate_offer(
    persistence: &mut Persistence,
    offer_id: i64,
    actor: &Identity,
) -> Result<ApiResult<ReviewDecisionResponse>, ApiError> {
    AuthorizationGate::authorize_review_offer(actor)?;
    run_offer_command(
        persistence,
        offer_id,
        Command::Validate,
        actor,
        String::from("Offer validated and visible to students"),
    )
}

/// Refuses a pending offer.
///
/// Requires Manager or Admin.
///
/// # Errors
///
/// Returns an error if the actor lacks staff authority or the offer is
/// not pending.
pub fn refuse_offer(
    persistence: &mut Persistence,
    offer_id: i64,
    actor: &Identity,
) -> Result<ApiResult<ReviewDecisionResponse>, ApiError> {
    AuthorizationGate::authorize_review_offer(actor)?;
    run_offer_command(
        persistence,
        offer_id,
        Command::Refuse,
        actor,
        String::from("Offer refused"),
    )
}

/// Administratively closes a validated offer.
///
/// Requires Admin. A manual close never auto-reopens.
///
/// # Errors
///
/// Returns an error if the actor is not an Admin or the offer is not
/// validated.
pub fn close_offer(
    persistence: &mut Persistence,
    offer_id: i64,
    reason: Option<String>,
    actor: &Identity,
) -> Result<ApiResult<ReviewDecisionResponse>, ApiError> {
    AuthorizationGate::authorize_admin_offer_action(actor)?;
    run_offer_command(
        persistence,
        offer_id,
        Command::Close { reason },
        actor,
        String::from("Offer closed"),
    )
}

/// Administratively reopens a closed offer.
///
/// Requires Admin. Works for both capacity and manual closes.
///
/// # Errors
///
/// Returns an error if the actor is not an Admin or the offer is not
/// closed.
pub fn reopen_offer(
    persistence: &mut Persistence,
    offer_id: i64,
    actor: &Identity,
) -> Result<ApiResult<ReviewDecisionResponse>, ApiError> {
    AuthorizationGate::authorize_admin_offer_action(actor)?;
    run_offer_command(
        persistence,
        offer_id,
        Command::Reopen,
        actor,
        String::from("Offer reopened"),
    )
}

/// Moves an offer to an arbitrary state.
///
/// Requires Admin. An unrecognized state literal is rejected as invalid
/// input, never silently ignored.
///
/// # Errors
///
/// Returns an error if the actor is not an Admin or the literal is not a
/// valid state.
pub fn change_offer_state(
    persistence: &mut Persistence,
    offer_id: i64,
    request: &ChangeStateRequest,
    actor: &Identity,
) -> Result<ApiResult<ReviewDecisionResponse>, ApiError> {
    AuthorizationGate::authorize_admin_offer_action(actor)?;

    let new_state: OfferState =
        OfferState::from_str(&request.new_state).map_err(translate_domain_error)?;

    run_offer_command(
        persistence,
        offer_id,
        Command::ChangeState { new_state },
        actor,
        format!("Offer state set to {}", new_state.as_str()),
    )
}

/// Applies the acting student to an offer.
///
/// Requires Student. The fifth application closes the offer in the same
/// transaction.
///
/// # Errors
///
/// Returns an error if the actor is not a Student, the offer is not
/// open, the student already applied, or the offer is full.
pub fn apply_to_offer(
    persistence: &mut Persistence,
    offer_id: i64,
    actor: &Identity,
    applied_at: &str,
) -> Result<ApiResult<ApplyResponse>, ApiError> {
    AuthorizationGate::authorize_apply(actor)?;

    let case: OfferCase = load_case(persistence, offer_id)?;
    let result: TransitionResult = apply(
        &case,
        Command::Apply {
            applied_at: applied_at.to_string(),
        },
        actor,
    )
    .map_err(translate_core_error)?;

    let refreshed: OfferCase = persistence.persist_transition(&result)?;

    let application: &Application = refreshed
        .applications
        .iter()
        .find(|application| application.student_id == actor.id)
        .ok_or_else(|| ApiError::Internal {
            message: String::from("committed application missing from reloaded case"),
        })?;

    let response: ApplyResponse = ApplyResponse {
        application: ApplicationInfo::from_application(application),
        offer_state: refreshed.offer.state.as_str().to_string(),
        message: format!("Application to '{}' recorded", refreshed.offer.title),
    };

    Ok(ApiResult {
        response,
        events: result.events,
    })
}

/// Withdraws an application.
///
/// Only the applicant may withdraw. Withdrawing from a capacity-closed
/// offer reopens it; manual closes stay closed.
///
/// # Errors
///
/// Returns an error if the application does not exist or the actor is
/// not its applicant.
pub fn withdraw_application(
    persistence: &mut Persistence,
    application_id: i64,
    actor: &Identity,
) -> Result<ApiResult<WithdrawResponse>, ApiError> {
    let application: Application = load_application(persistence, application_id)?;
    let case: OfferCase = load_case(persistence, application.offer_id.value())?;

    let result: TransitionResult = apply(
        &case,
        Command::Withdraw {
            application_id: application.id,
        },
        actor,
    )
    .map_err(translate_core_error)?;

    let refreshed: OfferCase = persistence.persist_transition(&result)?;

    Ok(ApiResult {
        response: WithdrawResponse {
            offer_state: refreshed.offer.state.as_str().to_string(),
            message: String::from("Application withdrawn"),
        },
        events: result.events,
    })
}

/// Records a decision on an application.
///
/// Requires the owning company or staff. Accepting or refusing notifies
/// the applicant; reverting to pending is silent.
///
/// # Errors
///
/// Returns an error if the actor may not decide on this offer's
/// applications or the status literal is invalid.
pub fn update_application_status(
    persistence: &mut Persistence,
    application_id: i64,
    request: &UpdateStatusRequest,
    actor: &Identity,
) -> Result<ApiResult<ApplicationInfo>, ApiError> {
    let application: Application = load_application(persistence, application_id)?;
    let case: OfferCase = load_case(persistence, application.offer_id.value())?;

    AuthorizationGate::authorize_manage_applications(actor, &case.offer)?;

    let new_status: ApplicationStatus =
        ApplicationStatus::from_str(&request.status).map_err(translate_domain_error)?;

    let applicant: Identity = persistence
        .get_account(application.student_id)
        .map_err(|err| match err {
            PersistenceError::NotFound(_) => translate_domain_error(DomainError::AccountNotFound(
                application.student_id.value(),
            )),
            other => other.into(),
        })?;

    let result: TransitionResult = apply(
        &case,
        Command::UpdateStatus {
            application_id: application.id,
            new_status,
            applicant,
        },
        actor,
    )
    .map_err(translate_core_error)?;

    let refreshed: OfferCase = persistence.persist_transition(&result)?;

    let updated: &Application = refreshed
        .applications
        .iter()
        .find(|candidate| candidate.id == application.id)
        .ok_or_else(|| ApiError::Internal {
            message: String::from("updated application missing from reloaded case"),
        })?;

    Ok(ApiResult {
        response: ApplicationInfo::from_application(updated),
        events: result.events,
    })
}

/// Lists an offer's applications.
///
/// Requires the owning company or staff.
///
/// # Errors
///
/// Returns an error if the actor may not view this offer's applications.
pub fn list_offer_applications(
    persistence: &mut Persistence,
    offer_id: i64,
    actor: &Identity,
) -> Result<Vec<ApplicationInfo>, ApiError> {
    let case: OfferCase = load_case(persistence, offer_id)?;
    AuthorizationGate::authorize_manage_applications(actor, &case.offer)?;

    Ok(case
        .applications
        .iter()
        .map(ApplicationInfo::from_application)
        .collect())
}

/// Lists the acting student's own applications, newest first.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_my_applications(
    persistence: &mut Persistence,
    actor: &Identity,
) -> Result<Vec<ApplicationInfo>, ApiError> {
    let applications = persistence.applications_for_student(actor.id)?;
    Ok(applications
        .iter()
        .map(ApplicationInfo::from_application)
        .collect())
}

/// Toggles the acting student's bookmark on an offer.
///
/// Requires Student. Never fails on repetition.
///
/// # Errors
///
/// Returns an error if the actor is not a Student or the offer does not
/// exist.
pub fn toggle_favorite_bookmark(
    persistence: &mut Persistence,
    offer_id: i64,
    actor: &Identity,
) -> Result<ToggleFavoriteResponse, ApiError> {
    AuthorizationGate::authorize_toggle_favorite(actor)?;

    // Resolve the offer first so toggling an unknown one is NotFound.
    let case: OfferCase = load_case(persistence, offer_id)?;

    let favorites: Vec<Favorite> = persistence.favorites_for_student(actor.id)?;
    let toggle = toggle_favorite(&favorites, actor, case.offer.id);
    persistence.persist_favorite_toggle(actor.id, case.offer.id, &toggle)?;

    let message: String = if toggle.added {
        String::from("Offer added to favorites")
    } else {
        String::from("Offer removed from favorites")
    };

    Ok(ToggleFavoriteResponse {
        is_favorite: toggle.added,
        message,
    })
}

/// Checks whether an offer is in the acting student's bookmarks.
///
/// Non-students simply get `false`, mirroring that they have no
/// bookmark set at all.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn check_favorite(
    persistence: &mut Persistence,
    offer_id: i64,
    actor: &Identity,
) -> Result<bool, ApiError> {
    if actor.role != Role::Student {
        return Ok(false);
    }
    Ok(persistence.is_favorite(actor.id, OfferId::new(offer_id))?)
}

/// Lists the acting student's bookmarked offers, newest first.
///
/// Requires Student.
///
/// # Errors
///
/// Returns an error if the actor is not a Student or the query fails.
pub fn list_favorite_offers(
    persistence: &mut Persistence,
    actor: &Identity,
) -> Result<ListOffersResponse, ApiError> {
    AuthorizationGate::authorize_toggle_favorite(actor)?;

    let offers = persistence.favorite_offers(actor.id)?;
    Ok(ListOffersResponse {
        offers: offers.iter().map(OfferInfo::from_offer).collect(),
    })
}

/// Registers a new account.
///
/// The role defaults to Student; Students get their profile created
/// eagerly. Granting Admin also grants the superuser flag.
///
/// # Errors
///
/// Returns an error if the username is invalid or taken, the role
/// literal is invalid, or the password fails policy.
pub fn register_account(
    persistence: &mut Persistence,
    request: &RegisterAccountRequest,
    created_at: &str,
) -> Result<RegisterAccountResponse, ApiError> {
    validate_username(&request.username).map_err(translate_domain_error)?;

    let role: Role = match &request.role {
        Some(literal) => Role::from_str(literal).map_err(translate_domain_error)?,
        None => Role::Student,
    };

    PasswordPolicy::default().validate(
        &request.password,
        &request.password_confirmation,
        &request.username,
    )?;

    let account_id = persistence
        .create_account(
            &request.username,
            &request.email,
            &request.password,
            role,
            role == Role::Admin,
            created_at,
        )
        .map_err(|err| match err {
            PersistenceError::DuplicateKey(_) => translate_domain_error(
                DomainError::DuplicateUsername(request.username.clone()),
            ),
            other => other.into(),
        })?;

    if role == Role::Student {
        persistence.get_or_create_profile(account_id)?;
    }

    Ok(RegisterAccountResponse {
        account_id: account_id.value(),
        username: request.username.clone(),
        role: role.as_str().to_string(),
        message: format!("Account '{}' registered", request.username),
    })
}

/// Checks a credential pair and returns the matching identity.
///
/// Session issuance is the surrounding server's concern; this only
/// answers whether the credentials are right.
///
/// # Errors
///
/// Returns `AuthenticationFailed` for unknown usernames and wrong
/// passwords alike.
pub fn login(
    persistence: &mut Persistence,
    request: &LoginRequest,
) -> Result<IdentityInfo, ApiError> {
    let identity: Option<Identity> =
        persistence.verify_credentials(&request.username, &request.password)?;

    identity
        .as_ref()
        .map(IdentityInfo::from_identity)
        .ok_or_else(|| ApiError::AuthenticationFailed {
            reason: String::from("invalid username or password"),
        })
}

/// Reassigns an account's role.
///
/// Requires Admin. Granting Admin sets the superuser flag; any other
/// role clears it.
///
/// # Errors
///
/// Returns an error if the actor is not an Admin, the role literal is
/// invalid, or the account does not exist.
pub fn change_account_role(
    persistence: &mut Persistence,
    account_id: i64,
    role_literal: &str,
    actor: &Identity,
) -> Result<IdentityInfo, ApiError> {
    AuthorizationGate::authorize_manage_accounts(actor)?;

    let role: Role = Role::from_str(role_literal).map_err(translate_domain_error)?;

    let target = intern_link_domain::AccountId::new(account_id);
    persistence
        .update_account_role(target, role)
        .map_err(|err| match err {
            PersistenceError::NotFound(_) => {
                translate_domain_error(DomainError::AccountNotFound(account_id))
            }
            other => other.into(),
        })?;

    let identity: Identity = persistence.get_account(target)?;
    Ok(IdentityInfo::from_identity(&identity))
}

/// Retrieves the acting account's student profile, creating it lazily.
///
/// # Errors
///
/// Returns an error if the query or the lazy insert fails.
pub fn get_student_profile(
    persistence: &mut Persistence,
    actor: &Identity,
) -> Result<ProfileInfo, ApiError> {
    let profile: StudentProfile = persistence.get_or_create_profile(actor.id)?;
    Ok(ProfileInfo {
        account_id: profile.account_id.value(),
        bio: profile.bio,
        phone: profile.phone,
        cv_url: profile.cv_url,
    })
}

/// Updates the acting account's student profile. Absent fields keep
/// their stored values.
///
/// # Errors
///
/// Returns an error if the query or write fails.
pub fn update_student_profile(
    persistence: &mut Persistence,
    actor: &Identity,
    request: &UpdateProfileRequest,
) -> Result<ProfileInfo, ApiError> {
    let mut profile: StudentProfile = persistence.get_or_create_profile(actor.id)?;

    if let Some(bio) = &request.bio {
        profile.bio = Some(bio.clone());
    }
    if let Some(phone) = &request.phone {
        profile.phone = Some(phone.clone());
    }
    if let Some(cv_url) = &request.cv_url {
        profile.cv_url = Some(cv_url.clone());
    }

    persistence.update_profile(&profile)?;

    Ok(ProfileInfo {
        account_id: profile.account_id.value(),
        bio: profile.bio,
        phone: profile.phone,
        cv_url: profile.cv_url,
    })
}

/// Computes the staff dashboard summary.
///
/// Requires Manager or Admin.
///
/// # Errors
///
/// Returns an error if the actor lacks staff authority or an aggregate
/// query fails.
pub fn dashboard_stats(
    persistence: &mut Persistence,
    actor: &Identity,
    since: &str,
) -> Result<DashboardStats, ApiError> {
    AuthorizationGate::authorize_view_stats(actor)?;
    Ok(persistence.dashboard_stats(since)?)
}
