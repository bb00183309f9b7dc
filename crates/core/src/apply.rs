// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::command::Command;
use crate::error::CoreError;
use crate::state::{OfferCase, TransitionResult};
use intern_link_domain::{
    ADMIN_CLOSING_REASON, APPLICATION_CAPACITY, Application, CAPACITY_CLOSING_REASON, DomainError,
    Identity, Offer, OfferDraft, OfferState, Role, validate_applicant_unique, validate_offer_draft,
};
use intern_link_events::{ApplicationSnapshot, NotificationEvent, OfferSnapshot};

/// Closes an offer, recording the reason.
///
/// This and [`reopen_offer`] are the only places that write `state` and
/// `closing_reason` together, which keeps the "reason set iff closed"
/// invariant in one spot.
fn close_offer(offer: &mut Offer, reason: String) {
    offer.state = OfferState::Closed;
    offer.closing_reason = Some(reason);
}

/// Reopens a closed offer, clearing the reason.
fn reopen_offer(offer: &mut Offer) {
    offer.state = OfferState::Validated;
    offer.closing_reason = None;
}

/// Builds a new offer case from a submitted draft.
///
/// The offer starts in `PendingValidation`. When the submitter is an
/// authenticated Company identity the offer binds to it; any other
/// submitter (anonymous intake, staff entering a paper form) leaves the
/// offer unbound and ownership falls back to the contact email.
///
/// # Arguments
///
/// * `draft` - The submission payload
/// * `submitter` - The authenticated submitter, if any
/// * `submitted_at` - Submission timestamp (RFC 3339)
///
/// # Returns
///
/// * `Ok(TransitionResult)` with the new case and an `OfferSubmitted` event
/// * `Err(CoreError)` if the draft fields are invalid
///
/// # Errors
///
/// Returns an error if the draft violates field validation rules.
pub fn submit(
    draft: OfferDraft,
    submitter: Option<&Identity>,
    submitted_at: String,
) -> Result<TransitionResult, CoreError> {
    validate_offer_draft(&draft)?;

    let company = submitter
        .filter(|identity| identity.role == Role::Company)
        .map(|identity| identity.id);

    let offer: Offer = Offer::from_draft(draft, company, submitted_at);
    let events: Vec<NotificationEvent> =
        vec![NotificationEvent::OfferSubmitted(OfferSnapshot::of(&offer))];

    Ok(TransitionResult {
        new_case: OfferCase::new(offer),
        events,
    })
}

/// Applies a command to an offer case, producing a new case and events.
///
/// The case is immutable; a failed command leaves no trace. Authorization
/// is the boundary's job: by the time a command reaches this function the
/// actor has already been cleared for it. What is enforced here are the
/// lifecycle rules: state legality, the application capacity, uniqueness,
/// and applicant ownership of withdrawals.
///
/// # Arguments
///
/// * `case` - The current offer case (immutable)
/// * `command` - The command to apply
/// * `actor` - The identity performing this action
///
/// # Returns
///
/// * `Ok(TransitionResult)` containing the new case and notification events
/// * `Err(CoreError)` if the command violates lifecycle rules
///
/// # Errors
///
/// Returns an error if:
/// - The offer's state does not permit the transition
/// - The application rules (uniqueness, capacity, ownership) are violated
#[allow(clippy::too_many_lines)]
pub fn apply(
    case: &OfferCase,
    command: Command,
    actor: &Identity,
) -> Result<TransitionResult, CoreError> {
    match command {
        Command::Validate => {
            case.offer.state.validate_transition(OfferState::Validated)?;

            let mut new_case: OfferCase = case.clone();
            new_case.offer.state = OfferState::Validated;

            let events: Vec<NotificationEvent> = vec![NotificationEvent::OfferValidated(
                OfferSnapshot::of(&new_case.offer),
            )];
            Ok(TransitionResult { new_case, events })
        }
        Command::Refuse => {
            case.offer.state.validate_transition(OfferState::Refused)?;

            let mut new_case: OfferCase = case.clone();
            new_case.offer.state = OfferState::Refused;

            let events: Vec<NotificationEvent> = vec![NotificationEvent::OfferRefused(
                OfferSnapshot::of(&new_case.offer),
            )];
            Ok(TransitionResult { new_case, events })
        }
        Command::Close { reason } => {
            case.offer.state.validate_transition(OfferState::Closed)?;

            let mut new_case: OfferCase = case.clone();
            close_offer(
                &mut new_case.offer,
                reason.unwrap_or_else(|| String::from(ADMIN_CLOSING_REASON)),
            );

            // Administrative closes notify nobody; only the capacity
            // auto-close emits OfferClosed.
            Ok(TransitionResult {
                new_case,
                events: Vec::new(),
            })
        }
        Command::Reopen => {
            case.offer.state.validate_transition(OfferState::Validated)?;

            let mut new_case: OfferCase = case.clone();
            reopen_offer(&mut new_case.offer);

            Ok(TransitionResult {
                new_case,
                events: Vec::new(),
            })
        }
        Command::ChangeState { new_state } => {
            // Admin free move: not bound to the workflow table, but the
            // closing-reason invariant still holds.
            let mut new_case: OfferCase = case.clone();
            if new_state == OfferState::Closed {
                close_offer(&mut new_case.offer, String::from(ADMIN_CLOSING_REASON));
            } else {
                new_case.offer.state = new_state;
                new_case.offer.closing_reason = None;
            }

            Ok(TransitionResult {
                new_case,
                events: Vec::new(),
            })
        }
        Command::Apply { applied_at } => {
            if !case.offer.state.accepts_applications() {
                return Err(CoreError::DomainViolation(DomainError::OfferNotOpen {
                    offer_id: case.offer.id.value(),
                    state: case.offer.state.as_str().to_string(),
                }));
            }

            validate_applicant_unique(actor.id, case.offer.id, &case.applications)?;

            // Unreachable while every fifth application triggers the
            // auto-close below; the cap still holds if it ever does not.
            if case.application_count() >= APPLICATION_CAPACITY {
                return Err(CoreError::DomainViolation(DomainError::CapacityExceeded {
                    offer_id: case.offer.id.value(),
                }));
            }

            let application: Application = Application::new(case.offer.id, actor.id, applied_at);

            let mut new_case: OfferCase = case.clone();
            new_case.applications.push(application.clone());

            let mut events: Vec<NotificationEvent> =
                vec![NotificationEvent::ApplicationCreated(
                    ApplicationSnapshot::of(&application, &new_case.offer, actor),
                )];

            // The fifth applicant is recorded first; closing is a side
            // effect of the new count, not a precondition.
            if new_case.application_count() == APPLICATION_CAPACITY {
                close_offer(&mut new_case.offer, String::from(CAPACITY_CLOSING_REASON));
                events.push(NotificationEvent::OfferClosed(OfferSnapshot::of(
                    &new_case.offer,
                )));
            }

            Ok(TransitionResult { new_case, events })
        }
        Command::Withdraw { application_id } => {
            let Some(position) = case
                .applications
                .iter()
                .position(|application| application.id == application_id)
            else {
                return Err(CoreError::DomainViolation(
                    DomainError::ApplicationNotFound(application_id.value()),
                ));
            };

            // Withdrawal belongs to the applicant alone; no staff override.
            if case.applications[position].student_id != actor.id {
                return Err(CoreError::DomainViolation(DomainError::NotOwner {
                    application_id: application_id.value(),
                }));
            }

            let mut new_case: OfferCase = case.clone();
            new_case.applications.remove(position);

            // Capacity closes reopen once a slot frees up; administrative
            // closes are sticky.
            if new_case.offer.is_capacity_closed()
                && new_case.application_count() < APPLICATION_CAPACITY
            {
                reopen_offer(&mut new_case.offer);
            }

            Ok(TransitionResult {
                new_case,
                events: Vec::new(),
            })
        }
        Command::UpdateStatus {
            application_id,
            new_status,
            applicant,
        } => {
            let Some(position) = case
                .applications
                .iter()
                .position(|application| application.id == application_id)
            else {
                return Err(CoreError::DomainViolation(
                    DomainError::ApplicationNotFound(application_id.value()),
                ));
            };

            let mut new_case: OfferCase = case.clone();
            new_case.applications[position].status = new_status;

            // Reverting to Pending is silent; only decisions notify.
            let events: Vec<NotificationEvent> = if new_status.is_decided() {
                vec![NotificationEvent::ApplicationStatusChanged(
                    ApplicationSnapshot::of(
                        &new_case.applications[position],
                        &new_case.offer,
                        &applicant,
                    ),
                )]
            } else {
                Vec::new()
            };

            Ok(TransitionResult { new_case, events })
        }
    }
}
