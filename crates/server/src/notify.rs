// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Notification dispatch.
//!
//! The engine hands back events; this module turns them into outbound
//! messages after the transaction has committed. Delivery is best
//! effort: a failure is logged and dropped, never propagated back into
//! the request that triggered it.

use intern_link_events::{ApplicationSnapshot, NotificationEvent, OfferSnapshot};
use tracing::{error, info};

/// A single outbound message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundMessage {
    /// The recipient address.
    pub to: String,
    /// The subject line.
    pub subject: String,
    /// The body text.
    pub body: String,
}

/// Delivery backend for notification messages.
///
/// The production deployment would plug an SMTP transport in here; the
/// default backend just logs what it would send.
pub trait Notifier: Send + Sync {
    /// Delivers one message.
    ///
    /// # Errors
    ///
    /// Returns a description of the delivery failure.
    fn deliver(&self, message: &OutboundMessage) -> Result<(), String>;
}

/// Notifier that logs messages instead of sending them.
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn deliver(&self, message: &OutboundMessage) -> Result<(), String> {
        info!(
            to = %message.to,
            subject = %message.subject,
            "Would send notification"
        );
        Ok(())
    }
}

fn offer_message(snapshot: &OfferSnapshot, subject: &str, body: String) -> OutboundMessage {
    OutboundMessage {
        to: snapshot.contact_email.clone(),
        subject: subject.to_string(),
        body,
    }
}

/// Renders the messages an event gives rise to.
///
/// A new application fans out to two recipients: a confirmation to the
/// student and a heads-up to the company contact.
#[must_use]
pub fn render_event(event: &NotificationEvent) -> Vec<OutboundMessage> {
    match event {
        NotificationEvent::OfferSubmitted(snapshot) => vec![offer_message(
            snapshot,
            "Your internship offer has been submitted",
            format!(
                "Hello {},\n\nYour offer '{}' for {} was received on {} and is \
                 awaiting validation by our staff. You will be notified once it \
                 has been reviewed.",
                snapshot.contact_name, snapshot.title, snapshot.organization, snapshot.submitted_at
            ),
        )],
        NotificationEvent::OfferValidated(snapshot) => vec![offer_message(
            snapshot,
            "Your internship offer has been validated",
            format!(
                "Hello {},\n\nGood news: your offer '{}' is now visible to \
                 students. You will be notified of every new application.",
                snapshot.contact_name, snapshot.title
            ),
        )],
        NotificationEvent::OfferRefused(snapshot) => vec![offer_message(
            snapshot,
            "Your internship offer was not validated",
            format!(
                "Hello {},\n\nWe are sorry to inform you that your offer '{}' \
                 was not validated. Feel free to contact us for details.",
                snapshot.contact_name, snapshot.title
            ),
        )],
        NotificationEvent::OfferClosed(snapshot) => vec![offer_message(
            snapshot,
            "Your internship offer is now closed",
            format!(
                "Hello {},\n\nYour offer '{}' has reached its maximum number of \
                 applications and no longer accepts new ones.",
                snapshot.contact_name, snapshot.title
            ),
        )],
        NotificationEvent::ApplicationCreated(snapshot) => vec![
            application_confirmation(snapshot),
            offer_message(
                &snapshot.offer,
                "New application to your internship offer",
                format!(
                    "Hello {},\n\n{} applied to your offer '{}' on {}.",
                    snapshot.offer.contact_name,
                    snapshot.student_username,
                    snapshot.offer.title,
                    snapshot.applied_at
                ),
            ),
        ],
        NotificationEvent::ApplicationStatusChanged(snapshot) => vec![OutboundMessage {
            to: snapshot.student_email.clone(),
            subject: String::from("Your application status has changed"),
            body: format!(
                "Hello {},\n\nYour application to '{}' at {} is now: {}.",
                snapshot.student_username,
                snapshot.offer.title,
                snapshot.offer.organization,
                snapshot.status.as_str()
            ),
        }],
    }
}

fn application_confirmation(snapshot: &ApplicationSnapshot) -> OutboundMessage {
    OutboundMessage {
        to: snapshot.student_email.clone(),
        subject: String::from("Your application has been recorded"),
        body: format!(
            "Hello {},\n\nYour application to '{}' at {} was recorded on {}. \
             The company will get back to you through the platform.",
            snapshot.student_username,
            snapshot.offer.title,
            snapshot.offer.organization,
            snapshot.applied_at
        ),
    }
}

/// Delivers all messages for a batch of events, best effort.
///
/// Failures are logged and swallowed; by the time events reach this
/// function the state transition has already committed.
pub fn dispatch_events(notifier: &dyn Notifier, events: &[NotificationEvent]) {
    for event in events {
        for message in render_event(event) {
            if let Err(err) = notifier.deliver(&message) {
                error!(
                    event = event.name(),
                    to = %message.to,
                    error = %err,
                    "Notification delivery failed; continuing"
                );
            }
        }
    }
}
