// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use intern_link_domain::{ApplicationId, ApplicationStatus, Identity, OfferState};

/// A command represents actor intent as data only.
///
/// Commands are the only way to request a transition on an offer case.
/// Role and ownership authorization happens before a command is built;
/// the engine enforces the lifecycle rules themselves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Approve a pending offer for student browsing.
    Validate,
    /// Reject a pending offer.
    Refuse,
    /// Administratively close the offer.
    Close {
        /// Optional wording recorded as the closing reason. Defaults to
        /// the administrative marker when absent.
        reason: Option<String>,
    },
    /// Administratively reopen a closed offer.
    Reopen,
    /// Administrative free move to an arbitrary state.
    ChangeState {
        /// The target state.
        new_state: OfferState,
    },
    /// Apply to the offer. The acting identity is the applicant.
    Apply {
        /// Application timestamp (RFC 3339), supplied by the boundary.
        applied_at: String,
    },
    /// Withdraw an application. The acting identity must be its applicant.
    Withdraw {
        /// The application to withdraw.
        application_id: ApplicationId,
    },
    /// Record a company decision on an application.
    UpdateStatus {
        /// The application to update.
        application_id: ApplicationId,
        /// The new status.
        new_status: ApplicationStatus,
        /// The applicant's identity, resolved by the boundary so the
        /// decision notification can be addressed.
        applicant: Identity,
    },
}
