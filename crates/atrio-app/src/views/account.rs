//! Account authentication view-state.
//!
//! Tracks the selfie review ladder, TOTP enrollment, and the verified badge
//! with its client-enforced TTL. The session actor owns one instance per
//! screen mount and rehydrates it from the server on entry; local mutations
//! are optimistic and reconciled against `fetch_auth_status` answers.

use atrio_core::effects::{AuthStatusRecord, SelfieStatus};
use atrio_core::PhysicalTime;
use serde::{Deserialize, Serialize};

pub use atrio_core::effects::TotpProvision;

/// Where the account stands in TOTP enrollment, derived for rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TotpEnrollment {
    /// Selfie review has not been passed; enrollment cannot start
    Unavailable,
    /// Enrollment may be requested
    Available,
    /// A secret has been provisioned; waiting for the first code
    AwaitingCode,
    /// A TOTP factor is enrolled and verified
    Enabled,
}

/// Client-side authentication state for the verification screen.
///
/// Holds `account_verified` only on the strength of the invariant that
/// verification requires an accepted selfie plus TOTP enrollment; locally
/// driven transitions preserve it, and server snapshots replace the whole
/// record so a divergent server answer always wins.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AccountAuthState {
    /// Selfie review status
    pub selfie_status: SelfieStatus,
    /// Whether further selfie submissions are suppressed
    pub selfie_blocked: bool,
    /// Reason the account was blocked, when the server provided one
    pub blocked_reason: Option<String>,
    /// Whether a TOTP factor is enrolled and verified
    pub totp_enabled: bool,
    /// Provisioned secret awaiting its first code, if enrollment is underway
    pub pending_totp: Option<TotpProvision>,
    /// Whether the account currently holds verified status
    pub account_verified: bool,
    /// When the verified status lapses (ms since epoch), if verified
    pub verified_expires_at: Option<PhysicalTime>,
}

impl AccountAuthState {
    /// Whether a selfie submission is currently legal.
    ///
    /// Submissions are accepted from the initial and failed states only,
    /// and never while the account is blocked.
    pub fn can_submit_selfie(&self) -> bool {
        !self.selfie_blocked
            && matches!(
                self.selfie_status,
                SelfieStatus::NotSubmitted | SelfieStatus::Failed
            )
    }

    /// Record a successful upload acknowledgment by moving review to pending.
    pub fn begin_selfie_review(&mut self) {
        self.selfie_status = SelfieStatus::Pending;
    }

    /// Whether TOTP enrollment may be requested.
    pub fn can_request_totp(&self) -> bool {
        self.selfie_status == SelfieStatus::Accepted && !self.totp_enabled
    }

    /// Store a freshly provisioned TOTP secret.
    pub fn issue_totp_secret(&mut self, provision: TotpProvision) {
        self.pending_totp = Some(provision);
    }

    /// Record a server-confirmed TOTP code check.
    ///
    /// Enrollment completes and the verified badge is granted with the
    /// server-issued expiry.
    pub fn apply_totp_verified(&mut self, expires_at: Option<PhysicalTime>) {
        self.totp_enabled = true;
        self.pending_totp = None;
        self.account_verified = true;
        self.verified_expires_at = expires_at;
    }

    /// Replace local state with a server snapshot.
    ///
    /// A provisioned secret survives the refresh while enrollment is still
    /// open, since the server does not echo it back.
    pub fn apply_status(&mut self, record: &AuthStatusRecord) {
        self.selfie_status = record.selfie_status;
        self.selfie_blocked = record.selfie_blocked;
        self.blocked_reason = record.blocked_reason.clone();
        self.totp_enabled = record.totp_enabled;
        self.account_verified = record.account_verified;
        self.verified_expires_at = record.verified_expires_at;
        if record.totp_enabled {
            self.pending_totp = None;
        }
    }

    /// Derive the TOTP enrollment stage for rendering.
    pub fn totp_enrollment(&self) -> TotpEnrollment {
        if self.totp_enabled {
            TotpEnrollment::Enabled
        } else if self.pending_totp.is_some() {
            TotpEnrollment::AwaitingCode
        } else if self.selfie_status == SelfieStatus::Accepted {
            TotpEnrollment::Available
        } else {
            TotpEnrollment::Unavailable
        }
    }

    /// Milliseconds until the verified badge lapses, if one is held.
    pub fn remaining_ms(&self, now: PhysicalTime) -> Option<u64> {
        if !self.account_verified {
            return None;
        }
        self.verified_expires_at.map(|at| at.saturating_since(now))
    }

    /// Whether the verified badge has lapsed at `now`.
    pub fn is_expired(&self, now: PhysicalTime) -> bool {
        self.account_verified
            && self
                .verified_expires_at
                .is_some_and(|at| at <= now)
    }

    /// Hard local reset to the unauthenticated initial state.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn accepted_state() -> AccountAuthState {
        AccountAuthState {
            selfie_status: SelfieStatus::Accepted,
            ..Default::default()
        }
    }

    #[test]
    fn test_initial_state_accepts_selfie_only() {
        let state = AccountAuthState::default();
        assert!(state.can_submit_selfie());
        assert!(!state.can_request_totp());
        assert_eq!(state.totp_enrollment(), TotpEnrollment::Unavailable);
    }

    #[test]
    fn test_selfie_resubmission_after_failure() {
        let mut state = AccountAuthState::default();
        state.begin_selfie_review();
        assert_eq!(state.selfie_status, SelfieStatus::Pending);
        assert!(!state.can_submit_selfie());

        state.selfie_status = SelfieStatus::Failed;
        assert!(state.can_submit_selfie());
    }

    #[test]
    fn test_blocked_suppresses_submission_from_every_status() {
        for status in [
            SelfieStatus::NotSubmitted,
            SelfieStatus::Pending,
            SelfieStatus::Accepted,
            SelfieStatus::Failed,
        ] {
            let state = AccountAuthState {
                selfie_status: status,
                selfie_blocked: true,
                ..Default::default()
            };
            assert!(!state.can_submit_selfie(), "blocked must gate {:?}", status);
        }
    }

    #[test]
    fn test_totp_request_requires_accepted_selfie() {
        let mut state = AccountAuthState::default();
        assert!(!state.can_request_totp());

        state.selfie_status = SelfieStatus::Accepted;
        assert!(state.can_request_totp());

        state.totp_enabled = true;
        assert!(!state.can_request_totp());
    }

    #[test]
    fn test_totp_verification_grants_verified_badge() {
        let mut state = accepted_state();
        state.issue_totp_secret(TotpProvision {
            secret: "JBSWY3DPEHPK3PXP".to_string(),
        });
        assert_eq!(state.totp_enrollment(), TotpEnrollment::AwaitingCode);

        let expiry = PhysicalTime::from_ms(1_700_000_000_000);
        state.apply_totp_verified(Some(expiry));
        assert!(state.totp_enabled);
        assert!(state.account_verified);
        assert_eq!(state.verified_expires_at, Some(expiry));
        assert!(state.pending_totp.is_none());
        assert_eq!(state.totp_enrollment(), TotpEnrollment::Enabled);
    }

    #[test]
    fn test_server_snapshot_replaces_local_state() {
        let mut state = AccountAuthState::default();
        state.begin_selfie_review();

        let record = AuthStatusRecord {
            selfie_status: SelfieStatus::Accepted,
            ..Default::default()
        };
        state.apply_status(&record);
        assert_eq!(state.selfie_status, SelfieStatus::Accepted);
        assert!(state.can_request_totp());

        let blocked = AuthStatusRecord {
            selfie_status: SelfieStatus::Failed,
            selfie_blocked: true,
            blocked_reason: Some("too many attempts".to_string()),
            ..Default::default()
        };
        state.apply_status(&blocked);
        assert!(!state.can_submit_selfie());
        assert_eq!(state.blocked_reason.as_deref(), Some("too many attempts"));
    }

    #[test]
    fn test_pending_secret_survives_refresh_until_enrolled() {
        let mut state = accepted_state();
        state.issue_totp_secret(TotpProvision {
            secret: "JBSWY3DPEHPK3PXP".to_string(),
        });

        // Enrollment still open on the server side.
        state.apply_status(&AuthStatusRecord {
            selfie_status: SelfieStatus::Accepted,
            ..Default::default()
        });
        assert!(state.pending_totp.is_some());

        // Enrollment confirmed; the secret has served its purpose.
        state.apply_status(&AuthStatusRecord {
            selfie_status: SelfieStatus::Accepted,
            totp_enabled: true,
            account_verified: true,
            verified_expires_at: Some(PhysicalTime::from_ms(2_000_000)),
            ..Default::default()
        });
        assert!(state.pending_totp.is_none());
        assert!(state.account_verified);
    }

    #[test]
    fn test_expiry_countdown() {
        let mut state = accepted_state();
        state.apply_totp_verified(Some(PhysicalTime::from_ms(10_000)));

        let before = PhysicalTime::from_ms(7_000);
        assert_eq!(state.remaining_ms(before), Some(3_000));
        assert!(!state.is_expired(before));

        let at = PhysicalTime::from_ms(10_000);
        assert_eq!(state.remaining_ms(at), Some(0));
        assert!(state.is_expired(at));

        let after = PhysicalTime::from_ms(12_500);
        assert!(state.is_expired(after));
    }

    #[test]
    fn test_unverified_state_never_expires() {
        let state = AccountAuthState::default();
        assert!(!state.is_expired(PhysicalTime::from_ms(u64::MAX)));
        assert_eq!(state.remaining_ms(PhysicalTime::from_ms(0)), None);
    }

    #[test]
    fn test_reset_returns_to_initial_values() {
        let mut state = accepted_state();
        state.apply_totp_verified(Some(PhysicalTime::from_ms(10_000)));
        state.reset();
        assert_eq!(state, AccountAuthState::default());
        assert!(!state.account_verified);
        assert_eq!(state.selfie_status, SelfieStatus::NotSubmitted);
    }
}
