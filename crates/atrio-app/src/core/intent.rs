//! # Intents: User Actions on the Verification Screen
//!
//! An intent represents a user action dispatched from a frontend to the
//! session actor. The actor is the only writer of screen state, so every
//! mutation enters through this vocabulary.
//!
//! ## Flow
//!
//! ```text
//! Intent → Session Actor → Workflow → Effects → View Snapshot
//! ```

use atrio_core::effects::SelfieImage;
use serde::{Deserialize, Serialize};

/// A user action on the verification screen.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum SettingsIntent {
    // =========================================================================
    // Auth Intents
    // =========================================================================
    /// Re-fetch the authoritative auth status from the server
    RefreshAuthStatus,

    /// Upload an identity selfie for review
    SubmitSelfie {
        /// Captured image payload
        image: SelfieImage,
    },

    /// Request a fresh TOTP provisioning secret
    RequestTotpSetup,

    /// Confirm TOTP enrollment with a code from the authenticator app
    VerifyTotpCode {
        /// Six-digit code entered by the user
        code: String,
    },

    // =========================================================================
    // Progress Intents
    // =========================================================================
    /// Re-fetch all progress counters immediately
    RefreshProgress,

    /// Submit the account for final verification
    SubmitVerification {
        /// ISO 3166 nationality entered by the user
        nationality: String,
    },

    // =========================================================================
    // UI Intents
    // =========================================================================
    /// Clear the current alert banner
    DismissAlert,
}

impl SettingsIntent {
    /// Short human-readable description for logging.
    pub fn description(&self) -> &'static str {
        match self {
            Self::RefreshAuthStatus => "refresh auth status",
            Self::SubmitSelfie { .. } => "submit selfie",
            Self::RequestTotpSetup => "request totp setup",
            Self::VerifyTotpCode { .. } => "verify totp code",
            Self::RefreshProgress => "refresh progress",
            Self::SubmitVerification { .. } => "submit verification",
            Self::DismissAlert => "dismiss alert",
        }
    }
}
