//! Account Verification API Effect Trait Definitions
//!
//! This module defines the trait interface for the remote account-verification
//! endpoints consumed by the settings surface: auth status, selfie review,
//! TOTP enrollment, progress counters, and the final verification submission.
//!
//! # Effect Classification
//!
//! - **Category**: Infrastructure Effect
//! - **Implementation**: `atrio-effects` (HTTPS handler + scripted mock)
//! - **Usage**: verification workflows in `atrio-app`
//!
//! The backend owns the exact wire shapes; this seam only carries the fields
//! the application core needs: one numeric or boolean value per counter call
//! and a wall-clock expiry for the verified state. Transport handlers map
//! their wire formats into these records.

use crate::time::PhysicalTime;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Error type for remote account API operations.
#[derive(Debug, Clone, thiserror::Error, Serialize, Deserialize)]
pub enum ApiError {
    /// Bearer token was rejected
    #[error("Unauthorized")]
    Unauthorized,
    /// Server answered with a non-success status
    #[error("HTTP {status}: {message}")]
    Http {
        /// HTTP status code
        status: u16,
        /// Response body or status text
        message: String,
    },
    /// Request never produced a response (DNS, TLS, timeout, ...)
    #[error("Network error: {message}")]
    Network {
        /// Description of the transport failure
        message: String,
    },
    /// Response arrived but could not be decoded
    #[error("Decode error: {message}")]
    Decode {
        /// Description of the decoding failure
        message: String,
    },
}

impl ApiError {
    /// Whether a retry of the same request could plausibly succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Network { .. } => true,
            Self::Http { status, .. } => *status >= 500,
            Self::Unauthorized | Self::Decode { .. } => false,
        }
    }
}

/// Review status of the identity selfie.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelfieStatus {
    /// No selfie has been submitted for review
    #[default]
    NotSubmitted,
    /// A selfie is awaiting review
    Pending,
    /// The selfie passed review
    Accepted,
    /// The selfie failed review; a new one may be submitted
    Failed,
}

impl SelfieStatus {
    /// Get human-readable name for the review status
    pub fn display_name(&self) -> &'static str {
        match self {
            SelfieStatus::NotSubmitted => "Not Submitted",
            SelfieStatus::Pending => "Under Review",
            SelfieStatus::Accepted => "Accepted",
            SelfieStatus::Failed => "Failed",
        }
    }
}

/// Snapshot of the account's authentication state as reported by the server.
///
/// Fetched on screen entry and re-fetched on every reconciliation; the
/// server's answer always replaces local state.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AuthStatusRecord {
    /// Selfie review status
    pub selfie_status: SelfieStatus,
    /// Whether further selfie submissions are suppressed
    pub selfie_blocked: bool,
    /// Reason the account was blocked from submitting, when provided
    pub blocked_reason: Option<String>,
    /// Whether a TOTP factor is enrolled and verified
    pub totp_enabled: bool,
    /// Whether the account currently holds verified status
    pub account_verified: bool,
    /// When the verified status lapses, if verified
    pub verified_expires_at: Option<PhysicalTime>,
}

/// A selfie image payload for review submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelfieImage {
    /// Raw encoded image bytes
    pub bytes: Vec<u8>,
    /// MIME type of the encoding, e.g. `image/jpeg`
    pub mime_type: String,
}

impl SelfieImage {
    /// Create a JPEG-encoded selfie payload
    pub fn jpeg(bytes: Vec<u8>) -> Self {
        Self {
            bytes,
            mime_type: "image/jpeg".to_string(),
        }
    }
}

/// A freshly provisioned TOTP secret awaiting code verification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TotpProvision {
    /// Base32 shared secret to load into an authenticator app
    pub secret: String,
}

/// Server confirmation of a TOTP code check.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TotpVerification {
    /// Whether the submitted code was accepted
    pub verified: bool,
    /// Expiry of the verified status granted by this check
    pub verified_expires_at: Option<PhysicalTime>,
}

/// Group activity statistics for the group-related objectives.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GroupStats {
    /// Number of currently active members across the account's groups
    pub active_members: f64,
    /// Whether the account has created at least one group
    pub group_created: bool,
}

/// Server acknowledgment of the final verification submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct VerificationReceipt {
    /// Whether the account was granted verified status
    pub verified: bool,
}

/// Account verification API interface
///
/// Every call maps to one HTTPS/JSON endpoint with bearer-token auth. Each
/// progress counter is fetched independently so one failing counter never
/// poisons the others; callers keep the previous value on failure.
///
/// Calls are try-once: no retry or backoff policy lives behind this seam.
#[async_trait]
pub trait AccountApiEffects: Send + Sync {
    /// Fetch the current authentication snapshot for the account.
    async fn fetch_auth_status(&self) -> Result<AuthStatusRecord, ApiError>;

    /// Submit a selfie image for review.
    ///
    /// A success response is an upload acknowledgment only; review happens
    /// asynchronously and surfaces through `fetch_auth_status`.
    async fn submit_selfie(&self, image: &SelfieImage) -> Result<(), ApiError>;

    /// Provision a TOTP secret for enrollment.
    ///
    /// Purely additive: provisioning never changes any status field until a
    /// code is verified.
    async fn request_totp_secret(&self) -> Result<TotpProvision, ApiError>;

    /// Verify a 6-digit TOTP code against the provisioned secret.
    async fn verify_totp_code(&self, code: &str) -> Result<TotpVerification, ApiError>;

    /// Fetch the number of posts the account has opened.
    async fn fetch_posts_opened(&self) -> Result<f64, ApiError>;

    /// Fetch the number of posts the account has published.
    async fn fetch_posts_published(&self) -> Result<f64, ApiError>;

    /// Fetch the number of channels the account has joined.
    async fn fetch_channels_joined(&self) -> Result<f64, ApiError>;

    /// Fetch group activity statistics.
    async fn fetch_group_stats(&self) -> Result<GroupStats, ApiError>;

    /// Submit the final account-verification request.
    async fn submit_verification(&self, nationality: &str)
        -> Result<VerificationReceipt, ApiError>;
}

/// Blanket implementation for Arc<T> where T: AccountApiEffects
#[async_trait]
impl<T: AccountApiEffects + ?Sized> AccountApiEffects for std::sync::Arc<T> {
    async fn fetch_auth_status(&self) -> Result<AuthStatusRecord, ApiError> {
        (**self).fetch_auth_status().await
    }

    async fn submit_selfie(&self, image: &SelfieImage) -> Result<(), ApiError> {
        (**self).submit_selfie(image).await
    }

    async fn request_totp_secret(&self) -> Result<TotpProvision, ApiError> {
        (**self).request_totp_secret().await
    }

    async fn verify_totp_code(&self, code: &str) -> Result<TotpVerification, ApiError> {
        (**self).verify_totp_code(code).await
    }

    async fn fetch_posts_opened(&self) -> Result<f64, ApiError> {
        (**self).fetch_posts_opened().await
    }

    async fn fetch_posts_published(&self) -> Result<f64, ApiError> {
        (**self).fetch_posts_published().await
    }

    async fn fetch_channels_joined(&self) -> Result<f64, ApiError> {
        (**self).fetch_channels_joined().await
    }

    async fn fetch_group_stats(&self) -> Result<GroupStats, ApiError> {
        (**self).fetch_group_stats().await
    }

    async fn submit_verification(
        &self,
        nationality: &str,
    ) -> Result<VerificationReceipt, ApiError> {
        (**self).submit_verification(nationality).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selfie_status_display_names() {
        assert_eq!(SelfieStatus::NotSubmitted.display_name(), "Not Submitted");
        assert_eq!(SelfieStatus::Pending.display_name(), "Under Review");
        assert_eq!(SelfieStatus::Accepted.display_name(), "Accepted");
        assert_eq!(SelfieStatus::Failed.display_name(), "Failed");
    }

    #[test]
    fn test_selfie_status_wire_format() {
        let json = serde_json::to_string(&SelfieStatus::NotSubmitted).unwrap();
        assert_eq!(json, "\"not_submitted\"");
        let parsed: SelfieStatus = serde_json::from_str("\"accepted\"").unwrap();
        assert_eq!(parsed, SelfieStatus::Accepted);
    }

    #[test]
    fn test_auth_status_default_is_unverified() {
        let record = AuthStatusRecord::default();
        assert_eq!(record.selfie_status, SelfieStatus::NotSubmitted);
        assert!(!record.selfie_blocked);
        assert!(!record.totp_enabled);
        assert!(!record.account_verified);
        assert!(record.verified_expires_at.is_none());
    }

    #[test]
    fn test_api_error_transience() {
        assert!(ApiError::Network {
            message: "timeout".to_string()
        }
        .is_transient());
        assert!(ApiError::Http {
            status: 503,
            message: "unavailable".to_string()
        }
        .is_transient());
        assert!(!ApiError::Http {
            status: 422,
            message: "bad code".to_string()
        }
        .is_transient());
        assert!(!ApiError::Unauthorized.is_transient());
    }

    #[test]
    fn test_selfie_image_jpeg() {
        let image = SelfieImage::jpeg(vec![0xFF, 0xD8]);
        assert_eq!(image.mime_type, "image/jpeg");
        assert_eq!(image.bytes.len(), 2);
    }
}
