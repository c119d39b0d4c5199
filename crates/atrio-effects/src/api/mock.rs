//! Mock account API effect handler for testing

use async_trait::async_trait;
use atrio_core::effects::{
    AccountApiEffects, ApiError, AuthStatusRecord, GroupStats, SelfieImage, TotpProvision,
    TotpVerification, VerificationReceipt,
};
use std::sync::{Arc, Mutex};

/// Scripted responses returned by the mock, one slot per endpoint.
#[derive(Debug, Clone)]
struct Scripted {
    auth_status: Result<AuthStatusRecord, ApiError>,
    selfie_upload: Result<(), ApiError>,
    totp_secret: Result<TotpProvision, ApiError>,
    totp_verification: Result<TotpVerification, ApiError>,
    posts_opened: Result<f64, ApiError>,
    posts_published: Result<f64, ApiError>,
    channels_joined: Result<f64, ApiError>,
    group_stats: Result<GroupStats, ApiError>,
    verification: Result<VerificationReceipt, ApiError>,
}

impl Default for Scripted {
    fn default() -> Self {
        Self {
            auth_status: Ok(AuthStatusRecord::default()),
            selfie_upload: Ok(()),
            totp_secret: Ok(TotpProvision {
                secret: "JBSWY3DPEHPK3PXP".to_string(),
            }),
            totp_verification: Ok(TotpVerification {
                verified: true,
                verified_expires_at: None,
            }),
            posts_opened: Ok(0.0),
            posts_published: Ok(0.0),
            channels_joined: Ok(0.0),
            group_stats: Ok(GroupStats::default()),
            verification: Ok(VerificationReceipt { verified: true }),
        }
    }
}

/// Per-endpoint call counters (for testing)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CallCounts {
    /// Calls to `fetch_auth_status`
    pub auth_status: u64,
    /// Calls to `submit_selfie`
    pub submit_selfie: u64,
    /// Calls to `request_totp_secret`
    pub totp_secret: u64,
    /// Calls to `verify_totp_code`
    pub verify_totp: u64,
    /// Calls to `fetch_posts_opened`
    pub posts_opened: u64,
    /// Calls to `fetch_posts_published`
    pub posts_published: u64,
    /// Calls to `fetch_channels_joined`
    pub channels_joined: u64,
    /// Calls to `fetch_group_stats`
    pub group_stats: u64,
    /// Calls to `submit_verification`
    pub submit_verification: u64,
}

impl CallCounts {
    /// Total calls across every endpoint
    pub fn total(&self) -> u64 {
        self.auth_status
            + self.submit_selfie
            + self.totp_secret
            + self.verify_totp
            + self.posts_opened
            + self.posts_published
            + self.channels_joined
            + self.group_stats
            + self.submit_verification
    }
}

/// What the mock observed from its callers.
#[derive(Debug, Default)]
struct Observed {
    calls: CallCounts,
    last_totp_code: Option<String>,
    last_nationality: Option<String>,
    last_selfie: Option<SelfieImage>,
}

/// Mock account API handler for testing.
///
/// Responses default to benign successes (status unverified, counters at
/// zero) and can be rescripted per endpoint at any point, including while a
/// session actor holds a clone. Call counts and submitted arguments are
/// recorded for assertions.
#[derive(Debug, Clone)]
pub struct MockAccountApi {
    scripted: Arc<Mutex<Scripted>>,
    observed: Arc<Mutex<Observed>>,
}

impl MockAccountApi {
    /// Create a new mock with benign default responses
    pub fn new() -> Self {
        Self {
            scripted: Arc::new(Mutex::new(Scripted::default())),
            observed: Arc::new(Mutex::new(Observed::default())),
        }
    }

    // ========================================
    // Scripting
    // ========================================

    /// Script the auth-status response
    pub fn set_auth_status(&self, response: Result<AuthStatusRecord, ApiError>) {
        self.scripted.lock().unwrap().auth_status = response;
    }

    /// Script the selfie-upload response
    pub fn set_selfie_upload(&self, response: Result<(), ApiError>) {
        self.scripted.lock().unwrap().selfie_upload = response;
    }

    /// Script the TOTP-secret response
    pub fn set_totp_secret(&self, response: Result<TotpProvision, ApiError>) {
        self.scripted.lock().unwrap().totp_secret = response;
    }

    /// Script the TOTP-verify response
    pub fn set_totp_verification(&self, response: Result<TotpVerification, ApiError>) {
        self.scripted.lock().unwrap().totp_verification = response;
    }

    /// Script the posts-opened counter response
    pub fn set_posts_opened(&self, response: Result<f64, ApiError>) {
        self.scripted.lock().unwrap().posts_opened = response;
    }

    /// Script the posts-published counter response
    pub fn set_posts_published(&self, response: Result<f64, ApiError>) {
        self.scripted.lock().unwrap().posts_published = response;
    }

    /// Script the channels-joined counter response
    pub fn set_channels_joined(&self, response: Result<f64, ApiError>) {
        self.scripted.lock().unwrap().channels_joined = response;
    }

    /// Script all three plain counters at once
    pub fn set_counters(&self, opened: f64, published: f64, joined: f64) {
        let mut scripted = self.scripted.lock().unwrap();
        scripted.posts_opened = Ok(opened);
        scripted.posts_published = Ok(published);
        scripted.channels_joined = Ok(joined);
    }

    /// Script the group-stats response
    pub fn set_group_stats(&self, response: Result<GroupStats, ApiError>) {
        self.scripted.lock().unwrap().group_stats = response;
    }

    /// Script the final-verification response
    pub fn set_verification(&self, response: Result<VerificationReceipt, ApiError>) {
        self.scripted.lock().unwrap().verification = response;
    }

    // ========================================
    // Observation
    // ========================================

    /// Get per-endpoint call counts (for testing)
    pub fn calls(&self) -> CallCounts {
        self.observed.lock().unwrap().calls
    }

    /// Get the last TOTP code submitted (for testing)
    pub fn last_totp_code(&self) -> Option<String> {
        self.observed.lock().unwrap().last_totp_code.clone()
    }

    /// Get the last nationality submitted (for testing)
    pub fn last_nationality(&self) -> Option<String> {
        self.observed.lock().unwrap().last_nationality.clone()
    }

    /// Get the last selfie payload submitted (for testing)
    pub fn last_selfie(&self) -> Option<SelfieImage> {
        self.observed.lock().unwrap().last_selfie.clone()
    }

    /// Clear recorded calls and arguments (for testing)
    pub fn clear(&self) {
        *self.observed.lock().unwrap() = Observed::default();
    }
}

impl Default for MockAccountApi {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AccountApiEffects for MockAccountApi {
    async fn fetch_auth_status(&self) -> Result<AuthStatusRecord, ApiError> {
        self.observed.lock().unwrap().calls.auth_status += 1;
        self.scripted.lock().unwrap().auth_status.clone()
    }

    async fn submit_selfie(&self, image: &SelfieImage) -> Result<(), ApiError> {
        let mut observed = self.observed.lock().unwrap();
        observed.calls.submit_selfie += 1;
        observed.last_selfie = Some(image.clone());
        drop(observed);
        self.scripted.lock().unwrap().selfie_upload.clone()
    }

    async fn request_totp_secret(&self) -> Result<TotpProvision, ApiError> {
        self.observed.lock().unwrap().calls.totp_secret += 1;
        self.scripted.lock().unwrap().totp_secret.clone()
    }

    async fn verify_totp_code(&self, code: &str) -> Result<TotpVerification, ApiError> {
        let mut observed = self.observed.lock().unwrap();
        observed.calls.verify_totp += 1;
        observed.last_totp_code = Some(code.to_string());
        drop(observed);
        self.scripted.lock().unwrap().totp_verification.clone()
    }

    async fn fetch_posts_opened(&self) -> Result<f64, ApiError> {
        self.observed.lock().unwrap().calls.posts_opened += 1;
        self.scripted.lock().unwrap().posts_opened.clone()
    }

    async fn fetch_posts_published(&self) -> Result<f64, ApiError> {
        self.observed.lock().unwrap().calls.posts_published += 1;
        self.scripted.lock().unwrap().posts_published.clone()
    }

    async fn fetch_channels_joined(&self) -> Result<f64, ApiError> {
        self.observed.lock().unwrap().calls.channels_joined += 1;
        self.scripted.lock().unwrap().channels_joined.clone()
    }

    async fn fetch_group_stats(&self) -> Result<GroupStats, ApiError> {
        self.observed.lock().unwrap().calls.group_stats += 1;
        self.scripted.lock().unwrap().group_stats.clone()
    }

    async fn submit_verification(&self, nationality: &str) -> Result<VerificationReceipt, ApiError> {
        let mut observed = self.observed.lock().unwrap();
        observed.calls.submit_verification += 1;
        observed.last_nationality = Some(nationality.to_string());
        drop(observed);
        self.scripted.lock().unwrap().verification.clone()
    }
}
