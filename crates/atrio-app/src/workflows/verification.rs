//! Verification Workflow - Portable Business Logic
//!
//! This module contains the account-verification operations that are portable
//! across all frontends. Each function takes an effect reference per-call and
//! mutates the screen state it is handed; the session actor is the only
//! caller, which keeps every mutation single-writer.
//!
//! Every remote call is try-once: failures are converted to [`AppError`],
//! the prior state is preserved, and no retries happen here.

use atrio_core::effects::{AccountApiEffects, SelfieImage};

use crate::errors::AppError;
use crate::views::verification::{ObjectiveKind, VerificationState};
use crate::workflows::validate::{validate_nationality, validate_totp_code};

/// Re-fetch the authoritative auth snapshot and reconcile local state.
///
/// **What it does**: calls the auth-status endpoint and replaces local auth
/// state with the server's answer
/// **Returns**: Unit result; local state is untouched on failure
pub async fn refresh_auth_status<E>(
    effects: &E,
    state: &mut VerificationState,
) -> Result<(), AppError>
where
    E: AccountApiEffects + Send + Sync,
{
    let record = effects.fetch_auth_status().await?;
    state.auth.apply_status(&record);
    Ok(())
}

/// Upload a selfie for identity review.
///
/// **What it does**: validates the submission gate, uploads the image, and
/// optimistically moves review to pending on acknowledgment
/// **Returns**: Unit result; on upload failure the review status is
/// preserved and the upload cell records the rejection
pub async fn submit_selfie<E>(
    effects: &E,
    state: &mut VerificationState,
    image: &SelfieImage,
) -> Result<(), AppError>
where
    E: AccountApiEffects + Send + Sync,
{
    if state.auth.selfie_blocked {
        let message = match &state.auth.blocked_reason {
            Some(reason) => format!("submissions are blocked: {}", reason),
            None => "submissions are blocked for this account".to_string(),
        };
        return Err(AppError::validation("selfie", message));
    }
    if !state.auth.can_submit_selfie() {
        return Err(AppError::validation(
            "selfie",
            format!(
                "a selfie cannot be submitted while review is {}",
                state.auth.selfie_status.display_name()
            ),
        ));
    }

    state.selfie_upload.begin();
    match effects.submit_selfie(image).await {
        Ok(()) => {
            state.auth.begin_selfie_review();
            state.selfie_upload.resolve(());
            Ok(())
        }
        Err(err) => {
            let err = AppError::from(err);
            state.selfie_upload.reject(err.to_string());
            Err(err)
        }
    }
}

/// Provision a TOTP secret for enrollment.
///
/// **What it does**: checks the enrollment gate and fetches a fresh secret
/// **Returns**: Unit result; the secret lands in `auth.pending_totp`
pub async fn request_totp_setup<E>(
    effects: &E,
    state: &mut VerificationState,
) -> Result<(), AppError>
where
    E: AccountApiEffects + Send + Sync,
{
    if !state.auth.can_request_totp() {
        let message = if state.auth.totp_enabled {
            "TOTP is already enabled"
        } else {
            "selfie review must be accepted before TOTP setup"
        };
        return Err(AppError::validation("totp", message));
    }

    let provision = effects.request_totp_secret().await?;
    state.auth.issue_totp_secret(provision);
    Ok(())
}

/// Verify a TOTP code and claim the verified badge.
///
/// **What it does**: validates the code shape client-side, then asks the
/// server to check it; acceptance completes enrollment and grants verified
/// status with its expiry
/// **Returns**: Unit result; a malformed code never reaches the network
pub async fn verify_totp_code<E>(
    effects: &E,
    state: &mut VerificationState,
    code: &str,
) -> Result<(), AppError>
where
    E: AccountApiEffects + Send + Sync,
{
    validate_totp_code(code).map_err(|e| AppError::validation("totp_code", e.to_string()))?;
    if state.auth.totp_enabled {
        return Err(AppError::validation("totp", "TOTP is already enabled"));
    }
    if state.auth.pending_totp.is_none() {
        return Err(AppError::validation("totp", "no TOTP setup is in progress"));
    }

    state.totp_verify.begin();
    match effects.verify_totp_code(code).await {
        Ok(check) if check.verified => {
            state.auth.apply_totp_verified(check.verified_expires_at);
            state.totp_verify.resolve(());
            Ok(())
        }
        Ok(_) => {
            let err = AppError::validation("totp_code", "the code was not accepted");
            state.totp_verify.reject(err.to_string());
            Err(err)
        }
        Err(err) => {
            let err = AppError::from(err);
            state.totp_verify.reject(err.to_string());
            Err(err)
        }
    }
}

/// Refresh every progress counter.
///
/// **What it does**: fetches the four counters concurrently and records
/// whatever came back
/// **Returns**: Nothing; a failed fetch keeps the previous value for that
/// counter and never disturbs the other three
pub async fn refresh_progress<E>(effects: &E, state: &mut VerificationState)
where
    E: AccountApiEffects + Send + Sync,
{
    let (opened, published, joined, group) = futures::join!(
        effects.fetch_posts_opened(),
        effects.fetch_posts_published(),
        effects.fetch_channels_joined(),
        effects.fetch_group_stats(),
    );

    match opened {
        Ok(value) => state.progress.update_progress(ObjectiveKind::PostsOpened, value),
        Err(err) => tracing::debug!("Keeping stale posts-opened counter: {}", err),
    }
    match published {
        Ok(value) => state
            .progress
            .update_progress(ObjectiveKind::PostsPublished, value),
        Err(err) => tracing::debug!("Keeping stale posts-published counter: {}", err),
    }
    match joined {
        Ok(value) => state
            .progress
            .update_progress(ObjectiveKind::ChannelsJoined, value),
        Err(err) => tracing::debug!("Keeping stale channels-joined counter: {}", err),
    }
    match group {
        Ok(stats) => {
            state
                .progress
                .update_progress(ObjectiveKind::GroupMembersActive, stats.active_members);
            state.progress.set_group_created(stats.group_created);
        }
        Err(err) => tracing::debug!("Keeping stale group stats: {}", err),
    }
}

/// Submit the final verification request.
///
/// **What it does**: validates the nationality entry and the eligibility
/// gate, submits, and locks the progress board on confirmation
/// **Returns**: Unit result
pub async fn submit_verification<E>(
    effects: &E,
    state: &mut VerificationState,
    nationality: &str,
) -> Result<(), AppError>
where
    E: AccountApiEffects + Send + Sync,
{
    let nationality = validate_nationality(nationality)
        .map_err(|e| AppError::validation("nationality", e.to_string()))?;
    if !state.eligible_to_verify() {
        return Err(AppError::validation(
            "verification",
            "the account does not meet all verification requirements yet",
        ));
    }

    let receipt = effects.submit_verification(&nationality).await?;
    if !receipt.verified {
        return Err(AppError::internal(
            "the server declined the verification request",
        ));
    }
    state.progress.lock();
    Ok(())
}

/// Hard-reset expired verified status, then reconcile with the server.
///
/// **What it does**: resets the whole screen to its initial values and
/// immediately re-fetches auth status; if the server still reports valid
/// verification (clock skew), its answer wins and the badge comes back
/// **Returns**: Unit result from the reconciling fetch
pub async fn expire_and_reconcile<E>(
    effects: &E,
    state: &mut VerificationState,
) -> Result<(), AppError>
where
    E: AccountApiEffects + Send + Sync,
{
    state.expire();
    refresh_auth_status(effects, state).await
}
