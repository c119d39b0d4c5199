//! Portable business logic for the verification screen.
//!
//! Workflows are free async functions generic over the effect traits; they
//! validate, call the remote API, and mutate the screen state they are
//! handed. The session actor in [`crate::session`] is their only production
//! caller.

pub mod validate;
pub mod verification;

pub use validate::{
    is_valid_nationality, is_valid_totp_code, validate_nationality, validate_totp_code,
    NationalityError, TotpCodeError, TOTP_CODE_LENGTH,
};
pub use verification::{
    expire_and_reconcile, refresh_auth_status, refresh_progress, request_totp_setup,
    submit_selfie, submit_verification, verify_totp_code,
};
