//! Input Validation - Portable Business Logic
//!
//! Client-side validation for the verification screen. Every rule here runs
//! before any network call, so malformed input never leaves the device.

// ============================================================================
// TOTP Code Validation
// ============================================================================

/// Required length of a TOTP code.
pub const TOTP_CODE_LENGTH: usize = 6;

/// TOTP code validation error types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TotpCodeError {
    /// Code is not exactly six characters
    WrongLength {
        /// Actual length in characters
        length: usize,
    },
    /// Code contains a non-digit character
    NonNumeric,
}

impl std::fmt::Display for TotpCodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::WrongLength { length } => {
                write!(
                    f,
                    "TOTP code must be exactly {TOTP_CODE_LENGTH} digits (got {length})"
                )
            }
            Self::NonNumeric => write!(f, "TOTP code must contain only digits"),
        }
    }
}

impl std::error::Error for TotpCodeError {}

/// Validate a TOTP code before it is sent for verification.
///
/// # Validation Rules
/// - Must be exactly `TOTP_CODE_LENGTH` characters
/// - Every character must be an ASCII digit
///
/// No trimming is applied: authenticator apps emit bare digits, so any
/// surrounding whitespace is user error worth surfacing.
///
/// # Examples
/// ```rust
/// use atrio_app::workflows::validate::validate_totp_code;
///
/// assert!(validate_totp_code("123456").is_ok());
/// assert!(validate_totp_code("12345").is_err());
/// assert!(validate_totp_code("12345a").is_err());
/// ```
pub fn validate_totp_code(code: &str) -> Result<(), TotpCodeError> {
    let length = code.chars().count();
    if length != TOTP_CODE_LENGTH {
        return Err(TotpCodeError::WrongLength { length });
    }
    if !code.chars().all(|c| c.is_ascii_digit()) {
        return Err(TotpCodeError::NonNumeric);
    }
    Ok(())
}

/// Check if a TOTP code is valid.
///
/// Convenience function for form validation that just needs a boolean.
#[must_use]
pub fn is_valid_totp_code(code: &str) -> bool {
    validate_totp_code(code).is_ok()
}

// ============================================================================
// Nationality Validation
// ============================================================================

/// Nationality validation error types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NationalityError {
    /// Nationality is empty or whitespace-only
    Empty,
}

impl std::fmt::Display for NationalityError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "Nationality cannot be empty"),
        }
    }
}

impl std::error::Error for NationalityError {}

/// Validate the nationality entered on the final verification form.
///
/// # Returns
/// * `Ok(String)` - The trimmed, validated nationality
/// * `Err(NationalityError)` - If validation fails
///
/// # Examples
/// ```rust
/// use atrio_app::workflows::validate::validate_nationality;
///
/// assert_eq!(validate_nationality("  NL ").unwrap(), "NL");
/// assert!(validate_nationality("   ").is_err());
/// ```
pub fn validate_nationality(input: &str) -> Result<String, NationalityError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(NationalityError::Empty);
    }
    Ok(trimmed.to_string())
}

/// Check if a nationality entry is valid.
#[must_use]
pub fn is_valid_nationality(input: &str) -> bool {
    validate_nationality(input).is_ok()
}
