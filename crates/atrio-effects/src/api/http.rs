//! HTTPS/JSON account API handler for production use

use async_trait::async_trait;
use atrio_core::effects::{
    AccountApiEffects, ApiError, AuthStatusRecord, GroupStats, SelfieImage, SelfieStatus,
    TotpProvision, TotpVerification, VerificationReceipt,
};
use atrio_core::PhysicalTime;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default per-request timeout when none is configured.
const DEFAULT_TIMEOUT_MS: u64 = 10_000;

/// Account API handler speaking HTTPS/JSON to the Atrio backend.
///
/// Every request carries the session's bearer token. The handler performs
/// exactly one attempt per call; retry policy belongs to the caller (and the
/// verification workflows deliberately have none).
#[derive(Debug, Clone)]
pub struct HttpAccountApi {
    base_url: String,
    bearer_token: String,
    request_timeout: Duration,
    client: reqwest::Client,
}

impl HttpAccountApi {
    /// Create a new handler with the default request timeout
    pub fn new(base_url: impl Into<String>, bearer_token: impl Into<String>) -> Self {
        Self::with_timeout(
            base_url,
            bearer_token,
            Duration::from_millis(DEFAULT_TIMEOUT_MS),
        )
    }

    /// Create a new handler with an explicit per-request timeout
    pub fn with_timeout(
        base_url: impl Into<String>,
        bearer_token: impl Into<String>,
        request_timeout: Duration,
    ) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            bearer_token: bearer_token.into(),
            request_timeout,
            client: reqwest::Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self
            .client
            .get(self.url(path))
            .bearer_auth(&self.bearer_token)
            .timeout(self.request_timeout)
            .send()
            .await
            .map_err(|e| ApiError::Network {
                message: format!("Failed to reach {}: {}", path, e),
            })?;
        Self::decode_json(path, response).await
    }

    async fn post_json<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let response = self
            .client
            .post(self.url(path))
            .bearer_auth(&self.bearer_token)
            .timeout(self.request_timeout)
            .json(body)
            .send()
            .await
            .map_err(|e| ApiError::Network {
                message: format!("Failed to reach {}: {}", path, e),
            })?;
        Self::decode_json(path, response).await
    }

    async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self
            .client
            .post(self.url(path))
            .bearer_auth(&self.bearer_token)
            .timeout(self.request_timeout)
            .send()
            .await
            .map_err(|e| ApiError::Network {
                message: format!("Failed to reach {}: {}", path, e),
            })?;
        Self::decode_json(path, response).await
    }

    /// Map a response to a typed payload, classifying failures.
    async fn decode_json<T: DeserializeOwned>(
        path: &str,
        response: reqwest::Response,
    ) -> Result<T, ApiError> {
        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(ApiError::Unauthorized);
        }
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            tracing::warn!("Request to {} rejected (status: {})", path, status);
            return Err(ApiError::Http {
                status: status.as_u16(),
                message,
            });
        }
        response.json().await.map_err(|e| ApiError::Decode {
            message: format!("Failed to parse response from {}: {}", path, e),
        })
    }

    /// Like `decode_json` for endpoints whose success body carries nothing.
    async fn expect_success(path: &str, response: reqwest::Response) -> Result<(), ApiError> {
        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(ApiError::Unauthorized);
        }
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            tracing::warn!("Request to {} rejected (status: {})", path, status);
            return Err(ApiError::Http {
                status: status.as_u16(),
                message,
            });
        }
        Ok(())
    }
}

// ========================================
// Wire payloads
// ========================================

#[derive(Debug, Deserialize)]
struct AuthStatusWire {
    #[serde(default)]
    selfie_status: SelfieStatus,
    #[serde(default)]
    selfie_blocked: bool,
    #[serde(default)]
    blocked_reason: Option<String>,
    #[serde(default)]
    totp_enabled: bool,
    #[serde(default)]
    account_verified: bool,
    /// ISO-8601 timestamp, absent while the account is unverified
    #[serde(default)]
    verified_expires_at: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CounterWire {
    value: f64,
}

#[derive(Debug, Deserialize)]
struct GroupStatsWire {
    #[serde(default)]
    active_members: f64,
    #[serde(default)]
    group_created: bool,
}

#[derive(Debug, Deserialize)]
struct TotpSecretWire {
    secret: String,
}

#[derive(Debug, Deserialize)]
struct TotpVerifyWire {
    verified: bool,
    #[serde(default)]
    verified_expires_at: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ReceiptWire {
    verified: bool,
}

#[derive(Debug, Serialize)]
struct TotpVerifyRequest<'a> {
    code: &'a str,
}

#[derive(Debug, Serialize)]
struct VerifyAccountRequest<'a> {
    nationality: &'a str,
}

/// Parse an optional ISO-8601 expiry from the wire.
fn parse_expiry(raw: Option<String>) -> Result<Option<PhysicalTime>, ApiError> {
    match raw {
        Some(ts) => PhysicalTime::from_rfc3339(&ts)
            .map(Some)
            .map_err(|e| ApiError::Decode {
                message: format!("Invalid expiry timestamp {:?}: {}", ts, e),
            }),
        None => Ok(None),
    }
}

fn auth_record_from_wire(wire: AuthStatusWire) -> Result<AuthStatusRecord, ApiError> {
    Ok(AuthStatusRecord {
        selfie_status: wire.selfie_status,
        selfie_blocked: wire.selfie_blocked,
        blocked_reason: wire.blocked_reason,
        totp_enabled: wire.totp_enabled,
        account_verified: wire.account_verified,
        verified_expires_at: parse_expiry(wire.verified_expires_at)?,
    })
}

#[async_trait]
impl AccountApiEffects for HttpAccountApi {
    async fn fetch_auth_status(&self) -> Result<AuthStatusRecord, ApiError> {
        let wire: AuthStatusWire = self.get_json("/account/auth-status").await?;
        auth_record_from_wire(wire)
    }

    async fn submit_selfie(&self, image: &SelfieImage) -> Result<(), ApiError> {
        let path = "/account/selfie";
        let response = self
            .client
            .post(self.url(path))
            .bearer_auth(&self.bearer_token)
            .timeout(self.request_timeout)
            .header(reqwest::header::CONTENT_TYPE, &image.mime_type)
            .body(image.bytes.clone())
            .send()
            .await
            .map_err(|e| ApiError::Network {
                message: format!("Failed to reach {}: {}", path, e),
            })?;
        Self::expect_success(path, response).await?;
        tracing::debug!("Selfie submitted for review ({} bytes)", image.bytes.len());
        Ok(())
    }

    async fn request_totp_secret(&self) -> Result<TotpProvision, ApiError> {
        let wire: TotpSecretWire = self.post_empty("/account/totp/secret").await?;
        Ok(TotpProvision {
            secret: wire.secret,
        })
    }

    async fn verify_totp_code(&self, code: &str) -> Result<TotpVerification, ApiError> {
        let wire: TotpVerifyWire = self
            .post_json("/account/totp/verify", &TotpVerifyRequest { code })
            .await?;
        Ok(TotpVerification {
            verified: wire.verified,
            verified_expires_at: parse_expiry(wire.verified_expires_at)?,
        })
    }

    async fn fetch_posts_opened(&self) -> Result<f64, ApiError> {
        let wire: CounterWire = self.get_json("/progress/posts-opened").await?;
        Ok(wire.value)
    }

    async fn fetch_posts_published(&self) -> Result<f64, ApiError> {
        let wire: CounterWire = self.get_json("/progress/posts-published").await?;
        Ok(wire.value)
    }

    async fn fetch_channels_joined(&self) -> Result<f64, ApiError> {
        let wire: CounterWire = self.get_json("/progress/channels-joined").await?;
        Ok(wire.value)
    }

    async fn fetch_group_stats(&self) -> Result<GroupStats, ApiError> {
        let wire: GroupStatsWire = self.get_json("/progress/group-stats").await?;
        Ok(GroupStats {
            active_members: wire.active_members,
            group_created: wire.group_created,
        })
    }

    async fn submit_verification(&self, nationality: &str) -> Result<VerificationReceipt, ApiError> {
        let wire: ReceiptWire = self
            .post_json("/account/verify", &VerifyAccountRequest { nationality })
            .await?;
        tracing::debug!("Account verification submitted (verified: {})", wire.verified);
        Ok(VerificationReceipt {
            verified: wire.verified,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_stripped() {
        let api = HttpAccountApi::new("https://api.atrio.app/", "token");
        assert_eq!(
            api.url("/account/auth-status"),
            "https://api.atrio.app/account/auth-status"
        );
    }

    #[test]
    fn test_auth_status_wire_decodes() {
        let json = r#"{
            "selfie_status": "accepted",
            "selfie_blocked": false,
            "totp_enabled": true,
            "account_verified": true,
            "verified_expires_at": "2024-01-15T10:30:00Z"
        }"#;
        let wire: AuthStatusWire = serde_json::from_str(json).unwrap();
        let record = auth_record_from_wire(wire).unwrap();

        assert_eq!(record.selfie_status, SelfieStatus::Accepted);
        assert!(!record.selfie_blocked);
        assert_eq!(record.blocked_reason, None);
        assert!(record.totp_enabled);
        assert!(record.account_verified);
        assert!(record.verified_expires_at.is_some());
    }

    #[test]
    fn test_auth_status_wire_defaults_for_sparse_payload() {
        let wire: AuthStatusWire = serde_json::from_str("{}").unwrap();
        let record = auth_record_from_wire(wire).unwrap();
        assert_eq!(record, AuthStatusRecord::default());
    }

    #[test]
    fn test_auth_status_wire_rejects_bad_expiry() {
        let json = r#"{"verified_expires_at": "soon"}"#;
        let wire: AuthStatusWire = serde_json::from_str(json).unwrap();
        let err = auth_record_from_wire(wire).unwrap_err();
        assert!(matches!(err, ApiError::Decode { .. }));
    }

    #[test]
    fn test_counter_wire_decodes_fractional_value() {
        let wire: CounterWire = serde_json::from_str(r#"{"value": 41.7}"#).unwrap();
        assert!((wire.value - 41.7).abs() < f64::EPSILON);
    }

    #[test]
    fn test_group_stats_wire_decodes() {
        let wire: GroupStatsWire =
            serde_json::from_str(r#"{"active_members": 12.0, "group_created": true}"#).unwrap();
        assert!((wire.active_members - 12.0).abs() < f64::EPSILON);
        assert!(wire.group_created);
    }

    #[test]
    fn test_totp_verify_wire_without_expiry() {
        let wire: TotpVerifyWire = serde_json::from_str(r#"{"verified": false}"#).unwrap();
        assert!(!wire.verified);
        assert!(wire.verified_expires_at.is_none());
    }

    #[test]
    fn test_request_bodies_serialize() {
        let verify = serde_json::to_value(TotpVerifyRequest { code: "123456" }).unwrap();
        assert_eq!(verify, serde_json::json!({"code": "123456"}));

        let submit = serde_json::to_value(VerifyAccountRequest { nationality: "NZ" }).unwrap();
        assert_eq!(submit, serde_json::json!({"nationality": "NZ"}));
    }
}
