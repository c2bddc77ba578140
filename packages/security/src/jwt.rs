// ABOUTME: JWT generation and validation with a property-driven configuration
// ABOUTME: HS256 signing, typed validation outcomes and a refresh-token flow honoring only expired tokens

use std::collections::HashMap;

use chrono::{Duration, Utc};
use jmpsl_core::env::{EnvError, Property, PropertySource};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Base64-encoded secret used to sign tokens. Required.
pub const JWT_SECRET: Property = Property::required("jmpsl.security.jwt.secret");

/// Issuer claim stamped into generated tokens. Required.
pub const JWT_ISSUER: Property = Property::required("jmpsl.security.jwt.issuer");

/// Access-token lifetime in minutes. Defaults to 5.
pub const JWT_EXPIRED_MINUTES: Property =
    Property::with_default("jmpsl.security.jwt.expired-minutes", "5");

/// Refresh-token lifetime in days. Defaults to 90.
pub const REFRESH_TOKEN_EXPIRED_DAYS: Property =
    Property::with_default("jmpsl.security.jwt.refresh-token-expired-days", "90");

#[derive(Debug, Error)]
pub enum JwtError {
    #[error(transparent)]
    Env(#[from] EnvError),

    #[error("Invalid JWT secret: {0}")]
    InvalidSecret(String),

    #[error("Unable to encode JWT: {0}")]
    Encoding(String),
}

/// JWT settings resolved from the `jmpsl.security.jwt.*` properties.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub token_expired_minutes: i64,
    pub refresh_token_expired_days: i64,
}

impl JwtConfig {
    pub fn from_source(source: &dyn PropertySource) -> Result<Self, JwtError> {
        let token_expired_minutes: i32 = JWT_EXPIRED_MINUTES.resolve(source)?;
        let refresh_token_expired_days: i32 = REFRESH_TOKEN_EXPIRED_DAYS.resolve(source)?;
        Ok(Self {
            secret: JWT_SECRET.resolve(source)?,
            issuer: JWT_ISSUER.resolve(source)?,
            token_expired_minutes: i64::from(token_expired_minutes),
            refresh_token_expired_days: i64::from(refresh_token_expired_days),
        })
    }
}

/// Registered claims plus arbitrary application claims, ex. a user id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    pub iss: String,
    pub sub: String,
    pub iat: i64,
    pub exp: i64,

    #[serde(flatten)]
    pub custom: HashMap<String, serde_json::Value>,
}

/// Outcome of validating a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JwtValidationType {
    Malformed,
    Expired,
    Invalid,
    Other,
    Good,
}

impl JwtValidationType {
    pub fn message(&self) -> &'static str {
        match self {
            Self::Malformed => "Passed JSON Web Token is malformed.",
            Self::Expired => "Passed JSON Web Token is expired.",
            Self::Invalid => "Passed JSON Web Token is invalid.",
            Self::Other => "Some of the JSON Web Token claims are nullable.",
            Self::Good => "JSON Web Token is valid.",
        }
    }
}

/// Validation outcome together with the claims, when they could be read.
/// Expired tokens still carry their claims so refresh flows can inspect them.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenValidation {
    pub validation_type: JwtValidationType,
    pub claims: Option<Claims>,
}

impl TokenValidation {
    pub fn is_valid(&self) -> bool {
        self.validation_type == JwtValidationType::Good
    }
}

/// Token generation and validation over a cached key pair.
///
/// Keys are derived once from the configured secret; the service is cheap to
/// clone and share.
#[derive(Clone)]
pub struct JwtService {
    config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtService {
    pub fn new(config: JwtConfig) -> Result<Self, JwtError> {
        let encoding_key = EncodingKey::from_base64_secret(&config.secret)
            .map_err(|err| JwtError::InvalidSecret(err.to_string()))?;
        let decoding_key = DecodingKey::from_base64_secret(&config.secret)
            .map_err(|err| JwtError::InvalidSecret(err.to_string()))?;

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&config.issuer]);
        validation.validate_exp = true;

        Ok(Self {
            config,
            encoding_key,
            decoding_key,
            validation,
        })
    }

    /// Build the service from the `jmpsl.security.jwt.*` properties.
    pub fn from_source(source: &dyn PropertySource) -> Result<Self, JwtError> {
        Self::new(JwtConfig::from_source(source)?)
    }

    pub fn config(&self) -> &JwtConfig {
        &self.config
    }

    /// Generate a signed token for `subject` expiring after the configured
    /// number of minutes.
    pub fn generate_token(
        &self,
        subject: &str,
        custom: HashMap<String, serde_json::Value>,
    ) -> Result<String, JwtError> {
        let now = Utc::now();
        let expiration = now + Duration::minutes(self.config.token_expired_minutes);
        let claims = Claims {
            iss: self.config.issuer.clone(),
            sub: subject.to_string(),
            iat: now.timestamp(),
            exp: expiration.timestamp(),
            custom,
        };
        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|err| JwtError::Encoding(err.to_string()))
    }

    /// Validate a token and classify the failure, if any. Good tokens and
    /// expired tokens come back with claims attached.
    pub fn validate(&self, token: &str) -> TokenValidation {
        match decode::<Claims>(token, &self.decoding_key, &self.validation) {
            Ok(data) => TokenValidation {
                validation_type: JwtValidationType::Good,
                claims: Some(data.claims),
            },
            Err(err) => {
                let validation_type = match err.kind() {
                    ErrorKind::ExpiredSignature => JwtValidationType::Expired,
                    ErrorKind::InvalidToken
                    | ErrorKind::Base64(_)
                    | ErrorKind::Json(_)
                    | ErrorKind::Utf8(_) => JwtValidationType::Malformed,
                    ErrorKind::MissingRequiredClaim(_) => JwtValidationType::Other,
                    _ => JwtValidationType::Invalid,
                };
                tracing::error!("{} Token: {token}", validation_type.message());
                let claims = match validation_type {
                    JwtValidationType::Expired => self.decode_ignoring_expiry(token),
                    _ => None,
                };
                TokenValidation {
                    validation_type,
                    claims,
                }
            }
        }
    }

    /// Claims of a fully valid token, `None` for anything else.
    pub fn extract_claims(&self, token: &str) -> Option<Claims> {
        let outcome = self.validate(token);
        if outcome.is_valid() {
            outcome.claims
        } else {
            None
        }
    }

    /// Refresh-token flow: an expired (but otherwise well-formed and
    /// correctly signed) token yields the numeric claim named by
    /// `user_id_claim`. Valid and invalid tokens both yield `None`.
    pub fn validate_refresh_token(&self, expired_token: &str, user_id_claim: &str) -> Option<i64> {
        let outcome = self.validate(expired_token);
        if outcome.validation_type != JwtValidationType::Expired {
            return None;
        }
        outcome
            .claims?
            .custom
            .get(user_id_claim)
            .and_then(serde_json::Value::as_i64)
    }

    fn decode_ignoring_expiry(&self, token: &str) -> Option<Claims> {
        let mut lenient = self.validation.clone();
        lenient.validate_exp = false;
        decode::<Claims>(token, &self.decoding_key, &lenient)
            .ok()
            .map(|data| data.claims)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use pretty_assertions::assert_eq;

    use super::*;

    // "jwt-testing-secret" base64-encoded
    const SECRET: &str = "and0LXRlc3Rpbmctc2VjcmV0";

    fn config() -> JwtConfig {
        JwtConfig {
            secret: SECRET.to_string(),
            issuer: "jmpsl".to_string(),
            token_expired_minutes: 5,
            refresh_token_expired_days: 90,
        }
    }

    fn service() -> JwtService {
        JwtService::new(config()).unwrap()
    }

    fn user_claims(user_id: i64) -> HashMap<String, serde_json::Value> {
        let mut custom = HashMap::new();
        custom.insert("userId".to_string(), serde_json::json!(user_id));
        custom
    }

    #[test]
    fn test_config_from_source_defaults_and_required() {
        let mut source = HashMap::new();
        source.insert("jmpsl.security.jwt.secret".to_string(), SECRET.to_string());
        source.insert("jmpsl.security.jwt.issuer".to_string(), "jmpsl".to_string());

        let config = JwtConfig::from_source(&source).unwrap();
        assert_eq!(config.token_expired_minutes, 5);
        assert_eq!(config.refresh_token_expired_days, 90);

        let missing = JwtConfig::from_source(&HashMap::<String, String>::new());
        assert!(matches!(missing, Err(JwtError::Env(_))));
    }

    #[test]
    fn test_generated_token_round_trips() {
        let service = service();
        let token = service.generate_token("user:42", user_claims(42)).unwrap();

        let outcome = service.validate(&token);
        assert!(outcome.is_valid());

        let claims = service.extract_claims(&token).unwrap();
        assert_eq!(claims.sub, "user:42");
        assert_eq!(claims.iss, "jmpsl");
        assert_eq!(claims.custom.get("userId"), Some(&serde_json::json!(42)));
    }

    #[test]
    fn test_expired_token_is_classified_and_keeps_claims() {
        let mut expired_config = config();
        expired_config.token_expired_minutes = -10;
        let issuing = JwtService::new(expired_config).unwrap();
        let token = issuing.generate_token("user:7", user_claims(7)).unwrap();

        let outcome = service().validate(&token);
        assert_eq!(outcome.validation_type, JwtValidationType::Expired);
        assert!(!outcome.is_valid());
        assert_eq!(outcome.claims.unwrap().sub, "user:7");
    }

    #[test]
    fn test_wrong_secret_is_invalid() {
        let token = service().generate_token("user:1", HashMap::new()).unwrap();

        let mut other_config = config();
        // "another-secret" base64-encoded
        other_config.secret = "YW5vdGhlci1zZWNyZXQ=".to_string();
        let other = JwtService::new(other_config).unwrap();

        let outcome = other.validate(&token);
        assert_eq!(outcome.validation_type, JwtValidationType::Invalid);
        assert_eq!(outcome.claims, None);
    }

    #[test]
    fn test_malformed_token_is_classified() {
        let outcome = service().validate("definitely-not-a-jwt");
        assert_eq!(outcome.validation_type, JwtValidationType::Malformed);
        assert_eq!(outcome.claims, None);
    }

    #[test]
    fn test_extract_claims_on_broken_token_is_empty() {
        assert_eq!(service().extract_claims("definitely-not-a-jwt"), None);
    }

    #[test]
    fn test_refresh_flow_accepts_only_expired_tokens() {
        let service = service();
        let valid = service.generate_token("user:42", user_claims(42)).unwrap();
        assert_eq!(service.validate_refresh_token(&valid, "userId"), None);
        assert_eq!(service.validate_refresh_token("garbage", "userId"), None);

        let mut expired_config = config();
        expired_config.token_expired_minutes = -10;
        let issuing = JwtService::new(expired_config).unwrap();
        let expired = issuing.generate_token("user:42", user_claims(42)).unwrap();

        assert_eq!(service.validate_refresh_token(&expired, "userId"), Some(42));
        assert_eq!(service.validate_refresh_token(&expired, "absentClaim"), None);
    }

    #[test]
    fn test_invalid_base64_secret_is_rejected() {
        let mut broken = config();
        broken.secret = "%%%not-base64%%%".to_string();
        assert!(matches!(
            JwtService::new(broken),
            Err(JwtError::InvalidSecret(_))
        ));
    }
}
