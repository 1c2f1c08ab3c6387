//! HS256 JWT generation and validation

use std::fmt::Debug;

use chrono::{DateTime, Duration, TimeZone, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::domain::employee::{Employee, Role};
use crate::domain::DomainError;

/// JWT claims carried by an employee session token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtClaims {
    /// Employee ID
    pub sub: String,
    /// Role at the time of login; access checks re-read the stored role
    pub role: Role,
    pub email: String,
    /// Issued at (Unix epoch seconds)
    pub iat: i64,
    /// Expiration (Unix epoch seconds)
    pub exp: i64,
}

impl JwtClaims {
    pub fn new(employee: &Employee, expiration_hours: u64) -> Self {
        let now = Utc::now();
        let exp = now + Duration::hours(i64::try_from(expiration_hours).unwrap_or(i64::MAX / 3600));

        Self {
            sub: employee.id().as_str().to_string(),
            role: employee.role(),
            email: employee.email().to_string(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
        }
    }

    pub fn employee_id(&self) -> &str {
        &self.sub
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        Utc.timestamp_opt(self.exp, 0).single().unwrap_or_else(Utc::now)
    }
}

/// A freshly signed token and its expiry
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Configuration for the JWT service
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HMAC secret used to sign and verify tokens
    pub secret: String,
    /// Token lifetime in hours
    pub expiration_hours: u64,
}

impl JwtConfig {
    pub fn new(secret: impl Into<String>, expiration_hours: u64) -> Self {
        Self {
            secret: secret.into(),
            expiration_hours,
        }
    }
}

/// Token operations used by the auth handlers and extractors
pub trait JwtGenerator: Send + Sync + Debug {
    /// Sign a token for the employee
    fn generate(&self, employee: &Employee) -> Result<IssuedToken, DomainError>;

    /// Verify signature and expiry, returning the claims
    fn validate(&self, token: &str) -> Result<JwtClaims, DomainError>;

    fn expiration_hours(&self) -> u64;
}

/// HS256 JWT service
#[derive(Clone)]
pub struct JwtService {
    expiration_hours: u64,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("expiration_hours", &self.expiration_hours)
            .field("secret", &"[hidden]")
            .finish()
    }
}

impl JwtService {
    pub fn new(config: JwtConfig) -> Self {
        Self {
            expiration_hours: config.expiration_hours,
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
        }
    }
}

impl JwtGenerator for JwtService {
    fn generate(&self, employee: &Employee) -> Result<IssuedToken, DomainError> {
        let claims = JwtClaims::new(employee, self.expiration_hours);

        let token = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| DomainError::internal(format!("Failed to sign JWT: {}", e)))?;

        Ok(IssuedToken {
            token,
            expires_at: claims.expires_at(),
        })
    }

    fn validate(&self, token: &str) -> Result<JwtClaims, DomainError> {
        decode::<JwtClaims>(token, &self.decoding_key, &Validation::default())
            .map(|data| data.claims)
            .map_err(|e| DomainError::unauthorized(format!("Invalid token: {}", e)))
    }

    fn expiration_hours(&self) -> u64 {
        self.expiration_hours
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::employee::EmployeeId;

    fn service() -> JwtService {
        JwtService::new(JwtConfig::new("test-secret-key-for-testing", 1))
    }

    fn manager() -> Employee {
        Employee::new(
            EmployeeId::generate(),
            "Lisa",
            "Harris",
            "lisa.harris@dentist.com",
            "hash",
            Role::Manager,
            None,
        )
    }

    #[test]
    fn test_generate_and_validate() {
        let service = service();
        let employee = manager();

        let issued = service.generate(&employee).unwrap();
        let claims = service.validate(&issued.token).unwrap();

        assert_eq!(claims.employee_id(), employee.id().as_str());
        assert_eq!(claims.role, Role::Manager);
        assert_eq!(claims.email, "lisa.harris@dentist.com");
        assert_eq!(claims.exp - claims.iat, 3600);
        assert_eq!(issued.expires_at.timestamp(), claims.exp);
    }

    #[test]
    fn test_invalid_token_is_unauthorized() {
        let result = service().validate("not-a-jwt");
        assert!(matches!(result, Err(DomainError::Unauthorized { .. })));
    }

    #[test]
    fn test_token_from_other_secret_rejected() {
        let other = JwtService::new(JwtConfig::new("another-secret", 1));
        let issued = other.generate(&manager()).unwrap();

        assert!(service().validate(&issued.token).is_err());
    }

    #[test]
    fn test_expired_token_rejected() {
        let service = service();
        let mut claims = JwtClaims::new(&manager(), 1);
        claims.iat -= 7200;
        claims.exp -= 7200;

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"test-secret-key-for-testing"),
        )
        .unwrap();

        assert!(matches!(
            service.validate(&token),
            Err(DomainError::Unauthorized { .. })
        ));
    }

    #[test]
    fn test_debug_hides_secret() {
        let output = format!("{:?}", service());
        assert!(!output.contains("test-secret-key"));
    }
}
