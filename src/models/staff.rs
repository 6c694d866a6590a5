//! Staff identity claims and roles

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;

/// Staff role slug carried in the access token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StaffRole {
    Admin,
    Manager,
    Staff,
}

impl StaffRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            StaffRole::Admin => "admin",
            StaffRole::Manager => "manager",
            StaffRole::Staff => "staff",
        }
    }
}

impl std::fmt::Display for StaffRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for StaffRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "admin" => Ok(StaffRole::Admin),
            "manager" => Ok(StaffRole::Manager),
            "staff" => Ok(StaffRole::Staff),
            _ => Err(format!("Invalid staff role: {}", s)),
        }
    }
}

impl From<&str> for StaffRole {
    fn from(s: &str) -> Self {
        s.parse().unwrap_or(StaffRole::Staff)
    }
}

/// JWT claims for authenticated staff members.
///
/// Tokens are minted by the external identity provider; this server only
/// validates them (HS256, shared secret) and enforces tenant scoping.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaffClaims {
    /// Subject (staff member identifier at the identity provider)
    pub sub: String,
    /// Tenant every query issued on behalf of this staff member is scoped to
    pub tenant_id: Uuid,
    pub role: StaffRole,
    pub exp: i64,
    pub iat: i64,
}

impl StaffClaims {
    /// Encode these claims as a signed JWT (used by tests and tooling;
    /// production tokens come from the identity provider)
    pub fn create_token(&self, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{encode, EncodingKey, Header};
        encode(
            &Header::default(),
            self,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
    }

    /// Validate and decode a bearer token
    pub fn from_token(token: &str, secret: &str) -> Result<Self, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{decode, DecodingKey, Validation};
        let token_data = decode::<Self>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        )?;
        Ok(token_data.claims)
    }

    pub fn is_admin(&self) -> bool {
        self.role == StaffRole::Admin
    }

    /// Require admin privileges
    pub fn require_admin(&self) -> Result<(), AppError> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(AppError::Authorization(
                "Administrator privileges required".to_string(),
            ))
        }
    }

    /// Settings writes need at least manager rank
    pub fn require_manage_settings(&self) -> Result<(), AppError> {
        match self.role {
            StaffRole::Admin | StaffRole::Manager => Ok(()),
            StaffRole::Staff => Err(AppError::Authorization(
                "Manager privileges required to change settings".to_string(),
            )),
        }
    }
}
