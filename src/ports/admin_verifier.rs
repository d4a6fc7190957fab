//! Admin identity verification port.
//!
//! A pass/fail gate evaluated before any core logic runs. Verification
//! covers both authentication (the token is valid) and authorization (the
//! caller holds the admin role).

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::foundation::AdminId;

/// A verified admin caller.
#[derive(Debug, Clone)]
pub struct AdminIdentity {
    pub id: AdminId,
    pub email: Option<String>,
}

/// Error from admin verification.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    #[error("Missing bearer token")]
    MissingToken,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Admin access required")]
    Forbidden,
}

/// Port for verifying admin identity from a bearer token.
#[async_trait]
pub trait AdminVerifier: Send + Sync {
    async fn verify(&self, bearer_token: &str) -> Result<AdminIdentity, AuthError>;
}
