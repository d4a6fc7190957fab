//! JWT admin verifier.
//!
//! Verifies HS256-signed bearer tokens issued by the storefront's auth
//! service and requires the `role` claim to be `admin`. Authentication
//! itself (issuing tokens) is out of scope; this is the gate in front of
//! the admin API.

use async_trait::async_trait;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use crate::domain::foundation::AdminId;
use crate::ports::{AdminIdentity, AdminVerifier, AuthError};

#[derive(Debug, Deserialize)]
struct Claims {
    /// Subject: the admin's user id (UUID).
    sub: String,
    role: Option<String>,
    email: Option<String>,
}

/// Verifies admin bearer tokens.
pub struct JwtAdminVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtAdminVerifier {
    pub fn new(secret: &SecretString, audience: Option<&str>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        match audience {
            Some(aud) => validation.set_audience(&[aud]),
            None => validation.validate_aud = false,
        }

        Self {
            decoding_key: DecodingKey::from_secret(secret.expose_secret().as_bytes()),
            validation,
        }
    }
}

#[async_trait]
impl AdminVerifier for JwtAdminVerifier {
    async fn verify(&self, bearer_token: &str) -> Result<AdminIdentity, AuthError> {
        if bearer_token.is_empty() {
            return Err(AuthError::MissingToken);
        }

        let token = decode::<Claims>(bearer_token, &self.decoding_key, &self.validation)
            .map_err(|e| AuthError::InvalidToken(e.to_string()))?;

        if token.claims.role.as_deref() != Some("admin") {
            return Err(AuthError::Forbidden);
        }

        let id = token
            .claims
            .sub
            .parse::<AdminId>()
            .map_err(|e| AuthError::InvalidToken(format!("sub is not a UUID: {}", e)))?;

        Ok(AdminIdentity {
            id,
            email: token.claims.email,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use serde::Serialize;

    #[derive(Serialize)]
    struct TestClaims {
        sub: String,
        role: Option<String>,
        email: Option<String>,
        exp: i64,
    }

    fn secret() -> SecretString {
        SecretString::new("test-secret".to_string())
    }

    fn token(claims: &TestClaims, key: &str) -> String {
        encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(key.as_bytes()),
        )
        .unwrap()
    }

    fn claims(role: Option<&str>) -> TestClaims {
        TestClaims {
            sub: AdminId::new().to_string(),
            role: role.map(|r| r.to_string()),
            email: Some("ops@inkpress.example".to_string()),
            exp: chrono::Utc::now().timestamp() + 600,
        }
    }

    #[tokio::test]
    async fn accepts_valid_admin_token() {
        let verifier = JwtAdminVerifier::new(&secret(), None);
        let claims = claims(Some("admin"));

        let identity = verifier
            .verify(&token(&claims, "test-secret"))
            .await
            .unwrap();

        assert_eq!(identity.id.to_string(), claims.sub);
        assert_eq!(identity.email.as_deref(), Some("ops@inkpress.example"));
    }

    #[tokio::test]
    async fn rejects_non_admin_role() {
        let verifier = JwtAdminVerifier::new(&secret(), None);

        let result = verifier
            .verify(&token(&claims(Some("customer")), "test-secret"))
            .await;
        assert!(matches!(result, Err(AuthError::Forbidden)));

        let result = verifier.verify(&token(&claims(None), "test-secret")).await;
        assert!(matches!(result, Err(AuthError::Forbidden)));
    }

    #[tokio::test]
    async fn rejects_wrong_signature() {
        let verifier = JwtAdminVerifier::new(&secret(), None);

        let result = verifier
            .verify(&token(&claims(Some("admin")), "other-secret"))
            .await;

        assert!(matches!(result, Err(AuthError::InvalidToken(_))));
    }

    #[tokio::test]
    async fn rejects_empty_token() {
        let verifier = JwtAdminVerifier::new(&secret(), None);
        assert!(matches!(
            verifier.verify("").await,
            Err(AuthError::MissingToken)
        ));
    }
}
