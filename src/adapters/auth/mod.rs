//! Admin identity verification adapters.

mod jwt_admin_verifier;

pub use jwt_admin_verifier::JwtAdminVerifier;
