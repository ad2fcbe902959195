use anyhow::Context;

/// Verification settings for Supabase access tokens.
///
/// Environment variables:
/// - SUPABASE_JWT_SECRET: HS256 signing secret of the project (required)
#[derive(Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
}

impl AuthConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let jwt_secret =
            std::env::var("SUPABASE_JWT_SECRET").context("SUPABASE_JWT_SECRET must be set")?;
        Ok(Self { jwt_secret })
    }
}
