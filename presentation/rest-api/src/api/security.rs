use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use once_cell::sync::Lazy;
use poem::Request;
use poem::http::header::AUTHORIZATION;
use poem_openapi::SecurityScheme;
use serde::Deserialize;

use business::domain::shared::value_objects::UserId;

use crate::config::auth_config::AuthConfig;

/// Audience Supabase stamps on tokens of signed-in users.
const SUPABASE_AUDIENCE: &str = "authenticated";

#[derive(Debug, Deserialize)]
#[allow(dead_code)]
struct SupabaseClaims {
    sub: String,
    email: Option<String>,
    aud: String,
    exp: u64,
}

static VALIDATION: Lazy<Validation> = Lazy::new(|| {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_audience(&[SUPABASE_AUDIENCE]);
    validation.validate_exp = true;
    validation
});

/// Verifies a Supabase access token and returns the user it was issued to.
pub fn verify_token(token: &str, config: &AuthConfig) -> Result<UserId, String> {
    let key = DecodingKey::from_secret(config.jwt_secret.as_bytes());
    let token_data = decode::<SupabaseClaims>(token, &key, &VALIDATION)
        .map_err(|e| format!("auth.token_validation_failed: {e}"))?;

    if token_data.claims.sub.trim().is_empty() {
        return Err("auth.missing_subject".to_string());
    }
    Ok(UserId::new(token_data.claims.sub))
}

/// Token of an `Authorization: Bearer <token>` header, if the request has one.
pub fn extract_bearer_token(req: &Request) -> Option<&str> {
    let value = req.headers().get(AUTHORIZATION)?.to_str().ok()?;
    let mut parts = value.splitn(2, ' ');

    let scheme = parts.next()?;
    let token = parts.next()?.trim();

    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return None;
    }

    Some(token)
}

/// Supabase Bearer token authentication
#[derive(SecurityScheme)]
#[oai(
    ty = "bearer",
    bearer_format = "JWT",
    checker = "supabase_bearer_checker"
)]
pub struct SupabaseBearer(pub UserId);

async fn supabase_bearer_checker(
    req: &Request,
    bearer: poem_openapi::auth::Bearer,
) -> Option<UserId> {
    let Some(config) = req.data::<AuthConfig>() else {
        tracing::error!("Auth configuration missing from request data");
        return None;
    };

    match verify_token(&bearer.token, config) {
        Ok(user_id) => Some(user_id),
        Err(e) => {
            tracing::warn!("Supabase auth failed: {e}");
            None
        }
    }
}
