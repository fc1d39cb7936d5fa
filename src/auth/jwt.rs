// JWT token creation and verification
// Stateless bearer tokens: validity is signature plus expiry, nothing stored

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT claims structure
///
/// # Fields
/// * `sub` - Subject (user_id)
/// * `iat` - Issue time (seconds since epoch)
/// * `exp` - Expiry time (seconds since epoch)
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: Uuid,
    pub iat: i64,
    pub exp: i64,
}

/// Creates a signed token for a user
///
/// # Arguments
/// * `user_id` - The user's ID to include in the token
/// * `secret` - The HS256 signing secret
/// * `ttl` - How long the token stays valid
///
/// # Example
/// ```
/// use chrono::Duration;
/// use ecocycle_api::auth::jwt::create_token;
/// use uuid::Uuid;
///
/// let token = create_token(Uuid::new_v4(), "your-secret-key", Duration::hours(1))
///     .expect("valid token");
/// assert_eq!(token.split('.').count(), 3);
/// ```
pub fn create_token(
    user_id: Uuid,
    secret: &str,
    ttl: Duration,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = Utc::now();
    let claims = Claims {
        sub: user_id,
        iat: now.timestamp(),
        exp: (now + ttl).timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_ref()),
    )
}

/// Verifies signature and expiry, returning the decoded claims
pub fn verify_token(token: &str, secret: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    let mut validation = Validation::default();
    validation.leeway = 0;

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_ref()),
        &validation,
    )
    .map(|data| data.claims)
}
