use crate::data::models::user::User;
use crate::security::errors::AuthError;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Issues and checks HS256 access tokens.
#[derive(Clone)]
pub struct JwtService {
    secret: Arc<str>,
    expiration_minutes: u64,
}

impl JwtService {
    pub fn new(secret: &str, expiration_minutes: u64) -> Self {
        JwtService {
            secret: Arc::from(secret),
            expiration_minutes,
        }
    }

    pub fn generate_token(&self, user: &User) -> Result<String, AuthError> {
        let curr_time = chrono::Utc::now().timestamp() as usize;

        let claims = AccessClaims {
            sub: user.id,
            iat: curr_time,
            exp: curr_time + (self.expiration_minutes * 60) as usize,
            administrator: user.administrator,
            guest: user.guest,
        };

        let token = jsonwebtoken::encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|_| AuthError::TokenCreationError)?;

        tracing::debug!("Token generated for user {}", user.id);

        Ok(token)
    }

    pub fn decode_token<T: for<'de> Deserialize<'de>>(&self, token: &str) -> Result<T, AuthError> {
        let token_data = jsonwebtoken::decode::<T>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )
        .map_err(|_| AuthError::InvalidToken)?;

        Ok(token_data.claims)
    }
}

/// Identity attached to every authenticated request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessClaims {
    /// Subject (user ID)
    pub sub: i32,
    /// Issued at (as UTC timestamp)
    pub iat: usize,
    /// Expiration time (as UTC timestamp)
    pub exp: usize,
    pub administrator: bool,
    pub guest: bool,
}

impl AccessClaims {
    pub fn user_id(&self) -> i32 {
        self.sub
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(administrator: bool, guest: bool) -> User {
        let now = chrono::Utc::now().naive_utc();
        User {
            id: 7,
            name: "Ana".to_string(),
            email: "ana@brewery.local".to_string(),
            password_hash: "x".to_string(),
            kind: "individual".to_string(),
            document: None,
            state_registration: None,
            administrator,
            guest,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn token_round_trips_role_flags() {
        let jwt = JwtService::new("test-secret", 5);
        let token = jwt.generate_token(&user(false, true)).unwrap();
        let claims: AccessClaims = jwt.decode_token(&token).unwrap();

        assert_eq!(claims.user_id(), 7);
        assert!(claims.guest);
        assert!(!claims.administrator);
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let token = JwtService::new("one", 5)
            .generate_token(&user(true, false))
            .unwrap();

        let decoded = JwtService::new("two", 5).decode_token::<AccessClaims>(&token);
        assert!(matches!(decoded, Err(AuthError::InvalidToken)));
    }
}
