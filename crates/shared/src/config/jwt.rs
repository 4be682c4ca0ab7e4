use crate::{abstract_trait::JwtServiceTrait, errors::ServiceError};
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

pub const ACCESS_TOKEN_TTL_MINUTES: i64 = 60;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    #[serde(rename = "userId")]
    pub user_id: i32,
    pub email: String,
    pub role: String,
    pub exp: usize,
    pub iat: usize,
}

impl Claims {
    pub fn new(user_id: i32, email: &str, role: &str, exp: usize, iat: usize) -> Self {
        Claims {
            user_id,
            email: email.to_string(),
            role: role.to_string(),
            exp,
            iat,
        }
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.role.eq_ignore_ascii_case(role)
    }
}

#[derive(Clone)]
pub struct JwtConfig {
    jwt_secret: String,
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("jwt_secret", &"***")
            .finish()
    }
}

impl JwtConfig {
    pub fn new(jwt_secret: &str) -> Self {
        JwtConfig {
            jwt_secret: jwt_secret.to_string(),
        }
    }

    fn encode_claims(&self, claims: &Claims) -> Result<String, ServiceError> {
        encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(self.jwt_secret.as_ref()),
        )
        .map_err(ServiceError::Jwt)
    }
}

impl JwtServiceTrait for JwtConfig {
    fn generate_token(&self, user_id: i32, email: &str, role: &str) -> Result<String, ServiceError> {
        let now = Utc::now();
        let iat = now.timestamp() as usize;
        let exp = (now + Duration::minutes(ACCESS_TOKEN_TTL_MINUTES)).timestamp() as usize;

        self.encode_claims(&Claims::new(user_id, email, role, exp, iat))
    }

    fn verify_token(&self, token: &str) -> Result<Claims, ServiceError> {
        let decoding_key = DecodingKey::from_secret(self.jwt_secret.as_ref());
        let token_data = decode::<Claims>(token, &decoding_key, &Validation::default())
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => ServiceError::TokenExpired,
                _ => ServiceError::Jwt(e),
            })?;

        let current_time = Utc::now().timestamp() as usize;

        if token_data.claims.exp < current_time {
            return Err(ServiceError::TokenExpired);
        }

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_keeps_identity_and_role() {
        let jwt = JwtConfig::new("test-secret");
        let token = jwt.generate_token(7, "grower@farm.test", "farmer").unwrap();

        let claims = jwt.verify_token(&token).unwrap();
        assert_eq!(claims.user_id, 7);
        assert_eq!(claims.email, "grower@farm.test");
        assert!(claims.has_role("farmer"));
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = JwtConfig::new("one")
            .generate_token(1, "a@b.test", "buyer")
            .unwrap();

        assert!(matches!(
            JwtConfig::new("two").verify_token(&token),
            Err(ServiceError::Jwt(_))
        ));
    }

    #[test]
    fn expired_token_is_rejected() {
        let jwt = JwtConfig::new("test-secret");
        let past = (Utc::now() - Duration::hours(3)).timestamp() as usize;
        let token = jwt
            .encode_claims(&Claims::new(1, "a@b.test", "admin", past, past - 10))
            .unwrap();

        assert!(matches!(
            jwt.verify_token(&token),
            Err(ServiceError::TokenExpired)
        ));
    }

    #[test]
    fn claims_use_camel_case_user_id() {
        let claims = Claims::new(3, "a@b.test", "admin", 10, 5);
        let json = serde_json::to_value(&claims).unwrap();
        assert_eq!(json["userId"], 3);
    }
}
