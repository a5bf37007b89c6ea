//! HS256 JSON Web Token implementation of [`AccessTokens`].

use std::fmt;

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::ports::{AccessTokenError, AccessTokens};
use crate::domain::{AccessToken, Email};

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    iat: i64,
    exp: i64,
}

/// Issues and verifies HS256 tokens with a shared secret.
#[derive(Clone)]
pub struct JwtAccessTokens {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl_secs: u64,
}

impl JwtAccessTokens {
    /// Create a token service signing with `secret`; tokens live `ttl_secs`.
    pub fn new(secret: &[u8], ttl_secs: u64) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_required_spec_claims(&["exp", "sub"]);
        validation.leeway = 0;
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
            ttl_secs,
        }
    }
}

impl fmt::Debug for JwtAccessTokens {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtAccessTokens")
            .field("algorithm", &"HS256")
            .field("ttl_secs", &self.ttl_secs)
            .finish_non_exhaustive()
    }
}

impl AccessTokens for JwtAccessTokens {
    fn issue(&self, email: &Email) -> Result<AccessToken, AccessTokenError> {
        let iat = Utc::now().timestamp();
        let ttl = i64::try_from(self.ttl_secs).unwrap_or(i64::MAX);
        let claims = Claims {
            sub: email.as_ref().to_owned(),
            iat,
            exp: iat.saturating_add(ttl),
        };
        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|err| AccessTokenError::signing(err.to_string()))?;
        Ok(AccessToken::new(token, self.ttl_secs))
    }

    fn verify(&self, token: &str) -> Result<Email, AccessTokenError> {
        let data = decode::<Claims>(token, &self.decoding, &self.validation).map_err(|err| {
            debug!(error = %err, "bearer token rejected");
            AccessTokenError::invalid(err.to_string())
        })?;
        Email::new(data.claims.sub).map_err(|err| AccessTokenError::invalid(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    const SECRET: &[u8] = b"test-secret-for-offences-api";

    #[fixture]
    fn tokens() -> JwtAccessTokens {
        JwtAccessTokens::new(SECRET, 86_400)
    }

    fn email() -> Email {
        Email::new("ada@example.com").expect("email")
    }

    fn signed(claims: &Claims, secret: &[u8]) -> String {
        encode(
            &Header::new(Algorithm::HS256),
            claims,
            &EncodingKey::from_secret(secret),
        )
        .expect("encode test token")
    }

    #[rstest]
    fn issued_token_verifies_to_subject(tokens: JwtAccessTokens) {
        let token = tokens.issue(&email()).expect("issue");
        assert_eq!(token.expires_in_secs(), 86_400);
        let subject = tokens.verify(token.token()).expect("verify");
        assert_eq!(subject, email());
    }

    #[rstest]
    #[case(600)]
    #[case(86_400)]
    fn configured_lifetime_sets_expiry(#[case] ttl_secs: u64) {
        let tokens = JwtAccessTokens::new(SECRET, ttl_secs);
        let token = tokens.issue(&email()).expect("issue");
        assert_eq!(token.expires_in_secs(), ttl_secs);

        let claims = decode::<Claims>(
            token.token(),
            &DecodingKey::from_secret(SECRET),
            &Validation::new(Algorithm::HS256),
        )
        .expect("decode issued token")
        .claims;
        assert_eq!(
            claims.exp - claims.iat,
            i64::try_from(ttl_secs).expect("ttl fits")
        );
    }

    #[rstest]
    fn token_from_other_secret_is_rejected(tokens: JwtAccessTokens) {
        let other = JwtAccessTokens::new(b"another-secret", 86_400);
        let token = other.issue(&email()).expect("issue");
        assert!(matches!(
            tokens.verify(token.token()),
            Err(AccessTokenError::Invalid { .. })
        ));
    }

    #[rstest]
    fn expired_token_is_rejected(tokens: JwtAccessTokens) {
        let now = Utc::now().timestamp();
        let token = signed(
            &Claims {
                sub: "ada@example.com".to_owned(),
                iat: now - 7_200,
                exp: now - 3_600,
            },
            SECRET,
        );
        assert!(matches!(
            tokens.verify(&token),
            Err(AccessTokenError::Invalid { .. })
        ));
    }

    #[rstest]
    #[case("")]
    #[case("not.a.jwt")]
    #[case("garbage")]
    fn malformed_tokens_are_rejected(tokens: JwtAccessTokens, #[case] token: &str) {
        assert!(matches!(
            tokens.verify(token),
            Err(AccessTokenError::Invalid { .. })
        ));
    }

    #[rstest]
    fn debug_hides_keys(tokens: JwtAccessTokens) {
        let rendered = format!("{tokens:?}");
        assert!(!rendered.contains("test-secret"));
        assert!(rendered.contains("86400"));
    }
}
