use jsonwebtoken::{Algorithm, DecodingKey, Validation};

use crate::config::{Config, Secret};
use crate::error::AuthError;
use crate::services::auth::claims::Claims;

/// Upper bound for clock-skew leeway (1 day).
///
/// jsonwebtoken computes `now - leeway` / `now + leeway`; a leeway close to the
/// current Unix time overflows.
pub const MAX_LEEWAY_SECONDS: u64 = 24 * 60 * 60;

/// Optional claim checks on top of the signature check.
#[derive(Debug, Clone, Default)]
pub struct VerifierOptions {
    pub issuer: Option<String>,
    pub audience: Option<String>,
    pub leeway_seconds: u64,
}

impl From<&Config> for VerifierOptions {
    fn from(config: &Config) -> Self {
        Self {
            issuer: config.jwt_issuer.clone(),
            audience: config.jwt_audience.clone(),
            leeway_seconds: config.jwt_leeway_seconds,
        }
    }
}

/// HMAC (HS256/384/512) bearer-token verifier.
///
/// - Built once at startup from the shared secret, read-only afterwards.
/// - Key material is intentionally not printable via Debug.
#[derive(Clone)]
pub struct TokenVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for TokenVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Do not print key material
        f.debug_struct("TokenVerifier")
            .field("validation", &self.validation)
            .finish()
    }
}

impl TokenVerifier {
    pub fn new(secret: &Secret, options: &VerifierOptions) -> Self {
        let decoding_key = DecodingKey::from_secret(secret.expose());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.algorithms = vec![Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];
        // exp is checked when present, not required
        validation.required_spec_claims.clear();
        validation.validate_exp = true;
        validation.validate_nbf = true;
        validation.leeway = options.leeway_seconds.min(MAX_LEEWAY_SECONDS);

        if let Some(issuer) = &options.issuer {
            validation.set_issuer(&[issuer]);
        }
        match &options.audience {
            Some(audience) => validation.set_audience(&[audience]),
            // otherwise any `aud` claim would be rejected
            None => validation.validate_aud = false,
        }

        Self {
            decoding_key,
            validation,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.jwt_secret, &VerifierOptions::from(config))
    }

    /// Verify the signature and time/claim constraints, then decode the payload.
    ///
    /// Every failure is reported as `AuthError::InvalidCredential`.
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        let data = jsonwebtoken::decode::<Claims>(token, &self.decoding_key, &self.validation)?;

        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};
    use jsonwebtoken::{EncodingKey, Header};
    use serde_json::{Value, json};

    use super::*;

    const SECRET: &str = "unit-test-secret";

    fn verifier(options: VerifierOptions) -> TokenVerifier {
        TokenVerifier::new(&Secret::new(SECRET), &options)
    }

    fn sign_with(alg: Algorithm, secret: &str, claims: &Value) -> String {
        jsonwebtoken::encode(
            &Header::new(alg),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    fn sign(claims: &Value) -> String {
        sign_with(Algorithm::HS256, SECRET, claims)
    }

    fn in_one_hour() -> i64 {
        (Utc::now() + Duration::hours(1)).timestamp()
    }

    #[test]
    fn valid_token_yields_exact_claims() {
        let payload = json!({"sub": "user-1", "role": "admin", "exp": in_one_hour()});
        let claims = verifier(VerifierOptions::default())
            .verify(&sign(&payload))
            .unwrap();

        assert_eq!(serde_json::to_value(&claims).unwrap(), payload);
    }

    #[test]
    fn token_without_exp_is_accepted() {
        let claims = verifier(VerifierOptions::default())
            .verify(&sign(&json!({"sub": "user-1"})))
            .unwrap();

        assert_eq!(claims.subject(), Some("user-1"));
    }

    #[test]
    fn other_hmac_strengths_are_accepted() {
        let v = verifier(VerifierOptions::default());
        for alg in [Algorithm::HS384, Algorithm::HS512] {
            let token = sign_with(alg, SECRET, &json!({"sub": "user-1"}));
            assert!(v.verify(&token).is_ok(), "{alg:?}");
        }
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = sign_with(Algorithm::HS256, "someone-else", &json!({"sub": "user-1"}));

        assert_eq!(
            verifier(VerifierOptions::default()).verify(&token),
            Err(AuthError::InvalidCredential)
        );
    }

    #[test]
    fn tampered_payload_is_rejected() {
        let token = sign(&json!({"sub": "user-1"}));
        let forged = sign_with(Algorithm::HS256, "x", &json!({"sub": "admin"}));

        // keep the original signature, swap in another payload
        let mut parts: Vec<&str> = token.split('.').collect();
        parts[1] = forged.split('.').nth(1).unwrap();
        let tampered = parts.join(".");

        assert_eq!(
            verifier(VerifierOptions::default()).verify(&tampered),
            Err(AuthError::InvalidCredential)
        );
    }

    #[test]
    fn expired_token_is_rejected() {
        let exp = (Utc::now() - Duration::minutes(5)).timestamp();
        let token = sign(&json!({"sub": "user-1", "exp": exp}));

        assert_eq!(
            verifier(VerifierOptions::default()).verify(&token),
            Err(AuthError::InvalidCredential)
        );
    }

    #[test]
    fn leeway_tolerates_small_skew() {
        let exp = (Utc::now() - Duration::seconds(10)).timestamp();
        let token = sign(&json!({"sub": "user-1", "exp": exp}));

        let v = verifier(VerifierOptions {
            leeway_seconds: 120,
            ..Default::default()
        });
        assert!(v.verify(&token).is_ok());
    }

    #[test]
    fn oversized_leeway_is_clamped() {
        let v = verifier(VerifierOptions {
            leeway_seconds: u64::MAX,
            ..Default::default()
        });

        // exp in 1970 stays expired, and checking it must not overflow
        let expired = sign(&json!({"sub": "u", "exp": 1}));
        assert_eq!(v.verify(&expired), Err(AuthError::InvalidCredential));

        let nbf = (Utc::now() + Duration::minutes(5)).timestamp();
        let fresh = sign(&json!({"sub": "u", "nbf": nbf, "exp": in_one_hour()}));
        assert!(v.verify(&fresh).is_ok());
    }

    #[test]
    fn not_yet_valid_token_is_rejected() {
        let nbf = (Utc::now() + Duration::hours(1)).timestamp();
        let token = sign(&json!({"sub": "user-1", "nbf": nbf}));

        assert_eq!(
            verifier(VerifierOptions::default()).verify(&token),
            Err(AuthError::InvalidCredential)
        );
    }

    #[test]
    fn malformed_tokens_are_rejected() {
        let v = verifier(VerifierOptions::default());
        for token in ["abc.def.ghi", "not-a-jwt", "a.b", "..."] {
            assert_eq!(v.verify(token), Err(AuthError::InvalidCredential), "{token}");
        }
    }

    #[test]
    fn aud_claim_is_ignored_without_configured_audience() {
        let token = sign(&json!({"sub": "user-1", "aud": "anything"}));
        assert!(verifier(VerifierOptions::default()).verify(&token).is_ok());
    }

    #[test]
    fn configured_issuer_and_audience_are_enforced() {
        let v = verifier(VerifierOptions {
            issuer: Some("https://issuer.example".into()),
            audience: Some("api".into()),
            leeway_seconds: 0,
        });

        let good = sign(&json!({"sub": "u", "iss": "https://issuer.example", "aud": "api"}));
        assert!(v.verify(&good).is_ok());

        let wrong_iss = sign(&json!({"sub": "u", "iss": "https://evil.example", "aud": "api"}));
        assert_eq!(v.verify(&wrong_iss), Err(AuthError::InvalidCredential));

        let wrong_aud = sign(&json!({"sub": "u", "iss": "https://issuer.example", "aud": "web"}));
        assert_eq!(v.verify(&wrong_aud), Err(AuthError::InvalidCredential));
    }
}
