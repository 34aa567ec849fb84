//! Access token issuing and validation.
//!
//! Tokens are compact JWS strings signed with HS256. Expiry is checked here
//! against the caller's clock rather than inside `jsonwebtoken`, so the
//! validity window is exactly `[iat, iat + ttl)` with no leeway.

use std::fmt;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde_json::{Map, Value};

use super::claims::{Claims, Subject, SubjectClaim};
use super::error::AuthError;
use crate::state::security_config::SecurityConfig;

const SUBJECT_CLAIM: &str = "user_id";
const EXPIRY_CLAIM: &str = "exp";

#[derive(Clone)]
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    algorithm: Algorithm,
    ttl: Duration,
}

impl fmt::Debug for TokenService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenService")
            .field("algorithm", &self.algorithm)
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

impl TokenService {
    pub fn new(security: &SecurityConfig) -> Self {
        Self {
            encoding: EncodingKey::from_secret(&security.jwt_secret),
            decoding: DecodingKey::from_secret(&security.jwt_secret),
            algorithm: security.algorithm,
            ttl: security.token_ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Sign a token for `subject`, valid from `now` for the configured TTL.
    pub fn issue(&self, subject: Subject, now: SystemTime) -> Result<String, AuthError> {
        let iat = unix_seconds(now);
        let claims = Claims {
            user_id: subject,
            iat,
            exp: iat.saturating_add(self.ttl.as_secs() as i64),
        };

        encode(&Header::new(self.algorithm), &claims, &self.encoding)
            .map_err(|e| AuthError::Signing(e.to_string()))
    }

    /// Verify `token` and return the subject it names.
    ///
    /// Checks run in a fixed order: structure, signature, expiry, subject.
    /// The first failure wins.
    pub fn validate(&self, token: &str, now: SystemTime) -> Result<Subject, AuthError> {
        check_structure(token)?;

        let mut validation = Validation::new(self.algorithm);
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.validate_aud = false;
        validation.required_spec_claims.clear();

        let data = decode::<Map<String, Value>>(token, &self.decoding, &validation).map_err(
            |e| match e.kind() {
                ErrorKind::InvalidSignature
                | ErrorKind::InvalidAlgorithm
                | ErrorKind::Base64(_) => AuthError::SignatureInvalid,
                _ => AuthError::MalformedToken,
            },
        )?;
        let claims = data.claims;

        let exp = claims
            .get(EXPIRY_CLAIM)
            .and_then(numeric_seconds)
            .ok_or(AuthError::TokenExpired)?;
        if exp <= unix_seconds(now) {
            return Err(AuthError::TokenExpired);
        }

        claims
            .get(SUBJECT_CLAIM)
            .and_then(SubjectClaim::from_value)
            .and_then(|claim| claim.normalize())
            .ok_or(AuthError::ClaimMissingOrUnrecognized)
    }
}

/// Three dot-separated segments whose first two are base64url JSON objects.
fn check_structure(token: &str) -> Result<(), AuthError> {
    let segments: Vec<&str> = token.split('.').collect();
    let [header, payload, _signature] = segments.as_slice() else {
        return Err(AuthError::MalformedToken);
    };
    for segment in [header, payload] {
        let bytes = URL_SAFE_NO_PAD
            .decode(segment)
            .map_err(|_| AuthError::MalformedToken)?;
        serde_json::from_slice::<Map<String, Value>>(&bytes)
            .map_err(|_| AuthError::MalformedToken)?;
    }
    Ok(())
}

fn numeric_seconds(value: &Value) -> Option<i64> {
    value
        .as_i64()
        .or_else(|| value.as_f64().filter(|f| f.is_finite()).map(|f| f.floor() as i64))
}

fn unix_seconds(t: SystemTime) -> i64 {
    match t.duration_since(UNIX_EPOCH) {
        Ok(d) => d.as_secs() as i64,
        Err(e) => -(e.duration().as_secs() as i64),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    const HOUR: u64 = 60 * 60;
    const TTL: u64 = 72 * HOUR;

    fn service(secret: &str) -> TokenService {
        TokenService::new(&SecurityConfig::new(secret.as_bytes()))
    }

    fn at(secs: u64) -> SystemTime {
        UNIX_EPOCH + Duration::from_secs(secs)
    }

    fn subject(n: u64) -> Subject {
        Subject::new(n).expect("in range")
    }

    /// Sign arbitrary claims with the same key, bypassing `issue`.
    fn sign_raw(secret: &str, claims: Value) -> String {
        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .expect("encode")
    }

    #[test]
    fn issued_token_validates_to_same_subject() {
        let svc = service("k1");
        let now = at(1_700_000_000);
        let token = svc.issue(subject(42), now).expect("issue");
        assert_eq!(svc.validate(&token, now), Ok(subject(42)));
    }

    #[test]
    fn token_lives_exactly_seventy_two_hours() {
        let svc = service("k1");
        let issued = at(1_700_000_000);
        let token = svc.issue(subject(7), issued).expect("issue");

        assert!(svc.validate(&token, at(1_700_000_000 + TTL - 1)).is_ok());
        assert_eq!(
            svc.validate(&token, at(1_700_000_000 + TTL)),
            Err(AuthError::TokenExpired)
        );
        assert_eq!(
            svc.validate(&token, at(1_700_000_000 + TTL + HOUR)),
            Err(AuthError::TokenExpired)
        );
    }

    #[test]
    fn issued_claims_carry_subject_iat_and_exp() {
        let svc = service("k1");
        let token = svc.issue(subject(9), at(1_000)).expect("issue");
        let payload = token.split('.').nth(1).expect("payload");
        let claims: Value =
            serde_json::from_slice(&URL_SAFE_NO_PAD.decode(payload).expect("b64")).expect("json");
        assert_eq!(claims["user_id"], json!(9));
        assert_eq!(claims["iat"], json!(1_000));
        assert_eq!(claims["exp"], json!(1_000 + TTL));
    }

    #[test]
    fn other_key_fails_signature() {
        let token = service("k1").issue(subject(1), at(1_000)).expect("issue");
        assert_eq!(
            service("k2").validate(&token, at(1_000)),
            Err(AuthError::SignatureInvalid)
        );
    }

    #[test]
    fn tampered_signature_is_rejected() {
        let svc = service("k1");
        let token = svc.issue(subject(1), at(1_000)).expect("issue");
        let (head, sig) = token.rsplit_once('.').expect("sig");
        let flipped = if sig.starts_with('A') { "B" } else { "A" };
        let tampered = format!("{head}.{flipped}{}", &sig[1..]);
        assert_eq!(
            svc.validate(&tampered, at(1_000)),
            Err(AuthError::SignatureInvalid)
        );
    }

    #[test]
    fn tampered_payload_is_rejected() {
        let svc = service("k1");
        let token = svc.issue(subject(1), at(1_000)).expect("issue");
        let parts: Vec<&str> = token.split('.').collect();
        let forged = URL_SAFE_NO_PAD.encode(br#"{"user_id":2,"exp":99999999999}"#);
        let tampered = format!("{}.{}.{}", parts[0], forged, parts[2]);
        assert_eq!(
            svc.validate(&tampered, at(1_000)),
            Err(AuthError::SignatureInvalid)
        );
    }

    #[test]
    fn structural_garbage_is_malformed() {
        let svc = service("k1");
        for token in ["", "abc", "a.b", "a.b.c.d", "!!!.???.sig", "e30.bm90LWpzb24.sig"] {
            assert_eq!(
                svc.validate(token, at(1_000)),
                Err(AuthError::MalformedToken),
                "{token:?}"
            );
        }
    }

    #[test]
    fn stale_valid_signature_is_expired_not_invalid() {
        let svc = service("k1");
        let token = svc.issue(subject(3), at(1_000)).expect("issue");
        assert_eq!(
            svc.validate(&token, at(1_000 + TTL * 10)),
            Err(AuthError::TokenExpired)
        );
    }

    #[test]
    fn missing_expiry_counts_as_expired() {
        let token = sign_raw("k1", json!({"user_id": 5}));
        assert_eq!(
            service("k1").validate(&token, at(1_000)),
            Err(AuthError::TokenExpired)
        );
    }

    #[test]
    fn accepts_float_and_string_subjects() {
        let svc = service("k1");
        for raw in [json!(5), json!(5.0), json!("5")] {
            let token = sign_raw("k1", json!({"user_id": raw, "exp": 5_000}));
            assert_eq!(svc.validate(&token, at(1_000)), Ok(subject(5)), "{raw}");
        }
    }

    #[test]
    fn unusable_subject_is_rejected() {
        let svc = service("k1");
        for claims in [
            json!({"exp": 5_000}),
            json!({"user_id": null, "exp": 5_000}),
            json!({"user_id": "abc", "exp": 5_000}),
            json!({"user_id": 1.5, "exp": 5_000}),
            json!({"user_id": -4, "exp": 5_000}),
        ] {
            let token = sign_raw("k1", claims.clone());
            assert_eq!(
                svc.validate(&token, at(1_000)),
                Err(AuthError::ClaimMissingOrUnrecognized),
                "{claims}"
            );
        }
    }

    #[test]
    fn expiry_is_checked_before_subject() {
        let token = sign_raw("k1", json!({"user_id": "abc", "exp": 500}));
        assert_eq!(
            service("k1").validate(&token, at(1_000)),
            Err(AuthError::TokenExpired)
        );
    }

    #[test]
    fn other_algorithm_is_rejected() {
        let token = encode(
            &Header::new(Algorithm::HS512),
            &json!({"user_id": 1, "exp": 5_000}),
            &EncodingKey::from_secret(b"k1"),
        )
        .expect("encode");
        assert_eq!(
            service("k1").validate(&token, at(1_000)),
            Err(AuthError::SignatureInvalid)
        );
    }

    #[test]
    fn debug_does_not_print_key_material() {
        let printed = format!("{:?}", service("super-secret-value"));
        assert!(!printed.contains("super-secret-value"));
    }
}
