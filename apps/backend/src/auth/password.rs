//! Credential verification against stored bcrypt hashes.
//!
//! Both calls are CPU-bound on purpose; async callers should run them on the
//! blocking pool (`tokio::task::spawn_blocking`).

use super::error::AuthError;

/// Cost used when none is configured.
pub const DEFAULT_COST: u32 = bcrypt::DEFAULT_COST;

/// `Ok(true)` only when `plaintext` matches `stored_hash`. A hash that cannot
/// be parsed is a server-side fault and surfaces as `MalformedHash`.
pub fn verify_password(stored_hash: &str, plaintext: &str) -> Result<bool, AuthError> {
    bcrypt::verify(plaintext, stored_hash).map_err(|e| AuthError::MalformedHash(e.to_string()))
}

pub fn hash_password(plaintext: &str, cost: u32) -> Result<String, AuthError> {
    bcrypt::hash(plaintext, cost).map_err(|e| AuthError::Hashing(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const COST: u32 = 4;

    #[test]
    fn matching_password_verifies() {
        let hash = hash_password("hunter22", COST).expect("hash");
        assert_eq!(verify_password(&hash, "hunter22"), Ok(true));
    }

    #[test]
    fn wrong_password_is_false_not_error() {
        let hash = hash_password("hunter22", COST).expect("hash");
        assert_eq!(verify_password(&hash, "hunter23"), Ok(false));
        assert_eq!(verify_password(&hash, ""), Ok(false));
    }

    #[test]
    fn garbage_hash_is_malformed() {
        assert!(matches!(
            verify_password("not-a-bcrypt-hash", "hunter22"),
            Err(AuthError::MalformedHash(_))
        ));
        assert!(matches!(
            verify_password("", "hunter22"),
            Err(AuthError::MalformedHash(_))
        ));
    }

    #[test]
    fn hashes_are_salted() {
        let a = hash_password("same", COST).expect("hash");
        let b = hash_password("same", COST).expect("hash");
        assert_ne!(a, b);
    }
}
