use std::fmt;

use serde::{Deserialize, Serialize};

/// Authenticated user identifier carried in an access token.
///
/// Always a non-negative integer that fits a signed 64-bit database key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Subject(u64);

impl Subject {
    pub const MAX: u64 = i64::MAX as u64;

    pub fn new(raw: u64) -> Option<Self> {
        (raw <= Self::MAX).then_some(Self(raw))
    }

    pub fn get(self) -> u64 {
        self.0
    }

    /// Primary-key form used by the persistence layer.
    pub fn db_id(self) -> i64 {
        // bounded by MAX at construction
        self.0 as i64
    }
}

impl TryFrom<i64> for Subject {
    type Error = ();

    fn try_from(id: i64) -> Result<Self, Self::Error> {
        u64::try_from(id).ok().and_then(Self::new).ok_or(())
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The shapes a `user_id` claim may take on the wire.
///
/// Other encoders write the id as an integer, a float with no fractional
/// part, or a decimal string. All three normalize to the same [`Subject`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum SubjectClaim {
    Integer(u64),
    Float(f64),
    Text(String),
}

impl SubjectClaim {
    pub fn from_value(value: &serde_json::Value) -> Option<Self> {
        Self::deserialize(value).ok()
    }

    /// Canonical subject, or `None` when the claim cannot name a user.
    pub fn normalize(&self) -> Option<Subject> {
        match self {
            SubjectClaim::Integer(n) => Subject::new(*n),
            SubjectClaim::Float(f) => {
                let integral = f.is_finite() && *f >= 0.0 && f.fract() == 0.0;
                if integral && *f <= Subject::MAX as f64 {
                    Subject::new(*f as u64)
                } else {
                    None
                }
            }
            SubjectClaim::Text(s) => s.parse::<u64>().ok().and_then(Subject::new),
        }
    }
}

/// Claims written into every issued token.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Claims {
    pub user_id: Subject,
    /// Issued-at (seconds since epoch)
    pub iat: i64,
    /// Expiry (seconds since epoch)
    pub exp: i64,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn normalize(v: serde_json::Value) -> Option<u64> {
        SubjectClaim::from_value(&v)
            .and_then(|c| c.normalize())
            .map(Subject::get)
    }

    #[test]
    fn integer_float_and_string_forms_agree() {
        assert_eq!(normalize(json!(42)), Some(42));
        assert_eq!(normalize(json!(42.0)), Some(42));
        assert_eq!(normalize(json!("42")), Some(42));
    }

    #[test]
    fn rejects_fractional_negative_and_junk() {
        assert_eq!(normalize(json!(1.5)), None);
        assert_eq!(normalize(json!(-1)), None);
        assert_eq!(normalize(json!(-3.0)), None);
        assert_eq!(normalize(json!("abc")), None);
        assert_eq!(normalize(json!("")), None);
        assert_eq!(normalize(json!(" 7")), None);
        assert_eq!(normalize(json!(true)), None);
        assert_eq!(normalize(json!(null)), None);
        assert_eq!(normalize(json!({"id": 1})), None);
    }

    #[test]
    fn rejects_values_beyond_signed_range() {
        assert_eq!(normalize(json!(u64::MAX)), None);
        assert_eq!(normalize(json!(u64::MAX.to_string())), None);
        assert_eq!(normalize(json!(1e300)), None);
        assert_eq!(normalize(json!(i64::MAX)), Some(i64::MAX as u64));
    }

    #[test]
    fn subject_from_db_id() {
        assert_eq!(Subject::try_from(7_i64).map(Subject::get), Ok(7));
        assert!(Subject::try_from(-1_i64).is_err());
    }
}
