use super::error::{AuthError, HeaderFault};

const SCHEME: &str = "Bearer ";

/// Pull the raw token out of an `Authorization` header value.
///
/// The scheme is matched case-sensitively and must be followed by a single
/// space and a non-empty token.
pub fn extract_bearer(header: Option<&str>) -> Result<&str, AuthError> {
    let value = match header {
        None | Some("") => return Err(AuthError::MissingCredential),
        Some(v) => v,
    };

    let token = value
        .strip_prefix(SCHEME)
        .ok_or(AuthError::MalformedHeader(HeaderFault::Scheme))?
        .trim();

    if token.is_empty() {
        return Err(AuthError::MalformedHeader(HeaderFault::EmptyToken));
    }
    Ok(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn returns_token_after_scheme() {
        assert_eq!(extract_bearer(Some("Bearer abc.def.ghi")), Ok("abc.def.ghi"));
    }

    #[test]
    fn absent_or_empty_header_is_missing() {
        assert_eq!(extract_bearer(None), Err(AuthError::MissingCredential));
        assert_eq!(extract_bearer(Some("")), Err(AuthError::MissingCredential));
    }

    #[test]
    fn wrong_scheme_is_malformed() {
        for value in ["Basic dXNlcjpwYXNz", "bearer abc", "Bearerabc", "Token abc", "abc"] {
            assert_eq!(
                extract_bearer(Some(value)),
                Err(AuthError::MalformedHeader(HeaderFault::Scheme)),
                "{value}"
            );
        }
    }

    #[test]
    fn scheme_without_token_is_malformed() {
        assert_eq!(
            extract_bearer(Some("Bearer ")),
            Err(AuthError::MalformedHeader(HeaderFault::EmptyToken))
        );
        assert_eq!(
            extract_bearer(Some("Bearer    ")),
            Err(AuthError::MalformedHeader(HeaderFault::EmptyToken))
        );
        assert_eq!(
            extract_bearer(Some("Bearer")),
            Err(AuthError::MalformedHeader(HeaderFault::Scheme))
        );
    }
}
