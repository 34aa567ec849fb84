use actix_cors::Cors;
use actix_web::http::header;

const DEV_ORIGINS: [&str; 2] = ["http://localhost:3000", "http://127.0.0.1:3000"];

/// Parse `CORS_ALLOWED_ORIGINS` (comma-separated). Entries that are empty,
/// `null`, or not http(s) are dropped; nothing valid means the dev defaults.
pub fn parse_allowed_origins(raw: Option<&str>) -> Vec<String> {
    let origins: Vec<String> = raw
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|s| s.starts_with("http://") || s.starts_with("https://"))
        .map(|s| s.trim_end_matches('/').to_string())
        .collect();

    if origins.is_empty() {
        DEV_ORIGINS.iter().map(|s| s.to_string()).collect()
    } else {
        origins
    }
}

pub fn cors_middleware(origins: &[String]) -> Cors {
    let cors = Cors::default()
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            header::ACCEPT,
        ])
        .expose_headers(vec![
            header::HeaderName::from_static("x-trace-id"),
            header::HeaderName::from_static("x-request-id"),
            header::WWW_AUTHENTICATE,
        ])
        .max_age(3600);

    origins
        .iter()
        .fold(cors, |cors, origin| cors.allowed_origin(origin))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_falls_back_to_localhost() {
        assert_eq!(parse_allowed_origins(None), DEV_ORIGINS.to_vec());
        assert_eq!(parse_allowed_origins(Some(" , null ")), DEV_ORIGINS.to_vec());
    }

    #[test]
    fn keeps_valid_http_origins_only() {
        let parsed = parse_allowed_origins(Some(
            "https://shop.example.com/, ftp://x, null, http://localhost:5173",
        ));
        assert_eq!(
            parsed,
            vec![
                "https://shop.example.com".to_string(),
                "http://localhost:5173".to_string()
            ]
        );
    }
}
