//! Auth cookie construction

use crate::config::SecurityConfig;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

/// Cookie carrying a freshly issued session token.
pub fn session_cookie(config: &SecurityConfig, token: String) -> Cookie<'static> {
    Cookie::build((config.cookie_name.clone(), token))
        .http_only(true)
        .same_site(SameSite::Lax)
        .path("/")
        .secure(config.cookie_secure)
        .max_age(time::Duration::seconds(config.token_lifetime_secs as i64))
        .build()
}

/// Read the session token from the request cookies, if any.
pub fn read_token(config: &SecurityConfig, jar: &CookieJar) -> Option<String> {
    jar.get(&config.cookie_name)
        .map(|cookie| cookie.value().to_string())
        .filter(|value| !value.is_empty())
}

/// Jar that tells the browser to drop the session cookie.
pub fn clear_session(config: &SecurityConfig, jar: CookieJar) -> CookieJar {
    jar.remove(Cookie::build((config.cookie_name.clone(), "")).path("/").build())
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::Secret;

    fn security() -> SecurityConfig {
        SecurityConfig {
            jwt_secret: Secret::new("test_secret_key_32_characters_long!".to_string()),
            token_lifetime_secs: 2592000,
            cookie_name: "Authorization".to_string(),
            cookie_secure: false,
            enforce_book_ownership: false,
            password_hash_memory_kib: 1024,
            password_hash_iterations: 1,
            password_hash_parallelism: 1,
        }
    }

    #[test]
    fn test_session_cookie_attributes() {
        let cookie = session_cookie(&security(), "abc".to_string());
        let rendered = cookie.to_string();

        assert_eq!(cookie.name(), "Authorization");
        assert_eq!(cookie.value(), "abc");
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
        assert_eq!(cookie.path(), Some("/"));
        assert!(rendered.contains("Max-Age=2592000"));
    }

    #[test]
    fn test_read_token() {
        let config = security();
        let jar = CookieJar::new().add(Cookie::new("Authorization", "token-value"));
        assert_eq!(read_token(&config, &jar).as_deref(), Some("token-value"));

        let empty = CookieJar::new().add(Cookie::new("Authorization", ""));
        assert!(read_token(&config, &empty).is_none());

        assert!(read_token(&config, &CookieJar::new()).is_none());
    }
}
