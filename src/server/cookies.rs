//! Session cookies
//!
//! The session rides in two plain cookies, `login` and `secret`. This
//! module extracts that pair from a request and builds the Set-Cookie
//! headers that establish it.

use axum::http::header::{COOKIE, SET_COOKIE};
use axum::http::{HeaderMap, HeaderName, HeaderValue};

use crate::gate::CredentialSource;

/// Extracts the `login`/`secret` cookie pair from request headers.
///
/// Returns `None` unless both cookies are present; partial pairs carry no
/// identity.
pub fn credential_from_cookies(headers: &HeaderMap) -> Option<CredentialSource> {
    let raw = headers.get(COOKIE)?.to_str().ok()?;

    let mut login = None;
    let mut secret = None;
    for pair in raw.split(';') {
        let Some((name, value)) = pair.trim().split_once('=') else {
            continue;
        };
        match name {
            "login" => login = Some(value.to_string()),
            "secret" => secret = Some(value.to_string()),
            _ => {}
        }
    }

    Some(CredentialSource::Cookies {
        login: login?,
        secret: secret?,
    })
}

/// Builds the Set-Cookie headers that establish a session.
///
/// Logins are restricted to a cookie-safe charset at registration and
/// secrets are hex, but a value that still fails header encoding yields
/// `None` rather than a malformed header.
pub fn session_cookie_headers(login: &str, secret: &str) -> Option<[(HeaderName, HeaderValue); 2]> {
    let login_cookie = HeaderValue::from_str(&format!("login={}; Path=/", login)).ok()?;
    let secret_cookie =
        HeaderValue::from_str(&format!("secret={}; Path=/; HttpOnly", secret)).ok()?;
    Some([(SET_COOKIE, login_cookie), (SET_COOKIE, secret_cookie)])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers_with_cookie(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn extracts_the_pair() {
        let headers = headers_with_cookie("login=alice; secret=deadbeef");
        match credential_from_cookies(&headers) {
            Some(CredentialSource::Cookies { login, secret }) => {
                assert_eq!(login, "alice");
                assert_eq!(secret, "deadbeef");
            }
            other => panic!("expected cookie pair, got {:?}", other),
        }
    }

    #[test]
    fn ignores_unrelated_cookies() {
        let headers = headers_with_cookie("theme=dark; login=alice; secret=s; lang=en");
        assert!(credential_from_cookies(&headers).is_some());
    }

    #[test]
    fn partial_pair_is_no_credential() {
        assert!(credential_from_cookies(&headers_with_cookie("login=alice")).is_none());
        assert!(credential_from_cookies(&headers_with_cookie("secret=s")).is_none());
        assert!(credential_from_cookies(&HeaderMap::new()).is_none());
    }

    #[test]
    fn builds_both_set_cookie_headers() {
        let headers = session_cookie_headers("alice", "deadbeef").unwrap();
        assert_eq!(headers[0].1.to_str().unwrap(), "login=alice; Path=/");
        assert_eq!(
            headers[1].1.to_str().unwrap(),
            "secret=deadbeef; Path=/; HttpOnly"
        );
    }
}
