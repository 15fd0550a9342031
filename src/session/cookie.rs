use axum::http::header::{InvalidHeaderValue, COOKIE, SET_COOKIE};
use axum::http::{HeaderMap, HeaderValue};

pub const TOKEN_COOKIE: &str = "token";

/// Upper bound on the session cookie lifetime, whatever the provider reports.
pub const MAX_SESSION_SECONDS: u64 = 3600;

/// Reads the session token from the request cookies.
///
/// An empty value counts as no token, so callers never hand an empty string
/// to the verifier.
pub fn read_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| {
            let (key, val) = pair.trim().split_once('=')?;
            (key.trim() == TOKEN_COOKIE).then(|| val.trim().to_string())
        })
        .find(|val| !val.is_empty())
}

/// True when `token` can be written as a cookie value without quoting:
/// printable ASCII excluding whitespace, `"`, `,`, `;` and `\`.
pub fn is_cookie_safe(token: &str) -> bool {
    !token.is_empty()
        && token
            .bytes()
            .all(|b| matches!(b, 0x21 | 0x23..=0x2B | 0x2D..=0x3A | 0x3C..=0x5B | 0x5D..=0x7E))
}

/// True when the response already writes the session cookie.
pub fn sets_token(headers: &HeaderMap) -> bool {
    let prefix = format!("{TOKEN_COOKIE}=");
    headers
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .any(|value| value.trim_start().starts_with(&prefix))
}

/// Builds the `Set-Cookie` value for a fresh session token.
///
/// Not `HttpOnly`: the portal pages read it client side. `max_age_seconds`
/// is clamped to [`MAX_SESSION_SECONDS`].
pub fn token_cookie(
    token: &str,
    max_age_seconds: u64,
    secure: bool,
) -> Result<HeaderValue, InvalidHeaderValue> {
    let max_age = max_age_seconds.min(MAX_SESSION_SECONDS);
    let mut cookie = format!("{TOKEN_COOKIE}={token}; Path=/; SameSite=Lax; Max-Age={max_age}");
    if secure {
        cookie.push_str("; Secure");
    }
    HeaderValue::from_str(&cookie)
}

/// Builds the `Set-Cookie` value that deletes the session token.
pub fn clear_token_cookie(secure: bool) -> HeaderValue {
    if secure {
        HeaderValue::from_static("token=; Path=/; SameSite=Lax; Max-Age=0; Secure")
    } else {
        HeaderValue::from_static("token=; Path=/; SameSite=Lax; Max-Age=0")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers_with(cookies: &[&str]) -> HeaderMap {
        let mut headers = HeaderMap::new();
        for c in cookies {
            headers.append(COOKIE, HeaderValue::from_str(c).unwrap());
        }
        headers
    }

    #[test]
    fn reads_token_among_other_cookies() {
        let headers = headers_with(&["theme=dark; token=abc.def; lang=en"]);
        assert_eq!(read_token(&headers).as_deref(), Some("abc.def"));
    }

    #[test]
    fn keeps_equals_signs_inside_value() {
        let headers = headers_with(&["token=YWJj=="]);
        assert_eq!(read_token(&headers).as_deref(), Some("YWJj=="));
    }

    #[test]
    fn searches_every_cookie_header() {
        let headers = headers_with(&["theme=dark", "token=second"]);
        assert_eq!(read_token(&headers).as_deref(), Some("second"));
    }

    #[test]
    fn empty_or_missing_token_is_none() {
        assert_eq!(read_token(&HeaderMap::new()), None);
        assert_eq!(read_token(&headers_with(&["token="])), None);
        assert_eq!(read_token(&headers_with(&["tokens=abc"])), None);
    }

    #[test]
    fn session_cookie_attributes() {
        let cookie = token_cookie("abc", 900, false).unwrap();
        assert_eq!(cookie, "token=abc; Path=/; SameSite=Lax; Max-Age=900");
        assert!(!cookie.to_str().unwrap().contains("HttpOnly"));
    }

    #[test]
    fn session_cookie_never_outlives_an_hour() {
        let cookie = token_cookie("abc", 7200, true).unwrap();
        assert_eq!(cookie, "token=abc; Path=/; SameSite=Lax; Max-Age=3600; Secure");
    }

    #[test]
    fn cookie_safe_tokens() {
        assert!(is_cookie_safe("eyJhbGciOi.J9-_x=="));
        assert!(!is_cookie_safe(""));
        assert!(!is_cookie_safe("abc; Max-Age=99999"));
        assert!(!is_cookie_safe("a,b"));
        assert!(!is_cookie_safe("a b"));
        assert!(!is_cookie_safe("a\"b"));
    }

    #[test]
    fn detects_session_cookie_in_response() {
        let mut headers = HeaderMap::new();
        headers.append(SET_COOKIE, HeaderValue::from_static("theme=dark; Path=/"));
        assert!(!sets_token(&headers));

        headers.append(SET_COOKIE, token_cookie("abc", 60, false).unwrap());
        assert!(sets_token(&headers));
    }

    #[test]
    fn clearing_cookie_expires_immediately() {
        assert_eq!(clear_token_cookie(false), "token=; Path=/; SameSite=Lax; Max-Age=0");
    }
}
