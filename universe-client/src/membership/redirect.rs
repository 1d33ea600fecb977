//! Checkout return URLs
//!
//! The processor sends the user back to the success or cancel URL with
//! `session_id=<id>` in the query string.

use url::Url;

const SESSION_PARAM: &str = "session_id";

/// Extract the checkout session id from a return URL
///
/// Accepts a full URL, a path with query (`/payment/success?session_id=..`)
/// or a bare query string. An unexpanded `{CHECKOUT_SESSION_ID}` template
/// counts as missing.
pub fn session_id(redirect: &str) -> Option<String> {
    let redirect = redirect.trim();
    let query = match Url::parse(redirect) {
        Ok(url) => url.query().map(str::to_string),
        Err(_) => Some(
            redirect
                .split_once('?')
                .map(|(_, q)| q)
                .unwrap_or(redirect)
                .to_string(),
        ),
    }?;

    url::form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == SESSION_PARAM)
        .map(|(_, value)| value.trim().to_string())
        .filter(|value| !value.is_empty() && !value.starts_with('{'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_url() {
        assert_eq!(
            session_id("http://localhost:5173/payment/success?session_id=cs_test_a1"),
            Some("cs_test_a1".into())
        );
    }

    #[test]
    fn test_path_and_bare_query() {
        assert_eq!(
            session_id("/payment/cancel?foo=1&session_id=cs_b2"),
            Some("cs_b2".into())
        );
        assert_eq!(session_id("?session_id=cs_c3"), Some("cs_c3".into()));
        assert_eq!(session_id("session_id=cs_d4"), Some("cs_d4".into()));
    }

    #[test]
    fn test_missing_or_template() {
        assert_eq!(session_id("http://localhost:5173/payment/success"), None);
        assert_eq!(session_id("/payment/success?session_id="), None);
        assert_eq!(
            session_id("/payment/success?session_id={CHECKOUT_SESSION_ID}"),
            None
        );
        assert_eq!(session_id(""), None);
    }
}
