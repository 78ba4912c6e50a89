//! Analysis query decoding and URL validation.
//!
//! A query shorter than `MIN_QUERY_LEN` after decoding is not an error: the
//! caller gets the empty-state page. Anything longer must parse as an
//! absolute http(s) URL with a host.

use std::borrow::Cow;

use url::Url;

use crate::config::MIN_QUERY_LEN;
use crate::error_handling::RelayError;

/// A query that parsed as an absolute http(s) URL with a non-empty host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedUrl {
    query: String,
    url: Url,
}

impl ValidatedUrl {
    /// The decoded query exactly as submitted. This is what gets rendered and recorded.
    pub fn as_str(&self) -> &str {
        &self.query
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn host(&self) -> &str {
        self.url.host_str().unwrap_or_default()
    }
}

/// Percent-decodes a raw `query` value.
///
/// Returns `None` when the value is absent or decodes to fewer than
/// `MIN_QUERY_LEN` characters. Values that do not decode to valid UTF-8 are
/// kept as given.
pub fn decode_query(raw: Option<&str>) -> Option<String> {
    let raw = raw?;
    let decoded = match urlencoding::decode(raw) {
        Ok(Cow::Borrowed(s)) => s.to_string(),
        Ok(Cow::Owned(s)) => s,
        Err(_) => raw.to_string(),
    };
    if decoded.chars().count() < MIN_QUERY_LEN {
        return None;
    }
    Some(decoded)
}

/// Parses a decoded query as an absolute http(s) URL.
///
/// # Errors
///
/// Returns `RelayError::InvalidUrl` carrying the parser's message when parsing
/// fails, or a short description when the scheme or host is missing or the
/// scheme is not http/https.
pub fn validate_url(decoded: &str) -> Result<ValidatedUrl, RelayError> {
    let url = Url::parse(decoded).map_err(|e| RelayError::InvalidUrl(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => {}
        scheme => {
            return Err(RelayError::InvalidUrl(format!(
                "Unsupported URL scheme '{}' (only http and https are allowed)",
                scheme
            )));
        }
    }
    if url.host_str().map_or(true, str::is_empty) {
        return Err(RelayError::InvalidUrl(format!(
            "URL has no host component: {}",
            decoded
        )));
    }

    Ok(ValidatedUrl {
        query: decoded.to_string(),
        url,
    })
}

/// Decodes and validates the analysis entry point's `query` parameter.
///
/// `Ok(None)` means "no query": the caller renders the empty state and makes
/// no outbound calls.
pub fn parse_analysis_query(raw: Option<&str>) -> Result<Option<ValidatedUrl>, RelayError> {
    match decode_query(raw) {
        Some(decoded) => validate_url(&decoded).map(Some),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_query_is_empty_state() {
        assert_eq!(parse_analysis_query(None).unwrap(), None);
    }

    #[test]
    fn test_short_query_is_empty_state() {
        assert_eq!(parse_analysis_query(Some("")).unwrap(), None);
        assert_eq!(parse_analysis_query(Some("ab")).unwrap(), None);
        // Three encoded bytes decode to a single character
        assert_eq!(parse_analysis_query(Some("%41")).unwrap(), None);
    }

    #[test]
    fn test_valid_url_is_accepted() {
        let validated = parse_analysis_query(Some("https://example.com/docs?x=1"))
            .unwrap()
            .unwrap();
        assert_eq!(validated.as_str(), "https://example.com/docs?x=1");
        assert_eq!(validated.host(), "example.com");
    }

    #[test]
    fn test_percent_encoded_url_is_decoded() {
        let validated = parse_analysis_query(Some("https%3A%2F%2Fexample.com%2Fabout"))
            .unwrap()
            .unwrap();
        assert_eq!(validated.as_str(), "https://example.com/about");
        assert_eq!(validated.url().path(), "/about");
    }

    #[test]
    fn test_relative_input_is_invalid() {
        let err = parse_analysis_query(Some("not a url")).unwrap_err();
        assert!(matches!(err, RelayError::InvalidUrl(_)));
        assert_eq!(err.client_message(), "relative URL without a base");
    }

    #[test]
    fn test_missing_host_is_invalid() {
        let err = parse_analysis_query(Some("http://")).unwrap_err();
        assert!(matches!(err, RelayError::InvalidUrl(_)));
        assert_eq!(err.status(), axum::http::StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_non_http_schemes_are_invalid() {
        for input in [
            "file:///etc/passwd",
            "ftp://example.com",
            "javascript:alert(1)",
            "data:text/html,<b>hi</b>",
        ] {
            let err = parse_analysis_query(Some(input)).unwrap_err();
            assert!(
                matches!(err, RelayError::InvalidUrl(_)),
                "{} should be rejected",
                input
            );
        }
    }

    #[test]
    fn test_length_counts_the_decoded_value_as_given() {
        // Whitespace is not stripped before the minimum-length check
        assert_eq!(decode_query(Some("%20ab")), Some(" ab".to_string()));
        assert_eq!(decode_query(Some("+ab")), Some("+ab".to_string()));
        assert!(matches!(
            parse_analysis_query(Some("%20ab")),
            Err(RelayError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_decode_query_keeps_undecodable_input() {
        // %FF is not valid UTF-8 on its own
        assert_eq!(decode_query(Some("abc%FF")), Some("abc%FF".to_string()));
    }
}
