// ABOUTME: Cookie helpers operating on plain header strings
// ABOUTME: Set-Cookie rendering, request-header lookup and serde-based value encoding

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CookieError {
    #[error("Cookie name cannot be blank")]
    InvalidName,

    #[error("Cookie value serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Cookie value is not valid base64: {0}")]
    Decode(#[from] base64::DecodeError),
}

/// Details of a cookie to set. Path and HttpOnly follow the library
/// defaults (`Path=/`, HttpOnly on) and are not configurable here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CookiePayload {
    name: String,
    value: String,
    max_age: Option<u64>,
}

impl CookiePayload {
    pub fn new(name: &str, value: &str) -> Self {
        Self {
            name: name.to_string(),
            value: value.to_string(),
            max_age: None,
        }
    }

    /// Lifetime of the cookie in seconds.
    pub fn max_age(mut self, seconds: u64) -> Self {
        self.max_age = Some(seconds);
        self
    }

    /// Render the payload as a `Set-Cookie` header value.
    pub fn to_header_value(&self) -> Result<String, CookieError> {
        validate_name(&self.name)?;
        let mut header = format!("{}={}; Path=/; HttpOnly", self.name, self.value);
        if let Some(max_age) = self.max_age {
            header.push_str(&format!("; Max-Age={max_age}"));
        }
        Ok(header)
    }
}

/// `Set-Cookie` header value that removes the named cookie.
pub fn removal_header_value(name: &str) -> Result<String, CookieError> {
    validate_name(name)?;
    Ok(format!("{name}=; Path=/; Max-Age=0; HttpOnly"))
}

/// `Set-Cookie` header values removing several cookies at once.
pub fn removal_header_values<'a, I>(names: I) -> Result<Vec<String>, CookieError>
where
    I: IntoIterator<Item = &'a str>,
{
    names.into_iter().map(removal_header_value).collect()
}

/// Look up a cookie value in a request `Cookie` header
/// (`name1=value1; name2=value2`).
pub fn find_cookie_value(cookie_header: &str, name: &str) -> Result<Option<String>, CookieError> {
    validate_name(name)?;
    for pair in cookie_header.split(';') {
        let mut parts = pair.trim().splitn(2, '=');
        let pair_name = parts.next().unwrap_or_default();
        if pair_name == name {
            return Ok(Some(parts.next().unwrap_or_default().to_string()));
        }
    }
    Ok(None)
}

/// Encode a structured cookie value as URL-safe base64 over JSON.
pub fn serialize_value<T: Serialize>(value: &T) -> Result<String, CookieError> {
    let json = serde_json::to_vec(value)?;
    Ok(URL_SAFE_NO_PAD.encode(json))
}

/// Decode a cookie value produced by [`serialize_value`].
pub fn deserialize_value<T: DeserializeOwned>(encoded: &str) -> Result<T, CookieError> {
    let json = URL_SAFE_NO_PAD.decode(encoded)?;
    Ok(serde_json::from_slice(&json)?)
}

fn validate_name(name: &str) -> Result<(), CookieError> {
    if name.trim().is_empty() {
        return Err(CookieError::InvalidName);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde::{Deserialize, Serialize};

    use super::*;

    #[test]
    fn test_set_cookie_header_with_defaults() {
        let header = CookiePayload::new("session", "abc123").to_header_value().unwrap();
        assert_eq!(header, "session=abc123; Path=/; HttpOnly");
    }

    #[test]
    fn test_set_cookie_header_with_max_age() {
        let header = CookiePayload::new("session", "abc123")
            .max_age(3600)
            .to_header_value()
            .unwrap();
        assert_eq!(header, "session=abc123; Path=/; HttpOnly; Max-Age=3600");
    }

    #[test]
    fn test_blank_name_is_rejected() {
        assert!(matches!(
            CookiePayload::new("  ", "value").to_header_value(),
            Err(CookieError::InvalidName)
        ));
        assert!(matches!(removal_header_value(""), Err(CookieError::InvalidName)));
    }

    #[test]
    fn test_removal_header_expires_cookie() {
        let header = removal_header_value("session").unwrap();
        assert_eq!(header, "session=; Path=/; Max-Age=0; HttpOnly");
    }

    #[test]
    fn test_removal_of_multiple_cookies() {
        let headers = removal_header_values(["a", "b"]).unwrap();
        assert_eq!(headers.len(), 2);
        assert!(headers[1].starts_with("b=;"));
    }

    #[test]
    fn test_find_cookie_value_in_request_header() {
        let header = "theme=dark; session=abc123; lang=pl";

        assert_eq!(
            find_cookie_value(header, "session").unwrap(),
            Some("abc123".to_string())
        );
        assert_eq!(find_cookie_value(header, "missing").unwrap(), None);
    }

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct RedirectState {
        uri: String,
        attempts: u32,
    }

    #[test]
    fn test_structured_value_round_trip() {
        let state = RedirectState {
            uri: "/after-login".to_string(),
            attempts: 2,
        };

        let encoded = serialize_value(&state).unwrap();
        assert!(!encoded.contains('='), "URL-safe encoding must not be padded");

        let decoded: RedirectState = deserialize_value(&encoded).unwrap();
        assert_eq!(decoded, state);
    }

    #[test]
    fn test_deserialize_rejects_invalid_base64() {
        let result: Result<RedirectState, _> = deserialize_value("not!!valid##base64");
        assert!(matches!(result, Err(CookieError::Decode(_))));
    }
}
