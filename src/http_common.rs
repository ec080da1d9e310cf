use std::borrow::Cow;

/// Represents an HTTP header with metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpHeader {
    pub name: String,
    pub value: String,
    /// Position in the original header sequence (0-based)
    pub position: usize,
}

impl HttpHeader {
    pub fn new(name: impl Into<String>, value: impl Into<String>, position: usize) -> Self {
        Self { name: name.into(), value: value.into(), position }
    }
}

/// Represents an HTTP cookie
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpCookie {
    pub name: String,
    pub value: Option<String>,
    /// Position across all cookie headers of the request (0-based)
    pub position: usize,
}

impl HttpCookie {
    /// Cookie value, empty when the cookie was sent as a bare name
    pub fn value_or_empty(&self) -> &str {
        self.value.as_deref().unwrap_or_default()
    }
}

/// Common HTTP request interface
///
/// Host HTTP stacks implement this to expose the parts of a request JA4H looks at.
/// `cookies` and `referer` default to reading the `Cookie` and `Referer` entries of the
/// header list returned by `headers`, so most implementations only need the first three
/// methods.
pub trait HttpRequestLike {
    fn method(&self) -> &str;

    /// Protocol string as it appears on the request line, e.g. `HTTP/1.1` or `HTTP/2`
    fn protocol(&self) -> Cow<'_, str>;

    /// Header entries in stored order. Names may repeat.
    fn headers(&self) -> Vec<HttpHeader>;

    /// Cookies of the request, given the list `headers` already returned
    fn cookies(&self, headers: &[HttpHeader]) -> Vec<HttpCookie> {
        cookies_from_headers(headers)
    }

    /// Referer of the request, given the list `headers` already returned
    fn referer(&self, headers: &[HttpHeader]) -> Option<String> {
        header_value(headers, "Referer").map(str::to_owned)
    }
}

/// First value of the header `name`, matched case-insensitively
pub fn header_value<'a>(headers: &'a [HttpHeader], name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|h| h.name.eq_ignore_ascii_case(name))
        .map(|h| h.value.as_str())
}

/// Collects the cookies of every `Cookie` header, numbering them across headers
pub fn cookies_from_headers(headers: &[HttpHeader]) -> Vec<HttpCookie> {
    let mut cookies = Vec::new();
    for header in headers.iter().filter(|h| h.name.eq_ignore_ascii_case("Cookie")) {
        let next = cookies.len();
        cookies.extend(parse_cookies(&header.value, next));
    }
    cookies
}

/// Parses a `Cookie` header value into name/value pairs.
///
/// Pairs are separated by `;`. A pair without `=` is kept as a bare name. Empty pairs and
/// pairs whose name is empty or not an RFC 7230 token are skipped. `first_position` is the
/// position assigned to the first cookie kept.
pub fn parse_cookies(cookie_header: &str, first_position: usize) -> Vec<HttpCookie> {
    cookie_header
        .split(';')
        .map(str::trim)
        .filter(|cookie_str| !cookie_str.is_empty())
        .map(|cookie_str| match cookie_str.split_once('=') {
            Some((name, value)) => (name.trim(), Some(value.trim())),
            None => (cookie_str, None),
        })
        .filter(|(name, _)| is_token(name))
        .enumerate()
        .map(|(offset, (name, value))| HttpCookie {
            name: name.to_string(),
            value: value.map(str::to_string),
            position: first_position.saturating_add(offset),
        })
        .collect()
}

/// Non-empty and made only of token characters
pub(crate) fn is_token(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(is_token_byte)
}

/// RFC 7230 `tchar`
pub(crate) fn is_token_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric()
        || matches!(
            b,
            b'!' | b'#' | b'$' | b'%' | b'&' | b'\'' | b'*' | b'+' | b'-' | b'.' | b'^' | b'_'
                | b'`' | b'|' | b'~'
        )
}
