use crate::http_common::{self, HttpCookie, HttpHeader, HttpRequestLike};
use std::borrow::Cow;

/// Immutable capture of the request fields JA4H is computed from.
///
/// A snapshot is taken once per fingerprint and every segment reads the same borrowed
/// value, so segments always agree on what the request looked like.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestSnapshot {
    method: String,
    protocol: String,
    headers: Vec<HttpHeader>,
    cookies: Vec<HttpCookie>,
    referer: String,
}

impl RequestSnapshot {
    /// Creates a snapshot with no headers, cookies or referer.
    pub fn new(method: impl Into<String>, protocol: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            protocol: protocol.into(),
            ..Self::default()
        }
    }

    /// Captures any host request type.
    ///
    /// The host's header list is read once and handed to `cookies` and `referer`.
    pub fn capture<R: HttpRequestLike + ?Sized>(request: &R) -> Self {
        let headers = request.headers();
        let cookies = request.cookies(&headers);
        let referer = request.referer(&headers).unwrap_or_default();
        Self {
            method: request.method().to_string(),
            protocol: request.protocol().into_owned(),
            headers,
            cookies,
            referer,
        }
    }

    /// Appends a header.
    ///
    /// A `Cookie` header also adds its parsed cookies, and the first `Referer` header sets
    /// the referer value.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let header = HttpHeader::new(name, value, self.headers.len());

        if header.name.eq_ignore_ascii_case("Cookie") {
            let cookies = http_common::parse_cookies(&header.value, self.cookies.len());
            self.cookies.extend(cookies);
        } else if header.name.eq_ignore_ascii_case("Referer") && !self.has_header("Referer") {
            self.referer = header.value.clone();
        }

        self.headers.push(header);
        self
    }

    /// Adds a cookie without a matching `Cookie` header.
    pub fn with_cookie(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.cookies.push(HttpCookie {
            name: name.into(),
            value: Some(value.into()),
            position: self.cookies.len(),
        });
        self
    }

    /// Overrides the referer value. Headers are left untouched.
    pub fn with_referer(mut self, referer: impl Into<String>) -> Self {
        self.referer = referer.into();
        self
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn protocol(&self) -> &str {
        &self.protocol
    }

    pub fn headers(&self) -> &[HttpHeader] {
        &self.headers
    }

    pub fn cookies(&self) -> &[HttpCookie] {
        &self.cookies
    }

    /// Referer value, empty when the request carried none
    pub fn referer(&self) -> &str {
        &self.referer
    }

    /// First value of the header `name` (case-insensitive)
    pub fn header(&self, name: &str) -> Option<&str> {
        http_common::header_value(&self.headers, name)
    }

    pub fn has_header(&self, name: &str) -> bool {
        self.headers.iter().any(|h| h.name.eq_ignore_ascii_case(name))
    }
}

impl HttpRequestLike for RequestSnapshot {
    fn method(&self) -> &str {
        &self.method
    }

    fn protocol(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.protocol)
    }

    fn headers(&self) -> Vec<HttpHeader> {
        self.headers.clone()
    }

    fn cookies(&self, _headers: &[HttpHeader]) -> Vec<HttpCookie> {
        self.cookies.clone()
    }

    fn referer(&self, _headers: &[HttpHeader]) -> Option<String> {
        (!self.referer.is_empty()).then(|| self.referer.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_with_header_tracks_cookies_and_referer() {
        let snapshot = RequestSnapshot::new("GET", "HTTP/1.1")
            .with_header("Host", "example.com")
            .with_header("Cookie", "a=1; b=2")
            .with_header("Referer", "https://example.com/")
            .with_header("referer", "https://other.example/");

        assert_eq!(snapshot.headers().len(), 4);
        assert_eq!(snapshot.cookies().len(), 2);
        assert_eq!(snapshot.referer(), "https://example.com/");
        assert_eq!(snapshot.header("host"), Some("example.com"));
        assert!(snapshot.has_header("COOKIE"));
    }

    #[test]
    fn test_capture_roundtrips_through_trait() {
        let original = RequestSnapshot::new("POST", "HTTP/2")
            .with_header("Accept", "*/*")
            .with_cookie("session", "abc")
            .with_referer("https://example.com/");

        let captured = RequestSnapshot::capture(&original);
        assert_eq!(captured, original);
    }

    struct CountingRequest {
        header_reads: Cell<usize>,
    }

    impl HttpRequestLike for CountingRequest {
        fn method(&self) -> &str {
            "GET"
        }

        fn protocol(&self) -> Cow<'_, str> {
            Cow::Borrowed("HTTP/1.1")
        }

        fn headers(&self) -> Vec<HttpHeader> {
            self.header_reads.set(self.header_reads.get() + 1);
            vec![
                HttpHeader::new("Cookie", "a=1; b=2", 0),
                HttpHeader::new("Referer", "https://example.com/", 1),
            ]
        }
    }

    #[test]
    fn test_capture_reads_host_headers_once() {
        let host = CountingRequest { header_reads: Cell::new(0) };
        let snapshot = RequestSnapshot::capture(&host);

        assert_eq!(host.header_reads.get(), 1);
        assert_eq!(snapshot.headers().len(), 2);
        assert_eq!(snapshot.cookies().len(), 2);
        assert_eq!(snapshot.referer(), "https://example.com/");
    }
}
