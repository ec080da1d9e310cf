use huginn_net_ja4h::http_common::HttpRequestLike;
use huginn_net_ja4h::{
    fingerprint, parse_http1_request, HttpHeader, HuginnNetJa4h, HuginnNetJa4hError,
    RequestSnapshot,
};
use std::borrow::Cow;

#[test]
fn test_parse_http1_request() {
    let valid_request = b"GET / HTTP/1.1\r\n\
        Host: example.com\r\n\
        Accept: text/html,application/xhtml+xml\r\n\
        Accept-Language: en-US,en;q=0.9,es;q=0.8\r\n\
        Cookie: session=abc; theme=dark\r\n\
        Referer: https://example.com/\r\n\
        User-Agent: Mozilla/5.0 (X11; Linux x86_64)\r\n\
        \r\n";

    match parse_http1_request(valid_request) {
        Ok(Some(request)) => {
            assert_eq!(request.method(), "GET");
            assert_eq!(request.protocol(), "HTTP/1.1");
            assert_eq!(request.headers().len(), 6);
            assert_eq!(request.headers()[2].name, "Accept-Language");
            assert_eq!(request.headers()[2].position, 2);
            assert_eq!(request.cookies().len(), 2);
            assert_eq!(request.cookies()[1].name, "theme");
            assert_eq!(request.cookies()[1].value, Some("dark".to_string()));
            assert_eq!(request.referer(), "https://example.com/");
        }
        Ok(None) => panic!("Incomplete HTTP request"),
        Err(e) => panic!("Failed to parse HTTP request: {e}"),
    }
}

#[test]
fn test_generate_http1_matches_reference_fixture() {
    let raw = b"POST /login HTTP/1.1\r\n\
        Accept: application/json\r\n\
        Accept-Language: en\r\n\
        Cookie: admin=true\r\n\
        Referer: https://example.com\r\n\
        \r\n";

    let payload = HuginnNetJa4h::new()
        .generate_http1(raw)
        .unwrap()
        .expect("complete request");
    assert_eq!(payload.ja4h.value(), "po11cr02en00_e5fdf4927470_8c6976e5b541_8c6976e5b541");
    assert_eq!(
        payload.ja4h_raw.value(),
        "po11cr02en00_Accept,Accept-Language,Cookie,Referer_admin_admin"
    );
}

#[test]
fn test_generate_http1_http10_and_partial() {
    let generator = HuginnNetJa4h::new();

    let payload = generator
        .generate_http1(b"GET / HTTP/1.0\r\n\r\n")
        .unwrap()
        .expect("complete request");
    assert_eq!(payload.ja4h.value(), "ge11nn000000_e3b0c44298fc_000000000000_000000000000");

    assert_eq!(generator.generate_http1(b"GET / HTTP/1.1\r\nHost: a"), Ok(None));
}

#[test]
fn test_generate_http1_rejects_garbage() {
    let result = HuginnNetJa4h::new().generate_http1(b"\x00\x01\x02 not http\r\n\r\n");
    assert!(matches!(result, Err(HuginnNetJa4hError::Parse(_))));
}

#[test]
fn test_generate_http1_too_many_headers() {
    let mut raw = b"GET / HTTP/1.1\r\n".to_vec();
    for i in 0..150 {
        raw.extend_from_slice(format!("X-Header-{i}: 1\r\n").as_bytes());
    }
    raw.extend_from_slice(b"\r\n");

    let result = HuginnNetJa4h::new().generate_http1(&raw);
    assert!(matches!(result, Err(HuginnNetJa4hError::Parse(_))));
}

/// Minimal host request type, standing in for a server framework's request object
struct HostRequest {
    method: &'static str,
    version: (u8, u8),
    headers: Vec<(&'static str, &'static str)>,
}

impl HttpRequestLike for HostRequest {
    fn method(&self) -> &str {
        self.method
    }

    fn protocol(&self) -> Cow<'_, str> {
        match self.version {
            (2, 0) => Cow::Borrowed("HTTP/2"),
            (major, minor) => Cow::Owned(format!("HTTP/{major}.{minor}")),
        }
    }

    fn headers(&self) -> Vec<HttpHeader> {
        self.headers
            .iter()
            .enumerate()
            .map(|(position, (name, value))| HttpHeader::new(*name, *value, position))
            .collect()
    }
}

#[test]
fn test_host_request_uses_default_cookie_and_referer() {
    let host = HostRequest {
        method: "POST",
        version: (1, 1),
        headers: vec![
            ("Accept", "application/json"),
            ("Accept-Language", "en"),
            ("Cookie", "admin=true"),
            ("Referer", "https://example.com"),
        ],
    };

    let snapshot = RequestSnapshot::capture(&host);
    assert_eq!(snapshot.cookies().len(), 1);
    assert_eq!(snapshot.referer(), "https://example.com");

    let fp = fingerprint(&host).unwrap();
    assert_eq!(fp.value(), "po11cr02en00_e5fdf4927470_8c6976e5b541_8c6976e5b541");
}

#[test]
fn test_host_request_http2() {
    let host = HostRequest {
        method: "GET",
        version: (2, 0),
        headers: vec![("Accept-Language", "en-us")],
    };
    let fp = fingerprint(&host).unwrap();
    assert_eq!(fp.value(), "ge20nn01enus_6ec18c3c2e22_000000000000_000000000000");
}
