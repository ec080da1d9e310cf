use crate::error::HuginnNetJa4hError;
use crate::http_common::{HttpHeader, HttpRequestLike};
use crate::snapshot::RequestSnapshot;
use httparse::{Request, Status, EMPTY_HEADER};
use std::borrow::Cow;
use tracing::debug;

/// Maximum number of headers accepted in one HTTP/1.x request
pub const MAX_HEADERS: usize = 100;

/// Meant for a request that `httparse` has fully parsed. Before that the header slice still
/// holds the caller's empty placeholders.
impl HttpRequestLike for Request<'_, '_> {
    fn method(&self) -> &str {
        self.method.unwrap_or_default()
    }

    fn protocol(&self) -> Cow<'_, str> {
        match self.version {
            Some(minor) => Cow::Owned(format!("HTTP/1.{minor}")),
            None => Cow::Borrowed(""),
        }
    }

    fn headers(&self) -> Vec<HttpHeader> {
        self.headers
            .iter()
            .enumerate()
            .map(|(position, h)| {
                HttpHeader::new(h.name, String::from_utf8_lossy(h.value), position)
            })
            .collect()
    }
}

/// Parses raw HTTP/1.x request bytes into a [`RequestSnapshot`].
///
/// Returns `Ok(None)` while the request head is still incomplete.
pub fn parse_http1_request(data: &[u8]) -> Result<Option<RequestSnapshot>, HuginnNetJa4hError> {
    let mut headers = [EMPTY_HEADER; MAX_HEADERS];
    let mut req = Request::new(&mut headers);

    match req.parse(data) {
        Ok(Status::Complete(_)) => Ok(Some(RequestSnapshot::capture(&req))),
        Ok(Status::Partial) => {
            debug!("Incomplete HTTP/1.x request data");
            Ok(None)
        }
        Err(e) => {
            debug!("Failed to parse HTTP/1.x request: {}", e);
            Err(HuginnNetJa4hError::Parse(format!("Failed to parse HTTP/1.x request: {e}")))
        }
    }
}
