#![forbid(unsafe_code)]

//! JA4H HTTP client fingerprinting.
//!
//! A JA4H fingerprint such as `po11cr02en00_e5fdf4927470_8c6976e5b541_8c6976e5b541` is built
//! from four `_`-separated segments:
//!
//! - **A**: method, HTTP version, cookie and referer flags, header count and primary
//!   Accept-Language
//! - **B**: truncated SHA-256 of the header names
//! - **C**: truncated SHA-256 of the cookie names
//! - **D**: truncated SHA-256 of the cookies (see [`CookieDigest`])
//!
//! Header names are hashed in sorted order, not in the order they were sent. Fingerprints
//! therefore differ from tools that keep the wire order.

pub mod config;
pub mod error;
pub mod http1_process;
pub mod http_common;
pub mod ja4h;
pub mod snapshot;

// Re-exports
pub use config::{CookieDigest, HeaderNameCase, Ja4hConfig};
pub use error::*;
pub use http1_process::parse_http1_request;
pub use http_common::{HttpCookie, HttpHeader, HttpRequestLike};
pub use ja4h::{Ja4hFingerprint, Ja4hPayload, Ja4hRawFingerprint, NO_COOKIES_HASH};
pub use snapshot::RequestSnapshot;

use tracing::{debug, trace};

/// A JA4H fingerprint generator.
///
/// Holds no per-request state and can be shared between threads.
#[derive(Debug, Clone, Default)]
pub struct HuginnNetJa4h {
    config: Ja4hConfig,
}

impl HuginnNetJa4h {
    /// Creates a generator with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: Ja4hConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Ja4hConfig {
        &self.config
    }

    /// Computes every JA4H part for a captured request.
    ///
    /// # Errors
    /// `InvalidInput` if the method is shorter than two characters.
    pub fn generate(&self, snapshot: &RequestSnapshot) -> Result<Ja4hPayload, HuginnNetJa4hError> {
        match Ja4hPayload::generate(snapshot, &self.config) {
            Ok(payload) => {
                trace!("JA4H computed: {}", payload.ja4h);
                Ok(payload)
            }
            Err(e) => {
                debug!("Skipping JA4H for request: {}", e);
                Err(e)
            }
        }
    }

    /// Captures `request` once and returns its hashed fingerprint.
    pub fn fingerprint<R: HttpRequestLike + ?Sized>(
        &self,
        request: &R,
    ) -> Result<Ja4hFingerprint, HuginnNetJa4hError> {
        let snapshot = RequestSnapshot::capture(request);
        self.generate(&snapshot).map(|payload| payload.ja4h)
    }

    /// Parses raw HTTP/1.x request bytes and computes their JA4H parts.
    ///
    /// Returns `Ok(None)` while the request head is incomplete.
    pub fn generate_http1(&self, data: &[u8]) -> Result<Option<Ja4hPayload>, HuginnNetJa4hError> {
        match parse_http1_request(data)? {
            Some(snapshot) => self.generate(&snapshot).map(Some),
            None => Ok(None),
        }
    }
}

/// Computes the JA4H fingerprint of `request` with the default configuration.
///
/// # Errors
/// `InvalidInput` if the method is shorter than two characters.
pub fn fingerprint<R: HttpRequestLike + ?Sized>(
    request: &R,
) -> Result<Ja4hFingerprint, HuginnNetJa4hError> {
    HuginnNetJa4h::new().fingerprint(request)
}
