use crate::config::{CookieDigest, HeaderNameCase, Ja4hConfig};
use crate::error::HuginnNetJa4hError;
use crate::http_common::is_token_byte;
use crate::snapshot::RequestSnapshot;
use sha2::{Digest, Sha256};
use std::borrow::Cow;
use std::collections::HashSet;
use std::fmt;

/// Stand-in for segments C and D when the request carries no cookies
pub const NO_COOKIES_HASH: &str = "000000000000";

/// Language code used when there is no usable Accept-Language header
pub const NO_LANGUAGE: &str = "0000";

const LANGUAGE_CODE_LEN: usize = 4;

/// JA4H fingerprint (hashed version)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Ja4hFingerprint(String);

impl Ja4hFingerprint {
    /// Get the variant name for serialization/display purposes
    pub fn variant_name(&self) -> &'static str {
        "ja4h"
    }

    /// Get the fingerprint value
    pub fn value(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Ja4hFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// JA4H raw fingerprint: segment A followed by the un-hashed inputs of B, C and D
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Ja4hRawFingerprint(String);

impl Ja4hRawFingerprint {
    pub fn variant_name(&self) -> &'static str {
        "ja4h_r"
    }

    pub fn value(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Ja4hRawFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Every JA4H part computed for one request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ja4hPayload {
    /// JA4H_a: method + version + cookie/referer flags + header count + language
    pub ja4h_a: String,
    /// JA4H_b input: header names in canonical order, comma-separated
    pub ja4h_b: String,
    /// JA4H_c input: cookie names in canonical order, comma-separated
    pub ja4h_c: String,
    /// JA4H_d input: cookie names or `name=value` pairs, comma-separated
    pub ja4h_d: String,
    pub ja4h: Ja4hFingerprint,
    pub ja4h_raw: Ja4hRawFingerprint,
}

impl Ja4hPayload {
    /// Computes all four segments from the same snapshot and joins them.
    ///
    /// Header names are hashed in sorted order rather than wire order, so the result
    /// differs from tools that keep the order headers were sent in.
    pub fn generate(
        snapshot: &RequestSnapshot,
        config: &Ja4hConfig,
    ) -> Result<Self, HuginnNetJa4hError> {
        let ja4h_a = ja4h_a(snapshot)?;

        let header_names = sorted_header_names(snapshot, config.header_name_case);
        let cookie_names = sorted_cookie_names(snapshot);
        let cookie_items = sorted_cookie_items(snapshot, config.cookie_digest);

        let ja4h_b_hash = hash12(&header_names);
        let ja4h_c_hash = cookie_hash12(&cookie_names);
        let ja4h_d_hash = cookie_hash12(&cookie_items);

        let ja4h_b = header_names.join(",");
        let ja4h_c = cookie_names.join(",");
        let ja4h_d = cookie_items.join(",");

        let ja4h = Ja4hFingerprint(format!(
            "{ja4h_a}_{ja4h_b_hash}_{ja4h_c_hash}_{ja4h_d_hash}"
        ));
        let ja4h_raw = Ja4hRawFingerprint(format!("{ja4h_a}_{ja4h_b}_{ja4h_c}_{ja4h_d}"));

        Ok(Self { ja4h_a, ja4h_b, ja4h_c, ja4h_d, ja4h, ja4h_raw })
    }
}

/// Generate 12-character hash (first 12 chars of SHA256) over the concatenated items
fn hash12<S: AsRef<str>>(items: &[S]) -> String {
    let mut hasher = Sha256::new();
    for item in items {
        hasher.update(item.as_ref().as_bytes());
    }
    let mut hex = format!("{:x}", hasher.finalize());
    hex.truncate(12);
    hex
}

fn cookie_hash12<S: AsRef<str>>(items: &[S]) -> String {
    if items.is_empty() {
        NO_COOKIES_HASH.to_string()
    } else {
        hash12(items)
    }
}

/// Two-letter method code: `GET` -> `ge`, `POST` -> `po`
pub fn method_code(method: &str) -> Result<String, HuginnNetJa4hError> {
    if method.chars().nth(1).is_none() {
        return Err(HuginnNetJa4hError::InvalidInput {
            field: "method".to_string(),
            value: method.to_string(),
        });
    }
    Ok(method.chars().flat_map(char::to_lowercase).take(2).collect())
}

/// `20` for HTTP/2, `11` for everything else
pub fn version_code(protocol: &str) -> &'static str {
    match protocol.split_once('/') {
        Some((_, "2" | "2.0")) => "20",
        _ => "11",
    }
}

/// Number of distinct header names, not counting `Cookie` and `Referer`.
///
/// Counts of 100 or more are not truncated and make segment A longer than 10 characters.
pub fn header_count(snapshot: &RequestSnapshot) -> usize {
    let mut count = distinct_header_names(snapshot).len();
    for excluded in ["Cookie", "Referer"] {
        if snapshot.has_header(excluded) {
            count = count.saturating_sub(1);
        }
    }
    count
}

/// Four-character code for the primary Accept-Language entry: `en-US,en;q=0.9` -> `enus`
pub fn language_code(accept_language: Option<&str>) -> String {
    let Some(accept_language) = accept_language.filter(|v| !v.is_empty()) else {
        return NO_LANGUAGE.to_string();
    };

    let cleaned = accept_language.replace('-', "").to_lowercase();
    let primary = cleaned.split(',').next().unwrap_or_default();

    primary
        .chars()
        .chain(std::iter::repeat('0'))
        .take(LANGUAGE_CODE_LEN)
        .collect()
}

/// Segment A: plaintext summary of the request line and a few headers
pub fn ja4h_a(snapshot: &RequestSnapshot) -> Result<String, HuginnNetJa4hError> {
    let method = method_code(snapshot.method())?;
    let version = version_code(snapshot.protocol());
    let cookie_marker = if snapshot.cookies().is_empty() { 'n' } else { 'c' };
    let referer_marker = if snapshot.referer().is_empty() { 'n' } else { 'r' };
    let nr_headers = header_count(snapshot);
    let lang = language_code(snapshot.header("Accept-Language"));

    Ok(format!("{method}{version}{cookie_marker}{referer_marker}{nr_headers:02}{lang}"))
}

/// Segment B: truncated SHA-256 of the sorted header names
pub fn ja4h_b(snapshot: &RequestSnapshot, config: &Ja4hConfig) -> String {
    hash12(&sorted_header_names(snapshot, config.header_name_case))
}

/// Segment C: truncated SHA-256 of the sorted cookie names
pub fn ja4h_c(snapshot: &RequestSnapshot) -> String {
    cookie_hash12(&sorted_cookie_names(snapshot))
}

/// Segment D: truncated SHA-256 of the cookies, per `config.cookie_digest`
pub fn ja4h_d(snapshot: &RequestSnapshot, config: &Ja4hConfig) -> String {
    cookie_hash12(&sorted_cookie_items(snapshot, config.cookie_digest))
}

/// Header names with case-insensitive duplicates removed, first spelling kept
fn distinct_header_names(snapshot: &RequestSnapshot) -> Vec<&str> {
    let mut seen: HashSet<String> = HashSet::with_capacity(snapshot.headers().len());
    let mut names: Vec<&str> = Vec::with_capacity(snapshot.headers().len());
    for header in snapshot.headers() {
        if seen.insert(header.name.to_ascii_lowercase()) {
            names.push(&header.name);
        }
    }
    names
}

fn sorted_header_names(snapshot: &RequestSnapshot, case: HeaderNameCase) -> Vec<Cow<'_, str>> {
    let mut names: Vec<Cow<'_, str>> = distinct_header_names(snapshot)
        .into_iter()
        .map(|name| match case {
            HeaderNameCase::AsStored => Cow::Borrowed(name),
            HeaderNameCase::Canonical => canonical_header_name(name),
        })
        .collect();
    names.sort_unstable();
    names
}

fn sorted_cookie_names(snapshot: &RequestSnapshot) -> Vec<&str> {
    let mut names: Vec<&str> = snapshot.cookies().iter().map(|c| c.name.as_str()).collect();
    names.sort_unstable();
    names
}

fn sorted_cookie_items(snapshot: &RequestSnapshot, digest: CookieDigest) -> Vec<Cow<'_, str>> {
    match digest {
        CookieDigest::Names => sorted_cookie_names(snapshot)
            .into_iter()
            .map(Cow::Borrowed)
            .collect(),
        CookieDigest::NameValuePairs => {
            let mut pairs: Vec<(&str, &str)> = snapshot
                .cookies()
                .iter()
                .map(|c| (c.name.as_str(), c.value_or_empty()))
                .collect();
            pairs.sort_unstable();
            pairs
                .into_iter()
                .map(|(name, value)| Cow::Owned(format!("{name}={value}")))
                .collect()
        }
    }
}

/// Canonical MIME form of a header name.
///
/// The first letter and every letter after a `-` are uppercased, the rest lowercased.
/// Names holding bytes that are not valid in a header token are returned unchanged.
fn canonical_header_name(name: &str) -> Cow<'_, str> {
    if !name.bytes().all(is_token_byte) {
        return Cow::Borrowed(name);
    }

    let mut upper = true;
    let canonical: String = name
        .chars()
        .map(|c| {
            let mapped = if upper { c.to_ascii_uppercase() } else { c.to_ascii_lowercase() };
            upper = c == '-';
            mapped
        })
        .collect();

    if canonical == name {
        Cow::Borrowed(name)
    } else {
        Cow::Owned(canonical)
    }
}
