/// What segment D hashes.
///
/// The JA4H definition describes segment D as a digest of cookie names and values, while
/// widely deployed fingerprint corpora were produced from cookie names only. Comparisons
/// against an existing corpus must use the mode that corpus was built with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CookieDigest {
    /// Sorted cookie names, the same input as segment C
    #[default]
    Names,
    /// `name=value` pairs ordered by name, then value
    NameValuePairs,
}

/// How header names are spelled before segment B hashes them.
///
/// Either way, names that differ only in case count as one header, and the
/// first spelling seen is the one kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HeaderNameCase {
    /// Hash names as stored in the request
    #[default]
    AsStored,
    /// Rewrite names in canonical MIME form (`accept-language` -> `Accept-Language`)
    Canonical,
}

/// Configuration for JA4H generation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Ja4hConfig {
    pub cookie_digest: CookieDigest,
    pub header_name_case: HeaderNameCase,
}

impl Ja4hConfig {
    pub fn with_cookie_digest(mut self, cookie_digest: CookieDigest) -> Self {
        self.cookie_digest = cookie_digest;
        self
    }

    pub fn with_header_name_case(mut self, header_name_case: HeaderNameCase) -> Self {
        self.header_name_case = header_name_case;
        self
    }
}
