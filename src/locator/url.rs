use crate::error::{Error, Result};

/// Parsed form of a locator URL: `scheme://primary/secondary[?query]`
///
/// `primary` is the authority part (commonly a placeholder name, possibly
/// empty), `secondary` the path component including its leading slash. A
/// path component is required; a URL without one is rejected outright.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceUrl {
    scheme: String,
    primary: String,
    secondary: String,
    query: Option<String>,
}

fn valid_scheme(scheme: &str) -> bool {
    let mut chars = scheme.chars();

    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() => {}
        _ => return false,
    }

    chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

impl ResourceUrl {
    /// Parse a locator URL, rejecting malformed input
    pub fn parse(url: &str) -> Result<Self> {
        let Some((scheme, rest)) = url.split_once("://") else {
            return Err(Error::InvalidArgument(format!(
                "locator url has no scheme: {url}"
            )));
        };

        if !valid_scheme(scheme) {
            return Err(Error::InvalidArgument(format!(
                "locator url has no valid scheme: {url}"
            )));
        }

        // Fragments are not part of the locatable resource
        let rest = rest.split('#').next().unwrap_or(rest);

        let (rest, query) = match rest.split_once('?') {
            Some((rest, query)) => (rest, Some(query.to_string())),
            None => (rest, None),
        };

        let Some((primary, path)) = rest.split_once('/') else {
            return Err(Error::InvalidArgument(format!(
                "locator url has no path: {url}"
            )));
        };

        Ok(ResourceUrl {
            scheme: scheme.to_string(),
            primary: primary.to_string(),
            secondary: format!("/{path}"),
            query,
        })
    }

    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    pub fn primary(&self) -> &str {
        &self.primary
    }

    pub fn secondary(&self) -> &str {
        &self.secondary
    }

    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    /// Split the query string into raw key/value pairs
    ///
    /// No percent-decoding is applied; descriptors interpret their own
    /// option syntax.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let Some(query) = &self.query else {
            return Vec::new();
        };

        query
            .split('&')
            .filter(|part| !part.is_empty())
            .map(|part| match part.split_once('=') {
                Some((key, value)) => (key.to_string(), value.to_string()),
                None => (part.to_string(), String::new()),
            })
            .collect()
    }
}
