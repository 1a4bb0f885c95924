// File: novel-utils/src/query.rs
// Purpose: Query-string parsing for the current location or an explicit URL

use crate::context::Location;
use crate::error::{Result, UtilError};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

static PAIR_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"([^?&=]+)=([^?&=]*)").unwrap());

/// Decoded query parameters
///
/// Later duplicates of a key overwrite earlier ones.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryObject {
    params: HashMap<String, String>,
}

impl QueryObject {
    /// Create from HashMap
    pub fn new(params: HashMap<String, String>) -> Self {
        Self { params }
    }

    /// Parse the query part of `url`
    ///
    /// The query starts after the first `?` and stops at a `#`. A URL without
    /// `?` yields an empty object.
    pub fn parse(url: &str) -> Result<Self> {
        let Some((_, rest)) = url.split_once('?') else {
            return Ok(Self::default());
        };
        let query = rest.split_once('#').map_or(rest, |(query, _)| query);

        let mut params = HashMap::new();
        for caps in PAIR_REGEX.captures_iter(query) {
            let key = decode_component(&caps[1])?;
            let value = decode_component(&caps[2])?;
            params.insert(key, value);
        }

        Ok(Self { params })
    }

    /// Get a query parameter value
    pub fn get(&self, key: &str) -> Option<&String> {
        self.params.get(key)
    }

    /// Get a query parameter as a specific type
    pub fn get_as<T: std::str::FromStr>(&self, key: &str) -> Option<T> {
        self.params.get(key)?.parse().ok()
    }

    pub fn has(&self, key: &str) -> bool {
        self.params.contains_key(key)
    }

    /// Get all parameter names
    pub fn keys(&self) -> Vec<&String> {
        self.params.keys().collect()
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn as_map(&self) -> &HashMap<String, String> {
        &self.params
    }

    pub fn into_map(self) -> HashMap<String, String> {
        self.params
    }
}

/// Strict percent-decoding of one key or value
///
/// `+` stays a literal plus.
fn decode_component(raw: &str) -> Result<String> {
    let malformed = || UtilError::MalformedEncoding {
        input: raw.to_string(),
    };

    let bytes = raw.as_bytes();
    for (i, _) in bytes.iter().enumerate().filter(|(_, b)| **b == b'%') {
        let escape = bytes.get(i + 1..i + 3).ok_or_else(malformed)?;
        if !escape.iter().all(u8::is_ascii_hexdigit) {
            return Err(malformed());
        }
    }

    urlencoding::decode(raw)
        .map(|decoded| decoded.into_owned())
        .map_err(|_| malformed())
}

/// Parses the query of `url`, or of the current location when `url` is `None`
///
/// # Examples
///
/// ```
/// use novel_utils::{parse_query_object, StaticLocation};
///
/// let here = StaticLocation::new("https://novel.example/#/home");
/// let query = parse_query_object(&here, Some("/search?kw=%E4%B8%89%E4%BD%93&page=2")).unwrap();
/// assert_eq!(query.get("kw").map(String::as_str), Some("三体"));
/// assert_eq!(query.get_as::<u32>("page"), Some(2));
/// ```
pub fn parse_query_object<L: Location + ?Sized>(
    location: &L,
    url: Option<&str>,
) -> Result<QueryObject> {
    match url {
        Some(url) => QueryObject::parse(url),
        None => QueryObject::parse(&location.href()),
    }
}

/// Reads one parameter from the current location's query
pub fn read_query_param<L: Location + ?Sized>(location: &L, name: &str) -> Result<Option<String>> {
    let mut query = parse_query_object(location, None)?.into_map();
    Ok(query.remove(name))
}
