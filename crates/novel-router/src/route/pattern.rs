/// Pattern parsing for route paths
///
/// Pure functional parsing of route patterns such as `/book/:id/:chapterId`
/// into typed segments.
use crate::{Params, RouterError};
use std::collections::HashSet;

/// A single segment of a route pattern
///
/// # Examples
///
/// ```
/// use novel_router::route::pattern::{classify_segment, PatternSegment};
///
/// assert_eq!(classify_segment("book"), PatternSegment::Static("book".to_string()));
/// assert_eq!(classify_segment(":id"), PatternSegment::Param("id".to_string()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternSegment {
    /// Named parameter: `:id`, matches exactly one non-empty path segment
    Param(String),
    /// Static text segment
    Static(String),
}

/// Classifies a segment into a pattern type (pure function)
pub fn classify_segment(segment: &str) -> PatternSegment {
    match segment.strip_prefix(':') {
        Some(name) => PatternSegment::Param(name.to_string()),
        None => PatternSegment::Static(segment.to_string()),
    }
}

/// Parses a full pattern into segments, validating it on the way
///
/// # Rules
///
/// - Must start with `/`
/// - Parameter names must be non-empty
/// - A parameter name may appear only once per pattern
///
/// # Examples
///
/// ```
/// use novel_router::route::pattern::{parse_pattern, PatternSegment};
///
/// let segments = parse_pattern("/book/:id/:chapterId").unwrap();
/// assert_eq!(segments.len(), 3);
/// assert_eq!(segments[2], PatternSegment::Param("chapterId".to_string()));
///
/// assert!(parse_pattern("book/:id").is_err());
/// assert!(parse_pattern("/book/:").is_err());
/// ```
pub fn parse_pattern(pattern: &str) -> Result<Vec<PatternSegment>, RouterError> {
    let invalid = |reason: &str| RouterError::InvalidPattern {
        pattern: pattern.to_string(),
        reason: reason.to_string(),
    };

    if !pattern.starts_with('/') {
        return Err(invalid("must start with `/`"));
    }

    let segments: Vec<PatternSegment> = pattern
        .split('/')
        .filter(|s| !s.is_empty())
        .map(classify_segment)
        .collect();

    let mut seen = HashSet::new();
    for segment in &segments {
        if let PatternSegment::Param(name) = segment {
            if name.is_empty() {
                return Err(invalid("parameter name is empty"));
            }
            if !seen.insert(name.as_str()) {
                return Err(invalid("parameter name appears twice"));
            }
        }
    }

    Ok(segments)
}

/// Matches path segments against pattern segments (pure function)
///
/// Both slices must have the same length; parameters bind the
/// percent-decoded text of the segment they cover.
pub fn match_segments(
    pattern: &[PatternSegment],
    path: &[&str],
    case_insensitive: bool,
) -> Option<Params> {
    fn step(
        pattern: &[PatternSegment],
        path: &[&str],
        mut params: Params,
        case_insensitive: bool,
    ) -> Option<Params> {
        match (pattern.split_first(), path.split_first()) {
            (None, None) => Some(params),
            (Some((PatternSegment::Param(name), rest_pattern)), Some((value, rest_path))) => {
                params.insert(name.clone(), decode_segment(value));
                step(rest_pattern, rest_path, params, case_insensitive)
            }
            (Some((PatternSegment::Static(text), rest_pattern)), Some((value, rest_path))) => {
                let matches = if case_insensitive {
                    text.eq_ignore_ascii_case(value)
                } else {
                    text == value
                };
                if matches {
                    step(rest_pattern, rest_path, params, case_insensitive)
                } else {
                    None
                }
            }
            _ => None,
        }
    }

    step(pattern, path, Params::new(), case_insensitive)
}

/// Percent-decodes a captured segment, keeping the raw text when it does not
/// decode to UTF-8
fn decode_segment(value: &str) -> String {
    match urlencoding::decode(value) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => {
            tracing::warn!(segment = value, "route parameter is not valid UTF-8 once decoded");
            value.to_string()
        }
    }
}
