use std::fs;

use globset::{GlobBuilder, GlobMatcher};

use super::path::CanonicalPath;
use crate::error::{Error, Result};

/// Build the case-insensitive matcher pattern for one query segment
///
/// Backslashes are unified to forward slashes, every ASCII letter becomes a
/// two-case character class, and everything else (including `*`, `?` and
/// `{a,b}` alternation) passes through untouched so the caller's own
/// wildcard syntax keeps working.
pub fn build_pattern(segment: &str) -> String {
    let mut pattern = String::with_capacity(segment.len() * 4);

    for ch in segment.chars() {
        if ch == '\\' {
            pattern.push('/');
        } else if ch.is_ascii_alphabetic() {
            pattern.push('[');
            pattern.push(ch.to_ascii_lowercase());
            pattern.push(ch.to_ascii_uppercase());
            pattern.push(']');
        } else {
            pattern.push(ch);
        }
    }

    pattern
}

/// Compile one query segment into a name matcher
fn compile_segment(segment: &str) -> Result<GlobMatcher> {
    let pattern = build_pattern(segment);

    let glob = GlobBuilder::new(&pattern)
        .literal_separator(true)
        .build()
        .map_err(|e| Error::InvalidArgument(format!("bad query segment `{segment}`: {e}")))?;

    Ok(glob.compile_matcher())
}

/// Resolve a query against a base directory, segment by segment
///
/// Each normalized query segment is matched against the listing of the
/// candidate directories accumulated so far, so wildcards never cross a
/// separator. Results come back in OS listing order, which is unspecified.
/// Entries with non-UTF-8 names are skipped; they cannot be addressed by a
/// query string. Unreadable intermediate directories simply contribute no
/// matches.
pub(crate) fn match_under(base: &CanonicalPath, query: &str) -> Result<Vec<CanonicalPath>> {
    let relative = CanonicalPath::parse(query);

    if relative.is_root() {
        return Ok(vec![base.clone()]);
    }

    let mut candidates = vec![base.clone()];

    for segment in relative.segments() {
        let matcher = compile_segment(segment)?;
        let mut next = Vec::new();

        for candidate in &candidates {
            let Ok(entries) = fs::read_dir(candidate.to_path_buf()) else {
                continue;
            };

            for entry in entries.flatten() {
                let name = entry.file_name();
                let Some(name) = name.to_str() else {
                    continue;
                };

                if matcher.is_match(name) {
                    next.push(candidate.child(name));
                }
            }
        }

        candidates = next;

        if candidates.is_empty() {
            break;
        }
    }

    Ok(candidates)
}
