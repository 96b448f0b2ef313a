//! Positional `%s` substitution into link URLs.
//!
//! A link such as `https://github.com/%s/%s` resolved through
//! `go/gh/rust-lang/rust` expands to `https://github.com/rust-lang/rust`.
//! `%%` renders a single `%`; any other `%` sequence, such as a URL escape
//! like `%20`, is copied verbatim.

use thiserror::Error;

const MARKER: char = '%';
const PLACEHOLDER: char = 's';

/// What to do when more segments are supplied than the template has
/// placeholders. Supplying fewer is always an error.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SubstitutionPolicy {
    /// Extra segments are dropped.
    #[default]
    IgnoreExcess,
    /// Segment and placeholder counts must match exactly.
    Strict,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    #[error("url has {placeholders} placeholder(s) but only {segments} segment(s) were given")]
    MissingSegments { placeholders: usize, segments: usize },
    #[error("url has {placeholders} placeholder(s) but {segments} segment(s) were given")]
    ExcessSegments { placeholders: usize, segments: usize },
}

/// Counts the `%s` placeholders in `template`.
pub fn placeholder_count(template: &str) -> usize {
    let mut count = 0;
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        if c != MARKER {
            continue;
        }
        match chars.peek() {
            Some(&PLACEHOLDER) => {
                count += 1;
                chars.next();
            }
            Some(&MARKER) => {
                chars.next();
            }
            _ => {}
        }
    }

    count
}

/// Fills the placeholders of `template` with `segments`, in order.
///
/// With no segments the template is returned untouched, placeholders and
/// `%%` included.
pub fn substitute<S: AsRef<str>>(
    template: &str,
    segments: &[S],
    policy: SubstitutionPolicy,
) -> Result<String, TemplateError> {
    if segments.is_empty() {
        return Ok(template.to_string());
    }

    let placeholders = placeholder_count(template);
    if segments.len() < placeholders {
        return Err(TemplateError::MissingSegments {
            placeholders,
            segments: segments.len(),
        });
    }
    if policy == SubstitutionPolicy::Strict && segments.len() > placeholders {
        return Err(TemplateError::ExcessSegments {
            placeholders,
            segments: segments.len(),
        });
    }

    let mut out = String::with_capacity(template.len());
    let mut values = segments.iter();
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        if c != MARKER {
            out.push(c);
            continue;
        }
        match chars.peek() {
            Some(&PLACEHOLDER) => {
                chars.next();
                // counted above, so a value is always left here
                if let Some(value) = values.next() {
                    out.push_str(value.as_ref());
                }
            }
            Some(&MARKER) => {
                chars.next();
                out.push(MARKER);
            }
            _ => out.push(MARKER),
        }
    }

    Ok(out)
}

/// Splits a trailing request path into segments.
///
/// Trailing empty pieces are dropped and interior ones kept, so `""` and
/// `"/"` yield nothing while `"a//b"` yields `["a", "", "b"]`.
pub fn split_segments(path: &str) -> Vec<String> {
    let mut segments: Vec<String> = path.split('/').map(str::to_string).collect();
    while segments.last().is_some_and(String::is_empty) {
        segments.pop();
    }
    segments
}
