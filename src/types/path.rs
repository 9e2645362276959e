//! Defines a [`Path`], the dotted reference placeholders resolve.

use std::fmt;
use std::str::FromStr;

use crate::types::tree::is_ident;
use crate::{Error, Result};

/// The prefix that makes a path resolve against the top-level context.
pub(crate) const PARENT: &str = "../";

/// A dotted reference into the context, like `user.name`, `this` or
/// `../title`.
///
/// The raw text is kept verbatim so it can be rendered back into placeholder
/// syntax unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path {
    raw: String,
    kind: PathKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum PathKind {
    /// The current context itself.
    This,
    /// Segments looked up in the current context.
    Current(Vec<String>),
    /// Segments looked up in the top-level context.
    Parent(Vec<String>),
}

impl Path {
    /// Parses a path.
    ///
    /// A path is `this`, or `.` separated segments that are each an
    /// identifier or a run of digits, optionally behind `../` markers.
    ///
    /// Only one leading `../` is recognized. Whatever follows it is split on
    /// `.` as usual, so `../../x` does not walk up two levels; it will simply
    /// not resolve.
    ///
    /// # Errors
    ///
    /// If the path is empty or is not made of valid segments.
    pub fn new(raw: impl Into<String>) -> Result<Self> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(Error::invalid_argument("path must not be empty"));
        }
        if !is_valid(&raw) {
            return Err(Error::invalid_argument(format!(
                "`{raw}` is not a valid path"
            )));
        }
        let kind = if raw == "this" {
            PathKind::This
        } else if let Some(rest) = raw.strip_prefix(PARENT) {
            PathKind::Parent(split(rest))
        } else {
            PathKind::Current(split(&raw))
        };
        Ok(Self { raw, kind })
    }

    /// Returns the path exactly as it was written.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Whether this path resolves against the top-level context.
    pub fn is_parent(&self) -> bool {
        matches!(self.kind, PathKind::Parent(_))
    }

    pub(crate) fn kind(&self) -> &PathKind {
        &self.kind
    }
}

fn is_valid(raw: &str) -> bool {
    if raw == "this" {
        return true;
    }
    let mut rest = raw;
    while let Some(r) = rest.strip_prefix(PARENT) {
        rest = r;
    }
    rest.split('.').all(is_segment)
}

fn is_segment(s: &str) -> bool {
    is_ident(s) || (!s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()))
}

fn split(s: &str) -> Vec<String> {
    s.split('.').map(String::from).collect()
}

impl FromStr for Path {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
