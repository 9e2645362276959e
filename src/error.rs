use std::cmp::max;
use std::fmt;
use std::io;

/// A type alias for results in this crate.
pub type Result<T> = std::result::Result<T, Error>;

/// An error that can occur while building, expanding or serializing a
/// template tree.
pub struct Error {
    kind: ErrorKind,
    msg: String,
    trail: Vec<String>,
    name: Option<String>,
    source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
}

/// The category of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// A node or path was constructed from malformed parts.
    InvalidArgument,
    /// A block referenced a helper that is not registered.
    HelperNotFound,
    /// A template was looked up by a name that is not registered.
    UnknownTemplate,
    /// Blocks were nested deeper than the engine allows.
    MaxDepth,
    /// A value could not be formatted as text.
    Format,
    /// Writing the output failed.
    Io,
    /// A context could not be converted to a [`Value`][crate::Value].
    Serialize,
}

impl Error {
    fn new(kind: ErrorKind, msg: impl Into<String>) -> Self {
        Self {
            kind,
            msg: msg.into(),
            trail: Vec::new(),
            name: None,
            source: None,
        }
    }

    pub(crate) fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidArgument, msg)
    }

    pub(crate) fn helper_not_found(helper: &str) -> Self {
        Self::new(
            ErrorKind::HelperNotFound,
            format!("unknown helper `{helper}`"),
        )
    }

    pub(crate) fn unknown_template(name: &str) -> Self {
        Self::new(
            ErrorKind::UnknownTemplate,
            format!("unknown template `{name}`"),
        )
    }

    pub(crate) fn max_depth(max: usize) -> Self {
        Self::new(
            ErrorKind::MaxDepth,
            format!("reached maximum expansion depth ({max})"),
        )
    }

    pub(crate) fn format(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::Format, msg)
    }

    /// Records that the error happened inside the given tree position.
    ///
    /// Positions are pushed innermost first while the error propagates.
    pub(crate) fn within(mut self, position: impl Into<String>) -> Self {
        self.trail.push(position.into());
        self
    }

    pub(crate) fn with_template_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Returns the category of this error.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the error message without any location information.
    pub fn message(&self) -> &str {
        &self.msg
    }

    /// Returns the name of the registered template the error occurred in.
    pub fn template_name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns the tree position the error occurred at, outermost first.
    ///
    /// Elements are listed by tag and blocks by their opening token, for
    /// example `["div", "{{#each items}}", "li"]`.
    pub fn trail(&self) -> impl Iterator<Item = &str> + '_ {
        self.trail.iter().rev().map(String::as_str)
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Self {
            source: Some(Box::new(err)),
            ..Self::new(ErrorKind::Io, "failed to write output")
        }
    }
}

impl From<fmt::Error> for Error {
    fn from(_: fmt::Error) -> Self {
        Self::format("failed to format value")
    }
}

#[cfg(feature = "serde")]
impl serde::ser::Error for Error {
    fn custom<T>(msg: T) -> Self
    where
        T: fmt::Display,
    {
        Self::new(ErrorKind::Serialize, msg.to_string())
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.trail.is_empty() {
            f.debug_struct("Error")
                .field("kind", &self.kind)
                .field("msg", &self.msg)
                .field("name", &self.name)
                .finish()
        } else {
            fmt_pretty(self, f)
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() && !self.trail.is_empty() {
            return fmt_pretty(self, f);
        }
        write!(f, "{}", self.msg)?;
        if !self.trail.is_empty() {
            let trail: Vec<_> = self.trail().collect();
            write!(f, " at `{}`", trail.join(" > "))?;
        }
        if let Some(name) = &self.name {
            write!(f, " in template `{name}`")?;
        }
        if let Some(source) = &self.source {
            write!(f, ": {source}")?;
        }
        Ok(())
    }
}

fn fmt_pretty(err: &Error, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let trail: Vec<_> = err.trail().collect();
    let line = trail.join(" > ");
    let last = trail.last().copied().unwrap_or_default();
    let col = width(&line) - width(last);
    let underline = "^".repeat(max(1, width(last)));

    writeln!(f)?;
    if let Some(name) = &err.name {
        writeln!(f, "  --> {name}")?;
    }
    write!(
        f,
        "   |\n   \
         | {line}\n   \
         | {0:col$}{underline} {msg}\n",
        "",
        line = line,
        col = col,
        underline = underline,
        msg = err.msg,
    )
}

#[cfg(feature = "unicode")]
fn width(s: &str) -> usize {
    unicode_width::UnicodeWidthStr::width(s)
}

#[cfg(not(feature = "unicode"))]
fn width(s: &str) -> usize {
    s.chars().count()
}
