//! Value formatting for the markup serializer.
//!
//! The [`Formatter`] type is a [`std::fmt::Write`] façade over the output
//! buffer, be it a [`String`] or an arbitrary [`std::io::Write`] wrapped in a
//! [`Writer`]. The serializer writes every [`Value`] through [`default`] or
//! [`escape`].

use std::fmt;
use std::fmt::Write;
use std::io;

use crate::{Error, Result, Value};

/// A [`std::fmt::Write`] façade.
pub(crate) struct Formatter<'a> {
    buf: &'a mut (dyn fmt::Write + 'a),
}

/// Adapts an [`io::Write`] to [`fmt::Write`], holding on to the I/O error
/// that a [`fmt::Error`] cannot carry.
pub(crate) struct Writer<W> {
    writer: W,
    err: Option<io::Error>,
}

impl<'a> Formatter<'a> {
    pub(crate) fn with_string(buf: &'a mut String) -> Self {
        Self { buf }
    }

    pub(crate) fn with_writer<W>(buf: &'a mut Writer<W>) -> Self
    where
        W: io::Write,
    {
        Self { buf }
    }
}

impl fmt::Write for Formatter<'_> {
    #[inline]
    fn write_str(&mut self, s: &str) -> fmt::Result {
        fmt::Write::write_str(self.buf, s)
    }

    #[inline]
    fn write_char(&mut self, c: char) -> fmt::Result {
        fmt::Write::write_char(self.buf, c)
    }

    #[inline]
    fn write_fmt(&mut self, args: fmt::Arguments<'_>) -> fmt::Result {
        fmt::Write::write_fmt(self.buf, args)
    }
}

impl<W> Writer<W>
where
    W: io::Write,
{
    pub(crate) fn new(writer: W) -> Self {
        Self { writer, err: None }
    }

    pub(crate) fn take_err(&mut self) -> Option<io::Error> {
        self.err.take()
    }
}

impl<W> fmt::Write for Writer<W>
where
    W: io::Write,
{
    #[inline]
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.writer.write_all(s.as_bytes()).map_err(|e| {
            self.err = Some(e);
            fmt::Error
        })
    }

    #[inline]
    fn write_char(&mut self, c: char) -> fmt::Result {
        self.writer
            .write_all(c.encode_utf8(&mut [0; 4]).as_bytes())
            .map_err(|e| {
                self.err = Some(e);
                fmt::Error
            })
    }
}

/// Formats a value verbatim.
///
/// Values are formatted as follows:
/// - [`Value::None`]: empty string
/// - [`Value::Bool`]: `true` or `false`
/// - [`Value::Integer`]: the integer formatted using [`Display`][std::fmt::Display]
/// - [`Value::Float`]: the float formatted using [`Display`][std::fmt::Display]
/// - [`Value::String`]: the string, unescaped
/// - [`Value::List`]: each item in turn, with no separator
///
/// Errors if the value is or contains a [`Value::Map`].
pub(crate) fn default(f: &mut Formatter<'_>, value: &Value) -> Result<()> {
    match value {
        Value::None => {}
        Value::Bool(b) => write!(f, "{b}")?,
        Value::Integer(n) => write!(f, "{n}")?,
        Value::Float(n) => write!(f, "{n}")?,
        Value::String(s) => f.write_str(s)?,
        Value::List(list) => {
            for item in list {
                default(f, item)?;
            }
        }
        value => return Err(unformattable(value)),
    }
    Ok(())
}

/// Formats a value like [`default`] but escapes HTML special characters in
/// strings.
pub(crate) fn escape(f: &mut Formatter<'_>, value: &Value) -> Result<()> {
    match value {
        Value::String(s) => escape_str(f, s),
        Value::List(list) => {
            for item in list {
                escape(f, item)?;
            }
            Ok(())
        }
        value => default(f, value),
    }
}

fn escape_str(f: &mut Formatter<'_>, s: &str) -> Result<()> {
    for c in s.chars() {
        match c {
            '<' => f.write_str("&lt;")?,
            '>' => f.write_str("&gt;")?,
            '&' => f.write_str("&amp;")?,
            '"' => f.write_str("&quot;")?,
            '\'' => f.write_str("&#x27;")?,
            c => f.write_char(c)?,
        }
    }
    Ok(())
}

fn unformattable(value: &Value) -> Error {
    Error::format(format!("cannot format value of type {}", value.human()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn escaped(value: &Value) -> Result<String> {
        let mut s = String::new();
        escape(&mut Formatter::with_string(&mut s), value)?;
        Ok(s)
    }

    #[test]
    fn escape_special_characters() {
        let s = escaped(&Value::from("<a href=\"x\">Tom & Jerry's</a>")).unwrap();
        assert_eq!(
            s,
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&#x27;s&lt;/a&gt;"
        );
    }

    #[test]
    fn default_list_items_in_order() {
        let value = Value::from(vec![Value::from(1), Value::from("a"), Value::None]);
        let mut s = String::new();
        default(&mut Formatter::with_string(&mut s), &value).unwrap();
        assert_eq!(s, "1a");
    }

    #[test]
    fn default_map_is_error() {
        let value = Value::Map(crate::Map::new());
        let mut s = String::new();
        let err = default(&mut Formatter::with_string(&mut s), &value).unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::Format);
        assert_eq!(err.message(), "cannot format value of type map");
    }
}
