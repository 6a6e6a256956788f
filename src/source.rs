//! Token sources.
//!
//! A source yields one name per call. Blank lines and anything that does not
//! look like an assertion or comparator name are skipped by the generator,
//! not by the source.

use crate::errors::{GenError, GenResult};
use crate::types::COMPARE_SUFFIX;
use std::borrow::Cow;
use std::io::BufRead;

/// Supplies names one at a time.
pub trait TokenSource {
    /// The next raw token, or `None` once the source is exhausted.
    fn next_token(&mut self) -> GenResult<Option<String>>;
}

/// Reads one token per line.
pub struct LineSource<R> {
    name: String,
    reader: R,
}

impl<R: BufRead> LineSource<R> {
    /// `name` identifies the source in error messages.
    pub fn new(name: impl Into<String>, reader: R) -> Self {
        Self {
            name: name.into(),
            reader,
        }
    }
}

impl<R: BufRead> TokenSource for LineSource<R> {
    /// Lines that are not valid UTF-8 are decoded lossily; the shape filter
    /// then drops them like any other non-token line.
    fn next_token(&mut self) -> GenResult<Option<String>> {
        let mut line = Vec::new();
        let read = self
            .reader
            .read_until(b'\n', &mut line)
            .map_err(|e| GenError::Source {
                name: self.name.clone(),
                message: e.to_string(),
            })?;
        if read == 0 {
            return Ok(None);
        }
        let text = String::from_utf8_lossy(&line);
        if let Cow::Owned(_) = text {
            tracing::warn!(source = %self.name, "line is not valid UTF-8");
        }
        Ok(Some(text.trim().to_string()))
    }
}

/// Adapts any iterator of strings.
pub struct IterSource<I>(pub I);

impl<I, S> TokenSource for IterSource<I>
where
    I: Iterator<Item = S>,
    S: Into<String>,
{
    fn next_token(&mut self) -> GenResult<Option<String>> {
        Ok(self.0.next().map(Into::into))
    }
}

/// Whether a trimmed line looks like an assertion or comparator name.
pub fn is_token_shape(token: &str) -> bool {
    token.starts_with("Assert") || token.starts_with("Fail") || token.ends_with(COMPARE_SUFFIX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{self, Cursor, Read};

    fn drain(source: &mut impl TokenSource) -> Vec<String> {
        let mut tokens = Vec::new();
        while let Some(token) = source.next_token().unwrap() {
            tokens.push(token);
        }
        tokens
    }

    #[test]
    fn test_line_source_trims() {
        let mut source = LineSource::new("test", Cursor::new("  Assert \n\nFail_if\r\n"));
        assert_eq!(drain(&mut source), vec!["Assert", "", "Fail_if"]);
    }

    #[test]
    fn test_line_source_survives_invalid_utf8() {
        let mut source = LineSource::new(
            "latin1.tokens",
            Cursor::new(&b"Assert_NULL\n# caf\xe9 latin-1 comment\nFail_if\n"[..]),
        );
        let tokens = drain(&mut source);
        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[0], "Assert_NULL");
        assert!(!is_token_shape(&tokens[1]));
        assert_eq!(tokens[2], "Fail_if");
    }

    #[test]
    fn test_iter_source() {
        let mut source = IterSource(vec!["Assert_NULL", "Foo_compare"].into_iter());
        assert_eq!(drain(&mut source), vec!["Assert_NULL", "Foo_compare"]);
    }

    #[test]
    fn test_token_shape() {
        assert!(is_token_shape("Assert"));
        assert!(is_token_shape("Fail_unlessNULL"));
        assert!(is_token_shape("Foo_compare"));
        assert!(is_token_shape("Assert_Bogus123"));
        assert!(!is_token_shape(""));
        assert!(!is_token_shape("# comment"));
        assert!(!is_token_shape("check_foo"));
    }

    struct Broken;

    impl Read for Broken {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "disk on fire"))
        }
    }

    #[test]
    fn test_read_failure_names_source() {
        let mut source = LineSource::new("tokens.txt", io::BufReader::new(Broken));
        let err = source.next_token().unwrap_err();
        assert_eq!(
            err.to_string(),
            "failed to read tokens from tokens.txt: disk on fire"
        );
    }
}
