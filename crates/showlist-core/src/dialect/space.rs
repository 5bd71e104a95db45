use std::io::{self, Read};

use super::Dialect;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FieldState {
    Start,
    Unquoted,
    Quoted,
    QuoteInQuoted,
}

/// Reader adapter that drops the spaces opening a field when the dialect
/// sets `skip_initial_space`.
///
/// The spaces are removed before the `csv` parser sees them, so a field
/// written as `, "a, b"` still parses as quoted. Spaces inside quoted or
/// unquoted field content are kept. Every special byte is ASCII, so
/// multi-byte UTF-8 sequences pass through untouched.
pub struct SkipInitialSpace<R> {
    inner: R,
    dialect: Dialect,
    state: FieldState,
}

impl<R: Read> SkipInitialSpace<R> {
    pub fn new(inner: R, dialect: Dialect) -> Self {
        Self {
            inner,
            dialect,
            state: FieldState::Start,
        }
    }

    /// Advances the field state by one byte; returns whether to keep it.
    fn keep(&mut self, b: u8) -> bool {
        if !self.dialect.skip_initial_space {
            return true;
        }
        let Dialect {
            delimiter,
            quote,
            double_quote,
            ..
        } = self.dialect;
        let ends_field = b == delimiter || b == b'\n' || b == b'\r';

        self.state = match self.state {
            FieldState::Start if b == b' ' => return false,
            FieldState::Start if b == quote => FieldState::Quoted,
            FieldState::Start | FieldState::Unquoted if ends_field => FieldState::Start,
            FieldState::Start | FieldState::Unquoted => FieldState::Unquoted,
            FieldState::Quoted if b == quote => FieldState::QuoteInQuoted,
            FieldState::Quoted => FieldState::Quoted,
            FieldState::QuoteInQuoted if b == quote && double_quote => FieldState::Quoted,
            FieldState::QuoteInQuoted if ends_field => FieldState::Start,
            FieldState::QuoteInQuoted => FieldState::Unquoted,
        };
        true
    }
}

impl<R: Read> Read for SkipInitialSpace<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        loop {
            let n = self.inner.read(buf)?;
            if n == 0 {
                return Ok(0);
            }
            let mut kept = 0;
            for i in 0..n {
                let b = buf[i];
                if self.keep(b) {
                    buf[kept] = b;
                    kept += 1;
                }
            }
            // A chunk of nothing but skipped spaces must not look like EOF.
            if kept > 0 {
                return Ok(kept);
            }
        }
    }
}
