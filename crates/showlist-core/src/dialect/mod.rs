//! # Dialect Detection
//!
//! Infers how a delimited text file is split into fields from a bounded
//! sample of its contents. Only the delimiter is mandatory; quoting details
//! fall back to CSV defaults when the sample has no quoted fields.

pub mod frequency;
pub mod quote;
pub mod sniffer;
mod space;

use std::fmt;
use std::io::Read;

use csv::{Reader, ReaderBuilder};
use serde::{Deserialize, Serialize};

pub use sniffer::{DEFAULT_DELIMITERS, Sniffer};
pub use space::SkipInitialSpace;

/// Delimiter and quoting convention of a delimited text file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dialect {
    /// Field separator.
    pub delimiter: u8,
    /// Quote character.
    pub quote: u8,
    /// Quotes inside quoted fields are escaped by doubling them.
    pub double_quote: bool,
    /// Spaces directly after a delimiter are not part of the next field.
    pub skip_initial_space: bool,
}

impl Default for Dialect {
    fn default() -> Self {
        Self {
            delimiter: b',',
            quote: b'"',
            double_quote: true,
            skip_initial_space: false,
        }
    }
}

impl Dialect {
    /// A `csv` reader builder for this dialect.
    ///
    /// Header handling is left to the caller and rows may differ in length.
    #[must_use]
    pub fn reader_builder(&self) -> ReaderBuilder {
        let mut builder = ReaderBuilder::new();
        builder
            .delimiter(self.delimiter)
            .quote(self.quote)
            .double_quote(self.double_quote)
            .has_headers(false)
            .flexible(true);
        builder
    }

    /// A `csv` reader over `rdr` for this dialect.
    ///
    /// Spaces opening a field are dropped before parsing when
    /// `skip_initial_space` is set, so quoted fields after `, ` still parse
    /// as quoted.
    pub fn reader<R: Read>(&self, rdr: R) -> Reader<SkipInitialSpace<R>> {
        self.reader_builder().from_reader(SkipInitialSpace::new(rdr, *self))
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "delimiter={:?} quote={:?}",
            char::from(self.delimiter),
            char::from(self.quote)
        )?;
        if self.double_quote {
            write!(f, " doublequote")?;
        }
        if self.skip_initial_space {
            write!(f, " skipinitialspace")?;
        }
        Ok(())
    }
}
