use std::io;

use csv::{StringRecord, StringRecordsIntoIter};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::dialect::{Dialect, SkipInitialSpace};
use crate::error::Result;

/// Header that marks a file as column-keyed.
pub const TITLE_COLUMN: &str = "Title";

/// Where each row's title comes from, decided once from the first record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TitleSource {
    /// The first record is a header naming a `Title` column.
    Keyed {
        /// Zero-based index of the `Title` column.
        column: usize,
    },
    /// No usable header; the first field of every row is the title.
    Positional,
}

/// Streams raw title fields out of a delimited file.
///
/// Rows too short to hold the title column yield an empty string, which the
/// caller is expected to skip.
pub struct TitleReader<R> {
    records: StringRecordsIntoIter<SkipInitialSpace<R>>,
    source: TitleSource,
    pending: Option<StringRecord>,
}

impl<R: io::Read> TitleReader<R> {
    /// Reads the first record and selects the [`TitleSource`].
    ///
    /// In keyed mode the header is consumed; in positional mode the first
    /// record is yielded like any other row.
    ///
    /// # Errors
    ///
    /// Returns `ShowlistError::Csv` if the first record cannot be parsed.
    pub fn new(reader: R, dialect: &Dialect) -> Result<Self> {
        let mut records = dialect.reader(reader).into_records();
        let first = records.next().transpose()?;

        // Later duplicates shadow earlier ones, as in a header-to-value map.
        let source = first
            .as_ref()
            .and_then(|header| {
                header
                    .iter()
                    .enumerate()
                    .filter(|(_, name)| *name == TITLE_COLUMN)
                    .last()
                    .map(|(column, _)| column)
            })
            .map_or(TitleSource::Positional, |column| TitleSource::Keyed { column });
        debug!(?source, "selected title source");

        let pending = match source {
            TitleSource::Keyed { .. } => None,
            TitleSource::Positional => first,
        };

        Ok(Self {
            records,
            source,
            pending,
        })
    }

    /// The title source selected for this file.
    pub fn source(&self) -> TitleSource {
        self.source
    }

    fn title_of(&self, record: &StringRecord) -> String {
        let column = match self.source {
            TitleSource::Keyed { column } => column,
            TitleSource::Positional => 0,
        };
        record.get(column).unwrap_or_default().to_string()
    }
}

impl<R: io::Read> Iterator for TitleReader<R> {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        let record = match self.pending.take() {
            Some(record) => record,
            None => match self.records.next()? {
                Ok(record) => record,
                Err(e) => return Some(Err(e.into())),
            },
        };
        Some(Ok(self.title_of(&record)))
    }
}
