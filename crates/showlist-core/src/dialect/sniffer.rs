use tracing::debug;

use super::{Dialect, frequency, quote};
use crate::error::{Result, ShowlistError};

/// Delimiters considered when none are configured: tab, comma, semicolon.
pub const DEFAULT_DELIMITERS: [u8; 3] = [b'\t', b',', b';'];

/// Infers the [`Dialect`] of a delimited file from a sample of its text.
///
/// The quoted-field pass runs first; the frequency pass only runs when it
/// could not settle the delimiter.
#[derive(Debug, Clone)]
pub struct Sniffer {
    delimiters: Vec<char>,
}

impl Default for Sniffer {
    fn default() -> Self {
        Self::new(&DEFAULT_DELIMITERS)
    }
}

impl Sniffer {
    /// Creates a sniffer restricted to the given candidate delimiters.
    pub fn new(delimiters: &[u8]) -> Self {
        Self {
            delimiters: delimiters.iter().copied().map(char::from).collect(),
        }
    }

    /// Sniffs the dialect of `sample`.
    ///
    /// # Errors
    ///
    /// Returns `ShowlistError::DialectDetection` when no candidate delimiter
    /// is used consistently in the sample.
    ///
    /// # Examples
    /// ```
    /// use showlist_core::dialect::Sniffer;
    ///
    /// let dialect = Sniffer::default().sniff("Title;Date\nLost: Episode 1;2020\n").unwrap();
    /// assert_eq!(dialect.delimiter, b';');
    /// ```
    pub fn sniff(&self, sample: &str) -> Result<Dialect> {
        let quoted = quote::guess(sample, &self.delimiters)?;

        let quoted_delimiter = quoted.and_then(|q| q.delimiter.map(|d| (d, q.skip_initial_space)));

        let (delimiter, skip_initial_space) = if let Some(found) = quoted_delimiter {
            found
        } else if let Some(f) = frequency::guess(sample, &self.delimiters) {
            (f.delimiter, f.skip_initial_space)
        } else if let Some(d) = self.single_column(sample) {
            debug!("no candidate delimiter in sample, reading a single column");
            (d, false)
        } else {
            return Err(ShowlistError::DialectDetection {
                reason: format!(
                    "none of {:?} occurs consistently in the first {} characters",
                    self.delimiters,
                    sample.chars().count()
                ),
            });
        };

        // Candidates are built from bytes, so they always fit back into one.
        let delimiter = u8::try_from(delimiter).map_err(|_| ShowlistError::DialectDetection {
            reason: format!("delimiter {delimiter:?} is not a single byte"),
        })?;

        let dialect = Dialect {
            delimiter,
            quote: quoted.map_or(b'"', |q| q.quote as u8),
            double_quote: quoted.is_some_and(|q| q.double_quote),
            skip_initial_space,
        };
        debug!(%dialect, quoted = quoted.is_some(), "sniffed dialect");

        Ok(dialect)
    }

    /// A sample with content but no candidate delimiter anywhere is one
    /// column wide; it is read with the first candidate.
    fn single_column(&self, sample: &str) -> Option<char> {
        let has_content = sample.split('\n').any(|line| !line.trim().is_empty());
        let has_candidate = sample.chars().any(|c| self.delimiters.contains(&c));
        if has_content && !has_candidate {
            self.delimiters.first().copied()
        } else {
            None
        }
    }
}
