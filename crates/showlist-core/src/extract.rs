//! # Extraction Pipeline
//!
//! Ties the pieces together: read the export, sniff its dialect, stream the
//! title column, normalize and classify each title, collect the series base
//! names and write them out sorted.

use std::borrow::Cow;
use std::fmt;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::classify::EpisodeClassifier;
use crate::dialect::{DEFAULT_DELIMITERS, Dialect, Sniffer};
use crate::error::{Result, ShowlistError};
use crate::series::SeriesSet;
use crate::source::{TitleReader, TitleSource};
use crate::text::normalize;

/// Input file used when none is given.
pub const DEFAULT_INPUT_FILE: &str = "input.csv";

/// Output file, overwritten on every run.
pub const DEFAULT_OUTPUT_FILE: &str = "series_only.txt";

/// Characters of the input examined by the dialect sniffer.
pub const DEFAULT_SAMPLE_CHARS: usize = 4096;

/// Configuration for a single extraction run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractConfig {
    /// Delimited export to read.
    pub input: PathBuf,
    /// File the sorted series names are written to.
    pub output: PathBuf,
    /// Size of the sniffing sample, in characters.
    pub sample_chars: usize,
    /// Candidate delimiters for the sniffer.
    pub delimiters: Vec<u8>,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT_FILE),
            output: PathBuf::from(DEFAULT_OUTPUT_FILE),
            sample_chars: DEFAULT_SAMPLE_CHARS,
            delimiters: DEFAULT_DELIMITERS.to_vec(),
        }
    }
}

impl ExtractConfig {
    /// Create a new configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the input file.
    pub fn with_input(mut self, input: impl Into<PathBuf>) -> Self {
        self.input = input.into();
        self
    }

    /// Set the output file.
    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = output.into();
        self
    }

    /// Set the sniffing sample size. At least one character is always sampled.
    pub fn with_sample_size(mut self, chars: usize) -> Self {
        self.sample_chars = chars.max(1);
        self
    }

    /// Set the candidate delimiters.
    pub fn with_delimiters(mut self, delimiters: &[u8]) -> Self {
        self.delimiters = delimiters.to_vec();
        self
    }
}

/// Row counters gathered during a scan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanStats {
    /// Data rows read, header excluded.
    pub rows_scanned: usize,
    /// Rows skipped because their title was empty after normalization.
    pub empty_titles: usize,
    /// Rows classified as episodic.
    pub episodic_rows: usize,
}

/// Everything a scan of one export produced.
#[derive(Debug, Clone)]
pub struct Scan {
    /// Unique series names found.
    pub series: SeriesSet,
    /// Dialect sniffed from the sample.
    pub dialect: Dialect,
    /// How titles were located in each row.
    pub source: TitleSource,
    /// Row counters.
    pub stats: ScanStats,
}

/// Outcome of a completed run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractSummary {
    /// Number of unique series written.
    pub unique_series: usize,
    /// Where they were written.
    pub output: PathBuf,
    /// Dialect the input was read with.
    pub dialect: Dialect,
    /// How titles were located in each row.
    pub source: TitleSource,
    /// Row counters.
    pub stats: ScanStats,
}

impl fmt::Display for ExtractSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Wrote {} series to {}",
            self.unique_series,
            self.output.display()
        )
    }
}

/// Runs the extraction pipeline for one [`ExtractConfig`].
#[derive(Debug, Clone)]
pub struct Extractor {
    config: ExtractConfig,
    sniffer: Sniffer,
    classifier: EpisodeClassifier,
}

impl Extractor {
    /// Builds an extractor, compiling the episode classifier.
    ///
    /// # Errors
    ///
    /// Returns `ShowlistError::RegexError` if the classifier pattern fails to
    /// compile.
    pub fn new(config: ExtractConfig) -> Result<Self> {
        let sniffer = Sniffer::new(&config.delimiters);
        Ok(Self {
            config,
            sniffer,
            classifier: EpisodeClassifier::new()?,
        })
    }

    /// Collects the series names found in already-decoded file contents.
    ///
    /// # Errors
    ///
    /// Returns `ShowlistError::DialectDetection` if the dialect cannot be
    /// sniffed, or `ShowlistError::Csv` on a malformed record.
    ///
    /// # Examples
    /// ```
    /// use showlist_core::{ExtractConfig, Extractor};
    ///
    /// let extractor = Extractor::new(ExtractConfig::new()).unwrap();
    /// let scan = extractor
    ///     .scan("Title,Date\nThe Wire: Season 1,2020\nThe Wire: Season 2,2020\nInception,2021\n")
    ///     .unwrap();
    ///
    /// assert_eq!(scan.series.into_sorted(), vec!["The Wire"]);
    /// ```
    pub fn scan(&self, text: &str) -> Result<Scan> {
        let dialect = self.sniffer.sniff(sample(text, self.config.sample_chars))?;
        let reader = TitleReader::new(text.as_bytes(), &dialect)?;
        let source = reader.source();

        let mut series = SeriesSet::new();
        let mut stats = ScanStats::default();

        for raw in reader {
            let raw = raw?;
            stats.rows_scanned += 1;

            let title = normalize(&raw);
            if title.is_empty() {
                stats.empty_titles += 1;
                continue;
            }

            if let Some(name) = self.classifier.series_name(&title) {
                stats.episodic_rows += 1;
                if series.insert(name) {
                    debug!(series = name, "new series");
                }
            }
        }

        info!(
            rows = stats.rows_scanned,
            episodic = stats.episodic_rows,
            unique = series.len(),
            "scanned titles"
        );

        Ok(Scan {
            series,
            dialect,
            source,
            stats,
        })
    }

    /// Reads the configured input, scans it and writes the sorted series
    /// names to the configured output.
    ///
    /// The output file is only touched once the whole input has been scanned.
    ///
    /// # Errors
    ///
    /// Returns `ShowlistError::Io` if the input cannot be read,
    /// `ShowlistError::Output` if the output cannot be written, or any error
    /// from [`Extractor::scan`].
    pub fn run(&self) -> Result<ExtractSummary> {
        let input = &self.config.input;
        let bytes = fs::read(input).map_err(|source| ShowlistError::Io {
            path: input.clone(),
            source,
        })?;
        debug!(path = %input.display(), bytes = bytes.len(), "read input");

        let text = decode_lossy(&bytes);
        let Scan {
            series,
            dialect,
            source,
            stats,
        } = self.scan(&text)?;

        if series.is_empty() {
            warn!(path = %input.display(), "no episodic titles found");
        }

        let unique_series = series.len();
        write_series(&self.config.output, series)?;

        Ok(ExtractSummary {
            unique_series,
            output: self.config.output.clone(),
            dialect,
            source,
            stats,
        })
    }
}

/// Decodes UTF-8, replacing malformed sequences with U+FFFD.
///
/// A leading byte-order mark is kept as text.
pub fn decode_lossy(bytes: &[u8]) -> Cow<'_, str> {
    encoding_rs::UTF_8.decode_without_bom_handling(bytes).0
}

/// The first `max_chars` characters of `text`.
pub fn sample(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}

fn write_series(path: &Path, series: SeriesSet) -> Result<()> {
    let output_error = |source| ShowlistError::Output {
        path: path.to_path_buf(),
        source,
    };
    let file = File::create(path).map_err(output_error)?;
    series.write_to(BufWriter::new(file)).map_err(output_error)
}
